use std::time::Duration;

use common::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};
use common::games::random_seed;
use common::games::tictactoe::{Strategy, TicTacToeSessionSettings};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = "tictactoe_config.yaml";

const MAX_MOVE_DELAY_MS: u32 = 5000;

pub fn get_config_manager(path: &str) -> ConfigManager<FileContentConfigProvider, Config, YamlConfigSerializer> {
    ConfigManager::from_yaml_file(path)
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Config {
    pub move_delay_ms: u32,
    pub player_x: Strategy,
    pub player_o: Strategy,
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            move_delay_ms: 100,
            player_x: Strategy::Sequential,
            player_o: Strategy::Random,
            seed: None,
        }
    }
}

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        if self.move_delay_ms > MAX_MOVE_DELAY_MS {
            return Err(format!(
                "move_delay_ms must not exceed {}, got {}",
                MAX_MOVE_DELAY_MS, self.move_delay_ms
            ));
        }
        Ok(())
    }
}

impl Config {
    /// A seed given on the command line wins over the configured one; without either a fresh seed is drawn.
    pub fn to_session_settings(&self, seed_override: Option<u64>) -> TicTacToeSessionSettings {
        TicTacToeSessionSettings {
            player_x: self.player_x,
            player_o: self.player_o,
            move_delay: Duration::from_millis(self.move_delay_ms as u64),
            seed: seed_override.or(self.seed).unwrap_or_else(random_seed),
        }
    }
}
