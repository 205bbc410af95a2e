mod config;

use clap::Parser;
use common::games::tictactoe::{ConsoleBroadcaster, Outcome, TicTacToeSession};
use common::{log, logger};
use config::{CONFIG_FILE, Config, get_config_manager};

#[derive(Parser)]
#[command(name = "tictactoe_runner")]
struct Args {
    #[arg(long)]
    use_log_prefix: bool,

    /// YAML file with pacing and strategy settings; defaults apply when it is missing.
    #[arg(long, default_value = CONFIG_FILE)]
    config: String,

    /// Seed for the random strategy, overriding the config file.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Runner".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let config = load_config(&args.config);
    let settings = config.to_session_settings(args.seed);

    match TicTacToeSession::run(&settings, ConsoleBroadcaster) {
        Ok(result) => println!("{}", result_message(result.outcome)),
        Err(e) => log!("Game aborted: {}", e),
    }
}

fn load_config(path: &str) -> Config {
    match get_config_manager(path).get_config() {
        Ok(config) => config,
        Err(e) => {
            log!("Using default config: {}", e);
            Config::default()
        }
    }
}

fn result_message(outcome: Outcome) -> String {
    match outcome {
        Outcome::Win(mark) => format!("Jogador {} venceu!", mark),
        Outcome::Draw => "Empate!".to_string(),
        Outcome::InProgress => "Jogo inacabado!".to_string(),
    }
}
