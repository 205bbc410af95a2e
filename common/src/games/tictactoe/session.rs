use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::games::SessionRng;
use crate::log;
use super::broadcaster::MoveBroadcaster;
use super::game_state::SharedGameState;
use super::player::{Player, Strategy};
use super::types::{Mark, MoveRecord, Outcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TicTacToeSessionSettings {
    pub player_x: Strategy,
    pub player_o: Strategy,
    pub move_delay: Duration,
    pub seed: u64,
}

impl Default for TicTacToeSessionSettings {
    fn default() -> Self {
        Self {
            player_x: Strategy::Sequential,
            player_o: Strategy::Random,
            move_delay: Duration::from_millis(100),
            seed: 0,
        }
    }
}

impl TicTacToeSessionSettings {
    pub fn strategy_for(&self, mark: Mark) -> Strategy {
        match mark {
            Mark::O => self.player_o,
            _ => self.player_x,
        }
    }

    // Each player draws from its own stream so X and O never share a sequence.
    fn rng_for(&self, mark: Mark) -> SessionRng {
        let offset = match mark {
            Mark::O => 1,
            _ => 0,
        };
        SessionRng::new(self.seed.wrapping_add(offset))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameResult {
    pub outcome: Outcome,
    pub moves: Vec<MoveRecord>,
}

pub struct TicTacToeSession;

impl TicTacToeSession {
    /// Runs one game with each player on its own thread and waits for both to finish.
    pub fn run<B: MoveBroadcaster>(
        settings: &TicTacToeSessionSettings,
        broadcaster: B,
    ) -> Result<GameResult, String> {
        let game = Arc::new(SharedGameState::new(broadcaster));

        log!(
            "Starting game: X plays {}, O plays {}, seed {}",
            settings.player_x,
            settings.player_o,
            settings.seed
        );

        let handles = [Mark::X, Mark::O]
            .into_iter()
            .map(|mark| spawn_player(&game, settings, mark))
            .collect::<Result<Vec<_>, String>>()?;

        for (mark, handle) in handles {
            match handle.join() {
                Ok(accepted) => log!("Player {} finished after {} accepted moves", mark, accepted),
                Err(_) => log!("Player {} thread panicked", mark),
            }
        }

        let result = GameResult {
            outcome: game.winner(),
            moves: game.moves(),
        };
        log!("Game over: {:?} after {} moves", result.outcome, result.moves.len());

        Ok(result)
    }
}

fn spawn_player<B: MoveBroadcaster>(
    game: &Arc<SharedGameState<B>>,
    settings: &TicTacToeSessionSettings,
    mark: Mark,
) -> Result<(Mark, JoinHandle<usize>), String> {
    let mut player = Player::new(
        Arc::clone(game),
        mark,
        settings.strategy_for(mark),
        settings.rng_for(mark),
        settings.move_delay,
    );

    thread::Builder::new()
        .name(format!("player-{}", mark))
        .spawn(move || player.play())
        .map(|handle| (mark, handle))
        .map_err(|e| format!("Failed to spawn thread for player {}: {}", mark, e))
}
