use std::fmt;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::games::SessionRng;
use super::board::{BOARD_SIZE, Board};
use super::broadcaster::MoveBroadcaster;
use super::game_state::SharedGameState;
use super::types::Mark;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Row-major scan of every cell, repeated until the game ends.
    Sequential,
    /// Uniformly random cell, retried immediately when occupied.
    Random,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Sequential => "sequential",
            Strategy::Random => "random",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub struct Player<B: MoveBroadcaster> {
    game: Arc<SharedGameState<B>>,
    mark: Mark,
    strategy: Strategy,
    rng: SessionRng,
    move_delay: Duration,
}

impl<B: MoveBroadcaster> Player<B> {
    pub fn new(
        game: Arc<SharedGameState<B>>,
        mark: Mark,
        strategy: Strategy,
        rng: SessionRng,
        move_delay: Duration,
    ) -> Self {
        Self {
            game,
            mark,
            strategy,
            rng,
            move_delay,
        }
    }

    /// Plays until the game reports an outcome. Returns the number of accepted moves.
    pub fn play(&mut self) -> usize {
        match self.strategy {
            Strategy::Sequential => self.play_sequential(),
            Strategy::Random => self.play_random(),
        }
    }

    fn play_sequential(&mut self) -> usize {
        let mut accepted = 0;

        while !self.game.is_finished() {
            for position in Board::positions() {
                if self.game.is_finished() {
                    return accepted;
                }

                if self.game.attempt_move(self.mark, position.row, position.col) {
                    accepted += 1;
                    self.pause();
                }

                if self.game.is_finished() {
                    return accepted;
                }
            }
        }

        accepted
    }

    fn play_random(&mut self) -> usize {
        let mut accepted = 0;

        while !self.game.is_finished() {
            let row = self.rng.random_range(0..BOARD_SIZE);
            let col = self.rng.random_range(0..BOARD_SIZE);

            if self.game.attempt_move(self.mark, row, col) {
                accepted += 1;
                self.pause();
            }
        }

        accepted
    }

    fn pause(&self) {
        if !self.move_delay.is_zero() {
            thread::sleep(self.move_delay);
        }
    }
}
