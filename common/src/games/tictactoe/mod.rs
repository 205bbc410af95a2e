mod board;
mod broadcaster;
mod game_state;
mod player;
mod session;
mod types;
mod win_detector;

pub use board::{BOARD_SIZE, Board};
pub use broadcaster::{ConsoleBroadcaster, MoveBroadcaster, SilentBroadcaster};
pub use game_state::{FIRST_MARK, SharedGameState};
pub use player::{Player, Strategy};
pub use session::{GameResult, TicTacToeSession, TicTacToeSessionSettings};
pub use types::{Mark, MoveRecord, Outcome, Position};
pub use win_detector::{LINES, check_win, check_win_with_line};
