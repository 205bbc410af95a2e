use std::io::Write;

use super::board::Board;
use super::types::MoveRecord;

/// Receives every accepted move while the game state is still locked, so
/// implementations see moves in acceptance order and never interleave.
pub trait MoveBroadcaster: Send + Sync + 'static {
    fn move_accepted(&self, record: &MoveRecord, board: &Board);
}

/// Prints the board after each accepted move.
#[derive(Clone, Copy, Default)]
pub struct ConsoleBroadcaster;

impl MoveBroadcaster for ConsoleBroadcaster {
    fn move_accepted(&self, _record: &MoveRecord, board: &Board) {
        let mut stdout = std::io::stdout().lock();
        let _ = stdout.write_all(board.render().as_bytes());
        let _ = stdout.flush();
    }
}

/// Discards moves; used where only the outcome matters.
#[derive(Clone, Copy, Default)]
pub struct SilentBroadcaster;

impl MoveBroadcaster for SilentBroadcaster {
    fn move_accepted(&self, _record: &MoveRecord, _board: &Board) {}
}
