use super::board::Board;
use super::types::{Mark, Position};

const fn p(row: usize, col: usize) -> Position {
    Position { row, col }
}

/// Rows, columns, then the two diagonals.
pub const LINES: [[Position; 3]; 8] = [
    [p(0, 0), p(0, 1), p(0, 2)],
    [p(1, 0), p(1, 1), p(1, 2)],
    [p(2, 0), p(2, 1), p(2, 2)],
    [p(0, 0), p(1, 0), p(2, 0)],
    [p(0, 1), p(1, 1), p(2, 1)],
    [p(0, 2), p(1, 2), p(2, 2)],
    [p(0, 0), p(1, 1), p(2, 2)],
    [p(0, 2), p(1, 1), p(2, 0)],
];

pub fn check_win(board: &Board, mark: Mark) -> bool {
    check_win_with_line(board, mark).is_some()
}

pub fn check_win_with_line(board: &Board, mark: Mark) -> Option<[Position; 3]> {
    if mark == Mark::Empty {
        return None;
    }

    LINES
        .iter()
        .find(|line| line.iter().all(|&pos| board.get(pos) == Some(mark)))
        .copied()
}
