use parking_lot::{Condvar, Mutex};

use crate::log;
use super::board::Board;
use super::broadcaster::MoveBroadcaster;
use super::types::{Mark, MoveRecord, Outcome, Position};
use super::win_detector::check_win;

pub const FIRST_MARK: Mark = Mark::X;

#[derive(Debug)]
struct GameState {
    board: Board,
    current_mark: Mark,
    outcome: Outcome,
    moves: Vec<MoveRecord>,
}

impl GameState {
    fn new() -> Self {
        Self {
            board: Board::new(),
            current_mark: FIRST_MARK,
            outcome: Outcome::InProgress,
            moves: Vec::new(),
        }
    }

    fn place_mark(&mut self, mark: Mark, position: Position) -> Result<MoveRecord, String> {
        if self.outcome.is_terminal() {
            return Err("Game is already over".to_string());
        }

        if mark != self.current_mark {
            return Err("Not your turn".to_string());
        }

        match self.board.get(position) {
            None => return Err("Position out of bounds".to_string()),
            Some(Mark::Empty) => {}
            Some(_) => return Err("Cell is already marked".to_string()),
        }

        self.board.set(position, mark);
        let record = MoveRecord::new(mark, position);
        self.moves.push(record);

        self.check_game_over(mark);

        if self.outcome == Outcome::InProgress {
            self.switch_turn();
        }

        Ok(record)
    }

    fn switch_turn(&mut self) {
        if let Some(next) = self.current_mark.opponent() {
            self.current_mark = next;
        }
    }

    // Win before draw: a move that fills the board and completes a line is a win.
    fn check_game_over(&mut self, mark: Mark) {
        if check_win(&self.board, mark) {
            self.outcome = Outcome::Win(mark);
            return;
        }

        if self.board.is_full() {
            self.outcome = Outcome::Draw;
        }
    }
}

/// The single board both players write into.
///
/// Board, turn, outcome and move history live behind one mutex and always
/// change together. `attempt_move` parks the caller on a condition variable
/// until it is that player's turn or the game is over; every accepted move
/// wakes all waiters so each re-checks its own predicate.
pub struct SharedGameState<B: MoveBroadcaster> {
    state: Mutex<GameState>,
    turn_changed: Condvar,
    broadcaster: B,
}

impl<B: MoveBroadcaster> SharedGameState<B> {
    pub fn new(broadcaster: B) -> Self {
        Self {
            state: Mutex::new(GameState::new()),
            turn_changed: Condvar::new(),
            broadcaster,
        }
    }

    /// Blocks until `mark` may move or the game has ended, then tries to claim
    /// the cell. Returns `false` when the cell is taken or the game is over; a
    /// rejected attempt does not consume the turn.
    pub fn attempt_move(&self, mark: Mark, row: usize, col: usize) -> bool {
        let position = Position::new(row, col);

        if !mark.is_player() {
            log!("Rejected move at {}: {:?} is not a player mark", position, mark);
            return false;
        }

        if !Board::contains(position) {
            log!("Rejected move by {}: {} is outside the board", mark, position);
            return false;
        }

        let mut state = self.state.lock();
        self.turn_changed.wait_while(&mut state, |state| {
            state.outcome == Outcome::InProgress && state.current_mark != mark
        });

        let record = match state.place_mark(mark, position) {
            Ok(record) => record,
            Err(_) => return false,
        };

        self.broadcaster.move_accepted(&record, &state.board);
        self.turn_changed.notify_all();
        true
    }

    pub fn is_finished(&self) -> bool {
        self.state.lock().outcome.is_terminal()
    }

    pub fn winner(&self) -> Outcome {
        self.state.lock().outcome
    }

    pub fn current_turn(&self) -> Mark {
        self.state.lock().current_mark
    }

    pub fn snapshot(&self) -> Board {
        self.state.lock().board
    }

    pub fn moves(&self) -> Vec<MoveRecord> {
        self.state.lock().moves.clone()
    }

    pub fn broadcaster(&self) -> &B {
        &self.broadcaster
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::{Arc, Barrier};
    use std::thread;
    use std::time::Duration;

    #[derive(Default)]
    pub(crate) struct RecordingBroadcaster {
        pub(crate) events: Mutex<Vec<(MoveRecord, Board)>>,
    }

    impl MoveBroadcaster for RecordingBroadcaster {
        fn move_accepted(&self, record: &MoveRecord, board: &Board) {
            self.events.lock().push((*record, *board));
        }
    }

    fn new_game() -> SharedGameState<RecordingBroadcaster> {
        SharedGameState::new(RecordingBroadcaster::default())
    }

    fn play_all(game: &SharedGameState<RecordingBroadcaster>, moves: &[(Mark, usize, usize)]) {
        for &(mark, row, col) in moves {
            assert!(game.attempt_move(mark, row, col), "{} at ({}, {}) rejected", mark, row, col);
        }
    }

    #[test]
    fn test_new_game_starts_with_x_in_progress() {
        let game = new_game();

        assert_eq!(game.current_turn(), Mark::X);
        assert_eq!(game.winner(), Outcome::InProgress);
        assert!(!game.is_finished());
        assert_eq!(game.snapshot(), Board::new());
    }

    #[test]
    fn test_accepted_move_flips_turn_and_broadcasts() {
        let game = new_game();

        assert!(game.attempt_move(Mark::X, 1, 1));

        assert_eq!(game.current_turn(), Mark::O);
        assert_eq!(game.snapshot().get(Position::new(1, 1)), Some(Mark::X));
        let events = game.broadcaster().events.lock();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].0, MoveRecord::new(Mark::X, Position::new(1, 1)));
        assert_eq!(events[0].1.get(Position::new(1, 1)), Some(Mark::X));
    }

    #[test]
    fn test_occupied_cell_is_rejected_without_state_change() {
        let game = new_game();
        play_all(&game, &[(Mark::X, 0, 0)]);
        let before = game.snapshot();

        assert!(!game.attempt_move(Mark::O, 0, 0));

        assert_eq!(game.snapshot(), before);
        assert_eq!(game.current_turn(), Mark::O);
        assert_eq!(game.winner(), Outcome::InProgress);
        assert_eq!(game.moves().len(), 1);
        assert_eq!(game.broadcaster().events.lock().len(), 1);

        assert!(game.attempt_move(Mark::O, 1, 1));
        assert_eq!(game.current_turn(), Mark::X);
    }

    #[test]
    fn test_top_row_wins_for_x() {
        let game = new_game();

        play_all(
            &game,
            &[
                (Mark::X, 0, 0),
                (Mark::O, 1, 0),
                (Mark::X, 0, 1),
                (Mark::O, 1, 1),
                (Mark::X, 0, 2),
            ],
        );

        assert!(game.is_finished());
        assert_eq!(game.winner(), Outcome::Win(Mark::X));
        // Turn stays with the winner once the game is over.
        assert_eq!(game.current_turn(), Mark::X);
    }

    #[test]
    fn test_full_board_without_line_is_draw() {
        let game = new_game();

        play_all(
            &game,
            &[
                (Mark::X, 0, 0),
                (Mark::O, 0, 1),
                (Mark::X, 0, 2),
                (Mark::O, 1, 1),
                (Mark::X, 1, 0),
                (Mark::O, 2, 0),
                (Mark::X, 2, 1),
                (Mark::O, 1, 2),
            ],
        );
        assert_eq!(game.winner(), Outcome::InProgress);

        assert!(game.attempt_move(Mark::X, 2, 2));

        assert!(game.is_finished());
        assert_eq!(game.winner(), Outcome::Draw);
        assert!(game.snapshot().is_full());
    }

    #[test]
    fn test_win_takes_precedence_over_full_board() {
        let game = new_game();

        play_all(
            &game,
            &[
                (Mark::X, 0, 0),
                (Mark::O, 0, 1),
                (Mark::X, 0, 2),
                (Mark::O, 1, 0),
                (Mark::X, 1, 1),
                (Mark::O, 2, 0),
                (Mark::X, 2, 1),
                (Mark::O, 1, 2),
                (Mark::X, 2, 2),
            ],
        );

        assert!(game.snapshot().is_full());
        assert_eq!(game.winner(), Outcome::Win(Mark::X));
    }

    #[test]
    fn test_terminal_outcome_never_changes() {
        let game = new_game();
        play_all(
            &game,
            &[
                (Mark::X, 0, 0),
                (Mark::O, 1, 0),
                (Mark::X, 0, 1),
                (Mark::O, 1, 1),
                (Mark::X, 0, 2),
            ],
        );
        let board = game.snapshot();

        assert!(!game.attempt_move(Mark::O, 1, 2));
        assert!(!game.attempt_move(Mark::X, 2, 2));

        assert_eq!(game.winner(), Outcome::Win(Mark::X));
        assert_eq!(game.snapshot(), board);
        assert_eq!(game.moves().len(), 5);
    }

    #[test]
    fn test_invalid_arguments_are_rejected_without_blocking() {
        let game = new_game();

        assert!(!game.attempt_move(Mark::Empty, 0, 0));
        assert!(!game.attempt_move(Mark::X, 3, 0));
        assert!(!game.attempt_move(Mark::X, 0, 3));
        // O is not on turn, but an out-of-range cell must not park the caller.
        assert!(!game.attempt_move(Mark::O, 5, 5));

        assert!(game.moves().is_empty());
        assert_eq!(game.current_turn(), Mark::X);
    }

    #[test]
    fn test_contended_cell_is_claimed_exactly_once() {
        for _ in 0..50 {
            let game = Arc::new(new_game());
            let barrier = Arc::new(Barrier::new(2));

            let handles: Vec<_> = [Mark::X, Mark::O]
                .into_iter()
                .map(|mark| {
                    let game = Arc::clone(&game);
                    let barrier = Arc::clone(&barrier);
                    thread::spawn(move || {
                        barrier.wait();
                        game.attempt_move(mark, 1, 1)
                    })
                })
                .collect();

            let results: Vec<bool> = handles.into_iter().map(|h| h.join().unwrap()).collect();

            assert_eq!(results.iter().filter(|&&accepted| accepted).count(), 1);
            assert_eq!(game.moves().len(), 1);
            assert_eq!(game.snapshot().count(Mark::Empty), 8);
        }
    }

    #[test]
    fn test_waiting_player_blocks_until_turn() {
        let game = Arc::new(new_game());

        let waiter = {
            let game = Arc::clone(&game);
            thread::spawn(move || game.attempt_move(Mark::O, 2, 2))
        };

        thread::sleep(Duration::from_millis(50));
        assert!(game.moves().is_empty());

        assert!(game.attempt_move(Mark::X, 0, 0));
        assert!(waiter.join().unwrap());

        let moves = game.moves();
        assert_eq!(moves[0].mark, Mark::X);
        assert_eq!(moves[1], MoveRecord::new(Mark::O, Position::new(2, 2)));
    }

    #[test]
    fn test_game_end_releases_blocked_loser() {
        let game = Arc::new(new_game());
        play_all(
            &game,
            &[
                (Mark::X, 0, 0),
                (Mark::O, 1, 0),
                (Mark::X, 0, 1),
                (Mark::O, 1, 1),
            ],
        );

        let loser = {
            let game = Arc::clone(&game);
            thread::spawn(move || game.attempt_move(Mark::O, 1, 2))
        };

        thread::sleep(Duration::from_millis(50));
        assert!(game.attempt_move(Mark::X, 0, 2));

        assert!(!loser.join().unwrap());
        assert_eq!(game.winner(), Outcome::Win(Mark::X));
        assert_eq!(game.snapshot().get(Position::new(1, 2)), Some(Mark::Empty));
    }

    #[test]
    fn test_broadcasts_follow_acceptance_order() {
        let game = new_game();
        play_all(
            &game,
            &[(Mark::X, 2, 2), (Mark::O, 0, 0), (Mark::X, 1, 1)],
        );

        let events = game.broadcaster().events.lock();
        let recorded: Vec<MoveRecord> = events.iter().map(|(record, _)| *record).collect();

        assert_eq!(recorded, game.moves());
        for (i, (_, board)) in events.iter().enumerate() {
            assert_eq!(board.count(Mark::Empty), 9 - (i + 1));
        }
    }
}
