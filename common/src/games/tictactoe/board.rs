use super::types::{Mark, Position};

pub const BOARD_SIZE: usize = 3;

const ROW_DIVIDER: &str = "---+---+---";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [[Mark; BOARD_SIZE]; BOARD_SIZE],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [[Mark::Empty; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    pub fn from_rows(rows: [[Mark; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        Self { cells: rows }
    }

    pub fn contains(position: Position) -> bool {
        position.row < BOARD_SIZE && position.col < BOARD_SIZE
    }

    /// All cells in row-major order.
    pub fn positions() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Position::new(row, col)))
    }

    pub fn get(&self, position: Position) -> Option<Mark> {
        if !Self::contains(position) {
            return None;
        }
        Some(self.cells[position.row][position.col])
    }

    pub(crate) fn set(&mut self, position: Position, mark: Mark) {
        self.cells[position.row][position.col] = mark;
    }

    pub fn is_full(&self) -> bool {
        self.cells
            .iter()
            .all(|row| row.iter().all(|&cell| cell != Mark::Empty))
    }

    pub fn available_moves(&self) -> Vec<Position> {
        Self::positions()
            .filter(|&position| self.cells[position.row][position.col] == Mark::Empty)
            .collect()
    }

    pub fn count(&self, mark: Mark) -> usize {
        self.cells
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&cell| cell == mark)
            .count()
    }

    pub fn render(&self) -> String {
        let mut out = String::from("\n");
        for (i, row) in self.cells.iter().enumerate() {
            let cells: Vec<String> = row.iter().map(|mark| mark.to_string()).collect();
            out.push(' ');
            out.push_str(&cells.join(" | "));
            out.push('\n');
            if i + 1 < BOARD_SIZE {
                out.push_str(ROW_DIVIDER);
                out.push('\n');
            }
        }
        out.push('\n');
        out
    }
}
