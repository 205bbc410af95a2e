mod session_rng;

pub mod tictactoe;

pub use session_rng::{SessionRng, random_seed};
