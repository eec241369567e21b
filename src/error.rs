use thiserror::Error;

/// Rejected board parameters, caught before a game ever starts.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board {width}x{height} is too small")]
    TooSmall { width: u16, height: u16 },
    #[error("difficulty {0} is out of range, expected 1 to 100")]
    Difficulty(u8),
}

/// Rejected moves against a live board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("({0}, {1}) is outside the board")]
    OutOfBounds(u16, u16),
    #[error("the game is already over")]
    GameOver,
}
