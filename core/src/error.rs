use thiserror::Error;

/// Rejected board construction. Moves themselves never fail.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("coordinates lie outside the board")]
    InvalidCoords,
    #[error("mine count leaves no safe cell")]
    TooManyMines,
}

pub type Result<T> = core::result::Result<T, GameError>;
