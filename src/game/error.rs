use thiserror::Error;

/// Errors surfaced by the game engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("unknown difficulty '{0}'")]
    InvalidDifficulty(String),

    #[error("a session is already running")]
    SessionInProgress,

    /// Rejection sampling was asked for a cell on a full board
    #[error("no free cell left: {occupied} of {capacity} cells occupied")]
    PlacementExhausted { occupied: usize, capacity: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
