use thiserror::Error;

/// Errors from parsing and configuration. Rejected moves are not errors;
/// they are reported as `false` by the game.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid square: {0:?}")]
    InvalidSquare(String),

    #[error("invalid coordinate move: {0:?}")]
    InvalidMove(String),

    #[error("invalid piece kind: {0:?}")]
    InvalidPieceKind(String),

    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),
}
