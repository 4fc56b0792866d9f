use thiserror::Error;

/// Failures that can leave the frame loop.
///
/// The simulation itself never fails; only the terminal boundary and the
/// start-up configuration check produce errors.
#[derive(Debug, Error)]
pub enum GameError {
    /// Terminal I/O error
    #[error("terminal I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration the playfield cannot hold
    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, GameError>;
