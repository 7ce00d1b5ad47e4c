use thiserror::Error;

use crate::universe::{BodyId, SystemId};

/// Convenient result alias for the EveNerd library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when the destination was never finalized with a finite cost.
    #[error("no route found between {start} and {goal}")]
    RouteNotFound { start: BodyId, goal: BodyId },

    /// Raised when a solve request mixes point-to-point and all-distances semantics.
    #[error("invalid solve mode: {message}")]
    InvalidSolveMode { message: String },

    /// Raised when attaching a second static bridge to a body.
    #[error("body {body} already has a static bridge")]
    DuplicateBridge { body: BodyId },

    /// Raised when a static bridge would connect a body to itself.
    #[error("body {body} cannot be bridged to itself")]
    SelfBridge { body: BodyId },

    /// Raised when a body id is registered twice.
    #[error("body {id} is already registered")]
    DuplicateBody { id: BodyId },

    /// Raised when a body id could not be found in the universe.
    #[error("unknown body id: {id}")]
    UnknownBody { id: BodyId },

    /// Raised when a system id could not be found in the universe.
    #[error("unknown system id: {id}")]
    UnknownSystem { id: SystemId },

    /// Raised when a traveler profile contains values the cost model cannot use.
    #[error("invalid parameters: {message}")]
    InvalidParameters { message: String },

    /// Raised when a dataset row cannot be interpreted.
    #[error("invalid dataset at line {line}: {message}")]
    InvalidDataset { line: u64, message: String },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for CSV parsing errors.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// Wrapper for JSON parameter file errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Raised when the solver's worker pool cannot be created.
    #[error(transparent)]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl Error {
    /// Whether this error reports an unreachable destination rather than a failure.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Error::RouteNotFound { .. })
    }
}
