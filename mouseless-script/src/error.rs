//! Script error types

use mouseless_core::traits::StorageError;
use thiserror::Error;

/// Errors from creating a context or evaluating script
#[derive(Debug, Error)]
pub enum ScriptError {
    /// Interpreter failure outside of script code (allocation, setup)
    #[error("interpreter error: {0}")]
    Runtime(#[from] rquickjs::Error),

    /// Script threw, or failed to compile
    #[error("uncaught exception: {0}")]
    Exception(String),

    /// Script file could not be read
    #[error("cannot read script {path}: {error}")]
    Storage { path: String, error: StorageError },
}
