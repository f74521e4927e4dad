//! Runtime error types

use mouseless_core::markup::MarkupError;
use mouseless_core::traits::StorageError;
use thiserror::Error;

/// Errors from loading a page
///
/// A failed load leaves the previously loaded page untouched.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read page {path}: {error}")]
    Storage { path: String, error: StorageError },

    #[error("cannot parse page {path}: {error}")]
    Markup { path: String, error: MarkupError },
}
