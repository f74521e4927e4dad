//! Collaborator traits
//!
//! These traits define the interface between the renderer core and the
//! platform services it consumes.

pub mod storage;

pub use storage::{Storage, StorageError};
