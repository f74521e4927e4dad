//! Host runtime for the Mouseless 3ML renderer
//!
//! Ties the board-agnostic core to a display, a storage root and the
//! scripting bridge:
//!
//! - `Renderer`: owns the loaded page and performs one frame per tick
//! - `channels`: bounded input channel between the button context and the
//!   render task
//! - `task`: boot from the on-storage configuration and the periodic render loop
//! - `config`: TOML device configuration
//! - `storage`: directory-backed page storage

#![deny(unsafe_code)]

pub mod channels;
pub mod config;
pub mod error;
pub mod renderer;
pub mod storage;
pub mod task;

pub use error::LoadError;
pub use renderer::Renderer;
