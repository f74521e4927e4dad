//! Display abstraction for the Mouseless wearable
//!
//! This crate provides:
//! - `PixelDisplay` trait for the panel driver (pixel buffer + refresh signal)
//! - RGB565 colors and the shared UI palette
//! - `RecordingDisplay`, an in-memory backend that records draw operations
//!
//! # Architecture
//!
//! The renderer only ever talks to `PixelDisplay`. The panel driver that
//! owns the parallel bus, the frame buffer and the transfer-complete interrupt
//! lives outside this workspace and implements the trait for its hardware.
//!
//! `RecordingDisplay` implements the same trait on the host so that layout
//! and paint output can be asserted without a panel.

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

pub mod backend;
pub mod color;
pub mod recording;

// Re-export key types
pub use backend::{DisplayError, PixelDisplay, TextStyle};
pub use color::{Rgb565, ACCENT_COLOR, BACKGROUND_COLOR, TEXT_COLOR};
pub use recording::{DrawOp, RecordingDisplay};
