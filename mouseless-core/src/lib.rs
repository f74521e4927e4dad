//! Board-agnostic core of the Mouseless 3ML renderer
//!
//! This crate contains everything about showing a 3ML page that does not
//! depend on the interpreter or on specific hardware:
//!
//! - Document model (arena of nodes addressed by stable handles)
//! - Selectable-node index
//! - Scroll/selection state machine with smoothed scrolling
//! - Incremental layout and paint pass
//! - Navigation history and deferred page actions
//! - Input classification and the interaction dispatcher
//! - Collaborator traits (markup parser, storage) and configuration types

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

pub mod config;
pub mod dispatch;
pub mod document;
pub mod input;
pub mod layout;
pub mod markup;
pub mod navigation;
pub mod scroll;
pub mod selection;
pub mod traits;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;
