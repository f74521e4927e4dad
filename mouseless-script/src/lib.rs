//! Scripting bridge for 3ML pages
//!
//! Each loaded page gets its own QuickJS context with a minimal DOM-like
//! surface over the live document:
//!
//! - `document.getElementById(id)` returns an element or `undefined`
//! - `element.<attribute>` holds each markup attribute as a string
//! - `element.innerHTML = markup` replaces the element's children
//! - `console.log/info/warn/error` forward to `tracing`
//!
//! Elements refer to nodes by generational handle, so an element kept
//! across a mutation that removed its node becomes inert.

#![deny(unsafe_code)]

mod bindings;
mod console;
pub mod error;
pub mod host;

pub use error::ScriptError;
pub use host::ScriptHost;
