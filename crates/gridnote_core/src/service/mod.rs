//! Use-case services over the stateless engine.
//!
//! # Responsibility
//! - Run the parse -> match -> resolve/patch pipeline for one named layout.
//! - Keep embedding layers (FFI, CLI) free of engine wiring details.

pub mod layout_sync;
