//! Layout definitions: validation and named lookup.
//!
//! # Invariants
//! - Validation runs on layout definitions only, never during section edits.
//! - A layout that reports any violation is never registered or used.

pub mod registry;
pub mod validator;
