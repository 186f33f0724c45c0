//! Flutter-facing bindings for the GridNote engine.

pub mod api;
