//! Flutter-facing bindings for `examcal_core`.

pub mod api;
mod shell;
