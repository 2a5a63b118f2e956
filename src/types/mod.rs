//! Common types shared across the library.

/// Error types and the library result alias.
pub mod error;

/// Timestamp helpers and frozen reference instants.
pub mod time;

/// Unit-interval random draws, seeded or entropy-backed.
pub mod rng;
