//! Token data model and mock generation.
//!
//! A [`Token`] is one tracked tradable asset record. Its identity and
//! category are assigned at creation and never change; the numeric market
//! fields are overwritten in place by [`PriceUpdate`] events.

/// Core token record types.
pub mod types;

/// Mock data generator for the three dashboard categories.
pub mod generator;

pub use generator::{generate_token, generate_tokens};
pub use types::{Chain, NetPressure, PriceUpdate, Token, TokenCategory};
