//! Timestamp helpers.
//!
//! All timestamps in this library are milliseconds since the Unix epoch,
//! carried as `u64`. Frozen mode replaces the wall clock with fixed reference
//! instants so repeated runs produce identical records.

/// Milliseconds in one day.
pub const DAY_MS: u64 = 24 * 60 * 60 * 1000;

/// Reference instant for deterministic generation: 2026-01-01T12:00:00Z.
///
/// All creation times in frozen mode are computed relative to this instant.
pub const FROZEN_REFERENCE_MS: u64 = 1_767_268_800_000;

/// Timestamp stamped on frozen fetch responses.
pub const FROZEN_FETCH_TIMESTAMP_MS: u64 = 1_735_732_800_000;

/// Returns the current timestamp in milliseconds since epoch.
#[must_use]
pub fn current_timestamp_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
