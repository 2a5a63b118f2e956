//! Unit-interval random draws.
//!
//! Every random decision in this library flows through [`UnitRng`], which
//! produces `Decimal` values in `[0, 1)`. The seeded variant is a 32-bit
//! linear-congruential generator so frozen-mode output is identical across
//! runs; the entropy variant draws from the platform source. Both scale a
//! 32-bit draw by the same modulus so the two paths share one distribution
//! shape.

use std::sync::atomic::{AtomicU64, Ordering};

use rust_decimal::prelude::ToPrimitive;

use crate::Decimal;

const LCG_MULTIPLIER: u64 = 1_664_525;
const LCG_INCREMENT: u64 = 1_013_904_223;
const LCG_MODULUS: u64 = 1 << 32;

/// Source of unit-interval random draws.
#[derive(Debug)]
enum Source {
    /// Deterministic LCG state (thread-safe).
    Seeded(AtomicU64),
    /// Platform entropy via `rand`.
    Entropy,
}

/// Unit-interval random number generator.
///
/// # Example
///
/// ```rust
/// use token_pulse_rs::types::rng::UnitRng;
///
/// let rng = UnitRng::seeded(1000);
/// let first = rng.next_unit();
/// rng.reseed(1000);
/// assert_eq!(rng.next_unit(), first);
/// ```
#[derive(Debug)]
pub struct UnitRng {
    source: Source,
}

impl UnitRng {
    /// Creates a deterministic generator with the given seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            source: Source::Seeded(AtomicU64::new(seed % LCG_MODULUS)),
        }
    }

    /// Creates an entropy-backed generator.
    #[must_use]
    pub fn entropy() -> Self {
        Self {
            source: Source::Entropy,
        }
    }

    /// Returns true if draws are seed-reproducible.
    #[must_use]
    pub fn is_seeded(&self) -> bool {
        matches!(self.source, Source::Seeded(_))
    }

    /// Resets the seed. A no-op for entropy-backed generators.
    pub fn reseed(&self, seed: u64) {
        if let Source::Seeded(state) = &self.source {
            state.store(seed % LCG_MODULUS, Ordering::Relaxed);
        }
    }

    /// Generates the next value in `[0, 1)`.
    #[must_use]
    pub fn next_unit(&self) -> Decimal {
        let bits = match &self.source {
            Source::Seeded(state) => {
                let current = state.load(Ordering::Relaxed);
                let next = current
                    .wrapping_mul(LCG_MULTIPLIER)
                    .wrapping_add(LCG_INCREMENT)
                    % LCG_MODULUS;
                state.store(next, Ordering::Relaxed);
                next
            }
            Source::Entropy => u64::from(rand::random::<u32>()),
        };
        Decimal::from(bits) / Decimal::from(LCG_MODULUS)
    }

    /// Generates a value in `[min, max)`.
    #[must_use]
    pub fn range(&self, min: Decimal, max: Decimal) -> Decimal {
        min + self.next_unit() * (max - min)
    }

    /// Generates an integer in `[min, max]`, both bounds inclusive.
    #[must_use]
    pub fn int_range(&self, min: u64, max: u64) -> u64 {
        let span = max.saturating_sub(min) + 1;
        let offset = (self.next_unit() * Decimal::from(span))
            .floor()
            .to_u64()
            .unwrap_or(0);
        // 28-digit Decimal rounding keeps the unit draw below 1, so the
        // offset never reaches span; min guards the boundary regardless.
        min + offset.min(span - 1)
    }
}
