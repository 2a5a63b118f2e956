//! Filter configuration and predicate evaluation.

use serde::{Deserialize, Serialize};

use crate::Decimal;
use crate::tokens::types::{Chain, Token, TokenCategory};

/// Optional predicates applied to the canonical token set.
///
/// An absent predicate always passes. Evaluation order is fixed: category,
/// chain, verified-only, min market cap, max market cap, min volume; a token
/// is included only if every configured predicate passes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterConfig {
    /// Keep only tokens in this category.
    pub category: Option<TokenCategory>,
    /// Keep only tokens on this chain.
    pub chain: Option<Chain>,
    /// Keep only verified tokens.
    pub verified_only: bool,
    /// Minimum market cap, inclusive.
    pub min_market_cap: Option<Decimal>,
    /// Maximum market cap, inclusive.
    pub max_market_cap: Option<Decimal>,
    /// Minimum 24h volume, inclusive.
    pub min_volume: Option<Decimal>,
}

impl FilterConfig {
    /// Creates an empty filter that passes every token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the category predicate.
    #[must_use]
    pub fn with_category(mut self, category: TokenCategory) -> Self {
        self.category = Some(category);
        self
    }

    /// Sets the chain predicate.
    #[must_use]
    pub fn with_chain(mut self, chain: Chain) -> Self {
        self.chain = Some(chain);
        self
    }

    /// Sets the verified-only flag.
    #[must_use]
    pub fn with_verified_only(mut self, verified_only: bool) -> Self {
        self.verified_only = verified_only;
        self
    }

    /// Sets the minimum market cap.
    #[must_use]
    pub fn with_min_market_cap(mut self, min: Decimal) -> Self {
        self.min_market_cap = Some(min);
        self
    }

    /// Sets the maximum market cap.
    #[must_use]
    pub fn with_max_market_cap(mut self, max: Decimal) -> Self {
        self.max_market_cap = Some(max);
        self
    }

    /// Sets the minimum 24h volume.
    #[must_use]
    pub fn with_min_volume(mut self, min: Decimal) -> Self {
        self.min_volume = Some(min);
        self
    }

    /// Returns true if no predicate is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Evaluates every configured predicate against a token.
    #[must_use]
    pub fn matches(&self, token: &Token) -> bool {
        if self.category.is_some_and(|c| token.category != c) {
            return false;
        }
        if self.chain.is_some_and(|c| token.chain != c) {
            return false;
        }
        if self.verified_only && !token.verified {
            return false;
        }
        if self.min_market_cap.is_some_and(|min| token.market_cap < min) {
            return false;
        }
        if self.max_market_cap.is_some_and(|max| token.market_cap > max) {
            return false;
        }
        if self.min_volume.is_some_and(|min| token.volume_24h < min) {
            return false;
        }
        true
    }
}

/// Applies a filter to a token list, preserving arrival order.
#[must_use]
pub fn apply_filters(tokens: &[Token], filter: &FilterConfig) -> Vec<Token> {
    tokens
        .iter()
        .filter(|token| filter.matches(token))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::generator::generate_token;
    use rust_decimal_macros::dec;

    fn token(category: TokenCategory) -> Token {
        generate_token(0, category, true)
    }

    #[test]
    fn test_empty_filter_passes_everything() {
        let filter = FilterConfig::new();
        assert!(filter.is_empty());
        assert!(filter.matches(&token(TokenCategory::NewPairs)));
        assert!(filter.matches(&token(TokenCategory::Migrated)));
    }

    #[test]
    fn test_category_predicate() {
        let filter = FilterConfig::new().with_category(TokenCategory::NewPairs);
        assert!(!filter.is_empty());
        assert!(filter.matches(&token(TokenCategory::NewPairs)));
        assert!(!filter.matches(&token(TokenCategory::FinalStretch)));
    }

    #[test]
    fn test_chain_predicate() {
        let mut t = token(TokenCategory::NewPairs);
        t.chain = Chain::Sol;
        assert!(FilterConfig::new().with_chain(Chain::Sol).matches(&t));
        assert!(!FilterConfig::new().with_chain(Chain::Eth).matches(&t));
    }

    #[test]
    fn test_verified_only_predicate() {
        let mut t = token(TokenCategory::NewPairs);
        t.verified = false;
        assert!(!FilterConfig::new().with_verified_only(true).matches(&t));
        assert!(FilterConfig::new().with_verified_only(false).matches(&t));
        t.verified = true;
        assert!(FilterConfig::new().with_verified_only(true).matches(&t));
    }

    #[test]
    fn test_market_cap_bounds_inclusive() {
        let mut t = token(TokenCategory::NewPairs);
        t.market_cap = dec!(1000);
        assert!(FilterConfig::new().with_min_market_cap(dec!(1000)).matches(&t));
        assert!(!FilterConfig::new().with_min_market_cap(dec!(1001)).matches(&t));
        assert!(FilterConfig::new().with_max_market_cap(dec!(1000)).matches(&t));
        assert!(!FilterConfig::new().with_max_market_cap(dec!(999)).matches(&t));
    }

    #[test]
    fn test_min_volume_predicate() {
        let mut t = token(TokenCategory::NewPairs);
        t.volume_24h = dec!(5000);
        assert!(FilterConfig::new().with_min_volume(dec!(5000)).matches(&t));
        assert!(!FilterConfig::new().with_min_volume(dec!(5001)).matches(&t));
    }

    #[test]
    fn test_combined_predicates_all_must_pass() {
        let mut t = token(TokenCategory::NewPairs);
        t.chain = Chain::Sol;
        t.verified = true;
        t.market_cap = dec!(50000);

        let filter = FilterConfig::new()
            .with_category(TokenCategory::NewPairs)
            .with_chain(Chain::Sol)
            .with_verified_only(true)
            .with_min_market_cap(dec!(10000))
            .with_max_market_cap(dec!(100000));
        assert!(filter.matches(&t));

        // One failing predicate excludes the token.
        assert!(!filter.clone().with_min_market_cap(dec!(60000)).matches(&t));
    }

    #[test]
    fn test_apply_filters_preserves_order_and_is_idempotent() {
        let mut a = generate_token(0, TokenCategory::NewPairs, true);
        let mut b = generate_token(1, TokenCategory::NewPairs, true);
        let c = generate_token(2, TokenCategory::Migrated, true);
        a.verified = true;
        b.verified = true;

        let tokens = vec![a.clone(), b.clone(), c];
        let filter = FilterConfig::new().with_category(TokenCategory::NewPairs);

        let once = apply_filters(&tokens, &filter);
        assert_eq!(once.len(), 2);
        assert_eq!(once[0].id, a.id);
        assert_eq!(once[1].id, b.id);

        let twice = apply_filters(&once, &filter);
        assert_eq!(once, twice);
    }
}
