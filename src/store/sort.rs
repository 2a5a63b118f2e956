//! Sort configuration and typed key extraction.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::Decimal;
use crate::tokens::types::Token;

/// Token attribute a projection can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    /// Current price.
    Price,
    /// 24h price change in percent.
    PriceChange24h,
    /// 24h trading volume.
    Volume24h,
    /// Market capitalization.
    MarketCap,
    /// Pool liquidity.
    Liquidity,
    /// Holder count.
    Holders,
    /// Creation timestamp.
    CreatedAt,
    /// Ticker symbol, lexicographic.
    Symbol,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest first.
    Asc,
    /// Largest first.
    Desc,
}

/// Field and direction for ordering a projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    /// Attribute to order by.
    pub field: SortField,
    /// Direction to order in.
    pub direction: SortDirection,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            field: SortField::Volume24h,
            direction: SortDirection::Desc,
        }
    }
}

impl SortConfig {
    /// Creates a sort configuration.
    #[must_use]
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }
}

/// Comparison key for one token under one sort field.
#[derive(Debug, Clone, Copy, PartialEq)]
enum SortKey<'a> {
    Amount(Decimal),
    Count(u64),
    Timestamp(u64),
    Text(&'a str),
}

fn sort_key<'a>(token: &'a Token, field: SortField) -> SortKey<'a> {
    match field {
        SortField::Price => SortKey::Amount(token.price),
        SortField::PriceChange24h => SortKey::Amount(token.price_change_24h),
        SortField::Volume24h => SortKey::Amount(token.volume_24h),
        SortField::MarketCap => SortKey::Amount(token.market_cap),
        SortField::Liquidity => SortKey::Amount(token.liquidity),
        SortField::Holders => SortKey::Count(token.holders),
        SortField::CreatedAt => SortKey::Timestamp(token.created_at),
        SortField::Symbol => SortKey::Text(&token.symbol),
    }
}

fn compare(a: &Token, b: &Token, config: SortConfig) -> Ordering {
    let ordering = match (sort_key(a, config.field), sort_key(b, config.field)) {
        (SortKey::Amount(x), SortKey::Amount(y)) => x.cmp(&y),
        (SortKey::Count(x), SortKey::Count(y)) => x.cmp(&y),
        (SortKey::Timestamp(x), SortKey::Timestamp(y)) => x.cmp(&y),
        (SortKey::Text(x), SortKey::Text(y)) => x.cmp(y),
        // One field always yields one key variant; mixed pairs cannot occur.
        _ => Ordering::Equal,
    };
    match config.direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

/// Orders a token list by the configured field and direction.
///
/// The sort is stable: tokens with equal keys keep their relative order,
/// so flipping direction on a tie does not shuffle them.
#[must_use]
pub fn apply_sort(mut tokens: Vec<Token>, config: SortConfig) -> Vec<Token> {
    tokens.sort_by(|a, b| compare(a, b, config));
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::generator::generate_token;
    use crate::tokens::types::TokenCategory;
    use rust_decimal_macros::dec;

    fn tokens() -> Vec<Token> {
        (0..4)
            .map(|i| generate_token(i, TokenCategory::NewPairs, true))
            .collect()
    }

    fn is_sorted_by<K: PartialOrd>(tokens: &[Token], key: impl Fn(&Token) -> K) -> bool {
        tokens.windows(2).all(|w| key(&w[0]) >= key(&w[1]))
    }

    #[test]
    fn test_default_sort_is_volume_desc() {
        let config = SortConfig::default();
        assert_eq!(config.field, SortField::Volume24h);
        assert_eq!(config.direction, SortDirection::Desc);

        let sorted = apply_sort(tokens(), config);
        assert!(is_sorted_by(&sorted, |t| t.volume_24h));
    }

    #[test]
    fn test_numeric_fields_sort_both_directions() {
        let asc = apply_sort(tokens(), SortConfig::new(SortField::Price, SortDirection::Asc));
        assert!(asc.windows(2).all(|w| w[0].price <= w[1].price));

        let desc = apply_sort(tokens(), SortConfig::new(SortField::MarketCap, SortDirection::Desc));
        assert!(is_sorted_by(&desc, |t| t.market_cap));

        let holders = apply_sort(tokens(), SortConfig::new(SortField::Holders, SortDirection::Desc));
        assert!(is_sorted_by(&holders, |t| t.holders));
    }

    #[test]
    fn test_signed_change_sorts_numerically() {
        let mut ts = tokens();
        ts[0].price_change_24h = dec!(-12.5);
        ts[1].price_change_24h = dec!(3.1);
        ts[2].price_change_24h = dec!(-0.2);
        ts[3].price_change_24h = dec!(40);

        let asc = apply_sort(ts, SortConfig::new(SortField::PriceChange24h, SortDirection::Asc));
        assert_eq!(asc[0].price_change_24h, dec!(-12.5));
        assert_eq!(asc[3].price_change_24h, dec!(40));
    }

    #[test]
    fn test_created_at_compares_timestamps() {
        let sorted = apply_sort(
            tokens(),
            SortConfig::new(SortField::CreatedAt, SortDirection::Desc),
        );
        assert!(sorted.windows(2).all(|w| w[0].created_at >= w[1].created_at));
    }

    #[test]
    fn test_symbol_sorts_lexicographically() {
        let sorted = apply_sort(tokens(), SortConfig::new(SortField::Symbol, SortDirection::Asc));
        assert!(sorted.windows(2).all(|w| w[0].symbol <= w[1].symbol));
    }

    #[test]
    fn test_equal_keys_keep_relative_order() {
        let mut ts = tokens();
        for t in &mut ts {
            t.price = dec!(1);
        }
        let before: Vec<String> = ts.iter().map(|t| t.id.clone()).collect();
        let sorted = apply_sort(ts, SortConfig::new(SortField::Price, SortDirection::Desc));
        let after: Vec<String> = sorted.iter().map(|t| t.id.clone()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_serde_field_names() {
        let json = serde_json::to_string(&SortConfig::new(
            SortField::PriceChange24h,
            SortDirection::Desc,
        ))
        .unwrap();
        assert!(json.contains("\"priceChange24h\""));
        assert!(json.contains("\"desc\""));

        let created = serde_json::to_string(&SortField::CreatedAt).unwrap();
        assert_eq!(created, "\"createdAt\"");
    }
}
