//! Token record types.
//!
//! Field names serialize in camelCase so a projection snapshot matches the
//! JSON shape the dashboard view consumes.

use serde::{Deserialize, Serialize};

use crate::Decimal;

/// Lifecycle bucket for a token. Assigned once at creation, immutable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenCategory {
    /// Pairs created within the last 24 hours.
    NewPairs,
    /// Pairs 5–7 days old, approaching migration.
    FinalStretch,
    /// Pairs that migrated 8–30 days ago.
    Migrated,
}

impl TokenCategory {
    /// All categories in dashboard column order.
    pub const ALL: [Self; 3] = [Self::NewPairs, Self::FinalStretch, Self::Migrated];
}

impl std::fmt::Display for TokenCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenCategory::NewPairs => write!(f, "new-pairs"),
            TokenCategory::FinalStretch => write!(f, "final-stretch"),
            TokenCategory::Migrated => write!(f, "migrated"),
        }
    }
}

/// Chain the token trades on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Chain {
    /// Solana.
    Sol,
    /// Ethereum.
    Eth,
    /// Base.
    Base,
}

impl std::fmt::Display for Chain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Chain::Sol => write!(f, "SOL"),
            Chain::Eth => write!(f, "ETH"),
            Chain::Base => write!(f, "BASE"),
        }
    }
}

/// Net buy/sell pressure indicator derived from the buy percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetPressure {
    /// Buy percentage above 55.
    Buy,
    /// Buy percentage below 45.
    Sell,
    /// Buy percentage between 45 and 55 inclusive.
    Neutral,
}

impl NetPressure {
    /// Derives the pressure indicator from a buy percentage.
    #[must_use]
    pub fn from_buy_percent(buy_percent: u64) -> Self {
        if buy_percent > 55 {
            Self::Buy
        } else if buy_percent < 45 {
            Self::Sell
        } else {
            Self::Neutral
        }
    }

    /// Returns true if net pressure is on the buy side.
    #[must_use]
    pub fn is_buy(&self) -> bool {
        matches!(self, Self::Buy)
    }
}

/// One tracked tradable asset record.
///
/// Identity (`id`) and `category` are stable for the lifetime of the entity.
/// The price, 24h change, volume, and `last_updated` fields are overwritten
/// in place when a [`PriceUpdate`] merges; everything else is set once by the
/// generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    /// Unique identity, stable for entity lifetime.
    pub id: String,
    /// Ticker symbol.
    pub symbol: String,
    /// Display name.
    pub name: String,
    /// Secondary label / descriptor.
    pub subtitle: String,
    /// On-chain address (44 base-62 characters).
    pub address: String,
    /// Current price.
    pub price: Decimal,
    /// 24h price change, percentage points.
    pub price_change_24h: Decimal,
    /// 5-minute price change, percentage points.
    pub price_change_5m: Decimal,
    /// 1-hour price change, percentage points.
    pub price_change_1h: Decimal,
    /// 24h trading volume.
    pub volume_24h: Decimal,
    /// Market capitalization.
    pub market_cap: Decimal,
    /// Pool liquidity.
    pub liquidity: Decimal,
    /// Liquidity / market cap ratio.
    pub liquidity_ratio: Decimal,
    /// Holder count.
    pub holders: u64,
    /// Number of users watching.
    pub watchers: u64,
    /// 24h transaction count.
    pub transactions_24h: u64,
    /// Fee generation.
    pub fees: Decimal,
    /// Lifecycle category.
    pub category: TokenCategory,
    /// Creation time, milliseconds since epoch.
    pub created_at: u64,
    /// Last update time, milliseconds since epoch.
    pub last_updated: u64,
    /// Chain the token trades on.
    pub chain: Chain,
    /// Verified listing flag.
    pub verified: bool,
    /// Migration progress 60–95, final-stretch tokens only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub migration_progress: Option<u64>,
    /// Projected migration time, final-stretch tokens only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub migration_date: Option<u64>,
    /// Avatar URL.
    pub profile_pic: String,
    /// 24h buy count.
    pub buys: u64,
    /// 24h sell count.
    pub sells: u64,
    /// Buy pressure percentage.
    pub buy_percent: u64,
    /// Sell pressure percentage.
    pub sell_percent: u64,
    /// Net pressure indicator.
    pub net_pressure: NetPressure,
    /// Has any social links.
    pub social_presence: bool,
    /// Has a website.
    pub has_website: bool,
    /// Has a Telegram group.
    pub has_telegram: bool,
    /// Has a Twitter account.
    pub has_twitter: bool,
    /// Risk/warning flags.
    pub risk_flags: Vec<String>,
    /// Paid/boosted listing indicator.
    pub is_paid: bool,
    /// Top holder share of supply, percent.
    pub top_holder_percent: u64,
    /// Dev wallet share of supply, percent.
    pub dev_percent: u64,
    /// Sniper share of supply, percent.
    pub sniper_percent: u64,
    /// Locked share of supply, percent.
    pub locked_percent: u64,
    /// Insider share of supply, percent.
    pub insider_percent: u64,
    /// Dev-sold indicator.
    pub dev_sold: bool,
}

impl Token {
    /// Merges a price update into this token in place.
    ///
    /// Overwrites price, 24h change, volume, and the last-updated timestamp;
    /// every other field is untouched. The caller is responsible for checking
    /// that the update's identity matches.
    pub fn apply_update(&mut self, update: &PriceUpdate) {
        self.price = update.price;
        self.price_change_24h = update.price_change_24h;
        self.volume_24h = update.volume_24h;
        self.last_updated = update.timestamp;
    }

    /// Age of the token at `now_ms`, in milliseconds.
    #[must_use]
    pub fn age_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.created_at)
    }
}

/// Price movement for a single token, produced by the feed on each tick.
///
/// Transient: consumed by the store immediately after delivery, never
/// persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceUpdate {
    /// Identity of the token this update applies to.
    pub token_id: String,
    /// New price.
    pub price: Decimal,
    /// New 24h change, percentage points.
    pub price_change_24h: Decimal,
    /// New 24h volume.
    pub volume_24h: Decimal,
    /// Update timestamp in milliseconds.
    pub timestamp: u64,
}

impl PriceUpdate {
    /// Creates a new price update.
    #[must_use]
    pub fn new(
        token_id: impl Into<String>,
        price: Decimal,
        price_change_24h: Decimal,
        volume_24h: Decimal,
        timestamp: u64,
    ) -> Self {
        Self {
            token_id: token_id.into(),
            price,
            price_change_24h,
            volume_24h,
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::generator::generate_token;
    use rust_decimal_macros::dec;

    #[test]
    fn test_net_pressure_boundaries() {
        assert_eq!(NetPressure::from_buy_percent(56), NetPressure::Buy);
        assert_eq!(NetPressure::from_buy_percent(55), NetPressure::Neutral);
        assert_eq!(NetPressure::from_buy_percent(50), NetPressure::Neutral);
        assert_eq!(NetPressure::from_buy_percent(45), NetPressure::Neutral);
        assert_eq!(NetPressure::from_buy_percent(44), NetPressure::Sell);
        assert!(NetPressure::from_buy_percent(75).is_buy());
    }

    #[test]
    fn test_category_display() {
        assert_eq!(TokenCategory::NewPairs.to_string(), "new-pairs");
        assert_eq!(TokenCategory::FinalStretch.to_string(), "final-stretch");
        assert_eq!(TokenCategory::Migrated.to_string(), "migrated");
    }

    #[test]
    fn test_category_serde_kebab_case() {
        let json = serde_json::to_string(&TokenCategory::NewPairs).unwrap();
        assert_eq!(json, r#""new-pairs""#);
        let back: TokenCategory = serde_json::from_str(r#""final-stretch""#).unwrap();
        assert_eq!(back, TokenCategory::FinalStretch);
    }

    #[test]
    fn test_chain_serde_uppercase() {
        assert_eq!(serde_json::to_string(&Chain::Sol).unwrap(), r#""SOL""#);
        assert_eq!(Chain::Base.to_string(), "BASE");
    }

    #[test]
    fn test_apply_update_touches_only_market_fields() {
        let mut token = generate_token(0, TokenCategory::NewPairs, true);
        let before = token.clone();

        let update = PriceUpdate::new(token.id.clone(), dec!(5), dec!(-1.5), dec!(123456), 42);
        token.apply_update(&update);

        assert_eq!(token.price, dec!(5));
        assert_eq!(token.price_change_24h, dec!(-1.5));
        assert_eq!(token.volume_24h, dec!(123456));
        assert_eq!(token.last_updated, 42);

        // Identity, category, and every other field are untouched.
        assert_eq!(token.id, before.id);
        assert_eq!(token.category, before.category);
        assert_eq!(token.market_cap, before.market_cap);
        assert_eq!(token.holders, before.holders);
        assert_eq!(token.created_at, before.created_at);
    }

    #[test]
    fn test_token_serializes_camel_case() {
        let token = generate_token(3, TokenCategory::FinalStretch, true);
        let json = serde_json::to_string(&token).unwrap();
        assert!(json.contains(r#""priceChange24h""#));
        assert!(json.contains(r#""marketCap""#));
        assert!(json.contains(r#""netPressure""#));
        assert!(json.contains(r#""category":"final-stretch""#));
    }

    #[test]
    fn test_age_ms() {
        let mut token = generate_token(0, TokenCategory::NewPairs, true);
        token.created_at = 1000;
        assert_eq!(token.age_ms(4000), 3000);
        assert_eq!(token.age_ms(500), 0);
    }
}
