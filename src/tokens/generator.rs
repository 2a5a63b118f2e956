//! Mock data generator.
//!
//! Produces token records for the three dashboard categories. In
//! deterministic mode every pseudo-random draw comes from a seeded LCG that
//! is reseeded per entity as `(index + 1) * 1000`, and all times anchor to
//! [`FROZEN_REFERENCE_MS`], so the same inputs produce byte-identical output
//! across runs. That property is what lets a rendered dashboard be
//! snapshot-tested against a frozen state.
//!
//! The draw order inside [`generate_token`] is part of the deterministic
//! contract: reordering draws changes every frozen field after the moved one.

use rust_decimal_macros::dec;

use crate::Decimal;
use crate::tokens::types::{Chain, NetPressure, Token, TokenCategory};
use crate::types::rng::UnitRng;
use crate::types::time::{current_timestamp_ms, DAY_MS, FROZEN_REFERENCE_MS};

const TOKEN_SYMBOLS: &[&str] = &[
    "BONK", "WIF", "MYRO", "SAMO", "ORCA", "RAY", "MNGO", "COPE", "TULIP", "PORT", "FIDA",
    "MEDIA", "SNY", "SBR", "SOLC", "SLIM", "JET", "STAR", "BASIS", "GRAPE", "GST", "GMT", "DUST",
    "POLIS",
];

const TOKEN_NAMES: &[&str] = &[
    "Bonk Inu",
    "Dogwifhat",
    "Myro",
    "Samoyedcoin",
    "Orca Protocol",
    "Raydium",
    "Mango Markets",
    "Cope Protocol",
    "Tulip Protocol",
    "Port Finance",
    "Bonfida",
    "Media Network",
    "Synthetify",
    "Saber",
    "Solcasino",
    "Solanium",
    "JetProtocol",
    "Solster",
    "Basis Markets",
    "Grape Protocol",
    "Green Satoshi",
    "STEPN",
    "Dust Protocol",
    "Star Atlas",
];

const SUBTITLES: &[&str] = &[
    "Meme King",
    "DeFi OG",
    "Community",
    "Stealth",
    "Fair Launch",
    "Utility",
    "Gaming",
    "NFT",
    "DAO",
    "Ecosystem",
];

const PROFILE_PICS: &[&str] = &[
    "https://ui-avatars.com/api/?name=B&background=FF0000&color=fff&size=40",
    "https://ui-avatars.com/api/?name=W&background=00FF00&color=fff&size=40",
    "https://ui-avatars.com/api/?name=M&background=0000FF&color=fff&size=40",
    "https://ui-avatars.com/api/?name=S&background=FFFF00&color=000&size=40",
    "https://ui-avatars.com/api/?name=O&background=FF00FF&color=fff&size=40",
    "https://ui-avatars.com/api/?name=R&background=00FFFF&color=000&size=40",
    "https://ui-avatars.com/api/?name=MN&background=8B00FF&color=fff&size=40",
    "https://ui-avatars.com/api/?name=C&background=FF8800&color=fff&size=40",
    "https://ui-avatars.com/api/?name=T&background=88FF00&color=000&size=40",
    "https://ui-avatars.com/api/?name=P&background=0088FF&color=fff&size=40",
    "https://ui-avatars.com/api/?name=TEST&background=000000&color=fff&size=40",
];

const ADDRESS_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
const ADDRESS_LEN: usize = 44;

/// Generates tokens for all three categories.
///
/// Always returns exactly `new_pairs + final_stretch + migrated` entities,
/// category-tagged in that order. Infallible.
///
/// # Example
///
/// ```rust
/// use token_pulse_rs::tokens::generate_tokens;
///
/// let tokens = generate_tokens(20, 15, 25, true);
/// assert_eq!(tokens.len(), 60);
/// // Deterministic mode: a second call is identical.
/// assert_eq!(tokens, generate_tokens(20, 15, 25, true));
/// ```
#[must_use]
pub fn generate_tokens(
    new_pairs: usize,
    final_stretch: usize,
    migrated: usize,
    deterministic: bool,
) -> Vec<Token> {
    let rng = make_rng(deterministic);
    let now_ms = reference_now(deterministic);

    let counts = [new_pairs, final_stretch, migrated];
    let mut tokens = Vec::with_capacity(new_pairs + final_stretch + migrated);
    for (category, count) in TokenCategory::ALL.into_iter().zip(counts) {
        for index in 0..count {
            tokens.push(generate_with(&rng, index, category, deterministic, now_ms));
        }
    }
    tokens
}

/// Generates a single token.
///
/// Because deterministic mode reseeds per entity, a token generated here is
/// identical to the one [`generate_tokens`] produces for the same index and
/// category.
#[must_use]
pub fn generate_token(index: usize, category: TokenCategory, deterministic: bool) -> Token {
    let rng = make_rng(deterministic);
    generate_with(&rng, index, category, deterministic, reference_now(deterministic))
}

fn make_rng(deterministic: bool) -> UnitRng {
    if deterministic {
        UnitRng::seeded(0)
    } else {
        UnitRng::entropy()
    }
}

fn reference_now(deterministic: bool) -> u64 {
    if deterministic {
        FROZEN_REFERENCE_MS
    } else {
        current_timestamp_ms()
    }
}

fn generate_with(
    rng: &UnitRng,
    index: usize,
    category: TokenCategory,
    deterministic: bool,
    now_ms: u64,
) -> Token {
    if deterministic {
        // Per-entity seed so each token is reproducible in isolation.
        rng.reseed((index as u64 + 1) * 1000);
    }

    let symbol = TOKEN_SYMBOLS[index % TOKEN_SYMBOLS.len()];
    let name = TOKEN_NAMES[index % TOKEN_NAMES.len()];

    let price = rng.range(dec!(0.0001), dec!(100));
    let volume_24h = rng.range(dec!(100000), dec!(50000000));
    let market_cap = price * Decimal::from(rng.int_range(1_000_000, 1_000_000_000));
    let liquidity = market_cap * rng.range(dec!(0.1), dec!(0.3));
    let liquidity_ratio = liquidity / market_cap;
    let transactions_24h = rng.int_range(50, 5000);

    let buy_percent = rng.int_range(35, 75);
    let sell_percent = 100 - buy_percent;
    let buys = transactions_24h * buy_percent / 100;
    let sells = transactions_24h - buys;
    let net_pressure = NetPressure::from_buy_percent(buy_percent);

    let created_at = match category {
        TokenCategory::NewPairs => now_ms - rng.int_range(0, DAY_MS),
        TokenCategory::FinalStretch => now_ms - rng.int_range(5, 7) * DAY_MS,
        TokenCategory::Migrated => now_ms - rng.int_range(8, 30) * DAY_MS,
    };

    let chain = match rng.int_range(0, 2) {
        0 => Chain::Sol,
        1 => Chain::Eth,
        _ => Chain::Base,
    };
    let verified = rng.next_unit() > dec!(0.3);
    let social_presence = rng.next_unit() > dec!(0.4);
    let has_website = rng.next_unit() > dec!(0.3);
    let has_telegram = rng.next_unit() > dec!(0.5);
    let has_twitter = rng.next_unit() > dec!(0.4);
    let risk_flags = if rng.next_unit() > dec!(0.8) {
        vec!["High concentration".to_string(), "New token".to_string()]
    } else {
        Vec::new()
    };
    let is_paid = rng.next_unit() > dec!(0.85);
    let dev_sold = rng.next_unit() > dec!(0.7);

    let address = generate_address(rng);
    let price_change_24h = rng.range(dec!(-50), dec!(100));
    let price_change_5m = rng.range(dec!(-10), dec!(15));
    let price_change_1h = rng.range(dec!(-20), dec!(30));
    let holders = rng.int_range(100, 50_000);
    let watchers = rng.int_range(10, 500);
    let fees = rng.range(dec!(10), dec!(5000));

    let (migration_progress, migration_date) = if category == TokenCategory::FinalStretch {
        (
            Some(rng.int_range(60, 95)),
            Some(now_ms + rng.int_range(1, 3) * DAY_MS),
        )
    } else {
        (None, None)
    };

    Token {
        id: format!("{category}-{index}"),
        symbol: format!("{symbol}{index}"),
        name: format!("{name} {index}"),
        subtitle: SUBTITLES[index % SUBTITLES.len()].to_string(),
        address,
        price,
        price_change_24h,
        price_change_5m,
        price_change_1h,
        volume_24h,
        market_cap,
        liquidity,
        liquidity_ratio,
        holders,
        watchers,
        transactions_24h,
        fees,
        category,
        created_at,
        last_updated: now_ms,
        chain,
        verified,
        migration_progress,
        migration_date,
        profile_pic: PROFILE_PICS[index % PROFILE_PICS.len()].to_string(),
        buys,
        sells,
        buy_percent,
        sell_percent,
        net_pressure,
        social_presence,
        has_website,
        has_telegram,
        has_twitter,
        risk_flags,
        is_paid,
        top_holder_percent: rng.int_range(1, 15),
        dev_percent: rng.int_range(0, 8),
        sniper_percent: rng.int_range(0, 10),
        locked_percent: rng.int_range(0, 100),
        insider_percent: rng.int_range(0, 12),
        dev_sold,
    }
}

fn generate_address(rng: &UnitRng) -> String {
    (0..ADDRESS_LEN)
        .map(|_| {
            let i = rng.int_range(0, ADDRESS_CHARS.len() as u64 - 1) as usize;
            ADDRESS_CHARS[i] as char
        })
        .collect()
}
