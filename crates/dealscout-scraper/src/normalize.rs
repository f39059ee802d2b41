//! Normalization from raw card fields to [`dealscout_core::DealRecord`].
//!
//! Everything here is pure and deterministic apart from the per-record
//! timestamp. Price cleaning, discount arithmetic, identity derivation, and
//! affiliate-link construction all live in this module so they can be tested
//! without a browser or a network.

use chrono::Utc;
use sha2::{Digest, Sha256};

use dealscout_core::{DealRecord, DEAL_SOURCE};

use crate::extract::RawDealCard;

/// Serialization of an absent current price in the identity preimage.
const NO_PRICE_SENTINEL: &str = "none";

/// Cleans a raw price label into a numeric value.
///
/// Strips every character that is not an ASCII digit or a decimal point,
/// then parses the remainder as `f64`. Absent input, an empty remainder, or
/// an unparseable remainder (e.g. `"1.2.3"`) all yield `None` — a malformed
/// price is a data-quality signal, never an error and never zero.
#[must_use]
pub fn clean_price(raw: Option<&str>) -> Option<f64> {
    let raw = raw?;
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Computes the rounded integer discount percentage.
///
/// Returns `0` when either price is absent or the original price is not
/// positive. Negative results are passed through unclamped: current > original
/// is an anomaly the record deliberately surfaces.
#[must_use]
#[allow(clippy::cast_possible_truncation)] // percentages are far inside i32 range
pub fn discount_percent(current: Option<f64>, original: Option<f64>) -> i32 {
    match (current, original) {
        (Some(current), Some(original)) if original > 0.0 => {
            ((1.0 - current / original) * 100.0).round() as i32
        }
        _ => 0,
    }
}

/// Derives the record identity: SHA-256 hex over the title concatenated with
/// the current price's display form (or [`NO_PRICE_SENTINEL`] when absent).
///
/// Identical (title, price) observations collide by design, which is what
/// makes persistence an upsert. Any change to either field yields a new id;
/// the superseded document is left behind (no cleanup pass exists).
#[must_use]
pub fn deal_id(title: &str, current_price: Option<f64>) -> String {
    let price_repr = current_price
        .map_or_else(|| NO_PRICE_SENTINEL.to_string(), |p| p.to_string());
    format!("{:x}", Sha256::digest(format!("{title}{price_repr}").as_bytes()))
}

/// Builds the outbound link: appends a `tag` query parameter when both a base
/// URL and a non-empty tag exist, passes the base through otherwise, and
/// yields `None` when there is no base at all.
#[must_use]
pub fn affiliate_url(base: Option<&str>, tag: Option<&str>) -> Option<String> {
    let base = base?;
    let tag = match tag {
        Some(t) if !t.is_empty() => t,
        _ => return Some(base.to_owned()),
    };
    match url::Url::parse(base) {
        Ok(mut url) => {
            url.query_pairs_mut().append_pair("tag", tag);
            Some(url.to_string())
        }
        // Links come out of extraction already absolutized; a non-parseable
        // one still gets the tag appended textually rather than dropped.
        Err(_) => Some(format!("{base}?tag={tag}")),
    }
}

/// Normalizes one extracted card into a [`DealRecord`], stamping the
/// per-record UTC timestamp.
#[must_use]
pub fn normalize_card(raw: &RawDealCard, affiliate_tag: Option<&str>) -> DealRecord {
    let title = raw.title.trim().to_owned();
    let current_price = clean_price(raw.current_price_label.as_deref());
    let original_price = clean_price(raw.original_price_label.as_deref());
    let discount_percent = discount_percent(current_price, original_price);
    if discount_percent < 0 {
        tracing::warn!(
            title = %title,
            discount_percent,
            "negative discount observed; persisting as-is"
        );
    }

    DealRecord {
        id: deal_id(&title, current_price),
        title,
        current_price,
        original_price,
        discount_percent,
        affiliate_url: affiliate_url(raw.url.as_deref(), affiliate_tag),
        image_url: raw.image_url.clone(),
        source: DEAL_SOURCE.to_string(),
        timestamp: Utc::now().to_rfc3339(),
    }
}
