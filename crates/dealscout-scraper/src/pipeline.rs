//! Extraction plus normalization over one rendered page.

use dealscout_core::DealRecord;

use crate::extract::{extract_deal_cards, CardOutcome};
use crate::normalize::normalize_card;

/// Turns rendered page HTML into normalized deal records.
///
/// Skipped cards are logged and dropped; every surviving card becomes exactly
/// one record. An empty result is a normal outcome for a page with no cards.
#[must_use]
pub fn deals_from_html(html: &str, affiliate_tag: Option<&str>) -> Vec<DealRecord> {
    let outcomes = extract_deal_cards(html);
    let card_count = outcomes.len();

    let records: Vec<DealRecord> = outcomes
        .into_iter()
        .filter_map(|outcome| match outcome {
            CardOutcome::Card(raw) => {
                let record = normalize_card(&raw, affiliate_tag);
                tracing::info!(
                    title = %preview(&record.title),
                    discount_percent = record.discount_percent,
                    "processed deal"
                );
                Some(record)
            }
            CardOutcome::Skipped { reason } => {
                tracing::warn!(%reason, "skipping deal card");
                None
            }
        })
        .collect();

    tracing::info!(
        found = card_count,
        extracted = records.len(),
        "deal extraction finished"
    );
    records
}

/// Short title preview for log lines, as the full title can run long.
fn preview(title: &str) -> String {
    const MAX: usize = 50;
    if title.chars().count() <= MAX {
        title.to_string()
    } else {
        let truncated: String = title.chars().take(MAX).collect();
        format!("{truncated}...")
    }
}
