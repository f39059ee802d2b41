use serde::{Deserialize, Serialize};

/// Origin-site label stamped on every record persisted by this job.
pub const DEAL_SOURCE: &str = "Amazon";

/// The sole persisted entity: one advertised discount observed on the deals
/// listing, keyed by a content-derived identifier.
///
/// `id` is a pure function of `(title, current_price)`, so two runs that
/// observe the same title and price for a deal write the same document
/// (upsert), while any change in either field produces a fresh document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealRecord {
    pub id: String,
    pub title: String,
    pub current_price: Option<f64>,
    pub original_price: Option<f64>,
    /// Rounded integer percentage. Negative values are preserved: a deal
    /// whose current price exceeds its original price is a data anomaly
    /// worth surfacing downstream, not something to clamp away.
    pub discount_percent: i32,
    pub affiliate_url: Option<String>,
    pub image_url: Option<String>,
    pub source: String,
    /// Extraction time, UTC, RFC 3339. Assigned per record, so records in
    /// the same batch may differ by a few milliseconds.
    pub timestamp: String,
}
