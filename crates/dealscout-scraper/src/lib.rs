pub mod error;
pub mod extract;
pub mod normalize;
pub mod pipeline;
pub mod render;

pub use error::ScrapeError;
pub use extract::{extract_deal_cards, CardOutcome, RawDealCard};
pub use normalize::normalize_card;
pub use pipeline::deals_from_html;
pub use render::{DealPageRenderer, ScrollPlan, DEAL_CARD_MARKER};
