//! Deal-card extraction from rendered page HTML.
//!
//! Pure over the page source string: the renderer hands over HTML and this
//! module turns every matched deal card into an explicit [`CardOutcome`].
//! A malformed card yields [`CardOutcome::Skipped`] with a reason — it never
//! aborts the other cards and is never partially included.

use scraper::{ElementRef, Html, Selector};

/// Site origin used to absolutize relative deal links.
const SITE_ORIGIN: &str = "https://amazon.com";

/// Raw fields read off one deal card, before any cleaning or parsing.
///
/// Only the title is required; every other field may be absent when its
/// selector matches nothing. Price fields are the raw labels as rendered
/// (currency symbol, commas and all) — see [`crate::normalize`] for cleaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDealCard {
    pub title: String,
    pub current_price_label: Option<String>,
    pub original_price_label: Option<String>,
    pub url: Option<String>,
    pub image_url: Option<String>,
}

/// Result of one extraction attempt. A card either yields its raw fields or
/// is skipped whole, with the reason kept for logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardOutcome {
    Card(RawDealCard),
    Skipped { reason: String },
}

struct CardSelectors {
    card: Selector,
    title: Selector,
    current_price: Selector,
    original_price: Selector,
    link: Selector,
    image: Selector,
}

impl CardSelectors {
    fn new() -> Self {
        // All selectors are static literals; parse cannot fail.
        let parse = |s: &str| Selector::parse(s).expect("static selector is valid");
        Self {
            card: parse(r#"div[data-testid="deal-card"]"#),
            title: parse("h2"),
            current_price: parse(".a-price .a-offscreen"),
            original_price: parse(".a-text-price .a-offscreen"),
            link: parse("a[href]"),
            image: parse("img"),
        }
    }
}

/// Extracts every deal card from a rendered page, one outcome per card.
///
/// The enumeration is one-shot and finite; re-extraction requires a fresh
/// render. A page with no matching cards returns an empty vec — that is a
/// normal outcome, not an error.
#[must_use]
pub fn extract_deal_cards(html: &str) -> Vec<CardOutcome> {
    let selectors = CardSelectors::new();
    let document = Html::parse_document(html);
    document
        .select(&selectors.card)
        .map(|card| extract_card(card, &selectors))
        .collect()
}

fn extract_card(card: ElementRef<'_>, selectors: &CardSelectors) -> CardOutcome {
    let title = card
        .select(&selectors.title)
        .next()
        .map(inner_text)
        .filter(|t| !t.is_empty());
    let Some(title) = title else {
        return CardOutcome::Skipped {
            reason: "card has no title element".to_string(),
        };
    };

    // The visually-hidden price span carries the canonical price in its
    // aria-label; the struck-through original price only in its text.
    let current_price_label = card
        .select(&selectors.current_price)
        .next()
        .and_then(|el| el.value().attr("aria-label"))
        .map(str::to_owned);

    let original_price_label = card
        .select(&selectors.original_price)
        .next()
        .map(inner_text)
        .filter(|t| !t.is_empty());

    let url = card
        .select(&selectors.link)
        .next()
        .and_then(|el| el.value().attr("href"))
        .map(absolutize);

    let image_url = card
        .select(&selectors.image)
        .next()
        .and_then(|el| el.value().attr("src"))
        .map(str::to_owned);

    CardOutcome::Card(RawDealCard {
        title,
        current_price_label,
        original_price_label,
        url,
        image_url,
    })
}

fn inner_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_owned()
}

fn absolutize(href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        href.to_owned()
    } else {
        format!("{SITE_ORIGIN}{href}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card_html(title: &str, current: &str, original: &str, href: &str, img: &str) -> String {
        format!(
            r#"<div data-testid="deal-card">
                 {title}
                 <span class="a-price"><span class="a-offscreen" aria-label="{current}"></span></span>
                 <span class="a-text-price"><span class="a-offscreen">{original}</span></span>
                 <a href="{href}">See deal</a>
                 <img src="{img}" alt="">
               </div>"#
        )
    }

    fn full_card() -> String {
        card_html(
            "<h2>Widget Pro</h2>",
            "$19.99",
            "$39.99",
            "/dp/B000TEST",
            "https://images.example/widget.jpg",
        )
    }

    fn expect_card(outcome: &CardOutcome) -> &RawDealCard {
        match outcome {
            CardOutcome::Card(card) => card,
            CardOutcome::Skipped { reason } => panic!("expected Card, got Skipped: {reason}"),
        }
    }

    #[test]
    fn extract_reads_all_fields_from_a_complete_card() {
        let outcomes = extract_deal_cards(&full_card());
        assert_eq!(outcomes.len(), 1);
        let card = expect_card(&outcomes[0]);
        assert_eq!(card.title, "Widget Pro");
        assert_eq!(card.current_price_label.as_deref(), Some("$19.99"));
        assert_eq!(card.original_price_label.as_deref(), Some("$39.99"));
        assert_eq!(card.url.as_deref(), Some("https://amazon.com/dp/B000TEST"));
        assert_eq!(
            card.image_url.as_deref(),
            Some("https://images.example/widget.jpg")
        );
    }

    #[test]
    fn extract_returns_empty_for_page_without_cards() {
        let outcomes = extract_deal_cards("<html><body><p>nothing here</p></body></html>");
        assert!(outcomes.is_empty());
    }

    #[test]
    fn extract_skips_card_without_title() {
        let html = card_html("", "$5.00", "$10.00", "/dp/B000NOTITLE", "img.jpg");
        let outcomes = extract_deal_cards(&html);
        assert_eq!(outcomes.len(), 1);
        assert!(
            matches!(&outcomes[0], CardOutcome::Skipped { reason } if reason.contains("title")),
            "expected Skipped for missing title, got: {:?}",
            outcomes[0]
        );
    }

    #[test]
    fn extract_skips_card_with_whitespace_only_title() {
        let html = card_html("<h2>   </h2>", "$5.00", "$10.00", "/x", "y.jpg");
        let outcomes = extract_deal_cards(&html);
        assert!(matches!(&outcomes[0], CardOutcome::Skipped { .. }));
    }

    #[test]
    fn extract_tolerates_missing_optional_fields() {
        let html = r#"<div data-testid="deal-card"><h2>Bare Deal</h2></div>"#;
        let outcomes = extract_deal_cards(html);
        let card = expect_card(&outcomes[0]);
        assert_eq!(card.title, "Bare Deal");
        assert!(card.current_price_label.is_none());
        assert!(card.original_price_label.is_none());
        assert!(card.url.is_none());
        assert!(card.image_url.is_none());
    }

    #[test]
    fn extract_one_bad_card_does_not_abort_the_others() {
        let html = format!(
            "{}{}{}",
            card_html("<h2>First</h2>", "$1.00", "$2.00", "/a", "a.jpg"),
            card_html("", "$3.00", "$4.00", "/b", "b.jpg"),
            card_html("<h2>Third</h2>", "$5.00", "$6.00", "/c", "c.jpg"),
        );
        let outcomes = extract_deal_cards(&html);
        assert_eq!(outcomes.len(), 3);
        assert_eq!(expect_card(&outcomes[0]).title, "First");
        assert!(matches!(&outcomes[1], CardOutcome::Skipped { .. }));
        assert_eq!(expect_card(&outcomes[2]).title, "Third");
    }

    #[test]
    fn extract_keeps_absolute_links_unchanged() {
        let html = card_html(
            "<h2>Linked</h2>",
            "$1.00",
            "$2.00",
            "https://amazon.com/dp/B000ABS",
            "z.jpg",
        );
        let outcomes = extract_deal_cards(&html);
        let card = expect_card(&outcomes[0]);
        assert_eq!(card.url.as_deref(), Some("https://amazon.com/dp/B000ABS"));
    }

    #[test]
    fn extract_reads_current_price_from_aria_label_not_text() {
        let html = r#"<div data-testid="deal-card">
            <h2>Labelled</h2>
            <span class="a-price"><span class="a-offscreen" aria-label="$7.77">$9.99</span></span>
        </div>"#;
        let outcomes = extract_deal_cards(html);
        let card = expect_card(&outcomes[0]);
        assert_eq!(card.current_price_label.as_deref(), Some("$7.77"));
    }
}
