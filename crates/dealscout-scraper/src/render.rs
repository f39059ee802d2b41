//! Headless browser session for the deals listing.
//!
//! Thin wrapper over a fantoccini WebDriver client: navigate, wait for the
//! deal-card marker, scroll to trigger lazy loading, and hand back the full
//! page source. Extraction itself is pure and lives in [`crate::extract`].

use std::time::Duration;

use fantoccini::{Client, ClientBuilder, Locator};
use rand::Rng;

use crate::error::ScrapeError;

/// Selector that marks the deals content as present. Navigation is not
/// considered complete until at least one of these is in the DOM.
pub const DEAL_CARD_MARKER: &str = r#"div[data-testid="deal-card"]"#;

/// How the renderer triggers lazy loading after the initial paint: `passes`
/// scrolls of `offset_px` pixels, each followed by an idle of a random
/// duration in `[pause_min_ms, pause_max_ms)`.
#[derive(Debug, Clone, Copy)]
pub struct ScrollPlan {
    pub passes: u32,
    pub offset_px: u32,
    pub pause_min_ms: u64,
    pub pause_max_ms: u64,
}

/// An exclusively-owned headless browser session.
///
/// Opened once per run. [`DealPageRenderer::render`] borrows the session, so
/// the caller can always run [`DealPageRenderer::close`] afterwards whether
/// rendering succeeded or failed — the WebDriver session is never leaked on
/// the error path.
pub struct DealPageRenderer {
    client: Client,
}

impl DealPageRenderer {
    /// Connects to the WebDriver endpoint and starts a headless Chrome
    /// session with the given user agent and a 1920x1080 window.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Session`] if the session cannot be established.
    pub async fn connect(webdriver_url: &str, user_agent: &str) -> Result<Self, ScrapeError> {
        let mut caps = serde_json::Map::new();
        caps.insert(
            "goog:chromeOptions".to_string(),
            serde_json::json!({
                "args": [
                    "--headless=new",
                    "--window-size=1920,1080",
                    format!("--user-agent={user_agent}"),
                ]
            }),
        );

        let client = ClientBuilder::native()
            .capabilities(caps)
            .connect(webdriver_url)
            .await
            .map_err(|source| ScrapeError::Session {
                webdriver_url: webdriver_url.to_owned(),
                source,
            })?;

        Ok(Self { client })
    }

    /// Loads `url`, waits for `marker` to appear, performs the scroll plan,
    /// and returns the full page source.
    ///
    /// Navigation and the marker wait are each time-boxed by `nav_timeout`;
    /// nothing else is. There is no retry — a failure here fails the render
    /// for the whole run.
    ///
    /// # Errors
    ///
    /// - [`ScrapeError::NavigationTimeout`] — `goto` did not complete in time.
    /// - [`ScrapeError::Webdriver`] — marker never appeared, or any scroll or
    ///   source command failed.
    pub async fn render(
        &self,
        url: &str,
        marker: &str,
        nav_timeout: Duration,
        scroll: ScrollPlan,
    ) -> Result<String, ScrapeError> {
        tokio::time::timeout(nav_timeout, self.client.goto(url))
            .await
            .map_err(|_| ScrapeError::NavigationTimeout {
                url: url.to_owned(),
                timeout_secs: nav_timeout.as_secs(),
            })??;
        tracing::info!(url, "deals page loaded");

        self.client
            .wait()
            .at_most(nav_timeout)
            .for_element(Locator::Css(marker))
            .await?;
        tracing::info!(marker, "deals container present");

        for pass in 1..=scroll.passes {
            self.client
                .execute(
                    "window.scrollBy(0, arguments[0]);",
                    vec![serde_json::json!(scroll.offset_px)],
                )
                .await?;
            let pause_ms = rand::rng().random_range(scroll.pause_min_ms..scroll.pause_max_ms);
            tokio::time::sleep(Duration::from_millis(pause_ms)).await;
            tracing::debug!(pass, total = scroll.passes, pause_ms, "scrolled deals page");
        }

        Ok(self.client.source().await?)
    }

    /// Ends the WebDriver session.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Webdriver`] if the session teardown command
    /// fails; the remote driver will still reap the session on its own
    /// timeout in that case.
    pub async fn close(self) -> Result<(), ScrapeError> {
        self.client.close().await?;
        Ok(())
    }
}
