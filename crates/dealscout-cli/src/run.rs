//! The one-shot pipeline: credentials → render → extract/normalize → commit.
//!
//! Error severities follow the batch-job contract: credential resolution and
//! the batch write are fatal (non-zero exit); a render failure is logged and
//! the run proceeds to the save step with whatever was gathered, possibly
//! nothing; per-card problems never surface here at all. The external
//! scheduler owns re-invocation, so nothing is retried in-process.

use std::time::{Duration, Instant};

use anyhow::Context;

use dealscout_core::AppConfig;
use dealscout_scraper::{deals_from_html, DealPageRenderer, ScrollPlan, DEAL_CARD_MARKER};
use dealscout_store::FirestoreClient;

pub async fn run(config: &AppConfig, dry_run: bool) -> anyhow::Result<()> {
    let started = Instant::now();

    // Resolve credentials before opening a browser: without them nothing can
    // be persisted, so failing fast beats scraping for nothing.
    let store = if dry_run {
        None
    } else {
        let key = dealscout_store::resolve_service_account_from_env()
            .context("store credential resolution failed")?;
        let store = FirestoreClient::new(
            key,
            &config.collection,
            &config.firestore_base_url,
            config.request_timeout_secs,
        )?;
        tracing::info!(collection = %config.collection, "store client initialized");
        Some(store)
    };

    let html = render_deals_page(config).await;
    let records = match html.as_deref() {
        Some(html) => deals_from_html(html, config.affiliate_tag.as_deref()),
        None => Vec::new(),
    };

    if records.is_empty() {
        tracing::warn!("no deals to save");
    } else if let Some(store) = &store {
        let written = store
            .commit(&records)
            .await
            .context("batch upsert failed")?;
        tracing::info!(written, "deals saved");
    } else {
        for record in &records {
            tracing::info!(id = %record.id, title = %record.title, "dry-run record");
        }
        tracing::info!(records = records.len(), "dry run; store write skipped");
    }

    tracing::info!(
        elapsed_secs = format!("{:.2}", started.elapsed().as_secs_f64()),
        "run complete"
    );
    Ok(())
}

/// Renders the deals page, guaranteeing the browser session is released
/// before persistence on both the success and the failure path.
///
/// Returns `None` on any render failure — the run continues with an empty
/// extraction rather than aborting the process.
async fn render_deals_page(config: &AppConfig) -> Option<String> {
    let renderer =
        match DealPageRenderer::connect(&config.webdriver_url, &config.user_agent).await {
            Ok(renderer) => renderer,
            Err(e) => {
                tracing::error!(error = %e, "browser session failed to start; nothing to extract");
                return None;
            }
        };

    let scroll = ScrollPlan {
        passes: config.scroll_passes,
        offset_px: config.scroll_offset_px,
        pause_min_ms: config.scroll_pause_min_ms,
        pause_max_ms: config.scroll_pause_max_ms,
    };
    let rendered = renderer
        .render(
            &config.deals_url,
            DEAL_CARD_MARKER,
            Duration::from_secs(config.nav_timeout_secs),
            scroll,
        )
        .await;

    if let Err(e) = renderer.close().await {
        tracing::warn!(error = %e, "browser session close failed; driver will reap it");
    }

    match rendered {
        Ok(html) => Some(html),
        Err(e) => {
            tracing::error!(error = %e, "render failed; extraction yields nothing this run");
            None
        }
    }
}
