use crate::app_config::AppConfig;
use crate::ConfigError;

/// Default desktop user agent for the rendered browser session, matching what
/// the deals page serves full markup to.
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/125.0.0.0 Safari/537.36";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid or fail validation.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for
/// testing or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid or fail validation.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup — no
/// `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let deals_url = or_default("DEALSCOUT_DEALS_URL", "https://www.amazon.com/deals");
    let webdriver_url = or_default("DEALSCOUT_WEBDRIVER_URL", "http://localhost:4444");
    let user_agent = or_default("DEALSCOUT_USER_AGENT", DEFAULT_USER_AGENT);
    let nav_timeout_secs = parse_u64("DEALSCOUT_NAV_TIMEOUT_SECS", "60")?;
    let scroll_passes = parse_u32("DEALSCOUT_SCROLL_PASSES", "3")?;
    let scroll_offset_px = parse_u32("DEALSCOUT_SCROLL_OFFSET_PX", "10000")?;
    let scroll_pause_min_ms = parse_u64("DEALSCOUT_SCROLL_PAUSE_MIN_MS", "1500")?;
    let scroll_pause_max_ms = parse_u64("DEALSCOUT_SCROLL_PAUSE_MAX_MS", "3000")?;
    let collection = or_default("DEALSCOUT_COLLECTION", "deals");
    let firestore_base_url = or_default(
        "DEALSCOUT_FIRESTORE_BASE_URL",
        "https://firestore.googleapis.com",
    );
    let request_timeout_secs = parse_u64("DEALSCOUT_REQUEST_TIMEOUT_SECS", "30")?;
    let log_level = or_default("DEALSCOUT_LOG_LEVEL", "info");

    // The affiliate tag is optional; an empty value behaves as absent so a
    // blank secret in CI does not produce "?tag=" links.
    let affiliate_tag = lookup("AMAZON_ASSOCIATE_TAG")
        .ok()
        .filter(|t| !t.is_empty());

    if scroll_pause_max_ms <= scroll_pause_min_ms {
        return Err(ConfigError::Validation(format!(
            "DEALSCOUT_SCROLL_PAUSE_MAX_MS ({scroll_pause_max_ms}) must be greater than \
             DEALSCOUT_SCROLL_PAUSE_MIN_MS ({scroll_pause_min_ms})"
        )));
    }

    Ok(AppConfig {
        deals_url,
        webdriver_url,
        user_agent,
        nav_timeout_secs,
        scroll_passes,
        scroll_offset_px,
        scroll_pause_min_ms,
        scroll_pause_max_ms,
        collection,
        firestore_base_url,
        request_timeout_secs,
        log_level,
        affiliate_tag,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    #[test]
    fn build_app_config_succeeds_with_empty_env() {
        let map: HashMap<&str, &str> = HashMap::new();
        let cfg = build_app_config(lookup_from_map(&map)).expect("defaults should be valid");
        assert_eq!(cfg.deals_url, "https://www.amazon.com/deals");
        assert_eq!(cfg.webdriver_url, "http://localhost:4444");
        assert_eq!(cfg.nav_timeout_secs, 60);
        assert_eq!(cfg.scroll_passes, 3);
        assert_eq!(cfg.scroll_offset_px, 10000);
        assert_eq!(cfg.scroll_pause_min_ms, 1500);
        assert_eq!(cfg.scroll_pause_max_ms, 3000);
        assert_eq!(cfg.collection, "deals");
        assert_eq!(cfg.firestore_base_url, "https://firestore.googleapis.com");
        assert_eq!(cfg.request_timeout_secs, 30);
        assert_eq!(cfg.log_level, "info");
        assert!(cfg.affiliate_tag.is_none());
    }

    #[test]
    fn build_app_config_overrides_deals_url() {
        let mut map = HashMap::new();
        map.insert("DEALSCOUT_DEALS_URL", "https://example.com/offers");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.deals_url, "https://example.com/offers");
    }

    #[test]
    fn build_app_config_overrides_scroll_passes() {
        let mut map = HashMap::new();
        map.insert("DEALSCOUT_SCROLL_PASSES", "5");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.scroll_passes, 5);
    }

    #[test]
    fn build_app_config_fails_with_invalid_scroll_passes() {
        let mut map = HashMap::new();
        map.insert("DEALSCOUT_SCROLL_PASSES", "not-a-number");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "DEALSCOUT_SCROLL_PASSES"),
            "expected InvalidEnvVar(DEALSCOUT_SCROLL_PASSES), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_fails_with_invalid_nav_timeout() {
        let mut map = HashMap::new();
        map.insert("DEALSCOUT_NAV_TIMEOUT_SECS", "soon");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "DEALSCOUT_NAV_TIMEOUT_SECS"),
            "expected InvalidEnvVar(DEALSCOUT_NAV_TIMEOUT_SECS), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_rejects_inverted_pause_range() {
        let mut map = HashMap::new();
        map.insert("DEALSCOUT_SCROLL_PAUSE_MIN_MS", "3000");
        map.insert("DEALSCOUT_SCROLL_PAUSE_MAX_MS", "1500");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::Validation(_))),
            "expected Validation error for inverted pause range, got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_reads_affiliate_tag() {
        let mut map = HashMap::new();
        map.insert("AMAZON_ASSOCIATE_TAG", "mytag-20");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.affiliate_tag.as_deref(), Some("mytag-20"));
    }

    #[test]
    fn build_app_config_empty_affiliate_tag_is_absent() {
        let mut map = HashMap::new();
        map.insert("AMAZON_ASSOCIATE_TAG", "");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert!(cfg.affiliate_tag.is_none());
    }

    #[test]
    fn debug_redacts_affiliate_tag() {
        let mut map = HashMap::new();
        map.insert("AMAZON_ASSOCIATE_TAG", "mytag-20");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("mytag-20"), "tag leaked into Debug output");
        assert!(rendered.contains("[redacted]"));
    }
}
