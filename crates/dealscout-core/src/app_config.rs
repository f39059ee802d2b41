#[derive(Clone)]
pub struct AppConfig {
    pub deals_url: String,
    pub webdriver_url: String,
    pub user_agent: String,
    pub nav_timeout_secs: u64,
    pub scroll_passes: u32,
    pub scroll_offset_px: u32,
    pub scroll_pause_min_ms: u64,
    pub scroll_pause_max_ms: u64,
    pub collection: String,
    pub firestore_base_url: String,
    pub request_timeout_secs: u64,
    pub log_level: String,
    pub affiliate_tag: Option<String>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("deals_url", &self.deals_url)
            .field("webdriver_url", &self.webdriver_url)
            .field("user_agent", &self.user_agent)
            .field("nav_timeout_secs", &self.nav_timeout_secs)
            .field("scroll_passes", &self.scroll_passes)
            .field("scroll_offset_px", &self.scroll_offset_px)
            .field("scroll_pause_min_ms", &self.scroll_pause_min_ms)
            .field("scroll_pause_max_ms", &self.scroll_pause_max_ms)
            .field("collection", &self.collection)
            .field("firestore_base_url", &self.firestore_base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("log_level", &self.log_level)
            .field(
                "affiliate_tag",
                &self.affiliate_tag.as_ref().map(|_| "[redacted]"),
            )
            .finish()
    }
}
