use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("failed to start WebDriver session at {webdriver_url}: {source}")]
    Session {
        webdriver_url: String,
        #[source]
        source: fantoccini::error::NewSessionError,
    },

    #[error("WebDriver command failed: {0}")]
    Webdriver(#[from] fantoccini::error::CmdError),

    #[error("navigation to {url} timed out after {timeout_secs}s")]
    NavigationTimeout { url: String, timeout_secs: u64 },
}
