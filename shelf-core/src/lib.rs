use std::sync::Arc;
use std::time::Duration;

/// Environment-driven settings shared by every crate.
pub mod config;
/// Error taxonomy for page resolution and configuration.
pub mod error;
/// Page request keys, results, and the data source seam.
pub mod page;

pub use config::Settings;
pub use error::{Error, Result};
pub use page::{PageKey, PageResult, PageSource};

const USER_AGENT: &str = concat!("shelf/", env!("CARGO_PKG_VERSION"));

/// Shared application context passed into command handlers.
///
/// Cheap to clone because it only stores reference-counted shared state.
#[derive(Clone)]
pub struct Context {
    pub http: reqwest::Client,
    pub settings: Arc<Settings>,
}

impl Context {
    /// Create a new application context with an HTTP client built from `settings`.
    pub fn new(settings: Settings) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.http_timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|source| Error::config(format!("failed to create HTTP client: {source}")))?;

        Ok(Self {
            http,
            settings: Arc::new(settings),
        })
    }
}
