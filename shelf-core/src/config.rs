//! Settings loaded from the process environment.

use std::str::FromStr;

use crate::error::{Error, Result};

/// Catalog endpoint used when `SHELF_CATALOG_URL` is unset.
pub const DEFAULT_CATALOG_URL: &str = "https://dummyjson.com/products";
/// Simulated network latency applied to each page resolution.
pub const DEFAULT_LATENCY_MS: u64 = 500;
/// Rows per page when the table is first mounted.
pub const DEFAULT_PAGE_SIZE: usize = 10;
/// Request timeout for the catalog download.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Runtime settings for the catalog table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Endpoint returning `{"products": [...]}`.
    pub catalog_url: String,
    /// Initial page size.
    pub page_size: usize,
    /// Delay applied before each simulated page resolution.
    pub latency_ms: u64,
    /// Keep the last page visible while the next one resolves.
    pub keep_previous_while_pending: bool,
    /// Pull the page index back into range when the page count shrinks.
    pub clamp_page_index: bool,
    /// HTTP client timeout.
    pub http_timeout_secs: u64,
    /// Number of simulated page resolutions that fail before the source recovers.
    pub simulated_failures: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_owned(),
            page_size: DEFAULT_PAGE_SIZE,
            latency_ms: DEFAULT_LATENCY_MS,
            keep_previous_while_pending: true,
            clamp_page_index: false,
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            simulated_failures: 0,
        }
    }
}

impl Settings {
    /// Read settings from `SHELF_*` environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read settings through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let settings = Self {
            catalog_url: lookup("SHELF_CATALOG_URL")
                .map(|url| url.trim().to_owned())
                .filter(|url| !url.is_empty())
                .unwrap_or(defaults.catalog_url),
            page_size: parse_var(&lookup, "SHELF_PAGE_SIZE")?.unwrap_or(defaults.page_size),
            latency_ms: parse_var(&lookup, "SHELF_LATENCY_MS")?.unwrap_or(defaults.latency_ms),
            keep_previous_while_pending: parse_flag(&lookup, "SHELF_KEEP_PREVIOUS")?
                .unwrap_or(defaults.keep_previous_while_pending),
            clamp_page_index: parse_flag(&lookup, "SHELF_CLAMP_PAGE_INDEX")?
                .unwrap_or(defaults.clamp_page_index),
            http_timeout_secs: parse_var(&lookup, "SHELF_HTTP_TIMEOUT_SECS")?
                .unwrap_or(defaults.http_timeout_secs),
            simulated_failures: parse_var(&lookup, "SHELF_SIMULATED_FAILURES")?
                .unwrap_or(defaults.simulated_failures),
        };

        if settings.page_size == 0 {
            return Err(Error::config("SHELF_PAGE_SIZE must be at least 1"));
        }

        Ok(settings)
    }

    /// Set the catalog endpoint.
    pub fn with_catalog_url(mut self, url: impl Into<String>) -> Self {
        self.catalog_url = url.into();
        self
    }

    /// Set the simulated latency.
    pub fn with_latency_ms(mut self, latency_ms: u64) -> Self {
        self.latency_ms = latency_ms;
        self
    }

    /// Make the first `failures` simulated page resolutions fail.
    pub fn with_simulated_failures(mut self, failures: usize) -> Self {
        self.simulated_failures = failures;
        self
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Result<Option<T>> {
    match lookup(name) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| Error::config(format!("{name} has an invalid value: {raw:?}"))),
        None => Ok(None),
    }
}

fn parse_flag(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Result<Option<bool>> {
    match lookup(name) {
        Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(Some(true)),
            "0" | "false" | "no" | "off" => Ok(Some(false)),
            _ => Err(Error::config(format!("{name} must be a boolean, got {raw:?}"))),
        },
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let settings = Settings::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.page_size, 10);
        assert_eq!(settings.latency_ms, 500);
        assert!(settings.keep_previous_while_pending);
        assert!(!settings.clamp_page_index);
        assert_eq!(settings.simulated_failures, 0);
    }

    #[test]
    fn test_overrides() {
        let settings = Settings::from_lookup(lookup_from(&[
            ("SHELF_CATALOG_URL", "http://localhost:9000/products"),
            ("SHELF_PAGE_SIZE", "20"),
            ("SHELF_LATENCY_MS", "0"),
            ("SHELF_KEEP_PREVIOUS", "false"),
            ("SHELF_CLAMP_PAGE_INDEX", "yes"),
            ("SHELF_SIMULATED_FAILURES", "2"),
        ]))
        .unwrap();

        assert_eq!(settings.catalog_url, "http://localhost:9000/products");
        assert_eq!(settings.page_size, 20);
        assert_eq!(settings.latency_ms, 0);
        assert!(!settings.keep_previous_while_pending);
        assert!(settings.clamp_page_index);
        assert_eq!(settings.simulated_failures, 2);
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = Settings::from_lookup(lookup_from(&[("SHELF_PAGE_SIZE", "ten")])).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));

        let err = Settings::from_lookup(lookup_from(&[("SHELF_PAGE_SIZE", "0")])).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));

        let err =
            Settings::from_lookup(lookup_from(&[("SHELF_KEEP_PREVIOUS", "maybe")])).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }
}
