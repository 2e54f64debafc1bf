//! Client configuration, read from the environment with fallbacks.

use std::time::Duration;

use alumni_common::search_const::{PAGE_SIZE, REQUEST_TIMEOUT_SECS};

pub const DEFAULT_DATABASE_URL: &str = "http://localhost:3001/";
pub const DEFAULT_COUNTRIES_URL: &str = "https://restcountries.com/v3.1/all?fields=name,cca2";
pub const DEFAULT_CITIES_URL: &str = "https://countriesnow.space/api/v0.1/countries/cities";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Always ends with `/`.
    pub base_url: String,
    pub page_size: u64,
    pub request_timeout: Duration,
    pub countries_url: String,
    pub cities_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_DATABASE_URL.to_string(),
            page_size: PAGE_SIZE,
            request_timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            countries_url: DEFAULT_COUNTRIES_URL.to_string(),
            cities_url: DEFAULT_CITIES_URL.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`], reading variables through `lookup`. Numbers that do
    /// not parse, and zero, fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let base_url = lookup("ALUMNI_DATABASE_URL").unwrap_or(defaults.base_url);
        let page_size = positive_number(&lookup, "ALUMNI_PAGE_SIZE").unwrap_or(defaults.page_size);
        let request_timeout = positive_number(&lookup, "ALUMNI_REQUEST_TIMEOUT_SECS").map(Duration::from_secs).unwrap_or(defaults.request_timeout);
        let countries_url = lookup("ALUMNI_COUNTRIES_URL").unwrap_or(defaults.countries_url);
        let cities_url = lookup("ALUMNI_CITIES_URL").unwrap_or(defaults.cities_url);

        let config = Self { base_url: normalize_base_url(&base_url), page_size, request_timeout, countries_url, cities_url };
        tracing::debug!(base_url = %config.base_url, page_size = config.page_size, timeout_secs = config.request_timeout.as_secs(), "loaded client config");
        config
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = normalize_base_url(base_url);
        self
    }

    pub fn with_page_size(mut self, page_size: u64) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// A zero timeout would expire every request before it is sent, so it is ignored.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        if timeout.is_zero() {
            tracing::warn!("ignoring zero request timeout, keeping {:?}", self.request_timeout);
        } else {
            self.request_timeout = timeout;
        }
        self
    }

    pub fn with_location_urls(mut self, countries_url: impl Into<String>, cities_url: impl Into<String>) -> Self {
        self.countries_url = countries_url.into();
        self.cities_url = cities_url.into();
        self
    }

    /// `path` is relative, e.g. `api/search`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }
}

pub fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.ends_with('/') { trimmed.to_string() } else { format!("{trimmed}/") }
}

fn positive_number(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<u64> {
    let raw = lookup(key)?;
    match raw.trim().parse::<u64>() {
        Ok(0) => {
            tracing::warn!("ignoring {}=0, using the default", key);
            None
        }
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("ignoring {}={:?}: {}", key, raw, e);
            None
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_always_ends_with_separator() {
        assert_eq!(normalize_base_url("http://host:3001"), "http://host:3001/");
        assert_eq!(normalize_base_url("http://host:3001/"), "http://host:3001/");
        assert_eq!(normalize_base_url(""), "/");
    }

    #[test]
    fn endpoint_joins_without_double_slash() {
        let config = ClientConfig::default().with_base_url("http://host:3001/base");
        assert_eq!(config.endpoint("api/search"), "http://host:3001/base/api/search");
        assert_eq!(config.endpoint("/api/update-request"), "http://host:3001/base/api/update-request");
    }

    #[test]
    fn page_size_never_zero() {
        assert_eq!(ClientConfig::default().with_page_size(0).page_size, 1);
    }

    #[test]
    fn zero_timeout_keeps_the_previous_one() {
        let config = ClientConfig::default().with_request_timeout(Duration::from_secs(5)).with_request_timeout(Duration::ZERO);
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn environment_values_override_defaults() {
        let config = ClientConfig::from_lookup(|key| match key {
            "ALUMNI_DATABASE_URL" => Some("http://db:4000".to_string()),
            "ALUMNI_PAGE_SIZE" => Some(" 50 ".to_string()),
            "ALUMNI_REQUEST_TIMEOUT_SECS" => Some("7".to_string()),
            _ => None,
        });
        assert_eq!(config.base_url, "http://db:4000/");
        assert_eq!(config.page_size, 50);
        assert_eq!(config.request_timeout, Duration::from_secs(7));
        assert_eq!(config.countries_url, DEFAULT_COUNTRIES_URL);
    }

    #[test]
    fn unusable_numbers_fall_back_to_defaults() {
        let config = ClientConfig::from_lookup(|key| match key {
            "ALUMNI_PAGE_SIZE" => Some("twenty".to_string()),
            "ALUMNI_REQUEST_TIMEOUT_SECS" => Some("0".to_string()),
            _ => None,
        });
        assert_eq!(config, ClientConfig::default());
    }
}
