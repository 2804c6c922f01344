use url::Url;

static API_URL: Option<&'static str> = option_env!("MESSAGING_API_URL");
const DEFAULT_API_URL: &str = "http://localhost:8080/api";

/// Number of rows requested per page for every paged listing.
pub const PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_url: Url,
    pub page_size: u32,
}

impl Config {
    /// Reads the API base url baked in at build time.
    pub fn from_build_env() -> Result<Self, url::ParseError> {
        Self::new(API_URL.unwrap_or(DEFAULT_API_URL))
    }

    pub fn new(api_url: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            api_url: Url::parse(api_url)?,
            page_size: PAGE_SIZE,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_local_backend() {
        let config = Config::new(DEFAULT_API_URL).unwrap();
        assert_eq!(config.api_url.as_str(), "http://localhost:8080/api");
        assert_eq!(config.page_size, 10);
    }

    #[test]
    fn rejects_relative_url() {
        assert!(Config::new("/api").is_err());
    }
}
