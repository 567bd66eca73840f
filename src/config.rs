use std::fmt;
use std::time::Duration;
use url::Url;

/// Production endpoint of the screening service.
pub const DEFAULT_ENDPOINT: &str = "https://screening.idware.net/api/Check";

/// Transport timeout applied unless the caller overrides it.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct ScreeningConfig {
    pub token: String,
    pub endpoint: String,
    /// `None` disables the transport timeout.
    pub timeout: Option<Duration>,
    /// Return a parse error for malformed response bodies instead of an empty result list.
    pub strict_parsing: bool,
}

impl ScreeningConfig {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Some(DEFAULT_TIMEOUT),
            strict_parsing: false,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_strict_parsing(mut self, strict: bool) -> Self {
        self.strict_parsing = strict;
        self
    }

    /// Parses the endpoint, accepting only http and https URLs.
    pub fn endpoint_url(&self) -> Result<Url, String> {
        let url = Url::parse(self.endpoint.trim())
            .map_err(|e| format!("invalid endpoint URL '{}': {}", self.endpoint, e))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            scheme => Err(format!(
                "endpoint must start with http:// or https://, got {}://",
                scheme
            )),
        }
    }

    /// Loads the configuration from the environment, reading `.env` first if present.
    ///
    /// * `IDSCAN_SCREENING_TOKEN` - required bearer token.
    /// * `IDSCAN_SCREENING_URL` - endpoint override.
    /// * `IDSCAN_SCREENING_TIMEOUT_SECS` - transport timeout, `0` disables it.
    /// * `IDSCAN_SCREENING_STRICT` - `true`/`1` enables strict response parsing.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let token = std::env::var("IDSCAN_SCREENING_TOKEN")
            .map_err(|_| anyhow::anyhow!("IDSCAN_SCREENING_TOKEN environment variable required"))
            .and_then(|token| {
                if token.trim().is_empty() {
                    anyhow::bail!("IDSCAN_SCREENING_TOKEN cannot be empty");
                }
                Ok(token)
            })?;

        let mut config = Self::new(token);

        if let Some(endpoint) = std::env::var("IDSCAN_SCREENING_URL")
            .ok()
            .filter(|s| !s.trim().is_empty())
        {
            config.endpoint = endpoint;
            config.endpoint_url().map_err(|e| anyhow::anyhow!(e))?;
        }

        if let Ok(secs) = std::env::var("IDSCAN_SCREENING_TIMEOUT_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                anyhow::anyhow!("IDSCAN_SCREENING_TIMEOUT_SECS must be a whole number of seconds")
            })?;
            config.timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }

        if let Ok(strict) = std::env::var("IDSCAN_SCREENING_STRICT") {
            config.strict_parsing = parse_flag(&strict).ok_or_else(|| {
                anyhow::anyhow!("IDSCAN_SCREENING_STRICT must be true/false or 1/0")
            })?;
        }

        tracing::info!("Screening configuration loaded");
        tracing::debug!("Screening endpoint: {}", config.endpoint);
        tracing::debug!("Screening timeout: {:?}", config.timeout);

        Ok(config)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" | "" => Some(false),
        _ => None,
    }
}

impl fmt::Debug for ScreeningConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScreeningConfig")
            .field("token", &"[REDACTED]")
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .field("strict_parsing", &self.strict_parsing)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ScreeningConfig::new("secret");
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.timeout, Some(DEFAULT_TIMEOUT));
        assert!(!config.strict_parsing);
        assert!(config.endpoint_url().is_ok());
    }

    #[test]
    fn test_endpoint_scheme_is_checked() {
        let config = ScreeningConfig::new("secret").with_endpoint("ftp://example.com/check");
        assert!(config.endpoint_url().is_err());

        let config = ScreeningConfig::new("secret").with_endpoint("not a url");
        assert!(config.endpoint_url().is_err());

        let config = ScreeningConfig::new("secret").with_endpoint("http://127.0.0.1:9000/api/Check");
        assert_eq!(config.endpoint_url().unwrap().path(), "/api/Check");
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = ScreeningConfig::new("super-secret-token");
        let printed = format!("{:?}", config);
        assert!(!printed.contains("super-secret-token"));
        assert!(printed.contains("[REDACTED]"));
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag("1"), Some(true));
        assert_eq!(parse_flag("no"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
