pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

pub const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    "https://author-check-7ghtfiynu-shinkais-projects.vercel.app",
    "http://localhost:3000",
    "http://localhost:5173",
    "https://author-check-one.vercel.app",
];

/// Gateway settings, read once at start-up.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub port: u16,
    /// Empty means unconfigured; requests that pass validation get a 500.
    pub api_key: String,
    pub model: String,
    pub endpoint: String,
    pub default_timeout_ms: u64,
    pub allowed_origins: Vec<String>,
    /// Reject requests carrying neither Origin nor Referer.
    pub require_origin: bool,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            default_timeout_ms: DEFAULT_TIMEOUT_MS,
            allowed_origins: DEFAULT_ALLOWED_ORIGINS.iter().map(|s| s.to_string()).collect(),
            require_origin: false,
        }
    }
}

impl GatewayConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            port: non_empty("PORT")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.port),
            api_key: lookup("API_KEY").unwrap_or_default(),
            model: non_empty("MODEL").unwrap_or(defaults.model),
            endpoint: non_empty("ENDPOINT").unwrap_or(defaults.endpoint),
            default_timeout_ms: non_empty("AI_TIMEOUT")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.default_timeout_ms),
            allowed_origins: non_empty("ALLOWED_ORIGINS")
                .map(|v| {
                    v.split(',')
                        .map(|o| o.trim().trim_end_matches('/').to_string())
                        .filter(|o| !o.is_empty())
                        .collect()
                })
                .unwrap_or(defaults.allowed_origins),
            require_origin: non_empty("REQUIRE_ORIGIN")
                .map(|v| v.trim().eq_ignore_ascii_case("true"))
                .unwrap_or(defaults.require_origin),
        }
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}
