use axum::http::{header, HeaderMap};
use reqwest::Url;

/// Result of inspecting a request's Origin / Referer headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OriginCheck {
    Allowed(String),
    /// Neither header present.
    Missing,
    Rejected(String),
}

#[derive(Debug, Clone)]
pub struct OriginPolicy {
    allowed: Vec<String>,
    require_origin: bool,
}

impl OriginPolicy {
    pub fn new(allowed: Vec<String>, require_origin: bool) -> Self {
        Self {
            allowed,
            require_origin,
        }
    }

    /// Exact match, or any localhost origin when a localhost entry is listed.
    pub fn is_allowed(&self, origin: &str) -> bool {
        self.allowed.iter().any(|a| {
            a == origin || (a.contains("localhost") && origin.contains("localhost"))
        })
    }

    pub fn check(&self, headers: &HeaderMap) -> OriginCheck {
        let value = |name| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
        };

        let origin = match (value(header::ORIGIN), value(header::REFERER)) {
            (Some(origin), _) => origin.to_string(),
            (None, Some(referer)) => match referer_origin(referer) {
                Some(origin) => origin,
                None => return OriginCheck::Rejected(referer.to_string()),
            },
            (None, None) => return OriginCheck::Missing,
        };

        if self.is_allowed(&origin) {
            OriginCheck::Allowed(origin)
        } else {
            OriginCheck::Rejected(origin)
        }
    }

    /// Whether a request with this check result may proceed.
    pub fn permits(&self, check: &OriginCheck) -> bool {
        match check {
            OriginCheck::Allowed(_) => true,
            OriginCheck::Missing => !self.require_origin,
            OriginCheck::Rejected(_) => false,
        }
    }
}

/// `scheme://host[:port]` of a Referer URL.
fn referer_origin(referer: &str) -> Option<String> {
    let url = Url::parse(referer).ok()?;
    let origin = url.origin();
    origin.is_tuple().then(|| origin.ascii_serialization())
}
