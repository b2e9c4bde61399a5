use authorcheck::wire::clamp_timeout;
use serde_json::Value;

use crate::error::ApiError;

pub const MAX_TEXT_CHARS: usize = 10_000;

/// C0 controls other than tab, LF and CR, plus DEL and the C1 block.
fn is_stripped_control(c: char) -> bool {
    matches!(c, '\u{00}'..='\u{08}' | '\u{0B}' | '\u{0C}' | '\u{0E}'..='\u{1F}' | '\u{7F}'..='\u{9F}')
}

pub fn sanitize(text: &str) -> String {
    let cleaned: String = text.chars().filter(|&c| !is_stripped_control(c)).collect();
    cleaned.trim().to_string()
}

/// Validate the `text` member of a request body and return it sanitized.
pub fn validate_text(text: Option<&Value>) -> Result<String, ApiError> {
    let text = match text {
        Some(Value::String(s)) if !s.is_empty() => s,
        _ => return Err(ApiError::InvalidInput("Invalid text input".into())),
    };

    if text.chars().count() > MAX_TEXT_CHARS {
        return Err(ApiError::InvalidInput(format!(
            "Text too long. Maximum {} characters allowed",
            MAX_TEXT_CHARS
        )));
    }

    let sanitized = sanitize(text);
    if sanitized.is_empty() {
        return Err(ApiError::InvalidInput(
            "Text cannot be empty after sanitization".into(),
        ));
    }
    Ok(sanitized)
}

/// The `timeout` member in milliseconds, clamped. Absent or non-numeric
/// values use `default_ms`.
pub fn request_timeout(timeout: Option<&Value>, default_ms: u64) -> u64 {
    let ms = match timeout.and_then(Value::as_f64) {
        Some(ms) if ms.is_finite() => ms.max(0.0).round() as u64,
        _ => default_ms,
    };
    clamp_timeout(ms)
}
