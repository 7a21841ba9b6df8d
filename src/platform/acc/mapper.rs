use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;

/// Paginated list envelope used by the ACC Admin API.
#[derive(Debug, Deserialize)]
pub(super) struct Page<T> {
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct Pagination {
    #[serde(default)]
    pub next_url: Option<String>,
}

impl<T> Page<T> {
    /// Whether another page follows this one. Falls back to "the page was
    /// full" when ACC omits pagination info.
    pub fn has_more(&self, limit: u32) -> bool {
        if self.results.is_empty() {
            return false;
        }
        match &self.pagination {
            Some(p) => p.next_url.as_deref().is_some_and(|u| !u.is_empty()),
            None => self.results.len() >= limit as usize,
        }
    }
}

/// Turn a failed ACC response into a readable message.
///
/// ACC reports errors in a few shapes (`detail`, `message`, or an `errors`
/// array); use whichever is present and fall back to the raw body.
pub(super) fn error_message(status: StatusCode, body: &str) -> String {
    let detail = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|json| extract_detail(&json));

    match detail {
        Some(detail) => format!("{status}: {detail}"),
        None if body.trim().is_empty() => status.to_string(),
        None => format!("{status}: {}", body.trim()),
    }
}

fn extract_detail(json: &Value) -> Option<String> {
    for key in ["detail", "message", "developerMessage", "title"] {
        if let Some(s) = json.get(key).and_then(Value::as_str) {
            return Some(s.to_string());
        }
    }
    json.get("errors")
        .and_then(Value::as_array)
        .and_then(|errors| errors.first())
        .and_then(extract_detail)
}
