//! Error bodies produced by the remote service.
//!
//! Rejections arrive in several shapes: `{"msg": ..}`, `{"message": ..}`,
//! `{"details": [..]}`, validation reports `{"detail": [{"msg": ..}, ..]}`
//! and plain `{"detail": ".."}`.

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Default, Deserialize)]
pub struct RemoteErrorBody {
    #[serde(default)]
    pub msg: Option<Value>,
    #[serde(default)]
    pub message: Option<Value>,
    #[serde(default)]
    pub details: Option<Value>,
    #[serde(default)]
    pub detail: Option<Value>,
}

fn non_empty_str(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}

/// Any meaningful value as text: strings verbatim, other values as JSON.
///
/// Blank strings, `null`, `false`, zero and empty containers count as absent.
fn present_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null | Value::Bool(false) => None,
        Value::String(_) => non_empty_str(value),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::Array(items) if items.is_empty() => None,
        Value::Object(map) if map.is_empty() => None,
        other => Some(other.to_string()),
    }
}

impl RemoteErrorBody {
    /// Picks the most specific human-readable message, if any.
    pub fn message(&self) -> Option<String> {
        present_text(self.msg.as_ref())
            .or_else(|| present_text(self.message.as_ref()))
            .or_else(|| {
                let first = self.details.as_ref()?.as_array()?.first();
                present_text(first)
            })
            .or_else(|| self.joined_detail())
            .or_else(|| non_empty_str(self.detail.as_ref()))
    }

    fn joined_detail(&self) -> Option<String> {
        let items = self.detail.as_ref()?.as_array()?;
        let joined = items
            .iter()
            .map(|item| item.get("msg").and_then(Value::as_str).unwrap_or_default())
            .collect::<Vec<_>>()
            .join(", ");
        if joined.trim_matches(|c: char| c == ',' || c.is_whitespace()).is_empty() {
            None
        } else {
            Some(joined)
        }
    }
}
