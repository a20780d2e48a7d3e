use crate::error::{ContentError, ToErrorCode};
use serde::Serialize;
use serde_json::Value;

/// Uniform outcome of every action.
///
/// Serializes as `{"success": true, "data": ...}` or
/// `{"success": false, "error": "...", "code": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ActionResult {
    #[must_use]
    pub fn ok(data: Option<Value>) -> Self {
        Self {
            success: true,
            error: None,
            code: None,
            tip: None,
            data,
        }
    }

    #[must_use]
    pub fn failed(err: &ContentError) -> Self {
        let (code, tip) = err.error_code_and_tip();
        Self {
            success: false,
            error: Some(err.to_string()),
            code: Some(code.to_string()),
            tip: tip.map(str::to_string),
            data: None,
        }
    }

    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| {
            r#"{"success":false,"error":"serialization error","code":"INTERNAL_ERROR"}"#.to_string()
        })
    }
}
