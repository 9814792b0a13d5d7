use serde::{Deserialize, Serialize};

use crate::lifecycle::InternshipStatus;

#[derive(Debug, Serialize)]
pub struct StatusUpdateRequest {
    pub status: InternshipStatus,
}

/// Error body returned by the backend on a refused request.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    /// Best human-readable reason from a raw error response body.
    pub fn reason(body: &str) -> Option<String> {
        let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
        parsed
            .message
            .or(parsed.error)
            .or_else(|| Some(body.trim().to_string()))
            .filter(|m| !m.is_empty())
    }
}
