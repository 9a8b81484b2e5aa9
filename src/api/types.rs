//! API request and response types
//!
//! All types are framework-agnostic and can be used by any client.

use serde::Serialize;

use crate::core::models::{PushParams, PushReport};

use super::error::{ApiError, ApiErrorData};

// =============================================================================
// RESPONSE ENVELOPE
// =============================================================================

/// Standard API response envelope
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    /// Whether the request succeeded
    pub success: bool,
    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error details (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiErrorData>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a successful response
    #[must_use]
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

impl ApiResponse<()> {
    /// Create an error response
    #[must_use]
    pub fn error(error: &ApiError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiErrorData::from(error)),
        }
    }
}

// =============================================================================
// REQUEST TYPES
// =============================================================================

/// Query parameters of a push request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PushQuery {
    /// Source type for messages that carry none (config default when absent)
    pub source_type: Option<String>,
    /// Account the batch belongs to
    pub screen_name: Option<String>,
    /// Harvesting frequency name
    pub harvesting_freq: Option<String>,
    /// Profile lifetime in seconds
    pub lifetime: Option<String>,
    /// URL of the source file or feed
    pub url: Option<String>,
    /// JSONP callback wrapping the response
    pub callback: Option<String>,
}

impl PushQuery {
    /// Parse a URL query string (`a=1&b=2`, without the leading `?`)
    ///
    /// Unknown keys are ignored; a repeated key keeps its last value.
    #[must_use]
    pub fn from_query_string(query: &str) -> Self {
        let mut parsed = Self::default();
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            let slot = match key.as_ref() {
                "source_type" => &mut parsed.source_type,
                "screen_name" => &mut parsed.screen_name,
                "harvesting_freq" => &mut parsed.harvesting_freq,
                "lifetime" => &mut parsed.lifetime,
                "url" => &mut parsed.url,
                "callback" => &mut parsed.callback,
                _ => continue,
            };
            *slot = Some(value.into_owned());
        }
        parsed
    }

    /// Batch parameters for a push from `client_host`
    #[must_use]
    pub fn to_params(&self, client_host: &str) -> PushParams {
        PushParams {
            screen_name: self.screen_name.clone(),
            harvesting_freq: self.harvesting_freq.clone(),
            lifetime: self.lifetime.clone(),
            url: self.url.clone(),
            client_host: client_host.to_string(),
        }
    }
}

// =============================================================================
// RESPONSE DATA TYPES
// =============================================================================

/// Status endpoint response data
#[derive(Debug, Clone, Serialize)]
pub struct StatusData {
    /// Always `ok` while the service answers
    pub status: String,
    /// Service version
    pub version: String,
}

/// Result of a push before it is rendered
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PushOutcome {
    /// Ingestion counters and import profile
    pub report: PushReport,
    /// Messages dropped before ingestion as already stored
    pub duplicates: usize,
}
