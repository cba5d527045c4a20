//! The host-facing request and response envelopes.

use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashMap;
use std::str::FromStr;
use tracing::error;

/// One proxied HTTP request as the host hands it over.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRequest {
    pub http_method: String,
    pub path: String,
    #[serde(default)]
    pub query_string_parameters: Option<HashMap<String, String>>,
    #[serde(default)]
    pub body: Option<String>,
}

impl ApiRequest {
    /// Query parameters, treating an empty map the same as none at all.
    pub fn query(&self) -> Option<&HashMap<String, String>> {
        self.query_string_parameters
            .as_ref()
            .filter(|params| !params.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    // Accepted from the host but never routed.
    Delete,
}

impl FromStr for Method {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PATCH" => Ok(Self::Patch),
            "DELETE" => Ok(Self::Delete),
            other => Err(format!("unsupported method {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Headers {
    #[serde(rename = "Content-Type")]
    pub content_type: &'static str,
    #[serde(rename = "Access-Control-Allow-Origin")]
    pub allow_origin: &'static str,
}

impl Default for Headers {
    fn default() -> Self {
        Self {
            content_type: "application/json",
            allow_origin: "*",
        }
    }
}

/// The envelope returned to the host. `body` is left out entirely when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    pub status_code: u16,
    pub headers: Headers,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl ApiResponse {
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

/// Wraps a status and optional payload into the envelope.
///
/// Numbers keep their exact decimal text because `serde_json` is built with
/// arbitrary precision.
pub fn build_response<T: Serialize + ?Sized>(status: StatusCode, body: Option<&T>) -> ApiResponse {
    let body = match body.map(serde_json::to_string).transpose() {
        Ok(body) => body,
        Err(e) => {
            error!("Failed to serialize response body: {e}");
            return build_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                Some(&json!({ "message": "Internal server error" })),
            );
        }
    };

    ApiResponse {
        status_code: status.as_u16(),
        headers: Headers::default(),
        body,
    }
}

/// Shorthand for the `{"message": ...}` bodies used by every error path.
pub fn message(status: StatusCode, message: impl AsRef<str>) -> ApiResponse {
    build_response(status, Some(&json!({ "message": message.as_ref() })))
}
