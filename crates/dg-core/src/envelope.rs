//! The response envelope returned to callers.
//!
//! Every request ends in exactly one envelope, success or failure. Provider
//! and parsing failures are folded into [`ResponseError`] reasons so the
//! caller always receives parseable JSON.
//!
//! Wire shape:
//!
//! ```json
//! {"type":"Function","status":"Success","data":{"params":{},"description":"...","usage":"..."}}
//! {"type":"None","status":"Error","info":"InvalidKind"}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::kind::ArtifactKind;

/// Outcome of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseStatus {
    Success,
    Error,
}

/// Why a request ended in [`ResponseStatus::Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseError {
    /// The provider replied, but the reply was not the expected JSON
    Parsing,
    /// The provider call failed or returned no content
    ProviderEmpty,
    /// The snippet could not be classified as a function or component
    InvalidKind,
}

impl ResponseError {
    /// Human-readable reason, suitable for logs and UIs.
    pub fn description(&self) -> &'static str {
        match self {
            ResponseError::Parsing => "Error during JSON parsing",
            ResponseError::ProviderEmpty => "Error receiving response from the completion provider",
            ResponseError::InvalidKind => "Error invalid code type in request",
        }
    }
}

/// Uniform success/error result for one documentation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    /// Kind the documentation was generated for
    #[serde(rename = "type")]
    pub kind: ArtifactKind,
    /// Success or error
    pub status: ResponseStatus,
    /// Parsed provider reply, attached verbatim on success
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Failure reason, present only on error
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<ResponseError>,
}

impl ResponseEnvelope {
    /// Create a successful envelope carrying the parsed documentation.
    #[must_use]
    pub fn success(kind: ArtifactKind, data: Value) -> Self {
        debug_assert!(kind.is_documentable(), "Only functions and components carry documentation");

        Self {
            kind,
            status: ResponseStatus::Success,
            data: Some(data),
            info: None,
        }
    }

    /// Create an error envelope.
    #[must_use]
    pub fn error(kind: ArtifactKind, reason: ResponseError) -> Self {
        Self {
            kind,
            status: ResponseStatus::Error,
            data: None,
            info: Some(reason),
        }
    }

    /// Whether this envelope carries documentation.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == ResponseStatus::Success
    }

    /// Serialize to the JSON string handed back to callers.
    ///
    /// Never fails: if serialization of the payload were to fail, a
    /// minimal error envelope is produced instead.
    #[must_use]
    pub fn to_json(&self) -> String {
        match serde_json::to_string(self) {
            Ok(json) => json,
            Err(_) => format!(
                r#"{{"type":"{}","status":"Error","info":"Parsing"}}"#,
                self.kind.name()
            ),
        }
    }
}
