//! Failures surfaced by [`CatalogClient`](crate::catalog::CatalogClient).

use reqwest::StatusCode;
use serde::Deserialize;

/// Message used when a failed response carries no upstream error message.
pub const GENERIC_FAILURE_MESSAGE: &str = "API request failed";

/// Everything that can go wrong talking to the catalog API.
///
/// An entity that doesn't exist is not an error: single-entity lookups return
/// `Ok(None)` and list lookups return an empty `Vec`.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The API answered with a non-success status.
    #[error("catalog API {endpoint} request failed with status {status}: {message}")]
    Upstream {
        endpoint: &'static str,
        status: StatusCode,
        /// The upstream `error.message`, or [`GENERIC_FAILURE_MESSAGE`].
        message: String,
    },
    /// The request never completed (DNS, connect, timeout, reset).
    #[error("send request to catalog API {endpoint} endpoint")]
    Network {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },
    /// The API answered with success but the body did not have the expected shape.
    #[error("parse catalog API {endpoint} response as JSON")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },
    /// The configured base URL cannot have endpoint paths appended to it.
    #[error("catalog base URL {base_url} cannot be used as a base")]
    InvalidBaseUrl { base_url: String },
}

impl CatalogError {
    /// The upstream status, if the API answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            CatalogError::Upstream { status, .. } => Some(*status),
            CatalogError::Network { source, .. } => source.status(),
            CatalogError::Decode { .. } | CatalogError::InvalidBaseUrl { .. } => None,
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, CatalogError::Network { .. })
    }
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: Option<ErrorBody>,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Pulls `error.message` out of a failed response body.
pub(crate) fn upstream_message(body: &[u8]) -> String {
    serde_json::from_slice::<ErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.error)
        .and_then(|error| error.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string())
}
