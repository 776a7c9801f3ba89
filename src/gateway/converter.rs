//! Core `ConversionGateway` trait and its error type.

use async_trait::async_trait;
use thiserror::Error;

use crate::currency::CurrencyPair;

// ---------------------------------------------------------------------------
// ConversionError
// ---------------------------------------------------------------------------

/// Errors a conversion request can resolve with.
#[derive(Debug, Clone, Error)]
pub enum ConversionError {
    /// No credential was configured for the conversion service.
    #[error("no API key configured")]
    MissingApiKey,

    /// The base URL could not be turned into a request URL.
    #[error("invalid request URL: {0}")]
    InvalidUrl(String),

    /// HTTP transport or connection error.
    #[error("HTTP request failed: {0}")]
    Transport(String),

    /// The request did not complete within the configured timeout.
    #[error("conversion request timed out")]
    Timeout,

    /// The response body was not the expected JSON object.
    #[error("malformed conversion response: {0}")]
    MalformedResponse(String),

    /// The response had no numeric conversion result.
    #[error("conversion result missing from response")]
    MissingField,
}

impl From<reqwest::Error> for ConversionError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ConversionError::Timeout
        } else {
            ConversionError::Transport(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// ConversionGateway trait
// ---------------------------------------------------------------------------

/// Converts `amount` from `pair.from` into `pair.to`.
///
/// Each call is independent: one outbound request, no caching, no retry.
/// Implementors must be `Send + Sync` so they can be shared as
/// `Arc<dyn ConversionGateway>`.
#[async_trait]
pub trait ConversionGateway: Send + Sync {
    async fn convert(&self, amount: f64, pair: CurrencyPair) -> Result<f64, ConversionError>;
}
