//! `ExchangeRateGateway` — HTTP client for the ExchangeRate-API pair endpoint.
//!
//! Request: `GET {base_url}/{api_key}/pair/{FROM}/{TO}/{amount}`
//! Response: a JSON object whose `conversion_result` field holds the
//! converted amount.
//!
//! All connection details come from [`GatewayConfig`]; the credential is never
//! compiled in.

use async_trait::async_trait;
use reqwest::Url;
use serde_json::Value;

use crate::config::{GatewayConfig, MissingFieldPolicy};
use crate::currency::CurrencyPair;
use crate::gateway::converter::{ConversionError, ConversionGateway};

/// JSON key carrying the converted amount.
pub const CONVERSION_RESULT_FIELD: &str = "conversion_result";

// ---------------------------------------------------------------------------
// ExchangeRateGateway
// ---------------------------------------------------------------------------

/// Conversion backend backed by a shared [`reqwest::Client`].
pub struct ExchangeRateGateway {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    missing_field: MissingFieldPolicy,
}

impl ExchangeRateGateway {
    /// Build a gateway with its own client.
    ///
    /// The client gets the configured timeout when there is one.  A default
    /// client is used if the builder fails.
    pub fn from_config(config: &GatewayConfig) -> Self {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(std::time::Duration::from_secs(secs));
        }
        let client = builder.build().unwrap_or_else(|_| reqwest::Client::new());
        Self::with_client(client, config)
    }

    /// Build a gateway around an existing client (shared pool, test setup).
    pub fn with_client(client: reqwest::Client, config: &GatewayConfig) -> Self {
        let api_key = config.resolve_api_key();
        if api_key.is_none() {
            log::warn!("gateway: no API key configured; conversions will fail");
        }

        Self {
            client,
            base_url: config.base_url.clone(),
            api_key,
            missing_field: config.missing_field,
        }
    }
}

#[async_trait]
impl ConversionGateway for ExchangeRateGateway {
    async fn convert(&self, amount: f64, pair: CurrencyPair) -> Result<f64, ConversionError> {
        let key = self
            .api_key
            .as_deref()
            .ok_or(ConversionError::MissingApiKey)?;
        let url = build_request_url(&self.base_url, key, amount, pair)?;

        log::debug!("gateway: requesting {amount} {pair}");
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            // The service still answers with a JSON body; it is parsed below.
            log::warn!("gateway: conversion service answered {status} for {pair}");
        }

        let body = response.text().await?;
        parse_conversion_body(&body, self.missing_field)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Append `/{api_key}/pair/{FROM}/{TO}/{amount}` to `base_url`.
///
/// Each segment is percent-encoded, so a key containing `/` or `?` cannot
/// change the shape of the request.
pub fn build_request_url(
    base_url: &str,
    api_key: &str,
    amount: f64,
    pair: CurrencyPair,
) -> Result<Url, ConversionError> {
    let mut url = Url::parse(base_url).map_err(|e| ConversionError::InvalidUrl(e.to_string()))?;
    let amount = amount.to_string();

    url.path_segments_mut()
        .map_err(|_| ConversionError::InvalidUrl(format!("{base_url} cannot be a base URL")))?
        .pop_if_empty()
        .extend([
            api_key,
            "pair",
            pair.from.as_str(),
            pair.to.as_str(),
            amount.as_str(),
        ]);

    Ok(url)
}

/// Read the converted amount out of a response body.
///
/// A body that is not a JSON object is [`ConversionError::MalformedResponse`].
/// A missing or non-numeric `conversion_result` is governed by `policy`.
/// Numeric strings are accepted.
pub fn parse_conversion_body(body: &str, policy: MissingFieldPolicy) -> Result<f64, ConversionError> {
    let json: Value = serde_json::from_str(body)
        .map_err(|e| ConversionError::MalformedResponse(e.to_string()))?;

    if !json.is_object() {
        return Err(ConversionError::MalformedResponse(
            "expected a JSON object".into(),
        ));
    }

    match json.get(CONVERSION_RESULT_FIELD).and_then(as_number) {
        Some(value) => Ok(value),
        None => match policy {
            MissingFieldPolicy::DefaultToZero => {
                log::warn!("gateway: response has no {CONVERSION_RESULT_FIELD}; using 0.0");
                Ok(0.0)
            }
            MissingFieldPolicy::Fail => Err(ConversionError::MissingField),
        },
    }
}

fn as_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
