//! Currency conversion gateway.
//!
//! This module provides:
//! * [`ConversionGateway`] — async trait implemented by every conversion backend.
//! * [`ExchangeRateGateway`] — HTTP backend for the ExchangeRate-API pair endpoint.
//! * [`ConversionError`] — failure variants a conversion resolves with.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use currency_lens::config::AppConfig;
//! use currency_lens::currency::CurrencyPair;
//! use currency_lens::gateway::{ConversionGateway, ExchangeRateGateway};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::default();
//!     let gateway = ExchangeRateGateway::from_config(&config.gateway);
//!
//!     match gateway.convert(19.99, CurrencyPair::default()).await {
//!         Ok(value) => println!("{value:.2}"),
//!         Err(e) => eprintln!("conversion failed: {e}"),
//!     }
//! }
//! ```

pub mod converter;
pub mod exchange_rate;

pub use crate::config::MissingFieldPolicy;
pub use converter::{ConversionError, ConversionGateway};
pub use exchange_rate::{
    build_request_url, parse_conversion_body, ExchangeRateGateway, CONVERSION_RESULT_FIELD,
};
