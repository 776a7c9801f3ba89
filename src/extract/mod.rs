//! Amount extraction from recognized text.
//!
//! * [`AmountExtractor`] — finds the first price-like token in a frame's text.
//! * [`Amount`] — the extracted token plus its normalized form and numeric value.
//!
//! # Quick start
//!
//! ```rust
//! use currency_lens::extract::AmountExtractor;
//!
//! let extractor = AmountExtractor::new();
//! assert_eq!(extractor.extract("Price 19.99 USD").as_deref(), Some("19.99"));
//!
//! let amount = extractor.extract_amount("Total 7,5").unwrap();
//! assert_eq!(amount.raw(), "7,5");
//! assert_eq!(amount.normalized(), "7.5");
//! ```

pub mod amount;
pub mod extractor;

pub use amount::Amount;
pub use extractor::{AmountExtractor, AMOUNT_PATTERN};
