//! Currency Lens — live price conversion from recognized camera text.
//!
//! The crate covers the frame-to-conversion core:
//!
//! ```text
//! RecognizedTextEvent ─▶ AmountExtractor ─▶ (new amount?) ─▶ ConversionGateway
//!                                                                  │
//!                      watch::Receiver<Option<String>> ◀── ConversionPipeline
//! ```
//!
//! Camera capture, text recognition and overlay rendering are left to the
//! embedding application.

pub mod config;
pub mod currency;
pub mod extract;
pub mod gateway;
pub mod pipeline;
