//! Configuration module for Currency Lens.
//!
//! Provides `AppConfig` (top-level settings), sub-configs for the currency
//! selection and the conversion gateway, `AppPaths` for cross-platform
//! directories, and TOML persistence via `AppConfig::load` / `AppConfig::save`.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{AppConfig, CurrencyConfig, GatewayConfig, MissingFieldPolicy, API_KEY_ENV};
