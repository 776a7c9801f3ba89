//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and shared across threads.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;
use crate::currency::{CurrencyCode, CurrencyPair};

/// Environment variable consulted when `gateway.api_key` is unset or blank.
pub const API_KEY_ENV: &str = "CURRENCY_LENS_API_KEY";

// ---------------------------------------------------------------------------
// MissingFieldPolicy
// ---------------------------------------------------------------------------

/// What the gateway does when a response parses as JSON but carries no
/// numeric conversion result.
///
/// | Variant         | Outcome                          |
/// |-----------------|----------------------------------|
/// | `DefaultToZero` | `Ok(0.0)` — legacy behaviour     |
/// | `Fail`          | `Err(ConversionError::MissingField)` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissingFieldPolicy {
    DefaultToZero,
    Fail,
}

impl Default for MissingFieldPolicy {
    fn default() -> Self {
        Self::DefaultToZero
    }
}

// ---------------------------------------------------------------------------
// GatewayConfig
// ---------------------------------------------------------------------------

/// Settings for the remote conversion service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Base URL; the request path `/{key}/pair/{from}/{to}/{amount}` is
    /// appended to it.
    pub base_url: String,
    /// Service credential.  `None` falls back to [`API_KEY_ENV`].
    pub api_key: Option<String>,
    /// Per-request timeout.  `None` lets a hung request stay pending.
    pub timeout_secs: Option<u64>,
    /// Handling of a response without `conversion_result`.
    pub missing_field: MissingFieldPolicy,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: "https://v6.exchangerate-api.com/v6".into(),
            api_key: None,
            timeout_secs: None,
            missing_field: MissingFieldPolicy::default(),
        }
    }
}

impl GatewayConfig {
    /// The configured key, or the value of [`API_KEY_ENV`].  Empty strings
    /// count as absent.
    pub fn resolve_api_key(&self) -> Option<String> {
        pick_api_key(self.api_key.as_deref(), std::env::var(API_KEY_ENV).ok())
    }
}

fn pick_api_key(configured: Option<&str>, env: Option<String>) -> Option<String> {
    let non_blank = |key: &String| !key.trim().is_empty();
    configured
        .map(str::to_string)
        .filter(non_blank)
        .or_else(|| env.filter(non_blank))
}

// ---------------------------------------------------------------------------
// CurrencyConfig
// ---------------------------------------------------------------------------

/// Currency pair selected on startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyConfig {
    pub from: CurrencyCode,
    pub to: CurrencyCode,
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        let pair = CurrencyPair::default();
        Self {
            from: pair.from,
            to: pair.to,
        }
    }
}

impl CurrencyConfig {
    pub fn pair(&self) -> CurrencyPair {
        CurrencyPair::new(self.from, self.to)
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// ```rust,no_run
/// use currency_lens::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
/// println!("{}", config.currency.pair());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Initial currency selection.
    pub currency: CurrencyConfig,
    /// Conversion service settings.
    pub gateway: GatewayConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns `true` when no `settings.toml` file exists yet.
    pub fn is_first_run() -> bool {
        !AppPaths::new().settings_file.exists()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
