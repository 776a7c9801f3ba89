//! Supported currencies, the active currency pair and converted values.
//!
//! [`CurrencySelector`] is the only way the pair changes.  The pipeline reads
//! it at the moment a conversion request is issued, so a selection made while
//! a request is in flight only affects the next request.

use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// CurrencyCode
// ---------------------------------------------------------------------------

/// Currencies offered for selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CurrencyCode {
    Usd,
    Eur,
    Huf,
    Gbp,
}

impl CurrencyCode {
    /// Every supported code, in selection-list order.
    pub const ALL: [CurrencyCode; 4] = [
        CurrencyCode::Usd,
        CurrencyCode::Eur,
        CurrencyCode::Huf,
        CurrencyCode::Gbp,
    ];

    /// ISO 4217 code as sent to the conversion service.
    pub fn as_str(&self) -> &'static str {
        match self {
            CurrencyCode::Usd => "USD",
            CurrencyCode::Eur => "EUR",
            CurrencyCode::Huf => "HUF",
            CurrencyCode::Gbp => "GBP",
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a supported currency.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported currency code: {0:?}")]
pub struct CurrencyParseError(pub String);

impl FromStr for CurrencyCode {
    type Err = CurrencyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        CurrencyCode::ALL
            .into_iter()
            .find(|code| code.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| CurrencyParseError(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// CurrencyPair
// ---------------------------------------------------------------------------

/// Ordered conversion direction: `from` → `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CurrencyPair {
    pub from: CurrencyCode,
    pub to: CurrencyCode,
}

impl CurrencyPair {
    pub fn new(from: CurrencyCode, to: CurrencyCode) -> Self {
        Self { from, to }
    }
}

impl Default for CurrencyPair {
    fn default() -> Self {
        Self::new(CurrencyCode::Usd, CurrencyCode::Eur)
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}→{}", self.from, self.to)
    }
}

// ---------------------------------------------------------------------------
// CurrencySelector
// ---------------------------------------------------------------------------

/// Shared handle to the active [`CurrencyPair`].
///
/// Cheap to clone (`Arc` clone).  The selection UI writes through it, the
/// pipeline reads a snapshot with [`current`](Self::current).
#[derive(Debug, Clone, Default)]
pub struct CurrencySelector {
    pair: Arc<Mutex<CurrencyPair>>,
}

impl CurrencySelector {
    pub fn new(pair: CurrencyPair) -> Self {
        Self {
            pair: Arc::new(Mutex::new(pair)),
        }
    }

    /// Snapshot of the pair in effect right now.
    pub fn current(&self) -> CurrencyPair {
        *self.lock()
    }

    pub fn select(&self, pair: CurrencyPair) {
        *self.lock() = pair;
    }

    pub fn select_from(&self, code: CurrencyCode) {
        self.lock().from = code;
    }

    pub fn select_to(&self, code: CurrencyCode) {
        self.lock().to = code;
    }

    fn lock(&self) -> MutexGuard<'_, CurrencyPair> {
        // A plain `Copy` value cannot be left half-written; recover from poison.
        self.pair.lock().unwrap_or_else(|e| e.into_inner())
    }
}

// ---------------------------------------------------------------------------
// Conversion
// ---------------------------------------------------------------------------

/// A successful conversion, tagged with the currency it is expressed in.
///
/// ```
/// use currency_lens::currency::{Conversion, CurrencyCode};
///
/// let c = Conversion::new(42.3, CurrencyCode::Eur);
/// assert_eq!(c.to_string(), "EUR 42.30");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Conversion {
    pub value: f64,
    pub currency: CurrencyCode,
}

impl Conversion {
    pub fn new(value: f64, currency: CurrencyCode) -> Self {
        Self { value, currency }
    }
}

impl fmt::Display for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:.2}", self.currency, self.value)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_codes_case_insensitively() {
        assert_eq!("usd".parse::<CurrencyCode>(), Ok(CurrencyCode::Usd));
        assert_eq!(" Huf ".parse::<CurrencyCode>(), Ok(CurrencyCode::Huf));
        assert_eq!("GBP".parse::<CurrencyCode>(), Ok(CurrencyCode::Gbp));
    }

    #[test]
    fn rejects_unknown_code() {
        let err = "JPY".parse::<CurrencyCode>().unwrap_err();
        assert_eq!(err, CurrencyParseError("JPY".into()));
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for code in CurrencyCode::ALL {
            assert_eq!(code.to_string().parse::<CurrencyCode>(), Ok(code));
        }
    }

    #[test]
    fn default_pair_is_usd_to_eur() {
        let pair = CurrencyPair::default();
        assert_eq!(pair.from, CurrencyCode::Usd);
        assert_eq!(pair.to, CurrencyCode::Eur);
    }

    #[test]
    fn selector_clones_share_the_pair() {
        let selector = CurrencySelector::default();
        let other = selector.clone();

        other.select_to(CurrencyCode::Gbp);
        assert_eq!(selector.current().to, CurrencyCode::Gbp);

        selector.select_from(CurrencyCode::Huf);
        assert_eq!(other.current().from, CurrencyCode::Huf);
    }

    #[test]
    fn conversion_formats_two_fixed_decimals() {
        assert_eq!(Conversion::new(42.3, CurrencyCode::Eur).to_string(), "EUR 42.30");
        assert_eq!(Conversion::new(18.4512, CurrencyCode::Eur).to_string(), "EUR 18.45");
        assert_eq!(Conversion::new(0.0, CurrencyCode::Huf).to_string(), "HUF 0.00");
    }

    #[test]
    fn serde_uses_upper_case_codes() {
        let json = serde_json::to_string(&CurrencyCode::Gbp).unwrap();
        assert_eq!(json, "\"GBP\"");
        let back: CurrencyCode = serde_json::from_str("\"HUF\"").unwrap();
        assert_eq!(back, CurrencyCode::Huf);
    }
}
