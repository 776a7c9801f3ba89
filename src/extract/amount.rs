//! Extracted monetary amount.

use std::fmt;
use std::hash::{Hash, Hasher};

/// A decimal amount in the source currency, as read from a frame.
///
/// Two amounts are equal when their normalized strings are equal (`"7,5"` and
/// `"7.5"` are the same amount; `"10"` and `"10.0"` are not).  This is the
/// key the pipeline deduplicates on.
#[derive(Debug, Clone)]
pub struct Amount {
    raw: String,
    normalized: String,
    value: f64,
}

impl Amount {
    /// Build an amount from an extracted token.
    ///
    /// Returns `None` when the token is not a decimal number once the comma
    /// separator has been replaced by a period.
    pub fn from_extracted(raw: &str) -> Option<Self> {
        let normalized = raw.replace(',', ".");
        let value = normalized.parse::<f64>().ok()?;
        if !value.is_finite() {
            return None;
        }
        Some(Self {
            raw: raw.to_string(),
            normalized,
            value,
        })
    }

    /// The token exactly as it appeared in the recognized text.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The token with `,` replaced by `.`.
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

impl PartialEq for Amount {
    fn eq(&self, other: &Self) -> bool {
        self.normalized == other.normalized
    }
}

impl Eq for Amount {}

impl Hash for Amount {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.normalized.hash(state);
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.normalized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comma_is_normalized_to_period() {
        let amount = Amount::from_extracted("7,5").unwrap();
        assert_eq!(amount.raw(), "7,5");
        assert_eq!(amount.normalized(), "7.5");
        assert!((amount.value() - 7.5).abs() < f64::EPSILON);
    }

    #[test]
    fn equality_follows_normalized_form() {
        let comma = Amount::from_extracted("7,50").unwrap();
        let period = Amount::from_extracted("7.50").unwrap();
        assert_eq!(comma, period);
    }

    #[test]
    fn numerically_equal_strings_are_distinct() {
        let short = Amount::from_extracted("10").unwrap();
        let long = Amount::from_extracted("10.00").unwrap();
        assert_ne!(short, long);
        assert!((short.value() - long.value()).abs() < f64::EPSILON);
    }

    #[test]
    fn non_numeric_token_is_rejected() {
        assert!(Amount::from_extracted("").is_none());
        assert!(Amount::from_extracted("1,2,3").is_none());
        assert!(Amount::from_extracted("abc").is_none());
    }
}
