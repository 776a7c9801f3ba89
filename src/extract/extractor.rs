//! First-match numeric token extraction.

use regex::Regex;

use super::Amount;

/// One or more ASCII digits, optionally followed by `.` or `,` and one or two
/// fractional digits.
pub const AMOUNT_PATTERN: &str = r"[0-9]+(?:[.,][0-9]{1,2})?";

/// Finds the leftmost price-like token in recognized text.
///
/// Stateless apart from the compiled pattern; `extract` is pure and returns
/// the match verbatim.  Normalization is left to [`Amount`].
#[derive(Debug, Clone)]
pub struct AmountExtractor {
    pattern: Regex,
}

impl AmountExtractor {
    pub fn new() -> Self {
        Self {
            // Constant pattern, covered by the tests below.
            pattern: Regex::new(AMOUNT_PATTERN).expect("AMOUNT_PATTERN is a valid regex"),
        }
    }

    /// Return the first match in `text`, unmodified.
    ///
    /// A separator with no fractional digit after it is not part of the
    /// match: `"10."` yields `"10"`.  Fractional digits beyond the second are
    /// left behind: `"12.345"` yields `"12.34"`.
    pub fn extract(&self, text: &str) -> Option<String> {
        self.pattern.find(text).map(|m| m.as_str().to_string())
    }

    /// [`extract`](Self::extract) followed by [`Amount::from_extracted`].
    ///
    /// A match too long to fit a finite `f64` (a digit run of roughly 310 or
    /// more) yields `None` here even though `extract` returns it.
    pub fn extract_amount(&self, text: &str) -> Option<Amount> {
        let found = self.pattern.find(text)?;
        let amount = Amount::from_extracted(found.as_str());
        if amount.is_none() {
            log::debug!(
                "extract: discarding {}-char token that is not a finite amount",
                found.as_str().len()
            );
        }
        amount
    }
}

impl Default for AmountExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> Option<String> {
        AmountExtractor::new().extract(text)
    }

    #[test]
    fn no_digits_yields_none() {
        assert_eq!(extract(""), None);
        assert_eq!(extract("Price: free"), None);
        assert_eq!(extract("., ,."), None);
    }

    #[test]
    fn finds_embedded_amount() {
        assert_eq!(extract("12.34").as_deref(), Some("12.34"));
        assert_eq!(extract("Total:12.34EUR").as_deref(), Some("12.34"));
        assert_eq!(extract("Price 19.99 USD").as_deref(), Some("19.99"));
    }

    #[test]
    fn comma_separator_is_kept_verbatim() {
        assert_eq!(extract("now 7,5 only").as_deref(), Some("7,5"));
    }

    #[test]
    fn returns_leftmost_of_several_numbers() {
        assert_eq!(extract("2 for 5.00").as_deref(), Some("2"));
        assert_eq!(extract("was 30,00 now 19,99").as_deref(), Some("30,00"));
    }

    #[test]
    fn trailing_bare_separator_matches_integer_part() {
        assert_eq!(extract("10.").as_deref(), Some("10"));
        assert_eq!(extract("10, then").as_deref(), Some("10"));
        assert_eq!(extract("10.-").as_deref(), Some("10"));
    }

    #[test]
    fn at_most_two_fractional_digits() {
        assert_eq!(extract("12.345").as_deref(), Some("12.34"));
        assert_eq!(extract("0.5").as_deref(), Some("0.5"));
    }

    #[test]
    fn thousands_separator_is_read_as_decimal() {
        assert_eq!(extract("1,234.56").as_deref(), Some("1,23"));
    }

    #[test]
    fn leading_separator_is_not_included() {
        assert_eq!(extract(".75").as_deref(), Some("75"));
    }

    #[test]
    fn non_ascii_digits_are_ignored() {
        assert_eq!(extract("٣٤ only"), None);
    }

    #[test]
    fn extract_amount_normalizes() {
        let amount = AmountExtractor::new().extract_amount("Sale 3,99!").unwrap();
        assert_eq!(amount.raw(), "3,99");
        assert_eq!(amount.normalized(), "3.99");
    }

    #[test]
    fn extract_amount_on_miss_is_none() {
        assert!(AmountExtractor::new().extract_amount("no price here").is_none());
    }

    #[test]
    fn overflowing_digit_run_is_matched_but_not_an_amount() {
        let text = format!("total {} due", "9".repeat(400));
        let extractor = AmountExtractor::new();

        assert_eq!(extractor.extract(&text).map(|m| m.len()), Some(400));
        assert!(extractor.extract_amount(&text).is_none());
    }
}
