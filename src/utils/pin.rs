//! Legacy PIN format check and comparison.
//!
//! PINs are stored in plain text for compatibility with existing records.
//! Comparison runs in constant time.

use regex::Regex;
use std::sync::LazyLock;
use subtle::ConstantTimeEq;

static PIN_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{4,6}$").unwrap());

/// Returns true if `pin` consists of 4 to 6 ASCII digits.
pub fn is_valid_pin(pin: &str) -> bool {
    PIN_REGEX.is_match(pin)
}

/// Compares a stored PIN with a submitted one.
pub fn pins_match(stored: &str, submitted: &str) -> bool {
    stored.as_bytes().ct_eq(submitted.as_bytes()).into()
}
