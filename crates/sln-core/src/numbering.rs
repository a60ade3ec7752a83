//! # Invoice Numbering
//!
//! Human-readable invoice number generation.
//!
//! ## Format
//! ```text
//! INV-20260829-3F9A2C1B
//!  │      │        │
//!  │      │        └── 8 uppercase hex chars from a UUID v4
//!  │      └── creation date, YYYYMMDD
//!  └── fixed prefix
//! ```
//!
//! ## Uniqueness
//! The random suffix carries 32 bits of entropy, which gives practical
//! (not cryptographic) uniqueness: ~1% collision odds across 10,000
//! invoices in a single day. The invoice number is a DISPLAY LABEL.
//! The durable storage key is the separately generated uuid `id`, and
//! that is where uniqueness is enforced.

use chrono::NaiveDate;
use uuid::Uuid;

/// Fixed prefix for all invoice numbers.
pub const INVOICE_NUMBER_PREFIX: &str = "INV";

/// Generates an invoice number for the given creation date.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use sln_core::numbering::generate_invoice_number;
///
/// let date = NaiveDate::from_ymd_opt(2026, 8, 29).unwrap();
/// let number = generate_invoice_number(date);
/// assert!(number.starts_with("INV-20260829-"));
/// assert_eq!(number.len(), "INV-20260829-".len() + 8);
/// ```
pub fn generate_invoice_number(date: NaiveDate) -> String {
    let suffix: String = Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(8)
        .collect::<String>()
        .to_ascii_uppercase();

    format!(
        "{}-{}-{}",
        INVOICE_NUMBER_PREFIX,
        date.format("%Y%m%d"),
        suffix
    )
}

/// Checks whether a string matches the `INV-YYYYMMDD-XXXXXXXX` shape.
///
/// Used by tests and import tooling; generation always satisfies this.
pub fn is_valid_invoice_number(s: &str) -> bool {
    let mut parts = s.split('-');

    let (Some(prefix), Some(date), Some(suffix), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return false;
    };

    prefix == INVOICE_NUMBER_PREFIX
        && date.len() == 8
        && date.chars().all(|c| c.is_ascii_digit())
        && suffix.len() == 8
        && suffix
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn test_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 29).expect("valid date")
    }

    #[test]
    fn test_format() {
        let number = generate_invoice_number(test_date());
        assert!(number.starts_with("INV-20260829-"));
        assert!(is_valid_invoice_number(&number));

        let suffix = number.rsplit('-').next().expect("suffix");
        assert_eq!(suffix.len(), 8);
        assert!(suffix
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_validator_rejects_malformed() {
        assert!(!is_valid_invoice_number(""));
        assert!(!is_valid_invoice_number("INV-20260829"));
        assert!(!is_valid_invoice_number("RCP-20260829-3F9A2C1B"));
        assert!(!is_valid_invoice_number("INV-2026089-3F9A2C1B"));
        assert!(!is_valid_invoice_number("INV-20260829-3f9a2c1b"));
        assert!(!is_valid_invoice_number("INV-20260829-3F9A2C1B-X"));
        assert!(!is_valid_invoice_number("INV-20260829-3F9A2C"));
    }

    /// Birthday-bound check: 10,000 draws from a 32-bit space should be
    /// unique with high probability. A handful of collisions is within
    /// the expected bound; wholesale duplication is a generator bug.
    #[test]
    fn test_uniqueness_birthday_bound() {
        let date = test_date();
        let numbers: HashSet<String> =
            (0..10_000).map(|_| generate_invoice_number(date)).collect();

        assert!(
            numbers.len() >= 9_990,
            "expected near-unique invoice numbers, got {} distinct of 10000",
            numbers.len()
        );

        for n in &numbers {
            assert!(is_valid_invoice_number(n));
        }
    }
}
