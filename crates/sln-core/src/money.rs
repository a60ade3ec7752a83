//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                         │
//! │                                                                     │
//! │  In floating point:  0.1 + 0.2 = 0.30000000000000004  ❌            │
//! │                                                                     │
//! │  OUR SOLUTION: Integer Cents                                        │
//! │    $12.50 is 1250 cents. Every subtotal, tax amount and total in    │
//! │    the system is an i64 count of cents; rounding happens exactly    │
//! │    once, at each basis-point multiplication.                        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for adjustments and refunds
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// Every monetary value in the system flows through this type:
/// `Part.unit_price_cents` → line totals → invoice subtotal/tax/total →
/// dashboard sales and expense sums.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use sln_core::money::Money;
    ///
    /// let price = Money::from_cents(1250); // $12.50
    /// assert_eq!(price.cents(), 1250);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Parses a decimal string ("12.50", "7", "-3.2") into Money.
    ///
    /// ## Why This Exists
    /// Expense amounts arrive from legacy imports as free text. Aggregation
    /// parses them row by row and skips anything this function rejects.
    ///
    /// ## Rules
    /// - Optional leading `-`
    /// - At most two fractional digits
    /// - No grouping separators, no currency symbols
    ///
    /// ## Example
    /// ```rust
    /// use sln_core::money::Money;
    ///
    /// assert_eq!(Money::parse_decimal("12.50"), Some(Money::from_cents(1250)));
    /// assert_eq!(Money::parse_decimal("7"), Some(Money::from_cents(700)));
    /// assert_eq!(Money::parse_decimal("-3.2"), Some(Money::from_cents(-320)));
    /// assert_eq!(Money::parse_decimal("N/A"), None);
    /// ```
    pub fn parse_decimal(input: &str) -> Option<Money> {
        let input = input.trim();
        let (negative, digits) = match input.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, input),
        };

        if digits.is_empty() {
            return None;
        }

        let (whole, frac) = match digits.split_once('.') {
            Some((w, f)) => (w, f),
            None => (digits, ""),
        };

        if whole.is_empty() && frac.is_empty() {
            return None;
        }
        if frac.len() > 2 {
            return None;
        }
        if !whole.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        if !frac.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }

        let whole_cents: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse::<i64>().ok()?.checked_mul(100)?
        };

        let frac_cents: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().ok()? * 10,
            _ => frac.parse::<i64>().ok()?,
        };

        let cents = whole_cents.checked_add(frac_cents)?;
        Some(Money(if negative { -cents } else { cents }))
    }

    /// Calculates tax on this amount, rounding half-up to whole cents.
    ///
    /// ## Implementation
    /// Integer math: `(amount * bps + 5000) / 10000`. The +5000 rounds the
    /// half-cent boundary upward, matching `round(amount × rate, 2)`.
    ///
    /// ## Example
    /// ```rust
    /// use sln_core::money::Money;
    /// use sln_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_cents(2500); // $25.00
    /// let tax = subtotal.calculate_tax(TaxRate::from_bps(800)); // 8%
    /// assert_eq!(tax.cents(), 200); // $2.00
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        // i128 to prevent overflow on large amounts
        let tax_cents = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_cents(tax_cents as i64)
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use sln_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(875); // $8.75
    /// assert_eq!(unit_price.multiply_quantity(4).cents(), 3500);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Applies a percentage discount and returns the discounted amount.
    ///
    /// ## Arguments
    /// * `discount_bps` - Discount in basis points (1500 = 15%)
    ///
    /// ## Example
    /// ```rust
    /// use sln_core::money::Money;
    ///
    /// let base = Money::from_cents(10000); // $100.00
    /// assert_eq!(base.apply_percentage_discount(1500).cents(), 8500);
    /// ```
    pub fn apply_percentage_discount(&self, discount_bps: u32) -> Money {
        // Discount amount rounds half-up, then is subtracted
        let discount_amount = (self.0 as i128 * discount_bps as i128 + 5000) / 10000;
        Money::from_cents(self.0 - discount_amount as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
/// For debugging and logs; presentation layers format for display.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1250);
        assert_eq!(money.cents(), 1250);
        assert_eq!(money.dollars(), 12);
        assert_eq!(money.cents_part(), 50);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1250)), "$12.50");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);
    }

    #[test]
    fn test_tax_calculation_eight_percent() {
        // $25.00 at 8% = $2.00 exactly
        let amount = Money::from_cents(2500);
        assert_eq!(amount.calculate_tax(TaxRate::from_bps(800)).cents(), 200);

        // $12.31 at 8% = $0.9848 → rounds to $0.98
        let amount = Money::from_cents(1231);
        assert_eq!(amount.calculate_tax(TaxRate::from_bps(800)).cents(), 98);

        // $19.37 at 8% = $1.5496 → rounds to $1.55
        let amount = Money::from_cents(1937);
        assert_eq!(amount.calculate_tax(TaxRate::from_bps(800)).cents(), 155);
    }

    #[test]
    fn test_percentage_discount() {
        let base = Money::from_cents(10000); // $100.00
        assert_eq!(base.apply_percentage_discount(1500).cents(), 8500); // 15% off
        assert_eq!(base.apply_percentage_discount(1000).cents(), 9000); // 10% off

        // Rounding: $12.50 at 15% off → discount $1.875 → $1.88 → $10.62
        let odd = Money::from_cents(1250);
        assert_eq!(odd.apply_percentage_discount(1500).cents(), 1062);
    }

    #[test]
    fn test_multiply_quantity() {
        let unit_price = Money::from_cents(875);
        assert_eq!(unit_price.multiply_quantity(4).cents(), 3500);
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(Money::parse_decimal("12.50"), Some(Money::from_cents(1250)));
        assert_eq!(Money::parse_decimal("7"), Some(Money::from_cents(700)));
        assert_eq!(Money::parse_decimal("0.05"), Some(Money::from_cents(5)));
        assert_eq!(Money::parse_decimal("-3.2"), Some(Money::from_cents(-320)));
        assert_eq!(Money::parse_decimal(" 20.00 "), Some(Money::from_cents(2000)));
        assert_eq!(Money::parse_decimal(".5"), Some(Money::from_cents(50)));

        assert_eq!(Money::parse_decimal(""), None);
        assert_eq!(Money::parse_decimal("N/A"), None);
        assert_eq!(Money::parse_decimal("12.345"), None);
        assert_eq!(Money::parse_decimal("$5"), None);
        assert_eq!(Money::parse_decimal("1,000"), None);
        assert_eq!(Money::parse_decimal("-"), None);
        assert_eq!(Money::parse_decimal("."), None);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_negative());

        let negative = Money::from_cents(-100);
        assert!(negative.is_negative());
    }
}
