//! # Tier Pricing
//!
//! Adjusts a base unit price for a customer's tier classification.
//!
//! ## Discount Schedule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  Tier        Discount     $10.00 becomes                            │
//! │  ─────────   ─────────    ──────────────                            │
//! │  wholesale   15%          $8.50                                     │
//! │  vip         10%          $9.00                                     │
//! │  regular     none         $10.00                                    │
//! │  (unknown)   none         $10.00   ← policy, not a failure          │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Prices round half-up to whole cents at the discount multiplication,
//! so `tier_price` matches `round(base × factor, 2)`.

use crate::money::Money;
use crate::types::CustomerTier;

/// Wholesale discount in basis points (15%).
pub const WHOLESALE_DISCOUNT_BPS: u32 = 1500;

/// VIP discount in basis points (10%).
pub const VIP_DISCOUNT_BPS: u32 = 1000;

impl CustomerTier {
    /// The discount this tier receives, in basis points.
    pub const fn discount_bps(&self) -> u32 {
        match self {
            CustomerTier::Regular => 0,
            CustomerTier::Wholesale => WHOLESALE_DISCOUNT_BPS,
            CustomerTier::Vip => VIP_DISCOUNT_BPS,
        }
    }
}

/// Computes the tier-adjusted unit price for a catalog entry.
///
/// `None` means the tier tag was absent or unrecognized; the base price
/// passes through unchanged. There are no error conditions here.
///
/// ## Example
/// ```rust
/// use sln_core::money::Money;
/// use sln_core::pricing::tier_price;
/// use sln_core::types::CustomerTier;
///
/// let base = Money::from_cents(1000);
/// assert_eq!(tier_price(base, Some(CustomerTier::Wholesale)).cents(), 850);
/// assert_eq!(tier_price(base, Some(CustomerTier::Vip)).cents(), 900);
/// assert_eq!(tier_price(base, None).cents(), 1000);
/// ```
pub fn tier_price(base: Money, tier: Option<CustomerTier>) -> Money {
    match tier {
        Some(t) => base.apply_percentage_discount(t.discount_bps()),
        None => base,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wholesale_price() {
        // $12.50 × 0.85 = $10.625 → rounds to $10.62 (discount rounds half-up)
        let base = Money::from_cents(1250);
        assert_eq!(tier_price(base, Some(CustomerTier::Wholesale)).cents(), 1062);

        // Exact case: $10.00 × 0.85 = $8.50
        let base = Money::from_cents(1000);
        assert_eq!(tier_price(base, Some(CustomerTier::Wholesale)).cents(), 850);
    }

    #[test]
    fn test_vip_price() {
        let base = Money::from_cents(1000);
        assert_eq!(tier_price(base, Some(CustomerTier::Vip)).cents(), 900);

        // $8.75 × 0.90 = $7.875 → discount $0.875 rounds to $0.88 → $7.87
        let base = Money::from_cents(875);
        assert_eq!(tier_price(base, Some(CustomerTier::Vip)).cents(), 787);
    }

    #[test]
    fn test_regular_and_unknown_pass_through() {
        let base = Money::from_cents(1234);
        assert_eq!(tier_price(base, Some(CustomerTier::Regular)), base);
        assert_eq!(tier_price(base, None), base);
    }

    #[test]
    fn test_unknown_tag_defaults_to_full_price() {
        let base = Money::from_cents(999);
        let tier = CustomerTier::parse_tag("platinum");
        assert_eq!(tier_price(base, tier), base);
    }
}
