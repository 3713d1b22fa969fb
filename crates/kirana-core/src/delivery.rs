//! # Delivery Fee
//!
//! Threshold-based delivery charge and its GST.
//!
//! ## Policy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  subtotal  > ₹50.00  ──►  free delivery, tax exactly zero              │
//! │  subtotal <= ₹50.00  ──►  flat ₹5.00 fee + 18% GST on the fee          │
//! │                                                                         │
//! │  The boundary is EXCLUSIVE: a subtotal of exactly ₹50.00 still pays    │
//! │  the fee. Delivery GST always splits intrastate (CGST+SGST); the       │
//! │  delivery origin/destination state is out of model scope, and this     │
//! │  simplification is deliberate.                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::TaxRate;
use crate::{BASE_DELIVERY_FEE_PAISE, DELIVERY_GST_BPS, FREE_DELIVERY_THRESHOLD_PAISE};

// =============================================================================
// Delivery Policy
// =============================================================================

/// Configurable delivery pricing policy.
///
/// The defaults match the storefront's standing policy; tenants may
/// construct their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DeliveryPolicy {
    /// Orders strictly above this subtotal ship free.
    pub free_threshold: Money,

    /// Flat fee charged below (or at) the threshold.
    pub base_fee: Money,

    /// GST rate applied to a nonzero delivery fee.
    pub tax_rate: TaxRate,
}

impl Default for DeliveryPolicy {
    fn default() -> Self {
        DeliveryPolicy {
            free_threshold: Money::from_paise(FREE_DELIVERY_THRESHOLD_PAISE),
            base_fee: Money::from_paise(BASE_DELIVERY_FEE_PAISE),
            tax_rate: TaxRate::from_bps(DELIVERY_GST_BPS),
        }
    }
}

// =============================================================================
// Delivery Quote
// =============================================================================

/// The delivery portion of a cart breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DeliveryQuote {
    /// Delivery charge (zero when the order ships free).
    pub charge: Money,

    /// GST on the delivery charge, split intrastate by the aggregator.
    pub tax: Money,

    /// The rate used, carried for the invoice.
    pub tax_rate: TaxRate,
}

impl DeliveryPolicy {
    /// Quotes the delivery charge and its tax for a pre-tax subtotal.
    ///
    /// When delivery is free the tax is the zero constant, never a
    /// computed `0 × rate` (avoids sign/precision artifacts on the
    /// generic path).
    ///
    /// ## Example
    /// ```rust
    /// use kirana_core::delivery::DeliveryPolicy;
    /// use kirana_core::money::Money;
    ///
    /// let policy = DeliveryPolicy::default();
    ///
    /// let paid = policy.quote(Money::from_paise(5000)); // exactly ₹50.00
    /// assert_eq!(paid.charge.paise(), 500);
    ///
    /// let free = policy.quote(Money::from_paise(5001)); // ₹50.01
    /// assert!(free.charge.is_zero());
    /// assert!(free.tax.is_zero());
    /// ```
    pub fn quote(&self, subtotal_pre_tax: Money) -> DeliveryQuote {
        if subtotal_pre_tax > self.free_threshold {
            return DeliveryQuote {
                charge: Money::zero(),
                tax: Money::zero(),
                tax_rate: self.tax_rate,
            };
        }

        let charge = self.base_fee;
        DeliveryQuote {
            charge,
            tax: charge.calculate_tax(self.tax_rate),
            tax_rate: self.tax_rate,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_below_threshold_pays_fee_and_tax() {
        let quote = DeliveryPolicy::default().quote(Money::from_paise(3000));
        assert_eq!(quote.charge.paise(), 500);
        assert_eq!(quote.tax.paise(), 90); // 18% of ₹5.00
        assert_eq!(quote.tax_rate.bps(), 1800);
    }

    #[test]
    fn test_boundary_is_exclusive() {
        let policy = DeliveryPolicy::default();

        // Exactly at the threshold: still charged
        let at = policy.quote(Money::from_paise(5000));
        assert_eq!(at.charge.paise(), 500);
        assert_eq!(at.tax.paise(), 90);

        // One paisa above: free
        let above = policy.quote(Money::from_paise(5001));
        assert!(above.charge.is_zero());
        assert!(above.tax.is_zero());
    }

    #[test]
    fn test_zero_subtotal_pays_fee() {
        // An empty cart still gets the flat fee plus its tax
        let quote = DeliveryPolicy::default().quote(Money::zero());
        assert_eq!(quote.charge.paise(), 500);
        assert_eq!(quote.tax.paise(), 90);
    }

    #[test]
    fn test_custom_policy() {
        let policy = DeliveryPolicy {
            free_threshold: Money::from_paise(10000),
            base_fee: Money::from_paise(1000),
            tax_rate: TaxRate::from_bps(500),
        };

        let quote = policy.quote(Money::from_paise(9999));
        assert_eq!(quote.charge.paise(), 1000);
        assert_eq!(quote.tax.paise(), 50);

        let free = policy.quote(Money::from_paise(10001));
        assert!(free.charge.is_zero());
    }
}
