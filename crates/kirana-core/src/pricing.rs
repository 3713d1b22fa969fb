//! # Line Item Pricer
//!
//! Prices a single cart line from its catalog record.
//!
//! ## The Algorithm
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     price_line(product, qty, cashback)                  │
//! │                                                                         │
//! │  1. Decompose listed price                                              │
//! │     inclusive? ──► base = listed / (1 + rate);  tax = listed - base    │
//! │     exclusive? ──► base = listed;               tax = listed × rate    │
//! │                                                                         │
//! │  2. Discount the BASE only:    base' = base × (1 - d)                  │
//! │  3. Scale tax by the SAME factor: tax' = tax × (1 - d)                 │
//! │     (a percentage-off promotion reduces the taxable value)             │
//! │  4. Multiply by quantity ──► line_subtotal, line_tax                   │
//! │  5. split_gst(line_tax, is_interstate) ──► CGST/SGST or IGST           │
//! │  6. Cashback on the DISCOUNTED BASE (never the tax-inclusive total)    │
//! │  7. line_total = line_subtotal + line_tax                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Deterministic pure computation: no retries, no I/O, no clamping.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::gst::split_gst;
use crate::money::Money;
use crate::types::Product;

// =============================================================================
// Line Breakdown
// =============================================================================

/// The priced breakdown of one cart line.
///
/// Uses the snapshot pattern: the product's identity fields are copied in
/// so the record renders and persists correctly even if the catalog
/// changes afterwards. All amounts are paise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineBreakdown {
    /// Product ID (UUID), for audit joins.
    pub product_id: String,

    /// SKU at time of pricing (frozen).
    pub sku: String,

    /// Product name at time of pricing (frozen).
    pub name: String,

    /// Quantity priced.
    pub quantity: i64,

    /// Pre-tax, pre-discount price per unit.
    pub base_price_paise: i64,

    /// Pre-tax price per unit after discount.
    pub discounted_base_paise: i64,

    /// Undiscounted GST per unit, from the price decomposition.
    pub tax_per_unit_paise: i64,

    /// `discounted_base × quantity`.
    pub line_subtotal_paise: i64,

    /// `tax_per_unit × (1 - discount) × quantity`.
    pub line_tax_paise: i64,

    /// Central GST portion of the line tax (intrastate only).
    pub cgst_paise: i64,

    /// State GST portion of the line tax (intrastate only).
    pub sgst_paise: i64,

    /// Integrated GST portion of the line tax (interstate only).
    pub igst_paise: i64,

    /// `line_subtotal + line_tax`.
    pub line_total_paise: i64,

    /// The cashback rate actually applied (product's, or the cart-wide
    /// override), carried for display.
    pub cashback_bps: u32,

    /// Cashback earned on the discounted base.
    pub cashback_paise: i64,
}

impl LineBreakdown {
    /// Returns the line subtotal as Money.
    #[inline]
    pub fn line_subtotal(&self) -> Money {
        Money::from_paise(self.line_subtotal_paise)
    }

    /// Returns the line tax as Money.
    #[inline]
    pub fn line_tax(&self) -> Money {
        Money::from_paise(self.line_tax_paise)
    }

    /// Returns the line total as Money.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_paise(self.line_total_paise)
    }
}

// =============================================================================
// Pricer
// =============================================================================

/// Prices one cart line.
///
/// `effective_cashback_bps` is resolved by the aggregator (cart-wide
/// override when positive, else the product's own rate); `price_line`
/// applies whatever it is handed.
///
/// ## Errors
/// - [`CoreError::InvalidQuantity`] when `quantity <= 0`. The cart
///   collaborator is expected to prevent this, but the pricer must not
///   silently produce a zero or negative line.
/// - [`CoreError::InvalidProduct`] when the listed price is negative or a
///   percentage field is at/above 100%.
///
/// ## Example
/// ```rust
/// use chrono::Utc;
/// use kirana_core::pricing::price_line;
/// use kirana_core::types::Product;
///
/// let ghee = Product {
///     id: "550e8400-e29b-41d4-a716-446655440000".to_string(),
///     sku: "GHEE-1L".to_string(),
///     name: "Ghee 1L".to_string(),
///     listed_price_paise: 11800, // ₹118.00, GST included
///     gst_rate_bps: 1800,
///     discount_bps: 0,
///     cashback_bps: 0,
///     price_includes_tax: true,
///     is_interstate: false,
///     is_active: true,
///     created_at: Utc::now(),
///     updated_at: Utc::now(),
/// };
///
/// let line = price_line(&ghee, 1, 0).unwrap();
/// assert_eq!(line.base_price_paise, 10000);
/// assert_eq!(line.cgst_paise, 900);
/// assert_eq!(line.sgst_paise, 900);
/// assert_eq!(line.line_total_paise, 11800);
/// ```
pub fn price_line(
    product: &Product,
    quantity: i64,
    effective_cashback_bps: u32,
) -> CoreResult<LineBreakdown> {
    if quantity <= 0 {
        return Err(CoreError::InvalidQuantity { quantity });
    }
    if product.listed_price_paise < 0 {
        return Err(CoreError::InvalidProduct {
            product_id: product.id.clone(),
            reason: "negative listed price".to_string(),
        });
    }
    if product.discount_bps >= 10000 {
        return Err(CoreError::InvalidProduct {
            product_id: product.id.clone(),
            reason: format!("discount {} bps is not below 100%", product.discount_bps),
        });
    }
    if effective_cashback_bps >= 10000 {
        return Err(CoreError::InvalidProduct {
            product_id: product.id.clone(),
            reason: format!("cashback {} bps is not below 100%", effective_cashback_bps),
        });
    }

    // Step 1: decompose the listed price into base and per-unit tax
    let listed = product.listed_price();
    let (base, tax_per_unit) = if product.price_includes_tax {
        listed.extract_tax(product.gst_rate())
    } else {
        (listed, listed.calculate_tax(product.gst_rate()))
    };

    // Steps 2-3: discount the base, and scale the tax by the same factor.
    // The discount never touches the tax amount directly.
    let discounted_base = base.apply_percentage_discount(product.discount_bps);
    let discounted_tax = tax_per_unit.apply_percentage_discount(product.discount_bps);

    // Step 4: scale to the line
    let line_subtotal = discounted_base.multiply_quantity(quantity);
    let line_tax = discounted_tax.multiply_quantity(quantity);

    // Step 5: split by locality
    let split = split_gst(line_tax, product.is_interstate);

    // Step 6: cashback on the discounted base, at the effective rate
    let cashback = line_subtotal.percentage(effective_cashback_bps);

    // Step 7
    let line_total = line_subtotal + line_tax;

    Ok(LineBreakdown {
        product_id: product.id.clone(),
        sku: product.sku.clone(),
        name: product.name.clone(),
        quantity,
        base_price_paise: base.paise(),
        discounted_base_paise: discounted_base.paise(),
        tax_per_unit_paise: tax_per_unit.paise(),
        line_subtotal_paise: line_subtotal.paise(),
        line_tax_paise: line_tax.paise(),
        cgst_paise: split.cgst.paise(),
        sgst_paise: split.sgst.paise(),
        igst_paise: split.igst.paise(),
        line_total_paise: line_total.paise(),
        cashback_bps: effective_cashback_bps,
        cashback_paise: cashback.paise(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn test_product(listed_price_paise: i64) -> Product {
        Product {
            id: "550e8400-e29b-41d4-a716-446655440000".to_string(),
            sku: "GHEE-1L".to_string(),
            name: "Ghee 1L".to_string(),
            listed_price_paise,
            gst_rate_bps: 1800,
            discount_bps: 0,
            cashback_bps: 0,
            price_includes_tax: false,
            is_interstate: false,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_inclusive_price_scenario() {
        // ₹118 listed, 18% inclusive, qty 1, intrastate:
        // base ₹100.00, tax ₹18.00, CGST ₹9.00, SGST ₹9.00, total ₹118.00
        let mut product = test_product(11800);
        product.price_includes_tax = true;

        let line = price_line(&product, 1, 0).unwrap();
        assert_eq!(line.base_price_paise, 10000);
        assert_eq!(line.tax_per_unit_paise, 1800);
        assert_eq!(line.cgst_paise, 900);
        assert_eq!(line.sgst_paise, 900);
        assert_eq!(line.igst_paise, 0);
        assert_eq!(line.line_total_paise, 11800);
    }

    #[test]
    fn test_discount_scales_tax_scenario() {
        // Same product with 50% discount:
        // discounted base ₹50.00, line tax ₹9.00, line total ₹59.00
        let mut product = test_product(11800);
        product.price_includes_tax = true;
        product.discount_bps = 5000;

        let line = price_line(&product, 1, 0).unwrap();
        assert_eq!(line.discounted_base_paise, 5000);
        assert_eq!(line.line_tax_paise, 900);
        assert_eq!(line.line_total_paise, 5900);
        assert_eq!(line.cgst_paise, 450);
        assert_eq!(line.sgst_paise, 450);
    }

    #[test]
    fn test_exclusive_price() {
        // ₹100 listed, 18% additive
        let line = price_line(&test_product(10000), 2, 0).unwrap();
        assert_eq!(line.base_price_paise, 10000);
        assert_eq!(line.tax_per_unit_paise, 1800);
        assert_eq!(line.line_subtotal_paise, 20000);
        assert_eq!(line.line_tax_paise, 3600);
        assert_eq!(line.line_total_paise, 23600);
    }

    #[test]
    fn test_interstate_uses_igst() {
        let mut product = test_product(10000);
        product.is_interstate = true;

        let line = price_line(&product, 1, 0).unwrap();
        assert_eq!(line.cgst_paise, 0);
        assert_eq!(line.sgst_paise, 0);
        assert_eq!(line.igst_paise, 1800);
    }

    #[test]
    fn test_mutual_exclusivity_of_gst_families() {
        for interstate in [false, true] {
            let mut product = test_product(9999);
            product.is_interstate = interstate;
            let line = price_line(&product, 3, 0).unwrap();

            let intrastate_family = line.cgst_paise > 0 || line.sgst_paise > 0;
            let interstate_family = line.igst_paise > 0;
            assert!(!(intrastate_family && interstate_family));
            assert_eq!(
                line.cgst_paise + line.sgst_paise + line.igst_paise,
                line.line_tax_paise
            );
        }
    }

    #[test]
    fn test_cashback_on_discounted_base() {
        // ₹100 base, 10% discount, 5% cashback:
        // cashback = ₹90.00 × 5% = ₹4.50, not 5% of the taxed total
        let mut product = test_product(10000);
        product.discount_bps = 1000;

        let line = price_line(&product, 1, 500).unwrap();
        assert_eq!(line.discounted_base_paise, 9000);
        assert_eq!(line.cashback_paise, 450);
        assert_eq!(line.cashback_bps, 500);
    }

    #[test]
    fn test_zero_rate_product() {
        let mut product = test_product(10000);
        product.gst_rate_bps = 0;

        let line = price_line(&product, 1, 0).unwrap();
        assert_eq!(line.line_tax_paise, 0);
        assert_eq!(line.line_total_paise, 10000);
    }

    #[test]
    fn test_invalid_quantity_fails_fast() {
        let product = test_product(10000);
        assert!(matches!(
            price_line(&product, 0, 0),
            Err(CoreError::InvalidQuantity { quantity: 0 })
        ));
        assert!(matches!(
            price_line(&product, -3, 0),
            Err(CoreError::InvalidQuantity { quantity: -3 })
        ));
    }

    #[test]
    fn test_invalid_product_fails_fast() {
        let product = test_product(-100);
        assert!(matches!(
            price_line(&product, 1, 0),
            Err(CoreError::InvalidProduct { .. })
        ));

        let mut product = test_product(10000);
        product.discount_bps = 10000;
        assert!(matches!(
            price_line(&product, 1, 0),
            Err(CoreError::InvalidProduct { .. })
        ));
    }

    /// Inclusive decomposition reconciles for awkward prices: the line
    /// total at qty 1 with no discount equals the listed price exactly.
    #[test]
    fn test_inclusive_reconciles_for_awkward_prices() {
        for paise in [1, 99, 101, 997, 12345, 99999] {
            for bps in [300u32, 500, 1200, 1800, 2800] {
                let mut product = test_product(paise);
                product.price_includes_tax = true;
                product.gst_rate_bps = bps;

                let line = price_line(&product, 1, 0).unwrap();
                assert_eq!(
                    line.line_total_paise, paise,
                    "reconciliation failed for {paise} @ {bps}bps"
                );
            }
        }
    }
}
