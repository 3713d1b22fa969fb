//! # Cart
//!
//! Cart contents bookkeeping and the cart-level pricing aggregator.
//!
//! ## Pricing Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      price_cart(entries, catalog, ...)                  │
//! │                                                                         │
//! │  for each (product_id, qty):                                            │
//! │      catalog.lookup(id) ──► None? skip entry (stale id, logged)        │
//! │                         └─► Some(product)                              │
//! │             effective cashback = override if > 0 else product's        │
//! │                              │                                          │
//! │                              ▼                                          │
//! │                    price_line(product, qty, cashback)                  │
//! │                              │                                          │
//! │                              ▼                                          │
//! │        accumulate subtotal / GST split / cashback                      │
//! │                              │                                          │
//! │                              ▼                                          │
//! │        delivery quote on the subtotal, GST folded in (intrastate)      │
//! │                              │                                          │
//! │                              ▼                                          │
//! │        grand_total = subtotal + total_tax + delivery_charge            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine is pure and synchronous; a `CartBreakdown` is created fresh
//! on every call and never mutated. Callers invoking it from multiple
//! threads need no coordination beyond keeping their catalog snapshot
//! immutable for the duration of a call.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::delivery::DeliveryPolicy;
use crate::error::{CoreError, CoreResult};
use crate::gst::{split_gst, GstSplit};
use crate::money::Money;
use crate::pricing::{price_line, LineBreakdown};
use crate::types::{CartEntry, Catalog};
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

// =============================================================================
// Cart Contents
// =============================================================================

/// The shopping cart contents: a multiset of product references.
///
/// ## Invariants
/// - Entries are unique by `product_id` (adding the same product merges
///   quantities)
/// - Quantity is always positive
/// - Maximum unique items: [`MAX_CART_ITEMS`]
/// - Maximum quantity per item: [`MAX_ITEM_QUANTITY`]
///
/// Entries may reference ids that have since been removed from the
/// catalog; pricing drops such entries rather than failing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Adds a product to the cart or increases quantity if already present.
    pub fn add(&mut self, product_id: &str, quantity: i64) -> CoreResult<()> {
        if quantity <= 0 {
            return Err(CoreError::InvalidQuantity { quantity });
        }

        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|e| e.product_id == product_id)
        {
            let new_qty = entry.quantity + quantity;
            if new_qty > MAX_ITEM_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested: new_qty,
                    max: MAX_ITEM_QUANTITY,
                });
            }
            entry.quantity = new_qty;
            return Ok(());
        }

        if self.entries.len() >= MAX_CART_ITEMS {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_ITEMS,
            });
        }
        if quantity > MAX_ITEM_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: quantity,
                max: MAX_ITEM_QUANTITY,
            });
        }

        self.entries.push(CartEntry::new(product_id, quantity));
        Ok(())
    }

    /// Removes an entry from the cart by product ID.
    pub fn remove(&mut self, product_id: &str) -> CoreResult<()> {
        let initial_len = self.entries.len();
        self.entries.retain(|e| e.product_id != product_id);

        if self.entries.len() == initial_len {
            Err(CoreError::NotInCart {
                product_id: product_id.to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Clears all entries from the cart.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns the entries in insertion order.
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    /// Returns the number of unique products in the cart.
    pub fn item_count(&self) -> usize {
        self.entries.len()
    }

    /// Returns the total quantity across all entries.
    pub fn total_quantity(&self) -> i64 {
        self.entries.iter().map(|e| e.quantity).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// =============================================================================
// Cart Breakdown
// =============================================================================

/// The complete priced breakdown of a cart. Immutable output record.
///
/// Every numeric field the order/history collaborator persists for audit
/// is here, in paise. Invariants (exact, enforced by construction):
/// - `total_tax == total_cgst + total_sgst + total_igst`
/// - `grand_total == subtotal_pre_tax + total_tax + delivery_charge`
///   (delivery tax is already folded into `total_tax`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartBreakdown {
    /// Per-line breakdowns, in cart iteration order (display order only;
    /// totals are order-independent).
    pub items: Vec<LineBreakdown>,

    /// Sum of discounted pre-tax line subtotals.
    pub subtotal_pre_tax_paise: i64,

    /// All GST: line taxes plus delivery tax.
    pub total_tax_paise: i64,

    /// CGST across lines and delivery.
    pub total_cgst_paise: i64,

    /// SGST across lines and delivery.
    pub total_sgst_paise: i64,

    /// IGST across lines (delivery never contributes IGST).
    pub total_igst_paise: i64,

    /// Delivery charge (zero when the order ships free).
    pub delivery_charge_paise: i64,

    /// GST on the delivery charge.
    pub delivery_tax_paise: i64,

    /// The delivery GST rate, in basis points, carried for the invoice.
    pub delivery_tax_rate_bps: u32,

    /// Cashback earned across all lines.
    pub total_cashback_paise: i64,

    /// Amount payable.
    pub grand_total_paise: i64,

    /// When this breakdown was computed.
    #[ts(as = "String")]
    pub priced_at: DateTime<Utc>,
}

impl CartBreakdown {
    /// Returns the pre-tax subtotal as Money.
    #[inline]
    pub fn subtotal_pre_tax(&self) -> Money {
        Money::from_paise(self.subtotal_pre_tax_paise)
    }

    /// Returns the total tax as Money.
    #[inline]
    pub fn total_tax(&self) -> Money {
        Money::from_paise(self.total_tax_paise)
    }

    /// Returns the grand total as Money.
    #[inline]
    pub fn grand_total(&self) -> Money {
        Money::from_paise(self.grand_total_paise)
    }
}

// =============================================================================
// Aggregator
// =============================================================================

/// Prices a cart against a catalog snapshot under the default delivery
/// policy.
///
/// `user_cashback_override_bps` is the logged-in account's cashback rate;
/// when positive it supersedes every line's product rate (all-or-nothing
/// for the whole cart, never blended per line). Pass 0 for no override.
pub fn price_cart<C: Catalog>(
    entries: &[CartEntry],
    catalog: &C,
    user_cashback_override_bps: u32,
) -> CoreResult<CartBreakdown> {
    price_cart_with_policy(
        entries,
        catalog,
        &DeliveryPolicy::default(),
        user_cashback_override_bps,
    )
}

/// Prices a cart under an explicit delivery policy.
///
/// ## Skip Policy
/// Entries whose product id is unknown to the catalog are dropped from
/// pricing with a diagnostic, not an error: carts are allowed to hold
/// stale ids after a catalog edit, and failing here would brick those
/// carts. Changing this would alter observable totals for existing carts.
///
/// ## Errors
/// Only a malformed entry or product reaching the line pricer fails the
/// computation ([`CoreError::InvalidQuantity`] / [`CoreError::InvalidProduct`]),
/// or an out-of-range cashback override. Empty carts, unknown ids, and
/// zero rates are all well-defined non-error states.
pub fn price_cart_with_policy<C: Catalog>(
    entries: &[CartEntry],
    catalog: &C,
    policy: &DeliveryPolicy,
    user_cashback_override_bps: u32,
) -> CoreResult<CartBreakdown> {
    crate::validation::validate_percent_bps("cashback_override", user_cashback_override_bps)?;

    let mut items = Vec::with_capacity(entries.len());
    let mut subtotal = Money::zero();
    let mut tax_totals = GstSplit::zero();
    let mut total_cashback = Money::zero();

    for entry in entries {
        let Some(product) = catalog.lookup(&entry.product_id) else {
            tracing::warn!(
                product_id = %entry.product_id,
                quantity = entry.quantity,
                "cart entry references unknown product, skipping"
            );
            continue;
        };

        let effective_cashback_bps = if user_cashback_override_bps > 0 {
            user_cashback_override_bps
        } else {
            product.cashback_bps
        };

        let line = price_line(product, entry.quantity, effective_cashback_bps)?;

        subtotal += line.line_subtotal();
        tax_totals += GstSplit {
            cgst: Money::from_paise(line.cgst_paise),
            sgst: Money::from_paise(line.sgst_paise),
            igst: Money::from_paise(line.igst_paise),
        };
        total_cashback += Money::from_paise(line.cashback_paise);
        items.push(line);
    }

    // One delivery quote on the accumulated subtotal; its tax always
    // splits intrastate (delivery origin state is out of model scope).
    let delivery = policy.quote(subtotal);
    tax_totals += split_gst(delivery.tax, false);

    let total_tax = tax_totals.total();
    let grand_total = subtotal + total_tax + delivery.charge;

    Ok(CartBreakdown {
        items,
        subtotal_pre_tax_paise: subtotal.paise(),
        total_tax_paise: total_tax.paise(),
        total_cgst_paise: tax_totals.cgst.paise(),
        total_sgst_paise: tax_totals.sgst.paise(),
        total_igst_paise: tax_totals.igst.paise(),
        delivery_charge_paise: delivery.charge.paise(),
        delivery_tax_paise: delivery.tax.paise(),
        delivery_tax_rate_bps: delivery.tax_rate.bps(),
        total_cashback_paise: total_cashback.paise(),
        grand_total_paise: grand_total.paise(),
        priced_at: Utc::now(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{InMemoryCatalog, Product};

    fn test_product(id: &str, listed_price_paise: i64) -> Product {
        Product {
            id: id.to_string(),
            sku: format!("SKU-{id}"),
            name: format!("Product {id}"),
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

    fn assert_reconciles(breakdown: &CartBreakdown) {
        assert_eq!(
            breakdown.total_tax_paise,
            breakdown.total_cgst_paise + breakdown.total_sgst_paise + breakdown.total_igst_paise
        );
        assert_eq!(
            breakdown.grand_total_paise,
            breakdown.subtotal_pre_tax_paise
                + breakdown.total_tax_paise
                + breakdown.delivery_charge_paise
        );
    }

    #[test]
    fn test_cart_bookkeeping() {
        let mut cart = Cart::new();
        cart.add("p-1", 2).unwrap();
        cart.add("p-2", 1).unwrap();
        cart.add("p-1", 3).unwrap(); // merges

        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.total_quantity(), 6);
        assert_eq!(cart.entries()[0].quantity, 5);

        cart.remove("p-1").unwrap();
        assert_eq!(cart.item_count(), 1);
        assert!(matches!(
            cart.remove("p-1"),
            Err(CoreError::NotInCart { .. })
        ));

        cart.clear();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_cart_rejects_bad_quantities() {
        let mut cart = Cart::new();
        assert!(matches!(
            cart.add("p-1", 0),
            Err(CoreError::InvalidQuantity { .. })
        ));
        assert!(matches!(
            cart.add("p-1", MAX_ITEM_QUANTITY + 1),
            Err(CoreError::QuantityTooLarge { .. })
        ));

        cart.add("p-1", MAX_ITEM_QUANTITY).unwrap();
        assert!(matches!(
            cart.add("p-1", 1),
            Err(CoreError::QuantityTooLarge { .. })
        ));
    }

    #[test]
    fn test_price_cart_single_line() {
        // ₹40 + 18% = ₹47.20; below threshold so delivery ₹5 + ₹0.90 GST
        let catalog: InMemoryCatalog = [test_product("p-1", 4000)].into_iter().collect();
        let entries = [CartEntry::new("p-1", 1)];

        let breakdown = price_cart(&entries, &catalog, 0).unwrap();
        assert_eq!(breakdown.items.len(), 1);
        assert_eq!(breakdown.subtotal_pre_tax_paise, 4000);
        assert_eq!(breakdown.delivery_charge_paise, 500);
        assert_eq!(breakdown.delivery_tax_paise, 90);
        assert_eq!(breakdown.total_tax_paise, 720 + 90);
        // Delivery GST folds into the CGST/SGST halves
        assert_eq!(breakdown.total_cgst_paise, 360 + 45);
        assert_eq!(breakdown.total_sgst_paise, 360 + 45);
        assert_eq!(breakdown.grand_total_paise, 4000 + 810 + 500);
        assert_reconciles(&breakdown);
    }

    #[test]
    fn test_price_cart_free_delivery() {
        let catalog: InMemoryCatalog = [test_product("p-1", 10000)].into_iter().collect();
        let entries = [CartEntry::new("p-1", 1)];

        let breakdown = price_cart(&entries, &catalog, 0).unwrap();
        assert_eq!(breakdown.delivery_charge_paise, 0);
        assert_eq!(breakdown.delivery_tax_paise, 0);
        assert_eq!(breakdown.total_tax_paise, 1800);
        assert_reconciles(&breakdown);
    }

    #[test]
    fn test_delivery_threshold_boundary() {
        // Subtotal exactly ₹50.00 still pays the fee; ₹50.01 ships free
        let catalog: InMemoryCatalog = [
            {
                let mut p = test_product("p-at", 5000);
                p.gst_rate_bps = 0;
                p
            },
            {
                let mut p = test_product("p-above", 5001);
                p.gst_rate_bps = 0;
                p
            },
        ]
        .into_iter()
        .collect();

        let at = price_cart(&[CartEntry::new("p-at", 1)], &catalog, 0).unwrap();
        assert_eq!(at.delivery_charge_paise, 500);

        let above = price_cart(&[CartEntry::new("p-above", 1)], &catalog, 0).unwrap();
        assert_eq!(above.delivery_charge_paise, 0);
    }

    #[test]
    fn test_empty_cart_is_valid() {
        let catalog = InMemoryCatalog::new();
        let breakdown = price_cart(&[], &catalog, 0).unwrap();

        assert!(breakdown.items.is_empty());
        assert_eq!(breakdown.subtotal_pre_tax_paise, 0);
        assert_eq!(breakdown.total_cashback_paise, 0);
        assert_eq!(breakdown.total_igst_paise, 0);
        // Subtotal 0 is not above the threshold: flat fee plus its tax
        assert_eq!(breakdown.delivery_charge_paise, 500);
        assert_eq!(breakdown.delivery_tax_paise, 90);
        assert_eq!(breakdown.total_tax_paise, 90);
        assert_eq!(breakdown.grand_total_paise, 590);
        assert_reconciles(&breakdown);
    }

    #[test]
    fn test_empty_cart_is_deterministic() {
        let catalog = InMemoryCatalog::new();
        let a = price_cart(&[], &catalog, 0).unwrap();
        let b = price_cart(&[], &catalog, 0).unwrap();

        // Identical apart from the timestamp
        assert_eq!(a.grand_total_paise, b.grand_total_paise);
        assert_eq!(a.total_tax_paise, b.total_tax_paise);
        assert_eq!(a.delivery_charge_paise, b.delivery_charge_paise);
    }

    #[test]
    fn test_unknown_product_skipped_silently() {
        let catalog: InMemoryCatalog = [test_product("p-1", 4000)].into_iter().collect();
        let entries = [
            CartEntry::new("p-1", 1),
            CartEntry::new("deleted-product", 2),
        ];

        let breakdown = price_cart(&entries, &catalog, 0).unwrap();
        // The stale entry is dropped, not an error; totals cover p-1 only
        assert_eq!(breakdown.items.len(), 1);
        assert_eq!(breakdown.subtotal_pre_tax_paise, 4000);
        assert_reconciles(&breakdown);
    }

    #[test]
    fn test_cashback_override_precedence() {
        let mut product = test_product("p-1", 10000);
        product.cashback_bps = 200; // product offers 2%
        let catalog: InMemoryCatalog = [product].into_iter().collect();
        let entries = [CartEntry::new("p-1", 1)];

        // Account-level 5% supersedes the product's 2%
        let with_override = price_cart(&entries, &catalog, 500).unwrap();
        assert_eq!(with_override.items[0].cashback_bps, 500);
        assert_eq!(with_override.total_cashback_paise, 500);

        // Override of 0 means "no override": the product's 2% applies
        let without = price_cart(&entries, &catalog, 0).unwrap();
        assert_eq!(without.items[0].cashback_bps, 200);
        assert_eq!(without.total_cashback_paise, 200);
    }

    #[test]
    fn test_out_of_range_override_rejected() {
        let catalog = InMemoryCatalog::new();
        assert!(matches!(
            price_cart(&[], &catalog, 10000),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn test_mixed_locality_cart_reconciles() {
        let mut interstate = test_product("p-igst", 9999);
        interstate.is_interstate = true;
        interstate.gst_rate_bps = 1200;

        let mut inclusive = test_product("p-incl", 11800);
        inclusive.price_includes_tax = true;
        inclusive.discount_bps = 2500;

        let catalog: InMemoryCatalog = [test_product("p-1", 4001), interstate, inclusive]
            .into_iter()
            .collect();
        let entries = [
            CartEntry::new("p-1", 3),
            CartEntry::new("p-igst", 2),
            CartEntry::new("p-incl", 1),
        ];

        let breakdown = price_cart(&entries, &catalog, 150).unwrap();
        assert_eq!(breakdown.items.len(), 3);
        assert!(breakdown.total_igst_paise > 0);
        assert!(breakdown.total_cgst_paise > 0);
        assert_reconciles(&breakdown);

        // Per-line splits also reconcile into the cart totals (minus the
        // delivery contribution, which is intrastate)
        let line_tax: i64 = breakdown.items.iter().map(|l| l.line_tax_paise).sum();
        assert_eq!(
            breakdown.total_tax_paise,
            line_tax + breakdown.delivery_tax_paise
        );
    }

    #[test]
    fn test_bad_quantity_in_entries_propagates() {
        let catalog: InMemoryCatalog = [test_product("p-1", 4000)].into_iter().collect();
        let entries = [CartEntry::new("p-1", -1)];

        assert!(matches!(
            price_cart(&entries, &catalog, 0),
            Err(CoreError::InvalidQuantity { .. })
        ));
    }

    #[test]
    fn test_breakdown_serializes_for_order_history() {
        let catalog: InMemoryCatalog = [test_product("p-1", 4000)].into_iter().collect();
        let breakdown = price_cart(&[CartEntry::new("p-1", 1)], &catalog, 0).unwrap();

        let json = serde_json::to_value(&breakdown).unwrap();
        // Every audit field must survive serialization
        for field in [
            "subtotal_pre_tax_paise",
            "total_tax_paise",
            "total_cgst_paise",
            "total_sgst_paise",
            "total_igst_paise",
            "delivery_charge_paise",
            "delivery_tax_paise",
            "delivery_tax_rate_bps",
            "total_cashback_paise",
            "grand_total_paise",
        ] {
            assert!(json.get(field).is_some(), "missing field {field}");
        }
    }
}
