//! # Domain Types
//!
//! Core domain types used throughout the Kirana pricing engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────────┐   ┌─────────────────┐   ┌──────────────────┐  │
//! │  │      Product        │   │    CartEntry    │   │     TaxRate      │  │
//! │  │  ─────────────────  │   │  ─────────────  │   │  ──────────────  │  │
//! │  │  id (UUID)          │   │  product_id     │   │  bps (u32)       │  │
//! │  │  listed_price_paise │   │  quantity       │   │  1800 = 18%      │  │
//! │  │  gst_rate_bps       │   └─────────────────┘   └──────────────────┘  │
//! │  │  discount_bps       │                                               │
//! │  │  cashback_bps       │   ┌──────────────────────────────────────┐    │
//! │  │  price_includes_tax │   │   Catalog (trait)                    │    │
//! │  │  is_interstate      │   │   lookup(id) -> Option<&Product>     │    │
//! │  └─────────────────────┘   └──────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Catalog Seam
//! The pricing engine never owns product data. It consumes a read-only
//! [`Catalog`] snapshot supplied by the caller; the caller guarantees the
//! snapshot is not mutated mid-computation (copy-on-read is sufficient).

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// The standard GST slabs, in basis points: 0%, 3%, 5%, 12%, 18%, 28%.
///
/// Rates outside this set are legal inputs to the pricer but are flagged
/// by `validation::validate_product` so the catalog UI can warn on them.
pub const STANDARD_GST_SLABS_BPS: [u32; 6] = [0, 300, 500, 1200, 1800, 2800];

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1800 bps = 18% (the standard-goods GST slab)
///
/// The catalog boundary converts whatever the admin typed (a percentage)
/// into bps exactly once; inside the engine there is a single canonical
/// representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (for the catalog boundary).
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks whether this rate is one of the standard GST slabs.
    pub fn is_standard_slab(&self) -> bool {
        STANDARD_GST_SLABS_BPS.contains(&self.0)
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Product
// =============================================================================

/// A catalog product record, read-only for the pricing engine.
///
/// ## Defaults at the Boundary
/// Optional catalog fields (`cashback_bps`, `discount_bps`, the GST flags)
/// carry `#[serde(default)]` so a sparse catalog file deserializes into a
/// fully-resolved record here, once — the pricer itself never falls back.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Stock Keeping Unit - business identifier.
    pub sku: String,

    /// Display name shown to the shopper and on the GST invoice.
    pub name: String,

    /// Listed price in paise (smallest currency unit).
    ///
    /// Whether this already contains GST is governed by
    /// `price_includes_tax`.
    pub listed_price_paise: i64,

    /// GST rate in basis points (1800 = 18%).
    #[serde(default)]
    pub gst_rate_bps: u32,

    /// Promotional discount in basis points, applied to the pre-tax base.
    #[serde(default)]
    pub discount_bps: u32,

    /// Product-level cashback in basis points. Superseded for the whole
    /// cart when the caller passes a positive account-level override.
    #[serde(default)]
    pub cashback_bps: u32,

    /// When true, `listed_price_paise` is GST-inclusive and must be
    /// decomposed; when false, GST is additive.
    #[serde(default)]
    pub price_includes_tax: bool,

    /// Selects IGST (interstate) vs CGST+SGST (intrastate) for this line.
    #[serde(default)]
    pub is_interstate: bool,

    /// Whether product is active (soft delete).
    #[serde(default = "default_true")]
    pub is_active: bool,

    /// When the product was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the product was last updated.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

impl Product {
    /// Returns the listed price as a Money type.
    #[inline]
    pub fn listed_price(&self) -> Money {
        Money::from_paise(self.listed_price_paise)
    }

    /// Returns the GST rate.
    #[inline]
    pub fn gst_rate(&self) -> TaxRate {
        TaxRate::from_bps(self.gst_rate_bps)
    }
}

// =============================================================================
// Cart Entry
// =============================================================================

/// One `(product_id, quantity)` pair in a cart.
///
/// A product id appears at most once per cart; repeated adds accumulate
/// quantity (enforced by `cart::Cart`). The pricing engine also accepts a
/// plain slice of entries from any collaborator that upholds the same rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartEntry {
    /// Product ID (UUID).
    pub product_id: String,

    /// Quantity, always positive.
    pub quantity: i64,
}

impl CartEntry {
    /// Creates a new cart entry.
    pub fn new(product_id: impl Into<String>, quantity: i64) -> Self {
        CartEntry {
            product_id: product_id.into(),
            quantity,
        }
    }
}

// =============================================================================
// Catalog Seam
// =============================================================================

/// The single capability the pricing engine consumes from the catalog.
///
/// ## Contract
/// - `lookup` returns `None` for unknown ids; the aggregator skips such
///   entries rather than failing (carts may hold stale ids after a
///   catalog edit).
/// - The implementation must behave as an immutable snapshot for the
///   duration of one `price_cart` call.
pub trait Catalog {
    /// Resolves a product id to its catalog record.
    fn lookup(&self, product_id: &str) -> Option<&Product>;
}

/// A HashMap-backed catalog snapshot.
///
/// Used by tests and by callers that follow the copy-on-read discipline:
/// clone the products out of the store, build one of these, price, drop it.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    products: HashMap<String, Product>,
}

impl InMemoryCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a product, replacing any previous record with the same id.
    pub fn insert(&mut self, product: Product) {
        self.products.insert(product.id.clone(), product);
    }

    /// Returns the number of products in the snapshot.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Checks if the snapshot is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Catalog for InMemoryCatalog {
    fn lookup(&self, product_id: &str) -> Option<&Product> {
        self.products.get(product_id)
    }
}

impl FromIterator<Product> for InMemoryCatalog {
    fn from_iter<I: IntoIterator<Item = Product>>(iter: I) -> Self {
        let mut catalog = InMemoryCatalog::new();
        for product in iter {
            catalog.insert(product);
        }
        catalog
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
