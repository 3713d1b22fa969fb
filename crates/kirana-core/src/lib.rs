//! # kirana-core: Pure Pricing & GST Logic for Kirana
//!
//! This crate is the **heart** of Kirana. It contains the cart pricing and
//! GST breakdown engine as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Kirana Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Storefront Shell (out of scope)                 │   │
//! │  │    Catalog UI ──► Cart UI ──► Checkout UI ──► GST Invoice       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ Catalog trait + CartBreakdown          │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ kirana-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌──────────┐ ┌────────┐  │   │
//! │  │   │  money  │ │   gst   │ │ pricing │ │ delivery │ │  cart  │  │   │
//! │  │   │  Money  │ │GstSplit │ │price_   │ │ Delivery │ │ price_ │  │   │
//! │  │   │ TaxCalc │ │split_gst│ │  line   │ │  Policy  │ │  cart  │  │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └──────────┘ └────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, CartEntry, Catalog, TaxRate)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`gst`] - CGST/SGST/IGST tax splitting
//! - [`pricing`] - Per-line pricing (decomposition, discount, cashback)
//! - [`delivery`] - Threshold-based delivery fee and its GST
//! - [`cart`] - Cart bookkeeping and the cart-level aggregator
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation and slab warnings
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every pricing call is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in paise (i64), rates in
//!    basis points (u32) - the reconciliation invariants hold exactly
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::Utc;
//! use kirana_core::cart::price_cart;
//! use kirana_core::types::{CartEntry, InMemoryCatalog, Product};
//!
//! let catalog: InMemoryCatalog = [Product {
//!     id: "550e8400-e29b-41d4-a716-446655440000".to_string(),
//!     sku: "GHEE-1L".to_string(),
//!     name: "Ghee 1L".to_string(),
//!     listed_price_paise: 11800, // ₹118.00, GST included
//!     gst_rate_bps: 1800,
//!     discount_bps: 0,
//!     cashback_bps: 0,
//!     price_includes_tax: true,
//!     is_interstate: false,
//!     is_active: true,
//!     created_at: Utc::now(),
//!     updated_at: Utc::now(),
//! }]
//! .into_iter()
//! .collect();
//!
//! let entries = [CartEntry::new("550e8400-e29b-41d4-a716-446655440000", 1)];
//! let breakdown = price_cart(&entries, &catalog, 0).unwrap();
//!
//! // ₹100.00 base + ₹18.00 GST (₹9 CGST + ₹9 SGST); free delivery above ₹50
//! assert_eq!(breakdown.subtotal_pre_tax_paise, 10000);
//! assert_eq!(breakdown.total_cgst_paise, 900);
//! assert_eq!(breakdown.total_sgst_paise, 900);
//! assert_eq!(breakdown.grand_total_paise, 11800);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod delivery;
pub mod error;
pub mod gst;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use kirana_core::Money` instead of
// `use kirana_core::money::Money`

pub use cart::{price_cart, price_cart_with_policy, Cart, CartBreakdown};
pub use delivery::{DeliveryPolicy, DeliveryQuote};
pub use error::{CoreError, CoreResult, ValidationError};
pub use gst::{split_gst, GstSplit};
pub use money::Money;
pub use pricing::{price_line, LineBreakdown};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum items allowed in a single cart
///
/// ## Business Reason
/// Prevents runaway carts and ensures reasonable transaction sizes.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single item in cart
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10)
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Orders with a pre-tax subtotal strictly above this ship free (₹50.00)
pub const FREE_DELIVERY_THRESHOLD_PAISE: i64 = 5000;

/// Flat delivery fee below the free threshold (₹5.00)
pub const BASE_DELIVERY_FEE_PAISE: i64 = 500;

/// GST rate on the delivery fee (18%)
pub const DELIVERY_GST_BPS: u32 = 1800;
