//! # Validation Module
//!
//! Business rule validation for catalog records and pricing inputs.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Catalog boundary (admin edits a product)                     │
//! │  ├── THIS MODULE: field checks + slab warnings                         │
//! │  └── Defaults resolved once into a typed Product                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Pricing engine (defensive re-checks)                         │
//! │  ├── price_line rejects bad quantities and malformed products          │
//! │  └── price_cart rejects out-of-range cashback overrides                │
//! │                                                                         │
//! │  Defense in depth: the pricer never trusts the cart collaborator       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Reject vs Flag
//! Out-of-range fields (negative price, ≥100% discount) are REJECTED.
//! Unusual-but-legal GST rates (not a standard slab, or above the 28% top
//! slab) are FLAGGED as [`ProductWarning`]s for the catalog UI, never
//! rejected — a catalog import with an odd rate must still price.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::types::{Product, TaxRate};
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Product Warnings
// =============================================================================

/// Non-fatal findings about a product record.
///
/// Surfaced to the catalog UI; pricing proceeds regardless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ProductWarning {
    /// GST rate is not one of the standard slabs (0/3/5/12/18/28%).
    NonStandardGstSlab { bps: u32 },

    /// GST rate is above the 28% top slab.
    GstRateAboveTopSlab { bps: u32 },
}

impl fmt::Display for ProductWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductWarning::NonStandardGstSlab { bps } => {
                write!(f, "GST rate {} bps is not a standard slab", bps)
            }
            ProductWarning::GstRateAboveTopSlab { bps } => {
                write!(f, "GST rate {} bps is above the 28% top slab", bps)
            }
        }
    }
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a SKU (Stock Keeping Unit).
///
/// ## Rules
/// - Must not be empty
/// - Must be between 1 and 50 characters
/// - Should contain only alphanumeric characters, hyphens, underscores
///
/// ## Example
/// ```rust
/// use kirana_core::validation::validate_sku;
///
/// assert!(validate_sku("GHEE-1L").is_ok());
/// assert!(validate_sku("").is_err());
/// assert!(validate_sku("A".repeat(100).as_str()).is_err());
/// ```
pub fn validate_sku(sku: &str) -> ValidationResult<()> {
    let sku = sku.trim();

    if sku.is_empty() {
        return Err(ValidationError::Required {
            field: "sku".to_string(),
        });
    }

    if sku.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "sku".to_string(),
            max: 50,
        });
    }

    if !sku
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "sku".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty
/// - Must be between 1 and 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity value.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a price in paise.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
pub fn validate_price_paise(paise: i64) -> ValidationResult<()> {
    if paise < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a percentage field given in basis points.
///
/// ## Rules
/// - Must be below 10000 (100%): discounts and cashback live in [0, 100)
pub fn validate_percent_bps(field: &str, bps: u32) -> ValidationResult<()> {
    if bps >= 10000 {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: 9999,
        });
    }

    Ok(())
}

/// Validates a GST rate in basis points.
///
/// ## Rules
/// - Must not exceed 10000 (100%); rates above the 28% slab are legal
///   here and flagged by [`validate_product`] instead
pub fn validate_gst_rate_bps(bps: u32) -> ValidationResult<()> {
    if bps > 10000 {
        return Err(ValidationError::OutOfRange {
            field: "gst_rate".to_string(),
            min: 0,
            max: 10000,
        });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates cart size (number of unique items).
///
/// ## Rules
/// - Must not exceed MAX_CART_ITEMS (100)
pub fn validate_cart_size(current_items: usize) -> ValidationResult<()> {
    if current_items >= MAX_CART_ITEMS {
        return Err(ValidationError::OutOfRange {
            field: "cart items".to_string(),
            min: 0,
            max: MAX_CART_ITEMS as i64,
        });
    }

    Ok(())
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Validates a product id (UUID string format).
///
/// ## Example
/// ```rust
/// use kirana_core::validation::validate_product_id;
///
/// assert!(validate_product_id("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_product_id("not-a-uuid").is_err());
/// ```
pub fn validate_product_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "product_id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "product_id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Product Validator
// =============================================================================

/// Validates a full catalog record: rejects out-of-range fields and
/// returns warnings for unusual-but-legal GST rates.
///
/// ## Example
/// ```rust
/// use chrono::Utc;
/// use kirana_core::types::Product;
/// use kirana_core::validation::{validate_product, ProductWarning};
///
/// let mut product = Product {
///     id: "550e8400-e29b-41d4-a716-446655440000".to_string(),
///     sku: "GHEE-1L".to_string(),
///     name: "Ghee 1L".to_string(),
///     listed_price_paise: 11800,
///     gst_rate_bps: 1800,
///     discount_bps: 0,
///     cashback_bps: 0,
///     price_includes_tax: true,
///     is_interstate: false,
///     is_active: true,
///     created_at: Utc::now(),
///     updated_at: Utc::now(),
/// };
/// assert!(validate_product(&product).unwrap().is_empty());
///
/// product.gst_rate_bps = 1750; // legal, but not a slab: flagged
/// let warnings = validate_product(&product).unwrap();
/// assert_eq!(warnings, vec![ProductWarning::NonStandardGstSlab { bps: 1750 }]);
/// ```
pub fn validate_product(product: &Product) -> ValidationResult<Vec<ProductWarning>> {
    validate_product_id(&product.id)?;
    validate_sku(&product.sku)?;
    validate_product_name(&product.name)?;
    validate_price_paise(product.listed_price_paise)?;
    validate_percent_bps("discount", product.discount_bps)?;
    validate_percent_bps("cashback", product.cashback_bps)?;
    validate_gst_rate_bps(product.gst_rate_bps)?;

    let mut warnings = Vec::new();
    let rate = TaxRate::from_bps(product.gst_rate_bps);
    if product.gst_rate_bps > 2800 {
        warnings.push(ProductWarning::GstRateAboveTopSlab {
            bps: product.gst_rate_bps,
        });
    } else if !rate.is_standard_slab() {
        warnings.push(ProductWarning::NonStandardGstSlab {
            bps: product.gst_rate_bps,
        });
    }

    Ok(warnings)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn valid_product() -> Product {
        Product {
            id: "550e8400-e29b-41d4-a716-446655440000".to_string(),
            sku: "GHEE-1L".to_string(),
            name: "Ghee 1L".to_string(),
            listed_price_paise: 11800,
            gst_rate_bps: 1800,
            discount_bps: 500,
            cashback_bps: 200,
            price_includes_tax: true,
            is_interstate: false,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_validate_sku() {
        assert!(validate_sku("GHEE-1L").is_ok());
        assert!(validate_sku("ABC123").is_ok());
        assert!(validate_sku("product_1").is_ok());

        assert!(validate_sku("").is_err());
        assert!(validate_sku("   ").is_err());
        assert!(validate_sku("has space").is_err());
        assert!(validate_sku(&"A".repeat(100)).is_err());
    }

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Ghee 1L").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_price_paise() {
        assert!(validate_price_paise(0).is_ok());
        assert!(validate_price_paise(1099).is_ok());
        assert!(validate_price_paise(-100).is_err());
    }

    #[test]
    fn test_validate_percent_bps() {
        assert!(validate_percent_bps("discount", 0).is_ok());
        assert!(validate_percent_bps("discount", 9999).is_ok());
        assert!(validate_percent_bps("discount", 10000).is_err());
    }

    #[test]
    fn test_validate_product_id() {
        assert!(validate_product_id("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_product_id("").is_err());
        assert!(validate_product_id("not-a-uuid").is_err());
    }

    #[test]
    fn test_validate_product_clean() {
        assert!(validate_product(&valid_product()).unwrap().is_empty());
    }

    #[test]
    fn test_non_standard_slab_is_flagged_not_rejected() {
        let mut product = valid_product();
        product.gst_rate_bps = 1750;

        let warnings = validate_product(&product).unwrap();
        assert_eq!(
            warnings,
            vec![ProductWarning::NonStandardGstSlab { bps: 1750 }]
        );
    }

    #[test]
    fn test_above_top_slab_is_flagged_not_rejected() {
        let mut product = valid_product();
        product.gst_rate_bps = 4000;

        let warnings = validate_product(&product).unwrap();
        assert_eq!(
            warnings,
            vec![ProductWarning::GstRateAboveTopSlab { bps: 4000 }]
        );
    }

    #[test]
    fn test_out_of_range_fields_rejected() {
        let mut product = valid_product();
        product.listed_price_paise = -1;
        assert!(validate_product(&product).is_err());

        let mut product = valid_product();
        product.discount_bps = 10000;
        assert!(validate_product(&product).is_err());

        let mut product = valid_product();
        product.gst_rate_bps = 10001;
        assert!(validate_product(&product).is_err());
    }

    #[test]
    fn test_validate_cart_size() {
        assert!(validate_cart_size(0).is_ok());
        assert!(validate_cart_size(99).is_ok());
        assert!(validate_cart_size(100).is_err());
    }
}
