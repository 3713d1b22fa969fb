//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Worse for GST: decomposing a tax-inclusive ₹118.00 at 18% must give   │
//! │  exactly ₹100.00 + ₹18.00, and CGST+SGST must reconcile to the paisa.  │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Paise                                            │
//! │    ₹118.00 = 11800 paise, rates in basis points (1800 = 18%)           │
//! │    Every rounding step is explicit and the totals reconcile exactly    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use kirana_core::money::Money;
//!
//! // Create from paise (preferred)
//! let price = Money::from_paise(1099); // ₹10.99
//!
//! // Arithmetic operations
//! let doubled = price * 2;            // ₹21.98
//! let total = price + Money::from_paise(500); // ₹15.99
//!
//! // NEVER do this:
//! // let bad = Money::from_float(10.99); // NO SUCH METHOD EXISTS!
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (paise for INR).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for refunds, adjustments
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// ## Where Money Flows
/// ```text
/// Product.listed_price_paise ──► LineBreakdown.line_subtotal ──► totals
///                                          │
///                                          └──► Displayed as "₹10.99" in UI
///
/// EVERY monetary value in the pricing engine flows through this type
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from paise (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use kirana_core::money::Money;
    ///
    /// let price = Money::from_paise(1099); // Represents ₹10.99
    /// assert_eq!(price.paise(), 1099);
    /// ```
    ///
    /// ## Why Paise?
    /// Using the smallest unit eliminates all floating-point concerns.
    /// Calculations, stored breakdowns, and the API all use paise.
    /// Only the UI converts to rupees for display.
    #[inline]
    pub const fn from_paise(paise: i64) -> Self {
        Money(paise)
    }

    /// Creates a Money value from major and minor units (rupees and paise).
    ///
    /// ## Example
    /// ```rust
    /// use kirana_core::money::Money;
    ///
    /// let price = Money::from_rupees_paise(10, 99); // ₹10.99
    /// assert_eq!(price.paise(), 1099);
    ///
    /// let negative = Money::from_rupees_paise(-5, 50); // -₹5.50 (refund)
    /// assert_eq!(negative.paise(), -550);
    /// ```
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    /// `from_rupees_paise(-5, 50)` = -₹5.50, not -₹4.50
    #[inline]
    pub const fn from_rupees_paise(rupees: i64, paise: i64) -> Self {
        if rupees < 0 {
            Money(rupees * 100 - paise)
        } else {
            Money(rupees * 100 + paise)
        }
    }

    /// Returns the value in paise (smallest currency unit).
    #[inline]
    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (rupees) portion.
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (paise) portion (always 0-99).
    #[inline]
    pub const fn paise_part(&self) -> i64 {
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

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Returns a rounded percentage of this amount, where the percentage is
    /// given in basis points (1 bps = 0.01%).
    ///
    /// This is the single rounding primitive behind tax, discount, and
    /// cashback math: `amount * bps / 10000`, rounded half-up through i128
    /// to prevent overflow on large amounts.
    ///
    /// ## Example
    /// ```rust
    /// use kirana_core::money::Money;
    ///
    /// let subtotal = Money::from_paise(10000); // ₹100.00
    /// assert_eq!(subtotal.percentage(500).paise(), 500); // 5% = ₹5.00
    /// assert_eq!(subtotal.percentage(1800).paise(), 1800); // 18% = ₹18.00
    /// ```
    pub fn percentage(&self, bps: u32) -> Money {
        let part = (self.0 as i128 * bps as i128 + 5000) / 10000;
        Money::from_paise(part as i64)
    }

    /// Calculates exclusive tax on this amount at the given rate.
    ///
    /// Use this when the amount is a pre-tax base and tax is additive.
    /// For tax-inclusive listed prices, use [`Money::extract_tax`] instead.
    ///
    /// ## Example
    /// ```rust
    /// use kirana_core::money::Money;
    /// use kirana_core::types::TaxRate;
    ///
    /// let base = Money::from_paise(10000); // ₹100.00
    /// let rate = TaxRate::from_bps(1800);  // 18%
    ///
    /// let tax = base.calculate_tax(rate);
    /// assert_eq!(tax.paise(), 1800); // ₹18.00
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        self.percentage(rate.bps())
    }

    /// Decomposes a tax-inclusive amount into `(base, tax)`.
    ///
    /// ## The Algebra
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────┐
    /// │  INCLUSIVE DECOMPOSITION                                            │
    /// │                                                                     │
    /// │  A tax-inclusive price already contains tax on the pre-tax base:   │
    /// │      inclusive = base × (1 + rate)                                 │
    /// │                                                                     │
    /// │  So the base is recovered by the algebraic inverse:                │
    /// │      base = inclusive / (1 + rate)                                 │
    /// │      tax  = inclusive - base        ← NOT inclusive × rate!        │
    /// │                                                                     │
    /// │  Computing tax as the remainder makes the round-trip exact:        │
    /// │      base + tax == inclusive, always, to the paisa                 │
    /// └─────────────────────────────────────────────────────────────────────┘
    /// ```
    ///
    /// ## Example
    /// ```rust
    /// use kirana_core::money::Money;
    /// use kirana_core::types::TaxRate;
    ///
    /// let listed = Money::from_paise(11800); // ₹118.00, GST included
    /// let (base, tax) = listed.extract_tax(TaxRate::from_bps(1800));
    ///
    /// assert_eq!(base.paise(), 10000); // ₹100.00
    /// assert_eq!(tax.paise(), 1800);   // ₹18.00
    /// assert_eq!(base + tax, listed);  // exact round-trip
    /// ```
    pub fn extract_tax(&self, rate: TaxRate) -> (Money, Money) {
        if rate.is_zero() {
            return (*self, Money::zero());
        }

        // base = inclusive * 10000 / (10000 + bps), rounded half-up
        let divisor = 10000 + rate.bps() as i128;
        let base_paise = (self.0 as i128 * 10000 + divisor / 2) / divisor;
        let base = Money::from_paise(base_paise as i64);

        // Tax is the remainder, never recomputed from the rate
        (base, *self - base)
    }

    /// Applies a percentage discount and returns the discounted amount.
    ///
    /// ## Arguments
    /// * `discount_bps` - Discount in basis points (1000 = 10%)
    ///
    /// ## Example
    /// ```rust
    /// use kirana_core::money::Money;
    ///
    /// let subtotal = Money::from_paise(10000); // ₹100.00
    /// let discounted = subtotal.apply_percentage_discount(1000); // 10% off
    /// assert_eq!(discounted.paise(), 9000); // ₹90.00
    /// ```
    pub fn apply_percentage_discount(&self, discount_bps: u32) -> Money {
        *self - self.percentage(discount_bps)
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use kirana_core::money::Money;
    ///
    /// let unit_price = Money::from_paise(299); // ₹2.99
    /// let line_total = unit_price.multiply_quantity(3);
    /// assert_eq!(line_total.paise(), 897); // ₹8.97
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for debugging. Use frontend formatting for actual UI display
/// to handle localization properly.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}₹{}.{:02}",
            sign,
            self.rupees().abs(),
            self.paise_part()
        )
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (for quantity calculations).
impl Mul<i32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i32) -> Self {
        Money(self.0 * qty as i64)
    }
}

/// Multiplication by i64.
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
