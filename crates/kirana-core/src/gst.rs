//! # GST Split
//!
//! Splits a tax amount into its CGST/SGST or IGST components.
//!
//! ## The Regime
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Intrastate sale:  tax ──► CGST (half) + SGST (half), IGST = 0         │
//! │  Interstate sale:  tax ──► IGST (full), CGST = SGST = 0                │
//! │                                                                         │
//! │  The two families are mutually exclusive per line. An odd paisa goes   │
//! │  to SGST so that CGST + SGST always reconciles to the line tax.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// GST Split
// =============================================================================

/// A tax amount broken into its GST components.
///
/// Doubles as an accumulator: line splits are summed into cart totals with
/// `+=`, which keeps the completeness invariant (`cgst + sgst + igst ==
/// total tax`) through aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GstSplit {
    /// Central GST component.
    pub cgst: Money,
    /// State GST component.
    pub sgst: Money,
    /// Integrated (interstate) GST component.
    pub igst: Money,
}

impl GstSplit {
    /// An all-zero split.
    pub const fn zero() -> Self {
        GstSplit {
            cgst: Money::zero(),
            sgst: Money::zero(),
            igst: Money::zero(),
        }
    }

    /// The total tax this split represents.
    pub fn total(&self) -> Money {
        self.cgst + self.sgst + self.igst
    }
}

impl Add for GstSplit {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        GstSplit {
            cgst: self.cgst + other.cgst,
            sgst: self.sgst + other.sgst,
            igst: self.igst + other.igst,
        }
    }
}

impl AddAssign for GstSplit {
    fn add_assign(&mut self, other: Self) {
        self.cgst += other.cgst;
        self.sgst += other.sgst;
        self.igst += other.igst;
    }
}

// =============================================================================
// Splitter
// =============================================================================

/// Splits a tax amount by locality.
///
/// Pure function, no error conditions; a zero tax amount yields an
/// all-zero split.
///
/// ## Example
/// ```rust
/// use kirana_core::gst::split_gst;
/// use kirana_core::money::Money;
///
/// let intra = split_gst(Money::from_paise(1800), false);
/// assert_eq!(intra.cgst.paise(), 900);
/// assert_eq!(intra.sgst.paise(), 900);
/// assert!(intra.igst.is_zero());
///
/// let inter = split_gst(Money::from_paise(1800), true);
/// assert!(inter.cgst.is_zero());
/// assert_eq!(inter.igst.paise(), 1800);
/// ```
pub fn split_gst(tax_amount: Money, is_interstate: bool) -> GstSplit {
    if is_interstate {
        return GstSplit {
            cgst: Money::zero(),
            sgst: Money::zero(),
            igst: tax_amount,
        };
    }

    // Halve in integer paise; the odd paisa lands in SGST so the two
    // components always sum back to the input.
    let cgst = Money::from_paise(tax_amount.paise() / 2);
    GstSplit {
        cgst,
        sgst: tax_amount - cgst,
        igst: Money::zero(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
