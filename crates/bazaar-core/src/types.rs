//! # Domain Types
//!
//! Core domain types used throughout the storefront checkout.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  ProductCard    │   │    LineItem     │   │     Coupon      │       │
//! │  │  ─────────────  │──►│  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  product_id     │   │  minimum_order  │       │
//! │  │  price          │   │  unit_price     │   │  discount       │       │
//! │  │  shipping_fee   │   │  shipping_fee   │   │  expires_at     │       │
//! │  └─────────────────┘   │  selected       │   └─────────────────┘       │
//! │                        └─────────────────┘                              │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────────────────────────────┐     │
//! │  │  CreditUsage    │   │  OrderSummary (derived, never stored)   │     │
//! │  │  requested      │   │  product_total, shipping_total,         │     │
//! │  │  available      │   │  discount, credit_applied,              │     │
//! │  └─────────────────┘   │  final_payable, external_pay_amount     │     │
//! │                        └─────────────────────────────────────────┘     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## One Product Shape
//! Product data arrives from the backend API and from locally built listings.
//! Both are normalized into [`ProductCard`] where they are fetched, so nothing
//! downstream needs to guess which shape it was handed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::validation::{validate_amount, validate_product_id, ValidationResult};

// =============================================================================
// Product Card
// =============================================================================

/// Canonical product shape for listings, shop pages and the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductCard {
    /// Product identifier assigned by the backend.
    pub id: String,

    /// Listing title.
    pub name: String,

    /// Asking price.
    pub price: Money,

    /// Shipping fee charged on top of the price.
    pub shipping_fee: Money,

    /// Seller shop name, when known.
    pub seller_name: Option<String>,

    /// Thumbnail image URL.
    pub thumbnail_url: Option<String>,
}

// =============================================================================
// Line Item
// =============================================================================

/// One product entry in the cart, with its own selection flag.
///
/// ## Ownership
/// Line items are owned by the [`Cart`](crate::cart::Cart). At most one
/// exists per `product_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineItem {
    /// Product this entry refers to.
    pub product_id: String,

    /// Backend cart record id, needed to remove the entry server side.
    /// `None` for items that only exist locally.
    pub cart_id: Option<String>,

    /// Product name shown in the cart.
    pub name: String,

    /// Price of one unit.
    pub unit_price: Money,

    /// Shipping fee for this item.
    pub shipping_fee: Money,

    /// Whether this entry takes part in the current checkout.
    pub selected: bool,
}

impl LineItem {
    /// Creates a selected line item.
    ///
    /// ## Validation
    /// - `product_id` must not be blank
    /// - `unit_price` and `shipping_fee` must not be negative
    pub fn new(
        product_id: impl Into<String>,
        name: impl Into<String>,
        unit_price: Money,
        shipping_fee: Money,
    ) -> ValidationResult<Self> {
        let product_id = product_id.into();
        validate_product_id(&product_id)?;
        validate_amount("unit_price", unit_price)?;
        validate_amount("shipping_fee", shipping_fee)?;

        Ok(LineItem {
            product_id,
            cart_id: None,
            name: name.into(),
            unit_price,
            shipping_fee,
            selected: true,
        })
    }

    /// Creates a line item from a product card.
    pub fn from_product(product: &ProductCard) -> ValidationResult<Self> {
        LineItem::new(
            product.id.clone(),
            product.name.clone(),
            product.price,
            product.shipping_fee,
        )
    }

    /// Attaches the backend cart record id.
    pub fn with_cart_id(mut self, cart_id: impl Into<String>) -> Self {
        self.cart_id = Some(cart_id.into());
        self
    }

    /// Price plus shipping for this entry.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price + self.shipping_fee
    }
}

// =============================================================================
// Coupon
// =============================================================================

/// A flat-amount coupon owned by the buyer. Read-only on the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Coupon {
    /// Coupon identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Product subtotal needed before the coupon applies.
    pub minimum_order_amount: Money,

    /// Amount taken off the product subtotal.
    pub discount_amount: Money,

    /// Expiry time; `None` never expires.
    #[ts(as = "Option<String>")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl Coupon {
    /// Creates a coupon without an expiry.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        minimum_order_amount: Money,
        discount_amount: Money,
    ) -> Self {
        Coupon {
            id: id.into(),
            name: name.into(),
            minimum_order_amount,
            discount_amount,
            expires_at: None,
        }
    }

    /// Sets the expiry time.
    pub fn expiring_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// True once `now` has reached the expiry time.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

/// Outcome of checking a coupon against the current product subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "status", rename_all = "camelCase")]
#[ts(export)]
pub enum CouponEligibility {
    /// Coupon applies; `discount` is already clamped to the subtotal.
    Eligible { discount: Money },
    /// Minimum order amount not reached.
    Ineligible {
        minimum: Money,
        product_total: Money,
    },
}

impl CouponEligibility {
    /// Discount to apply (zero when ineligible).
    pub fn discount(&self) -> Money {
        match self {
            CouponEligibility::Eligible { discount } => *discount,
            CouponEligibility::Ineligible { .. } => Money::zero(),
        }
    }

    /// Returns true for `Eligible`.
    pub fn is_eligible(&self) -> bool {
        matches!(self, CouponEligibility::Eligible { .. })
    }
}

// =============================================================================
// Credit Usage
// =============================================================================

/// Stored-credit ("deposit") the buyer wants to spend on this order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreditUsage {
    /// Amount the buyer asked to use.
    pub requested: Money,

    /// Deposit balance reported by the backend.
    pub available_balance: Money,
}

impl CreditUsage {
    /// Creates a credit usage request.
    pub const fn new(requested: Money, available_balance: Money) -> Self {
        CreditUsage {
            requested,
            available_balance,
        }
    }

    /// No credit requested.
    pub const fn none() -> Self {
        CreditUsage {
            requested: Money::zero(),
            available_balance: Money::zero(),
        }
    }
}

// =============================================================================
// Order Summary
// =============================================================================

/// Totals for the selected subset of the cart.
///
/// Recomputed on every read; never persisted.
///
/// ## Invariants
/// - `final_payable = product_total + shipping_total - discount`
/// - `external_pay_amount = final_payable - credit_applied >= 0`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderSummary {
    /// Number of selected line items.
    pub selected_count: usize,
    /// Sum of unit prices over the selection.
    pub product_total: Money,
    /// Sum of shipping fees over the selection.
    pub shipping_total: Money,
    /// Coupon discount actually applied.
    pub discount: Money,
    /// Deposit credit actually applied.
    pub credit_applied: Money,
    /// Amount owed after the discount.
    pub final_payable: Money,
    /// Residual settled through the external payment widget.
    pub external_pay_amount: Money,
}

impl OrderSummary {
    /// True when credit covers the whole order and the payment widget is
    /// not needed.
    pub fn is_fully_covered_by_credit(&self) -> bool {
        self.selected_count > 0 && self.external_pay_amount.is_zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_line_item_new_is_selected() {
        let item = LineItem::new("p-1", "Film camera", Money::from_units(50_000), Money::from_units(3_000))
            .unwrap();
        assert!(item.selected);
        assert!(item.cart_id.is_none());
        assert_eq!(item.line_total().units(), 53_000);
    }

    #[test]
    fn test_line_item_rejects_negative_amounts() {
        assert!(LineItem::new("p-1", "x", Money::from_units(-1), Money::zero()).is_err());
        assert!(LineItem::new("p-1", "x", Money::zero(), Money::from_units(-1)).is_err());
        assert!(LineItem::new("  ", "x", Money::zero(), Money::zero()).is_err());
    }

    #[test]
    fn test_line_item_from_product() {
        let product = ProductCard {
            id: "p-7".to_string(),
            name: "Desk lamp".to_string(),
            price: Money::from_units(12_000),
            shipping_fee: Money::from_units(2_500),
            seller_name: Some("lamp-shop".to_string()),
            thumbnail_url: None,
        };
        let item = LineItem::from_product(&product).unwrap().with_cart_id("c-1");

        assert_eq!(item.product_id, "p-7");
        assert_eq!(item.unit_price.units(), 12_000);
        assert_eq!(item.shipping_fee.units(), 2_500);
        assert_eq!(item.cart_id.as_deref(), Some("c-1"));
    }

    #[test]
    fn test_coupon_expiry() {
        let now = Utc::now();
        let coupon = Coupon::new("c", "5,000 off", Money::from_units(40_000), Money::from_units(5_000));
        assert!(!coupon.is_expired(now));

        let expired = coupon.clone().expiring_at(now - Duration::hours(1));
        assert!(expired.is_expired(now));

        let future = coupon.expiring_at(now + Duration::hours(1));
        assert!(!future.is_expired(now));
    }

    #[test]
    fn test_coupon_eligibility_discount() {
        let eligible = CouponEligibility::Eligible {
            discount: Money::from_units(5_000),
        };
        assert!(eligible.is_eligible());
        assert_eq!(eligible.discount().units(), 5_000);

        let ineligible = CouponEligibility::Ineligible {
            minimum: Money::from_units(60_000),
            product_total: Money::from_units(50_000),
        };
        assert!(!ineligible.is_eligible());
        assert_eq!(ineligible.discount(), Money::zero());
    }

    #[test]
    fn test_order_summary_serializes_camel_case() {
        let summary = OrderSummary {
            selected_count: 1,
            final_payable: Money::from_units(10_000),
            ..OrderSummary::default()
        };
        let json = serde_json::to_value(summary).unwrap();
        assert_eq!(json["finalPayable"], 10_000);
        assert_eq!(json["externalPayAmount"], 0);
    }
}
