//! # Order Summary Calculator
//!
//! Reduces the selected line items plus coupon and credit inputs into an
//! [`OrderSummary`]. Pure and synchronous: the same inputs always give the
//! same summary.
//!
//! ## Calculation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  selected items ──► product_total  = Σ unit_price                       │
//! │                 └─► shipping_total = Σ shipping_fee                     │
//! │                                                                         │
//! │  coupon ──────────► discount = product_total >= minimum                 │
//! │                                ? min(discount_amount, product_total)    │
//! │                                : 0                                      │
//! │                                                                         │
//! │  final_payable       = max(0, product_total + shipping_total - discount)│
//! │  credit_applied      = min(requested, balance, final_payable)           │
//! │  external_pay_amount = final_payable - credit_applied                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use bazaar_core::{summary, Coupon, CreditUsage, LineItem, Money};
//!
//! let items = vec![
//!     LineItem::new("p-1", "Film camera", Money::from_units(50_000), Money::from_units(3_000)).unwrap(),
//! ];
//! let coupon = Coupon::new("c-1", "5,000 off", Money::from_units(40_000), Money::from_units(5_000));
//!
//! let totals = summary::calculate(&items, Some(&coupon), CreditUsage::none());
//! assert_eq!(totals.discount.units(), 5_000);
//! assert_eq!(totals.final_payable.units(), 48_000);
//! ```

use crate::cart::Cart;
use crate::money::Money;
use crate::types::{Coupon, CreditUsage, LineItem, OrderSummary};
use crate::validation::check_coupon;

/// Coupon discount for a product subtotal; zero when the coupon is absent
/// or its minimum order amount is not met.
pub fn coupon_discount(coupon: Option<&Coupon>, product_total: Money) -> Money {
    coupon
        .map(|c| check_coupon(c, product_total).discount())
        .unwrap_or_default()
}

/// Credit that can actually be applied: clamped by the balance and the
/// payable amount, never negative.
pub fn clamp_credit(credit: CreditUsage, final_payable: Money) -> Money {
    credit
        .requested
        .min(credit.available_balance)
        .min(final_payable)
        .max(Money::zero())
}

/// Computes the summary over the selected entries of `items`.
///
/// Unselected items are ignored, so callers may pass a whole cart's items.
pub fn calculate<'a, I>(items: I, coupon: Option<&Coupon>, credit: CreditUsage) -> OrderSummary
where
    I: IntoIterator<Item = &'a LineItem>,
{
    let mut selected_count = 0;
    let mut product_total = Money::zero();
    let mut shipping_total = Money::zero();

    for item in items.into_iter().filter(|i| i.selected) {
        selected_count += 1;
        product_total = product_total.saturating_add(item.unit_price);
        shipping_total = shipping_total.saturating_add(item.shipping_fee);
    }

    let discount = coupon_discount(coupon, product_total);
    let final_payable = product_total
        .saturating_add(shipping_total)
        .saturating_sub(discount);
    let credit_applied = clamp_credit(credit, final_payable);

    OrderSummary {
        selected_count,
        product_total,
        shipping_total,
        discount,
        credit_applied,
        final_payable,
        external_pay_amount: final_payable - credit_applied,
    }
}

/// Computes the summary over a cart's current selection.
pub fn calculate_for_cart(cart: &Cart, coupon: Option<&Coupon>, credit: CreditUsage) -> OrderSummary {
    calculate(cart.selected_items(), coupon, credit)
}
