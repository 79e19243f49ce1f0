//! # Checkout Selection
//!
//! The buyer's checkout choices against a cart: which coupon, how much
//! deposit credit, and the deposit balance those choices are checked
//! against.
//!
//! ## Re-validation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Any change to the selected items                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  revalidate(cart) ← run after EVERY cart mutation                       │
//! │       │                                                                 │
//! │       ├── coupon minimum no longer met → coupon dropped                 │
//! │       │                                  Adjustment::CouponDropped      │
//! │       │                                                                 │
//! │       └── credit > new payable amount  → credit clamped                 │
//! │                                          Adjustment::CreditClamped      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The backend re-checks coupon eligibility when the order is created; this
//! pass keeps the summary the buyer sees honest in the meantime.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use ts_rs::TS;

use crate::cart::Cart;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::summary;
use crate::types::{Coupon, CouponEligibility, CreditUsage, OrderSummary};
use crate::validation::{check_coupon, parse_credit_input, validate_credit_usage};

/// Result of applying a credit request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreditOutcome {
    /// Credit now in effect.
    pub applied: Money,
    /// The original request, when it was lowered to the payable amount.
    pub adjusted_from: Option<Money>,
}

impl CreditOutcome {
    /// True when the request was clamped.
    pub fn was_adjusted(&self) -> bool {
        self.adjusted_from.is_some()
    }
}

/// A change made by [`Checkout::revalidate`] that the buyer should hear about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "camelCase")]
#[ts(export)]
pub enum Adjustment {
    /// The selected coupon no longer meets its minimum order amount.
    CouponDropped {
        coupon_id: String,
        minimum: Money,
        product_total: Money,
    },
    /// Stored credit was lowered to the new payable amount.
    CreditClamped { from: Money, to: Money },
}

/// Coupon and credit choices for the current checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Checkout {
    coupon: Option<Coupon>,
    credit: Money,
    available_balance: Money,
}

impl Checkout {
    /// Empty checkout: no coupon, no credit, zero balance.
    pub fn new() -> Self {
        Checkout::default()
    }

    /// Currently selected coupon.
    pub fn coupon(&self) -> Option<&Coupon> {
        self.coupon.as_ref()
    }

    /// Credit currently requested.
    pub fn credit(&self) -> Money {
        self.credit
    }

    /// Deposit balance the credit is checked against.
    pub fn available_balance(&self) -> Money {
        self.available_balance
    }

    /// Credit inputs for the summary calculator.
    pub fn credit_usage(&self) -> CreditUsage {
        CreditUsage::new(self.credit, self.available_balance)
    }

    /// Records the deposit balance reported by the backend.
    ///
    /// A stored credit above the new balance is lowered to it and reported
    /// as [`Adjustment::CreditClamped`].
    pub fn set_available_balance(&mut self, balance: Money) -> Option<Adjustment> {
        self.available_balance = balance.max(Money::zero());
        if self.credit <= self.available_balance {
            return None;
        }

        let from = self.credit;
        self.credit = self.available_balance;
        warn!(%from, to = %self.credit, "credit lowered to balance");
        Some(Adjustment::CreditClamped { from, to: self.credit })
    }

    /// Selects a coupon for the current cart selection.
    ///
    /// ## Errors
    /// - [`CoreError::CouponExpired`] when `now` is past the expiry
    /// - [`CoreError::IneligibleCoupon`] when the minimum order amount is
    ///   not met
    ///
    /// The previous selection is kept on error.
    pub fn select_coupon(&mut self, cart: &Cart, coupon: Coupon, now: DateTime<Utc>) -> CoreResult<Money> {
        if coupon.is_expired(now) {
            return Err(CoreError::CouponExpired { coupon_id: coupon.id });
        }

        let product_total = self.summary_without_credit(cart, None).product_total;
        match check_coupon(&coupon, product_total) {
            CouponEligibility::Eligible { discount } => {
                debug!(coupon_id = %coupon.id, %discount, "coupon selected");
                self.coupon = Some(coupon);
                self.clamp_credit_to_payable(cart);
                Ok(discount)
            }
            CouponEligibility::Ineligible { minimum, product_total } => {
                debug!(coupon_id = %coupon.id, %minimum, %product_total, "coupon ineligible");
                Err(CoreError::IneligibleCoupon {
                    coupon_id: coupon.id,
                    minimum,
                    product_total,
                })
            }
        }
    }

    /// Clears the coupon selection.
    pub fn clear_coupon(&mut self) -> Option<Coupon> {
        self.coupon.take()
    }

    /// Applies a credit request.
    ///
    /// ## Behavior
    /// - More than the balance: rejected, prior credit kept
    /// - More than the payable amount: clamped to it, reported through
    ///   [`CreditOutcome::adjusted_from`]
    pub fn apply_credit(&mut self, cart: &Cart, requested: Money) -> CoreResult<CreditOutcome> {
        let payable = self.summary_without_credit(cart, self.coupon.as_ref()).final_payable;

        match validate_credit_usage(requested, self.available_balance, payable) {
            Ok(applied) => {
                self.credit = applied;
                Ok(CreditOutcome {
                    applied,
                    adjusted_from: None,
                })
            }
            Err(CoreError::CreditExceedsPayable { requested, payable }) => {
                warn!(%requested, %payable, "credit clamped to payable amount");
                self.credit = payable;
                Ok(CreditOutcome {
                    applied: payable,
                    adjusted_from: Some(requested),
                })
            }
            Err(err) => {
                warn!(%requested, balance = %self.available_balance, "credit request rejected");
                Err(err)
            }
        }
    }

    /// Parses free-form credit text and applies it.
    pub fn apply_credit_input(&mut self, cart: &Cart, input: &str) -> CoreResult<CreditOutcome> {
        let requested = parse_credit_input(input)?;
        self.apply_credit(cart, requested)
    }

    /// Re-checks the coupon and credit against the cart's current selection.
    pub fn revalidate(&mut self, cart: &Cart) -> Vec<Adjustment> {
        let mut adjustments = Vec::new();

        if let Some(coupon) = &self.coupon {
            let product_total = self.summary_without_credit(cart, None).product_total;
            if let CouponEligibility::Ineligible { minimum, product_total } = check_coupon(coupon, product_total) {
                warn!(coupon_id = %coupon.id, %minimum, %product_total, "selected coupon no longer eligible");
                adjustments.push(Adjustment::CouponDropped {
                    coupon_id: coupon.id.clone(),
                    minimum,
                    product_total,
                });
                self.coupon = None;
            }
        }

        let before = self.credit;
        self.clamp_credit_to_payable(cart);
        if self.credit != before {
            adjustments.push(Adjustment::CreditClamped {
                from: before,
                to: self.credit,
            });
        }

        adjustments
    }

    /// Order summary for the cart's current selection.
    pub fn summary(&self, cart: &Cart) -> OrderSummary {
        summary::calculate_for_cart(cart, self.coupon.as_ref(), self.credit_usage())
    }

    /// Forgets coupon, credit and balance.
    pub fn reset(&mut self) {
        *self = Checkout::default();
    }

    fn summary_without_credit(&self, cart: &Cart, coupon: Option<&Coupon>) -> OrderSummary {
        summary::calculate_for_cart(cart, coupon, CreditUsage::none())
    }

    fn clamp_credit_to_payable(&mut self, cart: &Cart) {
        let payable = self.summary_without_credit(cart, self.coupon.as_ref()).final_payable;
        if self.credit > payable {
            self.credit = payable;
        }
    }
}
