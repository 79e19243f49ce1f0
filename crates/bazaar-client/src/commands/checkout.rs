//! # Checkout Commands
//!
//! Coupon and deposit choices, the order summary, and the payment request
//! handed to the external payment widget.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Checkout Flow                                        │
//! │                                                                         │
//! │  available_coupons ──► pick one ──► select_coupon                       │
//! │                                        │                                │
//! │                                        ├── below minimum → COUPON_INELIGIBLE
//! │                                        ▼                                │
//! │  deposit field ──► apply_credit_input                                   │
//! │                        │                                                │
//! │                        ├── > balance → CREDIT_EXCEEDS_BALANCE (rejected)│
//! │                        ├── > payable → clamped + CREDIT_ADJUSTED notice │
//! │                        ▼                                                │
//! │  payment_request ──► { amount: external_pay_amount, credit, coupon }    │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                  payment widget (external SDK)                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use bazaar_core::validation::check_coupon;
use bazaar_core::{Coupon, CouponEligibility, CoreError, Money, OrderSummary};
use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info};
use ts_rs::TS;

use super::{require_auth, respond, CartResponse};
use crate::context::AppContext;
use crate::error::{ClientError, ClientResult};
use crate::notice::Notice;

/// A coupon offered at checkout, with its eligibility for the current
/// selection so the UI can disable the ones that do not apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CouponOption {
    pub coupon: Coupon,
    pub eligibility: CouponEligibility,
}

/// What the payment widget is initialized with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PaymentRequest {
    /// Order title shown by the payment widget.
    pub order_name: String,
    /// Amount the widget charges (external pay amount).
    pub amount: Money,
    /// Deposit credit used for the rest.
    pub credit_amount: Money,
    /// Coupon discount included in the totals.
    pub discount: Money,
    /// Coupon to redeem, if any.
    pub coupon_id: Option<String>,
    /// Products being purchased, in cart order.
    pub product_ids: Vec<String>,
}

/// Lists the buyer's unexpired coupons with their eligibility.
pub fn available_coupons(ctx: &AppContext) -> Vec<CouponOption> {
    debug!("available_coupons command");
    let now = Utc::now();

    ctx.store.with_state(|s| {
        let product_total = s.summary().product_total;
        s.coupons
            .iter()
            .filter(|c| !c.is_expired(now))
            .map(|c| CouponOption {
                coupon: c.clone(),
                eligibility: check_coupon(c, product_total),
            })
            .collect()
    })
}

/// Selects one of the buyer's coupons.
pub fn select_coupon(ctx: &AppContext, coupon_id: &str) -> ClientResult<CartResponse> {
    debug!(coupon_id, "select_coupon command");
    require_auth(ctx)?;

    let coupon = ctx
        .store
        .with_state(|s| s.coupon(coupon_id).cloned())
        .ok_or_else(|| CoreError::CouponNotFound(coupon_id.to_string()))?;

    let (selected, adjustments) = ctx
        .store
        .update(|s| s.checkout.select_coupon(&s.cart, coupon, Utc::now()));
    selected?;

    Ok(respond(ctx, Vec::new(), &adjustments))
}

/// Clears the coupon selection.
pub fn clear_coupon(ctx: &AppContext) -> ClientResult<CartResponse> {
    debug!("clear_coupon command");
    require_auth(ctx)?;

    let (_, adjustments) = ctx.store.update(|s| s.checkout.clear_coupon());
    Ok(respond(ctx, Vec::new(), &adjustments))
}

/// Applies the deposit amount typed by the buyer.
///
/// ## Behavior
/// - Non-digits are ignored, empty input means no credit
/// - More than the balance: `CREDIT_EXCEEDS_BALANCE`, prior credit kept
/// - More than the order total: lowered to it, `CREDIT_ADJUSTED` notice
pub fn apply_credit_input(ctx: &AppContext, input: &str) -> ClientResult<CartResponse> {
    debug!(input, "apply_credit_input command");
    require_auth(ctx)?;

    let (outcome, adjustments) = ctx
        .store
        .update(|s| s.checkout.apply_credit_input(&s.cart, input));
    let outcome = outcome?;

    let notices = match outcome.adjusted_from {
        Some(requested) => vec![Notice::credit_adjusted(&ctx.config, requested, outcome.applied)],
        None => Vec::new(),
    };
    Ok(respond(ctx, notices, &adjustments))
}

/// Reloads the deposit balance from the server.
pub async fn refresh_balance(ctx: &AppContext) -> ClientResult<CartResponse> {
    debug!("refresh_balance command");
    require_auth(ctx)?;

    let balance = ctx.services.deposit.get_balance().await?;
    let (lowered, mut adjustments) = ctx
        .store
        .update(|s| s.checkout.set_available_balance(balance.amount()));
    adjustments.extend(lowered);

    Ok(respond(ctx, Vec::new(), &adjustments))
}

/// Order summary for the current selection.
pub fn get_summary(ctx: &AppContext) -> OrderSummary {
    ctx.store.with_state(|s| s.summary())
}

/// Builds the request for the payment widget.
///
/// ## Errors
/// - `UNAUTHORIZED` when signed out
/// - `VALIDATION_ERROR` when nothing is selected
pub fn payment_request(ctx: &AppContext) -> ClientResult<PaymentRequest> {
    debug!("payment_request command");
    require_auth(ctx)?;

    let request = ctx.store.with_state(|s| {
        let summary = s.summary();
        let selected: Vec<_> = s.cart.selected_items().collect();
        let first = selected.first()?;

        let order_name = match selected.len() {
            1 => first.name.clone(),
            n => format!("{} and {} more", first.name, n - 1),
        };

        Some(PaymentRequest {
            order_name,
            amount: summary.external_pay_amount,
            credit_amount: summary.credit_applied,
            discount: summary.discount,
            coupon_id: s
                .checkout
                .coupon()
                .filter(|_| summary.discount.is_positive())
                .map(|c| c.id.clone()),
            product_ids: selected.iter().map(|i| i.product_id.clone()).collect(),
        })
    });

    let request = request.ok_or_else(|| ClientError::validation("Select at least one item to check out"))?;
    info!(
        order_name = %request.order_name,
        amount = %request.amount,
        credit = %request.credit_amount,
        "payment request prepared"
    );
    Ok(request)
}
