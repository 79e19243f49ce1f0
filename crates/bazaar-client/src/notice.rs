//! # Notices
//!
//! Transient, user-facing messages produced alongside a successful command:
//! a duplicate add, a coupon that stopped applying, a credit amount that was
//! lowered. Failures that stop a command travel as [`ClientError`] instead.
//!
//! [`ClientError`]: crate::error::ClientError

use bazaar_core::{Adjustment, Money};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::state::ClientConfig;

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum NoticeLevel {
    Info,
    Warning,
}

/// What the notice is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum NoticeCode {
    /// Product was already in the cart.
    DuplicateItem,
    /// Selected coupon no longer meets its minimum.
    CouponDropped,
    /// Credit request was lowered to the order total.
    CreditAdjusted,
}

/// A transient message for the buyer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Notice {
    pub level: NoticeLevel,
    pub code: NoticeCode,
    pub message: String,
}

impl Notice {
    /// Product already in the cart.
    pub fn duplicate_item(name: &str) -> Self {
        Notice {
            level: NoticeLevel::Info,
            code: NoticeCode::DuplicateItem,
            message: format!("{} is already in your cart", name),
        }
    }

    /// Credit lowered from `requested` to `applied`.
    pub fn credit_adjusted(config: &ClientConfig, requested: Money, applied: Money) -> Self {
        Notice {
            level: NoticeLevel::Info,
            code: NoticeCode::CreditAdjusted,
            message: format!(
                "Deposit use was changed from {} to the order total of {}",
                config.format_currency(requested),
                config.format_currency(applied)
            ),
        }
    }

    /// Notice for a re-validation adjustment.
    pub fn from_adjustment(config: &ClientConfig, adjustment: &Adjustment) -> Self {
        match adjustment {
            Adjustment::CouponDropped { minimum, .. } => Notice {
                level: NoticeLevel::Warning,
                code: NoticeCode::CouponDropped,
                message: format!(
                    "The coupon was removed because the order is below {}",
                    config.format_currency(*minimum)
                ),
            },
            Adjustment::CreditClamped { from, to } => Notice::credit_adjusted(config, *from, *to),
        }
    }
}
