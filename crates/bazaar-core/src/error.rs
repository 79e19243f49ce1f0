//! # Error Types
//!
//! Domain-specific error types for bazaar-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  bazaar-core errors (this file)                                        │
//! │  ├── CoreError        - Cart / coupon / credit rule violations         │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  bazaar-client errors (separate crate)                                 │
//! │  ├── ServiceError     - Backend call failures                          │
//! │  └── ClientError      - What the UI sees (serialized)                  │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ClientError → Notice / UI         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! None of these are fatal. Each maps to a transient message in the UI.

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Cart and checkout rule violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The product is already in the cart.
    ///
    /// ## When This Occurs
    /// - Buyer presses "add to cart" twice on the same listing
    /// - Backend reports the cart record already exists
    #[error("Product {product_id} is already in the cart")]
    DuplicateItem { product_id: String },

    /// Product is not in the cart.
    #[error("Product not in cart: {0}")]
    ItemNotInCart(String),

    /// Coupon minimum order amount is not met by the current selection.
    ///
    /// ## User Workflow
    /// ```text
    /// Selected items: 50,000
    ///      │
    ///      ▼
    /// Coupon "5,000 off over 60,000"
    ///      │
    ///      ▼
    /// IneligibleCoupon { minimum: 60,000, product_total: 50,000 }
    ///      │
    ///      ▼
    /// UI shows: "Order at least 60,000 to use this coupon"
    /// ```
    #[error("Coupon {coupon_id} requires an order of at least {minimum} (current: {product_total})")]
    IneligibleCoupon {
        coupon_id: String,
        minimum: Money,
        product_total: Money,
    },

    /// Coupon is past its expiry time.
    #[error("Coupon {coupon_id} has expired")]
    CouponExpired { coupon_id: String },

    /// Coupon id is not among the buyer's coupons.
    #[error("Coupon not found: {0}")]
    CouponNotFound(String),

    /// Requested credit is more than the buyer holds. Hard reject.
    #[error("Requested credit {requested} exceeds available balance {balance}")]
    CreditExceedsBalance { requested: Money, balance: Money },

    /// Requested credit is more than the order still costs. Soft reject,
    /// callers clamp to `payable`.
    #[error("Requested credit {requested} exceeds payable amount {payable}")]
    CreditExceedsPayable { requested: Money, payable: Money },

    /// Cart has exceeded maximum allowed items.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Amount must be zero or more.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., an amount too large to represent).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
