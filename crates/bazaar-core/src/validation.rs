//! # Validation Module
//!
//! Input validation for cart, coupon and credit entry.
//!
//! ## Validation Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Storefront UI                                                │
//! │  ├── Free-form credit text field                                       │
//! │  └── Immediate feedback                                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── parse_credit_input: digits only, empty = 0                        │
//! │  ├── check_coupon: minimum order amount                                │
//! │  └── validate_credit_usage: balance vs payable                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Backend order creation                                       │
//! │  └── Re-checks coupon and deposit server side                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{Coupon, CouponEligibility};
use crate::MAX_CART_ITEMS;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Identifier & Amount Validators
// =============================================================================

/// Validates a product identifier.
///
/// ## Rules
/// - Must not be empty or whitespace
pub fn validate_product_id(product_id: &str) -> ValidationResult<()> {
    if product_id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "product_id".to_string(),
        });
    }

    Ok(())
}

/// Validates that an amount is zero or more.
///
/// ## Example
/// ```rust
/// use bazaar_core::money::Money;
/// use bazaar_core::validation::validate_amount;
///
/// assert!(validate_amount("unit_price", Money::from_units(0)).is_ok());
/// assert!(validate_amount("unit_price", Money::from_units(-1)).is_err());
/// ```
pub fn validate_amount(field: &str, amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::MustBeNonNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates cart size before adding another line item.
///
/// ## Rules
/// - Must stay below `max` (normally [`MAX_CART_ITEMS`])
pub fn validate_cart_size(current_items: usize, max: usize) -> ValidationResult<()> {
    if current_items >= max {
        return Err(ValidationError::OutOfRange {
            field: "cart items".to_string(),
            min: 0,
            max: i64::try_from(max).unwrap_or(i64::MAX),
        });
    }

    Ok(())
}

/// Default cart capacity check.
pub fn validate_default_cart_size(current_items: usize) -> ValidationResult<()> {
    validate_cart_size(current_items, MAX_CART_ITEMS)
}

// =============================================================================
// Credit Input
// =============================================================================

/// Parses free-form credit text into an amount.
///
/// ## Rules
/// - Every non-digit character is dropped (`"12,000원"` → 12000)
/// - Empty input (or input with no digits) is zero
/// - A digit run too large for an amount is rejected
///
/// ## Example
/// ```rust
/// use bazaar_core::validation::parse_credit_input;
///
/// assert_eq!(parse_credit_input("12,000").unwrap().units(), 12_000);
/// assert_eq!(parse_credit_input("").unwrap().units(), 0);
/// ```
pub fn parse_credit_input(input: &str) -> ValidationResult<Money> {
    let digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.is_empty() {
        return Ok(Money::zero());
    }

    digits
        .parse::<i64>()
        .map(Money::from_units)
        .map_err(|_| ValidationError::InvalidFormat {
            field: "credit".to_string(),
            reason: "amount is too large".to_string(),
        })
}

// =============================================================================
// Coupon & Credit Rules
// =============================================================================

/// Checks a coupon against the selected product subtotal.
///
/// ## Rules
/// - `product_total < minimum_order_amount` → ineligible
/// - otherwise discount = `min(discount_amount, product_total)`
///
/// Shipping does not count toward the minimum.
pub fn check_coupon(coupon: &Coupon, product_total: Money) -> CouponEligibility {
    if product_total < coupon.minimum_order_amount {
        return CouponEligibility::Ineligible {
            minimum: coupon.minimum_order_amount,
            product_total,
        };
    }

    CouponEligibility::Eligible {
        discount: coupon.discount_amount.min(product_total),
    }
}

/// Validates a credit request against the balance and the payable amount.
///
/// ## Rules (checked in this order)
/// 1. `requested > balance` → [`CoreError::CreditExceedsBalance`] (hard)
/// 2. `requested > payable` → [`CoreError::CreditExceedsPayable`] (soft)
///
/// ## User Workflow
/// ```text
/// Buyer types "48000" into the deposit field
///      │
///      ▼
/// validate_credit_usage(48,000, balance, payable) ← THIS FUNCTION
///      │
///      ├── balance 20,000? → "You only have 20,000" (input rejected)
///      │
///      ├── payable 30,000? → clamp to 30,000 and tell the buyer
///      │
///      └── OK → 48,000 applied
/// ```
pub fn validate_credit_usage(requested: Money, balance: Money, payable: Money) -> CoreResult<Money> {
    validate_amount("credit", requested)?;

    if requested > balance {
        return Err(CoreError::CreditExceedsBalance { requested, balance });
    }

    if requested > payable {
        return Err(CoreError::CreditExceedsPayable { requested, payable });
    }

    Ok(requested)
}

// =============================================================================
// Unit Tests
// =============================================================================
