//! # bazaar-core: Pure Checkout Logic for the Bazaar Storefront
//!
//! Cart, coupon, deposit credit and order summary rules as pure functions
//! with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Bazaar Storefront Architecture                      │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Storefront UI                                │   │
//! │  │    Listing ──► Cart ──► Coupon / Deposit ──► Payment widget     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    bazaar-client                                │   │
//! │  │    CartStore, Storefront operations, backend service ports      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ bazaar-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌──────────┐ ┌─────────┐ │   │
//! │  │   │  money  │ │  types  │ │  cart   │ │ checkout │ │ summary │ │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └──────────┘ └─────────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type in whole currency units
//! - [`types`] - Domain types (ProductCard, LineItem, Coupon, OrderSummary)
//! - [`cart`] - Cart aggregate with per-item selection
//! - [`summary`] - Order summary calculator
//! - [`checkout`] - Coupon / credit choices and re-validation
//! - [`validation`] - Input and business rule validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use bazaar_core::{Cart, Checkout, LineItem, Money};
//!
//! let mut cart = Cart::new();
//! cart.add(LineItem::new("p-1", "Film camera", Money::from_units(10_000), Money::zero()).unwrap())
//!     .unwrap();
//!
//! let checkout = Checkout::new();
//! let summary = checkout.summary(&cart);
//! assert_eq!(summary.external_pay_amount.units(), 10_000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod checkout;
pub mod error;
pub mod money;
pub mod summary;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{AddOutcome, Cart};
pub use checkout::{Adjustment, Checkout, CreditOutcome};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum line items allowed in a single cart.
///
/// ## Business Reason
/// Keeps checkout requests to a reasonable size. Clients can lower it via
/// configuration.
pub const MAX_CART_ITEMS: usize = 100;
