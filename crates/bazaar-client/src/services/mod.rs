//! # Backend Services
//!
//! Ports for the backend collaborators the cart depends on.
//!
//! ## Collaborators
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Backend Collaborators                                │
//! │                                                                         │
//! │  CartService      fetch_items() ──► Vec<CartRecord>                     │
//! │                   add_item(product_id) ──► Added | AlreadyExists        │
//! │                   remove_item(cart_id)                                  │
//! │                                                                         │
//! │  CouponService    list_my_coupons() ──► Vec<CouponRecord>               │
//! │                                                                         │
//! │  DepositService   get_balance() ──► DepositBalance                      │
//! │                                                                         │
//! │  Responses are normalized into core types in `dto` before anything     │
//! │  else sees them.                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! HTTP implementations live with the application shell. The `memory`
//! module provides in-process implementations for development and tests.

pub mod dto;
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

pub use dto::{AddItemResult, CartRecord, CouponRecord, DepositBalance, ProductDto};

// =============================================================================
// Service Error
// =============================================================================

/// Backend call failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// Session missing or expired.
    #[error("Not authenticated")]
    Unauthorized,

    /// Referenced resource does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Request conflicts with server state.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Backend could not be reached or failed.
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// Backend answered with data that fails validation.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ServiceError {
    /// Creates a NotFound error.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        ServiceError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }
}

/// Result type for service calls.
pub type ServiceResult<T> = Result<T, ServiceError>;

// =============================================================================
// Service Traits
// =============================================================================

/// Server-side cart persistence.
#[async_trait]
pub trait CartService: Send + Sync {
    /// Returns the buyer's cart records.
    async fn fetch_items(&self) -> ServiceResult<Vec<CartRecord>>;

    /// Adds a product to the server cart.
    async fn add_item(&self, product_id: &str) -> ServiceResult<AddItemResult>;

    /// Removes a cart record.
    async fn remove_item(&self, cart_id: &str) -> ServiceResult<()>;
}

/// The buyer's coupons.
#[async_trait]
pub trait CouponService: Send + Sync {
    /// Lists coupons owned by the buyer.
    async fn list_my_coupons(&self) -> ServiceResult<Vec<CouponRecord>>;
}

/// Stored-credit ("deposit") balance.
#[async_trait]
pub trait DepositService: Send + Sync {
    /// Returns the buyer's deposit balance.
    async fn get_balance(&self) -> ServiceResult<DepositBalance>;
}

/// The three collaborators, injected together.
#[derive(Clone)]
pub struct Services {
    pub cart: Arc<dyn CartService>,
    pub coupons: Arc<dyn CouponService>,
    pub deposit: Arc<dyn DepositService>,
}

impl Services {
    /// Bundles service implementations.
    pub fn new(
        cart: Arc<dyn CartService>,
        coupons: Arc<dyn CouponService>,
        deposit: Arc<dyn DepositService>,
    ) -> Self {
        Services {
            cart,
            coupons,
            deposit,
        }
    }
}

impl std::fmt::Debug for Services {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Services").finish_non_exhaustive()
    }
}
