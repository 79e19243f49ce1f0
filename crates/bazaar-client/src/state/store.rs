//! # Cart Store
//!
//! Process-wide cart and checkout state, owned by an explicitly constructed
//! handle that is passed to whoever needs it. There is no global instance.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Store Lifecycle                                      │
//! │                                                                         │
//! │  CartStore::new() ──► empty, signed out                                 │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  login  ──► replace_items(server cart), balance, coupons, signed in     │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  update(..) ──► mutation ──► Checkout::revalidate ──► adjustments       │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  logout ──► reset() ──► empty, signed out                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//! The state sits behind `Arc<Mutex<T>>`. Each update is a single critical
//! section, so readers never observe a half-applied change.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use bazaar_core::{Adjustment, Cart, Checkout, Coupon, LineItem, OrderSummary};
use tracing::debug;

/// Everything the store holds.
#[derive(Debug, Clone, Default)]
pub struct StoreState {
    /// Local mirror of the server cart.
    pub cart: Cart,

    /// Coupon and credit choices.
    pub checkout: Checkout,

    /// Coupons owned by the buyer.
    pub coupons: Vec<Coupon>,

    /// Whether a buyer is signed in.
    pub authenticated: bool,
}

impl StoreState {
    fn empty(max_cart_items: usize) -> Self {
        StoreState {
            cart: Cart::with_max_items(max_cart_items),
            checkout: Checkout::new(),
            coupons: Vec::new(),
            authenticated: false,
        }
    }

    /// Summary for the current selection.
    pub fn summary(&self) -> OrderSummary {
        self.checkout.summary(&self.cart)
    }

    /// Finds one of the buyer's coupons.
    pub fn coupon(&self, coupon_id: &str) -> Option<&Coupon> {
        self.coupons.iter().find(|c| c.id == coupon_id)
    }
}

/// Cloneable handle to the shared store.
#[derive(Debug, Clone)]
pub struct CartStore {
    state: Arc<Mutex<StoreState>>,
    max_cart_items: usize,
}

impl CartStore {
    /// Creates an empty, signed-out store.
    pub fn new(max_cart_items: usize) -> Self {
        CartStore {
            state: Arc::new(Mutex::new(StoreState::empty(max_cart_items))),
            max_cart_items,
        }
    }

    /// Executes a function with read access to the state.
    ///
    /// ## Usage
    /// ```rust
    /// use bazaar_client::CartStore;
    ///
    /// let store = CartStore::new(10);
    /// let count = store.with_state(|s| s.cart.len());
    /// assert_eq!(count, 0);
    /// ```
    pub fn with_state<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&StoreState) -> R,
    {
        let state = self.lock();
        f(&state)
    }

    /// Executes a mutation, then re-validates the checkout against the cart.
    ///
    /// Returns the closure's result and any adjustments the re-validation
    /// made (dropped coupon, clamped credit).
    pub fn update<F, R>(&self, f: F) -> (R, Vec<Adjustment>)
    where
        F: FnOnce(&mut StoreState) -> R,
    {
        let mut state = self.lock();
        let result = f(&mut state);

        let StoreState { cart, checkout, .. } = &mut *state;
        let adjustments = checkout.revalidate(cart);
        if !adjustments.is_empty() {
            debug!(count = adjustments.len(), "checkout adjusted after update");
        }

        (result, adjustments)
    }

    /// Replaces the cart with a server response.
    pub fn replace_items(&self, items: Vec<LineItem>) -> Vec<Adjustment> {
        let ((), adjustments) = self.update(|s| s.cart.replace_items(items));
        adjustments
    }

    /// Returns true if a buyer is signed in.
    pub fn is_authenticated(&self) -> bool {
        self.with_state(|s| s.authenticated)
    }

    /// Clears everything and marks the store signed out.
    pub fn reset(&self) {
        let mut state = self.lock();
        *state = StoreState::empty(self.max_cart_items);
        debug!("cart store reset");
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> StoreState {
        self.with_state(StoreState::clone)
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        // A panic inside a closure leaves plain data behind; keep using it.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for CartStore {
    fn default() -> Self {
        CartStore::new(bazaar_core::MAX_CART_ITEMS)
    }
}
