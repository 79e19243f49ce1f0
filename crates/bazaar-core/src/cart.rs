//! # Cart Aggregate
//!
//! Holds the buyer's candidate purchases and which of them are selected for
//! checkout.
//!
//! ## Cart Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Buyer Action            Method                 State Change            │
//! │  ────────────            ──────                 ────────────            │
//! │                                                                         │
//! │  Add listing ──────────► add() ───────────────► items.push(selected)   │
//! │                          (duplicate → no-op)                           │
//! │                                                                         │
//! │  Remove ───────────────► remove() ────────────► items.retain(..)       │
//! │                                                                         │
//! │  Tick checkbox ────────► toggle_select() ─────► item.selected = !sel   │
//! │                                                                         │
//! │  "Select all" ─────────► select_all(flag) ────► every item.selected    │
//! │                                                                         │
//! │  Server refresh ───────► replace_items() ─────► items = response       │
//! │                          (known ids keep their selection flag)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - At most one line item per `product_id`
//! - Items keep insertion order (display determinism)

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::types::LineItem;
use crate::validation::validate_cart_size;
use crate::MAX_CART_ITEMS;

/// Result of [`Cart::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum AddOutcome {
    /// Item appended and selected.
    Added,
    /// An item with the same product id exists; nothing changed.
    AlreadyPresent,
}

/// The shopping cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Cart {
    items: Vec<LineItem>,
    max_items: usize,
}

impl Default for Cart {
    fn default() -> Self {
        Cart::new()
    }
}

impl Cart {
    /// Creates an empty cart with the default capacity.
    pub fn new() -> Self {
        Cart::with_max_items(MAX_CART_ITEMS)
    }

    /// Creates an empty cart holding at most `max_items` entries.
    pub fn with_max_items(max_items: usize) -> Self {
        Cart {
            items: Vec::new(),
            max_items,
        }
    }

    /// Adds an item, selected.
    ///
    /// ## Behavior
    /// - Product already in cart: no-op, returns `AlreadyPresent`
    /// - Otherwise appended with `selected = true`
    ///
    /// ## Errors
    /// [`CoreError::CartTooLarge`] when the cart is full.
    pub fn add(&mut self, mut item: LineItem) -> CoreResult<AddOutcome> {
        if self.contains(&item.product_id) {
            debug!(product_id = %item.product_id, "item already in cart");
            return Ok(AddOutcome::AlreadyPresent);
        }

        validate_cart_size(self.items.len(), self.max_items)
            .map_err(|_| CoreError::CartTooLarge { max: self.max_items })?;

        item.selected = true;
        self.items.push(item);
        Ok(AddOutcome::Added)
    }

    /// Removes the item for `product_id`. Absent ids are ignored.
    pub fn remove(&mut self, product_id: &str) -> Option<LineItem> {
        let index = self.items.iter().position(|i| i.product_id == product_id)?;
        Some(self.items.remove(index))
    }

    /// Flips the selection flag. Returns the new flag, or `None` if the
    /// product is not in the cart.
    pub fn toggle_select(&mut self, product_id: &str) -> Option<bool> {
        let item = self.items.iter_mut().find(|i| i.product_id == product_id)?;
        item.selected = !item.selected;
        Some(item.selected)
    }

    /// Sets the selection flag on every item.
    pub fn select_all(&mut self, selected: bool) {
        for item in &mut self.items {
            item.selected = selected;
        }
    }

    /// Selected items in insertion order.
    pub fn selected_items(&self) -> impl Iterator<Item = &LineItem> + '_ {
        self.items.iter().filter(|i| i.selected)
    }

    /// Replaces the contents with a server response.
    ///
    /// Reconciliation is replace, not merge. Products already in the cart
    /// keep their selection flag; new ones arrive selected. A repeated
    /// product id keeps its first occurrence and anything past the capacity
    /// is dropped.
    pub fn replace_items(&mut self, items: impl IntoIterator<Item = LineItem>) {
        let previous: HashMap<String, bool> = self
            .items
            .drain(..)
            .map(|i| (i.product_id, i.selected))
            .collect();

        for mut item in items {
            if self.contains(&item.product_id) || self.items.len() >= self.max_items {
                debug!(product_id = %item.product_id, "dropping item from server response");
                continue;
            }
            item.selected = previous.get(&item.product_id).copied().unwrap_or(true);
            self.items.push(item);
        }
    }

    /// Removes every item.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// All items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Looks up the item for `product_id`.
    pub fn get(&self, product_id: &str) -> Option<&LineItem> {
        self.items.iter().find(|i| i.product_id == product_id)
    }

    /// Returns true if the product is in the cart.
    pub fn contains(&self, product_id: &str) -> bool {
        self.get(product_id).is_some()
    }

    /// Backend cart record id for `product_id`, if known.
    pub fn cart_id_of(&self, product_id: &str) -> Option<&str> {
        self.get(product_id).and_then(|i| i.cart_id.as_deref())
    }

    /// Number of line items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of selected line items.
    pub fn selected_count(&self) -> usize {
        self.selected_items().count()
    }

    /// True when the cart is non-empty and every item is selected.
    pub fn all_selected(&self) -> bool {
        !self.items.is_empty() && self.items.iter().all(|i| i.selected)
    }

    /// Capacity of this cart.
    pub fn max_items(&self) -> usize {
        self.max_items
    }
}
