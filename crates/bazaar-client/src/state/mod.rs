//! # State Module
//!
//! Client-side state handed to the storefront commands.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────────┐        ┌──────────────────────────┐      │
//! │  │   CartStore              │        │   ClientConfig           │      │
//! │  │                          │        │                          │      │
//! │  │  Arc<Mutex<StoreState>>  │        │  currency symbol         │      │
//! │  │  cart, checkout,         │        │  cart capacity           │      │
//! │  │  coupons, authenticated  │        │  store name              │      │
//! │  └──────────────────────────┘        └──────────────────────────┘      │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • CartStore: one Mutex, every update is one critical section          │
//! │  • ClientConfig: read-only after initialization                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod store;

pub use config::{ClientConfig, SymbolPosition};
pub use store::{CartStore, StoreState};
