//! # bazaar-client: Cart Store and Storefront Commands
//!
//! Owns the buyer's cart mirror and checkout choices, talks to the backend
//! through injected service ports, and turns every change into a fresh
//! [`CartResponse`] for the UI.
//!
//! ## Module Structure
//! ```text
//! bazaar-client/src/
//! ├── lib.rs          ◄─── You are here (exports, tracing setup)
//! ├── context.rs      ◄─── AppContext (store + services + config)
//! ├── error.rs        ◄─── ClientError with UI-facing codes
//! ├── notice.rs       ◄─── Non-fatal notices (duplicate, coupon dropped, ...)
//! ├── commands/
//! │   ├── session.rs  ◄─── login, logout
//! │   ├── cart.rs     ◄─── add, remove, select
//! │   └── checkout.rs ◄─── coupons, deposit credit, payment request
//! ├── services/
//! │   ├── mod.rs      ◄─── CartService, CouponService, DepositService ports
//! │   ├── dto.rs      ◄─── Backend wire records
//! │   └── memory.rs   ◄─── In-memory services for tests and demos
//! └── state/
//!     ├── store.rs    ◄─── CartStore (Arc<Mutex<StoreState>>)
//!     └── config.rs   ◄─── ClientConfig from BAZAAR_* variables
//! ```
//!
//! ## Example Usage
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use bazaar_client::commands::{cart, checkout, session};
//! use bazaar_client::services::memory::{
//!     InMemoryCartService, InMemoryCouponService, InMemoryDepositService,
//! };
//! use bazaar_client::{AppContext, ClientConfig, Services};
//! use bazaar_core::{Money, ProductCard};
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let camera = ProductCard {
//!     id: "p-1".to_string(),
//!     name: "Film camera".to_string(),
//!     price: Money::from_units(50_000),
//!     shipping_fee: Money::from_units(3_000),
//!     seller_name: None,
//!     thumbnail_url: None,
//! };
//! let services = Services::new(
//!     Arc::new(InMemoryCartService::new(vec![camera.clone()])),
//!     Arc::new(InMemoryCouponService::new(Vec::new())),
//!     Arc::new(InMemoryDepositService::new(Money::from_units(10_000))),
//! );
//! let ctx = AppContext::new(services, ClientConfig::default());
//!
//! session::login(&ctx).await.unwrap();
//! cart::add_to_cart(&ctx, &camera).await.unwrap();
//! let response = checkout::apply_credit_input(&ctx, "10,000").unwrap();
//!
//! assert_eq!(response.summary.external_pay_amount.units(), 43_000);
//! # });
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod commands;
pub mod context;
pub mod error;
pub mod notice;
pub mod services;
pub mod state;

// =============================================================================
// Re-exports
// =============================================================================

pub use commands::CartResponse;
pub use context::AppContext;
pub use error::{ClientError, ClientResult, ErrorCode};
pub use notice::{Notice, NoticeCode, NoticeLevel};
pub use services::Services;
pub use state::{CartStore, ClientConfig, StoreState, SymbolPosition};

use tracing_subscriber::EnvFilter;

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=bazaar_client=trace` - Trace for this crate only
/// - Default: INFO, DEBUG for the bazaar crates
///
/// Calling it more than once is harmless; later calls are ignored.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,bazaar_core=debug,bazaar_client=debug"));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
