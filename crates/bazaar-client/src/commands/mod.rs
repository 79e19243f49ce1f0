//! # Storefront Commands
//!
//! Operations the storefront UI invokes. Each takes the [`AppContext`] and
//! returns a fresh [`CartResponse`] (or a [`ClientError`]).
//!
//! ## Command Groups
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  session.rs   login, logout                                             │
//! │  cart.rs      get_cart, refresh_cart, add_to_cart, remove_from_cart,    │
//! │               toggle_select, select_all                                 │
//! │  checkout.rs  available_coupons, select_coupon, clear_coupon,           │
//! │               apply_credit_input, refresh_balance, get_summary,         │
//! │               payment_request                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`ClientError`]: crate::error::ClientError

pub mod cart;
pub mod checkout;
pub mod session;

use bazaar_core::{Adjustment, LineItem, Money, OrderSummary};
use serde::Serialize;
use ts_rs::TS;

use crate::context::AppContext;
use crate::error::{ClientError, ClientResult};
use crate::notice::Notice;
use crate::state::StoreState;

/// Cart contents, totals and notices returned by every cart command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartResponse {
    pub items: Vec<LineItem>,
    pub summary: OrderSummary,
    pub selected_coupon_id: Option<String>,
    pub credit: Money,
    pub available_balance: Money,
    pub notices: Vec<Notice>,
}

impl CartResponse {
    fn from_state(state: &StoreState, notices: Vec<Notice>) -> Self {
        CartResponse {
            items: state.cart.items().to_vec(),
            summary: state.summary(),
            selected_coupon_id: state.checkout.coupon().map(|c| c.id.clone()),
            credit: state.checkout.credit(),
            available_balance: state.checkout.available_balance(),
            notices,
        }
    }
}

/// Builds the response, turning re-validation adjustments into notices.
fn respond(ctx: &AppContext, mut notices: Vec<Notice>, adjustments: &[Adjustment]) -> CartResponse {
    notices.extend(adjustments.iter().map(|a| Notice::from_adjustment(&ctx.config, a)));
    ctx.store.with_state(|s| CartResponse::from_state(s, notices))
}

fn require_auth(ctx: &AppContext) -> ClientResult<()> {
    if ctx.store.is_authenticated() {
        Ok(())
    } else {
        Err(ClientError::unauthorized())
    }
}

/// Fetches the server cart and replaces the local mirror with it.
async fn sync_cart(ctx: &AppContext) -> ClientResult<Vec<Adjustment>> {
    let records = ctx.services.cart.fetch_items().await?;
    let items = records
        .into_iter()
        .map(LineItem::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ctx.store.replace_items(items))
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use bazaar_core::{Money, ProductCard};

    use crate::context::AppContext;
    use crate::services::memory::{InMemoryCartService, InMemoryCouponService, InMemoryDepositService};
    use crate::services::{CouponRecord, Services};
    use crate::state::ClientConfig;

    pub fn product(id: &str, price: i64, shipping: i64) -> ProductCard {
        ProductCard {
            id: id.to_string(),
            name: format!("Product {}", id),
            price: Money::from_units(price),
            shipping_fee: Money::from_units(shipping),
            seller_name: None,
            thumbnail_url: None,
        }
    }

    pub fn coupon(id: &str, minimum: i64, discount: i64) -> CouponRecord {
        CouponRecord {
            coupon_id: id.to_string(),
            coupon_name: format!("Coupon {}", id),
            min_price: minimum,
            sale_price: discount,
            expires_at: None,
        }
    }

    pub struct Fixture {
        pub ctx: AppContext,
        pub cart: Arc<InMemoryCartService>,
        pub deposit: Arc<InMemoryDepositService>,
    }

    pub fn fixture(catalog: Vec<ProductCard>, coupons: Vec<CouponRecord>, balance: i64) -> Fixture {
        let cart = Arc::new(InMemoryCartService::new(catalog));
        let deposit = Arc::new(InMemoryDepositService::new(Money::from_units(balance)));
        let services = Services::new(
            cart.clone(),
            Arc::new(InMemoryCouponService::new(coupons)),
            deposit.clone(),
        );

        Fixture {
            ctx: AppContext::new(services, ClientConfig::default()),
            cart,
            deposit,
        }
    }
}
