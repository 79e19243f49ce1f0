//! # Session Commands
//!
//! Ties the cart store to the authentication lifecycle.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  login ──► fetch cart ┐                                                 │
//! │            coupons    ├─► (concurrently) ──► store populated, signed in │
//! │            balance    ┘                                                 │
//! │                                                                         │
//! │  logout ──► store.reset() ──► empty, signed out                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The auth token itself is managed by the application shell.

use bazaar_core::{Coupon, LineItem};
use tracing::{debug, info};

use super::{respond, CartResponse};
use crate::context::AppContext;
use crate::error::ClientResult;

/// Populates the store after the buyer signs in.
///
/// Nothing in the store changes if any of the three fetches fails.
pub async fn login(ctx: &AppContext) -> ClientResult<CartResponse> {
    debug!("login command");

    let (records, coupon_records, balance) = tokio::try_join!(
        ctx.services.cart.fetch_items(),
        ctx.services.coupons.list_my_coupons(),
        ctx.services.deposit.get_balance(),
    )?;

    let items = records
        .into_iter()
        .map(LineItem::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    let coupons: Vec<Coupon> = coupon_records.into_iter().map(Coupon::from).collect();

    let ((), adjustments) = ctx.store.update(|s| {
        s.cart.replace_items(items);
        s.coupons = coupons;
        s.checkout.set_available_balance(balance.amount());
        s.authenticated = true;
    });

    info!(
        items = ctx.store.with_state(|s| s.cart.len()),
        balance = %balance.amount(),
        "buyer signed in, cart loaded"
    );
    Ok(respond(ctx, Vec::new(), &adjustments))
}

/// Clears all cart and checkout state when the buyer signs out.
pub fn logout(ctx: &AppContext) {
    debug!("logout command");
    ctx.store.reset();
    info!("buyer signed out, cart cleared");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::cart::add_to_cart;
    use crate::commands::test_support::{coupon, fixture, product};
    use crate::error::ErrorCode;
    use bazaar_core::Money;

    #[tokio::test]
    async fn test_login_populates_store() {
        let f = fixture(vec![product("p-1", 10_000, 0)], vec![coupon("w", 0, 1_000)], 7_000);
        // Item added in a previous session
        crate::services::CartService::add_item(f.cart.as_ref(), "p-1").await.unwrap();

        let response = login(&f.ctx).await.unwrap();

        assert_eq!(response.items.len(), 1);
        assert_eq!(response.available_balance.units(), 7_000);
        assert_eq!(response.summary.final_payable.units(), 10_000);
        assert!(f.ctx.store.is_authenticated());
        assert_eq!(f.ctx.store.with_state(|s| s.coupons.len()), 1);
    }

    #[tokio::test]
    async fn test_cart_commands_require_login() {
        let f = fixture(vec![product("p-1", 10_000, 0)], vec![], 0);

        let err = add_to_cart(&f.ctx, &product("p-1", 10_000, 0)).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::Unauthorized);
        assert_eq!(f.cart.record_count().await, 0);
    }

    #[tokio::test]
    async fn test_logout_resets_store() {
        let f = fixture(vec![product("p-1", 10_000, 0)], vec![], 5_000);
        login(&f.ctx).await.unwrap();
        add_to_cart(&f.ctx, &product("p-1", 10_000, 0)).await.unwrap();

        logout(&f.ctx);

        let state = f.ctx.store.snapshot();
        assert!(!state.authenticated);
        assert!(state.cart.is_empty());
        assert!(state.coupons.is_empty());
        assert_eq!(state.checkout.available_balance(), Money::zero());
        // Server cart is untouched; the next login brings it back
        assert_eq!(login(&f.ctx).await.unwrap().items.len(), 1);
    }
}
