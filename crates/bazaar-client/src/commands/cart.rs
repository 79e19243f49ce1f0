//! # Cart Commands
//!
//! Cart manipulation. Server-backed operations go to the cart service first
//! and then replace the local mirror with the server's answer.
//!
//! ## Cart Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Flow                                            │
//! │                                                                         │
//! │  add_to_cart ──► already in local cart? ── yes ──► DUPLICATE_ITEM notice│
//! │        │                                                                │
//! │        ▼ no                                                             │
//! │  CartService::add_item ── AlreadyExists ──► DUPLICATE_ITEM notice       │
//! │        │                                                                │
//! │        ▼ Added                                                          │
//! │  fetch_items ──► store.replace_items ──► revalidate ──► CartResponse    │
//! │                                                                         │
//! │  toggle_select / select_all are local only; they still revalidate.     │
//! │  Reloads keep the selection flag of items already in the cart.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use bazaar_core::validation::{validate_cart_size, validate_product_id};
use bazaar_core::{CoreError, ProductCard};
use tracing::debug;

use super::{require_auth, respond, sync_cart, CartResponse};
use crate::context::AppContext;
use crate::error::ClientResult;
use crate::notice::Notice;
use crate::services::{AddItemResult, ServiceError};

/// Gets the current cart contents and totals.
pub fn get_cart(ctx: &AppContext) -> CartResponse {
    debug!("get_cart command");
    respond(ctx, Vec::new(), &[])
}

/// Reloads the cart from the server.
pub async fn refresh_cart(ctx: &AppContext) -> ClientResult<CartResponse> {
    debug!("refresh_cart command");
    require_auth(ctx)?;

    let adjustments = sync_cart(ctx).await?;
    Ok(respond(ctx, Vec::new(), &adjustments))
}

/// Adds a product to the cart.
///
/// ## Behavior
/// - Already in cart (locally or on the server): nothing changes, a
///   `DUPLICATE_ITEM` notice is returned
/// - Cart full: `CART_ERROR`
/// - Otherwise added selected, cart reloaded from the server
pub async fn add_to_cart(ctx: &AppContext, product: &ProductCard) -> ClientResult<CartResponse> {
    debug!(product_id = %product.id, "add_to_cart command");
    require_auth(ctx)?;
    validate_product_id(&product.id).map_err(CoreError::from)?;

    let (duplicate, len, max) = ctx
        .store
        .with_state(|s| (s.cart.contains(&product.id), s.cart.len(), s.cart.max_items()));

    if duplicate {
        return Ok(respond(ctx, vec![Notice::duplicate_item(&product.name)], &[]));
    }
    validate_cart_size(len, max).map_err(|_| CoreError::CartTooLarge { max })?;

    match ctx.services.cart.add_item(&product.id).await? {
        AddItemResult::Added => {
            let adjustments = sync_cart(ctx).await?;
            Ok(respond(ctx, Vec::new(), &adjustments))
        }
        AddItemResult::AlreadyExists => {
            // Local mirror was stale; pick up the server's copy
            let adjustments = sync_cart(ctx).await?;
            Ok(respond(ctx, vec![Notice::duplicate_item(&product.name)], &adjustments))
        }
    }
}

/// Removes a product from the cart.
///
/// Products not in the cart are ignored. Items that were never stored on
/// the server are removed locally. A record the server no longer has is
/// treated as removed.
pub async fn remove_from_cart(ctx: &AppContext, product_id: &str) -> ClientResult<CartResponse> {
    debug!(product_id, "remove_from_cart command");
    require_auth(ctx)?;

    let cart_id = ctx
        .store
        .with_state(|s| s.cart.get(product_id).map(|i| i.cart_id.clone()));

    let adjustments = match cart_id {
        None => {
            debug!(product_id, "product not in cart, nothing to remove");
            Vec::new()
        }
        Some(None) => {
            let (_, adjustments) = ctx.store.update(|s| s.cart.remove(product_id));
            adjustments
        }
        Some(Some(cart_id)) => {
            match ctx.services.cart.remove_item(&cart_id).await {
                Ok(()) => {}
                Err(ServiceError::NotFound { .. }) => {
                    debug!(product_id, %cart_id, "cart record already gone on the server");
                }
                Err(err) => return Err(err.into()),
            }
            sync_cart(ctx).await?
        }
    };

    Ok(respond(ctx, Vec::new(), &adjustments))
}

/// Flips the selection flag of one item.
pub fn toggle_select(ctx: &AppContext, product_id: &str) -> ClientResult<CartResponse> {
    debug!(product_id, "toggle_select command");
    require_auth(ctx)?;

    let (toggled, adjustments) = ctx.store.update(|s| s.cart.toggle_select(product_id));
    toggled.ok_or_else(|| CoreError::ItemNotInCart(product_id.to_string()))?;

    Ok(respond(ctx, Vec::new(), &adjustments))
}

/// Selects or deselects every item.
pub fn select_all(ctx: &AppContext, selected: bool) -> ClientResult<CartResponse> {
    debug!(selected, "select_all command");
    require_auth(ctx)?;

    let ((), adjustments) = ctx.store.update(|s| s.cart.select_all(selected));
    Ok(respond(ctx, Vec::new(), &adjustments))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::checkout::select_coupon;
    use crate::commands::session::login;
    use crate::commands::test_support::{coupon, fixture, product};
    use crate::error::ErrorCode;
    use crate::notice::NoticeCode;
    use bazaar_core::{LineItem, Money};

    #[tokio::test]
    async fn test_add_to_cart() {
        let p = product("p-1", 10_000, 0);
        let f = fixture(vec![p.clone()], vec![], 0);
        login(&f.ctx).await.unwrap();

        let response = add_to_cart(&f.ctx, &p).await.unwrap();

        assert_eq!(response.items.len(), 1);
        assert!(response.items[0].selected);
        assert!(response.items[0].cart_id.is_some());
        assert!(response.notices.is_empty());
        assert_eq!(response.summary.product_total.units(), 10_000);
        assert_eq!(response.summary.discount, Money::zero());
        assert_eq!(response.summary.external_pay_amount.units(), 10_000);
    }

    #[tokio::test]
    async fn test_add_duplicate_never_grows_cart() {
        let p = product("p-1", 10_000, 0);
        let f = fixture(vec![p.clone()], vec![], 0);
        login(&f.ctx).await.unwrap();
        add_to_cart(&f.ctx, &p).await.unwrap();

        let response = add_to_cart(&f.ctx, &p).await.unwrap();

        assert_eq!(response.items.len(), 1);
        assert_eq!(response.notices.len(), 1);
        assert_eq!(response.notices[0].code, NoticeCode::DuplicateItem);
        assert_eq!(f.cart.record_count().await, 1);
    }

    #[tokio::test]
    async fn test_add_duplicate_reported_by_server() {
        let p = product("p-1", 10_000, 0);
        let f = fixture(vec![p.clone()], vec![], 0);
        login(&f.ctx).await.unwrap();
        // Added from another device after login
        crate::services::CartService::add_item(f.cart.as_ref(), "p-1").await.unwrap();

        let response = add_to_cart(&f.ctx, &p).await.unwrap();

        assert_eq!(response.items.len(), 1);
        assert_eq!(response.notices[0].code, NoticeCode::DuplicateItem);
    }

    #[tokio::test]
    async fn test_add_unknown_product() {
        let f = fixture(vec![], vec![], 0);
        login(&f.ctx).await.unwrap();

        let err = add_to_cart(&f.ctx, &product("ghost", 1, 0)).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_add_when_cart_full() {
        let (a, b) = (product("a", 1, 0), product("b", 1, 0));
        let mut f = fixture(vec![a.clone(), b.clone()], vec![], 0);
        f.ctx = crate::context::AppContext::new(
            f.ctx.services.clone(),
            crate::state::ClientConfig {
                max_cart_items: 1,
                ..crate::state::ClientConfig::default()
            },
        );
        login(&f.ctx).await.unwrap();
        add_to_cart(&f.ctx, &a).await.unwrap();

        let err = add_to_cart(&f.ctx, &b).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::CartError);
        assert_eq!(f.cart.record_count().await, 1);
    }

    #[tokio::test]
    async fn test_remove_from_cart() {
        let (a, b) = (product("a", 1_000, 0), product("b", 2_000, 0));
        let f = fixture(vec![a.clone(), b.clone()], vec![], 0);
        login(&f.ctx).await.unwrap();
        add_to_cart(&f.ctx, &a).await.unwrap();
        add_to_cart(&f.ctx, &b).await.unwrap();

        let response = remove_from_cart(&f.ctx, "a").await.unwrap();

        assert_eq!(response.items.len(), 1);
        assert_eq!(response.items[0].product_id, "b");
        assert_eq!(f.cart.record_count().await, 1);

        // Absent product is not an error
        let response = remove_from_cart(&f.ctx, "a").await.unwrap();
        assert_eq!(response.items.len(), 1);
    }

    #[tokio::test]
    async fn test_remove_local_only_item() {
        let f = fixture(vec![], vec![], 0);
        login(&f.ctx).await.unwrap();
        let local = LineItem::new("local", "Local", Money::from_units(500), Money::zero()).unwrap();
        f.ctx.store.update(|s| s.cart.add(local)).0.unwrap();

        let response = remove_from_cart(&f.ctx, "local").await.unwrap();

        assert!(response.items.is_empty());
    }

    #[tokio::test]
    async fn test_removing_last_item_drops_coupon() {
        let p = product("p-1", 50_000, 3_000);
        let f = fixture(vec![p.clone()], vec![coupon("w", 40_000, 5_000)], 0);
        login(&f.ctx).await.unwrap();
        add_to_cart(&f.ctx, &p).await.unwrap();
        let with_coupon = select_coupon(&f.ctx, "w").unwrap();
        assert_eq!(with_coupon.summary.discount.units(), 5_000);

        let response = remove_from_cart(&f.ctx, "p-1").await.unwrap();

        assert_eq!(response.summary.discount, Money::zero());
        assert_eq!(response.summary.final_payable, Money::zero());
        assert!(response.selected_coupon_id.is_none());
        assert_eq!(response.notices[0].code, NoticeCode::CouponDropped);
    }

    #[tokio::test]
    async fn test_toggle_and_select_all() {
        let (a, b) = (product("a", 1_000, 100), product("b", 2_000, 200));
        let f = fixture(vec![a.clone(), b.clone()], vec![], 0);
        login(&f.ctx).await.unwrap();
        add_to_cart(&f.ctx, &a).await.unwrap();
        add_to_cart(&f.ctx, &b).await.unwrap();

        let response = toggle_select(&f.ctx, "a").unwrap();
        assert_eq!(response.summary.selected_count, 1);
        assert_eq!(response.summary.product_total.units(), 2_000);
        assert_eq!(response.summary.shipping_total.units(), 200);

        let response = select_all(&f.ctx, false).unwrap();
        assert_eq!(response.summary.selected_count, 0);
        assert_eq!(response.summary.final_payable, Money::zero());

        let response = select_all(&f.ctx, true).unwrap();
        assert_eq!(response.summary.product_total.units(), 3_000);

        let err = toggle_select(&f.ctx, "missing").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_add_keeps_other_selections() {
        let (a, b) = (product("a", 30_000, 0), product("b", 20_000, 0));
        let f = fixture(vec![a.clone(), b.clone()], vec![], 0);
        login(&f.ctx).await.unwrap();
        add_to_cart(&f.ctx, &a).await.unwrap();
        toggle_select(&f.ctx, "a").unwrap();

        let response = add_to_cart(&f.ctx, &b).await.unwrap();

        assert!(!response.items[0].selected);
        assert!(response.items[1].selected);
        assert_eq!(response.summary.selected_count, 1);
        assert_eq!(response.summary.product_total.units(), 20_000);
        let request = crate::commands::checkout::payment_request(&f.ctx).unwrap();
        assert_eq!(request.product_ids, vec!["b".to_string()]);
    }

    #[tokio::test]
    async fn test_remove_keeps_other_selections() {
        let (a, b, c) = (product("a", 1_000, 0), product("b", 2_000, 0), product("c", 3_000, 0));
        let f = fixture(vec![a.clone(), b.clone(), c.clone()], vec![], 0);
        login(&f.ctx).await.unwrap();
        for p in [&a, &b, &c] {
            add_to_cart(&f.ctx, p).await.unwrap();
        }
        toggle_select(&f.ctx, "b").unwrap();

        let response = remove_from_cart(&f.ctx, "a").await.unwrap();

        assert_eq!(response.items.len(), 2);
        assert!(!response.items[0].selected);
        assert!(response.items[1].selected);
        assert_eq!(response.summary.product_total.units(), 3_000);

        let response = refresh_cart(&f.ctx).await.unwrap();
        assert_eq!(response.summary.selected_count, 1);
    }

    #[tokio::test]
    async fn test_remove_record_already_gone_on_server() {
        let (a, b) = (product("a", 1_000, 0), product("b", 2_000, 0));
        let f = fixture(vec![a.clone(), b.clone()], vec![], 0);
        login(&f.ctx).await.unwrap();
        add_to_cart(&f.ctx, &a).await.unwrap();
        add_to_cart(&f.ctx, &b).await.unwrap();
        // Removed from another device
        let cart_id = f.ctx.store.with_state(|s| s.cart.cart_id_of("a").map(str::to_string)).unwrap();
        crate::services::CartService::remove_item(f.cart.as_ref(), &cart_id).await.unwrap();

        let response = remove_from_cart(&f.ctx, "a").await.unwrap();

        assert_eq!(response.items.len(), 1);
        assert_eq!(response.items[0].product_id, "b");
    }

    #[tokio::test]
    async fn test_selection_commands_require_login() {
        let f = fixture(vec![], vec![], 0);

        assert_eq!(toggle_select(&f.ctx, "a").unwrap_err().code, ErrorCode::Unauthorized);
        assert_eq!(select_all(&f.ctx, true).unwrap_err().code, ErrorCode::Unauthorized);
    }

    #[tokio::test]
    async fn test_get_cart_is_idempotent() {
        let p = product("p-1", 10_000, 2_500);
        let f = fixture(vec![p.clone()], vec![], 0);
        login(&f.ctx).await.unwrap();
        add_to_cart(&f.ctx, &p).await.unwrap();

        assert_eq!(get_cart(&f.ctx), get_cart(&f.ctx));
    }
}
