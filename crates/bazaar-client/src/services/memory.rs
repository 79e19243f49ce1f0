//! # In-Memory Services
//!
//! Process-local implementations of the backend service traits. Used for
//! development builds without a backend and by the command tests.

use std::collections::HashMap;

use async_trait::async_trait;
use bazaar_core::{Money, ProductCard};
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use super::{
    AddItemResult, CartRecord, CartService, CouponRecord, CouponService, DepositBalance, DepositService,
    ServiceError, ServiceResult,
};

// =============================================================================
// Cart
// =============================================================================

/// Cart service backed by a product catalog and a record list.
#[derive(Debug, Default)]
pub struct InMemoryCartService {
    catalog: HashMap<String, ProductCard>,
    records: Mutex<Vec<CartRecord>>,
}

impl InMemoryCartService {
    /// Creates a cart service that can add any product in `catalog`.
    pub fn new(catalog: impl IntoIterator<Item = ProductCard>) -> Self {
        InMemoryCartService {
            catalog: catalog.into_iter().map(|p| (p.id.clone(), p)).collect(),
            records: Mutex::new(Vec::new()),
        }
    }

    /// Number of stored records.
    pub async fn record_count(&self) -> usize {
        self.records.lock().await.len()
    }
}

#[async_trait]
impl CartService for InMemoryCartService {
    async fn fetch_items(&self) -> ServiceResult<Vec<CartRecord>> {
        Ok(self.records.lock().await.clone())
    }

    async fn add_item(&self, product_id: &str) -> ServiceResult<AddItemResult> {
        let product = self
            .catalog
            .get(product_id)
            .ok_or_else(|| ServiceError::not_found("Product", product_id))?;

        let mut records = self.records.lock().await;
        if records.iter().any(|r| r.product_uuid == product_id) {
            return Ok(AddItemResult::AlreadyExists);
        }

        let cart_id = Uuid::new_v4().to_string();
        debug!(%cart_id, product_id, "cart record created");
        records.push(CartRecord {
            cart_id,
            product_uuid: product.id.clone(),
            product_name: product.name.clone(),
            price: product.price.units(),
            delivery_fee: product.shipping_fee.units(),
            thumbnail_url: product.thumbnail_url.clone(),
        });

        Ok(AddItemResult::Added)
    }

    async fn remove_item(&self, cart_id: &str) -> ServiceResult<()> {
        let mut records = self.records.lock().await;
        let before = records.len();
        records.retain(|r| r.cart_id != cart_id);

        if records.len() == before {
            return Err(ServiceError::not_found("Cart record", cart_id));
        }
        Ok(())
    }
}

// =============================================================================
// Coupons
// =============================================================================

/// Coupon service returning a fixed list.
#[derive(Debug, Default)]
pub struct InMemoryCouponService {
    coupons: Vec<CouponRecord>,
}

impl InMemoryCouponService {
    pub fn new(coupons: Vec<CouponRecord>) -> Self {
        InMemoryCouponService { coupons }
    }
}

#[async_trait]
impl CouponService for InMemoryCouponService {
    async fn list_my_coupons(&self) -> ServiceResult<Vec<CouponRecord>> {
        Ok(self.coupons.clone())
    }
}

// =============================================================================
// Deposit
// =============================================================================

/// Deposit service with a settable balance.
#[derive(Debug, Default)]
pub struct InMemoryDepositService {
    balance: Mutex<Money>,
}

impl InMemoryDepositService {
    pub fn new(balance: Money) -> Self {
        InMemoryDepositService {
            balance: Mutex::new(balance),
        }
    }

    /// Changes the balance returned by later calls.
    pub async fn set_balance(&self, balance: Money) {
        *self.balance.lock().await = balance;
    }
}

#[async_trait]
impl DepositService for InMemoryDepositService {
    async fn get_balance(&self) -> ServiceResult<DepositBalance> {
        Ok(DepositBalance {
            balance: self.balance.lock().await.units(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, price: i64) -> ProductCard {
        ProductCard {
            id: id.to_string(),
            name: format!("Product {}", id),
            price: Money::from_units(price),
            shipping_fee: Money::zero(),
            seller_name: None,
            thumbnail_url: None,
        }
    }

    #[tokio::test]
    async fn test_add_fetch_remove() {
        let service = InMemoryCartService::new(vec![product("p-1", 10_000)]);

        assert_eq!(service.add_item("p-1").await.unwrap(), AddItemResult::Added);
        assert_eq!(service.add_item("p-1").await.unwrap(), AddItemResult::AlreadyExists);

        let records = service.fetch_items().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].price, 10_000);

        service.remove_item(&records[0].cart_id).await.unwrap();
        assert_eq!(service.record_count().await, 0);
    }

    #[tokio::test]
    async fn test_unknown_product_and_record() {
        let service = InMemoryCartService::new(Vec::new());

        assert!(matches!(
            service.add_item("nope").await,
            Err(ServiceError::NotFound { .. })
        ));
        assert!(matches!(
            service.remove_item("nope").await,
            Err(ServiceError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_deposit_balance() {
        let service = InMemoryDepositService::new(Money::from_units(100));
        assert_eq!(service.get_balance().await.unwrap().balance, 100);

        service.set_balance(Money::from_units(5)).await;
        assert_eq!(service.get_balance().await.unwrap().balance, 5);
    }
}
