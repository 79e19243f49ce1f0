//! # Backend DTOs
//!
//! Wire shapes returned by the backend API, and their conversion into core
//! types. Conversion happens once, here, so downstream code only ever sees
//! [`ProductCard`], [`LineItem`] and [`Coupon`].
//!
//! ## Field Mapping
//! ```text
//! CartRecord.cartId       ──► LineItem.cart_id
//! CartRecord.productUuid  ──► LineItem.product_id
//! CartRecord.price        ──► LineItem.unit_price
//! CartRecord.deliveryFee  ──► LineItem.shipping_fee
//!
//! ProductDto.productUuid  ──► ProductCard.id
//! ProductDto.imageUrls[0] ──► ProductCard.thumbnail_url
//!
//! CouponRecord.minPrice   ──► Coupon.minimum_order_amount
//! CouponRecord.salePrice  ──► Coupon.discount_amount
//! ```

use bazaar_core::{Coupon, LineItem, Money, ProductCard};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ServiceError;

/// Result of adding a product to the server cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AddItemResult {
    Added,
    AlreadyExists,
}

/// A server-side cart record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartRecord {
    pub cart_id: String,
    pub product_uuid: String,
    pub product_name: String,
    pub price: i64,
    #[serde(default)]
    pub delivery_fee: i64,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
}

impl TryFrom<CartRecord> for LineItem {
    type Error = ServiceError;

    fn try_from(record: CartRecord) -> Result<Self, Self::Error> {
        let item = LineItem::new(
            record.product_uuid,
            record.product_name,
            Money::from_units(record.price),
            Money::from_units(record.delivery_fee),
        )
        .map_err(|e| ServiceError::InvalidResponse(format!("cart record {}: {}", record.cart_id, e)))?;

        Ok(item.with_cart_id(record.cart_id))
    }
}

/// A product listing as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub product_uuid: String,
    pub title: String,
    pub price: i64,
    #[serde(default)]
    pub delivery_fee: i64,
    #[serde(default)]
    pub shop_name: Option<String>,
    #[serde(default)]
    pub image_urls: Vec<String>,
}

impl From<ProductDto> for ProductCard {
    fn from(dto: ProductDto) -> Self {
        ProductCard {
            id: dto.product_uuid,
            name: dto.title,
            price: Money::from_units(dto.price),
            shipping_fee: Money::from_units(dto.delivery_fee),
            seller_name: dto.shop_name,
            thumbnail_url: dto.image_urls.into_iter().next(),
        }
    }
}

/// A coupon owned by the buyer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponRecord {
    pub coupon_id: String,
    pub coupon_name: String,
    pub min_price: i64,
    pub sale_price: i64,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<CouponRecord> for Coupon {
    fn from(record: CouponRecord) -> Self {
        Coupon {
            id: record.coupon_id,
            name: record.coupon_name,
            minimum_order_amount: Money::from_units(record.min_price.max(0)),
            discount_amount: Money::from_units(record.sale_price.max(0)),
            expires_at: record.expires_at,
        }
    }
}

/// Deposit balance response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositBalance {
    pub balance: i64,
}

impl DepositBalance {
    /// Balance as Money, floored at zero.
    pub fn amount(&self) -> Money {
        Money::from_units(self.balance.max(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_record_deserializes_and_converts() {
        let json = r#"{
            "cartId": "c-1",
            "productUuid": "p-1",
            "productName": "Film camera",
            "price": 50000,
            "deliveryFee": 3000
        }"#;
        let record: CartRecord = serde_json::from_str(json).unwrap();
        let item = LineItem::try_from(record).unwrap();

        assert_eq!(item.product_id, "p-1");
        assert_eq!(item.cart_id.as_deref(), Some("c-1"));
        assert_eq!(item.unit_price.units(), 50_000);
        assert_eq!(item.shipping_fee.units(), 3_000);
        assert!(item.selected);
    }

    #[test]
    fn test_cart_record_with_negative_price_is_rejected() {
        let record = CartRecord {
            cart_id: "c-1".to_string(),
            product_uuid: "p-1".to_string(),
            product_name: "broken".to_string(),
            price: -10,
            delivery_fee: 0,
            thumbnail_url: None,
        };

        let err = LineItem::try_from(record).unwrap_err();
        assert!(matches!(err, ServiceError::InvalidResponse(_)));
    }

    #[test]
    fn test_product_dto_normalizes_to_card() {
        let dto = ProductDto {
            product_uuid: "p-9".to_string(),
            title: "Bike".to_string(),
            price: 120_000,
            delivery_fee: 0,
            shop_name: Some("cycle-shop".to_string()),
            image_urls: vec!["a.jpg".to_string(), "b.jpg".to_string()],
        };

        let card = ProductCard::from(dto);

        assert_eq!(card.id, "p-9");
        assert_eq!(card.thumbnail_url.as_deref(), Some("a.jpg"));
        assert_eq!(card.price.units(), 120_000);
    }

    #[test]
    fn test_coupon_record_converts() {
        let json = r#"{"couponId":"w","couponName":"Welcome","minPrice":40000,"salePrice":5000}"#;
        let record: CouponRecord = serde_json::from_str(json).unwrap();
        let coupon = Coupon::from(record);

        assert_eq!(coupon.minimum_order_amount.units(), 40_000);
        assert_eq!(coupon.discount_amount.units(), 5_000);
        assert!(coupon.expires_at.is_none());
    }

    #[test]
    fn test_deposit_balance_floors_at_zero() {
        assert_eq!(DepositBalance { balance: -5 }.amount(), Money::zero());
        assert_eq!(DepositBalance { balance: 7_000 }.amount().units(), 7_000);
    }
}
