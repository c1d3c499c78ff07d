use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::{Order, OrderStatus, PaymentMethod};
use crate::utils::time::to_utc;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OrderLineRequest {
    pub product: String,
    #[validate(range(min = 1, max = 100, message = "수량은 1-100 사이여야 합니다"))]
    pub quantity: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateOrderRequest {
    #[validate(length(min = 1, message = "주문할 상품이 없습니다"))]
    #[validate(nested)]
    pub items: Vec<OrderLineRequest>,
    pub payment_method: PaymentMethod,
    pub delivery_address: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemView {
    pub product: String,
    pub name: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub subtotal: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderResponse {
    pub id: String,
    pub items: Vec<OrderItemView>,
    pub total: f64,
    pub payment_method: PaymentMethod,
    pub status: OrderStatus,
    pub delivery_address: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Order> for OrderResponse {
    fn from(o: Order) -> Self {
        Self {
            id: o.id.map(|id| id.to_hex()).unwrap_or_default(),
            items: o
                .items
                .into_iter()
                .map(|item| OrderItemView {
                    subtotal: item.subtotal(),
                    product: item.product.to_hex(),
                    name: item.name,
                    quantity: item.quantity,
                    unit_price: item.unit_price,
                })
                .collect(),
            total: o.total,
            payment_method: o.payment_method,
            status: o.status,
            delivery_address: o.delivery_address,
            created_at: to_utc(o.created_at),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderReceipt {
    pub order: OrderResponse,
    pub points_earned: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_order_rejected() {
        let req = CreateOrderRequest { items: vec![], payment_method: PaymentMethod::Card, delivery_address: None };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_nested_quantity_validated() {
        let req = CreateOrderRequest {
            items: vec![OrderLineRequest { product: "65f1c0c2a1b2c3d4e5f60718".to_string(), quantity: 0 }],
            payment_method: PaymentMethod::Wallet,
            delivery_address: None,
        };
        assert!(req.validate().is_err());
    }
}
