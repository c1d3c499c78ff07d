use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use crate::domain::entities::common::PaymentMethod;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Placed,
    Cancelled,
}

/// 주문 항목 (주문 시점 가격으로 고정)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub product: ObjectId,
    pub name: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub seller: ObjectId,
}

impl OrderItem {
    pub fn subtotal(&self) -> f64 {
        self.unit_price * self.quantity as f64
    }
}

/// 상품 주문
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub tourist: ObjectId,
    pub items: Vec<OrderItem>,
    pub total: f64,
    pub payment_method: PaymentMethod,
    pub status: OrderStatus,
    #[serde(default)]
    pub delivery_address: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}
