use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use crate::domain::entities::common::Rating;

/// 판매자(또는 관리자)가 등록하는 기념품 상품
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    #[serde(default)]
    pub picture: Option<String>,
    pub description: String,
    pub price: f64,
    /// 남은 재고
    pub quantity: i64,
    /// 누적 판매 수량
    #[serde(default)]
    pub sales: i64,
    pub seller: ObjectId,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub ratings: Vec<Rating>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}
