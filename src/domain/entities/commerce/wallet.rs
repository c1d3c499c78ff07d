use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 관광객 지갑 및 로열티 포인트
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wallet {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub owner: ObjectId,
    pub balance: f64,
    /// 사용 가능한 포인트
    pub loyalty_points: i64,
    /// 누적 적립 포인트 (레벨 산정 기준, 차감되지 않음)
    pub lifetime_points: i64,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Wallet {
    pub fn new(owner: ObjectId) -> Self {
        let now = DateTime::now();
        Self {
            id: None,
            owner,
            balance: 0.0,
            loyalty_points: 0,
            lifetime_points: 0,
            created_at: now,
            updated_at: now,
        }
    }
}
