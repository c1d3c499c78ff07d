use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use crate::domain::entities::common::{GeoLocation, Rating};

/// 광고주가 등록하는 액티비티
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// 진행 일시
    pub date: DateTime,
    pub location: GeoLocation,
    pub price: f64,
    /// 특별 할인율 (%)
    #[serde(default)]
    pub special_discount: f64,
    pub category: ObjectId,
    #[serde(default)]
    pub tags: Vec<ObjectId>,
    pub booking_open: bool,
    /// 관리자에 의해 부적절 콘텐츠로 표시됨
    #[serde(default)]
    pub flagged: bool,
    pub advertiser: ObjectId,
    #[serde(default)]
    pub ratings: Vec<Rating>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Activity {
    /// 지금 예약 가능한지 여부
    pub fn is_bookable(&self, now: DateTime) -> bool {
        self.booking_open && !self.flagged && self.date > now
    }
}
