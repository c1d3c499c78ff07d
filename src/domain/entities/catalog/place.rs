use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use crate::domain::entities::common::GeoLocation;

/// 방문객 유형별 입장료
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TicketPrices {
    pub native: f64,
    pub foreigner: f64,
    pub student: f64,
}

/// 관광청 담당자가 관리하는 유적지/박물관
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoricalPlace {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub pictures: Vec<String>,
    pub location: GeoLocation,
    pub opening_hours: String,
    pub ticket_prices: TicketPrices,
    /// 유적지 태그 (historical 종류)
    #[serde(default)]
    pub tags: Vec<ObjectId>,
    pub governor: ObjectId,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}
