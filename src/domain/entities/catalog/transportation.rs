use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 광고주가 제공하는 교통편
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transportation {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub advertiser: ObjectId,
    /// bus, car, boat, train ...
    pub vehicle_type: String,
    pub origin: String,
    pub destination: String,
    pub departure: DateTime,
    pub price: f64,
    pub capacity: i32,
    /// 예약된 좌석 수 (`capacity` 이하)
    #[serde(default)]
    pub booked_seats: i32,
    pub booking_open: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Transportation {
    pub fn seats_left(&self) -> i32 {
        (self.capacity - self.booked_seats).max(0)
    }
}
