use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::Transportation;
use crate::utils::time::to_utc;

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTransportationRequest {
    #[validate(length(min = 1, max = 40, message = "차량 종류를 입력해주세요"))]
    pub vehicle_type: String,
    #[validate(length(min = 1, message = "출발지를 입력해주세요"))]
    pub origin: String,
    #[validate(length(min = 1, message = "도착지를 입력해주세요"))]
    pub destination: String,
    pub departure: DateTime<Utc>,
    #[validate(range(min = 0.0, message = "가격은 0 이상이어야 합니다"))]
    pub price: f64,
    #[validate(range(min = 1, max = 1000, message = "좌석 수는 1-1000 사이여야 합니다"))]
    pub capacity: i32,
    #[serde(default = "default_true")]
    pub booking_open: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateTransportationRequest {
    pub vehicle_type: Option<String>,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub departure: Option<DateTime<Utc>>,
    #[validate(range(min = 0.0, message = "가격은 0 이상이어야 합니다"))]
    pub price: Option<f64>,
    #[validate(range(min = 1, max = 1000, message = "좌석 수는 1-1000 사이여야 합니다"))]
    pub capacity: Option<i32>,
    pub booking_open: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportationResponse {
    pub id: String,
    pub advertiser: String,
    pub vehicle_type: String,
    pub origin: String,
    pub destination: String,
    pub departure: DateTime<Utc>,
    pub price: f64,
    pub capacity: i32,
    pub seats_left: i32,
    pub booking_open: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Transportation> for TransportationResponse {
    fn from(t: Transportation) -> Self {
        Self {
            id: t.id.map(|id| id.to_hex()).unwrap_or_default(),
            seats_left: t.seats_left(),
            advertiser: t.advertiser.to_hex(),
            vehicle_type: t.vehicle_type,
            origin: t.origin,
            destination: t.destination,
            departure: to_utc(t.departure),
            price: t.price,
            capacity: t.capacity,
            booking_open: t.booking_open,
            created_at: to_utc(t.created_at),
        }
    }
}
