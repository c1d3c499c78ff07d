use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use crate::domain::entities::common::Rating;

/// 투어 가이드가 구성하는 일정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Itinerary {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    #[serde(default)]
    pub activities: Vec<ObjectId>,
    #[serde(default)]
    pub locations: Vec<String>,
    /// 시간대별 진행 순서
    #[serde(default)]
    pub timeline: Vec<String>,
    pub duration_days: i32,
    pub language: String,
    pub price: f64,
    #[serde(default)]
    pub available_dates: Vec<DateTime>,
    #[serde(default)]
    pub accessibility: Option<String>,
    pub pickup_location: String,
    pub dropoff_location: String,
    #[serde(default)]
    pub tags: Vec<ObjectId>,
    pub booking_open: bool,
    /// 비활성 일정은 신규 예약 불가 (기존 예약은 유지)
    pub active: bool,
    #[serde(default)]
    pub flagged: bool,
    pub tour_guide: ObjectId,
    #[serde(default)]
    pub ratings: Vec<Rating>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Itinerary {
    /// 주어진 시점 이후의 가장 이른 진행일
    pub fn next_date_after(&self, now: DateTime) -> Option<DateTime> {
        self.available_dates.iter().copied().filter(|d| *d > now).min()
    }

    pub fn is_bookable(&self, now: DateTime) -> bool {
        self.booking_open && self.active && !self.flagged && self.next_date_after(now).is_some()
    }
}
