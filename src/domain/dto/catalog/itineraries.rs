use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::common::{ids_to_hex, RatingView};
use crate::domain::entities::{average_rating, Itinerary};
use crate::utils::time::to_utc;

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateItineraryRequest {
    #[validate(length(min = 1, max = 120, message = "일정 이름은 1-120자여야 합니다"))]
    pub name: String,
    #[serde(default)]
    pub activities: Vec<String>,
    #[serde(default)]
    pub locations: Vec<String>,
    #[serde(default)]
    pub timeline: Vec<String>,
    #[validate(range(min = 1, max = 60, message = "기간은 1-60일이어야 합니다"))]
    pub duration_days: i32,
    #[validate(length(min = 2, max = 40, message = "진행 언어를 입력해주세요"))]
    pub language: String,
    #[validate(range(min = 0.0, message = "가격은 0 이상이어야 합니다"))]
    pub price: f64,
    #[validate(length(min = 1, message = "진행 가능한 날짜가 최소 하나 필요합니다"))]
    pub available_dates: Vec<DateTime<Utc>>,
    pub accessibility: Option<String>,
    #[validate(length(min = 1, message = "픽업 장소를 입력해주세요"))]
    pub pickup_location: String,
    #[validate(length(min = 1, message = "하차 장소를 입력해주세요"))]
    pub dropoff_location: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "default_true")]
    pub booking_open: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateItineraryRequest {
    #[validate(length(min = 1, max = 120, message = "일정 이름은 1-120자여야 합니다"))]
    pub name: Option<String>,
    pub activities: Option<Vec<String>>,
    pub locations: Option<Vec<String>>,
    pub timeline: Option<Vec<String>>,
    #[validate(range(min = 1, max = 60, message = "기간은 1-60일이어야 합니다"))]
    pub duration_days: Option<i32>,
    pub language: Option<String>,
    #[validate(range(min = 0.0, message = "가격은 0 이상이어야 합니다"))]
    pub price: Option<f64>,
    pub available_dates: Option<Vec<DateTime<Utc>>>,
    pub accessibility: Option<String>,
    pub pickup_location: Option<String>,
    pub dropoff_location: Option<String>,
    pub tags: Option<Vec<String>>,
    pub booking_open: Option<bool>,
}

/// 활성/비활성 전환 요청
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivationRequest {
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItineraryResponse {
    pub id: String,
    pub name: String,
    pub activities: Vec<String>,
    pub locations: Vec<String>,
    pub timeline: Vec<String>,
    pub duration_days: i32,
    pub language: String,
    pub price: f64,
    pub available_dates: Vec<DateTime<Utc>>,
    pub accessibility: Option<String>,
    pub pickup_location: String,
    pub dropoff_location: String,
    pub tags: Vec<String>,
    pub booking_open: bool,
    pub active: bool,
    pub flagged: bool,
    pub tour_guide: String,
    pub average_rating: f64,
    pub ratings: Vec<RatingView>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Itinerary> for ItineraryResponse {
    fn from(i: Itinerary) -> Self {
        Self {
            id: i.id.map(|id| id.to_hex()).unwrap_or_default(),
            average_rating: average_rating(&i.ratings),
            name: i.name,
            activities: ids_to_hex(i.activities),
            locations: i.locations,
            timeline: i.timeline,
            duration_days: i.duration_days,
            language: i.language,
            price: i.price,
            available_dates: i.available_dates.into_iter().map(to_utc).collect(),
            accessibility: i.accessibility,
            pickup_location: i.pickup_location,
            dropoff_location: i.dropoff_location,
            tags: ids_to_hex(i.tags),
            booking_open: i.booking_open,
            active: i.active,
            flagged: i.flagged,
            tour_guide: i.tour_guide.to_hex(),
            ratings: i.ratings.into_iter().map(RatingView::from).collect(),
            created_at: to_utc(i.created_at),
            updated_at: to_utc(i.updated_at),
        }
    }
}
