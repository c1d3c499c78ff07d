use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::common::{ids_to_hex, RatingView};
use crate::domain::entities::{average_rating, Activity, GeoLocation};
use crate::domain::models::pricing::discounted_price;
use crate::utils::time::to_utc;

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateActivityRequest {
    #[validate(length(min = 1, max = 120, message = "액티비티 이름은 1-120자여야 합니다"))]
    pub name: String,
    pub description: Option<String>,
    pub date: DateTime<Utc>,
    pub location: GeoLocation,
    #[validate(range(min = 0.0, message = "가격은 0 이상이어야 합니다"))]
    pub price: f64,
    #[serde(default)]
    #[validate(range(min = 0.0, max = 100.0, message = "할인율은 0-100 사이여야 합니다"))]
    pub special_discount: f64,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "default_true")]
    pub booking_open: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateActivityRequest {
    #[validate(length(min = 1, max = 120, message = "액티비티 이름은 1-120자여야 합니다"))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub location: Option<GeoLocation>,
    #[validate(range(min = 0.0, message = "가격은 0 이상이어야 합니다"))]
    pub price: Option<f64>,
    #[validate(range(min = 0.0, max = 100.0, message = "할인율은 0-100 사이여야 합니다"))]
    pub special_discount: Option<f64>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub booking_open: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub date: DateTime<Utc>,
    pub location: GeoLocation,
    pub price: f64,
    pub special_discount: f64,
    /// 할인 적용 가격
    pub effective_price: f64,
    pub category: String,
    pub tags: Vec<String>,
    pub booking_open: bool,
    pub flagged: bool,
    pub advertiser: String,
    pub average_rating: f64,
    pub ratings: Vec<RatingView>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Activity> for ActivityResponse {
    fn from(a: Activity) -> Self {
        Self {
            id: a.id.map(|id| id.to_hex()).unwrap_or_default(),
            average_rating: average_rating(&a.ratings),
            effective_price: discounted_price(a.price, a.special_discount),
            name: a.name,
            description: a.description,
            date: to_utc(a.date),
            location: a.location,
            price: a.price,
            special_discount: a.special_discount,
            category: a.category.to_hex(),
            tags: ids_to_hex(a.tags),
            booking_open: a.booking_open,
            flagged: a.flagged,
            advertiser: a.advertiser.to_hex(),
            ratings: a.ratings.into_iter().map(RatingView::from).collect(),
            created_at: to_utc(a.created_at),
            updated_at: to_utc(a.updated_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discount_above_hundred_rejected() {
        let req: CreateActivityRequest = serde_json::from_value(serde_json::json!({
            "name": "Sound and light show",
            "date": "2026-12-01T19:00:00Z",
            "location": { "address": "Giza Plateau" },
            "price": 40.0,
            "special_discount": 120.0,
            "category": "65f1c0c2a1b2c3d4e5f60718"
        }))
        .unwrap();

        assert!(req.booking_open);
        assert!(req.validate().is_err());
    }
}
