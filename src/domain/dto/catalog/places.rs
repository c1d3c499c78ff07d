use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::common::ids_to_hex;
use crate::domain::entities::{GeoLocation, HistoricalPlace, TicketPrices};
use crate::utils::time::to_utc;

fn validate_ticket_prices(prices: &TicketPrices) -> Result<(), ValidationError> {
    if prices.native < 0.0 || prices.foreigner < 0.0 || prices.student < 0.0 {
        return Err(ValidationError::new("negative_price").with_message("입장료는 0 이상이어야 합니다".into()));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePlaceRequest {
    #[validate(length(min = 1, max = 120, message = "장소 이름은 1-120자여야 합니다"))]
    pub name: String,
    #[validate(length(min = 1, message = "설명을 입력해주세요"))]
    pub description: String,
    #[serde(default)]
    pub pictures: Vec<String>,
    pub location: GeoLocation,
    #[validate(length(min = 1, message = "운영 시간을 입력해주세요"))]
    pub opening_hours: String,
    #[validate(custom(function = "validate_ticket_prices"))]
    pub ticket_prices: TicketPrices,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdatePlaceRequest {
    #[validate(length(min = 1, max = 120, message = "장소 이름은 1-120자여야 합니다"))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub pictures: Option<Vec<String>>,
    pub location: Option<GeoLocation>,
    pub opening_hours: Option<String>,
    #[validate(custom(function = "validate_ticket_prices"))]
    pub ticket_prices: Option<TicketPrices>,
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaceQuery {
    pub tag: Option<String>,
    pub search: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub pictures: Vec<String>,
    pub location: GeoLocation,
    pub opening_hours: String,
    pub ticket_prices: TicketPrices,
    pub tags: Vec<String>,
    pub governor: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<HistoricalPlace> for PlaceResponse {
    fn from(p: HistoricalPlace) -> Self {
        Self {
            id: p.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: p.name,
            description: p.description,
            pictures: p.pictures,
            location: p.location,
            opening_hours: p.opening_hours,
            ticket_prices: p.ticket_prices,
            tags: ids_to_hex(p.tags),
            governor: p.governor.to_hex(),
            created_at: to_utc(p.created_at),
            updated_at: to_utc(p.updated_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_ticket_price_rejected() {
        let req = CreatePlaceRequest {
            name: "Egyptian Museum".to_string(),
            description: "Antiquities".to_string(),
            pictures: vec![],
            location: GeoLocation { address: "Tahrir Square".to_string(), lat: None, lng: None },
            opening_hours: "09:00-17:00".to_string(),
            ticket_prices: TicketPrices { native: 30.0, foreigner: -1.0, student: 10.0 },
            tags: vec![],
        };
        assert!(req.validate().is_err());
    }
}
