use serde::{Deserialize, Serialize};

use crate::domain::dto::catalog::{ActivityResponse, ItineraryResponse, ProductResponse};

/// 참조가 채워진 위시리스트
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WishlistResponse {
    pub products: Vec<ProductResponse>,
    pub activities: Vec<ActivityResponse>,
    pub itineraries: Vec<ItineraryResponse>,
}
