use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::common::RatingView;
use crate::domain::entities::{average_rating, Product};
use crate::utils::time::to_utc;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, max = 120, message = "상품 이름은 1-120자여야 합니다"))]
    pub name: String,
    pub picture: Option<String>,
    #[validate(length(min = 1, max = 2000, message = "상품 설명을 입력해주세요"))]
    pub description: String,
    #[validate(range(min = 0.0, message = "가격은 0 이상이어야 합니다"))]
    pub price: f64,
    #[validate(range(min = 0, message = "재고는 0 이상이어야 합니다"))]
    pub quantity: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, max = 120, message = "상품 이름은 1-120자여야 합니다"))]
    pub name: Option<String>,
    pub picture: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0.0, message = "가격은 0 이상이어야 합니다"))]
    pub price: Option<f64>,
    #[validate(range(min = 0, message = "재고는 0 이상이어야 합니다"))]
    pub quantity: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    pub picture: Option<String>,
    pub description: String,
    pub price: f64,
    pub quantity: i64,
    pub sales: i64,
    pub seller: String,
    pub archived: bool,
    pub average_rating: f64,
    pub ratings: Vec<RatingView>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(p: Product) -> Self {
        Self {
            id: p.id.map(|id| id.to_hex()).unwrap_or_default(),
            average_rating: average_rating(&p.ratings),
            name: p.name,
            picture: p.picture,
            description: p.description,
            price: p.price,
            quantity: p.quantity,
            sales: p.sales,
            seller: p.seller.to_hex(),
            archived: p.archived,
            ratings: p.ratings.into_iter().map(RatingView::from).collect(),
            created_at: to_utc(p.created_at),
            updated_at: to_utc(p.updated_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_quantity_rejected() {
        let req = CreateProductRequest {
            name: "Alabaster vase".to_string(),
            picture: None,
            description: "Hand carved".to_string(),
            price: 25.0,
            quantity: -1,
        };
        assert!(req.validate().is_err());
    }
}
