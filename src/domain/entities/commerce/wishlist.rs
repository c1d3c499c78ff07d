use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 위시리스트 항목 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WishlistKind {
    Product,
    Activity,
    Itinerary,
}

impl WishlistKind {
    /// `/api/wishlist/{kind}/{id}` 경로 세그먼트 해석 (단수/복수 모두 허용)
    pub fn from_path_segment(segment: &str) -> Option<Self> {
        match segment {
            "product" | "products" => Some(WishlistKind::Product),
            "activity" | "activities" => Some(WishlistKind::Activity),
            "itinerary" | "itineraries" => Some(WishlistKind::Itinerary),
            _ => None,
        }
    }

    /// 문서 내 배열 필드명
    pub fn field(&self) -> &'static str {
        match self {
            WishlistKind::Product => "products",
            WishlistKind::Activity => "activities",
            WishlistKind::Itinerary => "itineraries",
        }
    }
}

/// 관광객당 하나의 위시리스트
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wishlist {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub tourist: ObjectId,
    #[serde(default)]
    pub products: Vec<ObjectId>,
    #[serde(default)]
    pub activities: Vec<ObjectId>,
    #[serde(default)]
    pub itineraries: Vec<ObjectId>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_path_segment() {
        assert_eq!(WishlistKind::from_path_segment("products"), Some(WishlistKind::Product));
        assert_eq!(WishlistKind::from_path_segment("activity"), Some(WishlistKind::Activity));
        assert_eq!(WishlistKind::from_path_segment("itineraries"), Some(WishlistKind::Itinerary));
        assert_eq!(WishlistKind::from_path_segment("places"), None);
    }
}
