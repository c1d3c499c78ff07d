//! 카탈로그 DTO 공통 타입

use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::Rating;
use crate::utils::time::to_utc;

/// 평점 등록 요청
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RateRequest {
    #[validate(range(min = 1, max = 5, message = "평점은 1-5 사이여야 합니다"))]
    pub rating: i32,

    #[validate(length(max = 500, message = "후기는 500자 이하여야 합니다"))]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingView {
    pub tourist: String,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Rating> for RatingView {
    fn from(r: Rating) -> Self {
        Self {
            tourist: r.tourist.to_hex(),
            rating: r.rating,
            comment: r.comment,
            created_at: to_utc(r.created_at),
        }
    }
}

/// 보관/해제 토글 요청
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveRequest {
    pub archived: bool,
}

/// 표시 요청 (관리자)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlagRequest {
    pub flagged: bool,
}

pub fn ids_to_hex(ids: Vec<ObjectId>) -> Vec<String> {
    ids.into_iter().map(|id| id.to_hex()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_range() {
        let ok = RateRequest { rating: 5, comment: Some("Great guide".to_string()) };
        let zero = RateRequest { rating: 0, comment: None };
        let six = RateRequest { rating: 6, comment: None };

        assert!(ok.validate().is_ok());
        assert!(zero.validate().is_err());
        assert!(six.validate().is_err());
    }
}
