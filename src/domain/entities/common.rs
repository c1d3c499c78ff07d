//! 여러 엔티티가 공유하는 내장 값 객체

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 관광객이 남긴 평점 (1-5)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rating {
    pub tourist: ObjectId,
    pub rating: i32,
    #[serde(default)]
    pub comment: Option<String>,
    pub created_at: DateTime,
}

/// 주소와 선택적 좌표
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub address: String,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
}

/// 결제 수단
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Wallet,
    Card,
}

/// 평균 평점 (조회 시 계산, 저장하지 않음)
///
/// 평점이 없으면 0.0, 소수점 둘째 자리에서 반올림합니다.
pub fn average_rating(ratings: &[Rating]) -> f64 {
    if ratings.is_empty() {
        return 0.0;
    }
    let sum: i64 = ratings.iter().map(|r| r.rating as i64).sum();
    let avg = sum as f64 / ratings.len() as f64;
    (avg * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rating(value: i32) -> Rating {
        Rating {
            tourist: ObjectId::new(),
            rating: value,
            comment: None,
            created_at: DateTime::now(),
        }
    }

    #[test]
    fn test_average_rating_empty_is_zero() {
        assert_eq!(average_rating(&[]), 0.0);
    }

    #[test]
    fn test_average_rating_rounds() {
        let ratings = vec![rating(5), rating(4), rating(4)];
        assert_eq!(average_rating(&ratings), 4.33);
    }
}
