//! 외부 여행 API 프록시 DTO
//!
//! 검색 결과는 외부 응답을 가공하지 않고 그대로 전달합니다.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::entities::PaymentMethod;

fn validate_iata_code(code: &str) -> Result<(), ValidationError> {
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ValidationError::new("invalid_iata").with_message("3자리 IATA 코드를 입력해주세요".into()));
    }
    Ok(())
}

/// offer ID는 경로 세그먼트로 쓰이므로 영숫자만 허용
fn validate_offer_id(offer_id: &str) -> Result<(), ValidationError> {
    if offer_id.is_empty() || !offer_id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ValidationError::new("invalid_offer_id").with_message("유효한 offer_id가 필요합니다".into()));
    }
    Ok(())
}

fn default_adults() -> u32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_stay_dates"))]
pub struct HotelSearchQuery {
    #[validate(custom(function = "validate_iata_code"))]
    pub city_code: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    #[serde(default = "default_adults")]
    #[validate(range(min = 1, max = 9, message = "인원은 1-9명이어야 합니다"))]
    pub adults: u32,
}

fn validate_stay_dates(query: &HotelSearchQuery) -> Result<(), ValidationError> {
    if query.check_out <= query.check_in {
        return Err(ValidationError::new("invalid_dates").with_message("체크아웃은 체크인 이후여야 합니다".into()));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FlightSearchQuery {
    #[validate(custom(function = "validate_iata_code"))]
    pub origin: String,
    #[validate(custom(function = "validate_iata_code"))]
    pub destination: String,
    pub departure_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    #[serde(default = "default_adults")]
    #[validate(range(min = 1, max = 9, message = "인원은 1-9명이어야 합니다"))]
    pub adults: u32,
}

/// 예약자 정보
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TravelerInfo {
    #[validate(length(min = 1, message = "이름을 입력해주세요"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "성을 입력해주세요"))]
    pub last_name: String,
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,
    #[validate(length(min = 5, message = "전화번호를 입력해주세요"))]
    pub phone: String,
    pub date_of_birth: Option<NaiveDate>,
}

/// 호텔 예약 요청
///
/// 결제 금액은 받지 않습니다. 예약 직전에 offer를 다시 조회한 가격으로 결제합니다.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct HotelBookingRequest {
    /// 검색 결과의 offer ID
    #[validate(custom(function = "validate_offer_id"))]
    pub offer_id: String,
    /// offer 응답에 호텔 이름이 없을 때만 사용
    pub hotel_name: String,
    pub check_in: NaiveDate,
    pub payment_method: PaymentMethod,
    #[validate(nested)]
    pub guest: TravelerInfo,
}

/// 항공 예약 요청
///
/// 결제 금액은 `flight_offer`를 가격 확인 API로 재조회한 `grandTotal`입니다.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FlightBookingRequest {
    /// 검색 결과의 flight offer 원문
    pub flight_offer: serde_json::Value,
    pub departure_date: NaiveDate,
    pub payment_method: PaymentMethod,
    #[validate(nested)]
    pub traveler: TravelerInfo,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hotel_query_checks_dates_and_code() {
        let query: HotelSearchQuery = serde_json::from_value(serde_json::json!({
            "city_code": "CAI",
            "check_in": "2026-11-10",
            "check_out": "2026-11-12"
        }))
        .unwrap();
        assert_eq!(query.adults, 1);
        assert!(query.validate().is_ok());

        let reversed = HotelSearchQuery { check_out: query.check_in, ..query.clone() };
        assert!(reversed.validate().is_err());

        let bad_code = HotelSearchQuery { city_code: "CAIRO".to_string(), ..query };
        assert!(bad_code.validate().is_err());
    }

    #[test]
    fn test_booking_requests_ignore_client_amount() {
        let request: HotelBookingRequest = serde_json::from_value(serde_json::json!({
            "offer_id": "OFFER1",
            "hotel_name": "Nile Ritz",
            "check_in": "2026-11-10",
            "amount": 0.01,
            "payment_method": "wallet",
            "guest": {
                "first_name": "Mona",
                "last_name": "Adel",
                "email": "mona@example.com",
                "phone": "201001234567"
            }
        }))
        .unwrap();

        let echoed = serde_json::to_value(&request).unwrap();
        assert!(echoed.get("amount").is_none());
        assert!(request.validate().is_ok());

        let traversal = HotelBookingRequest { offer_id: "../../v1/x".to_string(), ..request };
        assert!(traversal.validate().is_err());
    }
}
