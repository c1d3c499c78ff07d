//! 외부 여행 API (Amadeus Self-Service) 설정
//!
//! ```bash
//! export AMADEUS_CLIENT_ID="your-client-id"
//! export AMADEUS_CLIENT_SECRET="your-client-secret"
//! export AMADEUS_BASE_URL="https://test.api.amadeus.com"
//! ```

use std::env;

use crate::core::errors::AppError;

pub struct TravelApiConfig;

impl TravelApiConfig {
    pub fn client_id() -> Result<String, AppError> {
        env::var("AMADEUS_CLIENT_ID")
            .map_err(|_| AppError::ExternalServiceError("AMADEUS_CLIENT_ID가 설정되지 않았습니다".to_string()))
    }

    pub fn client_secret() -> Result<String, AppError> {
        env::var("AMADEUS_CLIENT_SECRET")
            .map_err(|_| AppError::ExternalServiceError("AMADEUS_CLIENT_SECRET가 설정되지 않았습니다".to_string()))
    }

    /// API 기본 URL (끝의 `/` 제거)
    pub fn base_url() -> String {
        env::var("AMADEUS_BASE_URL")
            .unwrap_or_else(|_| "https://test.api.amadeus.com".to_string())
            .trim_end_matches('/')
            .to_string()
    }

    /// 외부 호출 타임아웃 (초)
    pub fn timeout_secs() -> u64 {
        env::var("AMADEUS_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(15)
    }
}
