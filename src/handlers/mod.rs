//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 처리하는 핸들러 함수들입니다. 핸들러는 요청을 추출/검증한 뒤
//! 서비스 싱글톤에 위임하고, 서비스 결과를 JSON 응답으로 변환합니다.
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//!   Handlers (이 모듈) - HTTP 엔드포인트 처리      ← Web Layer
//! ├─────────────────────────────────────────────┤
//!   Services - 비즈니스 로직                      ← Service Layer
//! ├─────────────────────────────────────────────┤
//!   Repositories - 데이터 접근                    ← Repository Layer
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## 공통 규칙
//!
//! - 요청 DTO는 `payload.validate()?`로 검증하고 실패는 400으로 응답합니다.
//! - 인증 주체는 [`AuthenticatedUser`](crate::domain::auth::AuthenticatedUser) 추출자로 받습니다.
//!   스코프 미들웨어가 인증을 담당하고, 세부 역할 검사는 `require_any`로 핸들러에서 수행합니다.
//! - 모든 에러는 [`AppError`]로 반환되어 `{ error, message }` JSON이 됩니다.

pub mod auth;
pub mod profile;
pub mod admin;
pub mod tags;
pub mod activities;
pub mod itineraries;
pub mod places;
pub mod products;
pub mod transportation;
pub mod bookings;
pub mod orders;
pub mod wallet;
pub mod wishlist;
pub mod revenue;
pub mod support;
pub mod travel;

use actix_multipart::Multipart;

use crate::config::UploadConfig;
use crate::core::errors::AppError;
use crate::utils::multipart::{collect_form, FormLimits, MultipartForm};

/// 업로드 크기 한도를 적용해 multipart 본문을 읽습니다.
pub(crate) async fn read_form(payload: Multipart) -> Result<MultipartForm, AppError> {
    collect_form(payload, FormLimits::for_uploads(UploadConfig::max_file_bytes())).await
}
