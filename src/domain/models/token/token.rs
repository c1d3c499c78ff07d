//! JWT 인증 토큰 클레임
//!
//! RFC 7519 표준 클레임에 역할과 사용자명을 더한 최소 정보만 담습니다.
use serde::{Deserialize, Serialize};

use crate::domain::entities::users::Role;

/// JWT 토큰의 클레임(Payload) 구조체
///
/// - `sub`: 토큰의 주체 (사용자 ID)
/// - `role`: 사용자 역할
/// - `username`: 사용자명 (프론트엔드 표시용)
/// - `iat` / `exp`: 발급 / 만료 시간 (Unix timestamp)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub role: Role,
    pub username: String,
    pub iat: i64,
    pub exp: i64,
}
