//! JWT 토큰 관리 서비스 구현
//!
//! HS256 서명 액세스 토큰의 발급과 검증을 담당합니다.
//! 토큰에는 사용자 ID, 역할, 사용자명이 담기며 프론트엔드는 이 역할 문자열로 화면을 분기합니다.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};

use crate::config::JwtConfig;
use crate::core::errors::{AppError, ErrorContext};
use crate::domain::entities::users::User;
use crate::domain::token::TokenClaims;
use singleton_macro::service;

/// JWT 토큰 관리 서비스
#[service(name = "token")]
pub struct TokenService {
    // 외부 의존성 없음
}

impl TokenService {
    /// 사용자를 위한 JWT 액세스 토큰 생성
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 토큰 생성 실패 또는 사용자 ID 없음
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let token_service = TokenService::instance();
    /// let access_token = token_service.generate_token(&user)?;
    /// ```
    pub fn generate_token(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now();
        let expiration = now + Duration::hours(JwtConfig::expiration_hours());

        let claims = TokenClaims {
            sub: user
                .id_string()
                .ok_or_else(|| AppError::InternalError("사용자 ID가 없습니다".to_string()))?,
            role: user.role,
            username: user.username.clone(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        };

        let secret = JwtConfig::secret();
        let encoding_key = EncodingKey::from_secret(secret.as_ref());

        encode(&Header::default(), &claims, &encoding_key).context("JWT 토큰 생성 실패")
    }

    /// 토큰 만료까지 남은 초
    pub fn expires_in(&self) -> i64 {
        JwtConfig::expiration_hours() * 3600
    }

    /// JWT 토큰 검증 및 클레임 추출
    ///
    /// 만료, 서명 불일치, 형식 오류는 모두 `AuthenticationError`(401)입니다.
    pub fn verify_token(&self, token: &str) -> Result<TokenClaims, AppError> {
        let secret = JwtConfig::secret();
        let decoding_key = DecodingKey::from_secret(secret.as_ref());

        decode::<TokenClaims>(token, &decoding_key, &Validation::default())
            .map(|token_data| token_data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AppError::AuthenticationError("토큰이 만료되었습니다".to_string()),
                _ => {
                    log::debug!("토큰 검증 실패: {}", e);
                    AppError::AuthenticationError("유효하지 않은 토큰입니다".to_string())
                }
            })
    }

    /// `Authorization: Bearer <token>` 헤더에서 토큰 부분 추출
    pub fn extract_bearer_token<'a>(&self, auth_header: &'a str) -> Result<&'a str, AppError> {
        match auth_header.strip_prefix("Bearer ") {
            Some(token) if !token.trim().is_empty() => Ok(token.trim()),
            _ => Err(AppError::AuthenticationError("유효하지 않은 인증 헤더 형식입니다".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::users::{Role, RoleProfile};
    use mongodb::bson::oid::ObjectId;

    fn seller() -> User {
        let mut user = User::new(
            "nile_crafts".to_string(),
            "shop@example.com".to_string(),
            "hash".to_string(),
            Role::Seller,
            RoleProfile::Seller(Default::default()),
        );
        user.id = Some(ObjectId::new());
        user
    }

    #[test]
    fn test_generate_and_verify_round_trip() {
        let service = TokenService {};
        let user = seller();

        let token = service.generate_token(&user).unwrap();
        let claims = service.verify_token(&token).unwrap();

        assert_eq!(claims.sub, user.id_string().unwrap());
        assert_eq!(claims.role, Role::Seller);
        assert_eq!(claims.username, "nile_crafts");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_user_without_id_cannot_get_token() {
        let service = TokenService {};
        let mut user = seller();
        user.id = None;

        assert!(matches!(service.generate_token(&user), Err(AppError::InternalError(_))));
    }

    #[test]
    fn test_tampered_token_is_rejected() {
        let service = TokenService {};
        let token = service.generate_token(&seller()).unwrap();
        let tampered = format!("{}x", token);

        assert!(matches!(service.verify_token(&tampered), Err(AppError::AuthenticationError(_))));
        assert!(service.verify_token("not-a-jwt").is_err());
    }

    #[test]
    fn test_extract_bearer_token() {
        let service = TokenService {};

        assert_eq!(service.extract_bearer_token("Bearer abc.def").unwrap(), "abc.def");
        assert!(service.extract_bearer_token("Basic abc").is_err());
        assert!(service.extract_bearer_token("Bearer ").is_err());
    }
}
