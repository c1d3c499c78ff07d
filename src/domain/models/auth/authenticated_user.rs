use std::future::{ready, Ready};

use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::core::errors::AppError;
use crate::domain::entities::users::Role;

/// JWT 토큰에서 추출된 사용자 정보
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// 사용자 고유 ID
    pub user_id: String,

    /// 사용자 역할
    pub role: Role,

    pub username: String,
}

impl AuthenticatedUser {
    /// 특정 역할인지 확인
    pub fn has_role(&self, role: Role) -> bool {
        self.role == role
    }

    /// 여러 역할 중 하나인지 확인
    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        roles.contains(&self.role)
    }

    /// 관리자 권한을 보유하고 있는지 확인
    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }

    /// 허용된 역할이 아니면 403
    pub fn require_any(&self, roles: &[Role]) -> Result<(), AppError> {
        if self.has_any_role(roles) {
            Ok(())
        } else {
            log::warn!("권한 부족: 사용자 {} ({}), 필요 권한: {:?}", self.user_id, self.role, roles);
            Err(AppError::AuthorizationError("접근 권한이 부족합니다".to_string()))
        }
    }

    /// 사용자 ID를 ObjectId로 변환
    pub fn object_id(&self) -> Result<ObjectId, AppError> {
        ObjectId::parse_str(&self.user_id)
            .map_err(|_| AppError::AuthenticationError("유효하지 않은 토큰 주체입니다".to_string()))
    }
}

/// ActixWeb FromRequest trait 구현
///
/// 미들웨어가 요청 확장에 저장한 사용자를 꺼냅니다. 없으면 401.
impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(AppError::AuthenticationError(
                "유효한 인증 토큰이 필요합니다".to_string(),
            )
            .into())),
        }
    }
}

/// 선택적 인증 사용자 추출자
#[derive(Debug, Clone)]
pub struct OptionalUser(pub Option<AuthenticatedUser>);

impl FromRequest for OptionalUser {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let user = req.extensions().get::<AuthenticatedUser>().cloned();
        ready(Ok(OptionalUser(user)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guide() -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: ObjectId::new().to_hex(),
            role: Role::TourGuide,
            username: "guide01".to_string(),
        }
    }

    #[test]
    fn test_require_any() {
        let user = guide();

        assert!(user.require_any(&[Role::TourGuide, Role::Admin]).is_ok());
        assert!(matches!(
            user.require_any(&[Role::Seller]),
            Err(AppError::AuthorizationError(_))
        ));
        assert!(!user.is_admin());
    }

    #[test]
    fn test_object_id_parses() {
        let user = guide();
        assert_eq!(user.object_id().unwrap().to_hex(), user.user_id);

        let broken = AuthenticatedUser { user_id: "nope".to_string(), ..guide() };
        assert!(broken.object_id().is_err());
    }
}
