//! 카탈로그 서비스 모듈
//!
//! 활동, 일정, 역사적 장소, 태그/카테고리, 상품, 교통편의 비즈니스 로직입니다.
//! 소유권 위반은 403, 존재하지 않는 대상은 404로 응답합니다.

use mongodb::bson::oid::ObjectId;

use crate::core::errors::AppError;
use crate::domain::auth::AuthenticatedUser;

pub mod tag_service;
pub mod category_service;
pub mod activity_service;
pub mod itinerary_service;
pub mod place_service;
pub mod product_service;
pub mod transportation_service;

pub use tag_service::TagService;
pub use category_service::CategoryService;
pub use activity_service::ActivityService;
pub use itinerary_service::ItineraryService;
pub use place_service::PlaceService;
pub use product_service::ProductService;
pub use transportation_service::TransportationService;

/// 소유자 본인인지 확인 (아니면 403)
pub(crate) fn ensure_owner(owner: &ObjectId, actor: &ObjectId, resource: &str) -> Result<(), AppError> {
    if owner != actor {
        log::warn!("소유권 위반: {} {} (actor {})", resource, owner, actor);
        return Err(AppError::AuthorizationError(format!("본인이 등록한 {}만 관리할 수 있습니다", resource)));
    }
    Ok(())
}

/// 소유자 또는 관리자인지 확인
pub(crate) fn ensure_owner_or_admin(owner: &ObjectId, user: &AuthenticatedUser, resource: &str) -> Result<(), AppError> {
    if user.is_admin() {
        return Ok(());
    }
    ensure_owner(owner, &user.object_id()?, resource)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::users::Role;

    #[test]
    fn test_foreign_owner_is_forbidden() {
        let owner = ObjectId::new();

        assert!(ensure_owner(&owner, &owner, "활동").is_ok());
        assert!(matches!(
            ensure_owner(&owner, &ObjectId::new(), "활동"),
            Err(AppError::AuthorizationError(_))
        ));
    }

    #[test]
    fn test_admin_bypasses_ownership() {
        let owner = ObjectId::new();
        let admin = AuthenticatedUser { user_id: ObjectId::new().to_hex(), role: Role::Admin, username: "root".to_string() };
        let seller = AuthenticatedUser { user_id: ObjectId::new().to_hex(), role: Role::Seller, username: "other".to_string() };

        assert!(ensure_owner_or_admin(&owner, &admin, "상품").is_ok());
        assert!(ensure_owner_or_admin(&owner, &seller, "상품").is_err());
    }
}
