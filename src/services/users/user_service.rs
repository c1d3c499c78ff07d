//! # 사용자 계정 서비스
//!
//! 로그인, 내 정보 조회, 비밀번호 변경과 역할별 프로필 관리를 담당합니다.
//!
//! ## 로그인 흐름
//!
//! ```text
//! identifier(사용자명 또는 이메일) → UserRepository::find_by_identifier
//!      → bcrypt 검증 → 거절 계정 차단 → TokenService::generate_token
//! ```
//!
//! 로그인 실패 사유(계정 없음/비밀번호 불일치)는 같은 메시지로 응답합니다.
//!
//! ## 프로필 수정
//!
//! 요청의 필드 중 현재 역할의 프로필에 존재하는 필드만 `$set`으로 반영합니다.
//! 광고주/가이드/판매자는 승인(`accepted`)과 약관 동의가 끝나야 콘텐츠를 게시할 수 있으며,
//! 카탈로그 서비스는 [`UserService::require_publisher`]로 이를 확인합니다.

use std::sync::Arc;

use mongodb::bson::{doc, oid::ObjectId, Document};

use crate::core::errors::AppError;
use crate::domain::dto::users::{ChangePasswordRequest, LoginRequest, LoginResponse, UpdateProfileRequest, UserResponse};
use crate::domain::entities::users::{Role, RoleProfile, User};
use crate::repositories::users::UserRepository;
use singleton_macro::service;
use crate::services::auth::password::{hash_password, verify_password};
use crate::services::auth::TokenService;
use crate::services::uploads::{UploadKind, UploadService};
use crate::utils::multipart::UploadedFile;
use crate::utils::string_utils::clean_optional_string;

/// 프로필 이미지 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileImage {
    /// 관광객, 투어 가이드
    Picture,
    /// 광고주, 판매자
    Logo,
}

impl ProfileImage {
    /// 역할별 저장 필드. 해당 역할에 없는 이미지면 `None`.
    fn field_for(&self, role: Role) -> Option<&'static str> {
        match (self, role) {
            (ProfileImage::Picture, Role::Tourist | Role::TourGuide) => Some("profile.profile_picture"),
            (ProfileImage::Logo, Role::Advertiser | Role::Seller) => Some("profile.logo"),
            _ => None,
        }
    }
}

/// 사용자 계정 서비스
#[service(name = "user")]
pub struct UserService {
    user_repo: Arc<UserRepository>,
    token_service: Arc<TokenService>,
    upload_service: Arc<UploadService>,
}

impl UserService {
    /// 사용자명 또는 이메일과 비밀번호로 로그인
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - 계정이 없거나 비밀번호 불일치
    /// * `AppError::AuthorizationError` - 관리자가 거절한 계정
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AppError> {
        let user = self
            .user_repo
            .find_by_identifier(&request.identifier)
            .await?
            .ok_or_else(|| AppError::AuthenticationError("잘못된 사용자명 또는 비밀번호입니다".to_string()))?;

        if !verify_password(&request.password, &user.password_hash)? {
            log::warn!("로그인 실패: {}", request.identifier);
            return Err(AppError::AuthenticationError("잘못된 사용자명 또는 비밀번호입니다".to_string()));
        }

        if !user.can_log_in() {
            return Err(AppError::AuthorizationError("승인이 거절된 계정입니다".to_string()));
        }

        let token = self.token_service.generate_token(&user)?;
        log::info!("🔑 로그인: {} ({})", user.username, user.role);

        Ok(LoginResponse {
            token,
            token_type: "Bearer".to_string(),
            expires_in: self.token_service.expires_in(),
            role: user.role,
            user: user.into(),
        })
    }

    pub async fn me(&self, user_id: &ObjectId) -> Result<UserResponse, AppError> {
        Ok(self.find_user(user_id).await?.into())
    }

    /// 현재 비밀번호 확인 후 변경
    pub async fn change_password(&self, user_id: &ObjectId, request: ChangePasswordRequest) -> Result<(), AppError> {
        let user = self.find_user(user_id).await?;

        if !verify_password(&request.old_password, &user.password_hash)? {
            return Err(AppError::ValidationError("현재 비밀번호가 일치하지 않습니다".to_string()));
        }
        if request.old_password == request.new_password {
            return Err(AppError::ValidationError("새 비밀번호가 현재 비밀번호와 같습니다".to_string()));
        }

        let password_hash = hash_password(&request.new_password)?;
        self.user_repo.update(user_id, doc! { "password_hash": password_hash }).await?;

        log::info!("비밀번호 변경: {}", user.username);
        Ok(())
    }

    /// 역할별 편집 가능 필드 수정
    pub async fn update_profile(&self, user_id: &ObjectId, request: UpdateProfileRequest) -> Result<UserResponse, AppError> {
        let user = self.find_user(user_id).await?;

        if let Some(email) = clean_optional_string(request.email.clone()) {
            let email = email.to_lowercase();
            if email != user.email && self.user_repo.find_by_email(&email).await?.is_some() {
                return Err(AppError::ValidationError("이미 사용 중인 이메일입니다".to_string()));
            }
        }

        let set = profile_update_document(&user.profile, request);
        if set.is_empty() {
            return Ok(user.into());
        }

        self.user_repo
            .update(user_id, set)
            .await?
            .map(UserResponse::from)
            .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다".to_string()))
    }

    /// 이용 약관 동의
    pub async fn accept_terms(&self, user_id: &ObjectId) -> Result<UserResponse, AppError> {
        self.user_repo
            .update(user_id, doc! { "terms_accepted": true })
            .await?
            .map(UserResponse::from)
            .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다".to_string()))
    }

    /// 프로필 사진/로고 교체
    pub async fn update_profile_image(
        &self,
        user_id: &ObjectId,
        image: ProfileImage,
        file: UploadedFile,
    ) -> Result<UserResponse, AppError> {
        let user = self.find_user(user_id).await?;
        let field = image
            .field_for(user.role)
            .ok_or_else(|| AppError::AuthorizationError("이 역할은 해당 이미지를 등록할 수 없습니다".to_string()))?;

        let url = self.upload_service.store(user.role, file, UploadKind::Image).await?;
        let updated = self
            .user_repo
            .update(user_id, doc! { field: url.as_str() })
            .await?
            .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다".to_string()))?;

        if let Some(previous) = current_image(&user.profile, image) {
            self.upload_service.remove(&previous).await;
        }

        Ok(updated.into())
    }

    /// 콘텐츠 게시 자격 확인
    ///
    /// 승인 대상 역할은 `accepted` + 약관 동의 상태여야 합니다.
    pub async fn require_publisher(&self, user_id: &ObjectId) -> Result<User, AppError> {
        let user = self.find_user(user_id).await?;
        if !user.can_publish() {
            return Err(AppError::AuthorizationError(
                "관리자 승인과 약관 동의 후에 게시할 수 있습니다".to_string(),
            ));
        }
        Ok(user)
    }

    pub async fn find_user(&self, user_id: &ObjectId) -> Result<User, AppError> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다".to_string()))
    }
}

fn current_image(profile: &RoleProfile, image: ProfileImage) -> Option<String> {
    match (profile, image) {
        (RoleProfile::Tourist(p), ProfileImage::Picture) => p.profile_picture.clone(),
        (RoleProfile::TourGuide(p), ProfileImage::Picture) => p.profile_picture.clone(),
        (RoleProfile::Advertiser(p), ProfileImage::Logo) => p.logo.clone(),
        (RoleProfile::Seller(p), ProfileImage::Logo) => p.logo.clone(),
        _ => None,
    }
}

/// 현재 프로필 종류에 맞는 필드만 골라 `$set` 문서를 만듭니다.
fn profile_update_document(profile: &RoleProfile, request: UpdateProfileRequest) -> Document {
    let mut set = Document::new();

    if let Some(email) = clean_optional_string(request.email) {
        set.insert("email", email.to_lowercase());
    }

    if let (RoleProfile::TourGuide(_), Some(years)) = (profile, request.years_of_experience) {
        set.insert("profile.years_of_experience", years);
    }

    let mut put = |key: &str, value: Option<String>| {
        if let Some(value) = clean_optional_string(value) {
            set.insert(format!("profile.{}", key), value);
        }
    };

    match profile {
        RoleProfile::Tourist(_) => {
            put("mobile_number", request.mobile_number);
            put("nationality", request.nationality);
            put("occupation", request.occupation);
        }
        RoleProfile::TourGuide(_) => {
            put("mobile_number", request.mobile_number);
            put("previous_work", request.previous_work);
        }
        RoleProfile::Advertiser(_) => {
            put("website", request.website);
            put("hotline", request.hotline);
            put("company_profile", request.company_profile);
        }
        RoleProfile::Seller(_) => {
            put("name", request.name);
            put("description", request.description);
        }
        RoleProfile::Staff => {}
    }

    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::users::{SellerProfile, TourGuideProfile};

    #[test]
    fn test_profile_update_keeps_only_role_fields() {
        let request = UpdateProfileRequest {
            email: Some("New@Shop.example".to_string()),
            name: Some("Nile Crafts".to_string()),
            nationality: Some("Egyptian".to_string()),
            ..Default::default()
        };

        let set = profile_update_document(&RoleProfile::Seller(SellerProfile::default()), request);

        assert_eq!(set.get_str("email").unwrap(), "new@shop.example");
        assert_eq!(set.get_str("profile.name").unwrap(), "Nile Crafts");
        assert!(!set.contains_key("profile.nationality"));
    }

    #[test]
    fn test_tour_guide_experience_and_blank_fields() {
        let request = UpdateProfileRequest {
            years_of_experience: Some(7),
            previous_work: Some("   ".to_string()),
            ..Default::default()
        };

        let set = profile_update_document(&RoleProfile::TourGuide(TourGuideProfile::default()), request);

        assert_eq!(set.get_i32("profile.years_of_experience").unwrap(), 7);
        assert!(!set.contains_key("profile.previous_work"));
    }

    #[test]
    fn test_image_field_depends_on_role() {
        assert_eq!(ProfileImage::Picture.field_for(Role::Tourist), Some("profile.profile_picture"));
        assert_eq!(ProfileImage::Logo.field_for(Role::Seller), Some("profile.logo"));
        assert_eq!(ProfileImage::Logo.field_for(Role::Tourist), None);
        assert_eq!(ProfileImage::Picture.field_for(Role::Admin), None);
    }
}
