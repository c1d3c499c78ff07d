//! # 관리자 계정 관리 서비스
//!
//! 가입 승인/거절, 계정 삭제, 내부 계정(관광청 담당자/관리자) 생성을 담당합니다.
//!
//! 계정 삭제 시 함께 정리되는 데이터:
//!
//! | 역할 | 정리 대상 |
//! |---|---|
//! | 관광객 | 지갑, 위시리스트, 알림 |
//! | 광고주 | 활동, 교통편, 알림 |
//! | 투어 가이드 | 일정, 알림 |
//! | 판매자 | 상품, 알림 |
//!
//! 예약/주문 기록은 매출 집계를 위해 남겨 둡니다.

use std::sync::Arc;

use mongodb::bson::oid::ObjectId;

use crate::core::errors::AppError;
use crate::domain::dto::users::{CreateAccountRequest, UserListQuery, UserResponse};
use crate::domain::entities::users::{AccountStatus, Role, RoleProfile, User};
use crate::domain::models::pagination::Page;
use crate::repositories::base::parse_object_id;
use crate::repositories::catalog::{
    ActivityRepository, ItineraryRepository, ProductRepository, TransportationRepository,
};
use crate::repositories::commerce::{WalletRepository, WishlistRepository};
use crate::repositories::support::NotificationRepository;
use crate::repositories::users::UserRepository;
use singleton_macro::service;
use crate::services::auth::password::hash_password;
use crate::services::support::NotificationService;

#[service(name = "admin")]
pub struct AdminService {
    user_repo: Arc<UserRepository>,
    wallet_repo: Arc<WalletRepository>,
    wishlist_repo: Arc<WishlistRepository>,
    activity_repo: Arc<ActivityRepository>,
    itinerary_repo: Arc<ItineraryRepository>,
    product_repo: Arc<ProductRepository>,
    transportation_repo: Arc<TransportationRepository>,
    notification_repo: Arc<NotificationRepository>,
    notification_service: Arc<NotificationService>,
}

impl AdminService {
    /// 역할/상태 조건 사용자 목록 (페이지네이션)
    pub async fn list_users(&self, query: UserListQuery) -> Result<Page<UserResponse>, AppError> {
        let users = self.user_repo.list(query.role, query.status).await?;
        Ok(Page::paginate(users, query.page, query.limit).map(UserResponse::from))
    }

    /// 가입 승인/거절
    pub async fn update_status(&self, id: &str, status: AccountStatus) -> Result<UserResponse, AppError> {
        let id = parse_object_id(id)?;
        let user = self.find_user(&id).await?;

        if !user.role.requires_approval() {
            return Err(AppError::ValidationError("승인 대상 역할이 아닙니다".to_string()));
        }

        let updated = self
            .user_repo
            .update_status(&id, status)
            .await?
            .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다".to_string()))?;

        let message = match status {
            AccountStatus::Accepted => "계정이 승인되었습니다. 약관에 동의하면 게시를 시작할 수 있습니다.",
            AccountStatus::Rejected => "계정 가입이 거절되었습니다.",
            AccountStatus::Pending => "계정이 승인 대기 상태로 변경되었습니다.",
        };
        self.notification_service.notify(id, message).await;

        log::info!("👤 계정 상태 변경: {} → {:?}", updated.username, status);
        Ok(updated.into())
    }

    /// 계정 삭제와 소유 데이터 정리
    ///
    /// # Errors
    ///
    /// * `AppError::NotFound` - 존재하지 않는 사용자
    /// * `AppError::ValidationError` - 잘못된 ID 형식, 자기 자신 삭제
    pub async fn delete_user(&self, actor: &ObjectId, id: &str) -> Result<(), AppError> {
        let id = parse_object_id(id)?;
        if &id == actor {
            return Err(AppError::ValidationError("자기 자신은 삭제할 수 없습니다".to_string()));
        }

        let user = self.find_user(&id).await?;
        if !self.user_repo.delete(&id).await? {
            return Err(AppError::NotFound("사용자를 찾을 수 없습니다".to_string()));
        }

        match user.role {
            Role::Tourist => {
                self.wallet_repo.delete_by_owner(&id).await?;
                self.wishlist_repo.delete_by_tourist(&id).await?;
            }
            Role::Advertiser => {
                let activities = self.activity_repo.delete_by_advertiser(&id).await?;
                let transportations = self.transportation_repo.delete_by_advertiser(&id).await?;
                log::info!("광고주 데이터 정리: 활동 {}건, 교통편 {}건", activities, transportations);
            }
            Role::TourGuide => {
                let itineraries = self.itinerary_repo.delete_by_tour_guide(&id).await?;
                log::info!("가이드 데이터 정리: 일정 {}건", itineraries);
            }
            Role::Seller => {
                let products = self.product_repo.delete_by_seller(&id).await?;
                log::info!("판매자 데이터 정리: 상품 {}건", products);
            }
            Role::TourismGovernor | Role::Admin => {}
        }
        self.notification_repo.delete_by_recipient(&id).await?;

        log::info!("🗑️ 계정 삭제: {} ({})", user.username, user.role);
        Ok(())
    }

    /// 관광청 담당자 또는 관리자 계정 생성
    pub async fn create_account(&self, request: CreateAccountRequest) -> Result<UserResponse, AppError> {
        if self
            .user_repo
            .exists_username_or_email(&request.username, &request.email)
            .await?
        {
            return Err(AppError::ValidationError("이미 사용 중인 사용자명 또는 이메일입니다".to_string()));
        }

        let user = User::new(
            request.username.trim().to_string(),
            request.email.trim().to_string(),
            hash_password(&request.password)?,
            request.role,
            RoleProfile::Staff,
        );

        let created = self.user_repo.create(user).await?;
        log::info!("👤 내부 계정 생성: {} ({})", created.username, created.role);
        Ok(created.into())
    }

    async fn find_user(&self, id: &ObjectId) -> Result<User, AppError> {
        self.user_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다".to_string()))
    }
}
