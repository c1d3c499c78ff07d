//! # 활동(Activity) 서비스
//!
//! 광고주가 등록하는 예약형 활동을 관리합니다.
//!
//! - 공개 목록: 예정 + 신고되지 않은 활동만, 예산/날짜/카테고리/태그/평점/검색 필터
//! - 등록/수정/삭제: 승인된 광고주 본인만 (타인 소유는 403)
//! - 평점: 이미 지난 예약이 있는 관광객만
//! - 신고: 관리자, 소유 광고주에게 알림

use std::sync::Arc;

use mongodb::bson::{doc, oid::ObjectId, DateTime, Document};

use super::ensure_owner;
use crate::core::errors::AppError;
use crate::domain::auth::AuthenticatedUser;
use crate::domain::dto::catalog::{ActivityResponse, CreateActivityRequest, RateRequest, UpdateActivityRequest};
use crate::domain::entities::{Activity, Rating, TagKind, WishlistKind};
use crate::domain::models::filters::{sort_activities, ActivityFilter, ActivityQuery};
use crate::domain::models::pagination::Page;
use crate::repositories::base::{bson_value, parse_object_id};
use crate::repositories::catalog::{ActivityRepository, ItineraryRepository};
use crate::repositories::commerce::{BookingRepository, WishlistRepository};
use singleton_macro::service;
use crate::services::catalog::{CategoryService, TagService};
use crate::services::support::NotificationService;
use crate::services::users::UserService;
use crate::utils::string_utils::clean_optional_string;
use crate::utils::time::to_bson;

#[service(name = "activity")]
pub struct ActivityService {
    activity_repo: Arc<ActivityRepository>,
    itinerary_repo: Arc<ItineraryRepository>,
    booking_repo: Arc<BookingRepository>,
    wishlist_repo: Arc<WishlistRepository>,
    user_service: Arc<UserService>,
    tag_service: Arc<TagService>,
    category_service: Arc<CategoryService>,
    notification_service: Arc<NotificationService>,
}

impl ActivityService {
    /// 공개 목록 (필터 → 정렬 → 페이지)
    pub async fn list(&self, query: ActivityQuery) -> Result<Page<ActivityResponse>, AppError> {
        let filter = ActivityFilter::try_from(&query)?;
        let now = DateTime::now();

        let mut activities: Vec<Activity> = self
            .activity_repo
            .find_visible()
            .await?
            .into_iter()
            .filter(|a| filter.matches(a, now))
            .collect();
        sort_activities(&mut activities, query.sort_by, query.order.unwrap_or_default());

        Ok(Page::paginate(activities, query.page, query.limit).map(ActivityResponse::from))
    }

    /// 단건 조회. 신고된 활동은 소유자와 관리자만 볼 수 있습니다.
    pub async fn get(&self, viewer: Option<&AuthenticatedUser>, id: &str) -> Result<ActivityResponse, AppError> {
        let activity = self.find(id).await?;

        if activity.flagged {
            let privileged = match viewer {
                Some(user) => user.is_admin() || user.object_id()? == activity.advertiser,
                None => false,
            };
            if !privileged {
                return Err(AppError::NotFound("활동을 찾을 수 없습니다".to_string()));
            }
        }
        Ok(activity.into())
    }

    pub async fn mine(&self, advertiser: &ObjectId) -> Result<Vec<ActivityResponse>, AppError> {
        let activities = self.activity_repo.find_by_advertiser(advertiser).await?;
        Ok(activities.into_iter().map(ActivityResponse::from).collect())
    }

    pub async fn create(&self, advertiser: &ObjectId, request: CreateActivityRequest) -> Result<ActivityResponse, AppError> {
        self.user_service.require_publisher(advertiser).await?;

        let date = to_bson(request.date);
        if date <= DateTime::now() {
            return Err(AppError::ValidationError("활동 날짜는 미래여야 합니다".to_string()));
        }

        let category = self.category_service.resolve(&request.category).await?;
        let tags = self.tag_service.resolve(&request.tags, TagKind::Preference).await?;

        let now = DateTime::now();
        let activity = Activity {
            id: None,
            name: request.name.trim().to_string(),
            description: clean_optional_string(request.description),
            date,
            location: request.location,
            price: request.price,
            special_discount: request.special_discount,
            category,
            tags,
            booking_open: request.booking_open,
            flagged: false,
            advertiser: *advertiser,
            ratings: Vec::new(),
            created_at: now,
            updated_at: now,
        };

        let created = self.activity_repo.create(activity).await?;
        log::info!("🎟️ 활동 등록: {} (advertiser {})", created.name, advertiser);
        Ok(created.into())
    }

    pub async fn update(
        &self,
        advertiser: &ObjectId,
        id: &str,
        request: UpdateActivityRequest,
    ) -> Result<ActivityResponse, AppError> {
        let activity = self.find(id).await?;
        ensure_owner(&activity.advertiser, advertiser, "활동")?;

        let mut set = Document::new();
        if let Some(name) = clean_optional_string(request.name) {
            set.insert("name", name);
        }
        if let Some(description) = request.description {
            set.insert("description", description.trim());
        }
        if let Some(date) = request.date {
            let date = to_bson(date);
            if date <= DateTime::now() {
                return Err(AppError::ValidationError("활동 날짜는 미래여야 합니다".to_string()));
            }
            set.insert("date", date);
        }
        if let Some(location) = request.location {
            set.insert("location", bson_value(&location)?);
        }
        if let Some(price) = request.price {
            set.insert("price", price);
        }
        if let Some(discount) = request.special_discount {
            set.insert("special_discount", discount);
        }
        if let Some(category) = request.category {
            set.insert("category", self.category_service.resolve(&category).await?);
        }
        if let Some(tags) = request.tags {
            set.insert("tags", self.tag_service.resolve(&tags, TagKind::Preference).await?);
        }
        if let Some(open) = request.booking_open {
            set.insert("booking_open", open);
        }

        let id = activity.id.ok_or_else(|| AppError::InternalError("활동 ID가 없습니다".to_string()))?;
        if set.is_empty() {
            return Ok(activity.into());
        }

        self.activity_repo
            .update(&id, set)
            .await?
            .map(ActivityResponse::from)
            .ok_or_else(|| AppError::NotFound("활동을 찾을 수 없습니다".to_string()))
    }

    pub async fn delete(&self, advertiser: &ObjectId, id: &str) -> Result<(), AppError> {
        let activity = self.find(id).await?;
        ensure_owner(&activity.advertiser, advertiser, "활동")?;

        let id = activity.id.ok_or_else(|| AppError::InternalError("활동 ID가 없습니다".to_string()))?;
        if !self.activity_repo.delete(&id).await? {
            return Err(AppError::NotFound("활동을 찾을 수 없습니다".to_string()));
        }

        self.itinerary_repo.remove_activity(&id).await?;
        self.wishlist_repo.remove_everywhere(WishlistKind::Activity, &id).await?;

        log::info!("🗑️ 활동 삭제: {}", activity.name);
        Ok(())
    }

    /// 평점 등록 (같은 관광객의 기존 평점은 교체)
    pub async fn rate(&self, tourist: &ObjectId, id: &str, request: RateRequest) -> Result<ActivityResponse, AppError> {
        let activity = self.find(id).await?;
        let id = activity.id.ok_or_else(|| AppError::InternalError("활동 ID가 없습니다".to_string()))?;

        if !self.booking_repo.has_attended(tourist, &id, DateTime::now()).await? {
            return Err(AppError::AuthorizationError("참여한 활동만 평가할 수 있습니다".to_string()));
        }

        let rating = Rating {
            tourist: *tourist,
            rating: request.rating,
            comment: clean_optional_string(request.comment),
            created_at: DateTime::now(),
        };

        self.activity_repo
            .upsert_rating(&id, &rating)
            .await?
            .map(ActivityResponse::from)
            .ok_or_else(|| AppError::NotFound("활동을 찾을 수 없습니다".to_string()))
    }

    /// 관리자 신고/해제. 신고 시 광고주에게 알립니다.
    pub async fn set_flag(&self, id: &str, flagged: bool) -> Result<ActivityResponse, AppError> {
        let id = parse_object_id(id)?;
        let updated = self
            .activity_repo
            .update(&id, doc! { "flagged": flagged })
            .await?
            .ok_or_else(|| AppError::NotFound("활동을 찾을 수 없습니다".to_string()))?;

        if flagged {
            self.notification_service
                .notify(
                    updated.advertiser,
                    format!("활동 '{}'이(가) 부적절한 콘텐츠로 신고되어 비공개 처리되었습니다.", updated.name),
                )
                .await;
        }
        log::info!("🚩 활동 신고 상태 변경: {} → {}", updated.name, flagged);
        Ok(updated.into())
    }

    async fn find(&self, id: &str) -> Result<Activity, AppError> {
        let id = parse_object_id(id)?;
        self.activity_repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| AppError::NotFound("활동을 찾을 수 없습니다".to_string()))
    }
}
