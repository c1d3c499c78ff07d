//! # 일정(Itinerary) 서비스
//!
//! 투어 가이드가 구성하는 여러 날짜의 가이드 투어를 관리합니다.
//! 확정 예약이 있는 일정은 삭제할 수 없고 비활성화만 가능합니다.
//! 비활성 일정은 공개 목록에서 빠지지만 기존 예약은 유지됩니다.

use std::sync::Arc;

use mongodb::bson::{doc, oid::ObjectId, DateTime, Document};

use super::ensure_owner;
use crate::core::errors::AppError;
use crate::domain::auth::AuthenticatedUser;
use crate::domain::dto::catalog::{CreateItineraryRequest, ItineraryResponse, RateRequest, UpdateItineraryRequest};
use crate::domain::entities::{Itinerary, Rating, TagKind, WishlistKind};
use crate::domain::models::filters::{sort_itineraries, ItineraryFilter, ItineraryQuery};
use crate::domain::models::pagination::Page;
use crate::repositories::base::parse_object_id;
use crate::repositories::catalog::{ActivityRepository, ItineraryRepository};
use crate::repositories::commerce::{BookingRepository, WishlistRepository};
use singleton_macro::service;
use crate::services::catalog::TagService;
use crate::services::support::NotificationService;
use crate::services::users::UserService;
use crate::utils::string_utils::clean_optional_string;
use crate::utils::time::to_bson;

/// 공백 항목 제거
fn clean_list(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}

/// 진행일 정렬 + 중복 제거
fn normalize_dates(dates: Vec<chrono::DateTime<chrono::Utc>>) -> Vec<DateTime> {
    let mut dates: Vec<DateTime> = dates.into_iter().map(to_bson).collect();
    dates.sort();
    dates.dedup();
    dates
}

#[service(name = "itinerary")]
pub struct ItineraryService {
    itinerary_repo: Arc<ItineraryRepository>,
    activity_repo: Arc<ActivityRepository>,
    booking_repo: Arc<BookingRepository>,
    wishlist_repo: Arc<WishlistRepository>,
    user_service: Arc<UserService>,
    tag_service: Arc<TagService>,
    notification_service: Arc<NotificationService>,
}

impl ItineraryService {
    pub async fn list(&self, query: ItineraryQuery) -> Result<Page<ItineraryResponse>, AppError> {
        let filter = ItineraryFilter::try_from(&query)?;
        let now = DateTime::now();

        let mut itineraries: Vec<Itinerary> = self
            .itinerary_repo
            .find_visible()
            .await?
            .into_iter()
            .filter(|i| filter.matches(i, now))
            .collect();
        sort_itineraries(&mut itineraries, query.sort_by, query.order.unwrap_or_default(), now);

        Ok(Page::paginate(itineraries, query.page, query.limit).map(ItineraryResponse::from))
    }

    /// 단건 조회. 비활성/신고 일정은 소유 가이드와 관리자만 볼 수 있습니다.
    pub async fn get(&self, viewer: Option<&AuthenticatedUser>, id: &str) -> Result<ItineraryResponse, AppError> {
        let itinerary = self.find(id).await?;

        if itinerary.flagged || !itinerary.active {
            let privileged = match viewer {
                Some(user) => user.is_admin() || user.object_id()? == itinerary.tour_guide,
                None => false,
            };
            if !privileged {
                return Err(AppError::NotFound("일정을 찾을 수 없습니다".to_string()));
            }
        }
        Ok(itinerary.into())
    }

    pub async fn mine(&self, tour_guide: &ObjectId) -> Result<Vec<ItineraryResponse>, AppError> {
        let itineraries = self.itinerary_repo.find_by_tour_guide(tour_guide).await?;
        Ok(itineraries.into_iter().map(ItineraryResponse::from).collect())
    }

    pub async fn create(&self, tour_guide: &ObjectId, request: CreateItineraryRequest) -> Result<ItineraryResponse, AppError> {
        self.user_service.require_publisher(tour_guide).await?;

        let activities = self.resolve_activities(&request.activities).await?;
        let tags = self.tag_service.resolve(&request.tags, TagKind::Preference).await?;

        let now = DateTime::now();
        let itinerary = Itinerary {
            id: None,
            name: request.name.trim().to_string(),
            activities,
            locations: clean_list(request.locations),
            timeline: clean_list(request.timeline),
            duration_days: request.duration_days,
            language: request.language.trim().to_string(),
            price: request.price,
            available_dates: normalize_dates(request.available_dates),
            accessibility: clean_optional_string(request.accessibility),
            pickup_location: request.pickup_location.trim().to_string(),
            dropoff_location: request.dropoff_location.trim().to_string(),
            tags,
            booking_open: request.booking_open,
            active: true,
            flagged: false,
            tour_guide: *tour_guide,
            ratings: Vec::new(),
            created_at: now,
            updated_at: now,
        };

        let created = self.itinerary_repo.create(itinerary).await?;
        log::info!("🗺️ 일정 등록: {} (guide {})", created.name, tour_guide);
        Ok(created.into())
    }

    pub async fn update(
        &self,
        tour_guide: &ObjectId,
        id: &str,
        request: UpdateItineraryRequest,
    ) -> Result<ItineraryResponse, AppError> {
        let itinerary = self.find(id).await?;
        ensure_owner(&itinerary.tour_guide, tour_guide, "일정")?;

        let mut set = Document::new();
        if let Some(name) = clean_optional_string(request.name) {
            set.insert("name", name);
        }
        if let Some(activities) = request.activities {
            set.insert("activities", self.resolve_activities(&activities).await?);
        }
        if let Some(locations) = request.locations {
            set.insert("locations", clean_list(locations));
        }
        if let Some(timeline) = request.timeline {
            set.insert("timeline", clean_list(timeline));
        }
        if let Some(days) = request.duration_days {
            set.insert("duration_days", days);
        }
        if let Some(language) = clean_optional_string(request.language) {
            set.insert("language", language);
        }
        if let Some(price) = request.price {
            set.insert("price", price);
        }
        if let Some(dates) = request.available_dates {
            if dates.is_empty() {
                return Err(AppError::ValidationError("진행 가능한 날짜가 최소 하나 필요합니다".to_string()));
            }
            set.insert("available_dates", normalize_dates(dates));
        }
        if let Some(accessibility) = request.accessibility {
            set.insert("accessibility", accessibility.trim());
        }
        if let Some(pickup) = clean_optional_string(request.pickup_location) {
            set.insert("pickup_location", pickup);
        }
        if let Some(dropoff) = clean_optional_string(request.dropoff_location) {
            set.insert("dropoff_location", dropoff);
        }
        if let Some(tags) = request.tags {
            set.insert("tags", self.tag_service.resolve(&tags, TagKind::Preference).await?);
        }
        if let Some(open) = request.booking_open {
            set.insert("booking_open", open);
        }

        let id = itinerary.id.ok_or_else(|| AppError::InternalError("일정 ID가 없습니다".to_string()))?;
        if set.is_empty() {
            return Ok(itinerary.into());
        }

        self.itinerary_repo
            .update(&id, set)
            .await?
            .map(ItineraryResponse::from)
            .ok_or_else(|| AppError::NotFound("일정을 찾을 수 없습니다".to_string()))
    }

    /// 활성화/비활성화
    pub async fn set_active(&self, tour_guide: &ObjectId, id: &str, active: bool) -> Result<ItineraryResponse, AppError> {
        let itinerary = self.find(id).await?;
        ensure_owner(&itinerary.tour_guide, tour_guide, "일정")?;

        let id = itinerary.id.ok_or_else(|| AppError::InternalError("일정 ID가 없습니다".to_string()))?;
        let updated = self
            .itinerary_repo
            .update(&id, doc! { "active": active })
            .await?
            .ok_or_else(|| AppError::NotFound("일정을 찾을 수 없습니다".to_string()))?;

        log::info!("일정 활성 상태 변경: {} → {}", updated.name, active);
        Ok(updated.into())
    }

    /// 삭제. 확정 예약이 있으면 409.
    pub async fn delete(&self, tour_guide: &ObjectId, id: &str) -> Result<(), AppError> {
        let itinerary = self.find(id).await?;
        ensure_owner(&itinerary.tour_guide, tour_guide, "일정")?;

        let id = itinerary.id.ok_or_else(|| AppError::InternalError("일정 ID가 없습니다".to_string()))?;
        let booked = self.booking_repo.count_confirmed_for_item(&id).await?;
        if booked > 0 {
            return Err(AppError::ConflictError(format!(
                "예약이 {}건 있는 일정은 삭제할 수 없습니다. 비활성화를 사용하세요",
                booked
            )));
        }

        if !self.itinerary_repo.delete(&id).await? {
            return Err(AppError::NotFound("일정을 찾을 수 없습니다".to_string()));
        }
        self.wishlist_repo.remove_everywhere(WishlistKind::Itinerary, &id).await?;

        log::info!("🗑️ 일정 삭제: {}", itinerary.name);
        Ok(())
    }

    pub async fn rate(&self, tourist: &ObjectId, id: &str, request: RateRequest) -> Result<ItineraryResponse, AppError> {
        let itinerary = self.find(id).await?;
        let id = itinerary.id.ok_or_else(|| AppError::InternalError("일정 ID가 없습니다".to_string()))?;

        if !self.booking_repo.has_attended(tourist, &id, DateTime::now()).await? {
            return Err(AppError::AuthorizationError("참여한 일정만 평가할 수 있습니다".to_string()));
        }

        let rating = Rating {
            tourist: *tourist,
            rating: request.rating,
            comment: clean_optional_string(request.comment),
            created_at: DateTime::now(),
        };

        self.itinerary_repo
            .upsert_rating(&id, &rating)
            .await?
            .map(ItineraryResponse::from)
            .ok_or_else(|| AppError::NotFound("일정을 찾을 수 없습니다".to_string()))
    }

    /// 관리자 신고/해제. 신고 시 가이드에게 알립니다.
    pub async fn set_flag(&self, id: &str, flagged: bool) -> Result<ItineraryResponse, AppError> {
        let id = parse_object_id(id)?;
        let updated = self
            .itinerary_repo
            .update(&id, doc! { "flagged": flagged })
            .await?
            .ok_or_else(|| AppError::NotFound("일정을 찾을 수 없습니다".to_string()))?;

        if flagged {
            self.notification_service
                .notify(
                    updated.tour_guide,
                    format!("일정 '{}'이(가) 부적절한 콘텐츠로 신고되어 비공개 처리되었습니다.", updated.name),
                )
                .await;
        }
        log::info!("🚩 일정 신고 상태 변경: {} → {}", updated.name, flagged);
        Ok(updated.into())
    }

    /// 일정에 포함할 활동 ID 검증
    async fn resolve_activities(&self, ids: &[String]) -> Result<Vec<ObjectId>, AppError> {
        let mut parsed: Vec<ObjectId> = Vec::with_capacity(ids.len());
        for id in ids {
            let id = parse_object_id(id)?;
            if !parsed.contains(&id) {
                parsed.push(id);
            }
        }
        if parsed.is_empty() {
            return Ok(parsed);
        }

        let found = self.activity_repo.find_by_ids(&parsed).await?;
        if found.len() != parsed.len() {
            return Err(AppError::ValidationError("존재하지 않는 활동이 포함되어 있습니다".to_string()));
        }
        Ok(parsed)
    }

    async fn find(&self, id: &str) -> Result<Itinerary, AppError> {
        let id = parse_object_id(id)?;
        self.itinerary_repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| AppError::NotFound("일정을 찾을 수 없습니다".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_dates_are_sorted_and_deduplicated() {
        let a = Utc.with_ymd_and_hms(2026, 12, 5, 8, 0, 0).unwrap();
        let b = Utc.with_ymd_and_hms(2026, 11, 20, 8, 0, 0).unwrap();

        let dates = normalize_dates(vec![a, b, a]);

        assert_eq!(dates, vec![to_bson(b), to_bson(a)]);
    }

    #[test]
    fn test_clean_list_drops_blank_entries() {
        let cleaned = clean_list(vec![" Luxor ".to_string(), "  ".to_string(), "Aswan".to_string()]);
        assert_eq!(cleaned, vec!["Luxor", "Aswan"]);
    }
}
