//! # 태그 서비스
//!
//! 태그는 두 종류입니다.
//!
//! | 종류 | 관리 주체 | 용도 |
//! |---|---|---|
//! | `preference` | 관리자 | 활동/일정의 선호 태그 |
//! | `historical` | 관광청 담당자 (작성자 본인) | 역사적 장소의 유형/시대 태그 |
//!
//! 태그를 삭제하면 활동, 일정, 장소의 참조도 함께 제거됩니다.

use std::sync::Arc;

use mongodb::bson::{oid::ObjectId, DateTime, Document};

use crate::core::errors::AppError;
use crate::domain::auth::AuthenticatedUser;
use crate::domain::dto::catalog::{CreateTagRequest, TagResponse, UpdateTagRequest};
use crate::domain::entities::users::Role;
use crate::domain::entities::{Tag, TagKind};
use crate::repositories::base::parse_object_id;
use crate::repositories::catalog::{ActivityRepository, ItineraryRepository, PlaceRepository, TagRepository};
use singleton_macro::service;
use crate::utils::string_utils::clean_optional_string;

/// 역할이 관리하는 태그 종류
fn managed_kind(role: Role) -> Option<TagKind> {
    match role {
        Role::Admin => Some(TagKind::Preference),
        Role::TourismGovernor => Some(TagKind::Historical),
        _ => None,
    }
}

/// 태그 수정/삭제 권한 확인
fn ensure_can_manage(user: &AuthenticatedUser, user_id: &ObjectId, tag: &Tag) -> Result<(), AppError> {
    let allowed = match tag.kind {
        TagKind::Preference => user.has_role(Role::Admin),
        TagKind::Historical => user.has_role(Role::TourismGovernor) && &tag.created_by == user_id,
    };
    if !allowed {
        return Err(AppError::AuthorizationError("이 태그를 관리할 권한이 없습니다".to_string()));
    }
    Ok(())
}

#[service(name = "tag")]
pub struct TagService {
    tag_repo: Arc<TagRepository>,
    activity_repo: Arc<ActivityRepository>,
    itinerary_repo: Arc<ItineraryRepository>,
    place_repo: Arc<PlaceRepository>,
}

impl TagService {
    pub async fn list(&self, kind: Option<TagKind>) -> Result<Vec<TagResponse>, AppError> {
        let tags = self.tag_repo.find_all(kind).await?;
        Ok(tags.into_iter().map(TagResponse::from).collect())
    }

    /// 태그 생성. 종류는 요청자의 역할로 결정됩니다.
    pub async fn create(&self, user: &AuthenticatedUser, request: CreateTagRequest) -> Result<TagResponse, AppError> {
        let kind = managed_kind(user.role)
            .ok_or_else(|| AppError::AuthorizationError("태그를 생성할 권한이 없습니다".to_string()))?;

        if request.kind.is_some_and(|requested| requested != kind) {
            return Err(AppError::AuthorizationError(format!(
                "{} 역할은 {} 태그만 생성할 수 있습니다",
                user.role,
                kind.as_str()
            )));
        }

        let historical_type = clean_optional_string(request.historical_type);
        if kind == TagKind::Historical && historical_type.is_none() {
            return Err(AppError::ValidationError("역사 태그에는 유형이 필요합니다".to_string()));
        }

        let now = DateTime::now();
        let tag = Tag {
            id: None,
            name: request.name.trim().to_string(),
            kind,
            historical_type,
            period: clean_optional_string(request.period),
            created_by: user.object_id()?,
            created_at: now,
            updated_at: now,
        };

        let created = self.tag_repo.create(tag).await?;
        log::info!("🏷️ 태그 생성: {} ({})", created.name, kind.as_str());
        Ok(created.into())
    }

    pub async fn update(&self, user: &AuthenticatedUser, id: &str, request: UpdateTagRequest) -> Result<TagResponse, AppError> {
        let tag = self.find(id).await?;
        ensure_can_manage(user, &user.object_id()?, &tag)?;

        let mut set = Document::new();
        if let Some(name) = clean_optional_string(request.name) {
            set.insert("name", name);
        }
        if tag.kind == TagKind::Historical {
            if let Some(historical_type) = clean_optional_string(request.historical_type) {
                set.insert("historical_type", historical_type);
            }
            if let Some(period) = clean_optional_string(request.period) {
                set.insert("period", period);
            }
        }
        if set.is_empty() {
            return Ok(tag.into());
        }

        let id = tag.id.ok_or_else(|| AppError::InternalError("태그 ID가 없습니다".to_string()))?;
        self.tag_repo
            .update(&id, set)
            .await?
            .map(TagResponse::from)
            .ok_or_else(|| AppError::NotFound("태그를 찾을 수 없습니다".to_string()))
    }

    pub async fn delete(&self, user: &AuthenticatedUser, id: &str) -> Result<(), AppError> {
        let tag = self.find(id).await?;
        ensure_can_manage(user, &user.object_id()?, &tag)?;

        let id = tag.id.ok_or_else(|| AppError::InternalError("태그 ID가 없습니다".to_string()))?;
        if !self.tag_repo.delete(&id).await? {
            return Err(AppError::NotFound("태그를 찾을 수 없습니다".to_string()));
        }

        self.activity_repo.remove_tag(&id).await?;
        self.itinerary_repo.remove_tag(&id).await?;
        self.place_repo.remove_tag(&id).await?;

        log::info!("🏷️ 태그 삭제: {}", tag.name);
        Ok(())
    }

    /// 참조하려는 태그 ID가 모두 존재하는지 확인하고 ObjectId로 변환합니다.
    pub async fn resolve(&self, ids: &[String], kind: TagKind) -> Result<Vec<ObjectId>, AppError> {
        let mut parsed = Vec::with_capacity(ids.len());
        for id in ids {
            let id = parse_object_id(id)?;
            if !parsed.contains(&id) {
                parsed.push(id);
            }
        }
        if parsed.is_empty() {
            return Ok(parsed);
        }

        let found = self.tag_repo.find_by_ids(&parsed).await?;
        if found.len() != parsed.len() || found.iter().any(|t| t.kind != kind) {
            return Err(AppError::ValidationError(format!(
                "존재하지 않거나 {} 종류가 아닌 태그가 포함되어 있습니다",
                kind.as_str()
            )));
        }
        Ok(parsed)
    }

    async fn find(&self, id: &str) -> Result<Tag, AppError> {
        let id = parse_object_id(id)?;
        self.tag_repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| AppError::NotFound("태그를 찾을 수 없습니다".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role, id: ObjectId) -> AuthenticatedUser {
        AuthenticatedUser { user_id: id.to_hex(), role, username: "staff".to_string() }
    }

    fn tag(kind: TagKind, created_by: ObjectId) -> Tag {
        let now = DateTime::now();
        Tag {
            id: Some(ObjectId::new()),
            name: "Pharaonic".to_string(),
            kind,
            historical_type: Some("Monument".to_string()),
            period: Some("Old Kingdom".to_string()),
            created_by,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_managed_kind_by_role() {
        assert_eq!(managed_kind(Role::Admin), Some(TagKind::Preference));
        assert_eq!(managed_kind(Role::TourismGovernor), Some(TagKind::Historical));
        assert_eq!(managed_kind(Role::Seller), None);
    }

    #[test]
    fn test_governor_manages_only_own_historical_tags() {
        let governor_id = ObjectId::new();
        let governor = user(Role::TourismGovernor, governor_id);

        assert!(ensure_can_manage(&governor, &governor_id, &tag(TagKind::Historical, governor_id)).is_ok());
        assert!(ensure_can_manage(&governor, &governor_id, &tag(TagKind::Historical, ObjectId::new())).is_err());
        assert!(ensure_can_manage(&governor, &governor_id, &tag(TagKind::Preference, governor_id)).is_err());
    }

    #[test]
    fn test_admin_manages_preference_tags() {
        let admin_id = ObjectId::new();
        let admin = user(Role::Admin, admin_id);

        assert!(ensure_can_manage(&admin, &admin_id, &tag(TagKind::Preference, ObjectId::new())).is_ok());
        assert!(matches!(
            ensure_can_manage(&admin, &admin_id, &tag(TagKind::Historical, ObjectId::new())),
            Err(AppError::AuthorizationError(_))
        ));
    }
}
