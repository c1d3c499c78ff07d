use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::{Category, Tag, TagKind};
use crate::utils::time::to_utc;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTagRequest {
    #[validate(length(min = 1, max = 60, message = "태그 이름은 1-60자여야 합니다"))]
    pub name: String,
    /// 생략 시 요청자 역할로 결정 (관리자: preference, 관광청: historical)
    pub kind: Option<TagKind>,
    pub historical_type: Option<String>,
    pub period: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateTagRequest {
    #[validate(length(min = 1, max = 60, message = "태그 이름은 1-60자여야 합니다"))]
    pub name: Option<String>,
    pub historical_type: Option<String>,
    pub period: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TagQuery {
    pub kind: Option<TagKind>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagResponse {
    pub id: String,
    pub name: String,
    pub kind: TagKind,
    pub historical_type: Option<String>,
    pub period: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Tag> for TagResponse {
    fn from(t: Tag) -> Self {
        Self {
            id: t.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: t.name,
            kind: t.kind,
            historical_type: t.historical_type,
            period: t.period,
            created_at: to_utc(t.created_at),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CategoryRequest {
    #[validate(length(min = 1, max = 60, message = "카테고리 이름은 1-60자여야 합니다"))]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<Category> for CategoryResponse {
    fn from(c: Category) -> Self {
        Self {
            id: c.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: c.name,
            created_at: to_utc(c.created_at),
        }
    }
}
