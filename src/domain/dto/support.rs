//! 민원 / 알림 DTO

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::{Complaint, ComplaintStatus, Notification};
use crate::domain::models::filters::SortOrder;
use crate::utils::time::to_utc;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateComplaintRequest {
    #[validate(length(min = 1, max = 120, message = "제목은 1-120자여야 합니다"))]
    pub title: String,
    #[validate(length(min = 1, max = 4000, message = "내용을 입력해주세요"))]
    pub body: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReplyComplaintRequest {
    #[validate(length(min = 1, max = 4000, message = "답변을 입력해주세요"))]
    pub reply: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateComplaintStatusRequest {
    pub status: ComplaintStatus,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComplaintQuery {
    pub status: Option<ComplaintStatus>,
    /// 작성일 기준 정렬 (기본 최신순)
    pub sort: Option<SortOrder>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplaintResponse {
    pub id: String,
    pub title: String,
    pub body: String,
    pub tourist: String,
    pub status: ComplaintStatus,
    pub reply: Option<String>,
    pub replied_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<Complaint> for ComplaintResponse {
    fn from(c: Complaint) -> Self {
        Self {
            id: c.id.map(|id| id.to_hex()).unwrap_or_default(),
            title: c.title,
            body: c.body,
            tourist: c.tourist.to_hex(),
            status: c.status,
            reply: c.reply,
            replied_at: c.replied_at.map(to_utc),
            created_at: to_utc(c.created_at),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationResponse {
    pub id: String,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Notification> for NotificationResponse {
    fn from(n: Notification) -> Self {
        Self {
            id: n.id.map(|id| id.to_hex()).unwrap_or_default(),
            message: n.message,
            read: n.read,
            created_at: to_utc(n.created_at),
        }
    }
}
