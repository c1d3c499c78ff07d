//! 민원 및 알림 엔티티

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplaintStatus {
    Pending,
    Resolved,
}

impl ComplaintStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplaintStatus::Pending => "pending",
            ComplaintStatus::Resolved => "resolved",
        }
    }
}

/// 관광객 민원
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Complaint {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub title: String,
    pub body: String,
    pub tourist: ObjectId,
    pub status: ComplaintStatus,
    /// 관리자 답변
    #[serde(default)]
    pub reply: Option<String>,
    #[serde(default)]
    pub replied_at: Option<DateTime>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

/// 사용자 알림
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub recipient: ObjectId,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime,
}

impl Notification {
    pub fn new(recipient: ObjectId, message: impl Into<String>) -> Self {
        Self {
            id: None,
            recipient,
            message: message.into(),
            read: false,
            created_at: DateTime::now(),
        }
    }
}
