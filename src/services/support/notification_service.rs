//! 알림 서비스
//!
//! 상품 품절, 활동/일정 신고 등 다른 서비스가 제공자에게 알림을 남길 때 사용합니다.

use std::sync::Arc;

use mongodb::bson::oid::ObjectId;

use crate::core::errors::AppError;
use crate::domain::dto::support::NotificationResponse;
use crate::domain::entities::Notification;
use crate::repositories::base::parse_object_id;
use crate::repositories::support::NotificationRepository;
use singleton_macro::service;

#[service(name = "notification")]
pub struct NotificationService {
    notification_repo: Arc<NotificationRepository>,
}

impl NotificationService {
    /// 알림 저장
    ///
    /// 알림 실패가 본 작업을 되돌리지 않도록 오류는 로그만 남깁니다.
    pub async fn notify(&self, recipient: ObjectId, message: impl Into<String>) {
        let message = message.into();
        match self.notification_repo.create(Notification::new(recipient, message.clone())).await {
            Ok(_) => log::info!("🔔 알림 생성: {} → {}", recipient, message),
            Err(e) => log::error!("알림 저장 실패 ({}): {}", recipient, e),
        }
    }

    pub async fn list(&self, recipient: &ObjectId) -> Result<Vec<NotificationResponse>, AppError> {
        let notifications = self.notification_repo.find_by_recipient(recipient).await?;
        Ok(notifications.into_iter().map(NotificationResponse::from).collect())
    }

    pub async fn mark_read(&self, recipient: &ObjectId, id: &str) -> Result<NotificationResponse, AppError> {
        let id = parse_object_id(id)?;

        self.notification_repo
            .mark_read(&id, recipient)
            .await?
            .map(NotificationResponse::from)
            .ok_or_else(|| AppError::NotFound("알림을 찾을 수 없습니다".to_string()))
    }
}
