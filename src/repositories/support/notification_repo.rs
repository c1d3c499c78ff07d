//! 알림(`notifications`) 리포지토리

use std::sync::Arc;

use mongodb::bson::{doc, oid::ObjectId};

use crate::core::errors::AppError;
use crate::db::Database;
use crate::domain::entities::Notification;
use crate::repositories::base;
use singleton_macro::repository;

#[repository(name = "notification", collection = "notifications")]
pub struct NotificationRepository {
    db: Arc<Database>,
}

impl NotificationRepository {
    pub async fn create(&self, mut notification: Notification) -> Result<Notification, AppError> {
        let id = base::insert(&self.collection::<Notification>(), &notification).await?;
        notification.id = Some(id);
        Ok(notification)
    }

    pub async fn find_by_recipient(&self, recipient: &ObjectId) -> Result<Vec<Notification>, AppError> {
        base::find_many(
            &self.collection::<Notification>(),
            doc! { "recipient": recipient },
            doc! { "created_at": -1 },
        )
        .await
    }

    /// 본인 알림만 읽음 처리. 없거나 타인 알림이면 `None`.
    pub async fn mark_read(&self, id: &ObjectId, recipient: &ObjectId) -> Result<Option<Notification>, AppError> {
        base::update_one_returning(
            &self.collection::<Notification>(),
            doc! { "_id": id, "recipient": recipient },
            doc! { "$set": { "read": true } },
        )
        .await
    }

    pub async fn delete_by_recipient(&self, recipient: &ObjectId) -> Result<u64, AppError> {
        let result = self
            .collection::<Notification>()
            .delete_many(doc! { "recipient": recipient })
            .await?;
        Ok(result.deleted_count)
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        base::create_indexes(
            &self.collection::<Notification>(),
            vec![base::index(doc! { "recipient": 1, "created_at": -1 }, "recipient_created_at")],
        )
        .await
    }
}
