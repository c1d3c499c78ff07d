//! 불만 접수(`complaints`) 리포지토리

use std::sync::Arc;

use mongodb::bson::{doc, oid::ObjectId, DateTime, Document};

use crate::core::errors::AppError;
use crate::db::Database;
use crate::domain::entities::{Complaint, ComplaintStatus};
use crate::repositories::base;
use singleton_macro::repository;

#[repository(name = "complaint", collection = "complaints")]
pub struct ComplaintRepository {
    db: Arc<Database>,
}

impl ComplaintRepository {
    pub async fn create(&self, mut complaint: Complaint) -> Result<Complaint, AppError> {
        let id = base::insert(&self.collection::<Complaint>(), &complaint).await?;
        complaint.id = Some(id);
        Ok(complaint)
    }

    pub async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Complaint>, AppError> {
        base::find_by_id(&self.collection::<Complaint>(), id).await
    }

    /// 작성자/상태 조건 목록. `newest_first`면 최신순.
    pub async fn find_all(
        &self,
        tourist: Option<&ObjectId>,
        status: Option<ComplaintStatus>,
        newest_first: bool,
    ) -> Result<Vec<Complaint>, AppError> {
        let mut filter = Document::new();
        if let Some(tourist) = tourist {
            filter.insert("tourist", tourist);
        }
        if let Some(status) = status {
            filter.insert("status", status.as_str());
        }
        let direction = if newest_first { -1 } else { 1 };

        base::find_many(&self.collection::<Complaint>(), filter, doc! { "created_at": direction }).await
    }

    /// 답변 등록과 동시에 해결 처리
    pub async fn reply(&self, id: &ObjectId, reply: &str) -> Result<Option<Complaint>, AppError> {
        base::update_by_id(
            &self.collection::<Complaint>(),
            id,
            doc! {
                "reply": reply,
                "replied_at": DateTime::now(),
                "status": ComplaintStatus::Resolved.as_str(),
            },
        )
        .await
    }

    pub async fn update_status(&self, id: &ObjectId, status: ComplaintStatus) -> Result<Option<Complaint>, AppError> {
        base::update_by_id(&self.collection::<Complaint>(), id, doc! { "status": status.as_str() }).await
    }

    pub async fn delete_by_tourist(&self, tourist: &ObjectId) -> Result<u64, AppError> {
        let result = self
            .collection::<Complaint>()
            .delete_many(doc! { "tourist": tourist })
            .await?;
        Ok(result.deleted_count)
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        base::create_indexes(
            &self.collection::<Complaint>(),
            vec![
                base::index(doc! { "tourist": 1 }, "tourist"),
                base::index(doc! { "status": 1, "created_at": -1 }, "status_created_at"),
            ],
        )
        .await
    }
}
