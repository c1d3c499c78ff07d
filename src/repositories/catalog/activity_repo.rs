//! 활동(`activities`) 리포지토리

use std::sync::Arc;

use mongodb::bson::{doc, oid::ObjectId, Document};

use crate::core::errors::AppError;
use crate::db::Database;
use crate::domain::entities::{Activity, Rating};
use crate::repositories::base;
use singleton_macro::repository;

#[repository(name = "activity", collection = "activities")]
pub struct ActivityRepository {
    db: Arc<Database>,
}

impl ActivityRepository {
    pub async fn create(&self, mut activity: Activity) -> Result<Activity, AppError> {
        let id = base::insert(&self.collection::<Activity>(), &activity).await?;
        activity.id = Some(id);
        Ok(activity)
    }

    pub async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Activity>, AppError> {
        base::find_by_id(&self.collection::<Activity>(), id).await
    }

    pub async fn find_by_ids(&self, ids: &[ObjectId]) -> Result<Vec<Activity>, AppError> {
        base::find_many(&self.collection::<Activity>(), doc! { "_id": { "$in": ids } }, doc! { "date": 1 }).await
    }

    /// 공개 목록 후보: 신고되지 않은 활동 (날짜 오름차순)
    ///
    /// 예산/날짜/태그 등 세부 조건은 서비스 계층의 필터가 적용합니다.
    pub async fn find_visible(&self) -> Result<Vec<Activity>, AppError> {
        base::find_many(&self.collection::<Activity>(), doc! { "flagged": false }, doc! { "date": 1 }).await
    }

    pub async fn find_by_advertiser(&self, advertiser: &ObjectId) -> Result<Vec<Activity>, AppError> {
        base::find_many(
            &self.collection::<Activity>(),
            doc! { "advertiser": advertiser },
            doc! { "created_at": -1 },
        )
        .await
    }

    pub async fn update(&self, id: &ObjectId, set: Document) -> Result<Option<Activity>, AppError> {
        base::update_by_id(&self.collection::<Activity>(), id, set).await
    }

    pub async fn upsert_rating(&self, id: &ObjectId, rating: &Rating) -> Result<Option<Activity>, AppError> {
        base::upsert_rating(&self.collection::<Activity>(), id, rating).await
    }

    pub async fn count_by_category(&self, category: &ObjectId) -> Result<u64, AppError> {
        base::count(&self.collection::<Activity>(), doc! { "category": category }).await
    }

    /// 삭제된 태그 참조 제거
    pub async fn remove_tag(&self, tag: &ObjectId) -> Result<(), AppError> {
        self.collection::<Activity>()
            .update_many(doc! { "tags": tag }, doc! { "$pull": { "tags": tag } })
            .await?;
        Ok(())
    }

    pub async fn delete(&self, id: &ObjectId) -> Result<bool, AppError> {
        base::delete_by_id(&self.collection::<Activity>(), id).await
    }

    /// 광고주 계정 삭제 시 소유 활동 정리
    pub async fn delete_by_advertiser(&self, advertiser: &ObjectId) -> Result<u64, AppError> {
        let result = self
            .collection::<Activity>()
            .delete_many(doc! { "advertiser": advertiser })
            .await?;
        Ok(result.deleted_count)
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        base::create_indexes(
            &self.collection::<Activity>(),
            vec![
                base::index(doc! { "advertiser": 1 }, "advertiser"),
                base::index(doc! { "date": 1, "flagged": 1 }, "date_flagged"),
                base::index(doc! { "category": 1 }, "category"),
                base::index(doc! { "tags": 1 }, "tags"),
            ],
        )
        .await
    }
}
