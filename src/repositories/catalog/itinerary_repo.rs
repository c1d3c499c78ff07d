//! 일정(`itineraries`) 리포지토리

use std::sync::Arc;

use mongodb::bson::{doc, oid::ObjectId, Document};

use crate::core::errors::AppError;
use crate::db::Database;
use crate::domain::entities::{Itinerary, Rating};
use crate::repositories::base;
use singleton_macro::repository;

#[repository(name = "itinerary", collection = "itineraries")]
pub struct ItineraryRepository {
    db: Arc<Database>,
}

impl ItineraryRepository {
    pub async fn create(&self, mut itinerary: Itinerary) -> Result<Itinerary, AppError> {
        let id = base::insert(&self.collection::<Itinerary>(), &itinerary).await?;
        itinerary.id = Some(id);
        Ok(itinerary)
    }

    pub async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Itinerary>, AppError> {
        base::find_by_id(&self.collection::<Itinerary>(), id).await
    }

    pub async fn find_by_ids(&self, ids: &[ObjectId]) -> Result<Vec<Itinerary>, AppError> {
        base::find_many(&self.collection::<Itinerary>(), doc! { "_id": { "$in": ids } }, doc! { "name": 1 }).await
    }

    /// 활성화되고 신고되지 않은 일정
    pub async fn find_visible(&self) -> Result<Vec<Itinerary>, AppError> {
        base::find_many(
            &self.collection::<Itinerary>(),
            doc! { "active": true, "flagged": false },
            doc! { "created_at": -1 },
        )
        .await
    }

    pub async fn find_by_tour_guide(&self, tour_guide: &ObjectId) -> Result<Vec<Itinerary>, AppError> {
        base::find_many(
            &self.collection::<Itinerary>(),
            doc! { "tour_guide": tour_guide },
            doc! { "created_at": -1 },
        )
        .await
    }

    pub async fn update(&self, id: &ObjectId, set: Document) -> Result<Option<Itinerary>, AppError> {
        base::update_by_id(&self.collection::<Itinerary>(), id, set).await
    }

    pub async fn upsert_rating(&self, id: &ObjectId, rating: &Rating) -> Result<Option<Itinerary>, AppError> {
        base::upsert_rating(&self.collection::<Itinerary>(), id, rating).await
    }

    pub async fn remove_tag(&self, tag: &ObjectId) -> Result<(), AppError> {
        self.collection::<Itinerary>()
            .update_many(doc! { "tags": tag }, doc! { "$pull": { "tags": tag } })
            .await?;
        Ok(())
    }

    /// 삭제된 활동 참조 제거
    pub async fn remove_activity(&self, activity: &ObjectId) -> Result<(), AppError> {
        self.collection::<Itinerary>()
            .update_many(doc! { "activities": activity }, doc! { "$pull": { "activities": activity } })
            .await?;
        Ok(())
    }

    pub async fn delete(&self, id: &ObjectId) -> Result<bool, AppError> {
        base::delete_by_id(&self.collection::<Itinerary>(), id).await
    }

    pub async fn delete_by_tour_guide(&self, tour_guide: &ObjectId) -> Result<u64, AppError> {
        let result = self
            .collection::<Itinerary>()
            .delete_many(doc! { "tour_guide": tour_guide })
            .await?;
        Ok(result.deleted_count)
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        base::create_indexes(
            &self.collection::<Itinerary>(),
            vec![
                base::index(doc! { "tour_guide": 1 }, "tour_guide"),
                base::index(doc! { "active": 1, "flagged": 1 }, "active_flagged"),
                base::index(doc! { "tags": 1 }, "tags"),
            ],
        )
        .await
    }
}
