//! 역사적 장소(`historical_places`) 리포지토리

use std::sync::Arc;

use mongodb::bson::{doc, oid::ObjectId, Document};

use crate::core::errors::AppError;
use crate::db::Database;
use crate::domain::entities::HistoricalPlace;
use crate::repositories::base;
use singleton_macro::repository;

#[repository(name = "place", collection = "historical_places")]
pub struct PlaceRepository {
    db: Arc<Database>,
}

impl PlaceRepository {
    pub async fn create(&self, mut place: HistoricalPlace) -> Result<HistoricalPlace, AppError> {
        let id = base::insert(&self.collection::<HistoricalPlace>(), &place).await?;
        place.id = Some(id);
        Ok(place)
    }

    pub async fn find_by_id(&self, id: &ObjectId) -> Result<Option<HistoricalPlace>, AppError> {
        base::find_by_id(&self.collection::<HistoricalPlace>(), id).await
    }

    /// 태그 조건이 있으면 해당 태그가 붙은 장소만
    pub async fn find_all(&self, tag: Option<&ObjectId>) -> Result<Vec<HistoricalPlace>, AppError> {
        let filter = match tag {
            Some(tag) => doc! { "tags": tag },
            None => Document::new(),
        };
        base::find_many(&self.collection::<HistoricalPlace>(), filter, doc! { "name": 1 }).await
    }

    pub async fn find_by_governor(&self, governor: &ObjectId) -> Result<Vec<HistoricalPlace>, AppError> {
        base::find_many(
            &self.collection::<HistoricalPlace>(),
            doc! { "governor": governor },
            doc! { "created_at": -1 },
        )
        .await
    }

    pub async fn update(&self, id: &ObjectId, set: Document) -> Result<Option<HistoricalPlace>, AppError> {
        base::update_by_id(&self.collection::<HistoricalPlace>(), id, set).await
    }

    pub async fn remove_tag(&self, tag: &ObjectId) -> Result<(), AppError> {
        self.collection::<HistoricalPlace>()
            .update_many(doc! { "tags": tag }, doc! { "$pull": { "tags": tag } })
            .await?;
        Ok(())
    }

    pub async fn delete(&self, id: &ObjectId) -> Result<bool, AppError> {
        base::delete_by_id(&self.collection::<HistoricalPlace>(), id).await
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        base::create_indexes(
            &self.collection::<HistoricalPlace>(),
            vec![
                base::index(doc! { "governor": 1 }, "governor"),
                base::index(doc! { "tags": 1 }, "tags"),
            ],
        )
        .await
    }
}
