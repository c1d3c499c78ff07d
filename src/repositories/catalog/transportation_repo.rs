//! 교통편(`transportations`) 리포지토리

use std::sync::Arc;

use mongodb::bson::{doc, oid::ObjectId, DateTime, Document};

use crate::core::errors::AppError;
use crate::db::Database;
use crate::domain::entities::Transportation;
use crate::repositories::base;
use singleton_macro::repository;

#[repository(name = "transportation", collection = "transportations")]
pub struct TransportationRepository {
    db: Arc<Database>,
}

impl TransportationRepository {
    pub async fn create(&self, mut transportation: Transportation) -> Result<Transportation, AppError> {
        let id = base::insert(&self.collection::<Transportation>(), &transportation).await?;
        transportation.id = Some(id);
        Ok(transportation)
    }

    pub async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Transportation>, AppError> {
        base::find_by_id(&self.collection::<Transportation>(), id).await
    }

    /// 출발 전인 교통편 (출발 시각 오름차순)
    pub async fn find_upcoming(&self, now: DateTime) -> Result<Vec<Transportation>, AppError> {
        base::find_many(
            &self.collection::<Transportation>(),
            doc! { "departure": { "$gt": now } },
            doc! { "departure": 1 },
        )
        .await
    }

    pub async fn find_by_advertiser(&self, advertiser: &ObjectId) -> Result<Vec<Transportation>, AppError> {
        base::find_many(
            &self.collection::<Transportation>(),
            doc! { "advertiser": advertiser },
            doc! { "departure": 1 },
        )
        .await
    }

    pub async fn update(&self, id: &ObjectId, set: Document) -> Result<Option<Transportation>, AppError> {
        base::update_by_id(&self.collection::<Transportation>(), id, set).await
    }

    /// 좌석 1석 예약
    ///
    /// 예약이 열려 있고 잔여 좌석이 있을 때만 증가시키며, 아니면 `None`.
    pub async fn reserve_seat(&self, id: &ObjectId) -> Result<Option<Transportation>, AppError> {
        base::update_one_returning(
            &self.collection::<Transportation>(),
            doc! {
                "_id": id,
                "booking_open": true,
                "$expr": { "$lt": ["$booked_seats", "$capacity"] },
            },
            doc! { "$inc": { "booked_seats": 1 } },
        )
        .await
    }

    pub async fn release_seat(&self, id: &ObjectId) -> Result<Option<Transportation>, AppError> {
        base::update_one_returning(
            &self.collection::<Transportation>(),
            doc! { "_id": id, "booked_seats": { "$gt": 0 } },
            doc! { "$inc": { "booked_seats": -1 } },
        )
        .await
    }

    pub async fn delete(&self, id: &ObjectId) -> Result<bool, AppError> {
        base::delete_by_id(&self.collection::<Transportation>(), id).await
    }

    pub async fn delete_by_advertiser(&self, advertiser: &ObjectId) -> Result<u64, AppError> {
        let result = self
            .collection::<Transportation>()
            .delete_many(doc! { "advertiser": advertiser })
            .await?;
        Ok(result.deleted_count)
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        base::create_indexes(
            &self.collection::<Transportation>(),
            vec![
                base::index(doc! { "advertiser": 1 }, "advertiser"),
                base::index(doc! { "departure": 1 }, "departure"),
            ],
        )
        .await
    }
}
