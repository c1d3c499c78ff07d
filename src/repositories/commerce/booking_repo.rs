//! 예약(`bookings`) 리포지토리

use std::sync::Arc;

use mongodb::bson::{doc, oid::ObjectId, DateTime};

use crate::core::errors::AppError;
use crate::db::Database;
use crate::domain::entities::{Booking, BookingKind, BookingStatus};
use crate::repositories::base;
use singleton_macro::repository;

#[repository(name = "booking", collection = "bookings")]
pub struct BookingRepository {
    db: Arc<Database>,
}

impl BookingRepository {
    pub async fn create(&self, mut booking: Booking) -> Result<Booking, AppError> {
        let id = base::insert(&self.collection::<Booking>(), &booking).await?;
        booking.id = Some(id);
        Ok(booking)
    }

    pub async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Booking>, AppError> {
        base::find_by_id(&self.collection::<Booking>(), id).await
    }

    /// 관광객 예약 목록 (예정일 오름차순)
    pub async fn find_by_tourist(
        &self,
        tourist: &ObjectId,
        status: Option<BookingStatus>,
        kind: Option<BookingKind>,
    ) -> Result<Vec<Booking>, AppError> {
        let mut filter = doc! { "tourist": tourist };
        if let Some(status) = status {
            filter.insert("status", status.as_str());
        }
        if let Some(kind) = kind {
            filter.insert("kind", base::bson_value(&kind)?);
        }
        base::find_many(&self.collection::<Booking>(), filter, doc! { "scheduled_at": 1 }).await
    }

    /// 제공자(광고주/가이드)의 확정 예약
    pub async fn find_confirmed_by_provider(&self, provider: &ObjectId) -> Result<Vec<Booking>, AppError> {
        base::find_many(
            &self.collection::<Booking>(),
            doc! { "provider": provider, "status": BookingStatus::Confirmed.as_str() },
            doc! { "created_at": 1 },
        )
        .await
    }

    pub async fn find_confirmed(&self) -> Result<Vec<Booking>, AppError> {
        base::find_many(
            &self.collection::<Booking>(),
            doc! { "status": BookingStatus::Confirmed.as_str() },
            doc! { "created_at": 1 },
        )
        .await
    }

    /// 항목에 걸린 확정 예약 수
    pub async fn count_confirmed_for_item(&self, item: &ObjectId) -> Result<u64, AppError> {
        base::count(
            &self.collection::<Booking>(),
            doc! { "item": item, "status": BookingStatus::Confirmed.as_str() },
        )
        .await
    }

    /// 이미 지난 확정 예약이 있는지 (평점 자격)
    pub async fn has_attended(&self, tourist: &ObjectId, item: &ObjectId, now: DateTime) -> Result<bool, AppError> {
        let filter = doc! {
            "tourist": tourist,
            "item": item,
            "status": BookingStatus::Confirmed.as_str(),
            "scheduled_at": { "$lte": now },
        };
        Ok(base::count(&self.collection::<Booking>(), filter).await? > 0)
    }

    /// 확정 상태일 때만 취소로 전환. 이미 취소된 예약이면 `None`.
    pub async fn cancel(&self, id: &ObjectId) -> Result<Option<Booking>, AppError> {
        base::update_one_returning(
            &self.collection::<Booking>(),
            doc! { "_id": id, "status": BookingStatus::Confirmed.as_str() },
            doc! { "$set": { "status": BookingStatus::Cancelled.as_str(), "updated_at": DateTime::now() } },
        )
        .await
    }

    pub async fn delete_by_tourist(&self, tourist: &ObjectId) -> Result<u64, AppError> {
        let result = self
            .collection::<Booking>()
            .delete_many(doc! { "tourist": tourist })
            .await?;
        Ok(result.deleted_count)
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        base::create_indexes(
            &self.collection::<Booking>(),
            vec![
                base::index(doc! { "tourist": 1, "scheduled_at": 1 }, "tourist_scheduled_at"),
                base::index(doc! { "provider": 1, "status": 1 }, "provider_status"),
                base::index(doc! { "item": 1, "status": 1 }, "item_status"),
            ],
        )
        .await
    }
}

