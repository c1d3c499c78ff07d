//! 주문(`orders`) 리포지토리

use std::sync::Arc;

use mongodb::bson::{doc, oid::ObjectId, DateTime};

use crate::core::errors::AppError;
use crate::db::Database;
use crate::domain::entities::{Order, OrderStatus};
use crate::repositories::base;
use singleton_macro::repository;

#[repository(name = "order", collection = "orders")]
pub struct OrderRepository {
    db: Arc<Database>,
}

impl OrderRepository {
    pub async fn create(&self, mut order: Order) -> Result<Order, AppError> {
        let id = base::insert(&self.collection::<Order>(), &order).await?;
        order.id = Some(id);
        Ok(order)
    }

    pub async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Order>, AppError> {
        base::find_by_id(&self.collection::<Order>(), id).await
    }

    pub async fn find_by_tourist(&self, tourist: &ObjectId) -> Result<Vec<Order>, AppError> {
        base::find_many(&self.collection::<Order>(), doc! { "tourist": tourist }, doc! { "created_at": -1 }).await
    }

    /// 판매자의 상품이 하나라도 포함된 유효 주문
    pub async fn find_placed_by_seller(&self, seller: &ObjectId) -> Result<Vec<Order>, AppError> {
        base::find_many(
            &self.collection::<Order>(),
            doc! { "items.seller": seller, "status": base::bson_value(&OrderStatus::Placed)? },
            doc! { "created_at": 1 },
        )
        .await
    }

    pub async fn find_placed(&self) -> Result<Vec<Order>, AppError> {
        base::find_many(
            &self.collection::<Order>(),
            doc! { "status": base::bson_value(&OrderStatus::Placed)? },
            doc! { "created_at": 1 },
        )
        .await
    }

    /// 관광객이 해당 상품을 주문한 적이 있는지 (평점 자격)
    pub async fn has_purchased(&self, tourist: &ObjectId, product: &ObjectId) -> Result<bool, AppError> {
        let filter = doc! {
            "tourist": tourist,
            "items.product": product,
            "status": base::bson_value(&OrderStatus::Placed)?,
        };
        Ok(base::count(&self.collection::<Order>(), filter).await? > 0)
    }

    /// 접수 상태일 때만 취소로 전환
    pub async fn cancel(&self, id: &ObjectId) -> Result<Option<Order>, AppError> {
        base::update_one_returning(
            &self.collection::<Order>(),
            doc! { "_id": id, "status": base::bson_value(&OrderStatus::Placed)? },
            doc! {
                "$set": {
                    "status": base::bson_value(&OrderStatus::Cancelled)?,
                    "updated_at": DateTime::now(),
                }
            },
        )
        .await
    }

    pub async fn delete_by_tourist(&self, tourist: &ObjectId) -> Result<u64, AppError> {
        let result = self
            .collection::<Order>()
            .delete_many(doc! { "tourist": tourist })
            .await?;
        Ok(result.deleted_count)
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        base::create_indexes(
            &self.collection::<Order>(),
            vec![
                base::index(doc! { "tourist": 1, "created_at": -1 }, "tourist_created_at"),
                base::index(doc! { "items.seller": 1, "status": 1 }, "seller_status"),
            ],
        )
        .await
    }
}
