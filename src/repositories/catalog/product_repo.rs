//! 상품(`products`) 리포지토리
//!
//! 재고 차감은 `quantity >= 요청 수량` 조건부 `$inc` 한 번으로 처리되어
//! 동시 주문에서도 재고가 음수가 되지 않습니다.

use std::sync::Arc;

use mongodb::bson::{doc, oid::ObjectId, Document};

use crate::core::errors::AppError;
use crate::db::Database;
use crate::domain::entities::{Product, Rating};
use crate::repositories::base;
use singleton_macro::repository;

#[repository(name = "product", collection = "products")]
pub struct ProductRepository {
    db: Arc<Database>,
}

impl ProductRepository {
    pub async fn create(&self, mut product: Product) -> Result<Product, AppError> {
        let id = base::insert(&self.collection::<Product>(), &product).await?;
        product.id = Some(id);
        Ok(product)
    }

    pub async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Product>, AppError> {
        base::find_by_id(&self.collection::<Product>(), id).await
    }

    pub async fn find_by_ids(&self, ids: &[ObjectId]) -> Result<Vec<Product>, AppError> {
        base::find_many(&self.collection::<Product>(), doc! { "_id": { "$in": ids } }, doc! { "name": 1 }).await
    }

    pub async fn find_all(&self, include_archived: bool) -> Result<Vec<Product>, AppError> {
        let filter = if include_archived {
            Document::new()
        } else {
            doc! { "archived": false }
        };
        base::find_many(&self.collection::<Product>(), filter, doc! { "created_at": -1 }).await
    }

    pub async fn find_by_seller(&self, seller: &ObjectId) -> Result<Vec<Product>, AppError> {
        base::find_many(&self.collection::<Product>(), doc! { "seller": seller }, doc! { "created_at": -1 }).await
    }

    pub async fn update(&self, id: &ObjectId, set: Document) -> Result<Option<Product>, AppError> {
        base::update_by_id(&self.collection::<Product>(), id, set).await
    }

    /// 재고 차감 + 판매량 증가
    ///
    /// 재고가 부족하거나 보관(archived) 상태면 `None`.
    pub async fn take_stock(&self, id: &ObjectId, quantity: i64) -> Result<Option<Product>, AppError> {
        base::update_one_returning(
            &self.collection::<Product>(),
            doc! { "_id": id, "archived": false, "quantity": { "$gte": quantity } },
            doc! { "$inc": { "quantity": -quantity, "sales": quantity } },
        )
        .await
    }

    /// 주문 취소 또는 실패 시 재고 복구
    pub async fn restock(&self, id: &ObjectId, quantity: i64) -> Result<Option<Product>, AppError> {
        base::update_one_returning(
            &self.collection::<Product>(),
            doc! { "_id": id },
            doc! { "$inc": { "quantity": quantity, "sales": -quantity } },
        )
        .await
    }

    pub async fn upsert_rating(&self, id: &ObjectId, rating: &Rating) -> Result<Option<Product>, AppError> {
        base::upsert_rating(&self.collection::<Product>(), id, rating).await
    }

    pub async fn delete(&self, id: &ObjectId) -> Result<bool, AppError> {
        base::delete_by_id(&self.collection::<Product>(), id).await
    }

    pub async fn delete_by_seller(&self, seller: &ObjectId) -> Result<u64, AppError> {
        let result = self
            .collection::<Product>()
            .delete_many(doc! { "seller": seller })
            .await?;
        Ok(result.deleted_count)
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        base::create_indexes(
            &self.collection::<Product>(),
            vec![
                base::index(doc! { "seller": 1 }, "seller"),
                base::index(doc! { "archived": 1, "created_at": -1 }, "archived_created_at"),
            ],
        )
        .await
    }
}
