//! 위시리스트(`wishlists`) 리포지토리
//!
//! 관광객당 문서 하나. 항목 추가는 `$addToSet` upsert라 문서가 없어도 생성됩니다.

use std::sync::Arc;

use mongodb::{
    bson::{doc, oid::ObjectId, DateTime},
    options::{FindOneAndUpdateOptions, ReturnDocument},
};

use crate::core::errors::AppError;
use crate::db::Database;
use crate::domain::entities::{Wishlist, WishlistKind};
use crate::repositories::base;
use singleton_macro::repository;

#[repository(name = "wishlist", collection = "wishlists")]
pub struct WishlistRepository {
    db: Arc<Database>,
}

impl WishlistRepository {
    pub async fn find_by_tourist(&self, tourist: &ObjectId) -> Result<Option<Wishlist>, AppError> {
        base::find_one(&self.collection::<Wishlist>(), doc! { "tourist": tourist }).await
    }

    pub async fn add(&self, tourist: &ObjectId, kind: WishlistKind, item: &ObjectId) -> Result<Wishlist, AppError> {
        let now = DateTime::now();
        let options = FindOneAndUpdateOptions::builder()
            .upsert(true)
            .return_document(ReturnDocument::After)
            .build();

        self.collection::<Wishlist>()
            .find_one_and_update(
                doc! { "tourist": tourist },
                doc! {
                    "$addToSet": { kind.field(): item },
                    "$set": { "updated_at": now },
                    "$setOnInsert": { "created_at": now },
                },
            )
            .with_options(options)
            .await?
            .ok_or_else(|| AppError::InternalError("위시리스트 upsert 결과가 비어 있습니다".to_string()))
    }

    pub async fn remove(&self, tourist: &ObjectId, kind: WishlistKind, item: &ObjectId) -> Result<Option<Wishlist>, AppError> {
        base::update_one_returning(
            &self.collection::<Wishlist>(),
            doc! { "tourist": tourist },
            doc! {
                "$pull": { kind.field(): item },
                "$set": { "updated_at": DateTime::now() },
            },
        )
        .await
    }

    /// 삭제된 항목을 모든 위시리스트에서 제거
    pub async fn remove_everywhere(&self, kind: WishlistKind, item: &ObjectId) -> Result<(), AppError> {
        self.collection::<Wishlist>()
            .update_many(doc! { kind.field(): item }, doc! { "$pull": { kind.field(): item } })
            .await?;
        Ok(())
    }

    pub async fn delete_by_tourist(&self, tourist: &ObjectId) -> Result<bool, AppError> {
        let result = self
            .collection::<Wishlist>()
            .delete_one(doc! { "tourist": tourist })
            .await?;
        Ok(result.deleted_count > 0)
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        base::create_indexes(
            &self.collection::<Wishlist>(),
            vec![base::unique_index(doc! { "tourist": 1 }, "tourist_unique")],
        )
        .await
    }
}
