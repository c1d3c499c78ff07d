//! 태그(`tags`)와 활동 카테고리(`categories`) 리포지토리

use std::sync::Arc;

use mongodb::bson::{doc, oid::ObjectId, Document};

use crate::core::errors::AppError;
use crate::db::Database;
use crate::domain::entities::{Category, Tag, TagKind};
use crate::repositories::base;
use singleton_macro::repository;

/// 유니크 인덱스 위반을 중복 이름 오류로 변환
fn duplicate_name(error: AppError, name: &str) -> AppError {
    match error {
        AppError::DatabaseError(msg) if msg.contains("E11000") => {
            AppError::ConflictError(format!("이미 존재하는 이름입니다: {}", name))
        }
        other => other,
    }
}

#[repository(name = "tag", collection = "tags")]
pub struct TagRepository {
    db: Arc<Database>,
}

impl TagRepository {
    pub async fn create(&self, mut tag: Tag) -> Result<Tag, AppError> {
        let id = base::insert(&self.collection::<Tag>(), &tag)
            .await
            .map_err(|e| duplicate_name(e, &tag.name))?;
        tag.id = Some(id);
        Ok(tag)
    }

    pub async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Tag>, AppError> {
        base::find_by_id(&self.collection::<Tag>(), id).await
    }

    pub async fn find_by_ids(&self, ids: &[ObjectId]) -> Result<Vec<Tag>, AppError> {
        base::find_many(&self.collection::<Tag>(), doc! { "_id": { "$in": ids } }, doc! { "name": 1 }).await
    }

    pub async fn find_all(&self, kind: Option<TagKind>) -> Result<Vec<Tag>, AppError> {
        let filter = match kind {
            Some(kind) => doc! { "kind": kind.as_str() },
            None => Document::new(),
        };
        base::find_many(&self.collection::<Tag>(), filter, doc! { "name": 1 }).await
    }

    pub async fn update(&self, id: &ObjectId, set: Document) -> Result<Option<Tag>, AppError> {
        let name = set.get_str("name").unwrap_or_default().to_string();
        base::update_by_id(&self.collection::<Tag>(), id, set)
            .await
            .map_err(|e| duplicate_name(e, &name))
    }

    pub async fn delete(&self, id: &ObjectId) -> Result<bool, AppError> {
        base::delete_by_id(&self.collection::<Tag>(), id).await
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        base::create_indexes(
            &self.collection::<Tag>(),
            vec![base::unique_index(doc! { "name": 1, "kind": 1 }, "name_kind_unique")],
        )
        .await
    }
}

#[repository(name = "category", collection = "categories")]
pub struct CategoryRepository {
    db: Arc<Database>,
}

impl CategoryRepository {
    pub async fn create(&self, mut category: Category) -> Result<Category, AppError> {
        let id = base::insert(&self.collection::<Category>(), &category)
            .await
            .map_err(|e| duplicate_name(e, &category.name))?;
        category.id = Some(id);
        Ok(category)
    }

    pub async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Category>, AppError> {
        base::find_by_id(&self.collection::<Category>(), id).await
    }

    pub async fn find_all(&self) -> Result<Vec<Category>, AppError> {
        base::find_many(&self.collection::<Category>(), Document::new(), doc! { "name": 1 }).await
    }

    pub async fn rename(&self, id: &ObjectId, name: &str) -> Result<Option<Category>, AppError> {
        base::update_by_id(&self.collection::<Category>(), id, doc! { "name": name })
            .await
            .map_err(|e| duplicate_name(e, name))
    }

    pub async fn delete(&self, id: &ObjectId) -> Result<bool, AppError> {
        base::delete_by_id(&self.collection::<Category>(), id).await
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        base::create_indexes(
            &self.collection::<Category>(),
            vec![base::unique_index(doc! { "name": 1 }, "name_unique")],
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_key_becomes_conflict() {
        let error = duplicate_name(
            AppError::DatabaseError("E11000 duplicate key error collection: tags".to_string()),
            "Museums",
        );
        assert!(matches!(error, AppError::ConflictError(msg) if msg.contains("Museums")));

        let other = duplicate_name(AppError::DatabaseError("timeout".to_string()), "Museums");
        assert!(matches!(other, AppError::DatabaseError(_)));
    }
}
