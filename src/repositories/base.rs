//! # 리포지토리 공통 헬퍼
//!
//! 모든 컬렉션이 공유하는 ID 파싱, 단건 조회/수정/삭제, 목록 조회와
//! 인덱스 모델 생성 함수입니다. 각 리포지토리는 여기 함수에 자신의
//! 컬렉션 핸들을 넘겨 사용합니다.

use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, to_bson, Bson, DateTime, Document},
    options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument},
    Collection, IndexModel,
};
use serde::{de::DeserializeOwned, Serialize};

use crate::core::errors::AppError;
use crate::domain::entities::Rating;

/// 문자열 ID를 ObjectId로 변환합니다. 잘못된 형식은 400.
pub fn parse_object_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id.trim())
        .map_err(|_| AppError::ValidationError("유효하지 않은 ID 형식입니다".to_string()))
}

/// 문자열 ID 목록 변환
pub fn parse_object_ids(ids: &[String]) -> Result<Vec<ObjectId>, AppError> {
    ids.iter().map(|id| parse_object_id(id)).collect()
}

/// 필터/수정 문서에 넣을 BSON 값으로 직렬화합니다.
pub fn bson_value<V: Serialize>(value: &V) -> Result<Bson, AppError> {
    to_bson(value).map_err(|e| AppError::InternalError(e.to_string()))
}

pub async fn find_by_id<T>(collection: &Collection<T>, id: &ObjectId) -> Result<Option<T>, AppError>
where
    T: DeserializeOwned + Send + Sync,
{
    collection
        .find_one(doc! { "_id": id })
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))
}

pub async fn find_one<T>(collection: &Collection<T>, filter: Document) -> Result<Option<T>, AppError>
where
    T: DeserializeOwned + Send + Sync,
{
    collection
        .find_one(filter)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))
}

/// 조건에 맞는 문서를 정렬해 모두 가져옵니다.
pub async fn find_many<T>(collection: &Collection<T>, filter: Document, sort: Document) -> Result<Vec<T>, AppError>
where
    T: DeserializeOwned + Unpin + Send + Sync,
{
    let cursor = collection
        .find(filter)
        .sort(sort)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    cursor
        .try_collect()
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))
}

/// 문서를 저장하고 생성된 `_id`를 반환합니다.
pub async fn insert<T>(collection: &Collection<T>, entity: &T) -> Result<ObjectId, AppError>
where
    T: Serialize + Send + Sync,
{
    let result = collection
        .insert_one(entity)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    result
        .inserted_id
        .as_object_id()
        .ok_or_else(|| AppError::InternalError("삽입된 문서의 ID가 ObjectId가 아닙니다".to_string()))
}

/// `$set` 수정 후 갱신된 문서를 반환합니다. `updated_at`은 자동 갱신됩니다.
pub async fn update_by_id<T>(collection: &Collection<T>, id: &ObjectId, mut set: Document) -> Result<Option<T>, AppError>
where
    T: DeserializeOwned + Send + Sync,
{
    set.insert("updated_at", DateTime::now());
    update_one_returning(collection, doc! { "_id": id }, doc! { "$set": set }).await
}

/// 임의 수정 연산(`$inc`, `$push` 등)을 원자적으로 적용하고 갱신된 문서를 반환합니다.
///
/// 조건에 맞는 문서가 없으면 `None`.
pub async fn update_one_returning<T>(
    collection: &Collection<T>,
    filter: Document,
    update: Document,
) -> Result<Option<T>, AppError>
where
    T: DeserializeOwned + Send + Sync,
{
    let options = FindOneAndUpdateOptions::builder()
        .return_document(ReturnDocument::After)
        .build();

    collection
        .find_one_and_update(filter, update)
        .with_options(options)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))
}

/// 임베디드 평점을 추가하거나, 같은 관광객의 기존 평점을 교체합니다.
pub async fn upsert_rating<T>(collection: &Collection<T>, id: &ObjectId, rating: &Rating) -> Result<Option<T>, AppError>
where
    T: DeserializeOwned + Send + Sync,
{
    let value = bson_value(rating)?;

    let replaced = update_one_returning(
        collection,
        doc! { "_id": id, "ratings.tourist": rating.tourist },
        doc! { "$set": { "ratings.$": value.clone(), "updated_at": DateTime::now() } },
    )
    .await?;
    if replaced.is_some() {
        return Ok(replaced);
    }

    update_one_returning(
        collection,
        doc! { "_id": id },
        doc! { "$push": { "ratings": value }, "$set": { "updated_at": DateTime::now() } },
    )
    .await
}

pub async fn delete_by_id<T>(collection: &Collection<T>, id: &ObjectId) -> Result<bool, AppError>
where
    T: Send + Sync,
{
    let result = collection
        .delete_one(doc! { "_id": id })
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    Ok(result.deleted_count > 0)
}

pub async fn count<T>(collection: &Collection<T>, filter: Document) -> Result<u64, AppError>
where
    T: Send + Sync,
{
    collection
        .count_documents(filter)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))
}

/// 유니크 인덱스 모델
pub fn unique_index(keys: Document, name: &str) -> IndexModel {
    IndexModel::builder()
        .keys(keys)
        .options(IndexOptions::builder().unique(true).name(name.to_string()).build())
        .build()
}

/// 일반 인덱스 모델
pub fn index(keys: Document, name: &str) -> IndexModel {
    IndexModel::builder()
        .keys(keys)
        .options(IndexOptions::builder().name(name.to_string()).build())
        .build()
}

pub async fn create_indexes<T>(collection: &Collection<T>, indexes: Vec<IndexModel>) -> Result<(), AppError>
where
    T: Send + Sync,
{
    collection
        .create_indexes(indexes)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_object_id() {
        let id = ObjectId::new();
        assert_eq!(parse_object_id(&id.to_hex()).unwrap(), id);
        assert_eq!(parse_object_id(&format!(" {} ", id.to_hex())).unwrap(), id);
    }

    #[test]
    fn test_malformed_id_is_validation_error() {
        assert!(matches!(parse_object_id("12345"), Err(AppError::ValidationError(_))));
        assert!(parse_object_ids(&["zz".to_string()]).is_err());
    }

    #[test]
    fn test_index_models_carry_names() {
        let model = unique_index(doc! { "email": 1 }, "email_unique");
        let options = model.options.unwrap();
        assert_eq!(options.unique, Some(true));
        assert_eq!(options.name.as_deref(), Some("email_unique"));
    }
}
