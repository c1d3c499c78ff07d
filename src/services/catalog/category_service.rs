//! 활동 카테고리 서비스 (관리자 전용 관리)

use std::sync::Arc;

use mongodb::bson::{oid::ObjectId, DateTime};

use crate::core::errors::AppError;
use crate::domain::dto::catalog::{CategoryRequest, CategoryResponse};
use crate::domain::entities::Category;
use crate::repositories::base::parse_object_id;
use crate::repositories::catalog::{ActivityRepository, CategoryRepository};
use singleton_macro::service;

#[service(name = "category")]
pub struct CategoryService {
    category_repo: Arc<CategoryRepository>,
    activity_repo: Arc<ActivityRepository>,
}

impl CategoryService {
    pub async fn list(&self) -> Result<Vec<CategoryResponse>, AppError> {
        let categories = self.category_repo.find_all().await?;
        Ok(categories.into_iter().map(CategoryResponse::from).collect())
    }

    pub async fn create(&self, request: CategoryRequest) -> Result<CategoryResponse, AppError> {
        let now = DateTime::now();
        let category = Category {
            id: None,
            name: request.name.trim().to_string(),
            created_at: now,
            updated_at: now,
        };

        let created = self.category_repo.create(category).await?;
        log::info!("📂 카테고리 생성: {}", created.name);
        Ok(created.into())
    }

    pub async fn rename(&self, id: &str, request: CategoryRequest) -> Result<CategoryResponse, AppError> {
        let id = parse_object_id(id)?;

        self.category_repo
            .rename(&id, request.name.trim())
            .await?
            .map(CategoryResponse::from)
            .ok_or_else(|| AppError::NotFound("카테고리를 찾을 수 없습니다".to_string()))
    }

    /// 활동이 사용 중인 카테고리는 삭제할 수 없습니다 (409).
    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let id = parse_object_id(id)?;

        let in_use = self.activity_repo.count_by_category(&id).await?;
        if in_use > 0 {
            return Err(AppError::ConflictError(format!(
                "{}개의 활동이 사용 중인 카테고리입니다",
                in_use
            )));
        }

        if !self.category_repo.delete(&id).await? {
            return Err(AppError::NotFound("카테고리를 찾을 수 없습니다".to_string()));
        }
        Ok(())
    }

    /// 활동 생성/수정 시 카테고리 존재 확인
    pub async fn resolve(&self, id: &str) -> Result<ObjectId, AppError> {
        let id = parse_object_id(id)?;
        match self.category_repo.find_by_id(&id).await? {
            Some(_) => Ok(id),
            None => Err(AppError::ValidationError("존재하지 않는 카테고리입니다".to_string())),
        }
    }
}
