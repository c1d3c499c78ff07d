//! 태그(`/api/tags`)와 카테고리(`/api/categories`) 핸들러
//!
//! 조회는 공개, 변경은 태그 종류에 따라 관리자 또는 관광청 담당자만 가능합니다.

use actix_web::{delete, get, post, put, web, HttpResponse};
use validator::Validate;

use crate::core::errors::AppError;
use crate::domain::auth::AuthenticatedUser;
use crate::domain::dto::catalog::{CategoryRequest, CreateTagRequest, TagQuery, UpdateTagRequest};
use crate::domain::entities::users::Role;
use crate::services::catalog::{CategoryService, TagService};

const TAG_MANAGERS: &[Role] = &[Role::Admin, Role::TourismGovernor];

#[get("")]
pub async fn list_tags(query: web::Query<TagQuery>) -> Result<HttpResponse, AppError> {
    let service = TagService::instance();
    let tags = service.list(query.into_inner().kind).await?;
    Ok(HttpResponse::Ok().json(tags))
}

#[post("")]
pub async fn create_tag(user: AuthenticatedUser, payload: web::Json<CreateTagRequest>) -> Result<HttpResponse, AppError> {
    user.require_any(TAG_MANAGERS)?;
    payload.validate()?;

    let service = TagService::instance();
    let tag = service.create(&user, payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(tag))
}

#[put("/{tag_id}")]
pub async fn update_tag(
    user: AuthenticatedUser,
    tag_id: web::Path<String>,
    payload: web::Json<UpdateTagRequest>,
) -> Result<HttpResponse, AppError> {
    user.require_any(TAG_MANAGERS)?;
    payload.validate()?;

    let service = TagService::instance();
    let tag = service.update(&user, &tag_id, payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(tag))
}

#[delete("/{tag_id}")]
pub async fn delete_tag(user: AuthenticatedUser, tag_id: web::Path<String>) -> Result<HttpResponse, AppError> {
    user.require_any(TAG_MANAGERS)?;

    let service = TagService::instance();
    service.delete(&user, &tag_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[get("")]
pub async fn list_categories() -> Result<HttpResponse, AppError> {
    let service = CategoryService::instance();
    let categories = service.list().await?;
    Ok(HttpResponse::Ok().json(categories))
}

#[post("")]
pub async fn create_category(user: AuthenticatedUser, payload: web::Json<CategoryRequest>) -> Result<HttpResponse, AppError> {
    user.require_any(&[Role::Admin])?;
    payload.validate()?;

    let service = CategoryService::instance();
    let category = service.create(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(category))
}

#[put("/{category_id}")]
pub async fn rename_category(
    user: AuthenticatedUser,
    category_id: web::Path<String>,
    payload: web::Json<CategoryRequest>,
) -> Result<HttpResponse, AppError> {
    user.require_any(&[Role::Admin])?;
    payload.validate()?;

    let service = CategoryService::instance();
    let category = service.rename(&category_id, payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(category))
}

#[delete("/{category_id}")]
pub async fn delete_category(user: AuthenticatedUser, category_id: web::Path<String>) -> Result<HttpResponse, AppError> {
    user.require_any(&[Role::Admin])?;

    let service = CategoryService::instance();
    service.delete(&category_id).await?;
    Ok(HttpResponse::NoContent().finish())
}
