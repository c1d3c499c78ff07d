//! # 활동 핸들러 (`/api/activities`)
//!
//! 스코프 전체가 선택적 인증이며, 변경 엔드포인트는 핸들러에서 역할을 확인합니다.
//! `/mine`은 `/{id}`보다 먼저 등록되어야 합니다.

use actix_web::{delete, get, post, put, web, HttpResponse};
use validator::Validate;

use crate::core::errors::AppError;
use crate::domain::auth::{AuthenticatedUser, OptionalUser};
use crate::domain::dto::catalog::{CreateActivityRequest, FlagRequest, RateRequest, UpdateActivityRequest};
use crate::domain::entities::users::Role;
use crate::domain::models::filters::ActivityQuery;
use crate::services::catalog::ActivityService;

#[get("")]
pub async fn list_activities(query: web::Query<ActivityQuery>) -> Result<HttpResponse, AppError> {
    let service = ActivityService::instance();
    let page = service.list(query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(page))
}

#[get("/mine")]
pub async fn my_activities(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    user.require_any(&[Role::Advertiser])?;

    let service = ActivityService::instance();
    let activities = service.mine(&user.object_id()?).await?;
    Ok(HttpResponse::Ok().json(activities))
}

#[get("/{activity_id}")]
pub async fn get_activity(viewer: OptionalUser, activity_id: web::Path<String>) -> Result<HttpResponse, AppError> {
    let service = ActivityService::instance();
    let activity = service.get(viewer.0.as_ref(), &activity_id).await?;
    Ok(HttpResponse::Ok().json(activity))
}

#[post("")]
pub async fn create_activity(
    user: AuthenticatedUser,
    payload: web::Json<CreateActivityRequest>,
) -> Result<HttpResponse, AppError> {
    user.require_any(&[Role::Advertiser])?;
    payload.validate()?;

    let service = ActivityService::instance();
    let activity = service.create(&user.object_id()?, payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(activity))
}

#[put("/{activity_id}")]
pub async fn update_activity(
    user: AuthenticatedUser,
    activity_id: web::Path<String>,
    payload: web::Json<UpdateActivityRequest>,
) -> Result<HttpResponse, AppError> {
    user.require_any(&[Role::Advertiser])?;
    payload.validate()?;

    let service = ActivityService::instance();
    let activity = service
        .update(&user.object_id()?, &activity_id, payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(activity))
}

#[delete("/{activity_id}")]
pub async fn delete_activity(user: AuthenticatedUser, activity_id: web::Path<String>) -> Result<HttpResponse, AppError> {
    user.require_any(&[Role::Advertiser])?;

    let service = ActivityService::instance();
    service.delete(&user.object_id()?, &activity_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[post("/{activity_id}/ratings")]
pub async fn rate_activity(
    user: AuthenticatedUser,
    activity_id: web::Path<String>,
    payload: web::Json<RateRequest>,
) -> Result<HttpResponse, AppError> {
    user.require_any(&[Role::Tourist])?;
    payload.validate()?;

    let service = ActivityService::instance();
    let activity = service
        .rate(&user.object_id()?, &activity_id, payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(activity))
}

#[put("/{activity_id}/flag")]
pub async fn flag_activity(
    user: AuthenticatedUser,
    activity_id: web::Path<String>,
    payload: web::Json<FlagRequest>,
) -> Result<HttpResponse, AppError> {
    user.require_any(&[Role::Admin])?;

    let service = ActivityService::instance();
    let activity = service.set_flag(&activity_id, payload.flagged).await?;
    Ok(HttpResponse::Ok().json(activity))
}
