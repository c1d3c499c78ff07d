//! 교통편 핸들러 (`/api/transportation`)

use actix_web::{delete, get, post, put, web, HttpResponse};
use validator::Validate;

use crate::core::errors::AppError;
use crate::domain::auth::AuthenticatedUser;
use crate::domain::dto::catalog::{CreateTransportationRequest, UpdateTransportationRequest};
use crate::domain::entities::users::Role;
use crate::services::catalog::TransportationService;

#[get("")]
pub async fn list_transportation() -> Result<HttpResponse, AppError> {
    let service = TransportationService::instance();
    let items = service.list_upcoming().await?;
    Ok(HttpResponse::Ok().json(items))
}

#[get("/mine")]
pub async fn my_transportation(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    user.require_any(&[Role::Advertiser])?;

    let service = TransportationService::instance();
    let items = service.mine(&user.object_id()?).await?;
    Ok(HttpResponse::Ok().json(items))
}

#[get("/{transportation_id}")]
pub async fn get_transportation(transportation_id: web::Path<String>) -> Result<HttpResponse, AppError> {
    let service = TransportationService::instance();
    let item = service.get(&transportation_id).await?;
    Ok(HttpResponse::Ok().json(item))
}

#[post("")]
pub async fn create_transportation(
    user: AuthenticatedUser,
    payload: web::Json<CreateTransportationRequest>,
) -> Result<HttpResponse, AppError> {
    user.require_any(&[Role::Advertiser])?;
    payload.validate()?;

    let service = TransportationService::instance();
    let item = service.create(&user.object_id()?, payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(item))
}

#[put("/{transportation_id}")]
pub async fn update_transportation(
    user: AuthenticatedUser,
    transportation_id: web::Path<String>,
    payload: web::Json<UpdateTransportationRequest>,
) -> Result<HttpResponse, AppError> {
    user.require_any(&[Role::Advertiser])?;
    payload.validate()?;

    let service = TransportationService::instance();
    let item = service
        .update(&user.object_id()?, &transportation_id, payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(item))
}

#[delete("/{transportation_id}")]
pub async fn delete_transportation(
    user: AuthenticatedUser,
    transportation_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    user.require_any(&[Role::Advertiser])?;

    let service = TransportationService::instance();
    service.delete(&user.object_id()?, &transportation_id).await?;
    Ok(HttpResponse::NoContent().finish())
}
