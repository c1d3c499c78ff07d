//! 역사적 장소 핸들러 (`/api/places`)

use actix_multipart::Multipart;
use actix_web::{delete, get, post, put, web, HttpResponse};
use validator::Validate;

use crate::core::errors::AppError;
use crate::domain::auth::AuthenticatedUser;
use crate::domain::dto::catalog::{CreatePlaceRequest, PlaceQuery, UpdatePlaceRequest};
use crate::domain::entities::users::Role;
use crate::handlers::read_form;
use crate::services::catalog::PlaceService;

/// 장소 사진 multipart 필드명
const PICTURE_FIELD: &str = "picture";

#[get("")]
pub async fn list_places(query: web::Query<PlaceQuery>) -> Result<HttpResponse, AppError> {
    let service = PlaceService::instance();
    let page = service.list(query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(page))
}

#[get("/mine")]
pub async fn my_places(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    user.require_any(&[Role::TourismGovernor])?;

    let service = PlaceService::instance();
    let places = service.mine(&user.object_id()?).await?;
    Ok(HttpResponse::Ok().json(places))
}

#[get("/{place_id}")]
pub async fn get_place(place_id: web::Path<String>) -> Result<HttpResponse, AppError> {
    let service = PlaceService::instance();
    let place = service.get(&place_id).await?;
    Ok(HttpResponse::Ok().json(place))
}

#[post("")]
pub async fn create_place(user: AuthenticatedUser, payload: web::Json<CreatePlaceRequest>) -> Result<HttpResponse, AppError> {
    user.require_any(&[Role::TourismGovernor])?;
    payload.validate()?;

    let service = PlaceService::instance();
    let place = service.create(&user.object_id()?, payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(place))
}

#[put("/{place_id}")]
pub async fn update_place(
    user: AuthenticatedUser,
    place_id: web::Path<String>,
    payload: web::Json<UpdatePlaceRequest>,
) -> Result<HttpResponse, AppError> {
    user.require_any(&[Role::TourismGovernor])?;
    payload.validate()?;

    let service = PlaceService::instance();
    let place = service.update(&user.object_id()?, &place_id, payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(place))
}

#[post("/{place_id}/pictures")]
pub async fn add_place_picture(
    user: AuthenticatedUser,
    place_id: web::Path<String>,
    payload: Multipart,
) -> Result<HttpResponse, AppError> {
    user.require_any(&[Role::TourismGovernor])?;

    let mut form = read_form(payload).await?;
    let file = form.require_file(PICTURE_FIELD)?;

    let service = PlaceService::instance();
    let place = service.add_picture(&user.object_id()?, &place_id, file).await?;
    Ok(HttpResponse::Ok().json(place))
}

#[delete("/{place_id}")]
pub async fn delete_place(user: AuthenticatedUser, place_id: web::Path<String>) -> Result<HttpResponse, AppError> {
    user.require_any(&[Role::TourismGovernor])?;

    let service = PlaceService::instance();
    service.delete(&user.object_id()?, &place_id).await?;
    Ok(HttpResponse::NoContent().finish())
}
