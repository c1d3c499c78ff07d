//! 일정 핸들러 (`/api/itineraries`)

use actix_web::{delete, get, post, put, web, HttpResponse};
use validator::Validate;

use crate::core::errors::AppError;
use crate::domain::auth::{AuthenticatedUser, OptionalUser};
use crate::domain::dto::catalog::{
    ActivationRequest, CreateItineraryRequest, FlagRequest, RateRequest, UpdateItineraryRequest,
};
use crate::domain::entities::users::Role;
use crate::domain::models::filters::ItineraryQuery;
use crate::services::catalog::ItineraryService;

#[get("")]
pub async fn list_itineraries(query: web::Query<ItineraryQuery>) -> Result<HttpResponse, AppError> {
    let service = ItineraryService::instance();
    let page = service.list(query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(page))
}

#[get("/mine")]
pub async fn my_itineraries(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    user.require_any(&[Role::TourGuide])?;

    let service = ItineraryService::instance();
    let itineraries = service.mine(&user.object_id()?).await?;
    Ok(HttpResponse::Ok().json(itineraries))
}

#[get("/{itinerary_id}")]
pub async fn get_itinerary(viewer: OptionalUser, itinerary_id: web::Path<String>) -> Result<HttpResponse, AppError> {
    let service = ItineraryService::instance();
    let itinerary = service.get(viewer.0.as_ref(), &itinerary_id).await?;
    Ok(HttpResponse::Ok().json(itinerary))
}

#[post("")]
pub async fn create_itinerary(
    user: AuthenticatedUser,
    payload: web::Json<CreateItineraryRequest>,
) -> Result<HttpResponse, AppError> {
    user.require_any(&[Role::TourGuide])?;
    payload.validate()?;

    let service = ItineraryService::instance();
    let itinerary = service.create(&user.object_id()?, payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(itinerary))
}

#[put("/{itinerary_id}")]
pub async fn update_itinerary(
    user: AuthenticatedUser,
    itinerary_id: web::Path<String>,
    payload: web::Json<UpdateItineraryRequest>,
) -> Result<HttpResponse, AppError> {
    user.require_any(&[Role::TourGuide])?;
    payload.validate()?;

    let service = ItineraryService::instance();
    let itinerary = service
        .update(&user.object_id()?, &itinerary_id, payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(itinerary))
}

#[put("/{itinerary_id}/activation")]
pub async fn set_activation(
    user: AuthenticatedUser,
    itinerary_id: web::Path<String>,
    payload: web::Json<ActivationRequest>,
) -> Result<HttpResponse, AppError> {
    user.require_any(&[Role::TourGuide])?;

    let service = ItineraryService::instance();
    let itinerary = service
        .set_active(&user.object_id()?, &itinerary_id, payload.active)
        .await?;
    Ok(HttpResponse::Ok().json(itinerary))
}

#[delete("/{itinerary_id}")]
pub async fn delete_itinerary(user: AuthenticatedUser, itinerary_id: web::Path<String>) -> Result<HttpResponse, AppError> {
    user.require_any(&[Role::TourGuide])?;

    let service = ItineraryService::instance();
    service.delete(&user.object_id()?, &itinerary_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[post("/{itinerary_id}/ratings")]
pub async fn rate_itinerary(
    user: AuthenticatedUser,
    itinerary_id: web::Path<String>,
    payload: web::Json<RateRequest>,
) -> Result<HttpResponse, AppError> {
    user.require_any(&[Role::Tourist])?;
    payload.validate()?;

    let service = ItineraryService::instance();
    let itinerary = service
        .rate(&user.object_id()?, &itinerary_id, payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(itinerary))
}

#[put("/{itinerary_id}/flag")]
pub async fn flag_itinerary(
    user: AuthenticatedUser,
    itinerary_id: web::Path<String>,
    payload: web::Json<FlagRequest>,
) -> Result<HttpResponse, AppError> {
    user.require_any(&[Role::Admin])?;

    let service = ItineraryService::instance();
    let itinerary = service.set_flag(&itinerary_id, payload.flagged).await?;
    Ok(HttpResponse::Ok().json(itinerary))
}
