//! # 호텔 / 항공 핸들러
//!
//! 검색은 외부 여행 API 응답을 그대로 전달하고, 예약은 결제 후 예약 내역으로 기록합니다.

use actix_web::{get, post, web, HttpResponse};
use validator::Validate;

use crate::core::errors::AppError;
use crate::domain::auth::AuthenticatedUser;
use crate::domain::dto::travel::{FlightBookingRequest, FlightSearchQuery, HotelBookingRequest, HotelSearchQuery};
use crate::domain::entities::users::Role;
use crate::services::travel::TravelService;

#[get("/search")]
pub async fn search_hotels(query: web::Query<HotelSearchQuery>) -> Result<HttpResponse, AppError> {
    query.validate()?;

    let service = TravelService::instance();
    let offers = service.search_hotels(&query).await?;
    Ok(HttpResponse::Ok().json(offers))
}

#[post("/book")]
pub async fn book_hotel(user: AuthenticatedUser, payload: web::Json<HotelBookingRequest>) -> Result<HttpResponse, AppError> {
    user.require_any(&[Role::Tourist])?;
    payload.validate()?;

    let service = TravelService::instance();
    let receipt = service.book_hotel(&user.object_id()?, payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(receipt))
}

#[get("/search")]
pub async fn search_flights(query: web::Query<FlightSearchQuery>) -> Result<HttpResponse, AppError> {
    query.validate()?;

    let service = TravelService::instance();
    let offers = service.search_flights(&query).await?;
    Ok(HttpResponse::Ok().json(offers))
}

#[post("/book")]
pub async fn book_flight(user: AuthenticatedUser, payload: web::Json<FlightBookingRequest>) -> Result<HttpResponse, AppError> {
    user.require_any(&[Role::Tourist])?;
    payload.validate()?;

    let service = TravelService::instance();
    let receipt = service.book_flight(&user.object_id()?, payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(receipt))
}
