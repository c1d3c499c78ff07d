//! 예약 핸들러 (`/api/bookings`, 관광객 전용)

use actix_web::{delete, get, post, web, HttpResponse};

use crate::core::errors::AppError;
use crate::domain::auth::AuthenticatedUser;
use crate::domain::dto::commerce::{BookingQuery, CreateBookingRequest};
use crate::services::commerce::BookingService;

#[post("")]
pub async fn create_booking(
    user: AuthenticatedUser,
    payload: web::Json<CreateBookingRequest>,
) -> Result<HttpResponse, AppError> {
    let service = BookingService::instance();
    let receipt = service.create(&user.object_id()?, payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(receipt))
}

#[get("")]
pub async fn list_bookings(user: AuthenticatedUser, query: web::Query<BookingQuery>) -> Result<HttpResponse, AppError> {
    let service = BookingService::instance();
    let bookings = service.list(&user.object_id()?, query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(bookings))
}

#[get("/{booking_id}")]
pub async fn get_booking(user: AuthenticatedUser, booking_id: web::Path<String>) -> Result<HttpResponse, AppError> {
    let service = BookingService::instance();
    let booking = service.get(&user.object_id()?, &booking_id).await?;
    Ok(HttpResponse::Ok().json(booking))
}

/// 예약 취소. 진행 48시간 전까지만 가능하며 결제 금액은 지갑으로 환불됩니다.
#[delete("/{booking_id}")]
pub async fn cancel_booking(user: AuthenticatedUser, booking_id: web::Path<String>) -> Result<HttpResponse, AppError> {
    let service = BookingService::instance();
    let booking = service.cancel(&user.object_id()?, &booking_id).await?;
    Ok(HttpResponse::Ok().json(booking))
}
