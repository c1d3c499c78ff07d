//! 주문 핸들러 (`/api/orders`, 관광객 전용)

use actix_web::{delete, get, post, web, HttpResponse};
use validator::Validate;

use crate::core::errors::AppError;
use crate::domain::auth::AuthenticatedUser;
use crate::domain::dto::commerce::CreateOrderRequest;
use crate::services::commerce::OrderService;

#[post("")]
pub async fn place_order(user: AuthenticatedUser, payload: web::Json<CreateOrderRequest>) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let service = OrderService::instance();
    let receipt = service.place(&user.object_id()?, payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(receipt))
}

#[get("")]
pub async fn list_orders(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let service = OrderService::instance();
    let orders = service.list(&user.object_id()?).await?;
    Ok(HttpResponse::Ok().json(orders))
}

#[delete("/{order_id}")]
pub async fn cancel_order(user: AuthenticatedUser, order_id: web::Path<String>) -> Result<HttpResponse, AppError> {
    let service = OrderService::instance();
    let order = service.cancel(&user.object_id()?, &order_id).await?;
    Ok(HttpResponse::Ok().json(order))
}
