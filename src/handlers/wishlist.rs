//! 위시리스트 핸들러 (`/api/wishlist`, 관광객 전용)
//!
//! `{kind}`는 `products`, `activities`, `itineraries` 중 하나입니다.

use actix_web::{delete, get, post, web, HttpResponse};

use crate::core::errors::AppError;
use crate::domain::auth::AuthenticatedUser;
use crate::services::commerce::WishlistService;

#[get("")]
pub async fn get_wishlist(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let service = WishlistService::instance();
    let wishlist = service.get(&user.object_id()?).await?;
    Ok(HttpResponse::Ok().json(wishlist))
}

#[post("/{kind}/{item_id}")]
pub async fn add_to_wishlist(user: AuthenticatedUser, path: web::Path<(String, String)>) -> Result<HttpResponse, AppError> {
    let (kind, item_id) = path.into_inner();

    let service = WishlistService::instance();
    let wishlist = service.add(&user.object_id()?, &kind, &item_id).await?;
    Ok(HttpResponse::Ok().json(wishlist))
}

#[delete("/{kind}/{item_id}")]
pub async fn remove_from_wishlist(
    user: AuthenticatedUser,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let (kind, item_id) = path.into_inner();

    let service = WishlistService::instance();
    let wishlist = service.remove(&user.object_id()?, &kind, &item_id).await?;
    Ok(HttpResponse::Ok().json(wishlist))
}
