//! 상품 핸들러 (`/api/products`)
//!
//! 판매자와 관리자가 상품을 등록합니다. 수정/삭제/보관은 소유 판매자 또는 관리자만 가능합니다.

use actix_multipart::Multipart;
use actix_web::{delete, get, post, put, web, HttpResponse};
use validator::Validate;

use crate::core::errors::AppError;
use crate::domain::auth::{AuthenticatedUser, OptionalUser};
use crate::domain::dto::catalog::{ArchiveRequest, CreateProductRequest, RateRequest, UpdateProductRequest};
use crate::domain::entities::users::Role;
use crate::domain::models::filters::ProductQuery;
use crate::handlers::read_form;
use crate::services::catalog::ProductService;

const PRODUCT_MANAGERS: &[Role] = &[Role::Seller, Role::Admin];

/// 상품 사진 multipart 필드명
const PICTURE_FIELD: &str = "picture";

#[get("")]
pub async fn list_products(viewer: OptionalUser, query: web::Query<ProductQuery>) -> Result<HttpResponse, AppError> {
    let service = ProductService::instance();
    let page = service.list(viewer.0.as_ref(), query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(page))
}

#[get("/mine")]
pub async fn my_products(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    user.require_any(PRODUCT_MANAGERS)?;

    let service = ProductService::instance();
    let products = service.mine(&user.object_id()?).await?;
    Ok(HttpResponse::Ok().json(products))
}

#[get("/{product_id}")]
pub async fn get_product(viewer: OptionalUser, product_id: web::Path<String>) -> Result<HttpResponse, AppError> {
    let service = ProductService::instance();
    let product = service.get(viewer.0.as_ref(), &product_id).await?;
    Ok(HttpResponse::Ok().json(product))
}

#[post("")]
pub async fn create_product(
    user: AuthenticatedUser,
    payload: web::Json<CreateProductRequest>,
) -> Result<HttpResponse, AppError> {
    user.require_any(PRODUCT_MANAGERS)?;
    payload.validate()?;

    let service = ProductService::instance();
    let product = service.create(&user, payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(product))
}

#[put("/{product_id}")]
pub async fn update_product(
    user: AuthenticatedUser,
    product_id: web::Path<String>,
    payload: web::Json<UpdateProductRequest>,
) -> Result<HttpResponse, AppError> {
    user.require_any(PRODUCT_MANAGERS)?;
    payload.validate()?;

    let service = ProductService::instance();
    let product = service.update(&user, &product_id, payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(product))
}

#[post("/{product_id}/picture")]
pub async fn upload_product_picture(
    user: AuthenticatedUser,
    product_id: web::Path<String>,
    payload: Multipart,
) -> Result<HttpResponse, AppError> {
    user.require_any(PRODUCT_MANAGERS)?;

    let mut form = read_form(payload).await?;
    let file = form.require_file(PICTURE_FIELD)?;

    let service = ProductService::instance();
    let product = service.update_picture(&user, &product_id, file).await?;
    Ok(HttpResponse::Ok().json(product))
}

#[put("/{product_id}/archive")]
pub async fn archive_product(
    user: AuthenticatedUser,
    product_id: web::Path<String>,
    payload: web::Json<ArchiveRequest>,
) -> Result<HttpResponse, AppError> {
    user.require_any(PRODUCT_MANAGERS)?;

    let service = ProductService::instance();
    let product = service.set_archived(&user, &product_id, payload.archived).await?;
    Ok(HttpResponse::Ok().json(product))
}

#[delete("/{product_id}")]
pub async fn delete_product(user: AuthenticatedUser, product_id: web::Path<String>) -> Result<HttpResponse, AppError> {
    user.require_any(PRODUCT_MANAGERS)?;

    let service = ProductService::instance();
    service.delete(&user, &product_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[post("/{product_id}/ratings")]
pub async fn rate_product(
    user: AuthenticatedUser,
    product_id: web::Path<String>,
    payload: web::Json<RateRequest>,
) -> Result<HttpResponse, AppError> {
    user.require_any(&[Role::Tourist])?;
    payload.validate()?;

    let service = ProductService::instance();
    let product = service
        .rate(&user.object_id()?, &product_id, payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(product))
}
