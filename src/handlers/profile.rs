//! 프로필 핸들러 (`/api/profile`)

use actix_multipart::Multipart;
use actix_web::{get, post, put, web, HttpResponse};
use validator::Validate;

use crate::core::errors::AppError;
use crate::domain::auth::AuthenticatedUser;
use crate::domain::dto::users::UpdateProfileRequest;
use crate::domain::entities::users::Role;
use crate::handlers::read_form;
use crate::services::users::{ProfileImage, UserService};

/// 프로필 사진 multipart 필드명
const PICTURE_FIELD: &str = "profilePicture";
/// 로고 multipart 필드명
const LOGO_FIELD: &str = "logo";

#[get("")]
pub async fn get_profile(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let service = UserService::instance();
    let profile = service.me(&user.object_id()?).await?;
    Ok(HttpResponse::Ok().json(profile))
}

#[put("")]
pub async fn update_profile(
    user: AuthenticatedUser,
    payload: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let service = UserService::instance();
    let profile = service.update_profile(&user.object_id()?, payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(profile))
}

#[put("/terms")]
pub async fn accept_terms(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    user.require_any(&[Role::Advertiser, Role::TourGuide, Role::Seller])?;

    let service = UserService::instance();
    let profile = service.accept_terms(&user.object_id()?).await?;
    Ok(HttpResponse::Ok().json(profile))
}

#[post("/picture")]
pub async fn upload_picture(user: AuthenticatedUser, payload: Multipart) -> Result<HttpResponse, AppError> {
    user.require_any(&[Role::Tourist, Role::TourGuide])?;

    let mut form = read_form(payload).await?;
    let file = form.require_file(PICTURE_FIELD)?;

    let service = UserService::instance();
    let profile = service
        .update_profile_image(&user.object_id()?, ProfileImage::Picture, file)
        .await?;
    Ok(HttpResponse::Ok().json(profile))
}

#[post("/logo")]
pub async fn upload_logo(user: AuthenticatedUser, payload: Multipart) -> Result<HttpResponse, AppError> {
    user.require_any(&[Role::Advertiser, Role::Seller])?;

    let mut form = read_form(payload).await?;
    let file = form.require_file(LOGO_FIELD)?;

    let service = UserService::instance();
    let profile = service
        .update_profile_image(&user.object_id()?, ProfileImage::Logo, file)
        .await?;
    Ok(HttpResponse::Ok().json(profile))
}
