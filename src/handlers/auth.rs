//! # 인증 핸들러
//!
//! 회원가입, 로그인, 내 정보, 비밀번호 변경 엔드포인트입니다.
//!
//! | 메서드 | 경로 | 설명 |
//! |--------|------|------|
//! | `POST` | `/api/tourist/register` | 관광객 가입 (JSON) |
//! | `POST` | `/api/{role}/register` | 광고주/투어 가이드/판매자 가입 (multipart) |
//! | `POST` | `/api/auth/login` | 사용자명 또는 이메일 로그인 |
//! | `GET` | `/api/auth/me` | 내 정보 |
//! | `PUT` | `/api/auth/password` | 비밀번호 변경 |

use actix_multipart::Multipart;
use actix_web::{get, post, put, web, HttpResponse};
use validator::Validate;

use crate::core::errors::AppError;
use crate::domain::auth::AuthenticatedUser;
use crate::domain::dto::users::{ChangePasswordRequest, LoginRequest, TouristRegisterRequest};
use crate::domain::entities::users::Role;
use crate::handlers::read_form;
use crate::services::users::{RegistrationService, UserService};

#[post("/api/tourist/register")]
pub async fn register_tourist(payload: web::Json<TouristRegisterRequest>) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let service = RegistrationService::instance();
    let user = service.register_tourist(payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(user))
}

/// 서류 제출이 필요한 역할의 가입
#[post("/api/{role}/register")]
pub async fn register_provider(role: web::Path<String>, payload: Multipart) -> Result<HttpResponse, AppError> {
    let role = Role::from_path_segment(&role)
        .ok_or_else(|| AppError::ValidationError(format!("가입할 수 없는 역할입니다: {}", role)))?;

    let form = read_form(payload).await?;
    let service = RegistrationService::instance();
    let user = service.register_provider(role, form).await?;

    Ok(HttpResponse::Created().json(user))
}

#[post("/login")]
pub async fn login(payload: web::Json<LoginRequest>) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let service = UserService::instance();
    let response = service.login(payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(response))
}

#[get("/me")]
pub async fn me(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let service = UserService::instance();
    let response = service.me(&user.object_id()?).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[put("/password")]
pub async fn change_password(
    user: AuthenticatedUser,
    payload: web::Json<ChangePasswordRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let service = UserService::instance();
    service.change_password(&user.object_id()?, payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "비밀번호가 변경되었습니다" })))
}
