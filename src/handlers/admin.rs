//! # 관리자 핸들러
//!
//! `/api/admin` 스코프는 미들웨어에서 관리자 역할을 요구합니다.
//!
//! | 메서드 | 경로 | 설명 |
//! |--------|------|------|
//! | `GET` | `/users?role&status&page&limit` | 사용자 목록 |
//! | `PUT` | `/users/{id}/status` | 가입 승인/거절 |
//! | `DELETE` | `/users/{id}` | 계정 삭제 |
//! | `POST` | `/accounts` | 관광청 담당자/관리자 계정 생성 |
//! | `GET` | `/revenue` | 플랫폼 수수료 수익 |

use actix_web::{delete, get, post, put, web, HttpResponse};
use validator::Validate;

use crate::core::errors::AppError;
use crate::domain::auth::AuthenticatedUser;
use crate::domain::dto::users::{CreateAccountRequest, UpdateAccountStatusRequest, UserListQuery};
use crate::services::commerce::RevenueService;
use crate::services::users::AdminService;

#[get("/users")]
pub async fn list_users(query: web::Query<UserListQuery>) -> Result<HttpResponse, AppError> {
    let service = AdminService::instance();
    let page = service.list_users(query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(page))
}

#[put("/users/{user_id}/status")]
pub async fn update_user_status(
    user_id: web::Path<String>,
    payload: web::Json<UpdateAccountStatusRequest>,
) -> Result<HttpResponse, AppError> {
    let service = AdminService::instance();
    let user = service.update_status(&user_id, payload.into_inner().status).await?;
    Ok(HttpResponse::Ok().json(user))
}

#[delete("/users/{user_id}")]
pub async fn delete_user(admin: AuthenticatedUser, user_id: web::Path<String>) -> Result<HttpResponse, AppError> {
    let service = AdminService::instance();
    service.delete_user(&admin.object_id()?, &user_id).await?;

    log::info!("관리자 {}가 사용자 {} 삭제", admin.username, user_id);
    Ok(HttpResponse::NoContent().finish())
}

#[post("/accounts")]
pub async fn create_account(payload: web::Json<CreateAccountRequest>) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let service = AdminService::instance();
    let user = service.create_account(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(user))
}

#[get("/revenue")]
pub async fn platform_revenue() -> Result<HttpResponse, AppError> {
    let service = RevenueService::instance();
    let revenue = service.platform().await?;
    Ok(HttpResponse::Ok().json(revenue))
}
