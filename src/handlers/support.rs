//! # 민원 / 알림 핸들러
//!
//! - `/api/complaints` - 관광객 접수, 관리자 답변/상태 변경
//! - `/api/notifications` - 본인 알림 조회/읽음 처리

use actix_web::{get, post, put, web, HttpResponse};
use validator::Validate;

use crate::core::errors::AppError;
use crate::domain::auth::AuthenticatedUser;
use crate::domain::dto::support::{
    ComplaintQuery, CreateComplaintRequest, ReplyComplaintRequest, UpdateComplaintStatusRequest,
};
use crate::domain::entities::users::Role;
use crate::services::support::{ComplaintService, NotificationService};

#[post("")]
pub async fn file_complaint(
    user: AuthenticatedUser,
    payload: web::Json<CreateComplaintRequest>,
) -> Result<HttpResponse, AppError> {
    user.require_any(&[Role::Tourist])?;
    payload.validate()?;

    let service = ComplaintService::instance();
    let complaint = service.file(user.object_id()?, payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(complaint))
}

#[get("")]
pub async fn list_complaints(user: AuthenticatedUser, query: web::Query<ComplaintQuery>) -> Result<HttpResponse, AppError> {
    let service = ComplaintService::instance();
    let complaints = service.list(&user, query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(complaints))
}

#[get("/{complaint_id}")]
pub async fn get_complaint(user: AuthenticatedUser, complaint_id: web::Path<String>) -> Result<HttpResponse, AppError> {
    let service = ComplaintService::instance();
    let complaint = service.get(&user, &complaint_id).await?;
    Ok(HttpResponse::Ok().json(complaint))
}

#[put("/{complaint_id}/reply")]
pub async fn reply_complaint(
    user: AuthenticatedUser,
    complaint_id: web::Path<String>,
    payload: web::Json<ReplyComplaintRequest>,
) -> Result<HttpResponse, AppError> {
    user.require_any(&[Role::Admin])?;
    payload.validate()?;

    let service = ComplaintService::instance();
    let complaint = service.reply(&complaint_id, payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(complaint))
}

#[put("/{complaint_id}/status")]
pub async fn update_complaint_status(
    user: AuthenticatedUser,
    complaint_id: web::Path<String>,
    payload: web::Json<UpdateComplaintStatusRequest>,
) -> Result<HttpResponse, AppError> {
    user.require_any(&[Role::Admin])?;

    let service = ComplaintService::instance();
    let complaint = service
        .update_status(&complaint_id, payload.into_inner().status)
        .await?;
    Ok(HttpResponse::Ok().json(complaint))
}

#[get("")]
pub async fn list_notifications(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let service = NotificationService::instance();
    let notifications = service.list(&user.object_id()?).await?;
    Ok(HttpResponse::Ok().json(notifications))
}

#[put("/{notification_id}/read")]
pub async fn mark_notification_read(
    user: AuthenticatedUser,
    notification_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let service = NotificationService::instance();
    let notification = service.mark_read(&user.object_id()?, &notification_id).await?;
    Ok(HttpResponse::Ok().json(notification))
}
