//! 판매 리포트 핸들러 (`/api/revenue`)

use actix_web::{get, HttpResponse};

use crate::core::errors::AppError;
use crate::domain::auth::AuthenticatedUser;
use crate::services::commerce::RevenueService;

/// 광고주/가이드/판매자 본인의 항목별 매출
#[get("")]
pub async fn my_revenue(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let service = RevenueService::instance();
    let report = service.provider_report(&user).await?;
    Ok(HttpResponse::Ok().json(report))
}
