//! 지갑 / 로열티 핸들러 (`/api/wallet`, 관광객 전용)

use actix_web::{get, post, HttpResponse};

use crate::core::errors::AppError;
use crate::domain::auth::AuthenticatedUser;
use crate::services::commerce::WalletService;

#[get("")]
pub async fn get_wallet(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let service = WalletService::instance();
    let wallet = service.get(&user.object_id()?).await?;
    Ok(HttpResponse::Ok().json(wallet))
}

/// 적립 포인트를 지갑 잔액으로 전환
#[post("/redeem")]
pub async fn redeem_points(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let service = WalletService::instance();
    let redeemed = service.redeem(&user.object_id()?).await?;
    Ok(HttpResponse::Ok().json(redeemed))
}
