//! # 지갑 서비스
//!
//! 관광객 지갑의 잔액 결제/환불과 로열티 포인트 적립/교환을 담당합니다.
//! 잔액 차감과 포인트 교환은 조건부 원자 갱신이므로 동시 요청에도
//! 잔액이 음수가 되지 않습니다.

use std::sync::Arc;

use mongodb::bson::oid::ObjectId;

use crate::core::errors::AppError;
use crate::domain::dto::commerce::{RedeemResponse, WalletResponse};
use crate::domain::entities::{PaymentMethod, Wallet};
use crate::domain::models::pricing::{points_for_payment, redeemable, round_currency, LoyaltyLevel};
use crate::repositories::commerce::WalletRepository;
use singleton_macro::service;

/// 결제 후 후속 작업이 실패했을 때 되돌려야 할 금액
///
/// 카드 결제는 `charge`에서 돈이 움직이지 않으므로 환불할 것이 없습니다.
pub fn refund_due(method: PaymentMethod, amount: f64) -> Option<f64> {
    (method == PaymentMethod::Wallet && amount > 0.0).then(|| round_currency(amount))
}

#[service(name = "wallet")]
pub struct WalletService {
    wallet_repo: Arc<WalletRepository>,
}

impl WalletService {
    pub async fn get(&self, owner: &ObjectId) -> Result<WalletResponse, AppError> {
        Ok(self.find(owner).await?.into())
    }

    /// 결제 처리. 카드 결제는 외부에서 승인된 것으로 간주합니다.
    pub async fn charge(&self, owner: &ObjectId, amount: f64, method: PaymentMethod) -> Result<(), AppError> {
        if method == PaymentMethod::Card || amount <= 0.0 {
            return Ok(());
        }

        let amount = round_currency(amount);
        match self.wallet_repo.debit(owner, amount).await? {
            Some(wallet) => {
                log::debug!("💳 지갑 결제: {} -{} (잔액 {})", owner, amount, wallet.balance);
                Ok(())
            }
            None => {
                // 지갑이 없는 경우와 잔액 부족을 구분
                self.find(owner).await?;
                Err(AppError::ConflictError("지갑 잔액이 부족합니다".to_string()))
            }
        }
    }

    /// 취소 환불은 결제 수단과 관계없이 지갑으로 입금됩니다.
    pub async fn refund(&self, owner: &ObjectId, amount: f64) -> Result<(), AppError> {
        if amount <= 0.0 {
            return Ok(());
        }
        let amount = round_currency(amount);
        if self.wallet_repo.credit(owner, amount).await?.is_none() {
            log::warn!("환불 대상 지갑 없음: {} ({})", owner, amount);
            return Err(AppError::NotFound("지갑을 찾을 수 없습니다".to_string()));
        }
        log::info!("↩️ 지갑 환불: {} +{}", owner, amount);
        Ok(())
    }

    /// `charge` 이후 단계가 실패했을 때 지갑 결제분을 되돌립니다.
    ///
    /// 보상 실패는 원래 오류를 가리지 않도록 로그만 남깁니다.
    pub async fn reverse_charge(&self, owner: &ObjectId, amount: f64, method: PaymentMethod) {
        let Some(amount) = refund_due(method, amount) else {
            return;
        };
        if let Err(e) = self.refund(owner, amount).await {
            log::error!("결제 보상 환불 실패 ({} {}): {}", owner, amount, e);
        }
    }

    /// 결제 금액에 대한 로열티 포인트 적립. 적립 실패는 결제를 되돌리지 않습니다.
    pub async fn award_points(&self, owner: &ObjectId, amount: f64) -> i64 {
        let level = match self.wallet_repo.find_by_owner(owner).await {
            Ok(Some(wallet)) => LoyaltyLevel::from_lifetime_points(wallet.lifetime_points),
            Ok(None) => return 0,
            Err(e) => {
                log::error!("포인트 적립용 지갑 조회 실패 ({}): {}", owner, e);
                return 0;
            }
        };

        let points = points_for_payment(amount, level);
        if points == 0 {
            return 0;
        }

        match self.wallet_repo.add_points(owner, points).await {
            Ok(_) => points,
            Err(e) => {
                log::error!("포인트 적립 실패 ({}): {}", owner, e);
                0
            }
        }
    }

    /// 포인트를 교환 단위만큼 잔액으로 전환
    pub async fn redeem(&self, owner: &ObjectId) -> Result<RedeemResponse, AppError> {
        let wallet = self.find(owner).await?;

        let (points, cash) = redeemable(wallet.loyalty_points);
        if points == 0 {
            return Err(AppError::ValidationError("교환 가능한 포인트가 부족합니다".to_string()));
        }

        let updated = self
            .wallet_repo
            .redeem(owner, points, cash)
            .await?
            .ok_or_else(|| AppError::ConflictError("포인트가 이미 사용되었습니다".to_string()))?;

        log::info!("🎁 포인트 교환: {} {}점 → {}", owner, points, cash);
        Ok(RedeemResponse {
            points_redeemed: points,
            amount_credited: cash,
            wallet: updated.into(),
        })
    }

    async fn find(&self, owner: &ObjectId) -> Result<Wallet, AppError> {
        self.wallet_repo
            .find_by_owner(owner)
            .await?
            .ok_or_else(|| AppError::NotFound("지갑을 찾을 수 없습니다".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refund_due_only_for_wallet_payments() {
        assert_eq!(refund_due(PaymentMethod::Wallet, 120.456), Some(120.46));
        assert_eq!(refund_due(PaymentMethod::Card, 120.0), None);
        assert_eq!(refund_due(PaymentMethod::Wallet, 0.0), None);
    }
}
