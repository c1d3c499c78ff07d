//! 지갑(`wallets`) 리포지토리
//!
//! 잔액과 포인트 변경은 모두 조건부 `$inc`로 처리합니다.
//! 차감 조건이 맞지 않으면 `None`을 반환하고 서비스가 409로 변환합니다.

use std::sync::Arc;

use mongodb::bson::{doc, oid::ObjectId, DateTime};

use crate::core::errors::AppError;
use crate::db::Database;
use crate::domain::entities::Wallet;
use crate::repositories::base;
use singleton_macro::repository;

#[repository(name = "wallet", collection = "wallets")]
pub struct WalletRepository {
    db: Arc<Database>,
}

impl WalletRepository {
    pub async fn create(&self, mut wallet: Wallet) -> Result<Wallet, AppError> {
        let id = base::insert(&self.collection::<Wallet>(), &wallet).await?;
        wallet.id = Some(id);
        Ok(wallet)
    }

    pub async fn find_by_owner(&self, owner: &ObjectId) -> Result<Option<Wallet>, AppError> {
        base::find_one(&self.collection::<Wallet>(), doc! { "owner": owner }).await
    }

    /// 잔액 차감 (잔액 부족 시 `None`)
    pub async fn debit(&self, owner: &ObjectId, amount: f64) -> Result<Option<Wallet>, AppError> {
        base::update_one_returning(
            &self.collection::<Wallet>(),
            doc! { "owner": owner, "balance": { "$gte": amount } },
            doc! { "$inc": { "balance": -amount }, "$set": { "updated_at": DateTime::now() } },
        )
        .await
    }

    pub async fn credit(&self, owner: &ObjectId, amount: f64) -> Result<Option<Wallet>, AppError> {
        base::update_one_returning(
            &self.collection::<Wallet>(),
            doc! { "owner": owner },
            doc! { "$inc": { "balance": amount }, "$set": { "updated_at": DateTime::now() } },
        )
        .await
    }

    /// 적립 포인트와 누적 포인트를 함께 증가
    pub async fn add_points(&self, owner: &ObjectId, points: i64) -> Result<Option<Wallet>, AppError> {
        base::update_one_returning(
            &self.collection::<Wallet>(),
            doc! { "owner": owner },
            doc! {
                "$inc": { "loyalty_points": points, "lifetime_points": points },
                "$set": { "updated_at": DateTime::now() },
            },
        )
        .await
    }

    /// 포인트를 현금으로 전환 (포인트 부족 시 `None`)
    pub async fn redeem(&self, owner: &ObjectId, points: i64, cash: f64) -> Result<Option<Wallet>, AppError> {
        base::update_one_returning(
            &self.collection::<Wallet>(),
            doc! { "owner": owner, "loyalty_points": { "$gte": points } },
            doc! {
                "$inc": { "loyalty_points": -points, "balance": cash },
                "$set": { "updated_at": DateTime::now() },
            },
        )
        .await
    }

    pub async fn delete_by_owner(&self, owner: &ObjectId) -> Result<bool, AppError> {
        let result = self
            .collection::<Wallet>()
            .delete_one(doc! { "owner": owner })
            .await?;
        Ok(result.deleted_count > 0)
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        base::create_indexes(
            &self.collection::<Wallet>(),
            vec![base::unique_index(doc! { "owner": 1 }, "owner_unique")],
        )
        .await
    }
}
