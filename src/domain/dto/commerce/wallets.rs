use serde::{Deserialize, Serialize};

use crate::domain::entities::Wallet;
use crate::domain::models::pricing::LoyaltyLevel;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletResponse {
    pub balance: f64,
    pub loyalty_points: i64,
    pub lifetime_points: i64,
    pub level: u8,
}

impl From<Wallet> for WalletResponse {
    fn from(w: Wallet) -> Self {
        Self {
            balance: w.balance,
            loyalty_points: w.loyalty_points,
            lifetime_points: w.lifetime_points,
            level: LoyaltyLevel::from_lifetime_points(w.lifetime_points).number(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedeemResponse {
    pub points_redeemed: i64,
    pub amount_credited: f64,
    pub wallet: WalletResponse,
}
