use serde::{Deserialize, Serialize};

use crate::domain::models::pricing::RevenueBreakdown;

/// 항목별 매출
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevenueLine {
    pub item: String,
    pub name: String,
    /// 확정 예약 수 또는 판매 수량
    pub units: i64,
    #[serde(flatten)]
    pub breakdown: RevenueBreakdown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevenueReport {
    #[serde(flatten)]
    pub totals: RevenueBreakdown,
    pub items: Vec<RevenueLine>,
}

/// 관리자용 플랫폼 수익 요약
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformRevenue {
    pub bookings: RevenueBreakdown,
    pub orders: RevenueBreakdown,
    /// 예약 + 주문 수수료 합계
    pub total_platform_fee: f64,
}
