//! 가격, 수수료, 로열티 포인트 계산
//!
//! 모든 금액은 소수점 둘째 자리로 반올림합니다.

use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};

/// 플랫폼 수수료율 (총 매출의 10%)
pub const PLATFORM_FEE_RATE: f64 = 0.10;

/// 예약 취소 가능 시한 (이용 시각 기준, 시간)
pub const CANCELLATION_WINDOW_HOURS: i64 = 48;

/// 한 번에 교환되는 포인트 단위
pub const POINTS_PER_REDEMPTION: i64 = 10_000;

/// 포인트 교환 단위당 지갑 충전액
pub const REDEMPTION_VALUE: f64 = 100.0;

pub fn round_currency(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// 할인율(%)을 적용한 가격. 할인율은 0-100으로 제한됩니다.
pub fn discounted_price(price: f64, discount_percent: f64) -> f64 {
    let discount = discount_percent.clamp(0.0, 100.0);
    round_currency(price * (100.0 - discount) / 100.0)
}

/// 총 매출 → 수수료 / 순수익
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RevenueBreakdown {
    pub gross: f64,
    pub platform_fee: f64,
    pub net: f64,
}

impl RevenueBreakdown {
    pub fn from_gross(gross: f64) -> Self {
        let gross = round_currency(gross);
        let platform_fee = round_currency(gross * PLATFORM_FEE_RATE);
        Self {
            gross,
            platform_fee,
            net: round_currency(gross - platform_fee),
        }
    }
}

/// 누적 포인트 기준 로열티 레벨
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoyaltyLevel {
    Level1,
    Level2,
    Level3,
}

impl LoyaltyLevel {
    /// 10만 이하 1레벨, 50만 이하 2레벨, 그 이상 3레벨
    pub fn from_lifetime_points(points: i64) -> Self {
        if points <= 100_000 {
            LoyaltyLevel::Level1
        } else if points <= 500_000 {
            LoyaltyLevel::Level2
        } else {
            LoyaltyLevel::Level3
        }
    }

    /// 결제 금액당 적립 배수
    pub fn multiplier(&self) -> f64 {
        match self {
            LoyaltyLevel::Level1 => 0.5,
            LoyaltyLevel::Level2 => 1.0,
            LoyaltyLevel::Level3 => 1.5,
        }
    }

    pub fn number(&self) -> u8 {
        match self {
            LoyaltyLevel::Level1 => 1,
            LoyaltyLevel::Level2 => 2,
            LoyaltyLevel::Level3 => 3,
        }
    }
}

/// 결제 금액에 대한 적립 포인트 (내림)
pub fn points_for_payment(amount: f64, level: LoyaltyLevel) -> i64 {
    if amount <= 0.0 {
        return 0;
    }
    (amount * level.multiplier()).floor() as i64
}

/// 교환 가능한 포인트와 그 환산액. 교환 단위 미만의 포인트는 남습니다.
pub fn redeemable(points: i64) -> (i64, f64) {
    let units = points.max(0) / POINTS_PER_REDEMPTION;
    (units * POINTS_PER_REDEMPTION, units as f64 * REDEMPTION_VALUE)
}

/// 이용 시각 48시간 전까지만 취소 가능
pub fn can_cancel(scheduled_at: DateTime, now: DateTime) -> bool {
    let window_millis = CANCELLATION_WINDOW_HOURS * 3_600_000;
    scheduled_at.timestamp_millis() - now.timestamp_millis() >= window_millis
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_fee_is_ten_percent() {
        let breakdown = RevenueBreakdown::from_gross(1250.0);

        assert_eq!(breakdown.platform_fee, 125.0);
        assert_eq!(breakdown.net, 1125.0);
        assert_eq!(RevenueBreakdown::from_gross(0.0), RevenueBreakdown::default());
    }

    #[test]
    fn test_discounted_price() {
        assert_eq!(discounted_price(200.0, 25.0), 150.0);
        assert_eq!(discounted_price(200.0, 0.0), 200.0);
        assert_eq!(discounted_price(200.0, 150.0), 0.0);
        assert_eq!(discounted_price(99.99, -5.0), 99.99);
    }

    #[test]
    fn test_loyalty_level_boundaries() {
        assert_eq!(LoyaltyLevel::from_lifetime_points(0), LoyaltyLevel::Level1);
        assert_eq!(LoyaltyLevel::from_lifetime_points(100_000), LoyaltyLevel::Level1);
        assert_eq!(LoyaltyLevel::from_lifetime_points(100_001), LoyaltyLevel::Level2);
        assert_eq!(LoyaltyLevel::from_lifetime_points(500_000), LoyaltyLevel::Level2);
        assert_eq!(LoyaltyLevel::from_lifetime_points(500_001), LoyaltyLevel::Level3);
    }

    #[test]
    fn test_points_for_payment() {
        assert_eq!(points_for_payment(1000.0, LoyaltyLevel::Level1), 500);
        assert_eq!(points_for_payment(1000.0, LoyaltyLevel::Level2), 1000);
        assert_eq!(points_for_payment(1000.0, LoyaltyLevel::Level3), 1500);
        assert_eq!(points_for_payment(-10.0, LoyaltyLevel::Level3), 0);
    }

    #[test]
    fn test_redeemable_keeps_remainder() {
        assert_eq!(redeemable(25_000), (20_000, 200.0));
        assert_eq!(redeemable(9_999), (0, 0.0));
        assert_eq!(redeemable(-3), (0, 0.0));
    }

    #[test]
    fn test_cancellation_window() {
        let now = DateTime::from_millis(1_700_000_000_000);
        let in_hours = |h: i64| DateTime::from_millis(now.timestamp_millis() + h * 3_600_000);

        assert!(can_cancel(in_hours(48), now));
        assert!(can_cancel(in_hours(72), now));
        assert!(!can_cancel(in_hours(47), now));
        assert!(!can_cancel(in_hours(-1), now));
    }
}
