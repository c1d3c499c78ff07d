use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use crate::domain::entities::common::PaymentMethod;

/// 예약 대상 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingKind {
    Activity,
    Itinerary,
    Transportation,
    /// 외부 여행 API를 통한 호텔 예약
    Hotel,
    /// 외부 여행 API를 통한 항공 예약
    Flight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

/// 관광객 예약
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub tourist: ObjectId,
    pub kind: BookingKind,
    /// 내부 카탈로그 항목 ID (호텔/항공은 None)
    #[serde(default)]
    pub item: Option<ObjectId>,
    pub item_name: String,
    /// 수익이 귀속되는 광고주/투어 가이드
    #[serde(default)]
    pub provider: Option<ObjectId>,
    /// 실제 결제 금액 (할인 적용 후)
    pub amount: f64,
    pub payment_method: PaymentMethod,
    pub status: BookingStatus,
    /// 이용 일시 (취소 가능 시한 계산 기준)
    pub scheduled_at: DateTime,
    /// 외부 예약 번호
    #[serde(default)]
    pub external_reference: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}
