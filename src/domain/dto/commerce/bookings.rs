use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{Booking, BookingKind, BookingStatus, PaymentMethod};
use crate::utils::time::to_utc;

/// 예약 요청 (액티비티/일정/교통편)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookingRequest {
    pub kind: BookingKind,
    #[serde(alias = "item_id", alias = "itemId")]
    pub item: String,
    pub payment_method: PaymentMethod,
    /// 일정 예약 시 선택한 진행일 (생략 시 가장 이른 날짜)
    pub date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingQuery {
    pub status: Option<BookingStatus>,
    pub kind: Option<BookingKind>,
    /// `upcoming` / `past`
    pub when: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingResponse {
    pub id: String,
    pub kind: BookingKind,
    pub item: Option<String>,
    pub item_name: String,
    pub amount: f64,
    pub payment_method: PaymentMethod,
    pub status: BookingStatus,
    pub scheduled_at: DateTime<Utc>,
    pub external_reference: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Booking> for BookingResponse {
    fn from(b: Booking) -> Self {
        Self {
            id: b.id.map(|id| id.to_hex()).unwrap_or_default(),
            kind: b.kind,
            item: b.item.map(|id| id.to_hex()),
            item_name: b.item_name,
            amount: b.amount,
            payment_method: b.payment_method,
            status: b.status,
            scheduled_at: to_utc(b.scheduled_at),
            external_reference: b.external_reference,
            created_at: to_utc(b.created_at),
        }
    }
}

/// 예약 결과 (적립 포인트 포함)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingReceipt {
    pub booking: BookingResponse,
    pub points_earned: i64,
}
