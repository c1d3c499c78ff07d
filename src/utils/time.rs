//! BSON ↔ chrono 시간 변환 유틸리티
//!
//! 엔티티는 MongoDB 네이티브 `bson::DateTime`으로 저장하고,
//! 요청/응답 DTO는 RFC 3339 문자열로 직렬화되는 `chrono::DateTime<Utc>`를 사용합니다.

use chrono::{DateTime as ChronoDateTime, Utc};
use mongodb::bson::DateTime;

/// BSON DateTime → chrono UTC
pub fn to_utc(value: DateTime) -> ChronoDateTime<Utc> {
    ChronoDateTime::<Utc>::from_timestamp_millis(value.timestamp_millis()).unwrap_or_default()
}

/// chrono UTC → BSON DateTime
pub fn to_bson(value: ChronoDateTime<Utc>) -> DateTime {
    DateTime::from_millis(value.timestamp_millis())
}

/// 두 시각 사이의 시간(hour) 차이. `later`가 더 이르면 음수.
pub fn hours_between(earlier: DateTime, later: DateTime) -> i64 {
    (later.timestamp_millis() - earlier.timestamp_millis()) / 3_600_000
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_conversion_keeps_millisecond_precision() {
        let original = Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap();
        assert_eq!(to_utc(to_bson(original)), original);
    }

    #[test]
    fn test_hours_between() {
        let start = to_bson(Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap());
        let end = to_bson(Utc.with_ymd_and_hms(2026, 1, 3, 1, 0, 0).unwrap());

        assert_eq!(hours_between(start, end), 49);
        assert_eq!(hours_between(end, start), -49);
    }
}
