//! # 예약 서비스
//!
//! 관광객의 활동/일정/교통편 예약과 취소를 처리합니다.
//!
//! ## 예약 흐름
//!
//! 1. 대상 조회 및 예약 가능 여부 확인 (예약 오픈, 미신고, 미래 일정)
//! 2. 교통편은 좌석을 원자적으로 확보 (만석이면 409)
//! 3. 할인 적용 금액 결제 (지갑 잔액 부족 시 409, 확보한 좌석 반환)
//! 4. 예약 저장 후 로열티 포인트 적립 (저장 실패 시 지갑 결제 환불, 좌석 반환)
//!
//! 취소는 이용 48시간 전까지만 가능하며 결제 금액은 지갑으로 환불됩니다.
//! 외부 API로 만든 호텔/항공 예약은 취소할 수 없습니다.

use std::sync::Arc;

use chrono::{DateTime as ChronoDateTime, Utc};
use mongodb::bson::{oid::ObjectId, DateTime};

use crate::core::errors::AppError;
use crate::domain::dto::commerce::{BookingQuery, BookingReceipt, BookingResponse, CreateBookingRequest};
use crate::domain::entities::{Booking, BookingKind, BookingStatus, Itinerary, PaymentMethod};
use crate::domain::models::pricing::{can_cancel, discounted_price, round_currency, CANCELLATION_WINDOW_HOURS};
use crate::repositories::base::parse_object_id;
use crate::repositories::catalog::{ActivityRepository, ItineraryRepository, TransportationRepository};
use crate::repositories::commerce::BookingRepository;
use singleton_macro::service;
use crate::services::commerce::wallet_service::refund_due;
use crate::services::commerce::WalletService;
use crate::utils::time::to_utc;

/// 예약 대상의 결제/일정 정보
struct Reservation {
    item: ObjectId,
    item_name: String,
    provider: ObjectId,
    amount: f64,
    scheduled_at: DateTime,
}

/// 외부 여행 API 예약 정보
pub struct ExternalBooking {
    pub kind: BookingKind,
    pub item_name: String,
    pub amount: f64,
    pub payment_method: PaymentMethod,
    pub scheduled_at: DateTime,
    pub reference: Option<String>,
}

/// 일정 예약일 결정
///
/// 요청한 날짜가 있으면 같은 날의 진행일이어야 하고, 없으면 가장 이른 진행일입니다.
fn pick_itinerary_date(
    itinerary: &Itinerary,
    requested: Option<ChronoDateTime<Utc>>,
    now: DateTime,
) -> Result<DateTime, AppError> {
    match requested {
        Some(requested) => itinerary
            .available_dates
            .iter()
            .copied()
            .filter(|d| *d > now)
            .find(|d| to_utc(*d).date_naive() == requested.date_naive())
            .ok_or_else(|| AppError::ValidationError("선택한 날짜에는 진행하지 않는 일정입니다".to_string())),
        None => itinerary
            .next_date_after(now)
            .ok_or_else(|| AppError::ValidationError("예약 가능한 진행일이 없습니다".to_string())),
    }
}

/// 취소 가능 여부
///
/// 호텔/항공은 외부 API 예약이라 되돌릴 수 없고, 나머지는 이용 48시간 전까지만 취소됩니다.
fn cancellation_check(booking: &Booking, now: DateTime) -> Result<(), AppError> {
    if matches!(booking.kind, BookingKind::Hotel | BookingKind::Flight) {
        return Err(AppError::ValidationError(
            "호텔/항공 예약은 취소할 수 없습니다".to_string(),
        ));
    }
    if booking.status == BookingStatus::Cancelled {
        return Err(AppError::ConflictError("이미 취소된 예약입니다".to_string()));
    }
    if !can_cancel(booking.scheduled_at, now) {
        return Err(AppError::ValidationError(format!(
            "이용 {}시간 전까지만 취소할 수 있습니다",
            CANCELLATION_WINDOW_HOURS
        )));
    }
    Ok(())
}

/// 결제 후 예약 저장이 실패했을 때 되돌릴 작업
#[derive(Debug, PartialEq)]
struct Compensation {
    refund: Option<f64>,
    release_seat: Option<ObjectId>,
}

impl Compensation {
    fn for_reservation(kind: BookingKind, reservation: &Reservation, method: PaymentMethod) -> Self {
        Self {
            refund: refund_due(method, reservation.amount),
            release_seat: (kind == BookingKind::Transportation).then_some(reservation.item),
        }
    }
}

/// `upcoming` / `past` 필터
fn matches_when(booking: &Booking, when: Option<&str>, now: DateTime) -> bool {
    match when {
        Some("upcoming") => booking.scheduled_at > now,
        Some("past") => booking.scheduled_at <= now,
        _ => true,
    }
}

#[service(name = "booking")]
pub struct BookingService {
    booking_repo: Arc<BookingRepository>,
    activity_repo: Arc<ActivityRepository>,
    itinerary_repo: Arc<ItineraryRepository>,
    transportation_repo: Arc<TransportationRepository>,
    wallet_service: Arc<WalletService>,
}

impl BookingService {
    pub async fn create(&self, tourist: &ObjectId, request: CreateBookingRequest) -> Result<BookingReceipt, AppError> {
        let item_id = parse_object_id(&request.item)?;
        let now = DateTime::now();

        let reservation = match request.kind {
            BookingKind::Activity => self.reserve_activity(&item_id, now).await?,
            BookingKind::Itinerary => self.reserve_itinerary(&item_id, request.date, now).await?,
            BookingKind::Transportation => self.reserve_transportation(&item_id, now).await?,
            BookingKind::Hotel | BookingKind::Flight => {
                return Err(AppError::ValidationError(
                    "호텔/항공 예약은 여행 API를 통해 진행해주세요".to_string(),
                ));
            }
        };

        if let Err(e) = self
            .wallet_service
            .charge(tourist, reservation.amount, request.payment_method)
            .await
        {
            if request.kind == BookingKind::Transportation {
                self.release_seat(&reservation.item).await;
            }
            return Err(e);
        }

        let compensation = Compensation::for_reservation(request.kind, &reservation, request.payment_method);
        let booking = Booking {
            id: None,
            tourist: *tourist,
            kind: request.kind,
            item: Some(reservation.item),
            item_name: reservation.item_name,
            provider: Some(reservation.provider),
            amount: reservation.amount,
            payment_method: request.payment_method,
            status: BookingStatus::Confirmed,
            scheduled_at: reservation.scheduled_at,
            external_reference: None,
            created_at: now,
            updated_at: now,
        };

        let booking = match self.booking_repo.create(booking).await {
            Ok(booking) => booking,
            Err(e) => {
                log::error!("예약 저장 실패, 결제 보상 진행 ({}): {}", tourist, e);
                self.compensate(tourist, compensation).await;
                return Err(e);
            }
        };
        let points_earned = self.wallet_service.award_points(tourist, booking.amount).await;

        log::info!(
            "🎫 예약 완료: {} {:?} '{}' {} (포인트 +{})",
            tourist, booking.kind, booking.item_name, booking.amount, points_earned
        );
        Ok(BookingReceipt { booking: booking.into(), points_earned })
    }

    /// 외부 여행 API로 완료된 호텔/항공 예약 기록 (결제는 호출자가 처리)
    pub async fn record_external(&self, tourist: &ObjectId, external: ExternalBooking) -> Result<BookingReceipt, AppError> {
        let now = DateTime::now();
        let booking = Booking {
            id: None,
            tourist: *tourist,
            kind: external.kind,
            item: None,
            item_name: external.item_name,
            provider: None,
            amount: round_currency(external.amount),
            payment_method: external.payment_method,
            status: BookingStatus::Confirmed,
            scheduled_at: external.scheduled_at,
            external_reference: external.reference,
            created_at: now,
            updated_at: now,
        };

        let booking = self.booking_repo.create(booking).await?;
        let points_earned = self.wallet_service.award_points(tourist, booking.amount).await;
        Ok(BookingReceipt { booking: booking.into(), points_earned })
    }

    pub async fn list(&self, tourist: &ObjectId, query: BookingQuery) -> Result<Vec<BookingResponse>, AppError> {
        let now = DateTime::now();
        let bookings = self.booking_repo.find_by_tourist(tourist, query.status, query.kind).await?;

        Ok(bookings
            .into_iter()
            .filter(|b| matches_when(b, query.when.as_deref(), now))
            .map(BookingResponse::from)
            .collect())
    }

    pub async fn get(&self, tourist: &ObjectId, id: &str) -> Result<BookingResponse, AppError> {
        Ok(self.find_own(tourist, id).await?.into())
    }

    /// 예약 취소 (활동/일정/교통편만, 48시간 전까지, 지갑 환불, 좌석 반환)
    pub async fn cancel(&self, tourist: &ObjectId, id: &str) -> Result<BookingResponse, AppError> {
        let booking = self.find_own(tourist, id).await?;
        cancellation_check(&booking, DateTime::now())?;

        let booking_id = booking.id.ok_or_else(|| AppError::InternalError("예약 ID가 없습니다".to_string()))?;
        let cancelled = self
            .booking_repo
            .cancel(&booking_id)
            .await?
            .ok_or_else(|| AppError::ConflictError("이미 취소된 예약입니다".to_string()))?;

        self.wallet_service.refund(tourist, cancelled.amount).await?;
        if cancelled.kind == BookingKind::Transportation {
            if let Some(item) = cancelled.item {
                self.release_seat(&item).await;
            }
        }

        log::info!("❎ 예약 취소: {} '{}'", tourist, cancelled.item_name);
        Ok(cancelled.into())
    }

    async fn reserve_activity(&self, id: &ObjectId, now: DateTime) -> Result<Reservation, AppError> {
        let activity = self
            .activity_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("활동을 찾을 수 없습니다".to_string()))?;

        if !activity.is_bookable(now) {
            return Err(AppError::ValidationError("예약할 수 없는 활동입니다".to_string()));
        }

        Ok(Reservation {
            item: *id,
            amount: discounted_price(activity.price, activity.special_discount),
            item_name: activity.name,
            provider: activity.advertiser,
            scheduled_at: activity.date,
        })
    }

    async fn reserve_itinerary(
        &self,
        id: &ObjectId,
        requested: Option<ChronoDateTime<Utc>>,
        now: DateTime,
    ) -> Result<Reservation, AppError> {
        let itinerary = self
            .itinerary_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("일정을 찾을 수 없습니다".to_string()))?;

        if !itinerary.is_bookable(now) {
            return Err(AppError::ValidationError("예약할 수 없는 일정입니다".to_string()));
        }
        let scheduled_at = pick_itinerary_date(&itinerary, requested, now)?;

        Ok(Reservation {
            item: *id,
            amount: round_currency(itinerary.price),
            item_name: itinerary.name,
            provider: itinerary.tour_guide,
            scheduled_at,
        })
    }

    async fn reserve_transportation(&self, id: &ObjectId, now: DateTime) -> Result<Reservation, AppError> {
        let current = self
            .transportation_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("교통편을 찾을 수 없습니다".to_string()))?;

        if !current.booking_open || current.departure <= now {
            return Err(AppError::ValidationError("예약할 수 없는 교통편입니다".to_string()));
        }

        let transportation = self
            .transportation_repo
            .reserve_seat(id)
            .await?
            .ok_or_else(|| AppError::ConflictError("남은 좌석이 없습니다".to_string()))?;

        Ok(Reservation {
            item: *id,
            amount: round_currency(transportation.price),
            item_name: format!("{} → {}", transportation.origin, transportation.destination),
            provider: transportation.advertiser,
            scheduled_at: transportation.departure,
        })
    }

    async fn compensate(&self, tourist: &ObjectId, compensation: Compensation) {
        if let Some(amount) = compensation.refund {
            if let Err(e) = self.wallet_service.refund(tourist, amount).await {
                log::error!("결제 보상 환불 실패 ({} {}): {}", tourist, amount, e);
            }
        }
        if let Some(seat) = compensation.release_seat {
            self.release_seat(&seat).await;
        }
    }

    async fn release_seat(&self, id: &ObjectId) {
        if let Err(e) = self.transportation_repo.release_seat(id).await {
            log::error!("좌석 반환 실패 ({}): {}", id, e);
        }
    }

    /// 본인 예약만 조회 (타인 예약은 403)
    async fn find_own(&self, tourist: &ObjectId, id: &str) -> Result<Booking, AppError> {
        let id = parse_object_id(id)?;
        let booking = self
            .booking_repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| AppError::NotFound("예약을 찾을 수 없습니다".to_string()))?;

        if booking.tourist != *tourist {
            return Err(AppError::AuthorizationError("본인의 예약만 관리할 수 있습니다".to_string()));
        }
        Ok(booking)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const DAY: i64 = 86_400_000;

    fn now() -> DateTime {
        DateTime::from_millis(1_780_000_000_000)
    }

    fn itinerary(dates: Vec<DateTime>) -> Itinerary {
        Itinerary {
            id: Some(ObjectId::new()),
            name: "Nile Valley".to_string(),
            activities: vec![],
            locations: vec!["Luxor".to_string()],
            timeline: vec![],
            duration_days: 2,
            language: "English".to_string(),
            price: 300.0,
            available_dates: dates,
            accessibility: None,
            pickup_location: "Hotel".to_string(),
            dropoff_location: "Hotel".to_string(),
            tags: vec![],
            booking_open: true,
            active: true,
            flagged: false,
            tour_guide: ObjectId::new(),
            ratings: vec![],
            created_at: now(),
            updated_at: now(),
        }
    }

    #[test]
    fn test_earliest_future_date_by_default() {
        let past = DateTime::from_millis(now().timestamp_millis() - DAY);
        let soon = DateTime::from_millis(now().timestamp_millis() + 3 * DAY);
        let later = DateTime::from_millis(now().timestamp_millis() + 10 * DAY);

        let it = itinerary(vec![later, past, soon]);
        assert_eq!(pick_itinerary_date(&it, None, now()).unwrap(), soon);
    }

    #[test]
    fn test_requested_date_must_be_offered() {
        let offered = DateTime::from_millis(now().timestamp_millis() + 5 * DAY);
        let it = itinerary(vec![offered]);

        let same_day = to_utc(offered) + chrono::Duration::hours(1);
        assert_eq!(pick_itinerary_date(&it, Some(same_day), now()).unwrap(), offered);

        let other_day = Utc.with_ymd_and_hms(2030, 1, 1, 9, 0, 0).unwrap();
        assert!(matches!(
            pick_itinerary_date(&it, Some(other_day), now()),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn test_no_future_dates_rejected() {
        let it = itinerary(vec![DateTime::from_millis(now().timestamp_millis() - DAY)]);
        assert!(pick_itinerary_date(&it, None, now()).is_err());
    }

    fn booking(kind: BookingKind, scheduled_in_millis: i64) -> Booking {
        Booking {
            id: None,
            tourist: ObjectId::new(),
            kind,
            item: Some(ObjectId::new()),
            item_name: "Felucca ride".to_string(),
            provider: Some(ObjectId::new()),
            amount: 50.0,
            payment_method: PaymentMethod::Card,
            status: BookingStatus::Confirmed,
            scheduled_at: DateTime::from_millis(now().timestamp_millis() + scheduled_in_millis),
            external_reference: None,
            created_at: now(),
            updated_at: now(),
        }
    }

    #[test]
    fn test_when_filter() {
        let booking = booking(BookingKind::Activity, DAY);

        assert!(matches_when(&booking, Some("upcoming"), now()));
        assert!(!matches_when(&booking, Some("past"), now()));
        assert!(matches_when(&booking, None, now()));
    }

    #[test]
    fn test_cancellation_allowed_outside_window() {
        assert!(cancellation_check(&booking(BookingKind::Activity, 3 * DAY), now()).is_ok());
        assert!(cancellation_check(&booking(BookingKind::Transportation, 2 * DAY), now()).is_ok());
    }

    #[test]
    fn test_cancellation_rejected_inside_window() {
        let result = cancellation_check(&booking(BookingKind::Itinerary, DAY), now());
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_cancellation_rejected_for_external_bookings() {
        for kind in [BookingKind::Hotel, BookingKind::Flight] {
            let result = cancellation_check(&booking(kind, 30 * DAY), now());
            assert!(matches!(result, Err(AppError::ValidationError(_))));
        }
    }

    #[test]
    fn test_cancellation_rejected_when_already_cancelled() {
        let mut cancelled = booking(BookingKind::Activity, 30 * DAY);
        cancelled.status = BookingStatus::Cancelled;
        assert!(matches!(cancellation_check(&cancelled, now()), Err(AppError::ConflictError(_))));
    }

    fn reservation(amount: f64) -> Reservation {
        Reservation {
            item: ObjectId::new(),
            item_name: "Cairo → Giza".to_string(),
            provider: ObjectId::new(),
            amount,
            scheduled_at: now(),
        }
    }

    #[test]
    fn test_compensation_refunds_wallet_and_releases_seat() {
        let seat = reservation(80.0);
        let plan = Compensation::for_reservation(BookingKind::Transportation, &seat, PaymentMethod::Wallet);
        assert_eq!(plan, Compensation { refund: Some(80.0), release_seat: Some(seat.item) });
    }

    #[test]
    fn test_compensation_skips_refund_for_card_and_seat_for_activities() {
        let plan = Compensation::for_reservation(BookingKind::Activity, &reservation(80.0), PaymentMethod::Card);
        assert_eq!(plan, Compensation { refund: None, release_seat: None });
    }
}
