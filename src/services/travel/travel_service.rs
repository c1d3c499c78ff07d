//! # 여행 API 프록시 서비스
//!
//! Amadeus Self-Service API를 통해 호텔/항공편을 검색하고 예약합니다.
//!
//! ## 인증
//!
//! OAuth 2.0 Client Credentials로 발급한 액세스 토큰을 프로세스 전체에서
//! 공유합니다. 만료 30초 전부터는 새 토큰을 발급받으며 캐시는 `Mutex`로 보호됩니다.
//!
//! ```text
//! search/book ──► access_token() ──(cache hit)──► Bearer 요청
//!                       │
//!                       └─(miss/expired)──► POST /v1/security/oauth2/token
//! ```
//!
//! ## 예약
//!
//! 예약은 가격 확인 → 결제 → 외부 예약 → 예약 기록 순서입니다. 결제 금액은
//! 클라이언트가 보낸 값이 아니라 Amadeus가 돌려준 offer 가격이며, 외부 예약이
//! 실패하면 지갑 결제 금액을 환불합니다.
//!
//! ```text
//! 호텔: GET  /v3/shopping/hotel-offers/{offerId}   → data.offers[0].price.total
//! 항공: POST /v1/shopping/flight-offers/pricing    → data.flightOffers[0].price.grandTotal
//! ```

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::config::TravelApiConfig;
use crate::core::errors::AppError;
use crate::domain::dto::commerce::BookingReceipt;
use crate::domain::dto::travel::{
    FlightBookingRequest, FlightSearchQuery, HotelBookingRequest, HotelSearchQuery, TravelerInfo,
};
use crate::domain::entities::{BookingKind, PaymentMethod};
use crate::domain::models::pricing::round_currency;
use singleton_macro::service;
use crate::services::commerce::{BookingService, ExternalBooking, WalletService};
use crate::utils::time::to_bson;

/// 만료 직전 토큰 재사용을 피하기 위한 여유 시간
const TOKEN_REFRESH_MARGIN_SECS: i64 = 30;

/// 호텔 오퍼 조회 시 한 번에 넘기는 호텔 ID 수
const MAX_HOTELS_PER_SEARCH: usize = 20;

/// 항공편 검색 결과 최대 개수
const MAX_FLIGHT_OFFERS: u32 = 20;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

/// 캐시된 액세스 토큰
#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn issued(access_token: String, expires_in: i64, now: DateTime<Utc>) -> Self {
        Self {
            access_token,
            expires_at: now + chrono::Duration::seconds(expires_in.max(0)),
        }
    }

    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now + chrono::Duration::seconds(TOKEN_REFRESH_MARGIN_SECS) < self.expires_at
    }
}

/// 도시 호텔 목록 응답에서 호텔 ID 추출
fn hotel_ids(listing: &Value) -> Vec<String> {
    listing["data"]
        .as_array()
        .map(|hotels| {
            hotels
                .iter()
                .filter_map(|h| h["hotelId"].as_str().map(str::to_string))
                .take(MAX_HOTELS_PER_SEARCH)
                .collect()
        })
        .unwrap_or_default()
}

/// 예약 응답에서 외부 예약 번호 추출
fn booking_reference(response: &Value) -> Option<String> {
    let data = match &response["data"] {
        Value::Array(items) => items.first()?,
        other => other,
    };

    data["associatedRecords"][0]["reference"]
        .as_str()
        .or_else(|| data["id"].as_str())
        .map(str::to_string)
}

fn hotel_booking_body(request: &HotelBookingRequest) -> Value {
    let guest = &request.guest;
    json!({
        "data": {
            "offerId": request.offer_id,
            "guests": [{
                "name": { "firstName": guest.first_name, "lastName": guest.last_name },
                "contact": { "phone": guest.phone, "email": guest.email }
            }],
            "payments": [{ "method": "creditCard" }]
        }
    })
}

fn traveler_body(traveler: &TravelerInfo) -> Value {
    let mut body = json!({
        "id": "1",
        "name": { "firstName": traveler.first_name, "lastName": traveler.last_name },
        "contact": {
            "emailAddress": traveler.email,
            "phones": [{ "deviceType": "MOBILE", "number": traveler.phone }]
        }
    });
    if let Some(birth) = traveler.date_of_birth {
        body["dateOfBirth"] = json!(birth.format("%Y-%m-%d").to_string());
    }
    body
}

fn flight_order_body(priced_offer: &Value, traveler: &TravelerInfo) -> Value {
    json!({
        "data": {
            "type": "flight-order",
            "flightOffers": [priced_offer],
            "travelers": [traveler_body(traveler)]
        }
    })
}

/// offer의 가격 문자열(`"123.45"`) 또는 숫자를 결제 금액으로
fn parse_price(price: &Value) -> Result<f64, AppError> {
    let amount = match price {
        Value::String(text) => text.trim().parse::<f64>().ok(),
        Value::Number(number) => number.as_f64(),
        _ => None,
    };

    amount
        .filter(|a| a.is_finite() && *a >= 0.0)
        .map(round_currency)
        .ok_or_else(|| AppError::ExternalServiceError("여행 API 응답에 유효한 가격이 없습니다".to_string()))
}

/// 재조회한 호텔 offer
#[derive(Debug, PartialEq)]
struct PricedHotelOffer {
    amount: f64,
    hotel_name: Option<String>,
    check_in: Option<NaiveDate>,
}

/// `GET /v3/shopping/hotel-offers/{offerId}` 응답 해석
fn priced_hotel_offer(response: &Value) -> Result<PricedHotelOffer, AppError> {
    let data = &response["data"];
    let offer = &data["offers"][0];

    Ok(PricedHotelOffer {
        amount: parse_price(&offer["price"]["total"])?,
        hotel_name: data["hotel"]["name"].as_str().map(str::to_string),
        check_in: offer["checkInDate"].as_str().and_then(|d| d.parse().ok()),
    })
}

/// `POST /v1/shopping/flight-offers/pricing` 응답에서 확정 offer와 총액 추출
fn priced_flight_offer(response: &Value) -> Result<(Value, f64), AppError> {
    let offer = &response["data"]["flightOffers"][0];
    if !offer.is_object() {
        return Err(AppError::ExternalServiceError("가격이 확인된 항공 offer가 없습니다".to_string()));
    }
    let amount = parse_price(&offer["price"]["grandTotal"])?;
    Ok((offer.clone(), amount))
}

fn flight_pricing_body(flight_offer: &Value) -> Value {
    json!({
        "data": {
            "type": "flight-offers-pricing",
            "flightOffers": [flight_offer]
        }
    })
}

/// 첫 구간 출발일 (`2026-11-10T10:15:00` → 2026-11-10)
fn first_departure_date(flight_offer: &Value) -> Option<NaiveDate> {
    flight_offer["itineraries"][0]["segments"][0]["departure"]["at"]
        .as_str()
        .and_then(|at| at.get(..10))
        .and_then(|date| date.parse().ok())
}

/// 예약일(자정 UTC)을 BSON 시각으로
fn start_of_day(date: NaiveDate) -> mongodb::bson::DateTime {
    to_bson(date.and_time(NaiveTime::MIN).and_utc())
}

#[service(name = "travel")]
pub struct TravelService {
    booking_service: Arc<BookingService>,
    wallet_service: Arc<WalletService>,
    client: reqwest::Client,
    token: Mutex<Option<CachedToken>>,
}

impl TravelService {
    pub async fn search_hotels(&self, query: &HotelSearchQuery) -> Result<Value, AppError> {
        let listing = self
            .get_json(
                "/v1/reference-data/locations/hotels/by-city",
                &[("cityCode", query.city_code.to_uppercase())],
            )
            .await?;

        let ids = hotel_ids(&listing);
        if ids.is_empty() {
            return Ok(json!({ "data": [] }));
        }

        self.get_json(
            "/v3/shopping/hotel-offers",
            &[
                ("hotelIds", ids.join(",")),
                ("checkInDate", query.check_in.to_string()),
                ("checkOutDate", query.check_out.to_string()),
                ("adults", query.adults.to_string()),
            ],
        )
        .await
    }

    pub async fn search_flights(&self, query: &FlightSearchQuery) -> Result<Value, AppError> {
        let mut params = vec![
            ("originLocationCode", query.origin.to_uppercase()),
            ("destinationLocationCode", query.destination.to_uppercase()),
            ("departureDate", query.departure_date.to_string()),
            ("adults", query.adults.to_string()),
            ("max", MAX_FLIGHT_OFFERS.to_string()),
        ];
        if let Some(return_date) = query.return_date {
            params.push(("returnDate", return_date.to_string()));
        }

        self.get_json("/v2/shopping/flight-offers", &params).await
    }

    /// offer를 다시 조회해 확인된 가격으로 결제한 뒤 호텔을 예약합니다.
    pub async fn book_hotel(&self, tourist: &ObjectId, request: HotelBookingRequest) -> Result<BookingReceipt, AppError> {
        let offer_path = format!("/v3/shopping/hotel-offers/{}", request.offer_id);
        let offer = priced_hotel_offer(&self.get_json(&offer_path, &[]).await?)?;

        let body = hotel_booking_body(&request);
        let reference = self
            .paid_booking(tourist, offer.amount, request.payment_method, "/v1/booking/hotel-bookings", &body)
            .await?;

        let item_name = offer.hotel_name.unwrap_or(request.hotel_name);
        log::info!("🏨 호텔 예약: {} '{}' {} ({:?})", tourist, item_name, offer.amount, reference);
        self.booking_service
            .record_external(
                tourist,
                ExternalBooking {
                    kind: BookingKind::Hotel,
                    item_name,
                    amount: offer.amount,
                    payment_method: request.payment_method,
                    scheduled_at: start_of_day(offer.check_in.unwrap_or(request.check_in)),
                    reference,
                },
            )
            .await
    }

    /// 가격 확인 API가 돌려준 offer와 총액으로 결제한 뒤 항공권을 발권합니다.
    pub async fn book_flight(&self, tourist: &ObjectId, request: FlightBookingRequest) -> Result<BookingReceipt, AppError> {
        let pricing = self
            .post_json("/v1/shopping/flight-offers/pricing", &flight_pricing_body(&request.flight_offer))
            .await?;
        let (priced_offer, amount) = priced_flight_offer(&pricing)?;

        let body = flight_order_body(&priced_offer, &request.traveler);
        let reference = self
            .paid_booking(tourist, amount, request.payment_method, "/v1/booking/flight-orders", &body)
            .await?;

        let departure = first_departure_date(&priced_offer).unwrap_or(request.departure_date);
        let item_name = format!("항공편 {}", departure);
        log::info!("✈️ 항공 예약: {} {} {} ({:?})", tourist, item_name, amount, reference);
        self.booking_service
            .record_external(
                tourist,
                ExternalBooking {
                    kind: BookingKind::Flight,
                    item_name,
                    amount,
                    payment_method: request.payment_method,
                    scheduled_at: start_of_day(departure),
                    reference,
                },
            )
            .await
    }

    /// 결제 후 외부 예약. 외부 예약 실패 시 지갑 결제분을 환불합니다.
    async fn paid_booking(
        &self,
        tourist: &ObjectId,
        amount: f64,
        method: PaymentMethod,
        path: &str,
        body: &Value,
    ) -> Result<Option<String>, AppError> {
        self.wallet_service.charge(tourist, amount, method).await?;

        match self.post_json(path, body).await {
            Ok(response) => Ok(booking_reference(&response)),
            Err(e) => {
                self.wallet_service.reverse_charge(tourist, amount, method).await;
                Err(e)
            }
        }
    }

    /// 캐시된 토큰을 반환하거나 새로 발급받습니다.
    async fn access_token(&self) -> Result<String, AppError> {
        if let Some(token) = self.cached_token(Utc::now()) {
            return Ok(token);
        }

        let params = [
            ("grant_type", "client_credentials".to_string()),
            ("client_id", TravelApiConfig::client_id()?),
            ("client_secret", TravelApiConfig::client_secret()?),
        ];

        let response = self
            .client
            .post(format!("{}/v1/security/oauth2/token", TravelApiConfig::base_url()))
            .timeout(Duration::from_secs(TravelApiConfig::timeout_secs()))
            .form(&params)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("여행 API 토큰 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!("여행 API 토큰 발급 실패: {}", error_text)));
        }

        let issued = response
            .json::<TokenResponse>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("여행 API 토큰 응답 파싱 실패: {}", e)))?;

        let cached = CachedToken::issued(issued.access_token, issued.expires_in, Utc::now());
        let token = cached.access_token.clone();
        self.store_token(cached);

        log::debug!("🔑 여행 API 토큰 갱신 ({}초)", issued.expires_in);
        Ok(token)
    }

    fn cached_token(&self, now: DateTime<Utc>) -> Option<String> {
        let guard = self.token.lock().ok()?;
        guard
            .as_ref()
            .filter(|t| t.is_fresh(now))
            .map(|t| t.access_token.clone())
    }

    fn store_token(&self, token: CachedToken) {
        match self.token.lock() {
            Ok(mut guard) => *guard = Some(token),
            Err(poisoned) => *poisoned.into_inner() = Some(token),
        }
    }

    async fn get_json(&self, path: &str, params: &[(&str, String)]) -> Result<Value, AppError> {
        let token = self.access_token().await?;
        let request = self
            .client
            .get(format!("{}{}", TravelApiConfig::base_url(), path))
            .bearer_auth(token)
            .query(params);
        Self::send(request, path).await
    }

    async fn post_json(&self, path: &str, body: &Value) -> Result<Value, AppError> {
        let token = self.access_token().await?;
        let request = self
            .client
            .post(format!("{}{}", TravelApiConfig::base_url(), path))
            .bearer_auth(token)
            .json(body);
        Self::send(request, path).await
    }

    async fn send(request: reqwest::RequestBuilder, path: &str) -> Result<Value, AppError> {
        let response = request
            .timeout(Duration::from_secs(TravelApiConfig::timeout_secs()))
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("여행 API 요청 실패 ({}): {}", path, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            log::warn!("여행 API 오류 {} ({}): {}", status, path, error_text);
            return Err(AppError::ExternalServiceError(format!("여행 API 오류 ({})", status)));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("여행 API 응답 파싱 실패: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_freshness_honours_margin() {
        let now = Utc::now();
        let token = CachedToken::issued("abc".to_string(), 1799, now);

        assert!(token.is_fresh(now));
        assert!(token.is_fresh(now + chrono::Duration::seconds(1700)));
        assert!(!token.is_fresh(now + chrono::Duration::seconds(1780)));
        assert!(!CachedToken::issued("abc".to_string(), 10, now).is_fresh(now));
    }

    #[test]
    fn test_hotel_ids_are_capped() {
        let hotels: Vec<Value> = (0..30).map(|i| json!({ "hotelId": format!("HTL{:03}", i) })).collect();
        let ids = hotel_ids(&json!({ "data": hotels }));

        assert_eq!(ids.len(), MAX_HOTELS_PER_SEARCH);
        assert_eq!(ids[0], "HTL000");
        assert!(hotel_ids(&json!({ "errors": [] })).is_empty());
    }

    #[test]
    fn test_booking_reference_variants() {
        let flight = json!({ "data": { "id": "eJzTd9f", "associatedRecords": [{ "reference": "QVYSNS" }] } });
        assert_eq!(booking_reference(&flight).as_deref(), Some("QVYSNS"));

        let hotel = json!({ "data": [{ "id": "HB-1", "type": "hotel-booking" }] });
        assert_eq!(booking_reference(&hotel).as_deref(), Some("HB-1"));

        assert_eq!(booking_reference(&json!({})), None);
    }

    #[test]
    fn test_traveler_body_includes_birth_date() {
        let traveler = TravelerInfo {
            first_name: "Mona".to_string(),
            last_name: "Adel".to_string(),
            email: "mona@example.com".to_string(),
            phone: "201001234567".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1995, 4, 2),
        };

        let body = traveler_body(&traveler);
        assert_eq!(body["dateOfBirth"], "1995-04-02");
        assert_eq!(body["contact"]["phones"][0]["number"], "201001234567");
    }

    #[test]
    fn test_hotel_offer_price_comes_from_offer() {
        let response = json!({
            "data": {
                "hotel": { "hotelId": "HLCAI001", "name": "Nile Ritz" },
                "offers": [{
                    "id": "OFFER1",
                    "checkInDate": "2026-11-10",
                    "price": { "currency": "EUR", "total": "412.756" }
                }]
            }
        });

        let offer = priced_hotel_offer(&response).unwrap();
        assert_eq!(offer.amount, 412.76);
        assert_eq!(offer.hotel_name.as_deref(), Some("Nile Ritz"));
        assert_eq!(offer.check_in, NaiveDate::from_ymd_opt(2026, 11, 10));
    }

    #[test]
    fn test_hotel_offer_without_price_is_rejected() {
        let response = json!({ "data": { "offers": [{ "price": { "total": "free" } }] } });
        assert!(matches!(priced_hotel_offer(&response), Err(AppError::ExternalServiceError(_))));
        assert!(priced_hotel_offer(&json!({ "data": { "offers": [] } })).is_err());
    }

    #[test]
    fn test_flight_total_comes_from_pricing_response() {
        let response = json!({
            "data": {
                "type": "flight-offers-pricing",
                "flightOffers": [{
                    "id": "1",
                    "price": { "total": "300.00", "grandTotal": "355.40" },
                    "itineraries": [{ "segments": [{ "departure": { "iataCode": "CAI", "at": "2026-12-01T08:30:00" } }] }]
                }]
            }
        });

        let (offer, amount) = priced_flight_offer(&response).unwrap();
        assert_eq!(amount, 355.4);
        assert_eq!(first_departure_date(&offer), NaiveDate::from_ymd_opt(2026, 12, 1));
    }

    #[test]
    fn test_flight_pricing_rejects_missing_or_negative_total() {
        assert!(priced_flight_offer(&json!({ "data": { "flightOffers": [] } })).is_err());

        let negative = json!({ "data": { "flightOffers": [{ "price": { "grandTotal": -5 } }] } });
        assert!(priced_flight_offer(&negative).is_err());
    }

    #[test]
    fn test_flight_order_uses_priced_offer() {
        let priced = json!({ "id": "1", "price": { "grandTotal": "355.40" } });
        let traveler = TravelerInfo {
            first_name: "Omar".to_string(),
            last_name: "Fathy".to_string(),
            email: "omar@example.com".to_string(),
            phone: "201009876543".to_string(),
            date_of_birth: None,
        };

        let body = flight_order_body(&priced, &traveler);
        assert_eq!(body["data"]["flightOffers"][0]["price"]["grandTotal"], "355.40");
        assert!(body["data"]["travelers"][0].get("dateOfBirth").is_none());
    }
}
