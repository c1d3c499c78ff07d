//! 교통편 서비스
//!
//! 광고주가 등록한 교통편의 공개 목록과 관리를 담당합니다.
//! 좌석 예약/반환은 예약 서비스가 처리합니다.

use std::sync::Arc;

use mongodb::bson::{oid::ObjectId, DateTime, Document};

use super::ensure_owner;
use crate::core::errors::AppError;
use crate::domain::dto::catalog::{CreateTransportationRequest, TransportationResponse, UpdateTransportationRequest};
use crate::domain::entities::Transportation;
use crate::repositories::base::parse_object_id;
use crate::repositories::catalog::TransportationRepository;
use singleton_macro::service;
use crate::services::users::UserService;
use crate::utils::string_utils::clean_optional_string;
use crate::utils::time::to_bson;

#[service(name = "transportation")]
pub struct TransportationService {
    transportation_repo: Arc<TransportationRepository>,
    user_service: Arc<UserService>,
}

impl TransportationService {
    /// 출발 전 교통편
    pub async fn list_upcoming(&self) -> Result<Vec<TransportationResponse>, AppError> {
        let items = self.transportation_repo.find_upcoming(DateTime::now()).await?;
        Ok(items.into_iter().map(TransportationResponse::from).collect())
    }

    pub async fn get(&self, id: &str) -> Result<TransportationResponse, AppError> {
        Ok(self.find(id).await?.into())
    }

    pub async fn mine(&self, advertiser: &ObjectId) -> Result<Vec<TransportationResponse>, AppError> {
        let items = self.transportation_repo.find_by_advertiser(advertiser).await?;
        Ok(items.into_iter().map(TransportationResponse::from).collect())
    }

    pub async fn create(
        &self,
        advertiser: &ObjectId,
        request: CreateTransportationRequest,
    ) -> Result<TransportationResponse, AppError> {
        self.user_service.require_publisher(advertiser).await?;

        let departure = to_bson(request.departure);
        if departure <= DateTime::now() {
            return Err(AppError::ValidationError("출발 시각은 미래여야 합니다".to_string()));
        }

        let now = DateTime::now();
        let transportation = Transportation {
            id: None,
            advertiser: *advertiser,
            vehicle_type: request.vehicle_type.trim().to_string(),
            origin: request.origin.trim().to_string(),
            destination: request.destination.trim().to_string(),
            departure,
            price: request.price,
            capacity: request.capacity,
            booked_seats: 0,
            booking_open: request.booking_open,
            created_at: now,
            updated_at: now,
        };

        let created = self.transportation_repo.create(transportation).await?;
        log::info!("🚌 교통편 등록: {} → {}", created.origin, created.destination);
        Ok(created.into())
    }

    pub async fn update(
        &self,
        advertiser: &ObjectId,
        id: &str,
        request: UpdateTransportationRequest,
    ) -> Result<TransportationResponse, AppError> {
        let current = self.find(id).await?;
        ensure_owner(&current.advertiser, advertiser, "교통편")?;

        let mut set = Document::new();
        if let Some(vehicle) = clean_optional_string(request.vehicle_type) {
            set.insert("vehicle_type", vehicle);
        }
        if let Some(origin) = clean_optional_string(request.origin) {
            set.insert("origin", origin);
        }
        if let Some(destination) = clean_optional_string(request.destination) {
            set.insert("destination", destination);
        }
        if let Some(departure) = request.departure {
            let departure = to_bson(departure);
            if departure <= DateTime::now() {
                return Err(AppError::ValidationError("출발 시각은 미래여야 합니다".to_string()));
            }
            set.insert("departure", departure);
        }
        if let Some(price) = request.price {
            set.insert("price", price);
        }
        if let Some(capacity) = request.capacity {
            if capacity < current.booked_seats {
                return Err(AppError::ConflictError(format!(
                    "이미 {}석이 예약되어 좌석 수를 줄일 수 없습니다",
                    current.booked_seats
                )));
            }
            set.insert("capacity", capacity);
        }
        if let Some(open) = request.booking_open {
            set.insert("booking_open", open);
        }

        let id = current.id.ok_or_else(|| AppError::InternalError("교통편 ID가 없습니다".to_string()))?;
        if set.is_empty() {
            return Ok(current.into());
        }

        self.transportation_repo
            .update(&id, set)
            .await?
            .map(TransportationResponse::from)
            .ok_or_else(|| AppError::NotFound("교통편을 찾을 수 없습니다".to_string()))
    }

    /// 예약 좌석이 있으면 삭제할 수 없습니다 (409).
    pub async fn delete(&self, advertiser: &ObjectId, id: &str) -> Result<(), AppError> {
        let current = self.find(id).await?;
        ensure_owner(&current.advertiser, advertiser, "교통편")?;

        if current.booked_seats > 0 {
            return Err(AppError::ConflictError("예약된 좌석이 있는 교통편은 삭제할 수 없습니다".to_string()));
        }

        let id = current.id.ok_or_else(|| AppError::InternalError("교통편 ID가 없습니다".to_string()))?;
        if !self.transportation_repo.delete(&id).await? {
            return Err(AppError::NotFound("교통편을 찾을 수 없습니다".to_string()));
        }
        Ok(())
    }

    async fn find(&self, id: &str) -> Result<Transportation, AppError> {
        let id = parse_object_id(id)?;
        self.transportation_repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| AppError::NotFound("교통편을 찾을 수 없습니다".to_string()))
    }
}
