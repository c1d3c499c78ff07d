//! 역사적 장소 서비스
//!
//! 관광청 담당자가 자신이 등록한 장소를 관리합니다. 장소에는 역사 태그만 붙일 수 있습니다.

use std::sync::Arc;

use mongodb::bson::{doc, oid::ObjectId, DateTime, Document};

use super::ensure_owner;
use crate::core::errors::AppError;
use crate::domain::dto::catalog::{CreatePlaceRequest, PlaceQuery, PlaceResponse, UpdatePlaceRequest};
use crate::domain::entities::users::Role;
use crate::domain::entities::{HistoricalPlace, TagKind};
use crate::domain::models::filters::parse_optional_id;
use crate::domain::models::pagination::Page;
use crate::repositories::base::{bson_value, parse_object_id};
use crate::repositories::catalog::PlaceRepository;
use singleton_macro::service;
use crate::services::catalog::TagService;
use crate::services::uploads::{UploadKind, UploadService};
use crate::utils::multipart::UploadedFile;
use crate::utils::string_utils::{clean_optional_string, contains_ignore_case};

fn matches_search(place: &HistoricalPlace, search: Option<&str>) -> bool {
    search.is_none_or(|s| {
        contains_ignore_case(&place.name, s)
            || contains_ignore_case(&place.description, s)
            || contains_ignore_case(&place.location.address, s)
    })
}

#[service(name = "historical_place")]
pub struct PlaceService {
    place_repo: Arc<PlaceRepository>,
    tag_service: Arc<TagService>,
    upload_service: Arc<UploadService>,
}

impl PlaceService {
    pub async fn list(&self, query: PlaceQuery) -> Result<Page<PlaceResponse>, AppError> {
        let tag = parse_optional_id(query.tag.as_deref(), "tag")?;
        let search = clean_optional_string(query.search);

        let places: Vec<HistoricalPlace> = self
            .place_repo
            .find_all(tag.as_ref())
            .await?
            .into_iter()
            .filter(|p| matches_search(p, search.as_deref()))
            .collect();

        Ok(Page::paginate(places, query.page, query.limit).map(PlaceResponse::from))
    }

    pub async fn get(&self, id: &str) -> Result<PlaceResponse, AppError> {
        Ok(self.find(id).await?.into())
    }

    pub async fn mine(&self, governor: &ObjectId) -> Result<Vec<PlaceResponse>, AppError> {
        let places = self.place_repo.find_by_governor(governor).await?;
        Ok(places.into_iter().map(PlaceResponse::from).collect())
    }

    pub async fn create(&self, governor: &ObjectId, request: CreatePlaceRequest) -> Result<PlaceResponse, AppError> {
        let tags = self.tag_service.resolve(&request.tags, TagKind::Historical).await?;

        let now = DateTime::now();
        let place = HistoricalPlace {
            id: None,
            name: request.name.trim().to_string(),
            description: request.description.trim().to_string(),
            pictures: request.pictures,
            location: request.location,
            opening_hours: request.opening_hours.trim().to_string(),
            ticket_prices: request.ticket_prices,
            tags,
            governor: *governor,
            created_at: now,
            updated_at: now,
        };

        let created = self.place_repo.create(place).await?;
        log::info!("🏛️ 장소 등록: {}", created.name);
        Ok(created.into())
    }

    pub async fn update(&self, governor: &ObjectId, id: &str, request: UpdatePlaceRequest) -> Result<PlaceResponse, AppError> {
        let place = self.find(id).await?;
        ensure_owner(&place.governor, governor, "장소")?;

        let mut set = Document::new();
        if let Some(name) = clean_optional_string(request.name) {
            set.insert("name", name);
        }
        if let Some(description) = clean_optional_string(request.description) {
            set.insert("description", description);
        }
        if let Some(pictures) = request.pictures {
            set.insert("pictures", pictures);
        }
        if let Some(location) = request.location {
            set.insert("location", bson_value(&location)?);
        }
        if let Some(hours) = clean_optional_string(request.opening_hours) {
            set.insert("opening_hours", hours);
        }
        if let Some(prices) = request.ticket_prices {
            set.insert("ticket_prices", bson_value(&prices)?);
        }
        if let Some(tags) = request.tags {
            set.insert("tags", self.tag_service.resolve(&tags, TagKind::Historical).await?);
        }

        let id = place.id.ok_or_else(|| AppError::InternalError("장소 ID가 없습니다".to_string()))?;
        if set.is_empty() {
            return Ok(place.into());
        }

        self.place_repo
            .update(&id, set)
            .await?
            .map(PlaceResponse::from)
            .ok_or_else(|| AppError::NotFound("장소를 찾을 수 없습니다".to_string()))
    }

    /// 장소 사진 업로드 후 목록에 추가
    pub async fn add_picture(&self, governor: &ObjectId, id: &str, file: UploadedFile) -> Result<PlaceResponse, AppError> {
        let place = self.find(id).await?;
        ensure_owner(&place.governor, governor, "장소")?;

        let url = self
            .upload_service
            .store(Role::TourismGovernor, file, UploadKind::Image)
            .await?;

        let mut pictures = place.pictures;
        pictures.push(url);

        let id = place.id.ok_or_else(|| AppError::InternalError("장소 ID가 없습니다".to_string()))?;
        self.place_repo
            .update(&id, doc! { "pictures": pictures })
            .await?
            .map(PlaceResponse::from)
            .ok_or_else(|| AppError::NotFound("장소를 찾을 수 없습니다".to_string()))
    }

    pub async fn delete(&self, governor: &ObjectId, id: &str) -> Result<(), AppError> {
        let place = self.find(id).await?;
        ensure_owner(&place.governor, governor, "장소")?;

        let id = place.id.ok_or_else(|| AppError::InternalError("장소 ID가 없습니다".to_string()))?;
        if !self.place_repo.delete(&id).await? {
            return Err(AppError::NotFound("장소를 찾을 수 없습니다".to_string()));
        }

        log::info!("🗑️ 장소 삭제: {}", place.name);
        Ok(())
    }

    async fn find(&self, id: &str) -> Result<HistoricalPlace, AppError> {
        let id = parse_object_id(id)?;
        self.place_repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| AppError::NotFound("장소를 찾을 수 없습니다".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{GeoLocation, TicketPrices};

    #[test]
    fn test_search_matches_name_description_and_address() {
        let now = DateTime::now();
        let place = HistoricalPlace {
            id: None,
            name: "Karnak Temple".to_string(),
            description: "Vast temple complex".to_string(),
            pictures: vec![],
            location: GeoLocation { address: "Luxor, Egypt".to_string(), lat: None, lng: None },
            opening_hours: "06:00-17:30".to_string(),
            ticket_prices: TicketPrices { native: 30.0, foreigner: 450.0, student: 15.0 },
            tags: vec![],
            governor: ObjectId::new(),
            created_at: now,
            updated_at: now,
        };

        assert!(matches_search(&place, None));
        assert!(matches_search(&place, Some("karnak")));
        assert!(matches_search(&place, Some("COMPLEX")));
        assert!(matches_search(&place, Some("luxor")));
        assert!(!matches_search(&place, Some("Aswan")));
    }
}
