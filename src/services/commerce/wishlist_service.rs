//! 위시리스트 서비스
//!
//! 관광객당 하나의 위시리스트에 상품/활동/일정을 담습니다. 조회 시
//! 삭제되었거나 보관/신고/비활성 상태인 항목은 건너뜁니다.

use std::sync::Arc;

use mongodb::bson::oid::ObjectId;

use crate::core::errors::AppError;
use crate::domain::dto::catalog::{ActivityResponse, ItineraryResponse, ProductResponse};
use crate::domain::dto::commerce::WishlistResponse;
use crate::domain::entities::{Wishlist, WishlistKind};
use crate::repositories::base::parse_object_id;
use crate::repositories::catalog::{ActivityRepository, ItineraryRepository, ProductRepository};
use crate::repositories::commerce::WishlistRepository;
use singleton_macro::service;

#[service(name = "wishlist")]
pub struct WishlistService {
    wishlist_repo: Arc<WishlistRepository>,
    product_repo: Arc<ProductRepository>,
    activity_repo: Arc<ActivityRepository>,
    itinerary_repo: Arc<ItineraryRepository>,
}

/// 경로 세그먼트를 위시리스트 종류로 해석 (알 수 없으면 400)
fn parse_kind(segment: &str) -> Result<WishlistKind, AppError> {
    WishlistKind::from_path_segment(segment)
        .ok_or_else(|| AppError::ValidationError(format!("알 수 없는 위시리스트 종류입니다: {}", segment)))
}

impl WishlistService {
    pub async fn get(&self, tourist: &ObjectId) -> Result<WishlistResponse, AppError> {
        match self.wishlist_repo.find_by_tourist(tourist).await? {
            Some(wishlist) => self.populate(wishlist).await,
            None => Ok(WishlistResponse::default()),
        }
    }

    pub async fn add(&self, tourist: &ObjectId, kind: &str, id: &str) -> Result<WishlistResponse, AppError> {
        let kind = parse_kind(kind)?;
        let id = parse_object_id(id)?;
        self.ensure_listable(kind, &id).await?;

        let wishlist = self.wishlist_repo.add(tourist, kind, &id).await?;
        log::debug!("💝 위시리스트 추가: {} {:?} {}", tourist, kind, id);
        self.populate(wishlist).await
    }

    pub async fn remove(&self, tourist: &ObjectId, kind: &str, id: &str) -> Result<WishlistResponse, AppError> {
        let kind = parse_kind(kind)?;
        let id = parse_object_id(id)?;

        match self.wishlist_repo.remove(tourist, kind, &id).await? {
            Some(wishlist) => self.populate(wishlist).await,
            None => Err(AppError::NotFound("위시리스트를 찾을 수 없습니다".to_string())),
        }
    }

    /// 담을 수 있는 항목인지 확인 (없거나 비공개면 404)
    async fn ensure_listable(&self, kind: WishlistKind, id: &ObjectId) -> Result<(), AppError> {
        let listable = match kind {
            WishlistKind::Product => self.product_repo.find_by_id(id).await?.is_some_and(|p| !p.archived),
            WishlistKind::Activity => self.activity_repo.find_by_id(id).await?.is_some_and(|a| !a.flagged),
            WishlistKind::Itinerary => self
                .itinerary_repo
                .find_by_id(id)
                .await?
                .is_some_and(|i| i.active && !i.flagged),
        };

        if !listable {
            return Err(AppError::NotFound("대상을 찾을 수 없습니다".to_string()));
        }
        Ok(())
    }

    async fn populate(&self, wishlist: Wishlist) -> Result<WishlistResponse, AppError> {
        let products = self
            .product_repo
            .find_by_ids(&wishlist.products)
            .await?
            .into_iter()
            .filter(|p| !p.archived)
            .map(ProductResponse::from)
            .collect();

        let activities = self
            .activity_repo
            .find_by_ids(&wishlist.activities)
            .await?
            .into_iter()
            .filter(|a| !a.flagged)
            .map(ActivityResponse::from)
            .collect();

        let itineraries = self
            .itinerary_repo
            .find_by_ids(&wishlist.itineraries)
            .await?
            .into_iter()
            .filter(|i| i.active && !i.flagged)
            .map(ItineraryResponse::from)
            .collect();

        Ok(WishlistResponse { products, activities, itineraries })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_kind_is_validation_error() {
        assert_eq!(parse_kind("activities").unwrap(), WishlistKind::Activity);
        assert!(matches!(parse_kind("places"), Err(AppError::ValidationError(_))));
    }
}
