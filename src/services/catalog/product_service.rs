//! # 상품 서비스
//!
//! 판매자(및 관리자)가 등록하는 기념품 상품을 관리합니다.
//! 보관(archived) 상품은 공개 목록에서 숨겨지고 주문할 수 없습니다.
//! 재고 차감은 주문 서비스가 [`ProductRepository::take_stock`]으로 처리합니다.

use std::sync::Arc;

use mongodb::bson::{doc, oid::ObjectId, DateTime, Document};

use super::ensure_owner_or_admin;
use crate::core::errors::AppError;
use crate::domain::auth::AuthenticatedUser;
use crate::domain::dto::catalog::{CreateProductRequest, ProductResponse, RateRequest, UpdateProductRequest};
use crate::domain::entities::users::Role;
use crate::domain::entities::{Product, Rating, WishlistKind};
use crate::domain::models::filters::{sort_products, ProductFilter, ProductQuery};
use crate::domain::models::pagination::Page;
use crate::repositories::base::parse_object_id;
use crate::repositories::catalog::ProductRepository;
use crate::repositories::commerce::{OrderRepository, WishlistRepository};
use singleton_macro::service;
use crate::services::uploads::{UploadKind, UploadService};
use crate::services::users::UserService;
use crate::utils::multipart::UploadedFile;
use crate::utils::string_utils::clean_optional_string;

/// 보관 상품을 볼 수 있는 역할
fn can_see_archived(viewer: Option<&AuthenticatedUser>) -> bool {
    viewer.is_some_and(|u| u.has_any_role(&[Role::Seller, Role::Admin]))
}

#[service(name = "product")]
pub struct ProductService {
    product_repo: Arc<ProductRepository>,
    order_repo: Arc<OrderRepository>,
    wishlist_repo: Arc<WishlistRepository>,
    user_service: Arc<UserService>,
    upload_service: Arc<UploadService>,
}

impl ProductService {
    /// 상품 목록. `include_archived`는 판매자/관리자에게만 적용됩니다.
    pub async fn list(&self, viewer: Option<&AuthenticatedUser>, mut query: ProductQuery) -> Result<Page<ProductResponse>, AppError> {
        query.include_archived &= can_see_archived(viewer);
        let filter = ProductFilter::from(&query);

        let mut products: Vec<Product> = self
            .product_repo
            .find_all(filter.include_archived)
            .await?
            .into_iter()
            .filter(|p| filter.matches(p))
            .collect();
        sort_products(&mut products, query.sort_by, query.order.unwrap_or_default());

        Ok(Page::paginate(products, query.page, query.limit).map(ProductResponse::from))
    }

    pub async fn get(&self, viewer: Option<&AuthenticatedUser>, id: &str) -> Result<ProductResponse, AppError> {
        let product = self.find(id).await?;
        if product.archived && !can_see_archived(viewer) {
            return Err(AppError::NotFound("상품을 찾을 수 없습니다".to_string()));
        }
        Ok(product.into())
    }

    pub async fn mine(&self, seller: &ObjectId) -> Result<Vec<ProductResponse>, AppError> {
        let products = self.product_repo.find_by_seller(seller).await?;
        Ok(products.into_iter().map(ProductResponse::from).collect())
    }

    pub async fn create(&self, user: &AuthenticatedUser, request: CreateProductRequest) -> Result<ProductResponse, AppError> {
        let seller = user.object_id()?;
        self.user_service.require_publisher(&seller).await?;

        let now = DateTime::now();
        let product = Product {
            id: None,
            name: request.name.trim().to_string(),
            picture: clean_optional_string(request.picture),
            description: request.description.trim().to_string(),
            price: request.price,
            quantity: request.quantity,
            sales: 0,
            seller,
            archived: false,
            ratings: Vec::new(),
            created_at: now,
            updated_at: now,
        };

        let created = self.product_repo.create(product).await?;
        log::info!("🛍️ 상품 등록: {} (seller {})", created.name, seller);
        Ok(created.into())
    }

    pub async fn update(&self, user: &AuthenticatedUser, id: &str, request: UpdateProductRequest) -> Result<ProductResponse, AppError> {
        let product = self.find(id).await?;
        ensure_owner_or_admin(&product.seller, user, "상품")?;

        let mut set = Document::new();
        if let Some(name) = clean_optional_string(request.name) {
            set.insert("name", name);
        }
        if let Some(picture) = clean_optional_string(request.picture) {
            set.insert("picture", picture);
        }
        if let Some(description) = clean_optional_string(request.description) {
            set.insert("description", description);
        }
        if let Some(price) = request.price {
            set.insert("price", price);
        }
        if let Some(quantity) = request.quantity {
            set.insert("quantity", quantity);
        }

        let id = product.id.ok_or_else(|| AppError::InternalError("상품 ID가 없습니다".to_string()))?;
        if set.is_empty() {
            return Ok(product.into());
        }

        self.product_repo
            .update(&id, set)
            .await?
            .map(ProductResponse::from)
            .ok_or_else(|| AppError::NotFound("상품을 찾을 수 없습니다".to_string()))
    }

    /// 상품 사진 업로드
    pub async fn update_picture(&self, user: &AuthenticatedUser, id: &str, file: UploadedFile) -> Result<ProductResponse, AppError> {
        let product = self.find(id).await?;
        ensure_owner_or_admin(&product.seller, user, "상품")?;

        let url = self.upload_service.store(user.role, file, UploadKind::Image).await?;
        let id = product.id.ok_or_else(|| AppError::InternalError("상품 ID가 없습니다".to_string()))?;

        let updated = self
            .product_repo
            .update(&id, doc! { "picture": url.as_str() })
            .await?
            .ok_or_else(|| AppError::NotFound("상품을 찾을 수 없습니다".to_string()))?;

        if let Some(previous) = product.picture {
            self.upload_service.remove(&previous).await;
        }
        Ok(updated.into())
    }

    pub async fn set_archived(&self, user: &AuthenticatedUser, id: &str, archived: bool) -> Result<ProductResponse, AppError> {
        let product = self.find(id).await?;
        ensure_owner_or_admin(&product.seller, user, "상품")?;

        let id = product.id.ok_or_else(|| AppError::InternalError("상품 ID가 없습니다".to_string()))?;
        let updated = self
            .product_repo
            .update(&id, doc! { "archived": archived })
            .await?
            .ok_or_else(|| AppError::NotFound("상품을 찾을 수 없습니다".to_string()))?;

        log::info!("📦 상품 보관 상태 변경: {} → {}", updated.name, archived);
        Ok(updated.into())
    }

    pub async fn delete(&self, user: &AuthenticatedUser, id: &str) -> Result<(), AppError> {
        let product = self.find(id).await?;
        ensure_owner_or_admin(&product.seller, user, "상품")?;

        let id = product.id.ok_or_else(|| AppError::InternalError("상품 ID가 없습니다".to_string()))?;
        if !self.product_repo.delete(&id).await? {
            return Err(AppError::NotFound("상품을 찾을 수 없습니다".to_string()));
        }
        self.wishlist_repo.remove_everywhere(WishlistKind::Product, &id).await?;

        log::info!("🗑️ 상품 삭제: {}", product.name);
        Ok(())
    }

    /// 구매한 관광객만 평가할 수 있습니다.
    pub async fn rate(&self, tourist: &ObjectId, id: &str, request: RateRequest) -> Result<ProductResponse, AppError> {
        let product = self.find(id).await?;
        let id = product.id.ok_or_else(|| AppError::InternalError("상품 ID가 없습니다".to_string()))?;

        if !self.order_repo.has_purchased(tourist, &id).await? {
            return Err(AppError::AuthorizationError("구매한 상품만 평가할 수 있습니다".to_string()));
        }

        let rating = Rating {
            tourist: *tourist,
            rating: request.rating,
            comment: clean_optional_string(request.comment),
            created_at: DateTime::now(),
        };

        self.product_repo
            .upsert_rating(&id, &rating)
            .await?
            .map(ProductResponse::from)
            .ok_or_else(|| AppError::NotFound("상품을 찾을 수 없습니다".to_string()))
    }

    async fn find(&self, id: &str) -> Result<Product, AppError> {
        let id = parse_object_id(id)?;
        self.product_repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| AppError::NotFound("상품을 찾을 수 없습니다".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewer(role: Role) -> AuthenticatedUser {
        AuthenticatedUser { user_id: ObjectId::new().to_hex(), role, username: "viewer".to_string() }
    }

    #[test]
    fn test_archived_visibility() {
        assert!(!can_see_archived(None));
        assert!(!can_see_archived(Some(&viewer(Role::Tourist))));
        assert!(can_see_archived(Some(&viewer(Role::Seller))));
        assert!(can_see_archived(Some(&viewer(Role::Admin))));
    }
}
