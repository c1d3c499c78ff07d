//! 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! `#[repository]` 속성으로 싱글톤 등록되는 컬렉션별 리포지토리를 제공합니다.
//! 기동 시 [`create_indexes`]가 각 컬렉션의 인덱스를 생성합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::repositories::catalog::ActivityRepository;
//!
//! let repo = ActivityRepository::instance();
//! let activity = repo.find_by_id(&id).await?;
//! ```

pub mod base;
pub mod users;
pub mod catalog;
pub mod commerce;
pub mod support;

use log::info;

use crate::core::errors::AppError;

/// 모든 컬렉션의 인덱스를 생성합니다.
pub async fn create_indexes() -> Result<(), AppError> {
    users::UserRepository::instance().create_indexes().await?;
    catalog::ActivityRepository::instance().create_indexes().await?;
    catalog::ItineraryRepository::instance().create_indexes().await?;
    catalog::PlaceRepository::instance().create_indexes().await?;
    catalog::TagRepository::instance().create_indexes().await?;
    catalog::CategoryRepository::instance().create_indexes().await?;
    catalog::ProductRepository::instance().create_indexes().await?;
    catalog::TransportationRepository::instance().create_indexes().await?;
    commerce::BookingRepository::instance().create_indexes().await?;
    commerce::OrderRepository::instance().create_indexes().await?;
    commerce::WalletRepository::instance().create_indexes().await?;
    commerce::WishlistRepository::instance().create_indexes().await?;
    support::ComplaintRepository::instance().create_indexes().await?;
    support::NotificationRepository::instance().create_indexes().await?;

    info!("🗂️ 컬렉션 인덱스 생성 완료");
    Ok(())
}
