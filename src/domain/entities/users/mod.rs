//! Users Entity Module
//!
//! 사용자 계정과 역할별 프로필 엔티티를 정의합니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use crate::domain::entities::users::{Role, RoleProfile, User};
//!
//! let user = User::new(
//!     "pyramid_tours".to_string(),
//!     "ops@pyramid.example".to_string(),
//!     hashed_password,
//!     Role::Advertiser,
//!     RoleProfile::Advertiser(AdvertiserProfile::default()),
//! );
//! assert_eq!(user.status, AccountStatus::Pending);
//! ```

pub mod user;
pub mod profile;

pub use user::{AccountStatus, Role, SubmittedDocument, User};
pub use profile::{AdvertiserProfile, RoleProfile, SellerProfile, TourGuideProfile, TouristProfile};
