//! 사용자 데이터 액세스 계층
//!
//! [`UserRepository`](user_repo::UserRepository)가 `users` 컬렉션을 담당합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::repositories::users::UserRepository;
//!
//! let user_repo = UserRepository::instance();
//! let user = user_repo.find_by_identifier("user@example.com").await?;
//! ```

pub mod user_repo;

pub use user_repo::UserRepository;
