//! 사용자 관리 서비스 모듈
//!
//! - [`UserService`]: 로그인, 내 정보, 비밀번호, 프로필
//! - [`RegistrationService`]: 역할별 회원가입
//! - [`AdminService`]: 승인/거절, 계정 삭제, 내부 계정 생성
//!
//! # Security
//!
//! - bcrypt 비밀번호 해싱
//! - 이메일/사용자명 중복 방지
//! - 응답 DTO에서 비밀번호 해시 제외
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::users::UserService;
//!
//! let user_service = UserService::instance();
//! let response = user_service.login(request).await?;
//! ```

pub mod user_service;
pub mod registration_service;
pub mod admin_service;

pub use user_service::{ProfileImage, UserService};
pub use registration_service::RegistrationService;
pub use admin_service::AdminService;
