//! 인증 서비스 모듈
//!
//! JWT 발급/검증([`TokenService`])과 비밀번호 해싱을 담당합니다.
//!
//! # Security
//!
//! - HMAC-SHA256 토큰 서명
//! - bcrypt 비밀번호 해싱 (환경별 cost)
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::auth::TokenService;
//!
//! let token_service = TokenService::instance();
//! let token = token_service.generate_token(&user)?;
//! ```

pub mod token_service;
pub mod password;

pub use token_service::*;
