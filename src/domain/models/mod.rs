//! # Domain Models
//!
//! 영속되지 않는 도메인 모델과 순수 비즈니스 규칙입니다.
//!
//! - [`auth`] - 인증된 사용자, 인증 모드와 역할 요구사항
//! - [`token`] - JWT 클레임
//! - [`filters`] - 목록 필터/정렬 조건식
//! - [`pricing`] - 할인, 플랫폼 수수료, 로열티 포인트, 취소 시한
//! - [`eligibility`] - 가입 연령 검사
//! - [`pagination`] - 메모리 페이지네이션

pub mod auth;
pub mod token;
pub mod filters;
pub mod pricing;
pub mod eligibility;
pub mod pagination;

pub use auth::*;
pub use token::*;
pub use pagination::Page;
