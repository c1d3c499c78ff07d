//! 미들웨어 모듈
//!
//! 요청 처리 파이프라인의 횡단 관심사를 처리합니다.
//!
//! ### 인증 미들웨어 (AuthMiddleware)
//! - `Authorization: Bearer <JWT>` 검증 후 사용자 정보를 request extension에 저장
//! - 필수(401)/선택 인증 모드
//! - 역할 요구 시 불일치는 403
//!
//! ```rust,ignore
//! use actix_web::{web, App};
//! use crate::domain::entities::users::Role;
//!
//! App::new()
//!     .service(
//!         web::scope("/api/admin")
//!             .wrap(AuthMiddleware::required_with_role(Role::Admin))
//!             .route("/users", web::get().to(list_users))
//!     )
//!     .service(
//!         web::scope("/api/activities")
//!             .wrap(AuthMiddleware::optional())
//!             .route("", web::get().to(list_activities))
//!     )
//! ```

pub mod auth_middleware;
mod auth_inner;

pub use auth_middleware::AuthMiddleware;
