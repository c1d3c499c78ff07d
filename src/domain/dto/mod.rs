//! # Data Transfer Objects
//!
//! HTTP 요청/응답 계약입니다. 요청 DTO는 `validator`로 검증하고,
//! 응답 DTO는 엔티티에서 변환되며 ObjectId는 16진 문자열, 시각은 RFC 3339로 직렬화됩니다.

pub mod users;
pub mod catalog;
pub mod commerce;
pub mod support;
pub mod travel;
