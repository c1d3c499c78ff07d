//! 계정 DTO (가입, 로그인, 프로필, 관리자 계정 관리)

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
