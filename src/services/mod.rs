//! # Application Services
//!
//! 비즈니스 로직 계층입니다. 모든 서비스는 `#[service]` 속성으로 등록되는
//! 싱글톤이며 리포지토리와 다른 서비스를 주입받습니다.
//!
//! | 모듈 | 역할 |
//! |------|------|
//! | [`auth`] | JWT 발급/검증, 비밀번호 해싱 |
//! | [`users`] | 가입, 로그인, 프로필, 관리자 기능 |
//! | [`catalog`] | 활동, 일정, 장소, 태그, 상품, 교통편 |
//! | [`commerce`] | 예약, 주문, 지갑, 위시리스트, 매출 |
//! | [`support`] | 불만 접수, 알림 |
//! | [`travel`] | 외부 호텔/항공 API 프록시 |
//! | [`uploads`] | 업로드 파일 저장 |

pub mod auth;
pub mod users;
pub mod catalog;
pub mod commerce;
pub mod support;
pub mod travel;
pub mod uploads;
