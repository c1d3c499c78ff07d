//! 관광 마켓플레이스 백엔드
//!
//! 관광객, 광고주, 투어 가이드, 판매자, 관광청 담당자, 관리자가 함께 사용하는
//! 관광 마켓플레이스 REST API 서버입니다.
//!
//! # Features
//!
//! - **계정**: 역할별 가입, 서류 제출, 관리자 승인, JWT 로그인
//! - **카탈로그**: 활동, 일정, 역사적 장소, 상품, 교통편, 태그/카테고리
//! - **커머스**: 예약, 주문, 지갑 결제/환불, 로열티 포인트, 위시리스트, 매출 리포트
//! - **지원**: 불만 접수, 알림
//! - **여행**: 외부 호텔/항공 검색 및 예약
//! - **레지스트리 DI**: 매크로 기반 리포지토리/서비스 자동 등록
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트 + 인증 미들웨어
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청 추출/검증
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 비즈니스 로직
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← 데이터 액세스
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │     MongoDB     │ ← 저장소
//! └─────────────────┘
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod middlewares;
