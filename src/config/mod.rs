//! # Configuration Module
//!
//! 환경 변수 기반 설정값을 중앙집중식으로 관리합니다.
//! 실행 시 `PROFILE`에 따라 `.env.dev` / `.env.prod` 파일이 먼저 로드됩니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 실행 환경, 서버, bcrypt, CORS, Rate Limiting
//! - [`auth_config`] - JWT 설정
//! - [`upload_config`] - 업로드 저장 경로, 크기 제한
//! - [`travel_config`] - 외부 여행 API 자격 증명
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! # 서버
//! export HOST="0.0.0.0"
//! export PORT="8080"
//! export FRONTEND_ORIGIN="http://localhost:3000"
//!
//! # 데이터베이스
//! export MONGODB_URI="mongodb://localhost:27017"
//! export DATABASE_NAME="tourism_marketplace"
//!
//! # 보안
//! export JWT_SECRET="your-super-secret-key"
//! export BCRYPT_COST="12"
//!
//! # 업로드
//! export UPLOAD_DIR="uploads"
//! export UPLOAD_MAX_BYTES="5242880"
//! ```

pub mod data_config;
pub mod auth_config;
pub mod upload_config;
pub mod travel_config;

pub use data_config::*;
pub use auth_config::*;
pub use upload_config::*;
pub use travel_config::*;
