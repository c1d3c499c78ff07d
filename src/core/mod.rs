//! # Core Framework Module
//!
//! 백엔드 서비스의 공통 기반을 제공합니다.
//!
//! ### [`registry`] - 의존성 주입 컨테이너
//! - **ServiceLocator**: 타입 기반 싱글톤 컨테이너
//! - **자동 등록**: `#[repository]` / `#[service]` 속성이 `inventory`로 컴포넌트 제출
//! - **초기화**: 기동 시 리포지토리 생성 후 서비스 생성
//!
//! ### [`errors`] - 통합 에러 처리
//! - **AppError**: 애플리케이션 전역 에러 타입
//! - **HTTP 통합**: `actix_web::ResponseError` 구현으로 상태 코드 자동 매핑
//!
//! ## 기본 서비스 정의
//!
//! ```rust,ignore
//! #[service(name = "complaint")]
//! pub struct ComplaintService {
//!     complaint_repo: Arc<ComplaintRepository>,
//! }
//! ```

pub mod registry;
pub mod errors;

pub use errors::{AppError, AppResult, ErrorContext};
pub use registry::{Repository, Service, ServiceLocator};
