//! 공통 유틸리티 함수 모듈
//!
//! 애플리케이션 전체에서 사용되는 공통 유틸리티 함수들을 제공합니다.
//!
//! # Modules
//!
//! - [`string_utils`] - 문자열 검증, 정리, 파일명 정규화
//! - [`display_terminal`] - 터미널 출력 포맷팅 함수들
//! - [`time`] - BSON/chrono 시간 변환
//! - [`multipart`] - multipart/form-data 요청 수집
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::utils::string_utils::validate_required_string;
//! use crate::utils::display_terminal::print_boxed_title;
//!
//! let clean_name = validate_required_string("  Cairo Tower  ", "name")?;
//! print_boxed_title("System Initialized");
//! ```

pub mod string_utils;
pub mod display_terminal;
pub mod time;
pub mod multipart;
