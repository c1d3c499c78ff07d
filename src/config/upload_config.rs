//! 파일 업로드 설정
//!
//! 업로드 파일은 `UPLOAD_DIR` 아래 역할별 하위 디렉터리에 저장되고
//! `/uploads` 경로로 정적 서빙됩니다.

use std::env;
use std::path::PathBuf;

/// 업로드 기본 최대 크기 (5 MiB)
pub const DEFAULT_MAX_FILE_BYTES: usize = 5 * 1024 * 1024;

pub struct UploadConfig;

impl UploadConfig {
    /// 업로드 루트 디렉터리 (`UPLOAD_DIR`, 기본값 `uploads`)
    pub fn root_dir() -> PathBuf {
        PathBuf::from(env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string()))
    }

    /// 파일 하나의 최대 바이트 수 (`UPLOAD_MAX_BYTES`)
    pub fn max_file_bytes() -> usize {
        env::var("UPLOAD_MAX_BYTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|&n: &usize| n > 0)
            .unwrap_or(DEFAULT_MAX_FILE_BYTES)
    }

    /// 정적 서빙 URL 접두사
    pub fn public_prefix() -> &'static str {
        "/uploads"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_defaults() {
        if env::var("UPLOAD_MAX_BYTES").is_err() {
            assert_eq!(UploadConfig::max_file_bytes(), 5 * 1024 * 1024);
        }
        if env::var("UPLOAD_DIR").is_err() {
            assert_eq!(UploadConfig::root_dir(), PathBuf::from("uploads"));
        }
        assert_eq!(UploadConfig::public_prefix(), "/uploads");
    }
}
