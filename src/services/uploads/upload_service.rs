//! 업로드 파일 저장 서비스
//!
//! 검증을 통과한 파일을 `<UPLOAD_DIR>/<역할 디렉터리>/<uuid>-<정리된 파일명>`에 저장하고
//! 정적 서빙 경로(`/uploads/...`)를 돌려줍니다. 디스크 쓰기는 `web::block`으로
//! 워커 스레드를 막지 않게 처리합니다.

use std::path::{Path, PathBuf};

use actix_web::web;
use uuid::Uuid;

use crate::config::UploadConfig;
use crate::core::errors::{AppError, ErrorContext};
use crate::domain::entities::users::Role;
use singleton_macro::service;
use crate::utils::multipart::UploadedFile;
use crate::utils::string_utils::sanitize_file_name;

const IMAGE_TYPES: &[&str] = &["image/jpeg", "image/png", "image/webp"];
const DOCUMENT_TYPES: &[&str] = &["application/pdf", "image/jpeg", "image/png"];

/// 업로드 종류별 허용 MIME 타입
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    /// 프로필 사진, 로고, 상품/장소 사진
    Image,
    /// 신분증, 자격증 등 가입 서류
    Document,
}

impl UploadKind {
    pub fn allowed_types(&self) -> &'static [&'static str] {
        match self {
            UploadKind::Image => IMAGE_TYPES,
            UploadKind::Document => DOCUMENT_TYPES,
        }
    }
}

/// MIME 타입과 크기 검사
pub fn validate_upload(file: &UploadedFile, kind: UploadKind, max_bytes: usize) -> Result<(), AppError> {
    if !kind.allowed_types().contains(&file.content_type.as_str()) {
        return Err(AppError::ValidationError(format!(
            "허용되지 않는 파일 형식입니다: {} (허용: {})",
            file.content_type,
            kind.allowed_types().join(", ")
        )));
    }
    if file.bytes.is_empty() {
        return Err(AppError::ValidationError("빈 파일은 업로드할 수 없습니다".to_string()));
    }
    if file.bytes.len() > max_bytes {
        return Err(AppError::ValidationError(format!(
            "파일 크기는 최대 {}바이트까지 허용됩니다",
            max_bytes
        )));
    }
    Ok(())
}

/// 저장 파일명: `<uuid>-<정리된 원본 이름>`
pub fn stored_file_name(original: &str) -> String {
    format!("{}-{}", Uuid::new_v4(), sanitize_file_name(original))
}

#[service(name = "upload")]
pub struct UploadService {}

impl UploadService {
    /// 검증 후 업로드 루트에 저장하고 공개 URL을 반환합니다.
    pub async fn store(&self, role: Role, file: UploadedFile, kind: UploadKind) -> Result<String, AppError> {
        validate_upload(&file, kind, UploadConfig::max_file_bytes())?;
        store_in(UploadConfig::root_dir(), role.upload_dir(), file).await
    }

    /// 저장된 파일 삭제 (교체된 프로필 사진 등). 실패는 경고만 남깁니다.
    pub async fn remove(&self, public_url: &str) {
        let Some(relative) = public_url.strip_prefix(UploadConfig::public_prefix()) else {
            return;
        };
        let path = UploadConfig::root_dir().join(relative.trim_start_matches('/'));

        let result = web::block(move || std::fs::remove_file(path)).await;
        match result {
            Ok(Ok(())) => {}
            Ok(Err(e)) => log::warn!("업로드 파일 삭제 실패 {}: {}", public_url, e),
            Err(e) => log::warn!("업로드 파일 삭제 작업 실패 {}: {}", public_url, e),
        }
    }
}

/// `root/<dir>/` 아래에 파일을 쓰고 `/uploads/<dir>/<file>`을 반환합니다.
pub(crate) async fn store_in(root: PathBuf, dir: &'static str, file: UploadedFile) -> Result<String, AppError> {
    let file_name = stored_file_name(&file.file_name);
    let target_dir = root.join(dir);
    let target = target_dir.join(&file_name);

    web::block(move || write_file(&target_dir, &target, &file.bytes))
        .await
        .context("업로드 작업 실패")??;

    log::info!("📁 파일 저장: {}/{}", dir, file_name);
    Ok(format!("{}/{}/{}", UploadConfig::public_prefix(), dir, file_name))
}

fn write_file(dir: &Path, target: &Path, bytes: &[u8]) -> Result<(), AppError> {
    std::fs::create_dir_all(dir).context("업로드 디렉터리 생성 실패")?;
    std::fs::write(target, bytes).with_context(|| format!("파일 저장 실패 ({})", target.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(content_type: &str, size: usize) -> UploadedFile {
        UploadedFile {
            file_name: "my passport.pdf".to_string(),
            content_type: content_type.to_string(),
            bytes: vec![7u8; size],
        }
    }

    #[test]
    fn test_mime_allow_lists() {
        assert!(validate_upload(&file("application/pdf", 10), UploadKind::Document, 100).is_ok());
        assert!(validate_upload(&file("application/pdf", 10), UploadKind::Image, 100).is_err());
        assert!(validate_upload(&file("image/webp", 10), UploadKind::Image, 100).is_ok());
        assert!(validate_upload(&file("text/html", 10), UploadKind::Document, 100).is_err());
    }

    #[test]
    fn test_size_ceiling() {
        assert!(validate_upload(&file("image/png", 101), UploadKind::Image, 100).is_err());
        assert!(validate_upload(&file("image/png", 0), UploadKind::Image, 100).is_err());
    }

    #[test]
    fn test_stored_file_name_is_unique_and_sanitized() {
        let first = stored_file_name("../../etc/passwd");
        let second = stored_file_name("../../etc/passwd");

        assert_ne!(first, second);
        assert!(first.ends_with("-passwd"));
        assert!(!first.contains('/'));
    }

    #[actix_web::test]
    async fn test_store_writes_under_role_directory() {
        let root = std::env::temp_dir().join(format!("uploads-test-{}", Uuid::new_v4()));

        let url = store_in(root.clone(), Role::Seller.upload_dir(), file("application/pdf", 16))
            .await
            .unwrap();

        assert!(url.starts_with("/uploads/sellers/"));
        assert!(url.ends_with("-my_passport.pdf"));

        let stored = root.join(url.trim_start_matches("/uploads/"));
        assert_eq!(std::fs::read(&stored).unwrap().len(), 16);

        let _ = std::fs::remove_dir_all(root);
    }
}
