//! multipart/form-data 수집 유틸리티
//!
//! 가입 서류, 프로필 사진, 로고 업로드 요청은 텍스트 필드와 파일 필드가 섞여
//! 들어옵니다. [`collect_form`]은 스트림 전체를 읽어 두 종류로 분리하고,
//! [`FormLimits`]를 넘는 순간 즉시 거부합니다.
//!
//! | 한도 | 값 |
//! |------|----|
//! | 파일 필드 하나 | `UPLOAD_MAX_BYTES` (기본 5 MiB) |
//! | 텍스트 필드 하나 | 64 KiB |
//! | 요청 전체 | 파일 4개 + 텍스트 64 KiB |
//! | 필드 수 | 64 |

use std::collections::HashMap;

use actix_multipart::{Field, Multipart};
use futures_util::TryStreamExt;

use crate::core::errors::AppError;

/// 텍스트 필드 하나의 최대 바이트 수
pub const MAX_TEXT_FIELD_BYTES: usize = 64 * 1024;

/// 요청 전체 한도를 계산할 때의 파일 수
pub const MAX_FILES_PER_FORM: usize = 4;

const MAX_FIELDS_PER_FORM: usize = 64;

/// multipart 폼 크기 한도
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormLimits {
    pub max_file_bytes: usize,
    pub max_text_bytes: usize,
    pub max_total_bytes: usize,
}

impl FormLimits {
    pub fn for_uploads(max_file_bytes: usize) -> Self {
        Self {
            max_file_bytes,
            max_text_bytes: MAX_TEXT_FIELD_BYTES,
            max_total_bytes: max_file_bytes
                .saturating_mul(MAX_FILES_PER_FORM)
                .saturating_add(MAX_TEXT_FIELD_BYTES),
        }
    }
}

/// 폼 하나를 읽는 동안 소비한 필드 수와 바이트 수
#[derive(Debug)]
struct FormBudget {
    limits: FormLimits,
    total_bytes: usize,
    fields: usize,
}

impl FormBudget {
    fn new(limits: FormLimits) -> Self {
        Self { limits, total_bytes: 0, fields: 0 }
    }

    fn start_field(&mut self) -> Result<(), AppError> {
        self.fields += 1;
        if self.fields > MAX_FIELDS_PER_FORM {
            return Err(AppError::ValidationError(format!(
                "필드는 최대 {}개까지 보낼 수 있습니다",
                MAX_FIELDS_PER_FORM
            )));
        }
        Ok(())
    }

    /// 필드에 `chunk_len` 바이트를 더 받아도 되는지 확인하고 소비합니다.
    fn accept(&mut self, name: &str, is_file: bool, field_len: usize, chunk_len: usize) -> Result<(), AppError> {
        let (limit, label) = if is_file {
            (self.limits.max_file_bytes, "파일")
        } else {
            (self.limits.max_text_bytes, "텍스트 필드")
        };
        if field_len.saturating_add(chunk_len) > limit {
            return Err(AppError::ValidationError(format!(
                "{} {}가 최대 크기({} bytes)를 초과했습니다",
                name, label, limit
            )));
        }

        let total = self.total_bytes.saturating_add(chunk_len);
        if total > self.limits.max_total_bytes {
            return Err(AppError::ValidationError(format!(
                "요청 전체 크기가 최대 크기({} bytes)를 초과했습니다",
                self.limits.max_total_bytes
            )));
        }
        self.total_bytes = total;
        Ok(())
    }
}

/// 업로드된 파일 하나
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// 클라이언트가 보낸 원본 파일명
    pub file_name: String,
    /// `Content-Type` (없으면 `application/octet-stream`)
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// 수집된 multipart 폼
#[derive(Debug, Default)]
pub struct MultipartForm {
    pub texts: HashMap<String, String>,
    pub files: HashMap<String, UploadedFile>,
}

impl MultipartForm {
    /// 텍스트 필드 (공백 제거, 비어 있으면 None)
    pub fn text(&self, name: &str) -> Option<String> {
        self.texts
            .get(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    /// 필수 텍스트 필드
    pub fn required_text(&self, name: &str) -> Result<String, AppError> {
        self.text(name)
            .ok_or_else(|| AppError::ValidationError(format!("{} 필드는 필수입니다", name)))
    }

    /// 숫자 텍스트 필드
    pub fn number(&self, name: &str) -> Result<Option<f64>, AppError> {
        self.text(name)
            .map(|v| {
                v.parse::<f64>()
                    .map_err(|_| AppError::ValidationError(format!("{} 필드는 숫자여야 합니다", name)))
            })
            .transpose()
    }

    /// 파일 필드를 꺼냅니다.
    pub fn take_file(&mut self, name: &str) -> Option<UploadedFile> {
        self.files.remove(name)
    }

    /// 필수 파일 필드
    pub fn require_file(&mut self, name: &str) -> Result<UploadedFile, AppError> {
        self.take_file(name)
            .ok_or_else(|| AppError::ValidationError(format!("{} 파일이 필요합니다", name)))
    }
}

/// multipart 스트림 전체를 읽어 [`MultipartForm`]으로 수집합니다.
///
/// 파일명이 있는 필드는 파일로, 나머지는 UTF-8 텍스트로 취급합니다.
///
/// # Errors
///
/// * `AppError::ValidationError` - 스트림 파싱 실패, 크기 초과, UTF-8이 아닌 텍스트
pub async fn collect_form(mut payload: Multipart, limits: FormLimits) -> Result<MultipartForm, AppError> {
    let mut form = MultipartForm::default();
    let mut budget = FormBudget::new(limits);

    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|e| AppError::ValidationError(format!("multipart 요청을 읽을 수 없습니다: {}", e)))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        budget.start_field()?;

        let file_name = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_string);

        match file_name {
            Some(file_name) => {
                let content_type = field
                    .content_type()
                    .map(|ct| ct.essence_str().to_string())
                    .unwrap_or_else(|| "application/octet-stream".to_string());
                let bytes = read_field_data(&mut field, &mut budget, true, &name).await?;

                if bytes.is_empty() {
                    continue;
                }

                log::debug!("📎 업로드 필드 수신: {} ({} bytes, {})", name, bytes.len(), content_type);
                form.files.insert(name, UploadedFile { file_name, content_type, bytes });
            }
            None => {
                let data = read_field_data(&mut field, &mut budget, false, &name).await?;
                let value = String::from_utf8(data)
                    .map_err(|_| AppError::ValidationError(format!("{} 필드가 올바른 텍스트가 아닙니다", name)))?;
                form.texts.insert(name, value);
            }
        }
    }

    Ok(form)
}

async fn read_field_data(
    field: &mut Field,
    budget: &mut FormBudget,
    is_file: bool,
    name: &str,
) -> Result<Vec<u8>, AppError> {
    let mut data = Vec::new();
    while let Some(chunk) = field
        .try_next()
        .await
        .map_err(|e| AppError::ValidationError(format!("{} 필드를 읽을 수 없습니다: {}", name, e)))?
    {
        budget.accept(name, is_file, data.len(), chunk.len())?;
        data.extend_from_slice(&chunk);
    }
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form_with(texts: &[(&str, &str)]) -> MultipartForm {
        MultipartForm {
            texts: texts.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
            files: HashMap::new(),
        }
    }

    #[test]
    fn test_text_trims_and_drops_blank() {
        let form = form_with(&[("username", "  guide01 "), ("bio", "   ")]);

        assert_eq!(form.text("username").as_deref(), Some("guide01"));
        assert_eq!(form.text("bio"), None);
        assert!(matches!(form.required_text("bio"), Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_number_field() {
        let form = form_with(&[("years_of_experience", "7"), ("price", "abc")]);

        assert_eq!(form.number("years_of_experience").unwrap(), Some(7.0));
        assert_eq!(form.number("missing").unwrap(), None);
        assert!(form.number("price").is_err());
    }

    #[test]
    fn test_require_file_missing() {
        let mut form = MultipartForm::default();
        assert!(matches!(
            form.require_file("identificationDocument"),
            Err(AppError::ValidationError(_))
        ));
    }

    const MIB: usize = 1024 * 1024;

    #[test]
    fn test_text_fields_have_their_own_small_limit() {
        let mut budget = FormBudget::new(FormLimits::for_uploads(5 * MIB));

        assert!(budget.accept("bio", false, 0, MAX_TEXT_FIELD_BYTES).is_ok());
        assert!(matches!(
            budget.accept("bio", false, MAX_TEXT_FIELD_BYTES, 1),
            Err(AppError::ValidationError(_))
        ));
        assert!(budget.accept("picture", true, 0, MIB).is_ok());
    }

    #[test]
    fn test_file_limit_applies_per_field() {
        let mut budget = FormBudget::new(FormLimits::for_uploads(5 * MIB));

        assert!(budget.accept("document", true, 4 * MIB, MIB).is_ok());
        assert!(budget.accept("document", true, 5 * MIB, 1).is_err());
    }

    #[test]
    fn test_total_limit_caps_many_files() {
        let limits = FormLimits::for_uploads(MIB);
        assert_eq!(limits.max_total_bytes, MAX_FILES_PER_FORM * MIB + MAX_TEXT_FIELD_BYTES);

        let mut budget = FormBudget::new(limits);
        for i in 0..MAX_FILES_PER_FORM {
            assert!(budget.accept(&format!("file{}", i), true, 0, MIB).is_ok());
        }
        assert!(budget.accept("bio", false, 0, MAX_TEXT_FIELD_BYTES).is_ok());

        let result = budget.accept("extra", true, 0, 1);
        assert!(matches!(result, Err(AppError::ValidationError(msg)) if msg.contains("요청 전체")));
    }

    #[test]
    fn test_field_count_is_capped() {
        let mut budget = FormBudget::new(FormLimits::for_uploads(MIB));
        for _ in 0..MAX_FIELDS_PER_FORM {
            assert!(budget.start_field().is_ok());
        }
        assert!(budget.start_field().is_err());
    }
}
