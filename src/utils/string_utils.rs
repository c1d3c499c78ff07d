//! # 문자열 유틸리티
//!
//! 입력 정리, 검색 비교, 업로드 파일명 정리 등 공통 문자열 처리 함수들입니다.

use serde::Deserialize;

use crate::core::errors::AppError;

/// 필수 문자열을 검증하고 앞뒤 공백을 제거합니다.
///
/// # Errors
///
/// * `AppError::ValidationError` - 공백만 있거나 비어 있는 경우
pub fn validate_required_string(value: &str, field_name: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::ValidationError(format!("{}은(는) 필수입니다", field_name)));
    }
    Ok(trimmed.to_string())
}

/// 선택적 문자열을 정리합니다. 비어 있으면 `None`.
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// serde 역직렬화 시 빈 문자열을 `None`으로 처리합니다.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(clean_optional_string(opt))
}

/// 대소문자를 무시한 부분 문자열 검색
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.trim().to_lowercase())
}

/// 업로드 파일명을 디스크에 안전한 형태로 정리합니다.
///
/// 경로 구분자와 상위 디렉터리 참조를 제거하고, 영문/숫자/`.`/`-`/`_` 이외의
/// 문자는 `_`로 치환합니다. 결과가 비면 `file`을 반환합니다.
pub fn sanitize_file_name(original: &str) -> String {
    let base = original
        .rsplit(|c| c == '/' || c == '\\')
        .next()
        .unwrap_or(original);

    let cleaned: String = base
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') { c } else { '_' })
        .collect();

    let cleaned = cleaned.trim_start_matches('.').to_string();

    if cleaned.is_empty() {
        "file".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required_string() {
        assert_eq!(validate_required_string("Hello", "name").unwrap(), "Hello");
        assert_eq!(validate_required_string("  World  ", "name").unwrap(), "World");

        assert!(validate_required_string("", "name").is_err());
        assert!(validate_required_string("   ", "name").is_err());
        assert!(validate_required_string("\t\n", "name").is_err());
    }

    #[test]
    fn test_clean_optional_string() {
        assert_eq!(clean_optional_string(Some("  Giza  ".to_string())), Some("Giza".to_string()));
        assert_eq!(clean_optional_string(Some("   ".to_string())), None);
        assert_eq!(clean_optional_string(None), None);
    }

    #[test]
    fn test_deserialize_optional_string() {
        #[derive(Deserialize)]
        struct TestStruct {
            #[serde(default, deserialize_with = "deserialize_optional_string")]
            website: Option<String>,
        }

        let result: TestStruct = serde_json::from_str(r#"{"website": "  https://nile.example  "}"#).unwrap();
        assert_eq!(result.website, Some("https://nile.example".to_string()));

        let result: TestStruct = serde_json::from_str(r#"{"website": ""}"#).unwrap();
        assert_eq!(result.website, None);

        let result: TestStruct = serde_json::from_str(r#"{"website": null}"#).unwrap();
        assert_eq!(result.website, None);

        let result: TestStruct = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(result.website, None);
    }

    #[test]
    fn test_contains_ignore_case() {
        assert!(contains_ignore_case("Pyramids Night Tour", "night"));
        assert!(contains_ignore_case("Pyramids Night Tour", "  PYRAMIDS "));
        assert!(!contains_ignore_case("Pyramids Night Tour", "felucca"));
    }

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("passport scan.pdf"), "passport_scan.pdf");
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("C:\\Users\\me\\logo.png"), "logo.png");
        assert_eq!(sanitize_file_name(".hidden"), "hidden");
        assert_eq!(sanitize_file_name("사진.jpg"), "__.jpg");
        assert_eq!(sanitize_file_name(""), "file");
    }
}
