//! bcrypt 비밀번호 해싱 헬퍼

use crate::config::PasswordConfig;
use crate::core::errors::{AppError, ErrorContext};

/// 환경별 cost로 비밀번호를 해싱합니다.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash_with_cost(password, PasswordConfig::bcrypt_cost())
}

pub(crate) fn hash_with_cost(password: &str, cost: u32) -> Result<String, AppError> {
    bcrypt::hash(password, cost).context("비밀번호 해싱 실패")
}

/// 평문 비밀번호와 저장된 해시 비교
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, AppError> {
    let verify_start = std::time::Instant::now();
    let is_valid = bcrypt::verify(password, password_hash).context("비밀번호 검증 실패")?;

    log::debug!("Password verification took: {:?}", verify_start.elapsed());
    Ok(is_valid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_with_cost("s3cret-pass", 4).unwrap();

        assert_ne!(hash, "s3cret-pass");
        assert!(verify_password("s3cret-pass", &hash).unwrap());
        assert!(!verify_password("wrong-pass", &hash).unwrap());
    }

    #[test]
    fn test_malformed_hash_is_internal_error() {
        assert!(matches!(verify_password("x", "not-a-hash"), Err(AppError::InternalError(_))));
    }
}
