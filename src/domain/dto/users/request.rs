//! 사용자 관련 요청 DTO

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::entities::users::{AccountStatus, Role};

/// 관광객 회원가입 요청 (JSON)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TouristRegisterRequest {
    #[validate(length(min = 3, max = 30, message = "사용자명은 3-30자 사이여야 합니다"))]
    #[validate(custom(function = "validate_username"))]
    pub username: String,

    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(length(min = 8, message = "비밀번호는 최소 8자 이상이어야 합니다"))]
    pub password: String,

    #[serde(alias = "mobileNumber")]
    #[validate(length(min = 5, max = 20, message = "휴대폰 번호 형식이 올바르지 않습니다"))]
    pub mobile_number: String,

    #[validate(length(min = 2, max = 60, message = "국적을 입력해주세요"))]
    pub nationality: String,

    #[serde(alias = "dateOfBirth", alias = "dob")]
    pub date_of_birth: NaiveDate,

    #[validate(length(min = 1, max = 60, message = "직업을 입력해주세요"))]
    pub occupation: String,
}

/// 광고주/투어 가이드/판매자 가입 시 multipart 텍스트 필드에서 구성되는 요청
#[derive(Debug, Clone, Default, Validate)]
pub struct ProviderRegisterFields {
    #[validate(length(min = 3, max = 30, message = "사용자명은 3-30자 사이여야 합니다"))]
    #[validate(custom(function = "validate_username"))]
    pub username: String,

    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(length(min = 8, message = "비밀번호는 최소 8자 이상이어야 합니다"))]
    pub password: String,
}

/// 로그인 요청 (사용자명 또는 이메일)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(alias = "username", alias = "email")]
    #[validate(length(min = 1, message = "사용자명 또는 이메일을 입력해주세요"))]
    pub identifier: String,

    #[validate(length(min = 1, message = "비밀번호를 입력해주세요"))]
    pub password: String,
}

/// 비밀번호 변경 요청
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[serde(alias = "oldPassword")]
    #[validate(length(min = 1, message = "현재 비밀번호를 입력해주세요"))]
    pub old_password: String,

    #[serde(alias = "newPassword")]
    #[validate(length(min = 8, message = "비밀번호는 최소 8자 이상이어야 합니다"))]
    pub new_password: String,
}

/// 프로필 수정 요청
///
/// 역할에 해당하지 않는 필드는 무시됩니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: Option<String>,
    // tourist / tour guide
    pub mobile_number: Option<String>,
    // tourist
    pub nationality: Option<String>,
    pub occupation: Option<String>,
    // tour guide
    #[validate(range(min = 0, max = 80, message = "경력 연수가 올바르지 않습니다"))]
    pub years_of_experience: Option<i32>,
    pub previous_work: Option<String>,
    // advertiser
    #[validate(url(message = "웹사이트 주소가 올바르지 않습니다"))]
    pub website: Option<String>,
    pub hotline: Option<String>,
    pub company_profile: Option<String>,
    // seller
    pub name: Option<String>,
    pub description: Option<String>,
}

/// 관리자가 내부 계정(관광청 담당자/관리자)을 생성하는 요청
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_internal_role"))]
pub struct CreateAccountRequest {
    #[validate(length(min = 3, max = 30, message = "사용자명은 3-30자 사이여야 합니다"))]
    #[validate(custom(function = "validate_username"))]
    pub username: String,

    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(length(min = 8, message = "비밀번호는 최소 8자 이상이어야 합니다"))]
    pub password: String,

    pub role: Role,
}

/// 계정 승인/거절 요청
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAccountStatusRequest {
    pub status: AccountStatus,
}

/// 관리자 사용자 목록 필터
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserListQuery {
    pub role: Option<Role>,
    pub status: Option<AccountStatus>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

fn validate_username(username: &str) -> Result<(), ValidationError> {
    if !username.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '.') {
        return Err(ValidationError::new("invalid_username")
            .with_message("사용자명은 알파벳, 숫자, 언더스코어, 점만 사용 가능합니다".into()));
    }
    Ok(())
}

fn validate_internal_role(req: &CreateAccountRequest) -> Result<(), ValidationError> {
    if !matches!(req.role, Role::TourismGovernor | Role::Admin) {
        return Err(ValidationError::new("invalid_role")
            .with_message("관리자는 관광청 담당자 또는 관리자 계정만 생성할 수 있습니다".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tourist_request() -> TouristRegisterRequest {
        TouristRegisterRequest {
            username: "amira_t".to_string(),
            email: "amira@example.com".to_string(),
            password: "sunrise-2026".to_string(),
            mobile_number: "+201001234567".to_string(),
            nationality: "Egyptian".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1995, 4, 2).unwrap(),
            occupation: "Engineer".to_string(),
        }
    }

    #[test]
    fn test_valid_tourist_request() {
        assert!(tourist_request().validate().is_ok());
    }

    #[test]
    fn test_invalid_email_and_short_password() {
        let mut req = tourist_request();
        req.email = "not-an-email".to_string();
        req.password = "short".to_string();

        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
    }

    #[test]
    fn test_username_rejects_symbols() {
        let mut req = tourist_request();
        req.username = "amira<script>".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_camel_case_aliases() {
        let json = serde_json::json!({
            "username": "amira_t",
            "email": "amira@example.com",
            "password": "sunrise-2026",
            "mobileNumber": "+201001234567",
            "nationality": "Egyptian",
            "dateOfBirth": "1995-04-02",
            "occupation": "Engineer"
        });
        let req: TouristRegisterRequest = serde_json::from_value(json).unwrap();
        assert_eq!(req.date_of_birth, NaiveDate::from_ymd_opt(1995, 4, 2).unwrap());
    }

    #[test]
    fn test_admin_can_only_create_internal_roles() {
        let mut req = CreateAccountRequest {
            username: "gov_giza".to_string(),
            email: "gov@giza.example".to_string(),
            password: "pyramids-2026".to_string(),
            role: Role::TourismGovernor,
        };
        assert!(req.validate().is_ok());

        req.role = Role::Seller;
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_login_accepts_username_or_email_key() {
        let by_email: LoginRequest =
            serde_json::from_value(serde_json::json!({ "email": "a@b.com", "password": "x" })).unwrap();
        let by_name: LoginRequest =
            serde_json::from_value(serde_json::json!({ "username": "amira_t", "password": "x" })).unwrap();

        assert_eq!(by_email.identifier, "a@b.com");
        assert_eq!(by_name.identifier, "amira_t");
    }
}
