//! # 회원가입 서비스
//!
//! - 관광객: JSON 요청, 만 18세 미만 거부, 가입 즉시 지갑 생성
//! - 광고주/투어 가이드/판매자: multipart 요청, 신분증(및 가이드 자격증) 제출,
//!   관리자 승인 전까지 `pending`
//!
//! 사용자명/이메일 중복은 400으로 응답합니다.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime, Utc};
use mongodb::bson::DateTime;
use validator::Validate;

use crate::config::UploadConfig;
use crate::core::errors::AppError;
use crate::domain::dto::users::{ProviderRegisterFields, TouristRegisterRequest, UserResponse};
use crate::domain::entities::users::{
    AdvertiserProfile, Role, RoleProfile, SellerProfile, SubmittedDocument, TourGuideProfile, TouristProfile, User,
};
use crate::domain::entities::Wallet;
use crate::domain::models::eligibility::{is_adult, MINIMUM_TOURIST_AGE};
use crate::repositories::commerce::WalletRepository;
use crate::repositories::users::UserRepository;
use singleton_macro::service;
use crate::services::auth::password::hash_password;
use crate::services::uploads::upload_service::validate_upload;
use crate::services::uploads::{UploadKind, UploadService};
use crate::utils::multipart::{MultipartForm, UploadedFile};
use crate::utils::time::to_bson;

/// 신분증 multipart 필드
pub const IDENTIFICATION_FIELD: &str = "identificationDocument";
/// 투어 가이드 자격증 필드
pub const CERTIFICATE_FIELD: &str = "certificate";
/// 광고주/판매자 사업자 등록증 필드 (선택)
pub const TAXATION_FIELD: &str = "taxationRegistryCard";

#[service(name = "registration")]
pub struct RegistrationService {
    user_repo: Arc<UserRepository>,
    wallet_repo: Arc<WalletRepository>,
    upload_service: Arc<UploadService>,
}

impl RegistrationService {
    /// 관광객 가입
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - 18세 미만, 중복 사용자명/이메일
    pub async fn register_tourist(&self, request: TouristRegisterRequest) -> Result<UserResponse, AppError> {
        let today = Utc::now().date_naive();
        if !is_adult(request.date_of_birth, today) {
            return Err(AppError::ValidationError(format!(
                "만 {}세 이상만 가입할 수 있습니다",
                MINIMUM_TOURIST_AGE
            )));
        }

        self.ensure_available(&request.username, &request.email).await?;

        let profile = RoleProfile::Tourist(TouristProfile {
            mobile_number: request.mobile_number.trim().to_string(),
            nationality: request.nationality.trim().to_string(),
            date_of_birth: date_to_bson(request.date_of_birth),
            occupation: request.occupation.trim().to_string(),
            profile_picture: None,
        });
        let user = User::new(
            request.username.trim().to_string(),
            request.email.trim().to_string(),
            hash_password(&request.password)?,
            Role::Tourist,
            profile,
        );

        let created = self.user_repo.create(user).await?;
        let owner = created
            .id
            .ok_or_else(|| AppError::InternalError("생성된 사용자 ID가 없습니다".to_string()))?;

        if let Err(e) = self.wallet_repo.create(Wallet::new(owner)).await {
            log::error!("지갑 생성 실패, 가입 취소: {} ({})", created.username, e);
            self.user_repo.delete(&owner).await?;
            return Err(e);
        }

        log::info!("✅ 관광객 가입: {}", created.username);
        Ok(created.into())
    }

    /// 광고주/투어 가이드/판매자 가입 (multipart)
    pub async fn register_provider(&self, role: Role, mut form: MultipartForm) -> Result<UserResponse, AppError> {
        if !role.requires_approval() {
            return Err(AppError::ValidationError(format!("{} 역할은 이 방식으로 가입할 수 없습니다", role)));
        }

        let fields = ProviderRegisterFields {
            username: form.required_text("username")?,
            email: form.required_text("email")?,
            password: form.required_text("password")?,
        };
        fields.validate()?;

        let profile = provider_profile(role, &form)?;
        let uploads = required_documents(role, &mut form)?;

        let max_bytes = UploadConfig::max_file_bytes();
        for (_, file) in &uploads {
            validate_upload(file, UploadKind::Document, max_bytes)?;
        }

        self.ensure_available(&fields.username, &fields.email).await?;

        let mut documents = Vec::with_capacity(uploads.len());
        for (kind, file) in uploads {
            let url = self.upload_service.store(role, file, UploadKind::Document).await?;
            documents.push(SubmittedDocument {
                kind: kind.to_string(),
                url,
                uploaded_at: DateTime::now(),
            });
        }

        let mut user = User::new(
            fields.username.clone(),
            fields.email.clone(),
            hash_password(&fields.password)?,
            role,
            profile,
        );
        user.documents = documents;

        let created = self.user_repo.create(user).await?;
        log::info!("✅ {} 가입 신청: {} (승인 대기)", role, created.username);
        Ok(created.into())
    }

    async fn ensure_available(&self, username: &str, email: &str) -> Result<(), AppError> {
        if self.user_repo.exists_username_or_email(username, email).await? {
            return Err(AppError::ValidationError("이미 사용 중인 사용자명 또는 이메일입니다".to_string()));
        }
        Ok(())
    }
}

/// 생년월일(자정 UTC)을 BSON 시각으로
fn date_to_bson(date: NaiveDate) -> DateTime {
    to_bson(date.and_time(NaiveTime::MIN).and_utc())
}

/// snake_case와 camelCase 필드명을 모두 허용
fn text_field(form: &MultipartForm, snake: &str, camel: &str) -> Option<String> {
    form.text(snake).or_else(|| form.text(camel))
}

fn provider_profile(role: Role, form: &MultipartForm) -> Result<RoleProfile, AppError> {
    let profile = match role {
        Role::Advertiser => RoleProfile::Advertiser(AdvertiserProfile {
            website: form.text("website"),
            hotline: form.text("hotline"),
            company_profile: text_field(form, "company_profile", "companyProfile"),
            logo: None,
        }),
        Role::TourGuide => {
            let years = match form.number("years_of_experience")? {
                Some(years) => Some(years),
                None => form.number("yearsOfExperience")?,
            };
            if years.is_some_and(|y| !(0.0..=80.0).contains(&y)) {
                return Err(AppError::ValidationError("경력 연수가 올바르지 않습니다".to_string()));
            }

            RoleProfile::TourGuide(TourGuideProfile {
                mobile_number: text_field(form, "mobile_number", "mobileNumber"),
                years_of_experience: years.map(|y| y as i32),
                previous_work: text_field(form, "previous_work", "previousWork"),
                profile_picture: None,
            })
        }
        Role::Seller => RoleProfile::Seller(SellerProfile {
            name: form.text("name"),
            description: form.text("description"),
            logo: None,
        }),
        _ => RoleProfile::Staff,
    };
    Ok(profile)
}

/// 역할별 제출 서류 수집 (kind, file)
fn required_documents(role: Role, form: &mut MultipartForm) -> Result<Vec<(&'static str, UploadedFile)>, AppError> {
    let mut documents = vec![("identification", form.require_file(IDENTIFICATION_FIELD)?)];

    match role {
        Role::TourGuide => documents.push(("certificate", form.require_file(CERTIFICATE_FIELD)?)),
        Role::Advertiser | Role::Seller => {
            if let Some(card) = form.take_file(TAXATION_FIELD) {
                documents.push(("taxation_registry", card));
            }
        }
        _ => {}
    }

    Ok(documents)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pdf(name: &str) -> UploadedFile {
        UploadedFile {
            file_name: name.to_string(),
            content_type: "application/pdf".to_string(),
            bytes: vec![1, 2, 3],
        }
    }

    fn form(texts: &[(&str, &str)], files: &[&str]) -> MultipartForm {
        let mut form = MultipartForm::default();
        for (k, v) in texts {
            form.texts.insert(k.to_string(), v.to_string());
        }
        for name in files {
            form.files.insert(name.to_string(), pdf(&format!("{}.pdf", name)));
        }
        form
    }

    #[test]
    fn test_tour_guide_needs_certificate() {
        let mut missing = form(&[], &[IDENTIFICATION_FIELD]);
        assert!(matches!(
            required_documents(Role::TourGuide, &mut missing),
            Err(AppError::ValidationError(_))
        ));

        let mut complete = form(&[], &[IDENTIFICATION_FIELD, CERTIFICATE_FIELD]);
        let docs = required_documents(Role::TourGuide, &mut complete).unwrap();
        let kinds: Vec<_> = docs.iter().map(|(kind, _)| *kind).collect();
        assert_eq!(kinds, vec!["identification", "certificate"]);
    }

    #[test]
    fn test_seller_taxation_card_is_optional() {
        let mut without = form(&[], &[IDENTIFICATION_FIELD]);
        assert_eq!(required_documents(Role::Seller, &mut without).unwrap().len(), 1);

        let mut with = form(&[], &[IDENTIFICATION_FIELD, TAXATION_FIELD]);
        assert_eq!(required_documents(Role::Seller, &mut with).unwrap().len(), 2);
    }

    #[test]
    fn test_provider_profile_reads_camel_case_fields() {
        let form = form(&[("mobileNumber", "+20111"), ("yearsOfExperience", "6")], &[]);

        match provider_profile(Role::TourGuide, &form).unwrap() {
            RoleProfile::TourGuide(profile) => {
                assert_eq!(profile.mobile_number.as_deref(), Some("+20111"));
                assert_eq!(profile.years_of_experience, Some(6));
            }
            other => panic!("unexpected profile: {:?}", other),
        }
    }

    #[test]
    fn test_provider_profile_rejects_bad_experience() {
        let form = form(&[("years_of_experience", "-3")], &[]);
        assert!(provider_profile(Role::TourGuide, &form).is_err());
    }

    #[test]
    fn test_date_of_birth_is_stored_at_midnight_utc() {
        let dob = NaiveDate::from_ymd_opt(2000, 1, 31).unwrap();
        let stored = date_to_bson(dob);
        assert_eq!(crate::utils::time::to_utc(stored).date_naive(), dob);
    }
}
