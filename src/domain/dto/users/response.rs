//! 사용자 관련 응답 DTO
//!
//! 비밀번호 해시는 어떤 응답에도 포함되지 않습니다.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::users::{AccountStatus, Role, RoleProfile, User};
use crate::utils::time::to_utc;

/// 응답용 역할별 프로필
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProfileView {
    Tourist {
        mobile_number: String,
        nationality: String,
        date_of_birth: NaiveDate,
        occupation: String,
        profile_picture: Option<String>,
    },
    Advertiser {
        website: Option<String>,
        hotline: Option<String>,
        company_profile: Option<String>,
        logo: Option<String>,
    },
    TourGuide {
        mobile_number: Option<String>,
        years_of_experience: Option<i32>,
        previous_work: Option<String>,
        profile_picture: Option<String>,
    },
    Seller {
        name: Option<String>,
        description: Option<String>,
        logo: Option<String>,
    },
    Staff,
}

impl From<RoleProfile> for ProfileView {
    fn from(profile: RoleProfile) -> Self {
        match profile {
            RoleProfile::Tourist(p) => ProfileView::Tourist {
                mobile_number: p.mobile_number,
                nationality: p.nationality,
                date_of_birth: to_utc(p.date_of_birth).date_naive(),
                occupation: p.occupation,
                profile_picture: p.profile_picture,
            },
            RoleProfile::Advertiser(p) => ProfileView::Advertiser {
                website: p.website,
                hotline: p.hotline,
                company_profile: p.company_profile,
                logo: p.logo,
            },
            RoleProfile::TourGuide(p) => ProfileView::TourGuide {
                mobile_number: p.mobile_number,
                years_of_experience: p.years_of_experience,
                previous_work: p.previous_work,
                profile_picture: p.profile_picture,
            },
            RoleProfile::Seller(p) => ProfileView::Seller {
                name: p.name,
                description: p.description,
                logo: p.logo,
            },
            RoleProfile::Staff => ProfileView::Staff,
        }
    }
}

/// 제출 서류 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentView {
    pub kind: String,
    pub url: String,
}

/// 사용자 정보 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub status: AccountStatus,
    pub terms_accepted: bool,
    pub profile: ProfileView,
    pub documents: Vec<DocumentView>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let User {
            id,
            username,
            email,
            role,
            status,
            terms_accepted,
            profile,
            documents,
            created_at,
            updated_at,
            ..
        } = user;

        Self {
            id: id.map(|id| id.to_hex()).unwrap_or_default(),
            username,
            email,
            role,
            status,
            terms_accepted,
            profile: ProfileView::from(profile),
            documents: documents
                .into_iter()
                .map(|d| DocumentView { kind: d.kind, url: d.url })
                .collect(),
            created_at: to_utc(created_at),
            updated_at: to_utc(updated_at),
        }
    }
}

/// 로그인 응답
///
/// 프론트엔드는 `token`과 `role`을 저장해 이후 요청에 사용합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub role: Role,
    pub user: UserResponse,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::users::TouristProfile;
    use crate::utils::time::to_bson;
    use chrono::TimeZone;

    #[test]
    fn test_user_response_hides_password_hash() {
        let dob = Utc.with_ymd_and_hms(1995, 4, 2, 0, 0, 0).unwrap();
        let mut user = User::new(
            "amira_t".to_string(),
            "amira@example.com".to_string(),
            "$2b$04$secret-hash".to_string(),
            Role::Tourist,
            RoleProfile::Tourist(TouristProfile {
                mobile_number: "+20100".to_string(),
                nationality: "Egyptian".to_string(),
                date_of_birth: to_bson(dob),
                occupation: "Engineer".to_string(),
                profile_picture: None,
            }),
        );
        user.id = Some(mongodb::bson::oid::ObjectId::new());

        let json = serde_json::to_value(UserResponse::from(user)).unwrap();

        assert!(!json.to_string().contains("secret-hash"));
        assert_eq!(json["role"], "tourist");
        assert_eq!(json["status"], "accepted");
        assert_eq!(json["profile"]["kind"], "tourist");
        assert_eq!(json["profile"]["date_of_birth"], "1995-04-02");
    }
}
