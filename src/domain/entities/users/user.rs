//! User Entity Implementation
//!
//! 마켓플레이스의 모든 계정을 표현하는 사용자 엔티티입니다.
//! 역할별 추가 정보는 [`RoleProfile`]에 담기며, 광고주/투어 가이드/판매자는
//! 관리자 승인(`accepted`) 전까지 `pending` 상태로 시작합니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use super::profile::RoleProfile;

/// 사용자 역할
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Tourist,
    Advertiser,
    TourGuide,
    Seller,
    TourismGovernor,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Tourist => "tourist",
            Role::Advertiser => "advertiser",
            Role::TourGuide => "tour_guide",
            Role::Seller => "seller",
            Role::TourismGovernor => "tourism_governor",
            Role::Admin => "admin",
        }
    }

    /// 토큰/응답에 담긴 역할 문자열을 해석합니다.
    pub fn parse(value: &str) -> Option<Role> {
        match value {
            "tourist" => Some(Role::Tourist),
            "advertiser" => Some(Role::Advertiser),
            "tour_guide" => Some(Role::TourGuide),
            "seller" => Some(Role::Seller),
            "tourism_governor" => Some(Role::TourismGovernor),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }

    /// `/api/{role}/register` 경로 세그먼트를 해석합니다.
    ///
    /// 프론트엔드는 `tourguide`와 `tour_guide`를 모두 사용합니다.
    pub fn from_path_segment(segment: &str) -> Option<Role> {
        match segment.to_lowercase().as_str() {
            "tourist" => Some(Role::Tourist),
            "advertiser" => Some(Role::Advertiser),
            "tourguide" | "tour_guide" | "tour-guide" => Some(Role::TourGuide),
            "seller" => Some(Role::Seller),
            _ => None,
        }
    }

    /// 관리자 승인이 필요한 역할인지 여부
    pub fn requires_approval(&self) -> bool {
        matches!(self, Role::Advertiser | Role::TourGuide | Role::Seller)
    }

    /// 업로드 파일이 저장되는 역할별 하위 디렉터리
    pub fn upload_dir(&self) -> &'static str {
        match self {
            Role::Tourist => "tourists",
            Role::Advertiser => "advertisers",
            Role::TourGuide => "tourguides",
            Role::Seller => "sellers",
            Role::TourismGovernor => "governors",
            Role::Admin => "admins",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 계정 승인 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    Pending,
    Accepted,
    Rejected,
}

/// 가입 시 제출한 서류
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmittedDocument {
    /// `identification` / `certificate` / `taxation_registry`
    pub kind: String,
    /// `/uploads/...` 공개 경로
    pub url: String,
    pub uploaded_at: DateTime,
}

/// 사용자 엔티티
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 사용자명 (unique)
    pub username: String,
    /// 이메일 (unique, 소문자 저장)
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub status: AccountStatus,
    /// 이용 약관 동의 여부
    pub terms_accepted: bool,
    pub profile: RoleProfile,
    #[serde(default)]
    pub documents: Vec<SubmittedDocument>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl User {
    /// 새 사용자 생성
    ///
    /// 승인이 필요한 역할은 `pending`, 그 외는 `accepted`로 시작합니다.
    /// 관광객과 내부 계정은 가입 자체가 약관 동의로 간주됩니다.
    pub fn new(username: String, email: String, password_hash: String, role: Role, profile: RoleProfile) -> Self {
        let now = DateTime::now();
        let needs_approval = role.requires_approval();

        Self {
            id: None,
            username,
            email: email.to_lowercase(),
            password_hash,
            role,
            status: if needs_approval { AccountStatus::Pending } else { AccountStatus::Accepted },
            terms_accepted: !needs_approval,
            profile,
            documents: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// ID 문자열로 변환
    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    /// 로그인 가능 여부 (거절된 계정은 로그인 불가)
    pub fn can_log_in(&self) -> bool {
        self.status != AccountStatus::Rejected
    }

    /// 콘텐츠를 게시할 수 있는지 여부
    ///
    /// 승인 대상 역할은 `accepted` 상태이면서 약관에 동의해야 합니다.
    pub fn can_publish(&self) -> bool {
        if !self.role.requires_approval() {
            return true;
        }
        self.status == AccountStatus::Accepted && self.terms_accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::users::profile::SellerProfile;

    fn seller() -> User {
        User::new(
            "nile_crafts".to_string(),
            "Shop@Example.com".to_string(),
            "hash".to_string(),
            Role::Seller,
            RoleProfile::Seller(SellerProfile::default()),
        )
    }

    #[test]
    fn test_path_segment_parsing() {
        assert_eq!(Role::from_path_segment("tourguide"), Some(Role::TourGuide));
        assert_eq!(Role::from_path_segment("Tour_Guide"), Some(Role::TourGuide));
        assert_eq!(Role::from_path_segment("advertiser"), Some(Role::Advertiser));
        assert_eq!(Role::from_path_segment("admin"), None);
        assert_eq!(Role::from_path_segment("tourism_governor"), None);
    }

    #[test]
    fn test_role_string_round_trip() {
        for role in [
            Role::Tourist,
            Role::Advertiser,
            Role::TourGuide,
            Role::Seller,
            Role::TourismGovernor,
            Role::Admin,
        ] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
    }

    #[test]
    fn test_new_seller_starts_pending() {
        let user = seller();

        assert_eq!(user.status, AccountStatus::Pending);
        assert!(!user.terms_accepted);
        assert_eq!(user.email, "shop@example.com");
        assert!(!user.can_publish());
        assert!(user.can_log_in());
    }

    #[test]
    fn test_accepted_seller_needs_terms_to_publish() {
        let mut user = seller();
        user.status = AccountStatus::Accepted;
        assert!(!user.can_publish());

        user.terms_accepted = true;
        assert!(user.can_publish());
    }

    #[test]
    fn test_rejected_account_cannot_log_in() {
        let mut user = seller();
        user.status = AccountStatus::Rejected;
        assert!(!user.can_log_in());
    }
}
