//! 역할별 프로필
//!
//! MongoDB에는 `profile.kind` 태그와 함께 내장 문서로 저장됩니다.

use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RoleProfile {
    Tourist(TouristProfile),
    Advertiser(AdvertiserProfile),
    TourGuide(TourGuideProfile),
    Seller(SellerProfile),
    /// 관광청 담당자, 관리자 (추가 정보 없음)
    Staff,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TouristProfile {
    pub mobile_number: String,
    pub nationality: String,
    pub date_of_birth: DateTime,
    pub occupation: String,
    #[serde(default)]
    pub profile_picture: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdvertiserProfile {
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub hotline: Option<String>,
    #[serde(default)]
    pub company_profile: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TourGuideProfile {
    #[serde(default)]
    pub mobile_number: Option<String>,
    #[serde(default)]
    pub years_of_experience: Option<i32>,
    #[serde(default)]
    pub previous_work: Option<String>,
    #[serde(default)]
    pub profile_picture: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SellerProfile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
}
