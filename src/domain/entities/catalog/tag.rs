use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 태그 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagKind {
    /// 관광객 선호 태그 (관리자 관리)
    Preference,
    /// 유적지 태그 (관광청 관리)
    Historical,
}

impl TagKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TagKind::Preference => "preference",
            TagKind::Historical => "historical",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub kind: TagKind,
    /// 유적지 유형 (Monuments, Museums, Religious Sites, Palaces/Castles)
    #[serde(default)]
    pub historical_type: Option<String>,
    /// 시대
    #[serde(default)]
    pub period: Option<String>,
    pub created_by: ObjectId,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

/// 액티비티 카테고리
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}
