//! # 사용자 리포지토리 구현
//!
//! 사용자 엔티티의 데이터 액세스 계층을 담당하는 리포지토리입니다.
//!
//! ## 인덱스
//!
//! - `email_unique`, `username_unique` - 중복 가입 방지
//! - `role_status` - 관리자 승인 대기 목록 조회
//! - `created_at_desc`
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! let repo = UserRepository::instance();
//!
//! if repo.exists_username_or_email("nile_crafts", "shop@example.com").await? {
//!     return Err(AppError::ValidationError("이미 사용 중인 사용자명 또는 이메일입니다".to_string()));
//! }
//! let created = repo.create(user).await?;
//! ```

use std::sync::Arc;

use mongodb::bson::{doc, oid::ObjectId, Document};

use crate::core::errors::AppError;
use crate::db::Database;
use crate::domain::entities::users::{AccountStatus, Role, User};
use crate::repositories::base;
use singleton_macro::repository;

/// 사용자 데이터 액세스 리포지토리
#[repository(name = "user", collection = "users")]
pub struct UserRepository {
    /// MongoDB 데이터베이스 연결
    db: Arc<Database>,
}

impl UserRepository {
    /// 이메일 주소로 사용자 조회 (대소문자 무시)
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        base::find_one(&self.collection::<User>(), doc! { "email": email.trim().to_lowercase() }).await
    }

    /// 사용자명으로 사용자 조회
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        base::find_one(&self.collection::<User>(), doc! { "username": username.trim() }).await
    }

    /// 로그인 식별자(사용자명 또는 이메일)로 조회
    pub async fn find_by_identifier(&self, identifier: &str) -> Result<Option<User>, AppError> {
        if identifier.contains('@') {
            self.find_by_email(identifier).await
        } else {
            self.find_by_username(identifier).await
        }
    }

    pub async fn find_by_id(&self, id: &ObjectId) -> Result<Option<User>, AppError> {
        base::find_by_id(&self.collection::<User>(), id).await
    }

    /// 사용자명 또는 이메일 중복 여부
    pub async fn exists_username_or_email(&self, username: &str, email: &str) -> Result<bool, AppError> {
        let filter = doc! {
            "$or": [
                { "username": username.trim() },
                { "email": email.trim().to_lowercase() },
            ]
        };
        Ok(base::count(&self.collection::<User>(), filter).await? > 0)
    }

    /// 사용자 저장
    ///
    /// 유니크 인덱스 위반(동시 가입)은 400으로 변환합니다.
    pub async fn create(&self, mut user: User) -> Result<User, AppError> {
        let id = base::insert(&self.collection::<User>(), &user)
            .await
            .map_err(|e| match e {
                AppError::DatabaseError(msg) if msg.contains("E11000") => {
                    AppError::ValidationError("이미 사용 중인 사용자명 또는 이메일입니다".to_string())
                }
                other => other,
            })?;

        user.id = Some(id);
        Ok(user)
    }

    /// 필드 단위 수정
    pub async fn update(&self, id: &ObjectId, set: Document) -> Result<Option<User>, AppError> {
        base::update_by_id(&self.collection::<User>(), id, set).await
    }

    pub async fn update_status(&self, id: &ObjectId, status: AccountStatus) -> Result<Option<User>, AppError> {
        let status = base::bson_value(&status)?;
        self.update(id, doc! { "status": status }).await
    }

    /// 역할/상태 조건 목록 (최신 가입순)
    pub async fn list(&self, role: Option<Role>, status: Option<AccountStatus>) -> Result<Vec<User>, AppError> {
        let mut filter = Document::new();
        if let Some(role) = role {
            filter.insert("role", role.as_str());
        }
        if let Some(status) = status {
            filter.insert("status", base::bson_value(&status)?);
        }

        base::find_many(&self.collection::<User>(), filter, doc! { "created_at": -1 }).await
    }

    pub async fn delete(&self, id: &ObjectId) -> Result<bool, AppError> {
        base::delete_by_id(&self.collection::<User>(), id).await
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        base::create_indexes(
            &self.collection::<User>(),
            vec![
                base::unique_index(doc! { "email": 1 }, "email_unique"),
                base::unique_index(doc! { "username": 1 }, "username_unique"),
                base::index(doc! { "role": 1, "status": 1 }, "role_status"),
                base::index(doc! { "created_at": -1 }, "created_at_desc"),
            ],
        )
        .await
    }
}
