//! # MongoDB 연결
//!
//! 기동 시 한 번 연결해 ping으로 확인한 뒤 `Arc<Database>`로 `ServiceLocator`에 등록합니다.
//! 리포지토리는 `#[repository]` 속성이 생성한 `collection()`으로 자신의 컬렉션에 접근합니다.
//!
//! | 환경 변수 | 기본값 |
//! |-----------|--------|
//! | `MONGODB_URI` | `mongodb://localhost:27017` |
//! | `DATABASE_NAME` | `tourism_marketplace` |
//! | `MONGODB_MAX_POOL_SIZE` | 드라이버 기본값 |
//! | `MONGODB_CONNECT_TIMEOUT_SECS` | 10 |
//!
//! ```rust,ignore
//! let database = Arc::new(Database::new().await?);
//! ServiceLocator::set(database);
//! ServiceLocator::initialize_all().await?;
//! repositories::create_indexes().await?;
//! ```

use std::env;
use std::time::Duration;

use log::info;
use mongodb::{bson::doc, options::ClientOptions, Client};

use crate::core::errors::AppError;

const DEFAULT_URI: &str = "mongodb://localhost:27017";
const DEFAULT_DATABASE: &str = "tourism_marketplace";
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// 연결 설정
#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseSettings {
    pub uri: String,
    pub database_name: String,
    pub max_pool_size: Option<u32>,
    pub connect_timeout: Duration,
}

impl DatabaseSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let connect_timeout_secs = lookup("MONGODB_CONNECT_TIMEOUT_SECS")
            .and_then(|v| v.parse().ok())
            .filter(|&secs: &u64| secs > 0)
            .unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS);

        Self {
            uri: lookup("MONGODB_URI").unwrap_or_else(|| DEFAULT_URI.to_string()),
            database_name: lookup("DATABASE_NAME")
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
            max_pool_size: lookup("MONGODB_MAX_POOL_SIZE").and_then(|v| v.parse().ok()),
            connect_timeout: Duration::from_secs(connect_timeout_secs),
        }
    }
}

/// MongoDB 클라이언트와 사용할 데이터베이스 이름
#[derive(Clone)]
pub struct Database {
    client: Client,
    database_name: String,
}

impl Database {
    /// 환경 변수 설정으로 연결합니다. ping 실패 시 `DatabaseError`.
    pub async fn new() -> Result<Self, AppError> {
        Self::connect(DatabaseSettings::from_env()).await
    }

    pub async fn connect(settings: DatabaseSettings) -> Result<Self, AppError> {
        let mut options = ClientOptions::parse(&settings.uri).await?;
        options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
        options.connect_timeout = Some(settings.connect_timeout);
        options.server_selection_timeout = Some(settings.connect_timeout);
        if let Some(size) = settings.max_pool_size {
            options.max_pool_size = Some(size);
        }

        let client = Client::with_options(options)?;
        client
            .database(&settings.database_name)
            .run_command(doc! { "ping": 1 })
            .await?;

        info!("✅ MongoDB 연결 성공: {}", settings.database_name);

        Ok(Self {
            client,
            database_name: settings.database_name,
        })
    }

    /// 리포지토리가 컬렉션을 얻는 데이터베이스 핸들
    pub fn get_database(&self) -> mongodb::Database {
        self.client.database(&self.database_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(pairs: &[(&str, &str)]) -> DatabaseSettings {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        DatabaseSettings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        let settings = settings(&[]);
        assert_eq!(settings.uri, DEFAULT_URI);
        assert_eq!(settings.database_name, DEFAULT_DATABASE);
        assert_eq!(settings.max_pool_size, None);
        assert_eq!(settings.connect_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_overrides_and_bad_values() {
        let settings = settings(&[
            ("MONGODB_URI", "mongodb://db:27017"),
            ("DATABASE_NAME", "   "),
            ("MONGODB_MAX_POOL_SIZE", "32"),
            ("MONGODB_CONNECT_TIMEOUT_SECS", "0"),
        ]);
        assert_eq!(settings.uri, "mongodb://db:27017");
        assert_eq!(settings.database_name, DEFAULT_DATABASE);
        assert_eq!(settings.max_pool_size, Some(32));
        assert_eq!(settings.connect_timeout, Duration::from_secs(10));
    }
}
