//! # Service Registry & Dependency Injection
//!
//! 타입 기반 싱글톤 컨테이너입니다. 리포지토리와 서비스는 `singleton_macro`의
//! `#[repository]` / `#[service]` 속성으로 `inventory`에 자신을 등록하고,
//! [`ServiceLocator::get`]은 타입 이름(`BookingRepository` → `booking`)으로
//! 등록 정보를 찾아 생성자를 호출한 뒤 캐시합니다.
//!
//! ## 컴포넌트 생명주기
//!
//! ```text
//! 1. 컴파일 타임
//!    ├─ #[repository] → RepositoryRegistration 제출 ("<name>_repository")
//!    └─ #[service]    → ServiceRegistration 제출 ("<name>_service")
//!
//! 2. 애플리케이션 시작 (main)
//!    ├─ ServiceLocator::set(Arc<Database>)   수동 등록
//!    ├─ ServiceLocator::initialize_all()     리포지토리 생성 후 서비스 생성
//!    └─ repositories::create_indexes()       컬렉션 인덱스 생성
//!
//! 3. 요청 처리
//!    └─ XxxService::instance()               캐시된 Arc<T> 반환
//! ```
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! #[repository(name = "activity", collection = "activities")]
//! pub struct ActivityRepository {
//!     db: Arc<Database>,
//! }
//!
//! #[service(name = "activity")]
//! pub struct ActivityService {
//!     activity_repo: Arc<ActivityRepository>,
//! }
//!
//! let service = ActivityService::instance();
//! ```
//!
//! 등록 이름은 타입 이름에서 접미사를 뺀 소문자여야 `get`이 찾을 수 있습니다.
//! 생성 중인 타입을 다시 요청하면 순환 의존성으로 간주하고 즉시 패닉합니다.

use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use once_cell::sync::Lazy;

use crate::core::errors::AppError;
use crate::utils::display_terminal::{
    print_boxed_title, print_final_summary, print_step_complete, print_step_start, print_sub_task,
};

/// 비즈니스 로직 컴포넌트 (`#[service]`가 구현)
#[async_trait]
pub trait Service: Send + Sync {
    fn name(&self) -> &str;

    async fn init(&self) -> Result<(), Box<dyn std::error::Error>>;
}

/// 데이터 액세스 컴포넌트 (`#[repository]`가 구현)
#[async_trait]
pub trait Repository: Send + Sync {
    fn name(&self) -> &str;

    /// 담당 MongoDB 컬렉션 이름
    fn collection_name(&self) -> &str;

    async fn init(&self) -> Result<(), Box<dyn std::error::Error>>;
}

/// `#[service]`가 제출하는 등록 메타데이터
pub struct ServiceRegistration {
    pub name: &'static str,
    /// `Arc<T>`를 담은 박스를 돌려주는 생성자
    pub constructor: fn() -> Box<dyn Any + Send + Sync>,
}

/// `#[repository]`가 제출하는 등록 메타데이터
pub struct RepositoryRegistration {
    pub name: &'static str,
    pub constructor: fn() -> Box<dyn Any + Send + Sync>,
}

inventory::collect!(ServiceRegistration);
inventory::collect!(RepositoryRegistration);

type Constructor = fn() -> Box<dyn Any + Send + Sync>;

static SERVICE_NAME_CACHE: Lazy<HashMap<String, Constructor>> = Lazy::new(|| {
    let cache: HashMap<_, _> = inventory::iter::<ServiceRegistration>()
        .map(|r| (registered_entity(r.name).to_string(), r.constructor))
        .collect();
    log::debug!("서비스 등록 정보 캐시 구성: {}개", cache.len());
    cache
});

static REPOSITORY_NAME_CACHE: Lazy<HashMap<String, Constructor>> = Lazy::new(|| {
    let cache: HashMap<_, _> = inventory::iter::<RepositoryRegistration>()
        .map(|r| (registered_entity(r.name).to_string(), r.constructor))
        .collect();
    log::debug!("리포지토리 등록 정보 캐시 구성: {}개", cache.len());
    cache
});

/// `booking_service` / `booking_repository` → `booking`
fn registered_entity(name: &str) -> &str {
    name.strip_suffix("_service")
        .or_else(|| name.strip_suffix("_repository"))
        .unwrap_or(name)
}

/// 구성 요소 종류
#[derive(Debug, PartialEq, Eq)]
enum ComponentKind {
    Repository,
    Service,
}

/// `crate::services::commerce::BookingService` → (`Service`, `booking`)
fn lookup_key(type_name: &str) -> Option<(ComponentKind, String)> {
    let clean = type_name.rsplit("::").next().unwrap_or(type_name);
    if let Some(entity) = clean.strip_suffix("Repository") {
        Some((ComponentKind::Repository, entity.to_lowercase()))
    } else {
        clean
            .strip_suffix("Service")
            .map(|entity| (ComponentKind::Service, entity.to_lowercase()))
    }
}

/// 타입 기반 싱글톤 컨테이너
pub struct ServiceLocator {
    instances: RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
    initializing: RwLock<HashSet<TypeId>>,
}

static LOCATOR: Lazy<ServiceLocator> = Lazy::new(ServiceLocator::new);

impl ServiceLocator {
    fn new() -> Self {
        Self {
            instances: RwLock::new(HashMap::new()),
            initializing: RwLock::new(HashSet::new()),
        }
    }

    fn read_instances(&self) -> RwLockReadGuard<'_, HashMap<TypeId, Arc<dyn Any + Send + Sync>>> {
        self.instances.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_instances(&self) -> RwLockWriteGuard<'_, HashMap<TypeId, Arc<dyn Any + Send + Sync>>> {
        self.instances.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_initializing(&self) -> RwLockWriteGuard<'_, HashSet<TypeId>> {
        self.initializing.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// 등록된 싱글톤 인스턴스를 반환합니다.
    ///
    /// 아직 캐시에 없으면 타입 이름으로 등록 정보를 찾아 생성합니다.
    /// 생성자 내부에서 의존성을 다시 `get`하므로 생성 중에는 락을 잡지 않습니다.
    ///
    /// # Panics
    ///
    /// * 등록되지 않은 타입을 요청한 경우
    /// * 순환 의존성이 감지된 경우
    pub fn get<T: 'static + Send + Sync>() -> Arc<T> {
        let type_id = TypeId::of::<T>();
        let type_name = std::any::type_name::<T>();

        if let Some(instance) = LOCATOR.read_instances().get(&type_id) {
            return Self::downcast(instance.clone(), type_name);
        }

        if !LOCATOR.write_initializing().insert(type_id) {
            log::error!("❌ 순환 의존성 감지: {}", type_name);
            panic!("Circular dependency detected: {} is already being initialized", type_name);
        }

        let constructed = Self::construct::<T>(type_name);

        LOCATOR.write_initializing().remove(&type_id);

        let Some(instance) = constructed else {
            panic!(
                "Component not found: {}. Register it with #[repository]/#[service] or ServiceLocator::set()",
                type_name
            );
        };

        // 동시에 생성된 경우 먼저 등록된 인스턴스를 유지
        let stored = LOCATOR
            .write_instances()
            .entry(type_id)
            .or_insert(instance as Arc<dyn Any + Send + Sync>)
            .clone();

        Self::downcast(stored, type_name)
    }

    fn construct<T: 'static + Send + Sync>(type_name: &str) -> Option<Arc<T>> {
        let (kind, entity) = lookup_key(type_name)?;
        let constructor = match kind {
            ComponentKind::Repository => REPOSITORY_NAME_CACHE.get(&entity),
            ComponentKind::Service => SERVICE_NAME_CACHE.get(&entity),
        }?;

        log::debug!("📦 컴포넌트 생성: {}", type_name);
        match constructor().downcast::<Arc<T>>() {
            Ok(instance) => Some(*instance),
            Err(_) => panic!("Type mismatch in ServiceLocator: {} (registered as {})", type_name, entity),
        }
    }

    fn downcast<T: 'static + Send + Sync>(instance: Arc<dyn Any + Send + Sync>, type_name: &str) -> Arc<T> {
        match instance.downcast::<T>() {
            Ok(typed) => typed,
            Err(_) => panic!("Type mismatch in ServiceLocator: {}", type_name),
        }
    }

    /// 인스턴스를 수동으로 등록합니다 (Database 등 외부에서 생성되는 컴포넌트용)
    pub fn set<T: 'static + Send + Sync>(instance: Arc<T>) {
        let type_name = std::any::type_name::<T>();
        let clean_name = type_name.rsplit("::").next().unwrap_or(type_name);
        log::info!("📦 Registering: {}", clean_name);

        LOCATOR
            .write_instances()
            .insert(TypeId::of::<T>(), instance as Arc<dyn Any + Send + Sync>);
    }

    /// 인스턴스가 이미 존재하는지 확인합니다.
    pub fn contains<T: 'static + Send + Sync>() -> bool {
        LOCATOR.read_instances().contains_key(&TypeId::of::<T>())
    }

    /// 등록된 모든 리포지토리와 서비스를 미리 생성합니다.
    ///
    /// 리포지토리가 먼저 생성되어야 서비스의 `Arc<XxxRepository>` 필드가 주입됩니다.
    /// 인덱스 생성은 [`crate::repositories::create_indexes`]가 담당합니다.
    pub async fn initialize_all() -> Result<(), AppError> {
        print_boxed_title("🔄 INITIALIZING SERVICE REGISTRY");

        let repositories: Vec<_> = inventory::iter::<RepositoryRegistration>().collect();
        let repo_count = repositories.len();

        print_step_start(1, "Creating Repository instances");
        for registration in repositories {
            print_sub_task(registration.name, "Creating...");
            let _instance = (registration.constructor)();
            print_sub_task(registration.name, "✓ Created");
        }
        print_step_complete(1, "Repository instances created", repo_count);

        let services: Vec<_> = inventory::iter::<ServiceRegistration>().collect();
        let service_count = services.len();

        print_step_start(2, "Creating Service instances");
        for registration in services {
            print_sub_task(registration.name, "Creating...");
            let _instance = (registration.constructor)();
            print_sub_task(registration.name, "✓ Created");
        }
        print_step_complete(2, "Service instances created", service_count);

        print_final_summary(repo_count, service_count);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::auth::TokenService;

    struct ManualComponent {
        value: u32,
    }

    struct UnregisteredComponent;

    #[test]
    fn test_set_and_get_manual_instance() {
        ServiceLocator::set(Arc::new(ManualComponent { value: 42 }));

        assert!(ServiceLocator::contains::<ManualComponent>());
        let first = ServiceLocator::get::<ManualComponent>();
        let second = ServiceLocator::get::<ManualComponent>();

        assert_eq!(first.value, 42);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    #[should_panic(expected = "Component not found")]
    fn test_get_unregistered_panics() {
        let _ = ServiceLocator::get::<UnregisteredComponent>();
    }

    #[test]
    fn test_registered_service_is_singleton() {
        let first = TokenService::instance();
        let second = TokenService::instance();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_get_resolves_service_by_type_name() {
        let located = ServiceLocator::get::<TokenService>();
        assert!(Arc::ptr_eq(&located, &TokenService::instance()));
        assert_eq!(Service::name(&*located), "token_service");
    }

    #[test]
    fn test_lookup_key_strips_path_and_suffix() {
        assert_eq!(
            lookup_key("tourism_marketplace_backend::repositories::catalog::TransportationRepository"),
            Some((ComponentKind::Repository, "transportation".to_string()))
        );
        assert_eq!(
            lookup_key("crate::services::commerce::BookingService"),
            Some((ComponentKind::Service, "booking".to_string()))
        );
        assert_eq!(lookup_key("crate::db::Database"), None);
    }

    #[test]
    fn test_registered_entity_strips_macro_suffix() {
        assert_eq!(registered_entity("wallet_service"), "wallet");
        assert_eq!(registered_entity("place_repository"), "place");
        assert_eq!(registered_entity("plain"), "plain");
    }
}
