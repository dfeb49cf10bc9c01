//! # Service Registry - 싱글톤 의존성 주입 시스템
//!
//! `#[service]` / `#[repository]` 매크로로 선언된 컴포넌트와, `main`에서 직접
//! 등록하는 인프라 컴포넌트(`Database`, `RedisClient`, `UploadStore`)를 하나의
//! 전역 컨테이너에서 관리합니다.
//!
//! ## 동작 원리
//!
//! ```text
//! 1. 컴파일 타임
//!    ├─ #[service]    → ServiceRegistration 생성 (inventory::submit!)
//!    └─ #[repository] → RepositoryRegistration 생성 (inventory::submit!)
//!
//! 2. 런타임 초기화 (main)
//!    ├─ ServiceLocator::set(database / redis / upload_store)
//!    └─ ServiceLocator::initialize_all() → 리포지토리 → 서비스 순서로 생성
//!
//! 3. 의존성 주입
//!    └─ Arc<T> 필드 → ServiceLocator::get::<T>() → 캐시 또는 등록 정보로 생성
//! ```
//!
//! ## 이름 규칙
//!
//! 타입 이름에서 `Repository`/`Service` 접미사를 뗀 소문자 이름이 매크로의
//! `name` 인자와 같아야 합니다.
//!
//! | 타입 | 매크로 |
//! |------|--------|
//! | `OfferRepository` | `#[repository(name = "offer", collection = "offres_emploi")]` |
//! | `AuthLogRepository` | `#[repository(name = "authlog", collection = "auth_logs")]` |
//! | `InterviewService` | `#[service(name = "interview")]` |
//!
//! ## 트러블슈팅
//!
//! ```text
//! panic: Circular dependency detected: ApplicationService is already being initialized
//! ```
//! 서비스 간 의존성을 단방향으로 재구성하세요.
//!
//! ```text
//! panic: Service not found: UploadStore. Make sure it's registered...
//! ```
//! 인프라 컴포넌트는 `ServiceLocator::set()`으로 먼저 등록해야 합니다.

use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use crate::utils::display_terminal::{print_boxed_title, print_cache_initialized, print_final_summary, print_step_complete, print_step_start, print_sub_task};

/// 비즈니스 로직 서비스를 위한 공통 인터페이스
///
/// 모든 `#[service]` 매크로가 적용된 구조체가 이 trait을 자동 구현합니다.
#[async_trait]
pub trait Service: Send + Sync {
    /// 서비스의 고유 이름 (`{name}_service`)
    fn name(&self) -> &str;

    /// 서비스 초기화 로직
    async fn init(&self) -> Result<(), Box<dyn std::error::Error>>;
}

/// 데이터 액세스 리포지토리를 위한 공통 인터페이스
///
/// 모든 `#[repository]` 매크로가 적용된 구조체가 이 trait을 자동 구현합니다.
/// `cache_key()` 등 매크로가 생성하는 캐시 메서드가 `name()`을 사용하므로
/// 리포지토리 파일에서는 이 trait을 스코프에 가져와야 합니다.
#[async_trait]
pub trait Repository: Send + Sync {
    /// 리포지토리의 고유 이름 (`{name}_repository`)
    fn name(&self) -> &str;

    /// 연결된 MongoDB 컬렉션 이름
    fn collection_name(&self) -> &str;

    /// 리포지토리 초기화 로직
    async fn init(&self) -> Result<(), Box<dyn std::error::Error>>;
}

/// `#[service]` 매크로가 생성하는 등록 메타데이터
pub struct ServiceRegistration {
    pub name: &'static str,
    pub constructor: fn() -> Box<dyn Any + Send + Sync>,
}

/// `#[repository]` 매크로가 생성하는 등록 메타데이터
pub struct RepositoryRegistration {
    pub name: &'static str,
    pub constructor: fn() -> Box<dyn Any + Send + Sync>,
}

inventory::collect!(ServiceRegistration);
inventory::collect!(RepositoryRegistration);

/// 서비스 이름 → 등록정보 매핑 캐시
static SERVICE_NAME_CACHE: Lazy<HashMap<String, &'static ServiceRegistration>> = Lazy::new(|| {
    let cache: HashMap<_, _> = inventory::iter::<ServiceRegistration>()
        .map(|registration| (extract_clean_name_static(registration.name), registration))
        .collect();

    print_cache_initialized("Service", cache.len());
    cache
});

/// 리포지토리 이름 → 등록정보 매핑 캐시
static REPOSITORY_NAME_CACHE: Lazy<HashMap<String, &'static RepositoryRegistration>> = Lazy::new(|| {
    let cache: HashMap<_, _> = inventory::iter::<RepositoryRegistration>()
        .map(|registration| (extract_clean_name_static(registration.name), registration))
        .collect();

    print_cache_initialized("Repository", cache.len());
    cache
});

/// `offer_repository`, `offer_service` → `offer`
fn extract_clean_name_static(name: &str) -> String {
    name.strip_suffix("_service")
        .or_else(|| name.strip_suffix("_repository"))
        .unwrap_or(name)
        .to_string()
}

/// 등록된 컴포넌트의 종류
enum ComponentKind {
    Repository,
    Service,
}

/// 싱글톤 의존성 주입 컨테이너
///
/// - **싱글톤 보장**: 각 타입당 하나의 인스턴스
/// - **지연 초기화**: 첫 요청 시점에 생성
/// - **순환 참조 감지**: 초기화 중인 타입을 추적
///
/// 생성자는 락을 잡지 않은 상태에서 호출되므로, 생성 도중 다른 컴포넌트를
/// 요청하는 중첩 주입이 가능합니다.
pub struct ServiceLocator {
    instances: RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
    initializing: RwLock<HashSet<TypeId>>,
}

impl ServiceLocator {
    fn new() -> Self {
        Self {
            instances: RwLock::new(HashMap::new()),
            initializing: RwLock::new(HashSet::new()),
        }
    }

    /// 지정된 타입의 싱글톤 인스턴스를 가져옵니다.
    ///
    /// 1. 캐시된 인스턴스가 있으면 반환
    /// 2. 초기화 중인 타입이면 순환 참조로 판단하여 패닉
    /// 3. 타입 이름으로 등록 정보를 찾아 생성 후 캐시
    ///
    /// # Panics
    ///
    /// 등록되지 않은 타입이거나 순환 참조가 있으면 패닉이 발생합니다.
    /// 애플리케이션 조립 단계의 설정 오류이므로 시작 시점에 드러납니다.
    pub fn get<T: 'static + Send + Sync>() -> Arc<T> {
        let type_id = TypeId::of::<T>();
        let type_name = std::any::type_name::<T>();

        if let Some(instance) = Self::cached::<T>() {
            return instance;
        }

        {
            let mut initializing = LOCATOR.initializing.write()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            if !initializing.insert(type_id) {
                log::error!("❌ Circular dependency detected for type: {}", type_name);
                panic!("Circular dependency detected: {} is already being initialized", type_name);
            }
        }

        let created = Self::create::<T>(type_name);

        LOCATOR.initializing.write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(&type_id);

        match created {
            Ok(instance) => {
                let mut instances = LOCATOR.instances.write()
                    .unwrap_or_else(|poisoned| poisoned.into_inner());
                // 동시에 생성된 경우 먼저 등록된 인스턴스를 유지
                let stored = instances
                    .entry(type_id)
                    .or_insert_with(|| instance as Arc<dyn Any + Send + Sync>)
                    .clone();
                stored.downcast::<T>()
                    .unwrap_or_else(|_| panic!("Type mismatch in ServiceLocator for {}", type_name))
            }
            Err(message) => {
                log::error!("❌ Failed to create instance for {}: {}", type_name, message);
                panic!("{}", message);
            }
        }
    }

    /// 캐시된 인스턴스만 조회합니다. 없으면 `None`.
    pub fn try_get<T: 'static + Send + Sync>() -> Option<Arc<T>> {
        Self::cached::<T>()
    }

    fn cached<T: 'static + Send + Sync>() -> Option<Arc<T>> {
        let instances = LOCATOR.instances.read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        instances
            .get(&TypeId::of::<T>())
            .and_then(|instance| instance.clone().downcast::<T>().ok())
    }

    fn create<T: 'static + Send + Sync>(type_name: &str) -> Result<Arc<T>, String> {
        let clean_type_name = Self::extract_clean_type_name(type_name);

        let (kind, entity_name) = if let Some(base) = clean_type_name.strip_suffix("Repository") {
            (ComponentKind::Repository, base.to_lowercase())
        } else if let Some(base) = clean_type_name.strip_suffix("Service") {
            (ComponentKind::Service, base.to_lowercase())
        } else {
            return Err(format!(
                "Service not found: {}. Make sure it's registered with #[service] or #[repository] macro, or manually registered with ServiceLocator::set()",
                type_name
            ));
        };

        let (registration_name, constructor) = match kind {
            ComponentKind::Repository => REPOSITORY_NAME_CACHE
                .get(&entity_name)
                .map(|registration| (registration.name, registration.constructor))
                .ok_or_else(|| format!("No repository found for entity: {}", entity_name))?,
            ComponentKind::Service => SERVICE_NAME_CACHE
                .get(&entity_name)
                .map(|registration| (registration.name, registration.constructor))
                .ok_or_else(|| format!("No service found for entity: {}", entity_name))?,
        };

        constructor()
            .downcast::<Arc<T>>()
            .map(|boxed| *boxed)
            .map_err(|_| format!("Type mismatch for component: {}", registration_name))
    }

    fn extract_clean_type_name(type_name: &str) -> String {
        match type_name.rfind("::") {
            Some(pos) => type_name[pos + 2..].to_string(),
            None => type_name.to_string(),
        }
    }

    /// 인프라 컴포넌트를 수동으로 등록합니다.
    ///
    /// ```rust,ignore
    /// ServiceLocator::set(Arc::new(Database::new().await?));
    /// ServiceLocator::set(Arc::new(RedisClient::disabled()));
    /// ```
    pub fn set<T: 'static + Send + Sync>(instance: Arc<T>) {
        let type_id = TypeId::of::<T>();
        let clean_name = Self::extract_clean_type_name(std::any::type_name::<T>());

        log::info!("📦 Registering: {}", clean_name);

        let mut instances = LOCATOR.instances.write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        instances.insert(type_id, instance as Arc<dyn Any + Send + Sync>);
    }

    /// 등록된 모든 리포지토리와 서비스를 미리 생성합니다.
    ///
    /// 리포지토리를 먼저 생성하여 서비스 생성 시점에 주입할 대상이 준비되도록 합니다.
    pub async fn initialize_all() -> Result<(), Box<dyn std::error::Error>> {
        print_boxed_title("🔄 INITIALIZING SERVICE REGISTRY");

        let repo_registrations: Vec<_> = inventory::iter::<RepositoryRegistration>().collect();
        let repo_count = repo_registrations.len();

        if repo_count > 0 {
            print_step_start(1, "Creating Repository instances");
            for registration in repo_registrations {
                print_sub_task(registration.name, "Creating...");
                let _instance = (registration.constructor)();
                print_sub_task(registration.name, "✓ Created");
            }
            print_step_complete(1, "Repository instances created", repo_count);
        }

        let service_registrations: Vec<_> = inventory::iter::<ServiceRegistration>().collect();
        let service_count = service_registrations.len();

        if service_count > 0 {
            print_step_start(2, "Creating Service instances");
            for registration in service_registrations {
                print_sub_task(registration.name, "Creating...");
                let _instance = (registration.constructor)();
                print_sub_task(registration.name, "✓ Created");
            }
            print_step_complete(2, "Service instances created", service_count);
        }

        print_final_summary(repo_count, service_count);

        Ok(())
    }
}

static LOCATOR: Lazy<ServiceLocator> = Lazy::new(ServiceLocator::new);

#[cfg(test)]
mod tests {
    use super::*;

    struct UploadMarker {
        label: &'static str,
    }

    #[test]
    fn test_extract_clean_name_static() {
        assert_eq!(extract_clean_name_static("offer_repository"), "offer");
        assert_eq!(extract_clean_name_static("interview_service"), "interview");
        assert_eq!(extract_clean_name_static("authlog_repository"), "authlog");
        assert_eq!(extract_clean_name_static("plain"), "plain");
    }

    #[test]
    fn test_extract_clean_type_name() {
        assert_eq!(
            ServiceLocator::extract_clean_type_name("recrutement_backend::services::offers::OfferService"),
            "OfferService"
        );
        assert_eq!(ServiceLocator::extract_clean_type_name("Database"), "Database");
    }

    #[test]
    fn test_set_then_get_returns_same_instance() {
        ServiceLocator::set(Arc::new(UploadMarker { label: "uploads" }));

        let first = ServiceLocator::get::<UploadMarker>();
        let second = ServiceLocator::try_get::<UploadMarker>().expect("registered");

        assert_eq!(first.label, "uploads");
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    #[should_panic(expected = "Service not found")]
    fn test_get_unregistered_infrastructure_panics() {
        struct NeverRegistered;
        let _ = ServiceLocator::get::<NeverRegistered>();
    }
}
