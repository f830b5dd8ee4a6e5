//! # Component Registry
//!
//! `#[service]`와 `#[repository]` 매크로로 선언된 컴포넌트를 보관하는 싱글톤 레지스트리입니다.
//!
//! ## 동작 방식
//!
//! ```text
//! 컴파일 타임
//!   #[repository(name = "deal", ...)]  → RepositoryRegistration 제출 (inventory)
//!   #[service(name = "dealflow")]      → ServiceRegistration 제출 (inventory)
//!
//! 기동 시 (main)
//!   ServiceLocator::set(Arc<Database>)       ┐
//!   ServiceLocator::set(Arc<RedisClient>)    │ 인프라 컴포넌트 직접 등록
//!   ServiceLocator::set(Arc<ScoringClient>)  │
//!   ServiceLocator::set(Arc<CalendarClient>) ┘
//!   ServiceLocator::initialize_all()         → 모든 리포지토리, 서비스 생성
//!
//! 런타임
//!   DealFlowService::instance() → ServiceLocator::get::<DealFlowService>()
//!     └─ Arc<T> 필드마다 ServiceLocator::get::<T>() 재귀 호출
//! ```
//!
//! 타입 이름이 `...Repository`로 끝나면 리포지토리 등록 정보를, `...Service`로 끝나면
//! 서비스 등록 정보를 찾습니다. 조회 키는 접미사를 제거하고 소문자로 바꾼 이름입니다
//! (`DealRepository` → `deal`, `DealFlowService` → `dealflow`). 따라서 매크로의 `name`
//! 인자는 항상 이 규칙과 일치해야 합니다.
//!
//! 생성 중인 타입을 다시 요청하면 순환 의존성으로 보고 패닉합니다.

use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use once_cell::sync::Lazy;

use crate::utils::display_terminal::{
    print_banner, print_component, print_lookup_table, print_phase_done, print_phase_start,
    print_registry_summary,
};

/// 비즈니스 서비스 컴포넌트
#[async_trait]
pub trait Service: Send + Sync {
    fn name(&self) -> &str;

    async fn init(&self) -> Result<(), Box<dyn std::error::Error>>;
}

/// 컬렉션 하나를 담당하는 데이터 액세스 컴포넌트
#[async_trait]
pub trait Repository: Send + Sync {
    fn name(&self) -> &str;

    fn collection_name(&self) -> &str;

    async fn init(&self) -> Result<(), Box<dyn std::error::Error>>;
}

/// `#[service]` 매크로가 제출하는 등록 정보
pub struct ServiceRegistration {
    pub name: &'static str,
    pub constructor: fn() -> Box<dyn Any + Send + Sync>,
}

/// `#[repository]` 매크로가 제출하는 등록 정보
pub struct RepositoryRegistration {
    pub name: &'static str,
    pub constructor: fn() -> Box<dyn Any + Send + Sync>,
}

inventory::collect!(ServiceRegistration);
inventory::collect!(RepositoryRegistration);

type Constructor = fn() -> Box<dyn Any + Send + Sync>;

static SERVICE_TABLE: Lazy<HashMap<String, (&'static str, Constructor)>> = Lazy::new(|| {
    let table: HashMap<_, _> = inventory::iter::<ServiceRegistration>()
        .map(|r| (registration_key(r.name), (r.name, r.constructor)))
        .collect();
    print_lookup_table("Service", table.len());
    table
});

static REPOSITORY_TABLE: Lazy<HashMap<String, (&'static str, Constructor)>> = Lazy::new(|| {
    let table: HashMap<_, _> = inventory::iter::<RepositoryRegistration>()
        .map(|r| (registration_key(r.name), (r.name, r.constructor)))
        .collect();
    print_lookup_table("Repository", table.len());
    table
});

/// 등록 이름에서 `_service` / `_repository` 접미사 제거
fn registration_key(name: &str) -> String {
    name.strip_suffix("_service")
        .or_else(|| name.strip_suffix("_repository"))
        .unwrap_or(name)
        .to_string()
}

/// `crate::repositories::deals::deal_repo::DealRepository` → `DealRepository`
fn short_type_name(type_name: &str) -> &str {
    type_name.rsplit("::").next().unwrap_or(type_name)
}

/// 타입 이름을 (등록 테이블, 조회 키) 쌍으로 변환
fn lookup_target(short_name: &str) -> Option<(&'static Lazy<HashMap<String, (&'static str, Constructor)>>, String)> {
    if let Some(entity) = short_name.strip_suffix("Repository") {
        return Some((&REPOSITORY_TABLE, entity.to_lowercase()));
    }
    if let Some(entity) = short_name.strip_suffix("Service") {
        return Some((&SERVICE_TABLE, entity.to_lowercase()));
    }
    None
}

/// 전역 컴포넌트 컨테이너
pub struct ServiceLocator {
    instances: RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
    initializing: RwLock<HashSet<TypeId>>,
}

static LOCATOR: Lazy<ServiceLocator> = Lazy::new(|| ServiceLocator {
    instances: RwLock::new(HashMap::new()),
    initializing: RwLock::new(HashSet::new()),
});

impl ServiceLocator {
    /// 타입 `T`의 싱글톤 인스턴스 조회
    ///
    /// 이미 생성되었거나 `set`으로 등록된 인스턴스가 있으면 그대로 반환하고,
    /// 없으면 매크로 등록 정보로 생성합니다.
    ///
    /// # Panics
    ///
    /// - 등록 정보가 없는 타입
    /// - 순환 의존성
    pub fn get<T: 'static + Send + Sync>() -> Arc<T> {
        let type_id = TypeId::of::<T>();
        let type_name = std::any::type_name::<T>();

        if let Some(existing) = Self::cached::<T>(type_id) {
            return existing;
        }

        {
            let mut initializing = LOCATOR.initializing.write().unwrap();
            if !initializing.insert(type_id) {
                eprintln!("❌ Circular dependency detected for type: {}", type_name);
                panic!("Circular dependency detected: {} is already being initialized", type_name);
            }
        }

        let created = std::panic::catch_unwind(|| Self::create::<T>(type_id, type_name));

        LOCATOR.initializing.write().unwrap().remove(&type_id);

        match created {
            Ok(instance) => instance,
            Err(cause) => {
                eprintln!("ERROR: Failed to create instance for {}: {:?}", type_name, cause);
                panic!("Failed to create instance for {}", type_name);
            }
        }
    }

    fn cached<T: 'static + Send + Sync>(type_id: TypeId) -> Option<Arc<T>> {
        let instances = LOCATOR.instances.read().unwrap();
        instances.get(&type_id).map(|instance| {
            instance
                .clone()
                .downcast::<T>()
                .expect("Type mismatch in ServiceLocator")
        })
    }

    fn create<T: 'static + Send + Sync>(type_id: TypeId, type_name: &str) -> Arc<T> {
        // 생성자가 다른 컴포넌트를 요청할 수 있으므로 쓰기 락을 잡지 않은 채로 생성
        if let Some(existing) = Self::cached::<T>(type_id) {
            return existing;
        }

        let short_name = short_type_name(type_name);
        let (table, key) = lookup_target(short_name).unwrap_or_else(|| {
            panic!(
                "Component not found: {}. Register it with #[service], #[repository] or ServiceLocator::set()",
                type_name
            )
        });

        let (registered_name, constructor) = table
            .get(&key)
            .copied()
            .unwrap_or_else(|| panic!("No registration found for key: {}", key));

        let boxed = constructor();
        let instance = match boxed.downcast::<Arc<T>>() {
            Ok(arc) => (*arc).clone(),
            Err(_) => panic!("Type mismatch for component: {}", registered_name),
        };

        LOCATOR
            .instances
            .write()
            .unwrap()
            .entry(type_id)
            .or_insert_with(|| instance.clone() as Arc<dyn Any + Send + Sync>);

        instance
    }

    /// 인프라 컴포넌트(DB, Redis, 외부 클라이언트) 수동 등록
    pub fn set<T: 'static + Send + Sync>(instance: Arc<T>) {
        let type_name = std::any::type_name::<T>();
        println!("📦 Registering: {}", short_type_name(type_name));

        LOCATOR
            .instances
            .write()
            .unwrap()
            .insert(TypeId::of::<T>(), instance as Arc<dyn Any + Send + Sync>);
    }

    /// 등록된 모든 리포지토리와 서비스를 미리 생성
    ///
    /// 누락된 인프라 등록이나 순환 의존성을 첫 요청이 아닌 기동 시점에 드러냅니다.
    pub async fn initialize_all() -> Result<(), Box<dyn std::error::Error>> {
        print_banner("INITIALIZING DEAL-FLOW REGISTRY");

        let repositories: Vec<_> = inventory::iter::<RepositoryRegistration>().collect();
        if !repositories.is_empty() {
            print_phase_start(1, "Creating repositories");
            for registration in &repositories {
                let _ = (registration.constructor)();
                print_component(registration.name, "✓ created");
            }
            print_phase_done(1, "Repositories created", repositories.len());
        }

        let services: Vec<_> = inventory::iter::<ServiceRegistration>().collect();
        if !services.is_empty() {
            print_phase_start(2, "Creating services");
            for registration in &services {
                let _ = (registration.constructor)();
                print_component(registration.name, "✓ created");
            }
            print_phase_done(2, "Services created", services.len());
        }

        print_registry_summary(repositories.len(), services.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ScoringProbe {
        value: u32,
    }

    #[test]
    fn test_registration_key_strips_suffix() {
        assert_eq!(registration_key("deal"), "deal");
        assert_eq!(registration_key("dealflow_service"), "dealflow");
        assert_eq!(registration_key("match_repository"), "match");
    }

    #[test]
    fn test_short_type_name() {
        assert_eq!(
            short_type_name("dealflow_backend::repositories::deals::deal_repo::DealRepository"),
            "DealRepository"
        );
        assert_eq!(short_type_name("Database"), "Database");
    }

    #[test]
    fn test_lookup_target_key() {
        let (_, key) = lookup_target("GrantApplicationRepository").unwrap();
        assert_eq!(key, "grantapplication");

        let (_, key) = lookup_target("DealFlowService").unwrap();
        assert_eq!(key, "dealflow");

        assert!(lookup_target("ScoringClient").is_none());
    }

    #[test]
    fn test_set_then_get_returns_same_instance() {
        ServiceLocator::set(Arc::new(ScoringProbe { value: 7 }));

        let first = ServiceLocator::get::<ScoringProbe>();
        let second = ServiceLocator::get::<ScoringProbe>();

        assert_eq!(first.value, 7);
        assert!(Arc::ptr_eq(&first, &second));
    }
}
