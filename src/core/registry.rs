//! # Schema Registry - 엔티티 디스크립터 레지스트리
//!
//! 엔티티 타입 식별자로 [`EntityDescriptor`]를 조회하는 프로세스 전역 캐시입니다.
//! 디스크립터 빌더는 `inventory`로 컴파일 타임에 수집되고, 첫 조회 시점에 한 번만
//! 빌드되어 이후에는 `Arc`로 공유됩니다.
//!
//! ## 동작 원리
//!
//! ```text
//! 1. 컴파일 타임
//!    ├─ inventory::submit!(DescriptorRegistration { entity, build })
//!    └─ inventory::collect! → 등록 목록 수집
//!
//! 2. 첫 조회 (describe)
//!    ├─ 읽기 락으로 캐시 확인
//!    ├─ 캐시 미스 → 락 밖에서 빌더 실행
//!    └─ 쓰기 락으로 삽입 (먼저 쓴 쪽이 승리)
//!
//! 3. 이후 조회
//!    └─ 읽기 락 + Arc clone
//! ```
//!
//! 동시에 처음 조회하는 두 스레드가 같은 디스크립터를 두 번 빌드할 수는 있지만,
//! 빌더는 순수하므로 결과가 같고 캐시에는 하나만 남습니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::core::registry::SchemaRegistry;
//!
//! let registry = SchemaRegistry::global();
//! let descriptor = registry.describe("post")?;
//! let rules = registry.rules("create_comment")?;
//! ```

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use log::{debug, info};
use once_cell::sync::Lazy;

use crate::core::errors::{AppError, AppResult};
use crate::projection::descriptor::EntityDescriptor;
use crate::utils::display_terminal::{print_boxed_title, print_cache_initialized, print_step_complete, print_step_start, print_sub_task};
use crate::validation::RuleSet;

/// 디스크립터 빌더 함수
pub type DescriptorBuilder = Arc<dyn Fn() -> AppResult<EntityDescriptor> + Send + Sync>;

/// 디스크립터 등록 정보
///
/// 도메인 모듈에서 `inventory::submit!`으로 제출하며, 전역 레지스트리가
/// 생성될 때 모두 수집됩니다.
///
/// ```rust,ignore
/// inventory::submit! {
///     DescriptorRegistration { entity: "comment", build: comment_descriptor }
/// }
/// ```
pub struct DescriptorRegistration {
    /// 엔티티 타입 식별자 (조회 키)
    pub entity: &'static str,
    /// 디스크립터 빌드 함수
    pub build: fn() -> AppResult<EntityDescriptor>,
}

inventory::collect!(DescriptorRegistration);

/// 엔티티 디스크립터와 컴파일된 규칙 집합의 캐시
pub struct SchemaRegistry {
    builders: RwLock<HashMap<String, DescriptorBuilder>>,
    descriptors: RwLock<HashMap<String, Arc<EntityDescriptor>>>,
    rule_sets: RwLock<HashMap<String, Arc<RuleSet>>>,
}

/// 전역 레지스트리
///
/// 첫 접근 시 inventory에 제출된 모든 등록 정보를 수집합니다.
static GLOBAL: Lazy<Arc<SchemaRegistry>> = Lazy::new(|| {
    let registry = SchemaRegistry::empty();
    let mut count = 0;

    for registration in inventory::iter::<DescriptorRegistration>() {
        let build = registration.build;
        if let Err(e) = registry.register(registration.entity, move || build()) {
            log::error!("❌ {}", e);
            continue;
        }
        count += 1;
    }

    debug!("디스크립터 빌더 {}개 수집", count);
    Arc::new(registry)
});

impl SchemaRegistry {
    /// 비어 있는 레지스트리를 만듭니다. 테스트에서 격리된 인스턴스로 사용합니다.
    pub fn empty() -> Self {
        Self {
            builders: RwLock::new(HashMap::new()),
            descriptors: RwLock::new(HashMap::new()),
            rule_sets: RwLock::new(HashMap::new()),
        }
    }

    /// 프로세스 전역 레지스트리
    pub fn global() -> Arc<SchemaRegistry> {
        Arc::clone(&GLOBAL)
    }

    /// 빌더를 등록합니다.
    ///
    /// # Errors
    ///
    /// 같은 엔티티 타입이 이미 등록되어 있으면 `SchemaError`를 반환합니다.
    pub fn register<F>(&self, entity: &str, build: F) -> AppResult<()>
    where
        F: Fn() -> AppResult<EntityDescriptor> + Send + Sync + 'static,
    {
        let mut builders = self
            .builders
            .write()
            .map_err(|_| AppError::InternalError("schema registry lock poisoned".to_string()))?;

        if builders.contains_key(entity) {
            return Err(AppError::SchemaError(format!(
                "entity '{}' is registered twice",
                entity
            )));
        }

        builders.insert(entity.to_string(), Arc::new(build));
        Ok(())
    }

    /// 이미 빌드된 디스크립터를 등록합니다.
    pub fn register_descriptor(&self, descriptor: EntityDescriptor) -> AppResult<()> {
        let entity = descriptor.entity();
        let shared = Arc::new(descriptor);
        self.register(entity, move || {
            Err(AppError::SchemaError(format!("entity '{}' was registered prebuilt", entity)))
        })?;

        let mut descriptors = self
            .descriptors
            .write()
            .map_err(|_| AppError::InternalError("schema registry lock poisoned".to_string()))?;
        descriptors.insert(entity.to_string(), shared);
        Ok(())
    }

    /// 엔티티 타입의 디스크립터를 반환합니다.
    ///
    /// 첫 호출에서 빌드하고 캐시하며, 이후 호출은 같은 `Arc`를 반환합니다.
    ///
    /// # Errors
    ///
    /// * 등록되지 않은 엔티티 타입
    /// * 빌더가 반환한 `SchemaError` (중복 wire 이름, resolver 누락 등)
    pub fn describe(&self, entity: &str) -> AppResult<Arc<EntityDescriptor>> {
        {
            let descriptors = self
                .descriptors
                .read()
                .map_err(|_| AppError::InternalError("schema registry lock poisoned".to_string()))?;
            if let Some(descriptor) = descriptors.get(entity) {
                return Ok(Arc::clone(descriptor));
            }
        }

        let build = {
            let builders = self
                .builders
                .read()
                .map_err(|_| AppError::InternalError("schema registry lock poisoned".to_string()))?;
            builders.get(entity).cloned().ok_or_else(|| {
                AppError::SchemaError(format!("unknown entity type '{}'", entity))
            })?
        };

        // 락 밖에서 빌드
        let built = Arc::new(build()?);
        if built.entity() != entity {
            return Err(AppError::SchemaError(format!(
                "builder registered for '{}' produced a descriptor for '{}'",
                entity,
                built.entity()
            )));
        }

        let mut descriptors = self
            .descriptors
            .write()
            .map_err(|_| AppError::InternalError("schema registry lock poisoned".to_string()))?;
        let descriptor = descriptors.entry(entity.to_string()).or_insert_with(|| {
            info!("📐 Descriptor built: {} ({} fields)", entity, built.fields().len());
            built
        });

        Ok(Arc::clone(descriptor))
    }

    /// 입력 디스크립터의 컴파일된 규칙 집합을 반환합니다.
    ///
    /// 메시지 오버라이드는 컴파일 시점에 해석되므로 검증 중에는 조회 비용이 없습니다.
    pub fn rules(&self, entity: &str) -> AppResult<Arc<RuleSet>> {
        {
            let rule_sets = self
                .rule_sets
                .read()
                .map_err(|_| AppError::InternalError("schema registry lock poisoned".to_string()))?;
            if let Some(rules) = rule_sets.get(entity) {
                return Ok(Arc::clone(rules));
            }
        }

        let descriptor = self.describe(entity)?;
        let compiled = Arc::new(RuleSet::compile(&descriptor));

        let mut rule_sets = self
            .rule_sets
            .write()
            .map_err(|_| AppError::InternalError("schema registry lock poisoned".to_string()))?;
        let rules = rule_sets.entry(entity.to_string()).or_insert(compiled);
        debug!("📏 Rule set compiled: {}", entity);

        Ok(Arc::clone(rules))
    }

    /// 등록된 엔티티 타입 목록 (정렬됨)
    pub fn entities(&self) -> Vec<String> {
        let mut entities: Vec<String> = self
            .builders
            .read()
            .map(|builders| builders.keys().cloned().collect())
            .unwrap_or_default();
        entities.sort();
        entities
    }

    /// 모든 등록된 디스크립터를 미리 빌드합니다.
    ///
    /// 애플리케이션 시작 시 호출하면 잘못 구성된 디스크립터가 첫 요청이 아닌
    /// 부팅 시점에 드러납니다.
    pub fn warm_up(&self) -> AppResult<usize> {
        print_boxed_title("📐 BUILDING ENTITY DESCRIPTORS");
        print_step_start(1, "Building descriptors");

        let entities = self.entities();
        for entity in &entities {
            let descriptor = self.describe(entity)?;
            print_sub_task(entity, &format!("✓ {} fields", descriptor.fields().len()));
        }

        print_cache_initialized("Descriptor", entities.len());
        print_step_complete(1, "Descriptors built", entities.len());
        Ok(entities.len())
    }
}
