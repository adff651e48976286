//! # Type Registry - 타입 메타데이터 등록과 빌더 캐시
//!
//! 런타임 리플렉션 대신, 생성 가능한 타입마다 [`Injectable::describe`]로 메타데이터를
//! 제공하고 [`register_injectable!`](crate::register_injectable) 매크로로 등록합니다.
//! 등록 정보는 `inventory` 크레이트를 통해 링크 타임에 수집됩니다.
//!
//! ## 동작 원리
//!
//! ```text
//! 1. 컴파일 타임 (Registration)
//!    ├─ impl Injectable for PingModule → describe() 제공
//!    ├─ register_injectable!(PingModule) → TypeRegistration 생성
//!    └─ inventory::collect! → 전역 레지스트리에 수집
//!
//! 2. 첫 조회 (Indexing)
//!    └─ TypeCatalog → TypeId / 이름 인덱스를 한 번만 구성
//!
//! 3. 요청 처리 (Activation)
//!    ├─ BuilderCache::get_or_create → 타입당 ObjectBuilder 하나만 생성
//!    └─ ObjectBuilder::build(map) → 요청마다 새 인스턴스
//! ```
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! struct PingModule {
//!     service: Arc<CommandService>,
//! }
//!
//! impl Injectable for PingModule {
//!     fn describe() -> TypeDescriptor {
//!         TypeDescriptor::of::<Self>().constructor(
//!             ConstructorInfo::instance()
//!                 .param::<CommandService>("service")
//!                 .invoke(|args| Ok(PingModule { service: args.next()? })),
//!         )
//!     }
//! }
//!
//! register_injectable!(PingModule);
//!
//! let cache = BuilderCache::new(Arc::new(CommandService::new()));
//! let module: PingModule = cache.create(Some(&map))?;
//! ```

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use log::debug;
use once_cell::sync::Lazy;

use crate::core::dependency_map::DependencyMap;
use crate::core::errors::{ActivationError, ActivationResult};
use crate::core::reflection::{create_builder, injectable_properties, resolve_constructor, ObjectBuilder};
use crate::core::type_info::TypeDescriptor;

/// 메타데이터를 제공할 수 있는 타입
pub trait Injectable: Any + Send + Sync {
    fn describe() -> TypeDescriptor;
}

/// 타입 등록 정보
///
/// [`register_injectable!`](crate::register_injectable) 매크로가 생성하며,
/// 필드는 모두 `static` 초기화가 가능한 함수 포인터입니다.
pub struct TypeRegistration {
    pub type_id: fn() -> TypeId,
    pub type_name: fn() -> &'static str,
    pub describe: fn() -> TypeDescriptor,
}

/// 등록된 타입 하나의 메타데이터 검증 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeSummary {
    pub parameters: usize,
    pub injectable_properties: usize,
}

impl TypeRegistration {
    /// 등록된 타입의 짧은 이름 (모듈 경로 제외)
    pub fn short_name(&self) -> &'static str {
        short_type_name((self.type_name)())
    }

    /// 메타데이터를 만들고 생성자 선택이 가능한지 검증합니다.
    ///
    /// 의존성 해결은 풀에 따라 달라지므로 검사하지 않습니다.
    pub fn validate(&self) -> ActivationResult<TypeSummary> {
        let type_info = (self.describe)();
        let constructor = resolve_constructor(&type_info)?;

        Ok(TypeSummary {
            parameters: constructor.parameters().len(),
            injectable_properties: injectable_properties(&type_info).count(),
        })
    }
}

inventory::collect!(TypeRegistration);

#[doc(hidden)]
pub fn type_id_of<T: 'static>() -> TypeId {
    TypeId::of::<T>()
}

#[doc(hidden)]
pub fn type_name_of<T: 'static>() -> &'static str {
    std::any::type_name::<T>()
}

/// `Injectable` 타입을 전역 카탈로그에 등록합니다.
///
/// ```rust,ignore
/// register_injectable!(PingModule);
/// ```
#[macro_export]
macro_rules! register_injectable {
    ($ty:ty) => {
        $crate::inventory::submit! {
            $crate::core::registry::TypeRegistration {
                type_id: $crate::core::registry::type_id_of::<$ty>,
                type_name: $crate::core::registry::type_name_of::<$ty>,
                describe: <$ty as $crate::core::registry::Injectable>::describe,
            }
        }
    };
}

/// TypeId → 등록정보 인덱스. 첫 접근 시 한 번만 구성됩니다.
static ID_INDEX: Lazy<HashMap<TypeId, &'static TypeRegistration>> = Lazy::new(|| {
    let index: HashMap<_, _> = inventory::iter::<TypeRegistration>()
        .map(|registration| ((registration.type_id)(), registration))
        .collect();

    debug!("Type catalog indexed: {} registrations", index.len());
    index
});

/// 이름 → 등록정보 인덱스. 전체 경로와 짧은 이름 모두로 조회할 수 있습니다.
static NAME_INDEX: Lazy<HashMap<&'static str, &'static TypeRegistration>> = Lazy::new(|| {
    let mut index = HashMap::new();

    for registration in ID_INDEX.values().copied() {
        index.insert((registration.type_name)(), registration);
        index.entry(registration.short_name()).or_insert(registration);
    }

    index
});

/// 모듈 경로를 제거한 타입 이름
///
/// `std::any::type_name::<T>()`는 `app::modules::PingModule`처럼 전체 경로를 포함하므로,
/// 제네릭 인자 이전 구간의 마지막 경로 조각만 남깁니다.
fn short_type_name(type_name: &str) -> &str {
    let head = type_name.split('<').next().unwrap_or(type_name);
    match head.rfind("::") {
        Some(pos) => &type_name[pos + 2..],
        None => type_name,
    }
}

/// 등록된 타입 메타데이터 카탈로그
pub struct TypeCatalog;

impl TypeCatalog {
    pub fn get(type_id: TypeId) -> Option<&'static TypeRegistration> {
        ID_INDEX.get(&type_id).copied()
    }

    /// 전체 경로 또는 짧은 이름으로 등록정보를 찾습니다.
    ///
    /// 짧은 이름이 겹치면 먼저 인덱싱된 타입이 선택되므로, 모호할 수 있는 경우
    /// 전체 경로를 사용하세요.
    pub fn find_by_name(name: &str) -> Option<&'static TypeRegistration> {
        NAME_INDEX.get(name).copied()
    }

    /// `T`의 메타데이터를 만듭니다.
    ///
    /// # Errors
    ///
    /// * `ActivationError::TypeNotRegistered` - `T`가 등록되지 않음
    pub fn describe<T: 'static>() -> ActivationResult<TypeDescriptor> {
        Self::get(TypeId::of::<T>())
            .map(|registration| (registration.describe)())
            .ok_or_else(|| ActivationError::TypeNotRegistered {
                type_name: std::any::type_name::<T>().to_string(),
            })
    }

    /// 이름순으로 정렬된 전체 등록정보
    pub fn registrations() -> Vec<&'static TypeRegistration> {
        let mut registrations: Vec<_> = ID_INDEX.values().copied().collect();
        registrations.sort_by_key(|registration| (registration.type_name)());
        registrations
    }

    pub fn len() -> usize {
        ID_INDEX.len()
    }

    pub fn is_empty() -> bool {
        ID_INDEX.is_empty()
    }
}

/// 대상 타입별 [`ObjectBuilder`] 캐시
///
/// 서비스 폴백 값 `S`는 캐시가 만드는 모든 빌더에 공통으로 고정됩니다.
/// 메타데이터 분석은 (대상 타입, 결과 타입) 쌍마다 한 번만 수행됩니다.
pub struct BuilderCache<S> {
    service: Arc<S>,
    builders: RwLock<HashMap<(TypeId, TypeId), Arc<dyn Any + Send + Sync>>>,
}

impl<S: Any + Send + Sync> BuilderCache<S> {
    pub fn new(service: Arc<S>) -> Self {
        Self {
            service,
            builders: RwLock::new(HashMap::new()),
        }
    }

    pub fn service(&self) -> &Arc<S> {
        &self.service
    }

    /// 캐시된 빌더를 반환하거나, 없으면 `type_info`로 새로 만듭니다.
    ///
    /// 빌더 생성에 실패하면 아무것도 캐시하지 않습니다.
    pub fn get_or_create<T: Any + Send + Sync>(
        &self,
        type_info: &TypeDescriptor,
    ) -> ActivationResult<ObjectBuilder<T>> {
        let key = (type_info.identity().id(), TypeId::of::<T>());

        // 이미 생성된 빌더 확인
        {
            let builders = self.builders.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(builder) = builders.get(&key).and_then(|b| b.downcast_ref::<ObjectBuilder<T>>()) {
                return Ok(builder.clone());
            }
        }

        let builder = create_builder::<T, S>(type_info, Arc::clone(&self.service))?;

        let mut builders = self.builders.write().unwrap_or_else(PoisonError::into_inner);
        let cached = builders
            .entry(key)
            .or_insert_with(|| Arc::new(builder.clone()) as Arc<dyn Any + Send + Sync>);

        // 더블 체크: 다른 스레드가 먼저 넣은 빌더를 우선
        Ok(cached
            .downcast_ref::<ObjectBuilder<T>>()
            .cloned()
            .unwrap_or(builder))
    }

    /// 카탈로그에 등록된 `T`의 빌더를 반환합니다.
    pub fn builder<T: Any + Send + Sync>(&self) -> ActivationResult<ObjectBuilder<T>> {
        let type_info = TypeCatalog::describe::<T>()?;
        self.get_or_create(&type_info)
    }

    /// 카탈로그에 등록된 `T`의 인스턴스를 만듭니다.
    pub fn create<T: Any + Send + Sync>(
        &self,
        map: Option<&Arc<dyn DependencyMap>>,
    ) -> ActivationResult<T> {
        self.builder::<T>()?.build(map)
    }

    pub fn len(&self) -> usize {
        self.builders.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.builders.write().unwrap_or_else(PoisonError::into_inner).clear();
    }
}
