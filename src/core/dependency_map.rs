//! # Dependency Map - 의존성 풀
//!
//! 생성자 파라미터와 프로퍼티를 채울 값을 타입 식별자로 조회하는 풀입니다.
//! 활성화 코어는 [`DependencyMap::try_get`]으로 읽기만 하며, 풀의 저장 방식은
//! 호출자가 결정합니다. 기본 구현으로 [`TypeMap`]을 제공합니다.
//!
//! ## 동시성
//!
//! 같은 풀을 여러 스레드에서 동시에 읽을 수 있도록 `Send + Sync`를 요구합니다.
//! 읽기 중 변경이 안전한지는 구현체의 책임입니다.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::core::errors::{ActivationError, ActivationResult};
use crate::core::type_info::{TypeIdentity, Value};

/// 타입 식별자로 값을 조회하는 의존성 풀
pub trait DependencyMap: Send + Sync {
    /// `identity` 타입으로 저장된 값을 조회합니다. 없으면 `None`입니다.
    fn try_get(&self, identity: &TypeIdentity) -> Option<Value>;
}

/// 생성자가 풀 자체를 요청할 때 선언하는 타입
///
/// 풀 없이 호출된 경우 `None`이 바인딩됩니다.
pub type DependencyMapRef = Option<Arc<dyn DependencyMap>>;

#[derive(Clone)]
enum Entry {
    Shared(Value),
    Factory(Arc<dyn Fn() -> Value + Send + Sync>),
}

/// `HashMap` 기반 기본 의존성 풀
///
/// # Examples
///
/// ```rust,ignore
/// let mut map = TypeMap::new();
/// map.add::<Arc<dyn Logger>>(Arc::new(ConsoleLogger))?;
/// map.add_factory(|| RequestId::generate());
///
/// let map: Arc<dyn DependencyMap> = map.into_shared();
/// ```
#[derive(Clone, Default)]
pub struct TypeMap {
    entries: HashMap<TypeIdentity, Entry>,
}

impl TypeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// 값을 `T` 타입으로 등록합니다.
    ///
    /// # Errors
    ///
    /// * `ActivationError::DuplicateDependency` - `T`가 이미 등록됨
    pub fn add<T: Any + Send + Sync>(&mut self, value: T) -> ActivationResult<()> {
        self.add_shared(Arc::new(value))
    }

    /// 이미 공유 중인 값을 `T` 타입으로 등록합니다.
    pub fn add_shared<T: Any + Send + Sync>(&mut self, value: Arc<T>) -> ActivationResult<()> {
        self.add_value(TypeIdentity::of::<T>(), value)
    }

    /// 타입이 소거된 값을 지정한 식별자로 등록합니다.
    ///
    /// 값의 실제 타입은 검사하지 않습니다. 선언과 다른 값은 생성 시점에
    /// 생성자나 setter가 거부합니다.
    pub fn add_value(&mut self, identity: TypeIdentity, value: Value) -> ActivationResult<()> {
        self.insert(identity, Entry::Shared(value))
    }

    /// 조회할 때마다 새 값을 만드는 팩토리를 등록합니다.
    pub fn add_factory<T, F>(&mut self, factory: F) -> ActivationResult<()>
    where
        T: Any + Send + Sync,
        F: Fn() -> T + Send + Sync + 'static,
    {
        let erased = move || Arc::new(factory()) as Value;
        self.insert(TypeIdentity::of::<T>(), Entry::Factory(Arc::new(erased)))
    }

    /// 등록에 성공하면 `true`, 이미 있으면 기존 값을 유지하고 `false`를 반환합니다.
    pub fn try_add<T: Any + Send + Sync>(&mut self, value: T) -> bool {
        self.add(value).is_ok()
    }

    pub fn contains<T: Any>(&self) -> bool {
        self.entries.contains_key(&TypeIdentity::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 빌더에 넘길 수 있는 공유 핸들로 변환합니다.
    pub fn into_shared(self) -> Arc<dyn DependencyMap> {
        Arc::new(self)
    }

    fn insert(&mut self, identity: TypeIdentity, entry: Entry) -> ActivationResult<()> {
        if self.entries.contains_key(&identity) {
            return Err(ActivationError::DuplicateDependency {
                dependency: identity.name().to_string(),
            });
        }
        self.entries.insert(identity, entry);
        Ok(())
    }
}

impl DependencyMap for TypeMap {
    fn try_get(&self, identity: &TypeIdentity) -> Option<Value> {
        self.entries.get(identity).map(|entry| match entry {
            Entry::Shared(value) => value.clone(),
            Entry::Factory(factory) => factory(),
        })
    }
}

impl fmt::Debug for TypeMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.entries.keys()).finish()
    }
}
