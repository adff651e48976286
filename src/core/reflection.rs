//! # Object Activation - 생성자/프로퍼티 주입
//!
//! [`TypeDescriptor`]와 의존성 풀로부터 완전히 초기화된 인스턴스를 만듭니다.
//! 하나의 생성 요청은 항상 다음 순서를 따릅니다.
//!
//! ```text
//! 1. 생성자 선택     ─ 정적이 아닌 생성자가 정확히 하나여야 함
//! 2. 파라미터 바인딩 ─ 풀 조회 → 서비스 폴백 → 풀 참조 폴백
//! 3. 인스턴스 생성   ─ 생성자 호출, 실패는 ConstructionFailed로 감쌈
//! 4. 프로퍼티 주입   ─ public setter + 주입 제외 표시 없음, 동일한 해결 규칙
//! ```
//!
//! 1번과 4번의 대상 목록 계산은 [`create_builder`]에서 한 번만 수행되고,
//! 반환된 [`ObjectBuilder`]는 풀만 바꿔가며 반복 호출할 수 있습니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use command_activator::core::{create_builder, create_object, TypeMap};
//!
//! let service = Arc::new(CommandService::new());
//!
//! // 한 번만 생성
//! let module: PingModule = create_object(&PingModule::describe(), service.clone(), None)?;
//!
//! // 빌더를 캐시해 두고 요청마다 다른 풀로 생성
//! let builder = create_builder::<PingModule, _>(&PingModule::describe(), service)?;
//! let first = builder.build(Some(&first_map))?;
//! let second = builder.build(Some(&second_map))?;
//! ```
//!
//! 실패는 로그 없이 그대로 호출자에게 반환됩니다.

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use log::{debug, trace};
use thiserror::Error;

use crate::core::dependency_map::{DependencyMap, DependencyMapRef};
use crate::core::errors::{ActivationError, ActivationResult, BoxError};
use crate::core::type_info::{
    Arguments, ConstructorInfo, Instance, PropertyInfo, TypeDescriptor, TypeIdentity, Value,
};

/// 생성자 호출 중 발생한 패닉이나 결과 타입 불일치
#[derive(Error, Debug)]
enum InvocationError {
    #[error("constructor panicked: {message}")]
    Panicked { message: String },

    #[error("constructed instance is not a \"{expected}\"")]
    ResultTypeMismatch { expected: &'static str },
}

/// 호출 시점에 고정되는 서비스 폴백 값
#[derive(Clone)]
struct ServiceFallback {
    identity: TypeIdentity,
    value: Value,
}

/// 한 타입에 대해 미리 계산된 생성 계획
struct BuildPlan {
    type_name: String,
    constructor: ConstructorInfo,
    properties: Vec<PropertyInfo>,
    service: ServiceFallback,
}

/// 풀을 받아 인스턴스를 만드는 재사용 가능한 빌더
///
/// 생성자 선택과 프로퍼티 필터링은 이미 끝난 상태이며, 내부 상태는 모두 불변입니다.
/// 따라서 여러 스레드에서 동시에 [`ObjectBuilder::build`]를 호출할 수 있습니다.
/// 각 호출은 자신만의 인자 목록과 인스턴스를 만듭니다.
pub struct ObjectBuilder<T> {
    plan: Arc<BuildPlan>,
    _target: PhantomData<fn() -> T>,
}

impl<T> Clone for ObjectBuilder<T> {
    fn clone(&self) -> Self {
        Self {
            plan: Arc::clone(&self.plan),
            _target: PhantomData,
        }
    }
}

impl<T> fmt::Debug for ObjectBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectBuilder")
            .field("type_name", &self.plan.type_name)
            .field("parameters", &self.plan.constructor.parameters())
            .field("properties", &self.plan.properties)
            .finish()
    }
}

impl<T: Any + Send + Sync> ObjectBuilder<T> {
    /// 주어진 풀로 새 인스턴스를 만듭니다.
    ///
    /// # Errors
    ///
    /// * `ActivationError::DependencyNotFound` - 파라미터나 프로퍼티를 해결하지 못함
    /// * `ActivationError::ConstructionFailed` - 생성자 호출 실패
    /// * `ActivationError::PropertyAssignmentFailed` - setter가 값을 거부함
    ///
    /// 프로퍼티 단계에서 실패하면 그때까지 주입된 인스턴스는 롤백 없이 버려집니다.
    pub fn build(&self, map: Option<&Arc<dyn DependencyMap>>) -> ActivationResult<T> {
        let plan = &*self.plan;

        let mut args = bind_parameters(plan, map)?;
        let mut instance = construct::<T>(plan, &mut args)?;
        inject_properties(plan, &mut *instance, map)?;

        Ok(*instance)
    }

    pub fn type_name(&self) -> &str {
        &self.plan.type_name
    }

    pub fn parameter_count(&self) -> usize {
        self.plan.constructor.parameters().len()
    }

    /// 주입 대상으로 선택된 프로퍼티 이름 (선언 순서)
    pub fn injected_properties(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.plan.properties.iter().map(PropertyInfo::name)
    }

    /// 두 빌더가 같은 생성 계획을 공유하는지 여부
    pub fn shares_plan_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.plan, &other.plan)
    }
}

/// 인스턴스 하나를 바로 생성합니다.
///
/// [`create_builder`]로 빌더를 만든 뒤 한 번 호출하는 것과 같습니다.
pub fn create_object<T, S>(
    type_info: &TypeDescriptor,
    service: Arc<S>,
    map: Option<&Arc<dyn DependencyMap>>,
) -> ActivationResult<T>
where
    T: Any + Send + Sync,
    S: Any + Send + Sync,
{
    create_builder::<T, S>(type_info, service)?.build(map)
}

/// 타입 메타데이터를 분석해 재사용 가능한 빌더를 만듭니다.
///
/// `service`는 선언 타입이 `S`인 파라미터/프로퍼티의 폴백 값으로,
/// 빌더가 살아있는 동안 고정됩니다.
///
/// # Errors
///
/// * `ActivationError::NoConstructorFound` - 인스턴스 생성자가 없음
/// * `ActivationError::AmbiguousConstructor` - 인스턴스 생성자가 둘 이상
pub fn create_builder<T, S>(
    type_info: &TypeDescriptor,
    service: Arc<S>,
) -> ActivationResult<ObjectBuilder<T>>
where
    T: Any + Send + Sync,
    S: Any + Send + Sync,
{
    let constructor = resolve_constructor(type_info)?.clone();
    let properties: Vec<PropertyInfo> = injectable_properties(type_info).cloned().collect();

    debug!(
        "Builder created for {}: {} parameters, {} injectable properties",
        type_info.full_name(),
        constructor.parameters().len(),
        properties.len()
    );

    let plan = BuildPlan {
        type_name: type_info.full_name().to_string(),
        constructor,
        properties,
        service: ServiceFallback {
            identity: TypeIdentity::of::<S>(),
            value: service,
        },
    };

    Ok(ObjectBuilder {
        plan: Arc::new(plan),
        _target: PhantomData,
    })
}

/// 정적이 아닌 유일한 생성자를 찾습니다.
///
/// # Errors
///
/// * `ActivationError::NoConstructorFound` - 후보가 없음
/// * `ActivationError::AmbiguousConstructor` - 후보가 둘 이상
pub fn resolve_constructor(type_info: &TypeDescriptor) -> ActivationResult<&ConstructorInfo> {
    let candidates: Vec<&ConstructorInfo> = type_info
        .declared_constructors()
        .iter()
        .filter(|constructor| !constructor.is_static())
        .collect();

    match candidates.as_slice() {
        [] => Err(ActivationError::NoConstructorFound {
            type_name: type_info.full_name().to_string(),
        }),
        [constructor] => Ok(*constructor),
        _ => Err(ActivationError::AmbiguousConstructor {
            type_name: type_info.full_name().to_string(),
            count: candidates.len(),
        }),
    }
}

/// public setter가 있고 주입 제외 표시가 없는 프로퍼티 (선언 순서)
pub fn injectable_properties(type_info: &TypeDescriptor) -> impl Iterator<Item = &PropertyInfo> {
    type_info
        .declared_properties()
        .iter()
        .filter(|property| property.is_injectable())
}

/// 선언 타입 하나에 대한 값을 찾습니다.
///
/// 풀 조회가 항상 먼저이며, 풀에 값이 있으면 폴백 타입이라도 풀의 값이 이깁니다.
fn resolve_dependency(
    identity: &TypeIdentity,
    map: Option<&Arc<dyn DependencyMap>>,
    service: &ServiceFallback,
) -> Option<Value> {
    if let Some(value) = map.and_then(|map| map.try_get(identity)) {
        trace!("{} resolved from dependency map", identity);
        return Some(value);
    }

    if *identity == service.identity {
        trace!("{} resolved to service fallback", identity);
        return Some(Arc::clone(&service.value));
    }

    if *identity == TypeIdentity::of::<DependencyMapRef>() {
        trace!("{} resolved to dependency map reference", identity);
        let map_ref: Value = Arc::new(map.cloned());
        return Some(map_ref);
    }

    None
}

fn bind_parameters(
    plan: &BuildPlan,
    map: Option<&Arc<dyn DependencyMap>>,
) -> ActivationResult<Arguments> {
    let parameters = plan.constructor.parameters();
    let mut values = Vec::with_capacity(parameters.len());

    for parameter in parameters {
        let identity = parameter.parameter_type();
        let value = resolve_dependency(&identity, map, &plan.service).ok_or_else(|| {
            ActivationError::DependencyNotFound {
                type_name: plan.type_name.clone(),
                dependency: identity.name().to_string(),
            }
        })?;
        values.push(value);
    }

    Ok(Arguments::new(values))
}

fn construct<T: Any + Send + Sync>(plan: &BuildPlan, args: &mut Arguments) -> ActivationResult<Box<T>> {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| plan.constructor.invoke(args)));

    let result: Result<Instance, BoxError> = match outcome {
        Ok(result) => result,
        Err(payload) => Err(InvocationError::Panicked {
            message: panic_message(payload.as_ref()),
        }
        .into()),
    };

    result
        .and_then(|instance| {
            instance.downcast::<T>().map_err(|_| {
                InvocationError::ResultTypeMismatch {
                    expected: std::any::type_name::<T>(),
                }
                .into()
            })
        })
        .map_err(|source| ActivationError::ConstructionFailed {
            type_name: plan.type_name.clone(),
            source,
        })
}

fn inject_properties(
    plan: &BuildPlan,
    instance: &mut (dyn Any + Send + Sync),
    map: Option<&Arc<dyn DependencyMap>>,
) -> ActivationResult<()> {
    for property in &plan.properties {
        let identity = property.property_type();
        let value = resolve_dependency(&identity, map, &plan.service).ok_or_else(|| {
            ActivationError::DependencyNotFound {
                type_name: plan.type_name.clone(),
                dependency: identity.name().to_string(),
            }
        })?;

        property
            .set_value(instance, value)
            .map_err(|source| ActivationError::PropertyAssignmentFailed {
                type_name: plan.type_name.clone(),
                property: property.name().to_string(),
                source,
            })?;
    }

    Ok(())
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dependency_map::TypeMap;
    use std::error::Error;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CommandService {
        name: &'static str,
    }

    trait ILogger: Send + Sync {
        fn name(&self) -> &str;
    }

    struct ConsoleLogger;

    impl ILogger for ConsoleLogger {
        fn name(&self) -> &str {
            "console"
        }
    }

    trait ICache: Send + Sync {}

    struct Foo {
        service: Arc<CommandService>,
        logger: Arc<dyn ILogger>,
    }

    struct Bar {
        _cache: Arc<dyn ICache>,
    }

    #[derive(Default)]
    struct Tagged {
        label: String,
        note: String,
        hidden: String,
        map: Option<DependencyMapRef>,
    }

    fn expect_failure<T>(result: ActivationResult<T>) -> ActivationError {
        match result {
            Ok(_) => panic!("Expected activation to fail"),
            Err(error) => error,
        }
    }

    fn service() -> Arc<CommandService> {
        Arc::new(CommandService { name: "commands" })
    }

    fn foo_descriptor() -> TypeDescriptor {
        TypeDescriptor::of::<Foo>().constructor(
            ConstructorInfo::instance()
                .param::<CommandService>("service")
                .param::<Arc<dyn ILogger>>("logger")
                .invoke(|args| {
                    Ok(Foo {
                        service: args.next()?,
                        logger: args.cloned()?,
                    })
                }),
        )
    }

    fn bar_descriptor() -> TypeDescriptor {
        TypeDescriptor::of::<Bar>().constructor(
            ConstructorInfo::instance()
                .param::<Arc<dyn ICache>>("cache")
                .invoke(|args| Ok(Bar { _cache: args.cloned()? })),
        )
    }

    fn tagged_descriptor() -> TypeDescriptor {
        TypeDescriptor::of::<Tagged>()
            .constructor(ConstructorInfo::instance().invoke(|_| {
                Ok(Tagged {
                    note: "from constructor".to_string(),
                    hidden: "from constructor".to_string(),
                    ..Tagged::default()
                })
            }))
            .property(PropertyInfo::new("label", |t: &mut Tagged, v: Arc<String>| {
                t.label = (*v).clone();
            }))
            .property(
                PropertyInfo::new("note", |t: &mut Tagged, v: Arc<String>| t.note = (*v).clone())
                    .dont_inject(),
            )
            .property(
                PropertyInfo::new("hidden", |t: &mut Tagged, v: Arc<String>| t.hidden = (*v).clone())
                    .non_public(),
            )
            .property(PropertyInfo::read_only::<u64>("revision"))
    }

    fn logger_map() -> Arc<dyn DependencyMap> {
        let mut map = TypeMap::new();
        map.add::<Arc<dyn ILogger>>(Arc::new(ConsoleLogger)).unwrap();
        map.into_shared()
    }

    #[test]
    fn test_foo_is_built_from_service_fallback_and_map() {
        let service = service();
        let map = logger_map();

        let foo: Foo = create_object(&foo_descriptor(), service.clone(), Some(&map)).unwrap();

        assert!(Arc::ptr_eq(&foo.service, &service));
        assert_eq!(foo.service.name, "commands");
        assert_eq!(foo.logger.name(), "console");
    }

    #[test]
    fn test_no_constructor_found() {
        let empty = TypeDescriptor::of::<Foo>();
        let static_only = TypeDescriptor::of::<Foo>().constructor(ConstructorInfo::type_initializer());

        for descriptor in [empty, static_only] {
            let error = expect_failure(create_object::<Foo, _>(&descriptor, service(), None));
            assert!(matches!(error, ActivationError::NoConstructorFound { .. }));
            assert!(error.to_string().contains("Foo"));
        }
    }

    #[test]
    fn test_ambiguous_constructor() {
        let descriptor = foo_descriptor()
            .constructor(ConstructorInfo::type_initializer())
            .constructor(
                ConstructorInfo::instance()
                    .param::<CommandService>("service")
                    .invoke(|args| {
                        Ok(Foo {
                            service: args.next()?,
                            logger: Arc::new(ConsoleLogger),
                        })
                    }),
            );

        let error = create_builder::<Foo, _>(&descriptor, service()).unwrap_err();
        match error {
            ActivationError::AmbiguousConstructor { type_name, count } => {
                assert!(type_name.ends_with("Foo"));
                assert_eq!(count, 2);
            }
            other => panic!("Expected AmbiguousConstructor, got {:?}", other),
        }
    }

    #[test]
    fn test_bar_fails_with_missing_cache() {
        for map in [None, Some(TypeMap::new().into_shared())] {
            let error = expect_failure(create_object::<Bar, _>(&bar_descriptor(), service(), map.as_ref()));

            match &error {
                ActivationError::DependencyNotFound {
                    type_name,
                    dependency,
                } => {
                    assert!(type_name.ends_with("Bar"));
                    assert!(dependency.contains("ICache"));
                }
                other => panic!("Expected DependencyNotFound, got {:?}", other),
            }
            assert!(error.to_string().contains("ICache"));
        }
    }

    #[test]
    fn test_parameters_are_bound_before_invocation() {
        let invoked = Arc::new(AtomicUsize::new(0));
        let counter = invoked.clone();
        let descriptor = TypeDescriptor::of::<Bar>().constructor(
            ConstructorInfo::instance()
                .param::<CommandService>("service")
                .param::<Arc<dyn ICache>>("cache")
                .invoke(move |args| {
                    counter.fetch_add(1, Ordering::SeqCst);
                    let _service = args.next::<CommandService>()?;
                    Ok(Bar { _cache: args.cloned()? })
                }),
        );

        let result = create_object::<Bar, _>(&descriptor, service(), None);

        assert!(matches!(result, Err(ActivationError::DependencyNotFound { .. })));
        assert_eq!(invoked.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_map_value_wins_over_service_fallback() {
        let fallback = service();
        let pooled = Arc::new(CommandService { name: "pooled" });

        let mut map = TypeMap::new();
        map.add::<Arc<dyn ILogger>>(Arc::new(ConsoleLogger)).unwrap();
        map.add_shared(pooled.clone()).unwrap();
        let map = map.into_shared();

        let foo: Foo = create_object(&foo_descriptor(), fallback, Some(&map)).unwrap();

        assert!(Arc::ptr_eq(&foo.service, &pooled));
        assert_eq!(foo.service.name, "pooled");
    }

    #[test]
    fn test_map_reference_fallback() {
        struct NeedsMap {
            map: DependencyMapRef,
        }

        let descriptor = TypeDescriptor::of::<NeedsMap>().constructor(
            ConstructorInfo::instance()
                .param::<DependencyMapRef>("map")
                .invoke(|args| Ok(NeedsMap { map: args.cloned()? })),
        );

        let without_map: NeedsMap = create_object(&descriptor, service(), None).unwrap();
        assert!(without_map.map.is_none());

        let map = TypeMap::new().into_shared();
        let with_map: NeedsMap = create_object(&descriptor, service(), Some(&map)).unwrap();
        let bound = with_map.map.expect("map reference should be bound");
        assert!(std::ptr::addr_eq(Arc::as_ptr(&bound), Arc::as_ptr(&map)));
    }

    #[test]
    fn test_map_value_wins_over_map_reference_fallback() {
        struct NeedsMap {
            map: DependencyMapRef,
        }

        let descriptor = TypeDescriptor::of::<NeedsMap>().constructor(
            ConstructorInfo::instance()
                .param::<DependencyMapRef>("map")
                .invoke(|args| Ok(NeedsMap { map: args.cloned()? })),
        );

        let mut map = TypeMap::new();
        map.add::<DependencyMapRef>(None).unwrap();
        let map = map.into_shared();

        let built: NeedsMap = create_object(&descriptor, service(), Some(&map)).unwrap();
        assert!(built.map.is_none());
    }

    #[test]
    fn test_builder_calls_are_independent() {
        let builder = create_builder::<Tagged, _>(&tagged_descriptor(), service()).unwrap();

        let mut first_map = TypeMap::new();
        first_map.add("first".to_string()).unwrap();
        let first_map = first_map.into_shared();

        let mut second_map = TypeMap::new();
        second_map.add("second".to_string()).unwrap();
        let second_map = second_map.into_shared();

        let mut first = builder.build(Some(&first_map)).unwrap();
        let second = builder.build(Some(&second_map)).unwrap();

        first.label.push_str(" (edited)");

        assert_eq!(first.label, "first (edited)");
        assert_eq!(second.label, "second");
        assert!(first.map.is_none() && second.map.is_none());
    }

    #[test]
    fn test_opted_out_and_non_public_properties_are_skipped() {
        let builder = create_builder::<Tagged, _>(&tagged_descriptor(), service()).unwrap();

        let mut map = TypeMap::new();
        map.add("injected".to_string()).unwrap();
        map.add(7u64).unwrap();
        let map = map.into_shared();

        let tagged = builder.build(Some(&map)).unwrap();

        assert_eq!(tagged.label, "injected");
        assert_eq!(tagged.note, "from constructor");
        assert_eq!(tagged.hidden, "from constructor");
        assert_eq!(builder.injected_properties().collect::<Vec<_>>(), vec!["label"]);
    }

    #[test]
    fn test_property_resolves_service_and_map_fallbacks() {
        let descriptor = TypeDescriptor::of::<Tagged>()
            .constructor(ConstructorInfo::instance().invoke(|_| Ok(Tagged::default())))
            .property(PropertyInfo::new("label", |t: &mut Tagged, v: Arc<CommandService>| {
                t.label = v.name.to_string();
            }))
            .property(PropertyInfo::new("map", |t: &mut Tagged, v: Arc<DependencyMapRef>| {
                t.map = Some((*v).clone());
            }));

        let tagged: Tagged = create_object(&descriptor, service(), None).unwrap();

        assert_eq!(tagged.label, "commands");
        assert!(matches!(tagged.map, Some(None)));
    }

    #[test]
    fn test_property_dependency_not_found_after_partial_injection() {
        let assigned = Arc::new(AtomicUsize::new(0));

        let descriptor = TypeDescriptor::of::<Tagged>()
            .constructor(ConstructorInfo::instance().invoke(|_| Ok(Tagged::default())))
            .property(PropertyInfo::new("counter", |_: &mut Tagged, v: Arc<Arc<AtomicUsize>>| {
                v.fetch_add(1, Ordering::SeqCst);
            }))
            .property(PropertyInfo::new("cache", |_: &mut Tagged, _: Arc<Arc<dyn ICache>>| {}));

        let mut map = TypeMap::new();
        map.add(assigned.clone()).unwrap();
        let map = map.into_shared();

        let error = expect_failure(create_object::<Tagged, _>(&descriptor, service(), Some(&map)));

        match error {
            ActivationError::DependencyNotFound {
                type_name,
                dependency,
            } => {
                assert!(type_name.ends_with("Tagged"));
                assert!(dependency.contains("ICache"));
            }
            other => panic!("Expected DependencyNotFound, got {:?}", other),
        }
        assert_eq!(assigned.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_property_assignment_failed_on_mismatched_value() {
        let mut map = TypeMap::new();
        map.add_value(TypeIdentity::of::<String>(), Arc::new(5u32)).unwrap();
        let map = map.into_shared();

        let error = expect_failure(create_object::<Tagged, _>(&tagged_descriptor(), service(), Some(&map)));

        match error {
            ActivationError::PropertyAssignmentFailed { property, .. } => assert_eq!(property, "label"),
            other => panic!("Expected PropertyAssignmentFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_constructor_error_is_wrapped() {
        let descriptor = TypeDescriptor::of::<Tagged>().constructor(
            ConstructorInfo::instance().invoke(|_| -> Result<Tagged, BoxError> { Err("disk on fire".into()) }),
        );

        let error = expect_failure(create_object::<Tagged, _>(&descriptor, service(), None));

        assert!(matches!(error, ActivationError::ConstructionFailed { .. }));
        assert!(error.to_string().contains("Tagged"));
        assert_eq!(error.source().unwrap().to_string(), "disk on fire");
    }

    #[test]
    fn test_constructor_panic_is_wrapped() {
        let descriptor = TypeDescriptor::of::<Tagged>().constructor(
            ConstructorInfo::instance().invoke(|_| -> Result<Tagged, BoxError> { panic!("boom") }),
        );

        let error = expect_failure(create_object::<Tagged, _>(&descriptor, service(), None));

        assert!(matches!(error, ActivationError::ConstructionFailed { .. }));
        assert!(error.source().unwrap().to_string().contains("boom"));
    }

    #[test]
    fn test_mismatched_argument_is_construction_failure() {
        let mut map = TypeMap::new();
        map.add_value(TypeIdentity::of::<Arc<dyn ILogger>>(), Arc::new("not a logger"))
            .unwrap();
        let map = map.into_shared();

        let error = expect_failure(create_object::<Foo, _>(&foo_descriptor(), service(), Some(&map)));

        assert!(matches!(error, ActivationError::ConstructionFailed { .. }));
    }

    #[test]
    fn test_result_type_mismatch_is_construction_failure() {
        let map = logger_map();

        let error = expect_failure(create_object::<Tagged, _>(&foo_descriptor(), service(), Some(&map)));

        match &error {
            ActivationError::ConstructionFailed { type_name, source } => {
                assert!(type_name.ends_with("Foo"));
                assert!(source.to_string().contains("Tagged"));
            }
            other => panic!("Expected ConstructionFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_builder_is_shared_across_threads() {
        let builder = create_builder::<Foo, _>(&foo_descriptor(), service()).unwrap();
        let map = logger_map();

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| builder.build(Some(&map)).map(|foo| foo.logger.name().to_string())))
                .collect();

            for handle in handles {
                assert_eq!(handle.join().unwrap().unwrap(), "console");
            }
        });
        assert_eq!(builder.parameter_count(), 2);
    }
}
