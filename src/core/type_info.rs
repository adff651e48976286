//! # Type Metadata - 리플렉션 대체 메타데이터 모델
//!
//! Rust에는 런타임 리플렉션이 없으므로, 생성 대상 타입의 생성자와 프로퍼티 정보를
//! 명시적으로 등록한 [`TypeDescriptor`]로 표현합니다. 생성자와 setter는 타입이
//! 소거된 클로저로 보관되며, 값은 [`Value`] (`Arc<dyn Any + Send + Sync>`)로 전달됩니다.
//!
//! ## 값 표현 규칙
//!
//! 선언 타입이 `T`인 의존성은 항상 `Arc<T>`를 소거한 [`Value`]로 저장됩니다.
//! 트레이트 객체 의존성은 선언 타입 자체를 `Arc<dyn Trait>`으로 두면 됩니다.
//!
//! ```rust,ignore
//! let descriptor = TypeDescriptor::of::<PingModule>()
//!     .constructor(
//!         ConstructorInfo::instance()
//!             .param::<CommandService>("service")
//!             .param::<Arc<dyn Logger>>("logger")
//!             .invoke(|args| {
//!                 Ok(PingModule {
//!                     service: args.next()?,
//!                     logger: args.cloned()?,
//!                     prefix: None,
//!                 })
//!             }),
//!     )
//!     .property(PropertyInfo::new("prefix", |module: &mut PingModule, prefix: Arc<String>| {
//!         module.prefix = Some(prefix.as_str().to_owned());
//!     }));
//! ```

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use thiserror::Error;

use crate::core::errors::BoxError;

/// 타입이 소거된 의존성 값
pub type Value = Arc<dyn Any + Send + Sync>;

/// 생성자가 돌려주는 타입이 소거된 인스턴스
pub type Instance = Box<dyn Any + Send + Sync>;

type Invoker = Arc<dyn Fn(&mut Arguments) -> Result<Instance, BoxError> + Send + Sync>;

type Setter = Arc<dyn Fn(&mut (dyn Any + Send + Sync), Value) -> Result<(), BoxError> + Send + Sync>;

/// 타입 식별자
///
/// 비교와 해시는 `TypeId`로만 수행합니다. 이름은 진단 메시지용입니다.
#[derive(Clone, Copy)]
pub struct TypeIdentity {
    id: TypeId,
    name: &'static str,
}

impl TypeIdentity {
    /// `T`의 타입 식별자를 만듭니다.
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    /// 전체 모듈 경로를 포함한 타입 이름
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeIdentity {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeIdentity {}

impl Hash for TypeIdentity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl fmt::Display for TypeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// 생성자 인자나 setter 값이 선언과 맞지 않을 때의 원본 실패
#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("argument {position} is missing")]
    MissingArgument { position: usize },

    #[error("argument {position} is not a \"{expected}\"")]
    ArgumentTypeMismatch {
        position: usize,
        expected: &'static str,
    },

    #[error("value is not a \"{expected}\"")]
    ValueTypeMismatch { expected: &'static str },

    #[error("target is not a \"{expected}\"")]
    TargetTypeMismatch { expected: &'static str },

    #[error("type initializer cannot be invoked as an instance constructor")]
    TypeInitializer,
}

/// 생성자에 전달되는 바인딩 완료된 인자 목록
///
/// 인자는 파라미터 선언 순서대로 소비됩니다.
pub struct Arguments {
    values: std::vec::IntoIter<Value>,
    position: usize,
}

impl Arguments {
    pub(crate) fn new(values: Vec<Value>) -> Self {
        Self {
            values: values.into_iter(),
            position: 0,
        }
    }

    /// 다음 인자를 `Arc<T>`로 꺼냅니다.
    ///
    /// # Errors
    ///
    /// * `MetadataError::MissingArgument` - 남은 인자가 없음
    /// * `MetadataError::ArgumentTypeMismatch` - 인자의 실제 타입이 `T`가 아님
    pub fn next<T: Any + Send + Sync>(&mut self) -> Result<Arc<T>, BoxError> {
        let position = self.position;
        let value = self
            .values
            .next()
            .ok_or(MetadataError::MissingArgument { position })?;
        self.position += 1;

        value.downcast::<T>().map_err(|_| {
            MetadataError::ArgumentTypeMismatch {
                position,
                expected: std::any::type_name::<T>(),
            }
            .into()
        })
    }

    /// 다음 인자를 복제한 `T`로 꺼냅니다.
    ///
    /// 선언 타입이 `Arc<dyn Trait>`이나 `DependencyMapRef`처럼 그 자체로
    /// 공유 핸들인 경우에 사용합니다.
    pub fn cloned<T: Any + Send + Sync + Clone>(&mut self) -> Result<T, BoxError> {
        self.next::<T>().map(|value| T::clone(&value))
    }

    /// 아직 소비되지 않은 인자 수
    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

/// 생성자 파라미터 정보
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterInfo {
    name: &'static str,
    parameter_type: TypeIdentity,
}

impl ParameterInfo {
    pub fn new(name: &'static str, parameter_type: TypeIdentity) -> Self {
        Self {
            name,
            parameter_type,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn parameter_type(&self) -> TypeIdentity {
        self.parameter_type
    }
}

/// 선언된 생성자 정보
#[derive(Clone)]
pub struct ConstructorInfo {
    is_static: bool,
    parameters: Arc<[ParameterInfo]>,
    invoker: Invoker,
}

impl ConstructorInfo {
    /// 인스턴스 생성자 선언을 시작합니다.
    pub fn instance() -> ConstructorBuilder {
        ConstructorBuilder {
            parameters: Vec::new(),
        }
    }

    /// 타입 초기화자(정적 생성자)를 선언합니다.
    ///
    /// 정적 생성자는 인스턴스 생성 후보에서 항상 제외됩니다.
    pub fn type_initializer() -> Self {
        Self {
            is_static: true,
            parameters: Arc::from(Vec::new()),
            invoker: Arc::new(|_: &mut Arguments| -> Result<Instance, BoxError> {
                Err(MetadataError::TypeInitializer.into())
            }),
        }
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    /// 선언 순서대로 정렬된 파라미터 목록
    pub fn parameters(&self) -> &[ParameterInfo] {
        &self.parameters
    }

    /// 바인딩된 인자로 생성자를 호출합니다.
    pub fn invoke(&self, args: &mut Arguments) -> Result<Instance, BoxError> {
        (self.invoker)(args)
    }
}

impl fmt::Debug for ConstructorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstructorInfo")
            .field("is_static", &self.is_static)
            .field("parameters", &self.parameters)
            .finish()
    }
}

/// 인스턴스 생성자 빌더
pub struct ConstructorBuilder {
    parameters: Vec<ParameterInfo>,
}

impl ConstructorBuilder {
    /// 선언 타입이 `P`인 파라미터를 추가합니다.
    pub fn param<P: Any + Send + Sync>(mut self, name: &'static str) -> Self {
        self.parameters
            .push(ParameterInfo::new(name, TypeIdentity::of::<P>()));
        self
    }

    /// 생성자 본문을 지정하고 선언을 마칩니다.
    pub fn invoke<T, F>(self, body: F) -> ConstructorInfo
    where
        T: Any + Send + Sync,
        F: Fn(&mut Arguments) -> Result<T, BoxError> + Send + Sync + 'static,
    {
        ConstructorInfo {
            is_static: false,
            parameters: Arc::from(self.parameters),
            invoker: Arc::new(move |args: &mut Arguments| -> Result<Instance, BoxError> {
                body(args).map(|instance| Box::new(instance) as Instance)
            }),
        }
    }
}

/// setter 접근 수준
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetterVisibility {
    Public,
    NonPublic,
}

/// 선언된 프로퍼티 정보
#[derive(Clone)]
pub struct PropertyInfo {
    name: &'static str,
    property_type: TypeIdentity,
    setter: Option<(SetterVisibility, Setter)>,
    dont_inject: bool,
}

impl PropertyInfo {
    /// public setter를 가진 프로퍼티를 선언합니다.
    ///
    /// setter는 대상 인스턴스 `T`와 선언 타입 `V`의 값을 받습니다.
    pub fn new<T, V, F>(name: &'static str, setter: F) -> Self
    where
        T: Any + Send + Sync,
        V: Any + Send + Sync,
        F: Fn(&mut T, Arc<V>) + Send + Sync + 'static,
    {
        let erased: Setter = Arc::new(
            move |target: &mut (dyn Any + Send + Sync), value: Value| -> Result<(), BoxError> {
                let target = target
                    .downcast_mut::<T>()
                    .ok_or(MetadataError::TargetTypeMismatch {
                        expected: std::any::type_name::<T>(),
                    })?;
                let value = value.downcast::<V>().map_err(|_| MetadataError::ValueTypeMismatch {
                    expected: std::any::type_name::<V>(),
                })?;
                setter(target, value);
                Ok(())
            },
        );

        Self {
            name,
            property_type: TypeIdentity::of::<V>(),
            setter: Some((SetterVisibility::Public, erased)),
            dont_inject: false,
        }
    }

    /// setter가 없는 읽기 전용 프로퍼티를 선언합니다.
    pub fn read_only<V: Any + Send + Sync>(name: &'static str) -> Self {
        Self {
            name,
            property_type: TypeIdentity::of::<V>(),
            setter: None,
            dont_inject: false,
        }
    }

    /// setter를 public이 아닌 것으로 표시합니다.
    pub fn non_public(mut self) -> Self {
        if let Some((visibility, _)) = self.setter.as_mut() {
            *visibility = SetterVisibility::NonPublic;
        }
        self
    }

    /// 프로퍼티 주입 대상에서 제외합니다.
    pub fn dont_inject(mut self) -> Self {
        self.dont_inject = true;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn property_type(&self) -> TypeIdentity {
        self.property_type
    }

    pub fn setter_visibility(&self) -> Option<SetterVisibility> {
        self.setter.as_ref().map(|(visibility, _)| *visibility)
    }

    pub fn is_opted_out(&self) -> bool {
        self.dont_inject
    }

    /// public setter가 있고 주입 제외 표시가 없는지 여부
    pub fn is_injectable(&self) -> bool {
        self.setter_visibility() == Some(SetterVisibility::Public) && !self.dont_inject
    }

    /// 인스턴스에 값을 대입합니다.
    pub fn set_value(&self, target: &mut (dyn Any + Send + Sync), value: Value) -> Result<(), BoxError> {
        match &self.setter {
            Some((_, setter)) => setter(target, value),
            None => Err(format!("property \"{}\" has no setter", self.name).into()),
        }
    }
}

impl fmt::Debug for PropertyInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyInfo")
            .field("name", &self.name)
            .field("property_type", &self.property_type)
            .field("setter", &self.setter_visibility())
            .field("dont_inject", &self.dont_inject)
            .finish()
    }
}

/// 생성 대상 타입의 메타데이터
///
/// 한 번 만들어지면 변경되지 않으며, 복제 비용은 `Arc` 참조 카운트 수준입니다.
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    identity: TypeIdentity,
    full_name: String,
    constructors: Vec<ConstructorInfo>,
    properties: Vec<PropertyInfo>,
}

impl TypeDescriptor {
    /// `T`에 대한 빈 메타데이터를 만듭니다. 전체 이름은 `std::any::type_name`을 따릅니다.
    pub fn of<T: Any + Send + Sync>() -> Self {
        let identity = TypeIdentity::of::<T>();
        Self {
            identity,
            full_name: identity.name().to_string(),
            constructors: Vec::new(),
            properties: Vec::new(),
        }
    }

    /// 진단 메시지에 쓰일 전체 이름을 바꿉니다.
    pub fn named(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = full_name.into();
        self
    }

    pub fn constructor(mut self, constructor: ConstructorInfo) -> Self {
        self.constructors.push(constructor);
        self
    }

    pub fn property(mut self, property: PropertyInfo) -> Self {
        self.properties.push(property);
        self
    }

    pub fn identity(&self) -> TypeIdentity {
        self.identity
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn declared_constructors(&self) -> &[ConstructorInfo] {
        &self.constructors
    }

    pub fn declared_properties(&self) -> &[PropertyInfo] {
        &self.properties
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Sample {
        label: String,
    }

    #[test]
    fn test_type_identity_compares_by_type_id() {
        assert_eq!(TypeIdentity::of::<String>(), TypeIdentity::of::<String>());
        assert_ne!(TypeIdentity::of::<String>(), TypeIdentity::of::<&'static str>());
        assert!(TypeIdentity::of::<Sample>().name().ends_with("Sample"));
    }

    #[test]
    fn test_arguments_are_consumed_in_order() {
        let mut args = Arguments::new(vec![Arc::new(7u32) as Value, Arc::new("seven".to_string())]);

        assert_eq!(*args.next::<u32>().unwrap(), 7);
        assert_eq!(args.cloned::<String>().unwrap(), "seven");
        assert_eq!(args.remaining(), 0);
        assert!(args.next::<u32>().is_err());
    }

    #[test]
    fn test_arguments_type_mismatch() {
        let mut args = Arguments::new(vec![Arc::new(7u32) as Value]);
        let error = args.next::<String>().unwrap_err();

        assert!(error.to_string().contains("argument 0"));
    }

    #[test]
    fn test_property_eligibility() {
        let public = PropertyInfo::new("label", |s: &mut Sample, v: Arc<String>| s.label = (*v).clone());
        let hidden = PropertyInfo::new("label", |s: &mut Sample, v: Arc<String>| s.label = (*v).clone())
            .non_public();
        let opted_out = PropertyInfo::new("label", |s: &mut Sample, v: Arc<String>| s.label = (*v).clone())
            .dont_inject();
        let read_only = PropertyInfo::read_only::<String>("label");

        assert!(public.is_injectable());
        assert!(!hidden.is_injectable());
        assert!(!opted_out.is_injectable());
        assert!(opted_out.is_opted_out());
        assert!(!read_only.is_injectable());
        assert_eq!(read_only.setter_visibility(), None);
    }

    #[test]
    fn test_property_set_value() {
        let property = PropertyInfo::new("label", |s: &mut Sample, v: Arc<String>| s.label = (*v).clone());
        let mut sample = Sample { label: String::new() };

        property
            .set_value(&mut sample, Arc::new("hello".to_string()))
            .unwrap();
        assert_eq!(sample.label, "hello");

        assert!(property.set_value(&mut sample, Arc::new(1u8)).is_err());
    }

    #[test]
    fn test_descriptor_keeps_declaration_order() {
        let descriptor = TypeDescriptor::of::<Sample>()
            .constructor(ConstructorInfo::type_initializer())
            .constructor(
                ConstructorInfo::instance()
                    .param::<String>("label")
                    .param::<u32>("count")
                    .invoke(|args| Ok(Sample { label: args.cloned()? })),
            )
            .property(PropertyInfo::read_only::<u32>("count"));

        assert_eq!(descriptor.declared_constructors().len(), 2);
        assert!(descriptor.declared_constructors()[0].is_static());

        let names: Vec<_> = descriptor.declared_constructors()[1]
            .parameters()
            .iter()
            .map(ParameterInfo::name)
            .collect();
        assert_eq!(names, vec!["label", "count"]);
        assert!(descriptor.full_name().ends_with("Sample"));
        assert_eq!(descriptor.clone().named("app::Sample").full_name(), "app::Sample");
    }
}
