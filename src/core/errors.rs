//! # Activation Error Handling
//!
//! 타입 생성(activation) 과정에서 발생하는 모든 실패를 표현하는 에러 타입입니다.
//! 모든 에러는 생성 요청 하나에 치명적이며, 내부에서 재시도하거나 로그로 삼키지 않고
//! 호출자에게 그대로 전달됩니다.
//!
//! ## 에러 분류
//!
//! | ActivationError | 발생 단계 | 사용 시나리오 |
//! |-----------------|-----------|---------------|
//! | `NoConstructorFound` | 생성자 선택 | 인스턴스 생성자가 하나도 없음 |
//! | `AmbiguousConstructor` | 생성자 선택 | 인스턴스 생성자가 둘 이상 |
//! | `DependencyNotFound` | 파라미터/프로퍼티 바인딩 | 풀과 폴백 어디에서도 값을 찾지 못함 |
//! | `ConstructionFailed` | 생성자 호출 | 생성자 본문이 실패하거나 패닉 |
//! | `PropertyAssignmentFailed` | 프로퍼티 주입 | setter가 값을 거부함 |
//! | `DuplicateDependency` | 풀 구성 | 같은 타입을 두 번 등록 |
//! | `TypeNotRegistered` | 카탈로그 조회 | 등록되지 않은 타입 요청 |
//!
//! 모든 메시지에는 대상 타입의 전체 경로 이름이 포함됩니다.

use thiserror::Error;

/// 생성자나 setter가 돌려주는 원본 실패
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// 타입 생성 과정의 에러
#[derive(Error, Debug)]
pub enum ActivationError {
    /// 정적이 아닌 생성자가 하나도 선언되지 않은 경우
    #[error("No constructor found for \"{type_name}\"")]
    NoConstructorFound { type_name: String },

    /// 정적이 아닌 생성자가 둘 이상 선언된 경우
    #[error("Multiple constructors found for \"{type_name}\"")]
    AmbiguousConstructor { type_name: String, count: usize },

    /// 파라미터나 프로퍼티의 의존성을 해결하지 못한 경우
    ///
    /// `dependency`는 해결하지 못한 파라미터/프로퍼티의 선언 타입 이름입니다.
    #[error("Failed to create \"{type_name}\", dependency \"{dependency}\" was not found.")]
    DependencyNotFound {
        type_name: String,
        dependency: String,
    },

    /// 생성자 호출 자체가 실패한 경우
    ///
    /// 원본 실패는 [`std::error::Error::source`]로 확인할 수 있습니다.
    #[error("Failed to create \"{type_name}\"")]
    ConstructionFailed {
        type_name: String,
        #[source]
        source: BoxError,
    },

    /// 프로퍼티 setter가 해결된 값을 받아들이지 못한 경우
    #[error("Failed to set property \"{property}\" on \"{type_name}\"")]
    PropertyAssignmentFailed {
        type_name: String,
        property: String,
        #[source]
        source: BoxError,
    },

    /// 의존성 풀에 같은 타입이 이미 등록된 경우
    #[error("Dependency \"{dependency}\" is already registered")]
    DuplicateDependency { dependency: String },

    /// 카탈로그에 등록되지 않은 타입을 요청한 경우
    #[error("Type \"{type_name}\" is not registered. Make sure it's registered with register_injectable!")]
    TypeNotRegistered { type_name: String },
}

impl ActivationError {
    /// 에러가 가리키는 대상 타입 이름
    pub fn type_name(&self) -> &str {
        match self {
            ActivationError::NoConstructorFound { type_name }
            | ActivationError::AmbiguousConstructor { type_name, .. }
            | ActivationError::DependencyNotFound { type_name, .. }
            | ActivationError::ConstructionFailed { type_name, .. }
            | ActivationError::PropertyAssignmentFailed { type_name, .. }
            | ActivationError::TypeNotRegistered { type_name } => type_name,
            ActivationError::DuplicateDependency { dependency } => dependency,
        }
    }
}

/// 타입 생성 결과 타입
pub type ActivationResult<T> = Result<T, ActivationError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_dependency_not_found_message() {
        let error = ActivationError::DependencyNotFound {
            type_name: "app::modules::Bar".to_string(),
            dependency: "app::ICache".to_string(),
        };

        assert_eq!(
            error.to_string(),
            "Failed to create \"app::modules::Bar\", dependency \"app::ICache\" was not found."
        );
        assert_eq!(error.type_name(), "app::modules::Bar");
    }

    #[test]
    fn test_constructor_errors_name_type() {
        let none = ActivationError::NoConstructorFound {
            type_name: "app::Foo".to_string(),
        };
        let many = ActivationError::AmbiguousConstructor {
            type_name: "app::Foo".to_string(),
            count: 2,
        };

        assert!(none.to_string().contains("app::Foo"));
        assert!(many.to_string().contains("app::Foo"));
    }

    #[test]
    fn test_construction_failed_keeps_source() {
        let cause: BoxError = "constructor exploded".into();
        let error = ActivationError::ConstructionFailed {
            type_name: "app::Foo".to_string(),
            source: cause,
        };

        assert_eq!(error.to_string(), "Failed to create \"app::Foo\"");
        let source = error.source().expect("source should be kept");
        assert_eq!(source.to_string(), "constructor exploded");
    }
}
