//! # Core Activation Module
//!
//! 커맨드 모듈 같은 타입을 의존성 풀로부터 생성하는 핵심 기능을 제공하는 모듈입니다.
//! 런타임 리플렉션 대신 명시적으로 등록한 메타데이터를 사용하며,
//! 생성자 주입과 프로퍼티 주입을 하나의 파이프라인으로 처리합니다.
//!
//! ## 모듈 구성
//!
//! ### [`type_info`] - 타입 메타데이터
//! - **TypeDescriptor**: 생성자/프로퍼티 목록과 진단용 전체 이름
//! - **ConstructorInfo / PropertyInfo**: 타입이 소거된 생성자와 setter
//! - **TypeIdentity**: `TypeId` 기반 정확한 타입 매칭
//!
//! ### [`dependency_map`] - 의존성 풀
//! - **DependencyMap**: `try_get` 읽기 전용 계약
//! - **TypeMap**: `HashMap` 기반 기본 구현 (값, 팩토리)
//!
//! ### [`reflection`] - 생성 파이프라인
//! - **create_object**: 한 번만 생성
//! - **create_builder**: 재사용 가능한 [`ObjectBuilder`] 생성
//!
//! ### [`registry`] - 등록과 캐시
//! - **TypeCatalog**: `inventory` 기반 링크 타임 타입 등록
//! - **BuilderCache**: 타입당 빌더 하나만 유지
//!
//! ### [`errors`] - 에러 처리
//! - **ActivationError**: `thiserror` 기반 생성 실패 분류
//!
//! ## 해결 규칙
//!
//! 파라미터와 프로퍼티는 모두 같은 순서로 값을 찾습니다.
//!
//! | 순서 | 출처 | 조건 |
//! |------|------|------|
//! | 1 | 의존성 풀 | 풀이 있고 선언 타입으로 값이 등록됨 |
//! | 2 | 서비스 폴백 | 선언 타입이 서비스 타입 `S` |
//! | 3 | 풀 참조 폴백 | 선언 타입이 `DependencyMapRef` (풀이 없으면 `None`) |
//! | - | 실패 | `ActivationError::DependencyNotFound` |
//!
//! ## 트러블슈팅
//!
//! ### 생성자 선택 실패
//! ```text
//! No constructor found for "app::modules::PingModule"
//! Multiple constructors found for "app::modules::PingModule"
//! ```
//! **해결**: `TypeDescriptor`에 인스턴스 생성자를 정확히 하나만 선언
//!
//! ### 의존성 누락
//! ```text
//! Failed to create "app::modules::PingModule", dependency "alloc::sync::Arc<dyn app::Logger>" was not found.
//! ```
//! **해결**: 풀에 해당 타입을 `TypeMap::add`로 등록하거나 프로퍼티에 `dont_inject()` 지정

pub mod dependency_map;
pub mod errors;
pub mod reflection;
pub mod registry;
pub mod type_info;

pub use dependency_map::*;
pub use errors::*;
pub use reflection::*;
pub use registry::*;
pub use type_info::*;
