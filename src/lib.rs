//! 커맨드 모듈 활성화 라이브러리
//!
//! 등록된 타입 메타데이터와 의존성 풀로부터 커맨드 모듈 인스턴스를 생성합니다.
//! 생성자 주입, 프로퍼티 주입, 그리고 두 가지 고정 폴백(서비스, 풀 참조)을 지원하며,
//! 해결할 수 없는 경우 대상 타입 이름을 포함한 에러로 즉시 실패합니다.
//!
//! # Features
//!
//! - **생성자 주입**: 인스턴스 생성자가 정확히 하나인 타입만 생성
//! - **프로퍼티 주입**: public setter를 가진 프로퍼티 자동 주입, `dont_inject()`로 제외
//! - **재사용 빌더**: 메타데이터 분석은 한 번, 생성은 풀만 바꿔 반복
//! - **타입 카탈로그**: `inventory` 기반 링크 타임 등록
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  TypeCatalog    │ ← register_injectable! 로 수집된 메타데이터
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  BuilderCache   │ ← 타입당 ObjectBuilder 하나
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  ObjectBuilder  │ ← 생성자 → 파라미터 → 호출 → 프로퍼티
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  DependencyMap  │ ← 호출자가 소유한 의존성 풀
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use command_activator::core::{BuilderCache, TypeMap};
//!
//! let cache = BuilderCache::new(Arc::new(CommandService::new()));
//!
//! let mut map = TypeMap::new();
//! map.add::<Arc<dyn Logger>>(Arc::new(ConsoleLogger))?;
//! let map = map.into_shared();
//!
//! let module: PingModule = cache.create(Some(&map))?;
//! ```

pub mod core;
pub mod config;
pub mod utils;

#[doc(hidden)]
pub use inventory;
