//! # Configuration Module
//!
//! 활성화 라이브러리와 데모 바이너리의 설정을 담당하는 모듈입니다.
//! 모든 설정은 환경 변수에서 읽으며, 바이너리는 `.env` 파일을 먼저 로드합니다.
//!
//! ## 모듈 구성
//!
//! - [`activator_config`] - 실행 환경, 로깅, 카탈로그 워밍업 설정
//!
//! ## 환경 변수
//!
//! ```bash
//! # 실행 환경 (development, test, staging, production)
//! export ENVIRONMENT="development"
//!
//! # 로그 필터 (설정 시 환경별 기본값보다 우선)
//! export RUST_LOG="command_activator=trace"
//!
//! # 시작 시 등록된 모든 타입의 생성자를 미리 검증할지 여부
//! export ACTIVATOR_WARM_UP="true"
//! ```

pub mod activator_config;

pub use activator_config::*;
