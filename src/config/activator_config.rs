//! 실행 환경 및 활성화 설정 관리 모듈

use std::env;

/// 애플리케이션 실행 환경
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    /// 개발 환경 - 상세 로그
    Development,
    /// 테스트 환경 - 경고 이상만 출력
    Test,
    /// 스테이징 환경 - 프로덕션 유사 환경
    Staging,
    /// 프로덕션 환경
    Production,
}

impl Environment {
    /// 현재 실행 환경을 감지합니다.
    ///
    /// `ENVIRONMENT` 환경 변수를 확인하며, 설정되지 않은 경우 `Production`을 사용합니다.
    pub fn current() -> Self {
        env::var("ENVIRONMENT")
            .map(|name| Self::from_name(&name))
            .unwrap_or(Environment::Production)
    }

    /// 환경 이름(대소문자 무관)에서 Environment를 만듭니다.
    /// 알 수 없는 값은 `Production`입니다.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }
}

/// 로깅 설정
pub struct LoggingConfig;

impl LoggingConfig {
    /// `RUST_LOG`가 없을 때 사용할 기본 필터
    pub fn default_filter() -> &'static str {
        Self::default_filter_for_env(&Environment::current())
    }

    /// 환경별 기본 로그 필터
    ///
    /// - Development: `debug`
    /// - Test: `warn`
    /// - Staging/Production: `info`
    pub fn default_filter_for_env(env: &Environment) -> &'static str {
        match env {
            Environment::Development => "debug",
            Environment::Test => "warn",
            Environment::Staging | Environment::Production => "info",
        }
    }
}

/// 타입 카탈로그 설정
pub struct CatalogConfig;

impl CatalogConfig {
    /// 시작 시 등록된 모든 타입을 미리 검증할지 여부
    ///
    /// # Environment Variables
    ///
    /// - `ACTIVATOR_WARM_UP`: `true`/`false` (`1`/`0`, `yes`/`no`도 허용)
    ///
    /// 값이 없거나 해석할 수 없으면 환경별 기본값을 사용합니다.
    pub fn warm_up() -> bool {
        env::var("ACTIVATOR_WARM_UP")
            .ok()
            .and_then(|value| parse_flag(&value))
            .unwrap_or_else(|| Self::warm_up_for_env(&Environment::current()))
    }

    /// 환경별 워밍업 기본값
    ///
    /// 프로덕션에서는 잘못된 메타데이터를 시작 시점에 발견하도록 켜 둡니다.
    pub fn warm_up_for_env(env: &Environment) -> bool {
        !matches!(env, Environment::Test)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_from_name() {
        assert_eq!(Environment::from_name("development"), Environment::Development);
        assert_eq!(Environment::from_name(" DEV "), Environment::Development);
        assert_eq!(Environment::from_name("test"), Environment::Test);
        assert_eq!(Environment::from_name("stage"), Environment::Staging);
        assert_eq!(Environment::from_name("unknown"), Environment::Production);
    }

    #[test]
    fn test_default_filter_for_each_environment() {
        assert_eq!(LoggingConfig::default_filter_for_env(&Environment::Development), "debug");
        assert_eq!(LoggingConfig::default_filter_for_env(&Environment::Test), "warn");
        assert_eq!(LoggingConfig::default_filter_for_env(&Environment::Staging), "info");
        assert_eq!(LoggingConfig::default_filter_for_env(&Environment::Production), "info");
    }

    #[test]
    fn test_warm_up_defaults() {
        assert!(CatalogConfig::warm_up_for_env(&Environment::Production));
        assert!(CatalogConfig::warm_up_for_env(&Environment::Development));
        assert!(!CatalogConfig::warm_up_for_env(&Environment::Test));
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
