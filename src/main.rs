//! 커맨드 모듈 활성화 데모 애플리케이션
//!
//! 링크된 커맨드 모듈을 타입 카탈로그에서 검증하고, 의존성 풀을 구성한 뒤
//! 각 모듈을 생성해 실행합니다.

use std::error::Error;
use std::sync::Arc;

use dotenv::dotenv;
use env_logger::Env;
use log::{error, info, warn};

use command_activator::config::{CatalogConfig, LoggingConfig};
use command_activator::core::{
    BuilderCache, ConstructorInfo, DependencyMap, DependencyMapRef, Injectable, PropertyInfo,
    TypeCatalog, TypeDescriptor, TypeMap,
};
use command_activator::register_injectable;
use command_activator::utils::display_terminal::{
    print_boxed_title, print_final_summary, print_step_complete, print_step_start, print_sub_task,
};

/// 모든 모듈이 폴백으로 받는 오케스트레이션 서비스
struct CommandService {
    prefix: char,
}

trait Logger: Send + Sync {
    fn log(&self, message: &str);
}

struct ConsoleLogger;

impl Logger for ConsoleLogger {
    fn log(&self, message: &str) {
        info!("[module] {}", message);
    }
}

struct PingModule {
    service: Arc<CommandService>,
    logger: Arc<dyn Logger>,
    greeting: String,
}

impl PingModule {
    fn execute(&self) {
        self.logger
            .log(&format!("{}ping → pong ({})", self.service.prefix, self.greeting));
    }
}

impl Injectable for PingModule {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::of::<Self>()
            .constructor(
                ConstructorInfo::instance()
                    .param::<CommandService>("service")
                    .param::<Arc<dyn Logger>>("logger")
                    .invoke(|args| {
                        Ok(PingModule {
                            service: args.next()?,
                            logger: args.cloned()?,
                            greeting: "hello".to_string(),
                        })
                    }),
            )
            .property(PropertyInfo::new("greeting", |m: &mut PingModule, v: Arc<String>| {
                m.greeting = (*v).clone();
            }))
    }
}

register_injectable!(PingModule);

struct InfoModule {
    map: DependencyMapRef,
    logger: Option<Arc<dyn Logger>>,
}

impl InfoModule {
    fn execute(&self) {
        let message = match &self.map {
            Some(_) => "dependency map attached",
            None => "running without dependency map",
        };
        if let Some(logger) = &self.logger {
            logger.log(message);
        }
    }
}

impl Injectable for InfoModule {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::of::<Self>()
            .constructor(ConstructorInfo::type_initializer())
            .constructor(
                ConstructorInfo::instance()
                    .param::<DependencyMapRef>("map")
                    .invoke(|args| {
                        Ok(InfoModule {
                            map: args.cloned()?,
                            logger: None,
                        })
                    }),
            )
            .property(PropertyInfo::new("logger", |m: &mut InfoModule, v: Arc<Arc<dyn Logger>>| {
                m.logger = Some((*v).clone());
            }))
            .property(
                PropertyInfo::new("map", |m: &mut InfoModule, v: Arc<DependencyMapRef>| {
                    m.map = (*v).clone();
                })
                .dont_inject(),
            )
    }
}

register_injectable!(InfoModule);

fn main() -> Result<(), Box<dyn Error>> {
    load_env_file();
    init_logging();

    info!("🚀 커맨드 모듈 활성화 데모 시작중...");

    if CatalogConfig::warm_up() {
        warm_up_catalog();
    }

    let cache = BuilderCache::new(Arc::new(CommandService { prefix: '!' }));
    let map = build_dependency_map()?;

    let ping: PingModule = cache.create(Some(&map))?;
    ping.execute();

    let info_module: InfoModule = cache.create(Some(&map))?;
    info_module.execute();

    // 풀 없이 생성하면 PingModule의 Logger를 찾지 못함
    match cache.create::<PingModule>(None) {
        Ok(_) => warn!("PingModule was created without a dependency map"),
        Err(e) => info!("예상된 실패: {}", e),
    }

    info!("✅ {}개 빌더 캐시됨", cache.len());
    Ok(())
}

/// 등록된 모든 타입의 생성자 선택을 미리 검증합니다
fn warm_up_catalog() {
    print_boxed_title("🔄 WARMING UP TYPE CATALOG");
    print_step_start(1, "Validating registered types");

    let registrations = TypeCatalog::registrations();
    let mut failed = 0;

    for registration in &registrations {
        match registration.validate() {
            Ok(summary) => print_sub_task(
                registration.short_name(),
                &format!(
                    "✓ {} parameters, {} properties",
                    summary.parameters, summary.injectable_properties
                ),
            ),
            Err(e) => {
                failed += 1;
                error!("타입 검증 실패: {}", e);
                print_sub_task(registration.short_name(), "✗ Invalid");
            }
        }
    }

    print_step_complete(1, "Registered types validated", registrations.len());
    print_final_summary(registrations.len() - failed, failed);
}

/// 데모 모듈이 사용할 의존성 풀을 구성합니다
fn build_dependency_map() -> Result<Arc<dyn DependencyMap>, Box<dyn Error>> {
    let mut map = TypeMap::new();
    map.add::<Arc<dyn Logger>>(Arc::new(ConsoleLogger))?;
    map.add(std::env::var("GREETING").unwrap_or_else(|_| "안녕하세요".to_string()))?;

    info!("📦 의존성 풀 구성 완료: {:?}", map);
    Ok(map.into_shared())
}

/// 환경별 설정 파일을 로드합니다
///
/// # Environment Variables
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    // 로거 초기화 전이므로 결과는 stderr로 직접 출력
    let loaded = match profile.as_str() {
        "prod" => dotenv::from_filename(".env.prod").map(|_| ".env.prod"),
        "dev" => dotenv::from_filename(".env.dev").map(|_| ".env.dev"),
        _ => dotenv().map(|_| ".env"),
    };

    match loaded {
        Ok(file) => eprintln!("Current profile: {} ({} 로드 됨)", profile, file),
        Err(e) => eprintln!("Current profile: {} (설정 파일 로드 실패: {})", profile, e),
    }
}

/// `RUST_LOG`가 없으면 실행 환경별 기본 필터로 로깅을 초기화합니다
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or(LoggingConfig::default_filter()));
}
