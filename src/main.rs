//! 블로그 서비스 메인 애플리케이션
//!
//! 엔티티 디스크립터를 미리 빌드하고, 메모리 저장소를 준비한 뒤
//! Actix-web HTTP 서버를 구동합니다.

use std::sync::Arc;

use actix_cors::Cors;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::http::header;
use actix_web::{middleware, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};

use blog_service_backend::config::{PasswordConfig, RateLimitConfig, SeedConfig, ServerConfig};
use blog_service_backend::core::errors::{AppResult, ErrorContext};
use blog_service_backend::core::registry::SchemaRegistry;
use blog_service_backend::db::Database;
use blog_service_backend::routes::configure_all_routes;
use blog_service_backend::services::Services;
use blog_service_backend::utils::display_terminal::{print_final_summary, print_step_complete, print_step_start};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // 환경 설정 및 로깅 초기화
    load_env_file();
    init_logging();

    info!("🚀 블로그 서비스 시작중...");

    let (database, descriptors, seeded) = bootstrap().map_err(|e| {
        error!("❌ 초기화 실패: {}", e);
        std::io::Error::other(e.to_string())
    })?;

    print_final_summary(descriptors, seeded);

    start_http_server(Services::new(database)).await
}

/// 디스크립터를 빌드하고 저장소를 준비합니다
///
/// # Returns
///
/// * `(Arc<Database>, usize, usize)` - 저장소, 빌드된 디스크립터 수, 적재된 레코드 수
///
/// # Errors
///
/// * `SchemaError` - 잘못 선언된 디스크립터 (부팅 중단)
fn bootstrap() -> AppResult<(Arc<Database>, usize, usize)> {
    let descriptors = SchemaRegistry::global().warm_up()?;

    print_step_start(2, "Preparing storage");
    let database = Arc::new(Database::new());
    let seeded = if SeedConfig::enabled() {
        let password_hash = bcrypt::hash(SeedConfig::demo_password(), PasswordConfig::bcrypt_cost())
            .context("데모 비밀번호 해싱 실패")?;
        database.seed_demo(&password_hash)?
    } else {
        0
    };
    print_step_complete(2, "Storage ready", seeded);

    Ok((database, descriptors, seeded))
}

/// HTTP 서버를 구성하고 실행합니다
///
/// Rate Limiting, CORS, 로깅, 경로 정규화 미들웨어를 포함합니다.
///
/// # Errors
///
/// * `std::io::Error` - 포트 바인딩 실패 또는 서버 실행 오류
async fn start_http_server(services: Services) -> std::io::Result<()> {
    let bind_address = ServerConfig::bind_address();

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);
    info!("📍 API: http://{}/api/v1", bind_address);

    let rate_limit_config = RateLimitConfig::from_env();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit_config.per_second)
        .burst_size(rate_limit_config.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| std::io::Error::other("잘못된 Rate Limiting 설정"))?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit_config.per_second, rate_limit_config.burst_size
    );

    HttpServer::new(move || {
        let services = services.clone();

        App::new()
            // Rate Limiting 미들웨어 (가장 먼저 적용)
            .wrap(Governor::new(&governor_conf))
            .wrap(configure_cors())
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(move |cfg| services.configure(cfg))
            .configure(configure_all_routes)
    })
    .bind(bind_address)?
    .workers(ServerConfig::workers())
    .run()
    .await
}

/// 환경별 설정 파일을 로드합니다
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    info!("Current profile: {}", profile);

    match profile.as_str() {
        "prod" => match dotenv::from_filename(".env.prod") {
            Ok(_) => info!(".env.prod 파일 로드 됨"),
            Err(e) => error!(".env.prod 파일 로드 실패: {}", e),
        },
        "dev" => match dotenv::from_filename(".env.dev") {
            Ok(_) => info!(".env.dev 파일 로드 됨"),
            Err(e) => error!(".env.dev 파일 로드 실패: {}", e),
        },
        _ => {
            dotenv().ok();
            info!("기본 .env 파일 로드");
        }
    }
}

/// 로깅 시스템을 초기화합니다
///
/// `RUST_LOG`가 없으면 "info,actix_web=info"를 사용합니다.
///
/// ```bash
/// # 프로젝션 강제와 검증 거부까지 보기
/// RUST_LOG=blog_service_backend=debug cargo run
/// ```
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=info"));
}

/// CORS 설정을 구성합니다
///
/// 로컬 프론트엔드 개발 서버와 자체 서버 Origin을 허용합니다.
fn configure_cors() -> Cors {
    Cors::default()
        .allowed_origin("http://localhost:3000")
        .allowed_origin("http://127.0.0.1:3000")
        .allowed_origin("http://localhost:8080")
        .allowed_origin("http://127.0.0.1:8080")
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::HeaderName::from_static("x-user-id"),
        ])
        .max_age(3600)
}
