//! 딜플로우 백엔드 메인 애플리케이션
//!
//! Actix-web 서버를 구동하고 레지스트리, 인덱스, 외부 클라이언트를 초기화합니다.

use std::sync::Arc;
use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{middleware, App, HttpServer};
use actix_governor::{Governor, GovernorConfigBuilder};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info, warn};
use dealflow_backend::caching::redis::RedisClient;
use dealflow_backend::clients::{CalendarClient, ScoringClient};
use dealflow_backend::config::ServerConfig;
use dealflow_backend::core::errors::AppError;
use dealflow_backend::core::registry::ServiceLocator;
use dealflow_backend::db::Database;
use dealflow_backend::repositories::deals::{DealRepository, InvestmentRepository};
use dealflow_backend::repositories::grants::{GrantApplicationRepository, GrantRepository};
use dealflow_backend::repositories::matching::{ActivityRepository, MatchRepository};
use dealflow_backend::repositories::notifications::NotificationRepository;
use dealflow_backend::repositories::performance::ValuationRepository;
use dealflow_backend::repositories::profiles::{FounderRepository, InvestorRepository};
use dealflow_backend::repositories::users::UserRepository;
use dealflow_backend::routes::configure_all_routes;
use dealflow_backend::utils::display_terminal::{print_banner, print_index_report};

#[derive(Debug)]
struct RateLimitConfig {
    per_second: u64,
    burst_size: u32,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    load_env_file();
    init_logging();

    info!("🚀 딜플로우 백엔드 시작중...");

    let (database, redis_client) = initialize_data_stores().await;

    ServiceLocator::set(database);
    ServiceLocator::set(redis_client);
    ServiceLocator::set(Arc::new(ScoringClient::from_env()));
    ServiceLocator::set(Arc::new(CalendarClient::from_env()));

    ServiceLocator::initialize_all()
        .await
        .expect("서비스 초기화 실패");

    ensure_indexes().await;

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    start_http_server().await
}

/// HTTP 서버 구성 및 실행
///
/// 바인드 주소와 워커 수는 `HOST`, `PORT`, `WORKERS`에서 읽습니다.
async fn start_http_server() -> std::io::Result<()> {
    let bind_address = ServerConfig::bind_address();

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);

    let rate_limit_config = load_rate_limit_config();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit_config.per_second)
        .burst_size(rate_limit_config.burst_size)
        .use_headers()
        .finish()
        .expect("Rate Limiting 설정 생성 실패");

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit_config.per_second,
        rate_limit_config.burst_size
    );

    HttpServer::new(move || {
        let cors = configure_cors();

        App::new()
            // Rate Limiting 미들웨어 (가장 먼저 적용)
            .wrap(Governor::new(&governor_conf))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(configure_all_routes)
    })
        .bind(bind_address)?
        .workers(ServerConfig::workers())
        .run()
        .await
}

/// `PROFILE`에 따라 `.env.prod` / `.env.dev` / `.env` 로드
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

/// `RUST_LOG` 기반 로깅 초기화 (기본값 `info,actix_web=debug`)
///
/// ```bash
/// RUST_LOG=dealflow_backend::services=debug cargo run
/// ```
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=debug"));
}

/// MongoDB와 Redis 연결 초기화
///
/// # Panics
///
/// 어느 한쪽이라도 연결에 실패하면 기동을 중단합니다.
async fn initialize_data_stores() -> (Arc<Database>, Arc<RedisClient>) {
    info!("📡 데이터베이스 연결 중...");

    let database = Arc::new(
        Database::new()
            .await
            .expect("데이터베이스 연결 실패")
    );

    let redis_client = Arc::new(
        RedisClient::new()
            .await
            .expect("Redis 연결 실패")
    );

    info!("✅ Redis 연결 성공");

    (database, redis_client)
}

/// 모든 컬렉션의 인덱스 생성
///
/// 인덱스 생성 실패는 기동을 막지 않고 경고만 남깁니다.
async fn ensure_indexes() {
    print_banner("PREPARING INDEXES");

    report("users", UserRepository::instance().create_indexes().await);
    report("founders", FounderRepository::instance().create_indexes().await);
    report("investors", InvestorRepository::instance().create_indexes().await);
    report("deals", DealRepository::instance().create_indexes().await);
    report("investments", InvestmentRepository::instance().create_indexes().await);
    report("matches", MatchRepository::instance().create_indexes().await);
    report("activities", ActivityRepository::instance().create_indexes().await);
    report("notifications", NotificationRepository::instance().create_indexes().await);
    report("portfolio_valuations", ValuationRepository::instance().create_indexes().await);
    report("grants", GrantRepository::instance().create_indexes().await);
    report("grant_applications", GrantApplicationRepository::instance().create_indexes().await);
}

fn report(collection: &str, result: Result<(), AppError>) {
    if let Err(e) = &result {
        warn!("{} 인덱스 생성 실패: {}", collection, e);
    }
    print_index_report(collection, result.is_ok());
}

/// 프론트엔드 개발 서버와 자체 서버 Origin만 허용하는 CORS 설정
fn configure_cors() -> Cors {
    Cors::default()
        .allowed_origin("http://localhost:3000")
        .allowed_origin("http://127.0.0.1:3000")
        .allowed_origin("http://localhost:8080")
        .allowed_origin("http://127.0.0.1:8080")
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "PATCH", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            header::ACCESS_CONTROL_REQUEST_METHOD,
        ])
        .supports_credentials()
        .max_age(3600)
}

/// `RATE_LIMIT_PER_SECOND`(기본 100), `RATE_LIMIT_BURST_SIZE`(기본 200) 로드
fn load_rate_limit_config() -> RateLimitConfig {
    let per_second = std::env::var("RATE_LIMIT_PER_SECOND")
        .unwrap_or_else(|_| "100".to_string())
        .parse::<u64>()
        .unwrap_or_else(|e| {
            error!("RATE_LIMIT_PER_SECOND 파싱 실패: {}. 기본값 100 사용", e);
            100
        });

    let burst_size = std::env::var("RATE_LIMIT_BURST_SIZE")
        .unwrap_or_else(|_| "200".to_string())
        .parse::<u32>()
        .unwrap_or_else(|e| {
            error!("RATE_LIMIT_BURST_SIZE 파싱 실패: {}. 기본값 200 사용", e);
            200
        });

    let config = RateLimitConfig {
        per_second,
        burst_size,
    };

    info!("Rate Limiting 설정 로드됨: {:?}", config);
    config
}
