//! 채용 플랫폼 백엔드 메인 애플리케이션
//!
//! 환경 설정을 읽고 MongoDB, Redis, 업로드 저장소를 `ServiceLocator`에 등록한 뒤
//! 리포지토리/서비스 싱글톤과 인덱스를 준비하고 HTTP 서버를 띄웁니다.

use std::io;
use std::sync::Arc;
use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{middleware, web, App, HttpServer};
use actix_governor::{Governor, GovernorConfigBuilder};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info, warn};
use recrutement_backend::caching::redis::RedisClient;
use recrutement_backend::config::{CacheConfig, CorsConfig, JwtConfig, RateLimitConfig, ServerConfig};
use recrutement_backend::core::errors::AppError;
use recrutement_backend::core::registry::ServiceLocator;
use recrutement_backend::db::Database;
use recrutement_backend::repositories::create_all_indexes;
use recrutement_backend::routes::configure_all_routes;
use recrutement_backend::storage::UploadStore;
use recrutement_backend::utils::display_terminal::print_server_banner;

/// JSON 본문 최대 크기 (multipart 업로드는 별도 제한)
const JSON_LIMIT_BYTES: usize = 256 * 1024;

#[actix_web::main]
async fn main() -> io::Result<()> {
    load_env_file();
    init_logging();

    info!("🚀 Démarrage du backend de recrutement...");

    JwtConfig::ensure_secret_configured().map_err(io::Error::other)?;

    let (database, redis_client) = initialize_data_stores().await?;
    let upload_store = UploadStore::from_config().map_err(|e| io::Error::other(e.to_string()))?;
    let storage_backend = upload_store.backend().as_str();
    let cache_enabled = redis_client.is_enabled();

    ServiceLocator::set(database);
    ServiceLocator::set(redis_client);
    ServiceLocator::set(Arc::new(upload_store));

    ServiceLocator::initialize_all()
        .await
        .map_err(|e| io::Error::other(format!("Initialisation des services impossible: {}", e)))?;

    create_all_indexes()
        .await
        .map_err(|e| io::Error::other(format!("Création des index impossible: {}", e)))?;

    info!("✅ Services et index prêts");

    start_http_server(storage_backend, cache_enabled).await
}

/// HTTP 서버를 구성하고 실행합니다
///
/// 요청 제한, CORS, 접근 로그, 경로 정규화 미들웨어를 적용합니다.
async fn start_http_server(storage_backend: &str, cache_enabled: bool) -> io::Result<()> {
    let bind_address = ServerConfig::bind_address();

    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(RateLimitConfig::per_second())
        .burst_size(RateLimitConfig::burst_size())
        .use_headers()
        .finish()
        .ok_or_else(|| io::Error::other("Configuration du rate limiting invalide"))?;

    info!(
        "🛡️ Rate limiting: {} req/s, burst {}",
        RateLimitConfig::per_second(),
        RateLimitConfig::burst_size()
    );

    print_server_banner(&bind_address, storage_backend, cache_enabled);

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(Governor::new(&governor_conf))
            .wrap(configure_cors())
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .app_data(
                web::JsonConfig::default()
                    .limit(JSON_LIMIT_BYTES)
                    .error_handler(|err, _req| AppError::ValidationError(format!("JSON invalide: {}", err)).into()),
            )
            .app_data(
                web::QueryConfig::default()
                    .error_handler(|err, _req| AppError::ValidationError(format!("Paramètres invalides: {}", err)).into()),
            )
            .configure(configure_all_routes)
    })
        .bind(&bind_address)?;

    if let Some(workers) = ServerConfig::workers() {
        server = server.workers(workers);
    }

    server.run().await
}

/// 환경별 설정 파일을 로드합니다
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    // 로거 초기화 전이므로 stderr로 남김
    match profile.as_str() {
        "prod" => if let Err(e) = dotenv::from_filename(".env.prod") {
            eprintln!(".env.prod introuvable: {}", e);
        },
        "dev" => if dotenv::from_filename(".env.dev").is_err() {
            dotenv().ok();
        },
        _ => {
            dotenv().ok();
        }
    }
}

/// `RUST_LOG` 기본값: "info,actix_web=info"
///
/// ```bash
/// RUST_LOG=recrutement_backend::services=debug cargo run
/// ```
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=info"));
}

/// MongoDB와 Redis 연결을 초기화합니다
///
/// MongoDB 연결 실패는 기동 실패입니다. Redis는 꺼져 있거나 연결할 수 없으면
/// 캐시 없이 동작합니다.
async fn initialize_data_stores() -> io::Result<(Arc<Database>, Arc<RedisClient>)> {
    info!("📡 Connexion à MongoDB...");

    let database = Database::new().await.map_err(|e| {
        error!("❌ Connexion MongoDB impossible: {}", e);
        io::Error::other(e.to_string())
    })?;

    let redis_client = if CacheConfig::enabled() {
        match RedisClient::new().await {
            Ok(client) => client,
            Err(e) => {
                warn!("⚠️ Redis indisponible ({}), cache désactivé", e);
                RedisClient::disabled()
            }
        }
    } else {
        info!("Redis désactivé (REDIS_ENABLED=false)");
        RedisClient::disabled()
    };

    Ok((Arc::new(database), Arc::new(redis_client)))
}

/// `CORS_ALLOWED_ORIGINS` 기반 CORS 설정
fn configure_cors() -> Cors {
    CorsConfig::allowed_origins()
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .expose_headers(vec![header::CONTENT_DISPOSITION])
        .supports_credentials()
        .max_age(CorsConfig::max_age())
}
