//! # Configuration Module
//!
//! 환경 변수 기반 설정값을 타입이 있는 접근자로 중앙 관리합니다.
//! `main`에서 `PROFILE` 값에 따라 `.env`, `.env.dev`, `.env.prod` 중 하나를
//! `dotenv`로 먼저 읽어 들입니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 실행 환경, 서버, MongoDB, Redis, CORS, 요청 제한, 업로드 저장소
//! - [`auth_config`] - JWT 서명 키와 토큰 수명
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! # 서버
//! export HOST="0.0.0.0"
//! export PORT="8080"
//! export WORKERS="4"
//!
//! # 데이터베이스 / 캐시
//! export MONGODB_URI="mongodb://localhost:27017"
//! export DATABASE_NAME="recrutement"
//! export REDIS_URL="redis://127.0.0.1:6379"
//! export REDIS_ENABLED="true"
//!
//! # 업로드
//! export STORAGE_BACKEND="local"      # local | azure
//! export UPLOAD_DIR="Uploads"
//! export MAX_CV_SIZE_MB="5"
//! export MAX_VIDEO_SIZE_MB="200"
//! export AZURE_BLOB_CONTAINER_URL="https://account.blob.core.windows.net/uploads"
//! export AZURE_BLOB_SAS_TOKEN="sv=...&sig=..."
//!
//! # 보안
//! export JWT_SECRET="your-super-secret-key"
//! export BCRYPT_COST="12"
//! export CORS_ALLOWED_ORIGINS="https://recrutement.example.fr"
//! export RATE_LIMIT_PER_SECOND="100"
//! export RATE_LIMIT_BURST_SIZE="200"
//! ```

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;
