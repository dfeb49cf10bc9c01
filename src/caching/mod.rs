//! 캐싱 계층 모듈
//!
//! Redis를 백엔드로 하는 선택적 캐시와 JSON 기반 직렬화를 제공합니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use crate::caching::redis::RedisClient;
//!
//! let cache = match RedisClient::new().await {
//!     Ok(client) => client,
//!     Err(_) => RedisClient::disabled(),
//! };
//! cache.set_with_expiry("user_repository:65f0...", &user, 600).await?;
//! let cached: Option<User> = cache.get("user_repository:65f0...").await?;
//! ```
//!
//! # 환경 설정
//!
//! ```bash
//! REDIS_URL=redis://127.0.0.1:6379  # 기본값
//! REDIS_ENABLED=false               # 캐시 끄기
//! ```

pub mod redis;
