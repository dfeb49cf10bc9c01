//! Users Entity Module
//!
//! 플랫폼 계정(`users` 컬렉션)과 역할을 정의합니다.
//!
//! ```rust,ignore
//! use crate::domain::entities::users::{User, UserRole};
//!
//! let user = User::new(
//!     "claire.martin@example.fr".to_string(),
//!     password_hash,
//!     "Martin".to_string(),
//!     "Claire".to_string(),
//!     None,
//!     UserRole::Recruteur,
//! );
//! ```

pub mod user;

pub use user::*;
