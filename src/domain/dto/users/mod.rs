//! 계정/인증 API DTO (`/api/auth`, `/api/admin`)

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
