pub mod auth_request;
pub mod admin_request;

pub use auth_request::*;
pub use admin_request::*;
