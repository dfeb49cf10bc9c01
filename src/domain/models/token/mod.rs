//! JWT 클레임과 발급 토큰 쌍

pub mod token;

pub use token::*;
