//! 회사 엔티티 (`entreprises` 컬렉션)

pub mod company;

pub use company::*;
