//! 지원자 프로필 엔티티 (`candidats` 컬렉션)

pub mod profile;

pub use profile::*;
