//! 지원서 엔티티 (`candidatures` 컬렉션)
//!
//! `(offre_id, candidat_id)` 쌍은 고유 인덱스로 보호되어, 같은 지원자가
//! 같은 공고에 두 번 지원할 수 없습니다.

pub mod application;

pub use application::*;
