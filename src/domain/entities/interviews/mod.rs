//! 면접 엔티티 (`entretiens`, `enregistrements` 컬렉션)
//!
//! 면접은 지원서 하나에 대해 채용 담당자가 잡고, 녹화 영상이 올라오면
//! `terminé` 상태가 됩니다.

pub mod interview;
pub mod recording;

pub use interview::*;
pub use recording::*;
