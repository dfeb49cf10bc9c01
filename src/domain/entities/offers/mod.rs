//! 채용 공고 엔티티 (`offres_emploi` 컬렉션)
//!
//! 공고 상태는 `ouverte` / `fermée` 두 가지이며, 지원은 `ouverte` 상태이고
//! 마감일(`date_limite`)이 지나지 않은 공고에만 가능합니다.

pub mod offer;

pub use offer::*;
