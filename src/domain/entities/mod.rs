//! # Domain Entities Module
//!
//! MongoDB 문서와 1:1로 대응하는 영속 엔티티들입니다.
//!
//! | 엔티티 | 컬렉션 |
//! |--------|--------|
//! | [`User`] | `users` |
//! | [`CandidateProfile`] | `candidats` |
//! | [`Company`] | `entreprises` |
//! | [`JobOffer`] | `offres_emploi` |
//! | [`Application`] | `candidatures` |
//! | [`Interview`] | `entretiens` |
//! | [`Recording`] | `enregistrements` |
//! | [`AuthEvent`] | `auth_logs` |
//! | [`RevokedToken`] | `token_blacklist` |
//!
//! ## 공통 규칙
//!
//! - `_id`는 `Option<ObjectId>`이며 삽입 전에는 `None`입니다.
//! - 다른 문서 참조는 `ObjectId`로 저장하고, 존재 여부는 서비스에서 확인합니다.
//! - 시각은 BSON `DateTime`으로 저장하고 응답 DTO에서 RFC 3339로 바꿉니다.
//! - 상태 값은 저장 형식 그대로(`ouverte`, `Accepté`, `planifié` ...) 직렬화됩니다.
//!
//! ```rust,ignore
//! use crate::domain::entities::{JobOffer, OfferStatus};
//!
//! let open = offer_repo.find_by_id(&offre_id).await?
//!     .filter(|offer| offer.statut == OfferStatus::Ouverte);
//! ```

pub mod users;
pub mod candidates;
pub mod companies;
pub mod offers;
pub mod applications;
pub mod interviews;
pub mod security;
pub mod files;

pub use users::*;
pub use candidates::*;
pub use companies::*;
pub use offers::*;
pub use applications::*;
pub use interviews::*;
pub use security::*;
pub use files::*;
