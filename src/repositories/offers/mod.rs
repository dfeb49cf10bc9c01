//! 채용 공고 리포지토리

pub mod offer_repo;

pub use offer_repo::OfferRepository;
