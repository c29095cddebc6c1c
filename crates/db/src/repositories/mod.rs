//! Database repositories.

#![allow(missing_docs)]

pub mod advertisement;
pub mod ban_record;
pub mod post;
pub mod user;

pub use advertisement::AdvertisementRepository;
pub use ban_record::BanRecordRepository;
pub use post::PostRepository;
pub use user::UserRepository;
