//! Database entities.

#![allow(missing_docs)]

pub mod advertisement;
pub mod ban_record;
pub mod post;
pub mod user;

pub use advertisement::Entity as Advertisement;
pub use ban_record::Entity as BanRecord;
pub use post::Entity as Post;
pub use user::Entity as User;
