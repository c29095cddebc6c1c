//! Core business logic for newsdesk.
//!
//! The moderation & ranking pipeline: privilege hierarchy, ban ledger, post
//! lifecycle, weighted advertisement selection and derived statistics. The
//! chat transport and command parsing live outside this crate; everything
//! here is plain services over the repository layer.

pub mod services;

pub use services::*;
