//! # Posts Core
//!
//! The domain layer of the Posts API.
//! This crate contains the post model, its validation rules, the ports that
//! infrastructure implements and the service that drives them. It has no
//! infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use error::{DomainError, RepoError, ValidationErrors};
pub use service::PostService;
