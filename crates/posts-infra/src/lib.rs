//! # Posts Infrastructure
//!
//! Concrete implementations of the ports defined in `posts-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external services, in-memory storage only
//! - `postgres` - PostgreSQL storage via SeaORM

pub mod auth;
pub mod database;

pub use auth::{JwtConfig, JwtTokenService};
pub use database::{DatabaseConfig, InMemoryPostRepository};

#[cfg(feature = "postgres")]
pub use database::PostgresPostRepository;
