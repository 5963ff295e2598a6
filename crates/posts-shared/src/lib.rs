//! # Posts Shared
//!
//! Wire types for the Posts API, shared by the server and any Rust client.

pub mod dto;
pub mod response;

pub use response::{DataEnvelope, ErrorResponse};
