//! # Rongdhonu Core
//!
//! The domain layer of the blog backend.
//! This crate contains the post model, its publish lifecycle and the ports
//! that infrastructure implements. It has zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;

pub use error::{DomainError, RepoError};
