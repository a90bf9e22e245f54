//! # Rongdhonu Infrastructure
//!
//! Concrete implementations of the ports defined in `rongdhonu-core`.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL post storage via SeaORM
//! - `minimal` - No external store, in-memory only

pub mod auth;
pub mod database;

pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
pub use database::{DatabaseConfig, InMemoryPostRepository};

#[cfg(feature = "postgres")]
pub use database::{PostgresPostRepository, connect};
