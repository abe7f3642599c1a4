//! # seller-db
//!
//! PostgreSQL storage for AI-Seller RS, built on SQLx:
//!
//! - Connection pool management
//! - One repository per aggregate, implementing the `seller-contracts` traits
//! - Mapping of SQLx failures onto [`seller_core::ErrorKind`]
//! - Embedded schema migrations
//!
//! ## Example
//!
//! ```ignore
//! use seller_contracts::ProductRepo;
//! use seller_core::RequestContext;
//! use seller_db::{Database, DatabaseConfig, ProductRepository};
//!
//! let db = Database::connect(&DatabaseConfig::with_url(url)).await?;
//! let repo = ProductRepository::new(db.pool().clone());
//! let product = repo.get_product(&RequestContext::new(), "p1").await?;
//! ```

pub mod auth;
mod error;
mod executor;
pub mod integration;
pub mod migrate;
pub mod pool;
pub mod product;
pub mod storage;

pub use auth::AuthRepository;
pub use integration::IntegrationRepository;
pub use migrate::{migrate, migrate_with_retry, MigrationError, MigrationOutcome, MIGRATOR};
pub use pool::{Database, DatabaseConfig, PoolStats};
pub use product::ProductRepository;
pub use storage::PgStorage;
