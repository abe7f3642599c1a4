//! # seller-core
//!
//! Core types used across AI-Seller RS:
//! - [`error`]: the store error with its closed set of kinds and context trace
//! - [`context`]: the cancellation-bearing request context
//! - [`traits`]: entity traits and the identifier type
//! - [`config`]: environment-driven configuration

pub mod config;
pub mod context;
pub mod error;
pub mod traits;

pub use context::RequestContext;
pub use error::{ErrorContext, ErrorKind, Stage, StoreError, StoreResult};
pub use traits::*;
