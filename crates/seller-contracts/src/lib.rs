//! # seller-contracts
//!
//! Capability contracts for AI-Seller RS.
//!
//! - [`repo`]: what the use-case facade needs from storage
//! - [`usecase`]: what the HTTP boundary needs from the facade
//!
//! The traits exist so either side can be replaced by a test double. With the `mock`
//! feature, `Mock*` doubles are generated for every contract.

pub mod repo;
pub mod usecase;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use repo::{AuthRepo, IntegrationRepo, ProductRepo, Storage};
pub use usecase::{AuthUseCases, IntegrationUseCases, ProductUseCases, UseCases};
