//! # seller-usecases
//!
//! The use-case facade. [`UseCase`] holds one handle per repository and exposes
//! every repository operation as its own capability, adding its frame to any error
//! on the way out. There is no business logic here yet; the facade exists so that
//! transports depend on [`seller_contracts::UseCases`] and never on the store.

use std::sync::Arc;

use seller_contracts::{AuthRepo, IntegrationRepo, ProductRepo, Storage};

mod auth;
mod integration;
mod product;

/// Facade over the auth, integration and product repositories
#[derive(Clone)]
pub struct UseCase {
    auth: Arc<dyn AuthRepo>,
    integration: Arc<dyn IntegrationRepo>,
    product: Arc<dyn ProductRepo>,
}

impl UseCase {
    pub fn new(
        auth: Arc<dyn AuthRepo>,
        integration: Arc<dyn IntegrationRepo>,
        product: Arc<dyn ProductRepo>,
    ) -> Self {
        Self {
            auth,
            integration,
            product,
        }
    }

    /// Take every repository from one storage backend.
    pub fn from_storage(storage: &dyn Storage) -> Self {
        Self::new(
            storage.auth_repo(),
            storage.integration_repo(),
            storage.product_repo(),
        )
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use seller_contracts::mock::{MockAuthRepo, MockIntegrationRepo, MockProductRepo};

    /// A facade whose repositories are the given doubles
    pub fn use_case(
        auth: MockAuthRepo,
        integration: MockIntegrationRepo,
        product: MockProductRepo,
    ) -> UseCase {
        UseCase::new(Arc::new(auth), Arc::new(integration), Arc::new(product))
    }
}
