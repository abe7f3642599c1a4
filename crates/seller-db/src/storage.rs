//! PostgreSQL-backed [`Storage`]

use std::sync::Arc;

use seller_contracts::{AuthRepo, IntegrationRepo, ProductRepo, Storage};

use crate::auth::AuthRepository;
use crate::integration::IntegrationRepository;
use crate::pool::Database;
use crate::product::ProductRepository;

/// All repositories over one shared pool
#[derive(Clone)]
pub struct PgStorage {
    auth: Arc<AuthRepository>,
    integration: Arc<IntegrationRepository>,
    product: Arc<ProductRepository>,
}

impl PgStorage {
    pub fn new(db: &Database) -> Self {
        let pool = db.pool();
        Self {
            auth: Arc::new(AuthRepository::new(pool.clone())),
            integration: Arc::new(IntegrationRepository::new(pool.clone())),
            product: Arc::new(ProductRepository::new(pool.clone())),
        }
    }
}

impl Storage for PgStorage {
    fn auth_repo(&self) -> Arc<dyn AuthRepo> {
        self.auth.clone()
    }

    fn integration_repo(&self) -> Arc<dyn IntegrationRepo> {
        self.integration.clone()
    }

    fn product_repo(&self) -> Arc<dyn ProductRepo> {
        self.product.clone()
    }
}
