//! Test doubles
//!
//! The repository and use-case contracts get `Mock*` doubles from `automock`. Since
//! [`UseCases`](crate::UseCases) spans three traits, [`MockUseCases`] is declared here so a
//! single value can stand in for the whole facade.

use async_trait::async_trait;
use mockall::mock;
use seller_core::{RequestContext, StoreResult};
use seller_models::{
    Attribute, Category, ClientType, Integration, Order, OrderProducts, Product, Role, User,
};

use crate::usecase::{AuthUseCases, IntegrationUseCases, ProductUseCases};

pub use crate::repo::{MockAuthRepo, MockIntegrationRepo, MockProductRepo};
pub use crate::usecase::{MockAuthUseCases, MockIntegrationUseCases, MockProductUseCases};

mock! {
    pub UseCases {}

    #[async_trait]
    impl AuthUseCases for UseCases {
        async fn create_user(&self, ctx: &RequestContext, user: &mut User) -> StoreResult<()>;
        async fn get_user(&self, ctx: &RequestContext, id: &str) -> StoreResult<User>;
        async fn update_user(&self, ctx: &RequestContext, user: &mut User) -> StoreResult<()>;
        async fn delete_user(&self, ctx: &RequestContext, id: &str) -> StoreResult<()>;
        async fn create_role(&self, ctx: &RequestContext, role: &mut Role) -> StoreResult<()>;
        async fn get_role(&self, ctx: &RequestContext, id: &str) -> StoreResult<Role>;
        async fn update_role(&self, ctx: &RequestContext, role: &mut Role) -> StoreResult<()>;
        async fn delete_role(&self, ctx: &RequestContext, id: &str) -> StoreResult<()>;
        async fn create_client_type(&self, ctx: &RequestContext, client_type: &mut ClientType) -> StoreResult<()>;
        async fn get_client_type(&self, ctx: &RequestContext, id: &str) -> StoreResult<ClientType>;
        async fn update_client_type(&self, ctx: &RequestContext, client_type: &mut ClientType) -> StoreResult<()>;
        async fn delete_client_type(&self, ctx: &RequestContext, id: &str) -> StoreResult<()>;
    }

    #[async_trait]
    impl IntegrationUseCases for UseCases {
        async fn create_integration(&self, ctx: &RequestContext, integration: &mut Integration) -> StoreResult<()>;
        async fn get_integration(&self, ctx: &RequestContext, id: &str) -> StoreResult<Integration>;
        async fn update_integration(&self, ctx: &RequestContext, integration: &mut Integration) -> StoreResult<()>;
        async fn delete_integration(&self, ctx: &RequestContext, id: &str) -> StoreResult<()>;
    }

    #[async_trait]
    impl ProductUseCases for UseCases {
        async fn create_product(&self, ctx: &RequestContext, product: &mut Product) -> StoreResult<()>;
        async fn get_product(&self, ctx: &RequestContext, id: &str) -> StoreResult<Product>;
        async fn update_product(&self, ctx: &RequestContext, product: &mut Product) -> StoreResult<()>;
        async fn delete_product(&self, ctx: &RequestContext, id: &str) -> StoreResult<()>;
        async fn create_category(&self, ctx: &RequestContext, category: &mut Category) -> StoreResult<()>;
        async fn get_category(&self, ctx: &RequestContext, id: &str) -> StoreResult<Category>;
        async fn update_category(&self, ctx: &RequestContext, category: &mut Category) -> StoreResult<()>;
        async fn delete_category(&self, ctx: &RequestContext, id: &str) -> StoreResult<()>;
        async fn create_attribute(&self, ctx: &RequestContext, attribute: &mut Attribute) -> StoreResult<()>;
        async fn get_attribute(&self, ctx: &RequestContext, id: &str) -> StoreResult<Attribute>;
        async fn update_attribute(&self, ctx: &RequestContext, attribute: &mut Attribute) -> StoreResult<()>;
        async fn delete_attribute(&self, ctx: &RequestContext, id: &str) -> StoreResult<()>;
        async fn create_order(&self, ctx: &RequestContext, order: &mut Order) -> StoreResult<()>;
        async fn get_order(&self, ctx: &RequestContext, id: &str) -> StoreResult<Order>;
        async fn update_order(&self, ctx: &RequestContext, order: &mut Order) -> StoreResult<()>;
        async fn delete_order(&self, ctx: &RequestContext, id: &str) -> StoreResult<()>;
        async fn create_order_products(&self, ctx: &RequestContext, order_products: &mut OrderProducts) -> StoreResult<()>;
        async fn get_order_products(&self, ctx: &RequestContext, id: &str) -> StoreResult<OrderProducts>;
        async fn update_order_products(&self, ctx: &RequestContext, order_products: &mut OrderProducts) -> StoreResult<()>;
        async fn delete_order_products(&self, ctx: &RequestContext, id: &str) -> StoreResult<()>;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UseCases;
    use seller_core::{ErrorKind, StoreError};

    fn assert_use_cases<T: UseCases>(_: &T) {}

    #[tokio::test]
    async fn test_mock_use_cases_covers_all_capabilities() {
        let mut cases = MockUseCases::new();
        cases
            .expect_get_category()
            .returning(|_, id| Err(StoreError::not_found("Category", id)));
        assert_use_cases(&cases);

        let err = cases
            .get_category(&RequestContext::new(), "c404")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
