//! Use-case contracts
//!
//! The capability surface the HTTP boundary depends on. [`UseCases`] is the union of the
//! three aggregate capability sets and is implemented for anything implementing all
//! three.
//!
//! Methods mirror the repository contracts one to one; implementations add their own
//! frame to the error trace.

use async_trait::async_trait;
use seller_core::{RequestContext, StoreResult};
use seller_models::{
    Attribute, Category, ClientType, Integration, Order, OrderProducts, Product, Role, User,
};

#[cfg(any(test, feature = "mock"))]
use mockall::automock;

/// Users, roles and client types
#[cfg_attr(any(test, feature = "mock"), automock)]
#[async_trait]
pub trait AuthUseCases: Send + Sync {
    async fn create_user(&self, ctx: &RequestContext, user: &mut User) -> StoreResult<()>;
    async fn get_user(&self, ctx: &RequestContext, id: &str) -> StoreResult<User>;
    async fn update_user(&self, ctx: &RequestContext, user: &mut User) -> StoreResult<()>;
    async fn delete_user(&self, ctx: &RequestContext, id: &str) -> StoreResult<()>;

    async fn create_role(&self, ctx: &RequestContext, role: &mut Role) -> StoreResult<()>;
    async fn get_role(&self, ctx: &RequestContext, id: &str) -> StoreResult<Role>;
    async fn update_role(&self, ctx: &RequestContext, role: &mut Role) -> StoreResult<()>;
    async fn delete_role(&self, ctx: &RequestContext, id: &str) -> StoreResult<()>;

    async fn create_client_type(
        &self,
        ctx: &RequestContext,
        client_type: &mut ClientType,
    ) -> StoreResult<()>;
    async fn get_client_type(&self, ctx: &RequestContext, id: &str) -> StoreResult<ClientType>;
    async fn update_client_type(
        &self,
        ctx: &RequestContext,
        client_type: &mut ClientType,
    ) -> StoreResult<()>;
    async fn delete_client_type(&self, ctx: &RequestContext, id: &str) -> StoreResult<()>;
}

/// Sales integrations
#[cfg_attr(any(test, feature = "mock"), automock)]
#[async_trait]
pub trait IntegrationUseCases: Send + Sync {
    async fn create_integration(
        &self,
        ctx: &RequestContext,
        integration: &mut Integration,
    ) -> StoreResult<()>;
    async fn get_integration(&self, ctx: &RequestContext, id: &str) -> StoreResult<Integration>;
    async fn update_integration(
        &self,
        ctx: &RequestContext,
        integration: &mut Integration,
    ) -> StoreResult<()>;
    async fn delete_integration(&self, ctx: &RequestContext, id: &str) -> StoreResult<()>;
}

/// Catalog and orders
#[cfg_attr(any(test, feature = "mock"), automock)]
#[async_trait]
pub trait ProductUseCases: Send + Sync {
    async fn create_product(&self, ctx: &RequestContext, product: &mut Product) -> StoreResult<()>;
    async fn get_product(&self, ctx: &RequestContext, id: &str) -> StoreResult<Product>;
    async fn update_product(&self, ctx: &RequestContext, product: &mut Product) -> StoreResult<()>;
    async fn delete_product(&self, ctx: &RequestContext, id: &str) -> StoreResult<()>;

    async fn create_category(
        &self,
        ctx: &RequestContext,
        category: &mut Category,
    ) -> StoreResult<()>;
    async fn get_category(&self, ctx: &RequestContext, id: &str) -> StoreResult<Category>;
    async fn update_category(
        &self,
        ctx: &RequestContext,
        category: &mut Category,
    ) -> StoreResult<()>;
    async fn delete_category(&self, ctx: &RequestContext, id: &str) -> StoreResult<()>;

    async fn create_attribute(
        &self,
        ctx: &RequestContext,
        attribute: &mut Attribute,
    ) -> StoreResult<()>;
    async fn get_attribute(&self, ctx: &RequestContext, id: &str) -> StoreResult<Attribute>;
    async fn update_attribute(
        &self,
        ctx: &RequestContext,
        attribute: &mut Attribute,
    ) -> StoreResult<()>;
    async fn delete_attribute(&self, ctx: &RequestContext, id: &str) -> StoreResult<()>;

    async fn create_order(&self, ctx: &RequestContext, order: &mut Order) -> StoreResult<()>;
    async fn get_order(&self, ctx: &RequestContext, id: &str) -> StoreResult<Order>;
    async fn update_order(&self, ctx: &RequestContext, order: &mut Order) -> StoreResult<()>;
    async fn delete_order(&self, ctx: &RequestContext, id: &str) -> StoreResult<()>;

    async fn create_order_products(
        &self,
        ctx: &RequestContext,
        order_products: &mut OrderProducts,
    ) -> StoreResult<()>;
    async fn get_order_products(
        &self,
        ctx: &RequestContext,
        id: &str,
    ) -> StoreResult<OrderProducts>;
    async fn update_order_products(
        &self,
        ctx: &RequestContext,
        order_products: &mut OrderProducts,
    ) -> StoreResult<()>;
    async fn delete_order_products(&self, ctx: &RequestContext, id: &str) -> StoreResult<()>;
}

/// Everything the boundary layer can ask of the core
pub trait UseCases: AuthUseCases + IntegrationUseCases + ProductUseCases {}

impl<T> UseCases for T where T: AuthUseCases + IntegrationUseCases + ProductUseCases {}
