//! Uniform CRUD access to every entity kind
//!
//! Each entity kind is served by the same four handlers; [`Resource`] routes them to
//! the matching use-case methods.

use async_trait::async_trait;
use seller_contracts::{AuthUseCases, IntegrationUseCases, ProductUseCases, UseCases};
use seller_core::{Entity, RequestContext, StoreResult};
use seller_models::{
    Attribute, Category, ClientType, Integration, Order, OrderProducts, Product, Role, User,
};
use serde::{de::DeserializeOwned, Serialize};
use validator::Validate;

#[async_trait]
pub trait Resource: Entity + Validate + Serialize + DeserializeOwned + 'static {
    /// Path segment under `/v1`
    const PATH: &'static str = Self::TABLE_NAME;

    async fn create(
        uc: &dyn UseCases,
        ctx: &RequestContext,
        value: &mut Self,
    ) -> StoreResult<()>;
    async fn get(uc: &dyn UseCases, ctx: &RequestContext, id: &str) -> StoreResult<Self>;
    async fn update(
        uc: &dyn UseCases,
        ctx: &RequestContext,
        value: &mut Self,
    ) -> StoreResult<()>;
    async fn delete(uc: &dyn UseCases, ctx: &RequestContext, id: &str) -> StoreResult<()>;
}

macro_rules! impl_resource {
    ($ty:ty, $create:ident, $get:ident, $update:ident, $delete:ident) => {
        #[async_trait]
        impl Resource for $ty {
            async fn create(
                uc: &dyn UseCases,
                ctx: &RequestContext,
                value: &mut Self,
            ) -> StoreResult<()> {
                uc.$create(ctx, value).await
            }

            async fn get(uc: &dyn UseCases, ctx: &RequestContext, id: &str) -> StoreResult<Self> {
                uc.$get(ctx, id).await
            }

            async fn update(
                uc: &dyn UseCases,
                ctx: &RequestContext,
                value: &mut Self,
            ) -> StoreResult<()> {
                uc.$update(ctx, value).await
            }

            async fn delete(uc: &dyn UseCases, ctx: &RequestContext, id: &str) -> StoreResult<()> {
                uc.$delete(ctx, id).await
            }
        }
    };
}

impl_resource!(User, create_user, get_user, update_user, delete_user);
impl_resource!(Role, create_role, get_role, update_role, delete_role);
impl_resource!(
    ClientType,
    create_client_type,
    get_client_type,
    update_client_type,
    delete_client_type
);
impl_resource!(
    Integration,
    create_integration,
    get_integration,
    update_integration,
    delete_integration
);
impl_resource!(Product, create_product, get_product, update_product, delete_product);
impl_resource!(Category, create_category, get_category, update_category, delete_category);
impl_resource!(
    Attribute,
    create_attribute,
    get_attribute,
    update_attribute,
    delete_attribute
);
impl_resource!(Order, create_order, get_order, update_order, delete_order);
impl_resource!(
    OrderProducts,
    create_order_products,
    get_order_products,
    update_order_products,
    delete_order_products
);
