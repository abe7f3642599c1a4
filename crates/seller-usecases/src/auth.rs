use async_trait::async_trait;
use seller_contracts::{AuthRepo, AuthUseCases};
use seller_core::{ErrorContext, RequestContext, StoreResult};
use seller_models::{ClientType, Role, User};
use tracing::instrument;

use crate::UseCase;

#[async_trait]
impl AuthUseCases for UseCase {
    #[instrument(skip_all)]
    async fn create_user(&self, ctx: &RequestContext, user: &mut User) -> StoreResult<()> {
        self.auth
            .create_user(ctx, user)
            .await
            .context("AuthUseCase.create_user")
    }

    #[instrument(skip(self, ctx))]
    async fn get_user(&self, ctx: &RequestContext, id: &str) -> StoreResult<User> {
        self.auth
            .get_user(ctx, id)
            .await
            .context("AuthUseCase.get_user")
    }

    #[instrument(skip_all)]
    async fn update_user(&self, ctx: &RequestContext, user: &mut User) -> StoreResult<()> {
        self.auth
            .update_user(ctx, user)
            .await
            .context("AuthUseCase.update_user")
    }

    #[instrument(skip(self, ctx))]
    async fn delete_user(&self, ctx: &RequestContext, id: &str) -> StoreResult<()> {
        self.auth
            .delete_user(ctx, id)
            .await
            .context("AuthUseCase.delete_user")
    }

    #[instrument(skip_all)]
    async fn create_role(&self, ctx: &RequestContext, role: &mut Role) -> StoreResult<()> {
        self.auth
            .create_role(ctx, role)
            .await
            .context("AuthUseCase.create_role")
    }

    #[instrument(skip(self, ctx))]
    async fn get_role(&self, ctx: &RequestContext, id: &str) -> StoreResult<Role> {
        self.auth
            .get_role(ctx, id)
            .await
            .context("AuthUseCase.get_role")
    }

    #[instrument(skip_all)]
    async fn update_role(&self, ctx: &RequestContext, role: &mut Role) -> StoreResult<()> {
        self.auth
            .update_role(ctx, role)
            .await
            .context("AuthUseCase.update_role")
    }

    #[instrument(skip(self, ctx))]
    async fn delete_role(&self, ctx: &RequestContext, id: &str) -> StoreResult<()> {
        self.auth
            .delete_role(ctx, id)
            .await
            .context("AuthUseCase.delete_role")
    }

    #[instrument(skip_all)]
    async fn create_client_type(
        &self,
        ctx: &RequestContext,
        client_type: &mut ClientType,
    ) -> StoreResult<()> {
        self.auth
            .create_client_type(ctx, client_type)
            .await
            .context("AuthUseCase.create_client_type")
    }

    #[instrument(skip(self, ctx))]
    async fn get_client_type(&self, ctx: &RequestContext, id: &str) -> StoreResult<ClientType> {
        self.auth
            .get_client_type(ctx, id)
            .await
            .context("AuthUseCase.get_client_type")
    }

    #[instrument(skip_all)]
    async fn update_client_type(
        &self,
        ctx: &RequestContext,
        client_type: &mut ClientType,
    ) -> StoreResult<()> {
        self.auth
            .update_client_type(ctx, client_type)
            .await
            .context("AuthUseCase.update_client_type")
    }

    #[instrument(skip(self, ctx))]
    async fn delete_client_type(&self, ctx: &RequestContext, id: &str) -> StoreResult<()> {
        self.auth
            .delete_client_type(ctx, id)
            .await
            .context("AuthUseCase.delete_client_type")
    }
}
