use async_trait::async_trait;
use seller_contracts::{IntegrationRepo, IntegrationUseCases};
use seller_core::{ErrorContext, RequestContext, StoreResult};
use seller_models::Integration;
use tracing::instrument;

use crate::UseCase;

#[async_trait]
impl IntegrationUseCases for UseCase {
    #[instrument(skip_all)]
    async fn create_integration(
        &self,
        ctx: &RequestContext,
        integration: &mut Integration,
    ) -> StoreResult<()> {
        self.integration
            .create_integration(ctx, integration)
            .await
            .context("IntegrationUseCase.create_integration")
    }

    #[instrument(skip(self, ctx))]
    async fn get_integration(&self, ctx: &RequestContext, id: &str) -> StoreResult<Integration> {
        self.integration
            .get_integration(ctx, id)
            .await
            .context("IntegrationUseCase.get_integration")
    }

    #[instrument(skip_all)]
    async fn update_integration(
        &self,
        ctx: &RequestContext,
        integration: &mut Integration,
    ) -> StoreResult<()> {
        self.integration
            .update_integration(ctx, integration)
            .await
            .context("IntegrationUseCase.update_integration")
    }

    #[instrument(skip(self, ctx))]
    async fn delete_integration(&self, ctx: &RequestContext, id: &str) -> StoreResult<()> {
        self.integration
            .delete_integration(ctx, id)
            .await
            .context("IntegrationUseCase.delete_integration")
    }
}
