//! Sales integration repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use seller_contracts::IntegrationRepo;
use seller_core::{Entity, ErrorContext, RequestContext, StoreResult};
use seller_models::Integration;
use seller_queries::{insert, update, BuildError, Statement};
use sqlx::PgPool;
use tracing::instrument;

use crate::executor::{
    delete_by_id, get_by_id, insert_returning, require_id, update_by_id, STAMPED,
};

pub(crate) const INTEGRATION_COLUMNS: [&str; 4] = ["id", "name", "created_at", "updated_at"];

fn integration_insert(i: &Integration, now: DateTime<Utc>) -> Result<Statement, BuildError> {
    insert(Integration::TABLE_NAME)
        .value("name", &i.name)
        .value("created_at", now)
        .value("updated_at", now)
        .returning(STAMPED)
        .build()
}

fn integration_update(
    i: &Integration,
    id: &str,
    now: DateTime<Utc>,
) -> Result<Statement, BuildError> {
    update(Integration::TABLE_NAME)
        .set("name", &i.name)
        .set("updated_at", now)
        .where_eq("id", id)
        .returning(["updated_at"])
        .build()
}

#[derive(Clone)]
pub struct IntegrationRepository {
    pool: PgPool,
}

impl IntegrationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IntegrationRepo for IntegrationRepository {
    #[instrument(skip(self, ctx, integration), fields(request_id = %ctx.request_id()))]
    async fn create_integration(
        &self,
        ctx: &RequestContext,
        integration: &mut Integration,
    ) -> StoreResult<()> {
        let stmt = integration_insert(integration, Utc::now());
        let row = insert_returning(&self.pool, ctx, stmt)
            .await
            .context("IntegrationRepo.create_integration")?;
        (integration.id, integration.created_at, integration.updated_at) = row.into_fields();
        Ok(())
    }

    #[instrument(skip(self, ctx), fields(request_id = %ctx.request_id()))]
    async fn get_integration(&self, ctx: &RequestContext, id: &str) -> StoreResult<Integration> {
        get_by_id(&self.pool, ctx, &INTEGRATION_COLUMNS, id)
            .await
            .context("IntegrationRepo.get_integration")
    }

    #[instrument(skip(self, ctx, integration), fields(request_id = %ctx.request_id()))]
    async fn update_integration(
        &self,
        ctx: &RequestContext,
        integration: &mut Integration,
    ) -> StoreResult<()> {
        let id = require_id(&integration.id, Integration::TYPE_NAME)
            .context("IntegrationRepo.update_integration")?;
        let stmt = integration_update(integration, id, Utc::now());
        let updated_at = update_by_id::<Integration>(&self.pool, ctx, stmt, id)
            .await
            .context("IntegrationRepo.update_integration")?;
        integration.updated_at = Some(updated_at);
        Ok(())
    }

    #[instrument(skip(self, ctx), fields(request_id = %ctx.request_id()))]
    async fn delete_integration(&self, ctx: &RequestContext, id: &str) -> StoreResult<()> {
        delete_by_id::<Integration>(&self.pool, ctx, id)
            .await
            .context("IntegrationRepo.delete_integration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integration_statements() {
        let integration = Integration {
            name: "marketplace".to_string(),
            ..Default::default()
        };
        let now = Utc::now();

        let stmt = integration_insert(&integration, now).unwrap();
        assert_eq!(
            stmt.sql,
            r#"INSERT INTO "integration" ("name", "created_at", "updated_at") VALUES ($1, $2, $3) RETURNING "id", "created_at", "updated_at""#
        );

        let stmt = integration_update(&integration, "i1", now).unwrap();
        assert_eq!(
            stmt.sql,
            r#"UPDATE "integration" SET "name" = $1, "updated_at" = $2 WHERE "id" = $3 RETURNING "updated_at""#
        );
    }
}
