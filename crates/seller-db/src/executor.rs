//! Statement execution
//!
//! Every helper binds the statement's arguments in order, runs it under the caller's
//! [`RequestContext`] and maps failures through [`map_sqlx`].

use chrono::{DateTime, SubsecRound, Utc};
use seller_core::{Entity, ErrorKind, Id, RequestContext, Stage, StoreError, StoreResult};
use seller_queries::{delete, select, BuildError, SqlValue, Statement};
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::{Arguments, FromRow, PgPool};
use tracing::debug;

use crate::error::map_sqlx;

/// Columns the store assigns on insert
pub(crate) const STAMPED: [&str; 3] = ["id", "created_at", "updated_at"];

/// Row returned by `INSERT ... RETURNING id, created_at, updated_at`
#[derive(Debug, FromRow)]
pub(crate) struct Stamped {
    pub id: Id,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Stamped {
    /// Values in the shape of an entity's `(id, created_at, updated_at)` fields
    pub fn into_fields(self) -> (Option<Id>, Option<DateTime<Utc>>, Option<DateTime<Utc>>) {
        (Some(self.id), Some(self.created_at), Some(self.updated_at))
    }
}

/// Row returned by `UPDATE ... RETURNING updated_at`
#[derive(Debug, FromRow)]
pub(crate) struct Touched {
    pub updated_at: DateTime<Utc>,
}

/// Truncate a caller-supplied timestamp to the store's microsecond precision, so the
/// value kept by the caller equals the one read back.
pub(crate) fn store_precision(ts: Option<DateTime<Utc>>) -> Option<DateTime<Utc>> {
    ts.map(|ts| ts.trunc_subsecs(6))
}

pub(crate) fn arguments(args: Vec<SqlValue>) -> PgArguments {
    let mut out = PgArguments::default();
    for arg in args {
        match arg {
            SqlValue::Text(v) => out.add(v),
            SqlValue::Int(v) => out.add(v),
            SqlValue::BigInt(v) => out.add(v),
            SqlValue::Date(v) => out.add(v),
            SqlValue::Timestamp(v) => out.add(v),
        }
    }
    out
}

/// Turn a statement build failure into a store error.
pub(crate) fn built(result: Result<Statement, BuildError>) -> StoreResult<Statement> {
    result.map_err(StoreError::build)
}

/// The id an update needs, or an `Invalid` error naming the entity.
pub(crate) fn require_id<'a>(id: &'a Option<Id>, entity: &str) -> StoreResult<&'a str> {
    id.as_deref().ok_or_else(|| {
        StoreError::new(
            ErrorKind::Invalid,
            Stage::Build,
            format!("{} has no id", entity),
        )
    })
}

fn log_statement(stmt: &Statement) {
    debug!(sql = %stmt.sql, args = stmt.placeholder_count(), "executing statement");
}

/// Run a statement expected to return exactly one row.
pub(crate) async fn fetch_one<T>(pool: &PgPool, ctx: &RequestContext, stmt: Statement) -> StoreResult<T>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    log_statement(&stmt);
    let Statement { sql, args } = stmt;
    ctx.run(async {
        sqlx::query_as_with::<_, T, _>(&sql, arguments(args))
            .fetch_one(pool)
            .await
            .map_err(map_sqlx)
    })
    .await
}

/// Run a statement returning at most one row.
pub(crate) async fn fetch_optional<T>(
    pool: &PgPool,
    ctx: &RequestContext,
    stmt: Statement,
) -> StoreResult<Option<T>>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    log_statement(&stmt);
    let Statement { sql, args } = stmt;
    ctx.run(async {
        sqlx::query_as_with::<_, T, _>(&sql, arguments(args))
            .fetch_optional(pool)
            .await
            .map_err(map_sqlx)
    })
    .await
}

/// Run a statement that returns no rows and report how many rows it touched.
pub(crate) async fn execute(pool: &PgPool, ctx: &RequestContext, stmt: Statement) -> StoreResult<u64> {
    log_statement(&stmt);
    let Statement { sql, args } = stmt;
    ctx.run(async {
        let result = sqlx::query_with(&sql, arguments(args))
            .execute(pool)
            .await
            .map_err(map_sqlx)?;
        Ok(result.rows_affected())
    })
    .await
}

/// Insert and return the store-assigned id and timestamps.
pub(crate) async fn insert_returning(
    pool: &PgPool,
    ctx: &RequestContext,
    stmt: Result<Statement, BuildError>,
) -> StoreResult<Stamped> {
    fetch_one(pool, ctx, built(stmt)?).await
}

/// Fetch one entity by primary key. A missing row is `NotFound`.
pub(crate) async fn get_by_id<T>(
    pool: &PgPool,
    ctx: &RequestContext,
    columns: &[&str],
    id: &str,
) -> StoreResult<T>
where
    T: Entity + for<'r> FromRow<'r, PgRow> + Unpin,
{
    let stmt = built(
        select(columns.iter().copied())
            .from(T::TABLE_NAME)
            .where_eq("id", id)
            .build(),
    )?;
    fetch_optional::<T>(pool, ctx, stmt)
        .await?
        .ok_or_else(|| StoreError::not_found(T::TYPE_NAME, id))
}

/// Run an `UPDATE ... RETURNING updated_at` and return the new stamp.
/// Zero matched rows is `NotFound`.
pub(crate) async fn update_by_id<T: Entity>(
    pool: &PgPool,
    ctx: &RequestContext,
    stmt: Result<Statement, BuildError>,
    id: &str,
) -> StoreResult<DateTime<Utc>> {
    fetch_optional::<Touched>(pool, ctx, built(stmt)?)
        .await?
        .map(|row| row.updated_at)
        .ok_or_else(|| StoreError::not_found(T::TYPE_NAME, id))
}

/// Delete one entity by primary key. Zero deleted rows is `NotFound`.
pub(crate) async fn delete_by_id<T: Entity>(
    pool: &PgPool,
    ctx: &RequestContext,
    id: &str,
) -> StoreResult<()> {
    let stmt = built(delete(T::TABLE_NAME).where_eq("id", id).build())?;
    match execute(pool, ctx, stmt).await? {
        0 => Err(StoreError::not_found(T::TYPE_NAME, id)),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_id() {
        let id = Some("p1".to_string());
        assert_eq!(require_id(&id, "Product").unwrap(), "p1");

        let err = require_id(&None, "Product").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Invalid);
        assert_eq!(err.stage(), Stage::Build);
        assert!(err.detail().contains("Product has no id"));
    }

    #[test]
    fn test_store_precision_drops_nanoseconds() {
        let ts = DateTime::parse_from_rfc3339("2024-05-01T10:20:03.315126229Z")
            .unwrap()
            .with_timezone(&Utc);
        let stored = store_precision(Some(ts)).unwrap();
        assert_eq!(stored.to_rfc3339(), "2024-05-01T10:20:03.315126+00:00");
        assert_eq!(store_precision(None), None);
    }

    #[test]
    fn test_build_failure_is_invalid() {
        let err = built(delete("product").build()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Invalid);
        assert_eq!(err.stage(), Stage::Build);
    }
}
