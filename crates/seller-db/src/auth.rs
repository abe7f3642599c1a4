//! User, role and client type repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use seller_contracts::AuthRepo;
use seller_core::{Entity, ErrorContext, RequestContext, StoreResult};
use seller_models::{ClientType, Role, User};
use seller_queries::{insert, update, BuildError, Statement};
use sqlx::PgPool;
use tracing::instrument;

use crate::executor::{
    delete_by_id, get_by_id, insert_returning, require_id, update_by_id, STAMPED,
};

pub(crate) const USER_COLUMNS: [&str; 13] = [
    "id",
    "name",
    "surname",
    "username",
    "password",
    "birth_date",
    "tg_user_name",
    "phone",
    "instagram",
    "client_from",
    "role_id",
    "created_at",
    "updated_at",
];

pub(crate) const ROLE_COLUMNS: [&str; 5] =
    ["id", "name", "client_type_id", "created_at", "updated_at"];

pub(crate) const CLIENT_TYPE_COLUMNS: [&str; 4] = ["id", "name", "created_at", "updated_at"];

pub(crate) fn user_insert(u: &User, now: DateTime<Utc>) -> Result<Statement, BuildError> {
    insert(User::TABLE_NAME)
        .value("name", &u.name)
        .value("surname", &u.surname)
        .value("username", &u.username)
        .value("password", &u.password)
        .value("birth_date", u.birth_date)
        .value("tg_user_name", &u.tg_user_name)
        .value("phone", &u.phone)
        .value("instagram", &u.instagram)
        .value("client_from", &u.client_from)
        .value("role_id", &u.role_id)
        .value("created_at", now)
        .value("updated_at", now)
        .returning(STAMPED)
        .build()
}

fn user_update(u: &User, id: &str, now: DateTime<Utc>) -> Result<Statement, BuildError> {
    update(User::TABLE_NAME)
        .set("name", &u.name)
        .set("surname", &u.surname)
        .set("username", &u.username)
        .set("password", &u.password)
        .set("birth_date", u.birth_date)
        .set("tg_user_name", &u.tg_user_name)
        .set("phone", &u.phone)
        .set("instagram", &u.instagram)
        .set("client_from", &u.client_from)
        .set("role_id", &u.role_id)
        .set("updated_at", now)
        .where_eq("id", id)
        .returning(["updated_at"])
        .build()
}

fn role_insert(r: &Role, now: DateTime<Utc>) -> Result<Statement, BuildError> {
    insert(Role::TABLE_NAME)
        .value("name", &r.name)
        .value("client_type_id", &r.client_type_id)
        .value("created_at", now)
        .value("updated_at", now)
        .returning(STAMPED)
        .build()
}

fn role_update(r: &Role, id: &str, now: DateTime<Utc>) -> Result<Statement, BuildError> {
    update(Role::TABLE_NAME)
        .set("name", &r.name)
        .set("client_type_id", &r.client_type_id)
        .set("updated_at", now)
        .where_eq("id", id)
        .returning(["updated_at"])
        .build()
}

fn client_type_insert(ct: &ClientType, now: DateTime<Utc>) -> Result<Statement, BuildError> {
    insert(ClientType::TABLE_NAME)
        .value("name", &ct.name)
        .value("created_at", now)
        .value("updated_at", now)
        .returning(STAMPED)
        .build()
}

fn client_type_update(
    ct: &ClientType,
    id: &str,
    now: DateTime<Utc>,
) -> Result<Statement, BuildError> {
    update(ClientType::TABLE_NAME)
        .set("name", &ct.name)
        .set("updated_at", now)
        .where_eq("id", id)
        .returning(["updated_at"])
        .build()
}

/// Auth repository backed by PostgreSQL
#[derive(Clone)]
pub struct AuthRepository {
    pool: PgPool,
}

impl AuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthRepo for AuthRepository {
    #[instrument(skip(self, ctx, user), fields(request_id = %ctx.request_id()))]
    async fn create_user(&self, ctx: &RequestContext, user: &mut User) -> StoreResult<()> {
        let row = insert_returning(&self.pool, ctx, user_insert(user, Utc::now()))
            .await
            .context("AuthRepo.create_user")?;
        (user.id, user.created_at, user.updated_at) = row.into_fields();
        Ok(())
    }

    #[instrument(skip(self, ctx), fields(request_id = %ctx.request_id()))]
    async fn get_user(&self, ctx: &RequestContext, id: &str) -> StoreResult<User> {
        get_by_id(&self.pool, ctx, &USER_COLUMNS, id)
            .await
            .context("AuthRepo.get_user")
    }

    #[instrument(skip(self, ctx, user), fields(request_id = %ctx.request_id()))]
    async fn update_user(&self, ctx: &RequestContext, user: &mut User) -> StoreResult<()> {
        let id = require_id(&user.id, User::TYPE_NAME).context("AuthRepo.update_user")?;
        let stmt = user_update(user, id, Utc::now());
        let updated_at = update_by_id::<User>(&self.pool, ctx, stmt, id)
            .await
            .context("AuthRepo.update_user")?;
        user.updated_at = Some(updated_at);
        Ok(())
    }

    #[instrument(skip(self, ctx), fields(request_id = %ctx.request_id()))]
    async fn delete_user(&self, ctx: &RequestContext, id: &str) -> StoreResult<()> {
        delete_by_id::<User>(&self.pool, ctx, id)
            .await
            .context("AuthRepo.delete_user")
    }

    #[instrument(skip(self, ctx, role), fields(request_id = %ctx.request_id()))]
    async fn create_role(&self, ctx: &RequestContext, role: &mut Role) -> StoreResult<()> {
        let row = insert_returning(&self.pool, ctx, role_insert(role, Utc::now()))
            .await
            .context("AuthRepo.create_role")?;
        (role.id, role.created_at, role.updated_at) = row.into_fields();
        Ok(())
    }

    #[instrument(skip(self, ctx), fields(request_id = %ctx.request_id()))]
    async fn get_role(&self, ctx: &RequestContext, id: &str) -> StoreResult<Role> {
        get_by_id(&self.pool, ctx, &ROLE_COLUMNS, id)
            .await
            .context("AuthRepo.get_role")
    }

    #[instrument(skip(self, ctx, role), fields(request_id = %ctx.request_id()))]
    async fn update_role(&self, ctx: &RequestContext, role: &mut Role) -> StoreResult<()> {
        let id = require_id(&role.id, Role::TYPE_NAME).context("AuthRepo.update_role")?;
        let stmt = role_update(role, id, Utc::now());
        let updated_at = update_by_id::<Role>(&self.pool, ctx, stmt, id)
            .await
            .context("AuthRepo.update_role")?;
        role.updated_at = Some(updated_at);
        Ok(())
    }

    #[instrument(skip(self, ctx), fields(request_id = %ctx.request_id()))]
    async fn delete_role(&self, ctx: &RequestContext, id: &str) -> StoreResult<()> {
        delete_by_id::<Role>(&self.pool, ctx, id)
            .await
            .context("AuthRepo.delete_role")
    }

    #[instrument(skip(self, ctx, client_type), fields(request_id = %ctx.request_id()))]
    async fn create_client_type(
        &self,
        ctx: &RequestContext,
        client_type: &mut ClientType,
    ) -> StoreResult<()> {
        let stmt = client_type_insert(client_type, Utc::now());
        let row = insert_returning(&self.pool, ctx, stmt)
            .await
            .context("AuthRepo.create_client_type")?;
        (client_type.id, client_type.created_at, client_type.updated_at) = row.into_fields();
        Ok(())
    }

    #[instrument(skip(self, ctx), fields(request_id = %ctx.request_id()))]
    async fn get_client_type(&self, ctx: &RequestContext, id: &str) -> StoreResult<ClientType> {
        get_by_id(&self.pool, ctx, &CLIENT_TYPE_COLUMNS, id)
            .await
            .context("AuthRepo.get_client_type")
    }

    #[instrument(skip(self, ctx, client_type), fields(request_id = %ctx.request_id()))]
    async fn update_client_type(
        &self,
        ctx: &RequestContext,
        client_type: &mut ClientType,
    ) -> StoreResult<()> {
        let id = require_id(&client_type.id, ClientType::TYPE_NAME)
            .context("AuthRepo.update_client_type")?;
        let stmt = client_type_update(client_type, id, Utc::now());
        let updated_at = update_by_id::<ClientType>(&self.pool, ctx, stmt, id)
            .await
            .context("AuthRepo.update_client_type")?;
        client_type.updated_at = Some(updated_at);
        Ok(())
    }

    #[instrument(skip(self, ctx), fields(request_id = %ctx.request_id()))]
    async fn delete_client_type(&self, ctx: &RequestContext, id: &str) -> StoreResult<()> {
        delete_by_id::<ClientType>(&self.pool, ctx, id)
            .await
            .context("AuthRepo.delete_client_type")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use seller_queries::SqlValue;

    #[test]
    fn test_user_table_is_quoted() {
        let user = User {
            name: "Ann".to_string(),
            username: "ann".to_string(),
            password: "secret".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1990, 4, 2),
            role_id: "r1".to_string(),
            ..Default::default()
        };
        let stmt = user_insert(&user, Utc::now()).unwrap();

        assert!(stmt.sql.starts_with(r#"INSERT INTO "user" ("name", "surname", "username""#));
        assert_eq!(stmt.placeholder_count(), 12);
        assert_eq!(stmt.args[4], SqlValue::from(NaiveDate::from_ymd_opt(1990, 4, 2)));
    }

    #[test]
    fn test_user_without_birth_date_binds_typed_null() {
        let stmt = user_insert(&User::default(), Utc::now()).unwrap();
        assert_eq!(stmt.args[4], SqlValue::Date(None));
    }

    #[test]
    fn test_role_update_shape() {
        let role = Role {
            name: "admin".to_string(),
            client_type_id: "ct1".to_string(),
            ..Default::default()
        };
        let stmt = role_update(&role, "r1", Utc::now()).unwrap();
        assert_eq!(
            stmt.sql,
            r#"UPDATE "role" SET "name" = $1, "client_type_id" = $2, "updated_at" = $3 WHERE "id" = $4 RETURNING "updated_at""#
        );
    }

    #[test]
    fn test_user_columns_match_insert() {
        let stmt = user_insert(&User::default(), Utc::now()).unwrap();
        for column in &USER_COLUMNS[1..] {
            assert!(stmt.sql.contains(&format!("\"{}\"", column)), "{}", column);
        }
    }
}
