//! Catalog and order repository
//!
//! Covers the `product`, `category`, `attribute`, `order` and `order_products` tables.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use seller_contracts::ProductRepo;
use seller_core::{Entity, ErrorContext, RequestContext, StoreResult};
use seller_models::{Attribute, Category, Order, OrderProducts, Product};
use seller_queries::{insert, update, BuildError, Statement};
use sqlx::PgPool;
use tracing::instrument;

use crate::executor::{
    delete_by_id, get_by_id, insert_returning, require_id, store_precision, update_by_id,
    STAMPED,
};

pub(crate) const PRODUCT_COLUMNS: [&str; 11] = [
    "id",
    "name",
    "category_id",
    "short_info",
    "description",
    "cost",
    "count",
    "discount_cost",
    "discount",
    "created_at",
    "updated_at",
];

pub(crate) const CATEGORY_COLUMNS: [&str; 4] = ["id", "name", "created_at", "updated_at"];

pub(crate) const ATTRIBUTE_COLUMNS: [&str; 5] =
    ["id", "name", "category_id", "created_at", "updated_at"];

pub(crate) const ORDER_COLUMNS: [&str; 8] = [
    "id",
    "user_id",
    "integration_id",
    "status",
    "status_changed_time",
    "total_cost",
    "created_at",
    "updated_at",
];

pub(crate) const ORDER_PRODUCTS_COLUMNS: [&str; 7] = [
    "id",
    "order_id",
    "product_id",
    "count",
    "cost",
    "created_at",
    "updated_at",
];

pub(crate) fn product_insert(p: &Product, now: DateTime<Utc>) -> Result<Statement, BuildError> {
    insert(Product::TABLE_NAME)
        .value("name", &p.name)
        .value("category_id", &p.category_id)
        .value("short_info", &p.short_info)
        .value("description", &p.description)
        .value("cost", p.cost)
        .value("count", p.count)
        .value("discount_cost", p.discount_cost)
        .value("discount", p.discount)
        .value("created_at", now)
        .value("updated_at", now)
        .returning(STAMPED)
        .build()
}

pub(crate) fn product_update(
    p: &Product,
    id: &str,
    now: DateTime<Utc>,
) -> Result<Statement, BuildError> {
    update(Product::TABLE_NAME)
        .set("name", &p.name)
        .set("category_id", &p.category_id)
        .set("short_info", &p.short_info)
        .set("description", &p.description)
        .set("cost", p.cost)
        .set("count", p.count)
        .set("discount_cost", p.discount_cost)
        .set("discount", p.discount)
        .set("updated_at", now)
        .where_eq("id", id)
        .returning(["updated_at"])
        .build()
}

fn category_insert(c: &Category, now: DateTime<Utc>) -> Result<Statement, BuildError> {
    insert(Category::TABLE_NAME)
        .value("name", &c.name)
        .value("created_at", now)
        .value("updated_at", now)
        .returning(STAMPED)
        .build()
}

fn category_update(c: &Category, id: &str, now: DateTime<Utc>) -> Result<Statement, BuildError> {
    update(Category::TABLE_NAME)
        .set("name", &c.name)
        .set("updated_at", now)
        .where_eq("id", id)
        .returning(["updated_at"])
        .build()
}

fn attribute_insert(a: &Attribute, now: DateTime<Utc>) -> Result<Statement, BuildError> {
    insert(Attribute::TABLE_NAME)
        .value("name", &a.name)
        .value("category_id", &a.category_id)
        .value("created_at", now)
        .value("updated_at", now)
        .returning(STAMPED)
        .build()
}

fn attribute_update(a: &Attribute, id: &str, now: DateTime<Utc>) -> Result<Statement, BuildError> {
    update(Attribute::TABLE_NAME)
        .set("name", &a.name)
        .set("category_id", &a.category_id)
        .set("updated_at", now)
        .where_eq("id", id)
        .returning(["updated_at"])
        .build()
}

pub(crate) fn order_insert(o: &Order, now: DateTime<Utc>) -> Result<Statement, BuildError> {
    insert(Order::TABLE_NAME)
        .value("user_id", &o.user_id)
        .value("integration_id", &o.integration_id)
        .value("status", &o.status)
        .value("status_changed_time", o.status_changed_time)
        .value("total_cost", o.total_cost)
        .value("created_at", now)
        .value("updated_at", now)
        .returning(STAMPED)
        .build()
}

fn order_update(o: &Order, id: &str, now: DateTime<Utc>) -> Result<Statement, BuildError> {
    update(Order::TABLE_NAME)
        .set("user_id", &o.user_id)
        .set("integration_id", &o.integration_id)
        .set("status", &o.status)
        .set("status_changed_time", o.status_changed_time)
        .set("total_cost", o.total_cost)
        .set("updated_at", now)
        .where_eq("id", id)
        .returning(["updated_at"])
        .build()
}

fn order_products_insert(op: &OrderProducts, now: DateTime<Utc>) -> Result<Statement, BuildError> {
    insert(OrderProducts::TABLE_NAME)
        .value("order_id", &op.order_id)
        .value("product_id", &op.product_id)
        .value("count", op.count)
        .value("cost", op.cost)
        .value("created_at", now)
        .value("updated_at", now)
        .returning(STAMPED)
        .build()
}

fn order_products_update(
    op: &OrderProducts,
    id: &str,
    now: DateTime<Utc>,
) -> Result<Statement, BuildError> {
    update(OrderProducts::TABLE_NAME)
        .set("order_id", &op.order_id)
        .set("product_id", &op.product_id)
        .set("count", op.count)
        .set("cost", op.cost)
        .set("updated_at", now)
        .where_eq("id", id)
        .returning(["updated_at"])
        .build()
}

/// Product repository backed by PostgreSQL
#[derive(Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepo for ProductRepository {
    #[instrument(skip(self, ctx, product), fields(request_id = %ctx.request_id()))]
    async fn create_product(&self, ctx: &RequestContext, product: &mut Product) -> StoreResult<()> {
        let row = insert_returning(&self.pool, ctx, product_insert(product, Utc::now()))
            .await
            .context("ProductRepo.create_product")?;
        (product.id, product.created_at, product.updated_at) = row.into_fields();
        Ok(())
    }

    #[instrument(skip(self, ctx), fields(request_id = %ctx.request_id()))]
    async fn get_product(&self, ctx: &RequestContext, id: &str) -> StoreResult<Product> {
        get_by_id(&self.pool, ctx, &PRODUCT_COLUMNS, id)
            .await
            .context("ProductRepo.get_product")
    }

    #[instrument(skip(self, ctx, product), fields(request_id = %ctx.request_id()))]
    async fn update_product(&self, ctx: &RequestContext, product: &mut Product) -> StoreResult<()> {
        let id = require_id(&product.id, Product::TYPE_NAME).context("ProductRepo.update_product")?;
        let stmt = product_update(product, id, Utc::now());
        let updated_at = update_by_id::<Product>(&self.pool, ctx, stmt, id)
            .await
            .context("ProductRepo.update_product")?;
        product.updated_at = Some(updated_at);
        Ok(())
    }

    #[instrument(skip(self, ctx), fields(request_id = %ctx.request_id()))]
    async fn delete_product(&self, ctx: &RequestContext, id: &str) -> StoreResult<()> {
        delete_by_id::<Product>(&self.pool, ctx, id)
            .await
            .context("ProductRepo.delete_product")
    }

    #[instrument(skip(self, ctx, category), fields(request_id = %ctx.request_id()))]
    async fn create_category(
        &self,
        ctx: &RequestContext,
        category: &mut Category,
    ) -> StoreResult<()> {
        let row = insert_returning(&self.pool, ctx, category_insert(category, Utc::now()))
            .await
            .context("ProductRepo.create_category")?;
        (category.id, category.created_at, category.updated_at) = row.into_fields();
        Ok(())
    }

    #[instrument(skip(self, ctx), fields(request_id = %ctx.request_id()))]
    async fn get_category(&self, ctx: &RequestContext, id: &str) -> StoreResult<Category> {
        get_by_id(&self.pool, ctx, &CATEGORY_COLUMNS, id)
            .await
            .context("ProductRepo.get_category")
    }

    #[instrument(skip(self, ctx, category), fields(request_id = %ctx.request_id()))]
    async fn update_category(
        &self,
        ctx: &RequestContext,
        category: &mut Category,
    ) -> StoreResult<()> {
        let id =
            require_id(&category.id, Category::TYPE_NAME).context("ProductRepo.update_category")?;
        let stmt = category_update(category, id, Utc::now());
        let updated_at = update_by_id::<Category>(&self.pool, ctx, stmt, id)
            .await
            .context("ProductRepo.update_category")?;
        category.updated_at = Some(updated_at);
        Ok(())
    }

    #[instrument(skip(self, ctx), fields(request_id = %ctx.request_id()))]
    async fn delete_category(&self, ctx: &RequestContext, id: &str) -> StoreResult<()> {
        delete_by_id::<Category>(&self.pool, ctx, id)
            .await
            .context("ProductRepo.delete_category")
    }

    #[instrument(skip(self, ctx, attribute), fields(request_id = %ctx.request_id()))]
    async fn create_attribute(
        &self,
        ctx: &RequestContext,
        attribute: &mut Attribute,
    ) -> StoreResult<()> {
        let row = insert_returning(&self.pool, ctx, attribute_insert(attribute, Utc::now()))
            .await
            .context("ProductRepo.create_attribute")?;
        (attribute.id, attribute.created_at, attribute.updated_at) = row.into_fields();
        Ok(())
    }

    #[instrument(skip(self, ctx), fields(request_id = %ctx.request_id()))]
    async fn get_attribute(&self, ctx: &RequestContext, id: &str) -> StoreResult<Attribute> {
        get_by_id(&self.pool, ctx, &ATTRIBUTE_COLUMNS, id)
            .await
            .context("ProductRepo.get_attribute")
    }

    #[instrument(skip(self, ctx, attribute), fields(request_id = %ctx.request_id()))]
    async fn update_attribute(
        &self,
        ctx: &RequestContext,
        attribute: &mut Attribute,
    ) -> StoreResult<()> {
        let id = require_id(&attribute.id, Attribute::TYPE_NAME)
            .context("ProductRepo.update_attribute")?;
        let stmt = attribute_update(attribute, id, Utc::now());
        let updated_at = update_by_id::<Attribute>(&self.pool, ctx, stmt, id)
            .await
            .context("ProductRepo.update_attribute")?;
        attribute.updated_at = Some(updated_at);
        Ok(())
    }

    #[instrument(skip(self, ctx), fields(request_id = %ctx.request_id()))]
    async fn delete_attribute(&self, ctx: &RequestContext, id: &str) -> StoreResult<()> {
        delete_by_id::<Attribute>(&self.pool, ctx, id)
            .await
            .context("ProductRepo.delete_attribute")
    }

    #[instrument(skip(self, ctx, order), fields(request_id = %ctx.request_id()))]
    async fn create_order(&self, ctx: &RequestContext, order: &mut Order) -> StoreResult<()> {
        order.status_changed_time = store_precision(order.status_changed_time);
        let row = insert_returning(&self.pool, ctx, order_insert(order, Utc::now()))
            .await
            .context("ProductRepo.create_order")?;
        (order.id, order.created_at, order.updated_at) = row.into_fields();
        Ok(())
    }

    #[instrument(skip(self, ctx), fields(request_id = %ctx.request_id()))]
    async fn get_order(&self, ctx: &RequestContext, id: &str) -> StoreResult<Order> {
        get_by_id(&self.pool, ctx, &ORDER_COLUMNS, id)
            .await
            .context("ProductRepo.get_order")
    }

    #[instrument(skip(self, ctx, order), fields(request_id = %ctx.request_id()))]
    async fn update_order(&self, ctx: &RequestContext, order: &mut Order) -> StoreResult<()> {
        order.status_changed_time = store_precision(order.status_changed_time);
        let id = require_id(&order.id, Order::TYPE_NAME).context("ProductRepo.update_order")?;
        let stmt = order_update(order, id, Utc::now());
        let updated_at = update_by_id::<Order>(&self.pool, ctx, stmt, id)
            .await
            .context("ProductRepo.update_order")?;
        order.updated_at = Some(updated_at);
        Ok(())
    }

    #[instrument(skip(self, ctx), fields(request_id = %ctx.request_id()))]
    async fn delete_order(&self, ctx: &RequestContext, id: &str) -> StoreResult<()> {
        delete_by_id::<Order>(&self.pool, ctx, id)
            .await
            .context("ProductRepo.delete_order")
    }

    #[instrument(skip(self, ctx, order_products), fields(request_id = %ctx.request_id()))]
    async fn create_order_products(
        &self,
        ctx: &RequestContext,
        order_products: &mut OrderProducts,
    ) -> StoreResult<()> {
        let stmt = order_products_insert(order_products, Utc::now());
        let row = insert_returning(&self.pool, ctx, stmt)
            .await
            .context("ProductRepo.create_order_products")?;
        (
            order_products.id,
            order_products.created_at,
            order_products.updated_at,
        ) = row.into_fields();
        Ok(())
    }

    #[instrument(skip(self, ctx), fields(request_id = %ctx.request_id()))]
    async fn get_order_products(
        &self,
        ctx: &RequestContext,
        id: &str,
    ) -> StoreResult<OrderProducts> {
        get_by_id(&self.pool, ctx, &ORDER_PRODUCTS_COLUMNS, id)
            .await
            .context("ProductRepo.get_order_products")
    }

    #[instrument(skip(self, ctx, order_products), fields(request_id = %ctx.request_id()))]
    async fn update_order_products(
        &self,
        ctx: &RequestContext,
        order_products: &mut OrderProducts,
    ) -> StoreResult<()> {
        let id = require_id(&order_products.id, OrderProducts::TYPE_NAME)
            .context("ProductRepo.update_order_products")?;
        let stmt = order_products_update(order_products, id, Utc::now());
        let updated_at = update_by_id::<OrderProducts>(&self.pool, ctx, stmt, id)
            .await
            .context("ProductRepo.update_order_products")?;
        order_products.updated_at = Some(updated_at);
        Ok(())
    }

    #[instrument(skip(self, ctx), fields(request_id = %ctx.request_id()))]
    async fn delete_order_products(&self, ctx: &RequestContext, id: &str) -> StoreResult<()> {
        delete_by_id::<OrderProducts>(&self.pool, ctx, id)
            .await
            .context("ProductRepo.delete_order_products")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seller_queries::SqlValue;

    fn widget() -> Product {
        Product {
            name: "Widget".to_string(),
            category_id: "c1".to_string(),
            cost: 500,
            ..Default::default()
        }
    }

    #[test]
    fn test_product_insert_shape() {
        let now = Utc::now();
        let stmt = product_insert(&widget(), now).unwrap();

        assert_eq!(
            stmt.sql,
            r#"INSERT INTO "product" ("name", "category_id", "short_info", "description", "cost", "count", "discount_cost", "discount", "created_at", "updated_at") VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING "id", "created_at", "updated_at""#
        );
        assert_eq!(stmt.placeholder_count(), 10);
        assert_eq!(stmt.args[0], SqlValue::from("Widget"));
        assert_eq!(stmt.args[1], SqlValue::from("c1"));
        assert_eq!(stmt.args[4], SqlValue::BigInt(500));
        assert_eq!(stmt.args[5], SqlValue::Int(0));
        assert_eq!(stmt.args[9], SqlValue::from(now));
    }

    #[test]
    fn test_product_update_never_touches_created_at() {
        let stmt = product_update(&widget(), "p1", Utc::now()).unwrap();
        assert!(!stmt.sql.contains("created_at"));
        assert!(stmt.sql.ends_with(r#"WHERE "id" = $10 RETURNING "updated_at""#));
        assert_eq!(stmt.args.last(), Some(&SqlValue::from("p1")));
    }

    #[test]
    fn test_order_binds_null_status_time() {
        let order = Order {
            user_id: "u1".to_string(),
            integration_id: "i1".to_string(),
            status: "new".to_string(),
            total_cost: 1200,
            ..Default::default()
        };
        let stmt = order_insert(&order, Utc::now()).unwrap();
        assert!(stmt.sql.starts_with(r#"INSERT INTO "order" "#));
        assert_eq!(stmt.args[3], SqlValue::Timestamp(None));
    }

    #[test]
    fn test_select_columns_cover_models() {
        assert_eq!(PRODUCT_COLUMNS.len(), 11);
        assert_eq!(ORDER_COLUMNS[0], "id");
        assert!(ORDER_PRODUCTS_COLUMNS.contains(&"product_id"));
        assert!(ATTRIBUTE_COLUMNS.contains(&"category_id"));
        assert!(CATEGORY_COLUMNS.contains(&"updated_at"));
    }
}
