//! Product aggregate: catalog and orders
//!
//! Tables: product, category, attribute, order, order_products

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::Id;

/// Product entity
///
/// Money amounts are integers in the smallest currency unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow, Validate)]
pub struct Product {
    #[serde(default)]
    pub id: Option<Id>,

    #[validate(length(min = 1, max = 255))]
    pub name: String,

    #[validate(length(min = 1))]
    pub category_id: String,

    #[serde(default)]
    #[validate(length(max = 1024))]
    pub short_info: String,

    #[serde(default)]
    pub description: String,

    #[validate(range(min = 0))]
    pub cost: i64,

    /// Units in stock
    #[serde(default)]
    #[validate(range(min = 0))]
    pub count: i32,

    #[serde(default)]
    #[validate(range(min = 0))]
    pub discount_cost: i64,

    /// Discount in percent
    #[serde(default)]
    #[validate(range(min = 0, max = 100))]
    pub discount: i32,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl_entity!(Product, "product", "Product");

/// Category entity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow, Validate)]
pub struct Category {
    #[serde(default)]
    pub id: Option<Id>,

    #[validate(length(min = 1, max = 255))]
    pub name: String,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl_entity!(Category, "category", "Category");

/// Attribute entity
///
/// A named property products of a category carry (size, colour, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow, Validate)]
pub struct Attribute {
    #[serde(default)]
    pub id: Option<Id>,

    #[validate(length(min = 1, max = 255))]
    pub name: String,

    #[validate(length(min = 1))]
    pub category_id: String,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl_entity!(Attribute, "attribute", "Attribute");

/// Order entity
///
/// Creating an order does not create its [`OrderProducts`] rows; callers sequence those
/// themselves.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow, Validate)]
pub struct Order {
    #[serde(default)]
    pub id: Option<Id>,

    #[validate(length(min = 1))]
    pub user_id: String,

    #[validate(length(min = 1))]
    pub integration_id: String,

    #[validate(length(min = 1, max = 64))]
    pub status: String,

    #[serde(default)]
    pub status_changed_time: Option<DateTime<Utc>>,

    #[serde(default)]
    #[validate(range(min = 0))]
    pub total_cost: i64,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl_entity!(Order, "order", "Order");

/// Order line: join entity between [`Order`] and [`Product`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow, Validate)]
pub struct OrderProducts {
    #[serde(default)]
    pub id: Option<Id>,

    #[validate(length(min = 1))]
    pub order_id: String,

    #[validate(length(min = 1))]
    pub product_id: String,

    #[validate(range(min = 1))]
    pub count: i32,

    #[validate(range(min = 0))]
    pub cost: i64,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl_entity!(OrderProducts, "order_products", "OrderProducts");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Entity;

    #[test]
    fn test_product_validation() {
        let product = Product {
            name: "Widget".to_string(),
            category_id: "c1".to_string(),
            cost: 500,
            count: 3,
            discount: 10,
            discount_cost: 450,
            ..Default::default()
        };
        assert!(product.validate().is_ok());

        let too_generous = Product {
            discount: 150,
            ..product
        };
        let errors = too_generous.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("discount"));
    }

    #[test]
    fn test_order_products_requires_positive_count() {
        let line = OrderProducts {
            order_id: "o1".to_string(),
            product_id: "p1".to_string(),
            count: 0,
            cost: 100,
            ..Default::default()
        };
        assert!(line.validate().is_err());
    }

    #[test]
    fn test_empty_references_are_rejected() {
        let attribute = Attribute {
            name: "size".to_string(),
            ..Default::default()
        };
        let errors = attribute.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("category_id"));

        let order = Order {
            status: "new".to_string(),
            ..Default::default()
        };
        let errors = order.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("user_id"));
        assert!(errors.field_errors().contains_key("integration_id"));

        let line = OrderProducts {
            count: 1,
            ..Default::default()
        };
        let errors = line.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("order_id"));
        assert!(errors.field_errors().contains_key("product_id"));
    }

    #[test]
    fn test_order_deserializes_with_defaults() {
        let order: Order = serde_json::from_str(
            r#"{"user_id":"u1","integration_id":"i1","status":"new"}"#,
        )
        .unwrap();
        assert_eq!(order.total_cost, 0);
        assert!(order.status_changed_time.is_none());
        assert_eq!(Order::TABLE_NAME, "order");
    }
}
