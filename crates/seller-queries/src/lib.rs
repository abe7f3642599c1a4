//! # seller-queries
//!
//! Fluent, side-effect free construction of parameterized PostgreSQL statements.
//!
//! ```
//! use seller_queries::{insert, SqlValue};
//!
//! let stmt = insert("category")
//!     .columns(["name", "created_at", "updated_at"])
//!     .values([
//!         SqlValue::from("Shoes"),
//!         SqlValue::Timestamp(None),
//!         SqlValue::Timestamp(None),
//!     ])
//!     .returning(["id"])
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(
//!     stmt.sql,
//!     r#"INSERT INTO "category" ("name", "created_at", "updated_at") VALUES ($1, $2, $3) RETURNING "id""#
//! );
//! assert_eq!(stmt.args.len(), 3);
//! ```

pub mod builder;
pub mod statement;
pub mod value;

pub use builder::{delete, insert, select, update, Delete, Insert, Select, Update};
pub use statement::{BuildError, Statement};
pub use value::SqlValue;
