//! # seller-models
//!
//! Domain entities for AI-Seller RS.
//!
//! Nine flat records, one table each. Every entity has a store-assigned string `id`
//! and `created_at`/`updated_at` timestamps that are `None` until the value has been
//! persisted.

pub use seller_core::traits::{Entity, Id, Identifiable, Timestamped};

/// Implements the core entity traits for a record with `id`, `created_at` and
/// `updated_at` fields.
macro_rules! impl_entity {
    ($ty:ty, $table:literal, $name:literal) => {
        impl $crate::Identifiable for $ty {
            fn id(&self) -> Option<&str> {
                self.id.as_deref()
            }
        }

        impl $crate::Timestamped for $ty {
            fn created_at(&self) -> Option<chrono::DateTime<chrono::Utc>> {
                self.created_at
            }

            fn updated_at(&self) -> Option<chrono::DateTime<chrono::Utc>> {
                self.updated_at
            }
        }

        impl $crate::Entity for $ty {
            const TABLE_NAME: &'static str = $table;
            const TYPE_NAME: &'static str = $name;
        }
    };
}

pub mod auth;
pub mod integration;
pub mod product;

pub use auth::{ClientType, Role, User};
pub use integration::Integration;
pub use product::{Attribute, Category, Order, OrderProducts, Product};
