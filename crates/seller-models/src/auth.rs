//! Auth aggregate: users, roles and client types
//!
//! Tables: user, role, client_type

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::Id;

/// User entity
///
/// A customer or operator of the shop. Belongs to one [`Role`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow, Validate)]
pub struct User {
    #[serde(default)]
    pub id: Option<Id>,

    #[validate(length(min = 1, max = 255))]
    pub name: String,

    #[serde(default)]
    #[validate(length(max = 255))]
    pub surname: String,

    #[validate(length(min = 1, max = 255))]
    pub username: String,

    /// Never serialized back out
    #[serde(default, skip_serializing)]
    #[validate(length(min = 1))]
    pub password: String,

    #[serde(default)]
    pub birth_date: Option<NaiveDate>,

    /// Telegram handle
    #[serde(default)]
    pub tg_user_name: String,

    #[serde(default)]
    #[validate(length(max = 32))]
    pub phone: String,

    #[serde(default)]
    pub instagram: String,

    /// Acquisition channel
    #[serde(default)]
    pub client_from: String,

    #[validate(length(min = 1))]
    pub role_id: String,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl_entity!(User, "user", "User");

/// Role entity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow, Validate)]
pub struct Role {
    #[serde(default)]
    pub id: Option<Id>,

    #[validate(length(min = 1, max = 255))]
    pub name: String,

    #[validate(length(min = 1))]
    pub client_type_id: String,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl_entity!(Role, "role", "Role");

/// Client type entity (e.g. retail, wholesale)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow, Validate)]
pub struct ClientType {
    #[serde(default)]
    pub id: Option<Id>,

    #[validate(length(min = 1, max = 255))]
    pub name: String,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl_entity!(ClientType, "client_type", "ClientType");
