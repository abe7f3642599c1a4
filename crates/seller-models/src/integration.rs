//! Integration entity
//!
//! An external sales channel an order came through.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::Id;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow, Validate)]
pub struct Integration {
    #[serde(default)]
    pub id: Option<Id>,

    #[validate(length(min = 1, max = 255))]
    pub name: String,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl_entity!(Integration, "integration", "Integration");
