//! Bindable argument values

use chrono::{DateTime, NaiveDate, Utc};

/// A positional argument of a [`Statement`](crate::Statement).
///
/// Nullable variants carry their type so the store can infer the parameter type even
/// when the value is `NULL`.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Text(String),
    Int(i32),
    BigInt(i64),
    Date(Option<NaiveDate>),
    Timestamp(Option<DateTime<Utc>>),
}

impl SqlValue {
    /// Postgres type name, used in statement logs
    pub fn type_name(&self) -> &'static str {
        match self {
            SqlValue::Text(_) => "text",
            SqlValue::Int(_) => "int4",
            SqlValue::BigInt(_) => "int8",
            SqlValue::Date(_) => "date",
            SqlValue::Timestamp(_) => "timestamptz",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Date(None) | SqlValue::Timestamp(None))
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

impl From<&String> for SqlValue {
    fn from(value: &String) -> Self {
        SqlValue::Text(value.clone())
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<i32> for SqlValue {
    fn from(value: i32) -> Self {
        SqlValue::Int(value)
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::BigInt(value)
    }
}

impl From<NaiveDate> for SqlValue {
    fn from(value: NaiveDate) -> Self {
        SqlValue::Date(Some(value))
    }
}

impl From<Option<NaiveDate>> for SqlValue {
    fn from(value: Option<NaiveDate>) -> Self {
        SqlValue::Date(value)
    }
}

impl From<DateTime<Utc>> for SqlValue {
    fn from(value: DateTime<Utc>) -> Self {
        SqlValue::Timestamp(Some(value))
    }
}

impl From<Option<DateTime<Utc>>> for SqlValue {
    fn from(value: Option<DateTime<Utc>>) -> Self {
        SqlValue::Timestamp(value)
    }
}
