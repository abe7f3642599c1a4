//! Built statements and build errors

use thiserror::Error;

use crate::value::SqlValue;

/// SQL text plus its positional arguments.
///
/// `args[i]` binds placeholder `$i+1`.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub args: Vec<SqlValue>,
}

impl Statement {
    /// Number of `$n` placeholders the statement expects
    pub fn placeholder_count(&self) -> usize {
        self.args.len()
    }
}

/// Statement construction failure. Raised before any I/O.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("table name is empty")]
    EmptyTable,

    #[error("invalid identifier {0:?}")]
    InvalidIdentifier(String),

    #[error("no columns given")]
    NoColumns,

    #[error("column {0:?} given more than once")]
    DuplicateColumn(String),

    #[error("{columns} columns but {values} values")]
    ValueCountMismatch { columns: usize, values: usize },

    #[error("{0} without a WHERE predicate")]
    MissingPredicate(&'static str),
}

/// Validate an identifier and return it double-quoted.
///
/// Quoting makes reserved words such as `user` and `order` usable as table names.
pub(crate) fn quote_ident(ident: &str) -> Result<String, BuildError> {
    let mut chars = ident.chars();
    let valid_start = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_');
    if !valid_start || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(BuildError::InvalidIdentifier(ident.to_string()));
    }
    Ok(format!("\"{}\"", ident))
}

pub(crate) fn quote_table(table: &str) -> Result<String, BuildError> {
    if table.is_empty() {
        return Err(BuildError::EmptyTable);
    }
    quote_ident(table)
}

/// Quote a column list, rejecting duplicates.
pub(crate) fn quote_columns(columns: &[&str]) -> Result<Vec<String>, BuildError> {
    if columns.is_empty() {
        return Err(BuildError::NoColumns);
    }
    let mut quoted = Vec::with_capacity(columns.len());
    for (i, column) in columns.iter().enumerate() {
        if columns[..i].contains(column) {
            return Err(BuildError::DuplicateColumn(column.to_string()));
        }
        quoted.push(quote_ident(column)?);
    }
    Ok(quoted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_ident() {
        assert_eq!(quote_ident("user").unwrap(), "\"user\"");
        assert_eq!(quote_ident("_tmp1").unwrap(), "\"_tmp1\"");
        assert!(quote_ident("1abc").is_err());
        assert!(quote_ident("name; DROP TABLE user").is_err());
        assert!(quote_ident("").is_err());
    }

    #[test]
    fn test_quote_columns_rejects_duplicates() {
        let err = quote_columns(&["name", "cost", "name"]).unwrap_err();
        assert_eq!(err, BuildError::DuplicateColumn("name".to_string()));
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(quote_table("").unwrap_err(), BuildError::EmptyTable);
    }
}
