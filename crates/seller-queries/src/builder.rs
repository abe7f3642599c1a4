//! Statement builders
//!
//! Builder methods only record the description; every check happens in `build()`, so a
//! malformed description is reported before the caller touches the pool.

use crate::statement::{quote_columns, quote_ident, quote_table, BuildError, Statement};
use crate::value::SqlValue;

/// Start an `INSERT INTO table`
pub fn insert(table: &str) -> Insert<'_> {
    Insert {
        table,
        columns: Vec::new(),
        values: Vec::new(),
        returning: Vec::new(),
    }
}

/// Start a `SELECT columns`
pub fn select<'a>(columns: impl IntoIterator<Item = &'a str>) -> Select<'a> {
    Select {
        columns: columns.into_iter().collect(),
        table: "",
        predicates: Vec::new(),
    }
}

/// Start an `UPDATE table`
pub fn update(table: &str) -> Update<'_> {
    Update {
        table,
        assignments: Vec::new(),
        predicates: Vec::new(),
        returning: Vec::new(),
    }
}

/// Start a `DELETE FROM table`
pub fn delete(table: &str) -> Delete<'_> {
    Delete {
        table,
        predicates: Vec::new(),
    }
}

/// Render `"col" = $n AND ...`, numbering from `next`.
fn render_predicates(
    predicates: &[(&str, SqlValue)],
    next: &mut usize,
    args: &mut Vec<SqlValue>,
) -> Result<String, BuildError> {
    let mut parts = Vec::with_capacity(predicates.len());
    for (column, value) in predicates {
        parts.push(format!("{} = ${}", quote_ident(column)?, next));
        *next += 1;
        args.push(value.clone());
    }
    Ok(parts.join(" AND "))
}

fn render_returning(returning: &[&str]) -> Result<String, BuildError> {
    if returning.is_empty() {
        return Ok(String::new());
    }
    Ok(format!(" RETURNING {}", quote_columns(returning)?.join(", ")))
}

/// Builder for `INSERT` statements
#[derive(Debug, Clone)]
pub struct Insert<'a> {
    table: &'a str,
    columns: Vec<&'a str>,
    values: Vec<SqlValue>,
    returning: Vec<&'a str>,
}

impl<'a> Insert<'a> {
    pub fn columns(mut self, columns: impl IntoIterator<Item = &'a str>) -> Self {
        self.columns.extend(columns);
        self
    }

    pub fn values<V: Into<SqlValue>>(mut self, values: impl IntoIterator<Item = V>) -> Self {
        self.values.extend(values.into_iter().map(Into::into));
        self
    }

    /// Add one column together with its value
    pub fn value(mut self, column: &'a str, value: impl Into<SqlValue>) -> Self {
        self.columns.push(column);
        self.values.push(value.into());
        self
    }

    pub fn returning(mut self, columns: impl IntoIterator<Item = &'a str>) -> Self {
        self.returning.extend(columns);
        self
    }

    pub fn build(self) -> Result<Statement, BuildError> {
        let table = quote_table(self.table)?;
        let columns = quote_columns(&self.columns)?;
        if columns.len() != self.values.len() {
            return Err(BuildError::ValueCountMismatch {
                columns: columns.len(),
                values: self.values.len(),
            });
        }

        let placeholders: Vec<String> = (1..=columns.len()).map(|n| format!("${}", n)).collect();
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({}){}",
            table,
            columns.join(", "),
            placeholders.join(", "),
            render_returning(&self.returning)?,
        );

        Ok(Statement {
            sql,
            args: self.values,
        })
    }
}

/// Builder for `SELECT` statements
#[derive(Debug, Clone)]
pub struct Select<'a> {
    columns: Vec<&'a str>,
    table: &'a str,
    predicates: Vec<(&'a str, SqlValue)>,
}

impl<'a> Select<'a> {
    pub fn from(mut self, table: &'a str) -> Self {
        self.table = table;
        self
    }

    /// Add an equality predicate; multiple predicates are joined with `AND`
    pub fn where_eq(mut self, column: &'a str, value: impl Into<SqlValue>) -> Self {
        self.predicates.push((column, value.into()));
        self
    }

    pub fn build(self) -> Result<Statement, BuildError> {
        let table = quote_table(self.table)?;
        let columns = quote_columns(&self.columns)?;

        let mut sql = format!("SELECT {} FROM {}", columns.join(", "), table);
        let mut args = Vec::with_capacity(self.predicates.len());
        if !self.predicates.is_empty() {
            let mut next = 1;
            let predicate = render_predicates(&self.predicates, &mut next, &mut args)?;
            sql.push_str(" WHERE ");
            sql.push_str(&predicate);
        }

        Ok(Statement { sql, args })
    }
}

/// Builder for `UPDATE` statements
#[derive(Debug, Clone)]
pub struct Update<'a> {
    table: &'a str,
    assignments: Vec<(&'a str, SqlValue)>,
    predicates: Vec<(&'a str, SqlValue)>,
    returning: Vec<&'a str>,
}

impl<'a> Update<'a> {
    pub fn set(mut self, column: &'a str, value: impl Into<SqlValue>) -> Self {
        self.assignments.push((column, value.into()));
        self
    }

    pub fn where_eq(mut self, column: &'a str, value: impl Into<SqlValue>) -> Self {
        self.predicates.push((column, value.into()));
        self
    }

    pub fn returning(mut self, columns: impl IntoIterator<Item = &'a str>) -> Self {
        self.returning.extend(columns);
        self
    }

    pub fn build(self) -> Result<Statement, BuildError> {
        let table = quote_table(self.table)?;
        let names: Vec<&str> = self.assignments.iter().map(|(c, _)| *c).collect();
        let columns = quote_columns(&names)?;
        if self.predicates.is_empty() {
            return Err(BuildError::MissingPredicate("UPDATE"));
        }

        let mut args = Vec::with_capacity(self.assignments.len() + self.predicates.len());
        let mut sets = Vec::with_capacity(columns.len());
        for (n, (column, (_, value))) in columns.iter().zip(self.assignments).enumerate() {
            sets.push(format!("{} = ${}", column, n + 1));
            args.push(value);
        }

        let mut next = args.len() + 1;
        let predicate = render_predicates(&self.predicates, &mut next, &mut args)?;

        Ok(Statement {
            sql: format!(
                "UPDATE {} SET {} WHERE {}{}",
                table,
                sets.join(", "),
                predicate,
                render_returning(&self.returning)?,
            ),
            args,
        })
    }
}

/// Builder for `DELETE` statements
#[derive(Debug, Clone)]
pub struct Delete<'a> {
    table: &'a str,
    predicates: Vec<(&'a str, SqlValue)>,
}

impl<'a> Delete<'a> {
    pub fn where_eq(mut self, column: &'a str, value: impl Into<SqlValue>) -> Self {
        self.predicates.push((column, value.into()));
        self
    }

    pub fn build(self) -> Result<Statement, BuildError> {
        let table = quote_table(self.table)?;
        if self.predicates.is_empty() {
            return Err(BuildError::MissingPredicate("DELETE"));
        }

        let mut args = Vec::with_capacity(self.predicates.len());
        let mut next = 1;
        let predicate = render_predicates(&self.predicates, &mut next, &mut args)?;

        Ok(Statement {
            sql: format!("DELETE FROM {} WHERE {}", table, predicate),
            args,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_with_returning() {
        let stmt = insert("order_products")
            .columns(["order_id", "product_id", "count", "cost"])
            .values([
                SqlValue::from("o1"),
                SqlValue::from("p1"),
                SqlValue::from(2i32),
                SqlValue::from(900i64),
            ])
            .returning(["id", "created_at"])
            .build()
            .unwrap();

        assert_eq!(
            stmt.sql,
            r#"INSERT INTO "order_products" ("order_id", "product_id", "count", "cost") VALUES ($1, $2, $3, $4) RETURNING "id", "created_at""#
        );
        assert_eq!(stmt.args[2], SqlValue::Int(2));
        assert_eq!(stmt.placeholder_count(), 4);
    }

    #[test]
    fn test_insert_value_pairs() {
        let stmt = insert("integration")
            .value("name", "marketplace")
            .build()
            .unwrap();
        assert_eq!(stmt.sql, r#"INSERT INTO "integration" ("name") VALUES ($1)"#);
    }

    #[test]
    fn test_insert_count_mismatch() {
        let err = insert("category")
            .columns(["name", "created_at"])
            .values(["Shoes"])
            .build()
            .unwrap_err();
        assert_eq!(err, BuildError::ValueCountMismatch { columns: 2, values: 1 });
    }

    #[test]
    fn test_insert_without_columns() {
        let err = insert("category").build().unwrap_err();
        assert_eq!(err, BuildError::NoColumns);
    }

    #[test]
    fn test_select_by_id() {
        let stmt = select(["id", "name"])
            .from("user")
            .where_eq("id", "u1")
            .build()
            .unwrap();
        assert_eq!(stmt.sql, r#"SELECT "id", "name" FROM "user" WHERE "id" = $1"#);
        assert_eq!(stmt.args, vec![SqlValue::from("u1")]);
    }

    #[test]
    fn test_select_requires_table() {
        let err = select(["id"]).build().unwrap_err();
        assert_eq!(err, BuildError::EmptyTable);
    }

    #[test]
    fn test_update_numbers_predicate_after_assignments() {
        let stmt = update("role")
            .set("name", "admin")
            .set("client_type_id", "ct1")
            .where_eq("id", "r1")
            .build()
            .unwrap();
        assert_eq!(
            stmt.sql,
            r#"UPDATE "role" SET "name" = $1, "client_type_id" = $2 WHERE "id" = $3"#
        );
        assert_eq!(stmt.args.last(), Some(&SqlValue::from("r1")));
    }

    #[test]
    fn test_update_returning() {
        let stmt = update("category")
            .set("name", "Boots")
            .where_eq("id", "c1")
            .returning(["updated_at"])
            .build()
            .unwrap();
        assert_eq!(
            stmt.sql,
            r#"UPDATE "category" SET "name" = $1 WHERE "id" = $2 RETURNING "updated_at""#
        );
    }

    #[test]
    fn test_update_requires_predicate() {
        let err = update("role").set("name", "admin").build().unwrap_err();
        assert_eq!(err, BuildError::MissingPredicate("UPDATE"));
    }

    #[test]
    fn test_update_requires_assignment() {
        let err = update("role").where_eq("id", "r1").build().unwrap_err();
        assert_eq!(err, BuildError::NoColumns);
    }

    #[test]
    fn test_delete() {
        let stmt = delete("order").where_eq("id", "o1").build().unwrap();
        assert_eq!(stmt.sql, r#"DELETE FROM "order" WHERE "id" = $1"#);

        let err = delete("order").build().unwrap_err();
        assert_eq!(err, BuildError::MissingPredicate("DELETE"));
    }

    #[test]
    fn test_invalid_column_is_rejected() {
        let err = select(["id", "name FROM secrets --"])
            .from("product")
            .build()
            .unwrap_err();
        assert!(matches!(err, BuildError::InvalidIdentifier(_)));
    }
}
