//! Dynamic WHERE clause builder for search queries

use sqlx::Sqlite;
use sqlx::query::QueryAs;
use sqlx::sqlite::SqliteArguments;

/// Collects conditions and their positional bindings in placeholder order
#[derive(Debug, Default)]
pub struct QueryBuilder {
    conditions: Vec<String>,
    bindings: Vec<QueryValue>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    Text(String),
    Integer(i64),
    Bool(bool),
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// `field = ?`
    pub fn add_eq(&mut self, field: &str, value: impl Into<String>) -> &mut Self {
        self.conditions.push(format!("{field} = ?"));
        self.bindings.push(QueryValue::Text(value.into()));
        self
    }

    /// `field = ?` when a value is given
    pub fn add_opt_eq(&mut self, field: &str, value: Option<&str>) -> &mut Self {
        if let Some(v) = value {
            self.add_eq(field, v);
        }
        self
    }

    /// `field = ?` for a boolean column when a value is given
    pub fn add_opt_bool(&mut self, field: &str, value: Option<bool>) -> &mut Self {
        if let Some(v) = value {
            self.conditions.push(format!("{field} = ?"));
            self.bindings.push(QueryValue::Bool(v));
        }
        self
    }

    /// `field IN (?, ...)`; no-op for an empty list
    pub fn add_in(&mut self, field: &str, values: &[String]) -> &mut Self {
        if values.is_empty() {
            return self;
        }
        self.conditions
            .push(format!("{field} IN ({})", placeholders(values.len())));
        self.bindings
            .extend(values.iter().cloned().map(QueryValue::Text));
        self
    }

    /// Containment over a JSON array column.
    ///
    /// With `all`, one EXISTS per code joined by AND (every code present).
    /// Otherwise a single EXISTS with IN (any code present).
    pub fn add_json_contains(&mut self, column: &str, codes: &[String], all: bool) -> &mut Self {
        if codes.is_empty() {
            return self;
        }
        if all {
            for code in codes {
                self.conditions.push(format!(
                    "EXISTS (SELECT 1 FROM json_each({column}) WHERE json_each.value = ?)"
                ));
                self.bindings.push(QueryValue::Text(code.clone()));
            }
        } else {
            self.conditions.push(format!(
                "EXISTS (SELECT 1 FROM json_each({column}) WHERE json_each.value IN ({}))",
                placeholders(codes.len())
            ));
            self.bindings
                .extend(codes.iter().cloned().map(QueryValue::Text));
        }
        self
    }

    /// Build WHERE clause (empty if no conditions)
    pub fn build_where_clause(&self) -> String {
        if self.conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.conditions.join(" AND "))
        }
    }

    /// LIMIT/OFFSET clause. Must be called after every condition so its
    /// bindings land last. SQLite needs a LIMIT before OFFSET, so an offset
    /// without a limit uses `LIMIT -1`.
    pub fn paginate(&mut self, limit: i64, offset: i64) -> String {
        let mut clause = String::new();
        if limit > 0 {
            clause.push_str(" LIMIT ?");
            self.bindings.push(QueryValue::Integer(limit));
        } else if offset > 0 {
            clause.push_str(" LIMIT -1");
        }
        if offset > 0 {
            clause.push_str(" OFFSET ?");
            self.bindings.push(QueryValue::Integer(offset));
        }
        clause
    }

    pub fn bindings(&self) -> &[QueryValue] {
        &self.bindings
    }

    /// Apply bindings to a SQLx query_as
    pub fn apply_bindings<'q, O>(
        &self,
        mut query: QueryAs<'q, Sqlite, O, SqliteArguments<'q>>,
    ) -> QueryAs<'q, Sqlite, O, SqliteArguments<'q>> {
        for binding in &self.bindings {
            query = match binding {
                QueryValue::Text(s) => query.bind(s.clone()),
                QueryValue::Integer(i) => query.bind(*i),
                QueryValue::Bool(b) => query.bind(*b),
            };
        }
        query
    }
}

fn placeholders(n: usize) -> String {
    vec!["?"; n].join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_where_clause() {
        let builder = QueryBuilder::new();
        assert_eq!(builder.build_where_clause(), "");
        assert!(builder.bindings().is_empty());
    }

    #[test]
    fn test_conditions_and_bindings_in_order() {
        let mut qb = QueryBuilder::new();
        qb.add_eq("tenant_id", "t1")
            .add_in("code", &["A".to_string(), "B".to_string()])
            .add_in("department", &[])
            .add_opt_eq("phone", None)
            .add_opt_bool("is_active", Some(false));

        assert_eq!(
            qb.build_where_clause(),
            " WHERE tenant_id = ? AND code IN (?, ?) AND is_active = ?"
        );
        assert_eq!(
            qb.bindings(),
            &[
                QueryValue::Text("t1".into()),
                QueryValue::Text("A".into()),
                QueryValue::Text("B".into()),
                QueryValue::Bool(false),
            ]
        );
    }

    #[test]
    fn test_json_contains_all_vs_any() {
        let codes = vec!["KA".to_string(), "KA-BLR".to_string()];

        let mut all = QueryBuilder::new();
        all.add_json_contains("boundary_relation", &codes, true);
        assert_eq!(
            all.build_where_clause().matches("EXISTS").count(),
            2,
            "one predicate per code"
        );

        let mut any = QueryBuilder::new();
        any.add_json_contains("boundary_relation", &codes, false);
        let clause = any.build_where_clause();
        assert_eq!(clause.matches("EXISTS").count(), 1);
        assert!(clause.contains("json_each.value IN (?, ?)"));
        assert_eq!(any.bindings().len(), 2);
    }

    #[test]
    fn test_paginate() {
        let mut qb = QueryBuilder::new();
        assert_eq!(qb.paginate(0, 0), "");
        assert_eq!(qb.paginate(10, 0), " LIMIT ?");
        assert_eq!(qb.paginate(0, 5), " LIMIT -1 OFFSET ?");
        assert_eq!(qb.paginate(10, 20), " LIMIT ? OFFSET ?");
        assert_eq!(
            qb.bindings(),
            &[
                QueryValue::Integer(10),
                QueryValue::Integer(5),
                QueryValue::Integer(10),
                QueryValue::Integer(20),
            ]
        );
    }
}
