//! Schema introspection.
//!
//! Reads `information_schema` on demand and shapes the flat catalog rows
//! into a per-table report. Nothing is cached; each call sees the catalog
//! as of its own snapshot. Columns joined against `key_column_usage` and
//! `table_constraints` can appear once per constraint they participate in;
//! those duplicate rows are preserved as-is.

use crate::error::{DbError, DbResult};
use crate::models::{ColumnDescriptor, SchemaReport, TableReport};
use sqlx::PgConnection;
use tracing::debug;

const ALL_TABLES_SQL: &str = r#"
SELECT
    c.table_name,
    c.column_name,
    c.data_type,
    c.is_nullable,
    c.column_default,
    c.character_maximum_length,
    tc.constraint_type
FROM information_schema.columns c
LEFT JOIN information_schema.key_column_usage kcu
    ON c.table_name = kcu.table_name
    AND c.column_name = kcu.column_name
    AND c.table_schema = kcu.table_schema
LEFT JOIN information_schema.table_constraints tc
    ON kcu.constraint_name = tc.constraint_name
    AND kcu.table_schema = tc.table_schema
WHERE c.table_schema = $1
ORDER BY c.table_name, c.ordinal_position
"#;

const SINGLE_TABLE_SQL: &str = r#"
SELECT
    c.table_name,
    c.column_name,
    c.data_type,
    c.is_nullable,
    c.column_default,
    c.character_maximum_length,
    tc.constraint_type
FROM information_schema.columns c
LEFT JOIN information_schema.key_column_usage kcu
    ON c.table_name = kcu.table_name
    AND c.column_name = kcu.column_name
    AND c.table_schema = kcu.table_schema
LEFT JOIN information_schema.table_constraints tc
    ON kcu.constraint_name = tc.constraint_name
    AND kcu.table_schema = tc.table_schema
WHERE c.table_schema = $1
    AND c.table_name = $2
ORDER BY c.ordinal_position
"#;

/// One flat catalog row before grouping.
#[derive(Debug, sqlx::FromRow)]
struct CatalogRow {
    table_name: String,
    column_name: String,
    data_type: String,
    /// "YES" or "NO" per the SQL standard
    is_nullable: String,
    column_default: Option<String>,
    character_maximum_length: Option<i32>,
    constraint_type: Option<String>,
}

/// Reads table and column definitions from the information schema.
pub struct SchemaInspector;

impl SchemaInspector {
    /// Describe all tables in a schema, or a single table when `table` is
    /// given. A table filter that matches nothing yields an empty report.
    pub async fn describe(
        conn: &mut PgConnection,
        schema: &str,
        table: Option<&str>,
    ) -> DbResult<SchemaReport> {
        debug!(schema = %schema, table = ?table, "Inspecting schema");

        let rows: Vec<CatalogRow> = match table {
            Some(table) => sqlx::query_as(SINGLE_TABLE_SQL)
                .bind(schema)
                .bind(table)
                .fetch_all(conn)
                .await
                .map_err(DbError::from)?,
            None => sqlx::query_as(ALL_TABLES_SQL)
                .bind(schema)
                .fetch_all(conn)
                .await
                .map_err(DbError::from)?,
        };

        Ok(group_rows(schema, rows))
    }
}

/// Group ordered catalog rows into per-table reports.
///
/// Relies on the query's ORDER BY: rows for one table are contiguous and
/// columns arrive in ordinal position.
fn group_rows(schema: &str, rows: Vec<CatalogRow>) -> SchemaReport {
    let mut tables: Vec<TableReport> = Vec::new();

    for row in rows {
        let column = ColumnDescriptor {
            column_name: row.column_name,
            data_type: row.data_type,
            is_nullable: row.is_nullable == "YES",
            column_default: row.column_default,
            max_length: row.character_maximum_length,
            constraint_type: row.constraint_type,
        };

        match tables.last_mut() {
            Some(last) if last.table == row.table_name => last.columns.push(column),
            _ => tables.push(TableReport {
                table: row.table_name,
                columns: vec![column],
            }),
        }
    }

    let table_count = tables.len();
    SchemaReport {
        schema: schema.to_string(),
        tables,
        table_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(table: &str, column: &str, constraint: Option<&str>) -> CatalogRow {
        CatalogRow {
            table_name: table.to_string(),
            column_name: column.to_string(),
            data_type: "integer".to_string(),
            is_nullable: "NO".to_string(),
            column_default: None,
            character_maximum_length: None,
            constraint_type: constraint.map(str::to_string),
        }
    }

    #[test]
    fn test_group_empty_rows() {
        let report = group_rows("public", Vec::new());
        assert_eq!(report.table_count, 0);
        assert!(report.tables.is_empty());
        assert_eq!(report.schema, "public");
    }

    #[test]
    fn test_group_preserves_table_order() {
        let rows = vec![
            row("accounts", "id", Some("PRIMARY KEY")),
            row("accounts", "owner", None),
            row("users", "id", Some("PRIMARY KEY")),
        ];
        let report = group_rows("public", rows);
        assert_eq!(report.table_count, 2);
        assert_eq!(report.tables[0].table, "accounts");
        assert_eq!(report.tables[0].columns.len(), 2);
        assert_eq!(report.tables[1].table, "users");
    }

    #[test]
    fn test_group_keeps_duplicate_constraint_rows() {
        // A column in both a PK and an FK shows up twice in the join output.
        let rows = vec![
            row("orders", "user_id", Some("FOREIGN KEY")),
            row("orders", "user_id", Some("UNIQUE")),
        ];
        let report = group_rows("public", rows);
        assert_eq!(report.table_count, 1);
        assert_eq!(report.tables[0].columns.len(), 2);
    }

    #[test]
    fn test_nullable_flag_parsed() {
        let mut catalog_row = row("t", "c", None);
        catalog_row.is_nullable = "YES".to_string();
        let report = group_rows("public", vec![catalog_row]);
        assert!(report.tables[0].columns[0].is_nullable);
    }
}
