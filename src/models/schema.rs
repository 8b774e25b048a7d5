//! Schema introspection models.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One column of a table, as reported by the information schema.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ColumnDescriptor {
    pub column_name: String,
    /// Declared type as reported by the catalog (e.g. "integer", "text")
    pub data_type: String,
    pub is_nullable: bool,
    /// Default expression, if any (e.g. "nextval('users_id_seq'::regclass)")
    pub column_default: Option<String>,
    /// Maximum character length for bounded text types
    pub max_length: Option<i32>,
    /// Constraint participation (e.g. "PRIMARY KEY", "FOREIGN KEY")
    pub constraint_type: Option<String>,
}

/// A table and its columns, in catalog ordinal order.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TableReport {
    pub table: String,
    pub columns: Vec<ColumnDescriptor>,
}

/// Full introspection report for one schema.
///
/// Tables appear in name order; a filter on a table that does not exist
/// yields an empty report rather than an error.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SchemaReport {
    pub schema: String,
    pub tables: Vec<TableReport>,
    pub table_count: usize,
}

impl SchemaReport {
    /// Report for a schema (or table filter) that matched nothing.
    pub fn empty(schema: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            tables: Vec::new(),
            table_count: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report() {
        let report = SchemaReport::empty("public");
        assert_eq!(report.schema, "public");
        assert_eq!(report.table_count, 0);
        assert!(report.tables.is_empty());
    }

    #[test]
    fn test_report_serialization() {
        let report = SchemaReport {
            schema: "public".to_string(),
            tables: vec![TableReport {
                table: "users".to_string(),
                columns: vec![ColumnDescriptor {
                    column_name: "id".to_string(),
                    data_type: "integer".to_string(),
                    is_nullable: false,
                    column_default: Some("nextval('users_id_seq'::regclass)".to_string()),
                    max_length: None,
                    constraint_type: Some("PRIMARY KEY".to_string()),
                }],
            }],
            table_count: 1,
        };

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["table_count"], 1);
        assert_eq!(json["tables"][0]["table"], "users");
        assert_eq!(json["tables"][0]["columns"][0]["is_nullable"], false);
    }
}
