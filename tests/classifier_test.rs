//! Classification properties for the query admission gate.
//!
//! These tests exercise the classifier through the public API only, with
//! no database involved: every verdict here must hold before a connection
//! is ever acquired.

use agents_db_server::db::{QueryCategory, Verdict, classify};

fn rejection_reason(sql: &str, category: QueryCategory) -> String {
    match classify(sql, category) {
        Verdict::Rejected { reason } => reason,
        Verdict::Allowed => panic!("expected {sql:?} to be rejected"),
    }
}

#[test]
fn select_variants_are_admitted() {
    let queries = [
        "SELECT 1",
        "select * from users",
        "  \n\tSELECT id, name FROM users WHERE id = $1",
        "SELECT count(*) FROM orders GROUP BY status",
        "SELECT a.id FROM a JOIN b ON a.id = b.a_id",
    ];
    for sql in queries {
        assert!(
            classify(sql, QueryCategory::Read).is_allowed(),
            "{sql:?} should be admitted"
        );
    }
}

#[test]
fn non_select_entry_is_rejected_with_routing_hint() {
    for sql in ["INSERT INTO t VALUES (1)", "UPDATE t SET x = 1", "WITH c AS (SELECT 1) SELECT * FROM c"] {
        let reason = rejection_reason(sql, QueryCategory::Read);
        assert!(reason.contains("Only SELECT queries are allowed"), "{sql:?}: {reason}");
    }
}

#[test]
fn embedded_write_keywords_are_rejected_on_read_path() {
    let cases = [
        ("SELECT 1; DROP TABLE users", "DROP"),
        ("SELECT 1; DELETE FROM users", "DELETE"),
        ("SELECT * FROM t WHERE x = 1 UNION SELECT 1 ; INSERT INTO t VALUES (2)", "INSERT"),
        ("SELECT 1; TRUNCATE audit_log", "TRUNCATE"),
    ];
    for (sql, keyword) in cases {
        let reason = rejection_reason(sql, QueryCategory::Read);
        assert!(
            reason.contains(keyword),
            "{sql:?} should name {keyword}: {reason}"
        );
    }
}

#[test]
fn keyword_substrings_in_identifiers_are_admitted() {
    // Token-exact scan: column names merely containing a keyword are fine.
    let queries = [
        "SELECT updated_at FROM users",
        "SELECT created_at, deleted_by FROM audit_log",
        "SELECT inserted_count FROM stats",
        "SELECT * FROM table_alterations",
    ];
    for sql in queries {
        assert!(
            classify(sql, QueryCategory::Read).is_allowed(),
            "{sql:?} should be admitted"
        );
    }
}

#[test]
fn write_verbs_are_admitted() {
    let queries = [
        "INSERT INTO users (name) VALUES ($1)",
        "update users set name = $1 where id = $2",
        "DELETE FROM users WHERE id = $1",
    ];
    for sql in queries {
        assert!(
            classify(sql, QueryCategory::Write).is_allowed(),
            "{sql:?} should be admitted"
        );
    }
}

#[test]
fn select_on_write_path_is_redirected() {
    let reason = rejection_reason("SELECT * FROM users", QueryCategory::Write);
    assert!(reason.contains("Use execute_select"));
}

#[test]
fn ddl_is_rejected_on_write_path_naming_keyword() {
    let cases = [
        ("DROP TABLE users", "DROP"),
        ("CREATE TABLE t (id int)", "CREATE"),
        ("TRUNCATE t", "TRUNCATE"),
        ("GRANT ALL ON t TO public", "GRANT"),
        ("REVOKE ALL ON t FROM public", "REVOKE"),
    ];
    for (sql, keyword) in cases {
        let reason = rejection_reason(sql, QueryCategory::Write);
        assert!(
            reason.contains(&format!("forbidden keyword: {keyword}")),
            "{sql:?}: {reason}"
        );
    }

    // DDL smuggled after a write verb trips the deny-list instead.
    let reason = rejection_reason("DELETE FROM t; DROP TABLE t", QueryCategory::Write);
    assert!(reason.contains("forbidden keyword: DROP"));

    let reason = rejection_reason(
        "INSERT INTO t VALUES (1); GRANT ALL ON t TO public",
        QueryCategory::Write,
    );
    assert!(reason.contains("forbidden keyword: GRANT"));
}

#[test]
fn empty_and_whitespace_queries_are_rejected_on_both_paths() {
    for category in [QueryCategory::Read, QueryCategory::Write] {
        for sql in ["", "   ", "\n\t"] {
            assert!(
                !classify(sql, category).is_allowed(),
                "{sql:?} should be rejected"
            );
        }
    }
}

#[test]
fn classification_is_case_insensitive() {
    assert!(classify("SeLeCt * FrOm users", QueryCategory::Read).is_allowed());
    assert!(!classify("SELECT 1; dRoP TABLE t", QueryCategory::Read).is_allowed());
    assert!(classify("iNsErT INTO t VALUES (1)", QueryCategory::Write).is_allowed());
}

#[test]
fn classification_is_deterministic() {
    let samples = [
        ("SELECT * FROM users", QueryCategory::Read),
        ("SELECT 1; DROP TABLE t", QueryCategory::Read),
        ("DELETE FROM t WHERE id = 1", QueryCategory::Write),
        ("GRANT ALL ON t TO public", QueryCategory::Write),
        ("", QueryCategory::Read),
    ];
    for (sql, category) in samples {
        let first = classify(sql, category);
        for _ in 0..3 {
            assert_eq!(classify(sql, category), first);
        }
    }
}
