//! Lexical query classification.
//!
//! Every raw SQL string entering the server passes through `classify` before
//! a connection is acquired. The check is deliberately lexical: the query is
//! trimmed, upper-cased, checked for the category's leading verb, and
//! scanned token-by-token against a deny-list. It is conservative (a column
//! alias that happens to equal a deny-listed keyword is rejected) and
//! incomplete (keywords hidden in SQL comments, quoted string literals, or
//! multi-statement batches are not caught). That trade-off is intentional:
//! this is an admission gate for a cooperating agent, not a SQL firewall,
//! and it must not grow into a full SQL parser.

/// Keywords that disqualify a read query (scanned after the leading SELECT).
pub const READ_DENYLIST: [&str; 7] = [
    "INSERT", "UPDATE", "DELETE", "DROP", "TRUNCATE", "ALTER", "CREATE",
];

/// Keywords that disqualify a write query (scanned over the whole text).
pub const WRITE_DENYLIST: [&str; 6] = ["DROP", "TRUNCATE", "ALTER", "CREATE", "GRANT", "REVOKE"];

/// Verbs a write query may start with.
pub const WRITE_VERBS: [&str; 3] = ["INSERT", "UPDATE", "DELETE"];

/// The entry point a query arrived through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryCategory {
    /// `execute_select`: must be a pure SELECT.
    Read,
    /// `execute_write`: must be INSERT, UPDATE, or DELETE.
    Write,
}

/// Admission verdict for a single query text.
///
/// Verdicts have no persistent identity; classification is a pure function
/// of the text and category and is recomputed on every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Allowed,
    Rejected { reason: String },
}

impl Verdict {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Verdict::Allowed)
    }

    fn rejected(reason: impl Into<String>) -> Self {
        Verdict::Rejected {
            reason: reason.into(),
        }
    }
}

/// Classify a raw query against its declared category.
pub fn classify(sql: &str, category: QueryCategory) -> Verdict {
    let normalized = sql.trim().to_uppercase();

    if normalized.is_empty() {
        return Verdict::rejected("Query is empty.");
    }

    match category {
        QueryCategory::Read => classify_read(&normalized),
        QueryCategory::Write => classify_write(&normalized),
    }
}

fn classify_read(normalized: &str) -> Verdict {
    if !normalized.starts_with("SELECT") {
        return Verdict::rejected(
            "Only SELECT queries are allowed. Use execute_write for INSERT, UPDATE, or DELETE.",
        );
    }

    // Scan everything after the leading verb, token-exact.
    let body = &normalized["SELECT".len()..];
    for keyword in READ_DENYLIST {
        if body.split_whitespace().any(|token| token == keyword) {
            return Verdict::rejected(format!(
                "Query contains forbidden keyword: {keyword}. Only pure SELECT queries are allowed."
            ));
        }
    }

    Verdict::Allowed
}

fn classify_write(normalized: &str) -> Verdict {
    // Deny-list first so DDL is rejected naming its keyword ("DROP TABLE x"
    // reports DROP), then the verb check catches everything else.
    for keyword in WRITE_DENYLIST {
        if normalized.split_whitespace().any(|token| token == keyword) {
            return Verdict::rejected(format!(
                "Query contains forbidden keyword: {keyword}. Only INSERT, UPDATE, and DELETE are allowed."
            ));
        }
    }

    if !WRITE_VERBS.iter().any(|verb| normalized.starts_with(verb)) {
        return Verdict::rejected(
            "Only INSERT, UPDATE, or DELETE queries are allowed. Use execute_select for SELECT queries.",
        );
    }

    Verdict::Allowed
}
