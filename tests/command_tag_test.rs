//! Command tag parsing properties.
//!
//! The write path reports affected rows by parsing the statement's command
//! tag; these tests pin the tag grammar the rest of the server relies on.

use agents_db_server::db::parse_command_tag;

#[test]
fn insert_tag_skips_oid_field() {
    assert_eq!(parse_command_tag("INSERT 0 3"), ("INSERT".to_string(), 3));
    assert_eq!(parse_command_tag("INSERT 0 1"), ("INSERT".to_string(), 1));
    assert_eq!(parse_command_tag("INSERT 0 0"), ("INSERT".to_string(), 0));
}

#[test]
fn update_and_delete_tags() {
    assert_eq!(parse_command_tag("UPDATE 7"), ("UPDATE".to_string(), 7));
    assert_eq!(parse_command_tag("DELETE 0"), ("DELETE".to_string(), 0));
    assert_eq!(parse_command_tag("DELETE 1200"), ("DELETE".to_string(), 1200));
}

#[test]
fn single_token_tag_yields_zero_rows() {
    assert_eq!(parse_command_tag("COMMIT"), ("COMMIT".to_string(), 0));
}

#[test]
fn malformed_count_defaults_to_zero() {
    assert_eq!(parse_command_tag("UPDATE many"), ("UPDATE".to_string(), 0));
    assert_eq!(parse_command_tag("INSERT 0 x"), ("INSERT".to_string(), 0));
}

#[test]
fn empty_tag_is_unknown() {
    assert_eq!(parse_command_tag(""), ("UNKNOWN".to_string(), 0));
    assert_eq!(parse_command_tag("   "), ("UNKNOWN".to_string(), 0));
}

#[test]
fn extra_whitespace_is_tolerated() {
    assert_eq!(parse_command_tag("  UPDATE   4  "), ("UPDATE".to_string(), 4));
}
