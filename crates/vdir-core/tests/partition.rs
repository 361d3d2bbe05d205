use pretty_assertions::assert_eq;
use vdir_core::{schema::FieldType, Partition};

const SOURCES: &str = r#"
    { "name": "users", "connection": "main", "fields": [
        { "name": "id", "primary_key": true, "type": "INTEGER" },
        { "name": "uid" }
    ] },
    { "name": "emails", "connection": "main", "schema": "mail", "table": "addresses", "fields": [
        { "name": "user_id", "primary_key": true, "type": "INTEGER" },
        { "name": "mail", "column": "address" }
    ] }
"#;

fn partition(entry_sources: &str) -> vdir_core::Result<Partition> {
    Partition::from_json(&format!(
        r#"{{
            "sources": [{SOURCES}],
            "entries": [{{
                "dn": "ou=users,dc=example,dc=com",
                "attributes": [{{ "name": "uid", "rdn": true, "variable": "users.uid" }}],
                "sources": [{entry_sources}]
            }}]
        }}"#
    ))
}

#[test]
fn loads_sources_and_entries() {
    let partition = partition(
        r#"
        { "name": "users", "fields": [{ "name": "uid", "variable": "rdn.uid" }] },
        { "name": "mail", "source": "emails", "required": false, "fields": [
            { "name": "user_id", "variable": "users.id" },
            { "name": "mail", "expression": { "foreach": "mail", "var": "m", "script": "${m}" } }
        ] }
        "#,
    )
    .unwrap();

    let entry = partition.entry("OU=Users,DC=Example,DC=Com").unwrap();
    assert_eq!(entry.primary().unwrap().name, "users");
    assert_eq!(entry.secondaries().len(), 1);
    assert!(entry.attribute("UID").unwrap().rdn);

    let mail = entry.source("mail").unwrap();
    assert_eq!(mail.source_name(), "emails");
    assert!(!mail.required);
    assert_eq!(mail.foreign_keys().count(), 1);
    assert_eq!(mail.own_fields().count(), 1);

    let emails = partition.source_config(mail).unwrap();
    assert_eq!(emails.table_name().collect::<Vec<_>>(), ["mail", "addresses"]);
    assert_eq!(emails.field("mail").unwrap().column_name(), "address");
    assert_eq!(emails.field("user_id").unwrap().ty, FieldType::Integer);
    assert!(emails.field("mail").unwrap().is_case_insensitive());
}

#[test]
fn unknown_source_is_rejected() {
    let err = partition(r#"{ "name": "groups", "fields": [] }"#).unwrap_err();

    assert!(err.is_invalid_mapping());
    assert_eq!(err.mapping_source(), Some("groups"));
    assert!(err.to_string().starts_with("entry `ou=users,dc=example,dc=com`: "), "{err}");
}

#[test]
fn unknown_field_is_rejected() {
    let err = partition(r#"{ "name": "users", "fields": [{ "name": "nickname", "variable": "cn" }] }"#)
        .unwrap_err();

    assert!(err.is_invalid_mapping());
    assert_eq!(err.mapping_source(), Some("users"));
    assert_eq!(err.mapping_field(), Some("nickname"));
}

#[test]
fn foreign_keys_must_resolve() {
    let err = partition(
        r#"
        { "name": "users", "fields": [] },
        { "name": "emails", "fields": [{ "name": "user_id", "variable": "users.uuid" }] }
        "#,
    )
    .unwrap_err();

    assert_eq!(err.mapping_field(), Some("uuid"));
}

#[test]
fn malformed_json_is_a_config_error() {
    let err = Partition::from_json(r#"{ "sources": [{ "name": "users" }] }"#).unwrap_err();
    assert!(err.is_invalid_config());
}

#[test]
fn duplicate_sources_are_rejected() {
    let err = Partition::from_json(
        r#"{ "sources": [
            { "name": "users", "connection": "main", "fields": [] },
            { "name": "users", "connection": "other", "fields": [] }
        ] }"#,
    )
    .unwrap_err();

    assert!(err.is_invalid_config());
}
