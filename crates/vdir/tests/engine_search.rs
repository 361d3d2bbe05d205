mod support;

use pretty_assertions::assert_eq;
use vdir::engine::{Context, SearchBuilder};
use vdir_core::{
    request::SearchRequest,
    schema::{EntryMapping, Partition},
    stmt::{FieldRef, JoinType, Select, SourceValues, Statement, Value},
    Result,
};
use vdir_sql::Serializer;

const SELECT_LIST: &str = "SELECT DISTINCT users.id, users.uid, users.cn, emails.user_id, emails.mail, phones.user_id, phones.number";
const JOINS: &str = "FROM users LEFT JOIN emails ON emails.user_id = users.id LEFT JOIN phones ON phones.user_id = users.id";
const ORDER_BY: &str = "ORDER BY users.id, emails.user_id, emails.mail, phones.user_id, phones.number";

fn search_in(
    partition: &Partition,
    entry: &EntryMapping,
    source_values: &SourceValues,
    request: &SearchRequest,
) -> Result<Select> {
    let mut interpreter = support::interpreter();
    let cx = Context::new(partition, entry, &entry.sources, source_values);
    SearchBuilder::new(cx, &mut interpreter).generate(request)
}

fn search(filter: Option<&str>) -> Select {
    let partition = support::partition();
    let entry = support::entry(&partition);
    let request = match filter {
        Some(filter) => SearchRequest::parse(filter).unwrap(),
        None => SearchRequest::default(),
    };
    search_in(&partition, entry, &SourceValues::new(), &request).unwrap()
}

fn sql(select: Select) -> (String, Vec<Value>) {
    let partition = support::partition();
    let mut params = Vec::<Value>::new();
    let sql = Serializer::generic(&partition).serialize(&Statement::from(select), &mut params);
    (sql, params)
}

#[test]
fn selects_every_field_of_every_source() {
    let select = search(None);

    assert_eq!(select.fields.len(), 7);
    assert_eq!(select.tables.len(), 3);
    assert!(select.tables[0].join.is_none());
    assert_eq!(select.tables[1].join.as_ref().unwrap().ty, JoinType::Left);
    assert_eq!(
        select.tables[1].join.as_ref().unwrap().on,
        [(FieldRef::new("emails", "user_id"), FieldRef::new("users", "id"))]
    );
    assert!(select.filter.is_none());

    let (sql, params) = sql(select);
    assert_eq!(sql, format!("{SELECT_LIST} {JOINS} {ORDER_BY};"));
    assert!(params.is_empty());
}

#[test]
fn rows_are_ordered_by_every_primary_key() {
    let select = search(None);

    assert_eq!(
        select.order_by,
        [
            FieldRef::new("users", "id"),
            FieldRef::new("emails", "user_id"),
            FieldRef::new("emails", "mail"),
            FieldRef::new("phones", "user_id"),
            FieldRef::new("phones", "number"),
        ]
    );
}

#[test]
fn character_fields_compare_without_case() {
    let (sql, params) = sql(search(Some("(uid=Alice)")));

    assert_eq!(
        sql,
        format!("{SELECT_LIST} {JOINS} WHERE LOWER(users.uid) = LOWER(?) {ORDER_BY};")
    );
    assert_eq!(params, [Value::from("Alice")]);
}

#[test]
fn case_sensitive_fields_compare_exactly() {
    let (sql, _) = sql(search(Some("(cn=Alice)")));

    assert!(sql.contains("WHERE users.cn = ? ORDER BY"), "{sql}");
}

#[test]
fn filter_aliases_are_joined_again() {
    let select = search(Some("(mail=a@example.com)"));

    let table = select.table("emails2").unwrap();
    assert_eq!(table.source, "emails");
    assert_eq!(
        table.join.as_ref().unwrap().on,
        [(FieldRef::new("emails2", "user_id"), FieldRef::new("users", "id"))]
    );

    let (sql, params) = sql(select);
    assert_eq!(
        sql,
        format!(
            "{SELECT_LIST} {JOINS} LEFT JOIN emails emails2 ON emails2.user_id = users.id \
             WHERE LOWER(emails2.mail) = LOWER(?) {ORDER_BY};"
        )
    );
    assert_eq!(params, [Value::from("a@example.com")]);
}

#[test]
fn required_sources_are_inner_joined() {
    let partition = support::partition();
    let mut entry = support::entry(&partition).clone();
    entry.sources[1].required = true;

    let select = search_in(&partition, &entry, &SourceValues::new(), &SearchRequest::default()).unwrap();

    assert_eq!(select.tables[1].join.as_ref().unwrap().ty, JoinType::Inner);
    assert_eq!(select.tables[2].join.as_ref().unwrap().ty, JoinType::Left);
}

#[test]
fn source_filters_are_anded_in() {
    let mut partition = support::partition();
    partition.sources[0].filter = Some("users.active = 1".to_string());
    let entry = support::entry(&partition).clone();

    let select = search_in(
        &partition,
        &entry,
        &SourceValues::new(),
        &SearchRequest::parse("(cn=Alice)").unwrap(),
    )
    .unwrap();
    assert_eq!(select.sql_filters, ["users.active = 1"]);

    let mut params = Vec::<Value>::new();
    let sql = Serializer::generic(&partition).serialize(&Statement::from(select), &mut params);
    assert!(
        sql.contains("WHERE users.cn = ? AND (users.active = 1) ORDER BY"),
        "{sql}"
    );
}

#[test]
fn sources_on_different_connections_are_rejected() {
    let mut partition = support::partition();
    partition.sources[2].connection = "ldap".to_string();
    let entry = support::entry(&partition).clone();

    let err = search_in(&partition, &entry, &SourceValues::new(), &SearchRequest::default()).unwrap_err();

    assert!(err.is_invalid_mapping());
}

#[test]
fn secondary_without_foreign_key_is_rejected() {
    let partition = support::partition();
    let mut entry = support::entry(&partition).clone();
    entry.sources[1].fields.retain(|field| field.name != "user_id");

    let err = search_in(&partition, &entry, &SourceValues::new(), &SearchRequest::default()).unwrap_err();

    assert!(err.is_invalid_mapping());
    assert!(err.to_string().contains("no foreign key"));
}
