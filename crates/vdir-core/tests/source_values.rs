use pretty_assertions::assert_eq;
use vdir_core::stmt::{SourceValues, Value};

#[test]
fn values_are_distinct_and_non_null() {
    let mut values = SourceValues::new();
    values.add("emails.mail", "a");
    values.add("emails.mail", "a");
    values.add("emails.mail", Value::Null);
    values.add("emails.mail", Value::from(vec![Value::from("b"), Value::from("a")]));
    values.add("users.cn", Value::Null);

    assert_eq!(values.get("emails.mail"), [Value::from("a"), Value::from("b")]);
    assert!(!values.contains("users.cn"));
    assert_eq!(values.len(), 1);
}

#[test]
fn set_replaces() {
    let mut values: SourceValues = [("users.uid", "alice")].into_iter().collect();
    values.set("users.uid", "bob");

    assert_eq!(values.get_one("users.uid"), Some(&Value::from("bob")));
}

#[test]
fn grouping_by_source() {
    let values: SourceValues = [
        ("users.id", Value::from(5)),
        ("emails.mail", Value::from("a")),
        ("users.uid", Value::from("alice")),
        ("rdn.uid", Value::from("alice")),
    ]
    .into_iter()
    .collect();

    assert_eq!(values.sources(), ["users", "emails", "rdn"]);

    let users: Vec<_> = values.source("users").map(|(field, _)| field).collect();
    assert_eq!(users, ["id", "uid"]);
}

#[test]
fn merge_unions() {
    let mut lhs: SourceValues = [("emails.mail", "a")].into_iter().collect();
    let rhs: SourceValues = [("emails.mail", "b"), ("emails.mail", "a")].into_iter().collect();
    lhs.merge(&rhs);

    assert_eq!(lhs.get("emails.mail"), [Value::from("a"), Value::from("b")]);
}
