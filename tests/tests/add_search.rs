use pretty_assertions::assert_eq;
use tests::Test;
use vdir_core::stmt::Value;

#[tokio::test]
async fn added_user_is_found_with_every_mail_address() {
    let test = Test::new();
    test.add_user(5, "alice", "Alice", &["a@example.com", "b@example.com"])
        .await;

    let results = test.search("(uid=alice)").await;
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].key, [Value::from(5)]);

    let attributes = test.attributes(&results[0]);
    assert_eq!(attributes.values("objectClass"), [Value::from("inetOrgPerson")]);
    assert_eq!(attributes.values("employeeNumber"), [Value::from(5)]);
    assert_eq!(attributes.values("cn"), [Value::from("Alice")]);
    assert_eq!(
        attributes.values("mail"),
        [Value::from("a@example.com"), Value::from("b@example.com")]
    );
    assert!(attributes.get("telephoneNumber").is_none());
}

#[tokio::test]
async fn matching_one_mail_still_returns_all_of_them() {
    let test = Test::new();
    test.add_user(5, "alice", "Alice", &["a@example.com", "b@example.com"])
        .await;
    test.add_user(6, "bob", "Bob", &["c@example.com"]).await;

    let results = test.search("(mail=B@EXAMPLE.COM)").await;
    assert_eq!(results.len(), 1);

    let attributes = test.attributes(&results[0]);
    assert_eq!(attributes.values("uid"), [Value::from("alice")]);
    assert_eq!(attributes.values("mail").len(), 2);
}

#[tokio::test]
async fn unmapped_filter_returns_every_entry_in_key_order() {
    let test = Test::new();
    test.add_user(6, "bob", "Bob", &[]).await;
    test.add_user(5, "alice", "Alice", &["a@example.com"]).await;

    let results = test.search("(objectClass=*)").await;
    let keys: Vec<_> = results.iter().map(|result| result.key.clone()).collect();

    assert_eq!(keys, [[Value::from(5)], [Value::from(6)]]);
}

#[tokio::test]
async fn uid_matches_ignore_case_but_cn_does_not() {
    let test = Test::new();
    test.add_user(5, "alice", "Alice", &[]).await;

    assert_eq!(test.search("(uid=ALICE)").await.len(), 1);
    assert_eq!(test.search("(cn=Alice)").await.len(), 1);
    assert!(test.search("(cn=alice)").await.is_empty());
}

#[tokio::test]
async fn numeric_attribute_values_match_integer_columns() {
    let test = Test::new();
    test.add_user(5, "alice", "Alice", &[]).await;
    test.add_user(6, "bob", "Bob", &[]).await;

    let results = test.search("(employeeNumber=6)").await;
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].key, [Value::from(6)]);
}

#[tokio::test]
async fn substring_and_boolean_filters() {
    let test = Test::new();
    test.add_user(5, "alice", "Alice", &["alice@example.com"]).await;
    test.add_user(6, "bob", "Bob", &["bob@example.org"]).await;
    test.add_user(7, "carol", "Carol", &["carol@example.com"]).await;

    assert_eq!(test.search("(mail=*@example.com)").await.len(), 2);
    assert_eq!(test.search("(|(uid=bob)(uid=carol))").await.len(), 2);
    assert_eq!(
        test.search("(&(mail=*@example.com)(!(uid=alice)))").await.len(),
        1
    );
}

#[tokio::test]
async fn substring_text_matches_sql_wildcards_literally() {
    let test = Test::new();
    test.add_user(5, "a_c", "Underscore", &[]).await;
    test.add_user(6, "abc", "Letters", &[]).await;
    test.add_user(7, "50%off", "Percent", &[]).await;
    test.add_user(8, "50xoff", "Letter", &[]).await;

    let results = test.search("(uid=a_*)").await;
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].key, [Value::from(5)]);

    let results = test.search("(uid=50%*)").await;
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].key, [Value::from(7)]);

    // Hex-escaped wildcards are literal text too
    let results = test.search(r"(uid=50\25*)").await;
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].key, [Value::from(7)]);
}
