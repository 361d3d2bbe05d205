use pretty_assertions::assert_eq;
use tests::{user, Test};
use vdir_core::{request::DeleteRequest, stmt::SourceValues};

#[tokio::test]
async fn delete_removes_the_entry_and_its_rows() {
    let mut test = Test::new();
    test.add_user(5, "alice", "Alice", &["a@example.com", "b@example.com"])
        .await;
    test.add_user(6, "bob", "Bob", &["c@example.com"]).await;
    test.log.clear();

    let entry = test.entry();
    let response = test
        .adapter
        .delete(&entry, &entry.sources, &user(5), &DeleteRequest::new("uid=alice"))
        .await
        .unwrap();

    // No phones, two emails, one user
    assert_eq!(response.count, 3);
    assert_eq!(test.log.count(|stmt| stmt.is_delete()), 3);

    let results = test.search("(objectClass=*)").await;
    assert_eq!(results.len(), 1);
    assert!(test.search("(mail=a@example.com)").await.is_empty());
}

#[tokio::test]
async fn delete_without_source_values_is_refused() {
    let test = Test::new();
    test.add_user(5, "alice", "Alice", &[]).await;
    let before = test.log.len();

    let entry = test.entry();
    let err = test
        .adapter
        .delete(
            &entry,
            &entry.sources,
            &SourceValues::new(),
            &DeleteRequest::new("uid=alice"),
        )
        .await
        .unwrap_err();

    assert!(err.is_invalid_mapping());
    assert_eq!(test.log.len(), before);
    assert_eq!(test.search("(uid=alice)").await.len(), 1);
}
