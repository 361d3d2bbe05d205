use pretty_assertions::assert_eq;
use tests::{user, Test};
use vdir_core::{driver::Rows, request::DeleteRequest};

#[tokio::test]
async fn add_sends_quoted_sql_with_numbered_placeholders() {
    let test = Test::new();
    test.add_user(5, "alice", "Alice", &["a@example.com"]).await;

    assert_eq!(
        test.log.sql(),
        [
            r#"INSERT INTO "users" ("id", "uid", "cn") VALUES (?1, ?2, ?3);"#,
            r#"INSERT INTO "emails" ("user_id", "mail") VALUES (?1, ?2);"#,
        ]
    );
    assert!(test.log.has_insert());
    assert!(!test.log.has_select());
}

#[tokio::test]
async fn search_responses_are_logged_without_being_consumed() {
    let mut test = Test::new();
    test.add_user(5, "alice", "Alice", &["a@example.com", "b@example.com"])
        .await;
    test.log.clear();

    assert_eq!(test.search("(uid=alice)").await.len(), 1);
    assert_eq!(test.log.len(), 1);

    let (stmt, response) = test.log.pop().unwrap();
    assert!(stmt.is_select());

    let Rows::Values(rows) = response.rows else {
        panic!("expected rows");
    };
    // One row per mail address before merging
    assert_eq!(rows.collect().await.unwrap().len(), 2);
    assert!(test.log.is_empty());
}

#[tokio::test]
async fn delete_runs_dependent_sources_first() {
    let mut test = Test::new();
    test.add_user(5, "alice", "Alice", &[]).await;
    test.log.clear();

    let entry = test.entry();
    test.adapter
        .delete(&entry, &entry.sources, &user(5), &DeleteRequest::new("uid=alice"))
        .await
        .unwrap();

    let sources = test.log.with_ops(|ops| {
        ops.iter()
            .map(|op| op.statement.source().unwrap().to_string())
            .collect::<Vec<_>>()
    });
    assert_eq!(sources, ["phones", "emails", "users"]);
    assert!(test.log.has_delete());
    assert!(!test.log.has_update());
}
