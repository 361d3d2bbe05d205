use pretty_assertions::assert_eq;
use tests::{user, Test};
use vdir_core::{
    request::{Attribute, ModificationOp, ModifyRequest},
    stmt::Value,
};

async fn modify(test: &Test, request: ModifyRequest) -> u64 {
    let entry = test.entry();
    test.adapter
        .modify(&entry, &entry.sources, &user(5), &request)
        .await
        .unwrap()
        .count
}

#[tokio::test]
async fn replace_updates_the_primary_row() {
    let test = Test::new();
    test.add_user(5, "alice", "Alice", &[]).await;

    let request = ModifyRequest::new("uid=alice")
        .modification(ModificationOp::Replace, Attribute::new("cn", ["Alice Liddell"]));
    assert_eq!(modify(&test, request).await, 1);

    let results = test.search("(uid=alice)").await;
    assert_eq!(
        test.attributes(&results[0]).values("cn"),
        [Value::from("Alice Liddell")]
    );
}

#[tokio::test]
async fn replace_rewrites_secondary_rows() {
    let test = Test::new();
    test.add_user(5, "alice", "Alice", &["a@example.com", "b@example.com"])
        .await;

    let request = ModifyRequest::new("uid=alice").modification(
        ModificationOp::Replace,
        Attribute::new("mail", ["c@example.com"]),
    );
    // Two rows deleted, one inserted
    assert_eq!(modify(&test, request).await, 3);

    let results = test.search("(uid=alice)").await;
    assert_eq!(
        test.attributes(&results[0]).values("mail"),
        [Value::from("c@example.com")]
    );
}

#[tokio::test]
async fn add_and_delete_values() {
    let test = Test::new();
    test.add_user(5, "alice", "Alice", &["a@example.com"]).await;

    let request = ModifyRequest::new("uid=alice")
        .modification(
            ModificationOp::Add,
            Attribute::new("telephoneNumber", ["555-0100", "555-0101"]),
        )
        .modification(ModificationOp::Delete, Attribute::new("mail", ["a@example.com"]));
    modify(&test, request).await;

    let results = test.search("(uid=alice)").await;
    let attributes = test.attributes(&results[0]);
    assert!(attributes.get("mail").is_none());
    assert_eq!(
        attributes.values("telephoneNumber"),
        [Value::from("555-0100"), Value::from("555-0101")]
    );

    assert_eq!(test.search("(telephoneNumber=555-0101)").await.len(), 1);
}
