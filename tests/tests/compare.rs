use tests::{user, Test};

#[tokio::test]
async fn compare_checks_the_identified_entry() {
    let test = Test::new();
    test.add_user(5, "alice", "Alice", &["a@example.com"]).await;
    test.add_user(6, "bob", "Bob", &["b@example.com"]).await;

    let entry = test.entry();
    let compare = |attribute: &'static str, value: &'static str| {
        let entry = entry.clone();
        let adapter = test.adapter.clone();
        async move {
            adapter
                .compare(&entry, &entry.sources, &user(5), attribute, value)
                .await
                .unwrap()
        }
    };

    assert!(compare("cn", "Alice").await);
    assert!(compare("mail", "A@example.com").await);
    assert!(!compare("cn", "alice").await);

    // bob's address does not belong to entry 5
    assert!(!compare("mail", "b@example.com").await);
}
