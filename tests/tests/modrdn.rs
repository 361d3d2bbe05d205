use pretty_assertions::assert_eq;
use tests::Test;
use vdir_core::{
    request::{ModRdnRequest, Rdn},
    stmt::{SourceValues, Value},
};

#[tokio::test]
async fn rename_moves_the_entry_to_its_new_rdn() {
    let test = Test::new();
    test.add_user(5, "alice", "Alice", &["a@example.com"]).await;
    test.add_user(6, "bob", "Bob", &[]).await;

    let entry = test.entry();
    let mut source_values = SourceValues::new();
    source_values.add("users.id", 5);
    source_values.add("users.uid", "alice");

    let request = ModRdnRequest::new("uid=alice", Rdn::parse("uid=alicia").unwrap());
    test.adapter
        .modrdn(&entry, &entry.sources, &source_values, &request)
        .await
        .unwrap();

    assert!(test.search("(uid=alice)").await.is_empty());

    let results = test.search("(uid=alicia)").await;
    assert_eq!(results.len(), 1);

    let attributes = test.attributes(&results[0]);
    assert_eq!(attributes.values("employeeNumber"), [Value::from(5)]);
    assert_eq!(attributes.values("mail"), [Value::from("a@example.com")]);

    let rdn = results[0]
        .rdn(&entry, &mut vdir_core::interpreter::TemplateInterpreter::new())
        .unwrap();
    assert_eq!(rdn.to_string(), "uid=alicia");

    // Other entries are untouched
    assert_eq!(test.search("(uid=bob)").await.len(), 1);
}
