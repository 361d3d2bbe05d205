mod exec_log;
pub use exec_log::ExecLog;

mod logging_driver;
pub use logging_driver::{DriverOp, LoggingConnection, LoggingDriver};

use std::path::PathBuf;
use tempfile::TempDir;
use vdir::{Adapter, SearchResult};
use vdir_core::{
    interpreter::TemplateInterpreter,
    request::{AddRequest, Attributes, SearchRequest},
    schema::EntryMapping,
    stmt::SourceValues,
    Partition,
};
use vdir_driver_sqlite::Sqlite;
use vdir_sql::Flavor;

pub const USERS_DN: &str = "ou=users,dc=example,dc=com";

/// A users entry whose mail and phone numbers live in their own tables.
pub const USERS: &str = r#"{
    "sources": [
        {
            "name": "users",
            "connection": "main",
            "fields": [
                { "name": "id", "primary_key": true, "type": "INTEGER" },
                { "name": "uid" },
                { "name": "cn", "case_sensitive": true }
            ]
        },
        {
            "name": "emails",
            "connection": "main",
            "fields": [
                { "name": "user_id", "primary_key": true, "type": "INTEGER" },
                { "name": "mail", "primary_key": true }
            ]
        },
        {
            "name": "phones",
            "connection": "main",
            "fields": [
                { "name": "user_id", "primary_key": true, "type": "INTEGER" },
                { "name": "number", "primary_key": true, "case_sensitive": true }
            ]
        }
    ],
    "entries": [
        {
            "dn": "ou=users,dc=example,dc=com",
            "object_classes": ["inetOrgPerson"],
            "attributes": [
                { "name": "uid", "rdn": true, "variable": "users.uid" },
                { "name": "employeeNumber", "variable": "users.id" },
                { "name": "cn", "variable": "users.cn" },
                { "name": "mail", "variable": "emails.mail" },
                { "name": "telephoneNumber", "variable": "phones.number" }
            ],
            "sources": [
                {
                    "name": "users",
                    "fields": [
                        { "name": "id", "variable": "employeeNumber" },
                        { "name": "uid", "variable": "rdn.uid" },
                        { "name": "cn", "variable": "cn" }
                    ]
                },
                {
                    "name": "emails",
                    "required": false,
                    "fields": [
                        { "name": "user_id", "variable": "users.id" },
                        { "name": "mail", "variable": "mail" }
                    ]
                },
                {
                    "name": "phones",
                    "required": false,
                    "fields": [
                        { "name": "user_id", "variable": "users.id" },
                        { "name": "number", "variable": "telephoneNumber" }
                    ]
                }
            ]
        }
    ]
}"#;

/// An adapter over a fresh SQLite file with the users tables created.
#[derive(Debug)]
pub struct Test {
    pub adapter: Adapter,
    pub log: ExecLog,

    /// Owns the database file; dropping it removes the database
    _dir: TempDir,
}

impl Test {
    pub fn new() -> Test {
        Test::with_partition(Partition::from_json(USERS).unwrap())
    }

    pub fn with_partition(partition: Partition) -> Test {
        init_tracing();

        let dir = tempfile::tempdir().unwrap();
        let path: PathBuf = dir.path().join("vdir.db");

        vdir_driver_sqlite::Connection::open(&path)
            .unwrap()
            .push_partition(&partition)
            .unwrap();

        let driver = LoggingDriver::new(Sqlite::open(&path));
        let log = ExecLog::new(driver.ops_log_handle());

        let adapter = Adapter::builder()
            .driver("main", driver)
            .flavor(Flavor::Sqlite)
            .build(partition)
            .unwrap();

        Test {
            adapter,
            log,
            _dir: dir,
        }
    }

    /// The users entry mapping.
    pub fn entry(&self) -> EntryMapping {
        self.adapter.partition().entry(USERS_DN).unwrap().clone()
    }

    /// Adds a user with the given mail addresses.
    pub async fn add_user(&self, id: i64, uid: &str, cn: &str, mail: &[&str]) {
        let mut attributes = Attributes::new();
        attributes.add("employeeNumber", id);
        attributes.add("uid", uid);
        attributes.add("cn", cn);
        for mail in mail {
            attributes.add("mail", *mail);
        }

        let entry = self.entry();
        let request = AddRequest::new(format!("uid={uid},{USERS_DN}"), attributes);
        self.adapter
            .add(&entry, &entry.sources, &user(id), &request)
            .await
            .unwrap();
    }

    /// Runs a subtree search of the users entry and collects the results.
    pub async fn search(&self, filter: &str) -> Vec<SearchResult> {
        let entry = self.entry();
        let request = SearchRequest::parse(filter).unwrap();
        self.adapter
            .search(&entry, &entry.sources, &SourceValues::new(), &request)
            .await
            .unwrap()
            .collect()
            .await
            .unwrap()
    }

    /// Evaluates the attributes of a search result.
    pub fn attributes(&self, result: &SearchResult) -> Attributes {
        result
            .attributes(&self.entry(), &mut TemplateInterpreter::new())
            .unwrap()
    }
}

impl Default for Test {
    fn default() -> Self {
        Test::new()
    }
}

/// Source values identifying the user with `users.id = id`.
pub fn user(id: i64) -> SourceValues {
    [("users.id", id)].into_iter().collect()
}

/// Routes `tracing` output to the test harness; `RUST_LOG` picks the level.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
