#![allow(dead_code)]

use vdir::{engine::Context, Adapter};
use vdir_core::{
    driver::{Response, Row},
    interpreter::TemplateInterpreter,
    schema::{EntryMapping, Partition},
    stmt::{SourceValues, Statement, Value},
    Connection, Driver, Error, Result,
};
use vdir_sql::Serializer;

use std::{
    borrow::Cow,
    sync::{Arc, Mutex},
};

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

pub fn partition() -> Partition {
    Partition::from_json(USERS).unwrap()
}

pub fn entry(partition: &Partition) -> &EntryMapping {
    partition.entry("ou=users,dc=example,dc=com").unwrap()
}

pub fn interpreter() -> TemplateInterpreter {
    TemplateInterpreter::new()
}

/// Source values of an existing user with `users.id = 5`.
pub fn user_5() -> SourceValues {
    [("users.id", 5)].into_iter().collect()
}

pub fn cx<'a>(
    partition: &'a Partition,
    entry: &'a EntryMapping,
    source_values: &'a SourceValues,
) -> Context<'a> {
    Context::new(partition, entry, &entry.sources, source_values)
}

/// Renders statements with the generic flavor.
pub fn sql(partition: &Partition, statements: &[Statement]) -> Vec<String> {
    let serializer = Serializer::generic(partition);
    statements
        .iter()
        .map(|stmt| serializer.serialize(stmt, &mut Vec::<Value>::new()))
        .collect()
}

/// Records every statement and answers queries with canned rows.
#[derive(Debug, Clone, Default)]
pub struct MockDriver {
    pub log: Arc<Mutex<Vec<Statement>>>,

    /// Rows returned for every query
    pub rows: Vec<Row>,

    /// Statements against this source fail
    pub fail_on: Option<String>,
}

#[derive(Debug)]
struct MockConnection {
    driver: MockDriver,
}

impl MockDriver {
    pub fn new() -> MockDriver {
        MockDriver::default()
    }

    pub fn rows(mut self, rows: Vec<Row>) -> MockDriver {
        self.rows = rows;
        self
    }

    pub fn fail_on(mut self, source: &str) -> MockDriver {
        self.fail_on = Some(source.to_string());
        self
    }

    pub fn statements(&self) -> Vec<Statement> {
        self.log.lock().unwrap().clone()
    }
}

#[vdir_core::async_trait]
impl Driver for MockDriver {
    fn url(&self) -> Cow<'_, str> {
        Cow::Borrowed("mock:")
    }

    async fn connect(&self) -> Result<Box<dyn Connection>> {
        Ok(Box::new(MockConnection {
            driver: self.clone(),
        }))
    }
}

#[vdir_core::async_trait]
impl Connection for MockConnection {
    async fn exec(&mut self, _partition: &Partition, stmt: Statement) -> Result<Response> {
        self.driver.log.lock().unwrap().push(stmt.clone());

        if stmt.source().is_some_and(|source| Some(source) == self.driver.fail_on.as_deref()) {
            return Err(Error::driver_operation_failed(std::io::Error::other(
                "constraint violation",
            )));
        }

        match stmt {
            Statement::Select(_) => Ok(Response::row_stream(self.driver.rows.clone())),
            _ => Ok(Response::count(1)),
        }
    }
}

/// One row of the full users search, in select-list order.
pub fn row(id: i64, uid: &str, mail: Option<&str>) -> Row {
    vec![
        Value::from(id),
        Value::from(uid),
        Value::from(uid.to_uppercase()),
        Value::from(mail.map(|_| id)),
        Value::from(mail),
        Value::Null,
        Value::Null,
    ]
}

pub fn adapter(driver: &MockDriver) -> Adapter {
    Adapter::builder()
        .driver("main", driver.clone())
        .build(partition())
        .unwrap()
}
