#![allow(dead_code)] // each integration test exercises a subset of the mocks

use rowboat::driver::{
    DocumentStore, InsertOptions, Response, SqlExecutor, Statement, UpdateSpec,
};
use rowboat::{async_trait, Error, Executor, FieldMap, Record, RecordSchema, Result, Value};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

fn injected_failure() -> Error {
    Error::driver_operation_failed(std::io::Error::new(
        std::io::ErrorKind::ConnectionReset,
        "injected failure",
    ))
}

// ---------------------------------------------------------------------------
// SQL executor mock
// ---------------------------------------------------------------------------

/// Everything a [`MockSql`] executor saw.
#[derive(Debug, Default, Clone)]
pub struct SqlLog {
    /// (statement text, bound parameters) per executed statement
    pub executed: Vec<(String, FieldMap)>,
    /// (row payload, options) per insert
    pub inserted: Vec<(FieldMap, InsertOptions)>,
}

#[derive(Debug, Default)]
pub struct MockSql {
    log: Arc<Mutex<SqlLog>>,
    generated_key: Mutex<Option<Value>>,
    fail: AtomicBool,
    known_fields: Vec<String>,
}

impl MockSql {
    pub fn new(known_fields: &[&str]) -> Arc<MockSql> {
        Arc::new(MockSql {
            known_fields: known_fields.iter().map(|field| field.to_string()).collect(),
            ..MockSql::default()
        })
    }

    /// Make inserts report this generated key.
    pub fn generate_key(&self, key: impl Into<Value>) {
        *self.generated_key.lock().unwrap() = Some(key.into());
    }

    /// Make every subsequent operation fail.
    pub fn fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn executed(&self) -> Vec<(String, FieldMap)> {
        self.log.lock().unwrap().executed.clone()
    }

    pub fn inserted(&self) -> Vec<(FieldMap, InsertOptions)> {
        self.log.lock().unwrap().inserted.clone()
    }

    /// Total backend calls of any kind.
    pub fn calls(&self) -> usize {
        let log = self.log.lock().unwrap();
        log.executed.len() + log.inserted.len()
    }
}

struct MockStatement {
    sql: String,
    log: Arc<Mutex<SqlLog>>,
    fail: bool,
}

#[async_trait]
impl Statement for MockStatement {
    async fn execute(&mut self, params: FieldMap) -> Result<u64> {
        if self.fail {
            return Err(injected_failure());
        }
        self.log
            .lock()
            .unwrap()
            .executed
            .push((self.sql.clone(), params));
        Ok(1)
    }
}

#[async_trait]
impl SqlExecutor for MockSql {
    async fn query(&self, sql: &str) -> Result<Box<dyn Statement>> {
        Ok(Box::new(MockStatement {
            sql: sql.to_string(),
            log: self.log.clone(),
            fail: self.fail.load(Ordering::SeqCst),
        }))
    }

    async fn insert_row(&self, row: FieldMap, opts: InsertOptions) -> Result<Response> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(injected_failure());
        }
        self.log.lock().unwrap().inserted.push((row, opts));
        match self.generated_key.lock().unwrap().clone() {
            Some(key) => Ok(Response::key(key)),
            None => Ok(Response::count(1)),
        }
    }

    fn is_known_field(&self, name: &str) -> bool {
        self.known_fields.iter().any(|field| field == name)
    }
}

// ---------------------------------------------------------------------------
// Document store mock
// ---------------------------------------------------------------------------

/// Everything a [`MockStore`] saw.
#[derive(Debug, Default, Clone)]
pub struct StoreLog {
    pub inserted: Vec<FieldMap>,
    pub updated: Vec<(Value, UpdateSpec)>,
    pub deleted: Vec<Value>,
}

#[derive(Debug, Default)]
pub struct MockStore {
    log: Mutex<StoreLog>,
    generated_key: Mutex<Option<Value>>,
    fail: AtomicBool,
    known_fields: Vec<String>,
}

impl MockStore {
    pub fn new(known_fields: &[&str]) -> Arc<MockStore> {
        Arc::new(MockStore {
            known_fields: known_fields.iter().map(|field| field.to_string()).collect(),
            ..MockStore::default()
        })
    }

    pub fn generate_key(&self, key: impl Into<Value>) {
        *self.generated_key.lock().unwrap() = Some(key.into());
    }

    pub fn fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn log(&self) -> StoreLog {
        self.log.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        let log = self.log.lock().unwrap();
        log.inserted.len() + log.updated.len() + log.deleted.len()
    }
}

#[async_trait]
impl DocumentStore for MockStore {
    async fn insert(&self, doc: FieldMap) -> Result<Response> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(injected_failure());
        }
        self.log.lock().unwrap().inserted.push(doc);
        match self.generated_key.lock().unwrap().clone() {
            Some(key) => Ok(Response::key(key)),
            None => Ok(Response::count(1)),
        }
    }

    async fn update(&self, id: Value, update: UpdateSpec) -> Result<u64> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(injected_failure());
        }
        self.log.lock().unwrap().updated.push((id, update));
        Ok(1)
    }

    async fn delete_by_id(&self, id: Value) -> Result<u64> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(injected_failure());
        }
        self.log.lock().unwrap().deleted.push(id);
        Ok(1)
    }

    fn is_known_field(&self, name: &str) -> bool {
        self.known_fields.iter().any(|field| field == name)
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn row(pairs: &[(&str, Value)]) -> FieldMap {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), value.clone()))
        .collect()
}

pub fn users_schema() -> Arc<RecordSchema> {
    Arc::new(RecordSchema::builder("users").build().unwrap())
}

/// A record over the `users` table backed by a fresh SQL mock.
pub fn sql_record(data: FieldMap) -> (Record, Arc<MockSql>) {
    let executor = MockSql::new(&["id", "name", "email", "age"]);
    let record = Record::new(users_schema(), Executor::Sql(executor.clone()), data);
    (record, executor)
}

/// A record over the `posts` collection backed by a fresh document mock.
pub fn document_record(data: FieldMap) -> (Record, Arc<MockStore>) {
    let schema = Arc::new(
        RecordSchema::builder("posts")
            .primary_key("_id")
            .build()
            .unwrap(),
    );
    let store = MockStore::new(&["_id", "title", "body"]);
    let record = Record::new(schema, Executor::Document(store.clone()), data);
    (record, store)
}
