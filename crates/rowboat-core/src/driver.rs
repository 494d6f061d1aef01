mod insert;
pub use insert::{InsertOptions, ReturnMode};

mod response;
pub use response::{Response, Rows};

mod update_spec;
pub use update_spec::UpdateSpec;

use crate::{async_trait, FieldMap, Result, Value};

use std::fmt::Debug;

/// Executor capability for relational back ends.
///
/// Implemented by the owning model/collection collaborator. The mapper hands
/// it parameterized statement text for updates and deletes, and a full row
/// payload for inserts.
#[async_trait]
pub trait SqlExecutor: Debug + Send + Sync + 'static {
    /// Prepare a parameterized statement. Placeholders use the `:name` form.
    async fn query(&self, sql: &str) -> Result<Box<dyn Statement>>;

    /// Insert a new row.
    ///
    /// Depending on `opts.returning`, the response carries either the
    /// generated key for the new row or the affected row count.
    async fn insert_row(&self, row: FieldMap, opts: InsertOptions) -> Result<Response>;

    /// Whether the backing table recognizes `name` as a column.
    fn is_known_field(&self, name: &str) -> bool;
}

/// A prepared statement returned by [`SqlExecutor::query`].
#[async_trait]
pub trait Statement: Send + Sync {
    /// Execute with the given named parameters, returning the affected row
    /// count.
    async fn execute(&mut self, params: FieldMap) -> Result<u64>;
}

/// Executor capability for document back ends.
#[async_trait]
pub trait DocumentStore: Debug + Send + Sync + 'static {
    /// Insert a new document.
    ///
    /// For stores that assign identity on insert, the response carries the
    /// generated key.
    async fn insert(&self, doc: FieldMap) -> Result<Response>;

    /// Apply a partial update to the document with the given identity,
    /// returning the number of documents modified.
    async fn update(&self, id: Value, update: UpdateSpec) -> Result<u64>;

    /// Delete the document with the given identity, returning the number of
    /// documents removed.
    async fn delete_by_id(&self, id: Value) -> Result<u64>;

    /// Whether the backing collection recognizes `name` as a field.
    fn is_known_field(&self, name: &str) -> bool;
}
