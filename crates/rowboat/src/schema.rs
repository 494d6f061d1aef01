use crate::{Error, FieldMap, Result, Value};

use indexmap::IndexMap;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Computed-field read hook. Receives the record's current data.
pub type Accessor = Arc<dyn Fn(&FieldMap) -> Value + Send + Sync>;

/// Computed-field write hook. Responsible for applying the new value to the
/// underlying field(s).
pub type Mutator = Arc<dyn Fn(&mut FieldMap, Value) + Send + Sync>;

/// Whole-snapshot transform applied to payloads bound for document stores.
pub type EncodeFn = Arc<dyn Fn(&FieldMap) -> FieldMap + Send + Sync>;

#[derive(Clone, Default)]
pub(crate) struct FieldHooks {
    pub(crate) get: Option<Accessor>,
    pub(crate) set: Option<Mutator>,
}

/// Static per-record configuration, fixed at construction time.
///
/// Aliases map logical names to physical storage fields. Virtual fields are
/// computed, never stored directly, and must be backed by hooks. Hooks may
/// also be registered for stored fields to intercept reads or writes.
///
/// Note: aliases are resolved only by the record itself. Anything that talks
/// to the backend directly (queries, column lists) must use physical names.
pub struct RecordSchema {
    pub(crate) table: String,
    pub(crate) primary_key: String,
    pub(crate) auto_generated_key: bool,
    pub(crate) aliases: IndexMap<String, String>,
    pub(crate) virtuals: HashSet<String>,
    pub(crate) hooks: IndexMap<String, FieldHooks>,
    pub(crate) insert_columns: Option<Vec<String>>,
    pub(crate) encode: Option<EncodeFn>,
}

impl RecordSchema {
    pub fn builder(table: impl Into<String>) -> RecordSchemaBuilder {
        RecordSchemaBuilder {
            table: table.into(),
            primary_key: "id".to_string(),
            auto_generated_key: true,
            aliases: IndexMap::new(),
            virtuals: HashSet::new(),
            hooks: IndexMap::new(),
            insert_columns: None,
            encode: None,
        }
    }

    /// The table or collection this record persists to.
    pub fn table(&self) -> &str {
        &self.table
    }

    /// The physical field designated as identity.
    pub fn primary_key(&self) -> &str {
        &self.primary_key
    }

    /// Whether the backend assigns the identity value on insert.
    pub fn auto_generated_key(&self) -> bool {
        self.auto_generated_key
    }

    pub(crate) fn is_virtual(&self, name: &str) -> bool {
        self.virtuals.contains(name)
    }

    pub(crate) fn accessor(&self, name: &str) -> Option<&(dyn Fn(&FieldMap) -> Value + Send + Sync)> {
        self.hooks.get(name).and_then(|hooks| hooks.get.as_deref())
    }

    /// Returns an owned handle so callers can apply the hook while holding
    /// a mutable borrow of the record data.
    pub(crate) fn mutator(&self, name: &str) -> Option<Mutator> {
        self.hooks.get(name).and_then(|hooks| hooks.set.clone())
    }

    pub(crate) fn insert_columns(&self) -> Option<&[String]> {
        self.insert_columns.as_deref()
    }

    pub(crate) fn encode_hook(&self) -> Option<&(dyn Fn(&FieldMap) -> FieldMap + Send + Sync)> {
        self.encode.as_deref()
    }
}

impl fmt::Debug for RecordSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordSchema")
            .field("table", &self.table)
            .field("primary_key", &self.primary_key)
            .field("auto_generated_key", &self.auto_generated_key)
            .field("aliases", &self.aliases)
            .field("virtuals", &self.virtuals)
            .field("insert_columns", &self.insert_columns)
            .finish_non_exhaustive()
    }
}

/// Builder for [`RecordSchema`].
pub struct RecordSchemaBuilder {
    table: String,
    primary_key: String,
    auto_generated_key: bool,
    aliases: IndexMap<String, String>,
    virtuals: HashSet<String>,
    hooks: IndexMap<String, FieldHooks>,
    insert_columns: Option<Vec<String>>,
    encode: Option<EncodeFn>,
}

impl RecordSchemaBuilder {
    /// Set the identity field. Defaults to `id`.
    pub fn primary_key(mut self, name: impl Into<String>) -> Self {
        self.primary_key = name.into();
        self
    }

    /// Mark the identity field as manually assigned by callers rather than
    /// generated by the backend.
    pub fn manual_key(mut self) -> Self {
        self.auto_generated_key = false;
        self
    }

    /// Register a logical alias for a physical storage field.
    pub fn alias(mut self, name: impl Into<String>, target: impl Into<String>) -> Self {
        self.aliases.insert(name.into(), target.into());
        self
    }

    /// Declare a virtual field. Virtual fields resolve by name but are never
    /// stored directly and never participate in dirty tracking; back them
    /// with [`accessor`](Self::accessor) / [`mutator`](Self::mutator) hooks.
    pub fn virtual_field(mut self, name: impl Into<String>) -> Self {
        self.virtuals.insert(name.into());
        self
    }

    /// Register a read hook for a logical field name.
    pub fn accessor<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&FieldMap) -> Value + Send + Sync + 'static,
    {
        self.hooks.entry(name.into()).or_default().get = Some(Arc::new(f));
        self
    }

    /// Register a write hook for a logical field name.
    pub fn mutator<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&mut FieldMap, Value) + Send + Sync + 'static,
    {
        self.hooks.entry(name.into()).or_default().set = Some(Arc::new(f));
        self
    }

    /// Restrict inserts to the given columns.
    pub fn insert_columns(mut self, columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.insert_columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Register a transform applied to the data snapshot before it is sent
    /// to a document store.
    pub fn encode<F>(mut self, f: F) -> Self
    where
        F: Fn(&FieldMap) -> FieldMap + Send + Sync + 'static,
    {
        self.encode = Some(Arc::new(f));
        self
    }

    pub fn build(self) -> Result<RecordSchema> {
        if self.table.is_empty() {
            return Err(Error::invalid_construction("missing table name"));
        }
        if self.primary_key.is_empty() {
            return Err(Error::invalid_construction("empty primary key name"));
        }
        for virtual_field in &self.virtuals {
            let hooks = self.hooks.get(virtual_field);
            if hooks.map_or(true, |hooks| hooks.get.is_none() && hooks.set.is_none()) {
                return Err(Error::invalid_construction(format!(
                    "virtual field '{virtual_field}' has no accessor or mutator"
                )));
            }
        }
        Ok(RecordSchema {
            table: self.table,
            primary_key: self.primary_key,
            auto_generated_key: self.auto_generated_key,
            aliases: self.aliases,
            virtuals: self.virtuals,
            hooks: self.hooks,
            insert_columns: self.insert_columns,
            encode: self.encode,
        })
    }
}
