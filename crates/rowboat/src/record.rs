use crate::driver::{DocumentStore, InsertOptions, ReturnMode, Rows, SqlExecutor, UpdateSpec};
use crate::resolve::{resolve, resolve_strict};
use crate::schema::RecordSchema;
use crate::{sql, Error, FieldMap, Result, Value};

use rowboat_core::err;

use std::sync::Arc;

/// The persistence variant a record is bound to.
///
/// One record type serves both back ends; the executor decides how saves
/// and deletes are lowered.
#[derive(Debug, Clone)]
pub enum Executor {
    Sql(Arc<dyn SqlExecutor>),
    Document(Arc<dyn DocumentStore>),
}

impl Executor {
    fn is_known_field(&self, name: &str) -> bool {
        match self {
            Self::Sql(executor) => executor.is_known_field(name),
            Self::Document(store) => store.is_known_field(name),
        }
    }
}

/// An in-memory view of one persisted row or document.
///
/// A record owns its current field values, tracks which fields were modified
/// since the last persist (one level of undo per field), and persists itself
/// back through the injected executor. With `auto_save` enabled every field
/// mutation triggers an immediate save; batches suspend that so several
/// edits commit as one operation.
///
/// A record assumes single-threaded use; if two records reference the same
/// backend row, the last writer wins.
#[derive(Debug)]
pub struct Record {
    schema: Arc<RecordSchema>,
    executor: Executor,
    data: FieldMap,
    modified: FieldMap,
    auto_save: bool,
    batch: Option<bool>,
}

impl Record {
    /// Build a record from a snapshot of backend data.
    pub fn new(schema: Arc<RecordSchema>, executor: Executor, data: FieldMap) -> Record {
        Record {
            schema,
            executor,
            data,
            modified: FieldMap::new(),
            auto_save: false,
            batch: None,
        }
    }

    pub fn schema(&self) -> &RecordSchema {
        &self.schema
    }

    /// The record's current field values, keyed by physical name.
    pub fn data(&self) -> &FieldMap {
        &self.data
    }

    pub fn auto_save(&self) -> bool {
        self.auto_save
    }

    /// Turn immediate persist-on-mutation on or off.
    pub fn set_auto_save(&mut self, auto_save: bool) {
        self.auto_save = auto_save;
    }

    /// Whether any fields are pending persist.
    pub fn is_modified(&self) -> bool {
        !self.modified.is_empty()
    }

    /// The tracked fields, each with its pre-mutation value.
    pub fn modified_fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.modified.iter().map(|(name, prior)| (name.as_str(), prior))
    }

    pub fn in_batch(&self) -> bool {
        self.batch.is_some()
    }

    /// Resolve a logical name to an owned physical name, strictly.
    fn field(&self, field: &str) -> Result<String> {
        resolve_strict(
            &self.schema,
            &self.data,
            |name| self.executor.is_known_field(name),
            field,
        )
        .map(str::to_string)
    }

    /// Get a field value.
    ///
    /// If a read hook is registered for the logical name it is invoked;
    /// otherwise the stored value is returned. Unknown names are an error.
    pub fn get(&self, field: &str) -> Result<Value> {
        let name = resolve_strict(
            &self.schema,
            &self.data,
            |name| self.executor.is_known_field(name),
            field,
        )?;

        if let Some(accessor) = self.schema.accessor(field) {
            return Ok(accessor(&self.data));
        }
        Ok(self.data.get(name).cloned().unwrap_or_default())
    }

    /// Whether a field is set.
    ///
    /// An empty string counts as unset, as does an unresolvable name.
    pub fn has(&self, field: &str) -> bool {
        let resolved = resolve(
            &self.schema,
            &self.data,
            |name| self.executor.is_known_field(name),
            field,
        );
        let Some(name) = resolved else {
            return false;
        };
        match self.data.get(name) {
            None | Some(Value::Null) => false,
            Some(Value::String(value)) => !value.is_empty(),
            Some(_) => true,
        }
    }

    /// Set a field value.
    ///
    /// Setting the primary key fails for auto-generated key configurations.
    /// The pre-mutation value is recorded for [`restore`](Self::restore) /
    /// [`undo`](Self::undo) unless the field is virtual or already tracked.
    /// With `auto_save` enabled the record persists before returning.
    pub async fn set(&mut self, field: &str, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        let name = self.field(field)?;

        if name == self.schema.primary_key {
            if self.schema.auto_generated_key {
                return Err(Error::immutable_primary_key(name));
            }
            if !self.data.contains_key(&name) {
                // Seed a defined marker so the first manual key assignment
                // is tracked like any other mutation.
                self.data.insert(name.clone(), Value::Bool(true));
            }
        }

        if !self.schema.is_virtual(&name) && !self.modified.contains_key(&name) {
            let prior = self.data.get(&name).cloned().unwrap_or_default();
            self.modified.insert(name.clone(), prior);
        }

        if let Some(mutator) = self.schema.mutator(field) {
            mutator.as_ref()(&mut self.data, value);
        } else {
            self.data.insert(name, value);
        }

        if self.auto_save {
            self.save().await?;
        }
        Ok(())
    }

    /// Set a field to null.
    ///
    /// The primary key cannot be unset.
    pub async fn unset(&mut self, field: &str) -> Result<()> {
        let name = self.field(field)?;

        if name == self.schema.primary_key {
            return Err(Error::immutable_primary_key(name));
        }

        if !self.modified.contains_key(&name) {
            let prior = self.data.get(&name).cloned().unwrap_or_default();
            self.modified.insert(name.clone(), prior);
        }
        self.data.insert(name, Value::Null);

        if self.auto_save {
            self.save().await?;
        }
        Ok(())
    }

    /// Revert one field to its pre-mutation value.
    ///
    /// Only one level is kept: the value the field had before the first
    /// mutation since the last persist. A no-op for untracked fields. Not
    /// meaningful with `auto_save` on, since the write already committed.
    pub fn restore(&mut self, field: &str) -> Result<()> {
        let name = self.field(field)?;
        if let Some(prior) = self.modified.shift_remove(&name) {
            self.data.insert(name, prior);
        }
        Ok(())
    }

    /// Revert every tracked field to its pre-mutation value and clear the
    /// tracking map.
    pub fn undo(&mut self) {
        for (name, prior) in std::mem::take(&mut self.modified) {
            self.data.insert(name, prior);
        }
    }

    /// Begin a batch: suspend `auto_save` so several edits commit as one
    /// persist at [`end_batch`](Self::end_batch).
    ///
    /// Batches do not nest; starting one inside another is an error.
    pub fn start_batch(&mut self) -> Result<()> {
        if self.batch.is_some() {
            return Err(Error::batch_already_open());
        }
        self.batch = Some(self.auto_save);
        self.auto_save = false;
        Ok(())
    }

    /// Finish a batch: restore `auto_save`, persisting the accumulated
    /// edits if it was on. A no-op if no batch is open.
    pub async fn end_batch(&mut self) -> Result<()> {
        if let Some(saved) = self.batch.take() {
            self.auto_save = saved;
            if saved {
                self.save().await?;
            }
        }
        Ok(())
    }

    /// Abandon a batch: undo the tracked edits and restore `auto_save`
    /// without persisting. A no-op if no batch is open.
    ///
    /// Note the undo buffer is global to the record, so this reverts every
    /// tracked field, not only those touched since the batch started.
    pub fn cancel_batch(&mut self) {
        if let Some(saved) = self.batch.take() {
            self.undo();
            self.auto_save = saved;
        }
    }

    /// Persist the record.
    ///
    /// If the primary key is present and unmodified, the dirty fields are
    /// sent as an update scoped by key equality; with nothing dirty this is
    /// a no-op. Otherwise the full data snapshot is inserted, and for
    /// auto-generated keys the new identity is written back into the record.
    ///
    /// On failure the dirty tracking is left intact so the caller can
    /// retry without losing pending edits.
    pub async fn save(&mut self) -> Result<()> {
        let pk = self.schema.primary_key();
        let identity_unchanged = self.data.contains_key(pk) && !self.modified.contains_key(pk);
        if identity_unchanged {
            self.persist_update().await
        } else {
            self.persist_insert().await
        }
    }

    async fn persist_update(&mut self) -> Result<()> {
        if self.modified.is_empty() {
            return Ok(());
        }
        let pk = self.schema.primary_key().to_string();

        match &self.executor {
            Executor::Sql(executor) => {
                let mut assignments = FieldMap::new();
                for name in self.modified.keys() {
                    if *name == pk {
                        // The key scopes the update; it never belongs in
                        // the assignment list.
                        continue;
                    }
                    if let Some(value) = self.data.get(name) {
                        assignments.insert(name.clone(), value.clone());
                    }
                }
                let text = sql::update_by_key(
                    self.schema.table(),
                    &pk,
                    assignments.keys().map(String::as_str),
                );
                let mut params = assignments;
                params.insert(pk.clone(), self.data.get(&pk).cloned().unwrap_or_default());

                let mut stmt = executor.query(&text).await?;
                stmt.execute(params).await?;
            }
            Executor::Document(store) => {
                let snapshot = self.encoded();
                let mut set = FieldMap::new();
                for name in self.modified.keys() {
                    if *name == pk {
                        continue;
                    }
                    if let Some(value) = snapshot.get(name) {
                        set.insert(name.clone(), value.clone());
                    }
                }
                let id = snapshot.get(&pk).cloned().unwrap_or_default();
                store.update(id, UpdateSpec::new(set)).await?;
            }
        }

        self.modified.clear();
        Ok(())
    }

    async fn persist_insert(&mut self) -> Result<()> {
        let pk = self.schema.primary_key().to_string();
        let auto = self.schema.auto_generated_key();

        let response = match &self.executor {
            Executor::Sql(executor) => {
                let returning = if auto || !self.data.contains_key(&pk) {
                    ReturnMode::GeneratedKey
                } else {
                    ReturnMode::Count
                };
                let opts = InsertOptions {
                    allow_explicit_key: !auto,
                    columns: self.schema.insert_columns().map(<[String]>::to_vec),
                    returning,
                };
                executor.insert_row(self.data.clone(), opts).await?
            }
            Executor::Document(store) => store.insert(self.encoded()).await?,
        };

        self.modified.clear();

        if !auto && self.data.contains_key(&pk) {
            // Manually assigned key: insertion success is sufficient.
            return Ok(());
        }
        match response.rows {
            Rows::Key(key) if !key.is_null() => {
                self.data.insert(pk, key);
                Ok(())
            }
            rows => Err(Error::invalid_result(format!(
                "insert did not return a generated key; rows={rows:?}"
            ))),
        }
    }

    /// Delete the backend row or document by primary-key equality.
    ///
    /// In-memory state is intentionally left intact: the record stays
    /// readable, but a subsequent [`save`](Self::save) would re-insert it.
    pub async fn delete(&self) -> Result<()> {
        let pk = self.schema.primary_key();
        let id = self
            .data
            .get(pk)
            .cloned()
            .ok_or_else(|| err!("cannot delete record without a primary key value"))?;

        match &self.executor {
            Executor::Sql(executor) => {
                let text = sql::delete_by_key(self.schema.table(), pk);
                let mut params = FieldMap::new();
                params.insert(pk.to_string(), id);

                let mut stmt = executor.query(&text).await?;
                stmt.execute(params).await?;
            }
            Executor::Document(store) => {
                store.delete_by_id(id).await?;
            }
        }
        Ok(())
    }

    /// The data snapshot sent to document stores, transformed by the
    /// schema's encode hook when one is registered.
    fn encoded(&self) -> FieldMap {
        match self.schema.encode_hook() {
            Some(encode) => encode(&self.data),
            None => self.data.clone(),
        }
    }
}
