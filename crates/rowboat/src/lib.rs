mod record;
pub use record::{Executor, Record};

mod resolve;

pub mod schema;
pub use schema::{RecordSchema, RecordSchemaBuilder};

pub mod sql;

pub use rowboat_core::{async_trait, driver, value, Error, FieldMap, Result, Value};
