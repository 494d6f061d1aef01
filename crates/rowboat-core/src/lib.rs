pub mod driver;
pub use driver::{DocumentStore, SqlExecutor, Statement};

mod error;
pub use error::Error;

pub mod value;
pub use value::{FieldMap, Value};

/// A Result type alias that uses Rowboat's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

pub use async_trait::async_trait;
