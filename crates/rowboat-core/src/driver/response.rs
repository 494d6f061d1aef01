use crate::Value;

#[derive(Debug)]
pub struct Response {
    pub rows: Rows,
}

#[derive(Debug)]
pub enum Rows {
    /// Number of rows impacted by the operation
    Count(u64),

    /// The key generated for an inserted row
    Key(Value),
}

impl Response {
    pub fn count(count: u64) -> Self {
        Self {
            rows: Rows::Count(count),
        }
    }

    pub fn key(key: impl Into<Value>) -> Self {
        Self {
            rows: Rows::Key(key.into()),
        }
    }
}
