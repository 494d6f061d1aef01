/// Options forwarded to the executor when inserting a new row.
#[derive(Debug, Clone, Default)]
pub struct InsertOptions {
    /// Allow the payload to carry an explicit primary key value.
    ///
    /// Set for manually-assigned key configurations; executors are expected
    /// to reject explicit keys otherwise.
    pub allow_explicit_key: bool,

    /// If set, only these columns participate in the insert.
    pub columns: Option<Vec<String>>,

    /// What the response should carry.
    pub returning: ReturnMode,
}

/// What an insert operation should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReturnMode {
    /// The generated key of the new row.
    #[default]
    GeneratedKey,

    /// The affected row count.
    Count,
}
