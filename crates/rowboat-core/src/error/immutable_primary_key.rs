use super::Error;

/// Error when a caller attempts to mutate or remove an identity field whose
/// value the backend owns.
#[derive(Debug)]
pub(super) struct ImmutablePrimaryKey {
    field: Box<str>,
}

impl std::error::Error for ImmutablePrimaryKey {}

impl core::fmt::Display for ImmutablePrimaryKey {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "cannot overwrite primary key '{}'", self.field)
    }
}

impl Error {
    /// Creates an immutable primary key error.
    pub fn immutable_primary_key(field: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::ImmutablePrimaryKey(ImmutablePrimaryKey {
            field: field.into().into(),
        }))
    }

    /// Returns `true` if this error is an immutable primary key error.
    pub fn is_immutable_primary_key(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::ImmutablePrimaryKey(_))
    }
}
