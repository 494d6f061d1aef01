use super::Error;
use crate::value::FieldMap;

/// Error when strict field resolution fails.
///
/// Carries the attempted logical name and a snapshot of the record's data at
/// the time of the lookup, for diagnostics.
#[derive(Debug)]
pub(super) struct UnknownField {
    field: Box<str>,
    snapshot: Box<str>,
}

impl std::error::Error for UnknownField {}

impl core::fmt::Display for UnknownField {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "unknown field '{}' in {}", self.field, self.snapshot)
    }
}

impl Error {
    /// Creates an unknown field error.
    pub fn unknown_field(field: impl Into<String>, data: &FieldMap) -> Error {
        Error::from(super::ErrorKind::UnknownField(UnknownField {
            field: field.into().into(),
            snapshot: format!("{data:?}").into(),
        }))
    }

    /// Returns `true` if this error is an unknown field error.
    pub fn is_unknown_field(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnknownField(_))
    }
}
