use super::Error;

/// Error when a record is built with an inconsistent or incomplete
/// configuration, such as a missing table name or an empty primary key.
#[derive(Debug)]
pub(super) struct InvalidConstruction {
    message: Box<str>,
}

impl std::error::Error for InvalidConstruction {}

impl core::fmt::Display for InvalidConstruction {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid record construction: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid construction error.
    pub fn invalid_construction(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidConstruction(InvalidConstruction {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid construction error.
    pub fn is_invalid_construction(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidConstruction(_))
    }
}
