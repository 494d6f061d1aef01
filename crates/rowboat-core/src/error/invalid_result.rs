use super::Error;

/// Error when an executor response has an unexpected structure.
///
/// The backend reported success, but the shape of the result does not match
/// what the operation required. The main case: an insert under an
/// auto-generated key configuration that did not return the new key.
#[derive(Debug)]
pub(super) struct InvalidResult {
    message: Box<str>,
}

impl std::error::Error for InvalidResult {}

impl core::fmt::Display for InvalidResult {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid result: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid result error.
    pub fn invalid_result(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidResult(InvalidResult {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid result error.
    pub fn is_invalid_result(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidResult(_))
    }
}
