use super::Error;

/// Error when `start_batch` is called while a batch is already open.
///
/// Re-entrant batches are not supported; a caller that wants to extend an
/// open batch must flatten the edits into it explicitly.
#[derive(Debug)]
pub(super) struct BatchAlreadyOpen;

impl std::error::Error for BatchAlreadyOpen {}

impl core::fmt::Display for BatchAlreadyOpen {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("batch already open")
    }
}

impl Error {
    /// Creates a batch already open error.
    pub fn batch_already_open() -> Error {
        Error::from(super::ErrorKind::BatchAlreadyOpen(BatchAlreadyOpen))
    }

    /// Returns `true` if this error is a batch already open error.
    pub fn is_batch_already_open(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::BatchAlreadyOpen(_))
    }
}
