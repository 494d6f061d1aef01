use super::Error;

/// Error created from a message, via the `err!` / `bail!` macros.
#[derive(Debug)]
pub(super) struct AdhocError {
    message: Box<str>,
}

impl std::error::Error for AdhocError {}

impl core::fmt::Display for AdhocError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error {
    /// Creates an adhoc error from format arguments.
    ///
    /// Prefer the `err!` and `bail!` macros over calling this directly.
    pub fn from_args(args: core::fmt::Arguments<'_>) -> Error {
        Error::from(super::ErrorKind::Adhoc(AdhocError {
            message: args.to_string().into(),
        }))
    }
}
