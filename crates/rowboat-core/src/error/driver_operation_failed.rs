use super::Error;

/// Error when an injected executor operation fails.
///
/// This wraps errors from whatever backs the executor: connection failures,
/// constraint violations, statement execution errors. The mapper never
/// retries; the error propagates unchanged to the caller.
#[derive(Debug)]
pub(super) struct DriverOperationFailed {
    pub(super) inner: Box<dyn std::error::Error + Send + Sync>,
}

impl std::error::Error for DriverOperationFailed {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.inner.as_ref())
    }
}

impl core::fmt::Display for DriverOperationFailed {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        // Display the error and walk its source chain
        core::fmt::Display::fmt(&self.inner, f)?;
        let mut source = self.inner.source();
        while let Some(err) = source {
            write!(f, ": {}", err)?;
            source = err.source();
        }
        Ok(())
    }
}

impl Error {
    /// Creates an error from an executor operation failure.
    ///
    /// This is the preferred way for executor implementations to convert
    /// backend-specific errors into rowboat errors.
    pub fn driver_operation_failed(err: impl std::error::Error + Send + Sync + 'static) -> Error {
        Error::from(super::ErrorKind::DriverOperationFailed(
            DriverOperationFailed {
                inner: Box::new(err),
            },
        ))
    }

    /// Returns `true` if this error is a driver operation failure.
    pub fn is_driver_operation_failed(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::DriverOperationFailed(_))
    }
}
