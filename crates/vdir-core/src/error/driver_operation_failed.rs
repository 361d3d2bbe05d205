use super::Error;

/// Error when a backend connection rejects a statement.
///
/// This wraps errors from the underlying client library:
/// - Connection errors
/// - Constraint violations reported by the backend
/// - Malformed statements the backend refuses to prepare
///
/// Statements executed earlier in the same directory operation are not
/// rolled back.
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
    /// Creates an error from a backend operation failure.
    ///
    /// This is the preferred way to convert client-specific errors (rusqlite,
    /// url parsing, etc.) into vdir errors.
    pub fn driver_operation_failed(err: impl std::error::Error + Send + Sync + 'static) -> Error {
        Error::from(super::ErrorKind::DriverOperationFailed(
            DriverOperationFailed {
                inner: Box::new(err),
            },
        ))
    }

    /// Returns `true` if this error is a backend operation failure.
    pub fn is_driver_operation_failed(&self) -> bool {
        matches!(
            self.root().kind(),
            super::ErrorKind::DriverOperationFailed(_)
        )
    }
}
