use super::Error;

/// Error when a search produces more logical entries than allowed.
///
/// Entries emitted before the limit was hit remain valid.
#[derive(Debug)]
pub(super) struct SizeLimitExceeded {
    limit: usize,
}

impl std::error::Error for SizeLimitExceeded {}

impl core::fmt::Display for SizeLimitExceeded {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "size limit exceeded: {}", self.limit)
    }
}

impl Error {
    /// Creates a size limit exceeded error.
    pub fn size_limit_exceeded(limit: usize) -> Error {
        Error::from(super::ErrorKind::SizeLimitExceeded(SizeLimitExceeded {
            limit,
        }))
    }

    /// Returns `true` if this error is a size limit exceeded error.
    pub fn is_size_limit_exceeded(&self) -> bool {
        matches!(self.root().kind(), super::ErrorKind::SizeLimitExceeded(_))
    }

    /// The limit that was exceeded, if this is a size limit error.
    pub fn size_limit(&self) -> Option<usize> {
        self.find(|kind| match kind {
            super::ErrorKind::SizeLimitExceeded(err) => Some(&err.limit),
            _ => None,
        })
        .copied()
    }
}
