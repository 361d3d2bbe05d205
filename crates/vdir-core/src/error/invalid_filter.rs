use super::Error;

/// Error when a directory filter string cannot be parsed.
#[derive(Debug)]
pub(super) struct InvalidFilter {
    message: Box<str>,
    position: usize,
}

impl std::error::Error for InvalidFilter {}

impl core::fmt::Display for InvalidFilter {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "invalid filter: {} (at offset {})",
            self.message, self.position
        )
    }
}

impl Error {
    /// Creates an invalid filter error pointing at `position` in the input.
    pub fn invalid_filter(message: impl Into<String>, position: usize) -> Error {
        Error::from(super::ErrorKind::InvalidFilter(InvalidFilter {
            message: message.into().into(),
            position,
        }))
    }

    /// Returns `true` if this error is a filter parse error.
    pub fn is_invalid_filter(&self) -> bool {
        matches!(self.root().kind(), super::ErrorKind::InvalidFilter(_))
    }
}
