use super::Error;

/// Error when an entry mapping references something that does not exist.
///
/// This occurs when:
/// - A source mapping names a source that is not configured
/// - A field mapping names a field the source does not define
/// - A foreign-key variable points at an unknown source or field
///
/// The offending source and field names are kept so a protocol layer can
/// report them.
#[derive(Debug)]
pub(super) struct InvalidMapping {
    message: Box<str>,
    source: Option<Box<str>>,
    field: Option<Box<str>>,
}

impl std::error::Error for InvalidMapping {}

impl core::fmt::Display for InvalidMapping {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid mapping: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid mapping error with a free-form message.
    pub fn invalid_mapping(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidMapping(InvalidMapping {
            message: message.into().into(),
            source: None,
            field: None,
        }))
    }

    /// Creates an invalid mapping error for a source that is not configured.
    pub fn unknown_source(source: impl Into<String>) -> Error {
        let source = source.into();
        Error::from(super::ErrorKind::InvalidMapping(InvalidMapping {
            message: format!("unknown source `{source}`").into(),
            source: Some(source.into()),
            field: None,
        }))
    }

    /// Creates an invalid mapping error for a field the source does not
    /// define.
    pub fn unknown_field(source: impl Into<String>, field: impl Into<String>) -> Error {
        let source = source.into();
        let field = field.into();
        Error::from(super::ErrorKind::InvalidMapping(InvalidMapping {
            message: format!("source `{source}` has no field `{field}`").into(),
            source: Some(source.into()),
            field: Some(field.into()),
        }))
    }

    /// Returns `true` if this error is an invalid mapping error.
    pub fn is_invalid_mapping(&self) -> bool {
        matches!(self.root().kind(), super::ErrorKind::InvalidMapping(_))
    }

    /// The source named by an invalid mapping error, if any.
    pub fn mapping_source(&self) -> Option<&str> {
        self.find(|kind| match kind {
            super::ErrorKind::InvalidMapping(err) => err.source.as_ref(),
            _ => None,
        })
        .map(|source| &**source)
    }

    /// The field named by an invalid mapping error, if any.
    pub fn mapping_field(&self) -> Option<&str> {
        self.find(|kind| match kind {
            super::ErrorKind::InvalidMapping(err) => err.field.as_ref(),
            _ => None,
        })
        .map(|field| &**field)
    }
}
