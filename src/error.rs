use quick_xml::events::attributes::AttrError;
use thiserror::Error;

/// Broad failure classes surfaced by [`parse`](crate::parse) and [`write`](crate::write).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The element structure of the document is not what GPX requires.
    MalformedStructure,
    /// An attribute or text body could not be converted to its required type.
    MalformedValue,
    /// The underlying byte stream failed.
    IoFailure,
    /// The serializer was asked to do something out of sequence.
    InvalidState,
    /// The serializer was handed a value it cannot emit.
    InvalidArgument,
}

#[derive(Debug, Error)]
pub enum GpxError {
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    Attribute(#[from] AttrError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid UTF-8 in document: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("Expected {expected}, found {found}")]
    UnexpectedEvent { expected: String, found: String },

    #[error("Namespace prefix '{0}' is not bound")]
    UnboundPrefix(String),

    #[error("Missing attribute '{attribute}' on <{element}>")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },

    #[error("Invalid value '{value}' for attribute '{attribute}' on <{element}>")]
    InvalidAttribute {
        element: &'static str,
        attribute: &'static str,
        value: String,
    },

    #[error("Invalid value '{value}' in <{element}>")]
    InvalidValue { element: &'static str, value: String },

    #[error("Invalid serializer state: {0}")]
    InvalidState(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl GpxError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Xml(quick_xml::Error::Io(_)) | Self::Io(_) => ErrorKind::IoFailure,
            Self::Xml(_)
            | Self::Attribute(_)
            | Self::Utf8(_)
            | Self::UnexpectedEvent { .. }
            | Self::UnboundPrefix(_)
            | Self::MissingAttribute { .. } => ErrorKind::MalformedStructure,
            Self::InvalidAttribute { .. } | Self::InvalidValue { .. } => ErrorKind::MalformedValue,
            Self::InvalidState(_) => ErrorKind::InvalidState,
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
        }
    }

    pub(crate) fn unexpected(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::UnexpectedEvent {
            expected: expected.into(),
            found: found.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GpxError>;
