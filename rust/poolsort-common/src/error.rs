use thiserror::Error;

#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_ref()
    }

    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    pub fn invalid_arg(name: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidArgument {
                name: name.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    /// Creates an error for an access that falls outside of `[0, len)`.
    ///
    /// For range accesses, `index` is the first offending position (usually the
    /// exclusive end of the requested range).
    pub fn index_out_of_range(name: impl Into<String>, index: usize, len: usize) -> Error {
        Error(
            ErrorKind::IndexOutOfRange {
                name: name.into(),
                index,
                len,
            }
            .into(),
        )
    }

    /// Returns `true` if this error reports an invalid argument.
    pub fn is_invalid_arg(&self) -> bool {
        matches!(self.kind(), ErrorKind::InvalidArgument { .. })
    }

    /// Returns `true` if this error reports an out-of-range index or range.
    pub fn is_index_out_of_range(&self) -> bool {
        matches!(self.kind(), ErrorKind::IndexOutOfRange { .. })
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("invalid argument {name}: {message}")]
    InvalidArgument { name: String, message: String },

    #[error("{name} out of range: {index} is beyond length {len}")]
    IndexOutOfRange {
        name: String,
        index: usize,
        len: usize,
    },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}
