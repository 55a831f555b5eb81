// Error kinds mirror the engine status codes 1:1, plus a binding-local kind
// for shared-library loading failures.
use std::error::Error as StdError;
use std::fmt;
use std::path::PathBuf;

use libc::c_int;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    OutOfMemory,
    Permission,
    InvalidFile,
    FileExists,
    TooManyFiles,
    FileNotFound,
    DiskFull,
    DirectoryNotEmpty,
    NoSuchDatabase,
    Query,
    NullArgument,
    Engine,
    Cancelled,
    BadIndex,
    Protocol,
    Network,
    Internal,
    WrongType,
    Usage,
    InvalidArgument,
    BadHandle,
    Unknown,
    Library,
}

impl ErrorKind {
    /// Maps an engine status code to a kind. Codes outside the documented
    /// range come back as `Unknown`; callers keep the raw code via
    /// `Error::with_status`.
    pub fn from_status(status: c_int) -> Self {
        match status {
            1 => ErrorKind::OutOfMemory,
            2 => ErrorKind::Permission,
            3 => ErrorKind::InvalidFile,
            4 => ErrorKind::FileExists,
            5 => ErrorKind::TooManyFiles,
            6 => ErrorKind::FileNotFound,
            7 => ErrorKind::DiskFull,
            8 => ErrorKind::DirectoryNotEmpty,
            9 => ErrorKind::NoSuchDatabase,
            10 => ErrorKind::Query,
            11 => ErrorKind::NullArgument,
            12 => ErrorKind::Engine,
            13 => ErrorKind::Cancelled,
            14 => ErrorKind::BadIndex,
            15 => ErrorKind::Protocol,
            16 => ErrorKind::Network,
            17 => ErrorKind::Internal,
            18 => ErrorKind::WrongType,
            19 => ErrorKind::Usage,
            20 => ErrorKind::InvalidArgument,
            21 => ErrorKind::BadHandle,
            _ => ErrorKind::Unknown,
        }
    }

    /// The engine status code this kind translates, if one exists.
    /// `Library` is binding-local and has no engine status.
    pub fn status(self) -> Option<c_int> {
        match self {
            ErrorKind::OutOfMemory => Some(1),
            ErrorKind::Permission => Some(2),
            ErrorKind::InvalidFile => Some(3),
            ErrorKind::FileExists => Some(4),
            ErrorKind::TooManyFiles => Some(5),
            ErrorKind::FileNotFound => Some(6),
            ErrorKind::DiskFull => Some(7),
            ErrorKind::DirectoryNotEmpty => Some(8),
            ErrorKind::NoSuchDatabase => Some(9),
            ErrorKind::Query => Some(10),
            ErrorKind::NullArgument => Some(11),
            ErrorKind::Engine => Some(12),
            ErrorKind::Cancelled => Some(13),
            ErrorKind::BadIndex => Some(14),
            ErrorKind::Protocol => Some(15),
            ErrorKind::Network => Some(16),
            ErrorKind::Internal => Some(17),
            ErrorKind::WrongType => Some(18),
            ErrorKind::Usage => Some(19),
            ErrorKind::InvalidArgument => Some(20),
            ErrorKind::BadHandle => Some(21),
            ErrorKind::Unknown => Some(22),
            ErrorKind::Library => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::OutOfMemory => "out-of-memory",
            ErrorKind::Permission => "permission",
            ErrorKind::InvalidFile => "invalid-file",
            ErrorKind::FileExists => "file-exists",
            ErrorKind::TooManyFiles => "too-many-files",
            ErrorKind::FileNotFound => "file-not-found",
            ErrorKind::DiskFull => "disk-full",
            ErrorKind::DirectoryNotEmpty => "directory-not-empty",
            ErrorKind::NoSuchDatabase => "no-such-database",
            ErrorKind::Query => "query",
            ErrorKind::NullArgument => "null-argument",
            ErrorKind::Engine => "engine",
            ErrorKind::Cancelled => "cancelled",
            ErrorKind::BadIndex => "bad-index",
            ErrorKind::Protocol => "protocol",
            ErrorKind::Network => "network",
            ErrorKind::Internal => "internal",
            ErrorKind::WrongType => "wrong-type",
            ErrorKind::Usage => "usage",
            ErrorKind::InvalidArgument => "invalid-argument",
            ErrorKind::BadHandle => "bad-handle",
            ErrorKind::Unknown => "unknown",
            ErrorKind::Library => "library",
        }
    }
}

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: Option<String>,
    path: Option<PathBuf>,
    status: Option<c_int>,
    column: Option<usize>,
    hint: Option<String>,
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            path: None,
            status: None,
            column: None,
            hint: None,
            source: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn path(&self) -> Option<&std::path::Path> {
        self.path.as_deref()
    }

    pub fn status(&self) -> Option<c_int> {
        self.status
    }

    pub fn column(&self) -> Option<usize> {
        self.column
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_status(mut self, status: c_int) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_column(mut self, column: usize) -> Self {
        self.column = Some(column);
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.kind)?;
        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }
        if let Some(status) = self.status {
            write!(f, " (status: {status})")?;
        }
        if let Some(column) = self.column {
            write!(f, " (column: {column})")?;
        }
        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|source| source.as_ref() as &(dyn StdError + 'static))
    }
}

pub fn to_exit_code(kind: ErrorKind) -> i32 {
    match kind.status() {
        Some(status) => status,
        None => 23,
    }
}

#[cfg(test)]
mod tests {
    use super::{Error, ErrorKind, to_exit_code};

    #[test]
    fn status_mapping_is_stable() {
        let cases = [
            (ErrorKind::OutOfMemory, 1),
            (ErrorKind::Permission, 2),
            (ErrorKind::InvalidFile, 3),
            (ErrorKind::FileExists, 4),
            (ErrorKind::TooManyFiles, 5),
            (ErrorKind::FileNotFound, 6),
            (ErrorKind::DiskFull, 7),
            (ErrorKind::DirectoryNotEmpty, 8),
            (ErrorKind::NoSuchDatabase, 9),
            (ErrorKind::Query, 10),
            (ErrorKind::NullArgument, 11),
            (ErrorKind::Engine, 12),
            (ErrorKind::Cancelled, 13),
            (ErrorKind::BadIndex, 14),
            (ErrorKind::Protocol, 15),
            (ErrorKind::Network, 16),
            (ErrorKind::Internal, 17),
            (ErrorKind::WrongType, 18),
            (ErrorKind::Usage, 19),
            (ErrorKind::InvalidArgument, 20),
            (ErrorKind::BadHandle, 21),
            (ErrorKind::Unknown, 22),
        ];

        for (kind, status) in cases {
            assert_eq!(kind.status(), Some(status));
            assert_eq!(ErrorKind::from_status(status), kind);
            assert_eq!(to_exit_code(kind), status);
        }
    }

    #[test]
    fn out_of_range_status_is_unknown() {
        assert_eq!(ErrorKind::from_status(0), ErrorKind::Unknown);
        assert_eq!(ErrorKind::from_status(99), ErrorKind::Unknown);
        assert_eq!(ErrorKind::from_status(-1), ErrorKind::Unknown);
    }

    #[test]
    fn library_kind_has_no_engine_status() {
        assert_eq!(ErrorKind::Library.status(), None);
        assert_eq!(to_exit_code(ErrorKind::Library), 23);
    }

    #[test]
    fn display_includes_context() {
        let err = Error::new(ErrorKind::WrongType)
            .with_message("expected a double")
            .with_status(18)
            .with_column(4);
        let text = err.to_string();
        assert!(text.contains("WrongType"));
        assert!(text.contains("expected a double"));
        assert!(text.contains("status: 18"));
        assert!(text.contains("column: 4"));
    }
}
