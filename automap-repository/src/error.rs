use core::fmt;

use automap::MapError;

/// What went wrong, independently of where.
///
/// Callers branch on the kind (a `NotFound` usually becomes a 404); the context
/// stacked on top of it by [`Error::wrap`] is for humans.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The entity already exists.
    Conflict,
    /// The entity does not exist.
    NotFound,
    /// A bug, or a broken invariant on our side.
    Internal,
    /// Stored state can no longer be trusted.
    Corrupt,
    /// The caller sent something invalid.
    BadRequest,
    /// An upstream service failed.
    BadGateway,
}

impl ErrorKind {
    /// The bracketed marker shown at the end of every error message.
    pub const fn sentinel(self) -> &'static str {
        match self {
            ErrorKind::Conflict => "[CONFLICT]",
            ErrorKind::NotFound => "[NOT FOUND]",
            ErrorKind::Internal => "[INTERNAL ERROR]",
            ErrorKind::Corrupt => "[CORRUPT STATE]",
            ErrorKind::BadRequest => "[BAD REQUEST]",
            ErrorKind::BadGateway => "[BAD GATEWAY]",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sentinel())
    }
}

/// Error returned by repositories and DAOs.
///
/// Displays as its context, outermost first, followed by the kind:
/// `[reading user 7] -> [NOT FOUND]`.
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    context: Vec<String>,
    source: Option<Box<dyn core::error::Error + Send + Sync>>,
}

impl Error {
    /// An error of the given kind, without context.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: Vec::new(),
            source: None,
        }
    }

    /// An error of the given kind, caused by `source`.
    ///
    /// The source is reachable through [`core::error::Error::source`] but is not part
    /// of the message; wrap the error to describe it.
    pub fn with_source(
        kind: ErrorKind,
        source: impl Into<Box<dyn core::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            kind,
            context: Vec::new(),
            source: Some(source.into()),
        }
    }

    /// Adds `info` in front of the existing context.
    ///
    /// `info` is trimmed; if nothing is left, the error is returned unchanged. The
    /// kind never changes.
    pub fn wrap(mut self, info: impl AsRef<str>) -> Self {
        let info = info.as_ref().trim();
        if !info.is_empty() {
            self.context.insert(0, info.to_owned());
        }
        self
    }

    /// The kind of error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns true if this error is of the given kind.
    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }

    /// The context, outermost first.
    pub fn context(&self) -> impl Iterator<Item = &str> {
        self.context.iter().map(String::as_str)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for info in &self.context {
            write!(f, "[{info}] -> ")?;
        }
        f.write_str(self.kind.sentinel())
    }
}

impl core::error::Error for Error {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|source| source as &(dyn core::error::Error + 'static))
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

/// Mapping failures are [`ErrorKind::Internal`], with the mapper's message as context.
impl From<MapError> for Error {
    fn from(err: MapError) -> Self {
        Self::new(ErrorKind::Internal).wrap(err.to_string())
    }
}
