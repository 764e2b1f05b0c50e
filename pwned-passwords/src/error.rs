/// Named conditions for the HTTP statuses the Pwned Passwords API documents.
///
/// Anything not listed here maps to [`ServiceErrorKind::Unmapped`] and is surfaced
/// as a generic [`Error::Service`] carrying the raw status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceErrorKind {
    BadRequest,
    Forbidden,
    PasswordNotFound,
    RateLimited,
    ServiceUnavailable,
    Unmapped,
}

impl ServiceErrorKind {
    /// Maps an HTTP status code to its error kind.
    pub const fn from_status(status: u16) -> Self {
        match status {
            400 => Self::BadRequest,
            403 => Self::Forbidden,
            404 => Self::PasswordNotFound,
            429 => Self::RateLimited,
            503 => Self::ServiceUnavailable,
            _ => Self::Unmapped,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("HTTP 400 bad request: {message}")]
    BadRequest { message: String },

    #[error("HTTP 403 forbidden: {message}")]
    Forbidden { message: String },

    #[error("password not found")]
    PasswordNotFound,

    #[error("HTTP 429 rate limit exceeded (retry after {retry_after:?} seconds)")]
    RateLimited { retry_after: Option<u64> },

    #[error("HTTP 503 service unavailable: {message}")]
    ServiceUnavailable { message: String },

    #[error("HTTP {status}: {message}")]
    Service { status: u16, message: String },

    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("HTTP request failed: {0}")]
    Network(#[source] reqwest::Error),

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl Error {
    /// Builds the error for a non-success response.
    pub fn from_status(status: u16, message: impl Into<String>, retry_after: Option<u64>) -> Self {
        let message = message.into();
        match ServiceErrorKind::from_status(status) {
            ServiceErrorKind::BadRequest => Error::BadRequest { message },
            ServiceErrorKind::Forbidden => Error::Forbidden { message },
            ServiceErrorKind::PasswordNotFound => Error::PasswordNotFound,
            ServiceErrorKind::RateLimited => Error::RateLimited { retry_after },
            ServiceErrorKind::ServiceUnavailable => Error::ServiceUnavailable { message },
            ServiceErrorKind::Unmapped => Error::Service { status, message },
        }
    }

    /// The HTTP status that produced this error, if it came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::BadRequest { .. } => Some(400),
            Error::Forbidden { .. } => Some(403),
            Error::PasswordNotFound => Some(404),
            Error::RateLimited { .. } => Some(429),
            Error::ServiceUnavailable { .. } => Some(503),
            Error::Service { status, .. } => Some(*status),
            _ => None,
        }
    }
}
