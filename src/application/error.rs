use thiserror::Error;

/// Classification of a rejected request, in HTTP terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    BadRequest,
    Conflict,
}

impl ErrorKind {
    pub fn status_code(&self) -> u16 {
        match self {
            ErrorKind::BadRequest => 400,
            ErrorKind::Conflict => 409,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "bad_request",
            ErrorKind::Conflict => "conflict",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum VoucherError {
    #[error("{0}")]
    InvalidArgument(String),

    #[error("{0}")]
    Conflict(String),

    /// Store failures pass through untouched.
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl VoucherError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        VoucherError::InvalidArgument(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        VoucherError::Conflict(message.into())
    }

    /// The classification, or `None` for store errors.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            VoucherError::InvalidArgument(_) => Some(ErrorKind::BadRequest),
            VoucherError::Conflict(_) => Some(ErrorKind::Conflict),
            VoucherError::Store(_) => None,
        }
    }

    /// HTTP-style status; unclassified store errors report 500.
    pub fn status_code(&self) -> u16 {
        self.kind().map(|k| k.status_code()).unwrap_or(500)
    }

    pub fn is_app_error(&self) -> bool {
        self.kind().is_some()
    }
}
