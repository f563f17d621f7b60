use thiserror::Error;

/// Stable error category exposed to transport adapters.
///
/// Adapters map on this value, never on the message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    DuplicateEmail,
    InvalidState,
    NotFound,
    Infrastructure,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::DuplicateEmail => "duplicate_email",
            Self::InvalidState => "invalid_state",
            Self::NotFound => "not_found",
            Self::Infrastructure => "infrastructure",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation: {0}")]
    Validation(String),

    #[error("Email already registered: {0}")]
    DuplicateEmail(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Infrastructure: {0}")]
    Infrastructure(String),
}

impl DomainError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::DuplicateEmail(_) => ErrorKind::DuplicateEmail,
            Self::InvalidState(_) => ErrorKind::InvalidState,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Infrastructure(_) => ErrorKind::Infrastructure,
        }
    }

    pub(crate) fn member_not_found(field: &'static str, value: impl ToString) -> Self {
        Self::NotFound {
            entity: "Member",
            field,
            value: value.to_string(),
        }
    }

    /// A save carried a revision older than the stored one.
    pub(crate) fn stale_member(id: i64) -> Self {
        Self::InvalidState(format!(
            "member {} was changed by another operation; reload and retry",
            id
        ))
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
