//! The error type of the precheck.
//!
//! Every failure of the check is one of four kinds. The kinds stay inspectable
//! after propagation, so a caller (or a test) can tell a topology violation from
//! an unreachable coordinator without parsing the message.
//!
use std::fmt;

pub type Result<T> = std::result::Result<T, PrecheckError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Connection,
    Query,
    Topology,
    Health,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// The display string of every variant is the bare reason, which is what
/// ends up after `Before detect cluster failed: `.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum PrecheckError {
    /// The coordinator cannot be reached.
    #[error("{0}")]
    Connection(String),
    /// A listing or health request was rejected or returned garbage.
    #[error("{0}")]
    Query(String),
    /// The number of data groups is not the expected number.
    #[error("{0}")]
    Topology(String),
    /// One or more nodes are not healthy.
    #[error("{0}")]
    Health(String),
}

impl PrecheckError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PrecheckError::Connection(_) => ErrorKind::Connection,
            PrecheckError::Query(_) => ErrorKind::Query,
            PrecheckError::Topology(_) => ErrorKind::Topology,
            PrecheckError::Health(_) => ErrorKind::Health,
        }
    }
    pub fn message(&self) -> &str {
        match self {
            PrecheckError::Connection(message)
            | PrecheckError::Query(message)
            | PrecheckError::Topology(message)
            | PrecheckError::Health(message) => message,
        }
    }
    /// Process exit status for the binary; 1 is left for configuration errors.
    pub fn exit_code(&self) -> i32 {
        match self.kind() {
            ErrorKind::Connection => 2,
            ErrorKind::Query => 3,
            ErrorKind::Topology => 4,
            ErrorKind::Health => 5,
        }
    }
}
