use backtrace::Backtrace;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::result::Result;

use crate::{atomic, Atomic};

/// Error kinds for Quartermaster operations.
///
/// Evaluating a filter never fails; these kinds describe failures of the code
/// around the evaluator: building and validating conditions, configuring the
/// engine, paging results and delivering store events.
///
/// # Examples
///
/// ```rust,ignore
/// use quartermaster::errors::{QuartermasterError, ErrorKind, QuartermasterResult};
///
/// fn example() -> QuartermasterResult<()> {
///     Err(QuartermasterError::new("Unknown field crewSize", ErrorKind::InvalidFieldName))
/// }
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ErrorKind {
    /// Error building a condition or sequence
    FilterError,
    /// The field path is not part of the asset type's catalog
    InvalidFieldName,
    /// The literal cannot be interpreted for the field's kind
    InvalidDataType,
    /// Generic validation error
    ValidationError,
    /// The requested condition, operator or page was not found
    NotFound,
    /// The operation is not valid in the current context
    InvalidOperation,
    /// Error encoding or decoding data
    EncodingError,
    /// Error in event processing
    EventError,
    /// Internal error (usually indicates a bug)
    InternalError,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::FilterError => write!(f, "Filter error"),
            ErrorKind::InvalidFieldName => write!(f, "Invalid field name"),
            ErrorKind::InvalidDataType => write!(f, "Invalid data type"),
            ErrorKind::ValidationError => write!(f, "Validation error"),
            ErrorKind::NotFound => write!(f, "Not found"),
            ErrorKind::InvalidOperation => write!(f, "Invalid operation"),
            ErrorKind::EncodingError => write!(f, "Encoding error"),
            ErrorKind::EventError => write!(f, "Event error"),
            ErrorKind::InternalError => write!(f, "Internal error"),
        }
    }
}

/// Custom Quartermaster error type.
///
/// `QuartermasterError` carries the error message, its kind and an optional
/// cause. A backtrace is captured on construction for debugging.
///
/// # Examples
///
/// ```rust,ignore
/// use quartermaster::errors::{QuartermasterError, ErrorKind};
///
/// let cause = QuartermasterError::new("expected a number", ErrorKind::InvalidDataType);
/// let err = QuartermasterError::new_with_cause(
///     "Invalid condition on quantity",
///     ErrorKind::FilterError,
///     cause,
/// );
/// ```
#[derive(Clone)]
pub struct QuartermasterError {
    message: String,
    error_kind: ErrorKind,
    cause: Option<Box<QuartermasterError>>,
    backtrace: Atomic<Backtrace>,
}

impl QuartermasterError {
    /// Creates a new `QuartermasterError` with the specified message and error kind.
    pub fn new(message: &str, error_kind: ErrorKind) -> Self {
        QuartermasterError {
            message: message.to_string(),
            error_kind,
            cause: None,
            backtrace: atomic(Backtrace::new()),
        }
    }

    /// Creates a new `QuartermasterError` with a cause error.
    ///
    /// The cause is preserved and reported through [`Error::source`].
    pub fn new_with_cause(message: &str, error_type: ErrorKind, cause: QuartermasterError) -> Self {
        QuartermasterError {
            message: message.to_string(),
            error_kind: error_type,
            cause: Some(Box::new(cause)),
            backtrace: atomic(Backtrace::new()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.error_kind
    }

    pub fn cause(&self) -> Option<&QuartermasterError> {
        self.cause.as_deref()
    }
}

impl Display for QuartermasterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Debug for QuartermasterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // print error message with stack trace followed by cause
        match &self.cause {
            Some(cause) => write!(f, "{}\nCaused by: {:?}", self.message, cause),
            None => write!(f, "{}\n{:?}", self.message, self.backtrace.read()),
        }
    }
}

impl Error for QuartermasterError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.cause {
            Some(cause) => Some(cause.as_ref()),
            None => None,
        }
    }
}

/// A result type alias for Quartermaster operations.
pub type QuartermasterResult<T> = Result<T, QuartermasterError>;

impl From<serde_json::Error> for QuartermasterError {
    fn from(err: serde_json::Error) -> Self {
        QuartermasterError::new(
            &format!("JSON encoding error: {}", err),
            ErrorKind::EncodingError,
        )
    }
}

impl From<std::num::ParseIntError> for QuartermasterError {
    fn from(err: std::num::ParseIntError) -> Self {
        QuartermasterError::new(
            &format!("Integer parsing error: {}", err),
            ErrorKind::InvalidDataType,
        )
    }
}

impl From<std::num::ParseFloatError> for QuartermasterError {
    fn from(err: std::num::ParseFloatError) -> Self {
        QuartermasterError::new(
            &format!("Float parsing error: {}", err),
            ErrorKind::InvalidDataType,
        )
    }
}

impl From<String> for QuartermasterError {
    fn from(msg: String) -> Self {
        QuartermasterError::new(&msg, ErrorKind::InternalError)
    }
}

impl From<&str> for QuartermasterError {
    fn from(msg: &str) -> Self {
        QuartermasterError::new(msg, ErrorKind::InternalError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_new_creates_error() {
        let error = QuartermasterError::new("An error occurred", ErrorKind::FilterError);
        assert_eq!(error.message, "An error occurred");
        assert_eq!(error.error_kind, ErrorKind::FilterError);
        assert!(error.cause.is_none());
    }

    #[test]
    fn error_new_with_cause_creates_error() {
        let cause = QuartermasterError::new("not a number", ErrorKind::InvalidDataType);
        let error = QuartermasterError::new_with_cause("Bad condition", ErrorKind::FilterError, cause);
        assert_eq!(error.message(), "Bad condition");
        assert_eq!(error.kind(), &ErrorKind::FilterError);
        assert_eq!(error.cause().map(|c| c.kind().clone()), Some(ErrorKind::InvalidDataType));
    }

    #[test]
    fn error_source_follows_cause() {
        let cause = QuartermasterError::new("inner", ErrorKind::NotFound);
        let error = QuartermasterError::new_with_cause("outer", ErrorKind::InvalidOperation, cause);
        let source = error.source().expect("source should be set");
        assert_eq!(source.to_string(), "inner");

        let plain = QuartermasterError::new("plain", ErrorKind::InternalError);
        assert!(plain.source().is_none());
    }

    #[test]
    fn error_display_prints_message() {
        let error = QuartermasterError::new("Page size must be positive", ErrorKind::ValidationError);
        assert_eq!(format!("{}", error), "Page size must be positive");
    }

    #[test]
    fn error_debug_prints_cause_chain() {
        let cause = QuartermasterError::new("inner", ErrorKind::NotFound);
        let error = QuartermasterError::new_with_cause("outer", ErrorKind::InvalidOperation, cause);
        let debug = format!("{:?}", error);
        assert!(debug.starts_with("outer\nCaused by: inner"));
    }

    #[test]
    fn error_kind_display() {
        assert_eq!(ErrorKind::InvalidFieldName.to_string(), "Invalid field name");
        assert_eq!(ErrorKind::EventError.to_string(), "Event error");
    }

    #[test]
    fn from_parse_float_error() {
        let err = "abc".parse::<f64>().unwrap_err();
        let error: QuartermasterError = err.into();
        assert_eq!(error.kind(), &ErrorKind::InvalidDataType);
    }

    #[test]
    fn from_parse_int_error() {
        let err = "abc".parse::<i64>().unwrap_err();
        let error: QuartermasterError = err.into();
        assert_eq!(error.kind(), &ErrorKind::InvalidDataType);
    }

    #[test]
    fn from_serde_json_error() {
        let err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let error: QuartermasterError = err.into();
        assert_eq!(error.kind(), &ErrorKind::EncodingError);
        assert!(error.message().starts_with("JSON encoding error"));
    }

    #[test]
    fn from_string_and_str() {
        let error: QuartermasterError = String::from("boom").into();
        assert_eq!(error.kind(), &ErrorKind::InternalError);
        let error: QuartermasterError = "boom".into();
        assert_eq!(error.message(), "boom");
    }
}
