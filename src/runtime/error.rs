//! Runtime error taxonomy.
//!
//! Every fallible runtime operation returns [`RtResult`]. A failing operation
//! yields no value and, in addition, records its [`ErrorStatus`] on the
//! [`Runtime`](crate::runtime::Runtime) so call sites that only check for
//! absence can still ask what went wrong via `last_error()`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type RtResult<T> = Result<T, RuntimeError>;

/// Status code recorded by the runtime after a failed operation.
///
/// `Ok` is the initial state and the state after `clear_error()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ErrorStatus {
    #[default]
    Ok,
    TypeMismatch,
    DivisionByZero,
    NullPointer,
    OutOfMemory,
    UndefinedVariable,
    InvalidFunctionCall,
    FieldNotFound,
}

impl ErrorStatus {
    /// Stable human-readable label. These strings are user-visible.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorStatus::Ok => "OK",
            ErrorStatus::TypeMismatch => "Type mismatch",
            ErrorStatus::DivisionByZero => "Division by zero",
            ErrorStatus::NullPointer => "Null pointer",
            ErrorStatus::OutOfMemory => "Out of memory",
            ErrorStatus::UndefinedVariable => "Undefined variable",
            ErrorStatus::InvalidFunctionCall => "Invalid function call",
            ErrorStatus::FieldNotFound => "Field not found",
        }
    }

    pub fn is_ok(self) -> bool {
        self == ErrorStatus::Ok
    }
}

/// Diagnostic code attached to each error kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorCode {
    pub code: &'static str,
    pub title: &'static str,
    pub status: ErrorStatus,
}

pub const TYPE_MISMATCH: ErrorCode = ErrorCode {
    code: "E2001",
    title: "TYPE MISMATCH",
    status: ErrorStatus::TypeMismatch,
};

pub const DIVISION_BY_ZERO: ErrorCode = ErrorCode {
    code: "E2002",
    title: "DIVISION BY ZERO",
    status: ErrorStatus::DivisionByZero,
};

pub const NULL_POINTER: ErrorCode = ErrorCode {
    code: "E2003",
    title: "NULL POINTER",
    status: ErrorStatus::NullPointer,
};

pub const OUT_OF_MEMORY: ErrorCode = ErrorCode {
    code: "E2004",
    title: "OUT OF MEMORY",
    status: ErrorStatus::OutOfMemory,
};

pub const UNDEFINED_VARIABLE: ErrorCode = ErrorCode {
    code: "E2005",
    title: "UNDEFINED VARIABLE",
    status: ErrorStatus::UndefinedVariable,
};

pub const INVALID_FUNCTION_CALL: ErrorCode = ErrorCode {
    code: "E2006",
    title: "INVALID FUNCTION CALL",
    status: ErrorStatus::InvalidFunctionCall,
};

pub const FIELD_NOT_FOUND: ErrorCode = ErrorCode {
    code: "E2007",
    title: "FIELD NOT FOUND",
    status: ErrorStatus::FieldNotFound,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    #[error("type mismatch: {0}")]
    TypeMismatch(String),
    #[error("division by zero")]
    DivisionByZero,
    #[error("null pointer: {0}")]
    NullPointer(String),
    #[error("out of memory: {0}")]
    OutOfMemory(String),
    #[error("undefined variable `{0}`")]
    UndefinedVariable(String),
    #[error("invalid function call: {0}")]
    InvalidFunctionCall(String),
    #[error("field `{0}` not found")]
    FieldNotFound(String),
}

impl RuntimeError {
    pub fn code(&self) -> ErrorCode {
        match self {
            RuntimeError::TypeMismatch(_) => TYPE_MISMATCH,
            RuntimeError::DivisionByZero => DIVISION_BY_ZERO,
            RuntimeError::NullPointer(_) => NULL_POINTER,
            RuntimeError::OutOfMemory(_) => OUT_OF_MEMORY,
            RuntimeError::UndefinedVariable(_) => UNDEFINED_VARIABLE,
            RuntimeError::InvalidFunctionCall(_) => INVALID_FUNCTION_CALL,
            RuntimeError::FieldNotFound(_) => FIELD_NOT_FOUND,
        }
    }

    pub fn status(&self) -> ErrorStatus {
        self.code().status
    }

    pub(crate) fn invalid_operands(op: &str, left: &str, right: &str) -> Self {
        RuntimeError::TypeMismatch(format!("cannot {} {} and {} values", op, left, right))
    }

    pub(crate) fn expected(op: &str, expected: &str, got: &str) -> Self {
        RuntimeError::TypeMismatch(format!("{} expected {}, got {}", op, expected, got))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_labels_are_stable() {
        assert_eq!(ErrorStatus::Ok.as_str(), "OK");
        assert_eq!(ErrorStatus::TypeMismatch.as_str(), "Type mismatch");
        assert_eq!(ErrorStatus::FieldNotFound.as_str(), "Field not found");
        assert!(ErrorStatus::default().is_ok());
    }

    #[test]
    fn every_error_maps_to_its_status() {
        let cases = [
            (RuntimeError::TypeMismatch("x".into()), ErrorStatus::TypeMismatch),
            (RuntimeError::DivisionByZero, ErrorStatus::DivisionByZero),
            (RuntimeError::NullPointer("x".into()), ErrorStatus::NullPointer),
            (RuntimeError::OutOfMemory("x".into()), ErrorStatus::OutOfMemory),
            (
                RuntimeError::UndefinedVariable("x".into()),
                ErrorStatus::UndefinedVariable,
            ),
            (
                RuntimeError::InvalidFunctionCall("x".into()),
                ErrorStatus::InvalidFunctionCall,
            ),
            (RuntimeError::FieldNotFound("x".into()), ErrorStatus::FieldNotFound),
        ];
        for (err, status) in cases {
            assert_eq!(err.status(), status, "{}", err);
        }
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            RuntimeError::invalid_operands("add", "Int", "String").to_string(),
            "type mismatch: cannot add Int and String values"
        );
        assert_eq!(
            RuntimeError::UndefinedVariable("x".into()).to_string(),
            "undefined variable `x`"
        );
        assert_eq!(RuntimeError::DivisionByZero.code().code, "E2002");
    }
}
