//! Runtime errors for the interpreter

use thiserror::Error;

/// Runtime error during interpretation. Every error is fatal to the run.
#[derive(Debug, Clone, Error)]
#[error("Runtime error: {message}")]
pub struct RuntimeError {
    pub kind: ErrorKind,
    pub message: String,
}

/// Kinds of runtime errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Variable redeclared in one scope, signature registered twice, or a
    /// built-in name redefined
    DuplicateDefinition,
    /// Unknown variable, or no function matches a call signature
    UnresolvedName,
    /// Coercion failure, incompatible assignment, bad return value, or a
    /// non-addressable assignment target
    TypeMismatch,
    /// Non-positive array size, index out of bounds, division by zero
    ArityOrSize,
    /// Non-void function finished without returning
    ControlFlowMisuse,
    /// Call depth beyond the configured limit
    StackOverflow,
    /// Console failure or end of input
    Io,
}

impl RuntimeError {
    fn new(kind: ErrorKind, message: String) -> Self {
        RuntimeError { kind, message }
    }

    pub fn duplicate_variable(name: &str) -> Self {
        Self::new(
            ErrorKind::DuplicateDefinition,
            format!("variable {name} already exists in this scope"),
        )
    }

    pub fn duplicate_function(signature: &str) -> Self {
        Self::new(
            ErrorKind::DuplicateDefinition,
            format!("function {signature} already exists"),
        )
    }

    pub fn builtin_redefined(name: &str) -> Self {
        Self::new(
            ErrorKind::DuplicateDefinition,
            format!("cannot redefine built-in function {name}"),
        )
    }

    pub fn undefined_variable(name: &str) -> Self {
        Self::new(
            ErrorKind::UnresolvedName,
            format!("undefined variable: {name}"),
        )
    }

    pub fn no_matching_function(signature: &str) -> Self {
        Self::new(
            ErrorKind::UnresolvedName,
            format!("no function matches signature {signature}"),
        )
    }

    pub fn type_error(expected: &str, got: &str) -> Self {
        Self::new(
            ErrorKind::TypeMismatch,
            format!("type error: expected {expected}, got {got}"),
        )
    }

    pub fn void_parameter(function: &str, param: &str) -> Self {
        Self::new(
            ErrorKind::TypeMismatch,
            format!("parameter {param} of function {function} cannot have type void"),
        )
    }

    pub fn not_addressable(what: &str) -> Self {
        Self::new(
            ErrorKind::TypeMismatch,
            format!("{what} requires a variable, got a value"),
        )
    }

    pub fn missing_value() -> Self {
        Self::new(
            ErrorKind::TypeMismatch,
            "expression produced no value".to_string(),
        )
    }

    pub fn return_mismatch(function: &str, expected: &str, got: &str) -> Self {
        Self::new(
            ErrorKind::TypeMismatch,
            format!("function {function} must return {expected}, returned {got}"),
        )
    }

    pub fn invalid_array_size(size: i64) -> Self {
        Self::new(
            ErrorKind::ArityOrSize,
            format!("cannot declare array of size {size}"),
        )
    }

    pub fn index_out_of_bounds(index: i64, len: usize) -> Self {
        Self::new(
            ErrorKind::ArityOrSize,
            format!("index {index} out of bounds for length {len}"),
        )
    }

    pub fn division_by_zero() -> Self {
        Self::new(ErrorKind::ArityOrSize, "division by zero".to_string())
    }

    pub fn missing_return(function: &str) -> Self {
        Self::new(
            ErrorKind::ControlFlowMisuse,
            format!("missing return statement in function {function}"),
        )
    }

    pub fn return_in_expression() -> Self {
        Self::new(
            ErrorKind::ControlFlowMisuse,
            "return used where a value is expected".to_string(),
        )
    }

    pub fn stack_overflow(limit: usize) -> Self {
        Self::new(
            ErrorKind::StackOverflow,
            format!("stack overflow: call depth exceeded {limit}"),
        )
    }

    pub fn io_error(msg: &str) -> Self {
        Self::new(ErrorKind::Io, format!("IO error: {msg}"))
    }

    pub fn end_of_input() -> Self {
        Self::new(ErrorKind::Io, "IO error: end of input".to_string())
    }
}

impl From<std::io::Error> for RuntimeError {
    fn from(err: std::io::Error) -> Self {
        RuntimeError::io_error(&err.to_string())
    }
}

/// Result type for interpreter operations
pub type InterpResult<T> = Result<T, RuntimeError>;
