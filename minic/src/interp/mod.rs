//! Tree-walking interpreter
//!
//! Runs a [`Program`](crate::ast::Program) directly from its syntax tree.
//! Variables live in reference-counted cells so arrays can be shared between
//! names, and overloaded functions are selected by the runtime types of their
//! arguments.

mod coerce;
mod console;
mod env;
mod error;
mod eval;
mod registry;
mod scope;
mod stack;
mod value;

pub use coerce::{to_array, to_bool, to_int};
pub use console::{parse_bool, parse_int, Console, StdConsole, StreamConsole};
pub use env::Environment;
pub use error::{ErrorKind, InterpResult, RuntimeError};
pub use eval::{Flow, InterpConfig, Interpreter, DEFAULT_MAX_CALL_DEPTH, ENTRY_POINT};
pub use registry::{declared_signature, is_builtin, FunctionRegistry, SignatureBuilder, BUILTINS};
pub use scope::{child_scope, Scope, ScopeRef};
pub use stack::OperandStack;
pub use value::{ArrayCell, Cell, Value};
