//! Abstract Syntax Tree definitions
//!
//! The tree is produced by an external parser (or deserialized from JSON) and
//! read by the interpreter. The only state the interpreter writes back is the
//! resolved type of each [`Declaration`], filled in once.

mod node;
mod types;

pub use node::*;
pub use types::*;

use serde::{Deserialize, Serialize};
use std::cell::OnceCell;

/// A program is an ordered sequence of function definitions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub functions: Vec<Function>,
}

impl Program {
    pub fn new(functions: Vec<Function>) -> Self {
        Program { functions }
    }

    /// Load a program from its JSON form
    pub fn from_json(source: &str) -> serde_json::Result<Self> {
        serde_json::from_str(source)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Function definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Function {
    pub name: String,
    pub params: Params,
    /// Body statements; they share the scope holding the parameters
    pub body: Vec<Node>,
    pub return_type: TypeSpec,
}

impl Function {
    pub fn new(
        name: impl Into<String>,
        params: Vec<Declaration>,
        body: Vec<Node>,
        return_type: TypeSpec,
    ) -> Self {
        Function {
            name: name.into(),
            params: Params(params),
            body,
            return_type,
        }
    }
}

/// Formal parameter list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params(pub Vec<Declaration>);

impl Params {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Declaration> {
        self.0.iter()
    }
}

/// Variable declaration (`int x;`, `bool flags[n];`) or formal parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Declaration {
    pub name: String,
    pub ty: TypeSpec,
    /// Set the first time the declaration is evaluated; never changes after
    #[serde(skip)]
    pub resolved: OnceCell<Type>,
}

impl Declaration {
    pub fn new(name: impl Into<String>, ty: TypeSpec) -> Self {
        Declaration {
            name: name.into(),
            ty,
            resolved: OnceCell::new(),
        }
    }

    pub fn resolved_type(&self) -> Option<&Type> {
        self.resolved.get()
    }
}
