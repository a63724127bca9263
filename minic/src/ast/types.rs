//! Type AST nodes
//!
//! Types come in two stages. A [`TypeSpec`] is what the parser produces: an
//! array carries its size as an unevaluated expression. Declaring a variable
//! evaluates that expression once and yields a [`Type`], whose array size is a
//! fixed positive integer used for cell construction and signature tagging.

use super::Node;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared type, as written in the source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypeSpec {
    Int,
    Bool,
    Void,
    /// Array with a size expression that is evaluated at declaration time
    Array {
        element: Box<TypeSpec>,
        size: Box<Node>,
    },
}

impl TypeSpec {
    /// Declared array type
    pub fn array(element: TypeSpec, size: Node) -> Self {
        TypeSpec::Array {
            element: Box::new(element),
            size: Box::new(size),
        }
    }

    /// Signature tag for this type. Array sizes do not take part.
    pub fn tag(&self) -> String {
        match self {
            TypeSpec::Int => "int".to_string(),
            TypeSpec::Bool => "bool".to_string(),
            TypeSpec::Void => "void".to_string(),
            TypeSpec::Array { element, .. } => format!("array_{}", element.tag()),
        }
    }

    pub fn is_void(&self) -> bool {
        matches!(self, TypeSpec::Void)
    }
}

impl fmt::Display for TypeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeSpec::Int => write!(f, "int"),
            TypeSpec::Bool => write!(f, "bool"),
            TypeSpec::Void => write!(f, "void"),
            TypeSpec::Array { element, .. } => write!(f, "{element}[]"),
        }
    }
}

/// Resolved type with concrete array sizes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Type {
    Int,
    Bool,
    Void,
    Array { element: Box<Type>, size: usize },
}

impl Type {
    pub fn array(element: Type, size: usize) -> Self {
        Type::Array {
            element: Box::new(element),
            size,
        }
    }

    /// Signature tag, matching [`TypeSpec::tag`] for the declared form
    pub fn tag(&self) -> String {
        match self {
            Type::Int => "int".to_string(),
            Type::Bool => "bool".to_string(),
            Type::Void => "void".to_string(),
            Type::Array { element, .. } => format!("array_{}", element.tag()),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Int => write!(f, "int"),
            Type::Bool => write!(f, "bool"),
            Type::Void => write!(f, "void"),
            Type::Array { element, size } => write!(f, "{element}[{size}]"),
        }
    }
}
