//! Function registry and overload signatures
//!
//! Functions are keyed by a signature string: the base name followed by one
//! `_<tag>` per parameter, or `_void` for none. Declarations build the key from
//! declared parameter types, calls from the runtime tags of the evaluated
//! arguments, and resolution is a single exact lookup.

use super::error::{InterpResult, RuntimeError};
use crate::ast::{Function, TypeSpec};
use std::collections::HashMap;

/// Names handled by the I/O bridge; user code cannot define them
pub const BUILTINS: [&str; 2] = ["print", "read"];

pub fn is_builtin(name: &str) -> bool {
    BUILTINS.contains(&name)
}

/// Incremental signature string builder
#[derive(Debug, Clone)]
pub struct SignatureBuilder {
    text: String,
    arity: usize,
}

impl SignatureBuilder {
    pub fn new(name: &str) -> Self {
        SignatureBuilder {
            text: name.to_string(),
            arity: 0,
        }
    }

    pub fn push(&mut self, tag: &str) {
        self.text.push('_');
        self.text.push_str(tag);
        self.arity += 1;
    }

    pub fn finish(mut self) -> String {
        if self.arity == 0 {
            self.text.push_str("_void");
        }
        self.text
    }
}

/// Whether a variable of this type can hold a value
fn is_storable(ty: &TypeSpec) -> bool {
    match ty {
        TypeSpec::Void => false,
        TypeSpec::Array { element, .. } => is_storable(element),
        TypeSpec::Int | TypeSpec::Bool => true,
    }
}

/// Signature a function is registered under
pub fn declared_signature(function: &Function) -> String {
    let mut builder = SignatureBuilder::new(&function.name);
    for param in function.params.iter() {
        builder.push(&param.ty.tag());
    }
    builder.finish()
}

/// User-defined functions by signature
#[derive(Debug, Default)]
pub struct FunctionRegistry<'p> {
    functions: HashMap<String, &'p Function>,
}

impl<'p> FunctionRegistry<'p> {
    pub fn new() -> Self {
        FunctionRegistry {
            functions: HashMap::new(),
        }
    }

    /// Register a function, returning its signature
    pub fn register(&mut self, function: &'p Function) -> InterpResult<String> {
        if is_builtin(&function.name) {
            return Err(RuntimeError::builtin_redefined(&function.name));
        }
        if let Some(param) = function.params.iter().find(|p| !is_storable(&p.ty)) {
            return Err(RuntimeError::void_parameter(&function.name, &param.name));
        }
        let signature = declared_signature(function);
        if self.functions.contains_key(&signature) {
            return Err(RuntimeError::duplicate_function(&signature));
        }
        self.functions.insert(signature.clone(), function);
        Ok(signature)
    }

    pub fn get(&self, signature: &str) -> Option<&'p Function> {
        self.functions.get(signature).copied()
    }

    pub fn resolve(&self, signature: &str) -> InterpResult<&'p Function> {
        self.get(signature)
            .ok_or_else(|| RuntimeError::no_matching_function(signature))
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Registered signatures, sorted
    pub fn signatures(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
