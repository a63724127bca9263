//! Environment for one function activation
//!
//! Each call gets a fresh environment with no link to the caller's, so a
//! callee only ever sees its own parameters and locals.

use super::error::{InterpResult, RuntimeError};
use super::scope::{child_scope, Scope, ScopeRef};
use super::value::Cell;
use std::rc::Rc;

/// Live scope chain of an activation
#[derive(Debug)]
pub struct Environment {
    current: ScopeRef,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            current: Scope::new().into_ref(),
        }
    }

    /// Enter a block
    pub fn push_scope(&mut self) {
        self.current = child_scope(&self.current);
    }

    /// Leave a block. The outermost scope is never popped.
    pub fn pop_scope(&mut self) {
        let parent = self.current.borrow().parent().map(Rc::clone);
        if let Some(parent) = parent {
            self.current = parent;
        }
    }

    /// Number of scopes in the chain
    pub fn depth(&self) -> usize {
        let mut depth = 1;
        let mut scope = Rc::clone(&self.current);
        loop {
            let parent = scope.borrow().parent().map(Rc::clone);
            match parent {
                Some(parent) => {
                    depth += 1;
                    scope = parent;
                }
                None => return depth,
            }
        }
    }

    /// Declare a variable in the innermost scope
    pub fn declare(&mut self, name: &str, cell: Cell) -> InterpResult<()> {
        self.current.borrow_mut().declare(name, cell)
    }

    pub fn lookup(&self, name: &str) -> InterpResult<Cell> {
        self.current
            .borrow()
            .lookup(name)
            .ok_or_else(|| RuntimeError::undefined_variable(name))
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
