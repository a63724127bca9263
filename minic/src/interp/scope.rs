//! Lexical scopes
//!
//! A scope maps names to cells and links to its enclosing scope. Lookup walks
//! outward; declaration only ever touches the innermost scope.

use super::error::{InterpResult, RuntimeError};
use super::value::Cell;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Shared reference to a scope
pub type ScopeRef = Rc<RefCell<Scope>>;

/// One block's bindings
#[derive(Debug, Default)]
pub struct Scope {
    bindings: HashMap<String, Cell>,
    parent: Option<ScopeRef>,
}

impl Scope {
    /// Outermost scope of a function activation
    pub fn new() -> Self {
        Scope {
            bindings: HashMap::new(),
            parent: None,
        }
    }

    pub fn with_parent(parent: ScopeRef) -> Self {
        Scope {
            bindings: HashMap::new(),
            parent: Some(parent),
        }
    }

    pub fn into_ref(self) -> ScopeRef {
        Rc::new(RefCell::new(self))
    }

    /// Bind `name` in this scope. Fails if this scope already has it;
    /// shadowing an outer binding is fine.
    pub fn declare(&mut self, name: &str, cell: Cell) -> InterpResult<()> {
        if self.bindings.contains_key(name) {
            return Err(RuntimeError::duplicate_variable(name));
        }
        self.bindings.insert(name.to_string(), cell);
        Ok(())
    }

    /// Look up a variable in the scope chain
    pub fn lookup(&self, name: &str) -> Option<Cell> {
        if let Some(cell) = self.bindings.get(name) {
            Some(cell.clone())
        } else if let Some(parent) = &self.parent {
            parent.borrow().lookup(name)
        } else {
            None
        }
    }

    pub fn parent(&self) -> Option<&ScopeRef> {
        self.parent.as_ref()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Create a child scope from a parent reference
pub fn child_scope(parent: &ScopeRef) -> ScopeRef {
    Scope::with_parent(Rc::clone(parent)).into_ref()
}
