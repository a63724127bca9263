//! Runtime values and storage cells
//!
//! A [`Cell`] is an addressable storage location. Cells are handles: cloning
//! one yields another reference to the same storage, which is how variables,
//! array elements and the operand stack all see the same slot.
//!
//! Assigning one array to another does not copy elements. The target array
//! adopts the source's element sequence, so the two alias from then on.

use super::coerce;
use super::error::{InterpResult, RuntimeError};
use crate::ast::Type;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Operand stack entry: a raw scalar or a reference to a cell
#[derive(Debug, Clone)]
pub enum Value {
    Int(i64),
    Bool(bool),
    Cell(Cell),
}

impl Value {
    /// Runtime type tag used for overload signatures
    pub fn type_tag(&self) -> String {
        match self {
            Value::Int(_) => "int".to_string(),
            Value::Bool(_) => "bool".to_string(),
            Value::Cell(cell) => cell.type_tag(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Cell(cell) => write!(f, "{cell}"),
        }
    }
}

/// Mutable storage location
#[derive(Debug, Clone)]
pub enum Cell {
    Int(Rc<RefCell<i64>>),
    Bool(Rc<RefCell<bool>>),
    Array(Rc<ArrayCell>),
}

impl Cell {
    /// Fresh zero-initialized cell of the given resolved type
    pub fn new(ty: &Type) -> InterpResult<Cell> {
        match ty {
            Type::Int => Ok(Cell::Int(Rc::new(RefCell::new(0)))),
            Type::Bool => Ok(Cell::Bool(Rc::new(RefCell::new(false)))),
            Type::Array { element, size } => {
                Ok(Cell::Array(Rc::new(ArrayCell::new(element, *size)?)))
            }
            Type::Void => Err(RuntimeError::type_error("int, bool or array", "void")),
        }
    }

    pub fn type_tag(&self) -> String {
        match self {
            Cell::Int(_) => "int".to_string(),
            Cell::Bool(_) => "bool".to_string(),
            Cell::Array(array) => array.type_tag(),
        }
    }

    /// Write `value` through this cell, coercing it to the cell's kind.
    /// Arrays must agree on element tag and end up aliased.
    pub fn assign(&self, value: &Value) -> InterpResult<()> {
        match self {
            Cell::Int(slot) => {
                let n = coerce::to_int(value)?;
                *slot.borrow_mut() = n;
            }
            Cell::Bool(slot) => {
                let b = coerce::to_bool(value)?;
                *slot.borrow_mut() = b;
            }
            Cell::Array(target) => {
                let source = coerce::to_array(value)?;
                if source.type_tag() != target.type_tag() {
                    return Err(RuntimeError::type_error(
                        &target.type_tag(),
                        &source.type_tag(),
                    ));
                }
                target.alias(&source);
            }
        }
        Ok(())
    }

    /// True when both handles refer to the same storage
    pub fn ptr_eq(&self, other: &Cell) -> bool {
        match (self, other) {
            (Cell::Int(a), Cell::Int(b)) => Rc::ptr_eq(a, b),
            (Cell::Bool(a), Cell::Bool(b)) => Rc::ptr_eq(a, b),
            (Cell::Array(a), Cell::Array(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Int(slot) => write!(f, "{}", slot.borrow()),
            Cell::Bool(slot) => write!(f, "{}", slot.borrow()),
            Cell::Array(array) => write!(f, "{array}"),
        }
    }
}

/// Fixed-kind sequence of cells
#[derive(Debug)]
pub struct ArrayCell {
    element: Type,
    cells: RefCell<Rc<Vec<Cell>>>,
}

impl ArrayCell {
    pub fn new(element: &Type, size: usize) -> InterpResult<Self> {
        if size == 0 {
            return Err(RuntimeError::invalid_array_size(0));
        }
        let cells = (0..size)
            .map(|_| Cell::new(element))
            .collect::<InterpResult<Vec<_>>>()?;
        Ok(ArrayCell {
            element: element.clone(),
            cells: RefCell::new(Rc::new(cells)),
        })
    }

    pub fn type_tag(&self) -> String {
        format!("array_{}", self.element.tag())
    }

    pub fn len(&self) -> usize {
        self.cells.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.borrow().is_empty()
    }

    /// Element cell at `index` (a handle, not a copy)
    pub fn get(&self, index: i64) -> InterpResult<Cell> {
        let cells = self.cells.borrow();
        usize::try_from(index)
            .ok()
            .and_then(|i| cells.get(i))
            .cloned()
            .ok_or_else(|| RuntimeError::index_out_of_bounds(index, cells.len()))
    }

    /// Snapshot of the current element handles
    pub fn elements(&self) -> Rc<Vec<Cell>> {
        Rc::clone(&*self.cells.borrow())
    }

    /// Replace the backing sequence with `source`'s
    fn alias(&self, source: &ArrayCell) {
        let shared = source.elements();
        *self.cells.borrow_mut() = shared;
    }
}

impl fmt::Display for ArrayCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, cell) in self.cells.borrow().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{cell}")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interp::ErrorKind;

    fn int_array(size: usize) -> Cell {
        Cell::new(&Type::array(Type::Int, size)).unwrap()
    }

    #[test]
    fn test_new_cells_are_zeroed() {
        assert_eq!(Cell::new(&Type::Int).unwrap().to_string(), "0");
        assert_eq!(Cell::new(&Type::Bool).unwrap().to_string(), "false");
        assert_eq!(int_array(3).to_string(), "[0, 0, 0]");
    }

    #[test]
    fn test_void_cell_rejected() {
        let err = Cell::new(&Type::Void).unwrap_err();
        assert_eq!(err.kind, ErrorKind::TypeMismatch);
    }

    #[test]
    fn test_zero_sized_array_rejected() {
        let err = Cell::new(&Type::array(Type::Bool, 0)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::ArityOrSize);
    }

    #[test]
    fn test_assign_coerces_to_cell_kind() {
        let int_cell = Cell::new(&Type::Int).unwrap();
        int_cell.assign(&Value::Bool(true)).unwrap();
        assert_eq!(int_cell.to_string(), "1");

        let bool_cell = Cell::new(&Type::Bool).unwrap();
        bool_cell.assign(&Value::Int(-4)).unwrap();
        assert_eq!(bool_cell.to_string(), "true");
        bool_cell.assign(&Value::Cell(int_array(1))).unwrap();
        assert_eq!(bool_cell.to_string(), "true");
    }

    #[test]
    fn test_array_assignment_aliases() {
        let a = int_array(2);
        let b = int_array(2);
        b.assign(&Value::Cell(a.clone())).unwrap();

        let Cell::Array(b_arr) = &b else { unreachable!() };
        b_arr.get(0).unwrap().assign(&Value::Int(9)).unwrap();
        assert_eq!(a.to_string(), "[9, 0]");
        assert!(!a.ptr_eq(&b));
    }

    #[test]
    fn test_array_assignment_checks_element_tag() {
        let ints = int_array(2);
        let bools = Cell::new(&Type::array(Type::Bool, 2)).unwrap();
        let err = ints.assign(&Value::Cell(bools)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::TypeMismatch);
    }

    #[test]
    fn test_array_from_scalar_rejected() {
        let err = int_array(1).assign(&Value::Int(3)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::TypeMismatch);
    }

    #[test]
    fn test_index_bounds() {
        let Cell::Array(arr) = int_array(3) else { unreachable!() };
        assert!(arr.get(2).is_ok());
        assert_eq!(arr.get(3).unwrap_err().kind, ErrorKind::ArityOrSize);
        assert_eq!(arr.get(-1).unwrap_err().kind, ErrorKind::ArityOrSize);
    }

    #[test]
    fn test_element_handle_shares_storage() {
        let Cell::Array(arr) = int_array(2) else { unreachable!() };
        let first = arr.get(0).unwrap();
        assert!(first.ptr_eq(&arr.get(0).unwrap()));
        first.assign(&Value::Int(5)).unwrap();
        assert_eq!(arr.to_string(), "[5, 0]");
    }

    #[test]
    fn test_type_tags() {
        assert_eq!(Value::Int(1).type_tag(), "int");
        assert_eq!(Value::Bool(false).type_tag(), "bool");
        let nested = Cell::new(&Type::array(Type::array(Type::Int, 2), 2)).unwrap();
        assert_eq!(nested.type_tag(), "array_array_int");
        assert_eq!(nested.to_string(), "[[0, 0], [0, 0]]");
    }
}
