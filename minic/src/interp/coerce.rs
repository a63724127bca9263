//! Coercion rules from stack values to the scalar kind an operation needs

use super::error::{InterpResult, RuntimeError};
use super::value::{ArrayCell, Cell, Value};
use std::rc::Rc;

/// Integer view of a value. Booleans become 0 or 1; arrays are rejected.
pub fn to_int(value: &Value) -> InterpResult<i64> {
    match value {
        Value::Int(n) => Ok(*n),
        Value::Bool(b) => Ok(i64::from(*b)),
        Value::Cell(Cell::Int(slot)) => Ok(*slot.borrow()),
        Value::Cell(Cell::Bool(slot)) => Ok(i64::from(*slot.borrow())),
        Value::Cell(cell @ Cell::Array(_)) => {
            Err(RuntimeError::type_error("int", &cell.type_tag()))
        }
    }
}

/// Boolean view of a value. Integers are true when non-zero; an array is
/// always true.
pub fn to_bool(value: &Value) -> InterpResult<bool> {
    match value {
        Value::Int(n) => Ok(*n != 0),
        Value::Bool(b) => Ok(*b),
        Value::Cell(Cell::Int(slot)) => Ok(*slot.borrow() != 0),
        Value::Cell(Cell::Bool(slot)) => Ok(*slot.borrow()),
        Value::Cell(Cell::Array(_)) => Ok(true),
    }
}

/// Array cell behind a value
pub fn to_array(value: &Value) -> InterpResult<Rc<ArrayCell>> {
    match value {
        Value::Cell(Cell::Array(array)) => Ok(Rc::clone(array)),
        other => Err(RuntimeError::type_error("array", &other.type_tag())),
    }
}
