//! Operand stack
//!
//! Every expression leaves its result here. A frame mark records the depth at
//! each function entry so a return can drop whatever the body left behind in
//! one step.

use super::error::{InterpResult, RuntimeError};
use super::value::Value;

#[derive(Debug, Default)]
pub struct OperandStack {
    values: Vec<Value>,
    frames: Vec<usize>,
}

impl OperandStack {
    pub fn new() -> Self {
        OperandStack {
            values: Vec::new(),
            frames: Vec::new(),
        }
    }

    pub fn push(&mut self, value: Value) {
        self.values.push(value);
    }

    /// Pop the most recent value. An empty stack means the expression that was
    /// expected to produce it was a void call.
    pub fn pop(&mut self) -> InterpResult<Value> {
        self.values.pop().ok_or_else(RuntimeError::missing_value)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn truncate(&mut self, depth: usize) {
        self.values.truncate(depth);
    }

    /// Record the current depth as a new call frame
    pub fn push_frame(&mut self) {
        self.frames.push(self.values.len());
    }

    /// Drop the innermost frame and everything pushed since it was marked
    pub fn pop_frame(&mut self) {
        if let Some(mark) = self.frames.pop() {
            self.values.truncate(mark);
        }
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}
