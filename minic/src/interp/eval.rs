//! Tree-walking evaluator
//!
//! Expressions leave their result on the operand stack; statements return a
//! [`Flow`] telling the enclosing statement list whether to keep going or
//! unwind to the nearest function call because of a `return`.

use super::coerce::{to_array, to_bool, to_int};
use super::console::{parse_bool, parse_int, Console, StdConsole};
use super::env::Environment;
use super::error::{InterpResult, RuntimeError};
use super::registry::{is_builtin, FunctionRegistry, SignatureBuilder};
use super::stack::OperandStack;
use super::value::{Cell, Value};
use crate::ast::{ArithOp, CmpOp, Declaration, Function, LogicOp, Node, Program, Type, TypeSpec};

/// Stack growth parameters for deep recursion
const STACK_RED_ZONE: usize = 128 * 1024; // 128KB remaining triggers growth
const STACK_GROW_SIZE: usize = 4 * 1024 * 1024; // Grow by 4MB each time

/// Base name of the entry point; it must take no parameters
pub const ENTRY_POINT: &str = "main";

pub const DEFAULT_MAX_CALL_DEPTH: usize = 100_000;

/// Interpreter settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterpConfig {
    /// Nested user function calls allowed before failing with a stack overflow
    pub max_call_depth: usize,
}

impl Default for InterpConfig {
    fn default() -> Self {
        InterpConfig {
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }
}

/// Outcome of evaluating a node
#[derive(Debug, Clone)]
pub enum Flow {
    /// Continue with the next statement
    Completed,
    /// A `return` was executed, with its value if it had one
    Returned(Option<Value>),
}

/// The interpreter
pub struct Interpreter<'p, C: Console = StdConsole> {
    /// User-defined functions by signature
    functions: FunctionRegistry<'p>,
    /// Operand stack shared by every node handler
    stack: OperandStack,
    /// Environment of the active call
    env: Environment,
    console: C,
    config: InterpConfig,
    /// Current user call nesting
    call_depth: usize,
}

impl Interpreter<'_, StdConsole> {
    /// Interpreter wired to stdin/stdout
    pub fn new() -> Self {
        Self::with_console(StdConsole::stdio())
    }
}

impl Default for Interpreter<'_, StdConsole> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'p, C: Console> Interpreter<'p, C> {
    pub fn with_console(console: C) -> Self {
        Interpreter {
            functions: FunctionRegistry::new(),
            stack: OperandStack::new(),
            env: Environment::new(),
            console,
            config: InterpConfig::default(),
            call_depth: 0,
        }
    }

    pub fn with_config(mut self, config: InterpConfig) -> Self {
        self.config = config;
        self
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    pub fn into_console(self) -> C {
        self.console
    }

    /// Values currently on the operand stack
    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    /// Register every function of the program
    pub fn load(&mut self, program: &'p Program) -> InterpResult<()> {
        for function in &program.functions {
            let signature = self.functions.register(function)?;
            tracing::debug!(%signature, "registered function");
        }
        Ok(())
    }

    /// Load a program and run its entry point. A program without
    /// `main()` does nothing.
    pub fn run(&mut self, program: &'p Program) -> InterpResult<()> {
        self.load(program)?;

        let entry = SignatureBuilder::new(ENTRY_POINT).finish();
        let Some(main) = self.functions.get(&entry) else {
            tracing::debug!("no {entry} function; nothing to run");
            return Ok(());
        };

        let result = self.call_function(main, Vec::new());
        self.console.flush()?;
        result.map(|_| ())
    }

    /// Call a registered function, resolving the overload from the runtime
    /// types of `args`
    pub fn call(&mut self, name: &str, args: Vec<Value>) -> InterpResult<Option<Value>> {
        let mut signature = SignatureBuilder::new(name);
        for arg in &args {
            signature.push(&arg.type_tag());
        }
        let function = self.functions.resolve(&signature.finish())?;
        self.call_function(function, args)
    }

    /// Evaluate an expression and take its value off the stack
    pub fn eval_expr(&mut self, node: &'p Node) -> InterpResult<Value> {
        self.eval_value(node)
    }

    /// Evaluate a node with automatic stack growth for deep recursion
    pub fn evaluate(&mut self, node: &'p Node) -> InterpResult<Flow> {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || self.evaluate_inner(node))
    }

    fn evaluate_inner(&mut self, node: &'p Node) -> InterpResult<Flow> {
        tracing::trace!(node = node.kind_name(), depth = self.stack.len(), "evaluate");

        match node {
            Node::IntLiteral(n) => self.stack.push(Value::Int(*n)),
            Node::BoolLiteral(b) => self.stack.push(Value::Bool(*b)),
            Node::Variable(name) => {
                let cell = self.env.lookup(name)?;
                self.stack.push(Value::Cell(cell));
            }
            Node::Index { base, index } => self.eval_index(base, index)?,
            Node::Arithmetic { op, left, right } => self.eval_arithmetic(*op, left, right)?,
            Node::Logic { op, left, right } => self.eval_logic(*op, left, right)?,
            Node::Condition { op, left, right } => self.eval_condition(*op, left, right)?,
            Node::Not(expr) => {
                let b = self.eval_bool(expr)?;
                self.stack.push(Value::Bool(!b));
            }
            Node::Assign { target, value } => self.eval_assign(target, value)?,
            Node::Call { name, args } => self.eval_call(name, args)?,
            Node::NewVariable(decl) => self.declare(decl)?,
            Node::Compound(statements) => {
                self.env.push_scope();
                let flow = self.exec_all(statements);
                self.env.pop_scope();
                return flow;
            }
            Node::Statements(statements) => return self.exec_all(statements),
            Node::If {
                cond,
                then_branch,
                else_branch,
            } => {
                if self.eval_bool(cond)? {
                    return self.exec(then_branch);
                }
                if let Some(else_branch) = else_branch {
                    return self.exec(else_branch);
                }
            }
            Node::While { cond, body } => {
                while self.eval_bool(cond)? {
                    if let Flow::Returned(value) = self.exec(body)? {
                        return Ok(Flow::Returned(value));
                    }
                }
            }
            Node::Return(value) => {
                let value = match value {
                    Some(expr) => Some(self.eval_value(expr)?),
                    None => None,
                };
                return Ok(Flow::Returned(value));
            }
        }
        Ok(Flow::Completed)
    }

    /// Run one statement, then drop anything it left on the stack
    fn exec(&mut self, statement: &'p Node) -> InterpResult<Flow> {
        let depth = self.stack.len();
        let flow = self.evaluate(statement)?;
        self.stack.truncate(depth);
        Ok(flow)
    }

    fn exec_all(&mut self, statements: &'p [Node]) -> InterpResult<Flow> {
        for statement in statements {
            if let Flow::Returned(value) = self.exec(statement)? {
                return Ok(Flow::Returned(value));
            }
        }
        Ok(Flow::Completed)
    }

    /// Evaluate an expression that must produce exactly one value
    fn eval_value(&mut self, expr: &'p Node) -> InterpResult<Value> {
        let depth = self.stack.len();
        match self.evaluate(expr)? {
            Flow::Completed if self.stack.len() > depth => self.stack.pop(),
            Flow::Completed => Err(RuntimeError::missing_value()),
            Flow::Returned(_) => Err(RuntimeError::return_in_expression()),
        }
    }

    fn eval_int(&mut self, expr: &'p Node) -> InterpResult<i64> {
        to_int(&self.eval_value(expr)?)
    }

    fn eval_bool(&mut self, expr: &'p Node) -> InterpResult<bool> {
        to_bool(&self.eval_value(expr)?)
    }

    fn eval_index(&mut self, base: &'p Node, index: &'p Node) -> InterpResult<()> {
        let array = to_array(&self.eval_value(base)?)?;
        let index = self.eval_int(index)?;
        let cell = array.get(index)?;
        self.stack.push(Value::Cell(cell));
        Ok(())
    }

    fn eval_arithmetic(&mut self, op: ArithOp, left: &'p Node, right: &'p Node) -> InterpResult<()> {
        let l = self.eval_int(left)?;
        let r = self.eval_int(right)?;
        let result = match op {
            ArithOp::Add => l.wrapping_add(r),
            ArithOp::Sub => l.wrapping_sub(r),
            ArithOp::Mul => l.wrapping_mul(r),
            ArithOp::Div => {
                if r == 0 {
                    return Err(RuntimeError::division_by_zero());
                }
                l.wrapping_div(r)
            }
            ArithOp::Rem => {
                if r == 0 {
                    return Err(RuntimeError::division_by_zero());
                }
                l.wrapping_rem(r)
            }
        };
        self.stack.push(Value::Int(result));
        Ok(())
    }

    /// `&&` and `||` only evaluate the right side when the left side does not
    /// decide the result
    fn eval_logic(&mut self, op: LogicOp, left: &'p Node, right: &'p Node) -> InterpResult<()> {
        let l = self.eval_bool(left)?;
        let result = match (op, l) {
            (LogicOp::And, false) => false,
            (LogicOp::Or, true) => true,
            _ => self.eval_bool(right)?,
        };
        self.stack.push(Value::Bool(result));
        Ok(())
    }

    fn eval_condition(&mut self, op: CmpOp, left: &'p Node, right: &'p Node) -> InterpResult<()> {
        let l = self.eval_int(left)?;
        let r = self.eval_int(right)?;
        let result = match op {
            CmpOp::Lt => l < r,
            CmpOp::Le => l <= r,
            CmpOp::Gt => l > r,
            CmpOp::Ge => l >= r,
            CmpOp::Eq => l == r,
            CmpOp::Ne => l != r,
        };
        self.stack.push(Value::Bool(result));
        Ok(())
    }

    fn eval_assign(&mut self, target: &'p Node, value: &'p Node) -> InterpResult<()> {
        let Value::Cell(cell) = self.eval_value(target)? else {
            return Err(RuntimeError::not_addressable("assignment"));
        };
        let value = self.eval_value(value)?;
        cell.assign(&value)?;
        self.stack.push(Value::Cell(cell));
        Ok(())
    }

    /// Resolve the declared type (first evaluation only) and bind a fresh
    /// cell in the innermost scope
    fn declare(&mut self, decl: &'p Declaration) -> InterpResult<()> {
        let ty = match decl.resolved.get() {
            Some(ty) => ty,
            None => {
                let resolved = self.resolve_type(&decl.ty)?;
                tracing::trace!(name = %decl.name, ty = %resolved, "resolved declaration");
                decl.resolved.get_or_init(|| resolved)
            }
        };
        let cell = Cell::new(ty)?;
        self.env.declare(&decl.name, cell)
    }

    fn resolve_type(&mut self, spec: &'p TypeSpec) -> InterpResult<Type> {
        match spec {
            TypeSpec::Int => Ok(Type::Int),
            TypeSpec::Bool => Ok(Type::Bool),
            TypeSpec::Void => Ok(Type::Void),
            TypeSpec::Array { element, size } => {
                let n = self.eval_int(size)?;
                let size = usize::try_from(n)
                    .ok()
                    .filter(|&s| s > 0)
                    .ok_or_else(|| RuntimeError::invalid_array_size(n))?;
                let element = self.resolve_type(element)?;
                Ok(Type::array(element, size))
            }
        }
    }

    fn eval_call(&mut self, name: &str, args: &'p [Node]) -> InterpResult<()> {
        if is_builtin(name) {
            return self.call_builtin(name, args);
        }

        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            values.push(self.eval_value(arg)?);
        }
        if let Some(result) = self.call(name, values)? {
            self.stack.push(result);
        }
        Ok(())
    }

    fn call_builtin(&mut self, name: &str, args: &'p [Node]) -> InterpResult<()> {
        match name {
            "print" => {
                for arg in args {
                    let value = self.eval_value(arg)?;
                    self.console.write_line(&value.to_string())?;
                }
                self.console.flush()
            }
            "read" => {
                for arg in args {
                    let Value::Cell(cell) = self.eval_value(arg)? else {
                        return Err(RuntimeError::not_addressable("read"));
                    };
                    self.read_into(&cell)?;
                }
                Ok(())
            }
            other => Err(RuntimeError::no_matching_function(other)),
        }
    }

    /// Read one token per scalar cell, recursing through arrays
    fn read_into(&mut self, cell: &Cell) -> InterpResult<()> {
        match cell {
            Cell::Int(_) => {
                let token = self.console.read_token()?;
                cell.assign(&Value::Int(parse_int(&token)?))
            }
            Cell::Bool(_) => {
                let token = self.console.read_token()?;
                cell.assign(&Value::Bool(parse_bool(&token)?))
            }
            Cell::Array(array) => {
                for element in array.elements().iter() {
                    self.read_into(element)?;
                }
                Ok(())
            }
        }
    }

    /// Call a user-defined function with automatic stack growth
    fn call_function(&mut self, function: &'p Function, args: Vec<Value>) -> InterpResult<Option<Value>> {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || {
            self.call_function_inner(function, args)
        })
    }

    #[tracing::instrument(level = "debug", skip_all, fields(function = %function.name))]
    fn call_function_inner(&mut self, function: &'p Function, args: Vec<Value>) -> InterpResult<Option<Value>> {
        if self.call_depth >= self.config.max_call_depth {
            return Err(RuntimeError::stack_overflow(self.config.max_call_depth));
        }

        self.call_depth += 1;
        let caller = std::mem::replace(&mut self.env, Environment::new());
        let result = self.activate(function, args);
        self.env = caller;
        self.call_depth -= 1;
        result
    }

    /// Bind parameters in the fresh environment and run the body
    fn activate(&mut self, function: &'p Function, args: Vec<Value>) -> InterpResult<Option<Value>> {
        for (param, arg) in function.params.iter().zip(args) {
            self.declare(param)?;
            self.env.lookup(&param.name)?.assign(&arg)?;
        }

        self.stack.push_frame();
        let flow = self.exec_all(&function.body);
        self.stack.pop_frame();

        match flow? {
            Flow::Returned(value) => check_return(function, value),
            Flow::Completed if function.return_type.is_void() => Ok(None),
            Flow::Completed => Err(RuntimeError::missing_return(&function.name)),
        }
    }
}

/// Match a returned value against the declared return type
fn check_return(function: &Function, value: Option<Value>) -> InterpResult<Option<Value>> {
    let name = &function.name;
    let expected = &function.return_type;
    let mismatch = |got: &str| RuntimeError::return_mismatch(name, &expected.tag(), got);

    let Some(value) = value else {
        return match expected {
            TypeSpec::Void => Ok(None),
            _ => Err(mismatch("nothing")),
        };
    };

    match expected {
        TypeSpec::Void => Err(mismatch(&value.type_tag())),
        TypeSpec::Int => to_int(&value)
            .map(|n| Some(Value::Int(n)))
            .map_err(|_| mismatch(&value.type_tag())),
        TypeSpec::Bool => match value {
            Value::Cell(Cell::Array(_)) => Err(mismatch(&value.type_tag())),
            scalar => Ok(Some(Value::Bool(to_bool(&scalar)?))),
        },
        TypeSpec::Array { .. } => {
            if value.type_tag() == expected.tag() {
                Ok(Some(value))
            } else {
                Err(mismatch(&value.type_tag()))
            }
        }
    }
}
