//! Statement and expression nodes

use super::{Declaration, TypeSpec};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Arithmetic operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArithOp {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Sub,
    #[serde(rename = "*")]
    Mul,
    #[serde(rename = "/")]
    Div,
    #[serde(rename = "%")]
    Rem,
}

/// Short-circuiting logical operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogicOp {
    #[serde(rename = "&&")]
    And,
    #[serde(rename = "||")]
    Or,
}

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CmpOp {
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Le,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = "==")]
    Eq,
    #[serde(rename = "!=")]
    Ne,
}

impl fmt::Display for ArithOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ArithOp::Add => "+",
            ArithOp::Sub => "-",
            ArithOp::Mul => "*",
            ArithOp::Div => "/",
            ArithOp::Rem => "%",
        };
        write!(f, "{s}")
    }
}

impl fmt::Display for LogicOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicOp::And => write!(f, "&&"),
            LogicOp::Or => write!(f, "||"),
        }
    }
}

impl fmt::Display for CmpOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CmpOp::Lt => "<",
            CmpOp::Le => "<=",
            CmpOp::Gt => ">",
            CmpOp::Ge => ">=",
            CmpOp::Eq => "==",
            CmpOp::Ne => "!=",
        };
        write!(f, "{s}")
    }
}

/// Syntax tree node
///
/// Expression variants leave exactly one value on the operand stack when
/// evaluated (a void `Call` leaves none). Statement variants leave the stack
/// as they found it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    IntLiteral(i64),
    BoolLiteral(bool),
    Variable(String),
    Index {
        base: Box<Node>,
        index: Box<Node>,
    },
    Arithmetic {
        op: ArithOp,
        left: Box<Node>,
        right: Box<Node>,
    },
    Logic {
        op: LogicOp,
        left: Box<Node>,
        right: Box<Node>,
    },
    Condition {
        op: CmpOp,
        left: Box<Node>,
        right: Box<Node>,
    },
    Not(Box<Node>),
    Assign {
        target: Box<Node>,
        value: Box<Node>,
    },
    Call {
        name: String,
        args: Vec<Node>,
    },
    NewVariable(Declaration),
    /// Block with its own lexical scope
    Compound(Vec<Node>),
    /// Statement list sharing the enclosing scope
    Statements(Vec<Node>),
    If {
        cond: Box<Node>,
        then_branch: Box<Node>,
        else_branch: Option<Box<Node>>,
    },
    While {
        cond: Box<Node>,
        body: Box<Node>,
    },
    Return(Option<Box<Node>>),
}

impl Node {
    pub fn int(value: i64) -> Self {
        Node::IntLiteral(value)
    }

    pub fn boolean(value: bool) -> Self {
        Node::BoolLiteral(value)
    }

    pub fn var(name: impl Into<String>) -> Self {
        Node::Variable(name.into())
    }

    pub fn index(base: Node, index: Node) -> Self {
        Node::Index {
            base: Box::new(base),
            index: Box::new(index),
        }
    }

    pub fn arith(op: ArithOp, left: Node, right: Node) -> Self {
        Node::Arithmetic {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn logic(op: LogicOp, left: Node, right: Node) -> Self {
        Node::Logic {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn cmp(op: CmpOp, left: Node, right: Node) -> Self {
        Node::Condition {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn not(expr: Node) -> Self {
        Node::Not(Box::new(expr))
    }

    pub fn assign(target: Node, value: Node) -> Self {
        Node::Assign {
            target: Box::new(target),
            value: Box::new(value),
        }
    }

    pub fn call(name: impl Into<String>, args: Vec<Node>) -> Self {
        Node::Call {
            name: name.into(),
            args,
        }
    }

    /// Variable declaration statement
    pub fn declare(name: impl Into<String>, ty: TypeSpec) -> Self {
        Node::NewVariable(Declaration::new(name, ty))
    }

    pub fn compound(statements: Vec<Node>) -> Self {
        Node::Compound(statements)
    }

    pub fn statements(statements: Vec<Node>) -> Self {
        Node::Statements(statements)
    }

    pub fn if_else(cond: Node, then_branch: Node, else_branch: Option<Node>) -> Self {
        Node::If {
            cond: Box::new(cond),
            then_branch: Box::new(then_branch),
            else_branch: else_branch.map(Box::new),
        }
    }

    pub fn while_loop(cond: Node, body: Node) -> Self {
        Node::While {
            cond: Box::new(cond),
            body: Box::new(body),
        }
    }

    pub fn ret(value: Option<Node>) -> Self {
        Node::Return(value.map(Box::new))
    }

    /// Variant name, used in trace output
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::IntLiteral(_) => "IntLiteral",
            Node::BoolLiteral(_) => "BoolLiteral",
            Node::Variable(_) => "Variable",
            Node::Index { .. } => "Index",
            Node::Arithmetic { .. } => "Arithmetic",
            Node::Logic { .. } => "Logic",
            Node::Condition { .. } => "Condition",
            Node::Not(_) => "Not",
            Node::Assign { .. } => "Assign",
            Node::Call { .. } => "Call",
            Node::NewVariable(_) => "NewVariable",
            Node::Compound(_) => "Compound",
            Node::Statements(_) => "Statements",
            Node::If { .. } => "If",
            Node::While { .. } => "While",
            Node::Return(_) => "Return",
        }
    }
}
