//! Parsed and bound forms of a radial expression

use crate::errors::ExpressionError;
use crate::float_types::{PI, Real};
use std::sync::Arc;

/// A compiled expression: pure, total, shareable across threads.
pub type Kernel = Arc<dyn Fn(Real) -> Real + Send + Sync>;

/// Untyped syntax tree straight out of the grammar. Identifiers are still
/// plain names here; [`Node::bind`] resolves them.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Number(Real),
    Ident(String),
    Call(String, Box<Node>),
    Neg(Box<Node>),
    Binary(BinaryOp, Box<Node>, Box<Node>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinaryOp {
    #[inline]
    pub fn apply(self, lhs: Real, rhs: Real) -> Real {
        match self {
            BinaryOp::Add => lhs + rhs,
            BinaryOp::Sub => lhs - rhs,
            BinaryOp::Mul => lhs * rhs,
            BinaryOp::Div => lhs / rhs,
            BinaryOp::Pow => lhs.powf(rhs),
        }
    }
}

/// The fixed function vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Sin,
    Cos,
    Exp,
    Sqrt,
    /// Natural logarithm
    Log,
}

impl Function {
    pub fn lookup(name: &str) -> Option<Self> {
        match name {
            "sin" => Some(Function::Sin),
            "cos" => Some(Function::Cos),
            "exp" => Some(Function::Exp),
            "sqrt" => Some(Function::Sqrt),
            "log" => Some(Function::Log),
            _ => None,
        }
    }

    #[inline]
    pub fn apply(self, x: Real) -> Real {
        match self {
            Function::Sin => x.sin(),
            Function::Cos => x.cos(),
            Function::Exp => x.exp(),
            Function::Sqrt => x.sqrt(),
            Function::Log => x.ln(),
        }
    }
}

/// Expression bound against the symbol table: only `z`, `pi`, literals,
/// arithmetic and the five functions remain.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Constant(Real),
    Z,
    Neg(Box<Expr>),
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
    Call(Function, Box<Expr>),
}

const VARIABLE: &str = "z";
const CONSTANTS: &[(&str, Real)] = &[("pi", PI)];

fn constant(name: &str) -> Option<Real> {
    CONSTANTS
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|&(_, value)| value)
}

impl Node {
    /// Resolve every identifier, failing on the first name outside the table.
    pub fn bind(&self) -> Result<Expr, ExpressionError> {
        Ok(match self {
            Node::Number(value) => Expr::Constant(*value),
            Node::Ident(name) if name == VARIABLE => Expr::Z,
            Node::Ident(name) => match constant(name) {
                Some(value) => Expr::Constant(value),
                None if Function::lookup(name).is_some() => {
                    return Err(ExpressionError::MissingArgument(name.clone()));
                },
                None => return Err(ExpressionError::UnknownSymbol(name.clone())),
            },
            Node::Call(name, argument) => match Function::lookup(name) {
                Some(function) => Expr::Call(function, Box::new(argument.bind()?)),
                None if name == VARIABLE || constant(name).is_some() => {
                    return Err(ExpressionError::NotAFunction(name.clone()));
                },
                None => return Err(ExpressionError::UnknownFunction(name.clone())),
            },
            Node::Neg(inner) => Expr::Neg(Box::new(inner.bind()?)),
            Node::Binary(op, lhs, rhs) => {
                Expr::Binary(*op, Box::new(lhs.bind()?), Box::new(rhs.bind()?))
            },
        })
    }
}

impl Expr {
    /// `true` when the expression does not mention `z`.
    pub fn is_constant(&self) -> bool {
        match self {
            Expr::Constant(_) => true,
            Expr::Z => false,
            Expr::Neg(inner) | Expr::Call(_, inner) => inner.is_constant(),
            Expr::Binary(_, lhs, rhs) => lhs.is_constant() && rhs.is_constant(),
        }
    }

    /// Direct tree-walking evaluation.
    pub fn eval(&self, z: Real) -> Real {
        match self {
            Expr::Constant(value) => *value,
            Expr::Z => z,
            Expr::Neg(inner) => -inner.eval(z),
            Expr::Binary(op, lhs, rhs) => op.apply(lhs.eval(z), rhs.eval(z)),
            Expr::Call(function, argument) => function.apply(argument.eval(z)),
        }
    }

    /// Compile into a closure tree. `z`-free subtrees are folded to a single
    /// constant first.
    pub fn compile(&self) -> Kernel {
        if self.is_constant() {
            let value = self.eval(0.0);
            return Arc::new(move |_| value);
        }
        match self {
            Expr::Constant(value) => {
                let value = *value;
                Arc::new(move |_| value)
            },
            Expr::Z => Arc::new(|z| z),
            Expr::Neg(inner) => {
                let inner = inner.compile();
                Arc::new(move |z| -inner(z))
            },
            Expr::Binary(op, lhs, rhs) => {
                let (op, lhs, rhs) = (*op, lhs.compile(), rhs.compile());
                Arc::new(move |z| op.apply(lhs(z), rhs(z)))
            },
            Expr::Call(function, argument) => {
                let (function, argument) = (*function, argument.compile());
                Arc::new(move |z| function.apply(argument(z)))
            },
        }
    }
}
