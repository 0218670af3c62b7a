//! Constant arithmetic expressions used as attribute arguments.
//!
//! `@precision: 1/100` or `@range: [-2^15, 2^15-1]` are folded to plain
//! `f64` values while parsing; the expression tree never reaches the AST.

use crate::errors::AstError;
use crate::parser::Parser;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

#[derive(Clone, PartialEq, Debug)]
pub enum Expr {
    Number(f64),
    Neg(Box<Expr>),
    Sqrt(Box<Expr>),
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

impl Expr {
    #[must_use]
    pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Self {
        Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    #[must_use]
    pub fn eval(&self) -> f64 {
        match self {
            Expr::Number(value) => *value,
            Expr::Neg(inner) => -inner.eval(),
            Expr::Sqrt(inner) => inner.eval().sqrt(),
            Expr::Binary { op, lhs, rhs } => {
                let (lhs, rhs) = (lhs.eval(), rhs.eval());
                match op {
                    BinaryOp::Add => lhs + rhs,
                    BinaryOp::Sub => lhs - rhs,
                    BinaryOp::Mul => lhs * rhs,
                    BinaryOp::Div => lhs / rhs,
                    BinaryOp::Pow => lhs.powf(rhs),
                }
            }
        }
    }
}

/// Parses and evaluates a standalone expression such as `2^2-sqrt(8)`.
///
/// # Errors
///
/// Returns a syntax error for malformed input and [`AstError::NotANumber`]
/// when the value is NaN.
pub fn evaluate(source: &str) -> Result<f64, AstError> {
    Parser::new(source, "").parse_standalone_expression()
}
