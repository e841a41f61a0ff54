//! Expression evaluation functions

use crate::ast::*;
use crate::errors::EvalError;

/// Anything that can be evaluated as a function of one variable.
///
/// Implementations must be pure: the sampler calls `evaluate` hundreds of times
/// per curve and assumes the same `x` always gives the same answer.
pub trait Evaluator {
    fn evaluate(&self, x: f64) -> Result<f64, EvalError>;
}

impl<F> Evaluator for F
where
    F: Fn(f64) -> Result<f64, EvalError>,
{
    fn evaluate(&self, x: f64) -> Result<f64, EvalError> {
        self(x)
    }
}

/// A parsed and validated expression, ready to evaluate.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledExpr {
    source: String,
    variable: String,
    root: Expr,
}

impl CompiledExpr {
    pub(crate) fn new(source: impl Into<String>, variable: impl Into<String>, root: Expr) -> Self {
        Self {
            source: source.into(),
            variable: variable.into(),
            root,
        }
    }

    /// The text the expression was compiled from
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The name of the bound variable
    pub fn variable(&self) -> &str {
        &self.variable
    }

    pub fn ast(&self) -> &Expr {
        &self.root
    }

    /// True for expressions like `3` or `2pi` that ignore the variable
    pub fn is_constant(&self) -> bool {
        !self.root.depends_on_variable()
    }
}

impl Evaluator for CompiledExpr {
    fn evaluate(&self, x: f64) -> Result<f64, EvalError> {
        eval_expr(&self.root, x)
    }
}

pub fn eval_expr(expr: &Expr, x: f64) -> Result<f64, EvalError> {
    match expr {
        Expr::Number(n) => Ok(*n),
        Expr::Variable => Ok(x),
        Expr::Constant(c) => Ok(c.value()),
        Expr::Unary(op, e) => {
            let v = eval_expr(e, x)?;
            Ok(match op {
                UnaryOp::Neg => -v,
                UnaryOp::Pos => v,
            })
        }
        Expr::Binary(lhs, op, rhs) => {
            let a = eval_expr(lhs, x)?;
            let b = eval_expr(rhs, x)?;
            match op {
                BinaryOp::Add => Ok(a + b),
                BinaryOp::Sub => Ok(a - b),
                BinaryOp::Mul => Ok(a * b),
                // Division by zero yields an infinity; the sampler breaks on it
                BinaryOp::Div => Ok(a / b),
                BinaryOp::Pow => real_pow(a, b, "^"),
            }
        }
        Expr::Call(function, args) => {
            let args = args
                .iter()
                .map(|a| eval_expr(a, x))
                .collect::<Result<Vec<f64>, _>>()?;
            eval_call(*function, &args)
        }
    }
}

/// `a^b` restricted to real results
fn real_pow(a: f64, b: f64, name: &'static str) -> Result<f64, EvalError> {
    if a < 0.0 && b.fract() != 0.0 && b.is_finite() {
        return Err(EvalError::Complex { function: name });
    }
    Ok(a.powf(b))
}

fn eval_call(function: Function, args: &[f64]) -> Result<f64, EvalError> {
    let name = function.name();
    let complex = || EvalError::Complex { function: name };
    let a = args.first().copied().unwrap_or(f64::NAN);
    let b = args.get(1).copied();

    let value = match function {
        Function::Sin => a.sin(),
        Function::Cos => a.cos(),
        Function::Tan => a.tan(),
        Function::Sec => 1.0 / a.cos(),
        Function::Csc => 1.0 / a.sin(),
        Function::Cot => 1.0 / a.tan(),
        Function::Asin | Function::Acos if a.abs() > 1.0 => return Err(complex()),
        Function::Asin => a.asin(),
        Function::Acos => a.acos(),
        Function::Atan => a.atan(),
        Function::Atan2 => a.atan2(b.unwrap_or(f64::NAN)),
        Function::Sinh => a.sinh(),
        Function::Cosh => a.cosh(),
        Function::Tanh => a.tanh(),
        Function::Asinh => a.asinh(),
        Function::Acosh if a < 1.0 => return Err(complex()),
        Function::Acosh => a.acosh(),
        Function::Atanh if a.abs() > 1.0 => return Err(complex()),
        Function::Atanh => a.atanh(),
        Function::Sqrt if a < 0.0 => return Err(complex()),
        Function::Sqrt => a.sqrt(),
        Function::Cbrt => a.cbrt(),
        Function::NthRoot => nth_root(a, b.unwrap_or(2.0))?,
        Function::Abs => a.abs(),
        Function::Exp => a.exp(),
        Function::Ln | Function::Log10 | Function::Log2 if a < 0.0 => return Err(complex()),
        Function::Ln => a.ln(),
        Function::Log10 => a.log10(),
        Function::Log2 => a.log2(),
        Function::Log => {
            if a < 0.0 {
                return Err(complex());
            }
            match b {
                Some(base) if base <= 0.0 => return Err(complex()),
                Some(base) => a.ln() / base.ln(),
                None => a.ln(),
            }
        }
        Function::Pow => real_pow(a, b.unwrap_or(f64::NAN), name)?,
        Function::Mod => {
            let m = b.unwrap_or(f64::NAN);
            if m == 0.0 { a } else { a - m * (a / m).floor() }
        }
        Function::Floor => a.floor(),
        Function::Ceil => a.ceil(),
        Function::Round => a.round(),
        Function::Sign => {
            if a == 0.0 || a.is_nan() {
                a
            } else {
                a.signum()
            }
        }
        Function::Min => args.iter().copied().fold(f64::INFINITY, f64::min),
        Function::Max => args.iter().copied().fold(f64::NEG_INFINITY, f64::max),
    };
    Ok(value)
}

/// Real n-th root: odd roots of negatives are negative, even roots are complex
fn nth_root(a: f64, n: f64) -> Result<f64, EvalError> {
    let name = Function::NthRoot.name();
    if n == 0.0 || n.fract() != 0.0 || !n.is_finite() {
        return Err(EvalError::Domain { function: name });
    }
    if a >= 0.0 {
        return Ok(a.powf(1.0 / n));
    }
    if (n as i64) % 2 == 0 {
        return Err(EvalError::Complex { function: name });
    }
    Ok(-(-a).powf(1.0 / n))
}
