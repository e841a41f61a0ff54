//! Abstract syntax tree for numeric expressions
//!
//! Identifiers are resolved while the tree is built, so every node here is
//! already known to be meaningful: the bound variable, a constant, or a call to
//! a known function with the right number of arguments.

/// A parsed expression
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Numeric literal: 2, 0.5, 1e-3
    Number(f64),
    /// The bound variable (usually `x`)
    Variable,
    /// Named constant: pi, e, tau
    Constant(Constant),
    /// Prefix sign: -x, +x
    Unary(UnaryOp, Box<Expr>),
    /// Infix operation, including implicit multiplication
    Binary(Box<Expr>, BinaryOp, Box<Expr>),
    /// Function call: sin(x), log(x, 2)
    Call(Function, Vec<Expr>),
}

impl Expr {
    pub fn binary(lhs: Expr, op: BinaryOp, rhs: Expr) -> Expr {
        Expr::Binary(Box::new(lhs), op, Box::new(rhs))
    }

    pub fn unary(op: UnaryOp, operand: Expr) -> Expr {
        Expr::Unary(op, Box::new(operand))
    }

    /// Whether the bound variable occurs anywhere in the tree
    pub fn depends_on_variable(&self) -> bool {
        match self {
            Expr::Variable => true,
            Expr::Number(_) | Expr::Constant(_) => false,
            Expr::Unary(_, e) => e.depends_on_variable(),
            Expr::Binary(l, _, r) => l.depends_on_variable() || r.depends_on_variable(),
            Expr::Call(_, args) => args.iter().any(Expr::depends_on_variable),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Pos,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constant {
    Pi,
    E,
    Tau,
}

impl Constant {
    pub fn from_name(name: &str) -> Option<Constant> {
        match name {
            "pi" | "PI" | "π" => Some(Constant::Pi),
            "e" | "E" => Some(Constant::E),
            "tau" | "τ" => Some(Constant::Tau),
            _ => None,
        }
    }

    pub fn value(self) -> f64 {
        match self {
            Constant::Pi => std::f64::consts::PI,
            Constant::E => std::f64::consts::E,
            Constant::Tau => std::f64::consts::TAU,
        }
    }
}

/// Built-in functions. Trigonometry works in radians.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Sec,
    Csc,
    Cot,
    Asin,
    Acos,
    Atan,
    Atan2,
    Sinh,
    Cosh,
    Tanh,
    Asinh,
    Acosh,
    Atanh,
    Sqrt,
    Cbrt,
    NthRoot,
    Abs,
    Exp,
    Ln,
    Log,
    Log10,
    Log2,
    Pow,
    Mod,
    Floor,
    Ceil,
    Round,
    Sign,
    Min,
    Max,
}

/// How many arguments a function accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    Between(usize, usize),
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(self, n: usize) -> bool {
        match self {
            Arity::Exactly(k) => n == k,
            Arity::Between(lo, hi) => n >= lo && n <= hi,
            Arity::AtLeast(k) => n >= k,
        }
    }

    pub fn describe(self) -> String {
        let plural = |n: usize| if n == 1 { "argument" } else { "arguments" };
        match self {
            Arity::Exactly(k) => format!("{} {}", k, plural(k)),
            Arity::Between(lo, hi) => format!("{} or {} arguments", lo, hi),
            Arity::AtLeast(k) => format!("at least {} {}", k, plural(k)),
        }
    }
}

impl Function {
    pub const ALL: [Function; 33] = [
        Function::Sin,
        Function::Cos,
        Function::Tan,
        Function::Sec,
        Function::Csc,
        Function::Cot,
        Function::Asin,
        Function::Acos,
        Function::Atan,
        Function::Atan2,
        Function::Sinh,
        Function::Cosh,
        Function::Tanh,
        Function::Asinh,
        Function::Acosh,
        Function::Atanh,
        Function::Sqrt,
        Function::Cbrt,
        Function::NthRoot,
        Function::Abs,
        Function::Exp,
        Function::Ln,
        Function::Log,
        Function::Log10,
        Function::Log2,
        Function::Pow,
        Function::Mod,
        Function::Floor,
        Function::Ceil,
        Function::Round,
        Function::Sign,
        Function::Min,
        Function::Max,
    ];

    pub fn from_name(name: &str) -> Option<Function> {
        let f = match name {
            "sin" => Function::Sin,
            "cos" => Function::Cos,
            "tan" => Function::Tan,
            "sec" => Function::Sec,
            "csc" => Function::Csc,
            "cot" => Function::Cot,
            "asin" | "arcsin" => Function::Asin,
            "acos" | "arccos" => Function::Acos,
            "atan" | "arctan" => Function::Atan,
            "atan2" => Function::Atan2,
            "sinh" => Function::Sinh,
            "cosh" => Function::Cosh,
            "tanh" => Function::Tanh,
            "asinh" => Function::Asinh,
            "acosh" => Function::Acosh,
            "atanh" => Function::Atanh,
            "sqrt" => Function::Sqrt,
            "cbrt" => Function::Cbrt,
            "nthRoot" | "nthroot" | "root" => Function::NthRoot,
            "abs" => Function::Abs,
            "exp" => Function::Exp,
            "ln" => Function::Ln,
            "log" => Function::Log,
            "log10" => Function::Log10,
            "log2" => Function::Log2,
            "pow" => Function::Pow,
            "mod" => Function::Mod,
            "floor" => Function::Floor,
            "ceil" => Function::Ceil,
            "round" => Function::Round,
            "sign" | "sgn" => Function::Sign,
            "min" => Function::Min,
            "max" => Function::Max,
            _ => return None,
        };
        Some(f)
    }

    /// Canonical name, as used in error messages
    pub fn name(self) -> &'static str {
        match self {
            Function::Sin => "sin",
            Function::Cos => "cos",
            Function::Tan => "tan",
            Function::Sec => "sec",
            Function::Csc => "csc",
            Function::Cot => "cot",
            Function::Asin => "asin",
            Function::Acos => "acos",
            Function::Atan => "atan",
            Function::Atan2 => "atan2",
            Function::Sinh => "sinh",
            Function::Cosh => "cosh",
            Function::Tanh => "tanh",
            Function::Asinh => "asinh",
            Function::Acosh => "acosh",
            Function::Atanh => "atanh",
            Function::Sqrt => "sqrt",
            Function::Cbrt => "cbrt",
            Function::NthRoot => "nthRoot",
            Function::Abs => "abs",
            Function::Exp => "exp",
            Function::Ln => "ln",
            Function::Log => "log",
            Function::Log10 => "log10",
            Function::Log2 => "log2",
            Function::Pow => "pow",
            Function::Mod => "mod",
            Function::Floor => "floor",
            Function::Ceil => "ceil",
            Function::Round => "round",
            Function::Sign => "sign",
            Function::Min => "min",
            Function::Max => "max",
        }
    }

    pub fn arity(self) -> Arity {
        match self {
            Function::Atan2 | Function::Pow | Function::Mod => Arity::Exactly(2),
            Function::NthRoot | Function::Log => Arity::Between(1, 2),
            Function::Min | Function::Max => Arity::AtLeast(1),
            _ => Arity::Exactly(1),
        }
    }
}
