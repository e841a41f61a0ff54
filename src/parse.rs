//! Parse pest pairs into expression trees

use miette::SourceSpan;
use pest::Parser;
use pest::error::{ErrorVariant, InputLocation};
use pest::iterators::Pair;

use crate::ast::*;
use crate::errors::{ExprError, SourceContext};
use crate::{ExprParser, Rule};

/// Parse an expression written in terms of `variable`
pub fn parse(ctx: &SourceContext, variable: &str) -> Result<Expr, ExprError> {
    if ctx.source.trim().is_empty() {
        return Err(ExprError::Empty);
    }

    let pairs = ExprParser::parse(Rule::expression, &ctx.source)
        .map_err(|e| syntax_error(ctx, e))?;

    let builder = TreeBuilder { ctx, variable };
    for pair in pairs {
        if pair.as_rule() == Rule::expression {
            for inner in pair.into_inner() {
                if inner.as_rule() == Rule::sum {
                    return builder.sum(inner);
                }
            }
        }
    }

    Err(ExprError::Empty)
}

fn span_of(pair: &Pair<'_, Rule>) -> SourceSpan {
    let span = pair.as_span();
    (span.start(), span.end() - span.start()).into()
}

fn syntax_error(ctx: &SourceContext, err: pest::error::Error<Rule>) -> ExprError {
    let span: SourceSpan = match err.location {
        InputLocation::Pos(pos) => (pos, 0).into(),
        InputLocation::Span((start, end)) => (start, end - start).into(),
    };
    let expected = match &err.variant {
        ErrorVariant::ParsingError { positives, .. } => describe_expected(positives),
        ErrorVariant::CustomError { message } => message.clone(),
    };
    ExprError::Syntax {
        src: ctx.named_source(),
        span,
        expected,
    }
}

/// Turn the rules pest wanted into something a student can read
fn describe_expected(rules: &[Rule]) -> String {
    let mut parts: Vec<&'static str> = Vec::new();
    for rule in rules {
        let part = match rule {
            Rule::add_op | Rule::mul_op | Rule::pow_op => "an operator",
            Rule::EOI => "end of input",
            Rule::group => "`(`",
            _ => "a number or name",
        };
        if !parts.contains(&part) {
            parts.push(part);
        }
    }
    if parts.is_empty() {
        "a valid expression".to_string()
    } else {
        parts.join(" or ")
    }
}

/// Edit distance used for "did you mean" hints
fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b.len()).collect();
    for (i, ca) in a.chars().enumerate() {
        let mut prev = row[0];
        row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = if ca == *cb { 0 } else { 1 };
            let next = (row[j] + 1).min(row[j + 1] + 1).min(prev + cost);
            prev = row[j + 1];
            row[j + 1] = next;
        }
    }
    row[b.len()]
}

fn closest<'a>(name: &str, candidates: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
    candidates
        .into_iter()
        .map(|c| (edit_distance(name, c), c))
        .filter(|(d, _)| *d <= 2 && *d < name.chars().count())
        .min_by_key(|(d, _)| *d)
        .map(|(_, c)| c)
}

struct TreeBuilder<'a> {
    ctx: &'a SourceContext,
    variable: &'a str,
}

impl TreeBuilder<'_> {
    fn unexpected(&self, span: SourceSpan) -> ExprError {
        ExprError::Syntax {
            src: self.ctx.named_source(),
            span,
            expected: "a complete expression".to_string(),
        }
    }

    fn sum(&self, pair: Pair<'_, Rule>) -> Result<Expr, ExprError> {
        let span = span_of(&pair);
        let mut inner = pair.into_inner();
        let first = inner.next().ok_or_else(|| self.unexpected(span))?;
        let mut acc = self.product(first)?;
        while let Some(op) = inner.next() {
            let rhs = inner.next().ok_or_else(|| self.unexpected(span_of(&op)))?;
            let op = match op.as_str() {
                "-" | "−" => BinaryOp::Sub,
                _ => BinaryOp::Add,
            };
            acc = Expr::binary(acc, op, self.product(rhs)?);
        }
        Ok(acc)
    }

    fn product(&self, pair: Pair<'_, Rule>) -> Result<Expr, ExprError> {
        let span = span_of(&pair);
        let mut inner = pair.into_inner();
        let first = inner.next().ok_or_else(|| self.unexpected(span))?;
        let mut acc = self.unary(first)?;
        while let Some(next) = inner.next() {
            match next.as_rule() {
                Rule::mul_op => {
                    let op = match next.as_str() {
                        "/" | "÷" => BinaryOp::Div,
                        _ => BinaryOp::Mul,
                    };
                    let rhs = inner.next().ok_or_else(|| self.unexpected(span_of(&next)))?;
                    acc = Expr::binary(acc, op, self.unary(rhs)?);
                }
                Rule::implied => {
                    let next_span = span_of(&next);
                    let power = next
                        .into_inner()
                        .next()
                        .ok_or_else(|| self.unexpected(next_span))?;
                    acc = Expr::binary(acc, BinaryOp::Mul, self.power(power)?);
                }
                _ => return Err(self.unexpected(span_of(&next))),
            }
        }
        Ok(acc)
    }

    fn unary(&self, pair: Pair<'_, Rule>) -> Result<Expr, ExprError> {
        let span = span_of(&pair);
        let mut signs = Vec::new();
        let mut operand = None;
        for inner in pair.into_inner() {
            match inner.as_rule() {
                Rule::sign => signs.push(match inner.as_str() {
                    "-" | "−" => UnaryOp::Neg,
                    _ => UnaryOp::Pos,
                }),
                Rule::power => operand = Some(self.power(inner)?),
                _ => return Err(self.unexpected(span_of(&inner))),
            }
        }
        let mut expr = operand.ok_or_else(|| self.unexpected(span))?;
        // innermost sign binds first
        for op in signs.into_iter().rev() {
            expr = Expr::unary(op, expr);
        }
        Ok(expr)
    }

    fn power(&self, pair: Pair<'_, Rule>) -> Result<Expr, ExprError> {
        let span = span_of(&pair);
        let mut inner = pair.into_inner();
        let base = inner.next().ok_or_else(|| self.unexpected(span))?;
        let base = self.atom(base)?;
        match inner.next() {
            Some(op) => {
                let exponent = inner.next().ok_or_else(|| self.unexpected(span_of(&op)))?;
                Ok(Expr::binary(base, BinaryOp::Pow, self.unary(exponent)?))
            }
            None => Ok(base),
        }
    }

    fn atom(&self, pair: Pair<'_, Rule>) -> Result<Expr, ExprError> {
        let span = span_of(&pair);
        match pair.as_rule() {
            Rule::number => self.number(&pair),
            Rule::symbol => Constant::from_name(pair.as_str())
                .map(Expr::Constant)
                .ok_or_else(|| self.unexpected(span)),
            Rule::ident => self.ident(pair.as_str(), span),
            Rule::group => {
                let inner = pair.into_inner().next().ok_or_else(|| self.unexpected(span))?;
                self.sum(inner)
            }
            Rule::call => self.call(pair),
            _ => Err(self.unexpected(span)),
        }
    }

    fn number(&self, pair: &Pair<'_, Rule>) -> Result<Expr, ExprError> {
        let text = pair.as_str();
        match text.parse::<f64>() {
            Ok(n) if n.is_finite() => Ok(Expr::Number(n)),
            _ => Err(ExprError::InvalidNumber {
                text: text.to_string(),
                src: self.ctx.named_source(),
                span: span_of(pair),
            }),
        }
    }

    /// Resolve a bare name: the variable or a constant
    fn value_name(&self, name: &str) -> Option<Expr> {
        if name == self.variable {
            Some(Expr::Variable)
        } else {
            Constant::from_name(name).map(Expr::Constant)
        }
    }

    fn ident(&self, name: &str, span: SourceSpan) -> Result<Expr, ExprError> {
        if let Some(expr) = self.value_name(name) {
            return Ok(expr);
        }
        let suggestion = if let Some(f) = Function::from_name(name) {
            Some(format!("{} is a function, write `{}({})`", name, f.name(), self.variable))
        } else {
            closest(name, [self.variable, "pi", "e", "tau"])
                .map(|c| format!("did you mean `{}`?", c))
        };
        Err(ExprError::UnknownIdentifier {
            name: name.to_string(),
            src: self.ctx.named_source(),
            span,
            suggestion,
        })
    }

    fn call(&self, pair: Pair<'_, Rule>) -> Result<Expr, ExprError> {
        let span = span_of(&pair);
        let mut inner = pair.into_inner();
        let name_pair = inner.next().ok_or_else(|| self.unexpected(span))?;
        let name = name_pair.as_str();
        let name_span = span_of(&name_pair);
        let args = inner.map(|arg| self.sum(arg)).collect::<Result<Vec<_>, _>>()?;

        if let Some(value) = self.value_name(name) {
            // x(x + 1) reads as multiplication
            return match <[Expr; 1]>::try_from(args) {
                Ok([arg]) => Ok(Expr::binary(value, BinaryOp::Mul, arg)),
                Err(_) => Err(ExprError::NotAFunction {
                    name: name.to_string(),
                    src: self.ctx.named_source(),
                    span: name_span,
                }),
            };
        }

        let Some(function) = Function::from_name(name) else {
            let suggestion = closest(name, Function::ALL.iter().map(|f| f.name()))
                .map(|c| format!("did you mean `{}`?", c));
            return Err(ExprError::UnknownFunction {
                name: name.to_string(),
                src: self.ctx.named_source(),
                span: name_span,
                suggestion,
            });
        };

        let arity = function.arity();
        if !arity.accepts(args.len()) {
            return Err(ExprError::Arity {
                function: function.name(),
                expected: arity.describe(),
                found: args.len(),
                src: self.ctx.named_source(),
                span,
            });
        }
        Ok(Expr::Call(function, args))
    }
}
