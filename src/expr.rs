//! Built-in expression evaluator.
//!
//! A recursive descent parser for real-valued arithmetic in one variable `x`:
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/' | '%') unary | power)*     // juxtaposition multiplies
//! unary   := ('+' | '-') unary | power
//! power   := primary ('^' unary)?                          // right-associative
//! primary := number | symbol | name '(' expr (',' expr)* ')' | '(' expr ')'
//! ```
//!
//! Symbols are `x`, `pi`/`PI`, `e`/`E` and `tau`. Division by zero follows IEEE
//! semantics and yields an infinite result rather than an error; functions
//! evaluated outside their real domain (`sqrt(-1)`, `asin(2)`) fail with
//! [`EvalError::Domain`].
//!
//! Nesting is capped at [`MAX_EXPR_DEPTH`] levels. Every recursive step of the
//! parser and every operator in a `+`/`*` chain counts toward the cap, so the
//! depth of the resulting tree is bounded and neither evaluation nor drop can
//! run out of stack.

#[cfg(test)]
#[path = "expr_test.rs"]
mod expr_test;

use std::f64::consts::{E, PI, TAU};

use crate::consts::MAX_EXPR_DEPTH;
use crate::eval::{EvalError, Evaluator};

/// Evaluator backed by this module's parser.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExprEvaluator;

impl Evaluator for ExprEvaluator {
    fn evaluate(&self, expr: &str, x: f64) -> Result<f64, EvalError> {
        parse(expr)?.eval(x)
    }
}

// =============================================================
// AST
// =============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Func {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Sqrt,
    Cbrt,
    Abs,
    Exp,
    Ln,
    Log,
    Log2,
    Log10,
    Floor,
    Ceil,
    Round,
    Sign,
    Min,
    Max,
    Pow,
}

impl Func {
    fn from_name(name: &str) -> Option<Self> {
        let func = match name {
            "sin" => Self::Sin,
            "cos" => Self::Cos,
            "tan" => Self::Tan,
            "asin" => Self::Asin,
            "acos" => Self::Acos,
            "atan" => Self::Atan,
            "sinh" => Self::Sinh,
            "cosh" => Self::Cosh,
            "tanh" => Self::Tanh,
            "sqrt" => Self::Sqrt,
            "cbrt" => Self::Cbrt,
            "abs" => Self::Abs,
            "exp" => Self::Exp,
            "ln" => Self::Ln,
            "log" => Self::Log,
            "log2" => Self::Log2,
            "log10" => Self::Log10,
            "floor" => Self::Floor,
            "ceil" => Self::Ceil,
            "round" => Self::Round,
            "sign" => Self::Sign,
            "min" => Self::Min,
            "max" => Self::Max,
            "pow" => Self::Pow,
            _ => return None,
        };
        Some(func)
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Asin => "asin",
            Self::Acos => "acos",
            Self::Atan => "atan",
            Self::Sinh => "sinh",
            Self::Cosh => "cosh",
            Self::Tanh => "tanh",
            Self::Sqrt => "sqrt",
            Self::Cbrt => "cbrt",
            Self::Abs => "abs",
            Self::Exp => "exp",
            Self::Ln => "ln",
            Self::Log => "log",
            Self::Log2 => "log2",
            Self::Log10 => "log10",
            Self::Floor => "floor",
            Self::Ceil => "ceil",
            Self::Round => "round",
            Self::Sign => "sign",
            Self::Min => "min",
            Self::Max => "max",
            Self::Pow => "pow",
        }
    }

    /// Check the argument count, returning a description of the expected count on mismatch.
    fn check_arity(self, got: usize) -> Result<(), &'static str> {
        let (ok, expected) = match self {
            Self::Min | Self::Max => (got >= 1, "at least 1"),
            Self::Pow => (got == 2, "2"),
            Self::Log => (got == 1 || got == 2, "1 or 2"),
            _ => (got == 1, "1"),
        };
        if ok { Ok(()) } else { Err(expected) }
    }

    fn apply(self, args: &[f64]) -> Result<f64, EvalError> {
        let v = args.first().copied().unwrap_or(f64::NAN);
        let domain = |ok: bool, value: f64| {
            if ok { Ok(()) } else { Err(EvalError::Domain { function: self.name().to_owned(), value }) }
        };
        let out = match self {
            Self::Sin => v.sin(),
            Self::Cos => v.cos(),
            Self::Tan => v.tan(),
            Self::Asin => {
                domain((-1.0..=1.0).contains(&v), v)?;
                v.asin()
            }
            Self::Acos => {
                domain((-1.0..=1.0).contains(&v), v)?;
                v.acos()
            }
            Self::Atan => v.atan(),
            Self::Sinh => v.sinh(),
            Self::Cosh => v.cosh(),
            Self::Tanh => v.tanh(),
            Self::Sqrt => {
                domain(v >= 0.0, v)?;
                v.sqrt()
            }
            Self::Cbrt => v.cbrt(),
            Self::Abs => v.abs(),
            Self::Exp => v.exp(),
            Self::Ln => {
                domain(v >= 0.0, v)?;
                v.ln()
            }
            Self::Log => {
                domain(v >= 0.0, v)?;
                match args.get(1) {
                    Some(&base) => {
                        domain(base > 0.0, base)?;
                        v.ln() / base.ln()
                    }
                    None => v.ln(),
                }
            }
            Self::Log2 => {
                domain(v >= 0.0, v)?;
                v.log2()
            }
            Self::Log10 => {
                domain(v >= 0.0, v)?;
                v.log10()
            }
            Self::Floor => v.floor(),
            Self::Ceil => v.ceil(),
            Self::Round => v.round(),
            Self::Sign => {
                if v > 0.0 {
                    1.0
                } else if v < 0.0 {
                    -1.0
                } else {
                    v
                }
            }
            Self::Min => args.iter().copied().fold(f64::INFINITY, f64::min),
            Self::Max => args.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            Self::Pow => v.powf(args.get(1).copied().unwrap_or(f64::NAN)),
        };
        Ok(out)
    }
}

/// Parsed expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Const(f64),
    X,
    Neg(Box<Expr>),
    Binary(BinOp, Box<Expr>, Box<Expr>),
    Call(Func, Vec<Expr>),
}

impl Expr {
    /// Evaluate the tree with the free variable bound to `x`.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::Domain`] when a function is applied outside its real domain.
    pub fn eval(&self, x: f64) -> Result<f64, EvalError> {
        match self {
            Self::Const(v) => Ok(*v),
            Self::X => Ok(x),
            Self::Neg(inner) => Ok(-inner.eval(x)?),
            Self::Binary(op, lhs, rhs) => {
                let a = lhs.eval(x)?;
                let b = rhs.eval(x)?;
                Ok(match op {
                    BinOp::Add => a + b,
                    BinOp::Sub => a - b,
                    BinOp::Mul => a * b,
                    BinOp::Div => a / b,
                    BinOp::Mod => a - b * (a / b).floor(),
                    BinOp::Pow => a.powf(b),
                })
            }
            Self::Call(func, args) => {
                let values = args.iter().map(|arg| arg.eval(x)).collect::<Result<Vec<_>, _>>()?;
                func.apply(&values)
            }
        }
    }
}

// =============================================================
// Lexer
// =============================================================

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token<'a> {
    Num(f64),
    Ident(&'a str),
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,
    LParen,
    RParen,
    Comma,
}

#[derive(Debug, Clone, Copy)]
struct Spanned<'a> {
    offset: usize,
    token: Token<'a>,
}

fn syntax(offset: usize, message: impl Into<String>) -> EvalError {
    EvalError::Syntax { offset, message: message.into() }
}

fn tokenize(input: &str) -> Result<Vec<Spanned<'_>>, EvalError> {
    let bytes = input.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let start = pos;
        let token = match bytes[pos] {
            c if c.is_ascii_whitespace() => {
                pos += 1;
                continue;
            }
            b'+' => Token::Plus,
            b'-' => Token::Minus,
            b'*' => Token::Star,
            b'/' => Token::Slash,
            b'%' => Token::Percent,
            b'^' => Token::Caret,
            b'(' => Token::LParen,
            b')' => Token::RParen,
            b',' => Token::Comma,
            c if c.is_ascii_digit() || c == b'.' => {
                pos = scan_number(bytes, pos);
                let text = &input[start..pos];
                let value = text
                    .parse::<f64>()
                    .map_err(|_| syntax(start, format!("invalid number '{text}'")))?;
                tokens.push(Spanned { offset: start, token: Token::Num(value) });
                continue;
            }
            c if c.is_ascii_alphabetic() || c == b'_' => {
                while pos < bytes.len() && (bytes[pos].is_ascii_alphanumeric() || bytes[pos] == b'_') {
                    pos += 1;
                }
                tokens.push(Spanned { offset: start, token: Token::Ident(&input[start..pos]) });
                continue;
            }
            _ => {
                let ch = input[start..].chars().next().unwrap_or('?');
                return Err(syntax(start, format!("unexpected character '{ch}'")));
            }
        };
        tokens.push(Spanned { offset: start, token });
        pos += 1;
    }

    Ok(tokens)
}

/// Return the end of the numeric literal starting at `pos`.
///
/// An exponent is only consumed when digits follow it, so `2e` lexes as the
/// number `2` followed by the symbol `e`.
fn scan_number(bytes: &[u8], mut pos: usize) -> usize {
    let digits = |bytes: &[u8], mut p: usize| {
        while p < bytes.len() && bytes[p].is_ascii_digit() {
            p += 1;
        }
        p
    };
    pos = digits(bytes, pos);
    if pos < bytes.len() && bytes[pos] == b'.' {
        pos = digits(bytes, pos + 1);
    }
    if pos < bytes.len() && (bytes[pos] == b'e' || bytes[pos] == b'E') {
        let mut exp = pos + 1;
        if exp < bytes.len() && (bytes[exp] == b'+' || bytes[exp] == b'-') {
            exp += 1;
        }
        if exp < bytes.len() && bytes[exp].is_ascii_digit() {
            pos = digits(bytes, exp);
        }
    }
    pos
}

// =============================================================
// Parser
// =============================================================

/// Parse an expression into a tree.
///
/// # Errors
///
/// Returns [`EvalError::Syntax`] for malformed input, [`EvalError::UnknownSymbol`]
/// or [`EvalError::UnknownFunction`] for names outside the supported set, and
/// [`EvalError::Arity`] for calls with the wrong number of arguments. Input
/// nested deeper than [`MAX_EXPR_DEPTH`] is a syntax error.
pub fn parse(input: &str) -> Result<Expr, EvalError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(syntax(0, "empty expression"));
    }
    let mut parser = Parser { tokens, pos: 0, end: input.len(), depth: 0 };
    let expr = parser.expr()?;
    if let Some(extra) = parser.peek() {
        return Err(syntax(extra.offset, "unexpected trailing input"));
    }
    Ok(expr)
}

struct Parser<'a> {
    tokens: Vec<Spanned<'a>>,
    pos: usize,
    end: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<Spanned<'a>> {
        self.tokens.get(self.pos).copied()
    }

    fn peek_token(&self) -> Option<Token<'a>> {
        self.peek().map(|s| s.token)
    }

    fn offset(&self) -> usize {
        self.peek().map_or(self.end, |s| s.offset)
    }

    fn bump(&mut self) -> Option<Spanned<'a>> {
        let next = self.peek();
        if next.is_some() {
            self.pos += 1;
        }
        next
    }

    fn consume(&mut self, want: Token<'a>, what: &str) -> Result<(), EvalError> {
        if self.peek_token() == Some(want) {
            self.pos += 1;
            Ok(())
        } else {
            Err(syntax(self.offset(), format!("expected {what}")))
        }
    }

    fn descend(&mut self) -> Result<(), EvalError> {
        self.depth += 1;
        if self.depth > MAX_EXPR_DEPTH {
            return Err(syntax(self.offset(), "expression nested too deeply"));
        }
        Ok(())
    }

    fn expr(&mut self) -> Result<Expr, EvalError> {
        let depth = self.depth;
        let mut lhs = self.term()?;
        loop {
            let op = match self.peek_token() {
                Some(Token::Plus) => BinOp::Add,
                Some(Token::Minus) => BinOp::Sub,
                _ => break,
            };
            self.pos += 1;
            // Each link deepens the left spine of the tree.
            self.descend()?;
            let rhs = self.term()?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
        self.depth = depth;
        Ok(lhs)
    }

    fn term(&mut self) -> Result<Expr, EvalError> {
        let depth = self.depth;
        let mut lhs = self.unary()?;
        loop {
            if matches!(
                self.peek_token(),
                Some(Token::Star | Token::Slash | Token::Percent | Token::Num(_) | Token::Ident(_) | Token::LParen)
            ) {
                self.descend()?;
            }
            let (op, rhs) = match self.peek_token() {
                Some(Token::Star) => {
                    self.pos += 1;
                    (BinOp::Mul, self.unary()?)
                }
                Some(Token::Slash) => {
                    self.pos += 1;
                    (BinOp::Div, self.unary()?)
                }
                Some(Token::Percent) => {
                    self.pos += 1;
                    (BinOp::Mod, self.unary()?)
                }
                // Juxtaposition: `2x`, `3(x + 1)`, `(x)(x)`.
                Some(Token::Num(_) | Token::Ident(_) | Token::LParen) => (BinOp::Mul, self.power()?),
                _ => break,
            };
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
        self.depth = depth;
        Ok(lhs)
    }

    fn unary(&mut self) -> Result<Expr, EvalError> {
        self.descend()?;
        let out = self.unary_inner();
        self.depth -= 1;
        out
    }

    fn unary_inner(&mut self) -> Result<Expr, EvalError> {
        match self.peek_token() {
            Some(Token::Minus) => {
                self.pos += 1;
                Ok(Expr::Neg(Box::new(self.unary()?)))
            }
            Some(Token::Plus) => {
                self.pos += 1;
                self.unary()
            }
            _ => self.power(),
        }
    }

    fn power(&mut self) -> Result<Expr, EvalError> {
        let base = self.primary()?;
        if self.peek_token() == Some(Token::Caret) {
            self.pos += 1;
            let exponent = self.unary()?;
            return Ok(Expr::Binary(BinOp::Pow, Box::new(base), Box::new(exponent)));
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<Expr, EvalError> {
        let offset = self.offset();
        let Some(next) = self.bump() else {
            return Err(syntax(offset, "unexpected end of expression"));
        };
        match next.token {
            Token::Num(v) => Ok(Expr::Const(v)),
            Token::Ident(name) => self.symbol_or_call(name),
            Token::LParen => {
                let inner = self.expr()?;
                self.consume(Token::RParen, "')'")?;
                Ok(inner)
            }
            _ => Err(syntax(next.offset, "expected a value")),
        }
    }

    fn symbol_or_call(&mut self, name: &str) -> Result<Expr, EvalError> {
        match name {
            "x" => return Ok(Expr::X),
            "pi" | "PI" => return Ok(Expr::Const(PI)),
            "e" | "E" => return Ok(Expr::Const(E)),
            "tau" => return Ok(Expr::Const(TAU)),
            _ => {}
        }

        if self.peek_token() != Some(Token::LParen) {
            return Err(EvalError::UnknownSymbol(name.to_owned()));
        }
        let func = Func::from_name(name).ok_or_else(|| EvalError::UnknownFunction(name.to_owned()))?;
        self.pos += 1;

        let mut args = vec![self.expr()?];
        while self.peek_token() == Some(Token::Comma) {
            self.pos += 1;
            args.push(self.expr()?);
        }
        self.consume(Token::RParen, "')' after function arguments")?;

        func.check_arity(args.len())
            .map_err(|expected| EvalError::Arity { name: name.to_owned(), expected, got: args.len() })?;
        Ok(Expr::Call(func, args))
    }
}
