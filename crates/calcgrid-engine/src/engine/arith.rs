//! Arithmetic expression evaluation.
//!
//! A recursive descent evaluator for the restricted grammar a substituted
//! formula body is allowed to contain: numeric literals, parentheses,
//! unary sign, and the binary operators `+ - * / ^`. Precedence is `^`
//! above `* /` above `+ -`; `^` is right-associative, the others
//! left-associative. Nothing else is accepted — formula text must never
//! reach a general-purpose script engine.
//!
//! Division by zero is not an error here: it produces a non-finite value
//! that the caller maps to its math-error sentinel.

use thiserror::Error;

/// Structural failure while parsing an expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExprError {
    #[error("unexpected character '{0}' in expression")]
    UnexpectedChar(char),
    #[error("unexpected end of expression")]
    UnexpectedEnd,
    #[error("expected ')' to close '('")]
    UnclosedParen,
    #[error("invalid numeric literal '{0}'")]
    BadNumber(String),
    #[error("unexpected trailing text '{0}'")]
    TrailingText(String),
}

/// Evaluate an arithmetic expression to a floating-point value.
pub fn eval_expr(input: &str) -> Result<f64, ExprError> {
    let mut parser = ExprParser::new(input);
    let value = parser.parse_sum()?;
    parser.skip_whitespace();
    if !parser.is_at_end() {
        return Err(ExprError::TrailingText(parser.rest().to_string()));
    }
    Ok(value)
}

struct ExprParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> ExprParser<'a> {
    fn new(input: &'a str) -> Self {
        ExprParser { input, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|c| c.is_whitespace()) {
            self.advance();
        }
    }

    /// sum := product (('+' | '-') product)*
    fn parse_sum(&mut self) -> Result<f64, ExprError> {
        let mut value = self.parse_product()?;
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some('+') => {
                    self.advance();
                    value += self.parse_product()?;
                }
                Some('-') => {
                    self.advance();
                    value -= self.parse_product()?;
                }
                _ => return Ok(value),
            }
        }
    }

    /// product := power (('*' | '/') power)*
    fn parse_product(&mut self) -> Result<f64, ExprError> {
        let mut value = self.parse_power()?;
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some('*') => {
                    self.advance();
                    value *= self.parse_power()?;
                }
                Some('/') => {
                    self.advance();
                    value /= self.parse_power()?;
                }
                _ => return Ok(value),
            }
        }
    }

    /// power := unary ('^' power)?   (right-associative)
    fn parse_power(&mut self) -> Result<f64, ExprError> {
        let base = self.parse_unary()?;
        self.skip_whitespace();
        if self.peek() == Some('^') {
            self.advance();
            let exponent = self.parse_power()?;
            return Ok(base.powf(exponent));
        }
        Ok(base)
    }

    /// unary := ('+' | '-')* atom
    fn parse_unary(&mut self) -> Result<f64, ExprError> {
        self.skip_whitespace();
        match self.peek() {
            Some('-') => {
                self.advance();
                Ok(-self.parse_unary()?)
            }
            Some('+') => {
                self.advance();
                self.parse_unary()
            }
            _ => self.parse_atom(),
        }
    }

    /// atom := number | '(' sum ')'
    fn parse_atom(&mut self) -> Result<f64, ExprError> {
        self.skip_whitespace();
        match self.peek() {
            Some('(') => {
                self.advance();
                let value = self.parse_sum()?;
                self.skip_whitespace();
                if self.peek() != Some(')') {
                    return Err(ExprError::UnclosedParen);
                }
                self.advance();
                Ok(value)
            }
            Some(c) if c.is_ascii_digit() || c == '.' => self.parse_number(),
            Some(c) => Err(ExprError::UnexpectedChar(c)),
            None => Err(ExprError::UnexpectedEnd),
        }
    }

    fn parse_number(&mut self) -> Result<f64, ExprError> {
        let start = self.pos;

        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
        if self.peek() == Some('.') {
            self.advance();
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }
        if self.peek().is_some_and(|c| c == 'e' || c == 'E') {
            let mark = self.pos;
            self.advance();
            if self.peek().is_some_and(|c| c == '+' || c == '-') {
                self.advance();
            }
            if self.peek().is_some_and(|c| c.is_ascii_digit()) {
                while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    self.advance();
                }
            } else {
                // Not an exponent after all; leave the 'e' unconsumed.
                self.pos = mark;
            }
        }

        let text = &self.input[start..self.pos];
        text.parse::<f64>()
            .map_err(|_| ExprError::BadNumber(text.to_string()))
    }
}
