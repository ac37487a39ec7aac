use crate::ast::Ast;
use crate::cursor::Cursor;
use crate::error::Error;
use crate::op::Op;
use crate::syntax::Syntax;
use crate::util::{is_name_part, FUNCTIONS};

/// Maximal number of nested calls, groups, negations or chained powers
pub const MAX_DEPTH: usize = 256;

const ATOM: &str = "a number, `x` or a function call";

/// Recursive descent parser, one method per grammar rule:
///
/// ```text
/// expression := term (("+" | "-") term)*
/// term       := signed (("*" | "/") signed)*
/// signed     := "-" signed | exponent         (negation only)
/// exponent   := atom ("^" atom)?
///             | atom ("^" signed)?            (chained powers only)
/// atom       := name "(" expression ")" | "x" | number
///             | "(" expression ")"            (grouping only)
/// number     := ["-"] digits ["." digits]
/// ```
///
/// There is no separate lexing pass: each rule reads characters straight
/// from the cursor, which skips whitespace before every token.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    syntax: Syntax,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(formula: &'a str, syntax: Syntax) -> Parser<'a> {
        Parser {
            cursor: Cursor::new(formula),
            syntax,
            depth: 0,
        }
    }

    /// Parse the whole formula. Anything left after the expression is an
    /// error.
    pub fn parse(mut self) -> Result<Ast, Error> {
        let ast = self.expression()?;
        if self.cursor.is_at_end() {
            Ok(ast)
        } else {
            Err(self.unexpected("an operator or end of input"))
        }
    }

    /// Sums are kept flat, so long chains do not make the tree deeper
    fn expression(&mut self) -> Result<Ast, Error> {
        let first = self.term()?;
        let mut rest = Vec::new();
        loop {
            let op = match self.cursor.peek() {
                Some('+') => Op::Plus,
                Some('-') => Op::Minus,
                _ => return Ok(Ast::chain(first, rest)),
            };
            self.cursor.bump();
            rest.push((op, self.term()?));
        }
    }

    fn term(&mut self) -> Result<Ast, Error> {
        let first = self.signed()?;
        let mut rest = Vec::new();
        loop {
            let op = match self.cursor.peek() {
                Some('*') => Op::Mul,
                Some('/') => Op::Div,
                _ => return Ok(Ast::chain(first, rest)),
            };
            self.cursor.bump();
            rest.push((op, self.signed()?));
        }
    }

    fn signed(&mut self) -> Result<Ast, Error> {
        if self.syntax.negation && self.cursor.peek() == Some('-') {
            // `-` directly followed by a digit is a literal
            let literal = self
                .cursor
                .peek_second_raw()
                .map_or(false, |c| c.is_ascii_digit());
            if !literal {
                self.cursor.bump();
                let operand = self.nested(Self::signed)?;
                return Ok(Ast::Neg(Box::new(operand)));
            }
        }
        self.exponent()
    }

    fn exponent(&mut self) -> Result<Ast, Error> {
        let base = self.atom()?;
        if !self.cursor.eat('^') {
            return Ok(base);
        }
        let power = if self.syntax.chained_powers {
            self.nested(Self::signed)?
        } else {
            self.atom()?
        };
        Ok(Ast::power(base, power))
    }

    fn atom(&mut self) -> Result<Ast, Error> {
        match self.cursor.peek() {
            Some(c) if is_name_part(c) => self.name(),
            Some(c) if c == '-' || c.is_ascii_digit() => self.number(),
            Some('(') if self.syntax.grouping => {
                self.cursor.bump();
                let inner = self.nested(Self::expression)?;
                self.expect(')', "')'")?;
                Ok(inner)
            }
            _ => Err(self.unexpected(ATOM)),
        }
    }

    /// The free variable or a function call
    fn name(&mut self) -> Result<Ast, Error> {
        let start = self.cursor.position();
        let name = self.cursor.take_while(is_name_part);
        if name == "x" {
            return Ok(Ast::Variable);
        }
        match FUNCTIONS.get(name) {
            Some(&function) => {
                self.expect('(', "'(' after function name")?;
                let arg = self.nested(Self::expression)?;
                self.expect(')', "')'")?;
                Ok(Ast::Call(function, Box::new(arg)))
            }
            None => Err(Error::UnknownName {
                name: name.into(),
                position: start,
            }),
        }
    }

    fn number(&mut self) -> Result<Ast, Error> {
        let start = self.cursor.position();
        let invalid = Error::InvalidNumber { position: start };
        if self.cursor.peek_raw() == Some('-') {
            self.cursor.bump();
        }
        if self.cursor.take_while(|c| c.is_ascii_digit()).is_empty() {
            return Err(invalid);
        }
        if self.cursor.peek_raw() == Some('.') {
            self.cursor.bump();
            if self.cursor.take_while(|c| c.is_ascii_digit()).is_empty() {
                return Err(invalid);
            }
        }
        self.cursor
            .since(start)
            .parse()
            .map(Ast::Number)
            .map_err(|_| invalid)
    }

    /// Run `rule` one nesting level deeper
    fn nested<F>(&mut self, rule: F) -> Result<Ast, Error>
    where
        F: FnOnce(&mut Self) -> Result<Ast, Error>,
    {
        if self.depth >= MAX_DEPTH {
            return Err(Error::TooDeep {
                position: self.cursor.position(),
            });
        }
        self.depth += 1;
        let result = rule(self);
        self.depth -= 1;
        result
    }

    fn expect(&mut self, expected: char, description: &'static str) -> Result<(), Error> {
        if self.cursor.eat(expected) {
            Ok(())
        } else {
            Err(self.unexpected(description))
        }
    }

    fn unexpected(&mut self, expected: &'static str) -> Error {
        let found = self.cursor.peek();
        let position = self.cursor.position();
        match found {
            Some(found) => Error::UnexpectedCharacter {
                found,
                expected,
                position,
            },
            None => Error::UnexpectedEnd { expected, position },
        }
    }
}
