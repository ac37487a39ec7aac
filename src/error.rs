use std::error;
use std::fmt::{self, Display, Formatter};

/// Error type for the plotexpr crate.
///
/// Every variant except `CompileError` is a structural failure: the formula
/// does not follow the grammar. Mathematically undefined operations such as
/// `log(0)` or `1/0` are not errors, they evaluate to `NaN` or infinities.
/// Positions are byte offsets into the formula.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A character that can not appear at this point of the formula
    UnexpectedCharacter {
        /// The offending character
        found: char,
        /// What the parser was looking for
        expected: &'static str,
        /// Where the character starts
        position: usize,
    },
    /// The formula ended while a token was still expected
    UnexpectedEnd {
        /// What the parser was looking for
        expected: &'static str,
        /// Length of the formula
        position: usize,
    },
    /// A numeric literal without any digit, or with a dangling `.`
    InvalidNumber {
        /// Where the literal starts
        position: usize,
    },
    /// A name that is neither the free variable nor a known function
    UnknownName {
        /// The name as written in the formula
        name: String,
        /// Where the name starts
        position: usize,
    },
    /// Too many nested calls or groups
    TooDeep {
        /// Where the nesting limit was crossed
        position: usize,
    },
    /// The JIT back end rejected a parsed formula
    CompileError(String),
}

impl Error {
    /// Byte offset of the failure in the formula, if there is one.
    pub fn position(&self) -> Option<usize> {
        match *self {
            Self::UnexpectedCharacter { position, .. }
            | Self::UnexpectedEnd { position, .. }
            | Self::InvalidNumber { position }
            | Self::UnknownName { position, .. }
            | Self::TooDeep { position } => Some(position),
            Self::CompileError(_) => None,
        }
    }

    /// Check if this error comes from a formula that does not follow the
    /// grammar.
    pub fn is_structural(&self) -> bool {
        !matches!(*self, Self::CompileError(_))
    }
}

impl Display for Error {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        match *self {
            Self::UnexpectedCharacter {
                found,
                expected,
                position,
            } => write!(
                fmt,
                "ParseError: unexpected character '{}' at position {}, expected {}",
                found, position, expected
            ),
            Self::UnexpectedEnd { expected, position } => write!(
                fmt,
                "ParseError: unexpected end of input at position {}, expected {}",
                position, expected
            ),
            Self::InvalidNumber { position } => {
                write!(fmt, "ParseError: invalid number at position {}", position)
            }
            Self::UnknownName { ref name, position } => write!(
                fmt,
                "ParseError: unknown name '{}' at position {}",
                name, position
            ),
            Self::TooDeep { position } => write!(
                fmt,
                "ParseError: expression nested too deeply at position {}",
                position
            ),
            Self::CompileError(ref message) => write!(fmt, "CompileError: {}", message),
        }
    }
}

impl error::Error for Error {}
