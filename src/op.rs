use std::fmt::{self, Display, Formatter};

/// Binary operators of the grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `^`, computed with `f64::powf`
    Exp,
}

impl Op {
    /// The character used for this operator in formulas
    pub fn symbol(self) -> char {
        match self {
            Self::Plus => '+',
            Self::Minus => '-',
            Self::Mul => '*',
            Self::Div => '/',
            Self::Exp => '^',
        }
    }

    /// Get the operator precedence. Operators with higher precedence are
    /// evaluated first.
    pub fn precedence(self) -> u8 {
        match self {
            Self::Plus | Self::Minus => 1,
            Self::Mul | Self::Div => 2,
            Self::Exp => 3,
        }
    }

    /// Apply the operator. Undefined operations give `NaN` or infinities.
    pub fn apply(self, left: f64, right: f64) -> f64 {
        match self {
            Self::Plus => left + right,
            Self::Minus => left - right,
            Self::Mul => left * right,
            Self::Div => left / right,
            Self::Exp => left.powf(right),
        }
    }
}

/// The unary functions that can be called from a formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Function {
    /// Sine
    Sin,
    /// Cosine
    Cos,
    /// Tangent
    Tan,
    /// Natural logarithm
    Log,
    /// Exponential
    Exp,
}

impl Function {
    /// Every function, in documentation order
    pub const ALL: [Function; 5] = [
        Function::Sin,
        Function::Cos,
        Function::Tan,
        Function::Log,
        Function::Exp,
    ];

    /// Name of the function in formulas
    pub fn name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Log => "log",
            Self::Exp => "exp",
        }
    }

    /// The `std::f64` implementation of the function
    pub fn as_fn(self) -> fn(f64) -> f64 {
        match self {
            Self::Sin => f64::sin,
            Self::Cos => f64::cos,
            Self::Tan => f64::tan,
            Self::Log => f64::ln,
            Self::Exp => f64::exp,
        }
    }

    /// Apply the function to `arg`
    pub fn apply(self, arg: f64) -> f64 {
        (self.as_fn())(arg)
    }
}

impl Display for Op {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        write!(fmt, "{}", self.symbol())
    }
}

impl Display for Function {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        fmt.write_str(self.name())
    }
}
