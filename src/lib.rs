#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(
    clippy::needless_return,
    clippy::missing_docs_in_private_items,
    clippy::must_use_candidate,
    clippy::module_name_repetitions
)]

//! plotexpr, a crate for evaluating the formulas typed into a function
//! plotter.
//!
//! A formula is an arithmetic expression in a single free variable, `x`.
//! The easiest way to use this crate is with the
//! [`evaluate`](fn.evaluate.html) function, which takes the formula and the
//! value of `x`:
//!
//! ```
//! assert_eq!(plotexpr::evaluate("3 + 5 * 2", 0.0), Ok(13.0));
//! assert_eq!(plotexpr::evaluate("2 * x", 3.5), Ok(7.0));
//! ```
//!
//! A plotter evaluates the same formula at hundreds of thousands of points,
//! so it is also possible to separate the parsing from the evaluation with
//! the [`Expr`](struct.Expr.html) type:
//!
//! ```
//! use plotexpr::Expr;
//!
//! let expr = Expr::parse("x^2 * sin(x)").unwrap();
//! assert_eq!(expr.eval(0.0), 0.0);
//! assert_eq!(expr.eval(2.0), 4.0 * f64::sin(2.0));
//! ```
//!
//! # Language definition
//!
//! The formulas can contain the following elements:
//!
//! - number literals: `12`, `-0.456`. A `-` is only part of a literal, there
//!   is no exponent notation;
//! - the free variable `x`;
//! - mathematical operators: `+` for addition, `-` for subtraction,
//!   `*` for multiplication, `/` for division and `^` for exponentiation
//!   (`f64::powf`). `^` binds tighter than `*` and `/`, which bind tighter
//!   than `+` and `-`. A formula contains at most one `^` per operand;
//! - function calls: `sin(x)`, `cos(x)`, `tan(x)`, `log(x)` for the natural
//!   logarithm and `exp(x)`. Parenthesis can only appear in function calls.
//!
//! Spaces, tabs and line breaks are allowed between tokens. Any other symbol
//! is forbidden in the input. The [`Syntax`](struct.Syntax.html) type
//! enables grouping parenthesis, prefix negation and chains of `^`.
//!
//! Only formulas breaking these rules fail. Undefined operations keep the
//! floating point behaviour: `1 / 0` is infinite, `log(-1)` is `NaN`, and it
//! is up to the caller to skip such points when drawing.
//!
//! # Technical details
//!
//! plotexpr uses a recursive descent parser reading characters straight
//! from the input, builds an AST, and evaluates it with an interpreter.
//! Constant sub-expressions are folded at parse time. With the `jit`
//! feature, parsed formulas can also be compiled to machine code.

#[macro_use]
extern crate lazy_static;

mod ast;
mod catalogue;
mod cursor;
mod error;
mod expr;
#[cfg(feature = "jit")]
mod jit;
mod op;
mod parser;
mod sample;
mod syntax;
mod util;

pub use ast::Ast;
pub use catalogue::{Catalogue, NamedFunction, Selection};
pub use error::Error;
pub use expr::{evaluate, evaluate_with, Expr};
#[cfg(feature = "jit")]
pub use jit::JIT;
pub use op::{Function, Op};
pub use parser::MAX_DEPTH;
pub use sample::{finite, sample, Curve, Domain};
pub use syntax::Syntax;
pub use util::FUNCTIONS;
