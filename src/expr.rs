use crate::ast::Ast;
use crate::parser::Parser;
use crate::syntax::Syntax;
use crate::Error;
use log::{debug, trace};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Evaluate `formula` with the free variable `x` bound to `x`.
///
/// Returns `Ok(result)` if the formula follows the grammar, or `Err(cause)`
/// describing the first structural problem. Undefined operations are not
/// errors: they give `NaN` or infinities.
///
/// # Example
///
/// ```
/// # use plotexpr::evaluate;
/// assert_eq!(evaluate("2 + 3 * 4", 0.0), Ok(14.0));
/// assert_eq!(evaluate("x^2 - 1", 3.0), Ok(8.0));
/// assert_eq!(evaluate("log(x)", 0.0), Ok(std::f64::NEG_INFINITY));
/// assert!(evaluate("", 1.0).is_err());
/// ```
pub fn evaluate(formula: &str, x: f64) -> Result<f64, Error> {
    evaluate_with(formula, x, Syntax::baseline())
}

/// Evaluate `formula` at `x`, accepting the grammar extensions in `syntax`.
pub fn evaluate_with(formula: &str, x: f64, syntax: Syntax) -> Result<f64, Error> {
    Parser::new(formula, syntax).parse().map(|ast| ast.eval(x))
}

/// A parsed and optimized formula.
///
/// Parsing once and evaluating many times gives exactly the same results
/// as calling [`evaluate`](fn.evaluate.html) for every point.
///
/// # Examples
/// ```
/// # use plotexpr::Expr;
/// let expr = Expr::parse("x * x + 1").unwrap();
/// assert_eq!(expr.eval(2.0), 5.0);
/// assert_eq!(expr.eval(-3.0), 10.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    formula: String,
    ast: Ast,
}

impl Expr {
    /// Parse the given `formula` into an `Expr`, with the baseline grammar.
    ///
    /// # Examples
    /// ```
    /// # use plotexpr::Expr;
    /// // A valid formula
    /// assert!(Expr::parse("3 + sin(x) * 2").is_ok());
    /// // an invalid formula
    /// assert!(Expr::parse("3 + y").is_err());
    /// ```
    pub fn parse(formula: &str) -> Result<Self, Error> {
        Self::parse_with(formula, Syntax::baseline())
    }

    /// Parse the given `formula` with the grammar extensions in `syntax`.
    pub fn parse_with(formula: &str, syntax: Syntax) -> Result<Self, Error> {
        match Parser::new(formula, syntax).parse() {
            Ok(ast) => {
                let ast = ast.optimize();
                if let Some(value) = ast.value() {
                    trace!("{:?} folded to the constant {}", formula, value);
                }
                debug!("parsed {:?} as {}", formula, ast);
                Ok(Self {
                    formula: formula.into(),
                    ast,
                })
            }
            Err(err) => {
                debug!("failed to parse {:?}: {}", formula, err);
                Err(err)
            }
        }
    }

    /// Evaluate the formula with the free variable bound to `x`.
    pub fn eval(&self, x: f64) -> f64 {
        self.ast.eval(x)
    }

    /// Evaluate the formula at every point of `xs`.
    ///
    /// ```
    /// # use plotexpr::Expr;
    /// let expr = Expr::parse("2 * x").unwrap();
    /// assert_eq!(expr.eval_many(&[0.0, 1.0, 2.5]), vec![0.0, 2.0, 5.0]);
    /// ```
    pub fn eval_many(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.ast.eval(x)).collect()
    }

    /// Check if the formula does not depend on `x`
    pub fn is_constant(&self) -> bool {
        self.ast.value().is_some()
    }

    /// The formula as it was written
    pub fn formula(&self) -> &str {
        &self.formula
    }

    /// The optimized syntax tree
    pub fn ast(&self) -> &Ast {
        &self.ast
    }
}

impl FromStr for Expr {
    type Err = Error;

    fn from_str(formula: &str) -> Result<Self, Error> {
        Self::parse(formula)
    }
}

impl Display for Expr {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        fmt.write_str(&self.formula)
    }
}
