/// Grammar extensions accepted by the parser.
///
/// The default is the baseline grammar: `(` only after a function name,
/// `-` only as part of a numeric literal, and at most one `^` per operand.
/// Each flag only makes the parser accept formulas the baseline rejects, so
/// a formula that parses under the baseline gives the same value whatever
/// the flags are.
///
/// ```
/// use plotexpr::{evaluate_with, Syntax};
///
/// assert!(evaluate_with("(x + 1) * 2", 1.0, Syntax::baseline()).is_err());
/// assert_eq!(evaluate_with("(x + 1) * 2", 1.0, Syntax::extended()), Ok(4.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Syntax {
    /// Allow `( expression )` wherever a number could appear
    pub grouping: bool,
    /// Allow `-` as a prefix operator on any operand, as in `-sin(x)`.
    /// It binds tighter than `*` and looser than `^`: `-x^2` is `-(x^2)`.
    pub negation: bool,
    /// Allow chains of `^`, grouped from the right: `2^3^2` is `2^9`
    pub chained_powers: bool,
}

impl Syntax {
    /// The grammar without any extension
    pub fn baseline() -> Syntax {
        Syntax::default()
    }

    /// The grammar with every extension enabled
    pub fn extended() -> Syntax {
        Syntax {
            grouping: true,
            negation: true,
            chained_powers: true,
        }
    }
}
