use crate::op::{Function, Op};
use std::fmt::{self, Display, Formatter};
use std::hash::{Hash, Hasher};

/// Ast nodes for the expressions
#[derive(Debug, Clone)]
pub enum Ast {
    /// A constant value
    Number(f64),
    /// The free variable `x`
    Variable,
    /// fn(<arg>)
    Call(Function, Box<Ast>),
    /// <first> op <operand> op <operand> ..., applied from left to right.
    /// Every operator of a chain has the same precedence.
    Chain(Box<Ast>, Vec<(Op, Ast)>),
    /// <base> ^ <power>
    Power(Box<Ast>, Box<Ast>),
    /// -<operand>, only produced when prefix negation is enabled
    Neg(Box<Ast>),
}

impl PartialEq<Self> for Ast {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Ast::Number(v), Ast::Number(v2)) => v.to_le_bytes() == v2.to_le_bytes(),
            (Ast::Variable, Ast::Variable) => true,
            (Ast::Call(f, a), Ast::Call(f2, a2)) => f == f2 && a == a2,
            (Ast::Chain(a, rest), Ast::Chain(a2, rest2)) => a == a2 && rest == rest2,
            (Ast::Power(a, b), Ast::Power(a2, b2)) => a == a2 && b == b2,
            (Ast::Neg(a), Ast::Neg(a2)) => a == a2,
            _ => false,
        }
    }
}
impl Eq for Ast {}

impl Hash for Ast {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Ast::Number(v) => {
                state.write_u8(0);
                v.to_le_bytes().hash(state)
            }
            Ast::Variable => state.write_u8(1),
            Ast::Call(f, a) => {
                state.write_u8(2);
                f.hash(state);
                a.hash(state);
            }
            Ast::Chain(a, rest) => {
                state.write_u8(3);
                a.hash(state);
                rest.hash(state);
            }
            Ast::Power(a, b) => {
                state.write_u8(4);
                a.hash(state);
                b.hash(state);
            }
            Ast::Neg(a) => {
                state.write_u8(5);
                a.hash(state);
            }
        }
    }
}

impl Ast {
    /// `first` alone when `rest` is empty
    pub(crate) fn chain(first: Ast, rest: Vec<(Op, Ast)>) -> Ast {
        if rest.is_empty() {
            first
        } else {
            Ast::Chain(Box::new(first), rest)
        }
    }

    pub(crate) fn power(base: Ast, power: Ast) -> Ast {
        Ast::Power(Box::new(base), Box::new(power))
    }

    /// Evaluate the tree with `x` bound to the free variable
    pub fn eval(&self, x: f64) -> f64 {
        match *self {
            Ast::Number(value) => value,
            Ast::Variable => x,
            Ast::Call(function, ref arg) => function.apply(arg.eval(x)),
            Ast::Chain(ref first, ref rest) => rest
                .iter()
                .fold(first.eval(x), |acc, &(op, ref operand)| op.apply(acc, operand.eval(x))),
            Ast::Power(ref base, ref power) => Op::Exp.apply(base.eval(x), power.eval(x)),
            Ast::Neg(ref operand) => -operand.eval(x),
        }
    }

    /// If the AST node correspond to a constant, get `Some(constant)`. Else,
    /// get `None`
    pub fn value(&self) -> Option<f64> {
        if let Self::Number(value) = *self {
            Some(value)
        } else {
            None
        }
    }

    /// Check if the free variable appears anywhere in the tree
    pub fn has_variable(&self) -> bool {
        match *self {
            Ast::Number(_) => false,
            Ast::Variable => true,
            Ast::Call(_, ref arg) | Ast::Neg(ref arg) => arg.has_variable(),
            Ast::Chain(ref first, ref rest) => {
                first.has_variable() || rest.iter().any(|(_, operand)| operand.has_variable())
            }
            Ast::Power(ref base, ref power) => base.has_variable() || power.has_variable(),
        }
    }

    /// Optimize the AST by doing constants propagation. Folding uses the same
    /// floating point operations as `eval`, so results do not change.
    pub fn optimize(self) -> Self {
        match self {
            Self::Variable | Self::Number(_) => self,
            Self::Call(function, arg) => {
                let arg = arg.optimize();
                if let Some(arg) = arg.value() {
                    return Self::Number(function.apply(arg));
                }
                return Self::Call(function, Box::new(arg));
            }
            Self::Neg(operand) => {
                let operand = operand.optimize();
                if let Some(operand) = operand.value() {
                    return Self::Number(-operand);
                }
                return Self::Neg(Box::new(operand));
            }
            Self::Chain(first, rest) => {
                // only the constant prefix folds: `x + 2 + 3` is `(x + 2) + 3`
                let mut head = first.optimize();
                let mut tail = Vec::with_capacity(rest.len());
                for (op, operand) in rest {
                    let operand = operand.optimize();
                    match (tail.is_empty(), head.value(), operand.value()) {
                        (true, Some(left), Some(right)) => head = Self::Number(op.apply(left, right)),
                        _ => tail.push((op, operand)),
                    }
                }
                return Self::chain(head, tail);
            }
            Self::Power(base, power) => {
                let base = base.optimize();
                let power = power.optimize();
                if let (Some(base), Some(power)) = (base.value(), power.value()) {
                    return Self::Number(Op::Exp.apply(base, power));
                }
                return Self::power(base, power);
            }
        }
    }

    /// How tightly this node holds together when printed
    fn binding(&self) -> u8 {
        match *self {
            Ast::Number(_) | Ast::Variable | Ast::Call(..) => 10,
            Ast::Power(..) => 4,
            Ast::Neg(_) => 3,
            Ast::Chain(_, ref rest) => rest.first().map_or(10, |&(op, _)| op.precedence()),
        }
    }

    fn fmt_operand(&self, fmt: &mut Formatter, min_binding: u8) -> fmt::Result {
        if self.binding() < min_binding {
            write!(fmt, "({})", self)
        } else {
            write!(fmt, "{}", self)
        }
    }
}

/// Formulas are printed with the fewest parenthesis needed to read them back
/// with `Syntax::extended()`.
impl Display for Ast {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        match *self {
            Ast::Number(value) => write!(fmt, "{}", value),
            Ast::Variable => fmt.write_str("x"),
            Ast::Call(function, ref arg) => write!(fmt, "{}({})", function, arg),
            Ast::Neg(ref operand) => {
                let operand = if operand.binding() < self.binding() {
                    format!("({})", operand)
                } else {
                    operand.to_string()
                };
                // `-3` would read back as a literal, which binds tighter
                if operand.starts_with(|c: char| c.is_ascii_digit()) {
                    write!(fmt, "- {}", operand)
                } else {
                    write!(fmt, "-{}", operand)
                }
            }
            Ast::Chain(ref first, ref rest) => {
                // a chain as first operand only comes from a group
                let min_binding = self.binding() + 1;
                first.fmt_operand(fmt, min_binding)?;
                for &(op, ref operand) in rest {
                    write!(fmt, " {} ", op)?;
                    operand.fmt_operand(fmt, min_binding)?;
                }
                Ok(())
            }
            Ast::Power(ref base, ref power) => {
                // right grouping: a^b^c is a^(b^c)
                let binding = self.binding();
                base.fmt_operand(fmt, binding + 1)?;
                write!(fmt, " {} ", Op::Exp)?;
                power.fmt_operand(fmt, binding - 1)
            }
        }
    }
}
