use crate::error::Error;
use crate::expr::Expr;
use crate::sample::Curve;

/// A native function shown under a display name
#[derive(Debug, Clone, Copy)]
pub struct NamedFunction {
    /// Label shown in the menu
    pub name: &'static str,
    /// The function itself
    pub function: fn(f64) -> f64,
}

impl Curve for NamedFunction {
    fn eval(&self, x: f64) -> f64 {
        (self.function)(x)
    }
}

/// An immutable, ordered list of named functions that can be plotted
/// without going through the parser.
#[derive(Debug, Clone, Default)]
pub struct Catalogue {
    entries: Vec<NamedFunction>,
}

macro_rules! named {
    ($($name: expr => $function: expr,)*) => {
        vec![$(NamedFunction { name: $name, function: $function },)*]
    };
}

lazy_static! {
    static ref BUILTIN: Catalogue = Catalogue::new(named! {
        "sin(x)" => f64::sin,
        "cos(x)" => f64::cos,
        "tan(x)" => f64::tan,
        "x^2" => |x| x * x,
        "x^3" => |x| x * x * x,
        "sqrt(x)" => f64::sqrt,
        "log(x)" => |x| if x > 0.0 { x.ln() } else { 0.0 },
        "exp(x)" => f64::exp,
        "1/(x+1)" => |x| 1.0 / (x + 1.0),
        "e^x" => f64::exp,
        "x^2 + 2x + 1" => |x| x * x + 2.0 * x + 1.0,
        "sin(x) + cos(x)" => |x| x.sin() + x.cos(),
        "x^2 * sin(x)" => |x| x * x * x.sin(),
        "cos(x) / x" => |x| if x == 0.0 { 0.0 } else { x.cos() / x },
        "sin(x) / x" => |x| if x == 0.0 { 0.0 } else { x.sin() / x },
        "log(x + 1)" => |x| (x + 1.0).ln(),
        "x * exp(x)" => |x| x * x.exp(),
        "x * cos(x)" => |x| x * x.cos(),
        "1 / x" => |x| if x == 0.0 { 0.0 } else { 1.0 / x },
        "x^3 - x^2" => |x| x * x * x - x * x,
        "tan(x) / x" => |x| if x == 0.0 { 0.0 } else { x.tan() / x },
        "x^4" => |x| x * x * x * x,
        "sin(x^2)" => |x| (x * x).sin(),
        "cos(x^2)" => |x| (x * x).cos(),
        "x / (x + 1)" => |x| x / (x + 1.0),
        "x^2 / 10" => |x| x * x / 10.0,
        "1 - x^2" => |x| 1.0 - x * x,
        "x^3 - 3x^2 + 2x" => |x| x * x * x - 3.0 * x * x + 2.0 * x,
        "sin(2x)" => |x| (2.0 * x).sin(),
        "cos(2x)" => |x| (2.0 * x).cos(),
        "e^(-x^2)" => |x| (-x * x).exp(),
        "x * log(x)" => |x| x * x.ln(),
        "x^2 + x + 1" => |x| x * x + x + 1.0,
        "x^3 + x^2 + x + 1" => |x| x * x * x + x * x + x + 1.0,
        "x^2 - 2x + 1" => |x| x * x - 2.0 * x + 1.0,
        "1 / (x^2 + 1)" => |x| 1.0 / (x * x + 1.0),
        "x^2 / (x + 1)" => |x| x * x / (x + 1.0),
        "log(x^2)" => |x| (x * x).ln(),
        "x^2 + 1 / x^2" => |x| x * x + 1.0 / (x * x),
        "log(x) / x" => |x| x.ln() / x,
        "x^3 - 5x + 2" => |x| x * x * x - 5.0 * x + 2.0,
        "x^2 * cos(x)" => |x| x * x * x.cos(),
        "x^2 * e^x" => |x| x * x * x.exp(),
        "x * log(x + 1)" => |x| x * (x + 1.0).ln(),
        "e^(x + 1)" => |x| (x + 1.0).exp(),
        "e^x / x" => |x| x.exp() / x,
        "x * tan(x)" => |x| x * x.tan(),
        "cos(x) + sin(x)" => |x| x.cos() + x.sin(),
        "log(x + 1) / x" => |x| (x + 1.0).ln() / x,
        "exp(-x)" => |x| (-x).exp(),
        "x^2 - 2x" => |x| x * x - 2.0 * x,
        "x * log(1 + x)" => |x| x * (1.0 + x).ln(),
        "log(x) + 1" => |x| x.ln() + 1.0,
        "sin(x) * cos(x)" => |x| x.sin() * x.cos(),
        "sin(x + 1)" => |x| (x + 1.0).sin(),
        "e^(2x)" => |x| (2.0 * x).exp(),
        "x * e^(x + 1)" => |x| x * (x + 1.0).exp(),
        "log(x + 2)" => |x| (x + 2.0).ln(),
        "cos(x + 1)" => |x| (x + 1.0).cos(),
        "sin(x) - cos(x)" => |x| x.sin() - x.cos(),
        "x * cos(x) / x" => f64::cos,
        "tan(x) - x" => |x| x.tan() - x,
        "sin(x + 1) / x" => |x| (x + 1.0).sin() / x,
    });
}

impl Catalogue {
    /// Build a catalogue. When two entries share a name, the first one wins
    /// and the later ones are dropped.
    pub fn new(entries: Vec<NamedFunction>) -> Catalogue {
        let mut unique: Vec<NamedFunction> = Vec::with_capacity(entries.len());
        for entry in entries {
            if unique.iter().all(|kept| kept.name != entry.name) {
                unique.push(entry);
            }
        }
        Catalogue { entries: unique }
    }

    /// The famous functions offered by the plotter, in menu order
    pub fn builtin() -> &'static Catalogue {
        &BUILTIN
    }

    /// Find the entry with the given display name
    pub fn get(&self, name: &str) -> Option<&NamedFunction> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// Entries in menu order
    pub fn iter(&self) -> impl Iterator<Item = &NamedFunction> {
        self.entries.iter()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there is no entry at all
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// What the plotter draws: a catalogue entry, or a parsed formula when no
/// entry is selected.
#[derive(Debug, Clone)]
pub enum Selection<'a> {
    /// An entry of a catalogue
    Catalogue(&'a NamedFunction),
    /// A formula typed by the user
    Formula(Expr),
}

impl<'a> Selection<'a> {
    /// Use the catalogue entry named `selected` if there is one, otherwise
    /// parse `formula`.
    ///
    /// ```
    /// # use plotexpr::{Catalogue, Selection};
    /// let catalogue = Catalogue::builtin();
    /// let plotted = Selection::resolve(catalogue, Some("x^2"), "x*x*x").unwrap();
    /// assert_eq!(plotted.name(), "x^2");
    ///
    /// let plotted = Selection::resolve(catalogue, None, "x*x*x").unwrap();
    /// assert_eq!(plotted.name(), "x*x*x");
    /// ```
    pub fn resolve(
        catalogue: &'a Catalogue,
        selected: Option<&str>,
        formula: &str,
    ) -> Result<Selection<'a>, Error> {
        match selected.and_then(|name| catalogue.get(name)) {
            Some(entry) => Ok(Selection::Catalogue(entry)),
            None => Expr::parse(formula).map(Selection::Formula),
        }
    }

    /// Label to show next to the plot
    pub fn name(&self) -> &str {
        match self {
            Selection::Catalogue(entry) => entry.name,
            Selection::Formula(expr) => expr.formula(),
        }
    }
}

impl<'a> Curve for Selection<'a> {
    fn eval(&self, x: f64) -> f64 {
        match self {
            Selection::Catalogue(entry) => entry.eval(x),
            Selection::Formula(expr) => expr.eval(x),
        }
    }
}
