use crate::expr::Expr;

/// Anything that maps `x` to `y` and can be plotted
pub trait Curve {
    /// Get `y` for the given `x`
    fn eval(&self, x: f64) -> f64;
}

impl Curve for Expr {
    fn eval(&self, x: f64) -> f64 {
        Expr::eval(self, x)
    }
}

impl<F> Curve for F
where
    F: Fn(f64) -> f64,
{
    fn eval(&self, x: f64) -> f64 {
        self(x)
    }
}

/// A closed interval sampled at a fixed step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain {
    start: f64,
    end: f64,
    step: f64,
}

impl Default for Domain {
    /// `[-100, 100]` every `0.001`
    fn default() -> Self {
        Domain {
            start: -100.0,
            end: 100.0,
            step: 0.001,
        }
    }
}

impl Domain {
    /// Create a new domain. Returns `None` unless the bounds are finite and
    /// ordered, the step is finite and positive, and the number of points
    /// fits in a `usize`.
    #[allow(clippy::cast_precision_loss)]
    pub fn new(start: f64, end: f64, step: f64) -> Option<Domain> {
        let valid = start.is_finite()
            && end.is_finite()
            && start <= end
            && step.is_finite()
            && step > 0.0
            && intervals(start, end, step) < usize::MAX as f64;
        if valid {
            Some(Domain { start, end, step })
        } else {
            None
        }
    }

    /// First sample point
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Upper bound of the sample points
    pub fn end(&self) -> f64 {
        self.end
    }

    /// Distance between two sample points
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Number of sample points, never zero
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::len_without_is_empty
    )]
    pub fn len(&self) -> usize {
        intervals(self.start, self.end, self.step) as usize + 1
    }

    /// The sample points, computed as `start + i * step` so that rounding
    /// errors do not pile up along the interval.
    #[allow(clippy::cast_precision_loss)]
    pub fn points(&self) -> impl Iterator<Item = f64> {
        let Domain { start, end, step } = *self;
        (0..self.len()).map(move |i| (start + i as f64 * step).min(end))
    }
}

/// Number of steps between the first and the last point, `inf` or `NaN` when
/// the width overflows
fn intervals(start: f64, end: f64, step: f64) -> f64 {
    // the small slack keeps `end` when the width is a multiple of `step`
    ((end - start) / step + 1e-9).floor()
}

/// Evaluate `curve` at every point of `domain`, yielding `(x, y)` pairs.
///
/// Non-finite values are kept, see [`finite`](fn.finite.html).
///
/// ```
/// # use plotexpr::{sample, Domain, Expr};
/// let expr = Expr::parse("x * x").unwrap();
/// let domain = Domain::new(0.0, 2.0, 0.5).unwrap();
/// let points: Vec<_> = sample(&expr, domain).collect();
/// assert_eq!(points, [(0.0, 0.0), (0.5, 0.25), (1.0, 1.0), (1.5, 2.25), (2.0, 4.0)]);
/// ```
pub fn sample<'a, C>(curve: &'a C, domain: Domain) -> impl Iterator<Item = (f64, f64)> + 'a
where
    C: Curve + ?Sized,
{
    domain.points().map(move |x| (x, curve.eval(x)))
}

/// Drop the samples a renderer can not draw
pub fn finite<I>(samples: I) -> impl Iterator<Item = (f64, f64)>
where
    I: IntoIterator<Item = (f64, f64)>,
{
    samples
        .into_iter()
        .filter(|&(x, y)| x.is_finite() && y.is_finite())
}

#[cfg(test)]
mod tests {
    use super::{finite, sample, Curve, Domain};
    use crate::expr::Expr;
    use approx::assert_relative_eq;

    #[test]
    fn default_domain() {
        let domain = Domain::default();
        assert_eq!(domain.len(), 200_001);
        let points: Vec<_> = domain.points().collect();
        assert_eq!(points[0], -100.0);
        assert_eq!(*points.last().unwrap(), 100.0);
        assert_relative_eq!(points[100_000], 0.0, epsilon = 1e-9);
    }

    #[test]
    fn invalid_domains() {
        assert!(Domain::new(1.0, 0.0, 0.1).is_none());
        assert!(Domain::new(0.0, 1.0, 0.0).is_none());
        assert!(Domain::new(0.0, 1.0, -0.1).is_none());
        assert!(Domain::new(std::f64::NEG_INFINITY, 1.0, 0.1).is_none());
        assert!(Domain::new(0.0, 1.0, std::f64::NAN).is_none());
    }

    #[test]
    fn point_count_must_fit() {
        assert!(Domain::new(-1e300, 1e300, 1e-300).is_none());
        assert!(Domain::new(-1e308, 1e308, 1.0).is_none());
        assert!(Domain::new(0.0, 1e30, 1.0).is_none());

        let domain = Domain::new(0.0, 1e9, 1.0).unwrap();
        assert_eq!(domain.len(), 1_000_000_001);
    }

    #[test]
    fn single_point() {
        let domain = Domain::new(2.0, 2.0, 1.0).unwrap();
        assert_eq!(domain.points().collect::<Vec<_>>(), [2.0]);

        let domain = Domain::new(0.0, 1.0, 10.0).unwrap();
        assert_eq!(domain.len(), 1);
    }

    #[test]
    fn points_do_not_drift() {
        let domain = Domain::new(0.0, 1.0, 0.1).unwrap();
        let points: Vec<_> = domain.points().collect();
        assert_eq!(points.len(), 11);
        assert_eq!(points[10], 1.0);
        assert_relative_eq!(points[3], 0.3, epsilon = 1e-12);
    }

    #[test]
    fn samples_keep_non_finite_values() {
        let expr = Expr::parse("1 / x").unwrap();
        let domain = Domain::new(-1.0, 1.0, 1.0).unwrap();
        let samples: Vec<_> = sample(&expr, domain).collect();
        assert_eq!(samples.len(), 3);
        assert_eq!(samples[1], (0.0, std::f64::INFINITY));

        let drawable: Vec<_> = finite(samples).collect();
        assert_eq!(drawable, [(-1.0, -1.0), (1.0, 1.0)]);
    }

    #[test]
    fn closures_are_curves() {
        let square = |x: f64| x * x;
        assert_eq!(Curve::eval(&square, 3.0), 9.0);
        let domain = Domain::new(0.0, 1.0, 1.0).unwrap();
        assert_eq!(sample(&square, domain).count(), 2);
    }
}
