use std::fmt;

use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use crate::{
    error::{PdeSolError, SolutionError},
    scalar::Scalar,
    solution_error,
};

/// The domain of a single independent variable.
///
/// A discretizer either samples the variable on a set of grid points, in which case the matching axis of every
/// solution array has one entry per point, or describes it as a continuous interval (e.g. a spectral
/// discretization), in which case the matching axis can have any non-zero length.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Domain<T: Scalar> {
    Grid(DVector<T>),
    Interval { lower: T, upper: T },
}

impl<T: Scalar> Domain<T> {
    pub fn grid(points: impl IntoIterator<Item = T>) -> Self {
        Self::Grid(DVector::from_vec(points.into_iter().collect()))
    }

    pub fn interval(lower: T, upper: T) -> Self {
        Self::Interval { lower, upper }
    }

    /// A grid of `n` equally spaced points from `lower` to `upper` (inclusive).
    pub fn uniform_grid(lower: T, upper: T, n: usize) -> Self {
        if n < 2 {
            return Self::grid(std::iter::repeat(lower).take(n));
        }
        let dx = (upper - lower) / T::from((n - 1) as f64);
        Self::grid((0..n).map(|i| lower + dx * T::from(i as f64)))
    }

    /// Number of grid points, or `None` for an interval.
    pub fn len(&self) -> Option<usize> {
        match self {
            Domain::Grid(points) => Some(points.len()),
            Domain::Interval { .. } => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == Some(0)
    }

    pub fn is_grid(&self) -> bool {
        matches!(self, Domain::Grid(_))
    }

    pub fn points(&self) -> Option<&DVector<T>> {
        match self {
            Domain::Grid(points) => Some(points),
            Domain::Interval { .. } => None,
        }
    }

    /// Smallest and largest coordinate of the domain.
    pub fn bounds(&self) -> Option<(T, T)> {
        match self {
            Domain::Grid(points) => {
                let first = *points.iter().next()?;
                Some(points.iter().fold((first, first), |(lo, hi), &p| {
                    (if p < lo { p } else { lo }, if p > hi { p } else { hi })
                }))
            }
            Domain::Interval { lower, upper } => Some((*lower, *upper)),
        }
    }

    pub(crate) fn validate(&self, name: &str) -> Result<(), PdeSolError> {
        if let Domain::Interval { lower, upper } = self {
            if lower.is_nan() || upper.is_nan() || lower > upper {
                return Err(solution_error!(InvalidInterval, name.to_string()));
            }
        }
        Ok(())
    }
}

/// Extent each domain imposes on its axis, `None` meaning any non-zero extent.
pub fn shape<T: Scalar>(domains: &[Domain<T>]) -> Vec<Option<usize>> {
    domains.iter().map(Domain::len).collect()
}

impl<T: Scalar> fmt::Display for Domain<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Domain::Grid(points) => {
                write!(f, "[")?;
                for (i, p) in points.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", p)?;
                }
                write!(f, "]")
            }
            Domain::Interval { lower, upper } => write!(f, "Interval({}, {})", lower, upper),
        }
    }
}
