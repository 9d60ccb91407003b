//! Small analytic solutions, used by the tests and benchmarks.

use nalgebra::DVector;

use crate::{
    error::{EvaluationError, PdeSolError},
    evaluation_error,
    scalar::Scalar,
    Domain,
};

pub mod heat1d;
pub mod poisson1d;

/// Position of the sample in `samples` that matches `x` up to rounding, if any.
pub(crate) fn find_sample<T: Scalar>(samples: impl IntoIterator<Item = T>, x: T) -> Option<usize> {
    let scale = if x < T::zero() { T::one() - x } else { T::one() + x };
    let tol = T::EPSILON * T::from(16.0) * scale;
    samples.into_iter().position(|s| {
        let diff = if s > x { s - x } else { x - s };
        diff <= tol
    })
}

/// Grid points of a solution with a single gridded independent variable, checked against the point `x`.
pub(crate) fn grid_1d<'a, T: Scalar>(
    domains: &'a [Domain<T>],
    x: &DVector<T>,
) -> Result<&'a DVector<T>, PdeSolError> {
    if x.len() != domains.len() {
        return Err(PdeSolError::from(EvaluationError::PointDimensionMismatch {
            expected: domains.len(),
            found: x.len(),
        }));
    }
    match domains {
        [domain] => domain
            .points()
            .ok_or(PdeSolError::from(EvaluationError::OutOfDomain)),
        _ => Err(evaluation_error!(
            Other,
            format!("expected one independent variable, found {}", domains.len())
        )),
    }
}
