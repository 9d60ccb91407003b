use nalgebra::DVector;
use ndarray::Array1;

use crate::{
    error::{EvaluationError, PdeSolError},
    interpolant::Interpolant,
    metadata::{DiscretizationMetadata, TimeAxis},
    status::SolverStats,
    Domain, PdeNoTimeSolution, PdeSolutionBuilder,
};

use super::{find_sample, grid_1d};

/// Collocation on a uniform grid, for the steady problem -u'' = 1 on [0, 1] with u(0) = u(1) = 0.
#[derive(Clone, Debug, PartialEq)]
pub struct Poisson1dMetadata;

impl DiscretizationMetadata<f64> for Poisson1dMetadata {
    const TIME_AXIS: TimeAxis = TimeAxis::Absent;

    fn evaluate_no_time<S, P, A, I: Interpolant>(
        sol: &PdeNoTimeSolution<f64, Self, S, P, A, I>,
        x: &DVector<f64>,
    ) -> Result<DVector<f64>, PdeSolError> {
        let points = grid_1d(sol.domains(), x)?;
        let j = find_sample(points.iter().copied(), x[0]).ok_or(EvaluationError::OutOfDomain)?;
        Ok(DVector::from_iterator(
            sol.dependent_vars().len(),
            sol.dependent_vars().iter().map(|dv| sol[dv.as_str()][[j]]),
        ))
    }
}

/// u(x) = x (1 - x) / 2 sampled on `n` points, the raw output is the solution vector of the linear system.
pub fn poisson1d_solution(n: usize) -> PdeNoTimeSolution<f64, Poisson1dMetadata, DVector<f64>> {
    let domain = Domain::uniform_grid(0.0, 1.0, n);
    let raw = domain
        .points()
        .map(|x| x.map(|x| 0.5 * x * (1.0 - x)))
        .unwrap_or_else(|| DVector::zeros(0));
    let u = Array1::from_iter(raw.iter().copied());
    let stats = SolverStats {
        nsolve: 1,
        nnonliniter: 1,
        ..Default::default()
    };
    PdeSolutionBuilder::new()
        .raw(raw)
        .independent_var("x", domain)
        .field("u", u.into_dyn())
        .stats(stats)
        .build_no_time(Poisson1dMetadata)
        .expect("poisson1d fields match their domains")
}
