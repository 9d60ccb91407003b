use std::f64::consts::PI;

use nalgebra::{DMatrix, DVector};
use ndarray::Array2;

use crate::{
    error::{EvaluationError, PdeSolError},
    interpolant::Interpolant,
    metadata::{DiscretizationMetadata, TimeAxis},
    status::SolverStats,
    Domain, PdeSolutionBuilder, PdeTimeSeriesSolution,
};

use super::{find_sample, grid_1d};

/// Finite difference discretization of the heat equation on `nx` points of [0, 1].
#[derive(Clone, Debug, PartialEq)]
pub struct Heat1dMetadata {
    pub nx: usize,
}

#[derive(Clone, Debug)]
pub struct Heat1dProblem {
    pub diffusivity: f64,
}

impl DiscretizationMetadata<f64> for Heat1dMetadata {
    const TIME_AXIS: TimeAxis = TimeAxis::Present;

    // only exact grid points and stored times can be evaluated
    fn evaluate_time_series<S, P, A, I: Interpolant>(
        sol: &PdeTimeSeriesSolution<f64, Self, S, P, A, I>,
        x: &DVector<f64>,
        t: f64,
    ) -> Result<DVector<f64>, PdeSolError> {
        let points = grid_1d(sol.domains(), x)?;
        let j = find_sample(points.iter().copied(), x[0]).ok_or(EvaluationError::OutOfDomain)?;
        let i = find_sample(sol.times().iter().copied(), t).ok_or(EvaluationError::OutOfDomain)?;
        Ok(DVector::from_iterator(
            sol.dependent_vars().len(),
            sol.dependent_vars().iter().map(|dv| sol[dv.as_str()][[i, j]]),
        ))
    }
}

/// u_t = u_xx with u(0, x) = sin(pi x) and zero boundaries, sampled on `nx` points and `nt` times in [0, 0.1].
///
/// The raw output is laid out the way a method-of-lines solver returns it, one column per time point.
#[allow(clippy::type_complexity)]
pub fn heat1d_solution(
    nx: usize,
    nt: usize,
) -> PdeTimeSeriesSolution<f64, Heat1dMetadata, DMatrix<f64>, Heat1dProblem, &'static str> {
    let problem = Heat1dProblem { diffusivity: 1.0 };
    let domain = Domain::uniform_grid(0.0, 1.0, nx);
    let x: Vec<f64> = domain.points().map(|p| p.iter().copied().collect()).unwrap_or_default();
    let dt = if nt > 1 { 0.1 / (nt - 1) as f64 } else { 0.0 };
    let times: Vec<f64> = (0..nt).map(|i| dt * i as f64).collect();

    let k = problem.diffusivity;
    let u = Array2::from_shape_fn((nt, nx), |(i, j)| {
        (-k * PI * PI * times[i]).exp() * (PI * x[j]).sin()
    });
    let raw = DMatrix::from_fn(nx, nt, |j, i| u[[i, j]]);
    let stats = SolverStats {
        nf: nt.saturating_sub(1),
        naccept: nt.saturating_sub(1),
        ..Default::default()
    };

    PdeSolutionBuilder::new()
        .raw(raw)
        .problem(problem)
        .algorithm("analytic")
        .times(times)
        .independent_var("x", domain)
        .field("u", u.into_dyn())
        .stats(stats)
        .build_time_series(Heat1dMetadata { nx })
        .expect("heat1d fields match their domains")
}
