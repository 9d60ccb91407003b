use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use crate::{
    error::{EvaluationError, PdeSolError},
    interpolant::{short_type_name, Interpolant},
    scalar::Scalar,
    PdeNoTimeSolution, PdeTimeSeriesSolution,
};

/// Whether the solutions produced by a discretization have a time axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeAxis {
    /// Time-dependent problem, the solution is a trajectory ([PdeTimeSeriesSolution]).
    Present,
    /// Steady-state or root-finding problem ([PdeNoTimeSolution]).
    Absent,
}

/// Description of how a PDE was discretized, attached to every solution the discretizer produces.
///
/// The metadata type identifies the discretization scheme. It selects the solution variant through [Self::TIME_AXIS]
/// and provides the evaluation of a solution at arbitrary points. Discretizers that can evaluate their solutions
/// override [Self::evaluate_time_series] and/or [Self::evaluate_no_time]; the default implementations always fail
/// with [EvaluationError::NotImplemented].
///
/// # Example
///
/// ```
/// use nalgebra::DVector;
/// use pdesol::{
///     DiscretizationMetadata, Domain, Interpolant, PdeSolError, PdeSolutionBuilder,
///     PdeTimeSeriesSolution, TimeAxis,
/// };
///
/// struct FiniteDifference;
///
/// impl DiscretizationMetadata<f64> for FiniteDifference {
///     const TIME_AXIS: TimeAxis = TimeAxis::Present;
///
///     // piecewise constant in time, evaluates the first grid point of each field
///     fn evaluate_time_series<S, P, A, I: Interpolant>(
///         sol: &PdeTimeSeriesSolution<f64, Self, S, P, A, I>,
///         _x: &DVector<f64>,
///         t: f64,
///     ) -> Result<DVector<f64>, PdeSolError> {
///         let i = sol.times().iter().rposition(|&ti| ti <= t).unwrap_or(0);
///         Ok(DVector::from_iterator(
///             sol.dependent_vars().len(),
///             sol.dependent_vars().iter().map(|dv| sol[dv.as_str()][[i, 0]]),
///         ))
///     }
/// }
///
/// let sol = PdeSolutionBuilder::new()
///     .times([0.0, 1.0])
///     .independent_var("x", Domain::grid([0.0, 1.0]))
///     .field("u", ndarray::arr2(&[[1.0, 2.0], [3.0, 4.0]]).into_dyn())
///     .build_time_series(FiniteDifference)
///     .unwrap();
/// let u = sol.evaluate(&DVector::from_element(1, 0.5), 1.5).unwrap();
/// assert_eq!(u[0], 3.0);
/// ```
pub trait DiscretizationMetadata<T: Scalar>: Sized {
    /// Whether solutions produced with this metadata have a time axis.
    const TIME_AXIS: TimeAxis;

    /// Display name used in error messages next to the type name, by default the type name without module path.
    fn name(&self) -> String {
        short_type_name::<Self>()
    }

    /// Evaluate a time series solution at the spatial point `x` and time `t`, returning one value per dependent
    /// variable (in the order of [PdeTimeSeriesSolution::dependent_vars]).
    fn evaluate_time_series<S, P, A, I: Interpolant>(
        sol: &PdeTimeSeriesSolution<T, Self, S, P, A, I>,
        x: &DVector<T>,
        t: T,
    ) -> Result<DVector<T>, PdeSolError> {
        let _ = (x, t);
        Err(not_implemented(sol.metadata()))
    }

    /// Evaluate a time-independent solution at the spatial point `x`, returning one value per dependent variable (in
    /// the order of [PdeNoTimeSolution::dependent_vars]).
    fn evaluate_no_time<S, P, A, I: Interpolant>(
        sol: &PdeNoTimeSolution<T, Self, S, P, A, I>,
        x: &DVector<T>,
    ) -> Result<DVector<T>, PdeSolError> {
        let _ = x;
        Err(not_implemented(sol.metadata()))
    }
}

fn not_implemented<T: Scalar, D: DiscretizationMetadata<T>>(metadata: &D) -> PdeSolError {
    let metadata = metadata.name();
    let type_name = short_type_name::<D>();
    log::debug!("no evaluation implemented for metadata {} ({})", metadata, type_name);
    PdeSolError::from(EvaluationError::NotImplemented {
        metadata,
        type_name,
    })
}
