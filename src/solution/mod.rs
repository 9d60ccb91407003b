use std::fmt;

use nalgebra::DVector;
use ndarray::ArrayD;

use crate::{
    domain::Domain,
    error::{EvaluationError, PdeSolError},
    evaluation_error,
    interpolant::{Interpolant, NoInterpolant},
    metadata::{DiscretizationMetadata, TimeAxis},
    scalar::Scalar,
    status::{ReturnCode, SolverStats},
};

pub mod builder;
pub mod fields;
pub mod no_time;
pub mod time_series;

pub use builder::PdeSolutionBuilder;
pub use fields::FieldMap;
pub use no_time::PdeNoTimeSolution;
pub use time_series::PdeTimeSeriesSolution;

/// A PDE solution of either shape, as selected by the discretization metadata (see [PdeSolutionBuilder::build]).
///
/// Accessors for the fields both shapes share are available directly, use [Self::as_time_series] or
/// [Self::as_no_time] for the rest (e.g. times and error estimates only exist on a time series).
#[derive(Clone, Debug)]
pub enum PdeSolution<T, D, S = (), P = (), A = (), I = NoInterpolant>
where
    T: Scalar,
    D: DiscretizationMetadata<T>,
    I: Interpolant,
{
    TimeSeries(PdeTimeSeriesSolution<T, D, S, P, A, I>),
    NoTime(PdeNoTimeSolution<T, D, S, P, A, I>),
}

macro_rules! shared_accessor {
    ($(#[$attr:meta])* $name:ident -> $ret:ty) => {
        $(#[$attr])*
        pub fn $name(&self) -> $ret {
            match self {
                PdeSolution::TimeSeries(sol) => sol.$name(),
                PdeSolution::NoTime(sol) => sol.$name(),
            }
        }
    };
}

impl<T, D, S, P, A, I> PdeSolution<T, D, S, P, A, I>
where
    T: Scalar,
    D: DiscretizationMetadata<T>,
    I: Interpolant,
{
    pub fn time_axis(&self) -> TimeAxis {
        match self {
            PdeSolution::TimeSeries(_) => TimeAxis::Present,
            PdeSolution::NoTime(_) => TimeAxis::Absent,
        }
    }

    pub fn is_time_series(&self) -> bool {
        matches!(self, PdeSolution::TimeSeries(_))
    }

    pub fn as_time_series(&self) -> Option<&PdeTimeSeriesSolution<T, D, S, P, A, I>> {
        match self {
            PdeSolution::TimeSeries(sol) => Some(sol),
            PdeSolution::NoTime(_) => None,
        }
    }

    pub fn as_no_time(&self) -> Option<&PdeNoTimeSolution<T, D, S, P, A, I>> {
        match self {
            PdeSolution::TimeSeries(_) => None,
            PdeSolution::NoTime(sol) => Some(sol),
        }
    }

    pub fn into_time_series(self) -> Option<PdeTimeSeriesSolution<T, D, S, P, A, I>> {
        match self {
            PdeSolution::TimeSeries(sol) => Some(sol),
            PdeSolution::NoTime(_) => None,
        }
    }

    pub fn into_no_time(self) -> Option<PdeNoTimeSolution<T, D, S, P, A, I>> {
        match self {
            PdeSolution::TimeSeries(_) => None,
            PdeSolution::NoTime(sol) => Some(sol),
        }
    }

    /// Time points, `None` for a time-independent solution.
    pub fn times(&self) -> Option<&[T]> {
        self.as_time_series().map(|sol| sol.times())
    }

    shared_accessor!(values -> &FieldMap<T>);
    shared_accessor!(raw -> &S);
    shared_accessor!(domains -> &[Domain<T>]);
    shared_accessor!(independent_vars -> &[String]);
    shared_accessor!(dependent_vars -> &[String]);
    shared_accessor!(metadata -> &D);
    shared_accessor!(problem -> &P);
    shared_accessor!(algorithm -> &A);
    shared_accessor!(interpolant -> &I);
    shared_accessor!(retcode -> ReturnCode);
    shared_accessor!(stats -> &SolverStats);

    pub fn get(&self, dependent_var: &str) -> Option<&ArrayD<T>> {
        self.values().get(dependent_var)
    }

    pub fn domain_of(&self, independent_var: &str) -> Option<&Domain<T>> {
        match self {
            PdeSolution::TimeSeries(sol) => sol.domain_of(independent_var),
            PdeSolution::NoTime(sol) => sol.domain_of(independent_var),
        }
    }

    /// Evaluate the solution at the spatial point `x`. A time series solution needs a time `t`, for a
    /// time-independent solution `t` is ignored.
    pub fn evaluate(&self, x: &DVector<T>, t: Option<T>) -> Result<DVector<T>, PdeSolError> {
        match self {
            PdeSolution::TimeSeries(sol) => match t {
                Some(t) => sol.evaluate(x, t),
                None => Err(evaluation_error!(MissingTime)),
            },
            PdeSolution::NoTime(sol) => sol.evaluate(x),
        }
    }
}

impl<T, D, S, P, A, I> From<PdeTimeSeriesSolution<T, D, S, P, A, I>> for PdeSolution<T, D, S, P, A, I>
where
    T: Scalar,
    D: DiscretizationMetadata<T>,
    I: Interpolant,
{
    fn from(sol: PdeTimeSeriesSolution<T, D, S, P, A, I>) -> Self {
        PdeSolution::TimeSeries(sol)
    }
}

impl<T, D, S, P, A, I> From<PdeNoTimeSolution<T, D, S, P, A, I>> for PdeSolution<T, D, S, P, A, I>
where
    T: Scalar,
    D: DiscretizationMetadata<T>,
    I: Interpolant,
{
    fn from(sol: PdeNoTimeSolution<T, D, S, P, A, I>) -> Self {
        PdeSolution::NoTime(sol)
    }
}

impl<T, D, S, P, A, I> fmt::Display for PdeSolution<T, D, S, P, A, I>
where
    T: Scalar,
    D: DiscretizationMetadata<T>,
    I: Interpolant,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PdeSolution::TimeSeries(sol) => fmt::Display::fmt(sol, f),
            PdeSolution::NoTime(sol) => fmt::Display::fmt(sol, f),
        }
    }
}
