use std::{fmt, ops::Index};

use nalgebra::DVector;
use ndarray::{ArrayD, ArrayViewD, Axis};

use crate::{
    domain::Domain,
    error::PdeSolError,
    interpolant::{Interpolant, NoInterpolant},
    scalar::Scalar,
    status::{ReturnCode, SolverStats},
    DiscretizationMetadata,
};

use super::fields::{write_fields, FieldMap, List};

/// Solution of a time-dependent PDE, sampled at a sequence of times.
///
/// Every array in [Self::values] has time as its leading axis (one entry per element of [Self::times]) followed by one
/// axis per independent variable, in the order of [Self::independent_vars] / [Self::domains].
///
/// Solutions are built by discretizers using [crate::PdeSolutionBuilder], which checks these shape invariants, and
/// are immutable afterwards.
///
/// # Type parameters
///
/// - `T`: element type of values, times and grid points
/// - `D`: discretization metadata, selects the evaluation behaviour (see [DiscretizationMetadata])
/// - `S`: the raw result of the underlying numerical solve
/// - `P`: the numerical problem that was solved
/// - `A`: the algorithm used to solve it
/// - `I`: the interpolant built by the discretizer
#[derive(Clone, Debug)]
pub struct PdeTimeSeriesSolution<T, D, S = (), P = (), A = (), I = NoInterpolant>
where
    T: Scalar,
    D: DiscretizationMetadata<T>,
    I: Interpolant,
{
    pub(super) values: FieldMap<T>,
    pub(super) raw: S,
    pub(super) errors: Option<FieldMap<T>>,
    pub(super) times: Vec<T>,
    pub(super) domains: Vec<Domain<T>>,
    pub(super) independent_vars: Vec<String>,
    pub(super) dependent_vars: Vec<String>,
    pub(super) metadata: D,
    pub(super) problem: P,
    pub(super) algorithm: A,
    pub(super) interpolant: I,
    pub(super) dense: bool,
    pub(super) current_index: usize,
    pub(super) retcode: ReturnCode,
    pub(super) stats: SolverStats,
}

impl<T, D, S, P, A, I> PdeTimeSeriesSolution<T, D, S, P, A, I>
where
    T: Scalar,
    D: DiscretizationMetadata<T>,
    I: Interpolant,
{
    /// Solution arrays, keyed by dependent variable.
    pub fn values(&self) -> &FieldMap<T> {
        &self.values
    }

    pub fn get(&self, dependent_var: &str) -> Option<&ArrayD<T>> {
        self.values.get(dependent_var)
    }

    /// The result of the underlying numerical solve.
    pub fn raw(&self) -> &S {
        &self.raw
    }

    pub fn into_raw(self) -> S {
        self.raw
    }

    /// Error estimates, if the discretizer computed them.
    pub fn errors(&self) -> Option<&FieldMap<T>> {
        self.errors.as_ref()
    }

    pub fn error(&self, dependent_var: &str) -> Option<&ArrayD<T>> {
        self.errors.as_ref()?.get(dependent_var)
    }

    pub fn times(&self) -> &[T] {
        &self.times
    }

    pub fn domains(&self) -> &[Domain<T>] {
        &self.domains
    }

    /// Domain of the independent variable `independent_var`.
    pub fn domain_of(&self, independent_var: &str) -> Option<&Domain<T>> {
        let i = self
            .independent_vars
            .iter()
            .position(|iv| iv == independent_var)?;
        self.domains.get(i)
    }

    pub fn independent_vars(&self) -> &[String] {
        &self.independent_vars
    }

    pub fn dependent_vars(&self) -> &[String] {
        &self.dependent_vars
    }

    pub fn metadata(&self) -> &D {
        &self.metadata
    }

    pub fn problem(&self) -> &P {
        &self.problem
    }

    pub fn algorithm(&self) -> &A {
        &self.algorithm
    }

    pub fn interpolant(&self) -> &I {
        &self.interpolant
    }

    /// Whether the interpolant can evaluate the solution between the stored time points.
    pub fn is_dense(&self) -> bool {
        self.dense
    }

    /// Index into [Self::times] of the latest time the solution is valid at. For solves driven by callbacks this
    /// can be before the last stored time point.
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_time(&self) -> T {
        self.times[self.current_index]
    }

    pub fn retcode(&self) -> ReturnCode {
        self.retcode
    }

    pub fn stats(&self) -> &SolverStats {
        &self.stats
    }

    /// Number of time points.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Always false, a time series solution has at least one time point.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// The values of `dependent_var` at time point `index`.
    pub fn snapshot(&self, dependent_var: &str, index: usize) -> Option<ArrayViewD<'_, T>> {
        if index >= self.times.len() {
            return None;
        }
        Some(self.get(dependent_var)?.index_axis(Axis(0), index))
    }

    /// The values of `dependent_var` at [Self::current_index].
    pub fn current(&self, dependent_var: &str) -> Option<ArrayViewD<'_, T>> {
        self.snapshot(dependent_var, self.current_index)
    }

    /// Evaluate the solution at the spatial point `x` (one coordinate per independent variable) and time `t`.
    ///
    /// This is implemented by the discretizer that produced the solution, see
    /// [DiscretizationMetadata::evaluate_time_series]. If it did not provide an implementation, this always returns
    /// [crate::EvaluationError::NotImplemented].
    pub fn evaluate(&self, x: &DVector<T>, t: T) -> Result<DVector<T>, PdeSolError> {
        D::evaluate_time_series(self, x, t)
    }
}

impl<T, D, S, P, A, I> Index<&str> for PdeTimeSeriesSolution<T, D, S, P, A, I>
where
    T: Scalar,
    D: DiscretizationMetadata<T>,
    I: Interpolant,
{
    type Output = ArrayD<T>;

    fn index(&self, dependent_var: &str) -> &Self::Output {
        match self.values.get(dependent_var) {
            Some(array) => array,
            None => panic!("`{}` is not a dependent variable of this solution", dependent_var),
        }
    }
}

impl<T, D, S, P, A, I> fmt::Display for PdeTimeSeriesSolution<T, D, S, P, A, I>
where
    T: Scalar,
    D: DiscretizationMetadata<T>,
    I: Interpolant,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "retcode: {}", self.retcode)?;
        writeln!(f, "Interpolation: {}", self.interpolant.summary())?;
        writeln!(f, "t: {}", List(&self.times))?;
        writeln!(f, "ivs: {}", List(&self.independent_vars))?;
        writeln!(f, "domain: {}", List(&self.domains))?;
        write_fields(f, &self.dependent_vars, &self.values)
    }
}
