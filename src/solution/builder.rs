use std::collections::HashSet;

use ndarray::ArrayD;

use crate::{
    domain::Domain,
    error::{PdeSolError, SolutionError},
    interpolant::{short_type_name, Interpolant, NoInterpolant},
    metadata::{DiscretizationMetadata, TimeAxis},
    scalar::Scalar,
    solution_error,
    status::{ReturnCode, SolverStats},
};

use super::{
    fields::{check_shape, FieldMap},
    PdeNoTimeSolution, PdeSolution, PdeTimeSeriesSolution,
};

/// Builder for PDE solutions. Discretizers use the setters to hand over the result of a solve and then call one of
/// the build methods, which checks the solution invariants and selects the solution variant.
pub struct PdeSolutionBuilder<T: Scalar, S = (), P = (), A = (), I = NoInterpolant> {
    raw: S,
    problem: P,
    algorithm: A,
    interpolant: I,
    dense: bool,
    values: FieldMap<T>,
    errors: Vec<(String, ArrayD<T>)>,
    times: Vec<T>,
    independent_vars: Vec<String>,
    domains: Vec<Domain<T>>,
    dependent_vars: Vec<String>,
    current_index: Option<usize>,
    retcode: ReturnCode,
    stats: SolverStats,
}

impl<T: Scalar> Default for PdeSolutionBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for PDE solutions.
///
/// # Example
///
/// ```rust
/// use pdesol::{DiscretizationMetadata, Domain, PdeSolution, PdeSolutionBuilder, ReturnCode, TimeAxis};
/// use ndarray::Array2;
///
/// struct MyGrid;
/// impl DiscretizationMetadata<f64> for MyGrid {
///     const TIME_AXIS: TimeAxis = TimeAxis::Present;
/// }
///
/// // three time points, one dependent variable "u" on a 5-point grid
/// let sol = PdeSolutionBuilder::new()
///     .times([0.0, 1.0, 2.0])
///     .independent_var("x", Domain::uniform_grid(0.0, 1.0, 5))
///     .field("u", Array2::zeros((3, 5)).into_dyn())
///     .retcode(ReturnCode::Success)
///     .build(MyGrid)
///     .unwrap();
///
/// assert!(matches!(sol, PdeSolution::TimeSeries(_)));
/// assert_eq!(sol.to_string().lines().next(), Some("retcode: Success"));
/// ```
impl<T: Scalar> PdeSolutionBuilder<T> {
    /// Create a new builder with defaults:
    /// - raw, problem and algorithm = `()`
    /// - interpolant = [NoInterpolant], not dense
    /// - no times, variables or fields
    /// - current index = last time point
    /// - retcode = [ReturnCode::Success]
    /// - stats = all counters zero
    pub fn new() -> Self {
        Self {
            raw: (),
            problem: (),
            algorithm: (),
            interpolant: NoInterpolant,
            dense: false,
            values: FieldMap::new(),
            errors: Vec::new(),
            times: Vec::new(),
            independent_vars: Vec::new(),
            domains: Vec::new(),
            dependent_vars: Vec::new(),
            current_index: None,
            retcode: ReturnCode::default(),
            stats: SolverStats::default(),
        }
    }
}

impl<T: Scalar, S, P, A, I> PdeSolutionBuilder<T, S, P, A, I> {
    /// Set the raw result of the underlying numerical solve.
    pub fn raw<S2>(self, raw: S2) -> PdeSolutionBuilder<T, S2, P, A, I> {
        PdeSolutionBuilder {
            raw,
            problem: self.problem,
            algorithm: self.algorithm,
            interpolant: self.interpolant,
            dense: self.dense,
            values: self.values,
            errors: self.errors,
            times: self.times,
            independent_vars: self.independent_vars,
            domains: self.domains,
            dependent_vars: self.dependent_vars,
            current_index: self.current_index,
            retcode: self.retcode,
            stats: self.stats,
        }
    }

    /// Set the numerical problem that was solved.
    pub fn problem<P2>(self, problem: P2) -> PdeSolutionBuilder<T, S, P2, A, I> {
        PdeSolutionBuilder {
            raw: self.raw,
            problem,
            algorithm: self.algorithm,
            interpolant: self.interpolant,
            dense: self.dense,
            values: self.values,
            errors: self.errors,
            times: self.times,
            independent_vars: self.independent_vars,
            domains: self.domains,
            dependent_vars: self.dependent_vars,
            current_index: self.current_index,
            retcode: self.retcode,
            stats: self.stats,
        }
    }

    /// Set the algorithm used to solve the problem.
    pub fn algorithm<A2>(self, algorithm: A2) -> PdeSolutionBuilder<T, S, P, A2, I> {
        PdeSolutionBuilder {
            raw: self.raw,
            problem: self.problem,
            algorithm,
            interpolant: self.interpolant,
            dense: self.dense,
            values: self.values,
            errors: self.errors,
            times: self.times,
            independent_vars: self.independent_vars,
            domains: self.domains,
            dependent_vars: self.dependent_vars,
            current_index: self.current_index,
            retcode: self.retcode,
            stats: self.stats,
        }
    }

    /// Set the interpolant, and whether it can evaluate between the stored time points (`dense`).
    pub fn interpolant<I2: Interpolant>(
        self,
        interpolant: I2,
        dense: bool,
    ) -> PdeSolutionBuilder<T, S, P, A, I2> {
        PdeSolutionBuilder {
            raw: self.raw,
            problem: self.problem,
            algorithm: self.algorithm,
            interpolant,
            dense,
            values: self.values,
            errors: self.errors,
            times: self.times,
            independent_vars: self.independent_vars,
            domains: self.domains,
            dependent_vars: self.dependent_vars,
            current_index: self.current_index,
            retcode: self.retcode,
            stats: self.stats,
        }
    }

    /// Set the time points. Only used for time series solutions.
    pub fn times(mut self, times: impl IntoIterator<Item = T>) -> Self {
        self.times = times.into_iter().collect();
        self
    }

    /// Add an independent variable and its domain. Array axes follow the order in which these are added.
    pub fn independent_var(mut self, name: impl Into<String>, domain: Domain<T>) -> Self {
        self.independent_vars.push(name.into());
        self.domains.push(domain);
        self
    }

    /// Add a dependent variable and its values.
    pub fn field(mut self, name: impl Into<String>, values: ArrayD<T>) -> Self {
        let name = name.into();
        self.dependent_vars.push(name.clone());
        self.values.insert(name, values);
        self
    }

    /// Add error estimates for the dependent variable `name`. Only used for time series solutions.
    pub fn error(mut self, name: impl Into<String>, errors: ArrayD<T>) -> Self {
        self.errors.push((name.into(), errors));
        self
    }

    /// Set the index of the latest valid time point. Only used for time series solutions.
    pub fn current_index(mut self, current_index: usize) -> Self {
        self.current_index = Some(current_index);
        self
    }

    pub fn retcode(mut self, retcode: ReturnCode) -> Self {
        self.retcode = retcode;
        self
    }

    pub fn stats(mut self, stats: SolverStats) -> Self {
        self.stats = stats;
        self
    }

    fn check_variables(&self) -> Result<(), PdeSolError> {
        let mut seen = HashSet::new();
        for name in self.independent_vars.iter().chain(&self.dependent_vars) {
            if !seen.insert(name.as_str()) {
                return Err(solution_error!(DuplicateVariable, name.clone()));
            }
        }
        for (name, domain) in self.independent_vars.iter().zip(&self.domains) {
            domain.validate(name)?;
        }
        Ok(())
    }

    fn check_times(&self) -> Result<(), PdeSolError> {
        if self.times.is_empty() {
            return Err(solution_error!(EmptyTimes));
        }
        for (i, &t) in self.times.iter().enumerate() {
            if t.is_nan() || (i > 0 && t < self.times[i - 1]) {
                return Err(solution_error!(TimesNotOrdered, i));
            }
        }
        Ok(())
    }

    /// Error estimates keyed by dependent variable, each checked against its field's shape.
    fn take_errors(&mut self) -> Result<Option<FieldMap<T>>, PdeSolError> {
        if self.errors.is_empty() {
            return Ok(None);
        }
        let mut errors = FieldMap::new();
        for (name, array) in std::mem::take(&mut self.errors) {
            if !self.values.contains_key(&name) {
                return Err(solution_error!(UnknownErrorField, name));
            }
            if errors.contains_key(&name) {
                return Err(solution_error!(DuplicateErrorField, name));
            }
            check_shape(&name, &array, &self.domains, Some(self.times.len()))?;
            errors.insert(name, array);
        }
        Ok(Some(errors))
    }

    /// Inputs that only describe a time axis, and so are dropped by [Self::build_no_time].
    fn time_axis_inputs(&self) -> Vec<&'static str> {
        let mut inputs = Vec::new();
        if !self.times.is_empty() {
            inputs.push("times");
        }
        if !self.errors.is_empty() {
            inputs.push("errors");
        }
        if self.current_index.is_some() {
            inputs.push("current index");
        }
        inputs
    }
}

impl<T: Scalar, S, P, A, I: Interpolant> PdeSolutionBuilder<T, S, P, A, I> {
    /// Build the solution variant selected by the metadata: a [PdeSolution::TimeSeries] if `D::TIME_AXIS` is
    /// [TimeAxis::Present], a [PdeSolution::NoTime] if it is [TimeAxis::Absent].
    pub fn build<D: DiscretizationMetadata<T>>(
        self,
        metadata: D,
    ) -> Result<PdeSolution<T, D, S, P, A, I>, PdeSolError> {
        log::debug!(
            "selecting solution variant for {} ({:?})",
            metadata.name(),
            D::TIME_AXIS
        );
        match D::TIME_AXIS {
            TimeAxis::Present => self.build_time_series(metadata).map(PdeSolution::TimeSeries),
            TimeAxis::Absent => self.build_no_time(metadata).map(PdeSolution::NoTime),
        }
    }

    /// Build a time series solution. Fails if the metadata does not describe solutions with a time axis.
    pub fn build_time_series<D: DiscretizationMetadata<T>>(
        mut self,
        metadata: D,
    ) -> Result<PdeTimeSeriesSolution<T, D, S, P, A, I>, PdeSolError> {
        if D::TIME_AXIS != TimeAxis::Present {
            return Err(PdeSolError::from(SolutionError::TimeAxisMismatch {
                metadata: metadata.name(),
                expected: "time series",
            }));
        }
        self.check_variables()?;
        self.check_times()?;
        let ntimes = self.times.len();
        for (name, array) in &self.values {
            check_shape(name, array, &self.domains, Some(ntimes))?;
        }
        let errors = self.take_errors()?;
        let current_index = self.current_index.unwrap_or(ntimes - 1);
        if current_index >= ntimes {
            return Err(PdeSolError::from(SolutionError::CurrentIndexOutOfRange {
                index: current_index,
                len: ntimes,
            }));
        }
        log::debug!(
            "built time series solution ({} time points, {} fields, retcode {})",
            ntimes,
            self.values.len(),
            self.retcode
        );
        Ok(PdeTimeSeriesSolution {
            values: self.values,
            raw: self.raw,
            errors,
            times: self.times,
            domains: self.domains,
            independent_vars: self.independent_vars,
            dependent_vars: self.dependent_vars,
            metadata,
            problem: self.problem,
            algorithm: self.algorithm,
            interpolant: self.interpolant,
            dense: self.dense,
            current_index,
            retcode: self.retcode,
            stats: self.stats,
        })
    }

    /// Build a time-independent solution. Fails if the metadata describes solutions with a time axis. Times, errors
    /// and the current index have no meaning here and are dropped.
    pub fn build_no_time<D: DiscretizationMetadata<T>>(
        self,
        metadata: D,
    ) -> Result<PdeNoTimeSolution<T, D, S, P, A, I>, PdeSolError> {
        if D::TIME_AXIS != TimeAxis::Absent {
            return Err(PdeSolError::from(SolutionError::TimeAxisMismatch {
                metadata: metadata.name(),
                expected: "time-independent",
            }));
        }
        self.check_variables()?;
        for (name, array) in &self.values {
            check_shape(name, array, &self.domains, None)?;
        }
        let dropped = self.time_axis_inputs();
        if !dropped.is_empty() {
            log::warn!(
                "{} produces time-independent solutions, ignoring {}",
                metadata.name(),
                dropped.join(", ")
            );
        }
        log::debug!(
            "built time-independent solution ({} fields, interpolant {}, retcode {})",
            self.values.len(),
            short_type_name::<I>(),
            self.retcode
        );
        Ok(PdeNoTimeSolution {
            values: self.values,
            raw: self.raw,
            domains: self.domains,
            independent_vars: self.independent_vars,
            dependent_vars: self.dependent_vars,
            metadata,
            problem: self.problem,
            algorithm: self.algorithm,
            interpolant: self.interpolant,
            retcode: self.retcode,
            stats: self.stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use ndarray::{arr1, arr2, Array1, Array2, Array3};

    use super::*;

    #[derive(Debug)]
    struct Grid;
    impl DiscretizationMetadata<f64> for Grid {
        const TIME_AXIS: TimeAxis = TimeAxis::Present;
    }

    #[derive(Debug)]
    struct Steady;
    impl DiscretizationMetadata<f64> for Steady {
        const TIME_AXIS: TimeAxis = TimeAxis::Absent;
    }

    fn series() -> PdeSolutionBuilder<f64> {
        PdeSolutionBuilder::new()
            .times([0.0, 1.0, 2.0])
            .independent_var("x", Domain::uniform_grid(0.0, 1.0, 5))
            .field("u", Array2::zeros((3, 5)).into_dyn())
    }

    #[test]
    fn test_variant_selection() {
        assert!(matches!(series().build(Grid), Ok(PdeSolution::TimeSeries(_))));
        // the same inputs with steady metadata select the other variant, times are dropped
        let steady = PdeSolutionBuilder::new()
            .times([0.0, 1.0])
            .independent_var("x", Domain::uniform_grid(0.0, 1.0, 5))
            .field("u", Array1::zeros(5).into_dyn())
            .build(Steady);
        assert!(matches!(steady, Ok(PdeSolution::NoTime(_))));
    }

    #[test]
    fn test_minimal_time_series() {
        let sol = series().build_time_series(Grid).unwrap();
        assert_eq!(sol["u"].shape()[0], sol.times().len());
        assert_eq!(sol.times().len(), 3);
        assert_eq!(sol.current_index(), 2);
        assert_eq!(sol.to_string().lines().next(), Some("retcode: Success"));
    }

    #[test]
    fn test_time_axis_mismatch() {
        assert_eq!(
            series().build_no_time(Grid).unwrap_err(),
            PdeSolError::from(SolutionError::TimeAxisMismatch {
                metadata: "Grid".to_string(),
                expected: "time-independent",
            })
        );
        assert_eq!(
            series().build_time_series(Steady).unwrap_err(),
            PdeSolError::from(SolutionError::TimeAxisMismatch {
                metadata: "Steady".to_string(),
                expected: "time series",
            })
        );
    }

    #[test]
    fn test_leading_axis_must_match_times() {
        let err = series().times([0.0, 1.0]).build(Grid).unwrap_err();
        assert_eq!(
            err,
            PdeSolError::from(SolutionError::ShapeMismatch {
                field: "u".to_string(),
                expected: vec![Some(2), Some(5)],
                found: vec![3, 5],
            })
        );
    }

    #[test]
    fn test_rank_must_match_domains() {
        let err = series()
            .field("v", Array3::zeros((3, 5, 2)).into_dyn())
            .build(Grid)
            .unwrap_err();
        assert_eq!(
            err,
            PdeSolError::from(SolutionError::RankMismatch {
                field: "v".to_string(),
                expected: 2,
                found: 3,
            })
        );
    }

    #[test]
    fn test_times_checks() {
        let err = PdeSolutionBuilder::<f64>::new()
            .independent_var("x", Domain::grid([0.0]))
            .build(Grid)
            .unwrap_err();
        assert_eq!(err, solution_error!(EmptyTimes));
        let err = series().times([0.0, 2.0, 1.0]).build(Grid).unwrap_err();
        assert_eq!(err, solution_error!(TimesNotOrdered, 2));
        let err = series().times([f64::NAN, 1.0, 2.0]).build(Grid).unwrap_err();
        assert_eq!(err, solution_error!(TimesNotOrdered, 0));
        // repeated time points (e.g. saved on both sides of an event) are allowed
        assert!(series().times([0.0, 1.0, 1.0]).build(Grid).is_ok());
    }

    #[test]
    fn test_duplicate_variables() {
        let err = series()
            .field("u", Array2::zeros((3, 5)).into_dyn())
            .build(Grid)
            .unwrap_err();
        assert_eq!(err, solution_error!(DuplicateVariable, "u".to_string()));
        let err = series()
            .field("x", Array2::zeros((3, 5)).into_dyn())
            .build(Grid)
            .unwrap_err();
        assert_eq!(err, solution_error!(DuplicateVariable, "x".to_string()));
    }

    #[test]
    fn test_invalid_interval() {
        let err = PdeSolutionBuilder::new()
            .independent_var("r", Domain::interval(1.0, 0.0))
            .field("u", arr1(&[1.0, 2.0]).into_dyn())
            .build(Steady)
            .unwrap_err();
        assert_eq!(err, solution_error!(InvalidInterval, "r".to_string()));
    }

    #[test]
    fn test_errors_checks() {
        let err = series()
            .error("w", Array2::zeros((3, 5)).into_dyn())
            .build(Grid)
            .unwrap_err();
        assert_eq!(err, solution_error!(UnknownErrorField, "w".to_string()));
        let err = series()
            .error("u", Array2::zeros((2, 5)).into_dyn())
            .build(Grid)
            .unwrap_err();
        assert!(matches!(
            err,
            PdeSolError::SolutionError(SolutionError::ShapeMismatch { .. })
        ));
        let sol = series()
            .error("u", Array2::from_elem((3, 5), 1e-8).into_dyn())
            .build_time_series(Grid)
            .unwrap();
        assert_eq!(sol.error("u").map(|e| e.shape().to_vec()), Some(vec![3, 5]));
        assert!(series().build_time_series(Grid).unwrap().errors().is_none());
    }

    #[test]
    fn test_duplicate_errors() {
        let err = series()
            .error("u", Array2::zeros((3, 5)).into_dyn())
            .error("u", Array2::from_elem((3, 5), 1e-6).into_dyn())
            .build(Grid)
            .unwrap_err();
        assert_eq!(err, solution_error!(DuplicateErrorField, "u".to_string()));
    }

    #[test]
    fn test_time_axis_inputs() {
        // a dense interpolant is meaningful for steady solutions too
        let builder = PdeSolutionBuilder::<f64>::new().interpolant(NoInterpolant, true);
        assert!(builder.time_axis_inputs().is_empty());
        let builder = builder
            .times([0.0])
            .current_index(0)
            .error("u", arr1(&[0.0, 0.0]).into_dyn());
        assert_eq!(
            builder.time_axis_inputs(),
            vec!["times", "errors", "current index"]
        );
        let sol = PdeSolutionBuilder::new()
            .interpolant(NoInterpolant, true)
            .independent_var("x", Domain::grid([0.0, 1.0]))
            .field("u", arr1(&[1.0, 2.0]).into_dyn())
            .build_no_time(Steady)
            .unwrap();
        assert_eq!(sol.dependent_vars(), &["u".to_string()]);
    }

    #[test]
    fn test_current_index_range() {
        let err = series().current_index(3).build(Grid).unwrap_err();
        assert_eq!(
            err,
            PdeSolError::from(SolutionError::CurrentIndexOutOfRange { index: 3, len: 3 })
        );
        let sol = series().current_index(1).build_time_series(Grid).unwrap();
        assert_eq!(sol.current_index(), 1);
        assert_eq!(sol.current_time(), 1.0);
    }

    #[test]
    fn test_no_time_ignores_time_axis_inputs() {
        let sol = PdeSolutionBuilder::new()
            .times([0.0])
            .current_index(0)
            .error("u", arr1(&[0.0, 0.0]).into_dyn())
            .independent_var("x", Domain::grid([0.0, 1.0]))
            .field("u", arr1(&[1.0, 2.0]).into_dyn())
            .build_no_time(Steady)
            .unwrap();
        assert_eq!(sol.get("u"), Some(&arr1(&[1.0, 2.0]).into_dyn()));
    }

    #[test]
    fn test_no_time_shape() {
        let err = PdeSolutionBuilder::new()
            .independent_var("x", Domain::grid([0.0, 1.0]))
            .field("u", arr2(&[[1.0, 2.0]]).into_dyn())
            .build_no_time(Steady)
            .unwrap_err();
        assert_eq!(
            err,
            PdeSolError::from(SolutionError::RankMismatch {
                field: "u".to_string(),
                expected: 1,
                found: 2,
            })
        );
    }
}
