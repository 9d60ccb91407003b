use std::{fmt, ops::Index};

use nalgebra::DVector;
use ndarray::ArrayD;

use crate::{
    domain::Domain,
    error::PdeSolError,
    interpolant::{Interpolant, NoInterpolant},
    scalar::Scalar,
    status::{ReturnCode, SolverStats},
    DiscretizationMetadata,
};

use super::fields::{write_fields, FieldMap, List};

/// Solution of a time-independent PDE (a steady state, or the result of a root find).
///
/// Every array in [Self::values] has one axis per independent variable, in the order of [Self::independent_vars] /
/// [Self::domains]. There is no time axis, and so no error estimates, dense flag or time cursor either. The type
/// parameters are the same as for [crate::PdeTimeSeriesSolution].
#[derive(Clone, Debug)]
pub struct PdeNoTimeSolution<T, D, S = (), P = (), A = (), I = NoInterpolant>
where
    T: Scalar,
    D: DiscretizationMetadata<T>,
    I: Interpolant,
{
    pub(super) values: FieldMap<T>,
    pub(super) raw: S,
    pub(super) domains: Vec<Domain<T>>,
    pub(super) independent_vars: Vec<String>,
    pub(super) dependent_vars: Vec<String>,
    pub(super) metadata: D,
    pub(super) problem: P,
    pub(super) algorithm: A,
    pub(super) interpolant: I,
    pub(super) retcode: ReturnCode,
    pub(super) stats: SolverStats,
}

impl<T, D, S, P, A, I> PdeNoTimeSolution<T, D, S, P, A, I>
where
    T: Scalar,
    D: DiscretizationMetadata<T>,
    I: Interpolant,
{
    pub fn values(&self) -> &FieldMap<T> {
        &self.values
    }

    pub fn get(&self, dependent_var: &str) -> Option<&ArrayD<T>> {
        self.values.get(dependent_var)
    }

    pub fn raw(&self) -> &S {
        &self.raw
    }

    pub fn into_raw(self) -> S {
        self.raw
    }

    pub fn domains(&self) -> &[Domain<T>] {
        &self.domains
    }

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

    pub fn retcode(&self) -> ReturnCode {
        self.retcode
    }

    pub fn stats(&self) -> &SolverStats {
        &self.stats
    }

    /// Evaluate the solution at the spatial point `x`, see [DiscretizationMetadata::evaluate_no_time].
    pub fn evaluate(&self, x: &DVector<T>) -> Result<DVector<T>, PdeSolError> {
        D::evaluate_no_time(self, x)
    }
}

impl<T, D, S, P, A, I> Index<&str> for PdeNoTimeSolution<T, D, S, P, A, I>
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

impl<T, D, S, P, A, I> fmt::Display for PdeNoTimeSolution<T, D, S, P, A, I>
where
    T: Scalar,
    D: DiscretizationMetadata<T>,
    I: Interpolant,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "retcode: {}", self.retcode)?;
        writeln!(f, "Interpolation: {}", self.interpolant.summary())?;
        writeln!(f, "ivs: {}", List(&self.independent_vars))?;
        writeln!(f, "domain: {}", List(&self.domains))?;
        write_fields(f, &self.dependent_vars, &self.values)
    }
}

#[cfg(test)]
mod tests {
    use nalgebra::DVector;
    use ndarray::{arr1, arr2};

    use crate::{
        domain::shape,
        test_models::poisson1d::{poisson1d_solution, Poisson1dMetadata},
        Domain, PdeSolutionBuilder, ReturnCode,
    };

    #[derive(Debug)]
    struct Spectral;
    impl crate::DiscretizationMetadata<f64> for Spectral {
        const TIME_AXIS: crate::TimeAxis = crate::TimeAxis::Absent;
    }

    #[test]
    fn test_shape_matches_domains() {
        let sol = poisson1d_solution(9);
        let expected: Vec<Option<usize>> = shape(sol.domains());
        for dv in sol.dependent_vars() {
            let found: Vec<Option<usize>> = sol[dv.as_str()].shape().iter().map(|&n| Some(n)).collect();
            assert_eq!(found, expected);
        }
        assert_eq!(sol.independent_vars().len(), sol.domains().len());
    }

    #[test]
    fn test_fields_round_trip() {
        let u = arr2(&[[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]).into_dyn();
        let v = arr2(&[[0.0, 0.0], [0.0, 1.0], [0.0, 2.0]]).into_dyn();
        let sol = PdeSolutionBuilder::new()
            .raw(DVector::from_vec(vec![1.0, 2.0, 3.0]))
            .algorithm("newton")
            .independent_var("x", Domain::grid([0.0, 0.5, 1.0]))
            .independent_var("y", Domain::interval(-1.0, 1.0))
            .field("u", u.clone())
            .field("v", v.clone())
            .retcode(ReturnCode::Failure)
            .build_no_time(Spectral)
            .unwrap();
        assert_eq!(&sol["u"], &u);
        assert_eq!(sol.get("v"), Some(&v));
        assert_eq!(sol.values().len(), 2);
        assert_eq!(sol.dependent_vars(), &["u".to_string(), "v".to_string()]);
        assert_eq!(sol.independent_vars(), &["x".to_string(), "y".to_string()]);
        assert_eq!(sol.domain_of("y"), Some(&Domain::interval(-1.0, 1.0)));
        assert_eq!(*sol.algorithm(), "newton");
        assert_eq!(sol.problem(), &());
        assert_eq!(sol.retcode(), ReturnCode::Failure);
        assert_eq!(sol.stats().nf, 0);
        assert_eq!(sol.raw().len(), 3);
        assert_eq!(sol.into_raw()[2], 3.0);
    }

    #[test]
    fn test_specialized_evaluation() {
        let sol = poisson1d_solution(5);
        let u = sol.evaluate(&DVector::from_element(1, 0.5)).unwrap();
        assert_eq!(u[0], 0.125);
        assert!(sol.evaluate(&DVector::from_element(2, 0.5)).is_err());
        let _: &Poisson1dMetadata = sol.metadata();
    }

    #[test]
    fn test_display() {
        let sol = PdeSolutionBuilder::new()
            .independent_var("x", Domain::grid([0.0, 0.5, 1.0]))
            .independent_var("y", Domain::interval(0.0, 2.0))
            .field("u", arr2(&[[1.0], [2.0], [3.0]]).into_dyn())
            .field("p", arr2(&[[0.5], [0.0], [-0.5]]).into_dyn())
            .retcode(ReturnCode::Terminated)
            .build_no_time(Spectral)
            .unwrap();
        insta::assert_snapshot!(sol.to_string(), @r###"
retcode: Terminated
Interpolation: No interpolation
ivs: [x, y]
domain: [[0, 0.5, 1], Interval(0, 2)]
u:
u => [[1],
 [2],
 [3]]
p => [[0.5],
 [0],
 [-0.5]]
"###);
    }

    #[test]
    fn test_display_one_dimensional() {
        let sol = PdeSolutionBuilder::new()
            .independent_var("x", Domain::grid([0.0, 1.0, 2.0]))
            .field("u", arr1(&[1.0, 1.5, 2.0]).into_dyn())
            .build_no_time(Spectral)
            .unwrap();
        let text = sol.to_string();
        assert_eq!(text.lines().next(), Some("retcode: Success"));
        assert!(!text.contains("t: "));
        assert!(text.ends_with("u:\nu => [1, 1.5, 2]"));
    }
}
