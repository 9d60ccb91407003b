//! # pdesol
//!
//! Solution records for discretized partial differential equations.
//!
//! A PDE discretizer (finite differences, finite volumes, spectral methods, ...) turns a PDE into an ODE system or
//! a nonlinear system, hands it to a numerical solver, and then maps the raw solver output back onto the
//! independent variables of the original problem. This crate provides the records that hold that mapped result:
//!
//! - [PdeTimeSeriesSolution] for time-dependent problems, where every field has a leading time axis.
//! - [PdeNoTimeSolution] for steady-state or root-finding problems.
//! - [PdeSolution], the union of the two, built by [PdeSolutionBuilder::build].
//!
//! Which of the two is built is decided by the discretization metadata the record carries (see
//! [DiscretizationMetadata::TIME_AXIS]). The metadata type is also responsible for evaluating a solution at arbitrary
//! points, a metadata type that does not provide this fails with [EvaluationError::NotImplemented].
//!
//! ## Example
//!
//! ```
//! use ndarray::arr2;
//! use pdesol::{DiscretizationMetadata, Domain, PdeSolution, PdeSolutionBuilder, TimeAxis};
//!
//! struct MethodOfLines;
//! impl DiscretizationMetadata<f64> for MethodOfLines {
//!     const TIME_AXIS: TimeAxis = TimeAxis::Present;
//! }
//!
//! let sol = PdeSolutionBuilder::new()
//!     .times([0.0, 0.5])
//!     .independent_var("x", Domain::grid([0.0, 1.0]))
//!     .field("u", arr2(&[[1.0, 2.0], [3.0, 4.0]]).into_dyn())
//!     .build(MethodOfLines)
//!     .unwrap();
//! assert!(matches!(sol, PdeSolution::TimeSeries(_)));
//! println!("{}", sol);
//! ```

pub mod domain;
pub mod error;
pub mod interpolant;
pub mod metadata;
pub mod scalar;
pub mod solution;
pub mod status;
pub mod test_models;

pub use domain::Domain;
pub use error::{EvaluationError, PdeSolError, SolutionError};
pub use interpolant::{Interpolant, NoInterpolant};
pub use metadata::{DiscretizationMetadata, TimeAxis};
pub use scalar::Scalar;
pub use solution::{
    FieldMap, PdeNoTimeSolution, PdeSolution, PdeSolutionBuilder, PdeTimeSeriesSolution,
};
pub use status::{ReturnCode, SolverStats};
