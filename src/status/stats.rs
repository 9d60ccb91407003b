use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

/// Counters reported by the solver that produced a solution.
///
/// The named counters cover what most time steppers and nonlinear solvers report, anything else goes in `extra`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverStats {
    /// Number of right-hand side evaluations
    pub nf: usize,
    /// Number of `W = M - gamma J` matrix constructions
    pub nw: usize,
    /// Number of linear solves
    pub nsolve: usize,
    /// Number of Jacobian evaluations
    pub njacs: usize,
    /// Number of nonlinear solver iterations
    pub nnonliniter: usize,
    /// Number of nonlinear solver convergence failures
    pub nnonlinconvfail: usize,
    /// Number of accepted steps
    pub naccept: usize,
    /// Number of rejected steps
    pub nreject: usize,
    #[serde(default)]
    pub extra: BTreeMap<String, usize>,
}

impl SolverStats {
    pub fn with_extra(mut self, name: impl Into<String>, count: usize) -> Self {
        self.extra.insert(name.into(), count);
        self
    }

    pub fn nsteps(&self) -> usize {
        self.naccept + self.nreject
    }
}

impl fmt::Display for SolverStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Number of rhs evaluations: {}", self.nf)?;
        writeln!(f, "Number of W matrix evaluations: {}", self.nw)?;
        writeln!(f, "Number of linear solves: {}", self.nsolve)?;
        writeln!(f, "Number of Jacobians created: {}", self.njacs)?;
        writeln!(f, "Number of nonlinear solver iterations: {}", self.nnonliniter)?;
        writeln!(
            f,
            "Number of nonlinear solver convergence failures: {}",
            self.nnonlinconvfail
        )?;
        writeln!(f, "Number of accepted steps: {}", self.naccept)?;
        write!(f, "Number of rejected steps: {}", self.nreject)?;
        for (name, count) in &self.extra {
            write!(f, "\n{}: {}", name, count)?;
        }
        Ok(())
    }
}
