use std::fmt;

use serde::{Deserialize, Serialize};

mod stats;

pub use stats::SolverStats;

/// Outcome of the solve that produced a solution.
///
/// The return code is assigned once when the solution is built and never changes. It is data, not an error: a
/// solution with a [ReturnCode::Failure] still holds whatever the solver produced before it stopped, so callers
/// must check it explicitly (e.g. with [ReturnCode::is_success]).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReturnCode {
    /// The solve reached its final time (or converged, for steady-state problems).
    #[default]
    Success,
    /// The solve was stopped early by a user-supplied stopping condition.
    Terminated,
    /// The solve failed.
    Failure,
}

impl ReturnCode {
    /// Returns true for the codes that indicate a usable solution, i.e. [ReturnCode::Success] and [ReturnCode::Terminated].
    pub fn is_success(self) -> bool {
        matches!(self, ReturnCode::Success | ReturnCode::Terminated)
    }
}

impl fmt::Display for ReturnCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReturnCode::Success => "Success",
            ReturnCode::Terminated => "Terminated",
            ReturnCode::Failure => "Failure",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(ReturnCode::Success.to_string(), "Success");
        assert_eq!(ReturnCode::Terminated.to_string(), "Terminated");
        assert_eq!(ReturnCode::Failure.to_string(), "Failure");
    }

    #[test]
    fn test_is_success() {
        assert!(ReturnCode::Success.is_success());
        assert!(ReturnCode::Terminated.is_success());
        assert!(!ReturnCode::Failure.is_success());
        assert_eq!(ReturnCode::default(), ReturnCode::Success);
    }

    #[test]
    fn test_serde() {
        let json = serde_json::to_string(&ReturnCode::Terminated).unwrap();
        assert_eq!(json, "\"Terminated\"");
        let back: ReturnCode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ReturnCode::Terminated);
    }
}
