use std::fmt::Display;

use nalgebra::RealField;

/// Element type of the values, times and grid points stored in a solution.
pub trait Scalar: nalgebra::Scalar + RealField + From<f64> + Display + Copy + PartialOrd {
    const EPSILON: Self;
    const NAN: Self;
    fn is_nan(self) -> bool;
}

impl Scalar for f64 {
    const EPSILON: Self = f64::EPSILON;
    const NAN: Self = f64::NAN;
    fn is_nan(self) -> bool {
        self.is_nan()
    }
}

#[test]
fn test_nan() {
    assert!(<f64 as Scalar>::NAN.is_nan());
    assert!(!Scalar::is_nan(1.0_f64));
}
