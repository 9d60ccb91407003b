use std::{collections::BTreeMap, fmt};

use ndarray::ArrayD;

use crate::{
    domain::{shape, Domain},
    error::{PdeSolError, SolutionError},
    scalar::Scalar,
};

/// Solution arrays keyed by dependent variable name.
pub type FieldMap<T> = BTreeMap<String, ArrayD<T>>;

/// Check that `array` has the shape implied by `domains`, with an extra leading axis of length `leading` if given.
pub(crate) fn check_shape<T: Scalar>(
    field: &str,
    array: &ArrayD<T>,
    domains: &[Domain<T>],
    leading: Option<usize>,
) -> Result<(), PdeSolError> {
    let expected: Vec<Option<usize>> = leading.into_iter().map(Some).chain(shape(domains)).collect();
    if array.ndim() != expected.len() {
        return Err(PdeSolError::from(SolutionError::RankMismatch {
            field: field.to_string(),
            expected: expected.len(),
            found: array.ndim(),
        }));
    }
    for (axis, (extent, &found)) in expected.iter().zip(array.shape()).enumerate() {
        match extent {
            Some(extent) if *extent != found => {
                return Err(PdeSolError::from(SolutionError::ShapeMismatch {
                    field: field.to_string(),
                    expected: expected.clone(),
                    found: array.shape().to_vec(),
                }))
            }
            None if found == 0 => {
                return Err(PdeSolError::from(SolutionError::EmptyAxis {
                    field: field.to_string(),
                    axis,
                }))
            }
            _ => (),
        }
    }
    Ok(())
}

/// Comma separated, bracketed list, e.g. `[0, 0.5, 1]`.
pub(crate) struct List<'a, X>(pub &'a [X]);

impl<X: fmt::Display> fmt::Display for List<'_, X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, x) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", x)?;
        }
        write!(f, "]")
    }
}

/// Writes the `u:` block, one `name => array` line per dependent variable.
pub(crate) fn write_fields<T: Scalar>(
    f: &mut fmt::Formatter<'_>,
    dependent_vars: &[String],
    values: &FieldMap<T>,
) -> fmt::Result {
    write!(f, "u:")?;
    for dv in dependent_vars {
        if let Some(array) = values.get(dv) {
            write!(f, "\n{} => {}", dv, array)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr2, ArrayD, IxDyn};

    #[test]
    fn test_check_shape_with_leading_axis() {
        let domains = [Domain::grid([0.0, 0.5, 1.0])];
        let a = ArrayD::<f64>::zeros(IxDyn(&[2, 3]));
        assert!(check_shape("u", &a, &domains, Some(2)).is_ok());
        assert_eq!(
            check_shape("u", &a, &domains, Some(4)),
            Err(PdeSolError::from(SolutionError::ShapeMismatch {
                field: "u".to_string(),
                expected: vec![Some(4), Some(3)],
                found: vec![2, 3],
            }))
        );
        assert_eq!(
            check_shape("u", &a, &domains, None),
            Err(PdeSolError::from(SolutionError::RankMismatch {
                field: "u".to_string(),
                expected: 1,
                found: 2,
            }))
        );
    }

    #[test]
    fn test_check_shape_interval_axis() {
        let domains = [Domain::grid([0.0, 1.0]), Domain::interval(0.0, 1.0)];
        let a = ArrayD::<f64>::zeros(IxDyn(&[2, 7]));
        assert!(check_shape("v", &a, &domains, None).is_ok());
        let empty = ArrayD::<f64>::zeros(IxDyn(&[2, 0]));
        assert_eq!(
            check_shape("v", &empty, &domains, None),
            Err(PdeSolError::from(SolutionError::EmptyAxis {
                field: "v".to_string(),
                axis: 1,
            }))
        );
    }

    #[test]
    fn test_list() {
        assert_eq!(List(&[0.0, 0.5, 1.0]).to_string(), "[0, 0.5, 1]");
        assert_eq!(List::<String>(&[]).to_string(), "[]");
        assert_eq!(
            List(&["x".to_string(), "y".to_string()]).to_string(),
            "[x, y]"
        );
    }

    #[test]
    fn test_ndarray_rendering() {
        let a = arr2(&[[1.0, 2.0], [3.0, 4.0]]).into_dyn();
        assert_eq!(a.to_string(), "[[1, 2],\n [3, 4]]");
    }
}
