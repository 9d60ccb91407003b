use std::any::type_name;

/// An object, built by the discretizer, that can evaluate a solution away from its sampling grid.
///
/// This crate never constructs or calls into an interpolant, it only stores it and reports its [Interpolant::summary]
/// when a solution is printed. Evaluating a solution goes through [crate::DiscretizationMetadata], whose implementation
/// is free to use the interpolant it stored.
pub trait Interpolant {
    /// A short human-readable description of the interpolant, by default its type name without the module path.
    fn summary(&self) -> String {
        short_type_name::<Self>()
    }
}

/// Placeholder for solutions that carry no interpolant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NoInterpolant;

impl Interpolant for NoInterpolant {
    fn summary(&self) -> String {
        "No interpolation".to_string()
    }
}

impl<I: Interpolant + ?Sized> Interpolant for Box<I> {
    fn summary(&self) -> String {
        self.as_ref().summary()
    }
}

/// `std::any::type_name` with the module paths stripped from every path segment, e.g.
/// `alloc::vec::Vec<my_crate::Grid>` becomes `Vec<Grid>`.
pub(crate) fn short_type_name<T: ?Sized>() -> String {
    let full = type_name::<T>();
    let mut out = String::with_capacity(full.len());
    let mut segment = String::new();
    for c in full.chars() {
        if c.is_alphanumeric() || c == '_' || c == ':' {
            segment.push(c);
        } else {
            out.push_str(segment.rsplit("::").next().unwrap_or(""));
            segment.clear();
            out.push(c);
        }
    }
    out.push_str(segment.rsplit("::").next().unwrap_or(""));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    struct LinearGridInterpolation;
    impl Interpolant for LinearGridInterpolation {}

    mod nested {
        pub struct Wrapper<T>(pub T);
    }
    impl<T> Interpolant for nested::Wrapper<T> {}

    #[test]
    fn test_summary() {
        assert_eq!(NoInterpolant.summary(), "No interpolation");
        assert_eq!(LinearGridInterpolation.summary(), "LinearGridInterpolation");
        assert_eq!(
            nested::Wrapper(LinearGridInterpolation).summary(),
            "Wrapper<LinearGridInterpolation>"
        );
    }

    #[test]
    fn test_boxed() {
        let boxed: Box<dyn Interpolant> = Box::new(NoInterpolant);
        assert_eq!(boxed.summary(), "No interpolation");
    }
}
