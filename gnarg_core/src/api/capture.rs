use thiserror::Error;

/// Behaviour to accumulate raw `&str` values into an explicit generic type T.
///
/// We use this at the bottom of the option registry object graph so the compiler can maintain each option's type.
/// The registry only sees the type erased [`AnonymousAccumulate`].
pub trait Accumulate<T> {
    /// Transform the raw value and commit it.
    /// On failure the accumulated state is left untouched.
    fn apply(&mut self, raw: &str) -> Result<T, TransformError>;

    /// Declare that the values for this option have finished arriving (for the current parse pass).
    fn complete(&mut self) {
        // Do nothing.
    }

    /// Return to the constructor supplied default.
    fn reset(&mut self);
}

/// A raw value which could not be transformed into its target type.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("cannot convert '{raw}' to {target}.")]
pub struct TransformError {
    /// The raw value, as it appeared on the command line.
    pub raw: String,
    /// The name of the target type.
    pub target: &'static str,
}

impl TransformError {
    pub(crate) fn new<T>(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            target: std::any::type_name::<T>(),
        }
    }
}

/// The default value transform: anything implementing [`std::str::FromStr`].
pub fn parse<T: std::str::FromStr>(raw: &str) -> Option<T> {
    T::from_str(raw).ok()
}

/// Behaviour to accumulate an implicit generic type T from an input `&str`.
///
/// We use this at the middle/top of the object graph so that differently typed accumulators may all live in a single registry.
pub(crate) trait AnonymousAccumulate {
    fn apply(&mut self, raw: &str) -> Result<(), TransformError>;

    fn complete(&mut self);

    fn reset(&mut self);
}

pub(crate) struct AnonymousAccumulator<'a, T>(Box<dyn Accumulate<T> + 'a>);

impl<'a, T> AnonymousAccumulator<'a, T> {
    pub(crate) fn bind(accumulator: impl Accumulate<T> + 'a) -> Self {
        Self(Box::new(accumulator))
    }
}

impl<'a, T> AnonymousAccumulate for AnonymousAccumulator<'a, T> {
    fn apply(&mut self, raw: &str) -> Result<(), TransformError> {
        self.0.apply(raw).map(|_| ())
    }

    fn complete(&mut self) {
        self.0.complete();
    }

    fn reset(&mut self) {
        self.0.reset();
    }
}

#[cfg(test)]
#[derive(Default)]
pub(crate) struct BlackHole {}

#[cfg(test)]
impl AnonymousAccumulate for BlackHole {
    fn apply(&mut self, _raw: &str) -> Result<(), TransformError> {
        // Do nothing
        Ok(())
    }

    fn complete(&mut self) {
        // Do nothing
    }

    fn reset(&mut self) {
        // Do nothing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::path::PathBuf;

    #[rstest]
    #[case("1", Some(1))]
    #[case("-1", Some(-1))]
    #[case("01", Some(1))]
    #[case("x", None)]
    #[case("", None)]
    fn parse_int(#[case] raw: &str, #[case] expected: Option<i32>) {
        assert_eq!(parse::<i32>(raw), expected);
    }

    #[test]
    fn parse_types() {
        assert_eq!(parse::<u8>("255"), Some(255));
        assert_eq!(parse::<u8>("256"), None);
        assert_eq!(parse::<i16>("-300"), Some(-300));
        assert_eq!(parse::<i64>("9000000000"), Some(9_000_000_000));
        assert_eq!(parse::<f32>("1.5"), Some(1.5));
        assert_eq!(parse::<f64>("-0.25"), Some(-0.25));
        assert_eq!(parse::<bool>("true"), Some(true));
        assert_eq!(parse::<bool>("yes"), None);
        assert_eq!(parse::<char>("c"), Some('c'));
        assert_eq!(parse::<char>("cc"), None);
        assert_eq!(parse::<String>("text"), Some("text".to_string()));
        // No filesystem access; the path needn't exist.
        assert_eq!(
            parse::<PathBuf>("/does/not/exist"),
            Some(PathBuf::from("/does/not/exist"))
        );
    }

    #[test]
    fn transform_error() {
        let error = TransformError::new::<u32>("abc");
        assert_eq!(error.raw, "abc");
        assert_eq!(error.target, "u32");
        assert_eq!(error.to_string(), "cannot convert 'abc' to u32.");
    }
}
