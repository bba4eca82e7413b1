/// The number of values an option consumes each time it is specified.
///
/// Inspired by argparse: <https://docs.python.org/3/library/argparse.html#nargs>
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arity {
    /// `min..=max`: at least `min`, at most `max` values.
    Range(u8, u8),
    /// `min..`: at least `min` values, unbounded above.
    Lower(u8),
}

impl Arity {
    /// Precisely `n` values.
    pub fn precisely(n: u8) -> Self {
        Arity::Range(n, n)
    }

    /// Between `min` and `max` values (inclusive).
    pub fn range(min: u8, max: u8) -> Self {
        Arity::Range(min, max)
    }

    /// At least `n` values, with no upper limit.
    pub fn at_least(n: u8) -> Self {
        Arity::Lower(n)
    }

    /// Any number of values, including `0`.
    pub fn any() -> Self {
        Arity::Lower(0)
    }

    /// The lower bound.
    pub fn min(&self) -> u8 {
        match self {
            Arity::Range(min, _) | Arity::Lower(min) => *min,
        }
    }

    /// The upper bound, or `None` when unbounded.
    pub fn max(&self) -> Option<u8> {
        match self {
            Arity::Range(_, max) => Some(*max),
            Arity::Lower(_) => None,
        }
    }

    /// Whether `count` values leave room for at least one more.
    pub fn admits(&self, count: usize) -> bool {
        match self.max() {
            Some(max) => count < max as usize,
            None => true,
        }
    }

    /// A variable width window, capped above by more than one value.
    pub(crate) fn is_variable(&self) -> bool {
        match self {
            Arity::Range(min, max) => min < max && *max > 1,
            Arity::Lower(_) => false,
        }
    }
}

impl std::fmt::Display for Arity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Arity::Range(min, max) if min == max => write!(f, "{min}"),
            Arity::Range(min, max) => write!(f, "{min}..={max}"),
            Arity::Lower(min) => write!(f, "{min}.."),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use rand::{thread_rng, Rng};
    use rstest::rstest;

    #[test]
    fn bounds() {
        for _ in 0..100 {
            let arity: Arity = thread_rng().gen();
            match arity {
                Arity::Range(min, max) => {
                    assert!(min <= max);
                    assert_eq!(arity.min(), min);
                    assert_eq!(arity.max(), Some(max));
                    assert!(!arity.admits(max as usize));
                }
                Arity::Lower(min) => {
                    assert_eq!(arity.min(), min);
                    assert_eq!(arity.max(), None);
                    assert!(arity.admits(usize::MAX));
                }
            }
        }
    }

    #[rstest]
    #[case(Arity::precisely(0), Arity::Range(0, 0))]
    #[case(Arity::precisely(3), Arity::Range(3, 3))]
    #[case(Arity::range(1, 2), Arity::Range(1, 2))]
    #[case(Arity::at_least(1), Arity::Lower(1))]
    #[case(Arity::any(), Arity::Lower(0))]
    fn constructors(#[case] arity: Arity, #[case] expected: Arity) {
        assert_eq!(arity, expected);
    }

    #[rstest]
    #[case(Arity::precisely(0), false)]
    #[case(Arity::precisely(2), false)]
    #[case(Arity::range(0, 1), false)]
    #[case(Arity::range(1, 2), true)]
    #[case(Arity::range(2, 3), true)]
    #[case(Arity::any(), false)]
    fn variable(#[case] arity: Arity, #[case] expected: bool) {
        assert_eq!(arity.is_variable(), expected);
    }

    #[rstest]
    #[case(Arity::precisely(1), "1")]
    #[case(Arity::range(2, 3), "2..=3")]
    #[case(Arity::at_least(1), "1..")]
    fn display(#[case] arity: Arity, #[case] expected: &str) {
        assert_eq!(arity.to_string(), expected);
    }
}
