use crate::constant::*;
use crate::matcher::GnuMatcher;
use crate::parser::{ConfigError, Report};
use crate::registry::Registry;

/// Behaviour to walk the input tokens, driving the registry's accumulators.
pub trait Strategy {
    /// Check the registry's option names can be expressed under this strategy.
    fn validate_options(&self, registry: &Registry<'_>) -> Result<(), ConfigError>;

    /// Walk the tokens left to right, applying option values to the registry and reporting problems.
    fn scan(&self, registry: &mut Registry<'_>, tokens: &[&str], report: &mut dyn Report) -> Scan;

    /// The short and long prefixes, as option names are written in the help message.
    fn prefixes(&self) -> (&str, &str) {
        (SHORT_PREFIX, LONG_PREFIX)
    }
}

/// The token positions a [`Strategy`] left unconsumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scan {
    /// The positions of the non-option tokens, in order.
    pub residual: Vec<usize>,
    /// Every token from this position onwards is residual (ex: after the terminator).
    pub tail: usize,
    /// The options matched during the scan, in order of first match.
    pub matched: Vec<usize>,
}

/// Whether options may follow non-option arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentOrder {
    /// Options and non-option arguments may be interleaved (the GNU default).
    Permute,
    /// The first non-option argument ends option processing (as POSIX recommends).
    RequireOrder,
}

/// What happens after an unrecognized or malformed option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    /// Report it and carry on with the next token.
    Skip,
    /// Report it and stop interpreting options: the offending token and all those after are residual.
    Halt,
}

/// The GNU getopt conventions.
///
/// * `--name`, `--name=value` and `--name value` for long options.
/// * `-n`, `-nvalue` and `-n value` for short options; `-abc` clusters flags.
/// * A lone `-` is a non-option argument.
/// * `--` ends option processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gnu {
    long_prefix: String,
    short_prefix: String,
    non_option: String,
    terminator: String,
    ordering: ArgumentOrder,
    recovery: Recovery,
}

impl Default for Gnu {
    fn default() -> Self {
        Self {
            long_prefix: LONG_PREFIX.to_string(),
            short_prefix: SHORT_PREFIX.to_string(),
            non_option: NON_OPTION.to_string(),
            terminator: TERMINATOR.to_string(),
            ordering: ArgumentOrder::Permute,
            recovery: Recovery::Skip,
        }
    }
}

impl Gnu {
    /// Replace the long option prefix (default `--`).
    pub fn with_long_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.long_prefix = prefix.into();
        self
    }

    /// Replace the short option prefix (default `-`).
    pub fn with_short_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.short_prefix = prefix.into();
        self
    }

    /// Replace the non-option marker (default `-`).
    pub fn with_non_option(mut self, marker: impl Into<String>) -> Self {
        self.non_option = marker.into();
        self
    }

    /// Replace the terminator (default `--`).
    pub fn with_terminator(mut self, terminator: impl Into<String>) -> Self {
        self.terminator = terminator.into();
        self
    }

    /// Set the argument ordering (default [`ArgumentOrder::Permute`]).
    pub fn with_ordering(mut self, ordering: ArgumentOrder) -> Self {
        self.ordering = ordering;
        self
    }

    /// Set the recovery policy (default [`Recovery::Skip`]).
    pub fn with_recovery(mut self, recovery: Recovery) -> Self {
        self.recovery = recovery;
        self
    }

    pub(crate) fn long_prefix(&self) -> &str {
        &self.long_prefix
    }

    pub(crate) fn short_prefix(&self) -> &str {
        &self.short_prefix
    }

    pub(crate) fn non_option(&self) -> &str {
        &self.non_option
    }

    pub(crate) fn terminator(&self) -> &str {
        &self.terminator
    }

    pub(crate) fn ordering(&self) -> ArgumentOrder {
        self.ordering
    }

    pub(crate) fn recovery(&self) -> Recovery {
        self.recovery
    }
}

impl Strategy for Gnu {
    fn validate_options(&self, registry: &Registry<'_>) -> Result<(), ConfigError> {
        for spec in registry.specs() {
            for short in spec.short_names() {
                let mut chars = short.chars();

                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_alphanumeric() => {}
                    _ => {
                        return Err(ConfigError::InvalidOptionShape {
                            name: spec.name().to_string(),
                            detail: format!(
                                "short name '{short}' must be exactly one alphanumeric character"
                            ),
                        });
                    }
                }
            }

            for long in spec.long_names() {
                if long.is_empty()
                    || !long.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
                {
                    return Err(ConfigError::InvalidOptionShape {
                        name: spec.name().to_string(),
                        detail: format!("long name '{long}' must match [A-Za-z0-9-]+"),
                    });
                }
            }
        }

        Ok(())
    }

    fn scan(&self, registry: &mut Registry<'_>, tokens: &[&str], report: &mut dyn Report) -> Scan {
        GnuMatcher::new(self, registry, report, tokens).scan()
    }

    fn prefixes(&self) -> (&str, &str) {
        (&self.short_prefix, &self.long_prefix)
    }
}
