use thiserror::Error;

use crate::api::TransformError;
use crate::model::Arity;

/// A problem with the option declarations, detected before any parsing happens.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A short or long name which the strategy cannot express.
    #[error("Config error: option '{name}' is malformed: {detail}.")]
    InvalidOptionShape {
        /// The canonical name of the offending option.
        name: String,
        /// What is wrong with it.
        detail: String,
    },

    /// Two options share a canonical name.
    #[error("Config error: cannot duplicate the option '{0}'.")]
    DuplicateName(String),

    /// Two options share a long name.
    #[error("Config error: option '{name}' cannot duplicate the long name '--{long}'.")]
    DuplicateLong {
        /// The canonical name of the second declaration.
        name: String,
        /// The shared long name.
        long: String,
    },

    /// Two options share a short name.
    #[error("Config error: option '{name}' cannot duplicate the short name '-{short}'.")]
    DuplicateShort {
        /// The canonical name of the second declaration.
        name: String,
        /// The shared short name.
        short: String,
    },

    /// An arity which is inverted, or which disagrees with the option being a flag.
    #[error("Config error: option '{name}' cannot take {arity} values.")]
    InvalidArity {
        /// The canonical name of the offending option.
        name: String,
        /// The declared arity.
        arity: Arity,
    },

    /// A dependency naming an undeclared option.
    #[error("Config error: option '{name}' depends on the undeclared option '{dependency}'.")]
    UnknownDependency {
        /// The canonical name of the dependent option.
        name: String,
        /// The undeclared dependency.
        dependency: String,
    },
}

/// A problem encountered while parsing.
///
/// None of these are fatal: the parse carries on, and each problem is delivered through a [`Report`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The option (as written, without its prefix) is not declared.
    #[error("Option '{0}' does not exist.")]
    UnrecognizedOption(String),

    /// The option is declared, but was written in a form it cannot accept.
    #[error("Option '{name}' {reason}.")]
    InvalidFormat {
        /// The canonical option name.
        name: String,
        /// What is wrong with the form.
        reason: String,
    },

    /// Fewer values than the option's minimum arity were accumulated.
    #[error("Not enough values provided to option '{name}' (found={found}, minimum={min}).")]
    MissingRequiredArguments {
        /// The canonical option name.
        name: String,
        /// How many values were accumulated.
        found: usize,
        /// The minimum arity.
        min: u8,
    },

    /// More values followed the option than its maximum arity allows; the excess was left alone.
    #[error("Too many values provided to option '{name}' (maximum={max}).")]
    ExceededMaximumArguments {
        /// The canonical option name.
        name: String,
        /// The maximum arity.
        max: u8,
    },

    /// A value could not be transformed into the option's type.
    #[error("Option '{name}' {source}")]
    Transform {
        /// The canonical option name.
        name: String,
        /// The failed transform.
        source: TransformError,
    },

    /// A required option was never matched.
    #[error("Option '{0}' is required.")]
    MissingRequiredOption(String),

    /// An option was matched without one of its dependencies.
    #[error("Option '{name}' requires the option '{dependency}'.")]
    MissingDependency {
        /// The canonical option name.
        name: String,
        /// The canonical name of the missing dependency.
        dependency: String,
    },
}

/// The single channel through which parse problems are delivered.
pub trait Report {
    /// Deliver a problem.
    fn report(&mut self, error: ParseError);
}

impl Report for Vec<ParseError> {
    fn report(&mut self, error: ParseError) {
        self.push(error);
    }
}

/// Reports each problem onto stderr as it happens.
#[derive(Debug, Default)]
pub struct ConsoleReport {
    reported: usize,
}

impl ConsoleReport {
    /// How many problems have been reported.
    pub fn reported(&self) -> usize {
        self.reported
    }
}

impl Report for ConsoleReport {
    fn report(&mut self, error: ParseError) {
        eprintln!("Parse error: {error}");
        self.reported += 1;
    }
}

/// Discards every problem.
#[derive(Debug, Default)]
pub struct Silent;

impl Report for Silent {
    fn report(&mut self, _error: ParseError) {
        // Do nothing.
    }
}
