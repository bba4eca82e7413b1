use thiserror::Error;

use crate::model::Arity;
use crate::parser::ParseError;

#[derive(Debug, Error, PartialEq, Eq)]
pub(super) enum CloseError {
    #[error("too few values provided for '{name}' (provided={provided}, expected={expected}).")]
    TooFewValues {
        name: String,
        provided: usize,
        expected: u8,
    },
}

impl From<CloseError> for ParseError {
    fn from(error: CloseError) -> Self {
        match error {
            CloseError::TooFewValues {
                name,
                provided,
                expected,
            } => ParseError::MissingRequiredArguments {
                name,
                found: provided,
                min: expected,
            },
        }
    }
}

/// The arguments window of a single option invocation.
///
/// Tracks how many tokens were consumed (which bounds the window above),
/// and how many of those were successfully accumulated (which must satisfy the lower bound).
#[derive(Debug)]
pub(super) struct Window {
    name: String,
    arity: Arity,
    consumed: usize,
    accumulated: usize,
}

impl Window {
    pub(super) fn new(name: impl Into<String>, arity: Arity) -> Self {
        Self {
            name: name.into(),
            arity,
            consumed: 0,
            accumulated: 0,
        }
    }

    pub(super) fn name(&self) -> &str {
        &self.name
    }

    pub(super) fn arity(&self) -> Arity {
        self.arity
    }

    pub(super) fn consumed(&self) -> usize {
        self.consumed
    }

    pub(super) fn push(&mut self, accumulated: bool) {
        self.consumed += 1;

        if accumulated {
            self.accumulated += 1;
        }
    }

    pub(super) fn is_open(&self) -> bool {
        self.arity.admits(self.consumed)
    }

    pub(super) fn can_close(&self) -> bool {
        self.accumulated >= self.arity.min() as usize
    }

    pub(super) fn close(self) -> Result<(), CloseError> {
        if self.can_close() {
            Ok(())
        } else {
            Err(CloseError::TooFewValues {
                name: self.name,
                provided: self.accumulated,
                expected: self.arity.min(),
            })
        }
    }
}
