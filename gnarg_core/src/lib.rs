//! Core module for `gnarg`.
//! See the `gnarg` crate documentation for full details.
#![deny(missing_docs)]
mod api;
mod constant;
mod matcher;
mod model;
mod parser;
#[allow(missing_docs)]
pub mod prelude;
mod registry;
mod strategy;

pub use api::*;
pub use model::*;
pub use parser::{
    ConfigError, ConsoleReport, Outcome, ParseError, Parser, ParserConfiguration, Report,
    Residual, Silent,
};
pub use registry::*;
pub use strategy::*;

#[cfg(test)]
#[macro_use]
extern crate assert_matches;

#[cfg(test)]
pub(crate) mod test {
    macro_rules! assert_contains {
        ($base:expr, $sub:expr) => {
            assert!(
                $base.contains($sub),
                "'{b}' does not contain '{s}'",
                b = $base,
                s = $sub,
            );
        };
    }

    pub(crate) use assert_contains;
}
