//! `gnarg` is a GNU getopt style option parser for Rust.
//!
//! Rather than handing back a map of strings, `gnarg` accumulates typed values in place, as each option is matched.
//! The parser is built around a few design concerns:
//! * *Typed accumulation*:
//! Each option is bound to an accumulator which converts the raw token into `T` (via [`std::str::FromStr`] or a custom transform).
//! The user reads the result from the accumulator after parsing.
//! * *Familiar syntax*:
//! The GNU conventions (`--name=value`, `-abc`, `-ofile`, `--`) are supported out of the box.
//! * *Forgiving parsing*:
//! A malformed token doesn't abort the parse.
//! Every problem is delivered through a single [`Report`] channel, and the parse carries on (unless configured otherwise).
//! * *Residual arguments*:
//! Whatever isn't an option or an option value is handed back, in its original order, for the program to interpret.
//!
//! # Usage
//! This page includes a few demos on using `gnarg`.
//! More examples are outlined in the `demos` directory of the source.
//!
//! ```no_run
#![doc = include_str!("../demos/summer.rs")]
//! ```
//!
//! This generates the following Cli program:
//! ```console
//! $ summer -h
//! usage: summer [-h] [-v] -i ITEM [...] [-s SCALE]
//!
//! options:
//!  -h, --help              Show this help message and exit.
//!  -v, --verbose           Show each item.
//!  -i, --item ITEM [...]   The items to sum. (required)
//!  -s, --scale SCALE       Multiply the sum by this.
//!
//! $ summer -i 1 2 3
//! Sum: 6
//!
//! $ summer -vi1 2 -s 2 extra
//! Ignoring: extra
//! Item: 1
//! Item: 2
//! Sum: 6
//!
//! $ summer
//! Parse error: Option 'item' is required.
//!
//! $ summer -i 1 blah
//! Parse error: Option 'item' cannot convert 'blah' to u32.
//! ```
//!
//! # Declaring options
//! Options are declared with an [`OptionSpec`], and bound to an accumulator in a [`Registry`].
//! A declaration carries:
//! * A canonical name, unique across the registry.
//! * Any number of long names (`--NAME`) and short names (`-N`).
//! * The [`Arity`]: how many values the option takes each time it is specified.
//! * Whether it is a flag, whether it is required, and which other options it depends on.
//! * A description for the help message.
//!
//! Building the registry checks the declarations are consistent (no duplicated names, sensible arities, known dependencies).
//! Constructing the [`Parser`] then checks the names can be expressed under the GNU conventions.
//! Both report a [`ConfigError`].
//!
//! ### Accumulators
//! * [`Single`]: holds one value; the last value provided wins.
//! * [`List`]: appends every value, in order, onto any [Collectable](./prelude/trait.Collectable.html) (`Vec<T>` by default, or `HashSet<T>`).
//! * [`Async`]: a `List` which also hands each value to a callback, the moment it is accumulated.
//! An optional completion callback fires once per parse, after the option's last value.
//! * [`Switch`]: the accumulator for flags; presents its target value once matched.
//!
//! Accumulators are shared handles: hold onto a clone, and read it after parsing.
//! Implement [Accumulate](./prelude/trait.Accumulate.html) to write your own.
//!
//! ```
//! use gnarg::{List, OptionSpec, Parser, ParserConfiguration, Registry, Single};
//!
//! // The default for the 'level' option is '3'.
//! let level: Single<u8> = Single::new().with_default(3);
//! // The initial for the 'items' option is '[0]'; provided values extend it.
//! let items: List<u32> = List::new().with_default(vec![0]);
//!
//! let registry = Registry::builder()
//!     .option(OptionSpec::new("level").short("l"), level.clone())
//!     .option(OptionSpec::new("items").short("i"), items.clone())
//!     .build()
//!     .unwrap();
//! let mut parser = Parser::new(ParserConfiguration::gnu(), registry).unwrap();
//! let outcome = parser.parse(&["-i", "1", "-i2"]);
//!
//! assert!(outcome.is_clean());
//! assert_eq!(level.current_value(), 3);
//! assert_eq!(items.current_values(), vec![0, 1, 2]);
//! ```
//!
//! # Cli Semantics
//! `gnarg` parses the Cli tokens left to right, according to the following rules.
//!
//! * An empty token, or a lone `-`, is a residual argument.
//! * `--` ends option processing: every token after it is residual.
//! * `--NAME=VALUE` provides `VALUE` to the long option `NAME`.
//! Only the first `=` separates; `--key=1=2` provides `1=2`.
//! Further values may follow, up to the option's arity.
//! * `--NAME` consumes the following tokens as values, up to the option's arity.
//! Consumption stops at anything that looks like an option, or that names a declared option.
//! * `-abc` matches the short options `a`, `b` and `c`, in that order.
//! The first short option in the cluster that takes values consumes the rest of the cluster as its first value:
//! `-ofile` is equivalent to `-o file`, and `-o=x` provides `=x`.
//! * Anything else is residual.
//! By default options and residual arguments may be interleaved; [`ArgumentOrder::RequireOrder`] stops at the first residual argument instead.
//!
//! ### Problems
//! All parse problems are reported as a [`ParseError`], and none of them stop the parse by default.
//! * An undeclared option is skipped; [`Recovery::Halt`] instead leaves it, and everything after it, as residual.
//! * A flag given a value, or a long option missing its values, is reported as an invalid format.
//! * An option given fewer values than its arity allows is reported; so is a variable width option followed by more values than it takes.
//! * A value failing its conversion is reported, and the parse moves on to the next token.
//! * Once the tokens are exhausted, unmatched required options and unmet dependencies are reported.
//!
//! ### Arity
//! ```console
//! Arity             | Syntax              | Description
//! ---------------------------------------------------------------------------
//! precisely(0)      | [--NAME]            | a flag
//! precisely(n)      | [--NAME V .. V]     | precisely n
//! range(0, 1)       | [--NAME [V]]        | optionally 1
//! range(m, n)       | [--NAME V{m..=n}]   | between m and n
//! any()             | [--NAME [V ...]]    | any amount
//! at_least(n)       | [--NAME V .. [...]] | at least n
//! ```
//!
//! # Features
//! * `tracing_debug`: Emit `tracing` debug events describing how the tokens are matched.
pub use gnarg_core::*;
