use crate::parser::base::*;
use crate::parser::printer::Printer;
use crate::registry::Registry;
use crate::strategy::{Gnu, Strategy};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// How the [`Parser`] interprets its input tokens.
pub struct ParserConfiguration {
    strategy: Box<dyn Strategy>,
}

impl Default for ParserConfiguration {
    fn default() -> Self {
        Self::gnu()
    }
}

impl ParserConfiguration {
    /// Interpret the tokens with the provided strategy.
    pub fn new(strategy: impl Strategy + 'static) -> Self {
        Self {
            strategy: Box::new(strategy),
        }
    }

    /// Interpret the tokens with the default GNU conventions.
    pub fn gnu() -> Self {
        Self::new(Gnu::default())
    }
}

impl std::fmt::Debug for ParserConfiguration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParserConfiguration").finish_non_exhaustive()
    }
}

/// The configured command line parser.
///
/// Accumulation happens in place, through the accumulator handles bound in the [`Registry`].
/// Those handles are not thread safe, so neither is the parser: it is neither `Send` nor `Sync`, and parses one token sequence at a time.
///
/// ```
/// use gnarg_core::{OptionSpec, Parser, ParserConfiguration, Registry, Single, Switch};
///
/// let verbose = Switch::flag();
/// let output: Single<String> = Single::new();
/// let registry = Registry::builder()
///     .option(OptionSpec::new("verbose").short("v").flag(), verbose.clone())
///     .option(OptionSpec::new("output").short("o").long("output"), output.clone())
///     .build()
///     .unwrap();
/// let mut parser = Parser::new(ParserConfiguration::gnu(), registry).unwrap();
///
/// let outcome = parser.parse(&["-vo", "out.txt", "in.txt"]);
/// assert!(outcome.errors.is_empty());
/// assert_eq!(outcome.residual.collect::<Vec<&str>>(), vec!["in.txt"]);
/// assert!(verbose.current_value());
/// assert_eq!(output.current_value(), "out.txt");
/// ```
#[derive(Debug)]
pub struct Parser<'a> {
    configuration: ParserConfiguration,
    registry: Registry<'a>,
}

impl<'a> Parser<'a> {
    /// Produce a parser, checking the registry's option names against the configured strategy.
    pub fn new(
        configuration: ParserConfiguration,
        registry: Registry<'a>,
    ) -> Result<Self, ConfigError> {
        configuration.strategy.validate_options(&registry)?;

        Ok(Self {
            configuration,
            registry,
        })
    }

    /// The option declarations and their accumulators.
    pub fn registry(&self) -> &Registry<'a> {
        &self.registry
    }

    /// Run the parser against the input tokens, collecting any problems into the [`Outcome`].
    ///
    /// Accumulators are not reset between parses; values accumulate across calls.
    pub fn parse<'t, S: AsRef<str>>(&mut self, tokens: &'t [S]) -> Outcome<'t, S> {
        let mut errors: Vec<ParseError> = Vec::default();
        let residual = self.parse_with(tokens, &mut errors);
        Outcome { residual, errors }
    }

    /// Run the parser against the input tokens, delivering any problems to `report` as they happen.
    ///
    /// Once the tokens are scanned, each required option that wasn't matched is reported, as is each matched option whose dependency wasn't matched.
    /// Returns the tokens which weren't consumed as options or option values, in their original order.
    pub fn parse_with<'t, S: AsRef<str>, R: Report + ?Sized>(
        &mut self,
        tokens: &'t [S],
        report: &mut R,
    ) -> Residual<'t, S> {
        let views: Vec<&str> = tokens.iter().map(AsRef::as_ref).collect();

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Parsing tokens: {views:?}.");
        }

        let mut reporter = Forward(report);
        let scan = self
            .configuration
            .strategy
            .scan(&mut self.registry, &views, &mut reporter);

        for (index, spec) in self.registry.specs().enumerate() {
            let matched = scan.matched.contains(&index);

            if spec.is_required() && !matched {
                reporter.report(ParseError::MissingRequiredOption(spec.name().to_string()));
            }

            if matched {
                for dependency in spec.dependencies() {
                    let satisfied = self
                        .registry
                        .find(dependency)
                        .map_or(false, |d| scan.matched.contains(&d));

                    if !satisfied {
                        reporter.report(ParseError::MissingDependency {
                            name: spec.name().to_string(),
                            dependency: dependency.clone(),
                        });
                    }
                }
            }
        }

        #[cfg(feature = "tracing_debug")]
        {
            debug!(
                "Scan matched {} options, leaving {} residual tokens.",
                scan.matched.len(),
                scan.residual.len() + (tokens.len() - scan.tail)
            );
        }

        Residual {
            tokens,
            indices: scan.residual.into_iter(),
            tail: scan.tail..tokens.len(),
        }
    }

    /// Render the help message, sized to the attached terminal.
    pub fn help(&self, program: &str) -> String {
        let (short_prefix, long_prefix) = self.configuration.strategy.prefixes();
        Printer::terminal(short_prefix, long_prefix).render(program, self.registry.specs())
    }

    /// Display the help message on stdout.
    pub fn print_help(&self, program: &str) {
        println!("{}", self.help(program));
    }
}

// Lets a possibly unsized report be handed to the strategy as a `dyn Report`.
struct Forward<'r, R: Report + ?Sized>(&'r mut R);

impl<'r, R: Report + ?Sized> Report for Forward<'r, R> {
    fn report(&mut self, error: ParseError) {
        self.0.report(error);
    }
}

/// The result of [`Parser::parse`].
#[derive(Debug)]
pub struct Outcome<'t, S> {
    /// The tokens which weren't consumed as options or option values.
    pub residual: Residual<'t, S>,
    /// The problems encountered, in the order they happened.
    pub errors: Vec<ParseError>,
}

impl<'t, S> Outcome<'t, S> {
    /// Whether the parse encountered no problems.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// The tokens left over from a parse, in their original order.
#[derive(Debug)]
pub struct Residual<'t, S> {
    tokens: &'t [S],
    indices: std::vec::IntoIter<usize>,
    tail: std::ops::Range<usize>,
}

impl<'t, S: AsRef<str>> Iterator for Residual<'t, S> {
    type Item = &'t str;

    fn next(&mut self) -> Option<Self::Item> {
        let tokens = self.tokens;
        let index = self.indices.next().or_else(|| self.tail.next())?;
        Some(tokens[index].as_ref())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.indices.len() + self.tail.len();
        (remaining, Some(remaining))
    }
}

impl<'t, S: AsRef<str>> ExactSizeIterator for Residual<'t, S> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::*;
    use crate::model::Arity;
    use crate::strategy::{Recovery, Scan};
    use crate::test::assert_contains;
    use rstest::rstest;

    #[test]
    fn parse_empty() {
        // Setup
        let registry = Registry::builder().build().unwrap();
        let mut parser = Parser::new(ParserConfiguration::default(), registry).unwrap();
        let tokens: Vec<String> = Vec::default();

        // Execute
        let outcome = parser.parse(&tokens);

        // Verify
        assert!(outcome.is_clean());
        assert_eq!(outcome.residual.count(), 0);
    }

    #[test]
    fn parse_owned_tokens() {
        // Setup
        let output: Single<String> = Single::new();
        let registry = Registry::builder()
            .option(OptionSpec::new("output").long("output"), output.clone())
            .build()
            .unwrap();
        let mut parser = Parser::new(ParserConfiguration::gnu(), registry).unwrap();
        let tokens: Vec<String> = vec!["a".to_string(), "--output=b".to_string(), "c".to_string()];

        // Execute
        let outcome = parser.parse(&tokens);

        // Verify
        assert!(outcome.is_clean());
        let residual = outcome.residual;
        assert_eq!(residual.len(), 2);
        assert_eq!(residual.collect::<Vec<&str>>(), vec!["a", "c"]);
        assert_eq!(output.current_value(), "b");
    }

    #[test]
    fn new_invalid() {
        // Setup
        let registry = Registry::builder()
            .option(OptionSpec::new("bad").short("ab"), Switch::flag())
            .build()
            .unwrap();

        // Execute
        let error = Parser::new(ParserConfiguration::gnu(), registry).unwrap_err();

        // Verify
        assert_matches!(error, ConfigError::InvalidOptionShape { .. });
        assert_contains!(error.to_string(), "Config error: option 'bad'");
    }

    #[rstest]
    #[case(vec![], vec![ParseError::MissingRequiredOption("output".to_string())])]
    #[case(vec!["-v"], vec![ParseError::MissingRequiredOption("output".to_string())])]
    #[case(vec!["-o", "x"], vec![])]
    #[case(vec!["-v", "-o", "x"], vec![])]
    fn parse_required(#[case] tokens: Vec<&str>, #[case] expected: Vec<ParseError>) {
        // Setup
        let registry = Registry::builder()
            .option(OptionSpec::new("verbose").short("v").flag(), Switch::flag())
            .option(
                OptionSpec::new("output").short("o").required(),
                Single::<String>::new(),
            )
            .build()
            .unwrap();
        let mut parser = Parser::new(ParserConfiguration::gnu(), registry).unwrap();

        // Execute
        let outcome = parser.parse(&tokens);

        // Verify
        assert_eq!(outcome.errors, expected);
    }

    #[rstest]
    #[case(vec![], vec![])]
    #[case(vec!["-u", "me"], vec![])]
    #[case(vec!["-p", "secret"], vec![ParseError::MissingDependency { name: "password".to_string(), dependency: "user".to_string() }])]
    #[case(vec!["-p", "secret", "-u", "me"], vec![])]
    #[case(vec!["-u", "me", "-p", "secret"], vec![])]
    fn parse_dependency(#[case] tokens: Vec<&str>, #[case] expected: Vec<ParseError>) {
        // Setup
        let registry = Registry::builder()
            .option(OptionSpec::new("user").short("u"), Single::<String>::new())
            .option(
                OptionSpec::new("password").short("p").depends_on("user"),
                Single::<String>::new(),
            )
            .build()
            .unwrap();
        let mut parser = Parser::new(ParserConfiguration::gnu(), registry).unwrap();

        // Execute
        let outcome = parser.parse(&tokens);

        // Verify
        assert_eq!(outcome.errors, expected);
    }

    #[test]
    fn parse_with_report() {
        // Setup
        let registry = Registry::builder()
            .option(
                OptionSpec::new("count").short("c").arity(Arity::range(1, 2)),
                List::<u32>::new(),
            )
            .build()
            .unwrap();
        let mut parser = Parser::new(
            ParserConfiguration::new(Gnu::default().with_recovery(Recovery::Halt)),
            registry,
        )
        .unwrap();
        let mut errors: Vec<ParseError> = Vec::default();

        // Execute
        let residual = parser
            .parse_with(&["-c", "1", "x", "-z", "2"], &mut errors)
            .collect::<Vec<&str>>();

        // Verify
        assert_eq!(residual, vec!["-z", "2"]);
        assert_matches!(errors[0], ParseError::Transform { .. });
        assert_eq!(errors[1], ParseError::UnrecognizedOption("z".to_string()));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn parse_with_dyn_report() {
        // Setup
        let registry = Registry::builder()
            .option(OptionSpec::new("x").short("x").required(), Switch::flag())
            .build()
            .unwrap();
        let mut parser = Parser::new(ParserConfiguration::gnu(), registry).unwrap();
        let mut console = ConsoleReport::default();
        let report: &mut dyn Report = &mut console;

        // Execute
        let residual = parser.parse_with(&["a"], report).collect::<Vec<&str>>();

        // Verify
        assert_eq!(residual, vec!["a"]);
        assert_eq!(console.reported(), 1);
    }

    struct Fixed;

    impl Strategy for Fixed {
        fn validate_options(&self, _registry: &Registry<'_>) -> Result<(), ConfigError> {
            Ok(())
        }

        fn scan(
            &self,
            _registry: &mut Registry<'_>,
            tokens: &[&str],
            report: &mut dyn Report,
        ) -> Scan {
            report.report(ParseError::UnrecognizedOption("fixed".to_string()));
            Scan {
                residual: vec![1],
                tail: tokens.len() - 1,
                matched: vec![],
            }
        }
    }

    #[test]
    fn custom_strategy() {
        // Setup
        let registry = Registry::builder()
            .option(OptionSpec::new("weird").short("?"), Switch::flag())
            .build()
            .unwrap();
        let mut parser = Parser::new(ParserConfiguration::new(Fixed), registry).unwrap();

        // Execute
        let outcome = parser.parse(&["a", "b", "c", "d"]);

        // Verify
        assert_eq!(
            outcome.errors,
            vec![ParseError::UnrecognizedOption("fixed".to_string())]
        );
        assert_eq!(outcome.residual.collect::<Vec<&str>>(), vec!["b", "d"]);
    }

    #[test]
    fn help() {
        // Setup
        let registry = Registry::builder()
            .option(
                OptionSpec::new("verbose")
                    .short("v")
                    .flag()
                    .help("Print more output."),
                Switch::flag(),
            )
            .build()
            .unwrap();
        let parser = Parser::new(ParserConfiguration::gnu(), registry).unwrap();

        // Execute
        let message = parser.help("program");

        // Verify
        assert_eq!(
            message,
            "usage: program [-v]\n\noptions:\n -v   Print more output."
        );
    }

    #[test]
    fn help_custom_prefixes() {
        // Setup
        let registry = Registry::builder()
            .option(
                OptionSpec::new("verbose")
                    .short("v")
                    .long("verbose")
                    .flag()
                    .help("Print more output."),
                Switch::flag(),
            )
            .build()
            .unwrap();
        let gnu = Gnu::default().with_short_prefix("+").with_long_prefix("++");
        let parser = Parser::new(ParserConfiguration::new(gnu), registry).unwrap();

        // Execute
        let message = parser.help("program");

        // Verify
        assert_eq!(
            message,
            "usage: program [+v]\n\noptions:\n +v, ++verbose   Print more output."
        );
    }

    #[rstest]
    #[case(vec!["--verbose=1"], vec!["--verbose=1"])]
    #[case(vec!["-x", "--verbose"], vec!["-x", "--verbose"])]
    fn parse_required_rejected(#[case] tokens: Vec<&str>, #[case] expected_residual: Vec<&str>) {
        // Setup
        let verbose = Switch::flag();
        let registry = Registry::builder()
            .option(
                OptionSpec::new("verbose").long("verbose").flag().required(),
                verbose.clone(),
            )
            .build()
            .unwrap();
        let gnu = Gnu::default().with_recovery(Recovery::Halt);
        let mut parser = Parser::new(ParserConfiguration::new(gnu), registry).unwrap();

        // Execute
        let outcome = parser.parse(&tokens);

        // Verify
        assert_eq!(outcome.errors.len(), 2);
        assert_eq!(
            outcome.errors[1],
            ParseError::MissingRequiredOption("verbose".to_string())
        );
        assert_eq!(
            outcome.residual.collect::<Vec<&str>>(),
            expected_residual
        );
        assert!(!verbose.current_value());
    }
}
