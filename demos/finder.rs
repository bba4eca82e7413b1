use gnarg::{
    ArgumentOrder, Arity, Async, Gnu, List, OptionSpec, Parser, ParserConfiguration, Recovery,
    Registry, Single, Switch,
};
use std::cell::RefCell;
use std::collections::HashSet;
use std::env;
use std::process::exit;
use std::rc::Rc;

fn main() {
    let ignore_case = Switch::flag();
    let context: Single<usize> = Single::new();
    let pattern_passes = Rc::new(RefCell::new(0));
    let inner = pattern_passes.clone();
    // Patterns are reported as soon as each one is parsed.
    let patterns: Async<String> = Async::new(|pattern: &String| println!("Pattern: {pattern}"))
        .on_complete(move || *inner.borrow_mut() += 1);
    let extensions: List<String, HashSet<String>> = List::new();

    let registry = Registry::builder()
        .option(
            OptionSpec::new("pattern")
                .short("e")
                .long("regexp")
                .arity(Arity::at_least(1))
                .required()
                .help("The patterns to search for."),
            patterns.clone(),
        )
        .option(
            OptionSpec::new("ignore-case")
                .short("i")
                .long("ignore-case")
                .flag()
                .help("Ignore case distinctions in the patterns."),
            ignore_case.clone(),
        )
        .option(
            OptionSpec::new("context")
                .short("C")
                .long("context")
                .help("Print this many lines of context."),
            context.clone(),
        )
        .option(
            OptionSpec::new("extension")
                .short("x")
                .long("extension")
                .arity(Arity::range(1, 3))
                .depends_on("pattern")
                .help("Only search files with these extensions (de-duplicated)."),
            extensions.clone(),
        )
        .build()
        .unwrap_or_else(|error| {
            eprintln!("{error}");
            exit(1);
        });
    // Everything after the first file is passed through untouched (ex: `finder -e x file -e`).
    let gnu = Gnu::default()
        .with_ordering(ArgumentOrder::RequireOrder)
        .with_recovery(Recovery::Halt);
    let mut parser = Parser::new(ParserConfiguration::new(gnu), registry).unwrap_or_else(|error| {
        eprintln!("{error}");
        exit(1);
    });

    let tokens: Vec<String> = env::args().skip(1).collect();
    let outcome = parser.parse(&tokens);

    if !outcome.is_clean() {
        for error in &outcome.errors {
            eprintln!("Parse error: {error}");
        }

        eprintln!();
        eprintln!("{}", parser.help("finder"));
        exit(1);
    }

    let files: Vec<&str> = outcome.residual.collect();
    println!("Pattern passes: {}", pattern_passes.borrow());
    println!("Ignore case: {}", ignore_case.current_value());
    println!("Context: {}", context.current_value());
    println!("Extensions: {:?}", extensions.current_values());
    println!("Files: {files:?}");
}
