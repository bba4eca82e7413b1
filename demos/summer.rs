use gnarg::{
    Arity, ConsoleReport, List, OptionSpec, Parser, ParserConfiguration, Registry, Single, Switch,
};
use std::env;
use std::process::exit;

fn main() {
    let verbose = Switch::flag();
    let help = Switch::flag();
    let items: List<u32> = List::new();
    let scale: Single<u32> = Single::new().with_default(1);

    let registry = Registry::builder()
        .option(
            OptionSpec::new("help")
                .short("h")
                .long("help")
                .flag()
                .help("Show this help message and exit."),
            help.clone(),
        )
        .option(
            OptionSpec::new("verbose")
                .short("v")
                .long("verbose")
                .flag()
                .help("Show each item."),
            verbose.clone(),
        )
        .option(
            OptionSpec::new("item")
                .short("i")
                .long("item")
                .arity(Arity::at_least(1))
                .required()
                .help("The items to sum."),
            items.clone(),
        )
        .option(
            OptionSpec::new("scale")
                .short("s")
                .long("scale")
                .help("Multiply the sum by this."),
            scale.clone(),
        )
        .build()
        .unwrap_or_else(|error| {
            eprintln!("{error}");
            exit(1);
        });
    let mut parser = Parser::new(ParserConfiguration::gnu(), registry).unwrap_or_else(|error| {
        eprintln!("{error}");
        exit(1);
    });

    let tokens: Vec<String> = env::args().skip(1).collect();
    let mut report = ConsoleReport::default();
    let residual: Vec<&str> = parser.parse_with(&tokens, &mut report).collect();

    if help.current_value() {
        parser.print_help("summer");
        exit(0);
    }

    if report.reported() > 0 {
        exit(1);
    }

    if !residual.is_empty() {
        eprintln!("Ignoring: {}", residual.join(" "));
    }

    let items = items.current_values();

    if verbose.current_value() {
        for item in &items {
            println!("Item: {item}");
        }
    }

    let sum: u32 = items.iter().sum();
    println!("Sum: {}", sum * scale.current_value());
}
