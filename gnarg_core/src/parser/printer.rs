use crate::api::OptionSpec;
use crate::model::Arity;
use crate::parser::{terminal_width, Columns};

const MAIN_INDENT: usize = 1;
const PADDING_WIDTH: usize = 3;

/// Renders the help message for a collection of option declarations.
pub(crate) struct Printer {
    total_width: usize,
    short_prefix: String,
    long_prefix: String,
}

struct Row {
    usage: String,
    left: String,
    middle: String,
}

impl Printer {
    /// A printer sized to the attached terminal.
    pub(crate) fn terminal(short_prefix: &str, long_prefix: &str) -> Self {
        Self::new(terminal_width(), short_prefix, long_prefix)
    }

    pub(crate) fn new(total_width: usize, short_prefix: &str, long_prefix: &str) -> Self {
        Self {
            total_width,
            short_prefix: short_prefix.to_string(),
            long_prefix: long_prefix.to_string(),
        }
    }

    /// Render the usage line, followed by the options table (in declaration order).
    ///
    /// Options with neither a short nor a long name cannot be matched, so they are left out.
    pub(crate) fn render<'s>(
        &self,
        program: &str,
        specs: impl Iterator<Item = &'s OptionSpec>,
    ) -> String {
        let rows: Vec<Row> = specs.filter_map(|spec| self.row(spec)).collect();
        let mut usage = format!("usage: {program}");

        for row in &rows {
            usage.push(' ');
            usage.push_str(&row.usage);
        }

        if rows.is_empty() {
            return usage;
        }

        let left_width = rows
            .iter()
            .map(|r| r.left.chars().count())
            .max()
            .unwrap_or_default();
        let middle_width = rows
            .iter()
            .map(|r| r.middle.chars().count())
            .max()
            .unwrap_or_default();
        let columns = Columns::guided(
            MAIN_INDENT,
            left_width,
            PADDING_WIDTH,
            middle_width,
            self.total_width,
        );
        let mut lines = vec![usage, String::default(), "options:".to_string()];

        for row in &rows {
            lines.extend(columns.render(&row.left, &row.middle));
        }

        lines.join("\n")
    }

    fn row(&self, spec: &OptionSpec) -> Option<Row> {
        let grammar = grammar(spec.name(), spec.bounds());
        let mut names: Vec<String> = spec
            .short_names()
            .map(|s| format!("{}{s}", self.short_prefix))
            .collect();
        names.extend(spec.long_names().map(|l| format!("{}{l}", self.long_prefix)));
        let first = names.first()?;

        let usage = if spec.is_required() {
            format!("{first}{grammar}")
        } else {
            format!("[{first}{grammar}]")
        };
        let mut middle = spec.description().to_string();

        if spec.is_required() {
            if !middle.is_empty() {
                middle.push(' ');
            }

            middle.push_str("(required)");
        }

        Some(Row {
            usage,
            left: format!("{}{grammar}", names.join(", ")),
            middle,
        })
    }
}

// Ex: "output" with `Arity::at_least(1)` is " OUTPUT [...]".
fn grammar(name: &str, arity: Arity) -> String {
    let example = name.to_ascii_uppercase().replace('-', "_");
    let repeat = |n: u8| {
        (0..n)
            .map(|_| format!(" {example}"))
            .collect::<Vec<String>>()
            .join("")
    };

    match arity {
        Arity::Range(min, max) if min == max => repeat(min),
        Arity::Range(0, 1) => format!(" [{example}]"),
        Arity::Range(min, max) => format!(" {example}{{{min}..={max}}}"),
        Arity::Lower(0) => format!(" [{example} ...]"),
        Arity::Lower(min) => format!("{} [...]", repeat(min)),
    }
}
