use std::collections::BTreeSet;

use crate::model::Arity;

/// The declaration of an option: how it is named on the Cli, and how many values it takes.
///
/// Built via chained calls, and then bound to an accumulator in a [`crate::RegistryBuilder`].
///
/// ```
/// use gnarg_core::{Arity, OptionSpec};
///
/// let spec = OptionSpec::new("output")
///     .long("output")
///     .short("o")
///     .arity(Arity::precisely(1))
///     .help("Where to write the result.");
/// assert_eq!(spec.name(), "output");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSpec {
    name: String,
    long_names: BTreeSet<String>,
    short_names: BTreeSet<String>,
    required: bool,
    dependencies: Vec<String>,
    description: String,
    arity: Arity,
    is_flag: bool,
}

impl OptionSpec {
    /// Declare an option by its canonical (unique) name.
    /// Without further configuration, the option takes precisely one value.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            long_names: BTreeSet::default(),
            short_names: BTreeSet::default(),
            required: false,
            dependencies: Vec::default(),
            description: String::default(),
            arity: Arity::precisely(1),
            is_flag: false,
        }
    }

    /// Add a long name, specified as `--NAME`.
    pub fn long(mut self, name: impl Into<String>) -> Self {
        self.long_names.insert(name.into());
        self
    }

    /// Add a short name, specified as `-N`.
    pub fn short(mut self, name: impl Into<String>) -> Self {
        self.short_names.insert(name.into());
        self
    }

    /// Mark the option as required: a parse that never matches it reports an error.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Declare that matching this option requires also matching the `name` option.
    pub fn depends_on(mut self, name: impl Into<String>) -> Self {
        self.dependencies.push(name.into());
        self
    }

    /// Document the option.
    pub fn help(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the number of values taken.
    pub fn arity(mut self, arity: Arity) -> Self {
        self.arity = arity;
        self
    }

    /// Make the option a flag: it takes no values, and its mere presence is accumulated.
    pub fn flag(mut self) -> Self {
        self.is_flag = true;
        self.arity = Arity::precisely(0);
        self
    }

    /// The canonical name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The long names, in lexical order.
    pub fn long_names(&self) -> impl Iterator<Item = &str> {
        self.long_names.iter().map(String::as_str)
    }

    /// The short names, in lexical order.
    pub fn short_names(&self) -> impl Iterator<Item = &str> {
        self.short_names.iter().map(String::as_str)
    }

    /// Whether the option must be matched.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// The canonical names of the options this option depends on.
    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    /// The help description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The number of values taken.
    pub fn bounds(&self) -> Arity {
        self.arity
    }

    /// Whether the option is a flag.
    pub fn is_flag(&self) -> bool {
        self.is_flag
    }
}
