use std::collections::HashMap;

use crate::api::*;
use crate::model::Arity;
use crate::parser::ConfigError;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

// We need a (dyn .. [ignoring T] ..) here in order to put all the accumulators of varying types T under one collection.
// In other words, we want the bottom of the object graph to include the types T, but up here we want to work across all T.
type Binding<'a> = (OptionSpec, Box<dyn AnonymousAccumulate + 'a>);

/// Binds option declarations to their accumulators.
///
/// ```
/// use gnarg_core::{OptionSpec, Registry, Single, Switch};
///
/// let verbose = Switch::flag();
/// let output: Single<String> = Single::new();
/// let registry = Registry::builder()
///     .option(OptionSpec::new("verbose").short("v").flag(), verbose.clone())
///     .option(OptionSpec::new("output").long("output"), output.clone())
///     .build()
///     .unwrap();
/// assert_eq!(registry.len(), 2);
/// ```
pub struct RegistryBuilder<'a> {
    bindings: Vec<Binding<'a>>,
}

impl<'a> RegistryBuilder<'a> {
    /// Bind an option to its accumulator.
    /// Hold onto a clone of the accumulator in order to read the result after parsing.
    pub fn option<T: 'a>(
        mut self,
        spec: OptionSpec,
        accumulator: impl Accumulate<T> + 'a,
    ) -> Self {
        let accumulator: Box<dyn AnonymousAccumulate + 'a> =
            Box::new(AnonymousAccumulator::bind(accumulator));
        self.bindings.push((spec, accumulator));
        self
    }

    #[cfg(test)]
    pub(crate) fn anonymous(mut self, spec: OptionSpec) -> Self {
        self.bindings.push((spec, Box::new(BlackHole::default())));
        self
    }

    /// Check the declarations for internal consistency, and produce the registry.
    ///
    /// Every accumulator is reset to its default.
    pub fn build(self) -> Result<Registry<'a>, ConfigError> {
        let mut registry = Registry {
            entries: Vec::default(),
            names: HashMap::default(),
            longs: HashMap::default(),
            shorts: HashMap::default(),
        };

        for (spec, mut accumulator) in self.bindings.into_iter() {
            let index = registry.entries.len();

            if registry.names.insert(spec.name().to_string(), index).is_some() {
                return Err(ConfigError::DuplicateName(spec.name().to_string()));
            }

            for long in spec.long_names() {
                if registry.longs.insert(long.to_string(), index).is_some() {
                    return Err(ConfigError::DuplicateLong {
                        name: spec.name().to_string(),
                        long: long.to_string(),
                    });
                }
            }

            for short in spec.short_names() {
                if registry.shorts.insert(short.to_string(), index).is_some() {
                    return Err(ConfigError::DuplicateShort {
                        name: spec.name().to_string(),
                        short: short.to_string(),
                    });
                }
            }

            let arity = spec.bounds();
            let inverted = matches!(arity, Arity::Range(min, max) if min > max);

            if inverted || (spec.is_flag() && arity != Arity::precisely(0)) {
                return Err(ConfigError::InvalidArity {
                    name: spec.name().to_string(),
                    arity,
                });
            }

            accumulator.reset();
            registry.entries.push(Entry { spec, accumulator });
        }

        for entry in &registry.entries {
            for dependency in entry.spec.dependencies() {
                if !registry.names.contains_key(dependency) {
                    return Err(ConfigError::UnknownDependency {
                        name: entry.spec.name().to_string(),
                        dependency: dependency.clone(),
                    });
                }
            }
        }

        #[cfg(feature = "tracing_debug")]
        {
            debug!(
                "Built registry of {} options ({} long names, {} short names).",
                registry.entries.len(),
                registry.longs.len(),
                registry.shorts.len()
            );
        }

        Ok(registry)
    }
}

struct Entry<'a> {
    spec: OptionSpec,
    accumulator: Box<dyn AnonymousAccumulate + 'a>,
}

/// The declared options, each bound to its accumulator, with lookups by long and short name.
///
/// Options are addressed by their index, which follows declaration order.
/// The registry is owned by a single [`crate::Parser`]; accumulation happens in place and is not synchronized.
pub struct Registry<'a> {
    entries: Vec<Entry<'a>>,
    names: HashMap<String, usize>,
    longs: HashMap<String, usize>,
    shorts: HashMap<String, usize>,
}

impl<'a> std::fmt::Debug for Registry<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("options", &self.specs().collect::<Vec<&OptionSpec>>())
            .finish()
    }
}

impl<'a> Registry<'a> {
    /// Start declaring options.
    pub fn builder() -> RegistryBuilder<'a> {
        RegistryBuilder {
            bindings: Vec::default(),
        }
    }

    /// The number of options.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no options.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The option declarations, in declaration order.
    pub fn specs(&self) -> impl Iterator<Item = &OptionSpec> {
        self.entries.iter().map(|entry| &entry.spec)
    }

    /// The declaration at `index`.
    ///
    /// Panics if `index` is out of bounds.
    pub fn spec(&self, index: usize) -> &OptionSpec {
        &self.entries[index].spec
    }

    /// Find an option by canonical name.
    pub fn find(&self, name: &str) -> Option<usize> {
        self.names.get(name).copied()
    }

    /// Find an option by long name (without its prefix).
    pub fn find_long(&self, long: &str) -> Option<usize> {
        self.longs.get(long).copied()
    }

    /// Find an option by short name.
    pub fn find_short(&self, short: char) -> Option<usize> {
        let mut buffer = [0; 4];
        self.shorts.get(&*short.encode_utf8(&mut buffer)).copied()
    }

    /// Whether `token` is verbatim the canonical or long name of some option.
    pub fn is_declared(&self, token: &str) -> bool {
        self.names.contains_key(token) || self.longs.contains_key(token)
    }

    /// Feed a raw value to the accumulator of the option at `index`.
    pub fn apply(&mut self, index: usize, raw: &str) -> Result<(), TransformError> {
        self.entries[index].accumulator.apply(raw)
    }

    /// Declare that the option at `index` has received its last value for this parse pass.
    pub fn complete(&mut self, index: usize) {
        self.entries[index].accumulator.complete();
    }
}
