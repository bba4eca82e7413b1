use crate::matcher::model::*;
use crate::model::Arity;
use crate::parser::{ParseError, Report};
use crate::registry::Registry;
use crate::strategy::{ArgumentOrder, Gnu, Recovery, Scan};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

#[derive(Debug, PartialEq, Eq)]
enum Token<'t> {
    NonOption,
    Terminator,
    Long(&'t str, Option<&'t str>),
    Short(&'t str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Halt,
}

/// The GNU state machine over a single pass of the input tokens.
///
/// Holds an explicit cursor into the tokens; every step runs to completion before the next token is classified.
pub(crate) struct GnuMatcher<'g, 'r, 'a, 't, R: Report + ?Sized> {
    gnu: &'g Gnu,
    registry: &'r mut Registry<'a>,
    report: &'r mut R,
    tokens: &'t [&'t str],
    cursor: usize,
    residual: Vec<usize>,
    matched: Vec<usize>,
}

impl<'g, 'r, 'a, 't, R: Report + ?Sized> GnuMatcher<'g, 'r, 'a, 't, R> {
    pub(crate) fn new(
        gnu: &'g Gnu,
        registry: &'r mut Registry<'a>,
        report: &'r mut R,
        tokens: &'t [&'t str],
    ) -> Self {
        Self {
            gnu,
            registry,
            report,
            tokens,
            cursor: 0,
            residual: Vec::default(),
            matched: Vec::default(),
        }
    }

    pub(crate) fn scan(mut self) -> Scan {
        let tail = self.run();

        for index in &self.matched {
            self.registry.complete(*index);
        }

        Scan {
            residual: self.residual,
            tail,
            matched: self.matched,
        }
    }

    // Returns the position from which all tokens are residual.
    fn run(&mut self) -> usize {
        let tokens = self.tokens;

        while let Some(token) = tokens.get(self.cursor).copied() {
            let index = self.cursor;
            self.cursor += 1;
            let classified = classify(self.gnu, token);

            #[cfg(feature = "tracing_debug")]
            {
                debug!("Token {index} '{token}' classified as {classified:?}.");
            }

            let flow = match classified {
                Token::NonOption => {
                    if self.gnu.ordering() == ArgumentOrder::RequireOrder {
                        return index;
                    }

                    self.residual.push(index);
                    Flow::Continue
                }
                Token::Terminator => return self.cursor,
                Token::Long(name, inline) => self.match_long(name, inline),
                Token::Short(cluster) => self.match_short(cluster),
            };

            if flow == Flow::Halt {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Halting option processing at token {index} '{token}'.");
                }

                return index;
            }
        }

        tokens.len()
    }

    fn match_long(&mut self, name: &str, inline: Option<&str>) -> Flow {
        let index = match self.registry.find_long(name) {
            Some(index) => index,
            None => return self.recover(ParseError::UnrecognizedOption(name.to_string())),
        };
        let spec = self.registry.spec(index);
        let is_flag = spec.is_flag();
        let mut window = Window::new(spec.name(), spec.bounds());

        // The option only counts as matched once the form it was written in is accepted.
        match (is_flag, inline) {
            (true, None) => {
                self.touch(index);
                self.feed_flag(index, window.name());
                Flow::Continue
            }
            (true, Some(_)) => self.recover(takes_no_value(&window)),
            (false, Some(_)) if !window.is_open() => self.recover(takes_no_value(&window)),
            (false, Some(value)) => {
                self.touch(index);
                self.feed(&mut window, index, value);
                self.consume(&mut window, index);
                self.close(window);
                Flow::Continue
            }
            (false, None) => {
                self.consume(&mut window, index);

                // The `--name` alone form.
                if window.consumed() == 0 && window.arity().min() > 0 {
                    self.recover(ParseError::InvalidFormat {
                        name: window.name().to_string(),
                        reason: "requires a value".to_string(),
                    })
                } else {
                    self.touch(index);
                    self.close(window);
                    Flow::Continue
                }
            }
        }
    }

    fn match_short(&mut self, cluster: &str) -> Flow {
        // A halt leaves the whole token residual, so nothing in the cluster may be applied first.
        if self.gnu.recovery() == Recovery::Halt {
            if let Some(error) = self.vet_cluster(cluster) {
                return self.recover(error);
            }
        }

        for (offset, short) in cluster.char_indices() {
            let index = match self.registry.find_short(short) {
                Some(index) => index,
                None => {
                    if self.recover(ParseError::UnrecognizedOption(short.to_string())) == Flow::Halt
                    {
                        return Flow::Halt;
                    }

                    continue;
                }
            };
            let spec = self.registry.spec(index);
            let is_flag = spec.is_flag();
            let mut window = Window::new(spec.name(), spec.bounds());

            if is_flag {
                self.touch(index);
                self.feed_flag(index, window.name());
                continue;
            }

            // The remainder of the cluster is the first value: `-ofoo` is `-o foo`.
            let tail = &cluster[offset + short.len_utf8()..];

            if !tail.is_empty() && !window.is_open() {
                return self.recover(takes_no_value(&window));
            }

            self.touch(index);

            if !tail.is_empty() {
                self.feed(&mut window, index, tail);
            }

            self.consume(&mut window, index);
            self.close(window);
            return Flow::Continue;
        }

        Flow::Continue
    }

    // The first problem in the cluster that would trigger recovery, if any.
    fn vet_cluster(&self, cluster: &str) -> Option<ParseError> {
        for (offset, short) in cluster.char_indices() {
            let spec = match self.registry.find_short(short) {
                Some(index) => self.registry.spec(index),
                None => return Some(ParseError::UnrecognizedOption(short.to_string())),
            };

            if spec.is_flag() {
                continue;
            }

            let window = Window::new(spec.name(), spec.bounds());
            let tail = &cluster[offset + short.len_utf8()..];

            if !tail.is_empty() && !window.is_open() {
                return Some(takes_no_value(&window));
            }

            return None;
        }

        None
    }

    fn consume(&mut self, window: &mut Window, index: usize) {
        let tokens = self.tokens;

        while let Some(token) = tokens.get(self.cursor).copied() {
            if looks_like_option(self.gnu, token) || self.registry.is_declared(token) {
                break;
            }

            if !window.is_open() {
                if let (true, Some(max)) = (window.arity().is_variable(), window.arity().max()) {
                    self.report.report(ParseError::ExceededMaximumArguments {
                        name: window.name().to_string(),
                        max,
                    });
                }

                break;
            }

            self.cursor += 1;
            self.feed(window, index, token);
        }
    }

    fn feed(&mut self, window: &mut Window, index: usize, raw: &str) {
        let accumulated = match self.registry.apply(index, raw) {
            Ok(()) => true,
            Err(source) => {
                self.report.report(ParseError::Transform {
                    name: window.name().to_string(),
                    source,
                });
                false
            }
        };

        #[cfg(feature = "tracing_debug")]
        {
            debug!(
                "Option '{}' fed '{raw}' (accumulated: {accumulated}).",
                window.name()
            );
        }

        window.push(accumulated);
    }

    fn feed_flag(&mut self, index: usize, name: &str) {
        // A flag's arity is zero, so nothing trails it.
        let mut window = Window::new(name, Arity::precisely(0));
        self.feed(&mut window, index, "");
    }

    fn close(&mut self, window: Window) {
        if let Err(error) = window.close() {
            self.report.report(error.into());
        }
    }

    fn touch(&mut self, index: usize) {
        if !self.matched.contains(&index) {
            self.matched.push(index);
        }
    }

    fn recover(&mut self, error: ParseError) -> Flow {
        self.report.report(error);

        match self.gnu.recovery() {
            Recovery::Skip => Flow::Continue,
            Recovery::Halt => Flow::Halt,
        }
    }
}

fn takes_no_value(window: &Window) -> ParseError {
    ParseError::InvalidFormat {
        name: window.name().to_string(),
        reason: "does not take a value".to_string(),
    }
}

fn classify<'t>(gnu: &Gnu, token: &'t str) -> Token<'t> {
    if token.is_empty() || token == gnu.non_option() {
        Token::NonOption
    } else if token == gnu.terminator() {
        Token::Terminator
    } else if let Some(token) = token.strip_prefix(gnu.long_prefix()) {
        match token.split_once(crate::constant::INLINE_DELIMITER) {
            Some((name, value)) => Token::Long(name, Some(value)),
            None => Token::Long(token, None),
        }
    } else if let Some(token) = token.strip_prefix(gnu.short_prefix()) {
        Token::Short(token)
    } else {
        Token::NonOption
    }
}

fn looks_like_option(gnu: &Gnu, token: &str) -> bool {
    !token.is_empty()
        && token != gnu.non_option()
        && (token.starts_with(gnu.long_prefix()) || token.starts_with(gnu.short_prefix()))
}
