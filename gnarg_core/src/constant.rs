pub(crate) const LONG_PREFIX: &str = "--";
pub(crate) const SHORT_PREFIX: &str = "-";
pub(crate) const NON_OPTION: &str = "-";
pub(crate) const TERMINATOR: &str = "--";
// GNU allows `--name=value` for the inline form.
pub(crate) const INLINE_DELIMITER: char = '=';
// Fallback when the terminal width cannot be queried.
pub(crate) const DEFAULT_TERMINAL_WIDTH: usize = 80;
