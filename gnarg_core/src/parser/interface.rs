use terminal_size::{terminal_size, Width};

use crate::constant::DEFAULT_TERMINAL_WIDTH;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

// We'll target 95% of the total width, to ensure the columns don't literally use the full space.
const TARGET_TOTAL_FACTOR: f64 = 0.95;

// Let's assume the average word length is 5.
// Then 17 is a good minimum, because it allows precisely 3 words with a space between them.
pub(crate) const MINIMUM_MIDDLE_WIDTH: usize = 17;

/// The width of the attached terminal, or the default when there isn't one.
pub(crate) fn terminal_width() -> usize {
    match terminal_size() {
        Some((Width(width), _)) => width as usize,
        None => DEFAULT_TERMINAL_WIDTH,
    }
}

/// A two column layout: names on the left, descriptions wrapped in the middle.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Columns {
    indent: usize,
    left: usize,
    padding: usize,
    middle: usize,
}

impl Columns {
    /// Choose the middle width so that the whole row fits within `total` where possible.
    /// The middle never drops below [`MINIMUM_MIDDLE_WIDTH`].
    pub(crate) fn guided(
        indent: usize,
        left: usize,
        padding: usize,
        desired_middle: usize,
        total: usize,
    ) -> Self {
        assert!(padding >= 1);
        let non_middle = indent + left + padding;
        let target = (total as f64 * TARGET_TOTAL_FACTOR) as usize;
        let desired_middle = std::cmp::max(desired_middle, MINIMUM_MIDDLE_WIDTH);

        let middle = if desired_middle + non_middle <= target {
            desired_middle
        } else if non_middle < target {
            std::cmp::max(target - non_middle, MINIMUM_MIDDLE_WIDTH)
        } else {
            MINIMUM_MIDDLE_WIDTH
        };

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Columns {non_middle} against target {target} (total {total}).  Selecting middle: {middle}.");
        }

        Self {
            indent,
            left,
            padding,
            middle,
        }
    }

    #[cfg(test)]
    pub(crate) fn middle(&self) -> usize {
        self.middle
    }

    /// Lay out one row, wrapping the middle column across as many lines as it needs.
    pub(crate) fn render(&self, left: &str, middle: &str) -> Vec<String> {
        let Columns {
            indent,
            left: left_width,
            padding,
            middle: middle_width,
        } = *self;
        assert!(left.chars().count() <= left_width);
        let mut lines = Vec::default();

        for (i, part) in wrap(middle, middle_width).into_iter().enumerate() {
            let label = if i == 0 { left } else { "" };
            lines.push(format!(
                "{:indent$}{label:left_width$}{:padding$}{part}",
                "", ""
            ));
        }

        if lines.is_empty() {
            lines.push(format!("{:indent$}{left}", ""));
        }

        lines
    }
}

/// Break a paragraph into lines of at most `width` characters.
/// Words longer than the width are hyphenated.
pub(crate) fn wrap(paragraph: &str, width: usize) -> Vec<String> {
    assert!(width >= 2);
    let mut lines = Vec::default();
    let mut current = String::default();

    for word in paragraph.split_whitespace() {
        let length = word.chars().count();

        if current.is_empty() {
            hyphenate(width, &mut lines, &mut current, word);
        } else if current.chars().count() + length + 1 <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            hyphenate(width, &mut lines, &mut current, word);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

fn hyphenate(width: usize, lines: &mut Vec<String>, current: &mut String, word: &str) {
    let chars: Vec<char> = word.chars().collect();
    let step = width - 1;
    let mut start = 0;

    while chars.len() - start > width {
        let piece: String = chars[start..start + step].iter().collect();
        lines.push(format!("{piece}-"));
        start += step;
    }

    current.extend(&chars[start..]);
}
