//! Marker protocol for the block CrashCue owns inside a profile
//!
//! A block starts with [`MARKER_START`] and ends with the next [`MARKER_END`].
//! Markers are stored as plain literals and only escaped when a matcher is
//! built from them.

use std::sync::LazyLock;

use regex::Regex;

/// First line of every injected block
pub const MARKER_START: &str = "# <crashcue-start>";
/// Last line of every injected block
pub const MARKER_END: &str = "# <crashcue-end>";

/// Matches one block, start marker through the nearest end marker.
static BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    block_regex(MARKER_START, MARKER_END, false).expect("marker pattern is valid")
});

/// Same as [`BLOCK`] but also eats a single trailing line terminator.
static BLOCK_WITH_EOL: LazyLock<Regex> = LazyLock::new(|| {
    block_regex(MARKER_START, MARKER_END, true).expect("marker pattern is valid")
});

/// Build a non-greedy matcher for a `start ... end` span.
///
/// `(?s)` lets `.` cross newlines. With `trailing_eol` the match also
/// swallows one `\n` or `\r\n` after the end marker, which is what removal
/// wants so the file does not keep an empty line where the block was.
pub fn block_regex(start: &str, end: &str, trailing_eol: bool) -> Result<Regex, regex::Error> {
    let eol = if trailing_eol { r"(?:\r?\n)?" } else { "" };
    let pattern = format!(
        "(?s){}.*?{}{}",
        regex::escape(start),
        regex::escape(end),
        eol
    );
    Regex::new(&pattern)
}

/// Matcher used to find (and replace) an installed block.
pub fn block_pattern() -> &'static Regex {
    &BLOCK
}

/// Matcher used to remove an installed block.
pub fn removal_pattern() -> &'static Regex {
    &BLOCK_WITH_EOL
}

/// True when `text` contains either marker literal.
pub fn contains_marker(text: &str) -> bool {
    text.contains(MARKER_START) || text.contains(MARKER_END)
}

/// Number of start markers in `content`.
pub fn start_marker_count(content: &str) -> usize {
    content.matches(MARKER_START).count()
}
