//! Regex construction with JS-style flags
//!
//! In extended (`x`) mode, trailing `# comment` text is stripped from each
//! line before compiling, so comments containing regex metacharacters do
//! not leak into the pattern.

use crate::types::Result;
use regex::{Regex, RegexBuilder};
use std::sync::OnceLock;

fn comment_suffix() -> &'static Regex {
    static COMMENT: OnceLock<Regex> = OnceLock::new();
    COMMENT.get_or_init(|| Regex::new(r"\s+#.+").expect("comment pattern is valid"))
}

/// Remove `# comment` suffixes, one per line
pub fn strip_comments(pattern: &str) -> String {
    pattern
        .split('\n')
        .map(|line| comment_suffix().replace(line, " "))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Compile `pattern` honoring the flags `i`, `m`, `s` and `x`
///
/// Unknown flags are ignored.
pub fn compile(pattern: &str, flags: &str) -> Result<Regex> {
    let extended = flags.contains('x');
    let source = if extended {
        strip_comments(pattern)
    } else {
        pattern.to_string()
    };

    let regex = RegexBuilder::new(&source)
        .case_insensitive(flags.contains('i'))
        .multi_line(flags.contains('m'))
        .dot_matches_new_line(flags.contains('s'))
        .ignore_whitespace(extended)
        .build()?;

    Ok(regex)
}
