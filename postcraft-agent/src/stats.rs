//! Display statistics for a generated post.
//!
//! Counts match the ones the web page shows: words are whitespace-separated
//! tokens, every `#` counts as a hashtag, and only non-blank lines count.
//! "Whitespace" is JavaScript's `\s`, which differs from `char::is_whitespace`
//! on U+0085 and U+FEFF.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PostStats {
    pub words: usize,
    pub hashtags: usize,
    pub lines: usize,
}

fn is_js_space(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{feff}'
}

impl PostStats {
    pub fn of(post: &str) -> Self {
        Self {
            words: post.split(is_js_space).filter(|w| !w.is_empty()).count(),
            hashtags: post.matches('#').count(),
            lines: post
                .split('\n')
                .filter(|line| !line.trim_matches(is_js_space).is_empty())
                .count(),
        }
    }
}

impl fmt::Display for PostStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} words | {} hashtags | {} lines",
            self.words, self.hashtags, self.lines
        )
    }
}
