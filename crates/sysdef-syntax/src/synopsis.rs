//! Synopsis extraction — find declaration lines between SYNOPSIS and DESCRIPTION.
//!
//! A rendered page looks like this up to the declarations:
//!
//! ```text
//! OPEN(2)                  Linux Programmer's Manual           OPEN(2)
//!
//! NAME
//!        open, creat - open and possibly create a file or device
//!
//! SYNOPSIS
//!        #include <fcntl.h>
//!
//!        int open(const char *pathname, int flags);
//!        int open(const char *pathname, int flags, mode_t mode);
//!
//!        int creat(const char *pathname, mode_t mode);
//!
//! DESCRIPTION
//! ```
//!
//! Lines are expected to be overstrike-normalized already.

use crate::error::{LookupError, LookupResult};
use regex::Regex;
use std::sync::LazyLock;

pub const START_MARKER: &str = "SYNOPSIS";
pub const END_MARKER: &str = "DESCRIPTION";
pub const UNIMPLEMENTED_MARKER: &str = "Unimplemented";

/// Declarations never span more than this many extra lines.
pub const MAX_CONTINUATION_LINES: usize = 3;

// First `/*` through last `*/`, greedy.
static RE_COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"/\*.*\*/").unwrap());

/// What the synopsis region yielded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Synopsis {
    /// Raw declaration lines in document order, each ending in `);`.
    Candidates(Vec<String>),
    /// The region states the call is unimplemented.
    Unimplemented,
}

/// Scan normalized document lines for declaration candidates.
pub fn extract<S: AsRef<str>>(lines: &[S]) -> LookupResult<Synopsis> {
    let start = lines
        .iter()
        .position(|l| l.as_ref().trim() == START_MARKER)
        .ok_or(LookupError::MalformedDocument {
            marker: START_MARKER,
        })?;
    let body = &lines[start + 1..];
    let end = body
        .iter()
        .position(|l| l.as_ref().trim() == END_MARKER)
        .ok_or(LookupError::MalformedDocument { marker: END_MARKER })?;
    let region = &body[..end];

    let mut candidates = Vec::new();

    for (i, raw) in region.iter().enumerate() {
        let line = raw.as_ref().trim();

        if line.contains(UNIMPLEMENTED_MARKER) {
            return Ok(Synopsis::Unimplemented);
        }

        if line.starts_with("typedef") {
            continue;
        }

        let mut text = strip_comment(line);
        if !is_candidate_start(&text) {
            continue;
        }

        // join continuation lines without consuming them
        for next in region[i + 1..].iter().take(MAX_CONTINUATION_LINES) {
            if text.ends_with(';') {
                break;
            }
            text.push(' ');
            text.push_str(next.as_ref().trim());
            text = strip_comment(&text);
        }

        if text.ends_with(");") && parens_balanced(&text) {
            tracing::trace!(candidate = %text, "synopsis candidate");
            candidates.push(text);
        } else {
            tracing::debug!(line = %text, "discarding incomplete declaration");
        }
    }

    Ok(Synopsis::Candidates(candidates))
}

/// Remove a `/* ... */` span and trim the result.
pub fn strip_comment(line: &str) -> String {
    RE_COMMENT.replace(line, "").trim().to_string()
}

fn is_candidate_start(line: &str) -> bool {
    line.split_whitespace().nth(1).is_some() && line.contains('(')
}

fn parens_balanced(text: &str) -> bool {
    let mut depth = 0i32;
    for c in text.chars() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0
}
