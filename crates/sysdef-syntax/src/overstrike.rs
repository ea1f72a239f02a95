//! Overstrike removal for formatted manual output.
//!
//! `man` renders bold and underlined text by printing a character, a
//! backspace, then the character again (`S\x08SY\x08Y...`). Substring
//! search only works once those sequences are collapsed.

const BACKSPACE: char = '\u{8}';

/// Remove every `<char><backspace>` pair from a line.
///
/// A backspace erases the character emitted just before it. A backspace
/// with nothing left to erase is kept, so it can only survive at the start
/// of the output and a second pass changes nothing.
pub fn normalize_line(line: &str) -> String {
    if !line.contains(BACKSPACE) {
        return line.to_string();
    }

    let mut out: Vec<char> = Vec::with_capacity(line.len());
    for c in line.chars() {
        if c == BACKSPACE && out.last().is_some_and(|&prev| prev != BACKSPACE) {
            out.pop();
        } else {
            out.push(c);
        }
    }
    out.into_iter().collect()
}

/// Split a document into lines and normalize each one.
pub fn normalize_document(text: &str) -> Vec<String> {
    text.lines().map(normalize_line).collect()
}
