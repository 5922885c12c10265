// src/core/locate.rs
//! Balanced-bracket scan for the first JSON array embedded in arbitrary text.
//!
//! Single left-to-right pass over the bytes. Brackets inside double-quoted
//! strings are ignored; a backslash inside a string escapes the next byte.
//! All delimiters are ASCII, so byte offsets are always char boundaries.

/// Return the first `[` … matching `]` span of `text`, or `None` if the first
/// `[` never balances.
pub fn locate_array(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let end = matching_close(&text.as_bytes()[start..])?;
    Some(&text[start..=start + end])
}

/// Index of the bracket closing the one at `b[0]`.
fn matching_close(b: &[u8]) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_str = false;
    let mut esc = false;

    for (i, &c) in b.iter().enumerate() {
        if in_str {
            if esc { esc = false; }
            else if c == b'\\' { esc = true; }
            else if c == b'"' { in_str = false; }
            continue;
        }
        match c {
            b'"' => in_str = true,
            b'[' => depth += 1,
            b']' => {
                depth = depth.saturating_sub(1);
                if depth == 0 { return Some(i); }
            }
            _ => {}
        }
    }
    None
}
