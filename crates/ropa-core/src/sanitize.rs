//! Plain-text sanitization for user-authored labels and values.
//!
//! Diagram labels end up as text in a DOM-based canvas, so markup must stay
//! inert: the escape set covers every HTML-significant character. Cleaning is
//! separate so callers can normalize input without escaping twice.

/// Upper bound on a single cleaned value.
pub const MAX_INPUT_LEN: usize = 500;

/// Strips control characters, collapses whitespace runs to a single space,
/// trims, and caps the result at [`MAX_INPUT_LEN`] characters.
pub fn clean_input(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_space = false;
    for ch in input.chars() {
        if ch.is_control() {
            continue;
        }
        if ch.is_whitespace() {
            pending_space = !out.is_empty();
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        out.push(ch);
    }
    if let Some((idx, _)) = out.char_indices().nth(MAX_INPUT_LEN) {
        out.truncate(idx);
    }
    out
}

/// Escapes the HTML-significant characters `& < > " '`.
pub fn escape_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// The form every user-supplied string takes before it is embedded in node
/// data: cleaned, then escaped.
pub fn sanitize_label(input: &str) -> String {
    escape_text(&clean_input(input))
}
