//! `#dskey{...}` token scanning and substitution.
//!
//! A token is `#dskey{` followed by a key running up to the first `}`. Keys
//! never span lines. Substituted values are inserted literally and are not
//! scanned again.

use std::borrow::Cow;

/// Token opener.
pub const TOKEN_OPEN: &str = "#dskey{";
/// Token closer.
pub const TOKEN_CLOSE: char = '}';

/// A piece of scanned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Text copied to the output unchanged
    Literal(&'a str),
    /// Key of a `#dskey{key}` token
    Key(&'a str),
}

fn is_line_break(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{0085}' | '\u{2028}' | '\u{2029}')
}

/// Splits `text` into literal and key segments, in order.
///
/// Adjacent literals are merged; empty literals are omitted.
pub fn scan(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut literal_start = 0;
    let mut cursor = 0;

    while let Some(found) = text[cursor..].find(TOKEN_OPEN) {
        let open = cursor + found;
        let key_start = open + TOKEN_OPEN.len();

        let Some(close_offset) = text[key_start..].find(TOKEN_CLOSE) else {
            // no closer anywhere further on, so no later opener can match either
            break;
        };
        let key_end = key_start + close_offset;
        let key = &text[key_start..key_end];

        if key.contains(is_line_break) {
            cursor = key_start;
            continue;
        }

        if open > literal_start {
            segments.push(Segment::Literal(&text[literal_start..open]));
        }
        segments.push(Segment::Key(key));

        cursor = key_end + TOKEN_CLOSE.len_utf8();
        literal_start = cursor;
    }

    if literal_start < text.len() {
        segments.push(Segment::Literal(&text[literal_start..]));
    }
    segments
}

/// Replaces every token in `text` with `resolve(key)`.
///
/// Text without tokens is returned borrowed.
pub fn render<'a, F>(text: &'a str, mut resolve: F) -> Cow<'a, str>
where
    F: FnMut(&str) -> String,
{
    let segments = scan(text);
    if !segments.iter().any(|s| matches!(s, Segment::Key(_))) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    for segment in segments {
        match segment {
            Segment::Literal(literal) => out.push_str(literal),
            Segment::Key(key) => out.push_str(&resolve(key)),
        }
    }
    Cow::Owned(out)
}
