//! Byte-level scanning helpers shared by the compiler and the filter resolver.
//!
//! Every token the grammar cares about is ASCII, so positions returned here
//! are always valid `str` slice boundaries.

use std::borrow::Cow;

const QUOTES: [u8; 2] = [b'\'', b'"'];

/// Index just past the string literal opening at `start`.
///
/// A doubled quote inside the literal is an escaped quote. Returns `None`
/// when the literal never terminates.
pub(crate) fn skip_quoted(bytes: &[u8], start: usize) -> Option<usize> {
    let quote = bytes[start];
    let mut i = start + 1;

    while i < bytes.len() {
        if bytes[i] == quote {
            if bytes.get(i + 1) == Some(&quote) {
                i += 2;
                continue;
            }
            return Some(i + 1);
        }
        i += 1;
    }

    None
}

/// Index of the `)` matching the `(` at `open`.
///
/// Depth starts at 1 on the opening parenthesis; quoted runs are skipped.
pub(crate) fn matching_paren(text: &str, open: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    debug_assert_eq!(bytes.get(open), Some(&b'('));

    let mut depth = 1usize;
    let mut i = open + 1;
    while i < bytes.len() {
        match bytes[i] {
            b if QUOTES.contains(&b) => {
                i = skip_quoted(bytes, i)?;
                continue;
            }
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
        i += 1;
    }

    None
}

/// First position of `needle` in `text` that is not inside a quoted literal.
pub(crate) fn find_outside_quotes(text: &str, needle: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let needle = needle.as_bytes();

    let mut i = 0;
    while i < bytes.len() {
        if QUOTES.contains(&bytes[i]) {
            i = skip_quoted(bytes, i)?;
            continue;
        }
        if bytes[i..].starts_with(needle) {
            return Some(i);
        }
        i += 1;
    }

    None
}

/// Split at the first comma that is outside quotes and parentheses.
pub(crate) fn split_top_level_comma(text: &str) -> Option<(&str, &str)> {
    let bytes = text.as_bytes();
    let mut depth = 0usize;

    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b if QUOTES.contains(&b) => {
                i = skip_quoted(bytes, i)?;
                continue;
            }
            b'(' => depth += 1,
            b')' => depth = depth.saturating_sub(1),
            b',' if depth == 0 => return Some((&text[..i], &text[i + 1..])),
            _ => {}
        }
        i += 1;
    }

    None
}

/// Strip one pair of matching surrounding quotes, if present, and collapse
/// doubled quotes of that kind back into single ones.
pub(crate) fn unquote(text: &str) -> Cow<'_, str> {
    let bytes = text.as_bytes();
    if bytes.len() < 2 || !QUOTES.contains(&bytes[0]) || bytes[0] != bytes[bytes.len() - 1] {
        return Cow::Borrowed(text);
    }

    let inner = &text[1..text.len() - 1];
    let (single, doubled) = if bytes[0] == b'\'' {
        ("'", "''")
    } else {
        ("\"", "\"\"")
    };

    if inner.contains(doubled) {
        Cow::Owned(inner.replace(doubled, single))
    } else {
        Cow::Borrowed(inner)
    }
}

/// Segment after the last `/` of a property path.
pub(crate) fn last_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

///
/// TESTS
///
