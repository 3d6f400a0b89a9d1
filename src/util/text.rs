use std::borrow::Cow;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: &str = "...";
const ELLIPSIS_WIDTH: usize = 3;

/// Terminal column width of `s` (CJK and emoji count as two columns).
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Longest prefix of `s` that fits in `width` columns, as a byte offset.
fn fitting_prefix(s: &str, width: usize) -> usize {
    let mut used = 0;
    let mut end = 0;
    for (idx, c) in s.char_indices() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        end = idx + c.len_utf8();
    }
    end
}

/// Shorten `s` to at most `max_width` columns, marking the cut with `...`.
///
/// Strings that already fit are borrowed. At widths of three columns or
/// less there is no room for the marker, so the text is simply clipped.
///
/// ```
/// use simplepedia::util::truncate_to_width;
///
/// assert_eq!(truncate_to_width("Alpha Centauri", 8), "Alpha...");
/// assert_eq!(truncate_to_width("Daleks", 10), "Daleks");
/// assert_eq!(truncate_to_width("Daleks", 2), "Da");
/// ```
pub fn truncate_to_width(s: &str, max_width: usize) -> Cow<'_, str> {
    if display_width(s) <= max_width {
        return Cow::Borrowed(s);
    }
    if max_width <= ELLIPSIS_WIDTH {
        return Cow::Owned(s[..fitting_prefix(s, max_width)].to_string());
    }

    let end = fitting_prefix(s, max_width - ELLIPSIS_WIDTH);
    let mut out = String::with_capacity(end + ELLIPSIS.len());
    out.push_str(&s[..end]);
    out.push_str(ELLIPSIS);
    Cow::Owned(out)
}

fn is_stripped_control(b: u8) -> bool {
    b == 0x7f || (b < 0x20 && !matches!(b, b'\t' | b'\n' | b'\r'))
}

/// Second byte of a C1 control (U+0080..=U+009F) when one starts at `i`.
fn c1_at(bytes: &[u8], i: usize) -> Option<u8> {
    match (bytes[i], bytes.get(i + 1)) {
        (0xc2, Some(&b)) if (0x80..=0x9f).contains(&b) => Some(b),
        _ => None,
    }
}

fn control_at(bytes: &[u8], i: usize) -> bool {
    bytes[i] == 0x1b || is_stripped_control(bytes[i]) || c1_at(bytes, i).is_some()
}

/// Remove terminal control characters and ANSI escape sequences.
///
/// Article text comes from the server verbatim, so it is passed through here
/// before it reaches the terminal. Tab, newline and carriage return survive;
/// CSI (`ESC [ ... final`, or U+009B) and OSC (`ESC ]`, or U+009D, up to
/// BEL or ST) sequences are dropped whole, as are bare ESC bytes, the
/// remaining C0 and C1 controls, and DEL.
///
/// Clean input is borrowed without allocating.
pub fn strip_control_chars(s: &str) -> Cow<'_, str> {
    let bytes = s.as_bytes();
    if !(0..bytes.len()).any(|i| control_at(bytes, i)) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if b == 0x1b {
            i = skip_escape(bytes, i);
        } else if let Some(c1) = c1_at(bytes, i) {
            i = match c1 {
                0x9b => skip_csi_body(bytes, i + 2),
                0x9d => skip_osc_body(bytes, i + 2),
                _ => i + 2,
            };
        } else if is_stripped_control(b) {
            i += 1;
        } else {
            let start = i;
            while i < bytes.len() && !control_at(bytes, i) {
                i += 1;
            }
            // Runs end on ASCII bytes or a C1 lead byte, both char boundaries
            out.push_str(&s[start..i]);
        }
    }
    Cow::Owned(out)
}

/// Index just past the escape sequence starting at `bytes[i] == ESC`.
fn skip_escape(bytes: &[u8], i: usize) -> usize {
    match bytes.get(i + 1) {
        Some(b'[') => skip_csi_body(bytes, i + 2),
        Some(b']') => skip_osc_body(bytes, i + 2),
        _ => i + 1,
    }
}

/// Skip CSI parameters up to and including the final byte.
fn skip_csi_body(bytes: &[u8], mut j: usize) -> usize {
    while j < bytes.len() {
        let c = bytes[j];
        j += 1;
        if (0x40..=0x7e).contains(&c) {
            break;
        }
    }
    j
}

/// Skip an OSC payload up to and including BEL, `ESC \\` or U+009C.
fn skip_osc_body(bytes: &[u8], mut j: usize) -> usize {
    while j < bytes.len() {
        match bytes[j] {
            0x07 => return j + 1,
            0x1b if bytes.get(j + 1) == Some(&b'\\') => return j + 2,
            0xc2 if bytes.get(j + 1) == Some(&0x9c) => return j + 2,
            _ => j += 1,
        }
    }
    j
}
