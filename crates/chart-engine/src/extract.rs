//! JSON extraction from free text
//!
//! Vision models are asked for JSON but often wrap it in prose or markdown
//! fences. This module locates the first balanced `{...}` substring with a
//! small bracket-balance scanner. A greedy regex would truncate nested
//! objects or span across unrelated braces; the scanner tracks string
//! literals and escapes so braces inside strings never unbalance the count.

/// Locate the first balanced JSON object embedded in `text`
///
/// Returns the exact `{...}` slice, or `None` when the text contains no
/// balanced object starting at its first `{`. The slice is not validated
/// as JSON; decoding is the caller's concern.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }

    None
}
