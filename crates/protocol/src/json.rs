//! Minimal JSON scanning for the fellowship wire format
//!
//! The sync service speaks a small JSON envelope, and this module reads and
//! writes it by direct substring scanning instead of building a parse tree.
//! Extraction returns the exact sub-JSON slice for a field value, skipping
//! correctly over nested objects, arrays, and strings (including escaped
//! quotes and escaped backslashes inside strings).
//!
//! Two invariants every scanner in this module upholds:
//! - a `\"` inside a string does not terminate it, while `\\"` does
//!   (escaped backslash followed by a real closing quote)
//! - braces and brackets inside string values never affect depth counting
//!
//! # Example
//!
//! ```
//! use fellowship_protocol::json;
//!
//! let body = r#"{"type":"Heartbeat","payload":{"statuses":[]}}"#;
//! assert!(json::is_valid_json(body));
//! assert_eq!(json::extract_field(body, "payload"), Some(r#"{"statuses":[]}"#));
//! assert_eq!(json::extract_string_field(body, "type"), Some("Heartbeat".into()));
//! ```

use std::str::FromStr;

/// Escapes a string for embedding inside a JSON string literal.
///
/// Control characters below U+0020 without a short escape become `\u00XX`.
pub fn escape_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000C}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out
}

/// Encodes a string as a quoted, escaped JSON string literal.
pub fn encode_string(value: &str) -> String {
    format!("\"{}\"", escape_string(value))
}

/// Encodes a boolean as JSON text.
pub fn encode_boolean(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

/// Encodes a slice of strings as a JSON array of string literals.
pub fn encode_string_array(values: &[String]) -> String {
    let mut out = String::from("[");
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&encode_string(value));
    }
    out.push(']');
    out
}

/// Encodes an ordered list of `(key, raw JSON value)` pairs as an object.
///
/// Keys are escaped; values are embedded verbatim and must already be
/// valid JSON text.
pub fn encode_object(fields: &[(&str, String)]) -> String {
    let mut out = String::from("{");
    for (i, (key, value)) in fields.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&encode_string(key));
        out.push(':');
        out.push_str(value);
    }
    out.push('}');
    out
}

/// Decodes a quoted JSON string literal back into its plain form.
///
/// Returns `None` when the input does not start with a quote or the
/// closing quote is never found. `\uXXXX` escapes decode for ASCII code
/// points; anything above U+007F or with invalid hex digits becomes `?`.
pub fn decode_string(raw: &str) -> Option<String> {
    let bytes = raw.as_bytes();
    if bytes.first() != Some(&b'"') {
        return None;
    }

    let mut out: Vec<u8> = Vec::with_capacity(bytes.len());
    let mut escaped = false;
    let mut i = 1;
    while i < bytes.len() {
        let c = bytes[i];
        if escaped {
            match c {
                b'"' => out.push(b'"'),
                b'\\' => out.push(b'\\'),
                b'b' => out.push(0x08),
                b'f' => out.push(0x0C),
                b'n' => out.push(b'\n'),
                b'r' => out.push(b'\r'),
                b't' => out.push(b'\t'),
                b'u' => {
                    if i + 4 < bytes.len() {
                        let mut code: u32 = 0;
                        let mut valid = true;
                        for &h in &bytes[i + 1..i + 5] {
                            code <<= 4;
                            match h {
                                b'0'..=b'9' => code += u32::from(h - b'0'),
                                b'A'..=b'F' => code += u32::from(h - b'A' + 10),
                                b'a'..=b'f' => code += u32::from(h - b'a' + 10),
                                _ => {
                                    valid = false;
                                    break;
                                }
                            }
                        }
                        if valid && code <= 0x7F {
                            out.push(code as u8);
                        } else {
                            out.push(b'?');
                        }
                        i += 4;
                    } else {
                        out.push(b'?');
                    }
                }
                other => out.push(other),
            }
            escaped = false;
        } else if c == b'\\' {
            escaped = true;
        } else if c == b'"' {
            return String::from_utf8(out).ok();
        } else {
            out.push(c);
        }
        i += 1;
    }

    None
}

/// Decodes a JSON number token.
pub fn decode_number<T: FromStr>(raw: &str) -> Option<T> {
    raw.parse().ok()
}

/// Decodes a JSON boolean token.
pub fn decode_boolean(raw: &str) -> Option<bool> {
    match raw {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Decodes a JSON array of string literals.
///
/// Only flat string arrays are supported; any other element kind fails.
pub fn decode_string_array(raw: &str) -> Option<Vec<String>> {
    let bytes = raw.as_bytes();
    if bytes.first() != Some(&b'[') {
        return None;
    }

    let mut out = Vec::new();
    let mut pos = 1;
    skip_whitespace(bytes, &mut pos);
    if pos >= bytes.len() {
        return None;
    }
    if bytes[pos] == b']' {
        return Some(out);
    }

    while pos < bytes.len() {
        if bytes[pos] != b'"' {
            return None;
        }

        let start = pos;
        let mut end = start + 1;
        while end < bytes.len() && bytes[end] != b'"' {
            if bytes[end] == b'\\' && end + 1 < bytes.len() {
                end += 2;
            } else {
                end += 1;
            }
        }
        if end >= bytes.len() {
            return None;
        }

        let literal = raw.get(start..end + 1)?;
        out.push(decode_string(literal)?);

        pos = end + 1;
        skip_whitespace(bytes, &mut pos);
        if pos >= bytes.len() {
            return None;
        }
        if bytes[pos] == b']' {
            return Some(out);
        } else if bytes[pos] == b',' {
            pos += 1;
            skip_whitespace(bytes, &mut pos);
        } else {
            return None;
        }
    }

    None
}

/// Locates `"key":` in the given JSON text and returns the exact sub-JSON
/// slice for its value: object, array, quoted string, or bare scalar.
///
/// The first occurrence of the key wins. Scanning honors backslash escapes
/// inside strings, so braces and quotes in string values never cut a value
/// short.
pub fn extract_field<'a>(json: &'a str, key: &str) -> Option<&'a str> {
    let needle = format!("\"{key}\":");
    let key_pos = json.find(&needle)?;
    let bytes = json.as_bytes();

    let mut start = key_pos + needle.len();
    skip_whitespace(bytes, &mut start);
    if start >= bytes.len() {
        return None;
    }

    let mut end;
    match bytes[start] {
        b'"' => {
            end = start + 1;
            while end < bytes.len() && bytes[end] != b'"' {
                if bytes[end] == b'\\' && end + 1 < bytes.len() {
                    end += 2;
                } else {
                    end += 1;
                }
            }
            if end < bytes.len() {
                end += 1;
            }
        }
        open @ (b'[' | b'{') => {
            let close = if open == b'[' { b']' } else { b'}' };
            let mut depth = 1usize;
            end = start + 1;
            while end < bytes.len() && depth > 0 {
                if bytes[end] == open {
                    depth += 1;
                } else if bytes[end] == close {
                    depth -= 1;
                } else if bytes[end] == b'"' {
                    end += 1;
                    while end < bytes.len() && bytes[end] != b'"' {
                        if bytes[end] == b'\\' && end + 1 < bytes.len() {
                            end += 2;
                        } else {
                            end += 1;
                        }
                    }
                }
                end += 1;
            }
        }
        _ => {
            end = start;
            while end < bytes.len()
                && !matches!(bytes[end], b',' | b'}' | b']')
                && !bytes[end].is_ascii_whitespace()
            {
                end += 1;
            }
        }
    }

    let end = end.min(bytes.len());
    if end > start {
        json.get(start..end)
    } else {
        None
    }
}

/// Extracts a field and decodes it as a string literal.
pub fn extract_string_field(json: &str, key: &str) -> Option<String> {
    decode_string(extract_field(json, key)?)
}

/// Extracts a field and decodes it as a number.
pub fn extract_number_field<T: FromStr>(json: &str, key: &str) -> Option<T> {
    decode_number(extract_field(json, key)?)
}

/// Extracts a field and decodes it as a boolean.
pub fn extract_boolean_field(json: &str, key: &str) -> Option<bool> {
    decode_boolean(extract_field(json, key)?)
}

/// Extracts a field and decodes it as a flat string array.
pub fn extract_string_array_field(json: &str, key: &str) -> Option<Vec<String>> {
    decode_string_array(extract_field(json, key)?)
}

/// Lightweight structural validation for a JSON document.
///
/// Checks balanced braces and brackets with string-aware skipping, rejects
/// bare words where an object key is expected, rejects unterminated
/// strings and containers, and rejects trailing garbage after the root
/// value closes. Used as the decode gate before any field extraction.
pub fn is_valid_json(json: &str) -> bool {
    let bytes = json.as_bytes();
    if bytes.is_empty() {
        return false;
    }
    if bytes[0] != b'{' && bytes[0] != b'[' {
        return false;
    }

    let mut depth: i32 = 0;
    let mut array_depth: i32 = 0;
    let mut in_string = false;
    let mut escaped = false;
    let mut expecting_key = true;
    let mut expecting_value = false;
    let mut root_closed = false;

    for &c in bytes {
        if escaped {
            escaped = false;
            continue;
        }
        if c == b'\\' {
            escaped = true;
            continue;
        }
        if c == b'"' {
            if root_closed && !in_string {
                return false;
            }
            in_string = !in_string;
            if !in_string {
                if expecting_key && depth > 0 {
                    expecting_key = false;
                    expecting_value = false;
                } else if expecting_value {
                    expecting_value = false;
                }
            }
            continue;
        }
        if in_string {
            continue;
        }
        if c.is_ascii_whitespace() {
            continue;
        }
        if root_closed {
            return false;
        }

        match c {
            b'{' => {
                depth += 1;
                expecting_key = true;
                expecting_value = false;
            }
            b'}' => {
                if expecting_value {
                    return false;
                }
                depth -= 1;
                if depth < 0 {
                    return false;
                }
                expecting_key = false;
                expecting_value = false;
                if depth == 0 && array_depth == 0 {
                    root_closed = true;
                }
            }
            b'[' => {
                array_depth += 1;
                expecting_value = false;
            }
            b']' => {
                array_depth -= 1;
                if array_depth < 0 {
                    return false;
                }
                expecting_value = false;
                if depth == 0 && array_depth == 0 {
                    root_closed = true;
                }
            }
            b':' => {
                if expecting_key {
                    return false;
                }
                expecting_value = true;
                expecting_key = false;
            }
            b',' => {
                if depth > 0 {
                    expecting_key = true;
                }
                expecting_value = false;
            }
            b'-' | b'+' | b'0'..=b'9' => {
                if expecting_key && depth > 0 {
                    return false;
                }
                expecting_value = false;
            }
            b't' | b'f' | b'n' if expecting_value => {
                expecting_value = false;
            }
            _ => {
                if expecting_key && depth > 0 {
                    return false;
                }
            }
        }
    }

    depth == 0 && array_depth == 0 && !in_string && root_closed
}

fn skip_whitespace(bytes: &[u8], pos: &mut usize) {
    while *pos < bytes.len() && bytes[*pos].is_ascii_whitespace() {
        *pos += 1;
    }
}
