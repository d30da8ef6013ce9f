//! `WWW-Authenticate` challenge parsing
//!
//! A challenge looks like:
//!
//! ```text
//! Bearer error="invalid_request",
//!     error_description="No access token was provided in this request",
//!     resource_metadata="https://resource.example.com/.well-known/oauth-protected-resource"
//! ```
//!
//! The leading auth-scheme (`Bearer`, `DPoP`, ...) is discarded and the rest is
//! read as a comma separated list of `key=value` parameters. A backslash makes
//! the next character literal, so `\,` and `\"` never end a field.

use std::collections::HashMap;

/// Name of the challenge parameter pointing at protected resource metadata
pub const RESOURCE_METADATA_PARAM: &str = "resource_metadata";

/// Parse the parameters of a `WWW-Authenticate` header value.
///
/// Malformed fields are skipped. A header without a space after the scheme has
/// no parameters. When a key repeats, the first occurrence is kept.
pub fn parse_challenge_parameters(header: &str) -> HashMap<String, String> {
    let mut params = HashMap::new();

    let Some(space_idx) = header.find(' ') else {
        return params;
    };
    let remainder = header[space_idx..].trim();

    for field in split_fields(remainder) {
        if let Some((key, value)) = split_key_value(&field) {
            params.entry(key).or_insert(value);
        }
    }
    params
}

/// Extract the auth-scheme token of a challenge (e.g. `Bearer`)
pub fn challenge_scheme(header: &str) -> Option<&str> {
    let scheme = header.trim_start().split(' ').next()?;
    if scheme.is_empty() {
        None
    } else {
        Some(scheme)
    }
}

/// Split on unescaped commas, dropping the escaping backslashes
fn split_fields(s: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut escaped = false;

    for c in s.chars() {
        if escaped {
            current.push(c);
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            ',' => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}

fn split_key_value(field: &str) -> Option<(String, String)> {
    let (key, value) = field.split_once('=')?;
    let key = key.trim();
    if key.is_empty() || key.contains(char::is_whitespace) {
        return None;
    }
    Some((key.to_string(), unquote(value.trim()).to_string()))
}

/// Remove one pair of surrounding double quotes
fn unquote(value: &str) -> &str {
    let value = value.strip_prefix('"').unwrap_or(value);
    value.strip_suffix('"').unwrap_or(value)
}
