// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! HTML escaping for user supplied review text.
//!
//! Name and comments are escaped exactly once, before they are stored or sent
//! anywhere. The escaped form is what lives in the local store, the pending
//! queue, and the remote service.

/// Escapes `&`, `<`, `>`, `"`, `'`, `/`, `\` and `` ` `` as HTML entities.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            '\\' => out.push_str("&#x5C;"),
            '`' => out.push_str("&#96;"),
            _ => out.push(c),
        }
    }
    out
}

/// Reverses [`escape_html`] for display outside a browser.
pub fn unescape_html(input: &str) -> String {
    const ENTITIES: [(&str, char); 8] = [
        ("&lt;", '<'),
        ("&gt;", '>'),
        ("&quot;", '"'),
        ("&#x27;", '\''),
        ("&#x2F;", '/'),
        ("&#x5C;", '\\'),
        ("&#96;", '`'),
        ("&amp;", '&'),
    ];
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    'scan: while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        for (entity, c) in ENTITIES {
            if let Some(after) = rest.strip_prefix(entity) {
                out.push(c);
                rest = after;
                continue 'scan;
            }
        }
        out.push('&');
        rest = &rest[1..];
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
#[path = "escape_tests.rs"]
mod tests;
