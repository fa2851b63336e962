//! Text form of lists.
//!
//! List text is split at top-level whitespace. Braces group an element
//! verbatim, double quotes group an element with backslash escapes
//! processed, and a backslash outside both escapes the next character.
//! Substitution characters (`$`, `[`) have no meaning here.

use super::Thing;
use crate::errors::ConvError;

fn is_list_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

/// Characters allowed in a `$name` reference without braces.
pub fn is_var_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '/' | '@' | ':' | '-')
}

/// Whether `name` can be written as `$name` rather than `${name}`.
pub fn is_bare_var_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(is_var_char)
}

fn escape_char(c: char) -> char {
    match c {
        'n' => '\n',
        't' => '\t',
        other => other,
    }
}

pub(crate) fn parse_list(text: &str) -> Result<Vec<Thing>, ConvError> {
    let mut items = Vec::new();
    let mut chars = text.chars().peekable();

    loop {
        while chars.next_if(|&c| is_list_space(c)).is_some() {}
        let Some(first) = chars.next() else {
            return Ok(items);
        };

        let mut element = String::new();
        match first {
            '{' => {
                let mut depth = 1usize;
                loop {
                    let c = chars.next().ok_or(ConvError::UnbalancedBraces)?;
                    match c {
                        '\\' => {
                            element.push(c);
                            if let Some(next) = chars.next() {
                                element.push(next);
                            }
                            continue;
                        }
                        '{' => depth += 1,
                        '}' => {
                            depth -= 1;
                            if depth == 0 {
                                break;
                            }
                        }
                        _ => {}
                    }
                    element.push(c);
                }
                if let Some(&after) = chars.peek() {
                    if !is_list_space(after) {
                        return Err(ConvError::ExtraAfterBrace(after));
                    }
                }
            }
            '"' => loop {
                match chars.next().ok_or(ConvError::UnterminatedQuote)? {
                    '"' => break,
                    '\\' => {
                        if let Some(next) = chars.next() {
                            element.push(escape_char(next));
                        }
                    }
                    c => element.push(c),
                }
            },
            _ => {
                let mut c = first;
                loop {
                    if c == '\\' {
                        if let Some(next) = chars.next() {
                            element.push(escape_char(next));
                        }
                    } else {
                        element.push(c);
                    }
                    match chars.next_if(|&n| !is_list_space(n)) {
                        Some(n) => c = n,
                        None => break,
                    }
                }
            }
        }
        items.push(Thing::string(element));
    }
}

/// Whether `s` survives being wrapped in braces and read back verbatim.
fn brace_safe(s: &str) -> bool {
    let mut depth = 0usize;
    for c in s.chars() {
        match c {
            '\\' => return false,
            '{' => depth += 1,
            '}' => {
                if depth == 0 {
                    return false;
                }
                depth -= 1;
            }
            _ => {}
        }
    }
    depth == 0
}

fn needs_quoting(s: &str) -> bool {
    s.is_empty()
        || s.starts_with('#')
        || s.chars().any(|c| {
            is_list_space(c) || matches!(c, '{' | '}' | '[' | ']' | '$' | '"' | ';' | '\\')
        })
}

/// Append `s` to `out` as a single list element.
pub fn quote_element(s: &str, out: &mut String) {
    if !needs_quoting(s) {
        out.push_str(s);
    } else if brace_safe(s) {
        out.push('{');
        out.push_str(s);
        out.push('}');
    } else {
        for c in s.chars() {
            match c {
                '\n' => out.push_str("\\n"),
                '\t' => out.push_str("\\t"),
                ' ' | '\r' | '{' | '}' | '[' | ']' | '$' | '"' | ';' | '\\' => {
                    out.push('\\');
                    out.push(c);
                }
                _ => out.push(c),
            }
        }
    }
}
