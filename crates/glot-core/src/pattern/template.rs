use std::iter::Peekable;
use std::str::Chars;

use fancy_regex::Regex;

use super::PatternError;

/// Rewrite a user replacement template into `fancy_regex` expansion syntax.
///
/// Templates follow the familiar `replaceAll` rules:
/// - `$n` takes as many digits as still name an existing group, so with one
///   group `$1en` is group 1 followed by `en`;
/// - `${name}` refers to a named group;
/// - a backslash makes the next character literal (`\$`, `\\`).
///
/// A reference to a group the pattern does not have is an error.
pub(crate) fn expansion_template(template: &str, regex: &Regex) -> Result<String, PatternError> {
    if !template.contains(['$', '\\']) {
        return Ok(template.to_string());
    }
    let groups = regex.captures_len().saturating_sub(1);
    let mut out = String::with_capacity(template.len() + 4);
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('$') => out.push_str("$$"),
                Some(next) => out.push(next),
                None => return Err(bad(template, "trailing backslash")),
            },
            '$' => match chars.peek() {
                Some('{') => {
                    chars.next();
                    let name = group_name(&mut chars).ok_or_else(|| bad(template, "unclosed group name"))?;
                    if !regex.capture_names().any(|n| n == Some(name.as_str())) {
                        return Err(bad(template, &format!("no group named \"{name}\"")));
                    }
                    out.push_str("${");
                    out.push_str(&name);
                    out.push('}');
                }
                Some(d) if d.is_ascii_digit() => {
                    let number = group_number(&mut chars, groups);
                    if number > groups {
                        return Err(bad(template, &format!("no group {number}")));
                    }
                    out.push_str(&format!("${{{number}}}"));
                }
                _ => return Err(bad(template, "\"$\" must be followed by a group reference")),
            },
            _ => out.push(c),
        }
    }
    Ok(out)
}

fn group_number(chars: &mut Peekable<Chars<'_>>, groups: usize) -> usize {
    let mut number = 0;
    let mut first = true;
    while let Some(d) = chars.peek().and_then(|c| c.to_digit(10)) {
        let next = number * 10 + d as usize;
        // The first digit is always consumed; later ones only while the
        // longer number still names a group.
        if !first && next > groups {
            break;
        }
        number = next;
        first = false;
        chars.next();
    }
    number
}

fn group_name(chars: &mut Peekable<Chars<'_>>) -> Option<String> {
    let mut name = String::new();
    for c in chars.by_ref() {
        if c == '}' {
            return (!name.is_empty()).then_some(name);
        }
        name.push(c);
    }
    None
}

fn bad(template: &str, reason: &str) -> PatternError {
    PatternError::Replacement {
        template: template.to_string(),
        reason: reason.to_string(),
    }
}
