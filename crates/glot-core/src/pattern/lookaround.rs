const OPENERS: [&str; 4] = ["?=", "?!", "?<=", "?<!"];

/// Returns true if `pattern` contains an unescaped lookahead or lookbehind
/// group: `(?=`, `(?!`, `(?<=` or `(?<!`.
///
/// A backslash anywhere inside the opener (`\(?=`, `(\?=`, `(?\=`, `(?<\=`)
/// disqualifies it. Groups inside a character class are ignored; a `]`
/// right after `[` or `[^` is a member of the class, not its end.
pub fn is_regex_lookahead_behind(pattern: &str) -> bool {
    let mut escaped = false;
    let mut in_class = false;
    // Byte index where the current class's members begin.
    let mut class_start = 0;

    for (i, b) in pattern.bytes().enumerate() {
        if escaped {
            escaped = false;
            continue;
        }
        match b {
            b'\\' => escaped = true,
            b'[' if !in_class => {
                in_class = true;
                class_start = if pattern[i + 1..].starts_with('^') { i + 2 } else { i + 1 };
            }
            b']' if in_class && i > class_start => in_class = false,
            b'(' if !in_class => {
                let rest = &pattern[i + 1..];
                if OPENERS.iter().any(|opener| rest.starts_with(opener)) {
                    return true;
                }
            }
            _ => {}
        }
    }
    false
}
