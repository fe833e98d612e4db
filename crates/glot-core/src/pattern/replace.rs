use fancy_regex::{Captures, Replacer};
use serde::{Deserialize, Serialize};

use super::template::expansion_template;
use super::{runtime_error, CompiledPattern, PatternError};

/// Which matches of a pattern [`advanced_replace`] rewrites.
///
/// With a single match, that match counts as both first and last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplaceScope {
    #[default]
    All,
    FirstOnly,
    FirstAndMiddle,
    MiddleOnly,
    MiddleAndLast,
    LastOnly,
}

impl ReplaceScope {
    fn selects(self, index: usize, total: usize) -> bool {
        let first = index == 0;
        let last = index + 1 == total;
        let middle = !first && !last;
        match self {
            ReplaceScope::All => true,
            ReplaceScope::FirstOnly => first,
            ReplaceScope::FirstAndMiddle => first || middle,
            ReplaceScope::MiddleOnly => middle,
            ReplaceScope::MiddleAndLast => middle || last,
            ReplaceScope::LastOnly => last,
        }
    }
}

struct ScopedReplacer<'a> {
    template: &'a str,
    scope: ReplaceScope,
    index: usize,
    total: usize,
}

impl Replacer for ScopedReplacer<'_> {
    fn replace_append(&mut self, caps: &Captures<'_>, dst: &mut String) {
        if self.scope.selects(self.index, self.total) {
            let mut template = self.template;
            template.replace_append(caps, dst);
        } else if let Some(whole) = caps.get(0) {
            dst.push_str(whole.as_str());
        }
        self.index += 1;
    }
}

/// Replace the matches of `pattern` in `value` selected by `scope`.
///
/// Patterns using lookaround are only accepted with [`ReplaceScope::All`]:
/// positional selection would change what the surrounding context sees.
pub fn advanced_replace(
    value: &str,
    pattern: &CompiledPattern,
    replacement: &str,
    scope: ReplaceScope,
) -> Result<String, PatternError> {
    if scope == ReplaceScope::All {
        return pattern.replace_all(value, replacement);
    }
    if pattern.has_lookaround() {
        return Err(PatternError::LookaroundScope(pattern.as_str().to_string()));
    }

    let regex = pattern.regex()?;
    let mut total = 0;
    for found in regex.find_iter(value) {
        found.map_err(|e| runtime_error(pattern.as_str(), e))?;
        total += 1;
    }
    if total == 0 {
        return Ok(value.to_string());
    }

    let template = expansion_template(replacement, regex)?;
    let replacer = ScopedReplacer {
        template: &template,
        scope,
        index: 0,
        total,
    };
    regex
        .try_replacen(value, 0, replacer)
        .map(|out| out.into_owned())
        .map_err(|e| runtime_error(pattern.as_str(), e))
}
