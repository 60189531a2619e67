use anyhow::{Context, Result};
use regex::Regex;

use super::catalog::MessageKind;

/// Line-level matchers for singular and plural translation calls.
///
/// This is a textual heuristic, not a parser: calls spanning several lines,
/// strings with escaped quotes, and calls inside comments are not handled
/// the way a compiler would see them.
#[derive(Debug, Clone)]
pub struct CallPatterns {
    plural: Regex,
    singular: Regex,
}

impl CallPatterns {
    pub fn new(singular_function: &str, plural_function: &str) -> Result<Self> {
        Ok(Self {
            plural: call_regex(plural_function)?,
            singular: call_regex(singular_function)?,
        })
    }

    /// Match a single line.
    ///
    /// The plural pattern wins: once it matches, the singular pattern is not
    /// tried, because `gettext(` is also a substring of `ngettext(`.
    pub fn match_line<'a>(&self, line: &'a str) -> Option<(MessageKind, &'a str)> {
        if let Some(msgid) = first_capture(&self.plural, line) {
            return Some((MessageKind::Plural, msgid));
        }
        first_capture(&self.singular, line).map(|msgid| (MessageKind::Singular, msgid))
    }
}

// name('message' or name("message", followed by `,` or `)`
fn call_regex(function: &str) -> Result<Regex> {
    let pattern = format!(r#"{}\(['"](.+?)['"][,)]"#, regex::escape(function));
    Regex::new(&pattern).with_context(|| format!("Invalid call pattern for '{}'", function))
}

fn first_capture<'a>(regex: &Regex, line: &'a str) -> Option<&'a str> {
    regex
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
