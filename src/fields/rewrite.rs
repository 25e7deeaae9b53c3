//! Pattern rules that rewrite the value following a matched label.

use regex::{Captures, Regex};

/// The rewrite rules compiled for one label variant, in priority order.
///
/// Each rule targets a different shape of `label: value` text:
/// 1. a value followed by a parenthetical hint, e.g. `Ngày sinh: … (dd/mm/yyyy)`,
/// 2. a non-empty single-line value,
/// 3. an empty placeholder at the end of the text.
#[derive(Debug, Clone)]
pub(crate) struct RuleSet {
    with_parenthetical: Regex,
    labeled_value: Regex,
    empty_placeholder: Regex,
}

impl RuleSet {
    /// Compiles the rule patterns for one literal label.
    pub(crate) fn compile(label: &str) -> Result<Self, regex::Error> {
        let label = regex::escape(label);
        Ok(Self {
            with_parenthetical: Regex::new(&format!(r"({label}):\s*[^(\n]*\([^)]*\)"))?,
            labeled_value: Regex::new(&format!(r"({label}):\s*[^\n]+"))?,
            empty_placeholder: Regex::new(&format!(r"({label}):\s*$"))?,
        })
    }

    /// Applies the first rule that matches, substituting `value` after the label.
    ///
    /// The single-line rule is suppressed when the whole text ends with a
    /// colon; the placeholder rule handles that case instead. Returns `None`
    /// when no rule matches.
    pub(crate) fn apply(&self, text: &str, value: &str) -> Option<String> {
        if self.with_parenthetical.is_match(text) {
            return Some(substitute(&self.with_parenthetical, text, value));
        }
        if self.labeled_value.is_match(text) && !text.ends_with(':') {
            return Some(substitute(&self.labeled_value, text, value));
        }
        if self.empty_placeholder.is_match(text) {
            return Some(substitute(&self.empty_placeholder, text, value));
        }
        None
    }
}

/// Replaces every match with `label: value`, keeping the label exactly as it
/// appeared. The value is inserted verbatim, never treated as a template.
fn substitute(rule: &Regex, text: &str, value: &str) -> String {
    rule.replace_all(text, |caps: &Captures<'_>| {
        format!("{}: {}", &caps[1], value)
    })
    .into_owned()
}
