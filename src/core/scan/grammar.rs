//! The call-form grammar shared by the scanner and the rewriter.
//!
//! ```text
//! call       = prefix "(" literal ")"
//! prefix     = fn                  ; bare        t('key')
//!            | "$" fn              ; templated   $t('key')
//!            | ns "." fn           ; namespaced  i18n.t('key')
//! literal    = "'" chars "'" | '"' chars '"'
//! chars      = 1*( any char except quotes, CR, LF )
//! ```
//!
//! The `regex` crate has no lookbehind, so the boundary in front of the prefix is
//! checked by hand on every match. A bare call must not follow an identifier
//! character, `$` or `.`; the other two forms must not follow an identifier
//! character or `$` but may follow `.` (`this.$t('k')`, `this.i18n.t('k')`).

use regex::Regex;
use serde::Serialize;

/// Quoted-literal sub-pattern, identical for every call-form.
const QUOTED_LITERAL: &str = r#"(?:'(?P<sq>[^'"\r\n]+)'|"(?P<dq>[^'"\r\n]+)")"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CallForm {
    Bare,
    Templated,
    Namespaced,
}

impl CallForm {
    pub const ALL: [CallForm; 3] = [CallForm::Bare, CallForm::Templated, CallForm::Namespaced];

    pub fn as_str(&self) -> &'static str {
        match self {
            CallForm::Bare => "bare",
            CallForm::Templated => "templated",
            CallForm::Namespaced => "namespaced",
        }
    }

    fn allows_dot_before(&self) -> bool {
        !matches!(self, CallForm::Bare)
    }
}

impl std::fmt::Display for CallForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One accepted call expression inside a source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallMatch<'a> {
    pub form: CallForm,
    /// Byte offset of the first prefix character.
    pub start: usize,
    /// Byte offset just past the closing parenthesis.
    pub end: usize,
    pub quote: char,
    pub literal: &'a str,
}

impl<'a> CallMatch<'a> {
    /// The full call text, e.g. `i18n.t("common.save")`.
    pub fn text<'c>(&self, content: &'c str) -> &'c str {
        &content[self.start..self.end]
    }
}

#[derive(Debug, Clone)]
pub struct CallGrammar {
    function: String,
    namespace: String,
    patterns: Vec<(CallForm, Regex)>,
}

impl Default for CallGrammar {
    fn default() -> Self {
        Self::new("t", "i18n")
    }
}

impl CallGrammar {
    /// Build the grammar for a translation function and its namespace object.
    ///
    /// Both tokens are escaped, so any identifier is accepted.
    pub fn new(function: &str, namespace: &str) -> Self {
        let patterns = CallForm::ALL
            .iter()
            .map(|&form| {
                let prefix = regex::escape(&prefix_for(form, function, namespace));
                let pattern = format!(r"{}\({}\)", prefix, QUOTED_LITERAL);
                // Escaped tokens around a fixed sub-pattern always compile
                let regex = Regex::new(&pattern).unwrap();
                (form, regex)
            })
            .collect();

        Self {
            function: function.to_string(),
            namespace: namespace.to_string(),
            patterns,
        }
    }

    pub fn prefix(&self, form: CallForm) -> String {
        prefix_for(form, &self.function, &self.namespace)
    }

    /// Whether `key` fits inside a quoted literal of the grammar.
    pub fn can_express(key: &str) -> bool {
        !key.is_empty() && !key.contains(['\'', '"', '\r', '\n'])
    }

    /// Render a call expression in the given form.
    pub fn render(&self, form: CallForm, quote: char, key: &str) -> String {
        format!("{}({}{}{})", self.prefix(form), quote, key, quote)
    }

    /// Every accepted call in `content`, ordered by position.
    ///
    /// Matches from different forms never overlap: the boundary check rejects
    /// the bare suffix of a templated or namespaced call.
    pub fn find_calls<'a>(&self, content: &'a str) -> Vec<CallMatch<'a>> {
        let mut calls = Vec::new();

        for (form, regex) in &self.patterns {
            for caps in regex.captures_iter(content) {
                let Some(whole) = caps.get(0) else {
                    continue;
                };
                if !is_call_boundary(content, whole.start(), *form) {
                    continue;
                }
                let (quote, literal) = match (caps.name("sq"), caps.name("dq")) {
                    (Some(m), _) => ('\'', m.as_str()),
                    (None, Some(m)) => ('"', m.as_str()),
                    (None, None) => continue,
                };
                calls.push(CallMatch {
                    form: *form,
                    start: whole.start(),
                    end: whole.end(),
                    quote,
                    literal,
                });
            }
        }

        calls.sort_by_key(|c| c.start);
        calls
    }
}

fn prefix_for(form: CallForm, function: &str, namespace: &str) -> String {
    match form {
        CallForm::Bare => function.to_string(),
        CallForm::Templated => format!("${}", function),
        CallForm::Namespaced => format!("{}.{}", namespace, function),
    }
}

fn is_call_boundary(content: &str, start: usize, form: CallForm) -> bool {
    match content[..start].chars().next_back() {
        None => true,
        Some(c) if c.is_alphanumeric() || c == '_' || c == '$' => false,
        Some('.') => form.allows_dot_before(),
        Some(_) => true,
    }
}
