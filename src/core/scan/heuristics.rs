use std::collections::HashSet;

/// Literals seen passed to same-named helpers that are never catalog keys.
pub const BUILTIN_DENYLIST: &[&str] = &[
    "/",
    ".",
    ",",
    "-",
    "_",
    ":",
    "\\n",
    "animate",
    "default",
    "undefined",
    "null",
    "true",
    "false",
    "click",
    "change",
    "keydown",
    "keyup",
    "resize",
    "scroll",
    "mousedown",
    "mouseup",
];

const MIN_LITERAL_LEN: usize = 2;
const MIN_BARE_WORD_LEN: usize = 4;

/// Decides whether a captured literal looks like a catalog key.
///
/// The call-forms are textually generic, so any unrelated `t("...")` helper
/// matches too; this filter is what keeps those out of the usage index.
#[derive(Debug, Clone)]
pub struct KeyFilter {
    denylist: HashSet<String>,
}

impl Default for KeyFilter {
    fn default() -> Self {
        Self::new(&[])
    }
}

impl KeyFilter {
    pub fn new(extra: &[String]) -> Self {
        let denylist = BUILTIN_DENYLIST
            .iter()
            .map(|s| s.to_string())
            .chain(extra.iter().cloned())
            .collect();
        Self { denylist }
    }

    pub fn is_plausible(&self, literal: &str) -> bool {
        if literal.chars().count() < MIN_LITERAL_LEN {
            return false;
        }
        if literal.trim().is_empty() || self.denylist.contains(literal) {
            return false;
        }
        if literal.contains('.') {
            return true;
        }

        let stripped: String = literal.chars().filter(|c| *c != '_' && *c != '-').collect();
        stripped.chars().count() >= MIN_BARE_WORD_LEN
            && stripped.chars().all(char::is_alphanumeric)
    }
}
