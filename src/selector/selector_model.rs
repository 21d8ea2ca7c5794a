use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier that uniquely matched one element when it was generated.
/// Nothing guarantees it still does afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selector(pub String);

impl Selector {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last alphanumeric token, e.g. `cta` for `button.cta` or `submit`
    /// for `button[name="submit"]`.
    pub fn last_token(&self) -> &str {
        self.0
            .split(|c: char| !(c.is_alphanumeric() || c == '-' || c == '_'))
            .filter(|t| !t.is_empty())
            .last()
            .unwrap_or(self.0.as_str())
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Selector {
    fn from(s: &str) -> Self {
        Selector(s.to_string())
    }
}

impl From<String> for Selector {
    fn from(s: String) -> Self {
        Selector(s)
    }
}

impl AsRef<str> for Selector {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectorTier {
    Attribute,
    Class,
    Structural,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedSelector {
    pub selector: Selector,
    pub tier: SelectorTier,
}
