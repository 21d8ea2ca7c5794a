use once_cell::sync::Lazy;
use regex::Regex;

/// Attribute names tried by the attribute tier, in preference order.
pub const PREFERRED_ATTRIBUTES: &[&str] = &[
    "id",
    "data-testid",
    "data-test",
    "data-id",
    "name",
    "aria-label",
    "role",
    "type",
    "href",
    "for",
];

/// Leading value tokens some frameworks stamp onto generated ids.
const FRAMEWORK_VALUE_PREFIXES: &[&str] = &["react-", "vue-", "ng-", "svelte-"];

/// Class names owned by a framework or CSS-in-JS runtime rather than the author.
static FRAMEWORK_CLASS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(ng-|css-|sc-|jsx-|svelte-|emotion-|styled-|v-|_)").expect("valid regex")
});

/// Short alphabetic prefix followed by a run of at least six hex digits.
static HASH_CLASS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z]{1,5}[-_]?([0-9a-fA-F]{6,})$").expect("valid regex"));

/// Attributes written by frameworks or devtools that change across renders.
const NOISE_ATTRIBUTE_PREFIXES: &[&str] = &[
    "data-v-",
    "data-react",
    "data-svelte",
    "data-emotion",
    "data-styled",
    "data-jsx",
    "_ngcontent",
    "_nghost",
    "ng-reflect-",
    "ng-version",
    "jsaction",
];

/// Strip a leading framework token. Returns the remainder and whether
/// anything was removed.
pub fn strip_framework_prefix(value: &str) -> (&str, bool) {
    for prefix in FRAMEWORK_VALUE_PREFIXES {
        if let Some(rest) = value.strip_prefix(prefix) {
            if !rest.is_empty() {
                return (rest, true);
            }
        }
    }
    (value, false)
}

pub fn is_hash_class(name: &str) -> bool {
    HASH_CLASS
        .captures(name)
        .and_then(|c| c.get(1))
        .is_some_and(|hex| hex.as_str().chars().any(|c| c.is_ascii_digit()))
}

pub fn is_framework_class(name: &str) -> bool {
    FRAMEWORK_CLASS.is_match(name)
}

/// True for class names worth using in a selector or a snapshot.
pub fn is_meaningful_class(name: &str) -> bool {
    name.chars().count() >= 3
        && !name.chars().all(|c| c.is_ascii_digit())
        && !is_framework_class(name)
        && !is_hash_class(name)
}

pub fn filter_classes<'a>(classes: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
    let mut out: Vec<&str> = Vec::new();
    for class in classes {
        if is_meaningful_class(class) && !out.contains(&class) {
            out.push(class);
        }
    }
    out
}

pub fn is_noise_attribute(name: &str) -> bool {
    let name = name.to_ascii_lowercase();
    NOISE_ATTRIBUTE_PREFIXES.iter().any(|p| name.starts_with(p))
}
