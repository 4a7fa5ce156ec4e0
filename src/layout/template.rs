//! Placeholder substitution for layout node names.
use std::collections::BTreeMap;

/// Values substituted into `{name}` placeholders of node-name templates.
///
/// One mapping is supplied per bind and applied uniformly to every node in
/// the tree.
///
/// # Examples
///
/// ```
/// use toolstrap::layout::TemplateVars;
///
/// let vars = TemplateVars::new().with("app", "godel").with("version", "0.0.1");
/// assert_eq!(vars.render("{app}-{version}"), "godel-0.0.1");
/// assert_eq!(vars.render("{unknown}"), "{unknown}");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateVars {
    values: BTreeMap<String, String>,
}

impl TemplateVars {
    /// Create an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Set `name` to `value`, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// Look up the value bound to `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Substitute every `{name}` placeholder in `template`.
    ///
    /// Placeholders without a bound value, and unbalanced braces, are kept
    /// verbatim.
    #[must_use]
    pub fn render(&self, template: &str) -> String {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;
        while let Some(open) = rest.find('{') {
            let (literal, tail) = rest.split_at(open);
            out.push_str(literal);
            let Some(close) = tail.find('}') else {
                out.push_str(tail);
                return out;
            };
            let (placeholder, after) = tail.split_at(close + 1);
            let name = placeholder
                .strip_prefix('{')
                .and_then(|p| p.strip_suffix('}'))
                .unwrap_or_default();
            match self.get(name) {
                Some(value) if !name.is_empty() && !name.contains('{') => out.push_str(value),
                _ => out.push_str(placeholder),
            }
            rest = after;
        }
        out.push_str(rest);
        out
    }
}

impl<K, V> FromIterator<(K, V)> for TemplateVars
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut vars = Self::new();
        for (k, v) in iter {
            vars.insert(k, v);
        }
        vars
    }
}
