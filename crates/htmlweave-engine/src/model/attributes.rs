use indexmap::IndexMap;
use serde::Serialize;

/// Ordered name → value map of element attributes.
///
/// Values are stored entity-decoded. `None` marks a bare attribute
/// (`<input disabled>`). Insertion order is the serialization order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AttributeBag(IndexMap<String, Option<String>>);

impl AttributeBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an attribute unless the name is already present; the first
    /// occurrence wins, as in HTML.
    pub fn push(&mut self, name: impl Into<String>, value: Option<String>) {
        self.0.entry(name.into()).or_insert(value);
    }

    /// Sets or replaces an attribute, keeping its position if it existed.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), Some(value.into()));
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(|v| v.as_deref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Option<String>> {
        self.0.shift_remove(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    /// Serialized form: ` name="value"` per attribute, in order.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for (name, value) in self.iter() {
            out.push(' ');
            out.push_str(name);
            if let Some(value) = value {
                out.push_str("=\"");
                out.push_str(&html_escape::encode_double_quoted_attribute(value));
                out.push('"');
            }
        }
        out
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AttributeBag {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut bag = Self::new();
        for (k, v) in iter {
            bag.push(k, Some(v.into()));
        }
        bag
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn keeps_insertion_order() {
        let bag: AttributeBag = [("o", "O"), ("href", "x"), ("a", "1")].into_iter().collect();
        assert_eq!(bag.to_html(), r#" o="O" href="x" a="1""#);
    }

    #[test]
    fn first_duplicate_wins() {
        let mut bag = AttributeBag::new();
        bag.push("class", Some("one".into()));
        bag.push("class", Some("two".into()));
        assert_eq!(bag.get("class"), Some("one"));
        assert_eq!(bag.len(), 1);
    }

    #[test]
    fn set_replaces_in_place() {
        let mut bag: AttributeBag = [("a", "1"), ("b", "2")].into_iter().collect();
        bag.set("a", "3");
        assert_eq!(bag.to_html(), r#" a="3" b="2""#);
    }

    #[test]
    fn bare_and_escaped_values() {
        let mut bag = AttributeBag::new();
        bag.push("disabled", None);
        bag.push("title", Some(r#"say "hi" & go"#.into()));
        assert_eq!(
            bag.to_html(),
            r#" disabled title="say &quot;hi&quot; &amp; go""#
        );
    }
}
