//! Path-addressed mutable JSON document
//!
//! Filter actions never get a raw reference to the tree. They edit it through
//! [`JsonDocument`] using dot-separated paths (`user.password`,
//! `items.0.token`), and there is no way to replace the root, so an object
//! payload stays an object.

use crate::core::error::Result;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct JsonDocument {
    root: Value,
}

enum Segment<'a> {
    Key(&'a str),
    Index(usize),
}

fn segment_for<'a>(parent: &Value, raw: &'a str) -> Segment<'a> {
    match (parent, raw.parse::<usize>()) {
        (Value::Array(_), Ok(index)) => Segment::Index(index),
        _ => Segment::Key(raw),
    }
}

fn child<'v>(parent: &'v Value, raw: &str) -> Option<&'v Value> {
    match segment_for(parent, raw) {
        Segment::Index(index) => parent.as_array()?.get(index),
        Segment::Key(key) => parent.as_object()?.get(key),
    }
}

fn child_mut<'v>(parent: &'v mut Value, raw: &str) -> Option<&'v mut Value> {
    match segment_for(parent, raw) {
        Segment::Index(index) => parent.as_array_mut()?.get_mut(index),
        Segment::Key(key) => parent.as_object_mut()?.get_mut(key),
    }
}

/// Split `a.b.c` into (`a.b`, `c`). `None` for the empty path.
fn split_parent(path: &str) -> Option<(Option<&str>, &str)> {
    if path.is_empty() {
        return None;
    }
    match path.rsplit_once('.') {
        Some((parent, last)) => Some((Some(parent), last)),
        None => Some((None, path)),
    }
}

impl JsonDocument {
    /// Parse raw JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::JsonError`](crate::LoggerError::JsonError) for
    /// malformed input.
    pub fn parse(raw: &str) -> Result<Self> {
        Ok(Self {
            root: serde_json::from_str(raw)?,
        })
    }

    pub fn from_value(root: Value) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    pub fn into_value(self) -> Value {
        self.root
    }

    pub fn get_field(&self, path: &str) -> Option<&Value> {
        path.split('.').try_fold(&self.root, child)
    }

    fn parent_mut(&mut self, parent: Option<&str>) -> Option<&mut Value> {
        match parent {
            None => Some(&mut self.root),
            Some(parent) => parent
                .split('.')
                .try_fold(&mut self.root, |node, raw| child_mut(node, raw)),
        }
    }

    /// Insert or overwrite the member at `path`.
    ///
    /// The parent must already exist. Array elements can be overwritten but
    /// not appended. Returns `false` when nothing was written.
    pub fn set_field(&mut self, path: &str, value: Value) -> bool {
        let Some((parent, last)) = split_parent(path) else {
            return false;
        };
        let Some(parent) = self.parent_mut(parent) else {
            return false;
        };
        match segment_for(parent, last) {
            Segment::Index(index) => match parent.as_array_mut().and_then(|a| a.get_mut(index)) {
                Some(slot) => {
                    *slot = value;
                    true
                }
                None => false,
            },
            Segment::Key(key) => match parent.as_object_mut() {
                Some(object) => {
                    object.insert(key.to_string(), value);
                    true
                }
                None => false,
            },
        }
    }

    /// Overwrite the member at `path` only if it is present.
    pub fn replace_field(&mut self, path: &str, value: Value) -> bool {
        if self.get_field(path).is_none() {
            return false;
        }
        self.set_field(path, value)
    }

    /// Remove the member at `path`, returning its previous value.
    pub fn remove_field(&mut self, path: &str) -> Option<Value> {
        let (parent, last) = split_parent(path)?;
        let parent = self.parent_mut(parent)?;
        match segment_for(parent, last) {
            Segment::Index(index) => {
                let array = parent.as_array_mut()?;
                (index < array.len()).then(|| array.remove(index))
            }
            Segment::Key(key) => parent.as_object_mut()?.remove(key),
        }
    }

    /// Serialize with two-space indentation.
    pub fn to_pretty_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.root)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> JsonDocument {
        JsonDocument::from_value(json!({
            "user": { "name": "ada", "password": "hunter2" },
            "items": [ { "token": "t1" }, { "token": "t2" } ],
            "count": 2
        }))
    }

    #[test]
    fn test_get_nested_and_indexed() {
        let doc = sample();
        assert_eq!(doc.get_field("user.name"), Some(&json!("ada")));
        assert_eq!(doc.get_field("items.1.token"), Some(&json!("t2")));
        assert_eq!(doc.get_field("user.missing"), None);
        assert_eq!(doc.get_field("count.deeper"), None);
    }

    #[test]
    fn test_set_field() {
        let mut doc = sample();
        assert!(doc.set_field("user.password", json!("***")));
        assert!(doc.set_field("user.role", json!("admin")));
        assert!(doc.set_field("items.0.token", json!(null)));
        assert!(!doc.set_field("items.5", json!(1)));
        assert!(!doc.set_field("nope.child", json!(1)));

        assert_eq!(doc.get_field("user.password"), Some(&json!("***")));
        assert_eq!(doc.get_field("user.role"), Some(&json!("admin")));
        assert_eq!(doc.get_field("items.0.token"), Some(&json!(null)));
    }

    #[test]
    fn test_root_cannot_be_replaced() {
        let mut doc = sample();
        assert!(!doc.set_field("", json!("scalar")));
        assert!(doc.root().is_object());
        assert_eq!(doc.remove_field(""), None);
    }

    #[test]
    fn test_replace_only_existing() {
        let mut doc = sample();
        assert!(!doc.replace_field("secret", json!("***")));
        assert!(doc.get_field("secret").is_none());
        assert!(doc.replace_field("count", json!(3)));
    }

    #[test]
    fn test_remove_field() {
        let mut doc = sample();
        assert_eq!(doc.remove_field("user.password"), Some(json!("hunter2")));
        assert_eq!(doc.remove_field("items.0"), Some(json!({ "token": "t1" })));
        assert_eq!(doc.remove_field("items.9"), None);
        assert_eq!(doc.get_field("items.0.token"), Some(&json!("t2")));
    }

    #[test]
    fn test_parse_failure() {
        assert!(JsonDocument::parse("{not valid").is_err());
    }
}
