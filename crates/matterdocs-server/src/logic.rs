use eyre::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt::{Display, Formatter};

/// A document filed under a matter.
///
/// Only `id` and `matter_id` are interpreted here; every other attribute is
/// carried through untouched.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub matter_id: String,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Document {
    #[must_use]
    pub fn new(id: impl Into<String>, matter_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            matter_id: matter_id.into(),
            attributes: Map::new(),
        }
    }

    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

impl Display for Document {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.attributes.get("title").and_then(Value::as_str) {
            Some(title) => write!(f, "[{}] {} ({})", self.matter_id, self.id, title),
            None => write!(f, "[{}] {}", self.matter_id, self.id),
        }
    }
}

/// Business logic behind the document endpoints.
pub trait DocumentLogic: Send + Sync {
    /// Returns the documents of `matter_id`, in their stored order.
    fn get_index(&self, matter_id: &str) -> Result<Vec<Document>>;
}

/// Documents held in memory, grouped by matter.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDocuments {
    by_matter: HashMap<String, Vec<Document>>,
}

impl InMemoryDocuments {
    #[must_use]
    pub fn new(documents: Vec<Document>) -> Self {
        let mut by_matter: HashMap<String, Vec<Document>> = HashMap::new();
        for document in documents {
            by_matter
                .entry(document.matter_id.clone())
                .or_default()
                .push(document);
        }
        Self { by_matter }
    }

    pub fn matters(&self) -> impl Iterator<Item = &str> {
        self.by_matter.keys().map(String::as_str)
    }
}

impl DocumentLogic for InMemoryDocuments {
    fn get_index(&self, matter_id: &str) -> Result<Vec<Document>> {
        Ok(self.by_matter.get(matter_id).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn groups_by_matter_keeping_order() {
        let logic = InMemoryDocuments::new(vec![
            Document::new("d1", "m1"),
            Document::new("d2", "m2"),
            Document::new("d3", "m1"),
            Document::new("d4", "m1"),
        ]);

        let ids: Vec<String> = logic
            .get_index("m1")
            .unwrap()
            .into_iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(ids, ["d1", "d3", "d4"]);
        assert_eq!(logic.get_index("m2").unwrap().len(), 1);
    }

    #[test]
    fn unknown_matter_is_empty() {
        let logic = InMemoryDocuments::new(vec![Document::new("d1", "m1")]);
        assert!(logic.get_index("nope").unwrap().is_empty());
    }

    #[test]
    fn extra_attributes_round_trip() {
        let raw = json!({
            "id": "d1",
            "matter_id": "123",
            "title": "Engagement letter",
            "pages": 4
        });
        let doc: Document = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(doc.attributes.get("pages"), Some(&json!(4)));
        assert_eq!(serde_json::to_value(&doc).unwrap(), raw);
        assert_eq!(doc.to_string(), "[123] d1 (Engagement letter)");
    }
}
