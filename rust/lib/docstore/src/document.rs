use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field map of one document, as stored.
pub type Fields = Map<String, Value>;

/// A stored document: its store-assigned id plus its fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub fields: Fields,
}

impl Document {
    pub fn new(id: impl Into<String>, fields: Fields) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }
}

/// The full content of a collection at one point in time.
///
/// Documents are ordered by id. `sequence` grows with every write the
/// store publishes, so a later snapshot never carries a smaller one.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub collection: String,
    pub sequence: u64,
    pub documents: Vec<Document>,
}

impl Snapshot {
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&Document> {
        self.documents.iter().find(|d| d.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }
}

/// Fresh document id: 32 lowercase hex characters.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string().replace('-', "")
}

/// Overwrite `base` with every field present in `patch`.
pub(crate) fn merge_fields(base: &mut Fields, patch: Fields) {
    for (key, value) in patch {
        base.insert(key, value);
    }
}
