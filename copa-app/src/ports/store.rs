use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Collection {
    Players,
    Documents,
    Teams,
    Tournaments,
    Enrollments,
    OcrCache,
}

impl Collection {
    pub const ALL: [Collection; 6] = [
        Collection::Players,
        Collection::Documents,
        Collection::Teams,
        Collection::Tournaments,
        Collection::Enrollments,
        Collection::OcrCache,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Collection::Players => "players",
            Collection::Documents => "documents",
            Collection::Teams => "teams",
            Collection::Tournaments => "tournaments",
            Collection::Enrollments => "enrollments",
            Collection::OcrCache => "ocr-cache",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Ordered list storage, one independently persisted list per collection.
///
/// A collection that does not exist yet reads as empty. A collection holding
/// a record that does not decode fails to load, so callers never write back
/// a list with that record missing. `save` replaces the whole collection.
pub trait RecordStore {
    fn load<T: DeserializeOwned>(&self, collection: Collection) -> Result<Vec<T>, StoreError>;
    fn save<T: Serialize>(&self, collection: Collection, records: &[T]) -> Result<(), StoreError>;
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to encode collection {collection}: {source}")]
    Serialization {
        collection: Collection,
        #[source]
        source: serde_json::Error,
    },

    #[error("record {index} of collection {collection} cannot be read: {source}")]
    Record {
        collection: Collection,
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to access collection {collection}: {source}")]
    Io {
        collection: Collection,
        #[source]
        source: std::io::Error,
    },
}

/// Decodes raw records one at a time, reporting the first one that fails.
pub fn decode_records<T: DeserializeOwned>(
    collection: Collection,
    values: Vec<serde_json::Value>,
) -> Result<Vec<T>, StoreError> {
    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            serde_json::from_value(value).map_err(|source| StoreError::Record {
                collection,
                index,
                source,
            })
        })
        .collect()
}
