use serde::{Deserialize, Serialize};

use crate::domain::DocumentId;

/// Simulated text extraction result, cached per document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OcrEntry {
    pub doc_id: DocumentId,
    #[serde(rename = "texto")]
    pub text: String,
}
