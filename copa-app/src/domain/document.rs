use std::{path::Path, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize};

use crate::{
    ServiceError, ServiceResult,
    domain::{DocumentId, PlayerId, Timestamp, now},
};

pub const ALLOWED_EXTENSIONS: [&str; 4] = ["pdf", "jpg", "jpeg", "png"];

pub const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    Pending,
    Approved,
    Rejected,
}

impl DocumentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Pending => "pending",
            DocumentStatus::Approved => "approved",
            DocumentStatus::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DocumentStatus {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(DocumentStatus::Pending),
            "approved" => Ok(DocumentStatus::Approved),
            "rejected" => Ok(DocumentStatus::Rejected),
            _ => ServiceError::validation("Status inválido"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(with = "crate::domain::timestamp")]
    pub at: Timestamp,
}

impl HistoryEntry {
    pub fn updated() -> Self {
        Self {
            action: "updated".to_string(),
            note: None,
            at: now(),
        }
    }

    pub fn status_set(status: DocumentStatus, note: &str) -> Self {
        Self {
            action: format!("set_{}", status),
            note: Some(note.to_string()),
            at: now(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    #[serde(rename = "jogadora_id")]
    pub player_id: PlayerId,
    pub filename: String,
    #[serde(rename = "filetype")]
    pub file_type: String,
    pub status: DocumentStatus,
    #[serde(with = "crate::domain::timestamp")]
    pub uploaded_at: Timestamp,
    /// Append-only.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub history: Vec<HistoryEntry>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<HistoryEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<HistoryEntry>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Document {
    pub fn new(player_id: PlayerId, file: UploadedFile) -> Self {
        Self {
            id: DocumentId::generate(),
            player_id,
            filename: file.filename,
            file_type: file
                .mime_type
                .unwrap_or_else(|| FALLBACK_MIME_TYPE.to_string()),
            status: DocumentStatus::Pending,
            uploaded_at: now(),
            history: Vec::new(),
        }
    }

    /// Swap in a new file and send the document back to review.
    pub fn replace_file(&mut self, file: UploadedFile) {
        self.filename = file.filename;
        if let Some(mime_type) = file.mime_type {
            self.file_type = mime_type;
        }
        self.status = DocumentStatus::Pending;
        self.history.push(HistoryEntry::updated());
    }

    pub fn set_status(&mut self, status: DocumentStatus, note: &str) {
        self.status = status;
        self.history.push(HistoryEntry::status_set(status, note));
    }
}

/// A file on disk that passed the upload checks.
#[derive(Clone, Debug, PartialEq)]
pub struct UploadedFile {
    pub filename: String,
    pub mime_type: Option<String>,
}

impl UploadedFile {
    pub fn inspect(path: &Path) -> ServiceResult<Self> {
        if !path.exists() {
            return ServiceError::file_missing("Arquivo não encontrado");
        }

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());
        let allowed = extension
            .as_deref()
            .is_some_and(|ext| ALLOWED_EXTENSIONS.contains(&ext));
        if !allowed {
            return ServiceError::validation("Tipo de arquivo não permitido");
        }

        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mime_type = mime_guess::from_path(path)
            .first()
            .map(|mime| mime.essence_str().to_string());

        Ok(Self {
            filename,
            mime_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_status_parsing() {
        assert_eq!("approved".parse::<DocumentStatus>().unwrap(), DocumentStatus::Approved);
        assert_eq!("pending".parse::<DocumentStatus>().unwrap(), DocumentStatus::Pending);
        assert_eq!("rejected".parse::<DocumentStatus>().unwrap(), DocumentStatus::Rejected);
        assert!(matches!(
            "APPROVED".parse::<DocumentStatus>(),
            Err(ServiceError::Validation(_))
        ));
    }

    #[test]
    fn test_inspect_checks_existence_before_extension() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.exe");
        assert!(matches!(
            UploadedFile::inspect(&missing),
            Err(ServiceError::FileMissing(_))
        ));

        let exe = dir.path().join("tool.exe");
        fs::write(&exe, b"x").unwrap();
        assert!(matches!(
            UploadedFile::inspect(&exe),
            Err(ServiceError::Validation(_))
        ));

        let no_ext = dir.path().join("README");
        fs::write(&no_ext, b"x").unwrap();
        assert!(matches!(
            UploadedFile::inspect(&no_ext),
            Err(ServiceError::Validation(_))
        ));
    }

    #[test]
    fn test_inspect_accepts_uppercase_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("RG.PDF");
        fs::write(&path, b"%PDF").unwrap();
        let file = UploadedFile::inspect(&path).unwrap();
        assert_eq!(file.filename, "RG.PDF");
        assert_eq!(file.mime_type.as_deref(), Some("application/pdf"));
    }

    #[test]
    fn test_history_entry_note_is_omitted_for_updates() {
        let value = serde_json::to_value(HistoryEntry::updated()).unwrap();
        assert_eq!(value["action"], "updated");
        assert!(value.get("note").is_none());

        let value =
            serde_json::to_value(HistoryEntry::status_set(DocumentStatus::Rejected, "")).unwrap();
        assert_eq!(value["action"], "set_rejected");
        assert_eq!(value["note"], "");
    }

    #[test]
    fn test_null_history_reads_as_empty() {
        let json = r#"{"id":"d1","jogadora_id":"p1","filename":"a.png","filetype":"image/png","status":"pending","uploaded_at":"2024-05-01T12:00:00","history":null}"#;
        let doc: Document = serde_json::from_str(json).unwrap();
        assert!(doc.history.is_empty());
    }

    #[test]
    fn test_replace_file_keeps_previous_type_when_unknown() {
        let mut doc = Document::new(
            PlayerId::from("p1"),
            UploadedFile {
                filename: "a.png".to_string(),
                mime_type: Some("image/png".to_string()),
            },
        );
        doc.set_status(DocumentStatus::Approved, "ok");
        doc.replace_file(UploadedFile {
            filename: "b.png".to_string(),
            mime_type: None,
        });
        assert_eq!(doc.file_type, "image/png");
        assert_eq!(doc.filename, "b.png");
        assert_eq!(doc.status, DocumentStatus::Pending);
        assert_eq!(doc.history.len(), 2);
        assert_eq!(doc.history[1].action, "updated");
    }
}
