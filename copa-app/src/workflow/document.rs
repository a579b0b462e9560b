use std::{path::Path, sync::Arc};

use crate::{
    ServiceError, ServiceResult,
    domain::{
        DocumentId, PlayerId,
        document::{Document, DocumentStatus, UploadedFile},
        ocr::OcrEntry,
        player::Player,
    },
    ports::{
        notification::NotificationPort,
        store::{Collection, RecordStore},
    },
};

/// Upload and review of player documents.
///
/// Every status-affecting operation appends to the document history and
/// persists before notifying. Notification failures are logged and never
/// undo the write.
pub trait DocumentWorkflow {
    fn list(&self) -> ServiceResult<Vec<Document>>;
    fn upload(&self, player_id: &PlayerId, file: &Path) -> ServiceResult<Document>;
    fn update(&self, id: &DocumentId, file: &Path) -> ServiceResult<Document>;
    /// `status` is one of `approved`, `rejected` or `pending`. Any status can
    /// be set from any other.
    fn validate(&self, id: &DocumentId, status: &str, note: &str) -> ServiceResult<Document>;
    fn simulate_ocr(&self, id: &DocumentId, text: &str) -> ServiceResult<OcrEntry>;
}

pub struct DocumentWorkflowImpl<S: RecordStore, N: NotificationPort> {
    store: Arc<S>,
    notification_port: Arc<N>,
    organizer_email: String,
}

impl<S: RecordStore, N: NotificationPort> DocumentWorkflowImpl<S, N> {
    pub fn new(store: Arc<S>, notification_port: Arc<N>, organizer_email: String) -> Self {
        Self {
            store,
            notification_port,
            organizer_email,
        }
    }

    fn players(&self) -> ServiceResult<Vec<Player>> {
        Ok(self.store.load(Collection::Players)?)
    }

    fn notify(&self, to: &str, subject: &str, body: &str) {
        if let Err(e) = self.notification_port.send(to, subject, body) {
            log::warn!("Failed to notify {} about '{}': {}", to, subject, e);
        }
    }
}

impl<S: RecordStore, N: NotificationPort> DocumentWorkflow for DocumentWorkflowImpl<S, N> {
    fn list(&self) -> ServiceResult<Vec<Document>> {
        Ok(self.store.load(Collection::Documents)?)
    }

    fn upload(&self, player_id: &PlayerId, file: &Path) -> ServiceResult<Document> {
        if !self.players()?.iter().any(|p| &p.id == player_id) {
            log::debug!("Upload for unknown player {}", player_id);
            return ServiceError::not_found("Jogadora não encontrada");
        }
        let file = UploadedFile::inspect(file)?;

        let document = Document::new(player_id.clone(), file);
        let mut documents = self.list()?;
        documents.push(document.clone());
        self.store.save(Collection::Documents, &documents)?;
        log::info!(
            "Player {} uploaded document {} ({})",
            player_id,
            document.id,
            document.filename
        );

        self.notify(
            &self.organizer_email,
            "Novo documento enviado",
            &format!("Jogadora {} enviou {}", player_id, document.filename),
        );
        Ok(document)
    }

    fn update(&self, id: &DocumentId, file: &Path) -> ServiceResult<Document> {
        let mut documents = self.list()?;
        let Some(document) = documents.iter_mut().find(|d| &d.id == id) else {
            log::debug!("Document {} not found for update", id);
            return ServiceError::not_found("Documento não encontrado");
        };
        let file = UploadedFile::inspect(file)?;
        document.replace_file(file);
        let updated = document.clone();

        self.store.save(Collection::Documents, &documents)?;
        log::info!("Document {} replaced with {}", id, updated.filename);

        self.notify(
            &self.organizer_email,
            "Documento atualizado",
            &format!("Documento {} atualizado", id),
        );
        Ok(updated)
    }

    fn validate(&self, id: &DocumentId, status: &str, note: &str) -> ServiceResult<Document> {
        let status: DocumentStatus = status.parse()?;

        let players = self.players()?;
        let mut documents = self.list()?;
        let Some(document) = documents.iter_mut().find(|d| &d.id == id) else {
            log::debug!("Document {} not found for validation", id);
            return ServiceError::not_found("Documento não encontrado");
        };
        document.set_status(status, note);
        let validated = document.clone();

        self.store.save(Collection::Documents, &documents)?;
        log::info!("Document {} set to {}", id, status);

        match players.into_iter().find(|p| p.id == validated.player_id) {
            Some(player) => self.notify(
                &player.contact,
                &format!("Documento {}", status),
                &format!(
                    "Seu documento {} foi {}. {}",
                    validated.filename, status, note
                ),
            ),
            None => log::debug!(
                "Owner {} of document {} no longer exists, skipping notification",
                validated.player_id,
                id
            ),
        }
        Ok(validated)
    }

    fn simulate_ocr(&self, id: &DocumentId, text: &str) -> ServiceResult<OcrEntry> {
        let entry = OcrEntry {
            doc_id: id.clone(),
            text: text.to_string(),
        };
        let mut cache: Vec<OcrEntry> = self.store.load(Collection::OcrCache)?;
        cache.push(entry.clone());
        self.store.save(Collection::OcrCache, &cache)?;
        log::info!("Cached OCR text for document {}", id);
        Ok(entry)
    }
}
