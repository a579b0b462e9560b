use std::sync::Arc;

use thiserror::Error;

use crate::{
    ports::{
        notification::NotificationPort,
        store::{RecordStore, StoreError},
    },
    workflow::{
        document::{DocumentWorkflow, DocumentWorkflowImpl},
        player::{PlayerRegistry, PlayerRegistryImpl},
        team::{TeamRegistry, TeamRegistryImpl},
        tournament::{TournamentService, TournamentServiceImpl},
    },
};

pub mod domain;
pub mod ports;
pub mod workflow;

#[cfg(test)]
pub(crate) mod testing;

pub const DEFAULT_ORGANIZER_EMAIL: &str = "organizers@copapab.local";

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    FileMissing(String),

    #[error("storage error: {0}")]
    Storage(String),
}

impl ServiceError {
    pub fn validation<T, R>(msg: T) -> ServiceResult<R>
    where
        T: Into<String>,
    {
        Err(ServiceError::Validation(msg.into()))
    }

    pub fn not_found<T, R>(msg: T) -> ServiceResult<R>
    where
        T: Into<String>,
    {
        Err(ServiceError::NotFound(msg.into()))
    }

    pub fn file_missing<T, R>(msg: T) -> ServiceResult<R>
    where
        T: Into<String>,
    {
        Err(ServiceError::FileMissing(msg.into()))
    }
}

impl From<StoreError> for ServiceError {
    fn from(e: StoreError) -> Self {
        ServiceError::Storage(e.to_string())
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Clone, Debug)]
pub struct AppSettings {
    /// Recipient of document upload and update notices.
    pub organizer_email: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            organizer_email: DEFAULT_ORGANIZER_EMAIL.to_string(),
        }
    }
}

pub struct Application {
    pub player_registry: Box<dyn PlayerRegistry + Send + Sync + 'static>,
    pub team_registry: Box<dyn TeamRegistry + Send + Sync + 'static>,
    pub document_workflow: Box<dyn DocumentWorkflow + Send + Sync + 'static>,
    pub tournament_service: Box<dyn TournamentService + Send + Sync + 'static>,
}

pub fn build_application<
    S: RecordStore + Send + Sync + 'static,
    N: NotificationPort + Send + Sync + 'static,
>(
    store: Arc<S>,
    notification_port: Arc<N>,
    settings: AppSettings,
) -> Application {
    let player_registry = Box::new(PlayerRegistryImpl::new(store.clone()));
    let team_registry = Box::new(TeamRegistryImpl::new(store.clone()));
    let document_workflow = Box::new(DocumentWorkflowImpl::new(
        store.clone(),
        notification_port,
        settings.organizer_email,
    ));
    let tournament_service = Box::new(TournamentServiceImpl::new(store));

    Application {
        player_registry,
        team_registry,
        document_workflow,
        tournament_service,
    }
}
