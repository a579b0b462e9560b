use std::path::PathBuf;

use clap::{Parser, Subcommand};
use copa_app::{
    Application, DEFAULT_ORGANIZER_EMAIL, ServiceError,
    domain::{
        DocumentId, PlayerId, TeamId, TournamentId, player::PlayerUpdate, team::TeamUpdate,
    },
};
use copa_persistence_json::DEFAULT_DATA_DIR;
use serde::Serialize;
use thiserror::Error;

/// Plataforma Copa PAB - CLI
#[derive(Parser, Debug)]
#[command(name = "copa")]
#[command(about = "Plataforma Copa PAB - CLI", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Directory holding the JSON collections
    #[arg(long, env = "COPA_DATA_DIR", default_value = DEFAULT_DATA_DIR, global = true)]
    pub data_dir: PathBuf,

    /// Recipient of document upload notices
    #[arg(long, env = "COPA_ORGANIZER_EMAIL", default_value = DEFAULT_ORGANIZER_EMAIL, global = true)]
    pub organizer_email: String,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, env = "COPA_LOG_LEVEL", default_value = "info", global = true)]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Gerenciar jogadoras
    #[command(name = "jogadora")]
    Player {
        #[command(subcommand)]
        action: PlayerAction,
    },
    /// Gerenciar times
    #[command(name = "time")]
    Team {
        #[command(subcommand)]
        action: TeamAction,
    },
    /// Gerenciar documentos
    #[command(name = "documento")]
    Document {
        #[command(subcommand)]
        action: DocumentAction,
    },
    /// Gerenciar torneios
    #[command(name = "torneio")]
    Tournament {
        #[command(subcommand)]
        action: TournamentAction,
    },
    /// Inscrever time em torneio
    #[command(name = "inscrever")]
    Enroll { torneio_id: String, time_id: String },
    /// Consultar inscrições
    #[command(name = "inscricao")]
    Enrollment {
        #[command(subcommand)]
        action: EnrollmentAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum PlayerAction {
    /// Listar todas as jogadoras
    #[command(name = "listar")]
    List,
    /// Criar nova jogadora
    #[command(name = "criar")]
    Create {
        nome: String,
        #[arg(allow_negative_numbers = true)]
        idade: i32,
        contato: String,
    },
    /// Atualizar dados de uma jogadora
    #[command(name = "atualizar")]
    Update {
        id: String,
        #[arg(long)]
        nome: Option<String>,
        #[arg(long, allow_negative_numbers = true)]
        idade: Option<i32>,
        #[arg(long)]
        contato: Option<String>,
    },
    /// Remover uma jogadora
    #[command(name = "remover")]
    Remove { id: String },
}

#[derive(Subcommand, Debug)]
pub enum TeamAction {
    /// Listar todos os times
    #[command(name = "listar")]
    List,
    /// Criar novo time
    #[command(name = "criar")]
    Create {
        nome: String,
        /// IDs das jogadoras
        #[arg(required = true, num_args = 1..)]
        integrantes: Vec<String>,
    },
    /// Atualizar nome ou integrantes de um time
    #[command(name = "atualizar")]
    Update {
        id: String,
        #[arg(long)]
        nome: Option<String>,
        /// IDs das jogadoras
        #[arg(long, num_args = 1..)]
        integrantes: Option<Vec<String>>,
    },
    /// Remover um time
    #[command(name = "remover")]
    Remove { id: String },
}

#[derive(Subcommand, Debug)]
pub enum DocumentAction {
    /// Listar todos os documentos
    #[command(name = "listar")]
    List,
    /// Enviar documento de uma jogadora
    #[command(name = "enviar")]
    Upload {
        jogadora_id: String,
        arquivo: PathBuf,
    },
    /// Substituir o arquivo de um documento
    #[command(name = "atualizar")]
    Update { doc_id: String, arquivo: PathBuf },
    /// Definir status: approved, rejected ou pending
    #[command(name = "validar")]
    Validate {
        doc_id: String,
        status: String,
        #[arg(long, default_value = "")]
        nota: String,
    },
    /// Registrar texto extraído (OCR simulado)
    #[command(name = "ocr")]
    Ocr { doc_id: String, texto: String },
}

#[derive(Subcommand, Debug)]
pub enum TournamentAction {
    /// Listar todos os torneios
    #[command(name = "listar")]
    List,
    /// Criar novo torneio
    #[command(name = "criar")]
    Create {
        nome: String,
        #[arg(allow_negative_numbers = true)]
        vagas: i64,
    },
}

#[derive(Subcommand, Debug)]
pub enum EnrollmentAction {
    /// Listar inscrições, opcionalmente de um torneio
    #[command(name = "listar")]
    List {
        #[arg(long)]
        torneio: Option<String>,
    },
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("falha ao formatar saída: {0}")]
    Render(#[from] serde_json::Error),
}

/// Pretty JSON with two-space indentation and literal non-ASCII text.
fn render<T: Serialize>(value: &T) -> Result<String, CliError> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub fn run(app: &Application, command: Command) -> Result<String, CliError> {
    match command {
        Command::Player { action } => run_player(app, action),
        Command::Team { action } => run_team(app, action),
        Command::Document { action } => run_document(app, action),
        Command::Tournament { action } => run_tournament(app, action),
        Command::Enroll {
            torneio_id,
            time_id,
        } => render(
            &app.tournament_service
                .enroll(&TournamentId::from(torneio_id), &TeamId::from(time_id))?,
        ),
        Command::Enrollment {
            action: EnrollmentAction::List { torneio },
        } => {
            let tournament_id = torneio.map(TournamentId::from);
            render(&app.tournament_service.list_enrollments(tournament_id.as_ref())?)
        }
    }
}

fn run_player(app: &Application, action: PlayerAction) -> Result<String, CliError> {
    let registry = &app.player_registry;
    match action {
        PlayerAction::List => render(&registry.list()?),
        PlayerAction::Create {
            nome,
            idade,
            contato,
        } => render(&registry.create(&nome, idade, &contato)?),
        PlayerAction::Update {
            id,
            nome,
            idade,
            contato,
        } => {
            let update = PlayerUpdate {
                name: nome,
                age: idade,
                contact: contato,
            };
            render(&registry.update(&PlayerId::from(id), update)?)
        }
        PlayerAction::Remove { id } => {
            registry.delete(&PlayerId::from(id.as_str()))?;
            Ok(format!("Jogadora {} removida", id))
        }
    }
}

fn run_team(app: &Application, action: TeamAction) -> Result<String, CliError> {
    let registry = &app.team_registry;
    match action {
        TeamAction::List => render(&registry.list()?),
        TeamAction::Create { nome, integrantes } => {
            let members = integrantes.into_iter().map(PlayerId::from).collect();
            render(&registry.create(&nome, members)?)
        }
        TeamAction::Update {
            id,
            nome,
            integrantes,
        } => {
            let update = TeamUpdate {
                name: nome,
                members: integrantes.map(|ids| ids.into_iter().map(PlayerId::from).collect()),
            };
            render(&registry.update(&TeamId::from(id), update)?)
        }
        TeamAction::Remove { id } => {
            registry.delete(&TeamId::from(id.as_str()))?;
            Ok(format!("Time {} removido", id))
        }
    }
}

fn run_document(app: &Application, action: DocumentAction) -> Result<String, CliError> {
    let workflow = &app.document_workflow;
    match action {
        DocumentAction::List => render(&workflow.list()?),
        DocumentAction::Upload {
            jogadora_id,
            arquivo,
        } => render(&workflow.upload(&PlayerId::from(jogadora_id), &arquivo)?),
        DocumentAction::Update { doc_id, arquivo } => {
            render(&workflow.update(&DocumentId::from(doc_id), &arquivo)?)
        }
        DocumentAction::Validate {
            doc_id,
            status,
            nota,
        } => render(&workflow.validate(&DocumentId::from(doc_id), &status, &nota)?),
        DocumentAction::Ocr { doc_id, texto } => {
            render(&workflow.simulate_ocr(&DocumentId::from(doc_id), &texto)?)
        }
    }
}

fn run_tournament(app: &Application, action: TournamentAction) -> Result<String, CliError> {
    let service = &app.tournament_service;
    match action {
        TournamentAction::List => render(&service.list()?),
        TournamentAction::Create { nome, vagas } => render(&service.create(&nome, vagas)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_negative_capacity() {
        let cli = Cli::try_parse_from(["copa", "torneio", "criar", "Copa A", "-2"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Tournament {
                action: TournamentAction::Create { vagas: -2, .. }
            })
        ));
    }

    #[test]
    fn test_team_requires_members() {
        assert!(Cli::try_parse_from(["copa", "time", "criar", "Leoas"]).is_err());
        let cli = Cli::try_parse_from(["copa", "time", "criar", "Leoas", "p1", "p2", "p1"]).unwrap();
        match cli.command {
            Some(Command::Team {
                action: TeamAction::Create { integrantes, .. },
            }) => assert_eq!(integrantes, vec!["p1", "p2", "p1"]),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_validate_note_defaults_to_empty() {
        let cli = Cli::try_parse_from(["copa", "documento", "validar", "d1", "approved"]).unwrap();
        match cli.command {
            Some(Command::Document {
                action: DocumentAction::Validate { nota, status, .. },
            }) => {
                assert_eq!(nota, "");
                assert_eq!(status, "approved");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_data_dir_flag() {
        let cli = Cli::try_parse_from(["copa", "jogadora", "listar", "--data-dir", "/tmp/copa"]).unwrap();
        assert_eq!(cli.data_dir, PathBuf::from("/tmp/copa"));
    }
}
