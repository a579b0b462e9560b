use std::sync::Arc;

use crate::{
    ServiceError, ServiceResult,
    domain::{
        TeamId, TournamentId,
        team::Team,
        tournament::{Enrollment, Tournament},
    },
    ports::store::{Collection, RecordStore},
};

pub trait TournamentService {
    fn list(&self) -> ServiceResult<Vec<Tournament>>;
    /// `capacity` is stored as given, without a lower bound.
    fn create(&self, name: &str, capacity: i64) -> ServiceResult<Tournament>;
    /// Enrollments past capacity are waitlisted, never rejected.
    fn enroll(&self, tournament_id: &TournamentId, team_id: &TeamId) -> ServiceResult<Enrollment>;
    /// All enrollments in creation order, optionally for one tournament.
    fn list_enrollments(&self, tournament_id: Option<&TournamentId>)
        -> ServiceResult<Vec<Enrollment>>;
}

pub struct TournamentServiceImpl<S: RecordStore> {
    store: Arc<S>,
}

impl<S: RecordStore> TournamentServiceImpl<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

impl<S: RecordStore> TournamentService for TournamentServiceImpl<S> {
    fn list(&self) -> ServiceResult<Vec<Tournament>> {
        Ok(self.store.load(Collection::Tournaments)?)
    }

    fn create(&self, name: &str, capacity: i64) -> ServiceResult<Tournament> {
        let tournament = Tournament::new(name.to_string(), capacity);
        let mut tournaments = self.list()?;
        tournaments.push(tournament.clone());
        self.store.save(Collection::Tournaments, &tournaments)?;

        log::info!(
            "Created tournament {} ({}) with {} slots",
            tournament.id,
            tournament.name,
            tournament.capacity
        );
        Ok(tournament)
    }

    fn enroll(&self, tournament_id: &TournamentId, team_id: &TeamId) -> ServiceResult<Enrollment> {
        let tournaments = self.list()?;
        let teams: Vec<Team> = self.store.load(Collection::Teams)?;
        let mut enrollments: Vec<Enrollment> = self.store.load(Collection::Enrollments)?;

        let Some(tournament) = tournaments.iter().find(|t| &t.id == tournament_id) else {
            log::debug!("Tournament {} not found for enrollment", tournament_id);
            return ServiceError::not_found("Torneio não encontrado");
        };
        if !teams.iter().any(|t| &t.id == team_id) {
            log::debug!("Team {} not found for enrollment", team_id);
            return ServiceError::not_found("Time não encontrado");
        }

        let status = tournament.admission_status(&enrollments);
        let enrollment = Enrollment::new(tournament_id.clone(), team_id.clone(), status);
        enrollments.push(enrollment.clone());
        self.store.save(Collection::Enrollments, &enrollments)?;

        log::info!(
            "Team {} enrolled in tournament {} as {}",
            team_id,
            tournament_id,
            status
        );
        Ok(enrollment)
    }

    fn list_enrollments(
        &self,
        tournament_id: Option<&TournamentId>,
    ) -> ServiceResult<Vec<Enrollment>> {
        let enrollments: Vec<Enrollment> = self.store.load(Collection::Enrollments)?;
        Ok(match tournament_id {
            Some(id) => enrollments
                .into_iter()
                .filter(|e| &e.tournament_id == id)
                .collect(),
            None => enrollments,
        })
    }
}
