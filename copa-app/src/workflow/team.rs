use std::{collections::HashSet, sync::Arc};

use crate::{
    ServiceError, ServiceResult,
    domain::{
        PlayerId, TeamId,
        player::Player,
        team::{Team, TeamUpdate, first_unknown_member},
    },
    ports::store::{Collection, RecordStore},
};

pub trait TeamRegistry {
    fn list(&self) -> ServiceResult<Vec<Team>>;
    fn create(&self, name: &str, members: Vec<PlayerId>) -> ServiceResult<Team>;
    fn update(&self, id: &TeamId, update: TeamUpdate) -> ServiceResult<Team>;
    fn delete(&self, id: &TeamId) -> ServiceResult<()>;
}

pub struct TeamRegistryImpl<S: RecordStore> {
    store: Arc<S>,
}

impl<S: RecordStore> TeamRegistryImpl<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    fn check_members(&self, members: &[PlayerId]) -> ServiceResult<()> {
        let players: Vec<Player> = self.store.load(Collection::Players)?;
        let known: HashSet<&PlayerId> = players.iter().map(|p| &p.id).collect();
        match first_unknown_member(members, &known) {
            Some(unknown) => {
                log::debug!("Rejecting roster with unknown player {}", unknown);
                ServiceError::not_found(format!("Jogadora {} não encontrada", unknown))
            }
            None => Ok(()),
        }
    }
}

impl<S: RecordStore> TeamRegistry for TeamRegistryImpl<S> {
    fn list(&self) -> ServiceResult<Vec<Team>> {
        Ok(self.store.load(Collection::Teams)?)
    }

    fn create(&self, name: &str, members: Vec<PlayerId>) -> ServiceResult<Team> {
        self.check_members(&members)?;

        let team = Team::new(name.to_string(), members);
        let mut teams = self.list()?;
        teams.push(team.clone());
        self.store.save(Collection::Teams, &teams)?;

        log::info!(
            "Created team {} ({}) with {} members",
            team.id,
            team.name,
            team.members.len()
        );
        Ok(team)
    }

    fn update(&self, id: &TeamId, update: TeamUpdate) -> ServiceResult<Team> {
        let mut teams = self.list()?;
        let Some(team) = teams.iter_mut().find(|t| &t.id == id) else {
            log::debug!("Team {} not found for update", id);
            return ServiceError::not_found("Time não encontrado");
        };
        if let Some(members) = &update.members {
            self.check_members(members)?;
        }
        team.update(update);
        let updated = team.clone();

        self.store.save(Collection::Teams, &teams)?;
        log::info!("Updated team {}", id);
        Ok(updated)
    }

    fn delete(&self, id: &TeamId) -> ServiceResult<()> {
        let teams = self.list()?;
        let before = teams.len();
        let remaining: Vec<Team> = teams.into_iter().filter(|t| &t.id != id).collect();
        if remaining.len() == before {
            log::debug!("Team {} not found for deletion", id);
            return ServiceError::not_found("Time não encontrado");
        }

        self.store.save(Collection::Teams, &remaining)?;
        log::info!("Deleted team {}", id);
        Ok(())
    }
}
