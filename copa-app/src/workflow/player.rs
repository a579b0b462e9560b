use std::sync::Arc;

use crate::{
    ServiceError, ServiceResult,
    domain::{
        PlayerId,
        player::{NewPlayer, Player, PlayerUpdate},
    },
    ports::store::{Collection, RecordStore},
};

pub trait PlayerRegistry {
    fn list(&self) -> ServiceResult<Vec<Player>>;
    fn create(&self, name: &str, age: i32, contact: &str) -> ServiceResult<Player>;
    fn update(&self, id: &PlayerId, update: PlayerUpdate) -> ServiceResult<Player>;
    /// Does not touch teams or documents referencing the player.
    fn delete(&self, id: &PlayerId) -> ServiceResult<()>;
}

pub struct PlayerRegistryImpl<S: RecordStore> {
    store: Arc<S>,
}

impl<S: RecordStore> PlayerRegistryImpl<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

impl<S: RecordStore> PlayerRegistry for PlayerRegistryImpl<S> {
    fn list(&self) -> ServiceResult<Vec<Player>> {
        Ok(self.store.load(Collection::Players)?)
    }

    fn create(&self, name: &str, age: i32, contact: &str) -> ServiceResult<Player> {
        let player = Player::create(NewPlayer::new(name, age, contact))?;

        let mut players = self.list()?;
        players.push(player.clone());
        self.store.save(Collection::Players, &players)?;

        log::info!("Created player {} ({})", player.id, player.name);
        Ok(player)
    }

    fn update(&self, id: &PlayerId, update: PlayerUpdate) -> ServiceResult<Player> {
        let mut players = self.list()?;
        let Some(player) = players.iter_mut().find(|p| &p.id == id) else {
            log::debug!("Player {} not found for update", id);
            return ServiceError::not_found("Jogadora não encontrada");
        };
        player.update(&update);
        let updated = player.clone();

        self.store.save(Collection::Players, &players)?;
        log::info!("Updated player {}", id);
        Ok(updated)
    }

    fn delete(&self, id: &PlayerId) -> ServiceResult<()> {
        let players = self.list()?;
        let before = players.len();
        let remaining: Vec<Player> = players.into_iter().filter(|p| &p.id != id).collect();
        if remaining.len() == before {
            log::debug!("Player {} not found for deletion", id);
            return ServiceError::not_found("Jogadora não encontrada");
        }

        self.store.save(Collection::Players, &remaining)?;
        log::info!("Deleted player {}", id);
        Ok(())
    }
}
