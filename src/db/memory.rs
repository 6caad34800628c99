use async_trait::async_trait;
use dashmap::{mapref::entry::Entry, DashMap};
use uuid::Uuid;

use super::{MatchStore, MatchUpdate, PlayerStore};
use crate::{
    error::AppError,
    models::{Match, Player},
};

/// In-process store used when no database is configured, and by tests.
///
/// Records live only as long as the process.
#[derive(Default)]
pub struct MemoryStore {
    players: DashMap<Uuid, Player>,
    matches: DashMap<Uuid, Match>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PlayerStore for MemoryStore {
    async fn insert_player(&self, player: &Player) -> Result<(), AppError> {
        match self.players.entry(player.uuid) {
            Entry::Occupied(_) => {
                Err(anyhow::anyhow!("Player {} already stored", player.uuid).into())
            }
            Entry::Vacant(slot) => {
                slot.insert(player.clone());
                Ok(())
            }
        }
    }

    async fn find_player(&self, uuid: Uuid) -> Result<Option<Player>, AppError> {
        Ok(self.players.get(&uuid).map(|p| p.clone()))
    }
}

#[async_trait]
impl MatchStore for MemoryStore {
    async fn insert_match(&self, record: &Match) -> Result<(), AppError> {
        match self.matches.entry(record.uuid) {
            Entry::Occupied(_) => {
                Err(anyhow::anyhow!("Match {} already stored", record.uuid).into())
            }
            Entry::Vacant(slot) => {
                slot.insert(record.clone());
                Ok(())
            }
        }
    }

    async fn find_match(&self, uuid: Uuid) -> Result<Option<Match>, AppError> {
        Ok(self.matches.get(&uuid).map(|m| m.clone()))
    }

    async fn update_match(&self, uuid: Uuid, update: MatchUpdate) -> Result<Option<Match>, AppError> {
        // The shard stays write-locked until `entry` is dropped
        let Some(mut entry) = self.matches.get_mut(&uuid) else {
            return Ok(None);
        };

        let mut record = entry.clone();
        update(&mut record)?;
        *entry = record.clone();

        Ok(Some(record))
    }
}
