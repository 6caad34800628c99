use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool, Result};
use uuid::Uuid;

use crate::{
    error::AppError,
    models::{Match, MatchError, Player},
};

pub mod memory;
pub mod queries;

pub use memory::MemoryStore;

pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Mutation applied to a match while it is locked by the store
pub type MatchUpdate = Box<dyn FnOnce(&mut Match) -> std::result::Result<(), MatchError> + Send>;

pub fn match_update<F>(update: F) -> MatchUpdate
where
    F: FnOnce(&mut Match) -> std::result::Result<(), MatchError> + Send + 'static,
{
    Box::new(update)
}

#[async_trait]
pub trait PlayerStore: Send + Sync {
    async fn insert_player(&self, player: &Player) -> std::result::Result<(), AppError>;

    async fn find_player(&self, uuid: Uuid) -> std::result::Result<Option<Player>, AppError>;
}

#[async_trait]
pub trait MatchStore: Send + Sync {
    async fn insert_match(&self, record: &Match) -> std::result::Result<(), AppError>;

    async fn find_match(&self, uuid: Uuid) -> std::result::Result<Option<Match>, AppError>;

    /// Apply `update` to the stored match and persist the result.
    ///
    /// Returns `Ok(None)` when no match has that UUID. A failed update leaves
    /// the stored match untouched.
    async fn update_match(
        &self,
        uuid: Uuid,
        update: MatchUpdate,
    ) -> std::result::Result<Option<Match>, AppError>;
}

/// PostgreSQL-backed store for players and matches
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlayerStore for PgStore {
    async fn insert_player(&self, player: &Player) -> std::result::Result<(), AppError> {
        queries::insert_player(&self.pool, player).await?;
        Ok(())
    }

    async fn find_player(&self, uuid: Uuid) -> std::result::Result<Option<Player>, AppError> {
        Ok(queries::get_player(&self.pool, uuid).await?)
    }
}

#[async_trait]
impl MatchStore for PgStore {
    async fn insert_match(&self, record: &Match) -> std::result::Result<(), AppError> {
        queries::insert_match(&self.pool, record).await?;
        Ok(())
    }

    async fn find_match(&self, uuid: Uuid) -> std::result::Result<Option<Match>, AppError> {
        Ok(queries::get_match(&self.pool, uuid).await?)
    }

    async fn update_match(
        &self,
        uuid: Uuid,
        update: MatchUpdate,
    ) -> std::result::Result<Option<Match>, AppError> {
        let mut tx = self.pool.begin().await?;

        let mut record = match queries::lock_match(&mut tx, uuid).await? {
            Some(record) => record,
            None => return Ok(None),
        };

        // Dropping the transaction on error rolls back the row lock
        update(&mut record)?;

        queries::save_match(&mut tx, &record).await?;
        tx.commit().await?;

        Ok(Some(record))
    }
}
