use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use super::parse_uuid;
use crate::{
    db::PlayerStore,
    error::AppError,
    models::{Player, MAX_PLAYER_NAME_LENGTH},
};

/// Player lookups and registration on top of a [`PlayerStore`]
#[derive(Clone)]
pub struct PlayerService {
    store: Arc<dyn PlayerStore>,
}

impl PlayerService {
    pub fn new(store: Arc<dyn PlayerStore>) -> Self {
        Self { store }
    }

    /// Look up a player from a raw client-supplied UUID.
    ///
    /// Malformed and unknown UUIDs are both invalid arguments.
    pub async fn retrieve_player_by_uuid(&self, player_uuid: &str) -> Result<Player, AppError> {
        let uuid = parse_uuid("playerUuid", player_uuid)?;
        self.retrieve_player(uuid).await
    }

    pub async fn retrieve_player(&self, uuid: Uuid) -> Result<Player, AppError> {
        tracing::debug!("Retrieving player {}", uuid);

        self.store
            .find_player(uuid)
            .await?
            .ok_or_else(|| AppError::invalid_argument(format!("Player {} does not exist", uuid)))
    }

    pub async fn register_player(&self, name: &str) -> Result<Player, AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::invalid_argument("Player name is required"));
        }
        if name.chars().count() > MAX_PLAYER_NAME_LENGTH {
            return Err(AppError::invalid_argument(format!(
                "Player name must be at most {} characters",
                MAX_PLAYER_NAME_LENGTH
            )));
        }

        let player = Player::new(name, Utc::now());
        self.store.insert_player(&player).await?;

        tracing::info!("Registered player {} ({})", player.name, player.uuid);
        Ok(player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;

    fn service() -> PlayerService {
        PlayerService::new(Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn test_register_then_retrieve() {
        let service = service();
        let player = service.register_player("  Hornblower ").await.unwrap();
        assert_eq!(player.name, "Hornblower");

        let found = service
            .retrieve_player_by_uuid(&player.uuid.to_string())
            .await
            .unwrap();
        assert_eq!(found, player);
    }

    #[tokio::test]
    async fn test_retrieve_unknown_player_is_invalid_argument() {
        let service = service();
        let uuid = Uuid::new_v4();

        let error = service
            .retrieve_player_by_uuid(&uuid.to_string())
            .await
            .unwrap_err();

        assert!(matches!(error, AppError::InvalidArgument(_)));
        assert_eq!(error.to_string(), format!("Player {} does not exist", uuid));
    }

    #[tokio::test]
    async fn test_retrieve_malformed_uuid_is_invalid_argument() {
        let error = service()
            .retrieve_player_by_uuid("12345")
            .await
            .unwrap_err();
        assert!(matches!(error, AppError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn test_register_rejects_bad_names() {
        let service = service();

        assert!(matches!(
            service.register_player("   ").await,
            Err(AppError::InvalidArgument(_))
        ));

        let long_name = "x".repeat(MAX_PLAYER_NAME_LENGTH + 1);
        assert!(matches!(
            service.register_player(&long_name).await,
            Err(AppError::InvalidArgument(_))
        ));

        let exact = "x".repeat(MAX_PLAYER_NAME_LENGTH);
        assert!(service.register_player(&exact).await.is_ok());
    }
}
