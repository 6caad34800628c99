use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use super::PlayerService;
use crate::{
    db::{match_update, MatchStore, MatchUpdate},
    error::AppError,
    models::{Color, Fleet, Match, TurnSnapshot},
};

/// Match setup and lifecycle actions.
///
/// Every action loads the match, applies the rule on [`Match`] and persists
/// the result through the store's atomic update.
#[derive(Clone)]
pub struct MatchService {
    store: Arc<dyn MatchStore>,
    players: PlayerService,
}

impl MatchService {
    pub fn new(store: Arc<dyn MatchStore>, players: PlayerService) -> Self {
        Self { store, players }
    }

    /// Create a match hosted by `host` against `opponent`
    pub async fn create_match(
        &self,
        host: Uuid,
        opponent: Uuid,
        host_color: Color,
    ) -> Result<Match, AppError> {
        // Both participants must be registered
        self.players.retrieve_player(host).await?;
        self.players.retrieve_player(opponent).await?;

        let record = Match::new(host, opponent, host_color, Utc::now())?;
        self.store.insert_match(&record).await?;

        tracing::info!(
            "Player {} created match {} (white: {}, black: {})",
            host,
            record.uuid,
            record.white_player,
            record.black_player
        );
        Ok(record)
    }

    pub async fn get_match(&self, match_uuid: Uuid) -> Result<Match, AppError> {
        self.store
            .find_match(match_uuid)
            .await?
            .ok_or_else(|| not_found(match_uuid))
    }

    pub async fn mark_ready(
        &self,
        match_uuid: Uuid,
        player: Uuid,
        fleet: Fleet,
    ) -> Result<Match, AppError> {
        let record = self
            .update(
                match_uuid,
                match_update(move |m| m.mark_ready(player, fleet, Utc::now())),
            )
            .await?;

        if record.started {
            tracing::info!("Match {} started", match_uuid);
        }
        Ok(record)
    }

    pub async fn record_turn(
        &self,
        match_uuid: Uuid,
        player: Uuid,
        snapshot: TurnSnapshot,
    ) -> Result<Match, AppError> {
        let record = self
            .update(
                match_uuid,
                match_update(move |m| m.record_turn(player, snapshot)),
            )
            .await?;

        tracing::debug!(
            "Match {} recorded turn {} for player {}",
            match_uuid,
            record.turns.len() - 1,
            player
        );
        Ok(record)
    }

    pub async fn agree_to_draw(&self, match_uuid: Uuid, player: Uuid) -> Result<Match, AppError> {
        let record = self
            .update(
                match_uuid,
                match_update(move |m| m.agree_to_draw(player, Utc::now())),
            )
            .await?;

        if record.draw {
            tracing::info!("Match {} ended in a draw", match_uuid);
        }
        Ok(record)
    }

    pub async fn resign(&self, match_uuid: Uuid, player: Uuid) -> Result<Match, AppError> {
        let record = self
            .update(
                match_uuid,
                match_update(move |m| m.resign(player, Utc::now())),
            )
            .await?;

        tracing::info!("Player {} resigned match {}", player, match_uuid);
        Ok(record)
    }

    pub async fn declare_winner(&self, match_uuid: Uuid, player: Uuid) -> Result<Match, AppError> {
        let record = self
            .update(
                match_uuid,
                match_update(move |m| m.declare_winner(player, Utc::now())),
            )
            .await?;

        tracing::info!("Player {} won match {}", player, match_uuid);
        Ok(record)
    }

    async fn update(&self, match_uuid: Uuid, update: MatchUpdate) -> Result<Match, AppError> {
        self.store
            .update_match(match_uuid, update)
            .await?
            .ok_or_else(|| not_found(match_uuid))
    }
}

fn not_found(match_uuid: Uuid) -> AppError {
    AppError::invalid_argument(format!("Match {} does not exist", match_uuid))
}
