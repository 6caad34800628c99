use super::body::{optional_field, parse_object, required_field, required_uuid};
use crate::{
    error::AppError,
    models::{Color, Fleet, Match, TurnSnapshot},
    services::parse_uuid,
    AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

/// Body: `hostUuid`, `opponentUuid`, optional `hostColor` (white unless stated)
pub async fn create_match(
    State(state): State<Arc<AppState>>,
    body: String,
) -> Result<(StatusCode, Json<Match>), AppError> {
    let body = parse_object(&body)?;
    let host = required_uuid(&body, "hostUuid")?;
    let opponent = required_uuid(&body, "opponentUuid")?;
    let host_color = optional_field::<Color>(&body, "hostColor")?.unwrap_or(Color::White);

    let record = state
        .matches
        .create_match(host, opponent, host_color)
        .await?;

    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn get_match(
    State(state): State<Arc<AppState>>,
    Path(match_uuid): Path<String>,
) -> Result<Json<Match>, AppError> {
    let match_uuid = parse_uuid("matchUuid", &match_uuid)?;
    Ok(Json(state.matches.get_match(match_uuid).await?))
}

/// Body: `playerUuid`, `fleet`
pub async fn mark_ready(
    State(state): State<Arc<AppState>>,
    Path(match_uuid): Path<String>,
    body: String,
) -> Result<Json<Match>, AppError> {
    let match_uuid = parse_uuid("matchUuid", &match_uuid)?;
    let body = parse_object(&body)?;
    let player = required_uuid(&body, "playerUuid")?;
    let fleet: Fleet = required_field(&body, "fleet")?;

    let record = state.matches.mark_ready(match_uuid, player, fleet).await?;
    Ok(Json(record))
}

/// Body: `playerUuid`, `snapshot`
pub async fn record_turn(
    State(state): State<Arc<AppState>>,
    Path(match_uuid): Path<String>,
    body: String,
) -> Result<Json<Match>, AppError> {
    let match_uuid = parse_uuid("matchUuid", &match_uuid)?;
    let body = parse_object(&body)?;
    let player = required_uuid(&body, "playerUuid")?;
    let snapshot: TurnSnapshot = required_field(&body, "snapshot")?;

    let record = state
        .matches
        .record_turn(match_uuid, player, snapshot)
        .await?;
    Ok(Json(record))
}

pub async fn agree_to_draw(
    State(state): State<Arc<AppState>>,
    Path(match_uuid): Path<String>,
    body: String,
) -> Result<Json<Match>, AppError> {
    let (match_uuid, player) = player_action(&match_uuid, &body)?;
    Ok(Json(state.matches.agree_to_draw(match_uuid, player).await?))
}

pub async fn resign(
    State(state): State<Arc<AppState>>,
    Path(match_uuid): Path<String>,
    body: String,
) -> Result<Json<Match>, AppError> {
    let (match_uuid, player) = player_action(&match_uuid, &body)?;
    Ok(Json(state.matches.resign(match_uuid, player).await?))
}

pub async fn declare_winner(
    State(state): State<Arc<AppState>>,
    Path(match_uuid): Path<String>,
    body: String,
) -> Result<Json<Match>, AppError> {
    let (match_uuid, player) = player_action(&match_uuid, &body)?;
    Ok(Json(state.matches.declare_winner(match_uuid, player).await?))
}

fn player_action(match_uuid: &str, body: &str) -> Result<(Uuid, Uuid), AppError> {
    let match_uuid = parse_uuid("matchUuid", match_uuid)?;
    let body = parse_object(body)?;
    let player = required_uuid(&body, "playerUuid")?;
    Ok((match_uuid, player))
}
