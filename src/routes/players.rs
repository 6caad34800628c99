use super::body::{parse_object, required_str};
use crate::{error::AppError, models::Player, AppState};
use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

/// Retrieve a player by the `playerUuid` field of a JSON body.
///
/// The body is taken raw so that a body which is not a JSON object fails as
/// a server error rather than an extractor rejection.
pub async fn retrieve_player(
    State(state): State<Arc<AppState>>,
    body: String,
) -> Result<Json<Player>, AppError> {
    let body = parse_object(&body)?;
    let player_uuid = required_str(&body, "playerUuid")?;

    let player = state.players.retrieve_player_by_uuid(player_uuid).await?;

    Ok(Json(player))
}

pub async fn register_player(
    State(state): State<Arc<AppState>>,
    body: String,
) -> Result<(StatusCode, Json<Player>), AppError> {
    let body = parse_object(&body)?;
    let player = state
        .players
        .register_player(required_str(&body, "name")?)
        .await?;

    Ok((StatusCode::CREATED, Json(player)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ErrorResponse, routes::tests::test_state};
    use axum::{body::Body, http::Request};
    use tower::ServiceExt;

    async fn post(state: Arc<AppState>, uri: &str, body: &str) -> (StatusCode, Vec<u8>) {
        let app = crate::routes::create_routes().with_state(state);
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, bytes.to_vec())
    }

    #[tokio::test]
    async fn test_retrieve_known_player_returns_ok() {
        let state = test_state();
        let player = state.players.register_player("Jervis").await.unwrap();

        let body = format!(r#"{{"playerUuid": "{}"}}"#, player.uuid);
        let (status, bytes) = post(state, "/api/players/retrieve", &body).await;

        assert_eq!(status, StatusCode::OK);
        let returned: Player = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(returned, player);
    }

    #[tokio::test]
    async fn test_retrieve_unknown_player_returns_unauthorized() {
        let state = test_state();
        let uuid = uuid::Uuid::new_v4();

        let body = format!(r#"{{"playerUuid": "{}"}}"#, uuid);
        let (status, bytes) = post(state, "/api/players/retrieve", &body).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let error: ErrorResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(error.message, format!("Player {} does not exist", uuid));
    }

    #[tokio::test]
    async fn test_retrieve_without_player_uuid_returns_unauthorized() {
        for body in [r#"{}"#, r#"{"playerUuid": null}"#, r#"{"playerUuid": "oops"}"#] {
            let (status, bytes) = post(test_state(), "/api/players/retrieve", body).await;

            assert_eq!(status, StatusCode::UNAUTHORIZED, "body: {}", body);
            let error: ErrorResponse = serde_json::from_slice(&bytes).unwrap();
            assert!(!error.message.is_empty());
        }
    }

    #[tokio::test]
    async fn test_retrieve_with_non_string_player_uuid_returns_server_error() {
        for body in [r#"{"playerUuid": 42}"#, r#"{"playerUuid": ["a"]}"#] {
            let (status, bytes) = post(test_state(), "/api/players/retrieve", body).await;

            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "body: {}", body);
            let error: ErrorResponse = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(error.message, "playerUuid must be a string");
        }
    }

    #[tokio::test]
    async fn test_retrieve_with_malformed_body_returns_server_error() {
        for body in ["not json", r#"["playerUuid"]"#] {
            let (status, bytes) = post(test_state(), "/api/players/retrieve", body).await;

            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "body: {}", body);
            let error: ErrorResponse = serde_json::from_slice(&bytes).unwrap();
            assert!(error.message.starts_with("Malformed request body"));
        }
    }

    #[tokio::test]
    async fn test_register_player_returns_created() {
        let state = test_state();
        let (status, bytes) = post(state.clone(), "/api/players", r#"{"name": "Rodney"}"#).await;

        assert_eq!(status, StatusCode::CREATED);
        let player: Player = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(player.name, "Rodney");
        assert_eq!(state.players.retrieve_player(player.uuid).await.unwrap(), player);
    }

    #[tokio::test]
    async fn test_register_player_with_blank_name_returns_unauthorized() {
        let (status, _) = post(test_state(), "/api/players", r#"{"name": " "}"#).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
