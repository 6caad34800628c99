use sqlx::{types::Json, PgConnection, PgPool, Result};
use uuid::Uuid;

use crate::models::{Match, Player};

// Player queries
pub async fn insert_player(pool: &PgPool, player: &Player) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO players (uuid, name, creation_date)
        VALUES ($1, $2, $3)
        "#,
    )
    .bind(player.uuid)
    .bind(&player.name)
    .bind(player.creation_date)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn get_player(pool: &PgPool, uuid: Uuid) -> Result<Option<Player>> {
    sqlx::query_as::<_, Player>("SELECT * FROM players WHERE uuid = $1")
        .bind(uuid)
        .fetch_optional(pool)
        .await
}

// Match queries
pub async fn insert_match(pool: &PgPool, record: &Match) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO matches (
            uuid, white_player, black_player, winner, loser,
            draw, white_player_agreed_to_draw, black_player_agreed_to_draw,
            host, creation_date, turn, started, start_date, end_date,
            white_player_ready, black_player_ready, turns
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
        "#,
    )
    .bind(record.uuid)
    .bind(record.white_player)
    .bind(record.black_player)
    .bind(record.winner)
    .bind(record.loser)
    .bind(record.draw)
    .bind(record.white_player_agreed_to_draw)
    .bind(record.black_player_agreed_to_draw)
    .bind(record.host)
    .bind(record.creation_date)
    .bind(record.turn)
    .bind(record.started)
    .bind(record.start_date)
    .bind(record.end_date)
    .bind(record.white_player_ready)
    .bind(record.black_player_ready)
    .bind(Json(&record.turns))
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn get_match(pool: &PgPool, uuid: Uuid) -> Result<Option<Match>> {
    sqlx::query_as::<_, Match>("SELECT * FROM matches WHERE uuid = $1")
        .bind(uuid)
        .fetch_optional(pool)
        .await
}

/// Fetch a match and hold its row lock until the surrounding transaction ends
pub async fn lock_match(conn: &mut PgConnection, uuid: Uuid) -> Result<Option<Match>> {
    sqlx::query_as::<_, Match>("SELECT * FROM matches WHERE uuid = $1 FOR UPDATE")
        .bind(uuid)
        .fetch_optional(conn)
        .await
}

/// Write back every mutable column of a match.
///
/// Participants, host and creation date never change after setup.
pub async fn save_match(conn: &mut PgConnection, record: &Match) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE matches
        SET winner = $1,
            loser = $2,
            draw = $3,
            white_player_agreed_to_draw = $4,
            black_player_agreed_to_draw = $5,
            turn = $6,
            started = $7,
            start_date = $8,
            end_date = $9,
            white_player_ready = $10,
            black_player_ready = $11,
            turns = $12
        WHERE uuid = $13
        "#,
    )
    .bind(record.winner)
    .bind(record.loser)
    .bind(record.draw)
    .bind(record.white_player_agreed_to_draw)
    .bind(record.black_player_agreed_to_draw)
    .bind(record.turn)
    .bind(record.started)
    .bind(record.start_date)
    .bind(record.end_date)
    .bind(record.white_player_ready)
    .bind(record.black_player_ready)
    .bind(Json(&record.turns))
    .bind(record.uuid)
    .execute(conn)
    .await?;

    Ok(())
}
