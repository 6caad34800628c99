use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;
use uuid::Uuid;

use super::ship::{Color, Ship};

/// A player's pieces at one point in the match
pub type Fleet = BTreeSet<Ship>;

/// Every participant's fleet after one turn, keyed by player UUID
pub type TurnSnapshot = BTreeMap<Uuid, Fleet>;

/// Rule violations raised by the match lifecycle
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("A player cannot play against themselves")]
    SamePlayer,
    #[error("Player {0} is not part of this match")]
    NotAParticipant(Uuid),
    #[error("Match has already started")]
    AlreadyStarted,
    #[error("Match has not started yet")]
    NotStarted,
    #[error("Match has already ended")]
    AlreadyEnded,
    #[error("The {0} player is already ready")]
    AlreadyReady(Color),
    #[error("It is not the {0} player's turn")]
    NotYourTurn(Color),
    #[error("Fleet must contain at least one ship")]
    EmptyFleet,
    #[error("Fleet for the {0} player contains ships of another color")]
    FleetColorMismatch(Color),
    #[error("Turn snapshot must contain exactly the two players of this match")]
    InvalidSnapshot,
}

/// A single game session between a white and a black player.
///
/// `turns` grows by one snapshot per recorded move; snapshot 0 holds the
/// opening fleets collected while both sides get ready.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub uuid: Uuid,
    pub white_player: Uuid,
    pub black_player: Uuid,
    pub winner: Option<Uuid>,
    pub loser: Option<Uuid>,
    pub draw: bool,
    pub white_player_agreed_to_draw: bool,
    pub black_player_agreed_to_draw: bool,
    pub host: Uuid,
    pub creation_date: DateTime<Utc>,
    pub turn: Option<Color>,
    pub started: bool,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub white_player_ready: bool,
    pub black_player_ready: bool,
    #[serde(default)]
    #[sqlx(json)]
    pub turns: Vec<TurnSnapshot>,
}

impl Match {
    /// Set up a new match on behalf of `host`, who takes `host_color`
    pub fn new(
        host: Uuid,
        opponent: Uuid,
        host_color: Color,
        creation_date: DateTime<Utc>,
    ) -> Result<Self, MatchError> {
        if host == opponent {
            return Err(MatchError::SamePlayer);
        }

        let (white_player, black_player) = match host_color {
            Color::White => (host, opponent),
            Color::Black => (opponent, host),
        };

        Ok(Self {
            uuid: Uuid::new_v4(),
            white_player,
            black_player,
            winner: None,
            loser: None,
            draw: false,
            white_player_agreed_to_draw: false,
            black_player_agreed_to_draw: false,
            host,
            creation_date,
            turn: None,
            started: false,
            start_date: None,
            end_date: None,
            white_player_ready: false,
            black_player_ready: false,
            turns: Vec::new(),
        })
    }

    /// Which side `player` commands in this match
    pub fn side_of(&self, player: Uuid) -> Result<Color, MatchError> {
        if player == self.white_player {
            Ok(Color::White)
        } else if player == self.black_player {
            Ok(Color::Black)
        } else {
            Err(MatchError::NotAParticipant(player))
        }
    }

    pub fn player_of(&self, color: Color) -> Uuid {
        match color {
            Color::White => self.white_player,
            Color::Black => self.black_player,
        }
    }

    /// True once a winner, a draw or a resignation has been recorded
    pub fn is_closed(&self) -> bool {
        self.end_date.is_some()
    }

    fn ensure_open(&self) -> Result<(), MatchError> {
        if self.is_closed() {
            return Err(MatchError::AlreadyEnded);
        }
        Ok(())
    }

    fn ensure_in_progress(&self) -> Result<(), MatchError> {
        self.ensure_open()?;
        if !self.started {
            return Err(MatchError::NotStarted);
        }
        Ok(())
    }

    /// Register `player`'s opening fleet. The match starts, white to move,
    /// as soon as both sides are ready.
    pub fn mark_ready(
        &mut self,
        player: Uuid,
        fleet: Fleet,
        now: DateTime<Utc>,
    ) -> Result<(), MatchError> {
        self.ensure_open()?;
        if self.started {
            return Err(MatchError::AlreadyStarted);
        }

        let color = self.side_of(player)?;
        let already_ready = match color {
            Color::White => self.white_player_ready,
            Color::Black => self.black_player_ready,
        };
        if already_ready {
            return Err(MatchError::AlreadyReady(color));
        }
        validate_fleet(color, &fleet)?;

        if self.turns.is_empty() {
            self.turns.push(TurnSnapshot::new());
        }
        self.turns[0].insert(player, fleet);

        match color {
            Color::White => self.white_player_ready = true,
            Color::Black => self.black_player_ready = true,
        }

        if self.white_player_ready && self.black_player_ready {
            self.started = true;
            self.start_date = Some(now);
            self.turn = Some(Color::White);
        }

        Ok(())
    }

    /// Append the state of both fleets after `player`'s move and hand the
    /// turn to the other side.
    pub fn record_turn(&mut self, player: Uuid, snapshot: TurnSnapshot) -> Result<(), MatchError> {
        self.ensure_in_progress()?;

        let color = self.side_of(player)?;
        if self.turn != Some(color) {
            return Err(MatchError::NotYourTurn(color));
        }

        if snapshot.len() != 2
            || !snapshot.contains_key(&self.white_player)
            || !snapshot.contains_key(&self.black_player)
        {
            return Err(MatchError::InvalidSnapshot);
        }
        for (owner, fleet) in &snapshot {
            let owner_color = self.side_of(*owner)?;
            if fleet.iter().any(|ship| ship.color != owner_color) {
                return Err(MatchError::FleetColorMismatch(owner_color));
            }
        }

        self.turns.push(snapshot);
        self.turn = Some(color.opposite());

        Ok(())
    }

    /// Record that `player` accepts a draw. Both sides agreeing closes the match.
    pub fn agree_to_draw(&mut self, player: Uuid, now: DateTime<Utc>) -> Result<(), MatchError> {
        self.ensure_in_progress()?;

        match self.side_of(player)? {
            Color::White => self.white_player_agreed_to_draw = true,
            Color::Black => self.black_player_agreed_to_draw = true,
        }

        if self.white_player_agreed_to_draw && self.black_player_agreed_to_draw {
            self.draw = true;
            self.end_date = Some(now);
        }

        Ok(())
    }

    /// `player` forfeits; allowed before the match has started.
    pub fn resign(&mut self, player: Uuid, now: DateTime<Utc>) -> Result<(), MatchError> {
        self.ensure_open()?;

        let color = self.side_of(player)?;
        self.close_with_winner(color.opposite(), now);

        Ok(())
    }

    pub fn declare_winner(&mut self, player: Uuid, now: DateTime<Utc>) -> Result<(), MatchError> {
        self.ensure_in_progress()?;

        let color = self.side_of(player)?;
        self.close_with_winner(color, now);

        Ok(())
    }

    fn close_with_winner(&mut self, winner: Color, now: DateTime<Utc>) {
        self.winner = Some(self.player_of(winner));
        self.loser = Some(self.player_of(winner.opposite()));
        self.draw = false;
        self.end_date = Some(now);
    }
}

fn validate_fleet(color: Color, fleet: &Fleet) -> Result<(), MatchError> {
    if fleet.is_empty() {
        return Err(MatchError::EmptyFleet);
    }
    if fleet.iter().any(|ship| ship.color != color) {
        return Err(MatchError::FleetColorMismatch(color));
    }
    Ok(())
}
