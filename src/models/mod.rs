pub mod match_record;
pub mod player;
pub mod ship;

pub use match_record::{Fleet, Match, MatchError, TurnSnapshot};
pub use player::{Player, MAX_PLAYER_NAME_LENGTH};
pub use ship::{Color, Orientation, Ship, ShipKind};
