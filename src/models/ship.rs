use serde::{Deserialize, Serialize};

/// The side a player commands
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(type_name = "VARCHAR", rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ShipKind {
    Carrier,
    Battleship,
    Cruiser,
    Submarine,
    Destroyer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// A single piece as recorded in a turn snapshot.
///
/// Ordering is derived field by field so a fleet stored as a `BTreeSet`
/// always serializes in the same order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Ship {
    pub kind: ShipKind,
    pub color: Color,
    pub row: u8,
    pub col: u8,
    pub orientation: Orientation,
    #[serde(default)]
    pub sunk: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_opposite() {
        assert_eq!(Color::White.opposite(), Color::Black);
        assert_eq!(Color::Black.opposite(), Color::White);
    }

    #[test]
    fn test_color_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&Color::White).unwrap(), r#""WHITE""#);
        let color: Color = serde_json::from_str(r#""BLACK""#).unwrap();
        assert_eq!(color, Color::Black);
    }

    #[test]
    fn test_ship_sunk_defaults_to_false() {
        let json = r#"{"kind":"DESTROYER","color":"WHITE","row":1,"col":2,"orientation":"VERTICAL"}"#;
        let ship: Ship = serde_json::from_str(json).unwrap();
        assert!(!ship.sunk);
        assert_eq!(ship.kind, ShipKind::Destroyer);
    }
}
