// Multiplayer chess AI message types
// One `calculateMove` request in, one `moveResult` response out.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::EngineError;

/// Message type accepted by the engine
pub const CALCULATE_MOVE: &str = "calculateMove";

/// Message type sent back with the chosen move
pub const MOVE_RESULT: &str = "moveResult";

/// Board dimensions and player count
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Level {
    pub width: usize,
    pub height: usize,
    pub num_players: u8,
}

/// One serialized tile; absent `playerNum` and `type` mean an empty tile
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TileSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_num: Option<u8>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub piece_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub times_moved: Option<u32>,
}

/// Complete board snapshot received from the host application
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CalculateMoveRequest {
    #[serde(rename = "type")]
    pub message_type: String,
    pub level: Level,
    #[serde(rename = "activePlayer", alias = "playersTurn")]
    pub active_player: u8,
    pub tiles: Vec<TileSnapshot>,
}

/// Start and end coordinates of a move
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct MoveCoords {
    pub start_y: usize,
    pub start_x: usize,
    pub end_y: usize,
    pub end_x: usize,
}

impl fmt::Display for MoveCoords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({},{}) -> ({},{})",
            self.start_y, self.start_x, self.end_y, self.end_x
        )
    }
}

/// Response carrying the chosen move, or `null` when the player must pass
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct MoveResponse {
    #[serde(rename = "type")]
    pub message_type: String,
    #[serde(rename = "move")]
    pub chosen: Option<MoveCoords>,
}

impl MoveResponse {
    pub fn new(chosen: Option<MoveCoords>) -> Self {
        MoveResponse {
            message_type: MOVE_RESULT.to_string(),
            chosen,
        }
    }
}

/// The six piece kinds
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PieceType {
    King,
    Queen,
    Castle,
    Bishop,
    Horse,
    Pawn,
}

impl PieceType {
    /// Returns all piece types
    pub fn all() -> [PieceType; 6] {
        [
            PieceType::King,
            PieceType::Queen,
            PieceType::Castle,
            PieceType::Bishop,
            PieceType::Horse,
            PieceType::Pawn,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceType::King => "king",
            PieceType::Queen => "queen",
            PieceType::Castle => "castle",
            PieceType::Bishop => "bishop",
            PieceType::Horse => "horse",
            PieceType::Pawn => "pawn",
        }
    }
}

impl FromStr for PieceType {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PieceType::all()
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| EngineError::UnknownPieceType(s.to_string()))
    }
}

/// Step vectors of a pawn, as (dy, dx)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PawnVectors {
    pub forward: (isize, isize),
    pub left: (isize, isize),
    pub right: (isize, isize),
    pub diag_left: (isize, isize),
    pub diag_right: (isize, isize),
}

/// The four directions a pawn can face
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns all possible directions
    pub fn all() -> [Direction; 4] {
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    /// Movement vectors for a pawn facing this way; y grows downwards
    pub fn pawn_vectors(&self) -> PawnVectors {
        match self {
            Direction::Up => PawnVectors {
                forward: (-1, 0),
                left: (0, -1),
                right: (0, 1),
                diag_left: (-1, -1),
                diag_right: (-1, 1),
            },
            Direction::Down => PawnVectors {
                forward: (1, 0),
                left: (0, 1),
                right: (0, -1),
                diag_left: (1, 1),
                diag_right: (1, -1),
            },
            Direction::Left => PawnVectors {
                forward: (0, -1),
                left: (1, 0),
                right: (-1, 0),
                diag_left: (1, -1),
                diag_right: (-1, -1),
            },
            Direction::Right => PawnVectors {
                forward: (0, 1),
                left: (-1, 0),
                right: (1, 0),
                diag_left: (-1, 1),
                diag_right: (1, 1),
            },
        }
    }
}

impl FromStr for Direction {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Direction::all()
            .into_iter()
            .find(|dir| dir.as_str() == s)
            .ok_or_else(|| EngineError::UnknownDirection(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_accepts_legacy_turn_key() {
        let raw = r#"{
            "type": "calculateMove",
            "level": {"width": 1, "height": 1, "num_players": 2},
            "playersTurn": 2,
            "tiles": [{}]
        }"#;
        let request: CalculateMoveRequest = serde_json::from_str(raw).unwrap();
        assert_eq!(request.active_player, 2);
        assert_eq!(request.tiles[0], TileSnapshot::default());
    }

    #[test]
    fn test_null_fields_mean_empty_tile() {
        let raw = r#"{"playerNum": null, "type": null}"#;
        let tile: TileSnapshot = serde_json::from_str(raw).unwrap();
        assert!(tile.player_num.is_none());
        assert!(tile.piece_type.is_none());
    }

    #[test]
    fn test_response_serializes_pass_as_null() {
        let json = serde_json::to_value(MoveResponse::new(None)).unwrap();
        assert_eq!(json["type"], "moveResult");
        assert!(json["move"].is_null());
    }

    #[test]
    fn test_response_uses_camel_case_coordinates() {
        let coords = MoveCoords { start_y: 1, start_x: 2, end_y: 3, end_x: 4 };
        let json = serde_json::to_value(MoveResponse::new(Some(coords))).unwrap();
        assert_eq!(json["move"]["startY"], 1);
        assert_eq!(json["move"]["startX"], 2);
        assert_eq!(json["move"]["endY"], 3);
        assert_eq!(json["move"]["endX"], 4);
    }

    #[test]
    fn test_piece_type_names() {
        assert_eq!("castle".parse::<PieceType>(), Ok(PieceType::Castle));
        assert_eq!("horse".parse::<PieceType>(), Ok(PieceType::Horse));
        assert_eq!(
            "rook".parse::<PieceType>(),
            Err(EngineError::UnknownPieceType("rook".to_string()))
        );
    }

    #[test]
    fn test_direction_default_is_up() {
        assert_eq!(Direction::default(), Direction::Up);
        assert_eq!("left".parse::<Direction>(), Ok(Direction::Left));
        assert!("north".parse::<Direction>().is_err());
    }

    #[test]
    fn test_pawn_vectors_are_rotations_of_up() {
        // Left and right are perpendicular to forward; diagonals combine them
        for dir in Direction::all() {
            let v = dir.pawn_vectors();
            assert_eq!(v.left, (-v.right.0, -v.right.1));
            assert_eq!(v.diag_left, (v.forward.0 + v.left.0, v.forward.1 + v.left.1));
            assert_eq!(v.diag_right, (v.forward.0 + v.right.0, v.forward.1 + v.right.1));
        }
    }
}
