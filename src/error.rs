//! Error types for move calculation
//!
//! Configuration errors describe a request that cannot be turned into a valid
//! board. Logic errors describe a bug in the engine itself and must never be
//! answered with a move.

use thiserror::Error;

/// Errors that can occur while handling a `calculateMove` request
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Request body could not be decoded
    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    /// Message type other than `calculateMove`
    #[error("Unsupported message type '{0}' (expected 'calculateMove')")]
    UnsupportedMessage(String),

    /// Width or height is zero, or the tile count overflows
    #[error("Invalid board dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    /// Tile sequence does not cover the board exactly
    #[error("Tile count mismatch: expected {expected}, got {actual}")]
    TileCountMismatch { expected: usize, actual: usize },

    /// Player count outside 2-6
    #[error("Invalid player count: {0} (must be 2-6)")]
    InvalidPlayerCount(u8),

    /// Active player outside 1..=num_players
    #[error("Invalid active player: {active} (must be 1-{num_players})")]
    InvalidActivePlayer { active: u8, num_players: u8 },

    /// Piece type name not in the piece table
    #[error("Unknown piece type '{0}'")]
    UnknownPieceType(String),

    /// Pawn direction name not one of up/down/left/right
    #[error("Unknown pawn direction '{0}'")]
    UnknownDirection(String),

    /// Piece owner outside 1-6
    #[error("Invalid owner {owner} on tile {index} (must be 1-6)")]
    InvalidOwner { index: usize, owner: u8 },

    /// Only one of playerNum/type given
    #[error("Incomplete tile {index}: playerNum and type must be given together")]
    IncompleteTile { index: usize },

    /// Simulator addressed a tile that does not exist
    #[error("Tile index {index} is outside the board ({len} tiles)")]
    TileIndexOutOfBounds { index: usize, len: usize },

    /// Simulator asked to move a piece from an empty tile
    #[error("No piece on start tile {index}")]
    EmptyStartTile { index: usize },
}

impl EngineError {
    /// True for engine defects, false for bad input
    pub fn is_logic_error(&self) -> bool {
        matches!(
            self,
            EngineError::TileIndexOutOfBounds { .. } | EngineError::EmptyStartTile { .. }
        )
    }
}

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
