// Board model: a flat row-major grid of tiles
//
// Index = y * width + x. Positions are fixed per tile; moving a piece only
// changes which tile holds it.

use serde::Serialize;

use crate::error::{EngineError, EngineResult};
use crate::types::{Direction, Level, PieceType, TileSnapshot};

/// Highest player number a piece may carry
pub const MAX_PLAYERS: u8 = 6;

/// A piece standing on a tile
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Piece {
    #[serde(rename = "type")]
    pub kind: PieceType,
    #[serde(rename = "playerNum")]
    pub owner: u8,
    /// Only meaningful for pawns
    pub direction: Direction,
    pub times_moved: u32,
}

impl Piece {
    /// Creates an unmoved piece facing up
    pub fn new(kind: PieceType, owner: u8) -> Self {
        Piece {
            kind,
            owner,
            direction: Direction::Up,
            times_moved: 0,
        }
    }

    pub fn facing(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_times_moved(mut self, times_moved: u32) -> Self {
        self.times_moved = times_moved;
        self
    }
}

/// One board cell
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    pub y: usize,
    pub x: usize,
    pub occupant: Option<Piece>,
}

impl Tile {
    pub fn is_empty(&self) -> bool {
        self.occupant.is_none()
    }

    pub fn owner(&self) -> Option<u8> {
        self.occupant.map(|piece| piece.owner)
    }
}

/// Rectangular board of `width * height` tiles
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
}

impl Board {
    /// Creates a board with every tile empty
    pub fn empty(width: usize, height: usize) -> EngineResult<Self> {
        let len = Self::checked_area(width, height)?;
        let tiles = (0..len)
            .map(|idx| Tile {
                y: idx / width,
                x: idx % width,
                occupant: None,
            })
            .collect();

        Ok(Board {
            width,
            height,
            tiles,
        })
    }

    /// Reconstructs a board from the inbound tile schema
    ///
    /// # Errors
    /// Any malformed dimension, tile count, owner, piece type or direction
    /// aborts the whole reconstruction.
    pub fn from_snapshot(level: &Level, snapshot: &[TileSnapshot]) -> EngineResult<Self> {
        let mut board = Self::empty(level.width, level.height)?;

        if snapshot.len() != board.tiles.len() {
            return Err(EngineError::TileCountMismatch {
                expected: board.tiles.len(),
                actual: snapshot.len(),
            });
        }

        for (index, (tile, data)) in board.tiles.iter_mut().zip(snapshot).enumerate() {
            tile.occupant = Self::decode_piece(index, data)?;
        }

        Ok(board)
    }

    fn decode_piece(index: usize, data: &TileSnapshot) -> EngineResult<Option<Piece>> {
        let (owner, kind) = match (data.player_num, data.piece_type.as_deref()) {
            (None, None) => return Ok(None),
            (Some(owner), Some(kind)) => (owner, kind),
            _ => return Err(EngineError::IncompleteTile { index }),
        };

        if owner == 0 || owner > MAX_PLAYERS {
            return Err(EngineError::InvalidOwner { index, owner });
        }

        let direction = match data.direction.as_deref() {
            Some(name) => name.parse()?,
            None => Direction::default(),
        };

        Ok(Some(Piece {
            kind: kind.parse()?,
            owner,
            direction,
            times_moved: data.times_moved.unwrap_or(0),
        }))
    }

    /// Serializes the board back into the inbound tile schema
    pub fn to_snapshot(&self) -> Vec<TileSnapshot> {
        self.tiles
            .iter()
            .map(|tile| match tile.occupant {
                Some(piece) => TileSnapshot {
                    player_num: Some(piece.owner),
                    piece_type: Some(piece.kind.as_str().to_string()),
                    direction: Some(piece.direction.as_str().to_string()),
                    times_moved: Some(piece.times_moved),
                },
                None => TileSnapshot::default(),
            })
            .collect()
    }

    fn checked_area(width: usize, height: usize) -> EngineResult<usize> {
        match width.checked_mul(height) {
            Some(len) if width > 0 && height > 0 => Ok(len),
            _ => Err(EngineError::InvalidDimensions { width, height }),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of tiles on the board
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn is_in_board(&self, y: isize, x: isize) -> bool {
        y >= 0 && x >= 0 && (y as usize) < self.height && (x as usize) < self.width
    }

    /// Row-major index of (y, x), or `None` off the board
    pub fn index_of(&self, y: isize, x: isize) -> Option<usize> {
        if self.is_in_board(y, x) {
            Some(y as usize * self.width + x as usize)
        } else {
            None
        }
    }

    pub fn get_tile(&self, y: isize, x: isize) -> Option<&Tile> {
        self.index_of(y, x).map(|idx| &self.tiles[idx])
    }

    /// Replaces the occupant at (y, x); off-board writes are ignored
    pub fn set_tile(&mut self, y: isize, x: isize, occupant: Option<Piece>) {
        if let Some(idx) = self.index_of(y, x) {
            self.tiles[idx].occupant = occupant;
        }
    }

    pub fn tile(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    /// Replaces the occupant at `index`; out-of-range writes are ignored
    pub fn set_occupant(&mut self, index: usize, occupant: Option<Piece>) {
        if let Some(tile) = self.tiles.get_mut(index) {
            tile.occupant = occupant;
        }
    }

    /// Iterates the occupied tiles in row-major order
    pub fn pieces(&self) -> impl Iterator<Item = (&Tile, Piece)> {
        self.tiles
            .iter()
            .filter_map(|tile| tile.occupant.map(|piece| (tile, piece)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(width: usize, height: usize) -> Level {
        Level {
            width,
            height,
            num_players: 2,
        }
    }

    fn piece_snapshot(owner: u8, kind: &str) -> TileSnapshot {
        TileSnapshot {
            player_num: Some(owner),
            piece_type: Some(kind.to_string()),
            ..TileSnapshot::default()
        }
    }

    #[test]
    fn test_index_is_row_major() {
        let board = Board::empty(3, 2).unwrap();
        assert_eq!(board.index_of(0, 0), Some(0));
        assert_eq!(board.index_of(0, 2), Some(2));
        assert_eq!(board.index_of(1, 0), Some(3));
        assert_eq!(board.index_of(1, 2), Some(5));

        for (idx, tile) in board.tiles().iter().enumerate() {
            assert_eq!(board.index_of(tile.y as isize, tile.x as isize), Some(idx));
        }
    }

    #[test]
    fn test_out_of_bounds_access() {
        let mut board = Board::empty(2, 2).unwrap();
        assert!(board.get_tile(-1, 0).is_none());
        assert!(board.get_tile(0, 2).is_none());
        assert!(board.get_tile(2, 0).is_none());

        let before = board.clone();
        board.set_tile(5, 5, Some(Piece::new(PieceType::King, 1)));
        board.set_tile(-1, 0, Some(Piece::new(PieceType::King, 1)));
        board.set_occupant(99, Some(Piece::new(PieceType::King, 1)));
        assert_eq!(board, before);
    }

    #[test]
    fn test_zero_dimension_rejected() {
        assert_eq!(
            Board::empty(0, 4),
            Err(EngineError::InvalidDimensions { width: 0, height: 4 })
        );
        assert!(Board::empty(usize::MAX, 2).is_err());
    }

    #[test]
    fn test_from_snapshot_applies_defaults() {
        let tiles = vec![piece_snapshot(2, "pawn"), TileSnapshot::default()];
        let board = Board::from_snapshot(&level(2, 1), &tiles).unwrap();

        let pawn = board.get_tile(0, 0).and_then(|t| t.occupant).unwrap();
        assert_eq!(pawn.kind, PieceType::Pawn);
        assert_eq!(pawn.owner, 2);
        assert_eq!(pawn.direction, Direction::Up);
        assert_eq!(pawn.times_moved, 0);
        assert!(board.get_tile(0, 1).unwrap().is_empty());
    }

    #[test]
    fn test_from_snapshot_rejects_wrong_tile_count() {
        let tiles = vec![TileSnapshot::default(); 3];
        assert_eq!(
            Board::from_snapshot(&level(2, 2), &tiles),
            Err(EngineError::TileCountMismatch { expected: 4, actual: 3 })
        );
    }

    #[test]
    fn test_from_snapshot_rejects_bad_tiles() {
        let unknown = vec![piece_snapshot(1, "dragon")];
        assert_eq!(
            Board::from_snapshot(&level(1, 1), &unknown),
            Err(EngineError::UnknownPieceType("dragon".to_string()))
        );

        let owner = vec![piece_snapshot(7, "king")];
        assert_eq!(
            Board::from_snapshot(&level(1, 1), &owner),
            Err(EngineError::InvalidOwner { index: 0, owner: 7 })
        );

        let half = vec![TileSnapshot {
            player_num: Some(1),
            ..TileSnapshot::default()
        }];
        assert_eq!(
            Board::from_snapshot(&level(1, 1), &half),
            Err(EngineError::IncompleteTile { index: 0 })
        );

        let mut facing = piece_snapshot(1, "pawn");
        facing.direction = Some("sideways".to_string());
        assert_eq!(
            Board::from_snapshot(&level(1, 1), &[facing]),
            Err(EngineError::UnknownDirection("sideways".to_string()))
        );
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut board = Board::empty(3, 3).unwrap();
        board.set_tile(
            1,
            1,
            Some(Piece::new(PieceType::Pawn, 3).facing(Direction::Left).with_times_moved(2)),
        );
        board.set_tile(2, 0, Some(Piece::new(PieceType::Queen, 1)));

        let rebuilt = Board::from_snapshot(&level(3, 3), &board.to_snapshot()).unwrap();
        assert_eq!(rebuilt, board);
    }
}
