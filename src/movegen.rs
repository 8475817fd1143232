//! Per-piece-type move generation
//!
//! Geometry, in (dy, dx) with y growing downwards:
//! - king: the eight neighbours
//! - horse: the eight knight leaps
//! - bishop / castle: diagonal / orthogonal rays of up to seven cells,
//!   stopping at the first occupied cell
//! - queen: both ray sets, diagonals first
//! - pawn: forward, left and right onto empty cells, a double forward step
//!   while unmoved, and diagonal-forward captures
//!
//! Every target is on the board. Ordering is stable and drives the search's
//! tie-breaking.

use crate::board::{Board, Piece, Tile};
use crate::types::PieceType;

const KING_STEPS: [(isize, isize); 8] = [
    (1, 0),
    (0, 1),
    (-1, 0),
    (0, -1),
    (1, 1),
    (-1, 1),
    (1, -1),
    (-1, -1),
];

const HORSE_LEAPS: [(isize, isize); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

const DIAGONAL_RAYS: [(isize, isize); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];

const ORTHOGONAL_RAYS: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Longest distance a sliding piece travels along one ray
pub const MAX_RAY_LENGTH: isize = 7;

/// Which occupied targets survive generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveFilter {
    /// Drop targets held by this player; used for real moves
    FilterOwnPieces(u8),
    /// Keep every reachable target, friendly ones included; used to measure
    /// mobility and protection
    IncludeAllReachable,
}

impl MoveFilter {
    fn excludes(&self, owner: u8) -> bool {
        matches!(self, MoveFilter::FilterOwnPieces(player) if *player == owner)
    }
}

/// A reachable cell and whatever stands on it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveTarget {
    pub y: usize,
    pub x: usize,
    pub occupant: Option<Piece>,
}

/// Enumerates the moves of the piece on `tile`; empty tiles have none
pub fn legal_moves(board: &Board, tile: &Tile, filter: MoveFilter) -> Vec<MoveTarget> {
    let Some(piece) = tile.occupant else {
        return Vec::new();
    };

    let origin = (tile.y as isize, tile.x as isize);
    let mut candidates = Vec::new();

    match piece.kind {
        PieceType::King => step_moves(origin, &KING_STEPS, &mut candidates),
        PieceType::Horse => step_moves(origin, &HORSE_LEAPS, &mut candidates),
        PieceType::Pawn => {
            pawn_moves(board, &piece, origin, filter, &mut candidates)
        }
        PieceType::Bishop => {
            slide_moves(board, origin, &DIAGONAL_RAYS, filter, &mut candidates)
        }
        PieceType::Castle => {
            slide_moves(board, origin, &ORTHOGONAL_RAYS, filter, &mut candidates)
        }
        PieceType::Queen => {
            slide_moves(board, origin, &DIAGONAL_RAYS, filter, &mut candidates);
            slide_moves(board, origin, &ORTHOGONAL_RAYS, filter, &mut candidates);
        }
    }

    candidates
        .into_iter()
        .filter_map(|(y, x)| {
            let target = board.get_tile(y, x)?;
            match target.owner() {
                Some(owner) if filter.excludes(owner) => None,
                _ => Some(MoveTarget {
                    y: target.y,
                    x: target.x,
                    occupant: target.occupant,
                }),
            }
        })
        .collect()
}

fn offset((y, x): (isize, isize), (dy, dx): (isize, isize)) -> (isize, isize) {
    (y + dy, x + dx)
}

fn step_moves(origin: (isize, isize), steps: &[(isize, isize)], out: &mut Vec<(isize, isize)>) {
    out.extend(steps.iter().map(|&step| offset(origin, step)));
}

fn pawn_moves(
    board: &Board,
    pawn: &Piece,
    origin: (isize, isize),
    filter: MoveFilter,
    out: &mut Vec<(isize, isize)>,
) {
    let vectors = pawn.direction.pawn_vectors();
    let forward = offset(origin, vectors.forward);

    let mut quiet = vec![
        forward,
        offset(origin, vectors.left),
        offset(origin, vectors.right),
    ];

    if pawn.times_moved == 0 && board.get_tile(forward.0, forward.1).is_some_and(Tile::is_empty) {
        quiet.push(offset(forward, vectors.forward));
    }

    // Quiet moves never capture
    out.extend(quiet.into_iter().filter(|&(y, x)| {
        board.get_tile(y, x).map_or(true, Tile::is_empty)
    }));

    for diagonal in [vectors.diag_left, vectors.diag_right] {
        let (y, x) = offset(origin, diagonal);
        let capturable = board
            .get_tile(y, x)
            .and_then(Tile::owner)
            .is_some_and(|owner| !filter.excludes(owner));
        if capturable {
            out.push((y, x));
        }
    }
}

fn slide_moves(
    board: &Board,
    (y, x): (isize, isize),
    rays: &[(isize, isize)],
    filter: MoveFilter,
    out: &mut Vec<(isize, isize)>,
) {
    for &(dy, dx) in rays {
        for distance in 1..=MAX_RAY_LENGTH {
            let cell = (y + distance * dy, x + distance * dx);
            let Some(target) = board.get_tile(cell.0, cell.1) else {
                break;
            };

            match target.owner() {
                Some(owner) => {
                    if !filter.excludes(owner) {
                        out.push(cell);
                    }
                    break;
                }
                None => out.push(cell),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Direction;

    fn board_with(width: usize, height: usize, pieces: &[(isize, isize, Piece)]) -> Board {
        let mut board = Board::empty(width, height).unwrap();
        for &(y, x, piece) in pieces {
            board.set_tile(y, x, Some(piece));
        }
        board
    }

    fn cells(moves: &[MoveTarget]) -> Vec<(usize, usize)> {
        moves.iter().map(|m| (m.y, m.x)).collect()
    }

    fn moves_at(board: &Board, y: isize, x: isize, filter: MoveFilter) -> Vec<(usize, usize)> {
        cells(&legal_moves(board, board.get_tile(y, x).unwrap(), filter))
    }

    #[test]
    fn test_empty_tile_has_no_moves() {
        let board = Board::empty(3, 3).unwrap();
        assert!(moves_at(&board, 1, 1, MoveFilter::IncludeAllReachable).is_empty());
    }

    #[test]
    fn test_king_order_and_bounds() {
        let board = board_with(8, 8, &[(0, 0, Piece::new(PieceType::King, 1))]);
        assert_eq!(
            moves_at(&board, 0, 0, MoveFilter::FilterOwnPieces(1)),
            vec![(1, 0), (0, 1), (1, 1)]
        );

        let board = board_with(8, 8, &[(4, 4, Piece::new(PieceType::King, 1))]);
        assert_eq!(
            moves_at(&board, 4, 4, MoveFilter::FilterOwnPieces(1)),
            vec![(5, 4), (4, 5), (3, 4), (4, 3), (5, 5), (3, 5), (5, 3), (3, 3)]
        );
    }

    #[test]
    fn test_horse_leaps_over_pieces() {
        let mut pieces = vec![(4, 4, Piece::new(PieceType::Horse, 1))];
        for &(dy, dx) in &KING_STEPS {
            pieces.push((4 + dy, 4 + dx, Piece::new(PieceType::Pawn, 1)));
        }
        let board = board_with(8, 8, &pieces);
        assert_eq!(
            moves_at(&board, 4, 4, MoveFilter::FilterOwnPieces(1)),
            vec![(6, 5), (6, 3), (2, 5), (2, 3), (5, 6), (5, 2), (3, 6), (3, 2)]
        );
    }

    #[test]
    fn test_own_targets_filtered_only_for_owner() {
        let board = board_with(
            8,
            8,
            &[
                (4, 4, Piece::new(PieceType::King, 1)),
                (5, 4, Piece::new(PieceType::Pawn, 1)),
                (4, 5, Piece::new(PieceType::Pawn, 2)),
            ],
        );
        let filtered = moves_at(&board, 4, 4, MoveFilter::FilterOwnPieces(1));
        assert!(!filtered.contains(&(5, 4)));
        assert!(filtered.contains(&(4, 5)));

        let unfiltered = moves_at(&board, 4, 4, MoveFilter::IncludeAllReachable);
        assert_eq!(unfiltered.len(), 8);
        assert!(unfiltered.contains(&(5, 4)));
    }

    #[test]
    fn test_castle_ray_stops_at_blocker() {
        let board = board_with(
            8,
            8,
            &[
                (0, 0, Piece::new(PieceType::Castle, 1)),
                (3, 0, Piece::new(PieceType::Pawn, 2)),
                (0, 2, Piece::new(PieceType::Pawn, 1)),
            ],
        );
        assert_eq!(
            moves_at(&board, 0, 0, MoveFilter::FilterOwnPieces(1)),
            vec![(1, 0), (2, 0), (3, 0), (0, 1)]
        );
        assert_eq!(
            moves_at(&board, 0, 0, MoveFilter::IncludeAllReachable),
            vec![(1, 0), (2, 0), (3, 0), (0, 1), (0, 2)]
        );
    }

    #[test]
    fn test_ray_length_is_capped() {
        let board = board_with(10, 10, &[(0, 0, Piece::new(PieceType::Bishop, 1))]);
        let moves = moves_at(&board, 0, 0, MoveFilter::FilterOwnPieces(1));
        assert_eq!(moves, (1..=7usize).map(|i| (i, i)).collect::<Vec<_>>());
    }

    #[test]
    fn test_queen_diagonals_before_orthogonals() {
        let board = board_with(2, 2, &[(0, 0, Piece::new(PieceType::Queen, 1))]);
        assert_eq!(
            moves_at(&board, 0, 0, MoveFilter::FilterOwnPieces(1)),
            vec![(1, 1), (1, 0), (0, 1)]
        );
    }

    #[test]
    fn test_pawn_up_from_start() {
        let board = board_with(5, 5, &[(3, 2, Piece::new(PieceType::Pawn, 1))]);
        assert_eq!(
            moves_at(&board, 3, 2, MoveFilter::FilterOwnPieces(1)),
            vec![(2, 2), (3, 1), (3, 3), (1, 2)]
        );
    }

    #[test]
    fn test_pawn_double_step_needs_unmoved_and_clear_path() {
        let moved = Piece::new(PieceType::Pawn, 1).with_times_moved(1);
        let board = board_with(5, 5, &[(3, 2, moved)]);
        assert!(!moves_at(&board, 3, 2, MoveFilter::FilterOwnPieces(1)).contains(&(1, 2)));

        let board = board_with(
            5,
            5,
            &[
                (3, 2, Piece::new(PieceType::Pawn, 1)),
                (2, 2, Piece::new(PieceType::Horse, 2)),
            ],
        );
        let moves = moves_at(&board, 3, 2, MoveFilter::FilterOwnPieces(1));
        assert!(!moves.contains(&(2, 2)));
        assert!(!moves.contains(&(1, 2)));
    }

    #[test]
    fn test_pawn_double_step_landing_must_be_empty() {
        let board = board_with(
            5,
            5,
            &[
                (3, 2, Piece::new(PieceType::Pawn, 1)),
                (1, 2, Piece::new(PieceType::Horse, 2)),
            ],
        );
        assert_eq!(
            moves_at(&board, 3, 2, MoveFilter::FilterOwnPieces(1)),
            vec![(2, 2), (3, 1), (3, 3)]
        );
    }

    #[test]
    fn test_pawn_captures_only_diagonally() {
        let board = board_with(
            5,
            5,
            &[
                (2, 2, Piece::new(PieceType::Pawn, 1).with_times_moved(1)),
                (1, 1, Piece::new(PieceType::Queen, 2)),
                (1, 3, Piece::new(PieceType::Castle, 1)),
                (2, 3, Piece::new(PieceType::Horse, 2)),
            ],
        );
        assert_eq!(
            moves_at(&board, 2, 2, MoveFilter::FilterOwnPieces(1)),
            vec![(1, 2), (2, 1), (1, 1)]
        );
        // Friendly diagonal counts as reachable when measuring protection
        assert_eq!(
            moves_at(&board, 2, 2, MoveFilter::IncludeAllReachable),
            vec![(1, 2), (2, 1), (1, 1), (1, 3)]
        );
    }

    #[test]
    fn test_pawn_empty_diagonal_is_not_a_move() {
        let board = board_with(3, 3, &[(1, 1, Piece::new(PieceType::Pawn, 1).with_times_moved(1))]);
        let moves = moves_at(&board, 1, 1, MoveFilter::FilterOwnPieces(1));
        assert!(!moves.contains(&(0, 0)));
        assert!(!moves.contains(&(0, 2)));
    }

    #[test]
    fn test_pawn_directions() {
        let cases: [(Direction, Vec<(usize, usize)>); 3] = [
            (Direction::Down, vec![(3, 2), (2, 3), (2, 1), (4, 2)]),
            (Direction::Left, vec![(2, 1), (3, 2), (1, 2), (2, 0)]),
            (Direction::Right, vec![(2, 3), (1, 2), (3, 2), (2, 4)]),
        ];
        for (direction, expected) in cases {
            let pawn = Piece::new(PieceType::Pawn, 1).facing(direction);
            let board = board_with(5, 5, &[(2, 2, pawn)]);
            assert_eq!(
                moves_at(&board, 2, 2, MoveFilter::FilterOwnPieces(1)),
                expected,
                "pawn facing {}",
                direction.as_str()
            );
        }
    }

    #[test]
    fn test_pawn_right_diagonal_capture() {
        let pawn = Piece::new(PieceType::Pawn, 1)
            .facing(Direction::Right)
            .with_times_moved(3);
        let board = board_with(
            5,
            5,
            &[(2, 2, pawn), (3, 3, Piece::new(PieceType::Bishop, 4))],
        );
        assert_eq!(
            moves_at(&board, 2, 2, MoveFilter::FilterOwnPieces(1)),
            vec![(2, 3), (1, 2), (3, 2), (3, 3)]
        );
    }

    #[test]
    fn test_pawn_at_edge_stays_on_board() {
        let board = board_with(3, 3, &[(0, 0, Piece::new(PieceType::Pawn, 1))]);
        assert_eq!(
            moves_at(&board, 0, 0, MoveFilter::FilterOwnPieces(1)),
            vec![(0, 1)]
        );
    }
}
