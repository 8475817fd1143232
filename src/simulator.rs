//! Make/evaluate/unmake on a private working board
//!
//! A candidate move is applied through an [`AppliedMove`] guard that holds
//! the undo record. Dropping the guard writes both touched tiles back, so the
//! working board is restored on every exit path, including an unwinding
//! evaluator.

use crate::board::{Board, Piece};
use crate::error::{EngineError, EngineResult};
use crate::eval::PositionEvaluator;

/// Exactly what a simulated move changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRecord {
    pub start: usize,
    pub end: usize,
    /// The moving piece as it stood before the move, times_moved included
    pub moved: Piece,
    /// Whatever stood on the end tile
    pub displaced: Option<Piece>,
}

/// A move that is live on the board until dropped
struct AppliedMove<'b> {
    board: &'b mut Board,
    record: MoveRecord,
}

impl<'b> AppliedMove<'b> {
    fn apply(board: &'b mut Board, start: usize, end: usize) -> EngineResult<Self> {
        let len = board.tile_count();
        if let Some(&index) = [start, end].iter().find(|&&idx| idx >= len) {
            return Err(EngineError::TileIndexOutOfBounds { index, len });
        }

        let moved = board
            .tile(start)
            .and_then(|tile| tile.occupant)
            .ok_or(EngineError::EmptyStartTile { index: start })?;
        let displaced = board.tile(end).and_then(|tile| tile.occupant);

        let mut travelling = moved;
        travelling.times_moved = travelling.times_moved.saturating_add(1);

        board.set_occupant(end, Some(travelling));
        board.set_occupant(start, None);

        Ok(AppliedMove {
            board,
            record: MoveRecord {
                start,
                end,
                moved,
                displaced,
            },
        })
    }

    fn board(&self) -> &Board {
        self.board
    }
}

impl Drop for AppliedMove<'_> {
    fn drop(&mut self) {
        let MoveRecord {
            start,
            end,
            moved,
            displaced,
        } = self.record;
        self.board.set_occupant(end, displaced);
        self.board.set_occupant(start, Some(moved));
    }
}

/// Scores candidate moves against its own copy of the board
#[derive(Debug, Clone)]
pub struct MoveSimulator<'a> {
    board: Board,
    evaluator: PositionEvaluator<'a>,
}

impl<'a> MoveSimulator<'a> {
    pub fn new(board: Board, evaluator: PositionEvaluator<'a>) -> Self {
        MoveSimulator { board, evaluator }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn into_board(self) -> Board {
        self.board
    }

    /// Scores the board as it would stand after moving `start` to `end`
    ///
    /// The working board is unchanged when this returns, whether it returns a
    /// score or an error.
    ///
    /// # Errors
    /// Both indices must be on the board and `start` must hold a piece; either
    /// failure is an engine defect.
    pub fn score_move(&mut self, start: usize, end: usize) -> EngineResult<f64> {
        let applied = AppliedMove::apply(&mut self.board, start, end)?;
        Ok(self.evaluator.score_board(applied.board()))
    }
}
