//! Greedy one-ply search
//!
//! Every legal move of the active player is simulated and scored; the highest
//! score wins. Tiles are visited in row-major order and moves in generation
//! order, and only a strictly greater score replaces the current best, so the
//! first of several equal moves is chosen.

use log::debug;

use crate::board::Board;
use crate::config::ScoringConfig;
use crate::error::EngineResult;
use crate::eval::{PlayerContext, PositionEvaluator};
use crate::movegen::{self, MoveFilter};
use crate::simulator::MoveSimulator;
use crate::types::MoveCoords;

/// A candidate move and the score of the position it leads to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredMove {
    pub coords: MoveCoords,
    pub score: f64,
}

pub struct SearchEngine<'a> {
    evaluator: PositionEvaluator<'a>,
}

impl<'a> SearchEngine<'a> {
    pub fn new(scoring: &'a ScoringConfig, context: PlayerContext) -> Self {
        SearchEngine {
            evaluator: PositionEvaluator::new(scoring, context),
        }
    }

    /// Scores every legal move of the active player, in enumeration order
    ///
    /// `board` itself is never touched; moves are simulated on a copy.
    pub fn evaluate_all_moves(&self, board: &Board) -> EngineResult<Vec<ScoredMove>> {
        let active = self.evaluator.context().active_player();
        let mut simulator = MoveSimulator::new(board.clone(), self.evaluator);
        let mut scored = Vec::new();

        for (start, tile) in board.tiles().iter().enumerate() {
            if tile.owner() != Some(active) {
                continue;
            }

            for target in movegen::legal_moves(board, tile, MoveFilter::FilterOwnPieces(active)) {
                let end = target.y * board.width() + target.x;
                let score = simulator.score_move(start, end)?;
                scored.push(ScoredMove {
                    coords: MoveCoords {
                        start_y: tile.y,
                        start_x: tile.x,
                        end_y: target.y,
                        end_x: target.x,
                    },
                    score,
                });
            }
        }

        debug_assert_eq!(simulator.board(), board, "simulation left the board modified");
        debug!(
            "Player {}: scored {} candidate moves",
            active,
            scored.len()
        );

        Ok(scored)
    }

    /// Best move for the active player, or `None` when it has no legal move
    pub fn find_max_score_move(&self, board: &Board) -> EngineResult<Option<ScoredMove>> {
        let candidates = self.evaluate_all_moves(board)?;
        Ok(select_best(&candidates))
    }
}

/// First candidate with the strictly highest score
pub fn select_best(candidates: &[ScoredMove]) -> Option<ScoredMove> {
    let mut best_score = f64::NEG_INFINITY;
    let mut best = None;

    for candidate in candidates {
        if candidate.score > best_score {
            best_score = candidate.score;
            best = Some(*candidate);
        }
    }

    best
}
