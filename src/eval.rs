//! Positional scoring from one player's perspective
//!
//! A single pass over the occupied tiles builds five per-player aggregates:
//! material, mobility, protection of friendly pieces, attack surface on enemy
//! pieces, and direct danger to the player's own pieces. Each aggregate is then
//! folded into one scalar: the active player's value counts in full, every
//! opponent's value is subtracted after normalising by the opponent count and
//! weighting by the active player's hatred towards them.

use crate::board::{Board, MAX_PLAYERS};
use crate::config::ScoringConfig;
use crate::error::{EngineError, EngineResult};
use crate::movegen::{self, MoveFilter};

const PLAYERS: usize = MAX_PLAYERS as usize;

/// Player count and whose turn it is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerContext {
    num_players: u8,
    active_player: u8,
}

impl PlayerContext {
    /// # Errors
    /// `num_players` must be 2-6 and `active_player` within 1..=num_players.
    pub fn new(num_players: u8, active_player: u8) -> EngineResult<Self> {
        if !(2..=MAX_PLAYERS).contains(&num_players) {
            return Err(EngineError::InvalidPlayerCount(num_players));
        }
        if active_player == 0 || active_player > num_players {
            return Err(EngineError::InvalidActivePlayer {
                active: active_player,
                num_players,
            });
        }

        Ok(PlayerContext {
            num_players,
            active_player,
        })
    }

    pub fn num_players(&self) -> u8 {
        self.num_players
    }

    pub fn active_player(&self) -> u8 {
        self.active_player
    }

    fn opponents(&self) -> f64 {
        f64::from(self.num_players - 1)
    }
}

/// Per-player sums, indexed by `player - 1`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerAggregates {
    pub power: [f64; PLAYERS],
    pub mobility: [f64; PLAYERS],
    pub protection: [f64; PLAYERS],
    pub attack_surface: [f64; PLAYERS],
    pub direct_danger: [f64; PLAYERS],
}

impl PlayerAggregates {
    /// Aggregates in the order they are folded into the score
    fn in_fold_order(&self) -> [&[f64; PLAYERS]; 5] {
        [
            &self.power,
            &self.mobility,
            &self.attack_surface,
            &self.protection,
            &self.direct_danger,
        ]
    }
}

/// Aggregate index of a player number in 1..=6
fn owner_slot(owner: u8) -> Option<usize> {
    usize::from(owner).checked_sub(1).filter(|&slot| slot < PLAYERS)
}

/// Scores boards for one player; holds only read-only state
#[derive(Debug, Clone, Copy)]
pub struct PositionEvaluator<'a> {
    scoring: &'a ScoringConfig,
    context: PlayerContext,
}

impl<'a> PositionEvaluator<'a> {
    pub fn new(scoring: &'a ScoringConfig, context: PlayerContext) -> Self {
        PositionEvaluator { scoring, context }
    }

    pub fn context(&self) -> PlayerContext {
        self.context
    }

    /// Computes the five aggregates for every player
    pub fn aggregate(&self, board: &Board) -> PlayerAggregates {
        let power = &self.scoring.piece_power;
        let factors = &self.scoring.factors;
        let danger_factor = factors.direct_danger * self.context.opponents();

        let mut totals = PlayerAggregates::default();

        for (tile, piece) in board.pieces() {
            // Pieces without a valid owner only block
            let Some(slot) = owner_slot(piece.owner) else {
                continue;
            };
            totals.power[slot] += power.value(piece.kind);

            let reachable = movegen::legal_moves(board, tile, MoveFilter::IncludeAllReachable);
            totals.mobility[slot] += reachable.len() as f64 * factors.mobility;

            for target in reachable.iter().filter_map(|m| m.occupant) {
                let value = power.value(target.kind);
                if target.owner == piece.owner {
                    totals.protection[slot] += 1.0 / value * factors.protection;
                } else {
                    totals.attack_surface[slot] += value * factors.attack_surface;
                    if let Some(victim) = owner_slot(target.owner) {
                        totals.direct_danger[victim] -= value * danger_factor;
                    }
                }
            }
        }

        totals
    }

    /// Scalar score of `board`; higher is better for the active player
    pub fn score_board(&self, board: &Board) -> f64 {
        let totals = self.aggregate(board);
        totals
            .in_fold_order()
            .into_iter()
            .fold(0.0, |score, aggregate| self.change_score(score, aggregate))
    }

    /// Folds one aggregate into `score`
    fn change_score(&self, mut score: f64, aggregate: &[f64; PLAYERS]) -> f64 {
        let active = self.context.active_player;
        let hatred = &self.scoring.hatred;

        for player in 1..=self.context.num_players {
            let value = aggregate[usize::from(player) - 1];
            if player == active {
                score += value;
            } else {
                score -= value / self.context.opponents() * hatred.get(active, player);
            }
        }

        score
    }
}
