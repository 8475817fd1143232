// Move calculation service
//
// Owns the immutable configuration and turns one `calculateMove` request into
// one `moveResult` response. Every call reconstructs its own board, so a
// single Bot can serve any number of requests concurrently.

use log::info;
use serde_json::{json, Value};
use std::time::Instant;

use crate::board::Board;
use crate::config::Config;
use crate::error::{EngineError, EngineResult};
use crate::eval::PlayerContext;
use crate::search::{select_best, ScoredMove, SearchEngine};
use crate::types::{CalculateMoveRequest, MoveResponse, CALCULATE_MOVE};

/// Multiplayer chess AI with OOP-style API
/// Takes static configuration dependencies and exposes methods corresponding to API endpoints
#[derive(Debug, Clone)]
pub struct Bot {
    config: Config,
}

impl Bot {
    /// Creates a new Bot instance with the given configuration
    ///
    /// # Arguments
    /// * `config` - Static configuration that does not change during the bot's lifetime
    pub fn new(config: Config) -> Self {
        Bot { config }
    }


    /// Returns engine metadata
    /// Corresponds to GET / endpoint
    pub fn info(&self) -> Value {
        info!("INFO");

        json!({
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "accepts": CALCULATE_MOVE,
            "search_depth": 1,
            "max_players": crate::board::MAX_PLAYERS,
        })
    }

    /// Validates the request, rebuilds its board and scores every legal move
    /// of the active player in enumeration order
    pub fn evaluate_candidates(
        &self,
        request: &CalculateMoveRequest,
    ) -> EngineResult<(PlayerContext, Vec<ScoredMove>)> {
        if request.message_type != CALCULATE_MOVE {
            return Err(EngineError::UnsupportedMessage(request.message_type.clone()));
        }

        let context = PlayerContext::new(request.level.num_players, request.active_player)?;
        let board = Board::from_snapshot(&request.level, &request.tiles)?;

        info!(
            "Player {}: Computing move ({}x{} board, {} players)",
            context.active_player(),
            board.width(),
            board.height(),
            context.num_players()
        );

        let candidates = SearchEngine::new(&self.config.scoring, context).evaluate_all_moves(&board)?;
        Ok((context, candidates))
    }

    /// Finds the highest-scoring move for the request's active player
    ///
    /// # Returns
    /// * `Ok(None)` - The active player has no legal move and must pass
    /// * `Err(_)` - The request is malformed or the engine hit a defect
    pub fn find_best_move(&self, request: &CalculateMoveRequest) -> EngineResult<Option<ScoredMove>> {
        let start_time = Instant::now();

        let (context, candidates) = self.evaluate_candidates(request)?;
        let best = select_best(&candidates);

        match &best {
            Some(chosen) => info!(
                "Player {}: Chose {} (score: {:.4}, candidates: {}, time: {}ms)",
                context.active_player(),
                chosen.coords,
                chosen.score,
                candidates.len(),
                start_time.elapsed().as_millis()
            ),
            None => info!(
                "Player {}: No legal moves, passing (time: {}ms)",
                context.active_player(),
                start_time.elapsed().as_millis()
            ),
        }

        Ok(best)
    }

    /// Computes the response for a `calculateMove` request
    /// Corresponds to POST /move endpoint
    pub fn calculate_move(&self, request: &CalculateMoveRequest) -> EngineResult<MoveResponse> {
        let best = self.find_best_move(request)?;
        Ok(MoveResponse::new(best.map(|m| m.coords)))
    }

    /// Decodes a raw JSON message and computes its response
    pub fn handle_message(&self, raw: &str) -> EngineResult<MoveResponse> {
        let request: CalculateMoveRequest =
            serde_json::from_str(raw).map_err(|e| EngineError::MalformedRequest(e.to_string()))?;
        self.calculate_move(&request)
    }
}
