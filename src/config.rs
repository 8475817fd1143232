// Configuration module for reading Chess.toml
// Scoring tables are loaded once and shared read-only by every request.

use log::warn;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::board::MAX_PLAYERS;
use crate::types::PieceType;

const PLAYERS: usize = MAX_PLAYERS as usize;

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    pub scoring: ScoringConfig,
    pub debug: DebugConfig,
}

/// Everything the position evaluator reads
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ScoringConfig {
    pub piece_power: PiecePower,
    pub factors: EvaluationFactors,
    pub hatred: HatredMatrix,
}

/// Material value of each piece type
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct PiecePower {
    pub king: f64,
    pub queen: f64,
    pub castle: f64,
    pub bishop: f64,
    pub horse: f64,
    pub pawn: f64,
}

impl PiecePower {
    pub fn value(&self, kind: PieceType) -> f64 {
        match kind {
            PieceType::King => self.king,
            PieceType::Queen => self.queen,
            PieceType::Castle => self.castle,
            PieceType::Bishop => self.bishop,
            PieceType::Horse => self.horse,
            PieceType::Pawn => self.pawn,
        }
    }
}

/// Per-unit weights of the positional aggregates
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct EvaluationFactors {
    /// Per reachable target
    pub mobility: f64,
    /// Per protected friendly piece, scaled by its inverse value
    pub protection: f64,
    /// Per attacked enemy piece, scaled by its value
    pub attack_surface: f64,
    /// Per attacker and opponent, scaled by the attacked piece's value
    pub direct_danger: f64,
}

/// How strongly each player weighs each opponent's strength
///
/// `matrix[player - 1][other - 1]`; not symmetric, diagonal unused.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct HatredMatrix {
    pub matrix: [[f64; PLAYERS]; PLAYERS],
}

impl HatredMatrix {
    /// Multiplier `player` applies to `other`'s aggregates
    pub fn get(&self, player: u8, other: u8) -> f64 {
        self.matrix[usize::from(player) - 1][usize::from(other) - 1]
    }
}

/// Debug configuration
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DebugConfig {
    pub enabled: bool,
    pub log_file_path: String,
}

impl Config {
    /// Loads configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the Chess.toml configuration file
    ///
    /// # Returns
    /// * `Result<Config, String>` - Parsed and validated configuration or error message
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        Self::from_toml_str(&contents)
    }

    /// Parses and validates configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self, String> {
        let config: Config =
            toml::from_str(contents).map_err(|e| format!("Failed to parse config file: {}", e))?;

        config.validate()?;
        Ok(config)
    }

    /// Loads default configuration from Chess.toml in the project root
    pub fn load_default() -> Result<Self, String> {
        Self::from_file("Chess.toml")
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the values in Chess.toml
    pub fn default_hardcoded() -> Self {
        Config {
            scoring: ScoringConfig {
                piece_power: PiecePower {
                    king: 200.0,
                    queen: 9.0,
                    castle: 5.0,
                    bishop: 4.5,
                    horse: 4.0,
                    pawn: 1.0,
                },
                factors: EvaluationFactors {
                    mobility: 0.01,
                    protection: 0.01,
                    attack_surface: 0.01,
                    direct_danger: 0.01,
                },
                hatred: HatredMatrix {
                    matrix: [
                        [1.0, 1.1, 1.0, 1.0, 1.0, 1.0],
                        [1.1, 1.0, 1.1, 1.1, 0.9, 0.9],
                        [1.0, 1.0, 1.0, 1.0, 1.0, 1.0],
                        [0.9, 1.0, 1.1, 1.0, 1.1, 0.9],
                        [0.9, 1.0, 1.1, 1.1, 1.0, 0.9],
                        [0.9, 0.9, 1.0, 1.1, 1.1, 1.0],
                    ],
                },
            },
            debug: DebugConfig {
                enabled: false,
                log_file_path: "chess_ai_debug.jsonl".to_string(),
            },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            warn!("Could not load Chess.toml ({}), using hardcoded defaults", e);
            Self::default_hardcoded()
        })
    }

    /// Rejects values the evaluator cannot work with
    pub fn validate(&self) -> Result<(), String> {
        let power = &self.scoring.piece_power;
        for kind in PieceType::all() {
            let value = power.value(kind);
            if !value.is_finite() || value <= 0.0 {
                return Err(format!(
                    "piece_power.{} must be a positive number, got {}",
                    kind.as_str(),
                    value
                ));
            }
        }

        let factors = &self.scoring.factors;
        let named = [
            ("mobility", factors.mobility),
            ("protection", factors.protection),
            ("attack_surface", factors.attack_surface),
            ("direct_danger", factors.direct_danger),
        ];
        if let Some((name, value)) = named.iter().find(|(_, v)| !v.is_finite()) {
            return Err(format!("factors.{} must be finite, got {}", name, value));
        }

        if self
            .scoring
            .hatred
            .matrix
            .iter()
            .flatten()
            .any(|v| !v.is_finite())
        {
            return Err("hatred.matrix entries must be finite".to_string());
        }

        Ok(())
    }
}
