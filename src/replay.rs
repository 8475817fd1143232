// Replay module for analyzing logged requests and debugging decision-making
//
// This module provides functionality to:
// 1. Parse JSONL debug logs
// 2. Replay the engine on each logged request
// 3. Compare logged vs replayed moves
// 4. Report how decisive each choice was (best vs runner-up score)

use log::{info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use crate::bot::Bot;
use crate::config::Config;
use crate::search::select_best;
use crate::types::{CalculateMoveRequest, MoveCoords};

/// Represents a single log entry from the debug JSONL file
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LogEntry {
    pub request: CalculateMoveRequest,
    pub chosen_move: Option<MoveCoords>,
    pub timestamp: String,
}

/// Result of replaying a single entry
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayResult {
    /// 1-based line number in the log
    pub entry: usize,
    pub active_player: u8,
    pub original_move: Option<MoveCoords>,
    pub replayed_move: Option<MoveCoords>,
    pub matches: bool,
    pub replayed_score: Option<f64>,
    /// Best score minus the best score of any other candidate
    pub margin: Option<f64>,
    pub candidates: usize,
    pub computation_time_ms: u128,
}

/// Statistics for a complete replay session
#[derive(Debug, Default, PartialEq)]
pub struct ReplayStats {
    pub total_entries: usize,
    pub matches: usize,
    pub mismatches: usize,
    pub match_rate: f64,
}

/// Replay engine for analyzing debug logs
pub struct ReplayEngine {
    bot: Bot,
    verbose: bool,
}

impl ReplayEngine {
    /// Creates a new replay engine with the given configuration
    pub fn new(config: Config, verbose: bool) -> Self {
        ReplayEngine {
            bot: Bot::new(config),
            verbose,
        }
    }

    /// Loads all log entries from a JSONL file
    pub fn load_log_file<P: AsRef<Path>>(&self, log_path: P) -> Result<Vec<LogEntry>, String> {
        let file =
            File::open(log_path.as_ref()).map_err(|e| format!("Failed to open log file: {}", e))?;

        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| format!("Failed to read line {}: {}", line_num + 1, e))?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: LogEntry = serde_json::from_str(&line)
                .map_err(|e| format!("Failed to parse JSON on line {}: {}", line_num + 1, e))?;

            entries.push(entry);
        }

        info!("Loaded {} log entries", entries.len());
        Ok(entries)
    }

    /// Replays a single log entry and compares the result
    ///
    /// # Arguments
    /// * `entry_number` - 1-based position of the entry, used in reports
    pub fn replay_entry(&self, entry_number: usize, entry: &LogEntry) -> Result<ReplayResult, String> {
        let start_time = Instant::now();

        let (context, candidates) = self
            .bot
            .evaluate_candidates(&entry.request)
            .map_err(|e| format!("Entry {}: {}", entry_number, e))?;

        let best = select_best(&candidates);
        let runner_up = best.and_then(|chosen| {
            candidates
                .iter()
                .filter(|c| c.coords != chosen.coords)
                .map(|c| c.score)
                .fold(None, |acc: Option<f64>, s| Some(acc.map_or(s, |a| a.max(s))))
        });

        let replayed_move = best.map(|m| m.coords);
        let result = ReplayResult {
            entry: entry_number,
            active_player: context.active_player(),
            original_move: entry.chosen_move,
            replayed_move,
            matches: replayed_move == entry.chosen_move,
            replayed_score: best.map(|m| m.score),
            margin: best.zip(runner_up).map(|(b, r)| b.score - r),
            candidates: candidates.len(),
            computation_time_ms: start_time.elapsed().as_millis(),
        };

        if self.verbose {
            if result.matches {
                info!(
                    "Entry {}: ✓ MATCH - {} ({} candidates, time: {}ms)",
                    entry_number,
                    Self::describe(result.replayed_move),
                    result.candidates,
                    result.computation_time_ms
                );
            } else {
                warn!(
                    "Entry {}: ✗ MISMATCH - Original: {}, Replayed: {} ({} candidates, time: {}ms)",
                    entry_number,
                    Self::describe(result.original_move),
                    Self::describe(result.replayed_move),
                    result.candidates,
                    result.computation_time_ms
                );
            }
        }

        Ok(result)
    }

    /// Replays all entries in a log file
    ///
    /// Entries are independent requests, so they are replayed in parallel.
    /// Entries that fail to replay are reported and skipped.
    pub fn replay_all(&self, entries: &[LogEntry]) -> Vec<ReplayResult> {
        entries
            .par_iter()
            .enumerate()
            .filter_map(|(idx, entry)| match self.replay_entry(idx + 1, entry) {
                Ok(result) => Some(result),
                Err(e) => {
                    warn!("Failed to replay: {}", e);
                    None
                }
            })
            .collect()
    }

    /// Replays specific entries (1-based) from a log file
    pub fn replay_entries(
        &self,
        entries: &[LogEntry],
        entry_numbers: &[usize],
    ) -> Result<Vec<ReplayResult>, String> {
        let mut results = Vec::new();

        for &number in entry_numbers {
            let entry = number
                .checked_sub(1)
                .and_then(|idx| entries.get(idx))
                .ok_or_else(|| format!("Entry {} not found in log file", number))?;

            match self.replay_entry(number, entry) {
                Ok(result) => results.push(result),
                Err(e) => warn!("Failed to replay: {}", e),
            }
        }

        Ok(results)
    }

    /// Generates statistics from replay results
    pub fn generate_stats(&self, results: &[ReplayResult]) -> ReplayStats {
        let total_entries = results.len();
        let matches = results.iter().filter(|r| r.matches).count();
        let mismatches = total_entries - matches;
        let match_rate = if total_entries > 0 {
            (matches as f64 / total_entries as f64) * 100.0
        } else {
            0.0
        };

        ReplayStats {
            total_entries,
            matches,
            mismatches,
            match_rate,
        }
    }

    /// Prints a detailed report of replay results
    pub fn print_report(&self, results: &[ReplayResult]) {
        let stats = self.generate_stats(results);

        println!("\n═══════════════════════════════════════════════════════════");
        println!("                    REPLAY REPORT");
        println!("═══════════════════════════════════════════════════════════");
        println!("Total Entries:  {}", stats.total_entries);
        println!("Matches:        {} ({:.1}%)", stats.matches, stats.match_rate);
        println!("Mismatches:     {}", stats.mismatches);
        println!("═══════════════════════════════════════════════════════════\n");

        if !results.is_empty() {
            let count = results.len() as f64;
            let avg_time: f64 =
                results.iter().map(|r| r.computation_time_ms as f64).sum::<f64>() / count;
            let avg_candidates: f64 =
                results.iter().map(|r| r.candidates as f64).sum::<f64>() / count;

            println!("Average Candidates:         {:.1}", avg_candidates);
            println!("Average Computation Time:   {:.1}ms\n", avg_time);

            // Narrow margins are the decisions most sensitive to tuning
            let mut narrow: Vec<_> = results.iter().filter(|r| r.margin.is_some()).collect();
            narrow.sort_by(|a, b| a.margin.partial_cmp(&b.margin).unwrap_or(std::cmp::Ordering::Equal));
            if let Some(closest) = narrow.first() {
                println!(
                    "Closest Decision:           entry {} (margin: {:.4})\n",
                    closest.entry,
                    closest.margin.unwrap_or_default()
                );
            }
        }

        let mismatches: Vec<_> = results.iter().filter(|r| !r.matches).collect();
        if !mismatches.is_empty() {
            println!("═══════════════════════════════════════════════════════════");
            println!("                  DETAILED MISMATCHES");
            println!("═══════════════════════════════════════════════════════════");

            for result in mismatches {
                println!(
                    "Entry {} (player {}): {} → {} (score: {}, time: {}ms)",
                    result.entry,
                    result.active_player,
                    Self::describe(result.original_move),
                    Self::describe(result.replayed_move),
                    result
                        .replayed_score
                        .map_or_else(|| "-".to_string(), |s| format!("{:.4}", s)),
                    result.computation_time_ms
                );
            }
            println!();
        }
    }

    fn describe(chosen: Option<MoveCoords>) -> String {
        chosen.map_or_else(|| "pass".to_string(), |coords| coords.to_string())
    }
}
