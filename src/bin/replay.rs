// Standalone replay tool for analyzing multiplayer chess AI debug logs
//
// Usage:
//   cargo run --bin replay -- <log_file> [options]
//
// Options:
//   --all                    Replay all entries
//   --entries <n1,n2>        Replay specific entries (1-based, comma-separated)
//   --verbose                Show detailed output for each entry
//   --config <path>          Path to Chess.toml (default: Chess.toml)

use std::env;
use std::process;

use multiplayer_chess_ai::config::Config;
use multiplayer_chess_ai::replay::ReplayEngine;

fn print_usage() {
    eprintln!("Multiplayer Chess AI Replay Tool");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("  replay <log_file> [OPTIONS]");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("  --all                   Replay all entries in the log");
    eprintln!("  --entries <N1,N2,...>   Replay specific entries (1-based, comma-separated)");
    eprintln!("  --verbose               Show detailed output for each entry");
    eprintln!("  --config <path>         Path to Chess.toml (default: Chess.toml)");
    eprintln!("  --help                  Show this help message");
    eprintln!();
    eprintln!("EXAMPLES:");
    eprintln!("  # Replay all entries");
    eprintln!("  replay chess_ai_debug.jsonl --all");
    eprintln!();
    eprintln!("  # Replay specific entries with per-entry output");
    eprintln!("  replay chess_ai_debug.jsonl --entries 5,10,15 --verbose");
}

fn parse_entries(s: &str) -> Result<Vec<usize>, String> {
    s.split(',')
        .map(|n| {
            n.trim()
                .parse::<usize>()
                .map_err(|e| format!("Invalid entry number '{}': {}", n, e))
        })
        .collect()
}

enum Mode {
    All,
    Entries(Vec<usize>),
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || args.iter().any(|a| a == "--help") {
        print_usage();
        process::exit(if args.iter().any(|a| a == "--help") { 0 } else { 1 });
    }

    let log_file = &args[1];
    let mut config_path = "Chess.toml".to_string();
    let mut verbose = false;
    let mut mode = None;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--all" => {
                mode = Some(Mode::All);
            }
            "--entries" => {
                let Some(value) = args.get(i + 1) else {
                    eprintln!("Error: --entries requires an argument");
                    process::exit(1);
                };
                match parse_entries(value) {
                    Ok(numbers) => mode = Some(Mode::Entries(numbers)),
                    Err(e) => {
                        eprintln!("Error parsing entries: {}", e);
                        process::exit(1);
                    }
                }
                i += 1;
            }
            "--config" => {
                let Some(value) = args.get(i + 1) else {
                    eprintln!("Error: --config requires an argument");
                    process::exit(1);
                };
                config_path = value.clone();
                i += 1;
            }
            "--verbose" => {
                verbose = true;
            }
            other => {
                eprintln!("Error: Unknown option '{}'", other);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    let Some(mode) = mode else {
        eprintln!("Error: Must specify --all or --entries");
        print_usage();
        process::exit(1);
    };

    let config = Config::from_file(&config_path).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from '{}': {}", config_path, e);
        eprintln!("Using default configuration");
        Config::default_hardcoded()
    });

    println!("Loaded configuration from: {}", config_path);
    println!("Replay log file: {}", log_file);
    println!();

    let engine = ReplayEngine::new(config, verbose);

    let entries = match engine.load_log_file(log_file) {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("Error loading log file: {}", e);
            process::exit(1);
        }
    };

    if entries.is_empty() {
        eprintln!("Error: Log file is empty");
        process::exit(1);
    }

    println!("Loaded {} log entries\n", entries.len());

    match mode {
        Mode::All => {
            println!("Replaying all {} entries...\n", entries.len());
            let results = engine.replay_all(&entries);
            engine.print_report(&results);
        }
        Mode::Entries(numbers) => {
            println!("Replaying {} specific entr(ies)...\n", numbers.len());
            match engine.replay_entries(&entries, &numbers) {
                Ok(results) => engine.print_report(&results),
                Err(e) => {
                    eprintln!("Error during replay: {}", e);
                    process::exit(1);
                }
            }
        }
    }
}
