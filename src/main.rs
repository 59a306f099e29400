use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::Parser;

mod config;
mod db;
mod models;
mod observability;
mod purge;

use crate::{
    config::{ConfigError, ReaperConfig},
    db::DbPool,
    purge::{PurgeCriteria, PurgeEngine, PurgeRunResult},
};

/// CLI arguments for the execution history reaper.
#[derive(Parser, Debug)]
#[command(
    version,
    about = "Purge workflow execution history older than a cutoff",
    long_about = "Deletes execution records (and their live-action records) that ended \
                  before the given UTC timestamp. You will lose data; run at your own risk."
)]
struct Args {
    /// Delete executions and live actions that ended before this UTC
    /// timestamp. Example: 2026-03-13T19:01:27Z
    #[arg(long, value_parser = parse_timestamp)]
    timestamp: DateTime<Utc>,

    /// Only purge executions for this action reference (default: all actions)
    #[arg(long)]
    action_ref: Option<String>,

    /// Path to config file (defaults to reaper.toml in the current
    /// directory if it exists)
    #[arg(short, long)]
    config: Option<String>,

    /// Select and report candidates without deleting anything
    #[arg(long)]
    dry_run: bool,
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("invalid RFC 3339 timestamp {:?}: {}", s, e))
}

/// Resolve the config: an explicit path must exist; otherwise reaper.toml
/// in the current directory is used if present, else defaults apply.
fn load_config(explicit_path: Option<&str>) -> Result<ReaperConfig, ConfigError> {
    if let Some(path) = explicit_path {
        return ReaperConfig::from_file(path);
    }

    let cwd_config = PathBuf::from("reaper.toml");
    if cwd_config.exists() {
        return ReaperConfig::from_file(cwd_config);
    }

    Ok(ReaperConfig::default())
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let config = match load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    observability::init_tracing(&config.logging);

    let db = match DbPool::connect(&config.database).await {
        Ok(db) => db,
        Err(e) => {
            tracing::error!(error = %e, "Failed to open database");
            std::process::exit(1);
        }
    };

    let criteria = PurgeCriteria {
        cutoff: args.timestamp,
        // An empty string means no filter, same as omitting the flag
        action_ref: args.action_ref.filter(|s| !s.is_empty()),
    };

    let engine = PurgeEngine::from_pool(&db);
    let outcome = if args.dry_run {
        engine.dry_run(&criteria).await
    } else {
        engine.run(&criteria).await
    };

    let exit_code = match outcome {
        Ok(result) => {
            report(&result, args.dry_run);
            0
        }
        Err(e) => {
            tracing::error!(error = %e, "Purge run failed");
            1
        }
    };

    db.close().await;

    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

/// Emit the end-of-run summary. The zombie count is the operator signal
/// that an out-of-band reconciliation pass may be needed.
fn report(result: &PurgeRunResult, dry_run: bool) {
    tracing::info!(
        candidates = result.candidates,
        executions_deleted = result.executions_deleted,
        live_actions_deleted = result.live_actions_deleted,
        live_actions_missing = result.live_actions_missing,
        zombies_left = result.zombies_left,
        dry_run = dry_run,
        "Purge run complete"
    );

    if result.zombies_left > 0 {
        tracing::warn!(
            zombies_left = result.zombies_left,
            "Zombie live actions remain; reconcile them out-of-band"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timestamp_accepts_rfc3339() {
        let parsed = parse_timestamp("2026-03-13T19:01:27Z").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2026-03-13T19:01:27+00:00");

        let with_offset = parse_timestamp("2026-03-13T19:01:27+02:00").unwrap();
        assert_eq!(with_offset.to_rfc3339(), "2026-03-13T17:01:27+00:00");
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert!(parse_timestamp("yesterday").is_err());
        assert!(parse_timestamp("2026-03-13").is_err());
        assert!(parse_timestamp("").is_err());
    }

    #[test]
    fn test_missing_timestamp_is_a_usage_error() {
        use clap::CommandFactory;

        let result = Args::command().try_get_matches_from(["reaper"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_args_parse_minimal() {
        let args = Args::try_parse_from(["reaper", "--timestamp", "2026-03-13T19:01:27Z"]).unwrap();
        assert!(args.action_ref.is_none());
        assert!(!args.dry_run);
    }
}
