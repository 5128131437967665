//! StockScore CLI — scoring and diagnostics over CSV bar files.
//!
//! Commands:
//! - `score` — score one or more CSV files and print a ranked summary
//! - `stats` — print the volatility and event-counter bundle for one file
//! - `decline` — print the decline scan diagnostics for one file

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use stockscore_core::data::load_csv;
use stockscore_core::{
    compute_score_with, compute_stock_stats, detect_incremental_decline, ScoreResult, ScoreTables,
};

#[derive(Parser)]
#[command(
    name = "stockscore",
    about = "StockScore CLI — volatility and composite scoring over daily bars"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score one or more CSV bar files and print a ranked summary.
    Score {
        /// CSV files to score (header: date,open,high,low,close,volume,percent_change).
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// TOML file overriding the built-in score tables.
        #[arg(long)]
        tables: Option<PathBuf>,

        /// Emit one JSON object per file instead of the text summary.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print volatility readings and event counters for one file.
    Stats {
        /// CSV file to analyze.
        file: PathBuf,
    },
    /// Print the decline-with-volume scan diagnostics for one file.
    Decline {
        /// CSV file to analyze.
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Score { files, tables, json } => run_score(&files, tables.as_deref(), json),
        Commands::Stats { file } => run_stats(&file),
        Commands::Decline { file } => run_decline(&file),
    }
}

fn run_score(files: &[PathBuf], tables_path: Option<&Path>, json: bool) -> Result<()> {
    let tables = match tables_path {
        Some(path) => ScoreTables::from_file(path)
            .with_context(|| format!("loading score tables from {}", path.display()))?,
        None => ScoreTables::default(),
    };

    // One independent scoring call per file; order is restored by the rank
    // sort below.
    let outcomes: Vec<(&PathBuf, Result<ScoreResult>)> = files
        .par_iter()
        .map(|path| {
            let result = load_csv(path)
                .map(|bars| compute_score_with(&bars, &tables))
                .map_err(anyhow::Error::from);
            (path, result)
        })
        .collect();

    let mut scored: Vec<(&PathBuf, ScoreResult)> = Vec::new();
    let mut errors: Vec<(&PathBuf, anyhow::Error)> = Vec::new();
    for (path, outcome) in outcomes {
        match outcome {
            Ok(result) => scored.push((path, result)),
            Err(err) => errors.push((path, err)),
        }
    }

    scored.sort_by(|a, b| {
        b.1.score
            .partial_cmp(&a.1.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    if json {
        for (path, result) in &scored {
            let line = serde_json::json!({
                "file": path.display().to_string(),
                "result": result,
            });
            println!("{line}");
        }
    } else {
        print_ranking(&scored);
        if let Some((_, top)) = scored.first() {
            print_score_detail(top);
        }
    }

    if !errors.is_empty() {
        for (path, err) in &errors {
            eprintln!("Error for {}: {err}", path.display());
        }
        std::process::exit(1);
    }

    Ok(())
}

fn print_ranking(scored: &[(&PathBuf, ScoreResult)]) {
    if scored.is_empty() {
        return;
    }
    println!();
    println!("=== Ranking ===");
    println!("{:<4} {:<32} {:>8} {:>8}", "Rank", "File", "Score", "Extra");
    println!("{}", "-".repeat(56));
    for (rank, (path, result)) in scored.iter().enumerate() {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        println!(
            "{:<4} {:<32} {:>8.2} {:>8.2}",
            rank + 1,
            name,
            result.score,
            result.extra_score
        );
    }
}

fn print_score_detail(result: &ScoreResult) {
    println!();
    println!("--- Top Components ---");
    let components = [
        &result.volatility,
        &result.long_bull,
        &result.volume_increase,
        &result.price_ratio,
        &result.incremental_decline,
        &result.locked_limit_down,
        &result.sideways_break_below_years,
        &result.consecutive_limit_up,
    ];
    for c in components {
        println!("{:<28} value {:>10.4}  score {:>8.2}", c.name, c.value, c.score);
    }
    if let Some(label) = result.decline.scenario {
        println!("Decline matched:             {label}");
    }
    println!();
}

fn run_stats(file: &Path) -> Result<()> {
    let bars = load_and_check(file)?;
    let stats = compute_stock_stats(&bars);

    println!();
    println!("=== Stats: {} ===", file.display());
    println!("Bars:              {}", bars.len());
    println!(
        "Period:            {} to {}",
        bars.first().map(|b| b.date.to_string()).unwrap_or_default(),
        bars.last().map(|b| b.date.to_string()).unwrap_or_default()
    );
    println!();
    println!("--- Volatility ---");
    println!("Dispersion:        {:.4}", stats.volatility.volatility);
    println!("Std / mean:        {:.4}", stats.volatility.std_over_mean);
    println!("Max fluctuation:   {:.4}", stats.volatility.max_fluct);
    println!("MA std:            {:.4}", stats.volatility.details.ma_std);
    println!("MA mean:           {:.2}", stats.volatility.details.ma_mean);
    println!("Price range:       {:.2} to {:.2}",
        stats.volatility.details.price_min, stats.volatility.details.price_max);
    println!("Difference (v2):   {:.4}", stats.volatility_v2);
    println!();
    println!("--- Trailing-year counters ---");
    println!("Long bull days:    {}", stats.long_bull_count);
    println!("Down limit days:   {}", stats.down_limit_count);
    println!("Locked limit down: {}", stats.locked_limit_down_count);
    println!();
    Ok(())
}

fn run_decline(file: &Path) -> Result<()> {
    let bars = load_and_check(file)?;
    let result = detect_incremental_decline(&bars);

    println!();
    println!("=== Decline scan: {} ===", file.display());
    if result.insufficient_data {
        println!("Insufficient history: {} bars.", bars.len());
        return Ok(());
    }

    println!(
        "{:<24} {:>10} {:>10} {:>9} {:>9} {:>7} {:>7} {:>7}",
        "Scenario", "Avg close", "Prior avg", "Avg vol", "Prior", "Drop", "Sharp", "Vol up"
    );
    println!("{}", "-".repeat(90));
    for s in &result.scenarios {
        println!(
            "{:<24} {:>10.2} {:>10.2} {:>9.0} {:>9.0} {:>7} {:>7} {:>7}",
            s.label,
            s.avg_close_recent,
            s.avg_close_compare,
            s.avg_vol_recent,
            s.avg_vol_compare,
            s.price_declined,
            s.sharp_increase,
            s.volume_increased
        );
    }
    println!();
    match result.scenario {
        Some(label) => println!("Matched: {label}"),
        None => println!("No decline-with-volume match."),
    }
    println!();
    Ok(())
}

fn load_and_check(file: &Path) -> Result<Vec<stockscore_core::DailyBar>> {
    if !file.exists() {
        bail!("file does not exist: {}", file.display());
    }
    load_csv(file).with_context(|| format!("loading {}", file.display()))
}
