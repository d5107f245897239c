//! Log replay tool
//!
//! Feeds a captured network log through the engine and prints the
//! notifications and derived state it produces. Replay time is
//! synthetic: each line advances a fixed step, which keeps runs
//! reproducible regardless of wall clock.

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use jobbars_core::{EventProcessor, JobsOptions, Lang, Notification, RawLine};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about = "Replay a network log through the job engine")]
struct Cli {
    /// Captured network log file (pipe-delimited lines).
    path: PathBuf,

    /// Client display language for chat-line patterns.
    #[arg(short, long, default_value = "en", value_parser = parse_lang)]
    lang: Lang,

    /// Milliseconds of synthetic time between lines.
    #[arg(long, default_value_t = 100)]
    step_ms: u64,
}

fn parse_lang(s: &str) -> Result<Lang, String> {
    match s {
        "en" => Ok(Lang::En),
        "de" => Ok(Lang::De),
        "fr" => Ok(Lang::Fr),
        "ja" => Ok(Lang::Ja),
        "cn" => Ok(Lang::Cn),
        "ko" => Ok(Lang::Ko),
        other => Err(format!("unknown language: {other}")),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let options = JobsOptions {
        parser_language: cli.lang,
        ..JobsOptions::default()
    };
    let mut processor = EventProcessor::new(options)?;

    let content = fs::read_to_string(&cli.path)?;
    let step = Duration::from_millis(cli.step_ms);
    let mut now = Instant::now();

    let mut lines = 0u64;
    for line in content.lines() {
        if line.is_empty() {
            continue;
        }
        let raw = RawLine::tokenize(line);
        if let Err(err) = processor.process_line(&raw, now) {
            warn!(%err, line = lines, "line rejected");
        }
        for notification in processor.tick(now) {
            match notification {
                Notification::GpAlarm => println!("[{lines}] GP alarm"),
                Notification::TimerExpired(name) => println!("[{lines}] {name} expired"),
            }
        }
        now += step;
        lines += 1;
    }

    info!(lines, "replay finished");
    println!(
        "pull countdown remaining: {:.1}s",
        processor.pull_countdown.remaining(now)
    );
    println!(
        "hp {}/{} mp {}/{}",
        processor.health_bar.value,
        processor.health_bar.max,
        processor.mana_bar.value,
        processor.mana_bar.max,
    );
    println!("active effects tracked: {}", processor.effects.len());

    Ok(())
}
