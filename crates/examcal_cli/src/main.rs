//! Terminal runner for the exam reminder flow.
//!
//! # Responsibility
//! - Load a schedule, print the calendar and map projections, replay day
//!   selections and wait for the resulting reminders to fire.
//! - Verify `examcal_core` wiring without the Flutter shell.

mod notifier;

use clap::Parser;
use examcal_core::{
    core_version, default_log_level, init_logging, DelayStrategy, ExamSession,
    FixedScheduleProvider, JsonScheduleProvider, SessionConfig,
};
use log::warn;
use notifier::TimerNotificationService;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "examcal", version, about = "Exam schedule reminder runner")]
struct Args {
    /// Day to select, `YYYY-MM-DD`; repeat to replay several taps.
    #[arg(long = "select", value_name = "DATE")]
    select: Vec<String>,

    /// JSON file with `[{"date": ..., "subject": ...}]`; defaults to the built-in schedule.
    #[arg(long)]
    exams: Option<PathBuf>,

    /// Session config JSON file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the reminder delay with a fixed number of seconds.
    #[arg(long)]
    delay_seconds: Option<u64>,

    /// Cancel a pending reminder when its day is selected again.
    #[arg(long)]
    replace_existing: bool,

    /// Seed for reproducible marker placement.
    #[arg(long)]
    seed: Option<u64>,

    /// trace|debug|info|warn|error
    #[arg(long)]
    log_level: Option<String>,

    /// Absolute log directory; defaults to `<tmp>/examcal-logs`.
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("examcal: {message}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), String> {
    let log_dir = args
        .log_dir
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join("examcal-logs"));
    let level = args.log_level.as_deref().unwrap_or(default_log_level());
    init_logging(level, &log_dir.to_string_lossy()).map_err(|err| err.to_string())?;

    let config = load_config(&args)?;
    let notifier = TimerNotificationService::new(tokio::runtime::Handle::current());
    let mut session = match &args.exams {
        Some(path) => {
            let document = read_file(path)?;
            ExamSession::start(&JsonScheduleProvider::new(document), notifier, &config)
        }
        None => ExamSession::start(&FixedScheduleProvider::builtin(), notifier, &config),
    }
    .map_err(|err| err.to_string())?;

    println!("examcal_core version={}", core_version());
    println!("Exam Schedule");
    for line in session.calendar().exam_lines {
        println!("  {line}");
    }
    for pin in session.map().pins {
        println!(
            "  {} ({:.4}, {:.4})",
            pin.label, pin.latitude, pin.longitude
        );
    }

    let mut handles = Vec::new();
    for value in &args.select {
        let handle = session.select_date_str(value).map_err(|err| err.to_string())?;
        let calendar = session.calendar();
        println!("{}", calendar.selected_caption);
        for exam in &calendar.exams_on_selected {
            println!("  exam: {}", exam.display_line());
        }
        match handle {
            Some(handle) => {
                println!("  reminder {} scheduled", handle.id());
                handles.push(handle);
            }
            None => println!("  no exam on this date"),
        }
    }

    for handle in handles {
        let id = handle.id();
        if let Err(err) = handle.outcome().await {
            warn!("event=reminder_outcome module=cli status=error reminder_id={id} error={err}");
            println!("  reminder {id}: {err}");
        }
    }
    Ok(())
}

fn load_config(args: &Args) -> Result<SessionConfig, String> {
    let mut config = match &args.config {
        Some(path) => SessionConfig::from_json(&read_file(path)?).map_err(|err| err.to_string())?,
        None => SessionConfig::default(),
    };
    if let Some(seconds) = args.delay_seconds {
        config.reminder.delay = DelayStrategy::Fixed { seconds };
    }
    if args.replace_existing {
        config.reminder.replace_existing = true;
    }
    if args.seed.is_some() {
        config.location_seed = args.seed;
    }
    Ok(config)
}

fn read_file(path: &Path) -> Result<String, String> {
    std::fs::read_to_string(path).map_err(|err| format!("cannot read `{}`: {err}", path.display()))
}
