// Simple Calendar
// Headless host: lays out an event snapshot and prints the month grid

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use simple_calendar::services::refresh::RefreshSchedule;
use simple_calendar::services::render::{LayoutRenderer, TextRenderer};
use simple_calendar::services::settings::{default_config_path, load_config};
use simple_calendar::{CalendarConfig, CalendarEngine, EventRecord};

/// Lay out a calendar event snapshot on a six-week grid.
#[derive(Parser, Debug)]
#[command(name = "simple-calendar", version, about)]
struct Args {
    /// TOML config file (defaults to the platform config dir)
    #[arg(long = "config", value_name = "PATH")]
    config_path: Option<PathBuf>,

    /// Keep running and re-read the events every refresh interval
    #[arg(long)]
    watch: bool,

    /// Also list days without events
    #[arg(long = "all-days")]
    show_empty_days: bool,

    /// JSON array of event records
    #[arg(value_name = "EVENTS.json")]
    events_path: PathBuf,
}

fn load_events(path: &Path) -> Result<Vec<EventRecord>> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read events from {}", path.display()))?;
    serde_json::from_str(&data)
        .with_context(|| format!("failed to parse events from {}", path.display()))
}

fn resolve_config(path: Option<&Path>) -> Result<CalendarConfig> {
    match path.map(Path::to_path_buf).or_else(default_config_path) {
        Some(path) => load_config(&path),
        None => Ok(CalendarConfig::default()),
    }
}

fn reload_and_print(engine: &mut CalendarEngine, args: &Args) -> Result<()> {
    let events = load_events(&args.events_path)?;
    let report = engine.replace_event_pool(&events)?;
    for rejected in &report.rejected {
        eprintln!("skipped event #{} \"{}\": {}", rejected.index, rejected.title, rejected.error);
    }

    let mut renderer = TextRenderer {
        show_empty_days: args.show_empty_days,
    };
    print!("{}", renderer.render(engine.layout()));
    Ok(())
}

/// One periodic cycle: pick up today's date, then the latest snapshot.
fn refresh_cycle(engine: &mut CalendarEngine, args: &Args) -> Result<()> {
    engine.refresh()?;
    reload_and_print(engine, args)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let args = Args::parse();
    let config = resolve_config(args.config_path.as_deref())?;
    let mut schedule = RefreshSchedule::from_millis(config.refresh_interval_ms);
    let mut engine = CalendarEngine::new(config)?;

    log::info!("Starting Simple Calendar");
    reload_and_print(&mut engine, &args)?;
    schedule.mark_ran(Instant::now());

    if !args.watch {
        return Ok(());
    }

    loop {
        let wait = schedule.next_due_in(Instant::now());
        tokio::select! {
            _ = tokio::time::sleep(wait) => {
                if !schedule.tick(Instant::now()) {
                    continue;
                }
                if let Err(err) = refresh_cycle(&mut engine, &args) {
                    // Keep the last good layout and try again next cycle.
                    log::error!("Refresh failed: {:#}", err);
                    continue;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                log::info!("Shutting down");
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_args_parse_flags_and_events_path() {
        let args = Args::try_parse_from([
            "simple-calendar",
            "--config",
            "cal.toml",
            "--watch",
            "--all-days",
            "events.json",
        ])
        .unwrap();
        assert_eq!(args.config_path, Some(PathBuf::from("cal.toml")));
        assert!(args.watch);
        assert!(args.show_empty_days);
        assert_eq!(args.events_path, PathBuf::from("events.json"));
    }

    #[test]
    fn test_args_require_events_path() {
        assert!(Args::try_parse_from(["simple-calendar", "--watch"]).is_err());
        assert!(Args::try_parse_from(["simple-calendar", "--bogus", "events.json"]).is_err());
    }

    #[test]
    fn test_help_is_reported_not_exited() {
        let err = Args::try_parse_from(["simple-calendar", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_failed_refresh_cycle_is_recoverable() {
        let dir = TempDir::new().unwrap();
        let events_path = dir.path().join("events.json");
        let args = Args::try_parse_from(["simple-calendar", events_path.to_str().unwrap()]).unwrap();
        let mut engine = CalendarEngine::new(CalendarConfig::default()).unwrap();

        // Snapshot missing: the cycle reports the error instead of ending the host.
        assert!(refresh_cycle(&mut engine, &args).is_err());
        assert_eq!(engine.events().len(), 0);

        fs::write(
            &events_path,
            r##"[{"startDate": 1710460800000, "endDate": 1710547200000,
                  "title": "Trip", "fullDayEvent": true, "color": "#336699"}]"##,
        )
        .unwrap();
        refresh_cycle(&mut engine, &args).unwrap();
        assert_eq!(engine.events().len(), 1);
    }
}
