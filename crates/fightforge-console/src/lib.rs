//! Colorful console output for search runs.
//!
//! Provides a custom `tracing` layer that formats search events with colors.
//!
//! ## Log Levels
//!
//! - **INFO**: Lifecycle events (search start/end, cancellation)
//! - **DEBUG**: Progress percentages with speed, price lookups
//! - **TRACE**: Per-chunk detail (not rendered)

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();
static SEARCH_START_NANOS: AtomicU64 = AtomicU64::new(0);

/// Package version for banner display.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Filter used when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "fightforge_solver=info,fightforge_prices=warn";

/// Width of the progress bar in cells.
const BAR_WIDTH: usize = 30;

/// Initializes the console output.
///
/// Safe to call multiple times - only the first call has effect.
/// Prints the banner and sets up tracing.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(SearchConsoleLayer)
            .try_init();
    });
}

// Marks the start of a search for elapsed time tracking.
fn mark_search_start() {
    let epoch = EPOCH.get_or_init(Instant::now);
    let nanos = epoch.elapsed().as_nanos() as u64;
    SEARCH_START_NANOS.store(nanos, Ordering::Relaxed);
}

// Returns elapsed time since search start.
fn elapsed_secs() -> f64 {
    let Some(epoch) = EPOCH.get() else {
        return 0.0;
    };
    let start_nanos = SEARCH_START_NANOS.load(Ordering::Relaxed);
    let now_nanos = epoch.elapsed().as_nanos() as u64;
    now_nanos.saturating_sub(start_nanos) as f64 / 1_000_000_000.0
}

fn print_banner() {
    let banner = r#"
 _____ _       _     _   _____
|  ___(_) __ _| |__ | |_|  ___|__  _ __ __ _  ___
| |_  | |/ _` | '_ \| __| |_ / _ \| '__/ _` |/ _ \
|  _| | | (_| | | | | |_|  _| (_) | | | (_| |  __/
|_|   |_|\__, |_| |_|\__|_|  \___/|_|  \__, |\___|
         |___/                         |___/
"#;

    let version_line = format!("               v{} - Exhaustive Build Search\n", VERSION);

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", banner.bright_red());
    let _ = writeln!(stdout, "{}", version_line.bright_white().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats search events with colors.
pub struct SearchConsoleLayer;

impl<S: Subscriber> Layer<S> for SearchConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let target = event.metadata().target();

        if !target.starts_with("fightforge_solver")
            && !target.starts_with("fightforge_prices")
            && !target.starts_with("fightforge::")
        {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    combinations: Option<u64>,
    budget: Option<u64>,
    tolerance: Option<u64>,
    chunk_size: Option<u64>,
    passes: Option<u64>,
    cost_aware: Option<bool>,
    percent: Option<u64>,
    processed: Option<u64>,
    retained: Option<u64>,
    speed: Option<u64>,
    results: Option<u64>,
    duration_ms: Option<u64>,
    items: Option<u64>,
    error: Option<String>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        match field.name() {
            "event" => self.event = Some(s.trim_matches('"').to_string()),
            "error" => self.error = Some(s.trim_matches('"').to_string()),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "combinations" => self.combinations = Some(value),
            "budget" => self.budget = Some(value),
            "tolerance" => self.tolerance = Some(value),
            "chunk_size" => self.chunk_size = Some(value),
            "passes" => self.passes = Some(value),
            "percent" => self.percent = Some(value),
            "processed" => self.processed = Some(value),
            "retained" => self.retained = Some(value),
            "speed" => self.speed = Some(value),
            "results" => self.results = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            "items" => self.items = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        if field.name() == "cost_aware" {
            self.cost_aware = Some(value);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "error" => self.error = Some(value.to_string()),
            _ => {}
        }
    }
}

fn format_event(v: &EventVisitor) -> String {
    match v.event.as_deref().unwrap_or("") {
        "search_start" => format_search_start(v),
        "progress" => format_progress(v),
        "search_end" => format_search_end(v),
        "search_cancelled" => format_search_cancelled(v),
        "price_fetch" => format_price_fetch(v),
        "price_fetch_failed" => format_price_fetch_failed(v),
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs())
        .bright_black()
        .to_string()
}

fn format_search_start(v: &EventVisitor) -> String {
    mark_search_start();
    let combinations = v.combinations.unwrap_or(0);
    let budget = v.budget.unwrap_or(0);
    let chunk_size = v.chunk_size.unwrap_or(0);

    let mut output = format!(
        "{} {} Searching │ {} builds │ budget {} │ chunks of {}",
        format_elapsed(),
        "▶".bright_green().bold(),
        combinations.to_formatted_string(&Locale::en).bright_yellow(),
        budget.to_formatted_string(&Locale::en).bright_yellow(),
        chunk_size.to_formatted_string(&Locale::en).bright_yellow(),
    );

    if let Some(tolerance) = v.tolerance.filter(|&t| t > 0) {
        output.push_str(&format!(
            " │ tolerance {}",
            tolerance.to_formatted_string(&Locale::en).bright_yellow()
        ));
    }

    if let Some(passes) = v.passes.filter(|&p| p > 1) {
        output.push_str(&format!(" │ {} passes", passes.bright_yellow()));
    }

    if v.cost_aware == Some(true) {
        output.push_str(&format!(" │ {}", "cost-aware".bright_magenta()));
    }

    output
}

fn format_progress(v: &EventVisitor) -> String {
    let percent = v.percent.unwrap_or(0).min(100);
    let retained = v.retained.unwrap_or(0);
    let speed = v.speed.unwrap_or(0);

    format!(
        "{} {} {} {:>3}% │ {:>12} kept │ {:>12}/s",
        format_elapsed(),
        "⚡".bright_cyan(),
        progress_bar(percent as usize).cyan(),
        percent,
        retained.to_formatted_string(&Locale::en).white(),
        speed
            .to_formatted_string(&Locale::en)
            .bright_magenta()
            .bold(),
    )
}

fn format_search_end(v: &EventVisitor) -> String {
    let retained = v.retained.unwrap_or(0);
    let results = v.results.unwrap_or(0);
    let duration = v.duration_ms.unwrap_or(0);

    let status = if results > 0 {
        format!("{} builds selected", results).bright_green().bold().to_string()
    } else {
        "no build fits the budget".bright_yellow().bold().to_string()
    };

    format!(
        "{} {} Search complete │ {} │ {} within budget │ {}",
        format_elapsed(),
        "■".bright_cyan().bold(),
        format_duration_ms(duration).yellow(),
        retained.to_formatted_string(&Locale::en).white(),
        status
    )
}

fn format_search_cancelled(v: &EventVisitor) -> String {
    let processed = v.processed.unwrap_or(0);

    format!(
        "{} {} Search cancelled after {} builds",
        format_elapsed(),
        "✗".bright_red().bold(),
        processed.to_formatted_string(&Locale::en).white()
    )
}

fn format_price_fetch(v: &EventVisitor) -> String {
    format!(
        "{} {} Prices loaded │ {} items",
        format_elapsed(),
        "$".bright_green(),
        v.items.unwrap_or(0).to_formatted_string(&Locale::en).white()
    )
}

fn format_price_fetch_failed(v: &EventVisitor) -> String {
    format!(
        "{} {} Price lookup failed │ {}",
        format_elapsed(),
        "✗".bright_red().bold(),
        v.error.as_deref().unwrap_or("unknown error").bright_red()
    )
}

fn progress_bar(percent: usize) -> String {
    let filled = percent.min(100) * BAR_WIDTH / 100;
    format!("[{}{}]", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration_ms() {
        assert_eq!(format_duration_ms(250), "250ms");
        assert_eq!(format_duration_ms(1_500), "1.50s");
        assert_eq!(format_duration_ms(125_000), "2m 5s");
    }

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0), format!("[{}]", "░".repeat(BAR_WIDTH)));
        assert_eq!(progress_bar(100), format!("[{}]", "█".repeat(BAR_WIDTH)));
        assert_eq!(progress_bar(50).chars().filter(|&c| c == '█').count(), 15);
        assert_eq!(progress_bar(250), progress_bar(100));
    }

    #[test]
    fn test_unknown_events_are_silent() {
        let visitor = EventVisitor {
            event: Some("chunk".to_string()),
            ..EventVisitor::default()
        };
        assert!(format_event(&visitor).is_empty());
    }

    #[test]
    fn test_search_start_mentions_budget() {
        let visitor = EventVisitor {
            event: Some("search_start".to_string()),
            combinations: Some(214_358_881),
            budget: Some(55),
            chunk_size: Some(50_000),
            passes: Some(2),
            cost_aware: Some(true),
            ..EventVisitor::default()
        };
        let output = format_event(&visitor);
        assert!(output.contains("214,358,881"));
        assert!(output.contains("55"));
        assert!(output.contains("passes"));
        assert!(output.contains("cost-aware"));
        assert!(!output.contains("tolerance"));
    }

    #[test]
    fn test_search_end_without_results() {
        let visitor = EventVisitor {
            event: Some("search_end".to_string()),
            results: Some(0),
            ..EventVisitor::default()
        };
        assert!(format_event(&visitor).contains("no build fits the budget"));
    }

    #[test]
    fn test_init_is_idempotent() {
        init();
        init();
    }
}
