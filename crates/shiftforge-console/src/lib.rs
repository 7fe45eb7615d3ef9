//! Colored console output for ShiftForge solves.
//!
//! Installs a `tracing` subscriber with an [`EnvFilter`] and a layer that
//! renders the model and solver events of the `shiftforge*` crates.

use std::io::{self, Write};
use std::sync::OnceLock;

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Filter applied when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "shiftforge=info";

static INIT: OnceLock<()> = OnceLock::new();

/// Initializes console logging.
///
/// Safe to call multiple times; only the first call has effect. A global
/// subscriber installed elsewhere is left in place.
pub fn init() {
    INIT.get_or_init(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(ShiftConsoleLayer)
            .try_init();
    });
}

/// A tracing layer that formats ShiftForge events with colors.
pub struct ShiftConsoleLayer;

impl<S: Subscriber> Layer<S> for ShiftConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !metadata.target().starts_with("shiftforge") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(*metadata.level(), &visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Debug, Default)]
struct EventVisitor {
    event: Option<String>,
    message: Option<String>,
    status: Option<String>,
    error: Option<String>,
    variables: Option<u64>,
    constraints: Option<u64>,
    employees: Option<u64>,
    days: Option<u64>,
    time_limit_ms: Option<u64>,
    nodes: Option<u64>,
    depth: Option<u64>,
    conflicts: Option<u64>,
    propagations: Option<u64>,
    duration_ms: Option<u64>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value).trim_matches('"').to_string();
        self.record_text(field, s);
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.record_text(field, value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "variables" => self.variables = Some(value),
            "constraints" => self.constraints = Some(value),
            "employees" => self.employees = Some(value),
            "days" => self.days = Some(value),
            "time_limit_ms" => self.time_limit_ms = Some(value),
            "nodes" => self.nodes = Some(value),
            "depth" => self.depth = Some(value),
            "conflicts" => self.conflicts = Some(value),
            "propagations" => self.propagations = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }
}

impl EventVisitor {
    fn record_text(&mut self, field: &Field, value: String) {
        match field.name() {
            "event" => self.event = Some(value),
            "message" => self.message = Some(value),
            "status" => self.status = Some(value),
            "error" => self.error = Some(value),
            _ => {}
        }
    }
}

fn format_event(level: Level, v: &EventVisitor) -> String {
    match v.event.as_deref() {
        Some("model_built") => format_model_built(v),
        Some("solve_start") => format_solve_start(v),
        Some("solve_end") => format_solve_end(v),
        Some("search_progress") => format_progress(v),
        _ if level <= Level::WARN => format_warning(v),
        _ => String::new(),
    }
}

fn format_model_built(v: &EventVisitor) -> String {
    format!(
        "{} {} {} employees ({}), days ({}), variables ({}), constraints ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Model]".bright_cyan(),
        count(v.employees).bright_yellow(),
        count(v.days).bright_yellow(),
        count(v.variables).bright_yellow(),
        count(v.constraints).bright_yellow(),
    )
}

fn format_solve_start(v: &EventVisitor) -> String {
    let limit = match v.time_limit_ms {
        Some(ms) if ms > 0 => format_duration_ms(ms),
        _ => "none".to_string(),
    };
    format!(
        "{} {} {} Solving started: variables ({}), constraints ({}), time limit ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Solver]".bright_cyan(),
        count(v.variables).bright_yellow(),
        count(v.constraints).bright_yellow(),
        limit.yellow(),
    )
}

fn format_solve_end(v: &EventVisitor) -> String {
    let status = v.status.as_deref().unwrap_or("UNKNOWN");
    format!(
        "{} {} {} Solving ended: status ({}), time spent ({}), nodes ({}), conflicts ({}), propagations ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Solver]".bright_cyan(),
        format_status(status),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
        count(v.nodes).white(),
        count(v.conflicts).white(),
        count(v.propagations).white(),
    )
}

fn format_progress(v: &EventVisitor) -> String {
    format!(
        "    {} Node {:>10} | depth {}",
        "->".bright_blue(),
        count(v.nodes).white(),
        count(v.depth).white(),
    )
}

fn format_warning(v: &EventVisitor) -> String {
    let text = v
        .error
        .as_deref()
        .or(v.message.as_deref())
        .or(v.event.as_deref())
        .unwrap_or("");
    format!(
        "{} {} {}",
        timestamp().bright_black(),
        "WARN".bright_red(),
        text
    )
}

fn format_status(status: &str) -> String {
    match status {
        "OPTIMAL" | "FEASIBLE" => status.bright_green().bold().to_string(),
        "INFEASIBLE" | "MODEL_INVALID" => status.bright_red().bold().to_string(),
        _ => status.yellow().to_string(),
    }
}

fn count(value: Option<u64>) -> String {
    value.unwrap_or(0).to_formatted_string(&Locale::en)
}

fn timestamp() -> String {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| {
            let secs = d.as_secs() % 100000;
            let millis = d.subsec_millis();
            format!("{:5}.{:03}", secs, millis)
        })
        .unwrap_or_else(|_| "    0.000".to_string())
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
    fn test_format_duration() {
        assert_eq!(format_duration_ms(250), "250ms");
        assert_eq!(format_duration_ms(1500), "1.50s");
        assert_eq!(format_duration_ms(125_000), "2m 5s");
    }

    #[test]
    fn test_count_uses_separators() {
        assert_eq!(count(Some(1_234_567)), "1,234,567");
        assert_eq!(count(None), "0");
    }

    #[test]
    fn test_unknown_info_event_is_silent() {
        let visitor = EventVisitor {
            event: Some("something_else".to_string()),
            ..EventVisitor::default()
        };
        assert!(format_event(Level::INFO, &visitor).is_empty());
    }

    #[test]
    fn test_solve_end_mentions_status() {
        let visitor = EventVisitor {
            event: Some("solve_end".to_string()),
            status: Some("OPTIMAL".to_string()),
            nodes: Some(42),
            ..EventVisitor::default()
        };
        let output = format_event(Level::INFO, &visitor);
        assert!(output.contains("OPTIMAL"));
        assert!(output.contains("42"));
    }

    #[test]
    fn test_warning_prefers_error_field() {
        let visitor = EventVisitor {
            event: Some("model_invalid".to_string()),
            error: Some("bad bounds".to_string()),
            ..EventVisitor::default()
        };
        assert!(format_event(Level::WARN, &visitor).contains("bad bounds"));
    }

    #[test]
    fn test_init_is_idempotent() {
        init();
        init();
    }
}
