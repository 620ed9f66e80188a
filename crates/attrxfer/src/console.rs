//! Colorful console output for copy requests.
//!
//! Provides a custom `tracing` layer that formats engine events with colors.
//!
//! ## Log Levels
//!
//! - **INFO**: Request lifecycle (copy start/end)
//! - **WARN/ERROR**: Diagnostics of skipped or failed requests
//! - **DEBUG**: Path decisions (column copy, chunked transfer, matching)

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::OnceLock;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

/// Default filter when `RUST_LOG` is unset.
const DEFAULT_DIRECTIVE: &str = "attrxfer_engine=info";

/// Initializes the console output.
///
/// Safe to call multiple times - only the first call has effect. Does
/// nothing if another global subscriber is already installed.
pub fn init() {
    INIT.get_or_init(|| {
        let mut builder = EnvFilter::builder();
        if let Ok(directive) = DEFAULT_DIRECTIVE.parse::<Directive>() {
            builder = builder.with_default_directive(directive);
        }
        let filter = builder.from_env_lossy();

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(CopyConsoleLayer)
            .try_init();
    });
}

/// A tracing layer that formats engine events with colors.
pub struct CopyConsoleLayer;

impl<S: Subscriber> Layer<S> for CopyConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !metadata.target().starts_with("attrxfer") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor, *metadata.level());
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    task: Option<String>,
    source_selector: Option<String>,
    target_selector: Option<String>,
    reason: Option<String>,
    kind: Option<String>,
    attribute: Option<String>,
    records: Option<u64>,
    points: Option<u64>,
    unmatched: Option<u64>,
    duration_ms: Option<u64>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        self.record_str(field, s.trim_matches('"'));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "records" => self.records = Some(value),
            "points" => self.points = Some(value),
            "unmatched" => self.unmatched = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        let slot = match field.name() {
            "event" => &mut self.event,
            "task" => &mut self.task,
            "source_selector" => &mut self.source_selector,
            "target_selector" => &mut self.target_selector,
            "reason" => &mut self.reason,
            "kind" => &mut self.kind,
            "attribute" => &mut self.attribute,
            _ => return,
        };
        *slot = Some(value.to_string());
    }
}

fn format_event(v: &EventVisitor, level: Level) -> String {
    match v.event.as_deref().unwrap_or("") {
        "copy_start" => format_copy_start(v),
        "copy_end" => format_copy_end(v),
        "copy_failed" | "copy_skipped" => format_failure(v, level),
        "structural_copy" => format_structural(v),
        "transfer_complete" => format_transfer(v),
        "match_complete" => format_match(v),
        _ => String::new(),
    }
}

fn format_copy_start(v: &EventVisitor) -> String {
    format!(
        "{} {} │ {} {} {}",
        "▶".bright_green().bold(),
        v.task.as_deref().unwrap_or("CopyAttribute").white().bold(),
        v.source_selector.as_deref().unwrap_or("?").bright_yellow(),
        "→".bright_black(),
        v.target_selector.as_deref().unwrap_or("?").bright_yellow(),
    )
}

fn format_copy_end(v: &EventVisitor) -> String {
    format!(
        "{} {} │ {} records │ {}",
        "■".bright_cyan().bold(),
        v.task.as_deref().unwrap_or("CopyAttribute").white().bold(),
        format_count(v.records),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
    )
}

fn format_failure(v: &EventVisitor, level: Level) -> String {
    let reason = v.reason.as_deref().unwrap_or("unknown");
    let task = v.task.as_deref().unwrap_or("CopyAttribute");
    if level == Level::WARN {
        format!("{} {} │ {}", "!".yellow().bold(), task, reason.yellow())
    } else {
        format!("{} {} │ {}", "✗".bright_red().bold(), task, reason.bright_red())
    }
}

fn format_structural(v: &EventVisitor) -> String {
    let mut output = format!(
        "  {} column copy ({}) into {}",
        "↳".bright_black(),
        v.kind.as_deref().unwrap_or("?"),
        v.attribute.as_deref().unwrap_or("?").bright_yellow(),
    );
    if v.points.is_some() {
        output.push_str(&format!(" │ {} points", format_count(v.points)));
    }
    output
}

fn format_transfer(v: &EventVisitor) -> String {
    format!(
        "  {} chunked transfer │ {} records",
        "↳".bright_black(),
        format_count(v.records),
    )
}

fn format_match(v: &EventVisitor) -> String {
    let unmatched = v.unmatched.unwrap_or(0);
    let unmatched = if unmatched > 0 {
        unmatched.to_formatted_string(&Locale::en).yellow().to_string()
    } else {
        unmatched.to_formatted_string(&Locale::en).bright_green().to_string()
    };
    format!("  {} matched by value │ {} unmatched", "↳".bright_black(), unmatched)
}

fn format_count(count: Option<u64>) -> String {
    count
        .unwrap_or(0)
        .to_formatted_string(&Locale::en)
        .bright_magenta()
        .bold()
        .to_string()
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else {
        format!("{:.2}s", ms as f64 / 1000.0)
    }
}
