//! Colorful console output for validation events.
//!
//! Provides a custom `tracing` layer that formats ensemble and constraint
//! validation events with colors. Enabled by the `console` feature.

use std::fmt::Debug;
use std::io::{self, Write};
use std::sync::OnceLock;

use owo_colors::OwoColorize;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

const DEFAULT_FILTER: &str = "surroforge_core=debug,surroforge_config=debug";

/// Initializes console output for validation events.
///
/// Safe to call multiple times - only the first call has effect. Honors
/// `RUST_LOG` when set.
pub fn init() {
    INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(ValidationConsoleLayer)
            .try_init();
    });
}

/// A tracing layer that formats validation events with colors.
pub struct ValidationConsoleLayer;

impl<S: Subscriber> Layer<S> for ValidationConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if !event.metadata().target().starts_with("surroforge") {
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
    message: Option<String>,
    kind: Option<String>,
    error: Option<String>,
    key: Option<String>,
    models: Option<u64>,
    inputs: Option<u64>,
    outputs: Option<u64>,
    constraints: Option<u64>,
    constraint: Option<u64>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
        let s = format!("{:?}", value);
        match field.name() {
            "event" => self.event = Some(s.trim_matches('"').to_string()),
            "message" => self.message = Some(s),
            "kind" => self.kind = Some(s.trim_matches('"').to_string()),
            "error" => self.error = Some(s),
            "key" => self.key = Some(s),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "models" => self.models = Some(value),
            "inputs" => self.inputs = Some(value),
            "outputs" => self.outputs = Some(value),
            "constraints" => self.constraints = Some(value),
            "constraint" => self.constraint = Some(value),
            _ => {}
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "message" => self.message = Some(value.to_string()),
            "kind" => self.kind = Some(value.to_string()),
            "error" => self.error = Some(value.to_string()),
            "key" => self.key = Some(value.to_string()),
            _ => {}
        }
    }
}

fn format_event(v: &EventVisitor) -> String {
    match v.event.as_deref() {
        Some("ensemble_validated") => ok_line(
            "[Ensemble]",
            format!("{} models composed", count(v.models)),
        ),
        Some("compatibility_checked") => ok_line(
            "[Ensemble]",
            format!(
                "compatible with domain: inputs ({}), outputs ({})",
                count(v.inputs),
                count(v.outputs)
            ),
        ),
        Some("constraints_checked") | Some("constraints_loaded") => ok_line(
            "[Constraints]",
            format!("{} constraints valid", count(v.constraints)),
        ),
        Some("ensemble_rejected") | Some("compatibility_rejected") => reject_line("[Ensemble]", v),
        Some("constraints_rejected") => reject_line("[Constraints]", v),
        _ => String::new(),
    }
}

fn ok_line(scope: &str, text: String) -> String {
    format!(
        "{} {} {} {}",
        timestamp().bright_black(),
        "OK  ".bright_green(),
        scope.bright_cyan(),
        text
    )
}

fn reject_line(scope: &str, v: &EventVisitor) -> String {
    let kind = v.kind.as_deref().unwrap_or("Unknown");
    let detail = match (&v.error, v.constraint, &v.key) {
        (Some(error), _, _) => error.clone(),
        (None, Some(index), Some(key)) => format!("constraint {} references {}", index, key),
        _ => String::new(),
    };
    format!(
        "{} {} {} {} {}",
        timestamp().bright_black(),
        "FAIL".bright_red().bold(),
        scope.bright_cyan(),
        format!("({})", kind).yellow(),
        detail
    )
}

fn count(value: Option<u64>) -> u64 {
    value.unwrap_or(0)
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
