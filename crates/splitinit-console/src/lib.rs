//! Colorful console output for routing decisions.
//!
//! Provides a custom `tracing` layer that formats router events with colors.
//!
//! ## Log Levels
//!
//! - **INFO**: Completed constructions
//! - **WARN**: Ambiguous routing, misconfigured chains, direct fallbacks
//! - **DEBUG**: Claims, broadcasts, backfills, chain heads
//! - **TRACE**: Individual constructor calls and forwarding

use std::io::{self, Write};
use std::sync::OnceLock;

use owo_colors::OwoColorize;
use splitinit_config::{LogConfig, RouterConfig};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

/// Initializes console output with the default log configuration.
///
/// Safe to call multiple times - only the first call has effect.
pub fn init() {
    init_with(&LogConfig::default());
}

/// Initializes console output from a router configuration, honoring its
/// debug switch.
pub fn init_with_config(config: &RouterConfig) {
    let log = LogConfig {
        level: config.effective_log_level().to_string(),
        categories: config.log.categories.clone(),
    };
    init_with(&log);
}

/// Initializes console output with an explicit log configuration.
///
/// `RUST_LOG` still overrides the configured level.
pub fn init_with(log: &LogConfig) {
    INIT.get_or_init(|| {
        let level = log.level.to_ascii_lowercase();
        let filter = EnvFilter::builder()
            .with_default_directive(directive("splitinit_router", &level))
            .from_env_lossy()
            .add_directive(directive("splitinit_core", &level));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(RoutingConsoleLayer::new(log.categories.clone()))
            .try_init();
    });
}

fn directive(target: &str, level: &str) -> Directive {
    format!("{target}={level}")
        .parse()
        .unwrap_or_else(|_| LevelFilter::INFO.into())
}

/// A tracing layer that formats router events with colors.
#[derive(Debug, Clone, Default)]
pub struct RoutingConsoleLayer {
    categories: Vec<String>,
}

impl RoutingConsoleLayer {
    /// Creates a layer printing only `categories` (all if empty).
    pub fn new(categories: Vec<String>) -> Self {
        Self { categories }
    }

    fn allows(&self, category: Option<&str>) -> bool {
        match category {
            Some(c) => self.categories.is_empty() || self.categories.iter().any(|x| x == c),
            None => true,
        }
    }
}

impl<S: Subscriber> Layer<S> for RoutingConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !metadata.target().starts_with("splitinit") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);
        if !self.allows(visitor.category.as_deref()) {
            return;
        }

        let output = format_event(&visitor, *metadata.level());
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Debug, Default)]
struct EventVisitor {
    event: Option<String>,
    category: Option<String>,
    component: Option<String>,
    head: Option<String>,
    key: Option<String>,
    pass: Option<String>,
    donor: Option<String>,
    chain: Option<String>,
    branch: Option<String>,
    keys: Option<String>,
    error: Option<String>,
    candidates: Option<u64>,
    invoked: Option<u64>,
    diagnostics: Option<u64>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        self.record_str(field, s.trim_matches('"'));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "candidates" => self.candidates = Some(value),
            "invoked" => self.invoked = Some(value),
            "diagnostics" => self.diagnostics = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value as u64);
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        let slot = match field.name() {
            "event" => &mut self.event,
            "category" => &mut self.category,
            "component" => &mut self.component,
            "head" => &mut self.head,
            "key" => &mut self.key,
            "pass" => &mut self.pass,
            "donor" => &mut self.donor,
            "chain" => &mut self.chain,
            "branch" => &mut self.branch,
            "keys" => &mut self.keys,
            "error" => &mut self.error,
            _ => return,
        };
        *slot = Some(value.to_string());
    }
}

fn format_event(v: &EventVisitor, level: Level) -> String {
    let event = v.event.as_deref().unwrap_or("");
    let component = v.component.as_deref().unwrap_or("?");
    let key = v.key.as_deref().unwrap_or("?");

    match event {
        "claim" => format!(
            "{} {} {} {} {}",
            "→".bright_blue(),
            key.white().bold(),
            "claimed by".bright_black(),
            component.bright_cyan(),
            format!("({})", v.pass.as_deref().unwrap_or("?")).bright_black(),
        ),
        "broadcast" => format!(
            "{} {} {} {}",
            "⇉".bright_magenta(),
            key.white().bold(),
            "copied into".bright_black(),
            component.bright_cyan(),
        ),
        "backfill" => format!(
            "{} {} {} {} {} {}",
            "↺".bright_yellow(),
            key.white().bold(),
            "backfilled into".bright_black(),
            component.bright_cyan(),
            "from".bright_black(),
            v.donor.as_deref().unwrap_or("?").bright_cyan(),
        ),
        "ambiguous_routing" => format!(
            "{} {} {} has {} candidate owners",
            "⚠".bright_yellow().bold(),
            "ambiguous".yellow(),
            key.white().bold(),
            v.candidates.unwrap_or(0).bright_yellow(),
        ),
        "chain_misconfigured" => format!(
            "{} {} {} delegates past the stop boundary",
            "⚠".bright_yellow().bold(),
            "chain".yellow(),
            component.bright_cyan(),
        ),
        "invoke_head" => format!(
            "{} {} {} {}",
            "▶".bright_green(),
            v.head.as_deref().unwrap_or("?").white().bold(),
            format!("via {}", v.branch.as_deref().unwrap_or("-")).bright_black(),
            v.chain.as_deref().unwrap_or("").bright_black(),
        ),
        "forward_dropped" => format!(
            "{} {} {}",
            "⚠".bright_yellow().bold(),
            "dropped at open chain end:".yellow(),
            v.keys.as_deref().unwrap_or("[]").white(),
        ),
        "direct_fallback" => format!(
            "{} {} {} {}",
            "⚠".bright_red().bold(),
            "direct fallback for".red(),
            v.head.as_deref().unwrap_or("?").white().bold(),
            v.error.as_deref().unwrap_or("").bright_black(),
        ),
        "constructed" => format!(
            "{} {} constructed │ {} invoked │ {} diagnostics",
            "✓".bright_green().bold(),
            component.white().bold(),
            v.invoked.unwrap_or(0).bright_yellow(),
            v.diagnostics.unwrap_or(0).bright_yellow(),
        ),
        "" => String::new(),
        other if level >= Level::DEBUG => format!(
            "{} {} {}",
            "·".bright_black(),
            other.bright_black(),
            component.bright_black(),
        ),
        _ => String::new(),
    }
}
