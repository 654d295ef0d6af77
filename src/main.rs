use clap::Parser;
use lucky_wheel::config::load_items;
use lucky_wheel::{LuckyWheel, PriorityNames, WheelCommand, WheelConfig};
use std::env;
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lucky-wheel")]
#[command(about = "Spin a wheel of names", long_about = None)]
struct Cli {
    /// Name to put on the wheel (repeatable)
    #[arg(short, long = "item", value_name = "NAME")]
    items: Vec<String>,

    /// File with one name per line
    #[arg(long, value_name = "PATH")]
    items_file: Option<PathBuf>,

    /// Name that wins before everyone else (repeatable)
    #[arg(short, long = "priority", value_name = "NAME")]
    priority: Vec<String>,

    /// Seed for reproducible picks
    #[arg(long)]
    seed: Option<u64>,

    /// TrueType font for labels
    #[arg(long, value_name = "PATH")]
    font: Option<PathBuf>,

    /// Text in the wheel hub
    #[arg(long, default_value = "QUAY")]
    hub_label: String,

    /// Keep reading names from stdin while the window is open
    #[arg(long)]
    stdin: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let rust_log = env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(cli.debug, &rust_log))
        .init();

    let mut items = cli.items;
    if let Some(path) = &cli.items_file {
        let loaded = load_items(path)?;
        info!(path = %path.display(), count = loaded.len(), "loaded items file");
        items.extend(loaded);
    }

    let config = WheelConfig::builder()
        .initial_items(items)
        .priority_names(cli.priority.into_iter().collect::<PriorityNames>())
        .hub_label(cli.hub_label)
        .maybe_seed(cli.seed)
        .maybe_font_path(cli.font)
        .build();

    let mut wheel = LuckyWheel::new(config);
    if !cli.stdin {
        wheel.show()?;
        return Ok(());
    }

    let (sender, receiver) = mpsc::channel();
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines().map_while(Result::ok) {
            if sender.send(WheelCommand::AddItem(line)).is_err() {
                break;
            }
        }
        debug!("stdin closed");
    });
    wheel.show_with_commands(receiver)?;
    Ok(())
}

/// `RUST_LOG` wins; `--debug` only moves the default level.
fn log_filter(debug: bool, rust_log: &str) -> EnvFilter {
    let level = if debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    EnvFilter::builder()
        .with_default_directive(level.into())
        .parse_lossy(rust_log)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tracing::level_filters::LevelFilter;

    #[test]
    fn default_level_follows_debug_flag() {
        assert_eq!(log_filter(false, "").max_level_hint(), Some(LevelFilter::INFO));
        assert_eq!(log_filter(true, "").max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn rust_log_overrides_default_level() {
        assert_eq!(log_filter(false, "warn").max_level_hint(), Some(LevelFilter::WARN));
        assert_eq!(log_filter(true, "error").max_level_hint(), Some(LevelFilter::ERROR));
    }
}
