use anyhow::{Context, Result};
use clap::Parser;
use reels::app::App;
use reels::config::Config;
use reels::feed::{load_feed, FeedOptions};
use std::path::PathBuf;

/// Get the config directory path (~/.config/reels/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".config").join("reels"))
}

#[derive(Parser, Debug)]
#[command(name = "reels", about = "Browse a feed of short videos in the terminal")]
struct Args {
    /// JSON feed file (an array of videos, or an object with a `videos` array)
    #[arg(value_name = "FEED")]
    feed: PathBuf,

    /// Config file (default: ~/.config/reels/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Open the feed at this entry (0-based)
    #[arg(long, value_name = "INDEX", default_value_t = 0)]
    start_index: usize,

    /// Maximum number of videos to load (0 = no limit; overrides config)
    #[arg(long, value_name = "N")]
    limit: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; the TUI owns stdout
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config_path = match args.config {
        Some(path) => path,
        None => get_config_dir()?.join("config.toml"),
    };
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    let options = FeedOptions {
        limit: args.limit.unwrap_or(config.max_entries),
    };
    let entries = load_feed(&args.feed, &options)
        .with_context(|| format!("Failed to load feed from {}", args.feed.display()))?;

    if entries.is_empty() {
        tracing::warn!(path = %args.feed.display(), "Feed has no playable videos");
    }

    let mut app = App::with_start(entries, &config, args.start_index);

    reels::ui::run(&mut app).await?;

    println!("Goodbye!");
    Ok(())
}
