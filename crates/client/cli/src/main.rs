//! Terminal swipe deck entry point.
mod app;
mod config;
mod feed;
mod input;
mod logging;
mod observer;
mod presentation;

use anyhow::Result;
use app::App;
use config::CliConfig;
use feed::Feed;
use presentation::terminal;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = CliConfig::from_env();
    let _log_guard = logging::setup_logging(config.session_id.as_deref())?;

    let feed = Feed::load(&config.feed)?;
    let app = App::new(config, feed)?;

    tracing::info!("swipe deck starting...");
    let mut terminal = terminal::init()?;
    let guard = terminal::TerminalGuard;
    let tally = app.run(&mut terminal).await?;
    drop(guard);

    println!(
        "Liked {} / passed {}",
        tally.liked.len(),
        tally.passed.len()
    );
    for token in &tally.liked {
        println!("  + {} ({})", token.symbol, token.name);
    }

    Ok(())
}
