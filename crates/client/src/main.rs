//! Arena client binary.
//!
//! Main entry point: pick two fighters, watch them fight, then rematch or pick
//! again.
//!
//! # Examples
//!
//! ```bash
//! # Embedded roster, default pacing
//! cargo run -p arena-client
//!
//! # Replayable, fast battles with content from a data directory
//! ARENA_SEED=7 ARENA_HIT_DELAY_MS=100 ARENA_MISS_DELAY_MS=100 \
//!     ARENA_DATA_DIR=crates/arena/content/data cargo run -p arena-client
//! ```

use anyhow::Result;
use arena_client::{ClientConfig, Console, PromptDecisionProvider, logging, presenter, prompt};
use arena_runtime::{Runtime, Topic};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    // 1. Load configuration from environment
    let config = ClientConfig::from_env();

    // 2. Setup logging
    let _log_guard = logging::setup_logging(&config)?;
    tracing::info!("Starting arena client");

    // 3. Load content
    let (combat, roster) = config.load_content()?;
    tracing::info!(fighters = roster.len(), seed = ?config.seed, "content loaded");

    // 4. Build runtime
    let console = Console::stdin();
    let runtime = Runtime::builder()
        .config(config.runtime_config(combat))
        .roster(roster)
        .decision_provider(PromptDecisionProvider::new(console.clone()))
        .build()
        .await?;
    let handle = runtime.handle();

    // 5. Presenter
    let presenter = tokio::spawn(presenter::run_presenter(
        handle.subscribe(Topic::Selection),
        handle.subscribe(Topic::Combat),
        handle.subscribe(Topic::Session),
    ));

    println!("=== Arena ===");

    // 6. Selection → session loop
    while prompt::select_pair(&handle, &console).await? {
        let summary = runtime.run_session().await?;
        tracing::info!(battles = summary.battles(), "session finished");
    }

    drop(handle);
    runtime.shutdown().await?;
    // The worker owned the event senders, so the presenter ends with it.
    presenter.await?;

    tracing::info!("Client shutdown complete");
    Ok(())
}
