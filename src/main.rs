use tapreflex::app::{summary_text, App};
use tapreflex::config::GameConfig;
use tapreflex::{error, logging, Result};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("{}", error::user_friendly_message(&e));
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let log_path = logging::init()?;
    tracing::info!(log = %log_path.display(), "tapreflex starting");

    let config = GameConfig::load()?;
    tracing::debug!(?config, "configuration loaded");

    let mut app = App::new(config)?;
    app.init()?;
    let outcome = app.run().await;
    app.shutdown()?;
    outcome?;

    if let Some(snapshot) = app.last_completed() {
        println!("Last results:");
        println!("{}", summary_text(snapshot));
    }
    Ok(())
}
