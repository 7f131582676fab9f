//! studentdb - interactive console over the `students` table
//!
//! Connection settings come from `~/.studentdb/config.toml` (or
//! `$STUDENTDB_CONFIG`) and `STUDENTDB_*` environment variables; a `.env`
//! file in the working directory is loaded first.

use std::io;

use anyhow::{Context, Result};
use studentdb_core::{db, DatabaseConfig, StudentRepo};

mod menu;
mod prompt;
mod render;
mod tracing_setup;
mod ui;

use menu::Menu;
use prompt::InquirePrompter;
use tracing_setup::TracingConfig;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_setup::init(&TracingConfig::from_env())?;
    ui::init_quiet_mode();

    let banner = render::rule('*', 60);
    println!("\n{banner}");
    println!("STUDENT DATABASE APPLICATION");
    println!("{banner}");

    let config = DatabaseConfig::load().context("Failed to load configuration")?;
    let target = config.display_target();
    tracing::debug!(?config, "loaded configuration");

    let mut conn = ui::with_spinner_async(
        format!("Connecting to {target}"),
        "Successfully connected to the database",
        db::connect(&config),
    )
    .await
    .with_context(|| format!("failed to connect to PostgreSQL at {target}"))?;

    if config.bootstrap_schema {
        db::ensure_schema(&mut conn)
            .await
            .context("Failed to create students table")?;
    }

    // The repository borrows the connection only for the menu's lifetime;
    // close runs whether the menu ended cleanly or not.
    let outcome = {
        let repo = StudentRepo::new(&mut conn);
        let mut menu = Menu::new(repo, InquirePrompter, io::stdout());
        menu.run().await
    };

    match db::close(conn).await {
        Ok(()) => println!("\nDatabase connection closed."),
        Err(err) => tracing::warn!(error = %err, "connection did not close cleanly"),
    }
    outcome.context("Console input failed")?;

    println!("\nThank you for using the Student Database Application!");
    println!("{banner}\n");
    Ok(())
}
