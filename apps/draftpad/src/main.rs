//! # Draftpad
//!
//! Terminal blog post editor: create, tag, autosave and publish posts.

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

mod commands;
mod config;
mod session;
mod shell;
mod state;
mod telemetry;

use commands::Command;
use config::AppConfig;
use shell::Shell;
use state::AppState;
use telemetry::TelemetryConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    telemetry::init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env();
    tracing::info!(
        data_dir = ?config.data_dir,
        debounce = ?config.autosave.debounce,
        "Starting Draftpad"
    );

    let state = AppState::new(&config).await?;
    let mut shell = Shell::new(state, config.autosave.clone());

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("Draftpad - type `help` for commands");
    loop {
        stdout.write_all(shell.prompt().as_bytes()).await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            // EOF behaves like `quit` so pending edits are flushed.
            shell.execute(Command::Quit).await?;
            break;
        };

        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("error: {e}");
                continue;
            }
        };

        match shell.execute(command).await {
            Ok(reply) => {
                for line in &reply.lines {
                    println!("{line}");
                }
                if reply.quit {
                    break;
                }
            }
            Err(e) => println!("error: {e:#}"),
        }
    }

    tracing::info!("Draftpad stopped");
    Ok(())
}
