//! Headless command runner.
//!
//! Reads one JSON command (or an array of commands) per line from stdin and
//! prints one JSON response per command to stdout. Logs go to stderr.
//! `--write-settings` saves the effective settings file and exits.

use brickyard_lib::ai::GenerationClient;
use brickyard_lib::command::{CommandResponse, CommandRunner};
use brickyard_lib::state::{EditSession, Settings};
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "brickyard=info,brickyard_lib=info".into()),
        )
        .init();

    let settings = Settings::load();
    if std::env::args().any(|arg| arg == "--write-settings") {
        match settings.save() {
            Ok(()) => tracing::info!("Settings written to {:?}", Settings::settings_path()),
            Err(e) => {
                tracing::error!("Failed to write settings: {e}");
                std::process::exit(1);
            }
        }
        return;
    }
    let mut session = EditSession::new(&settings.editor);

    if let Some(path) = work_arg() {
        let loaded = read_work(&path)
            .and_then(|work| session.load_work(work, |_| true).map_err(|e| e.to_string()));
        match loaded {
            Ok(_) => tracing::info!("Loaded work from {path} ({} blocks)", session.block_count()),
            Err(e) => {
                tracing::error!("Cannot open {path}: {e}");
                std::process::exit(2);
            }
        }
    }

    let mut runner = CommandRunner::new(session);
    let client = GenerationClient::new(settings.generation.clone());
    if client.is_configured() {
        runner = runner.with_generator(Box::new(client));
    } else {
        tracing::info!("Assisted generation disabled (no API key)");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                tracing::error!("Failed to read stdin: {e}");
                std::process::exit(1);
            }
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let responses = if line.starts_with('[') {
            runner.execute_json_batch(line).await
        } else {
            runner.execute_json(line).await.map(|r| vec![r])
        };

        match responses {
            Ok(responses) => responses.iter().for_each(print_response),
            Err(e) => print_response(&CommandResponse {
                success: false,
                error: Some(e),
                data: None,
            }),
        }
    }
}

fn print_response(response: &CommandResponse) {
    match serde_json::to_string(response) {
        Ok(json) => println!("{json}"),
        Err(e) => tracing::error!("Failed to encode response: {e}"),
    }
}

/// Value of `--work <path>`, if given
fn work_arg() -> Option<String> {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--work" {
            return args.next();
        }
    }
    None
}

fn read_work(path: &str) -> Result<shared::Work, String> {
    let json = std::fs::read_to_string(path).map_err(|e| format!("read failed: {e}"))?;
    serde_json::from_str(&json).map_err(|e| format!("not a work file: {e}"))
}
