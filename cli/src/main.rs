mod menu;
#[cfg(test)]
mod test_support;
mod transport;

use std::io::{self, BufReader};

use clap::Parser;
use face::Emotion;
use tracing::Level;

use crate::transport::{Transport, WsTransport};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("terminal output failed: {0}")]
    Output(#[from] io::Error),
    #[error("logging setup failed: {0}")]
    Logging(String),
}

#[derive(Parser, Debug)]
#[command(name = "face-cli", about = "Push facial expressions to an ai-face display")]
struct Cli {
    /// Display host.
    #[arg(long, env = "FACE_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Display websocket port.
    #[arg(long, env = "FACE_PORT", default_value_t = 8765)]
    port: u16,

    /// Websocket path on the display.
    #[arg(long, env = "FACE_PATH", default_value = "/")]
    path: String,

    /// Print payloads instead of sending them.
    #[arg(long, default_value_t = false)]
    dry_run: bool,

    /// Send one emotion by name and exit instead of showing the menu.
    #[arg(long, value_name = "NAME")]
    emotion: Option<String>,

    /// Log connection details to stderr.
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let transport = if cli.dry_run {
        Transport::PrintOnly
    } else {
        let ws = WsTransport::new(ws_url(&cli.host, cli.port, &cli.path));
        tracing::debug!(url = ws.url(), "display endpoint");
        Transport::WebSocket(ws)
    };
    let mut out = io::stdout();

    if let Some(name) = &cli.emotion {
        menu::send_emotion(one_shot_emotion(name), &transport, &mut out).await?;
        return Ok(());
    }

    let mut lines = menu::spawn_line_reader(BufReader::new(io::stdin()));
    let exit = menu::run_menu(&mut lines, &transport, &mut out, interrupted()).await?;
    tracing::debug!(?exit, "menu closed");
    Ok(())
}

fn init_tracing(verbose: bool) -> Result<(), CliError> {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(level)
        .try_init()
        .map_err(|error| CliError::Logging(error.to_string()))
}

/// Emotion for `--emotion NAME`. Unknown names send the neutral face.
fn one_shot_emotion(name: &str) -> Emotion {
    Emotion::from_name(name).unwrap_or_else(|| {
        tracing::warn!(name = %name, "unknown emotion, sending neutral");
        Emotion::Neutral
    })
}

/// Resolves on Ctrl-C. Never resolves if the handler cannot be installed.
async fn interrupted() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(%error, "cannot listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}

fn ws_url(host: &str, port: u16, path: &str) -> String {
    let host = if host.contains(':') && !host.starts_with('[') {
        format!("[{host}]")
    } else {
        host.to_owned()
    };
    let path = path.strip_prefix('/').unwrap_or(path);
    format!("ws://{host}:{port}/{path}")
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
