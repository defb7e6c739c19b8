use vramwatch::cli::parse_args;
use vramwatch::client::VramClient;
use vramwatch::consumer::{consume_stream, CancelFlag, StreamOutcome};
use vramwatch::render::render_snapshot;

use chrono::Local;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use tracing::error;
use tracing_subscriber::EnvFilter;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Wall-clock header for displayed blocks, `HH:MM:SS.mmm`.
fn now() -> String {
    Local::now().format("%H:%M:%S%.3f").to_string()
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = parse_args(std::env::args());
    if args.show_version {
        println!("vramwatch {VERSION}");
        return Ok(());
    }

    let client = VramClient::new(&args.base_url)?;
    println!("Connecting to SSE stream: {}", client.stream_url());
    println!("Press Ctrl+C to stop");

    let cancel = CancelFlag::new();
    let watcher = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            println!("\nShutting down...");
            watcher.cancel();
        }
    });

    // Connection failures are fatal for the run
    let stream = client.connect().await?;
    println!("Connected, reading SSE stream...");
    println!("{}", "=".repeat(80));

    let outcome = consume_stream(stream, &cancel, |ordinal, snapshot| {
        println!("\n[{}] {}", now(), render_snapshot(ordinal, snapshot));
    })
    .await;

    match outcome {
        StreamOutcome::ClosedNormally { stats } => {
            println!(
                "\n[{}] Stream ended (EOF), received {} snapshots over {} lines",
                now(),
                stats.snapshots_decoded,
                stats.lines_read
            );
            Ok(())
        }
        StreamOutcome::ClosedEmpty => {
            println!(
                "\n[{}] Stream ended immediately (EOF), no data received",
                now()
            );
            println!("The server may have closed the connection as soon as it was accepted.");
            Ok(())
        }
        StreamOutcome::Cancelled { stats } => {
            println!(
                "\n[{}] Stopped, received {} snapshots over {} lines",
                now(),
                stats.snapshots_decoded,
                stats.lines_read
            );
            Ok(())
        }
        StreamOutcome::Aborted { error, stats } => {
            error!(
                lines_read = stats.lines_read,
                snapshots_decoded = stats.snapshots_decoded,
                "stream aborted: {}",
                error.message
            );
            Err(eyre!("{error}"))
        }
    }
}
