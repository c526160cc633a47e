use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use anyhow::Result;
use ledstrip_mock::config::Config;
use ledstrip_mock::publisher::DisplayPublisher;
use ledstrip_mock::strip::LedStrip;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

/// Stand-in for the bus's display topic: the rendered block (or a blank
/// line for idle) goes straight to stdout, so a terminal shows the strip
/// flashing and clearing.
struct ConsoleDisplay;

impl DisplayPublisher for ConsoleDisplay {
    type Error = std::io::Error;

    fn publish<'a>(
        &'a self,
        text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<(), Self::Error>> + Send + 'a>> {
        Box::pin(async move {
            println!("{text}");
            Ok(())
        })
    }
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let config = Config::from_args();
    info!(
        "{} started duration={:?} (send colour labels on stdin, empty line clears)",
        config.node_name, config.duration
    );

    let strip = Arc::new(LedStrip::new(Arc::new(ConsoleDisplay), config.duration));

    // Command subscription stand-in: one line of stdin per command payload.
    let command_strip = Arc::clone(&strip);
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if let Err(err) = command_strip.handle_command(line.trim()).await {
                warn!("command rejected: {err}");
            }
        }
    });

    tokio::signal::ctrl_c().await?;
    strip.shutdown();
    info!("shutdown");
    Ok(())
}
