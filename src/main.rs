//! Application entry point — Currency Lens text frontend.
//!
//! Stands in for the camera + text-recognition front end: every stdin line is
//! one recognized frame, and every display change is printed as an overlay
//! line.  Lines starting with `:` change the currency selection:
//!
//! ```text
//! :from GBP      select the source currency
//! :to HUF        select the target currency
//! :pair          print the active pair
//! ```
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk (returns default on first run).
//! 3. Create [`tokio`] runtime (multi-thread, 2 workers).
//! 4. Build the conversion gateway and the pipeline.
//! 5. Spawn the overlay printer and the pipeline loop.
//! 6. Feed stdin lines into the frame feed until EOF.

use std::sync::Arc;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;

use currency_lens::{
    config::AppConfig,
    currency::{CurrencyCode, CurrencySelector},
    gateway::{ConversionGateway, ExchangeRateGateway},
    pipeline::{frame_feed, ConversionPipeline, FrameSender, RecognizedTextEvent},
};

// ---------------------------------------------------------------------------
// Input lines
// ---------------------------------------------------------------------------

enum InputLine {
    Frame(RecognizedTextEvent),
    SelectFrom(CurrencyCode),
    SelectTo(CurrencyCode),
    ShowPair,
    Invalid(String),
}

fn parse_line(line: &str) -> InputLine {
    let Some(command) = line.strip_prefix(':') else {
        return InputLine::Frame(RecognizedTextEvent::new(line));
    };

    let mut parts = command.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some("from"), Some(code)) => match code.parse() {
            Ok(code) => InputLine::SelectFrom(code),
            Err(e) => InputLine::Invalid(e.to_string()),
        },
        (Some("to"), Some(code)) => match code.parse() {
            Ok(code) => InputLine::SelectTo(code),
            Err(e) => InputLine::Invalid(e.to_string()),
        },
        (Some("pair"), None) => InputLine::ShowPair,
        _ => InputLine::Invalid(format!("unknown command {line:?}")),
    }
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

/// Decode one raw stdin line; `None` for bytes that are not UTF-8.
fn decode_line(raw: Vec<u8>) -> Option<String> {
    match String::from_utf8(raw) {
        Ok(line) => Some(line),
        Err(e) => {
            log::warn!("frontend: skipping non-UTF-8 line ({e})");
            None
        }
    }
}

/// Read stdin until EOF; the feed closes when `frames` is dropped on return.
async fn read_frames(selector: &CurrencySelector, frames: FrameSender) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).split(b'\n');

    while let Some(raw) = lines.next_segment().await? {
        let Some(line) = decode_line(raw) else {
            continue;
        };

        match parse_line(line.trim()) {
            InputLine::Frame(event) => {
                if !frames.publish(event) {
                    log::warn!("frontend: pipeline stopped, ignoring further input");
                    break;
                }
            }
            InputLine::SelectFrom(code) => {
                selector.select_from(code);
                log::info!("frontend: pair is now {}", selector.current());
            }
            InputLine::SelectTo(code) => {
                selector.select_to(code);
                log::info!("frontend: pair is now {}", selector.current());
            }
            InputLine::ShowPair => println!("pair: {}", selector.current()),
            InputLine::Invalid(message) => log::warn!("frontend: {message}"),
        }
    }

    Ok(())
}

/// Print each display change until the pipeline goes away.
async fn render_overlay(mut display: watch::Receiver<Option<String>>) {
    while display.changed().await.is_ok() {
        if let Some(text) = display.borrow_and_update().as_deref() {
            println!("overlay: {text}");
        }
    }
}

/// Wire gateway, pipeline and overlay, then feed stdin until EOF.
async fn run(config: AppConfig) -> Result<()> {
    // 4. Gateway + pipeline
    let selector = CurrencySelector::new(config.currency.pair());
    let gateway: Arc<dyn ConversionGateway> =
        Arc::new(ExchangeRateGateway::from_config(&config.gateway));
    let pipeline =
        ConversionPipeline::new(gateway, selector.clone(), tokio::runtime::Handle::current());
    log::info!("Converting {}", selector.current());

    // 5. Overlay printer + pipeline loop
    let overlay = tokio::spawn(render_overlay(pipeline.subscribe()));
    let (frames_tx, frames_rx) = frame_feed();
    let runner = tokio::spawn(pipeline.run(frames_rx));

    // 6. Input until EOF
    let input = read_frames(&selector, frames_tx).await;

    runner.await?;
    overlay.await?;
    log::info!("Currency Lens shutting down");
    input
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Currency Lens starting up");

    // 2. Configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e}); using defaults");
        AppConfig::default()
    });
    if AppConfig::is_first_run() {
        // Leave a settings.toml behind so the API key has somewhere to go.
        match config.save() {
            Ok(()) => log::info!(
                "Wrote default settings to {}",
                currency_lens::config::AppPaths::new().settings_file.display()
            ),
            Err(e) => log::warn!("Could not write default settings: {e}"),
        }
    }

    // 3. Tokio runtime
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()?;

    rt.block_on(run(config))
}
