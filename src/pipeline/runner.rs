//! Conversion pipeline — recognized text in, display string out.
//!
//! [`ConversionPipeline`] owns the [`SharedPipelineState`] and reacts to
//! [`RecognizedTextEvent`]s.
//!
//! # Per-frame flow
//!
//! ```text
//! on_recognized_text(event)
//!   ├─ no amount in text          → NoAmount   (state untouched)
//!   ├─ amount == tracked amount   → Unchanged  (no request)
//!   └─ new amount                 → track it now, spawn gateway.convert
//!                                     ├─ Ok, still current → latest_display = "{to} {v:.2}"
//!                                     ├─ Ok, superseded    → discard
//!                                     └─ Err               → warn, display kept
//! ```
//!
//! Gateway calls run on the runtime handle passed to
//! [`ConversionPipeline::new`]; the caller's thread never waits on the network.

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::currency::CurrencySelector;
use crate::extract::{Amount, AmountExtractor};
use crate::gateway::{ConversionError, ConversionGateway};

use super::event::RecognizedTextEvent;
use super::feed::FrameReceiver;
use super::state::{lock_state, new_shared_state, RequestTicket, SharedPipelineState};

// ---------------------------------------------------------------------------
// FrameOutcome
// ---------------------------------------------------------------------------

/// What a single recognized-text event led to.
#[derive(Debug)]
pub enum FrameOutcome {
    /// The text held no price-like token.
    NoAmount,
    /// The token matched the tracked amount; nothing was requested.
    Unchanged,
    /// A conversion was issued.  The handle completes once its result has
    /// been applied or discarded.
    Requested(JoinHandle<()>),
}

impl FrameOutcome {
    pub fn is_requested(&self) -> bool {
        matches!(self, FrameOutcome::Requested(_))
    }
}

// ---------------------------------------------------------------------------
// ConversionPipeline
// ---------------------------------------------------------------------------

/// Drives amount extraction, deduplication and conversion.
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use currency_lens::config::AppConfig;
/// use currency_lens::currency::CurrencySelector;
/// use currency_lens::gateway::ExchangeRateGateway;
/// use currency_lens::pipeline::{frame_feed, ConversionPipeline};
///
/// #[tokio::main]
/// async fn main() {
///     let config = AppConfig::default();
///     let gateway = Arc::new(ExchangeRateGateway::from_config(&config.gateway));
///     let pipeline = ConversionPipeline::new(
///         gateway,
///         CurrencySelector::new(config.currency.pair()),
///         tokio::runtime::Handle::current(),
///     );
///
///     let mut display = pipeline.subscribe();
///     let (frames_tx, frames_rx) = frame_feed();
///     tokio::spawn(pipeline.run(frames_rx));
///
///     frames_tx.publish("Price 19.99 USD".into());
///     display.changed().await.unwrap();
///     println!("{:?}", *display.borrow());
/// }
/// ```
pub struct ConversionPipeline {
    extractor: AmountExtractor,
    gateway: Arc<dyn ConversionGateway>,
    currencies: CurrencySelector,
    state: SharedPipelineState,
    display_tx: Arc<watch::Sender<Option<String>>>,
    runtime: Handle,
}

impl ConversionPipeline {
    /// Create a pipeline in the `Idle` state.
    ///
    /// # Arguments
    ///
    /// * `gateway`    — conversion backend (e.g. `ExchangeRateGateway`).
    /// * `currencies` — selection handle; read each time a request is issued.
    /// * `runtime`    — where gateway calls and result application run.
    pub fn new(
        gateway: Arc<dyn ConversionGateway>,
        currencies: CurrencySelector,
        runtime: Handle,
    ) -> Self {
        let (display_tx, _) = watch::channel(None);
        Self {
            extractor: AmountExtractor::new(),
            gateway,
            currencies,
            state: new_shared_state(),
            display_tx: Arc::new(display_tx),
            runtime,
        }
    }

    /// Handle one frame's recognized text.
    ///
    /// Never blocks: a new amount is tracked synchronously and its conversion
    /// is spawned.  Callers that don't care about completion can ignore the
    /// returned [`FrameOutcome`].
    pub fn on_recognized_text(&self, event: &RecognizedTextEvent) -> FrameOutcome {
        let Some(amount) = self.extractor.extract_amount(event.text()) else {
            log::trace!("pipeline: no amount in frame");
            return FrameOutcome::NoAmount;
        };

        let pair = self.currencies.current();
        let ticket = lock_state(&self.state).track(amount, pair);

        let Some(ticket) = ticket else {
            return FrameOutcome::Unchanged;
        };

        log::debug!(
            "pipeline: request #{} for {} ({pair})",
            ticket.seq,
            ticket.amount.raw()
        );

        let gateway = Arc::clone(&self.gateway);
        let state = Arc::clone(&self.state);
        let display_tx = Arc::clone(&self.display_tx);

        let handle = self.runtime.spawn(async move {
            let result = gateway.convert(ticket.amount.value(), ticket.pair).await;
            settle(&state, &display_tx, &ticket, result);
        });

        FrameOutcome::Requested(handle)
    }

    /// The latest applied display string, if any conversion has succeeded.
    pub fn current_display(&self) -> Option<String> {
        lock_state(&self.state).latest_display.clone()
    }

    /// The amount currently tracked, `None` while idle.
    pub fn last_amount(&self) -> Option<Amount> {
        lock_state(&self.state).tracking.amount().cloned()
    }

    /// Receive every display change as it is applied.
    pub fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.display_tx.subscribe()
    }

    // -----------------------------------------------------------------------
    // Main async loop
    // -----------------------------------------------------------------------

    /// Consume frames until the feed closes, then wait for outstanding
    /// conversions to settle.
    pub async fn run(self, mut frames: FrameReceiver) {
        let mut pending: Vec<JoinHandle<()>> = Vec::new();

        while let Some(event) = frames.next().await {
            if let FrameOutcome::Requested(handle) = self.on_recognized_text(&event) {
                pending.push(handle);
            }
            pending.retain(|handle| !handle.is_finished());
        }

        log::info!(
            "pipeline: frame feed closed, settling {} conversion(s)",
            pending.len()
        );

        for handle in pending {
            if let Err(e) = handle.await {
                log::warn!("pipeline: conversion task failed: {e}");
            }
        }
    }
}

/// Apply or drop a resolved conversion under a single state lock.
fn settle(
    state: &SharedPipelineState,
    display_tx: &watch::Sender<Option<String>>,
    ticket: &RequestTicket,
    result: Result<f64, ConversionError>,
) {
    let value = match result {
        Ok(value) => value,
        Err(e) => {
            log::warn!(
                "pipeline: conversion #{} of {} {} failed: {e}",
                ticket.seq,
                ticket.amount.raw(),
                ticket.pair
            );
            return;
        }
    };

    let mut st = lock_state(state);
    match st.resolve(ticket, value) {
        Some(display) => {
            log::debug!("pipeline: display → {display}");
            display_tx.send_replace(Some(display));
        }
        None => {
            log::debug!(
                "pipeline: dropping stale result #{} (current #{})",
                ticket.seq,
                st.issued
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
