//! Conversion pipeline module for Currency Lens.
//!
//! This module turns a stream of recognized-text frames into the display
//! string shown over the camera preview.
//!
//! # Architecture
//!
//! ```text
//! recognizer ──FrameSender::publish──▶ (latest frame only)
//!                                            │
//!                                            ▼
//! ConversionPipeline::run()  ← async tokio task
//!        │
//!        ├─ AmountExtractor::extract_amount
//!        ├─ PipelineState::track      (dedup guard, request counter)
//!        └─ spawn ConversionGateway::convert
//!              └─ PipelineState::resolve (stale results dropped)
//!
//! watch::Receiver<Option<String>> ←─── read by the overlay
//! ```

pub mod event;
pub mod feed;
pub mod runner;
pub mod state;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use event::RecognizedTextEvent;
pub use feed::{frame_feed, FrameReceiver, FrameSender};
pub use runner::{ConversionPipeline, FrameOutcome};
pub use state::{
    lock_state, new_shared_state, PipelineState, RequestTicket, SharedPipelineState, Tracking,
};
