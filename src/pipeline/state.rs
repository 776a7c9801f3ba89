//! Pipeline state machine and the shared handle around it.
//!
//! [`PipelineState`] holds the tracked amount and the latest display string.
//! Every read-modify-write goes through one lock acquisition on
//! [`SharedPipelineState`], so tracking a new amount and applying a result
//! can never interleave.
//!
//! ```text
//! Idle ──amount A──▶ Tracking(A) ──amount B ≠ A──▶ Tracking(B)
//!                        │  ▲
//!                        └──┘ amount A again (no request)
//! ```

use std::sync::{Arc, Mutex, MutexGuard};

use crate::currency::{Conversion, CurrencyPair};
use crate::extract::Amount;

// ---------------------------------------------------------------------------
// Tracking
// ---------------------------------------------------------------------------

/// What the pipeline is currently tracking.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Tracking {
    /// No amount extracted yet.
    #[default]
    Idle,
    /// The most recently extracted distinct amount.
    Tracking(Amount),
}

impl Tracking {
    pub fn amount(&self) -> Option<&Amount> {
        match self {
            Tracking::Idle => None,
            Tracking::Tracking(amount) => Some(amount),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tracking::Idle => "Idle",
            Tracking::Tracking(_) => "Tracking",
        }
    }
}

// ---------------------------------------------------------------------------
// RequestTicket
// ---------------------------------------------------------------------------

/// Tag carried by an in-flight conversion.
///
/// `seq` is the request counter value at issue time; the result is applied
/// only if no later request has been issued since.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTicket {
    pub seq: u64,
    pub amount: Amount,
    pub pair: CurrencyPair,
}

// ---------------------------------------------------------------------------
// PipelineState
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct PipelineState {
    pub tracking: Tracking,
    /// Last successfully applied display string, e.g. `"EUR 18.45"`.
    pub latest_display: Option<String>,
    /// Number of requests issued so far; also the seq of the current one.
    pub issued: u64,
}

impl PipelineState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking `amount` unless it is already tracked.
    ///
    /// Returns the ticket for the request that must be issued, or `None` for
    /// a duplicate.
    pub fn track(&mut self, amount: Amount, pair: CurrencyPair) -> Option<RequestTicket> {
        if self.tracking.amount() == Some(&amount) {
            return None;
        }

        self.issued += 1;
        self.tracking = Tracking::Tracking(amount.clone());

        Some(RequestTicket {
            seq: self.issued,
            amount,
            pair,
        })
    }

    /// `true` while no newer request has superseded `ticket`.
    pub fn is_current(&self, ticket: &RequestTicket) -> bool {
        ticket.seq == self.issued
    }

    /// Apply a converted value for `ticket`.
    ///
    /// Returns the new display string, or `None` when the ticket is stale and
    /// the state was left untouched.
    pub fn resolve(&mut self, ticket: &RequestTicket, value: f64) -> Option<String> {
        if !self.is_current(ticket) {
            return None;
        }

        let display = Conversion::new(value, ticket.pair.to).to_string();
        self.latest_display = Some(display.clone());
        Some(display)
    }
}

// ---------------------------------------------------------------------------
// SharedPipelineState
// ---------------------------------------------------------------------------

/// Thread-safe handle to [`PipelineState`].
///
/// Lock with [`lock_state`] for a short critical section; do **not** hold the
/// guard across `.await` points.
pub type SharedPipelineState = Arc<Mutex<PipelineState>>;

pub fn new_shared_state() -> SharedPipelineState {
    Arc::new(Mutex::new(PipelineState::new()))
}

/// Lock the state, recovering the guard if a previous holder panicked.
pub fn lock_state(state: &SharedPipelineState) -> MutexGuard<'_, PipelineState> {
    state.lock().unwrap_or_else(|e| e.into_inner())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::CurrencyCode;

    fn amount(raw: &str) -> Amount {
        Amount::from_extracted(raw).unwrap()
    }

    fn usd_eur() -> CurrencyPair {
        CurrencyPair::new(CurrencyCode::Usd, CurrencyCode::Eur)
    }

    #[test]
    fn starts_idle() {
        let state = PipelineState::new();
        assert_eq!(state.tracking, Tracking::Idle);
        assert_eq!(state.tracking.label(), "Idle");
        assert!(state.latest_display.is_none());
        assert_eq!(state.issued, 0);
    }

    #[test]
    fn first_amount_issues_ticket() {
        let mut state = PipelineState::new();
        let ticket = state.track(amount("19.99"), usd_eur()).unwrap();

        assert_eq!(ticket.seq, 1);
        assert_eq!(ticket.amount.normalized(), "19.99");
        assert_eq!(state.tracking, Tracking::Tracking(amount("19.99")));
        assert_eq!(state.tracking.label(), "Tracking");
    }

    #[test]
    fn duplicate_amount_issues_nothing() {
        let mut state = PipelineState::new();
        state.track(amount("7,5"), usd_eur()).unwrap();

        assert!(state.track(amount("7.5"), usd_eur()).is_none());
        assert_eq!(state.issued, 1);
    }

    #[test]
    fn current_ticket_updates_display() {
        let mut state = PipelineState::new();
        let ticket = state.track(amount("19.99"), usd_eur()).unwrap();

        assert_eq!(state.resolve(&ticket, 18.4512).as_deref(), Some("EUR 18.45"));
        assert_eq!(state.latest_display.as_deref(), Some("EUR 18.45"));
    }

    #[test]
    fn superseded_ticket_is_discarded() {
        let mut state = PipelineState::new();
        let old = state.track(amount("10"), usd_eur()).unwrap();
        let new = state.track(amount("20"), usd_eur()).unwrap();

        assert_eq!(state.resolve(&new, 40.0).as_deref(), Some("EUR 40.00"));
        assert!(state.resolve(&old, 20.0).is_none());
        assert_eq!(state.latest_display.as_deref(), Some("EUR 40.00"));
    }

    #[test]
    fn returning_to_an_earlier_amount_still_supersedes() {
        let mut state = PipelineState::new();
        let first = state.track(amount("10"), usd_eur()).unwrap();
        state.track(amount("20"), usd_eur()).unwrap();
        let again = state.track(amount("10"), usd_eur()).unwrap();

        assert!(!state.is_current(&first));
        assert!(state.is_current(&again));
        assert!(state.resolve(&first, 1.0).is_none());
        assert!(state.latest_display.is_none());
    }

    #[test]
    fn display_uses_ticket_target_currency() {
        let mut state = PipelineState::new();
        let pair = CurrencyPair::new(CurrencyCode::Eur, CurrencyCode::Huf);
        let ticket = state.track(amount("3"), pair).unwrap();

        assert_eq!(state.resolve(&ticket, 1187.5).as_deref(), Some("HUF 1187.50"));
    }

    #[test]
    fn shared_state_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SharedPipelineState>();
    }
}
