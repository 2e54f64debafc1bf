//! Per-kind request numbering used to drop stale responses.

use tokio_util::sync::CancellationToken;

/// Tracks the latest attempt of one kind of request. Issuing a new attempt cancels the one
/// before it; a completion is only authoritative if its number is still the latest.
#[derive(Debug, Default)]
pub struct RequestSequence {
    latest: u64,
    in_flight: Option<CancellationToken>,
}

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self) -> (u64, CancellationToken) {
        self.cancel_in_flight();
        self.latest += 1;
        let cancel = CancellationToken::new();
        self.in_flight = Some(cancel.clone());
        (self.latest, cancel)
    }

    /// Supersedes whatever is in flight without starting anything new.
    pub fn invalidate(&mut self) {
        self.cancel_in_flight();
        self.latest += 1;
    }

    pub fn is_latest(&self, seq: u64) -> bool {
        seq == self.latest
    }

    pub fn latest(&self) -> u64 {
        self.latest
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Marks `seq` as finished. Returns false when it was superseded.
    pub fn settle(&mut self, seq: u64) -> bool {
        if !self.is_latest(seq) {
            return false;
        }
        self.in_flight = None;
        true
    }

    fn cancel_in_flight(&mut self) {
        if let Some(cancel) = self.in_flight.take() {
            cancel.cancel();
        }
    }
}
