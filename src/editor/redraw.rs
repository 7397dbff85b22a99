/// Keeps at most one redraw pending.
///
/// Pointer moves during a drag can arrive far faster than frames are produced; every
/// request after the first is folded into the pending one until the host takes it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RedrawScheduler {
    pending: bool,
    coalesced: u64,
}

impl RedrawScheduler {
    /// Ask for a redraw. Returns `true` only when this call scheduled a new one.
    pub fn request(&mut self) -> bool {
        if self.pending {
            self.coalesced += 1;
            return false;
        }
        self.pending = true;
        true
    }

    /// Consume the pending redraw, if any.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    /// Whether a redraw is waiting.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Requests folded into an already pending redraw so far.
    pub fn coalesced(&self) -> u64 {
        self.coalesced
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/redraw.rs"]
mod tests;
