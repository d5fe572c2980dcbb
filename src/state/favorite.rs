/// Where a favorite toggle is in its round trip to the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TogglePhase {
    Idle,
    /// `revert_to` is the last value known to be authoritative.
    Pending { revert_to: bool },
    Committed,
    Reverted,
}

/// Proof that a toggle was started; a completion only applies to the toggle
/// that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct ToggleTicket {
    seq: u64,
    pub target: bool,
}

/// Optimistic favorite flag. The flag flips immediately on `begin`, is kept on
/// success, and reverts on failure. Real-time pushes always win.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct FavoriteToggle {
    value: bool,
    phase: TogglePhase,
    seq: u64,
}

impl FavoriteToggle {
    pub fn new(value: bool) -> Self {
        Self {
            value,
            phase: TogglePhase::Idle,
            seq: 0,
        }
    }

    pub fn value(&self) -> bool {
        self.value
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.phase, TogglePhase::Pending { .. })
    }

    /// Flip optimistically. Returns `None` while a previous toggle is in flight.
    pub fn begin(&mut self) -> Option<ToggleTicket> {
        if self.is_pending() {
            return None;
        }
        let revert_to = self.value;
        self.value = !self.value;
        self.seq += 1;
        self.phase = TogglePhase::Pending { revert_to };
        Some(ToggleTicket {
            seq: self.seq,
            target: self.value,
        })
    }

    /// Apply the backend outcome. Returns `true` if the visible value changed.
    pub fn complete(&mut self, ticket: ToggleTicket, ok: bool) -> bool {
        if ticket.seq != self.seq {
            return false;
        }
        let TogglePhase::Pending { revert_to } = self.phase else {
            return false;
        };

        if ok {
            self.phase = TogglePhase::Committed;
            false
        } else {
            let changed = self.value != revert_to;
            self.value = revert_to;
            self.phase = TogglePhase::Reverted;
            changed
        }
    }

    /// Authoritative state pushed by the server. During a pending toggle it
    /// also becomes the value a failure reverts to.
    pub fn apply_remote(&mut self, value: bool) {
        self.value = value;
        if let TogglePhase::Pending { .. } = self.phase {
            self.phase = TogglePhase::Pending { revert_to: value };
        }
    }

    /// Reset from a fresh backend read (refetch after reconnect, remount).
    pub fn reconcile(&mut self, value: bool) {
        if self.is_pending() {
            self.apply_remote(value);
        } else {
            self.value = value;
            self.phase = TogglePhase::Idle;
        }
    }
}

impl Default for FavoriteToggle {
    fn default() -> Self {
        Self::new(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_commits_optimistic_value() {
        let mut t = FavoriteToggle::new(false);
        let ticket = t.begin().expect("ticket");
        assert!(t.value());
        assert!(ticket.target);
        assert!(!t.complete(ticket, true));
        assert!(t.value());
        assert_eq!(t.phase, TogglePhase::Committed);
    }

    #[test]
    fn test_failure_reverts() {
        let mut t = FavoriteToggle::new(true);
        let ticket = t.begin().expect("ticket");
        assert!(!t.value());
        assert!(t.complete(ticket, false));
        assert!(t.value());
        assert_eq!(t.phase, TogglePhase::Reverted);
    }

    #[test]
    fn test_second_begin_while_pending_is_rejected() {
        let mut t = FavoriteToggle::new(false);
        let _first = t.begin().expect("ticket");
        assert!(t.begin().is_none());
        assert!(t.value());
    }

    #[test]
    fn test_stale_ticket_is_ignored() {
        let mut t = FavoriteToggle::new(false);
        let first = t.begin().expect("ticket");
        t.complete(first, true);
        let second = t.begin().expect("ticket");
        assert!(!t.value());

        assert!(!t.complete(first, false));
        assert!(!t.value());
        assert!(t.is_pending());

        t.complete(second, true);
        assert_eq!(t.phase, TogglePhase::Committed);
    }

    #[test]
    fn test_remote_message_during_pending_wins_over_failure() {
        let mut t = FavoriteToggle::new(false);
        let ticket = t.begin().expect("ticket");
        t.apply_remote(true);
        assert!(!t.complete(ticket, false));
        assert!(t.value());
    }

    #[test]
    fn test_remote_message_after_toggle_wins() {
        let mut t = FavoriteToggle::new(false);
        let ticket = t.begin().expect("ticket");
        t.complete(ticket, true);
        t.apply_remote(false);
        assert!(!t.value());
    }

    #[test]
    fn test_reconcile_when_idle_resets_phase() {
        let mut t = FavoriteToggle::new(false);
        let ticket = t.begin().expect("ticket");
        t.complete(ticket, false);
        t.reconcile(true);
        assert!(t.value());
        assert_eq!(t.phase, TogglePhase::Idle);
    }
}
