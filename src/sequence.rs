//! Sequence Tracker
//!
//! Duplicate suppression for the unreliable channel. The sender stamps each
//! outbound datagram with a 16-bit sequence number drawn from one counter
//! shared across message types; the receiver remembers the last-accepted
//! number per message type and discards exact repeats.
//!
//! The receiver accepts any non-zero forward or backward gap: out-of-order
//! and lost datagrams are tolerated, and a stale-but-new number still wins
//! (last-applied-wins, no reordering).

use std::collections::BTreeMap;

/// Per-session sequence state for the unreliable channel.
#[derive(Debug, Default)]
pub struct SequenceTracker {
    /// Next outbound sequence number (wraps mod 65536).
    next_out: u16,
    /// Last accepted inbound number, keyed by message type tag.
    /// Absent means no datagram of that type has been seen yet.
    last_seen: BTreeMap<u8, u16>,
}

impl SequenceTracker {
    /// Create a fresh tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the next outbound sequence number and advance the counter.
    pub fn next_outbound(&mut self) -> u16 {
        let seq = self.next_out;
        self.next_out = self.next_out.wrapping_add(1);
        seq
    }

    /// Decide whether an inbound datagram should be applied.
    ///
    /// Returns `false` only when `seq` exactly repeats the last accepted
    /// number for `tag`. On acceptance the last-seen entry is updated; a
    /// rejected duplicate never updates state.
    pub fn accept(&mut self, tag: u8, seq: u16) -> bool {
        if let Some(&last) = self.last_seen.get(&tag) {
            if seq.wrapping_sub(last) == 0 {
                return false;
            }
        }
        self.last_seen.insert(tag, seq);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outbound_counter_wraps() {
        let mut tracker = SequenceTracker::new();
        tracker.next_out = u16::MAX;
        assert_eq!(tracker.next_outbound(), u16::MAX);
        assert_eq!(tracker.next_outbound(), 0);
        assert_eq!(tracker.next_outbound(), 1);
    }

    #[test]
    fn test_first_arrival_is_fresh() {
        let mut tracker = SequenceTracker::new();
        assert!(tracker.accept(0x14, 42));
    }

    #[test]
    fn test_only_exact_repeats_dropped() {
        // [5, 5, 6, 4, 7] -> accepted [5, 6, 4, 7]; only the repeated 5 drops.
        let mut tracker = SequenceTracker::new();
        let accepted: Vec<u16> = [5u16, 5, 6, 4, 7]
            .into_iter()
            .filter(|&seq| tracker.accept(0x14, seq))
            .collect();
        assert_eq!(accepted, vec![5, 6, 4, 7]);
    }

    #[test]
    fn test_wraparound_accepted() {
        let mut tracker = SequenceTracker::new();
        assert!(tracker.accept(0x15, 65535));
        assert!(tracker.accept(0x15, 0));
    }

    #[test]
    fn test_types_tracked_independently() {
        let mut tracker = SequenceTracker::new();
        assert!(tracker.accept(0x14, 7));
        // Same number on a different type is not a duplicate.
        assert!(tracker.accept(0x15, 7));
        assert!(!tracker.accept(0x14, 7));
    }

    #[test]
    fn test_rejection_never_updates_state() {
        let mut tracker = SequenceTracker::new();
        assert!(tracker.accept(0x14, 9));
        assert!(!tracker.accept(0x14, 9));
        // Still a duplicate of the accepted 9, not of anything newer.
        assert!(!tracker.accept(0x14, 9));
        assert!(tracker.accept(0x14, 10));
    }
}
