//! Event-list entries
//!
//! The scheduler keeps its agenda in a `BinaryHeap`, which is a max-heap, so
//! the ordering below is reversed: the earliest due time compares greatest.
//! Equal due times fall back to insertion sequence, giving FIFO order.

use crate::types::ProcessId;
use std::cmp::Ordering;

/// A pending resumption of one process
#[derive(Debug, Clone, Copy)]
pub struct Event {
    /// Simulated time at which the process resumes
    pub due: f64,
    /// Insertion sequence number, unique per scheduler
    pub seq: u64,
    /// Process to resume
    pub process: ProcessId,
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Event {}

impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Event {
    fn cmp(&self, other: &Self) -> Ordering {
        other.due.total_cmp(&self.due).then_with(|| other.seq.cmp(&self.seq))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BinaryHeap;

    fn event(due: f64, seq: u64) -> Event {
        Event { due, seq, process: ProcessId::from_index(seq as usize) }
    }

    #[test]
    fn test_earliest_due_pops_first() {
        let mut heap = BinaryHeap::new();
        heap.push(event(3.0, 0));
        heap.push(event(1.0, 1));
        heap.push(event(2.0, 2));

        let order: Vec<f64> = std::iter::from_fn(|| heap.pop()).map(|e| e.due).collect();
        assert_eq!(order, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_equal_due_breaks_by_insertion() {
        let mut heap = BinaryHeap::new();
        heap.push(event(1.0, 5));
        heap.push(event(1.0, 2));
        heap.push(event(1.0, 9));

        let order: Vec<u64> = std::iter::from_fn(|| heap.pop()).map(|e| e.seq).collect();
        assert_eq!(order, vec![2, 5, 9]);
    }
}
