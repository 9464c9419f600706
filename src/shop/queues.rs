//! Named FIFO queues of process handles
//!
//! Queues only track membership. They never own the processes they hold, and
//! every change in length is reported to a [`TimeWeightedQueueStats`].

use crate::statistics::TimeWeightedQueueStats;
use crate::types::ProcessId;
use std::collections::VecDeque;
use tracing::trace;

/// FIFO sequence of process handles with time-weighted length statistics
#[derive(Debug, Clone)]
pub struct ProcessQueue {
    name: &'static str,
    members: VecDeque<ProcessId>,
    stats: TimeWeightedQueueStats,
}

impl ProcessQueue {
    /// Create an empty queue whose statistics start at `start`
    pub fn new(name: &'static str, start: f64) -> Self {
        Self { name, members: VecDeque::new(), stats: TimeWeightedQueueStats::new(start) }
    }

    /// Append `process` at the tail
    ///
    /// Returns `false`, leaving the queue untouched, when the process is
    /// already a member.
    pub fn push_back(&mut self, now: f64, process: ProcessId) -> bool {
        if self.members.contains(&process) {
            trace!(queue = self.name, %process, time = now, "duplicate insert ignored");
            return false;
        }
        self.members.push_back(process);
        self.stats.update(now, self.members.len());
        true
    }

    /// Remove and return the head
    pub fn pop_front(&mut self, now: f64) -> Option<ProcessId> {
        let head = self.members.pop_front()?;
        self.stats.update(now, self.members.len());
        Some(head)
    }

    /// Remove `process` wherever it stands; `false` if it was not a member
    pub fn remove(&mut self, now: f64, process: ProcessId) -> bool {
        match self.members.iter().position(|p| *p == process) {
            Some(position) => {
                self.members.remove(position);
                self.stats.update(now, self.members.len());
                true
            }
            None => false,
        }
    }

    /// Whether `process` is a member
    pub fn contains(&self, process: ProcessId) -> bool {
        self.members.contains(&process)
    }

    /// Current length
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Length statistics
    pub fn stats(&self) -> &TimeWeightedQueueStats {
        &self.stats
    }
}

/// The queueing structures of one shop replication
#[derive(Debug, Clone)]
pub struct ShopQueues {
    /// Mechanics waiting for work
    pub idle_mechanics: ProcessQueue,
    /// Specialists waiting for work
    pub idle_specialists: ProcessQueue,
    /// Customers waiting for a mechanic (the waiting room)
    pub waiting_for_mechanic: ProcessQueue,
    /// Referred customers waiting for a specialist
    pub waiting_for_specialist: ProcessQueue,
    /// Every customer that has arrived and not yet left
    pub in_system: ProcessQueue,
}

impl ShopQueues {
    /// Create empty queues whose statistics start at `start`
    pub fn new(start: f64) -> Self {
        Self {
            idle_mechanics: ProcessQueue::new("idle_mechanics", start),
            idle_specialists: ProcessQueue::new("idle_specialists", start),
            waiting_for_mechanic: ProcessQueue::new("waiting_for_mechanic", start),
            waiting_for_specialist: ProcessQueue::new("waiting_for_specialist", start),
            in_system: ProcessQueue::new("in_system", start),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pid(i: usize) -> ProcessId {
        ProcessId::from_index(i)
    }

    #[test]
    fn test_fifo_order() {
        let mut queue = ProcessQueue::new("q", 0.0);
        queue.push_back(0.0, pid(3));
        queue.push_back(0.5, pid(1));
        queue.push_back(1.0, pid(2));

        assert_eq!(queue.pop_front(1.0), Some(pid(3)));
        assert_eq!(queue.pop_front(1.0), Some(pid(1)));
        assert_eq!(queue.pop_front(1.0), Some(pid(2)));
        assert_eq!(queue.pop_front(1.0), None);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_duplicate_insert_is_ignored() {
        let mut queue = ProcessQueue::new("q", 0.0);
        assert!(queue.push_back(0.0, pid(1)));
        assert!(!queue.push_back(0.0, pid(1)));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_remove_from_middle() {
        let mut queue = ProcessQueue::new("q", 0.0);
        for i in 0..4 {
            queue.push_back(0.0, pid(i));
        }
        assert!(queue.remove(1.0, pid(2)));
        assert!(!queue.remove(1.0, pid(2)));
        assert!(!queue.contains(pid(2)));
        assert_eq!(queue.len(), 3);
    }

    #[test]
    fn test_length_changes_feed_statistics() {
        let mut queue = ProcessQueue::new("q", 0.0);
        queue.push_back(0.0, pid(0));
        queue.push_back(1.0, pid(1));
        queue.pop_front(2.0);
        queue.pop_front(3.0);
        // 1 for an hour, 2 for an hour, 1 for an hour, then empty
        assert!((queue.stats().average_length(4.0) - 1.0).abs() < 1e-12);
        assert_eq!(queue.stats().max_length(), 2);
    }
}
