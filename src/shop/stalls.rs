//! Bounded pool of specialist stalls

use serde::{Deserialize, Serialize};

/// Counts stalls in use against a fixed capacity
///
/// `0 <= in_use <= capacity` holds after every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StallPool {
    capacity: usize,
    in_use: usize,
}

impl StallPool {
    /// Create a pool with every stall free
    pub fn new(capacity: usize) -> Self {
        Self { capacity, in_use: 0 }
    }

    /// Total number of stalls
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Stalls currently occupied
    pub fn in_use(&self) -> usize {
        self.in_use
    }

    /// Whether every stall is occupied
    pub fn is_full(&self) -> bool {
        self.in_use >= self.capacity
    }

    /// Occupy one stall; `false` when none is free
    pub fn claim(&mut self) -> bool {
        if self.is_full() {
            return false;
        }
        self.in_use += 1;
        true
    }

    /// Free one stall; `false` when none was occupied
    pub fn release(&mut self) -> bool {
        if self.in_use == 0 {
            return false;
        }
        self.in_use -= 1;
        true
    }
}
