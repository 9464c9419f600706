//! Identifier types for the shop simulator
//!
//! This module contains the handle type the scheduler hands out for every
//! process it owns, and the UUID-based identifier stamped on each batch report.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use uuid::Uuid;

/// Handle to a process owned by a scheduler
///
/// Handles are dense indices into the scheduler's process table. They are only
/// meaningful for the scheduler that issued them and are never reused within
/// one replication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProcessId(usize);

impl ProcessId {
    /// Create a handle from a raw process-table index
    pub fn from_index(index: usize) -> Self {
        Self(index)
    }

    /// Position of the process in its scheduler's table
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PROC_{}", self.0)
    }
}

impl Serialize for ProcessId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ProcessId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let raw = s.strip_prefix("PROC_").unwrap_or(&s);
        raw.parse::<usize>().map(ProcessId).map_err(serde::de::Error::custom)
    }
}

/// Unique identifier for one batch of replications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BatchId(pub Uuid);

impl BatchId {
    /// Create a new random batch ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BatchId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BATCH_{}", self.0.simple())
    }
}

impl Serialize for BatchId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("BATCH_{}", self.0.simple()))
    }
}

impl<'de> Deserialize<'de> for BatchId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        if let Some(uuid_str) = s.strip_prefix("BATCH_") {
            let uuid = Uuid::parse_str(uuid_str).map_err(serde::de::Error::custom)?;
            Ok(BatchId(uuid))
        } else {
            // Fallback: accept a raw UUID as well
            let uuid = Uuid::parse_str(&s).map_err(serde::de::Error::custom)?;
            Ok(BatchId(uuid))
        }
    }
}
