use serde::{Deserialize, Serialize};

pub const KIB_PER_MIB: u64 = 1024;
pub const KIB_PER_GIB: u64 = 1024 * 1024;

/// A system memory reading, in KiB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryInfo {
    pub total_kib: u64,
    pub free_kib: u64,
}

impl MemoryInfo {
    pub const fn new(total_kib: u64, free_kib: u64) -> Self {
        Self { total_kib, free_kib }
    }
}

/// Coarse classification of the machine by installed RAM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemoryTier {
    /// 8 GiB or less.
    Low,
    Standard,
}

impl MemoryTier {
    pub fn from_total_kib(total_kib: u64) -> Self {
        if total_kib > 8 * KIB_PER_GIB {
            MemoryTier::Standard
        } else {
            MemoryTier::Low
        }
    }
}

/// Result of comparing free memory against the tier thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PressureLevel {
    Normal,
    Warning,
    Emergency,
}
