//! Resource Pressure Monitor.
//!
//! Classifies system memory readings against tier-dependent thresholds and
//! plans which background tabs to evict. It never touches surfaces itself;
//! the controller carries out the mitigation the monitor asks for.

use std::time::Duration;

use sysinfo::System;
use tracing::debug;

use crate::types::memory::{MemoryInfo, MemoryTier, PressureLevel, KIB_PER_MIB};
use crate::types::surface::{SurfaceId, TabId};

/// Active-surface heap usage above which a reclaim hint is sent.
pub const HEAP_RECLAIM_THRESHOLD_BYTES: u64 = 1024 * 1024 * 1024;
/// How often the active surface is asked for its heap usage.
pub const HEAP_PROBE_INTERVAL: Duration = Duration::from_secs(10 * 60);

/// Sampling interval and free-memory thresholds for one memory tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PressureThresholds {
    pub interval: Duration,
    pub warning_kib: u64,
    pub emergency_kib: u64,
}

impl PressureThresholds {
    pub fn for_tier(tier: MemoryTier) -> Self {
        match tier {
            MemoryTier::Low => Self {
                interval: Duration::from_secs(2 * 60),
                warning_kib: 512 * KIB_PER_MIB,
                emergency_kib: 128 * KIB_PER_MIB,
            },
            MemoryTier::Standard => Self {
                interval: Duration::from_secs(10 * 60),
                warning_kib: 256 * KIB_PER_MIB,
                emergency_kib: 64 * KIB_PER_MIB,
            },
        }
    }
}

pub struct PressureMonitor {
    tier: MemoryTier,
    thresholds: PressureThresholds,
    last_level: PressureLevel,
}

impl PressureMonitor {
    pub fn new(tier: MemoryTier) -> Self {
        Self {
            tier,
            thresholds: PressureThresholds::for_tier(tier),
            last_level: PressureLevel::Normal,
        }
    }

    /// Builds a monitor for the machine described by `info`.
    pub fn for_memory(info: MemoryInfo) -> Self {
        Self::new(MemoryTier::from_total_kib(info.total_kib))
    }

    pub fn tier(&self) -> MemoryTier {
        self.tier
    }

    pub fn thresholds(&self) -> &PressureThresholds {
        &self.thresholds
    }

    pub fn interval(&self) -> Duration {
        self.thresholds.interval
    }

    pub fn last_level(&self) -> PressureLevel {
        self.last_level
    }

    /// Classifies a reading and remembers the result.
    pub fn evaluate(&mut self, info: MemoryInfo) -> PressureLevel {
        let level = if info.free_kib < self.thresholds.emergency_kib {
            PressureLevel::Emergency
        } else if info.free_kib < self.thresholds.warning_kib {
            PressureLevel::Warning
        } else {
            PressureLevel::Normal
        };
        if level != self.last_level {
            debug!(?level, free_kib = info.free_kib, "memory pressure level changed");
        }
        self.last_level = level;
        level
    }

    pub fn heap_exceeds_threshold(&self, used_bytes: u64) -> bool {
        used_bytes > HEAP_RECLAIM_THRESHOLD_BYTES
    }

    /// Tabs to force-close under emergency pressure: every tab except the active one.
    /// The primary surface is never a candidate.
    pub fn plan_eviction<I>(&self, tabs: I, active: SurfaceId) -> Vec<TabId>
    where
        I: IntoIterator<Item = TabId>,
    {
        let mut victims: Vec<TabId> = tabs
            .into_iter()
            .filter(|id| active != SurfaceId::Tab(*id))
            .collect();
        victims.sort();
        victims
    }
}

/// Reads total and available memory from the operating system.
pub fn sample_system_memory() -> MemoryInfo {
    let mut system = System::new();
    system.refresh_memory();
    MemoryInfo::new(system.total_memory() / 1024, system.available_memory() / 1024)
}
