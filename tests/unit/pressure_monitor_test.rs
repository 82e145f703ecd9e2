use std::time::Duration;

use anubis_shell::services::pressure_monitor::{
    PressureMonitor, PressureThresholds, HEAP_PROBE_INTERVAL, HEAP_RECLAIM_THRESHOLD_BYTES,
};
use anubis_shell::types::memory::{MemoryInfo, MemoryTier, PressureLevel, KIB_PER_GIB, KIB_PER_MIB};
use anubis_shell::types::surface::{SurfaceId, TabId};
use rstest::rstest;

const EIGHT_GIB: u64 = 8 * KIB_PER_GIB;
const SIXTEEN_GIB: u64 = 16 * KIB_PER_GIB;

#[test]
fn test_monitor_picks_tier_from_total_memory() {
    let low = PressureMonitor::for_memory(MemoryInfo::new(EIGHT_GIB, EIGHT_GIB / 2));
    assert_eq!(low.tier(), MemoryTier::Low);
    assert_eq!(low.interval(), Duration::from_secs(2 * 60));

    let standard = PressureMonitor::for_memory(MemoryInfo::new(SIXTEEN_GIB, EIGHT_GIB));
    assert_eq!(standard.tier(), MemoryTier::Standard);
    assert_eq!(standard.interval(), Duration::from_secs(10 * 60));
}

#[test]
fn test_standard_tier_thresholds() {
    let t = PressureThresholds::for_tier(MemoryTier::Standard);
    assert_eq!(t.warning_kib, 256 * KIB_PER_MIB);
    assert_eq!(t.emergency_kib, 64 * KIB_PER_MIB);
}

#[rstest]
#[case(MemoryTier::Low, 600, PressureLevel::Normal)]
#[case(MemoryTier::Low, 512, PressureLevel::Normal)]
#[case(MemoryTier::Low, 511, PressureLevel::Warning)]
#[case(MemoryTier::Low, 128, PressureLevel::Warning)]
#[case(MemoryTier::Low, 127, PressureLevel::Emergency)]
#[case(MemoryTier::Standard, 300, PressureLevel::Normal)]
#[case(MemoryTier::Standard, 200, PressureLevel::Warning)]
#[case(MemoryTier::Standard, 64, PressureLevel::Warning)]
#[case(MemoryTier::Standard, 10, PressureLevel::Emergency)]
fn test_classification(#[case] tier: MemoryTier, #[case] free_mib: u64, #[case] expected: PressureLevel) {
    let mut monitor = PressureMonitor::new(tier);
    let level = monitor.evaluate(MemoryInfo::new(SIXTEEN_GIB, free_mib * KIB_PER_MIB));
    assert_eq!(level, expected);
}

#[test]
fn test_level_recovers_to_normal() {
    let mut monitor = PressureMonitor::new(MemoryTier::Standard);
    monitor.evaluate(MemoryInfo::new(SIXTEEN_GIB, 0));
    assert_eq!(monitor.last_level(), PressureLevel::Emergency);
    monitor.evaluate(MemoryInfo::new(SIXTEEN_GIB, 4 * KIB_PER_GIB));
    assert_eq!(monitor.last_level(), PressureLevel::Normal);
}

#[test]
fn test_eviction_plan_is_sorted_and_spares_active() {
    let monitor = PressureMonitor::new(MemoryTier::Standard);
    let victims = monitor.plan_eviction(
        vec![TabId(5), TabId(2), TabId(9)],
        SurfaceId::Tab(TabId(9)),
    );
    assert_eq!(victims, vec![TabId(2), TabId(5)]);
}

#[test]
fn test_eviction_with_no_tabs() {
    let monitor = PressureMonitor::new(MemoryTier::Low);
    assert!(monitor.plan_eviction(Vec::new(), SurfaceId::Primary).is_empty());
}

#[test]
fn test_heap_constants() {
    assert_eq!(HEAP_RECLAIM_THRESHOLD_BYTES, 1 << 30);
    assert_eq!(HEAP_PROBE_INTERVAL, Duration::from_secs(600));
}
