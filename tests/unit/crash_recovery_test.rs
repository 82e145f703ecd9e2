use std::time::{Duration, Instant};

use anubis_shell::services::crash_recovery::{
    CrashRecovery, CrashRecoveryTrait, RecoveryDecision, RecoveryPolicy, MAX_RECOVERY_ATTEMPTS,
    RECOVERY_DELAY,
};
use anubis_shell::services::scheduler::{Task, TimerQueue};
use anubis_shell::types::surface::{LoadFailure, RenderExitReason, SurfaceId, TabId};
use rstest::rstest;

fn failure(code: i32, main_frame: bool) -> LoadFailure {
    LoadFailure {
        code,
        description: "net error".to_string(),
        url: "https://example.com/".to_string(),
        main_frame,
    }
}

#[rstest]
#[case(RenderExitReason::Crashed, true)]
#[case(RenderExitReason::Oom, true)]
#[case(RenderExitReason::CleanExit, false)]
#[case(RenderExitReason::Killed, false)]
#[case(RenderExitReason::AbnormalExit, false)]
#[case(RenderExitReason::LaunchFailed, false)]
#[case(RenderExitReason::IntegrityFailure, false)]
fn test_recoverable_exit_reasons(#[case] reason: RenderExitReason, #[case] expected: bool) {
    let monitor = CrashRecovery::default();
    assert_eq!(monitor.is_recoverable_exit(reason), expected);
}

#[rstest]
#[case(-2, true, false)]
#[case(-100, true, false)]
#[case(-101, true, true)]
#[case(-137, true, true)]
#[case(-137, false, false)]
fn test_recoverable_failures(#[case] code: i32, #[case] main_frame: bool, #[case] expected: bool) {
    let monitor = CrashRecovery::default();
    assert_eq!(monitor.is_recoverable_failure(&failure(code, main_frame)), expected);
}

#[test]
fn test_default_policy() {
    let policy = RecoveryPolicy::default();
    assert_eq!(policy.ceiling, 2);
    assert_eq!(policy.retry_delay, Duration::from_secs(3));
    assert_eq!(MAX_RECOVERY_ATTEMPTS, 2);
    assert_eq!(RECOVERY_DELAY, Duration::from_secs(3));
}

#[test]
fn test_surfaces_are_tracked_independently() {
    let mut monitor = CrashRecovery::default();
    let now = Instant::now();
    let tab = SurfaceId::Tab(TabId(1));
    monitor.track(SurfaceId::Primary);
    monitor.track(tab);

    monitor.record_failure(SurfaceId::Primary, now);
    monitor.record_failure(tab, now);

    assert_eq!(monitor.state(SurfaceId::Primary).unwrap().attempts, 1);
    assert_eq!(monitor.state(tab).unwrap().attempts, 1);
    assert_eq!(monitor.state(tab).unwrap().last_failure, Some(now));
}

#[test]
fn test_custom_ceiling() {
    let mut monitor = CrashRecovery::new(RecoveryPolicy {
        ceiling: 0,
        ..RecoveryPolicy::default()
    });
    monitor.track(SurfaceId::Primary);
    assert_eq!(
        monitor.record_failure(SurfaceId::Primary, Instant::now()),
        RecoveryDecision::Exhausted { attempts: 0 }
    );
}

#[test]
fn test_reset_clears_terminal_and_returns_pending() {
    let mut monitor = CrashRecovery::default();
    let mut timers = TimerQueue::new();
    let id = SurfaceId::Primary;
    let now = Instant::now();
    monitor.track(id);

    monitor.record_failure(id, now);
    let timer = timers.schedule(now + RECOVERY_DELAY, Task::Recover(id));
    monitor.arm(id, timer);

    assert_eq!(monitor.reset(id), Some(timer));
    assert!(!monitor.has_pending(id));
    assert_eq!(monitor.state(id).unwrap().attempts, 0);
    assert!(!monitor.is_terminal(id));
}

#[test]
fn test_forget_returns_pending_timer_and_untracks() {
    let mut monitor = CrashRecovery::default();
    let mut timers = TimerQueue::new();
    let now = Instant::now();
    let tab = SurfaceId::Tab(TabId(4));
    monitor.track(SurfaceId::Primary);
    monitor.track(tab);

    monitor.record_failure(tab, now);
    let timer = timers.schedule(now, Task::Recover(tab));
    monitor.arm(tab, timer);

    assert_eq!(monitor.forget(tab), Some(timer));
    assert_eq!(monitor.forget(SurfaceId::Primary), None);
    assert!(monitor.state(SurfaceId::Primary).is_none());
    assert_eq!(
        monitor.record_failure(tab, now),
        RecoveryDecision::Untracked
    );
}
