//! Property-based tests for the recovery policy.
//!
//! No sequence of failures, timer firings and successful loads may push the
//! attempt counter past the ceiling, and a terminal surface only recovers
//! through a successful load or a reset.

use std::time::{Duration, Instant};

use anubis_shell::services::crash_recovery::{
    CrashRecovery, CrashRecoveryTrait, RecoveryDecision, MAX_RECOVERY_ATTEMPTS,
};
use anubis_shell::services::scheduler::{Task, TimerQueue};
use anubis_shell::types::surface::SurfaceId;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Event {
    Failure,
    TimerFired,
    Success,
    Reset,
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        4 => Just(Event::Failure),
        3 => Just(Event::TimerFired),
        1 => Just(Event::Success),
        1 => Just(Event::Reset),
    ]
}

proptest! {
    #[test]
    fn attempts_never_exceed_ceiling(events in proptest::collection::vec(arb_event(), 0..80)) {
        let id = SurfaceId::Primary;
        let mut monitor = CrashRecovery::default();
        let mut timers = TimerQueue::new();
        let mut now = Instant::now();
        monitor.track(id);

        for event in events {
            now += Duration::from_secs(1);
            match event {
                Event::Failure => {
                    let was_terminal = monitor.is_terminal(id);
                    let had_pending = monitor.has_pending(id);
                    match monitor.record_failure(id, now) {
                        RecoveryDecision::Retry { attempt, .. } => {
                            prop_assert!(!was_terminal && !had_pending);
                            prop_assert!(attempt <= MAX_RECOVERY_ATTEMPTS);
                            let timer = timers.schedule(now, Task::Recover(id));
                            monitor.arm(id, timer);
                        }
                        RecoveryDecision::Exhausted { attempts } => {
                            prop_assert_eq!(attempts, MAX_RECOVERY_ATTEMPTS);
                            prop_assert!(monitor.is_terminal(id));
                        }
                        RecoveryDecision::AlreadyPending => prop_assert!(had_pending),
                        RecoveryDecision::Terminal => prop_assert!(was_terminal),
                        RecoveryDecision::Untracked => prop_assert!(false, "surface is tracked"),
                    }
                }
                Event::TimerFired => {
                    for (timer, task) in timers.pop_due(now) {
                        if let Task::Recover(target) = task {
                            prop_assert!(monitor.take_pending(target, timer));
                        }
                    }
                }
                Event::Success => {
                    if let Some(timer) = monitor.record_success(id) {
                        prop_assert!(timers.cancel(timer));
                    }
                    prop_assert!(!monitor.is_terminal(id));
                    prop_assert!(!monitor.has_pending(id));
                }
                Event::Reset => {
                    if let Some(timer) = monitor.reset(id) {
                        prop_assert!(timers.cancel(timer));
                    }
                    prop_assert!(!monitor.has_pending(id));
                }
            }
            prop_assert!(monitor.state(id).unwrap().attempts <= MAX_RECOVERY_ATTEMPTS);
        }
    }
}
