// Anubis Shell services
// Services hold the policies: geometry, recovery, memory pressure, navigation, launch flags, settings and theme.

pub mod config_binder;
pub mod crash_recovery;
pub mod geometry_engine;
pub mod launch_flags;
pub mod navigation_policy;
pub mod pressure_monitor;
pub mod scheduler;
pub mod settings_engine;
pub mod theme_engine;
