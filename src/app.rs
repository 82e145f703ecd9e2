//! Process bootstrap for Anubis Shell.
//!
//! Loads the session configuration, samples system memory, derives the
//! launch switches for the configured performance tier and hands the
//! renderer its arguments before any surface exists.

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::services::launch_flags::{LaunchFlags, TargetOs, WEBVIEW_ARGS_ENV};
use crate::services::pressure_monitor::sample_system_memory;
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::types::memory::MemoryInfo;

/// Everything decided before the controller is built.
pub struct Bootstrap {
    pub settings: SettingsEngine,
    pub memory: MemoryInfo,
    pub launch_flags: LaunchFlags,
}

impl Bootstrap {
    /// Loads settings from `config_path` (or the platform default). A broken
    /// or missing file yields defaults.
    pub fn prepare(config_path: Option<String>) -> Self {
        Self::prepare_with(config_path, sample_system_memory(), TargetOs::current())
    }

    pub fn prepare_with(config_path: Option<String>, memory: MemoryInfo, os: TargetOs) -> Self {
        let mut settings = SettingsEngine::new(config_path);
        let config = settings.load_or_default();
        let launch_flags = LaunchFlags::for_tier(config.performance_mode, memory, os);
        info!(
            tier = config.performance_mode.as_str(),
            total_kib = memory.total_kib,
            switches = launch_flags.switches().len(),
            path = settings.get_config_path(),
            "bootstrap"
        );
        Self {
            settings,
            memory,
            launch_flags,
        }
    }

    /// Publishes the launch switches to the embedded renderer runtime.
    /// Must run before the first webview is created.
    pub fn export_launch_flags(&self) {
        std::env::set_var(WEBVIEW_ARGS_ENV, self.launch_flags.to_arg_string());
    }
}

/// Installs the stderr log subscriber, filtered by `RUST_LOG`.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}
