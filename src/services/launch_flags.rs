//! Launch flags: process-launch rendering switches derived from the
//! performance tier.
//!
//! These switches are read by the rendering runtime once, before the first
//! surface exists. That is why a tier change needs a relaunch.

use std::fmt;

use crate::types::memory::{MemoryInfo, KIB_PER_GIB, KIB_PER_MIB};
use crate::types::settings::PerformanceTier;

/// Upper bound of the GPU memory budget, in MiB.
pub const MAX_GPU_MEMORY_MIB: u64 = 8192;

/// Environment variable WebView2 reads extra browser arguments from.
pub const WEBVIEW_ARGS_ENV: &str = "WEBVIEW2_ADDITIONAL_BROWSER_ARGUMENTS";

/// Operating system families with their own switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetOs {
    Windows,
    MacOs,
    Linux,
}

impl TargetOs {
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            TargetOs::Windows
        } else if cfg!(target_os = "macos") {
            TargetOs::MacOs
        } else {
            TargetOs::Linux
        }
    }
}

/// One `--name[=value]` switch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Switch {
    pub name: &'static str,
    pub value: Option<String>,
}

impl Switch {
    fn flag(name: &'static str) -> Self {
        Self { name, value: None }
    }

    fn with(name: &'static str, value: impl ToString) -> Self {
        Self {
            name,
            value: Some(value.to_string()),
        }
    }
}

impl fmt::Display for Switch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(v) => write!(f, "--{}={}", self.name, v),
            None => write!(f, "--{}", self.name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchFlags {
    switches: Vec<Switch>,
}

/// GPU memory budget in MiB for a tier on a machine with `total_kib` of RAM.
pub fn gpu_memory_budget_mib(tier: PerformanceTier, total_kib: u64) -> u64 {
    match tier {
        PerformanceTier::Maximum => (total_kib / KIB_PER_MIB * 2 / 5).min(MAX_GPU_MEMORY_MIB),
        PerformanceTier::Balanced => 4096,
        PerformanceTier::Low => 2048,
    }
}

impl LaunchFlags {
    pub fn for_tier(tier: PerformanceTier, memory: MemoryInfo, os: TargetOs) -> Self {
        let mut switches = vec![
            Switch::flag("enable-accelerated-2d-canvas"),
            Switch::flag("enable-webgl"),
            Switch::flag("enable-webgl2"),
            Switch::with("force-color-profile", "srgb"),
            Switch::flag("disable-renderer-backgrounding"),
            Switch::flag("disable-backgrounding-occluded-windows"),
            Switch::flag("disable-background-media-suspend"),
        ];

        match tier {
            PerformanceTier::Maximum => {
                switches.push(Switch::flag("ignore-gpu-blocklist"));
                switches.push(Switch::flag("enable-unsafe-webgpu"));
                switches.push(Switch::flag("disable-gpu-watchdog"));
                switches.push(Switch::with("max-active-webgl-contexts", 64));
                switches.push(Switch::with("webgl-max-texture-size", 16384));
            }
            PerformanceTier::Balanced => {
                switches.push(Switch::flag("ignore-gpu-blocklist"));
                switches.push(Switch::with("max-active-webgl-contexts", 32));
            }
            PerformanceTier::Low => {
                switches.push(Switch::with("max-active-webgl-contexts", 16));
                switches.push(Switch::with("webgl-msaa-sample-count", 0));
            }
        }

        let budget = gpu_memory_budget_mib(tier, memory.total_kib);
        switches.push(Switch::with("force-gpu-mem-available-mb", budget));
        switches.push(Switch::with("force-gpu-mem-discardable-limit-mb", budget / 4));

        if memory.total_kib > 8 * KIB_PER_GIB {
            switches.push(Switch::flag("enable-gpu-rasterization"));
        } else {
            switches.push(Switch::flag("disable-gpu-vsync"));
            switches.push(Switch::flag("disable-background-timer-throttling"));
        }

        match os {
            TargetOs::Windows => {
                switches.push(Switch::with("use-angle", "d3d11"));
                switches.push(Switch::flag("enable-direct-composition"));
            }
            TargetOs::MacOs => switches.push(Switch::flag("enable-metal")),
            TargetOs::Linux => {}
        }

        switches.push(Switch::with("disable-blink-features", "AutomationControlled"));
        switches.push(Switch::with("max-unused-resource-memory-usage-percentage", 10));

        Self { switches }
    }

    pub fn switches(&self) -> &[Switch] {
        &self.switches
    }

    pub fn value_of(&self, name: &str) -> Option<&str> {
        self.switches
            .iter()
            .find(|s| s.name == name)
            .and_then(|s| s.value.as_deref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.switches.iter().any(|s| s.name == name)
    }

    /// Space-separated argument string for the webview runtime.
    pub fn to_arg_string(&self) -> String {
        self.switches
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
