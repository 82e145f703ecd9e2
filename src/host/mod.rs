//! The windowing and rendering runtime, as the controller sees it.
//!
//! Every method is a primitive the runtime already offers. The controller
//! composes them; hosts never call back into the controller directly but
//! deliver events through the embedding loop instead.

use std::time::Instant;

use crate::types::errors::HostError;
use crate::types::geometry::Rect;
use crate::types::memory::MemoryInfo;
use crate::types::settings::ThemeMode;
use crate::types::surface::{ClearScope, SurfaceId, SurfaceOptions};
use crate::types::window::{Notification, Satellite, SatelliteKind};

pub mod headless;

pub trait Host {
    // Environment.
    fn now(&self) -> Instant;
    fn memory_info(&self) -> MemoryInfo;
    fn prefers_dark(&self) -> bool;
    fn work_area(&self, window: Rect) -> Rect;

    // Root window.
    fn set_window_bounds(&mut self, bounds: Rect);
    fn set_window_background(&mut self, color: &str);
    fn set_theme_source(&mut self, theme: ThemeMode);
    fn minimize(&mut self);
    fn maximize(&mut self);
    fn unmaximize(&mut self);
    fn set_fullscreen(&mut self, fullscreen: bool);
    fn show(&mut self);
    fn focus_window(&mut self);
    fn close_window(&mut self);
    fn open_devtools(&mut self);

    // Surfaces.
    fn create_surface(&mut self, id: SurfaceId, options: &SurfaceOptions) -> Result<(), HostError>;
    /// Makes `id` the sole surface composited into the window.
    fn attach_surface(&mut self, id: SurfaceId);
    fn detach_surface(&mut self, id: SurfaceId);
    fn set_surface_bounds(&mut self, id: SurfaceId, bounds: Rect);
    /// Stops delivery of every event from `id`. Must precede `destroy_surface`.
    fn detach_observers(&mut self, id: SurfaceId);
    fn destroy_surface(&mut self, id: SurfaceId) -> Result<(), HostError>;
    fn load_url(&mut self, id: SurfaceId, url: &str) -> Result<(), HostError>;
    fn reload(&mut self, id: SurfaceId) -> Result<(), HostError>;
    fn set_zoom(&mut self, id: SurfaceId, factor: f64);
    fn set_frame_rate(&mut self, id: SurfaceId, fps: u32);
    fn set_audio_muted(&mut self, id: SurfaceId, muted: bool);
    fn focus_surface(&mut self, id: SurfaceId);
    /// Starts clearing browsing data; completion arrives as `DataCleared`.
    fn clear_data(&mut self, id: SurfaceId, scope: ClearScope);
    /// Asks the surface for its heap usage; the answer arrives as `HeapReport`.
    fn request_heap_report(&mut self, id: SurfaceId);
    fn reclaim_memory(&mut self, id: SurfaceId);
    fn collect_garbage(&mut self);

    // Satellites.
    fn open_satellite(&mut self, satellite: &Satellite) -> Result<(), HostError>;
    fn focus_satellite(&mut self, kind: SatelliteKind);
    fn close_satellite(&mut self, kind: SatelliteKind);
    fn set_satellite_background(&mut self, kind: SatelliteKind, color: &str);

    // Outside world.
    fn open_external(&mut self, url: &str) -> Result<(), HostError>;
    fn notify(&mut self, notification: Notification);
    fn relaunch(&mut self);
}
