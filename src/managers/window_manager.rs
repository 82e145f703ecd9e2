//! Window Manager: root window state and satellite window bookkeeping.
//!
//! Tracks the bounds and mode flags the host reports for the root window and
//! which satellite windows are open. Geometry is delegated to the geometry
//! engine; applying it to the host is the controller's job.

use std::collections::HashMap;

use crate::services::geometry_engine::{compute_bounds, CHROME_HEIGHT};
use crate::types::geometry::{Layout, Rect, WindowMode};
use crate::types::window::SatelliteKind;

pub const DEFAULT_WINDOW_WIDTH: u32 = 1280;
pub const DEFAULT_WINDOW_HEIGHT: u32 = 720;
pub const MIN_WINDOW_WIDTH: u32 = 800;
pub const MIN_WINDOW_HEIGHT: u32 = 600;

/// What opening a satellite requires from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SatelliteOpen {
    /// Already open; bring it to the front.
    Focus,
    /// Create it at these bounds.
    Create(Rect),
}

/// Trait defining the window manager interface.
pub trait WindowManagerTrait {
    fn bounds(&self) -> Rect;
    fn set_bounds(&mut self, bounds: Rect);
    fn mode(&self) -> WindowMode;
    fn set_maximized(&mut self, maximized: bool);
    fn set_fullscreen(&mut self, fullscreen: bool);
    fn layout(&mut self, work_area: Rect) -> Layout;
    fn open_satellite(&mut self, kind: SatelliteKind) -> SatelliteOpen;
    fn close_satellite(&mut self, kind: SatelliteKind) -> bool;
    fn is_satellite_open(&self, kind: SatelliteKind) -> bool;
    fn open_satellites(&self) -> Vec<SatelliteKind>;
}

pub struct WindowManager {
    bounds: Rect,
    maximized: bool,
    fullscreen: bool,
    minimized: bool,
    chrome_height: u32,
    satellites: HashMap<SatelliteKind, Rect>,
}

impl WindowManager {
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds: clamp_to_minimum(bounds),
            maximized: false,
            fullscreen: false,
            minimized: false,
            chrome_height: CHROME_HEIGHT,
            satellites: HashMap::new(),
        }
    }

    /// A default-sized window centered in `work_area`.
    pub fn centered_in(work_area: Rect) -> Self {
        Self::new(work_area.centered(DEFAULT_WINDOW_WIDTH, DEFAULT_WINDOW_HEIGHT))
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn is_maximized(&self) -> bool {
        self.maximized
    }

    pub fn is_minimized(&self) -> bool {
        self.minimized
    }

    pub fn set_minimized(&mut self, minimized: bool) {
        self.minimized = minimized;
    }

    pub fn chrome_height(&self) -> u32 {
        self.chrome_height
    }
}

fn clamp_to_minimum(bounds: Rect) -> Rect {
    Rect {
        width: bounds.width.max(MIN_WINDOW_WIDTH),
        height: bounds.height.max(MIN_WINDOW_HEIGHT),
        ..bounds
    }
}

impl WindowManagerTrait for WindowManager {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: Rect) {
        // Fullscreen bounds may be anything the display reports.
        self.bounds = if self.fullscreen {
            bounds
        } else {
            clamp_to_minimum(bounds)
        };
    }

    fn mode(&self) -> WindowMode {
        if self.fullscreen {
            WindowMode::Fullscreen
        } else if self.maximized {
            WindowMode::Maximized
        } else {
            WindowMode::Normal
        }
    }

    fn set_maximized(&mut self, maximized: bool) {
        self.maximized = maximized;
        if maximized {
            self.minimized = false;
        }
    }

    fn set_fullscreen(&mut self, fullscreen: bool) {
        self.fullscreen = fullscreen;
    }

    /// Computes the active surface layout and applies any window snap locally.
    fn layout(&mut self, work_area: Rect) -> Layout {
        let layout = compute_bounds(self.bounds, work_area, self.mode(), self.chrome_height);
        if let Some(snapped) = layout.window {
            self.bounds = snapped;
        }
        layout
    }

    fn open_satellite(&mut self, kind: SatelliteKind) -> SatelliteOpen {
        if self.satellites.contains_key(&kind) {
            return SatelliteOpen::Focus;
        }
        let (width, height) = kind.size();
        let bounds = self.bounds.centered(width, height);
        self.satellites.insert(kind, bounds);
        SatelliteOpen::Create(bounds)
    }

    fn close_satellite(&mut self, kind: SatelliteKind) -> bool {
        self.satellites.remove(&kind).is_some()
    }

    fn is_satellite_open(&self, kind: SatelliteKind) -> bool {
        self.satellites.contains_key(&kind)
    }

    fn open_satellites(&self) -> Vec<SatelliteKind> {
        [SatelliteKind::Settings, SatelliteKind::ExternalLinkPrompt]
            .into_iter()
            .filter(|k| self.satellites.contains_key(k))
            .collect()
    }
}
