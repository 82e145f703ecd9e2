use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Returns a rect of the given size centered on `self`.
    pub fn centered(&self, width: u32, height: u32) -> Rect {
        let dx = (i64::from(self.width) - i64::from(width)) / 2;
        let dy = (i64::from(self.height) - i64::from(height)) / 2;
        Rect {
            x: self.x + dx as i32,
            y: self.y + dy as i32,
            width,
            height,
        }
    }
}

/// Presentation mode of the root window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowMode {
    #[default]
    Normal,
    Maximized,
    Fullscreen,
}

/// Output of the geometry engine for one layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Bounds the window must be snapped to, if the mode requires it.
    pub window: Option<Rect>,
    /// Bounds of the active surface, relative to the window's content area.
    pub surface: Rect,
}
