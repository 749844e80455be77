use std::fmt;

use glam::Vec3;

/// Amount a single control panel step changes a background channel by.
pub const COLOR_STEP: f32 = 0.05;

/// One channel of the background color, editable from the control panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorChannel {
    Red,
    Green,
    Blue,
}

impl fmt::Display for ColorChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ColorChannel::Red => "clear color (red)",
            ColorChannel::Green => "clear color (green)",
            ColorChannel::Blue => "clear color (blue)",
        })
    }
}

/// Window and rendering settings of the viewer.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub title: String,
    /// Initial window size in pixels.
    pub size: (u32, u32),
    /// Smallest window edge accepted on resize.
    pub min_size: u32,
    pub fps_limit: u32,
    pub antialiasing_level: u32,
    /// Clear color, RGB in `0.0..=1.0`.
    pub background: Vec3,
    /// World distance from the origin mapped to the edge of the drawing area.
    pub world_extent: f32,
    /// Pixels kept free between the drawing area and the window border.
    pub margin: f32,
    pub font_path: String,
    pub screenshot_path: String,
    /// Offscreen size used for screenshots.
    pub screenshot_size: (u32, u32),
}

impl Default for ViewerConfig {
    fn default() -> Self {
        ViewerConfig {
            title: "Hypocycloid".to_owned(),
            size: (1024, 1024),
            min_size: 300,
            fps_limit: 60,
            antialiasing_level: 8,
            background: Vec3::new(0.45, 0.55, 0.60),
            world_extent: 10.0,
            margin: 50.0,
            font_path: "font.ttf".to_owned(),
            screenshot_path: "frame.png".to_owned(),
            screenshot_size: (1024, 1024),
        }
    }
}

impl ViewerConfig {
    /// Radius in pixels of the drawing area inside a window of `size`.
    pub fn radius(&self, size: (u32, u32)) -> f32 {
        (size.0.min(size.1) as f32 / 2.0 - self.margin).max(1.0)
    }

    pub fn background_channel(&self, channel: ColorChannel) -> f32 {
        match channel {
            ColorChannel::Red => self.background.x,
            ColorChannel::Green => self.background.y,
            ColorChannel::Blue => self.background.z,
        }
    }

    /// Moves one background channel by `steps` increments, staying in
    /// `0.0..=1.0`.
    pub fn nudge_background(&mut self, channel: ColorChannel, steps: i32) {
        let value = self.background_channel(channel) + COLOR_STEP * steps as f32;
        let value = value.clamp(0.0, 1.0);
        match channel {
            ColorChannel::Red => self.background.x = value,
            ColorChannel::Green => self.background.y = value,
            ColorChannel::Blue => self.background.z = value,
        }
    }

    /// Maps a world point to pixel coordinates, y pointing down.
    pub fn world_to_screen(&self, point: (f32, f32), size: (u32, u32)) -> (f32, f32) {
        let scale = self.radius(size) / self.world_extent;
        (
            point.0 * scale + size.0 as f32 / 2.0,
            -point.1 * scale + size.1 as f32 / 2.0,
        )
    }
}
