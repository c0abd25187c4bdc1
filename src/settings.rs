//! Simulation settings and preferences
//!
//! Persisted in LocalStorage. Grid contents are never saved.

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_CELL_SIZE, DEFAULT_SOUP_DENSITY, DEFAULT_TICK_MS, MAX_CELL_SIZE, MIN_CELL_SIZE,
    SOUP_DENSITY_STEP,
};
use crate::sim::{SimResult, grid_dimensions};

/// Step speed presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SpeedPreset {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl SpeedPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpeedPreset::Slow => "Slow",
            SpeedPreset::Normal => "Normal",
            SpeedPreset::Fast => "Fast",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "slow" => Some(SpeedPreset::Slow),
            "normal" | "norm" => Some(SpeedPreset::Normal),
            "fast" => Some(SpeedPreset::Fast),
            _ => None,
        }
    }

    /// Preset bound to a number key (`1` slow, `2` normal, `3` fast)
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "1" => Some(SpeedPreset::Slow),
            "2" => Some(SpeedPreset::Normal),
            "3" => Some(SpeedPreset::Fast),
            _ => None,
        }
    }

    /// Milliseconds between generations for this preset
    pub fn tick_interval_ms(&self) -> u32 {
        match self {
            SpeedPreset::Slow => 250,
            SpeedPreset::Normal => DEFAULT_TICK_MS,
            SpeedPreset::Fast => 33,
        }
    }
}

/// User settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Step speed preset
    pub speed: SpeedPreset,
    /// Cell edge length in canvas pixels
    pub cell_size: u32,
    /// Place the glider when the page loads
    pub seed_glider_on_start: bool,
    /// Live-cell probability for the random soup (0.0 - 1.0)
    pub soup_density: f32,

    // === Colors (linear RGBA) ===
    pub live_color: [f32; 4],
    pub dead_color: [f32; 4],

    // === Accessibility ===
    /// Swap to a high contrast palette
    pub high_contrast: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            speed: SpeedPreset::Normal,
            cell_size: DEFAULT_CELL_SIZE,
            seed_glider_on_start: true,
            soup_density: DEFAULT_SOUP_DENSITY,

            // Black cells on white, as drawn by the canvas page
            live_color: [0.0, 0.0, 0.0, 1.0],
            dead_color: [1.0, 1.0, 1.0, 1.0],

            high_contrast: false,
        }
    }
}

impl Settings {
    /// Create settings from a speed preset
    pub fn from_preset(preset: SpeedPreset) -> Self {
        Self {
            speed: preset,
            ..Self::default()
        }
    }

    /// Milliseconds between generations
    pub fn tick_interval_ms(&self) -> u32 {
        self.speed.tick_interval_ms()
    }

    /// Effective `(live, dead)` colors (respects high_contrast)
    pub fn palette(&self) -> ([f32; 4], [f32; 4]) {
        if self.high_contrast {
            ([1.0, 1.0, 0.0, 1.0], [0.0, 0.0, 0.0, 1.0])
        } else {
            (self.live_color, self.dead_color)
        }
    }

    /// Grid size for a canvas of `width` x `height` pixels
    pub fn grid_dimensions(&self, width: u32, height: u32) -> SimResult<(usize, usize)> {
        grid_dimensions(width, height, self.cell_size)
    }

    /// Soup density clamped to a valid probability
    pub fn soup_density(&self) -> f32 {
        if self.soup_density.is_nan() {
            DEFAULT_SOUP_DENSITY
        } else {
            self.soup_density.clamp(0.0, 1.0)
        }
    }

    /// Raise or lower the soup density by `steps` increments, staying in 0.0 - 1.0
    pub fn nudge_soup_density(&mut self, steps: i32) -> f32 {
        let density = self.soup_density() + steps as f32 * SOUP_DENSITY_STEP;
        // Snap to whole steps
        let snapped = (density / SOUP_DENSITY_STEP).round() * SOUP_DENSITY_STEP;
        self.soup_density = snapped.clamp(0.0, 1.0);
        self.soup_density
    }

    /// Grow (`grow = true`) or shrink the cell size by one pixel within
    /// `MIN_CELL_SIZE..=MAX_CELL_SIZE`. Returns true if it changed.
    pub fn step_cell_size(&mut self, grow: bool) -> bool {
        let current = self.cell_size.clamp(MIN_CELL_SIZE, MAX_CELL_SIZE);
        let next = if grow {
            (current + 1).min(MAX_CELL_SIZE)
        } else {
            current.saturating_sub(1).max(MIN_CELL_SIZE)
        };
        let changed = next != self.cell_size;
        self.cell_size = next;
        changed
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "life_canvas_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
