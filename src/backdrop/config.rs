//! Backdrop configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::BackdropError;

/// Configuration for one mounted backdrop instance.
///
/// All fields are read-only for the lifetime of a mount; changing any
/// of them requires a full detach and re-attach. There is no partial
/// reconfiguration path.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackdropConfig {
    /// Number of particles generated and drawn.
    pub particle_count: usize,
    /// Uniform scale applied to base positions in the shader.
    pub particle_spread: f32,
    /// Global time-scale multiplier for all animation.
    pub speed: f32,
    /// Palette of hex color strings; empty falls back to the default
    /// palette.
    pub particle_colors: Vec<String>,
    /// Drift particles away from the pointer.
    pub move_particles_on_hover: bool,
    /// Scales the pointer-offset magnitude.
    pub particle_hover_factor: f32,
    /// Translucent soft-edged sprites instead of hard opaque circles.
    pub alpha_particles: bool,
    /// Base point-sprite size in pixels.
    pub particle_base_size: f32,
    /// Per-particle size jitter magnitude; 0 disables jitter entirely.
    pub size_randomness: f32,
    /// Fixed camera distance along the view axis.
    pub camera_distance: f32,
    /// Disable all rigid-body rotation updates.
    pub disable_rotation: bool,
}

impl Default for BackdropConfig {
    fn default() -> Self {
        Self {
            particle_count: 270,
            particle_spread: 5.0,
            speed: 0.5,
            particle_colors: Vec::new(),
            move_particles_on_hover: true,
            particle_hover_factor: 1.0,
            alpha_particles: false,
            particle_base_size: 135.0,
            size_randomness: 17.0,
            camera_distance: 20.0,
            disable_rotation: false,
        }
    }
}

impl BackdropConfig {
    /// Load a configuration from a JSON file.
    ///
    /// Missing fields take their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, BackdropError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}
