//! Particle field generation.
//!
//! Produces the static per-particle data uploaded to the GPU once per
//! mount: positions inside the unit ball, per-particle random vectors
//! for shader-side desynchronization, and palette-sampled colors. All
//! visible motion comes from time-varying shader math and the scene
//! transform; the field itself is never mutated after generation.

mod palette;

pub use palette::{parse_hex_color, resolve_palette, DEFAULT_PALETTE};

use rand::Rng;

/// Static per-particle data for one mounted backdrop instance.
///
/// The three arrays are parallel: entry `i` of each describes particle
/// `i`. They are generated once and uploaded as instance-rate vertex
/// buffers.
#[derive(Debug, Clone)]
pub struct ParticleField {
    positions: Vec<[f32; 3]>,
    randoms: Vec<[f32; 4]>,
    colors: Vec<[f32; 3]>,
}

impl ParticleField {
    /// Generate a field of `count` particles.
    ///
    /// Positions are sampled uniformly over the volume of the unit ball:
    /// a direction is drawn by rejection sampling the unit cube (samples
    /// outside the ball or exactly at the origin are rejected, which
    /// removes the cube's corner bias), then the radius is assigned by a
    /// cube-root factor. A plain uniform radius would crowd samples
    /// toward the center.
    ///
    /// `palette` entries are pre-resolved RGB (see [`resolve_palette`]);
    /// an empty slice falls back to the built-in default palette.
    /// `count = 0` yields a valid empty field.
    pub fn generate<R: Rng + ?Sized>(count: usize, palette: &[[f32; 3]], rng: &mut R) -> Self {
        let fallback;
        let palette = if palette.is_empty() {
            fallback = resolve_palette(&[]);
            &fallback[..]
        } else {
            palette
        };

        let mut positions = Vec::with_capacity(count);
        let mut randoms = Vec::with_capacity(count);
        let mut colors = Vec::with_capacity(count);

        for _ in 0..count {
            let (x, y, z) = loop {
                let x = rng.gen::<f32>() * 2.0 - 1.0;
                let y = rng.gen::<f32>() * 2.0 - 1.0;
                let z = rng.gen::<f32>() * 2.0 - 1.0;
                let len_sq = x * x + y * y + z * z;
                if len_sq <= 1.0 && len_sq != 0.0 {
                    let inv_len = 1.0 / len_sq.sqrt();
                    break (x * inv_len, y * inv_len, z * inv_len);
                }
            };
            let r = loop {
                let u = rng.gen::<f32>();
                if u > 0.0 {
                    break u.cbrt();
                }
            };
            positions.push([x * r, y * r, z * r]);

            randoms.push([rng.gen(), rng.gen(), rng.gen(), rng.gen()]);

            let color = palette[rng.gen_range(0..palette.len())];
            colors.push(color);
        }

        Self {
            positions,
            randoms,
            colors,
        }
    }

    /// Number of particles in the field.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether the field is empty.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Particle positions inside the unit ball (arity 3).
    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    /// Per-particle random vectors in [0,1) (arity 4).
    pub fn randoms(&self) -> &[[f32; 4]] {
        &self.randoms
    }

    /// Per-particle RGB colors (arity 3).
    pub fn colors(&self) -> &[[f32; 3]] {
        &self.colors
    }
}
