use crate::constants::{
    GLOW_SIZE_FRACTION, GRID_SEGMENTS, HEATMAP_FADE_ALPHA, HEATMAP_SIZE, PLANE_SIZE,
    STRENGTH_CEILING, STRENGTH_DECAY_PER_FRAME,
};

/// Runtime configuration handed to `Session::new`.
#[derive(Clone, Debug, PartialEq)]
pub struct MeltParams {
    pub plane_size: f32,
    pub grid_segments: u32,
    pub heatmap_size: u32,
    pub fade_alpha: f32,
    pub glow_size_fraction: f32,
    pub strength_ceiling: f32,
    pub strength_decay: f32,
    /// Seed for the per-particle random attributes; `None` draws one.
    pub seed: Option<u64>,
}

impl Default for MeltParams {
    fn default() -> Self {
        Self {
            plane_size: PLANE_SIZE,
            grid_segments: GRID_SEGMENTS,
            heatmap_size: HEATMAP_SIZE,
            fade_alpha: HEATMAP_FADE_ALPHA,
            glow_size_fraction: GLOW_SIZE_FRACTION,
            strength_ceiling: STRENGTH_CEILING,
            strength_decay: STRENGTH_DECAY_PER_FRAME,
            seed: None,
        }
    }
}

impl MeltParams {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}
