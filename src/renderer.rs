use crate::config::{EngineConfig, RayMarch};
use crate::framebuffer::Framebuffer;
use crate::player::Pose;
use crate::raycast::{HitResult, cast, cast_exact};
use crate::shading::{Shading, pack_rgb};
use crate::world::Grid;

pub const BACKGROUND: u32 = pack_rgb(0, 0, 0);
pub const MARKER: u32 = pack_rgb(255, 0, 0);

/// Angle of the ray for screen column `x`; column `width / 2` looks straight
/// along the heading.
#[inline]
pub fn ray_angle(heading: f32, x: usize, width: usize, fov: f32) -> f32 {
    heading - 0.5 * fov + (x as f32 / width as f32) * fov
}

#[inline]
pub fn cast_column(grid: &Grid, pose: &Pose, x: usize, cfg: &EngineConfig) -> HitResult {
    let angle = ray_angle(pose.heading, x, cfg.screen_width, cfg.fov);
    match cfg.march {
        RayMarch::FixedStep => cast(pose.pos, angle, grid, cfg.max_range, cfg.ray_step),
        RayMarch::Exact => cast_exact(pose.pos, angle, grid, cfg.max_range),
    }
}

pub fn render_frame(
    fb: &mut Framebuffer,
    grid: &Grid,
    pose: &Pose,
    shading: &Shading,
    cfg: &EngineConfig,
) {
    fb.clear(BACKGROUND);

    // Draw walls
    for x in 0..fb.width() {
        let hit = cast_column(grid, pose, x, cfg);
        shading.shade_column(fb, x, hit.distance, cfg.brightness_falloff, cfg.texture_scale);
    }

    // The camera follows the player, so the marker is always centred
    let size = cfg.marker_size;
    let mx = fb.width().saturating_sub(size) / 2;
    let my = fb.height().saturating_sub(size) / 2;
    fb.fill_disc(mx, my, size, MARKER);
}
