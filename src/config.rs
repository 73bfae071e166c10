/// Which ray traversal the renderer uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RayMarch {
    /// Fixed-increment march; distances are quantised to `ray_step`.
    FixedStep,
    /// Grid-line traversal with exact boundary distances.
    Exact,
}

/// Per-variant constants. Nothing here changes after startup.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EngineConfig {
    pub screen_width: usize,
    pub screen_height: usize,
    pub move_speed: f32,     // grid units per frame
    pub rotation_speed: f32, // radians per frame
    pub fov: f32,            // radians, horizontal
    pub ray_step: f32,
    pub max_range: f32,
    /// Brightness lost per unit of distance in flat shading.
    pub brightness_falloff: f32,
    /// Distance-to-texel factor for the horizontal texture coordinate.
    pub texture_scale: f32,
    pub marker_size: usize,
    pub march: RayMarch,
}

impl EngineConfig {
    /// Flat-shaded 1024x768 variant.
    pub const CLASSIC: Self = Self {
        screen_width: 1024,
        screen_height: 768,
        move_speed: 0.1,
        rotation_speed: 0.05,
        fov: 0.6,
        ray_step: 0.1,
        max_range: 50.0,
        brightness_falloff: 10.0,
        texture_scale: 10.0,
        marker_size: 2,
        march: RayMarch::FixedStep,
    };

    /// Texture-mapped 800x600 variant with a shorter range.
    pub const TEXTURED: Self = Self {
        screen_width: 800,
        screen_height: 600,
        max_range: 20.0,
        marker_size: 3,
        ..Self::CLASSIC
    };

    pub fn with_march(self, march: RayMarch) -> Self {
        Self { march, ..self }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::CLASSIC
    }
}
