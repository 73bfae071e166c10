use std::fmt;
use std::path::Path;

use crate::framebuffer::Framebuffer;

/// Distances are floored to this before projection.
pub const MIN_DISTANCE: f32 = 1e-3;

pub const WALL_BAND: u32 = pack_rgb(169, 169, 169);
pub const FLOOR_BAND: u32 = pack_rgb(128, 128, 128);

#[inline]
pub const fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    // BGRA8 in little-endian memory
    (b as u32) | ((g as u32) << 8) | ((r as u32) << 16)
    // Alpha at 0
}

/// Flat-shading brightness: `255 - distance * falloff`, clamped to `[0, 255]`.
#[inline]
pub fn wall_brightness(distance: f32, falloff: f32) -> u8 {
    (255.0 - distance * falloff).clamp(0.0, 255.0) as u8
}

/// Projected vertical extent of a wall in one screen column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WallStrip {
    /// First wall row, clamped to `[0, H]`.
    pub ceiling_y: usize,
    /// First floor row, clamped to `[0, H]`.
    pub floor_y: usize,
    /// Unclamped projected top; negative when the wall overflows the screen.
    pub top: i32,
    /// Unclamped projected height, at least 1.
    pub wall_height: i32,
}

impl WallStrip {
    pub fn project(distance: f32, screen_height: usize) -> Self {
        let h = screen_height as f32;
        let distance = distance.max(MIN_DISTANCE);
        let ceiling = (h * 0.5 - h / distance) as i32;
        let floor = screen_height as i32 - ceiling;

        let clamp = |v: i32| v.clamp(0, screen_height as i32) as usize;
        Self {
            ceiling_y: clamp(ceiling),
            floor_y: clamp(floor),
            top: ceiling,
            wall_height: (floor - ceiling).max(1),
        }
    }
}

#[derive(Debug)]
pub enum TextureError {
    Empty,
    SizeMismatch { expected: usize, found: usize },
    Image(image::ImageError),
}

impl fmt::Display for TextureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextureError::Empty => write!(f, "texture has zero width or height"),
            TextureError::SizeMismatch { expected, found } => {
                write!(f, "expected {expected} pixels, found {found}")
            }
            TextureError::Image(e) => write!(f, "failed to decode texture: {e}"),
        }
    }
}

impl std::error::Error for TextureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TextureError::Image(e) => Some(e),
            _ => None,
        }
    }
}

impl From<image::ImageError> for TextureError {
    fn from(e: image::ImageError) -> Self {
        TextureError::Image(e)
    }
}

/// Decoded wall image, row-major packed RGB.
#[derive(Clone, Debug)]
pub struct Texture {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
}

impl Texture {
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<u32>) -> Result<Self, TextureError> {
        if width == 0 || height == 0 {
            return Err(TextureError::Empty);
        }
        if pixels.len() != width * height {
            return Err(TextureError::SizeMismatch {
                expected: width * height,
                found: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Load and decode an image file. Alpha is dropped.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TextureError> {
        let rgba = image::open(path.as_ref())?.to_rgba8();
        let (width, height) = rgba.dimensions();
        let pixels = rgba
            .pixels()
            .map(|p| pack_rgb(p[0], p[1], p[2]))
            .collect();
        Self::from_pixels(width as usize, height as usize, pixels)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Coordinates are clamped to the image.
    #[inline]
    pub fn get_pixel(&self, x: usize, y: usize) -> u32 {
        let x = x.min(self.width - 1);
        let y = y.min(self.height - 1);
        self.pixels[y * self.width + x]
    }

    /// Horizontal texel for a column. Wraps with distance rather than wall offset.
    #[inline]
    pub fn column_for(&self, distance: f32, scale: f32) -> usize {
        ((distance * scale) as i64).rem_euclid(self.width as i64) as usize
    }

    /// Vertical texel for screen row `y` inside `strip`.
    #[inline]
    pub fn row_for(&self, strip: &WallStrip, y: usize) -> usize {
        let offset = (y as i64 - strip.top as i64).max(0);
        let ty = offset * self.height as i64 / strip.wall_height as i64;
        (ty as usize).min(self.height - 1)
    }
}

pub enum Shading {
    /// Distance-tinted ceiling band over fixed wall and floor bands.
    Flat,
    Textured(Texture),
}

impl Shading {
    /// Shade column `x` for a wall at `distance` and write it into `fb`.
    pub fn shade_column(
        &self,
        fb: &mut Framebuffer,
        x: usize,
        distance: f32,
        falloff: f32,
        texture_scale: f32,
    ) {
        let height = fb.height();
        let strip = WallStrip::project(distance, height);

        match self {
            Shading::Flat => {
                let b = wall_brightness(distance, falloff);
                fb.vline(x, 0, strip.ceiling_y, pack_rgb(b, b, b));
                fb.vline(x, strip.ceiling_y, strip.floor_y, WALL_BAND);
                fb.vline(x, strip.floor_y, height, FLOOR_BAND);
            }
            Shading::Textured(texture) => {
                let tx = texture.column_for(distance, texture_scale);
                for y in strip.ceiling_y..strip.floor_y {
                    let ty = texture.row_for(&strip, y);
                    fb.set_pixel(x, y, texture.get_pixel(tx, ty));
                }
            }
        }
    }
}
