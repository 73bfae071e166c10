//! First-person raycaster over a tile grid.
//!
//! One ray per screen column is marched through a [`Grid`] from the player's
//! [`Pose`]; the hit distance becomes a flat-shaded or textured wall strip in a
//! [`Framebuffer`]. Windowing and presentation live in the binary.

pub mod config;
pub mod engine;
pub mod framebuffer;
pub mod input;
pub mod player;
pub mod raycast;
pub mod renderer;
pub mod scaler;
pub mod shading;
pub mod world;

pub use config::{EngineConfig, RayMarch};
pub use engine::Engine;
pub use framebuffer::Framebuffer;
pub use input::{KeyState, LogicalKey};
pub use player::{Player, Pose};
pub use raycast::HitResult;
pub use shading::{Shading, Texture, TextureError, WallStrip};
pub use world::{Cell, Grid, GridError};
