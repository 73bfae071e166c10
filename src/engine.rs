use crate::config::{EngineConfig, RayMarch};
use crate::framebuffer::Framebuffer;
use crate::input::{KeyState, LogicalKey};
use crate::player::{Player, Pose};
use crate::renderer::render_frame;
use crate::shading::{Shading, Texture};
use crate::world::Grid;

/// Everything one frame needs. The platform layer feeds key events in with
/// [`Engine::set_key_state`] and calls [`Engine::on_frame`] once per
/// presentation cycle.
pub struct Engine {
    config: EngineConfig,
    grid: Grid,
    player: Player,
    keys: KeyState,
    shading: Shading,
    framebuffer: Framebuffer,
}

impl Engine {
    pub fn new(config: EngineConfig, grid: Grid, shading: Shading) -> Self {
        let player = Player::new(Pose::default(), config.move_speed, config.rotation_speed);
        Self {
            framebuffer: Framebuffer::new(config.screen_width, config.screen_height),
            config,
            grid,
            player,
            keys: KeyState::default(),
            shading,
        }
    }

    /// Flat-shaded engine on the demo level.
    pub fn classic() -> Self {
        Self::new(EngineConfig::CLASSIC, Grid::demo_level(), Shading::Flat)
    }

    /// Texture-mapped engine in the open room.
    pub fn textured(texture: Texture) -> Self {
        Self::new(
            EngineConfig::TEXTURED,
            Grid::open_room(),
            Shading::Textured(texture),
        )
    }

    pub fn set_ray_march(&mut self, march: RayMarch) {
        self.config = self.config.with_march(march);
    }

    pub fn set_key_state(&mut self, key: LogicalKey, down: bool) {
        self.keys.set(key, down);
    }

    /// Drop all held keys, e.g. when the window loses focus.
    pub fn release_keys(&mut self) {
        self.keys.release_all();
    }

    /// Advance the player by one frame of input, then redraw the whole view.
    pub fn on_frame(&mut self) -> &Framebuffer {
        self.player.update(&self.keys, &self.grid);
        render_frame(
            &mut self.framebuffer,
            &self.grid,
            &self.player.pose(),
            &self.shading,
            &self.config,
        );
        &self.framebuffer
    }

    #[inline]
    pub fn pose(&self) -> Pose {
        self.player.pose()
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[inline]
    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }
}
