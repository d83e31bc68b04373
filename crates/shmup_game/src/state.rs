use glam::IVec2;
use shmup_core::FrameCycle;

use crate::atlas::ShipPose;
use crate::config::GameConfig;
use crate::entity::{Entity, Ship};
use crate::projectiles::ProjectilePool;

/// Number of animation frames per sprite cycle, for both the ship and the bolts.
pub const ANIMATION_FRAMES: usize = 2;

/// Everything the simulation mutates. GPU resources live next to this in the
/// runtime, never inside it, so the whole game can run headless in tests.
pub struct GameState {
    pub config: GameConfig,
    pub ship: Ship,
    pub projectiles: ProjectilePool,
}

impl GameState {
    pub fn new(config: GameConfig) -> Self {
        let ship = spawn_ship(&config);
        let projectiles = ProjectilePool::with_capacity(config.max_projectiles);
        Self {
            config,
            ship,
            projectiles,
        }
    }

    pub fn screen_size(&self) -> IVec2 {
        IVec2::new(
            self.config.screen_width as i32,
            self.config.screen_height as i32,
        )
    }

    pub fn new_animation(&self) -> FrameCycle {
        FrameCycle::new(ANIMATION_FRAMES, self.config.ticks_per_animation_frame)
    }
}

/// Ship starts horizontally centered, resting on the bottom edge.
fn spawn_ship(config: &GameConfig) -> Ship {
    let sprite = ShipPose::Stationary.sprite(0);
    let half_height = sprite.rect().h as i32 * config.sprite_scaling / 2;
    let position = IVec2::new(
        config.screen_width as i32 / 2,
        config.screen_height as i32 - 1 - half_height,
    );
    Ship::new(Entity::new(
        position,
        IVec2::ZERO,
        sprite,
        config.sprite_scaling,
        FrameCycle::new(ANIMATION_FRAMES, config.ticks_per_animation_frame),
    ))
}
