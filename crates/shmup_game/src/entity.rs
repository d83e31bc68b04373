//! Kinematic and animation record shared by the ship and its projectiles.
//!
//! Positions and velocities are integer pixels (velocity in pixels per second).
//! Each update integrates `velocity * dt` and truncates toward zero, so slow
//! objects on very short frames may not move at all that frame.

use glam::IVec2;
use shmup_core::FrameCycle;

use crate::atlas::SpriteRef;

/// On-screen destination rectangle, top-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entity {
    pub position: IVec2,
    pub velocity: IVec2,
    pub sprite: SpriteRef,
    pub scaling: i32,
    /// Derived from position, sprite size and scaling; rewritten every update.
    pub render_rect: RenderRect,
    pub animation: FrameCycle,
}

impl Entity {
    pub fn new(
        position: IVec2,
        velocity: IVec2,
        sprite: SpriteRef,
        scaling: i32,
        animation: FrameCycle,
    ) -> Self {
        Self {
            position,
            velocity,
            sprite,
            scaling,
            render_rect: RenderRect::default(),
            animation,
        }
    }

    /// Switch sprite and resize the render rect to match it.
    pub fn set_sprite(&mut self, sprite: SpriteRef) {
        self.sprite = sprite;
        let rect = sprite.rect();
        self.render_rect.w = rect.w as i32 * self.scaling;
        self.render_rect.h = rect.h as i32 * self.scaling;
    }

    /// Center the render rect on the current position.
    pub fn update_render_origin(&mut self) {
        self.render_rect.x = self.position.x - self.render_rect.w / 2;
        self.render_rect.y = self.position.y - self.render_rect.h / 2;
    }

    pub fn integrate(&mut self, dt: f32) {
        self.position.x += displacement(self.velocity.x, dt);
        self.position.y += displacement(self.velocity.y, dt);
    }

    pub fn integrate_y(&mut self, dt: f32) {
        self.position.y += displacement(self.velocity.y, dt);
    }
}

fn displacement(velocity: i32, dt: f32) -> i32 {
    (velocity as f32 * dt) as i32
}

/// The player ship: a plain entity plus its gun state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ship {
    pub body: Entity,
    pub is_firing: bool,
    pub reload_remaining_s: f32,
}

impl Ship {
    pub fn new(body: Entity) -> Self {
        Self {
            body,
            is_firing: false,
            reload_remaining_s: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atlas::{projectile_sprite, ShipSprite};

    fn sample_entity() -> Entity {
        Entity::new(
            IVec2::new(100, 200),
            IVec2::new(320, -640),
            SpriteRef::ship(ShipSprite::Stationary1),
            2,
            FrameCycle::new(2, 4),
        )
    }

    #[test]
    fn set_sprite_scales_render_size() {
        let mut entity = sample_entity();
        entity.set_sprite(SpriteRef::ship(ShipSprite::Stationary1));
        assert_eq!((entity.render_rect.w, entity.render_rect.h), (32, 48));
        entity.set_sprite(projectile_sprite(0));
        assert_eq!((entity.render_rect.w, entity.render_rect.h), (32, 64));
    }

    #[test]
    fn render_origin_is_centered_on_position() {
        let mut entity = sample_entity();
        entity.set_sprite(SpriteRef::ship(ShipSprite::Stationary1));
        entity.update_render_origin();
        assert_eq!(
            entity.render_rect,
            RenderRect {
                x: 84,
                y: 176,
                w: 32,
                h: 48
            }
        );
    }

    #[test]
    fn integrate_truncates_toward_zero() {
        let mut entity = sample_entity();
        entity.velocity = IVec2::new(-320, 320);
        // 320 * 0.001 = 0.32 on both axes, truncated to 0
        entity.integrate(0.001);
        assert_eq!(entity.position, IVec2::new(100, 200));

        // 320 * 0.01 = 3.2 -> 3, -3.2 -> -3
        entity.integrate(0.01);
        assert_eq!(entity.position, IVec2::new(97, 203));
    }

    #[test]
    fn integrate_y_leaves_x_untouched() {
        let mut entity = sample_entity();
        entity.integrate_y(0.5);
        assert_eq!(entity.position, IVec2::new(100, -120));
    }

    #[test]
    fn new_ship_is_idle() {
        let ship = Ship::new(sample_entity());
        assert!(!ship.is_firing);
        assert_eq!(ship.reload_remaining_s, 0.0);
    }
}
