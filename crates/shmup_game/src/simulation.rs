//! Per-frame update step.
//!
//! Order within a frame matters and is fixed:
//!
//!   1. pick the ship sprite from its horizontal velocity and animation frame
//!   2. integrate position, clamp to the playfield, re-center the render rect
//!   3. advance the ship's animation counter
//!   4. fire-rate gate (may spawn a bolt at the muzzle)
//!   5. advance every bolt (newly spawned ones included), then prune the ones
//!      that left the top of the screen
//!
//! The step cannot fail: every input is already-validated process state.

use glam::IVec2;

use crate::atlas::{projectile_sprite, ShipPose};
use crate::entity::Entity;
use crate::state::GameState;

impl GameState {
    pub fn update(&mut self, dt: f32) {
        let screen = self.screen_size();
        let ship = &mut self.ship.body;

        let pose = ShipPose::from_velocity_x(ship.velocity.x);
        ship.set_sprite(pose.sprite(ship.animation.current_frame));

        ship.integrate(dt);
        ship.position.x = clamp_axis(ship.position.x, ship.render_rect.w, screen.x);
        ship.position.y = clamp_axis(ship.position.y, ship.render_rect.h, screen.y);
        ship.update_render_origin();

        ship.animation.tick();

        if self.ship.is_firing {
            if self.ship.reload_remaining_s <= 0.0 {
                self.spawn_projectile();
                self.ship.reload_remaining_s = self.config.reload_interval_s();
            } else {
                self.ship.reload_remaining_s -= dt;
            }
        }

        for projectile in self.projectiles.iter_mut() {
            projectile.sprite = projectile_sprite(projectile.animation.current_frame);
            projectile.integrate_y(dt);
            projectile.update_render_origin();
            projectile.animation.tick();
        }

        let removed = self.projectiles.retain_unordered(|p| p.position.y >= 0);
        if removed > 0 {
            log::trace!(
                "Pruned {} projectiles, {} live",
                removed,
                self.projectiles.len()
            );
        }
    }

    /// Spawn a bolt at the ship's muzzle. Returns `false` when the pool is full and
    /// the shot was dropped.
    pub fn spawn_projectile(&mut self) -> bool {
        if self.projectiles.is_full() {
            log::debug!(
                "Projectile pool full ({}), shot dropped",
                self.projectiles.capacity()
            );
            return false;
        }

        let ship = &self.ship.body;
        let position = IVec2::new(ship.position.x, ship.position.y + ship.render_rect.h / 2);
        let mut projectile = Entity::new(
            position,
            IVec2::new(0, -self.config.projectile_speed_pps),
            projectile_sprite(0),
            self.config.sprite_scaling,
            self.new_animation(),
        );
        projectile.set_sprite(projectile_sprite(0));
        projectile.update_render_origin();

        self.projectiles.try_push(projectile)
    }
}

/// Keep a sprite of `extent` pixels fully inside `[0, screen)` on one axis.
///
/// The upper bound is one pixel tighter than the lower one: anything at or past
/// `screen - extent/2` lands on `screen - extent/2 - 1`.
pub fn clamp_axis(value: i32, extent: i32, screen: i32) -> i32 {
    let min = extent / 2;
    let max = screen - extent / 2;
    if value < min {
        min
    } else if value >= max {
        max - 1
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atlas::{ShipSprite, SpriteRef};
    use crate::config::GameConfig;
    use crate::controller::handle_transition;
    use crate::entity::RenderRect;
    use shmup_core::{Key, KeyTransition};

    fn state() -> GameState {
        GameState::new(GameConfig::default())
    }

    fn press(state: &mut GameState, key: Key) {
        let speed = state.config.ship_speed_pps;
        handle_transition(&mut state.ship, KeyTransition::pressed(key), speed);
    }

    fn release(state: &mut GameState, key: Key) {
        let speed = state.config.ship_speed_pps;
        handle_transition(&mut state.ship, KeyTransition::released(key), speed);
    }

    #[test]
    fn clamp_axis_is_asymmetric() {
        // 32px sprite on an 800px axis: valid range is [16, 783].
        assert_eq!(clamp_axis(-50, 32, 800), 16);
        assert_eq!(clamp_axis(15, 32, 800), 16);
        assert_eq!(clamp_axis(16, 32, 800), 16);
        assert_eq!(clamp_axis(783, 32, 800), 783);
        assert_eq!(clamp_axis(784, 32, 800), 783);
        assert_eq!(clamp_axis(10_000, 32, 800), 783);
    }

    #[test]
    fn first_update_resolves_sprite_and_render_rect() {
        let mut state = state();
        state.update(0.0);
        let ship = &state.ship.body;
        assert_eq!(ship.sprite, SpriteRef::ship(ShipSprite::Stationary1));
        // 575 sits exactly on the lower clamp limit (600 - 48/2 - 1).
        assert_eq!(ship.position, IVec2::new(400, 575));
        assert_eq!(
            ship.render_rect,
            RenderRect {
                x: 384,
                y: 551,
                w: 32,
                h: 48
            }
        );
    }

    #[test]
    fn sprite_banks_with_horizontal_velocity() {
        let mut state = state();
        press(&mut state, Key::Left);
        state.update(0.0);
        assert_eq!(
            state.ship.body.sprite,
            SpriteRef::ship(ShipSprite::BankHardLeft1)
        );

        release(&mut state, Key::Left);
        press(&mut state, Key::Right);
        state.update(0.0);
        assert_eq!(
            state.ship.body.sprite,
            SpriteRef::ship(ShipSprite::BankHardRight1)
        );

        // Vertical motion alone keeps the stationary pose.
        release(&mut state, Key::Right);
        press(&mut state, Key::Up);
        state.update(0.0);
        assert_eq!(
            state.ship.body.sprite,
            SpriteRef::ship(ShipSprite::Stationary1)
        );
    }

    #[test]
    fn ship_sprite_follows_animation_frame() {
        let mut state = state();
        let mut frames = Vec::new();
        for _ in 0..9 {
            state.update(0.016);
            frames.push(state.ship.body.sprite);
        }
        let stationary_1 = SpriteRef::ship(ShipSprite::Stationary1);
        let stationary_2 = SpriteRef::ship(ShipSprite::Stationary2);
        // Sprite is picked before the tick, so it lags the counter by one update.
        assert_eq!(&frames[..4], &[stationary_1; 4]);
        assert_eq!(&frames[4..8], &[stationary_2; 4]);
        assert_eq!(frames[8], stationary_1);
    }

    #[test]
    fn movement_integrates_velocity() {
        let mut state = state();
        press(&mut state, Key::Left);
        press(&mut state, Key::Up);
        state.update(0.0);
        state.update(0.25);
        assert_eq!(state.ship.body.position, IVec2::new(320, 495));
    }

    #[test]
    fn ship_never_leaves_playfield() {
        let mut state = state();
        state.ship.body.velocity = IVec2::new(1_000_000, 1_000_000);
        for _ in 0..5 {
            state.update(0.5);
            let ship = &state.ship.body;
            assert_eq!(ship.position, IVec2::new(783, 575));
        }

        state.ship.body.velocity = IVec2::new(-1_000_000, -1_000_000);
        for _ in 0..5 {
            state.update(0.5);
            let ship = &state.ship.body;
            assert_eq!(ship.position, IVec2::new(16, 24));
            assert_eq!((ship.render_rect.x, ship.render_rect.y), (0, 0));
        }
    }

    #[test]
    fn ship_stays_in_bounds_under_mixed_input() {
        let mut state = state();
        let keys = [Key::Left, Key::Up, Key::Right, Key::Down];
        for step in 0..400usize {
            let key = keys[step % keys.len()];
            if step % 3 == 0 {
                press(&mut state, key);
            } else if step % 3 == 1 {
                release(&mut state, key);
            }
            state.update(0.05 + (step % 7) as f32 * 0.1);
            let ship = &state.ship.body;
            let (w, h) = (ship.render_rect.w, ship.render_rect.h);
            assert!(ship.position.x >= w / 2 && ship.position.x <= 800 - w / 2 - 1);
            assert!(ship.position.y >= h / 2 && ship.position.y <= 600 - h / 2 - 1);
        }
    }

    #[test]
    fn fire_scenario_respects_reload_interval() {
        let mut state = state();
        state.update(0.0);
        assert!(state.projectiles.is_empty());

        press(&mut state, Key::Space);
        state.update(0.0);
        assert_eq!(state.projectiles.len(), 1);
        let bolt = state.projectiles.as_slice()[0];
        let ship = state.ship.body;
        assert_eq!(
            bolt.position,
            IVec2::new(ship.position.x, ship.position.y + ship.render_rect.h / 2)
        );
        assert_eq!(bolt.velocity, IVec2::new(0, -640));
        assert!((state.ship.reload_remaining_s - 1.0 / 3.0).abs() < 1e-6);

        state.update(0.1);
        assert_eq!(state.projectiles.len(), 1);
        assert!((state.ship.reload_remaining_s - (1.0 / 3.0 - 0.1)).abs() < 1e-5);

        // 0.2333 -> 0.1333 -> 0.0333 -> -0.0667: still reloading on each of these.
        for _ in 0..3 {
            state.update(0.1);
            assert_eq!(state.projectiles.len(), 1);
        }
        assert!(state.ship.reload_remaining_s <= 0.0);

        state.update(0.1);
        assert_eq!(state.projectiles.len(), 2);
    }

    #[test]
    fn releasing_fire_rearms_immediately() {
        let mut state = state();
        press(&mut state, Key::Space);
        state.update(0.0);
        assert_eq!(state.projectiles.len(), 1);

        release(&mut state, Key::Space);
        press(&mut state, Key::Space);
        state.update(0.0);
        assert_eq!(state.projectiles.len(), 2);
    }

    #[test]
    fn reload_only_counts_down_while_firing() {
        let mut state = state();
        press(&mut state, Key::Space);
        state.update(0.0);
        let before = state.ship.reload_remaining_s;
        state.ship.is_firing = false;
        state.update(0.1);
        assert_eq!(state.ship.reload_remaining_s, before);
    }

    #[test]
    fn spawn_places_bolt_at_muzzle_with_fresh_animation() {
        let mut state = state();
        state.update(0.0);
        assert!(state.spawn_projectile());
        let bolt = state.projectiles.as_slice()[0];
        assert_eq!(bolt.position, IVec2::new(400, 599));
        assert_eq!(bolt.sprite, projectile_sprite(0));
        assert_eq!(
            bolt.render_rect,
            RenderRect {
                x: 384,
                y: 567,
                w: 32,
                h: 64
            }
        );
        assert_eq!(bolt.animation.current_frame, 0);
        assert_eq!(bolt.animation.tick_counter, 0);
        assert_eq!(bolt.animation.ticks_per_frame, 4);
        assert_eq!(bolt.animation.frame_count, 2);
    }

    #[test]
    fn spawn_at_capacity_is_a_no_op() {
        let mut state = GameState::new(GameConfig {
            max_projectiles: 4,
            ..GameConfig::default()
        });
        state.update(0.0);
        for _ in 0..4 {
            assert!(state.spawn_projectile());
        }
        assert!(!state.spawn_projectile());
        assert_eq!(state.projectiles.len(), 4);
    }

    #[test]
    fn sustained_fire_never_exceeds_capacity() {
        let mut state = GameState::new(GameConfig {
            max_projectiles: 8,
            fire_rate_per_s: 1000.0,
            ..GameConfig::default()
        });
        press(&mut state, Key::Space);
        for _ in 0..200 {
            // Zero delta: bolts never move, so nothing is pruned.
            state.update(0.0);
            assert!(state.projectiles.len() <= 8);
            state.ship.reload_remaining_s = 0.0;
        }
        assert_eq!(state.projectiles.len(), 8);
    }

    #[test]
    fn bolts_travel_straight_up_and_animate() {
        let mut state = state();
        state.update(0.0);
        state.spawn_projectile();
        state.update(0.1);
        let bolt = state.projectiles.as_slice()[0];
        assert_eq!(bolt.position, IVec2::new(400, 599 - 64));
        assert_eq!(bolt.render_rect.y, bolt.position.y - 32);
        assert_eq!(bolt.render_rect.x, 384);
        assert_eq!(bolt.animation.tick_counter, 1);

        for _ in 0..3 {
            state.update(0.0);
        }
        let bolt = state.projectiles.as_slice()[0];
        assert_eq!(bolt.animation.current_frame, 1);
        assert_eq!(bolt.sprite, projectile_sprite(0));
        state.update(0.0);
        assert_eq!(state.projectiles.as_slice()[0].sprite, projectile_sprite(1));
    }

    #[test]
    fn bolts_above_the_screen_are_pruned() {
        let mut state = state();
        state.update(0.0);
        for _ in 0..3 {
            state.spawn_projectile();
        }
        // 599 - 640 < 0 on the next one-second step.
        state.update(1.0);
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn pruning_removes_exactly_the_offscreen_bolts() {
        let mut state = state();
        state.update(0.0);
        for _ in 0..6 {
            state.spawn_projectile();
        }
        let ys = [-5, 100, -1, 200, -3, -2];
        for (bolt, y) in state.projectiles.iter_mut().zip(ys) {
            bolt.position.y = y;
        }
        state.update(0.0);
        let mut survivors: Vec<i32> = state.projectiles.iter().map(|b| b.position.y).collect();
        survivors.sort_unstable();
        assert_eq!(survivors, vec![100, 200]);
    }

    #[test]
    fn bolt_at_top_edge_survives_until_negative() {
        let mut state = state();
        state.update(0.0);
        state.spawn_projectile();
        for bolt in state.projectiles.iter_mut() {
            bolt.position.y = 0;
        }
        state.update(0.0);
        assert_eq!(state.projectiles.len(), 1);
        state.update(0.01);
        assert!(state.projectiles.is_empty());
    }
}
