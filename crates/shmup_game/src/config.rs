//! Game tunables.
//!
//! Every field has a default matching the shipped game, so the JSON file is
//! optional and may override any subset of keys:
//!
//! ```json
//! { "ship_speed_pps": 400, "fire_rate_per_s": 5 }
//! ```

use serde::Deserialize;
use std::fs;
use std::path::Path;

use shmup_platform::PlatformConfig;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub window_title: String,
    pub screen_width: u32,
    pub screen_height: u32,
    pub ship_speed_pps: i32,
    pub fire_rate_per_s: f32,
    pub projectile_speed_pps: i32,
    pub max_projectiles: usize,
    pub sprite_scaling: i32,
    pub ticks_per_animation_frame: usize,
    pub ship_texture: String,
    pub projectile_texture: String,
    pub long_frame_warn_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window_title: "shmup".to_string(),
            screen_width: 800,
            screen_height: 600,
            ship_speed_pps: 320,
            fire_rate_per_s: 3.0,
            projectile_speed_pps: 640,
            max_projectiles: 1024,
            sprite_scaling: 2,
            ticks_per_animation_frame: 4,
            ship_texture: "data/ship.png".to_string(),
            projectile_texture: "data/laser-bolts.png".to_string(),
            long_frame_warn_ms: 250,
        }
    }
}

impl GameConfig {
    pub fn reload_interval_s(&self) -> f32 {
        1.0 / self.fire_rate_per_s
    }

    pub fn platform_config(&self) -> PlatformConfig {
        PlatformConfig {
            title: self.window_title.clone(),
            width: self.screen_width,
            height: self.screen_height,
            resizable: false,
        }
    }
}

pub fn load_config_from_path(path: &Path) -> Result<GameConfig, String> {
    let raw = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config file {}: {e}", path.display()))?;
    let config: GameConfig = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse config file {}: {e}", path.display()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Load `path` if it exists, otherwise fall back to the built-in defaults.
pub fn load_or_default(path: &Path) -> Result<GameConfig, String> {
    if path.exists() {
        let config = load_config_from_path(path)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    } else {
        log::info!(
            "No config file at {}, using built-in defaults",
            path.display()
        );
        Ok(GameConfig::default())
    }
}

fn validate_config(config: &GameConfig) -> Result<(), String> {
    if config.screen_width == 0 || config.screen_height == 0 {
        return Err("Config validation failed: screen size must be > 0".to_string());
    }
    if config.screen_width > i32::MAX as u32 || config.screen_height > i32::MAX as u32 {
        return Err("Config validation failed: screen size out of range".to_string());
    }
    if config.ship_speed_pps <= 0 {
        return Err("Config validation failed: ship_speed_pps must be > 0".to_string());
    }
    if config.projectile_speed_pps <= 0 {
        return Err("Config validation failed: projectile_speed_pps must be > 0".to_string());
    }
    if !(config.fire_rate_per_s.is_finite() && config.fire_rate_per_s > 0.0) {
        return Err("Config validation failed: fire_rate_per_s must be > 0".to_string());
    }
    if config.max_projectiles == 0 {
        return Err("Config validation failed: max_projectiles must be > 0".to_string());
    }
    if config.sprite_scaling <= 0 {
        return Err("Config validation failed: sprite_scaling must be > 0".to_string());
    }
    if config.ticks_per_animation_frame == 0 {
        return Err(
            "Config validation failed: ticks_per_animation_frame must be > 0".to_string(),
        );
    }
    if config.ship_texture.is_empty() || config.projectile_texture.is_empty() {
        return Err("Config validation failed: texture paths must not be empty".to_string());
    }
    Ok(())
}
