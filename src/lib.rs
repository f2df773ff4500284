//! Ghost of Kyiv - a vertical shoot-'em-up simulation core
//!
//! Core modules:
//! - `sim`: Per-tick simulation (entities, collisions, story sequencing)
//! - `media`: Audio/video collaborator traits and headless backends
//! - `view`: Read-only frame snapshot for a renderer
//! - `locale`: Localized UI text
//! - `settings`: Persisted player preferences

pub mod locale;
pub mod media;
pub mod settings;
pub mod sim;
pub mod view;

pub use locale::Language;
pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Simulation rate the screen timers are tuned for
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Logical screen size
    pub const SCREEN_WIDTH: f32 = 640.0;
    pub const SCREEN_HEIGHT: f32 = 480.0;

    /// Every entity collides as a square of this size anchored at its position
    pub const HITBOX_SIZE: f32 = 32.0;

    /// Horizontal offset from a sprite's left edge to where its shots spawn
    /// (half the 34px ship sprite minus half the 4px bullet sprite)
    pub const MUZZLE_OFFSET_X: f32 = 17.0 - 2.0;

    /// Player defaults
    pub const PLAYER_SPEED: f32 = 4.0;
    pub const PLAYER_SPAWN_X: f32 = SCREEN_WIDTH / 2.0;
    pub const PLAYER_SPAWN_Y: f32 = SCREEN_HEIGHT - 50.0;
    pub const MAX_LIVES: u8 = 3;

    /// Auto-fire: one bullet every this many frames
    pub const PLAYER_FIRE_INTERVAL: u64 = 20;
    pub const PLAYER_BULLET_SPEED: f32 = 5.0;

    /// Enemy spawn roll: 1 in ENEMY_SPAWN_ODDS per tick
    pub const ENEMY_SPAWN_ODDS: u32 = 100;
    /// Enemy fall speed is drawn from [MIN, MAX)
    pub const ENEMY_SPEED_MIN: f32 = 3.0;
    pub const ENEMY_SPEED_MAX: f32 = 4.0;
    /// Chance (out of 100) per tick that an enemy fires its single shot
    pub const ENEMY_SHOT_PERCENT: u32 = 2;
    pub const ENEMY_BULLET_SPEED: f32 = 1.0;

    /// Boss
    pub const BOSS_HEALTH: i32 = 10;
    pub const BOSS_SPAWN_X: f32 = SCREEN_WIDTH / 2.0;
    pub const BOSS_SPAWN_Y: f32 = 50.0;
    pub const BOSS_START_SPEED: f32 = 2.0;
    pub const BOSS_MAX_SPEED: f32 = 2.0;
    pub const BOSS_TURN_INTERVAL: u64 = 120; // new heading every 2 seconds
    pub const BOSS_SHOT_COOLDOWN: u32 = 60;
    pub const BOSS_BULLET_SPEED: f32 = 2.0;

    /// Power-up
    pub const POWER_UP_RESPAWN_TICKS: u32 = 30 * TICKS_PER_SECOND;
    pub const POWER_UP_FALL_SPEED: f32 = 1.0;

    /// Cosmetic background scroll per tick
    pub const BACKGROUND_SCROLL_SPEED: f32 = 2.0;

    /// Duration of the level banner, level-complete banner and video intro cap
    pub const SCREEN_TIMER_TICKS: u32 = 3 * TICKS_PER_SECOND;

    /// HUD buttons (top-right corner)
    pub const BUTTON_SIZE: f32 = 32.0;
    pub const PAUSE_BUTTON_X: f32 = SCREEN_WIDTH - 50.0;
    pub const MENU_BUTTON_X: f32 = SCREEN_WIDTH - 110.0;
    pub const BUTTON_Y: f32 = SCREEN_HEIGHT - 470.0;
}

/// Clamp a sprite position so its hitbox stays fully on screen
#[inline]
pub fn clamp_to_screen(pos: Vec2) -> Vec2 {
    use consts::*;
    Vec2::new(
        pos.x.clamp(0.0, SCREEN_WIDTH - HITBOX_SIZE),
        pos.y.clamp(0.0, SCREEN_HEIGHT - HITBOX_SIZE),
    )
}

#[cfg(test)]
mod tests {
    use super::consts::*;
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn clamp_keeps_onscreen_positions() {
        let pos = Vec2::new(100.0, 200.0);
        assert_eq!(clamp_to_screen(pos), pos);
    }

    #[test]
    fn clamp_pulls_back_corners() {
        assert_eq!(clamp_to_screen(Vec2::new(-5.0, -5.0)), Vec2::ZERO);
        assert_eq!(
            clamp_to_screen(Vec2::new(1000.0, 1000.0)),
            Vec2::new(SCREEN_WIDTH - HITBOX_SIZE, SCREEN_HEIGHT - HITBOX_SIZE)
        );
    }

    proptest! {
        #[test]
        fn clamped_position_is_within_bounds(x in -2000.0f32..2000.0, y in -2000.0f32..2000.0) {
            let p = clamp_to_screen(Vec2::new(x, y));
            prop_assert!(p.x >= 0.0 && p.x <= SCREEN_WIDTH - HITBOX_SIZE);
            prop_assert!(p.y >= 0.0 && p.y <= SCREEN_HEIGHT - HITBOX_SIZE);
        }
    }
}
