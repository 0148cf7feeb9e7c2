//! Crazy Hatman - A single-player arcade shoot-'em-up
//!
//! Core modules:
//! - `sim`: Frame-tick simulation (entities, enemy AI, spawning, combat, session state)
//! - `tuning`: Data-driven game balance
//!
//! Rendering, windowing and raw input polling live outside this crate. The
//! host samples input into a [`sim::TickInput`], calls [`sim::tick`] once per
//! frame and draws from [`sim::GameSession::snapshot`].

pub mod sim;
pub mod tuning;

pub use tuning::{ContactDamage, Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Target frame rate of the host loop (one `tick` per frame)
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Playfield dimensions (y grows downward)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 20.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const PLAYER_MAX_HEALTH: u32 = 10;
    pub const PLAYER_LIVES: u32 = 1;
    /// Spawn offset from the bottom edge
    pub const PLAYER_START_OFFSET: f32 = 50.0;
    pub const INVINCIBILITY_TICKS: u32 = 90;
    pub const SHOOT_COOLDOWN_TICKS: u32 = 10;

    /// Damage buff from the damage power-up
    pub const DAMAGE_BOOST_MULTIPLIER: u32 = 2;
    pub const DAMAGE_BOOST_TICKS: u32 = 600;

    /// Player bullet: speed is `BULLET_BASE_SPEED + level`
    pub const BULLET_RADIUS: f32 = 8.0;
    pub const BULLET_BASE_SPEED: f32 = 7.0;
    pub const BULLET_BASE_DAMAGE: u32 = 3;

    pub const BOSS_BULLET_RADIUS: f32 = 8.0;
    pub const BOSS_BULLET_SPEED: f32 = 5.0;
    pub const BOSS_BULLET_DAMAGE: u32 = 2;

    pub const ENEMY_BULLET_RADIUS: f32 = 6.0;
    pub const ENEMY_BULLET_SPEED: f32 = 4.0;
    pub const ENEMY_BULLET_DAMAGE: u32 = 1;

    /// Knives (melee projectiles)
    pub const KNIFE_RADIUS: f32 = 5.0;
    pub const KNIFE_SPEED: f32 = 8.0;
    pub const KNIFE_MAX_DISTANCE: f32 = 200.0;
    pub const KNIFE_DAMAGE: u32 = 3;
    pub const KNIVES_PER_THROW: u32 = 10;
    /// How far past the edge a knife may fly before it is culled
    pub const KNIFE_BOUNDS_MARGIN: f32 = 20.0;

    /// Power-up hats
    pub const POWER_UP_RADIUS: f32 = 15.0;
    pub const POWER_UP_SPEED: f32 = 2.0;
    pub const POWER_UP_LIFETIME_TICKS: u32 = 300;
    pub const POWER_UP_DROP_Y: f32 = -50.0;
    pub const POWER_UP_DROP_MARGIN: i32 = 50;

    /// Enemy behaviour thresholds
    pub const SHOOTER_HALT_Y: f32 = 150.0;
    pub const SHOOTER_FIRE_INTERVAL: u32 = 90;
    pub const BOSS_HALT_Y: f32 = 100.0;
    pub const BOSS_SPAWN_Y: f32 = -100.0;
    pub const BOSS_INITIAL_COOLDOWN: u32 = 30;
    pub const BOSS_PHASE_TICKS: u32 = 180;
}

/// Unit vector from `from` toward `to`, or `fallback` when the points coincide
#[inline]
pub fn direction_or(from: Vec2, to: Vec2, fallback: Vec2) -> Vec2 {
    let delta = to - from;
    let distance = delta.length();
    if distance > 0.0 {
        delta / distance
    } else {
        fallback
    }
}

/// Unit vector for an angle given in degrees (0° = +x, 90° = +y / down)
#[inline]
pub fn unit_from_degrees(degrees: f32) -> Vec2 {
    let radians = degrees.to_radians();
    Vec2::new(radians.cos(), radians.sin())
}

/// Circle-circle overlap: strictly closer than the sum of radii
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    a.distance(b) < ra + rb
}
