//! Projectiles, knives and power-up hats
//!
//! Plain value records with a constructor, a per-tick `update` and an expiry
//! predicate. The session owns every instance; nothing is referenced by
//! identity across ticks.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rng::RandomSource;
use crate::consts::*;
use crate::{circles_overlap, direction_or};

/// Cosmetic tint of a projectile, picked from its source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShotColor {
    Green,
    Yellow,
    Purple,
    Crimson,
    Orange,
}

impl ShotColor {
    /// Player bullet colour for the current level
    pub fn for_level(level: u32) -> Self {
        match level {
            1 => ShotColor::Green,
            2 => ShotColor::Yellow,
            _ => ShotColor::Purple,
        }
    }
}

/// A straight-flying round: player bullet, boss bullet or enemy bullet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    /// Direction already scaled by speed
    pub vel: Vec2,
    pub radius: f32,
    pub damage: u32,
    pub color: ShotColor,
}

impl Projectile {
    /// Player bullet aimed at `target`; flies straight up if the aim is degenerate
    pub fn player_shot(from: Vec2, target: Vec2, level: u32, damage: u32) -> Self {
        let speed = BULLET_BASE_SPEED + level as f32;
        Self {
            pos: from,
            vel: direction_or(from, target, Vec2::NEG_Y) * speed,
            radius: BULLET_RADIUS,
            damage,
            color: ShotColor::for_level(level),
        }
    }

    /// Boss bullet along `direction` (not renormalised, so spread shots fly faster)
    pub fn boss_shot(from: Vec2, direction: Vec2) -> Self {
        Self {
            pos: from,
            vel: direction * BOSS_BULLET_SPEED,
            radius: BOSS_BULLET_RADIUS,
            damage: BOSS_BULLET_DAMAGE,
            color: ShotColor::Crimson,
        }
    }

    /// Enemy bullet aimed at `target`; falls straight down if the aim is degenerate
    pub fn enemy_shot(from: Vec2, target: Vec2) -> Self {
        Self {
            pos: from,
            vel: direction_or(from, target, Vec2::Y) * ENEMY_BULLET_SPEED,
            radius: ENEMY_BULLET_RADIUS,
            damage: ENEMY_BULLET_DAMAGE,
            color: ShotColor::Orange,
        }
    }

    pub fn update(&mut self) {
        self.pos += self.vel;
    }

    /// Fully past any playfield edge
    pub fn is_off_field(&self) -> bool {
        self.pos.x < -self.radius
            || self.pos.x > FIELD_WIDTH + self.radius
            || self.pos.y < -self.radius
            || self.pos.y > FIELD_HEIGHT + self.radius
    }

    pub fn hits(&self, pos: Vec2, radius: f32) -> bool {
        circles_overlap(self.pos, self.radius, pos, radius)
    }
}

/// A thrown knife: short range, fixed heading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Knife {
    pub pos: Vec2,
    /// Heading in radians
    pub angle: f32,
    pub speed: f32,
    pub radius: f32,
    pub traveled: f32,
    pub max_distance: f32,
}

impl Knife {
    pub fn new(pos: Vec2, angle: f32) -> Self {
        Self {
            pos,
            angle,
            speed: KNIFE_SPEED,
            radius: KNIFE_RADIUS,
            traveled: 0.0,
            max_distance: KNIFE_MAX_DISTANCE,
        }
    }

    /// A full ring of knives around `origin`
    pub fn ring(origin: Vec2) -> impl Iterator<Item = Knife> {
        let step = 360.0 / KNIVES_PER_THROW as f32;
        (0..KNIVES_PER_THROW).map(move |i| Knife::new(origin, (i as f32 * step).to_radians()))
    }

    pub fn update(&mut self) {
        self.pos += Vec2::new(self.angle.cos(), self.angle.sin()) * self.speed;
        self.traveled += self.speed;
    }

    /// Out of range or well past the playfield
    pub fn is_spent(&self) -> bool {
        self.traveled >= self.max_distance
            || self.pos.x < -KNIFE_BOUNDS_MARGIN
            || self.pos.x > FIELD_WIDTH + KNIFE_BOUNDS_MARGIN
            || self.pos.y < -KNIFE_BOUNDS_MARGIN
            || self.pos.y > FIELD_HEIGHT + KNIFE_BOUNDS_MARGIN
    }

    pub fn hits(&self, pos: Vec2, radius: f32) -> bool {
        circles_overlap(self.pos, self.radius, pos, radius)
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Double bullet damage for a while
    DamageBoost,
    /// One ring of knives, thrown with the melee button
    Knives,
}

impl PowerUpKind {
    /// Coin flip between the two kinds
    pub fn random(rng: &mut (impl RandomSource + ?Sized)) -> Self {
        if rng.percent_below(50) {
            PowerUpKind::DamageBoost
        } else {
            PowerUpKind::Knives
        }
    }
}

/// A falling hat the player can pick up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub pos: Vec2,
    pub kind: PowerUpKind,
    pub speed: f32,
    pub radius: f32,
    pub ttl_ticks: u32,
}

impl PowerUp {
    pub fn new(pos: Vec2, kind: PowerUpKind) -> Self {
        Self {
            pos,
            kind,
            speed: POWER_UP_SPEED,
            radius: POWER_UP_RADIUS,
            ttl_ticks: POWER_UP_LIFETIME_TICKS,
        }
    }

    pub fn update(&mut self) {
        self.pos.y += self.speed;
        self.ttl_ticks = self.ttl_ticks.saturating_sub(1);
    }

    pub fn is_expired(&self) -> bool {
        self.ttl_ticks == 0 || self.pos.y > FIELD_HEIGHT
    }

    pub fn touches(&self, pos: Vec2, radius: f32) -> bool {
        circles_overlap(self.pos, self.radius, pos, radius)
    }
}
