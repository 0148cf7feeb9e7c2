//! The hat-wearing player character

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entities::PowerUpKind;
use crate::consts::*;

/// Held movement keys for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movement {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

/// What a damage event did to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Blocked by invincibility
    Ignored,
    /// Health dropped, player still standing
    Hurt,
    /// Health hit zero and a life was lost
    Downed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
    /// Always within `0..=PLAYER_MAX_HEALTH`
    pub health: u32,
    pub lives: u32,
    pub invincible: bool,
    pub invincible_ticks: u32,
    pub damage_multiplier: u32,
    /// Ticks left on the damage boost
    pub boost_ticks: u32,
    /// Holding a knife charge (mutually exclusive with the damage boost)
    pub has_knives: bool,
    pub shoot_cooldown: u32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT - PLAYER_START_OFFSET),
            radius: PLAYER_RADIUS,
            speed: PLAYER_SPEED,
            health: PLAYER_MAX_HEALTH,
            lives: PLAYER_LIVES,
            invincible: false,
            invincible_ticks: 0,
            damage_multiplier: 1,
            boost_ticks: 0,
            has_knives: false,
            shoot_cooldown: 0,
        }
    }
}

impl Player {
    pub fn new() -> Self {
        Self::default()
    }

    /// Step toward held directions, refusing to leave the playfield
    pub fn apply_movement(&mut self, movement: Movement) {
        if movement.left && self.pos.x - self.radius > 0.0 {
            self.pos.x -= self.speed;
        }
        if movement.right && self.pos.x + self.radius < FIELD_WIDTH {
            self.pos.x += self.speed;
        }
        if movement.up && self.pos.y - self.radius > 0.0 {
            self.pos.y -= self.speed;
        }
        if movement.down && self.pos.y + self.radius < FIELD_HEIGHT {
            self.pos.y += self.speed;
        }
    }

    /// Count down invincibility, damage boost and shoot cooldown
    pub fn update(&mut self) {
        if self.invincible {
            self.invincible_ticks = self.invincible_ticks.saturating_sub(1);
            if self.invincible_ticks == 0 {
                self.invincible = false;
            }
        }

        if self.damage_multiplier > 1 {
            self.boost_ticks = self.boost_ticks.saturating_sub(1);
            if self.boost_ticks == 0 {
                self.damage_multiplier = 1;
            }
        }

        self.shoot_cooldown = self.shoot_cooldown.saturating_sub(1);
    }

    pub fn take_damage(&mut self, damage: u32) -> DamageOutcome {
        if self.invincible {
            return DamageOutcome::Ignored;
        }

        self.health = self.health.saturating_sub(damage);
        self.invincible = true;
        self.invincible_ticks = INVINCIBILITY_TICKS;

        if self.health == 0 {
            self.lives = self.lives.saturating_sub(1);
            self.damage_multiplier = 1;
            self.boost_ticks = 0;
            self.has_knives = false;
            DamageOutcome::Downed
        } else {
            DamageOutcome::Hurt
        }
    }

    pub fn apply_power_up(&mut self, kind: PowerUpKind) {
        match kind {
            PowerUpKind::DamageBoost => {
                self.damage_multiplier = DAMAGE_BOOST_MULTIPLIER;
                self.boost_ticks = DAMAGE_BOOST_TICKS;
                self.has_knives = false;
            }
            PowerUpKind::Knives => {
                self.has_knives = true;
                self.damage_multiplier = 1;
                self.boost_ticks = 0;
            }
        }
    }

    pub fn is_alive(&self) -> bool {
        self.lives > 0 && self.health > 0
    }

    pub fn can_shoot(&self) -> bool {
        self.shoot_cooldown == 0
    }

    /// Damage carried by a freshly fired bullet
    pub fn bullet_damage(&self) -> u32 {
        BULLET_BASE_DAMAGE * self.damage_multiplier
    }
}
