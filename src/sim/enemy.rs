//! Enemy archetypes and their stat profiles

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rng::RandomSource;
use crate::consts::*;
use crate::{circles_overlap, direction_or};

/// Enemy kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Archetype {
    /// Plain grunt; `tier` picks the level-1/2/3 stat line
    Basic { tier: u8 },
    Elite,
    Boss,
    Shooter,
    Tank,
    Runner,
}

/// Spawn-time stats of an archetype
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyStats {
    pub radius: f32,
    pub speed: f32,
    pub health: i32,
    pub damage: u32,
    pub score: u64,
}

impl Archetype {
    pub fn stats(self) -> EnemyStats {
        let (radius, speed, health, damage, score) = match self {
            Archetype::Boss => (50.0, 1.0, 200, 3, 500),
            Archetype::Shooter => (18.0, 1.5, 15, 1, 25),
            Archetype::Tank => (35.0, 0.8, 50, 2, 40),
            Archetype::Runner => (12.0, 4.0, 10, 1, 15),
            Archetype::Elite => (30.0, 1.5, 25, 2, 50),
            Archetype::Basic { tier: 1 } => (15.0, 2.0, 15, 1, 10),
            Archetype::Basic { tier: 2 } => (20.0, 2.5, 20, 1, 20),
            Archetype::Basic { .. } => (25.0, 3.0, 25, 2, 30),
        };
        EnemyStats {
            radius,
            speed,
            health,
            damage,
            score,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Archetype::Basic { .. } => "basic",
            Archetype::Elite => "elite",
            Archetype::Boss => "boss",
            Archetype::Shooter => "shooter",
            Archetype::Tank => "tank",
            Archetype::Runner => "runner",
        }
    }
}

/// Boss attack phases, cycled on a fixed timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BossPhase {
    /// Full radial fan
    #[default]
    Wave,
    /// Rotating eight-way burst
    Spiral,
    /// Downward spread plus an offset fan
    TargetedFan,
}

impl BossPhase {
    pub fn index(self) -> u8 {
        match self {
            BossPhase::Wave => 0,
            BossPhase::Spiral => 1,
            BossPhase::TargetedFan => 2,
        }
    }

    pub fn next(self) -> Self {
        match self {
            BossPhase::Wave => BossPhase::Spiral,
            BossPhase::Spiral => BossPhase::TargetedFan,
            BossPhase::TargetedFan => BossPhase::Wave,
        }
    }

    /// Ticks to wait after a volley in this phase
    pub fn cooldown(self) -> u32 {
        match self {
            BossPhase::Wave => 40,
            BossPhase::Spiral => 20,
            BossPhase::TargetedFan => 50,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BossPhase::Wave => "WAVE ATTACK",
            BossPhase::Spiral => "SPIRAL ATTACK",
            BossPhase::TargetedFan => "TARGETED ATTACK",
        }
    }
}

/// Attack state carried only by the boss
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BossController {
    /// Reached its firing line and stopped descending
    pub anchored: bool,
    pub phase: BossPhase,
    /// Ticks spent in the current phase
    pub phase_ticks: u32,
    pub cooldown: u32,
}

impl Default for BossController {
    fn default() -> Self {
        Self {
            anchored: false,
            phase: BossPhase::Wave,
            phase_ticks: 0,
            cooldown: BOSS_INITIAL_COOLDOWN,
        }
    }
}

/// Per-kind behaviour state; the AI dispatches on this
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Brain {
    /// Chase the player every tick
    Homing,
    /// Descend to a firing line, then shoot at the player on an interval
    Turret { anchored: bool, cooldown: u32 },
    Boss(BossController),
}

impl Brain {
    fn for_archetype(archetype: Archetype) -> Self {
        match archetype {
            Archetype::Boss => Brain::Boss(BossController::default()),
            Archetype::Shooter => Brain::Turret {
                anchored: false,
                cooldown: SHOOTER_FIRE_INTERVAL,
            },
            _ => Brain::Homing,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub archetype: Archetype,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub speed: f32,
    pub health: i32,
    /// Contact damage
    pub damage: u32,
    pub score: u64,
    /// Level the enemy was spawned on
    pub level: u32,
    /// Ticks before this enemy may land another contact hit
    pub contact_cooldown: u32,
    pub brain: Brain,
}

impl Enemy {
    /// Build an enemy at `pos`, heading for the player's current position
    pub fn new(archetype: Archetype, level: u32, pos: Vec2, player_pos: Vec2) -> Self {
        let stats = archetype.stats();
        Self {
            archetype,
            pos,
            vel: direction_or(pos, player_pos, Vec2::Y) * stats.speed,
            radius: stats.radius,
            speed: stats.speed,
            health: stats.health,
            damage: stats.damage,
            score: stats.score,
            level,
            contact_cooldown: 0,
            brain: Brain::for_archetype(archetype),
        }
    }

    /// Build an enemy at its entry point above the playfield
    ///
    /// The boss enters top-centre; everything else at a random column.
    pub fn spawn(
        archetype: Archetype,
        level: u32,
        player_pos: Vec2,
        rng: &mut (impl RandomSource + ?Sized),
    ) -> Self {
        let pos = if archetype == Archetype::Boss {
            Vec2::new(FIELD_WIDTH / 2.0, BOSS_SPAWN_Y)
        } else {
            let radius = archetype.stats().radius;
            let x = rng.roll(radius as i32, (FIELD_WIDTH - radius) as i32);
            Vec2::new(x as f32, -radius)
        };
        Self::new(archetype, level, pos, player_pos)
    }

    pub fn is_boss(&self) -> bool {
        matches!(self.brain, Brain::Boss(_))
    }

    /// Apply damage; true when this killed the enemy
    pub fn take_damage(&mut self, damage: u32) -> bool {
        self.health -= damage as i32;
        self.health <= 0
    }

    /// Sank below the bottom edge
    pub fn is_off_field(&self) -> bool {
        self.pos.y > FIELD_HEIGHT + self.radius
    }

    pub fn touches(&self, pos: Vec2, radius: f32) -> bool {
        circles_overlap(self.pos, self.radius, pos, radius)
    }

    pub fn boss_controller(&self) -> Option<&BossController> {
        match &self.brain {
            Brain::Boss(controller) => Some(controller),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::SequenceSource;

    fn assert_stats(archetype: Archetype, expected: (f32, f32, i32, u32, u64)) {
        let enemy = Enemy::new(archetype, 1, Vec2::new(100.0, 0.0), Vec2::new(100.0, 500.0));
        assert_eq!(
            (enemy.radius, enemy.speed, enemy.health, enemy.damage, enemy.score),
            expected,
            "{}",
            archetype.name()
        );
        assert!(enemy.radius > 0.0);
    }

    #[test]
    fn test_stat_table() {
        assert_stats(Archetype::Boss, (50.0, 1.0, 200, 3, 500));
        assert_stats(Archetype::Shooter, (18.0, 1.5, 15, 1, 25));
        assert_stats(Archetype::Tank, (35.0, 0.8, 50, 2, 40));
        assert_stats(Archetype::Runner, (12.0, 4.0, 10, 1, 15));
        assert_stats(Archetype::Elite, (30.0, 1.5, 25, 2, 50));
        assert_stats(Archetype::Basic { tier: 1 }, (15.0, 2.0, 15, 1, 10));
        assert_stats(Archetype::Basic { tier: 2 }, (20.0, 2.5, 20, 1, 20));
        assert_stats(Archetype::Basic { tier: 3 }, (25.0, 3.0, 25, 2, 30));
    }

    #[test]
    fn test_initial_velocity_aims_at_player() {
        let enemy = Enemy::new(
            Archetype::Runner,
            1,
            Vec2::new(0.0, 0.0),
            Vec2::new(30.0, 40.0),
        );
        assert!((enemy.vel.x - 2.4).abs() < 1e-5);
        assert!((enemy.vel.y - 3.2).abs() < 1e-5);
    }

    #[test]
    fn test_degenerate_velocity_points_down() {
        let p = Vec2::new(200.0, 200.0);
        let enemy = Enemy::new(Archetype::Tank, 2, p, p);
        assert_eq!(enemy.vel, Vec2::new(0.0, 0.8));
    }

    #[test]
    fn test_spawn_positions() {
        let mut rng = SequenceSource::constant(0);
        let grunt = Enemy::spawn(Archetype::Basic { tier: 2 }, 2, Vec2::new(400.0, 550.0), &mut rng);
        assert_eq!(grunt.pos, Vec2::new(20.0, -20.0));

        let boss = Enemy::spawn(Archetype::Boss, 3, Vec2::new(400.0, 550.0), &mut rng);
        assert_eq!(boss.pos, Vec2::new(400.0, -100.0));
        assert!(boss.is_boss());
        assert_eq!(boss.boss_controller().map(|c| c.cooldown), Some(30));
    }

    #[test]
    fn test_brains_match_archetypes() {
        let at = Vec2::new(10.0, 10.0);
        let target = Vec2::new(10.0, 100.0);
        assert!(matches!(
            Enemy::new(Archetype::Shooter, 1, at, target).brain,
            Brain::Turret { anchored: false, cooldown: 90 }
        ));
        for archetype in [
            Archetype::Basic { tier: 1 },
            Archetype::Elite,
            Archetype::Tank,
            Archetype::Runner,
        ] {
            assert_eq!(Enemy::new(archetype, 1, at, target).brain, Brain::Homing);
        }
    }

    #[test]
    fn test_take_damage_reports_death() {
        let mut enemy = Enemy::new(Archetype::Runner, 1, Vec2::ZERO, Vec2::Y);
        assert!(!enemy.take_damage(9));
        assert!(enemy.take_damage(3));
        assert_eq!(enemy.health, -2);
    }

    #[test]
    fn test_boss_phase_cycle() {
        assert_eq!(BossPhase::Wave.next(), BossPhase::Spiral);
        assert_eq!(BossPhase::Spiral.next(), BossPhase::TargetedFan);
        assert_eq!(BossPhase::TargetedFan.next(), BossPhase::Wave);
        assert_eq!(BossPhase::TargetedFan.index(), 2);
    }
}
