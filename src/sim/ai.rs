//! Enemy movement and boss attack patterns
//!
//! One dispatch point per tick: homers re-aim at the player, turrets descend
//! to a firing line and shoot on an interval, and the boss descends then runs
//! its three-phase attack cycle.

use glam::Vec2;

use super::bounded::Bounded;
use super::enemy::{BossController, BossPhase, Brain, Enemy};
use super::entities::Projectile;
use crate::consts::*;
use crate::unit_from_degrees;

/// Where newly fired enemy rounds go
pub struct ShotSinks<'a> {
    pub boss_bullets: &'a mut Bounded<Projectile>,
    pub enemy_bullets: &'a mut Bounded<Projectile>,
}

/// Advance one enemy by a tick
pub fn update_enemy(enemy: &mut Enemy, player_pos: Vec2, sinks: &mut ShotSinks<'_>) {
    match &mut enemy.brain {
        Brain::Homing => {
            let delta = player_pos - enemy.pos;
            let distance = delta.length();
            // Keep the previous heading when sitting exactly on the player
            if distance > 0.0 {
                enemy.vel = delta / distance * enemy.speed;
            }
            enemy.pos += enemy.vel;
        }
        Brain::Turret { anchored, cooldown } => {
            if !*anchored && enemy.pos.y >= SHOOTER_HALT_Y {
                *anchored = true;
                enemy.vel.y = 0.0;
            }

            if *anchored {
                *cooldown = cooldown.saturating_sub(1);
                if *cooldown == 0 {
                    let shot = Projectile::enemy_shot(enemy.pos, player_pos);
                    if !sinks.enemy_bullets.push(shot) {
                        log::trace!("Enemy bullet dropped: collection full");
                    }
                    *cooldown = SHOOTER_FIRE_INTERVAL;
                }
            } else {
                enemy.pos += enemy.vel;
            }
        }
        Brain::Boss(controller) => {
            if !controller.anchored && enemy.pos.y >= BOSS_HALT_Y {
                controller.anchored = true;
                enemy.vel.y = 0.0;
                log::debug!("Boss anchored at y={}", enemy.pos.y);
            }

            if controller.anchored {
                boss_attack(controller, enemy.pos, sinks.boss_bullets);
            } else {
                enemy.pos += enemy.vel;
            }
        }
    }

    enemy.contact_cooldown = enemy.contact_cooldown.saturating_sub(1);
}

/// Run one tick of the boss's phase timer and fire when the cooldown lapses
fn boss_attack(controller: &mut BossController, origin: Vec2, bullets: &mut Bounded<Projectile>) {
    controller.phase_ticks += 1;
    if controller.phase_ticks >= BOSS_PHASE_TICKS {
        controller.phase = controller.phase.next();
        controller.phase_ticks = 0;
        log::debug!("Boss switches to {}", controller.phase.label());
    }

    controller.cooldown = controller.cooldown.saturating_sub(1);
    if controller.cooldown > 0 {
        return;
    }

    let mut dropped = 0usize;
    for direction in boss_volley(controller.phase, controller.phase_ticks) {
        if !bullets.push(Projectile::boss_shot(origin, direction)) {
            dropped += 1;
        }
    }
    if dropped > 0 {
        log::trace!("Boss volley dropped {dropped} bullets: collection full");
    }
    controller.cooldown = controller.phase.cooldown();
}

/// Directions of every bullet in one boss volley
///
/// `phase_ticks` rotates the spiral. Spread shots in the targeted phase are
/// deliberately not unit length.
pub fn boss_volley(phase: BossPhase, phase_ticks: u32) -> Vec<Vec2> {
    match phase {
        BossPhase::Wave => (0..12).map(|i| unit_from_degrees(i as f32 * 30.0)).collect(),
        BossPhase::Spiral => (0..8)
            .map(|i| unit_from_degrees(phase_ticks as f32 * 10.0 + i as f32 * 45.0))
            .collect(),
        BossPhase::TargetedFan => {
            let spread = (-1..=1).map(|i| Vec2::new(i as f32 * 0.2, 1.0));
            let fan = (0..8).map(|i| unit_from_degrees(i as f32 * 45.0 - 20.0));
            spread.chain(fan).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::enemy::Archetype;
    use proptest::prelude::*;

    struct Bullets {
        boss: Bounded<Projectile>,
        enemy: Bounded<Projectile>,
    }

    impl Bullets {
        fn new(capacity: usize) -> Self {
            Self {
                boss: Bounded::new(capacity),
                enemy: Bounded::new(capacity),
            }
        }

        fn step(&mut self, enemy: &mut Enemy, player: Vec2) {
            let mut sinks = ShotSinks {
                boss_bullets: &mut self.boss,
                enemy_bullets: &mut self.enemy,
            };
            update_enemy(enemy, player, &mut sinks);
        }
    }

    fn anchored_boss() -> Enemy {
        let mut boss = Enemy::new(
            Archetype::Boss,
            3,
            Vec2::new(400.0, BOSS_HALT_Y),
            Vec2::new(400.0, 550.0),
        );
        if let Brain::Boss(controller) = &mut boss.brain {
            controller.anchored = true;
        }
        boss
    }

    fn phase_of(enemy: &Enemy) -> BossPhase {
        enemy.boss_controller().map(|c| c.phase).unwrap_or_default()
    }

    #[test]
    fn test_homing_reaims_every_tick() {
        let mut bullets = Bullets::new(10);
        let mut enemy = Enemy::new(
            Archetype::Basic { tier: 1 },
            1,
            Vec2::new(100.0, 100.0),
            Vec2::new(100.0, 500.0),
        );
        bullets.step(&mut enemy, Vec2::new(500.0, 100.0));
        assert_eq!(enemy.vel, Vec2::new(2.0, 0.0));
        assert_eq!(enemy.pos, Vec2::new(102.0, 100.0));
    }

    #[test]
    fn test_shooter_halts_and_fires_on_interval() {
        let mut bullets = Bullets::new(10);
        let player = Vec2::new(400.0, 550.0);
        let mut shooter = Enemy::new(Archetype::Shooter, 1, Vec2::new(400.0, 148.0), player);

        bullets.step(&mut shooter, player);
        assert_eq!(shooter.pos.y, 149.5);
        bullets.step(&mut shooter, player);
        assert_eq!(shooter.pos.y, 151.0);

        // First anchored tick
        bullets.step(&mut shooter, player);
        let anchored_at = shooter.pos;
        assert!(matches!(shooter.brain, Brain::Turret { anchored: true, .. }));
        for _ in 0..88 {
            bullets.step(&mut shooter, player);
        }
        assert!(bullets.enemy.is_empty());
        bullets.step(&mut shooter, player);
        assert_eq!(bullets.enemy.len(), 1);
        assert_eq!(shooter.pos, anchored_at);
        assert_eq!(bullets.enemy[0].vel, Vec2::new(0.0, ENEMY_BULLET_SPEED));
    }

    #[test]
    fn test_boss_descends_then_anchors() {
        let mut bullets = Bullets::new(50);
        let player = Vec2::new(400.0, 550.0);
        let mut boss = Enemy::new(Archetype::Boss, 3, Vec2::new(400.0, BOSS_SPAWN_Y), player);
        for _ in 0..200 {
            bullets.step(&mut boss, player);
        }
        assert_eq!(boss.pos.y, BOSS_HALT_Y);
        for _ in 0..50 {
            bullets.step(&mut boss, player);
        }
        assert_eq!(boss.pos.y, BOSS_HALT_Y);
        assert!(boss.boss_controller().is_some_and(|c| c.anchored));
    }

    #[test]
    fn test_boss_first_volley_is_wave() {
        let mut bullets = Bullets::new(50);
        let player = Vec2::new(400.0, 550.0);
        let mut boss = anchored_boss();
        for _ in 0..29 {
            bullets.step(&mut boss, player);
        }
        assert!(bullets.boss.is_empty());
        bullets.step(&mut boss, player);
        assert_eq!(bullets.boss.len(), 12);
        assert_eq!(boss.boss_controller().map(|c| c.cooldown), Some(40));
    }

    #[test]
    fn test_boss_phase_cycles_every_180_ticks() {
        let mut bullets = Bullets::new(50);
        let player = Vec2::new(400.0, 550.0);
        let mut boss = anchored_boss();

        let expected = [BossPhase::Spiral, BossPhase::TargetedFan, BossPhase::Wave, BossPhase::Spiral];
        assert_eq!(phase_of(&boss), BossPhase::Wave);
        for phase in expected {
            for _ in 0..179 {
                bullets.step(&mut boss, player);
                bullets.boss.clear();
            }
            assert_ne!(phase_of(&boss), phase);
            bullets.step(&mut boss, player);
            bullets.boss.clear();
            assert_eq!(phase_of(&boss), phase);
        }
    }

    #[test]
    fn test_boss_volley_shapes() {
        assert_eq!(boss_volley(BossPhase::Wave, 0).len(), 12);
        assert_eq!(boss_volley(BossPhase::Spiral, 7).len(), 8);

        let targeted = boss_volley(BossPhase::TargetedFan, 0);
        assert_eq!(targeted.len(), 11);
        assert_eq!(targeted[0], Vec2::new(-0.2, 1.0));
        assert_eq!(targeted[1], Vec2::new(0.0, 1.0));
        let first_fan = unit_from_degrees(-20.0);
        assert!((targeted[3] - first_fan).length() < 1e-6);
    }

    #[test]
    fn test_spiral_rotates_with_phase_timer() {
        let a = boss_volley(BossPhase::Spiral, 0)[0];
        let b = boss_volley(BossPhase::Spiral, 1)[0];
        assert!((a - unit_from_degrees(0.0)).length() < 1e-6);
        assert!((b - unit_from_degrees(10.0)).length() < 1e-6);
    }

    #[test]
    fn test_full_collection_drops_shots_silently() {
        let mut bullets = Bullets::new(5);
        let player = Vec2::new(400.0, 550.0);
        let mut boss = anchored_boss();
        for _ in 0..30 {
            bullets.step(&mut boss, player);
        }
        assert_eq!(bullets.boss.len(), 5);
    }

    proptest! {
        #[test]
        fn prop_boss_phase_matches_elapsed_ticks(ticks in 0u32..2000) {
            let mut bullets = Bullets::new(50);
            let player = Vec2::new(400.0, 550.0);
            let mut boss = anchored_boss();
            for _ in 0..ticks {
                bullets.step(&mut boss, player);
                bullets.boss.clear();
            }
            let expected = ((ticks / BOSS_PHASE_TICKS) % 3) as u8;
            prop_assert_eq!(phase_of(&boss).index(), expected);
        }
    }
}
