//! Spawn director
//!
//! Decides when and what to spawn while a level is being played: a single
//! boss on the final level, timed weighted-random enemies everywhere else,
//! and power-up hats on their own independent timer.

use glam::Vec2;

use super::enemy::{Archetype, Enemy};
use super::entities::{PowerUp, PowerUpKind};
use super::rng::{ROLL_MAX, RandomSource};
use super::state::{GameEvent, GameSession};
use crate::consts::*;
use crate::tuning::Tuning;

/// Run the spawn timers for one tick of play
pub fn direct_spawns<R: RandomSource + ?Sized>(session: &mut GameSession, rng: &mut R) {
    if session.is_boss_level() {
        if !session.boss_spawned {
            spawn_boss(session, rng);
        }
    } else {
        session.timers.enemy_ticks += 1;
        if session.timers.enemy_ticks >= session.tuning.spawn_interval(session.level) {
            spawn_enemy(session, rng);
            session.timers.enemy_ticks = 0;
        }
    }

    session.timers.power_up_ticks += 1;
    if session.timers.power_up_ticks >= session.tuning.power_up_interval
        && rng.percent_below(session.tuning.power_up_chance)
    {
        let x = rng.roll(POWER_UP_DROP_MARGIN, FIELD_WIDTH as i32 - POWER_UP_DROP_MARGIN);
        spawn_power_up(session, Vec2::new(x as f32, POWER_UP_DROP_Y), rng);
        session.timers.power_up_ticks = 0;
    }
}

/// Pick the archetype for a regular spawn on `level`
pub fn choose_archetype<R: RandomSource + ?Sized>(
    tuning: &Tuning,
    level: u32,
    rng: &mut R,
) -> Option<Archetype> {
    let table = tuning.spawn_table(level)?;
    table.select(rng.roll(0, ROLL_MAX))
}

/// Spawn one weighted-random enemy; a no-op when the enemy collection is full
pub fn spawn_enemy<R: RandomSource + ?Sized>(session: &mut GameSession, rng: &mut R) {
    if session.enemies.is_full() {
        log::trace!("Enemy spawn skipped: collection full");
        return;
    }
    let Some(archetype) = choose_archetype(&session.tuning, session.level, rng) else {
        return;
    };
    let enemy = Enemy::spawn(archetype, session.level, session.player.pos, rng);
    log::debug!(
        "Spawned {} at ({:.0}, {:.0})",
        archetype.name(),
        enemy.pos.x,
        enemy.pos.y
    );
    session.enemies.push(enemy);
}

/// Spawn the final-level boss once
pub fn spawn_boss<R: RandomSource + ?Sized>(session: &mut GameSession, rng: &mut R) {
    if session.boss_spawned || session.enemies.is_full() {
        return;
    }
    let boss = Enemy::spawn(Archetype::Boss, session.level, session.player.pos, rng);
    session.enemies.push(boss);
    session.boss_spawned = true;
    log::info!("Boss spawned on level {}", session.level);
    session.emit(GameEvent::BossSpawned);
}

/// Drop a random hat at `pos`; a no-op when the power-up collection is full
pub fn spawn_power_up<R: RandomSource + ?Sized>(session: &mut GameSession, pos: Vec2, rng: &mut R) {
    if session.power_ups.is_full() {
        log::trace!("Power-up drop skipped: collection full");
        return;
    }
    let kind = PowerUpKind::random(rng);
    session.power_ups.push(PowerUp::new(pos, kind));
    log::debug!("Power-up {:?} dropped at ({:.0}, {:.0})", kind, pos.x, pos.y);
    session.emit(GameEvent::PowerUpDropped { kind, pos });
}

/// Roll for a drop where an enemy died
pub fn maybe_drop_on_kill<R: RandomSource + ?Sized>(
    session: &mut GameSession,
    pos: Vec2,
    chance: i32,
    rng: &mut R,
) {
    if rng.percent_below(chance) {
        spawn_power_up(session, pos, rng);
    }
}
