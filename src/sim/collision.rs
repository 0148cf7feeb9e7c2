//! Collision detection and combat resolution
//!
//! Every test is circle-circle. The sweep runs in a fixed order each tick:
//! 1. player bullets vs enemies
//! 2. knives vs enemies
//! 3. boss bullets vs player
//! 4. enemy bullets vs player
//! 5. enemy bodies vs player
//! 6. power-ups vs player
//!
//! A boss kill ends the sweep immediately.

use super::enemy::Enemy;
use super::entities::Projectile;
use super::player::DamageOutcome;
use super::rng::RandomSource;
use super::spawn::maybe_drop_on_kill;
use super::state::{GameEvent, GameSession, HitSource, KillSource};
use crate::consts::KNIFE_DAMAGE;
use crate::tuning::ContactDamage;

/// How the sweep ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Keep simulating this tick
    Continue,
    /// The boss died; the session is now in `Victory`
    Victory,
}

/// Resolve all collisions for this tick
pub fn resolve_collisions<R: RandomSource + ?Sized>(
    session: &mut GameSession,
    rng: &mut R,
) -> Resolution {
    if bullets_vs_enemies(session, rng) == Resolution::Victory {
        return Resolution::Victory;
    }
    if knives_vs_enemies(session, rng) == Resolution::Victory {
        return Resolution::Victory;
    }
    projectiles_vs_player(session, HitSource::BossBullet);
    projectiles_vs_player(session, HitSource::EnemyBullet);
    contact_vs_player(session);
    power_ups_vs_player(session);
    Resolution::Continue
}

/// Each enemy consumes at most one bullet per tick
fn bullets_vs_enemies<R: RandomSource + ?Sized>(
    session: &mut GameSession,
    rng: &mut R,
) -> Resolution {
    let mut i = 0;
    while i < session.enemies.len() {
        let (pos, radius) = (session.enemies[i].pos, session.enemies[i].radius);
        let Some(hit) = session.bullets.iter().position(|b| b.hits(pos, radius)) else {
            i += 1;
            continue;
        };

        let bullet = session.bullets.remove(hit);
        if session.enemies[i].take_damage(bullet.damage) {
            let enemy = session.enemies.remove(i);
            if on_enemy_killed(session, enemy, KillSource::Bullet, rng) == Resolution::Victory {
                return Resolution::Victory;
            }
            // The next enemy shifted into slot i
            continue;
        }
        i += 1;
    }
    Resolution::Continue
}

/// Each knife hits at most one enemy and is consumed by it
fn knives_vs_enemies<R: RandomSource + ?Sized>(
    session: &mut GameSession,
    rng: &mut R,
) -> Resolution {
    let mut i = 0;
    while i < session.knives.len() {
        let knife = &session.knives[i];
        let Some(target) = session
            .enemies
            .iter()
            .position(|enemy| knife.hits(enemy.pos, enemy.radius))
        else {
            i += 1;
            continue;
        };

        session.knives.remove(i);
        if session.enemies[target].take_damage(KNIFE_DAMAGE) {
            let enemy = session.enemies.remove(target);
            if on_enemy_killed(session, enemy, KillSource::Knife, rng) == Resolution::Victory {
                return Resolution::Victory;
            }
        }
    }
    Resolution::Continue
}

fn on_enemy_killed<R: RandomSource + ?Sized>(
    session: &mut GameSession,
    enemy: Enemy,
    by: KillSource,
    rng: &mut R,
) -> Resolution {
    session.score += enemy.score;
    session.enemies_defeated += 1;
    session.emit(GameEvent::EnemyKilled {
        archetype: enemy.archetype,
        pos: enemy.pos,
        score: enemy.score,
        by,
    });

    if enemy.is_boss() && session.is_boss_level() {
        session.boss_defeated = true;
        log::info!("Boss defeated");
        session.emit(GameEvent::BossDefeated {
            score: session.score,
        });
        session.declare_victory();
        return Resolution::Victory;
    }

    let chance = match by {
        KillSource::Bullet => session.tuning.ranged_drop_chance,
        KillSource::Knife => session.tuning.melee_drop_chance,
    };
    maybe_drop_on_kill(session, enemy.pos, chance, rng);
    Resolution::Continue
}

/// Projectiles are consumed on contact even when invincibility blocks the damage
fn projectiles_vs_player(session: &mut GameSession, source: HitSource) {
    let (player_pos, player_radius) = (session.player.pos, session.player.radius);
    let mut hits: Vec<u32> = Vec::new();
    let collection = match source {
        HitSource::BossBullet => &mut session.boss_bullets,
        _ => &mut session.enemy_bullets,
    };
    collection.retain(|shot: &Projectile| {
        if shot.hits(player_pos, player_radius) {
            hits.push(shot.damage);
            false
        } else {
            true
        }
    });

    for damage in hits {
        damage_player(session, damage, source);
    }
}

fn contact_vs_player(session: &mut GameSession) {
    let policy = session.tuning.contact_damage;
    let (player_pos, player_radius) = (session.player.pos, session.player.radius);

    let mut hits: Vec<u32> = Vec::new();
    for enemy in session.enemies.iter_mut() {
        if !enemy.touches(player_pos, player_radius) {
            continue;
        }
        match policy {
            ContactDamage::EveryTick => hits.push(enemy.damage),
            ContactDamage::Cooldown { ticks } => {
                if enemy.contact_cooldown == 0 {
                    enemy.contact_cooldown = ticks;
                    hits.push(enemy.damage);
                }
            }
        }
    }

    for damage in hits {
        damage_player(session, damage, HitSource::Contact);
    }
}

fn power_ups_vs_player(session: &mut GameSession) {
    let (player_pos, player_radius) = (session.player.pos, session.player.radius);
    let mut i = 0;
    while i < session.power_ups.len() {
        if session.power_ups[i].touches(player_pos, player_radius) {
            let hat = session.power_ups.remove(i);
            session.player.apply_power_up(hat.kind);
            log::debug!("Collected {:?}", hat.kind);
            session.emit(GameEvent::PowerUpCollected { kind: hat.kind });
        } else {
            i += 1;
        }
    }
}

fn damage_player(session: &mut GameSession, damage: u32, source: HitSource) {
    let outcome = session.player.take_damage(damage);
    if outcome == DamageOutcome::Ignored {
        return;
    }
    session.emit(GameEvent::PlayerHit {
        damage,
        source,
        downed: outcome == DamageOutcome::Downed,
    });
}
