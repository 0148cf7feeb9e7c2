//! Read-only view of a session for drawing
//!
//! Everything a renderer needs without knowing any game rules. Borrowed from
//! the session, so it is cheap to build every frame.

use serde::Serialize;

use super::enemy::{BossPhase, Enemy};
use super::entities::{Knife, PowerUp, Projectile};
use super::player::Player;
use super::state::{GameEvent, GamePhase, GameSession, MenuHover};

/// HUD data for the living boss
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BossStatus {
    pub health: i32,
    pub max_health: i32,
    pub phase: BossPhase,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CollectionCounts {
    pub bullets: usize,
    pub boss_bullets: usize,
    pub enemy_bullets: usize,
    pub enemies: usize,
    pub power_ups: usize,
    pub knives: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct RenderSnapshot<'a> {
    pub phase: GamePhase,
    pub level: u32,
    pub max_level: u32,
    pub score: u64,
    pub enemies_defeated: u32,
    pub enemies_to_defeat: u32,
    pub boss_spawned: bool,
    pub boss: Option<BossStatus>,
    /// Whether the menu should offer Continue
    pub run_active: bool,
    pub time_ticks: u64,
    pub menu: MenuHover,
    pub player: &'a Player,
    pub bullets: &'a [Projectile],
    pub boss_bullets: &'a [Projectile],
    pub enemy_bullets: &'a [Projectile],
    pub enemies: &'a [Enemy],
    pub power_ups: &'a [PowerUp],
    pub knives: &'a [Knife],
    pub counts: CollectionCounts,
    pub events: &'a [GameEvent],
}

impl GameSession {
    pub fn snapshot(&self) -> RenderSnapshot<'_> {
        let boss = self.boss().and_then(|enemy| {
            let controller = enemy.boss_controller()?;
            Some(BossStatus {
                health: enemy.health,
                max_health: enemy.archetype.stats().health,
                phase: controller.phase,
                label: controller.phase.label(),
            })
        });

        RenderSnapshot {
            phase: self.phase,
            level: self.level,
            max_level: self.tuning.max_level,
            score: self.score,
            enemies_defeated: self.enemies_defeated,
            enemies_to_defeat: self.enemies_to_defeat,
            boss_spawned: self.boss_spawned,
            boss,
            run_active: self.run_active,
            time_ticks: self.time_ticks,
            menu: self.menu,
            player: &self.player,
            bullets: self.bullets.as_slice(),
            boss_bullets: self.boss_bullets.as_slice(),
            enemy_bullets: self.enemy_bullets.as_slice(),
            enemies: self.enemies.as_slice(),
            power_ups: self.power_ups.as_slice(),
            knives: self.knives.as_slice(),
            counts: CollectionCounts {
                bullets: self.bullets.len(),
                boss_bullets: self.boss_bullets.len(),
                enemy_bullets: self.enemy_bullets.len(),
                enemies: self.enemies.len(),
                power_ups: self.power_ups.len(),
                knives: self.knives.len(),
            },
            events: &self.events,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::enemy::Archetype;
    use glam::Vec2;

    #[test]
    fn test_snapshot_mirrors_session() {
        let mut session = GameSession::default();
        session.start_new_game();
        session.score = 42;
        session.enemies.push(Enemy::new(
            Archetype::Runner,
            1,
            Vec2::new(10.0, 10.0),
            session.player.pos,
        ));

        let snapshot = session.snapshot();
        assert_eq!(snapshot.phase, GamePhase::Playing);
        assert_eq!(snapshot.level, 1);
        assert_eq!(snapshot.max_level, 3);
        assert_eq!(snapshot.score, 42);
        assert_eq!(snapshot.enemies_to_defeat, 10);
        assert_eq!(snapshot.counts.enemies, 1);
        assert_eq!(snapshot.enemies.len(), 1);
        assert_eq!(snapshot.player.health, 10);
        assert!(snapshot.boss.is_none());
    }

    #[test]
    fn test_snapshot_reports_boss_status() {
        let mut session = GameSession::default();
        session.start_new_game();
        session.level = 3;
        let mut boss = Enemy::new(
            Archetype::Boss,
            3,
            Vec2::new(400.0, 100.0),
            session.player.pos,
        );
        boss.health = 77;
        session.enemies.push(boss);

        let status = session.snapshot().boss;
        assert_eq!(
            status.map(|s| (s.health, s.phase)),
            Some((77, BossPhase::Wave))
        );
        assert!(status.is_some_and(|s| s.max_health > 77));
    }

    #[test]
    fn test_snapshot_serializes_to_json() {
        let mut session = GameSession::default();
        session.start_new_game();
        let json = serde_json::to_value(session.snapshot()).expect("snapshot serializes");
        assert_eq!(json["phase"], "Playing");
        assert_eq!(json["level"], 1);
        assert_eq!(json["player"]["lives"], 1);
        assert!(json["bullets"].as_array().is_some_and(|a| a.is_empty()));
        assert_eq!(json["events"][0], "NewGame");
    }
}
