//! Demo-mode input generator
//!
//! Plays the game from the snapshot-visible state only: clicks through the
//! menu, aims at the closest enemy with the trigger held, throws knives when
//! something gets close, and sidesteps incoming fire.

use glam::Vec2;

use super::player::Movement;
use super::state::{GamePhase, GameSession};
use super::tick::{ButtonInput, MenuInput, TickInput};

/// Enemies inside this range trigger a knife throw
const MELEE_RANGE: f32 = 150.0;
/// Hostiles inside this range are dodged
const DODGE_RANGE: f32 = 90.0;
/// Horizontal slack before lining up under a target
const LINE_UP_SLACK: f32 = 12.0;

const CLICK: ButtonInput = ButtonInput {
    hovered: true,
    clicked: true,
};

/// Produce the input the demo player would give this tick
pub fn autopilot_input(session: &GameSession) -> TickInput {
    match session.phase {
        GamePhase::Menu => {
            let menu = if session.run_active {
                MenuInput {
                    continue_game: CLICK,
                    ..Default::default()
                }
            } else {
                MenuInput {
                    new_game: CLICK,
                    ..Default::default()
                }
            };
            TickInput {
                menu,
                ..Default::default()
            }
        }
        GamePhase::LevelComplete => TickInput {
            confirm: true,
            ..Default::default()
        },
        // Loop the demo
        GamePhase::GameOver | GamePhase::Victory => TickInput {
            back: true,
            ..Default::default()
        },
        GamePhase::Playing => play(session),
    }
}

fn play(session: &GameSession) -> TickInput {
    let player = &session.player;
    let nearest_enemy = session
        .enemies
        .iter()
        .min_by(|a, b| {
            a.pos
                .distance_squared(player.pos)
                .partial_cmp(&b.pos.distance_squared(player.pos))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    let aim = nearest_enemy.map_or(player.pos - Vec2::Y * 100.0, |enemy| enemy.pos);
    let melee = player.has_knives
        && nearest_enemy.is_some_and(|enemy| enemy.pos.distance(player.pos) < MELEE_RANGE);

    let movement = if let Some(threat) = nearest_threat(session) {
        dodge(player.pos, threat)
    } else if let Some(hat) = nearest_power_up(session) {
        steer_toward(player.pos, hat)
    } else if let Some(enemy) = nearest_enemy {
        line_up(player.pos, enemy.pos)
    } else {
        Movement::default()
    };

    TickInput {
        movement,
        fire: true,
        melee,
        aim,
        ..Default::default()
    }
}

/// Closest hostile body or bullet within dodging range
fn nearest_threat(session: &GameSession) -> Option<Vec2> {
    let origin = session.player.pos;
    let bullets = session
        .boss_bullets
        .iter()
        .chain(session.enemy_bullets.iter())
        .map(|shot| shot.pos);
    let bodies = session.enemies.iter().map(|enemy| enemy.pos);

    bullets
        .chain(bodies)
        .filter(|pos| pos.distance(origin) < DODGE_RANGE)
        .min_by(|a, b| {
            a.distance_squared(origin)
                .partial_cmp(&b.distance_squared(origin))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
}

fn nearest_power_up(session: &GameSession) -> Option<Vec2> {
    let origin = session.player.pos;
    session
        .power_ups
        .iter()
        .map(|hat| hat.pos)
        .filter(|pos| pos.y > 0.0)
        .min_by(|a, b| {
            a.distance_squared(origin)
                .partial_cmp(&b.distance_squared(origin))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
}

/// Step sideways away from the threat, backing off when it is above
fn dodge(from: Vec2, threat: Vec2) -> Movement {
    let go_right = threat.x <= from.x;
    Movement {
        left: !go_right,
        right: go_right,
        up: false,
        down: threat.y < from.y,
    }
}

fn steer_toward(from: Vec2, to: Vec2) -> Movement {
    let delta = to - from;
    Movement {
        left: delta.x < -LINE_UP_SLACK,
        right: delta.x > LINE_UP_SLACK,
        up: delta.y < -LINE_UP_SLACK,
        down: delta.y > LINE_UP_SLACK,
    }
}

/// Shuffle horizontally beneath the target
fn line_up(from: Vec2, target: Vec2) -> Movement {
    let dx = target.x - from.x;
    Movement {
        left: dx < -LINE_UP_SLACK,
        right: dx > LINE_UP_SLACK,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::enemy::{Archetype, Enemy};
    use crate::sim::entities::{PowerUp, PowerUpKind, Projectile};
    use crate::sim::rng::GameRng;
    use crate::sim::tick::tick;

    fn playing() -> GameSession {
        let mut session = GameSession::default();
        session.start_new_game();
        session
    }

    fn enemy_at(pos: Vec2) -> Enemy {
        Enemy::new(Archetype::Basic { tier: 1 }, 1, pos, Vec2::new(400.0, 550.0))
    }

    #[test]
    fn test_menu_starts_or_continues() {
        let mut session = GameSession::default();
        let input = autopilot_input(&session);
        assert!(input.menu.new_game.clicked);
        assert!(!input.menu.continue_game.clicked);

        session.start_new_game();
        session.pause_to_menu();
        let input = autopilot_input(&session);
        assert!(input.menu.continue_game.clicked);
        assert!(!input.menu.new_game.clicked);
    }

    #[test]
    fn test_confirms_level_complete() {
        let mut session = playing();
        session.phase = GamePhase::LevelComplete;
        assert!(autopilot_input(&session).confirm);
    }

    #[test]
    fn test_aims_at_nearest_enemy() {
        let mut session = playing();
        session.enemies.push(enemy_at(Vec2::new(100.0, 50.0)));
        session.enemies.push(enemy_at(Vec2::new(420.0, 300.0)));
        let input = autopilot_input(&session);
        assert!(input.fire);
        assert_eq!(input.aim, Vec2::new(420.0, 300.0));
        assert!(!input.melee);
        assert!(input.movement.right);
    }

    #[test]
    fn test_aims_straight_up_on_empty_field() {
        let session = playing();
        let input = autopilot_input(&session);
        assert_eq!(input.aim, session.player.pos - Vec2::Y * 100.0);
        assert_eq!(input.movement, Movement::default());
    }

    #[test]
    fn test_throws_knives_only_when_charged_and_close() {
        let mut session = playing();
        let near = session.player.pos - Vec2::new(0.0, 120.0);
        session.enemies.push(enemy_at(near));
        assert!(!autopilot_input(&session).melee);

        session.player.apply_power_up(PowerUpKind::Knives);
        assert!(autopilot_input(&session).melee);
    }

    #[test]
    fn test_sidesteps_incoming_bullet() {
        let mut session = playing();
        let pos = session.player.pos;
        session
            .enemy_bullets
            .push(Projectile::enemy_shot(pos - Vec2::new(10.0, 40.0), pos));
        let input = autopilot_input(&session);
        assert!(input.movement.right);
        assert!(!input.movement.left);
        assert!(input.movement.down);
    }

    #[test]
    fn test_drifts_toward_power_up() {
        let mut session = playing();
        session
            .power_ups
            .push(PowerUp::new(Vec2::new(200.0, 500.0), PowerUpKind::DamageBoost));
        let input = autopilot_input(&session);
        assert!(input.movement.left);
        assert!(input.movement.up);
    }

    #[test]
    fn test_demo_run_scores_points() {
        let mut session = GameSession::default();
        let mut rng = GameRng::new(7);
        for _ in 0..20_000 {
            let input = autopilot_input(&session);
            tick(&mut session, &input, &mut rng);
            if matches!(session.phase, GamePhase::GameOver | GamePhase::Victory) {
                break;
            }
        }
        assert!(session.score > 0);
    }
}
