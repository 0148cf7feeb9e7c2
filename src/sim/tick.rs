//! Frame tick
//!
//! Core game loop that advances the session by one frame. Per tick of play:
//! input, spawning, movement, collision resolution, level-completion check.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ai::{ShotSinks, update_enemy};
use super::collision::{Resolution, resolve_collisions};
use super::entities::{Knife, Projectile};
use super::player::Movement;
use super::rng::RandomSource;
use super::spawn::direct_spawns;
use super::state::{GameEvent, GamePhase, GameSession, MenuHover};
use crate::consts::SHOOT_COOLDOWN_TICKS;

/// Hover/click state of one menu button
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonInput {
    pub hovered: bool,
    pub clicked: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuInput {
    pub new_game: ButtonInput,
    pub continue_game: ButtonInput,
    pub quit: ButtonInput,
}

/// Input sampled by the host for a single tick
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    /// Held movement keys
    pub movement: Movement,
    /// Fire button held
    pub fire: bool,
    /// Melee button pressed this frame
    pub melee: bool,
    /// Pointer position in playfield coordinates
    pub aim: Vec2,
    pub menu: MenuInput,
    /// Escape/back pressed this frame
    pub back: bool,
    /// Confirm pressed this frame (skips the tail of the level-complete pause)
    pub confirm: bool,
}

/// Advance the session by one frame
pub fn tick<R: RandomSource + ?Sized>(session: &mut GameSession, input: &TickInput, rng: &mut R) {
    session.events.clear();
    session.menu = MenuHover {
        new_game: input.menu.new_game.hovered,
        continue_game: input.menu.continue_game.hovered,
        quit: input.menu.quit.hovered,
    };

    handle_navigation(session, input);

    match session.phase {
        GamePhase::Playing => update_playing(session, input, rng),
        GamePhase::LevelComplete => update_level_complete(session, input),
        GamePhase::Menu | GamePhase::GameOver | GamePhase::Victory => {}
    }
}

/// Menu clicks and the back key
fn handle_navigation(session: &mut GameSession, input: &TickInput) {
    match session.phase {
        GamePhase::Menu => {
            let buttons = &input.menu;
            if buttons.new_game.clicked {
                session.start_new_game();
            } else if buttons.continue_game.clicked {
                if !session.resume() {
                    log::debug!("Continue ignored: no run in progress");
                }
            } else if buttons.quit.clicked {
                log::info!("Quit requested from menu");
                session.emit(GameEvent::QuitRequested);
            }
        }
        GamePhase::Playing => {
            if input.back {
                session.pause_to_menu();
            }
        }
        GamePhase::GameOver | GamePhase::Victory => {
            if input.back {
                session.return_to_menu();
            }
        }
        GamePhase::LevelComplete => {}
    }
}

fn update_playing<R: RandomSource + ?Sized>(
    session: &mut GameSession,
    input: &TickInput,
    rng: &mut R,
) {
    if !session.player.is_alive() {
        session.declare_game_over();
        return;
    }

    session.time_ticks += 1;

    // Player
    session.player.apply_movement(input.movement);
    session.player.update();

    if input.melee && session.player.has_knives {
        let before = session.knives.len();
        for knife in Knife::ring(session.player.pos) {
            if !session.knives.push(knife) {
                break;
            }
        }
        session.player.has_knives = false;
        let count = session.knives.len() - before;
        session.emit(GameEvent::KnivesThrown { count });
    }

    if input.fire && session.player.can_shoot() && !session.bullets.is_full() {
        let player = &session.player;
        session.bullets.push(Projectile::player_shot(
            player.pos,
            input.aim,
            session.level,
            player.bullet_damage(),
        ));
        session.player.shoot_cooldown = SHOOT_COOLDOWN_TICKS;
    }

    direct_spawns(session, rng);

    // Movement and expiry
    for shot in session.bullets.iter_mut() {
        shot.update();
    }
    session.bullets.retain(|shot| !shot.is_off_field());

    for shot in session.boss_bullets.iter_mut() {
        shot.update();
    }
    session.boss_bullets.retain(|shot| !shot.is_off_field());

    for shot in session.enemy_bullets.iter_mut() {
        shot.update();
    }
    session.enemy_bullets.retain(|shot| !shot.is_off_field());

    for knife in session.knives.iter_mut() {
        knife.update();
    }
    session.knives.retain(|knife| !knife.is_spent());

    let player_pos = session.player.pos;
    let mut sinks = ShotSinks {
        boss_bullets: &mut session.boss_bullets,
        enemy_bullets: &mut session.enemy_bullets,
    };
    for enemy in session.enemies.iter_mut() {
        update_enemy(enemy, player_pos, &mut sinks);
    }
    session.enemies.retain(|enemy| !enemy.is_off_field());

    for hat in session.power_ups.iter_mut() {
        hat.update();
    }
    session.power_ups.retain(|hat| !hat.is_expired());

    if resolve_collisions(session, rng) == Resolution::Victory {
        return;
    }

    session.check_level_complete();
}

fn update_level_complete(session: &mut GameSession, input: &TickInput) {
    session.level_complete_ticks += 1;
    let elapsed = session.level_complete_ticks;
    let skipped = input.confirm && elapsed > session.tuning.level_skip_after_ticks;
    if elapsed >= session.tuning.level_complete_ticks || skipped {
        session.start_next_level();
    }
}
