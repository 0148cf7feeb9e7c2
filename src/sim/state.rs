//! Game session state and level progression
//!
//! The session owns every entity collection exclusively. The host keeps one
//! session and passes it by `&mut` into `tick` once per frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bounded::Bounded;
use super::enemy::{Archetype, Enemy};
use super::entities::{Knife, PowerUp, PowerUpKind, Projectile};
use super::player::Player;
use crate::tuning::Tuning;

/// Top-level session state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title menu (also where a paused run waits)
    Menu,
    /// Active gameplay
    Playing,
    /// Timed pause between levels
    LevelComplete,
    /// Player died; terminal until the player backs out to the menu
    GameOver,
    /// Boss defeated; terminal until the player backs out to the menu
    Victory,
}

/// What finished off an enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KillSource {
    Bullet,
    Knife,
}

/// What hurt the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitSource {
    BossBullet,
    EnemyBullet,
    Contact,
}

/// Notable things that happened during the last tick (for audio/HUD)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    NewGame,
    Paused,
    Resumed,
    ReturnedToMenu,
    QuitRequested,
    BossSpawned,
    BossDefeated {
        score: u64,
    },
    EnemyKilled {
        archetype: Archetype,
        pos: Vec2,
        score: u64,
        by: KillSource,
    },
    PlayerHit {
        damage: u32,
        source: HitSource,
        downed: bool,
    },
    KnivesThrown {
        count: usize,
    },
    PowerUpDropped {
        kind: PowerUpKind,
        pos: Vec2,
    },
    PowerUpCollected {
        kind: PowerUpKind,
    },
    LevelComplete {
        level: u32,
    },
    LevelStarted {
        level: u32,
    },
    GameOver {
        score: u64,
    },
    Victory {
        score: u64,
    },
}

/// Per-level spawn counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnTimers {
    pub enemy_ticks: u32,
    pub power_up_ticks: u32,
}

/// Hover state of the three menu buttons, mirrored for the renderer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuHover {
    pub new_game: bool,
    pub continue_game: bool,
    pub quit: bool,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameSession {
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Current level (1-based)
    pub level: u32,
    pub score: u64,
    pub enemies_to_defeat: u32,
    pub enemies_defeated: u32,
    pub boss_spawned: bool,
    pub boss_defeated: bool,
    /// A run has started and has not ended (enables Continue)
    pub run_active: bool,
    /// Ticks spent in `Playing`
    pub time_ticks: u64,
    pub timers: SpawnTimers,
    /// Ticks elapsed in the current `LevelComplete` pause
    pub level_complete_ticks: u32,
    pub player: Player,
    pub bullets: Bounded<Projectile>,
    pub boss_bullets: Bounded<Projectile>,
    pub enemy_bullets: Bounded<Projectile>,
    pub enemies: Bounded<Enemy>,
    pub power_ups: Bounded<PowerUp>,
    pub knives: Bounded<Knife>,
    pub menu: MenuHover,
    /// Events raised during the last tick
    pub events: Vec<GameEvent>,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(Tuning::default())
    }
}

impl GameSession {
    /// Create a session sitting in the menu
    pub fn new(tuning: Tuning) -> Self {
        let caps = tuning.capacities;
        let enemies_to_defeat = tuning.quota_for(1);
        Self {
            tuning,
            phase: GamePhase::Menu,
            level: 1,
            score: 0,
            enemies_to_defeat,
            enemies_defeated: 0,
            boss_spawned: false,
            boss_defeated: false,
            run_active: false,
            time_ticks: 0,
            timers: SpawnTimers::default(),
            level_complete_ticks: 0,
            player: Player::new(),
            bullets: Bounded::new(caps.bullets),
            boss_bullets: Bounded::new(caps.boss_bullets),
            enemy_bullets: Bounded::new(caps.enemy_bullets),
            enemies: Bounded::new(caps.enemies),
            power_ups: Bounded::new(caps.power_ups),
            knives: Bounded::new(caps.knives),
            menu: MenuHover::default(),
            events: Vec::new(),
        }
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn is_boss_level(&self) -> bool {
        self.tuning.is_boss_level(self.level)
    }

    /// Reset everything and enter `Playing` on level 1
    pub fn start_new_game(&mut self) {
        self.level = 1;
        self.score = 0;
        self.enemies_defeated = 0;
        self.enemies_to_defeat = self.tuning.quota_for(1);
        self.player = Player::new();
        self.time_ticks = 0;
        self.reset_level_state();
        self.run_active = true;
        self.phase = GamePhase::Playing;
        log::info!("New game started");
        self.emit(GameEvent::NewGame);
        self.emit(GameEvent::LevelStarted { level: 1 });
    }

    /// Leave the pause between levels: next level, or victory after the last
    pub fn start_next_level(&mut self) {
        if self.level < self.tuning.max_level {
            self.level += 1;
            self.enemies_defeated = 0;
            self.enemies_to_defeat = self.tuning.quota_for(self.level);
            self.reset_level_state();
            self.phase = GamePhase::Playing;
            log::info!(
                "Level {} started (quota {})",
                self.level,
                self.enemies_to_defeat
            );
            self.emit(GameEvent::LevelStarted { level: self.level });
        } else {
            self.declare_victory();
        }
    }

    /// Enter `LevelComplete` when the kill quota of a regular level is met
    pub fn check_level_complete(&mut self) -> bool {
        if self.phase != GamePhase::Playing
            || self.is_boss_level()
            || self.enemies_defeated < self.enemies_to_defeat
        {
            return false;
        }
        self.phase = GamePhase::LevelComplete;
        self.level_complete_ticks = 0;
        log::info!("Level {} complete, score {}", self.level, self.score);
        self.emit(GameEvent::LevelComplete { level: self.level });
        true
    }

    pub fn declare_victory(&mut self) {
        self.phase = GamePhase::Victory;
        self.run_active = false;
        log::info!("Victory! Final score {}", self.score);
        self.emit(GameEvent::Victory { score: self.score });
    }

    pub fn declare_game_over(&mut self) {
        self.phase = GamePhase::GameOver;
        self.run_active = false;
        log::info!("Game over on level {}, score {}", self.level, self.score);
        self.emit(GameEvent::GameOver { score: self.score });
    }

    /// Pause an active run into the menu
    pub fn pause_to_menu(&mut self) {
        self.phase = GamePhase::Menu;
        self.emit(GameEvent::Paused);
    }

    /// Resume a paused run; false when there is nothing to resume
    pub fn resume(&mut self) -> bool {
        if self.phase != GamePhase::Menu || !self.run_active {
            return false;
        }
        self.phase = GamePhase::Playing;
        self.emit(GameEvent::Resumed);
        true
    }

    /// Back out of a finished run
    pub fn return_to_menu(&mut self) {
        self.phase = GamePhase::Menu;
        self.run_active = false;
        self.emit(GameEvent::ReturnedToMenu);
    }

    /// The boss currently on the field, if any
    pub fn boss(&self) -> Option<&Enemy> {
        self.enemies.iter().find(|enemy| enemy.is_boss())
    }

    fn reset_level_state(&mut self) {
        self.bullets.clear();
        self.boss_bullets.clear();
        self.enemy_bullets.clear();
        self.enemies.clear();
        self.power_ups.clear();
        self.knives.clear();
        self.timers = SpawnTimers::default();
        self.level_complete_ticks = 0;
        self.boss_spawned = false;
        self.boss_defeated = false;
    }
}
