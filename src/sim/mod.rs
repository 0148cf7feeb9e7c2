//! Simulation module
//!
//! All gameplay logic lives here. Nothing in this module draws, polls devices
//! or reads the clock:
//! - One call to `tick` per frame
//! - Randomness only through an injected `RandomSource`
//! - Fixed-capacity entity collections in insertion order

pub mod ai;
pub mod autopilot;
pub mod bounded;
pub mod collision;
pub mod enemy;
pub mod entities;
pub mod player;
pub mod rng;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use autopilot::autopilot_input;
pub use bounded::Bounded;
pub use collision::{Resolution, resolve_collisions};
pub use enemy::{Archetype, BossPhase, Enemy};
pub use entities::{Knife, PowerUp, PowerUpKind, Projectile, ShotColor};
pub use player::{Movement, Player};
pub use rng::{GameRng, RandomSource, SequenceSource};
pub use snapshot::{BossStatus, RenderSnapshot};
pub use state::{GameEvent, GamePhase, GameSession, HitSource, KillSource};
pub use tick::{ButtonInput, MenuInput, TickInput, tick};
