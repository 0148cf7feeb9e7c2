//! Crazy Hatman headless runner
//!
//! Plays one session with the demo autopilot and prints the final snapshot as
//! JSON. Usage: `crazy-hatman [TUNING.json] [--seed N] [--max-ticks N]`

#[cfg(not(target_arch = "wasm32"))]
use crazy_hatman::Tuning;
#[cfg(not(target_arch = "wasm32"))]
use crazy_hatman::consts::TICKS_PER_SECOND;
#[cfg(not(target_arch = "wasm32"))]
use crazy_hatman::sim::{GameEvent, GamePhase, GameRng, GameSession, autopilot_input, tick};

/// Default cap on simulated frames (ten minutes of play)
#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_MAX_TICKS: u64 = TICKS_PER_SECOND as u64 * 60 * 10;

#[cfg(not(target_arch = "wasm32"))]
struct Args {
    tuning_path: Option<String>,
    seed: Option<u64>,
    max_ticks: u64,
}

#[cfg(not(target_arch = "wasm32"))]
fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        tuning_path: None,
        seed: None,
        max_ticks: DEFAULT_MAX_TICKS,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--seed" => {
                let value = iter.next().ok_or("--seed needs a value")?;
                args.seed = Some(value.parse().map_err(|e| format!("bad seed {value:?}: {e}"))?);
            }
            "--max-ticks" => {
                let value = iter.next().ok_or("--max-ticks needs a value")?;
                args.max_ticks = value
                    .parse()
                    .map_err(|e| format!("bad tick count {value:?}: {e}"))?;
            }
            _ if arg.starts_with("--") => return Err(format!("unknown option {arg}")),
            _ => args.tuning_path = Some(arg),
        }
    }
    Ok(args)
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Crazy Hatman (headless) starting...");

    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(2);
        }
    };

    let tuning = match &args.tuning_path {
        Some(path) => match Tuning::load(path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("{e}");
                std::process::exit(1);
            }
        },
        None => Tuning::default(),
    };

    let mut rng = match args.seed {
        Some(seed) => {
            log::info!("Using seed {seed}");
            GameRng::new(seed)
        }
        None => GameRng::from_entropy(),
    };

    let mut session = GameSession::new(tuning);
    let mut frames = 0u64;
    while frames < args.max_ticks {
        let input = autopilot_input(&session);
        tick(&mut session, &input, &mut rng);
        frames += 1;

        for event in &session.events {
            match event {
                GameEvent::EnemyKilled { .. } | GameEvent::PowerUpDropped { .. } => {
                    log::debug!("[{frames}] {event:?}")
                }
                _ => log::info!("[{frames}] {event:?}"),
            }
        }

        if matches!(session.phase, GamePhase::GameOver | GamePhase::Victory) {
            break;
        }
    }

    log::info!(
        "Stopped after {frames} frames: {:?}, level {}, score {}",
        session.phase,
        session.level,
        session.score
    );

    match serde_json::to_string_pretty(&session.snapshot()) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            log::error!("Failed to serialize snapshot: {e}");
            std::process::exit(1);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is driven by the embedding host on wasm
}
