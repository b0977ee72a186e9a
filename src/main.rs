//! Love Quest entry point
//!
//! The native build has no window: it plays the built-in levels with the demo
//! autopilot on a simulated clock and prints the final snapshot as JSON.

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use std::path::PathBuf;
    use std::sync::Arc;

    use love_quest::autopilot::Autopilot;
    use love_quest::sim::{Engine, GameEvent, GamePhase};
    use love_quest::{Catalog, GameError, GameLoop, InputEvent, Settings};

    /// Simulated frame length
    const FRAME_MS: u64 = 16;
    /// Autopilot presses a key this often
    const MOVE_INTERVAL_MS: u64 = 80;
    const DEFAULT_DEMO_SECONDS: u64 = 300;

    fn demo_seconds() -> u64 {
        match std::env::var("LOVE_QUEST_DEMO_SECONDS") {
            Ok(raw) => raw.parse().unwrap_or_else(|_| {
                log::warn!("Ignoring LOVE_QUEST_DEMO_SECONDS={raw:?}, not a number");
                DEFAULT_DEMO_SECONDS
            }),
            Err(_) => DEFAULT_DEMO_SECONDS,
        }
    }

    fn log_event(event: &GameEvent) {
        match event {
            GameEvent::Hit { lives_left } => log::info!("Hit! {lives_left} lives left"),
            GameEvent::LevelComplete { level, time_bonus } => {
                log::info!("Level {} complete, time bonus {time_bonus}", level + 1)
            }
            GameEvent::LevelStarted { level } => log::info!("Level {} started", level + 1),
            GameEvent::GameOver { score } => log::info!("Game over with {score} points"),
            GameEvent::Victory { score } => log::info!("All levels complete with {score} points"),
            other => log::debug!("{other:?}"),
        }
    }

    pub fn run() -> Result<(), GameError> {
        let settings_path = std::env::var_os("LOVE_QUEST_SETTINGS").map(PathBuf::from);
        let settings = Settings::load(settings_path.as_deref());
        let catalog = Arc::new(Catalog::builtin()?);

        let mut autopilot = Autopilot::from_settings(&settings);
        let mut game = GameLoop::new(Engine::new(catalog), settings)?;
        game.handle(InputEvent::Start);

        let end_ms = demo_seconds() * 1_000;
        let mut next_move_ms = 0;
        while game.engine().now_ms() < end_ms {
            let now = game.engine().now_ms();
            if now >= next_move_ms {
                next_move_ms = now + MOVE_INTERVAL_MS;
                if let Some(direction) = autopilot.next_direction(game.engine()) {
                    game.handle(InputEvent::Key(direction.key_name().to_string()));
                }
            }
            game.update(FRAME_MS);

            for event in game.drain_events() {
                log_event(&event);
            }
            if game.engine().phase().is_terminal() {
                break;
            }
        }

        let snapshot = game.snapshot();
        let summary = snapshot.summary;
        log::info!(
            "Demo ended after {}ms in {:?}: {}/{} items, {} levels, score {}",
            snapshot.now_ms,
            snapshot.phase,
            summary.items_collected,
            summary.total_items,
            summary.levels_completed,
            snapshot.score
        );
        if snapshot.phase == GamePhase::Playing {
            log::info!("Time ran out on level {}", snapshot.level_index + 1);
        }
        log::debug!("{} timers still pending", game.engine().pending_timers());
        match snapshot.to_json() {
            Ok(json) => println!("{json}"),
            Err(e) => log::error!("Failed to serialize snapshot: {e}"),
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Love Quest (native demo) starting...");

    if let Err(e) = demo::run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The web shell drives `love_quest::GameLoop` directly
}
