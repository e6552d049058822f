/// Entry point and frame loop.

mod config;
mod domain;
mod sim;
mod ui;

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context;

use config::GameConfig;
use sim::clock::GameClock;
use sim::event::GameEvent;
use sim::food::FoodSpawner;
use sim::save::{self, SaveSlot};
use sim::session::Session;
use ui::gamepad::{GamepadState, PadBindings};
use ui::input::InputState;
use ui::renderer::Renderer;
use ui::router::{FrameKeys, Router};
use ui::sound::{self as sfx, SoundEngine};

const FRAME_SLEEP: Duration = Duration::from_millis(5);

fn main() -> anyhow::Result<()> {
    let config = GameConfig::load();
    init_logging(&config);
    log::info!("starting with {config:?}");

    let slot = SaveSlot::locate(&config.save_file);
    log::info!("save slot: {}", slot.path().display());

    let mut renderer = Renderer::new();
    if let Err(e) = renderer.init() {
        let _ = renderer.cleanup();
        return Err(e).context("terminal init failed");
    }

    let sound = SoundEngine::new();

    let mut session = Session::new(
        config.speed.tick_rate_ms,
        config.grid.density,
        renderer.viewport(),
        FoodSpawner::from_entropy(),
    );
    session.set_has_save(slot.exists());

    let result = game_loop(&mut session, &mut renderer, sound.as_ref(), &config, &slot);

    let cleanup = renderer.cleanup().context("terminal cleanup failed");
    result?;
    cleanup?;

    println!();
    println!("Thanks for playing Snake!");
    println!("High Score: {}", session.high_score());
    Ok(())
}

/// Log to the configured file; the alternate screen has no room for stderr.
fn init_logging(config: &GameConfig) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));

    let path = PathBuf::from(&config.log_file);
    let path = if path.is_absolute() { path } else { save::data_dir().join(path) };
    match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        Err(e) => eprintln!("Warning: could not open log file {}: {e}", path.display()),
    }

    if let Err(e) = builder.try_init() {
        eprintln!("Warning: logger already set: {e}");
    }
}

fn game_loop(
    session: &mut Session,
    renderer: &mut Renderer,
    sound: Option<&SoundEngine>,
    config: &GameConfig,
    slot: &SaveSlot,
) -> anyhow::Result<()> {
    let mut kb = InputState::new(&config.input);
    let mut gp = GamepadState::new();
    let mut router = Router::new(
        config.input.stick_deadzone,
        PadBindings::from_config(&config.gamepad),
    );

    let mut clock = GameClock::new(Duration::from_millis(session.speed_ms()));

    loop {
        kb.drain_events();
        gp.update();

        if kb.ctrl_c_pressed() {
            break;
        }

        if renderer.refresh_size()? || kb.resized().is_some() {
            let (w, h) = renderer.viewport();
            session.set_viewport(w, h);
        }

        let keys = FrameKeys { presses: kb.presses(), swipes: kb.swipes() };
        let mut events = router.route(session, keys, &gp.frame(), slot);

        if events.contains(&GameEvent::ExitRequested) {
            break;
        }

        clock.set_period(Duration::from_millis(session.speed_ms()));
        let now = Instant::now();
        clock.follow(session.screen(), now);
        if clock.poll(now) {
            events.extend(session.tick());
        }

        sfx::play_events(sound, &events);
        renderer.render(session)?;
        std::thread::sleep(FRAME_SLEEP);
    }

    Ok(())
}
