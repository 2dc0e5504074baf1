use std::io;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode},
};
use log::{error, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

use asteroid_grid::achievement_log::{AchievementLog, FileAchievementLog};
use asteroid_grid::achievements::AchievementManager;
use asteroid_grid::config::Config;
use asteroid_grid::controller::GameController;
use asteroid_grid::game::GameModel;
use asteroid_grid::rendering::{OutputTarget, TerminalUi};
use asteroid_grid::terminal_io::{self, KeyInput, SimulatedInput};

type Controller = GameController<TerminalUi, FileAchievementLog, StdRng>;

fn build_controller(config: &Config, ui: TerminalUi) -> io::Result<Controller> {
    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let sink = FileAchievementLog::new(&config.achievements);
    let previously_mastered = sink.read();
    if !previously_mastered.is_empty() {
        info!("{} achievement records on file", previously_mastered.len());
    }
    let achievements = AchievementManager::with_defaults(sink).map_err(|e| {
        error!("Failed to register achievements: {}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e)
    })?;

    let mut controller = GameController::new(ui, GameModel::new(rng), achievements);
    controller.set_verbose(config.verbose);
    Ok(controller)
}

fn run_debug(config: &Config) -> io::Result<()> {
    info!("Debug mode enabled.");
    let mut controller = build_controller(config, TerminalUi::headless())?;
    let mut input = SimulatedInput::demo_script();
    let mut tick = 0;

    while !controller.is_game_over() && !config.tick_limit_reached(tick) {
        let mut quit = false;
        for key in input.take(tick) {
            match key {
                KeyInput::Token(token) => controller.handle_input(&token),
                KeyInput::Quit => quit = true,
            }
        }
        if quit {
            break;
        }
        if !controller.is_paused() {
            controller.on_tick(tick);
        }
        tick += 1;
    }

    info!("Debug run finished after {} ticks\n{}", tick, controller.game_over_report());
    Ok(())
}

fn run_terminal(config: &Config) -> io::Result<()> {
    info!("Attempting to enable raw mode.");
    enable_raw_mode().map_err(|e| { error!("Failed to enable raw mode: {}", e); e })?;

    let mut ui = TerminalUi::new(OutputTarget::Stdout(io::stdout()));
    ui.clear_screen().map_err(|e| { error!("Failed to clear screen: {}", e); e })?;
    execute!(io::stdout(), Hide).map_err(|e| { error!("Failed to hide cursor: {}", e); e })?;

    let result = build_controller(config, ui).and_then(|mut controller| {
        game_loop(config, &mut controller)?;
        Ok(controller)
    });

    execute!(io::stdout(), Show).map_err(|e| { error!("Failed to show cursor: {}", e); e })?;
    disable_raw_mode().map_err(|e| { error!("Failed to disable raw mode: {}", e); e })?;

    let controller = result?;
    println!();
    print!("{}", controller.game_over_report());
    Ok(())
}

fn game_loop(config: &Config, controller: &mut Controller) -> io::Result<()> {
    let tick_interval = Duration::from_millis(config.tick_ms);
    let mut next_tick = Instant::now();
    let mut tick = 0;

    loop {
        let timeout = if controller.is_game_over() {
            tick_interval
        } else {
            next_tick.saturating_duration_since(Instant::now())
        };
        match terminal_io::poll_key(timeout)? {
            Some(KeyInput::Quit) => {
                info!("Quit requested at tick {}", tick);
                return Ok(());
            }
            Some(KeyInput::Token(token)) => controller.handle_input(&token),
            None => {}
        }

        if controller.is_game_over() {
            // Leave the report up until the player quits.
            continue;
        }
        if Instant::now() < next_tick {
            continue;
        }
        next_tick += tick_interval;
        if controller.is_paused() {
            continue;
        }
        controller.on_tick(tick);
        tick += 1;
        if config.tick_limit_reached(tick) {
            return Ok(());
        }
    }
}

fn main() -> io::Result<()> {
    let config = Config::parse();
    simple_logging::log_to_file(&config.log_file, config.log_level())?;
    info!("Starting asteroid-grid with {:?}", config);

    if config.debug {
        run_debug(&config)
    } else {
        run_terminal(&config)
    }
}
