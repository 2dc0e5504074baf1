
use log::{info, warn};
use rand::Rng;
use rand::rngs::StdRng;

use crate::achievement_log::AchievementLog;
use crate::achievements::AchievementManager;
use crate::constants::*;
use crate::game::GameModel;
use crate::types::Direction;
use crate::ui::Ui;

/// A recognised player command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    Fire,
    Pause,
}

impl Command {
    /// Case-insensitive; anything but W/A/S/D/F/P is `None`.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_uppercase().as_str() {
            "W" => Some(Command::Move(Direction::Up)),
            "A" => Some(Command::Move(Direction::Left)),
            "S" => Some(Command::Move(Direction::Down)),
            "D" => Some(Command::Move(Direction::Right)),
            "F" => Some(Command::Fire),
            "P" => Some(Command::Pause),
            _ => None,
        }
    }
}

/// Drives the model one tick at a time and routes player input.
pub struct GameController<U: Ui, L: AchievementLog, R: Rng = StdRng> {
    ui: U,
    model: GameModel<R>,
    achievements: AchievementManager<L>,
    paused: bool,
    verbose: bool,
    game_over: bool,
}

impl<U: Ui, L: AchievementLog, R: Rng> GameController<U, L, R> {
    pub fn new(ui: U, model: GameModel<R>, achievements: AchievementManager<L>) -> Self {
        GameController { ui, model, achievements, paused: false, verbose: false, game_over: false }
    }

    pub fn model(&self) -> &GameModel<R> {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut GameModel<R> {
        &mut self.model
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut U {
        &mut self.ui
    }

    pub fn achievements(&self) -> &AchievementManager<L> {
        &self.achievements
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
        self.model.set_verbose(verbose);
    }

    /// One full step: update, collide, spawn, level up, achievements, render,
    /// then the game-over check.
    pub fn on_tick(&mut self, tick: u64) {
        self.model.update_game(tick);
        self.model.check_collisions();
        self.model.spawn_objects();
        self.model.level_up();
        self.flush_model_messages();
        self.refresh_achievements(tick);
        self.render_game();

        if self.model.check_game_over() && !self.game_over {
            self.game_over = true;
            info!("Game over at tick {}", tick);
            if !self.paused {
                self.pause_game();
            }
            let report = self.game_over_report();
            self.ui.show_game_over(&report);
        }
    }

    fn flush_model_messages(&mut self) {
        for line in self.model.take_messages() {
            self.ui.log(&line);
        }
    }

    pub fn refresh_achievements(&mut self, tick: u64) {
        self.update_achievement_progress();
        for achievement in self.achievements.achievements() {
            self.ui.set_achievement_progress(achievement.name(), achievement.progress());
        }
        if self.verbose && tick % ACHIEVEMENT_LOG_INTERVAL_TICKS == 0 {
            self.ui.log_achievements(&self.achievements.achievements());
        }
    }

    fn update_achievement_progress(&mut self) {
        let stats = self.model.stats();
        let survivor = (stats.elapsed_seconds() as f64 / SURVIVOR_SECONDS).min(1.0);
        let exterminator = (stats.shots_hit() as f64 / EXTERMINATOR_HITS).min(1.0);
        let sharp_shooter = if stats.shots_fired() > SHARP_SHOOTER_MIN_SHOTS {
            (stats.accuracy() / SHARP_SHOOTER_ACCURACY).min(1.0)
        } else {
            0.0
        };

        for (name, progress) in [
            (SURVIVOR, survivor),
            (ENEMY_EXTERMINATOR, exterminator),
            (SHARP_SHOOTER, sharp_shooter),
        ] {
            if let Err(e) = self.achievements.update_progress(name, progress) {
                warn!("Skipping achievement update: {}", e);
            }
        }
        self.achievements.log_mastered();
    }

    pub fn render_game(&mut self) {
        let ship = self.model.ship();
        self.ui.set_stat("Health", &ship.health.to_string());
        self.ui.set_stat("Score", &ship.score.to_string());
        self.ui.set_stat("Level", &self.model.level().to_string());
        self.ui.set_stat(
            "Time Survived",
            &format!("{} seconds", self.model.stats().elapsed_seconds()),
        );
        self.ui.render(&self.model.sprites());
    }

    /// Applies one input token. While paused only the pause key does anything.
    pub fn handle_input(&mut self, input: &str) {
        let command = Command::parse(input);
        if self.paused {
            if command == Some(Command::Pause) {
                self.pause_game();
            }
            return;
        }
        match command {
            Some(Command::Move(direction)) => {
                self.model.ship_mut().move_in(direction);
                if self.verbose {
                    let position = self.model.ship().position;
                    self.ui.log(&format!("Ship moved to ({}, {})", position.x, position.y));
                }
            }
            Some(Command::Fire) => {
                self.model.fire_bullet();
                self.model.stats_mut().record_shot_fired();
            }
            Some(Command::Pause) => self.pause_game(),
            None => self.ui.log(INVALID_INPUT_MESSAGE),
        }
    }

    pub fn pause_game(&mut self) {
        self.ui.pause();
        if self.paused {
            self.ui.log("Game unpaused.");
        } else {
            self.ui.log("Game paused.");
        }
        self.paused = !self.paused;
    }

    /// Final stats and per-achievement progress for the end-of-run screen.
    pub fn game_over_report(&self) -> String {
        let stats = self.model.stats();
        // There is no separate kill counter; every hit is an enemy destroyed.
        let mut report = format!(
            "Shots Fired: {}\nShots Hit: {}\nEnemies Destroyed: {}\nSurvival Time: {} seconds\n",
            stats.shots_fired(),
            stats.shots_hit(),
            stats.shots_hit(),
            stats.elapsed_seconds()
        );
        for achievement in self.achievements.achievements() {
            report.push_str(&format!(
                "{} - {} ({:.0}% complete, Tier: {})\n",
                achievement.name(),
                achievement.description(),
                achievement.progress() * 100.0,
                achievement.tier()
            ));
        }
        report
    }
}
