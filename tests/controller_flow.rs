use std::collections::HashMap;
use std::time::{Duration, Instant};

use asteroid_grid::achievement_log::{AchievementLog, MemoryAchievementLog};
use asteroid_grid::achievements::{Achievement, AchievementManager};
use asteroid_grid::constants::*;
use asteroid_grid::controller::{Command, GameController};
use asteroid_grid::entities::{ObjectKind, PowerUpKind, Sprite};
use asteroid_grid::game::GameModel;
use asteroid_grid::stats::PlayerStatsTracker;
use asteroid_grid::types::{Direction, Position};
use asteroid_grid::ui::Ui;
use rand::SeedableRng;
use rand::rngs::StdRng;

#[derive(Default)]
struct RecordingUi {
    frames: Vec<Vec<Sprite>>,
    stats: HashMap<String, String>,
    progress: HashMap<String, f64>,
    logs: Vec<String>,
    achievement_dumps: usize,
    pause_calls: usize,
    game_over: Option<String>,
}

impl Ui for RecordingUi {
    fn render(&mut self, sprites: &[Sprite]) {
        self.frames.push(sprites.to_vec());
    }

    fn set_stat(&mut self, name: &str, value: &str) {
        self.stats.insert(name.to_string(), value.to_string());
    }

    fn set_achievement_progress(&mut self, name: &str, progress: f64) {
        self.progress.insert(name.to_string(), progress);
    }

    fn log(&mut self, line: &str) {
        self.logs.push(line.to_string());
    }

    fn log_achievements(&mut self, _achievements: &[Achievement]) {
        self.achievement_dumps += 1;
    }

    fn pause(&mut self) {
        self.pause_calls += 1;
    }

    fn show_game_over(&mut self, report: &str) {
        self.game_over = Some(report.to_string());
    }
}

type TestController = GameController<RecordingUi, MemoryAchievementLog, StdRng>;

fn controller_with_stats(stats: PlayerStatsTracker) -> TestController {
    let model = GameModel::with_stats(StdRng::seed_from_u64(7), stats);
    let achievements = AchievementManager::with_defaults(MemoryAchievementLog::new()).unwrap();
    GameController::new(RecordingUi::default(), model, achievements)
}

fn controller() -> TestController {
    controller_with_stats(PlayerStatsTracker::new())
}

#[test]
fn command_parsing_is_case_insensitive() {
    assert_eq!(Command::parse("w"), Some(Command::Move(Direction::Up)));
    assert_eq!(Command::parse("A"), Some(Command::Move(Direction::Left)));
    assert_eq!(Command::parse("s"), Some(Command::Move(Direction::Down)));
    assert_eq!(Command::parse("D"), Some(Command::Move(Direction::Right)));
    assert_eq!(Command::parse("f"), Some(Command::Fire));
    assert_eq!(Command::parse("p"), Some(Command::Pause));
    assert_eq!(Command::parse("q"), None);
    assert_eq!(Command::parse("fire"), None);
}

#[test]
fn tick_renders_ship_first_and_pushes_stats() {
    let mut c = controller();
    c.on_tick(1);

    let frame = c.ui().frames.last().unwrap();
    assert_eq!(frame[0].position, Position::new(SHIP_START_X, SHIP_START_Y));
    assert_eq!(c.ui().stats["Health"], "100");
    assert_eq!(c.ui().stats["Score"], "0");
    assert_eq!(c.ui().stats["Level"], "1");
    assert_eq!(c.ui().stats["Time Survived"], "0 seconds");
    assert_eq!(c.ui().progress.len(), 3);
}

#[test]
fn tick_moves_before_colliding() {
    let mut c = controller();
    c.model_mut().add_object(ObjectKind::Asteroid, Position::new(5, 9));
    c.on_tick(1);
    assert_eq!(c.model().ship().health, 90);
    assert!(!c.model().objects().iter().any(|o| o.kind == ObjectKind::Asteroid && o.position.y > 0));
}

#[test]
fn tick_levels_up_after_collecting_score() {
    let mut c = controller();
    c.model_mut().ship_mut().score = 50;
    c.model_mut().add_object(ObjectKind::PowerUp(PowerUpKind::Shield), Position::new(5, 9));
    c.on_tick(1);
    assert_eq!(c.model().ship().score, 100);
    assert_eq!(c.model().level(), 2);
    assert_eq!(c.model().spawn_rate(), 7);
}

#[test]
fn movement_is_logged_only_when_verbose() {
    let mut c = controller();
    c.handle_input("d");
    assert_eq!(c.model().ship().position, Position::new(6, 10));
    assert!(c.ui().logs.is_empty());

    c.set_verbose(true);
    c.handle_input("W");
    assert_eq!(c.ui().logs, vec!["Ship moved to (6, 9)"]);
}

#[test]
fn fire_creates_bullet_and_counts_shot() {
    let mut c = controller();
    c.handle_input("a");
    c.handle_input("F");
    let bullets: Vec<_> =
        c.model().objects().iter().filter(|o| o.kind == ObjectKind::Bullet).collect();
    assert_eq!(bullets.len(), 1);
    assert_eq!(bullets[0].position, Position::new(4, 10));
    assert_eq!(c.model().stats().shots_fired(), 1);
}

#[test]
fn invalid_input_always_logs() {
    let mut c = controller();
    c.handle_input("x");
    assert_eq!(c.ui().logs, vec![INVALID_INPUT_MESSAGE]);
}

#[test]
fn paused_game_only_listens_for_pause() {
    let mut c = controller();
    c.handle_input("p");
    assert!(c.is_paused());
    assert_eq!(c.ui().logs, vec!["Game paused."]);

    c.handle_input("d");
    c.handle_input("f");
    c.handle_input("x");
    assert_eq!(c.model().ship().position, Position::new(5, 10));
    assert!(c.model().objects().is_empty());
    assert_eq!(c.ui().logs.len(), 1);

    c.handle_input("P");
    assert!(!c.is_paused());
    assert_eq!(c.ui().logs, vec!["Game paused.", "Game unpaused."]);
    assert_eq!(c.ui().pause_calls, 2);
}

#[test]
fn game_over_pauses_and_reports() {
    let mut c = controller();
    c.model_mut().ship_mut().health = 20;
    c.model_mut().add_object(ObjectKind::Enemy, Position::new(5, 9));
    c.on_tick(3);

    assert!(c.is_game_over());
    assert!(c.is_paused());
    assert_eq!(c.ui().logs, vec!["Game paused."]);
    let report = c.ui().game_over.as_deref().unwrap();
    assert!(report.starts_with("Shots Fired: 0\nShots Hit: 0\nEnemies Destroyed: 0\n"));
    assert!(report.contains("Survivor - Survive for 2 minutes (0% complete, Tier: Novice)"));
}

#[test]
fn report_counts_hits_as_enemies_destroyed() {
    let mut c = controller();
    for _ in 0..4 {
        c.model_mut().stats_mut().record_shot_fired();
    }
    for _ in 0..3 {
        c.model_mut().stats_mut().record_shot_hit();
    }
    c.on_tick(1);
    let report = c.game_over_report();
    let lines: Vec<_> = report.lines().collect();
    assert_eq!(lines[0], "Shots Fired: 4");
    assert_eq!(lines[1], "Shots Hit: 3");
    assert_eq!(lines[2], "Enemies Destroyed: 3");
    assert_eq!(lines[3], "Survival Time: 0 seconds");
    assert_eq!(
        lines[5],
        "Enemy Exterminator - Destroy 20 enemies (15% complete, Tier: Novice)"
    );
    assert_eq!(lines.len(), 7);
}

#[test]
fn exterminator_mastery_is_logged_once() {
    let mut c = controller();
    for _ in 0..25 {
        c.model_mut().stats_mut().record_shot_hit();
    }
    c.on_tick(1);
    c.on_tick(2);
    assert_eq!(c.ui().progress[ENEMY_EXTERMINATOR], 1.0);
    assert_eq!(c.achievements().sink().read(), vec!["Mastered: Enemy Exterminator"]);
}

#[test]
fn sharp_shooter_needs_more_than_ten_shots() {
    let mut c = controller();
    for _ in 0..10 {
        c.model_mut().stats_mut().record_shot_fired();
        c.model_mut().stats_mut().record_shot_hit();
    }
    c.on_tick(1);
    assert_eq!(c.ui().progress[SHARP_SHOOTER], 0.0);

    c.model_mut().stats_mut().record_shot_fired();
    c.model_mut().stats_mut().record_shot_hit();
    c.on_tick(2);
    assert_eq!(c.ui().progress[SHARP_SHOOTER], 1.0);
}

#[test]
fn survivor_tracks_elapsed_time() {
    let Some(start) = Instant::now().checked_sub(Duration::from_secs(60)) else {
        return;
    };
    let mut c = controller_with_stats(PlayerStatsTracker::with_start_time(start));
    c.on_tick(1);
    let progress = c.ui().progress[SURVIVOR];
    assert!((0.5..0.6).contains(&progress), "{progress}");
}

#[test]
fn achievements_are_dumped_every_hundred_ticks_when_verbose() {
    let mut c = controller();
    c.on_tick(100);
    assert_eq!(c.ui().achievement_dumps, 0);

    c.set_verbose(true);
    for tick in 100..=200 {
        c.on_tick(tick);
    }
    assert_eq!(c.ui().achievement_dumps, 2);
}

#[test]
fn verbose_model_messages_reach_the_ui_log() {
    let mut c = controller();
    c.set_verbose(true);
    c.model_mut().add_object(ObjectKind::Asteroid, Position::new(5, 9));
    c.on_tick(1);
    assert!(c.ui().logs.contains(&"Hit by Asteroid(5, 10)! Health reduced by 10.".to_string()));
}
