// --- Grid ---
pub const GAME_WIDTH: i32 = 10;
pub const GAME_HEIGHT: i32 = 20;

// --- Level & spawn tuning ---
pub const START_LEVEL: u32 = 1;
pub const START_SPAWN_RATE: u32 = 2; // Percent chance per tick for an asteroid
pub const SPAWN_RATE_INCREASE: u32 = 5;
pub const SCORE_THRESHOLD: u32 = 100; // Score needed per level
pub const ENEMY_SPAWN_FACTOR: f64 = 0.5; // Fraction of the asteroid chance
pub const POWER_UP_SPAWN_FACTOR: f64 = 0.25;
pub const SPAWN_ROLL_RANGE: u32 = 100;

// --- Ship ---
pub const SHIP_START_X: i32 = 5;
pub const SHIP_START_Y: i32 = 10;
pub const SHIP_MAX_HEALTH: i32 = 100;

// --- Damage & effects ---
pub const ASTEROID_DAMAGE: i32 = 10;
pub const ENEMY_DAMAGE: i32 = 20;
pub const HEALTH_POWER_UP_AMOUNT: i32 = 20;
pub const SHIELD_POWER_UP_SCORE: u32 = 50;

// --- Achievements ---
pub const MASTERY_THRESHOLD: f64 = 0.999;
pub const EXPERT_THRESHOLD: f64 = 0.5;
pub const SURVIVOR: &str = "Survivor";
pub const ENEMY_EXTERMINATOR: &str = "Enemy Exterminator";
pub const SHARP_SHOOTER: &str = "Sharp Shooter";
pub const SURVIVOR_SECONDS: f64 = 120.0;
pub const EXTERMINATOR_HITS: f64 = 20.0;
pub const SHARP_SHOOTER_MIN_SHOTS: u32 = 10;
pub const SHARP_SHOOTER_ACCURACY: f64 = 0.99;
pub const ACHIEVEMENT_LOG_INTERVAL_TICKS: u64 = 100;

pub const INVALID_INPUT_MESSAGE: &str = "Invalid input. Use W, A, S, D, F, or P.";
