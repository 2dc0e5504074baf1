use std::collections::HashSet;

use log::{debug, info};
use rand::Rng;
use rand::rngs::StdRng;

use crate::constants::*;
use crate::entities::{Entity, ObjectKind, PowerUpKind, Ship, SpaceObject, Sprite};
use crate::stats::PlayerStatsTracker;
use crate::types::{ObjectId, Position};

/// The simulation engine: board objects, the ship, level and spawn rate.
///
/// Each tick the caller runs `update_game`, `check_collisions`, `spawn_objects`
/// and `level_up` in that order. All randomness comes from the injected `rng`
/// and is only drawn in `spawn_objects`.
pub struct GameModel<R: Rng = StdRng> {
    objects: Vec<SpaceObject>,
    ship: Ship,
    level: u32,
    spawn_rate: u32,
    next_id: u64,
    rng: R,
    stats: PlayerStatsTracker,
    verbose: bool,
    messages: Vec<String>,
}

impl<R: Rng> GameModel<R> {
    pub fn new(rng: R) -> Self {
        Self::with_stats(rng, PlayerStatsTracker::new())
    }

    pub fn with_stats(rng: R, stats: PlayerStatsTracker) -> Self {
        GameModel {
            objects: Vec::new(),
            ship: Ship::new(),
            level: START_LEVEL,
            spawn_rate: START_SPAWN_RATE,
            next_id: 0,
            rng,
            stats,
            verbose: false,
            messages: Vec::new(),
        }
    }

    pub fn ship(&self) -> &Ship {
        &self.ship
    }

    pub fn ship_mut(&mut self) -> &mut Ship {
        &mut self.ship
    }

    /// Non-ship objects currently on the board.
    pub fn objects(&self) -> &[SpaceObject] {
        &self.objects
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn spawn_rate(&self) -> u32 {
        self.spawn_rate
    }

    pub fn stats(&self) -> &PlayerStatsTracker {
        &self.stats
    }

    pub fn stats_mut(&mut self) -> &mut PlayerStatsTracker {
        &mut self.stats
    }

    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    /// Game-facing log lines produced since the last call.
    pub fn take_messages(&mut self) -> Vec<String> {
        std::mem::take(&mut self.messages)
    }

    /// Starts tracking a new object and returns its identity.
    pub fn add_object(&mut self, kind: ObjectKind, position: Position) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        self.objects.push(SpaceObject::new(id, kind, position));
        id
    }

    /// Everything to draw this tick, ship first.
    pub fn sprites(&self) -> Vec<Sprite> {
        std::iter::once(self.ship.render())
            .chain(self.objects.iter().map(|obj| obj.render()))
            .collect()
    }

    pub fn is_in_bounds(position: Position) -> bool {
        (0..GAME_WIDTH).contains(&position.x) && (0..GAME_HEIGHT).contains(&position.y)
    }

    /// Moves every object one step, then drops whatever left the board.
    pub fn update_game(&mut self, tick: u64) {
        self.ship.tick(tick);
        for obj in &mut self.objects {
            obj.tick(tick);
        }
        let before = self.objects.len();
        self.objects.retain(|obj| Self::is_in_bounds(obj.position));
        let removed = before - self.objects.len();
        if removed > 0 {
            debug!("Tick {}: {} objects left the board", tick, removed);
        }
    }

    /// Resolves ship collisions, then bullet collisions, then removes every
    /// scheduled object at once.
    pub fn check_collisions(&mut self) {
        let mut to_remove = HashSet::new();
        self.handle_ship_collisions(&mut to_remove);
        self.handle_bullet_collisions(&mut to_remove);
        self.objects.retain(|obj| !to_remove.contains(&obj.id));
    }

    fn handle_ship_collisions(&mut self, to_remove: &mut HashSet<ObjectId>) {
        let ship_position = self.ship.position;
        for obj in &self.objects {
            if obj.is_bullet() || !obj.is_at(ship_position) {
                continue;
            }
            match obj.kind {
                ObjectKind::PowerUp(power_up) => {
                    power_up.apply_effect(&mut self.ship);
                    if self.verbose {
                        self.messages.push(format!("PowerUp collected: {}", obj));
                    }
                }
                ObjectKind::Asteroid => {
                    self.ship.take_damage(ASTEROID_DAMAGE);
                    if self.verbose {
                        self.messages
                            .push(format!("Hit by {}! Health reduced by {}.", obj, ASTEROID_DAMAGE));
                    }
                }
                ObjectKind::Enemy => {
                    self.ship.take_damage(ENEMY_DAMAGE);
                    if self.verbose {
                        self.messages
                            .push(format!("Hit by {}! Health reduced by {}.", obj, ENEMY_DAMAGE));
                    }
                }
                ObjectKind::Bullet => {}
            }
            to_remove.insert(obj.id);
        }
    }

    fn handle_bullet_collisions(&mut self, to_remove: &mut HashSet<ObjectId>) {
        for bullet in self.objects.iter().filter(|obj| obj.is_bullet()) {
            let enemy = self
                .objects
                .iter()
                .find(|other| other.kind == ObjectKind::Enemy && other.is_at(bullet.position));
            if let Some(enemy) = enemy {
                self.stats.record_shot_hit();
                to_remove.insert(bullet.id);
                to_remove.insert(enemy.id);
            }

            // Asteroids absorb bullets without breaking.
            let asteroid_hit = self
                .objects
                .iter()
                .any(|other| other.kind == ObjectKind::Asteroid && other.is_at(bullet.position));
            if asteroid_hit {
                to_remove.insert(bullet.id);
            }
        }
    }

    /// Rolls for an asteroid, an enemy and a power-up, in that order.
    ///
    /// Each roll draws once from `0..100`. Only a passing roll goes on to draw
    /// the column, and for a power-up then the shield-or-health flag. Those
    /// draws are spent even if the target cell turns out to be occupied.
    pub fn spawn_objects(&mut self) {
        self.spawn_asteroid();
        self.spawn_enemy();
        self.spawn_power_up();
    }

    fn spawn_asteroid(&mut self) {
        if self.roll_passes(1.0) {
            let x = self.rng.gen_range(0..GAME_WIDTH);
            self.try_spawn(ObjectKind::Asteroid, x);
        }
    }

    fn spawn_enemy(&mut self) {
        if self.roll_passes(ENEMY_SPAWN_FACTOR) {
            let x = self.rng.gen_range(0..GAME_WIDTH);
            self.try_spawn(ObjectKind::Enemy, x);
        }
    }

    fn spawn_power_up(&mut self) {
        if self.roll_passes(POWER_UP_SPAWN_FACTOR) {
            let x = self.rng.gen_range(0..GAME_WIDTH);
            let kind = if self.rng.gen_bool(0.5) { PowerUpKind::Shield } else { PowerUpKind::Health };
            self.try_spawn(ObjectKind::PowerUp(kind), x);
        }
    }

    fn roll_passes(&mut self, factor: f64) -> bool {
        let roll = self.rng.gen_range(0..SPAWN_ROLL_RANGE);
        (roll as f64) < self.spawn_rate as f64 * factor
    }

    fn try_spawn(&mut self, kind: ObjectKind, x: i32) {
        let position = Position::new(x, 0);
        if self.is_occupied(position) {
            debug!("Spawn of {:?} at {} blocked", kind, position);
            return;
        }
        self.add_object(kind, position);
    }

    fn is_occupied(&self, position: Position) -> bool {
        self.ship.position == position || self.objects.iter().any(|obj| obj.is_at(position))
    }

    /// Advances one level when the score reaches `level * SCORE_THRESHOLD`.
    pub fn level_up(&mut self) {
        if self.ship.score < self.level * SCORE_THRESHOLD {
            return;
        }
        self.level += 1;
        self.spawn_rate += SPAWN_RATE_INCREASE;
        info!("Level {} reached, spawn rate {}%", self.level, self.spawn_rate);
        if self.verbose {
            self.messages.push(format!(
                "Level Up! Welcome to Level {}. Spawn rate increased to {}%.",
                self.level, self.spawn_rate
            ));
        }
    }

    /// Puts a bullet on the ship's cell. Does not touch the RNG.
    pub fn fire_bullet(&mut self) -> ObjectId {
        self.add_object(ObjectKind::Bullet, self.ship.position)
    }

    pub fn check_game_over(&self) -> bool {
        self.ship.health <= 0
    }
}
