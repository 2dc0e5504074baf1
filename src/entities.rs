use std::fmt;

use crate::constants::*;
use crate::types::{Direction, ObjectId, Position};

/// What the front end needs to draw one object.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sprite {
    pub position: Position,
    pub glyph: char,
}

/// Shared capabilities of everything that lives on the board.
pub trait Entity: fmt::Display {
    fn position(&self) -> Position;

    /// Advances the entity by one tick. Movement never depends on the tick value.
    fn tick(&mut self, tick: u64);

    fn render(&self) -> Sprite;
}

// --- Ship ---
#[derive(Clone, Debug, PartialEq)]
pub struct Ship {
    pub position: Position,
    pub health: i32,
    pub score: u32,
}

impl Ship {
    pub fn new() -> Self {
        Ship {
            position: Position::new(SHIP_START_X, SHIP_START_Y),
            health: SHIP_MAX_HEALTH,
            score: 0,
        }
    }

    /// Moves one cell, stopping at the board edge.
    pub fn move_in(&mut self, direction: Direction) {
        self.position = self.position.step(direction).clamp_to(GAME_WIDTH, GAME_HEIGHT);
    }

    pub fn take_damage(&mut self, amount: i32) {
        self.health -= amount;
    }

    pub fn heal(&mut self, amount: i32) {
        self.health = (self.health + amount).min(SHIP_MAX_HEALTH);
    }

    pub fn add_score(&mut self, points: u32) {
        self.score += points;
    }
}

impl Default for Ship {
    fn default() -> Self {
        Ship::new()
    }
}

impl Entity for Ship {
    fn position(&self) -> Position {
        self.position
    }

    // The ship only moves on player input.
    fn tick(&mut self, _tick: u64) {}

    fn render(&self) -> Sprite {
        Sprite { position: self.position, glyph: '^' }
    }
}

impl fmt::Display for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ship({}, {})", self.position.x, self.position.y)
    }
}

// --- Power-ups ---
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PowerUpKind {
    Health,
    Shield,
}

impl PowerUpKind {
    pub fn apply_effect(&self, ship: &mut Ship) {
        match self {
            PowerUpKind::Health => ship.heal(HEALTH_POWER_UP_AMOUNT),
            PowerUpKind::Shield => ship.add_score(SHIELD_POWER_UP_SCORE),
        }
    }
}

// --- Everything except the ship ---
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObjectKind {
    Bullet,
    Asteroid,
    Enemy,
    PowerUp(PowerUpKind),
}

impl ObjectKind {
    fn name(&self) -> &'static str {
        match self {
            ObjectKind::Bullet => "Bullet",
            ObjectKind::Asteroid => "Asteroid",
            ObjectKind::Enemy => "Enemy",
            ObjectKind::PowerUp(PowerUpKind::Health) => "HealthPowerUp",
            ObjectKind::PowerUp(PowerUpKind::Shield) => "ShieldPowerUp",
        }
    }

    fn glyph(&self) -> char {
        match self {
            ObjectKind::Bullet => '|',
            ObjectKind::Asteroid => '@',
            ObjectKind::Enemy => 'V',
            ObjectKind::PowerUp(PowerUpKind::Health) => 'H',
            ObjectKind::PowerUp(PowerUpKind::Shield) => 'S',
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpaceObject {
    pub id: ObjectId,
    pub kind: ObjectKind,
    pub position: Position,
}

impl SpaceObject {
    pub fn new(id: ObjectId, kind: ObjectKind, position: Position) -> Self {
        SpaceObject { id, kind, position }
    }

    pub fn is_bullet(&self) -> bool {
        self.kind == ObjectKind::Bullet
    }

    pub fn is_at(&self, position: Position) -> bool {
        self.position == position
    }
}

impl Entity for SpaceObject {
    fn position(&self) -> Position {
        self.position
    }

    fn tick(&mut self, _tick: u64) {
        let direction = match self.kind {
            ObjectKind::Bullet => Direction::Up,
            ObjectKind::Asteroid | ObjectKind::Enemy | ObjectKind::PowerUp(_) => Direction::Down,
        };
        self.position = self.position.step(direction);
    }

    fn render(&self) -> Sprite {
        Sprite { position: self.position, glyph: self.kind.glyph() }
    }
}

impl fmt::Display for SpaceObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}, {})", self.kind.name(), self.position.x, self.position.y)
    }
}
