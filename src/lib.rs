pub mod achievement_log;
pub mod achievements;
pub mod config;
pub mod constants;
pub mod controller;
pub mod entities;
pub mod error;
pub mod game;
pub mod rendering;
pub mod stats;
pub mod terminal_io;
pub mod types;
pub mod ui;
