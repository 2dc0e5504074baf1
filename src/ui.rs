use crate::achievements::Achievement;
use crate::entities::Sprite;

/// Front end the controller draws to and logs through.
pub trait Ui {
    /// Draws one frame; the ship is the first sprite.
    fn render(&mut self, sprites: &[Sprite]);

    fn set_stat(&mut self, name: &str, value: &str);

    fn set_achievement_progress(&mut self, name: &str, progress: f64);

    fn log(&mut self, line: &str);

    fn log_achievements(&mut self, achievements: &[Achievement]);

    /// Toggles whether the front end keeps delivering ticks.
    fn pause(&mut self);

    fn show_game_over(&mut self, report: &str);
}
