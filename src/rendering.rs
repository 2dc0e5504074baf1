use std::collections::VecDeque;
use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{Clear, ClearType},
};
use log::{error, info};

use crate::achievements::Achievement;
use crate::constants::{GAME_HEIGHT, GAME_WIDTH};
use crate::entities::Sprite;
use crate::ui::Ui;

const BOARD_LEFT: u16 = 1;
const BOARD_TOP: u16 = 1;
const PANEL_LEFT: u16 = GAME_WIDTH as u16 + 4;
const PANEL_WIDTH: usize = 48;
const LOG_TOP: u16 = 9;
const MAX_LOG_LINES: usize = 12;
pub const SCREEN_WIDTH: u16 = PANEL_LEFT + PANEL_WIDTH as u16;
pub const SCREEN_HEIGHT: u16 = GAME_HEIGHT as u16 + 2 + 1;

// --- ScreenBuffer for headless rendering ---
pub struct ScreenBuffer {
    pub buffer: Vec<Vec<char>>,
    pub width: u16,
    pub height: u16,
    pub cursor_x: u16,
    pub cursor_y: u16,
}

impl ScreenBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        ScreenBuffer {
            buffer: vec![vec![' '; width as usize]; height as usize],
            width,
            height,
            cursor_x: 0,
            cursor_y: 0,
        }
    }

    pub fn move_to(&mut self, x: u16, y: u16) {
        self.cursor_x = x;
        self.cursor_y = y;
    }

    pub fn write_str(&mut self, s: &str) {
        for c in s.chars() {
            if c == '\n' {
                self.cursor_x = 0;
                self.cursor_y += 1;
                continue;
            }
            if self.cursor_y < self.height && self.cursor_x < self.width {
                self.buffer[self.cursor_y as usize][self.cursor_x as usize] = c;
            }
            self.cursor_x += 1;
        }
    }

    pub fn clear(&mut self) {
        self.buffer = vec![vec![' '; self.width as usize]; self.height as usize];
        self.cursor_x = 0;
        self.cursor_y = 0;
    }

    pub fn row(&self, y: u16) -> String {
        self.buffer
            .get(y as usize)
            .map(|row| row.iter().collect::<String>())
            .unwrap_or_default()
    }

    pub fn print_to_log(&self) {
        info!("--- Screen Buffer ---");
        for row in &self.buffer {
            info!("{}", row.iter().collect::<String>().trim_end());
        }
        info!("---------------------");
    }
}

// --- OutputTarget: a real terminal or a ScreenBuffer ---
pub enum OutputTarget {
    Stdout(io::Stdout),
    ScreenBuffer(ScreenBuffer),
}

impl OutputTarget {
    pub fn execute_move_to(&mut self, command: MoveTo) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => execute!(s, command),
            OutputTarget::ScreenBuffer(sb) => {
                sb.move_to(command.0, command.1);
                Ok(())
            }
        }
    }

    pub fn clear_all(&mut self) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => execute!(s, Clear(ClearType::All)),
            OutputTarget::ScreenBuffer(sb) => {
                sb.clear();
                Ok(())
            }
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            OutputTarget::Stdout(s) => s.write(buf),
            OutputTarget::ScreenBuffer(sb) => {
                sb.write_str(&String::from_utf8_lossy(buf));
                Ok(buf.len())
            }
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => s.flush(),
            OutputTarget::ScreenBuffer(_) => Ok(()),
        }
    }
}

// --- GameGrid: the board as characters ---
pub struct GameGrid {
    pub grid: Vec<Vec<char>>,
    pub width: i32,
    pub height: i32,
}

impl GameGrid {
    pub fn new(width: i32, height: i32) -> Self {
        GameGrid { grid: vec![vec![' '; width as usize]; height as usize], width, height }
    }

    pub fn set_char(&mut self, x: i32, y: i32, c: char) {
        if (0..self.width).contains(&x) && (0..self.height).contains(&y) {
            self.grid[y as usize][x as usize] = c;
        }
    }

    pub fn clear(&mut self) {
        for row in &mut self.grid {
            row.fill(' ');
        }
    }

    /// Draws the board inside a border with its top-left corner at `(left, top)`.
    pub fn render(&self, out: &mut OutputTarget, left: u16, top: u16) -> io::Result<()> {
        let border = format!("+{}+", "-".repeat(self.width as usize));
        out.execute_move_to(MoveTo(left - 1, top - 1))?;
        write!(out, "{}", border)?;
        for (y, row) in self.grid.iter().enumerate() {
            out.execute_move_to(MoveTo(left - 1, top + y as u16))?;
            write!(out, "|{}|", row.iter().collect::<String>())?;
        }
        out.execute_move_to(MoveTo(left - 1, top + self.height as u16))?;
        write!(out, "{}", border)?;
        Ok(())
    }
}

/// Terminal front end: board on the left, stats and log on the right.
pub struct TerminalUi {
    out: OutputTarget,
    grid: GameGrid,
    stats: Vec<(String, String)>,
    achievement_progress: Vec<(String, f64)>,
    log_lines: VecDeque<String>,
    paused: bool,
    report: Option<String>,
}

impl TerminalUi {
    pub fn new(out: OutputTarget) -> Self {
        TerminalUi {
            out,
            grid: GameGrid::new(GAME_WIDTH, GAME_HEIGHT),
            stats: Vec::new(),
            achievement_progress: Vec::new(),
            log_lines: VecDeque::new(),
            paused: false,
            report: None,
        }
    }

    pub fn headless() -> Self {
        TerminalUi::new(OutputTarget::ScreenBuffer(ScreenBuffer::new(SCREEN_WIDTH, SCREEN_HEIGHT)))
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn report(&self) -> Option<&str> {
        self.report.as_deref()
    }

    pub fn screen(&self) -> Option<&ScreenBuffer> {
        match &self.out {
            OutputTarget::ScreenBuffer(sb) => Some(sb),
            OutputTarget::Stdout(_) => None,
        }
    }

    pub fn log_lines(&self) -> impl Iterator<Item = &str> {
        self.log_lines.iter().map(String::as_str)
    }

    fn push_log(&mut self, line: String) {
        if self.log_lines.len() == MAX_LOG_LINES {
            self.log_lines.pop_front();
        }
        self.log_lines.push_back(line);
    }

    fn draw_panel_line(&mut self, y: u16, text: &str) -> io::Result<()> {
        self.out.execute_move_to(MoveTo(PANEL_LEFT, y))?;
        let clipped: String = text.chars().take(PANEL_WIDTH).collect();
        write!(self.out, "{:<width$}", clipped, width = PANEL_WIDTH)
    }

    fn draw_frame(&mut self) -> io::Result<()> {
        if let OutputTarget::ScreenBuffer(sb) = &mut self.out {
            sb.clear();
        }
        self.grid.render(&mut self.out, BOARD_LEFT, BOARD_TOP)?;

        let mut y = 0;
        let stat_lines: Vec<String> =
            self.stats.iter().map(|(name, value)| format!("{}: {}", name, value)).collect();
        let progress_lines: Vec<String> = self
            .achievement_progress
            .iter()
            .map(|(name, progress)| format!("{}: {:.0}%", name, progress * 100.0))
            .collect();
        for line in stat_lines.iter().chain(progress_lines.iter()) {
            self.draw_panel_line(y, line)?;
            y += 1;
        }
        let status = if self.paused { "[PAUSED]  P to resume" } else { "WASD move  F fire  P pause" };
        self.draw_panel_line(y, status)?;

        let lines: Vec<String> = match &self.report {
            Some(report) => report.lines().map(str::to_string).collect(),
            None => self.log_lines.iter().cloned().collect(),
        };
        for (i, line) in lines.iter().enumerate().take(MAX_LOG_LINES) {
            self.draw_panel_line(LOG_TOP + i as u16, line)?;
        }
        for i in lines.len()..MAX_LOG_LINES {
            self.draw_panel_line(LOG_TOP + i as u16, "")?;
        }

        self.out.execute_move_to(MoveTo(0, SCREEN_HEIGHT - 1))?;
        self.out.flush()?;

        if let OutputTarget::ScreenBuffer(sb) = &self.out {
            sb.print_to_log();
        }
        Ok(())
    }

    pub fn clear_screen(&mut self) -> io::Result<()> {
        self.out.clear_all()
    }
}

fn upsert<T>(entries: &mut Vec<(String, T)>, name: &str, value: T) {
    match entries.iter_mut().find(|(existing, _)| existing.as_str() == name) {
        Some(entry) => entry.1 = value,
        None => entries.push((name.to_string(), value)),
    }
}

impl Ui for TerminalUi {
    fn render(&mut self, sprites: &[Sprite]) {
        self.grid.clear();
        // Ship is first; draw it last so it stays visible.
        for sprite in sprites.iter().skip(1).chain(sprites.first()) {
            self.grid.set_char(sprite.position.x, sprite.position.y, sprite.glyph);
        }
        if let Err(e) = self.draw_frame() {
            error!("Failed to draw frame: {}", e);
        }
    }

    fn set_stat(&mut self, name: &str, value: &str) {
        upsert(&mut self.stats, name, value.to_string());
    }

    fn set_achievement_progress(&mut self, name: &str, progress: f64) {
        upsert(&mut self.achievement_progress, name, progress);
    }

    fn log(&mut self, line: &str) {
        info!("{}", line);
        self.push_log(line.to_string());
    }

    fn log_achievements(&mut self, achievements: &[Achievement]) {
        for achievement in achievements {
            self.log(&format!(
                "{}: {:.0}% ({})",
                achievement.name(),
                achievement.progress() * 100.0,
                achievement.tier()
            ));
        }
    }

    fn pause(&mut self) {
        self.paused = !self.paused;
    }

    fn show_game_over(&mut self, report: &str) {
        info!("Game over\n{}", report);
        self.report = Some(report.to_string());
        if let Err(e) = self.draw_frame() {
            error!("Failed to draw game over screen: {}", e);
        }
    }
}
