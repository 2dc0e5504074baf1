use std::collections::HashSet;
use std::fmt;

use log::{debug, info};

use crate::achievement_log::AchievementLog;
use crate::constants::*;
use crate::error::AchievementError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tier {
    Novice,
    Expert,
    Master,
}

impl Tier {
    pub fn for_progress(progress: f64) -> Self {
        if progress >= MASTERY_THRESHOLD {
            Tier::Master
        } else if progress >= EXPERT_THRESHOLD {
            Tier::Expert
        } else {
            Tier::Novice
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Novice => write!(f, "Novice"),
            Tier::Expert => write!(f, "Expert"),
            Tier::Master => write!(f, "Master"),
        }
    }
}

/// A named milestone with progress in `[0.0, 1.0]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Achievement {
    name: String,
    description: String,
    progress: f64,
}

impl Achievement {
    pub fn new(name: &str, description: &str) -> Result<Self, AchievementError> {
        if name.trim().is_empty() {
            return Err(AchievementError::EmptyName);
        }
        if description.trim().is_empty() {
            return Err(AchievementError::EmptyDescription);
        }
        Ok(Achievement {
            name: name.to_string(),
            description: description.to_string(),
            progress: 0.0,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Replaces the progress outright; a lower value is accepted.
    pub fn set_progress(&mut self, progress: f64) -> Result<(), AchievementError> {
        if !(0.0..=1.0).contains(&progress) {
            return Err(AchievementError::ProgressOutOfRange { value: progress });
        }
        self.progress = progress;
        Ok(())
    }

    pub fn tier(&self) -> Tier {
        Tier::for_progress(self.progress)
    }

    pub fn is_mastered(&self) -> bool {
        self.progress >= MASTERY_THRESHOLD
    }
}

/// The three achievements every run tracks.
pub fn default_achievements() -> Result<Vec<Achievement>, AchievementError> {
    [
        (SURVIVOR, "Survive for 2 minutes"),
        (ENEMY_EXTERMINATOR, "Destroy 20 enemies"),
        (SHARP_SHOOTER, "Achieve 99% accuracy"),
    ]
    .into_iter()
    .map(|(name, description)| Achievement::new(name, description))
    .collect()
}

/// Registry of achievements keyed by name, in registration order.
pub struct AchievementManager<L: AchievementLog> {
    sink: L,
    achievements: Vec<Achievement>,
    logged: HashSet<String>,
}

impl<L: AchievementLog> AchievementManager<L> {
    pub fn new(sink: L) -> Self {
        AchievementManager { sink, achievements: Vec::new(), logged: HashSet::new() }
    }

    pub fn with_defaults(sink: L) -> Result<Self, AchievementError> {
        let mut manager = AchievementManager::new(sink);
        for achievement in default_achievements()? {
            manager.register(achievement)?;
        }
        Ok(manager)
    }

    pub fn register(&mut self, achievement: Achievement) -> Result<(), AchievementError> {
        if self.find(achievement.name()).is_some() {
            return Err(AchievementError::DuplicateName { name: achievement.name().to_string() });
        }
        debug!("Registered achievement {}", achievement.name());
        self.achievements.push(achievement);
        Ok(())
    }

    pub fn update_progress(&mut self, name: &str, progress: f64) -> Result<(), AchievementError> {
        if name.is_empty() {
            return Err(AchievementError::EmptyName);
        }
        let achievement = self
            .achievements
            .iter_mut()
            .find(|a| a.name() == name)
            .ok_or_else(|| AchievementError::UnknownName { name: name.to_string() })?;
        achievement.set_progress(progress)
    }

    /// Writes one "Mastered: {name}" line per achievement, the first time it is mastered.
    pub fn log_mastered(&mut self) {
        for achievement in &self.achievements {
            if achievement.is_mastered() && !self.logged.contains(achievement.name()) {
                info!("Achievement mastered: {}", achievement.name());
                self.sink.save(&format!("Mastered: {}", achievement.name()));
                // Marked even if the sink failed to persist the line.
                self.logged.insert(achievement.name().to_string());
            }
        }
    }

    pub fn achievements(&self) -> Vec<Achievement> {
        self.achievements.clone()
    }

    pub fn find(&self, name: &str) -> Option<&Achievement> {
        self.achievements.iter().find(|a| a.name() == name)
    }

    pub fn sink(&self) -> &L {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut L {
        &mut self.sink
    }
}
